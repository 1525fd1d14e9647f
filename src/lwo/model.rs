use std::path::PathBuf;

use crate::lwo::FormKind;

/// Fully decoded in-memory representation of one `.lwo` file.
///
/// The model exclusively owns its tables; polygons, maps and textures refer
/// to each other by index or name only.
#[derive(Debug)]
pub struct Model {
	/// Source form kind.
	pub kind: FormKind,
	/// Tag string table from `TAGS` (or `SRFS` in legacy files).
	pub tags: Vec<Box<str>>,
	/// Geometry layers in file order.
	pub layers: Vec<Layer>,
	/// Surface definitions in file order.
	pub surfaces: Vec<Surface>,
	/// Image clips keyed by id.
	pub clips: Vec<Clip>,
	/// Non-fatal conditions recorded during decode and resolution.
	pub warnings: Vec<DecodeWarning>,
}

impl Model {
	pub(crate) fn new(kind: FormKind) -> Self {
		Self {
			kind,
			tags: Vec::new(),
			layers: Vec::new(),
			surfaces: Vec::new(),
			clips: Vec::new(),
			warnings: Vec::new(),
		}
	}

	/// Look up a surface table index by name.
	pub fn surface_index(&self, name: &str) -> Option<usize> {
		self.surfaces.iter().position(|surface| &*surface.name == name)
	}

	/// Return the resolved surface for a polygon, if it has one.
	pub fn polygon_surface(&self, polygon: &Polygon) -> Option<&Surface> {
		polygon.surface.and_then(|index| self.surfaces.get(index))
	}

	/// Look up a clip by id.
	pub fn clip(&self, id: u32) -> Option<&Clip> {
		self.clips.iter().find(|clip| clip.id == id)
	}

	/// Total point count across layers.
	pub fn point_count(&self) -> usize {
		self.layers.iter().map(|layer| layer.points.len()).sum()
	}

	/// Total polygon count across layers.
	pub fn polygon_count(&self) -> usize {
		self.layers.iter().map(|layer| layer.polygons.len()).sum()
	}
}

/// One geometry layer.
#[derive(Debug)]
pub struct Layer {
	/// Layer index from the `LAYR` chunk.
	pub index: u16,
	/// Layer name, or a generated `Layer N` fallback.
	pub name: Box<str>,
	/// Parent layer index, when present.
	pub parent: Option<i16>,
	/// Pivot point, already reordered to the output convention.
	pub pivot: [f32; 3],
	/// Whether the layer was flagged hidden in the file.
	pub hidden: bool,
	/// Whether any polygon run was a subpatch or subdivision type.
	pub has_subds: bool,
	/// Point positions, pivot-relative, Y and Z swapped from file order.
	pub points: Vec<[f32; 3]>,
	/// Polygons referencing `points` by index.
	pub polygons: Vec<Polygon>,
	/// Raw polygon-to-tag assignments, applied during resolution.
	pub surface_tags: Vec<SurfaceTag>,
	/// Per-point vertex maps.
	pub vertex_maps: Vec<VertexMap>,
	/// Per-corner (discontinuous) maps.
	pub corner_maps: Vec<CornerMap>,
	/// Catmull-Clark edge weights keyed by ordered point pair.
	pub edge_weights: Vec<EdgeWeight>,
}

impl Layer {
	pub(crate) fn new(index: u16, name: Box<str>) -> Self {
		Self {
			index,
			name,
			parent: None,
			pivot: [0.0; 3],
			hidden: false,
			has_subds: false,
			points: Vec::new(),
			polygons: Vec::new(),
			surface_tags: Vec::new(),
			vertex_maps: Vec::new(),
			corner_maps: Vec::new(),
			edge_weights: Vec::new(),
		}
	}

	/// Find a per-point map by kind and name.
	pub fn vertex_map(&self, kind: VertexMapKind, name: &str) -> Option<&VertexMap> {
		self.vertex_maps.iter().find(|map| map.kind == kind && &*map.name == name)
	}

	/// Find a per-corner map by kind and name.
	pub fn corner_map(&self, kind: VertexMapKind, name: &str) -> Option<&CornerMap> {
		self.corner_maps.iter().find(|map| map.kind == kind && &*map.name == name)
	}

	/// Whether any UV map (per-point or per-corner) has this name.
	pub fn has_uv_map(&self, name: &str) -> bool {
		self.vertex_map(VertexMapKind::Uv, name).is_some() || self.corner_map(VertexMapKind::Uv, name).is_some()
	}
}

/// Polygon geometry class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonKind {
	/// Plain face.
	Face,
	/// LightWave subpatch.
	Patch,
	/// Catmull-Clark subdivision.
	Subd,
}

/// One n-gon referencing layer points by index.
#[derive(Debug)]
pub struct Polygon {
	/// Geometry class of the `POLS` run this polygon came from.
	pub kind: PolygonKind,
	/// Point indices, reversed from file order to correct the winding.
	pub points: Vec<u32>,
	/// Raw tag index from `PTAG SURF`, before resolution.
	pub tag: Option<u16>,
	/// Resolved index into `Model::surfaces`, filled by resolution.
	pub surface: Option<usize>,
}

/// One raw `PTAG SURF` record awaiting resolution.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceTag {
	/// Absolute polygon index within the owning layer.
	pub polygon: u32,
	/// Index into the model's tag table.
	pub tag: u16,
}

/// Classification of a vertex or corner map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexMapKind {
	/// UV texture coordinates (`TXUV`), dimension 2.
	Uv,
	/// Weight values (`WGHT`), dimension 1.
	Weight,
	/// Relative morph displacements (`MORF`), dimension 3.
	Morph,
	/// Absolute morph positions (`SPOT`), dimension 3.
	AbsoluteMorph,
	/// Vertex colors (`RGB ` or `RGBA`), dimension 3 or 4.
	Color,
	/// Vertex normals (`NORM`), dimension 3.
	Normal,
}

impl VertexMapKind {
	/// Whether this kind's 3-float values are spatial vectors that follow
	/// the point axis convention.
	pub fn is_spatial(self) -> bool {
		matches!(self, Self::Morph | Self::AbsoluteMorph | Self::Normal)
	}

	/// Render the map kind as a stable label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Uv => "uv",
			Self::Weight => "weight",
			Self::Morph => "morph",
			Self::AbsoluteMorph => "absolute_morph",
			Self::Color => "color",
			Self::Normal => "normal",
		}
	}
}

/// Sparse per-point map: `point -> float tuple`.
#[derive(Debug)]
pub struct VertexMap {
	/// Map classification.
	pub kind: VertexMapKind,
	/// Map name.
	pub name: Box<str>,
	/// Values per entry (1 to 4 floats).
	pub dimension: u16,
	/// Sparse entries in file order.
	pub entries: Vec<VertexMapEntry>,
}

/// One per-point map entry.
#[derive(Debug)]
pub struct VertexMapEntry {
	/// Point index within the owning layer.
	pub point: u32,
	/// Float tuple of the map's dimension.
	pub values: Vec<f32>,
}

/// Sparse per-corner map: `(point, polygon) -> float tuple`.
#[derive(Debug)]
pub struct CornerMap {
	/// Map classification.
	pub kind: VertexMapKind,
	/// Map name.
	pub name: Box<str>,
	/// Values per entry (1 to 4 floats).
	pub dimension: u16,
	/// Sparse entries in file order.
	pub entries: Vec<CornerMapEntry>,
}

/// One per-corner map entry.
#[derive(Debug)]
pub struct CornerMapEntry {
	/// Point index within the owning layer.
	pub point: u32,
	/// Polygon index within the owning layer, already made absolute.
	pub polygon: u32,
	/// Float tuple of the map's dimension.
	pub values: Vec<f32>,
}

/// One Catmull-Clark edge weight.
///
/// The weight belongs to the edge from `from` to `to` in polygon winding
/// order.
#[derive(Debug, Clone, Copy)]
pub struct EdgeWeight {
	/// Point beginning the weighted edge.
	pub from: u32,
	/// Point ending the weighted edge.
	pub to: u32,
	/// Weight value.
	pub weight: f32,
}

/// Named material definition (LightWave "surface").
#[derive(Debug)]
pub struct Surface {
	/// Surface name.
	pub name: Box<str>,
	/// Source surface name, usually empty.
	pub source_name: Box<str>,
	/// Base color.
	pub color: [f32; 3],
	/// Diffuse level.
	pub diffuse: f32,
	/// Luminosity level.
	pub luminosity: f32,
	/// Specular level.
	pub specular: f32,
	/// Reflectivity level.
	pub reflection: f32,
	/// Reflection blurring.
	pub reflection_blur: f32,
	/// Transparency level.
	pub transparency: f32,
	/// Refraction index.
	pub refraction_index: f32,
	/// Refraction blurring.
	pub refraction_blur: f32,
	/// Translucency level.
	pub translucency: f32,
	/// Glossiness level.
	pub glossiness: f32,
	/// Diffuse sharpness.
	pub sharpness: f32,
	/// Whether a positive smoothing angle was set (`SMAN`).
	pub smooth: bool,
	/// Whether the surface renders double-sided.
	pub double_sided: bool,
	/// Image texture layers, sorted by descending ordinal.
	pub textures: Vec<TextureLayer>,
	/// Legacy planar textures from LWOB `TIMG` sub-chunks.
	pub legacy_textures: Vec<LegacyTexture>,
}

impl Surface {
	/// A surface with LightWave's default shading parameters.
	pub fn named(name: impl Into<Box<str>>) -> Self {
		Self {
			name: name.into(),
			source_name: Box::default(),
			color: [1.0, 1.0, 1.0],
			diffuse: 1.0,
			luminosity: 0.0,
			specular: 0.0,
			reflection: 0.0,
			reflection_blur: 0.0,
			transparency: 0.0,
			refraction_index: 1.0,
			refraction_blur: 0.0,
			translucency: 0.0,
			glossiness: 0.4,
			sharpness: 0.0,
			smooth: false,
			double_sided: false,
			textures: Vec::new(),
			legacy_textures: Vec::new(),
		}
	}
}

/// One image-map texture layer from a `BLOK`/`IMAP` block.
#[derive(Debug)]
pub struct TextureLayer {
	/// Raw ordinal bytes used as the layer sort key.
	pub ordinal: Vec<u8>,
	/// Target channel tag (`COLR`, `DIFF`, ...).
	pub channel: [u8; 4],
	/// Whether the layer is enabled.
	pub enabled: bool,
	/// Opacity level.
	pub opacity: f32,
	/// Opacity blend type.
	pub opacity_type: u16,
	/// Projection mode; 5 is UV.
	pub projection: u16,
	/// Projection axis for non-UV modes.
	pub axis: u16,
	/// Horizontal and vertical wrap modes.
	pub wrap: (u16, u16),
	/// UV map name from the texture's `VMAP` sub-chunk.
	pub uv_map: Option<Box<str>>,
	/// Referenced clip id from `IMAG`.
	pub clip_id: Option<u32>,
	/// Image path after clip resolution; a placeholder when missing.
	pub image: Option<Box<str>>,
}

impl TextureLayer {
	pub(crate) fn new(ordinal: Vec<u8>) -> Self {
		Self {
			ordinal,
			channel: *b"COLR",
			enabled: true,
			opacity: 1.0,
			opacity_type: 7,
			projection: 5,
			axis: 0,
			wrap: (1, 1),
			uv_map: None,
			clip_id: None,
			image: None,
		}
	}
}

/// One legacy (pre-6.0) planar texture reference.
#[derive(Debug)]
pub struct LegacyTexture {
	/// Image path from `TIMG`, relative to the object file.
	pub path: Box<str>,
	/// Projection axis flags from `TFLG`.
	pub axis: [bool; 3],
}

/// One `CLIP` still-image entry.
#[derive(Debug)]
pub struct Clip {
	/// Clip id referenced from texture `IMAG` sub-chunks.
	pub id: u32,
	/// Source path as stored in the file.
	pub source: Box<str>,
	/// Resolved on-disk path, when the file was found.
	pub resolved: Option<PathBuf>,
}

/// Non-fatal condition recorded while decoding or resolving.
#[derive(Debug)]
pub enum DecodeWarning {
	/// A top-level chunk with an unrecognized tag was skipped.
	UnknownChunk {
		/// Four-byte chunk tag.
		tag: [u8; 4],
		/// Skipped payload length.
		len: usize,
	},
	/// A `VMAP`/`VMAD`/`POLS`/`PTAG` sub-type was skipped.
	UnknownSubType {
		/// Owning chunk tag.
		chunk: [u8; 4],
		/// Unrecognized sub-type tag.
		sub_type: [u8; 4],
	},
	/// A polygon tag named a surface with no `SURF` chunk; a default
	/// surface was substituted.
	SurfaceNotDefined {
		/// Surface name from the tag table.
		name: Box<str>,
	},
	/// A texture referenced a clip id with no `CLIP` chunk.
	MissingClip {
		/// Owning surface name.
		surface: Box<str>,
		/// Unresolved clip id.
		clip_id: u32,
	},
	/// A clip's image file was not found next to the object file.
	MissingClipFile {
		/// Clip id.
		clip_id: u32,
		/// Source path as stored in the file.
		source: Box<str>,
	},
}

impl std::fmt::Display for DecodeWarning {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::UnknownChunk { tag, len } => {
				write!(f, "skipped unknown chunk {} ({len} bytes)", tag_label(*tag))
			}
			Self::UnknownSubType { chunk, sub_type } => {
				write!(f, "skipped unknown {} sub-type {}", tag_label(*chunk), tag_label(*sub_type))
			}
			Self::SurfaceNotDefined { name } => {
				write!(f, "surface {name:?} has no SURF chunk, using defaults")
			}
			Self::MissingClip { surface, clip_id } => {
				write!(f, "surface {surface:?} references missing clip {clip_id}")
			}
			Self::MissingClipFile { clip_id, source } => {
				write!(f, "clip {clip_id} image {source:?} not found, using placeholder")
			}
		}
	}
}

/// Render tag bytes as a printable label.
pub fn tag_label(tag: [u8; 4]) -> String {
	let mut out = String::new();
	for byte in tag {
		if byte == 0 {
			continue;
		}
		if byte.is_ascii_graphic() || byte == b' ' {
			out.push(char::from(byte));
		} else {
			out.push('.');
		}
	}
	if out.is_empty() { "....".to_owned() } else { out }
}
