use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::lwo::bytes::Cursor;
use crate::lwo::chunk::{Chunk, ChunkIter, SubChunk, SubChunkIter};
use crate::lwo::model::{
	CornerMap, CornerMapEntry, DecodeWarning, EdgeWeight, Layer, Model, Polygon, PolygonKind, Surface, SurfaceTag,
	TextureLayer, VertexMap, VertexMapEntry, VertexMapKind,
};
use crate::lwo::{Clip, FormKind, LwoError, Result};

/// Behavior switches for a decode pass.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
	/// Decode layers flagged hidden instead of skipping them.
	pub load_hidden: bool,
	/// Cooperative cancellation flag, checked between top-level chunks.
	pub cancel: Option<Arc<AtomicBool>>,
}

/// Decoder phase. `Failed` is reachable from every other phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DecodeState {
	HeaderRead,
	BodyDecoding,
	ReferenceResolution,
	Complete,
	Failed,
}

type Handler = fn(&mut Decoder, &Chunk<'_>) -> Result<()>;

/// Static tag dispatch table. Tags absent here are skipped length-directed
/// and recorded as warnings.
const HANDLERS: &[([u8; 4], Handler)] = &[
	(*b"TAGS", Decoder::on_tags),
	(*b"LAYR", Decoder::on_layr),
	(*b"PNTS", Decoder::on_pnts),
	(*b"VMAP", Decoder::on_vmap),
	(*b"VMAD", Decoder::on_vmad),
	(*b"POLS", Decoder::on_pols),
	(*b"PTAG", Decoder::on_ptag),
	(*b"SURF", Decoder::on_surf),
	(*b"CLIP", Decoder::on_clip),
];

/// Decode the body chunks of an `LWO2` form into a fully resolved model.
///
/// Body decoding is a single linear pass; reference resolution runs once
/// afterwards over the whole model.
pub(crate) fn decode_lwo2(chunks: ChunkIter<'_>, dir: Option<&std::path::Path>, opt: &DecodeOptions) -> Result<Model> {
	let mut decoder = Decoder::new(opt.clone());
	decoder.run(chunks)?;
	debug_assert_eq!(decoder.state, DecodeState::ReferenceResolution);

	match crate::lwo::resolve::resolve(&mut decoder.model, dir) {
		Ok(()) => {
			decoder.state = DecodeState::Complete;
			Ok(decoder.model)
		}
		Err(err) => {
			decoder.state = DecodeState::Failed;
			Err(err)
		}
	}
}

pub(crate) struct Decoder {
	model: Model,
	opt: DecodeOptions,
	state: DecodeState,
	/// False while chunks belong to a skipped hidden layer.
	handle_layer: bool,
	/// Polygon count of the most recent `POLS` run, for relative ids.
	last_pols_count: usize,
	/// Set after a `POLS BONE` run so a following `PTAG SURF` is ignored.
	just_read_bones: bool,
}

impl Decoder {
	fn new(opt: DecodeOptions) -> Self {
		Self {
			model: Model::new(FormKind::Lwo2),
			opt,
			state: DecodeState::HeaderRead,
			handle_layer: true,
			last_pols_count: 0,
			just_read_bones: false,
		}
	}

	fn run(&mut self, chunks: ChunkIter<'_>) -> Result<()> {
		self.state = DecodeState::BodyDecoding;
		for chunk in chunks {
			let chunk = match chunk {
				Ok(value) => value,
				Err(err) => {
					self.state = DecodeState::Failed;
					return Err(err);
				}
			};

			if let Some(cancel) = &self.opt.cancel
				&& cancel.load(Ordering::Relaxed)
			{
				self.state = DecodeState::Failed;
				return Err(LwoError::Cancelled { at: chunk.file_offset });
			}

			if let Err(err) = self.dispatch(&chunk) {
				self.state = DecodeState::Failed;
				return Err(err);
			}
		}

		self.state = DecodeState::ReferenceResolution;
		Ok(())
	}

	fn dispatch(&mut self, chunk: &Chunk<'_>) -> Result<()> {
		let Some((_, handler)) = HANDLERS.iter().find(|(tag, _)| *tag == chunk.tag) else {
			self.model.warnings.push(DecodeWarning::UnknownChunk {
				tag: chunk.tag,
				len: chunk.payload.len(),
			});
			return Ok(());
		};
		handler(self, chunk)
	}

	/// Return the current layer, creating an implicit one for streams that
	/// carry geometry before any `LAYR` chunk.
	fn current_layer(&mut self) -> &mut Layer {
		if self.model.layers.is_empty() {
			self.model.layers.push(Layer::new(0, "Layer 1".into()));
		}
		self.model.layers.last_mut().unwrap_or_else(|| unreachable!())
	}

	fn on_tags(&mut self, chunk: &Chunk<'_>) -> Result<()> {
		let mut cursor = Cursor::new(chunk.payload);
		while cursor.remaining() > 0 {
			let tag = cursor.read_string()?;
			self.model.tags.push(tag);
		}
		Ok(())
	}

	fn on_layr(&mut self, chunk: &Chunk<'_>) -> Result<()> {
		let mut cursor = Cursor::new(chunk.payload);
		let index = cursor.read_u16()?;
		let flags = cursor.read_u16()?;

		let hidden = flags > 0;
		if hidden && !self.opt.load_hidden {
			self.handle_layer = false;
			return Ok(());
		}
		self.handle_layer = true;

		let pivot = cursor.read_vec3()?;
		let name = cursor.read_string()?;
		let name = if name.is_empty() {
			format!("Layer {}", index + 1).into_boxed_str()
		} else {
			name
		};

		let mut layer = Layer::new(index, name);
		// Swap Y and Z to match the output pitch convention.
		layer.pivot = [pivot[0], pivot[2], pivot[1]];
		layer.hidden = hidden;
		if cursor.remaining() == 2 {
			layer.parent = Some(cursor.read_i16()?);
		}

		self.model.layers.push(layer);
		Ok(())
	}

	fn on_pnts(&mut self, chunk: &Chunk<'_>) -> Result<()> {
		if !self.handle_layer {
			return Ok(());
		}

		let mut cursor = Cursor::new(chunk.payload);
		let pivot = self.current_layer().pivot;
		let layer = self.current_layer();
		while cursor.remaining() > 0 {
			let raw = cursor.read_vec3()?;
			// Y/Z swap; the pivot is already in swapped order.
			layer.points.push([raw[0] - pivot[0], raw[2] - pivot[1], raw[1] - pivot[2]]);
		}
		Ok(())
	}

	fn on_vmap(&mut self, chunk: &Chunk<'_>) -> Result<()> {
		if !self.handle_layer {
			return Ok(());
		}

		let mut cursor = Cursor::new(chunk.payload);
		let sub_type = cursor.read_tag4()?;
		let Some(kind) = vmap_kind(sub_type) else {
			self.model.warnings.push(DecodeWarning::UnknownSubType {
				chunk: chunk.tag,
				sub_type,
			});
			return Ok(());
		};

		let dimension = cursor.read_u16()?;
		let name = cursor.read_string()?;

		let mut entries = Vec::new();
		while cursor.remaining() > 0 {
			let point = cursor.read_vx()?;
			let mut values = Vec::with_capacity(usize::from(dimension));
			for _ in 0..dimension {
				values.push(cursor.read_f32()?);
			}
			// Spatial vectors get the same Y/Z swap as points.
			if kind.is_spatial() && values.len() == 3 {
				values.swap(1, 2);
			}
			entries.push(VertexMapEntry { point, values });
		}

		self.current_layer().vertex_maps.push(VertexMap {
			kind,
			name,
			dimension,
			entries,
		});
		Ok(())
	}

	fn on_vmad(&mut self, chunk: &Chunk<'_>) -> Result<()> {
		if !self.handle_layer {
			return Ok(());
		}

		let mut cursor = Cursor::new(chunk.payload);
		let sub_type = cursor.read_tag4()?;
		let Some(kind) = vmap_kind(sub_type) else {
			self.model.warnings.push(DecodeWarning::UnknownSubType {
				chunk: chunk.tag,
				sub_type,
			});
			return Ok(());
		};

		let dimension = cursor.read_u16()?;
		let name = cursor.read_string()?;

		if kind == VertexMapKind::Weight {
			return self.read_edge_weights(&mut cursor, &name);
		}

		// Discontinuous polygon ids can be relative to the last POLS run.
		let last_pols_count = self.last_pols_count;
		let abs_base = match kind {
			VertexMapKind::Uv | VertexMapKind::Color => {
				let layer = self.current_layer();
				(layer.polygons.len() - last_pols_count.min(layer.polygons.len())) as u32
			}
			_ => 0,
		};

		let mut entries = Vec::new();
		while cursor.remaining() > 0 {
			let point = cursor.read_vx()?;
			let polygon = cursor.read_vx()? + abs_base;
			let mut values = Vec::with_capacity(usize::from(dimension));
			for _ in 0..dimension {
				values.push(cursor.read_f32()?);
			}
			// Spatial vectors get the same Y/Z swap as points.
			if kind.is_spatial() && values.len() == 3 {
				values.swap(1, 2);
			}
			entries.push(CornerMapEntry { point, polygon, values });
		}

		self.current_layer().corner_maps.push(CornerMap {
			kind,
			name,
			dimension,
			entries,
		});
		Ok(())
	}

	/// Catmull-Clark edge weights arrive as a `VMAD WGHT` named
	/// "Edge Weight". The weight belongs to the edge leaving the named
	/// point in winding order.
	fn read_edge_weights(&mut self, cursor: &mut Cursor<'_>, name: &str) -> Result<()> {
		if name != "Edge Weight" {
			return Ok(());
		}

		while cursor.remaining() > 0 {
			let point = cursor.read_vx()?;
			let polygon = cursor.read_vx()?;
			let weight = cursor.read_f32()?;

			let layer = self.current_layer();
			let Some(face) = layer.polygons.get(polygon as usize) else {
				continue;
			};
			let Some(first_idx) = face.points.iter().position(|item| *item == point) else {
				continue;
			};
			let second = if first_idx == face.points.len() - 1 {
				face.points[0]
			} else {
				face.points[first_idx + 1]
			};
			layer.edge_weights.push(EdgeWeight {
				from: second,
				to: point,
				weight,
			});
		}
		Ok(())
	}

	fn on_pols(&mut self, chunk: &Chunk<'_>) -> Result<()> {
		if !self.handle_layer {
			return Ok(());
		}

		let mut cursor = Cursor::new(chunk.payload);
		let sub_type = cursor.read_tag4()?;
		self.just_read_bones = false;

		let kind = match &sub_type {
			b"FACE" => PolygonKind::Face,
			b"PTCH" => PolygonKind::Patch,
			b"SUBD" => PolygonKind::Subd,
			b"BONE" => {
				// Skelegon rigs are host-side; skip the run but remember it
				// so the following PTAG SURF is not misapplied.
				self.just_read_bones = true;
				self.model.warnings.push(DecodeWarning::UnknownSubType {
					chunk: chunk.tag,
					sub_type,
				});
				return Ok(());
			}
			_ => {
				self.model.warnings.push(DecodeWarning::UnknownSubType {
					chunk: chunk.tag,
					sub_type,
				});
				return Ok(());
			}
		};

		let layer = self.current_layer();
		if kind != PolygonKind::Face {
			layer.has_subds = true;
		}

		let before = layer.polygons.len();
		while cursor.remaining() > 0 {
			let count = cursor.read_u16()? & 0x03FF;
			let mut points = Vec::with_capacity(usize::from(count));
			for _ in 0..count {
				points.push(cursor.read_vx()?);
			}
			// Reverse to correct the winding for the output convention.
			points.reverse();
			layer.polygons.push(Polygon {
				kind,
				points,
				tag: None,
				surface: None,
			});
		}

		self.last_pols_count = layer.polygons.len() - before;
		Ok(())
	}

	fn on_ptag(&mut self, chunk: &Chunk<'_>) -> Result<()> {
		if !self.handle_layer {
			return Ok(());
		}

		let mut cursor = Cursor::new(chunk.payload);
		let tag_type = cursor.read_tag4()?;
		if &tag_type != b"SURF" || self.just_read_bones {
			if &tag_type != b"SURF" {
				self.model.warnings.push(DecodeWarning::UnknownSubType {
					chunk: chunk.tag,
					sub_type: tag_type,
				});
			}
			return Ok(());
		}

		let last_pols_count = self.last_pols_count;
		let layer = self.current_layer();
		let abs_base = (layer.polygons.len() - last_pols_count.min(layer.polygons.len())) as u32;
		while cursor.remaining() > 0 {
			let polygon = cursor.read_vx()? + abs_base;
			let tag = cursor.read_u16()?;
			layer.surface_tags.push(SurfaceTag { polygon, tag });
		}
		Ok(())
	}

	fn on_surf(&mut self, chunk: &Chunk<'_>) -> Result<()> {
		let mut cursor = Cursor::new(chunk.payload);
		let name = cursor.read_string()?;
		let source_name = cursor.read_string()?;

		let mut surface = Surface::named(if name.is_empty() { "Default".into() } else { name });
		surface.source_name = source_name;

		for sub in SubChunkIter::new(&chunk.payload[cursor.pos()..]) {
			let sub = sub?;
			let mut body = Cursor::new(sub.payload);
			match &sub.tag {
				b"COLR" => surface.color = body.read_vec3()?,
				b"DIFF" => surface.diffuse = body.read_f32()?,
				b"LUMI" => surface.luminosity = body.read_f32()?,
				b"SPEC" => surface.specular = body.read_f32()?,
				b"REFL" => surface.reflection = body.read_f32()?,
				b"RBLR" => surface.reflection_blur = body.read_f32()?,
				b"TRAN" => surface.transparency = body.read_f32()?,
				b"RIND" => surface.refraction_index = body.read_f32()?,
				b"TBLR" => surface.refraction_blur = body.read_f32()?,
				b"TRNL" => surface.translucency = body.read_f32()?,
				b"GLOS" => surface.glossiness = body.read_f32()?,
				b"SHRP" => surface.sharpness = body.read_f32()?,
				b"SMAN" => surface.smooth = body.read_f32()? > 0.0,
				b"SIDE" => surface.double_sided = body.read_u16()? == 3,
				b"BLOK" => {
					if let Some(texture) = read_texture_block(&sub)? {
						surface.textures.push(texture);
					}
				}
				// Envelopes and other shading sub-chunks are not modeled.
				_ => {}
			}
		}

		// Highest ordinal first; ties keep file order.
		surface.textures.sort_by(|left, right| right.ordinal.cmp(&left.ordinal));
		self.model.surfaces.push(surface);
		Ok(())
	}

	fn on_clip(&mut self, chunk: &Chunk<'_>) -> Result<()> {
		let mut cursor = Cursor::new(chunk.payload);
		let id = cursor.read_u32()?;

		for sub in SubChunkIter::new(&chunk.payload[cursor.pos()..]) {
			let sub = sub?;
			if &sub.tag == b"STIL" {
				let mut body = Cursor::new(sub.payload);
				let source = body.read_string()?;
				self.model.clips.push(Clip {
					id,
					source,
					resolved: None,
				});
				return Ok(());
			}
		}
		Ok(())
	}
}

fn vmap_kind(sub_type: [u8; 4]) -> Option<VertexMapKind> {
	match &sub_type {
		b"TXUV" => Some(VertexMapKind::Uv),
		b"WGHT" => Some(VertexMapKind::Weight),
		b"MORF" => Some(VertexMapKind::Morph),
		b"SPOT" => Some(VertexMapKind::AbsoluteMorph),
		b"RGB " | b"RGBA" => Some(VertexMapKind::Color),
		b"NORM" => Some(VertexMapKind::Normal),
		_ => None,
	}
}

/// Parse one `BLOK` sub-chunk into a texture layer.
///
/// Only `IMAP` image-map blocks are modeled; procedural and gradient
/// blocks return `None`.
fn read_texture_block(block: &SubChunk<'_>) -> Result<Option<TextureLayer>> {
	let mut cursor = Cursor::new(block.payload);
	let block_type = cursor.read_tag4()?;
	if &block_type != b"IMAP" {
		return Ok(None);
	}

	// The IMAP header sub-chunk wraps the ordinal string followed by header
	// sub-chunks; the attribute sub-chunks after it chain seamlessly, so a
	// flat walk from the end of the ordinal covers both.
	let _header_len = cursor.read_u16()?;
	let ordinal = cursor.read_string_bytes()?;
	let mut texture = TextureLayer::new(ordinal);

	for sub in SubChunkIter::new(&block.payload[cursor.pos()..]) {
		let sub = sub?;
		let mut body = Cursor::new(sub.payload);
		match &sub.tag {
			b"CHAN" => texture.channel = body.read_tag4()?,
			b"OPAC" => {
				texture.opacity_type = body.read_u16()?;
				texture.opacity = body.read_f32()?;
			}
			b"ENAB" => texture.enabled = body.read_u16()? != 0,
			b"IMAG" => texture.clip_id = Some(body.read_vx()?),
			b"PROJ" => texture.projection = body.read_u16()?,
			b"AXIS" => texture.axis = body.read_u16()?,
			b"WRAP" => texture.wrap = (body.read_u16()?, body.read_u16()?),
			b"VMAP" => texture.uv_map = Some(body.read_string()?),
			// TMAP placement and procedural parameters are not modeled.
			_ => {}
		}
	}

	Ok(Some(texture))
}
