use std::path::PathBuf;

use lwodoc::lwo::{DecodeOptions, Layer, LwoFile, Model, Result, tag_label};

/// Decode a file and print a model summary, plain or as JSON.
pub fn run(path: PathBuf, json: bool) -> Result<()> {
	let file = LwoFile::open(&path)?;
	let model = file.decode(&DecodeOptions::default())?;

	if json {
		let summary = ModelSummary::build(&path, &file, &model);
		println!("{}", serde_json::to_string_pretty(&summary).unwrap_or_else(|_| "{}".to_owned()));
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("form_kind: {}", file.header.kind.as_str());
	println!("tags: {}", model.tags.len());
	for layer in &model.layers {
		println!(
			"layer {}: {:?} points={} polygons={} vmaps={} cmaps={}",
			layer.index,
			layer.name,
			layer.points.len(),
			layer.polygons.len(),
			layer.vertex_maps.len(),
			layer.corner_maps.len(),
		);
		for map in &layer.vertex_maps {
			println!("  vmap {} {:?} dim={} entries={}", map.kind.as_str(), map.name, map.dimension, map.entries.len());
		}
		for map in &layer.corner_maps {
			println!("  cmap {} {:?} dim={} entries={}", map.kind.as_str(), map.name, map.dimension, map.entries.len());
		}
	}
	for surface in &model.surfaces {
		println!("surface {:?}: textures={}", surface.name, surface.textures.len());
	}
	for clip in &model.clips {
		println!("clip {}: {:?} resolved={}", clip.id, clip.source, clip.resolved.is_some());
	}
	for warning in &model.warnings {
		println!("warning: {warning}");
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct ModelSummary {
	path: String,
	form_kind: &'static str,
	tags: Vec<String>,
	layers: Vec<LayerSummary>,
	surfaces: Vec<SurfaceSummary>,
	clips: Vec<ClipSummary>,
	warnings: Vec<String>,
}

#[derive(serde::Serialize)]
struct LayerSummary {
	index: u16,
	name: String,
	points: usize,
	polygons: usize,
	vertex_maps: Vec<MapSummary>,
	corner_maps: Vec<MapSummary>,
}

#[derive(serde::Serialize)]
struct MapSummary {
	kind: &'static str,
	name: String,
	dimension: u16,
	entries: usize,
}

#[derive(serde::Serialize)]
struct SurfaceSummary {
	name: String,
	color: [f32; 3],
	diffuse: f32,
	transparency: f32,
	smooth: bool,
	textures: Vec<TextureSummary>,
}

#[derive(serde::Serialize)]
struct TextureSummary {
	channel: String,
	projection: u16,
	clip_id: Option<u32>,
	uv_map: Option<String>,
	image: Option<String>,
}

#[derive(serde::Serialize)]
struct ClipSummary {
	id: u32,
	source: String,
	resolved: bool,
}

impl ModelSummary {
	fn build(path: &PathBuf, file: &LwoFile, model: &Model) -> Self {
		Self {
			path: path.display().to_string(),
			form_kind: file.header.kind.as_str(),
			tags: model.tags.iter().map(|tag| tag.to_string()).collect(),
			layers: model.layers.iter().map(LayerSummary::build).collect(),
			surfaces: model
				.surfaces
				.iter()
				.map(|surface| SurfaceSummary {
					name: surface.name.to_string(),
					color: surface.color,
					diffuse: surface.diffuse,
					transparency: surface.transparency,
					smooth: surface.smooth,
					textures: surface
						.textures
						.iter()
						.map(|texture| TextureSummary {
							channel: tag_label(texture.channel),
							projection: texture.projection,
							clip_id: texture.clip_id,
							uv_map: texture.uv_map.as_ref().map(|name| name.to_string()),
							image: texture.image.as_ref().map(|name| name.to_string()),
						})
						.collect(),
				})
				.collect(),
			clips: model
				.clips
				.iter()
				.map(|clip| ClipSummary {
					id: clip.id,
					source: clip.source.to_string(),
					resolved: clip.resolved.is_some(),
				})
				.collect(),
			warnings: model.warnings.iter().map(|warning| warning.to_string()).collect(),
		}
	}
}

impl LayerSummary {
	fn build(layer: &Layer) -> Self {
		Self {
			index: layer.index,
			name: layer.name.to_string(),
			points: layer.points.len(),
			polygons: layer.polygons.len(),
			vertex_maps: layer
				.vertex_maps
				.iter()
				.map(|map| MapSummary {
					kind: map.kind.as_str(),
					name: map.name.to_string(),
					dimension: map.dimension,
					entries: map.entries.len(),
				})
				.collect(),
			corner_maps: layer
				.corner_maps
				.iter()
				.map(|map| MapSummary {
					kind: map.kind.as_str(),
					name: map.name.to_string(),
					dimension: map.dimension,
					entries: map.entries.len(),
				})
				.collect(),
		}
	}
}
