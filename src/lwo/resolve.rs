use std::path::Path;

use crate::lwo::model::{DecodeWarning, Model, Surface};
use crate::lwo::{LwoError, Result};

/// Resolve and validate all cross-references on a freshly decoded model.
///
/// Runs exactly once after the stream is consumed: polygon and map indices
/// are range-checked, polygon surface tags resolve through the tag table to
/// surfaces by name, and texture clip ids resolve to image paths. Index
/// violations are fatal; missing resources degrade to placeholders plus a
/// recorded warning.
pub(crate) fn resolve(model: &mut Model, dir: Option<&Path>) -> Result<()> {
	validate_geometry(model)?;
	apply_surface_tags(model)?;
	validate_texture_uv_maps(model)?;
	resolve_clips(model, dir);
	resolve_texture_images(model);
	Ok(())
}

fn validate_geometry(model: &Model) -> Result<()> {
	for layer in &model.layers {
		let point_count = layer.points.len();
		for (position, polygon) in layer.polygons.iter().enumerate() {
			for index in &polygon.points {
				if *index as usize >= point_count {
					return Err(LwoError::PointIndexOutOfRange {
						layer: layer.index,
						polygon: position,
						index: *index,
						point_count,
					});
				}
			}
		}

		for map in &layer.vertex_maps {
			for entry in &map.entries {
				if entry.point as usize >= point_count {
					return Err(LwoError::MapPointOutOfRange {
						layer: layer.index,
						name: map.name.clone(),
						index: entry.point,
						point_count,
					});
				}
			}
		}

		let polygon_count = layer.polygons.len();
		for map in &layer.corner_maps {
			for entry in &map.entries {
				if entry.point as usize >= point_count {
					return Err(LwoError::MapPointOutOfRange {
						layer: layer.index,
						name: map.name.clone(),
						index: entry.point,
						point_count,
					});
				}
				if entry.polygon as usize >= polygon_count {
					return Err(LwoError::MapPolygonOutOfRange {
						layer: layer.index,
						name: map.name.clone(),
						index: entry.polygon,
						polygon_count,
					});
				}
			}
		}
	}
	Ok(())
}

/// Apply raw `PTAG SURF` records: tag index -> tag name -> surface index.
///
/// A tag naming a surface with no `SURF` chunk gets a default-parameter
/// placeholder so the model stays usable, matching the defensive policy for
/// forward-compatible inputs.
fn apply_surface_tags(model: &mut Model) -> Result<()> {
	let tag_count = model.tags.len();

	for layer_idx in 0..model.layers.len() {
		let records = std::mem::take(&mut model.layers[layer_idx].surface_tags);
		for record in &records {
			let layer = &model.layers[layer_idx];
			let polygon_count = layer.polygons.len();
			if record.polygon as usize >= polygon_count {
				return Err(LwoError::TagPolygonOutOfRange {
					layer: layer.index,
					polygon: record.polygon,
					polygon_count,
				});
			}
			if usize::from(record.tag) >= tag_count {
				return Err(LwoError::SurfaceTagOutOfRange {
					layer: layer.index,
					polygon: record.polygon as usize,
					tag: record.tag,
					tag_count,
				});
			}

			let name = model.tags[usize::from(record.tag)].clone();
			let surface_index = match model.surface_index(&name) {
				Some(index) => index,
				None => {
					model.warnings.push(DecodeWarning::SurfaceNotDefined { name: name.clone() });
					model.surfaces.push(Surface::named(name));
					model.surfaces.len() - 1
				}
			};

			let polygon = &mut model.layers[layer_idx].polygons[record.polygon as usize];
			polygon.tag = Some(record.tag);
			polygon.surface = Some(surface_index);
		}
		model.layers[layer_idx].surface_tags = records;
	}
	Ok(())
}

/// A texture naming an explicit UV map must refer to one some layer defines.
fn validate_texture_uv_maps(model: &Model) -> Result<()> {
	for surface in &model.surfaces {
		for texture in &surface.textures {
			let Some(map_name) = &texture.uv_map else {
				continue;
			};
			let defined = model.layers.iter().any(|layer| layer.has_uv_map(map_name));
			if !defined {
				return Err(LwoError::UndefinedUvMap {
					surface: surface.name.clone(),
					map: map_name.clone(),
				});
			}
		}
	}
	Ok(())
}

/// Locate clip images next to the object file. Absence is recoverable.
fn resolve_clips(model: &mut Model, dir: Option<&Path>) {
	for clip in &mut model.clips {
		let relative = normalize_clip_path(&clip.source);
		let candidate = match dir {
			Some(dir) => dir.join(&relative),
			None => Path::new(&relative).to_path_buf(),
		};
		if candidate.is_file() {
			clip.resolved = Some(candidate);
		} else {
			model.warnings.push(DecodeWarning::MissingClipFile {
				clip_id: clip.id,
				source: clip.source.clone(),
			});
		}
	}
}

fn resolve_texture_images(model: &mut Model) {
	let mut warnings = Vec::new();
	for surface in &mut model.surfaces {
		for texture in &mut surface.textures {
			let Some(clip_id) = texture.clip_id else {
				continue;
			};
			match model.clips.iter().find(|clip| clip.id == clip_id) {
				Some(clip) => {
					let image = clip
						.resolved
						.as_ref()
						.map(|path| path.to_string_lossy().into_owned().into_boxed_str())
						.unwrap_or_else(|| clip.source.clone());
					texture.image = Some(image);
				}
				None => {
					warnings.push(DecodeWarning::MissingClip {
						surface: surface.name.clone(),
						clip_id,
					});
				}
			}
		}
	}
	model.warnings.append(&mut warnings);
}

/// Flatten LightWave's device-prefixed paths into a plain relative path.
fn normalize_clip_path(source: &str) -> String {
	let mut path = source.replace('\\', "/");
	// Drop a `Device:` prefix the way the importer family always has.
	if let Some(colon) = path.find(':') {
		path = path.split_off(colon + 1);
	}
	path.trim_start_matches('/').to_owned()
}
