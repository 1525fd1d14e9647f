use std::sync::atomic::Ordering;

use crate::lwo::bytes::Cursor;
use crate::lwo::chunk::{Chunk, ChunkIter, SubChunkIter};
use crate::lwo::decode::DecodeOptions;
use crate::lwo::model::{DecodeWarning, Layer, LegacyTexture, Model, Polygon, PolygonKind, Surface, SurfaceTag};
use crate::lwo::{FormKind, LwoError, Result};

/// Decode the body chunks of a legacy `LWOB`/`LWLO` form.
///
/// The pre-6.0 layout has no vertex maps, uses fixed 2-byte point indices,
/// stores each polygon's surface id inline (1-based, negated for detail
/// polygons), and scales most surface parameters from 8- or 16-bit
/// integers.
pub(crate) fn decode_legacy(kind: FormKind, chunks: ChunkIter<'_>, dir: Option<&std::path::Path>, opt: &DecodeOptions) -> Result<Model> {
	let mut decoder = LegacyDecoder {
		model: Model::new(kind),
	};

	for chunk in chunks {
		let chunk = chunk?;
		if let Some(cancel) = &opt.cancel
			&& cancel.load(Ordering::Relaxed)
		{
			return Err(LwoError::Cancelled { at: chunk.file_offset });
		}
		decoder.dispatch(&chunk)?;
	}

	crate::lwo::resolve::resolve(&mut decoder.model, dir)?;
	Ok(decoder.model)
}

struct LegacyDecoder {
	model: Model,
}

impl LegacyDecoder {
	fn dispatch(&mut self, chunk: &Chunk<'_>) -> Result<()> {
		match &chunk.tag {
			b"SRFS" => self.on_srfs(chunk),
			b"LAYR" => self.on_layr(chunk),
			b"PNTS" => self.on_pnts(chunk),
			b"POLS" => self.on_pols(chunk, PolygonKind::Face),
			b"PCHS" => self.on_pols(chunk, PolygonKind::Patch),
			b"SURF" => self.on_surf(chunk),
			_ => {
				self.model.warnings.push(DecodeWarning::UnknownChunk {
					tag: chunk.tag,
					len: chunk.payload.len(),
				});
				Ok(())
			}
		}
	}

	fn current_layer(&mut self) -> &mut Layer {
		if self.model.layers.is_empty() {
			// LWOB files carry no LAYR chunk at all.
			self.model.layers.push(Layer::new(0, "Layer 1".into()));
		}
		self.model.layers.last_mut().unwrap_or_else(|| unreachable!())
	}

	/// The surface name list doubles as the tag table in legacy files.
	fn on_srfs(&mut self, chunk: &Chunk<'_>) -> Result<()> {
		let mut cursor = Cursor::new(chunk.payload);
		while cursor.remaining() > 0 {
			let name = cursor.read_string()?;
			self.model.tags.push(name);
		}
		Ok(())
	}

	fn on_layr(&mut self, chunk: &Chunk<'_>) -> Result<()> {
		let mut cursor = Cursor::new(chunk.payload);
		let index = cursor.read_u16()?;
		let _flags = cursor.read_u16()?;
		let name = cursor.read_string()?;
		let name = if name.is_empty() || &*name == "noname" {
			format!("Layer {index}").into_boxed_str()
		} else {
			name
		};
		self.model.layers.push(Layer::new(index, name));
		Ok(())
	}

	fn on_pnts(&mut self, chunk: &Chunk<'_>) -> Result<()> {
		let mut cursor = Cursor::new(chunk.payload);
		let layer = self.current_layer();
		while cursor.remaining() > 0 {
			let raw = cursor.read_vec3()?;
			// Same Y/Z swap as the modern path; legacy layers have no pivot.
			layer.points.push([raw[0], raw[2], raw[1]]);
		}
		Ok(())
	}

	fn on_pols(&mut self, chunk: &Chunk<'_>, kind: PolygonKind) -> Result<()> {
		let mut cursor = Cursor::new(chunk.payload);
		let layer = self.current_layer();
		if kind != PolygonKind::Face {
			layer.has_subds = true;
		}

		while cursor.remaining() > 0 {
			let count = cursor.read_u16()?;
			let mut points = Vec::with_capacity(usize::from(count));
			for _ in 0..count {
				points.push(u32::from(cursor.read_u16()?));
			}
			points.reverse();

			// Inline surface id: 1-based, negative when detail polygons
			// follow (not modeled, the id itself still applies).
			let sid = cursor.read_i16()?;
			let tag = sid.unsigned_abs().saturating_sub(1);

			let polygon_index = layer.polygons.len() as u32;
			layer.polygons.push(Polygon {
				kind,
				points,
				tag: None,
				surface: None,
			});
			layer.surface_tags.push(SurfaceTag {
				polygon: polygon_index,
				tag,
			});
		}
		Ok(())
	}

	fn on_surf(&mut self, chunk: &Chunk<'_>) -> Result<()> {
		let mut cursor = Cursor::new(chunk.payload);
		let name = cursor.read_string()?;
		let mut surface = Surface::named(if name.is_empty() { "Default".into() } else { name });

		// Texture sub-chunks arrive as a `?TEX` opener followed by TIMG and
		// TFLG records for that texture.
		let mut texture_open = false;

		for sub in SubChunkIter::new(&chunk.payload[cursor.pos()..]) {
			let sub = sub?;
			let mut body = Cursor::new(sub.payload);
			match &sub.tag {
				b"COLR" => {
					let raw = body.read_exact(4)?;
					surface.color = [
						f32::from(raw[0]) / 255.0,
						f32::from(raw[1]) / 255.0,
						f32::from(raw[2]) / 255.0,
					];
				}
				// Percentages stored as 1/256 steps. Yes, 256 not 255.
				b"DIFF" => surface.diffuse = f32::from(body.read_i16()?) / 256.0,
				b"LUMI" => surface.luminosity = f32::from(body.read_i16()?) / 256.0,
				b"SPEC" => surface.specular = f32::from(body.read_i16()?) / 256.0,
				b"REFL" => surface.reflection = f32::from(body.read_i16()?) / 256.0,
				b"TRAN" => surface.transparency = f32::from(body.read_i16()?) / 256.0,
				b"RIND" => surface.refraction_index = body.read_f32()?,
				b"GLOS" => surface.glossiness = f32::from(body.read_i16()?),
				b"SMAN" => surface.smooth = body.read_f32()? > 0.0,
				b"CTEX" | b"DTEX" | b"STEX" | b"RTEX" | b"TTEX" | b"BTEX" => {
					texture_open = true;
				}
				b"TIMG" => {
					let path = body.read_string()?;
					if &*path != "(none)" {
						surface.legacy_textures.push(LegacyTexture {
							path,
							axis: [false; 3],
						});
					}
				}
				b"TFLG" => {
					if texture_open && let Some(texture) = surface.legacy_textures.last_mut() {
						let mapping = body.read_i16()?;
						if mapping & 1 != 0 {
							texture.axis[0] = true;
						} else if mapping & 2 != 0 {
							texture.axis[1] = true;
						} else if mapping & 4 != 0 {
							texture.axis[2] = true;
						}
					}
				}
				_ => {}
			}
		}

		self.model.surfaces.push(surface);
		Ok(())
	}
}

#[cfg(test)]
mod tests;
