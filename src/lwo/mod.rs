mod bytes;
mod chunk;
mod decode;
mod error;
mod file;
mod header;
mod legacy;
mod model;
mod resolve;
mod scene;
#[cfg(test)]
pub(crate) mod testutil;

/// Bounded big-endian byte cursor.
pub use bytes::Cursor;
/// Chunk container and iterator types.
pub use chunk::{Chunk, ChunkIter, SubChunk, SubChunkIter};
/// Decode entry options.
pub use decode::DecodeOptions;
/// Error and result aliases.
pub use error::{LwoError, Result};
/// File abstraction, chunk statistics, and the one-call import contract.
pub use file::{ChunkStats, LwoFile, load_model};
/// Root container header representation.
pub use header::{FormHeader, FormKind};
/// Decoded model types.
pub use model::{
	Clip, CornerMap, CornerMapEntry, DecodeWarning, EdgeWeight, Layer, LegacyTexture, Model, Polygon, PolygonKind,
	Surface, SurfaceTag, TextureLayer, VertexMap, VertexMapEntry, VertexMapKind, tag_label,
};
/// Scene-builder boundary types and entry point.
pub use scene::{ImportError, SceneBuilder, import_file};
