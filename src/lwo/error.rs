use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, LwoError>;

/// Errors produced while reading and decoding `.lwo` data.
#[derive(Debug, Error)]
pub enum LwoError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Stream does not start with the IFF `FORM` magic.
	#[error("not a lwo file (magic={magic:?})")]
	UnknownMagic {
		/// First up-to-4 bytes of the stream.
		magic: [u8; 4],
	},
	/// `FORM` container holds an unrecognized form kind.
	#[error("unsupported form kind {kind:?} (expected LWO2, LWOB or LWLO)")]
	UnsupportedFormKind {
		/// Four-byte form kind tag.
		kind: [u8; 4],
	},
	/// Not enough bytes remained for a requested read.
	#[error("truncated stream at offset {at}, need {need} bytes, remaining {rem}")]
	TruncatedStream {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Chunk payload would exceed remaining container bytes.
	#[error("chunk {tag} at offset {at} declares length {len} exceeding remaining {rem}", tag = render_tag(*tag))]
	MalformedContainer {
		/// Four-byte chunk tag.
		tag: [u8; 4],
		/// Chunk header file offset.
		at: usize,
		/// Declared payload length.
		len: u64,
		/// Remaining bytes after the header.
		rem: usize,
	},
	/// Sub-chunk payload would exceed its parent chunk.
	#[error("sub-chunk {tag} at offset {at} declares length {len} exceeding remaining {rem}", tag = render_tag(*tag))]
	MalformedSubChunk {
		/// Four-byte sub-chunk tag.
		tag: [u8; 4],
		/// Offset of the sub-chunk header within the parent payload.
		at: usize,
		/// Declared payload length.
		len: u16,
		/// Remaining bytes after the header.
		rem: usize,
	},
	/// Polygon references a point outside the layer's point table.
	#[error("polygon {polygon} in layer {layer} references point {index}, point count is {point_count}")]
	PointIndexOutOfRange {
		/// Layer index.
		layer: u16,
		/// Polygon position within the layer.
		polygon: usize,
		/// Offending point index.
		index: u32,
		/// Number of points in the layer.
		point_count: usize,
	},
	/// Vertex map entry references a point outside the layer's point table.
	#[error("map {name:?} in layer {layer} references point {index}, point count is {point_count}")]
	MapPointOutOfRange {
		/// Layer index.
		layer: u16,
		/// Vertex map name.
		name: Box<str>,
		/// Offending point index.
		index: u32,
		/// Number of points in the layer.
		point_count: usize,
	},
	/// Corner map entry references a polygon outside the layer's polygon table.
	#[error("map {name:?} in layer {layer} references polygon {index}, polygon count is {polygon_count}")]
	MapPolygonOutOfRange {
		/// Layer index.
		layer: u16,
		/// Corner map name.
		name: Box<str>,
		/// Offending polygon index.
		index: u32,
		/// Number of polygons in the layer.
		polygon_count: usize,
	},
	/// Surface tag record references a polygon outside the layer's table.
	#[error("surface tag in layer {layer} references polygon {polygon}, polygon count is {polygon_count}")]
	TagPolygonOutOfRange {
		/// Layer index.
		layer: u16,
		/// Offending polygon index.
		polygon: u32,
		/// Number of polygons in the layer.
		polygon_count: usize,
	},
	/// Surface tag index points outside the decoded `TAGS` table.
	#[error("polygon {polygon} in layer {layer} references tag {tag}, tag count is {tag_count}")]
	SurfaceTagOutOfRange {
		/// Layer index.
		layer: u16,
		/// Polygon position within the layer.
		polygon: usize,
		/// Offending tag index.
		tag: u16,
		/// Number of entries in the tag table.
		tag_count: usize,
	},
	/// Surface texture names a UV map that no layer defines.
	#[error("surface {surface:?} references undefined uv map {map:?}")]
	UndefinedUvMap {
		/// Surface name.
		surface: Box<str>,
		/// Missing UV map name.
		map: Box<str>,
	},
	/// Decode cancelled between top-level chunks.
	#[error("decode cancelled at offset {at}")]
	Cancelled {
		/// Offset of the next unprocessed chunk.
		at: usize,
	},
	/// CLI chunk tag argument was invalid.
	#[error("invalid chunk tag: {tag}")]
	InvalidChunkTag {
		/// User-provided tag string.
		tag: String,
	},
}

fn render_tag(tag: [u8; 4]) -> String {
	tag.iter().map(|byte| if byte.is_ascii_graphic() || *byte == b' ' { char::from(*byte) } else { '.' }).collect()
}
