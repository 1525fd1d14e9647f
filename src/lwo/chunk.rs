use crate::lwo::bytes::Cursor;
use crate::lwo::{LwoError, Result};

/// One top-level IFF chunk: tag, payload, and header offset.
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a> {
	/// Four-byte chunk tag.
	pub tag: [u8; 4],
	/// Payload bytes, excluding the odd-length pad byte.
	pub payload: &'a [u8],
	/// File offset of the chunk header.
	pub file_offset: usize,
}

impl Chunk<'_> {
	/// Payload length including the pad byte for odd lengths.
	pub fn padded_len(&self) -> usize {
		self.payload.len() + self.payload.len() % 2
	}

	/// Re-serialize the chunk exactly as it appears on disk.
	pub fn write_to(&self, out: &mut Vec<u8>) {
		out.extend_from_slice(&self.tag);
		out.extend_from_slice(&(self.payload.len() as u32).to_be_bytes());
		out.extend_from_slice(self.payload);
		if self.payload.len() % 2 == 1 {
			out.push(0);
		}
	}
}

/// Lazy iterator over top-level chunks.
///
/// Each chunk is a 4-byte tag, a big-endian `u32` length, the payload, and a
/// single pad byte when the length is odd. Restart by constructing a new
/// iterator over the same bytes.
pub struct ChunkIter<'a> {
	cursor: Cursor<'a>,
	offset_base: usize,
	done: bool,
}

impl<'a> ChunkIter<'a> {
	/// Iterate chunks starting at `offset` within `bytes`.
	pub fn new(bytes: &'a [u8], offset: usize) -> Self {
		let slice = bytes.get(offset..).unwrap_or(&[]);
		Self {
			cursor: Cursor::new(slice),
			offset_base: offset,
			done: false,
		}
	}
}

impl<'a> Iterator for ChunkIter<'a> {
	type Item = Result<Chunk<'a>>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		if self.cursor.remaining() == 0 {
			self.done = true;
			return None;
		}

		let file_offset = self.offset_base + self.cursor.pos();
		let header = (|| {
			let tag = self.cursor.read_tag4()?;
			let len = self.cursor.read_u32()?;
			Ok((tag, len))
		})();
		let (tag, len) = match header {
			Ok(value) => value,
			Err(err) => {
				self.done = true;
				return Some(Err(rebase_offset(err, self.offset_base)));
			}
		};

		let payload_len = len as usize;
		let rem = self.cursor.remaining();
		if payload_len > rem {
			self.done = true;
			return Some(Err(LwoError::MalformedContainer {
				tag,
				at: file_offset,
				len: u64::from(len),
				rem,
			}));
		}

		let payload = match self.cursor.read_exact(payload_len) {
			Ok(value) => value,
			Err(err) => {
				self.done = true;
				return Some(Err(err));
			}
		};

		// The pad byte sits outside the declared length.
		if payload_len % 2 == 1 {
			self.cursor.skip(1);
		}

		Some(Ok(Chunk { tag, payload, file_offset }))
	}
}

/// One sub-chunk within a `SURF` or texture block payload.
#[derive(Debug, Clone, Copy)]
pub struct SubChunk<'a> {
	/// Four-byte sub-chunk tag.
	pub tag: [u8; 4],
	/// Payload bytes, excluding padding.
	pub payload: &'a [u8],
	/// Offset of the sub-chunk header within the parent payload.
	pub offset: usize,
}

/// Iterator over sub-chunks: 4-byte tag, big-endian `u16` length, payload
/// padded to even length.
pub struct SubChunkIter<'a> {
	cursor: Cursor<'a>,
	done: bool,
}

impl<'a> SubChunkIter<'a> {
	/// Iterate sub-chunks over a parent payload slice.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self {
			cursor: Cursor::new(bytes),
			done: false,
		}
	}
}

impl<'a> Iterator for SubChunkIter<'a> {
	type Item = Result<SubChunk<'a>>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		// A lone pad byte can trail the final sub-chunk.
		if self.cursor.remaining() < 2 {
			self.done = true;
			return None;
		}

		let offset = self.cursor.pos();
		let header = (|| {
			let tag = self.cursor.read_tag4()?;
			let len = self.cursor.read_u16()?;
			Ok((tag, len))
		})();
		let (tag, len) = match header {
			Ok(value) => value,
			Err(err) => {
				self.done = true;
				return Some(Err(err));
			}
		};

		let payload_len = usize::from(len);
		let rem = self.cursor.remaining();
		if payload_len > rem {
			self.done = true;
			return Some(Err(LwoError::MalformedSubChunk {
				tag,
				at: offset,
				len,
				rem,
			}));
		}

		let payload = match self.cursor.read_exact(payload_len) {
			Ok(value) => value,
			Err(err) => {
				self.done = true;
				return Some(Err(err));
			}
		};

		if payload_len % 2 == 1 {
			self.cursor.skip(1);
		}

		Some(Ok(SubChunk { tag, payload, offset }))
	}
}

fn rebase_offset(err: LwoError, offset_base: usize) -> LwoError {
	match err {
		LwoError::TruncatedStream { at, need, rem } => LwoError::TruncatedStream {
			at: at + offset_base,
			need,
			rem,
		},
		other => other,
	}
}

#[cfg(test)]
mod tests;
