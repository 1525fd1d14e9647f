use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::lwo::chunk::ChunkIter;
use crate::lwo::decode::{DecodeOptions, decode_lwo2};
use crate::lwo::legacy::decode_legacy;
use crate::lwo::{FormHeader, Model, Result};

/// An opened `.lwo` file: parsed FORM header plus the raw bytes.
#[derive(Debug)]
pub struct LwoFile {
	/// Parsed root container header.
	pub header: FormHeader,
	bytes: Vec<u8>,
	dir: Option<PathBuf>,
}

impl LwoFile {
	/// Open and header-check a file on disk.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let bytes = fs::read(path)?;
		let header = FormHeader::parse(&bytes)?;
		Ok(Self {
			header,
			bytes,
			dir: path.parent().map(Path::to_path_buf),
		})
	}

	/// Wrap an in-memory byte buffer. Clip files resolve against the
	/// current directory.
	pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
		let header = FormHeader::parse(&bytes)?;
		Ok(Self {
			header,
			bytes,
			dir: None,
		})
	}

	/// Return the raw file bytes.
	pub fn bytes(&self) -> &[u8] {
		&self.bytes
	}

	/// Iterate top-level chunks inside the FORM container.
	///
	/// Bytes past the declared form size are ignored.
	pub fn chunks(&self) -> ChunkIter<'_> {
		let end = 8_usize
			.saturating_add(self.header.form_size as usize)
			.min(self.bytes.len());
		ChunkIter::new(&self.bytes[..end], FormHeader::SIZE)
	}

	/// Walk the chunk sequence and count tags.
	pub fn scan_chunk_stats(&self) -> Result<ChunkStats> {
		let mut stats = ChunkStats {
			chunk_count: 0,
			tags: HashMap::new(),
		};

		for chunk in self.chunks() {
			let chunk = chunk?;
			stats.chunk_count += 1;
			*stats.tags.entry(chunk.tag).or_insert(0) += 1;
		}

		Ok(stats)
	}

	/// Decode the whole file into a fully resolved model.
	pub fn decode(&self, opt: &DecodeOptions) -> Result<Model> {
		let dir = self.dir.as_deref();
		if self.header.kind.is_legacy() {
			decode_legacy(self.header.kind, self.chunks(), dir, opt)
		} else {
			decode_lwo2(self.chunks(), dir, opt)
		}
	}
}

/// Tag statistics from a chunk scan.
pub struct ChunkStats {
	/// Number of top-level chunks.
	pub chunk_count: u32,
	/// Occurrences per chunk tag.
	pub tags: HashMap<[u8; 4], u32>,
}

/// Decode one file with default options: the single-call import contract.
pub fn load_model(path: impl AsRef<Path>) -> Result<Model> {
	LwoFile::open(path)?.decode(&DecodeOptions::default())
}
