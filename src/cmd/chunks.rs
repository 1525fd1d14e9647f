use std::path::PathBuf;

use lwodoc::lwo::{LwoFile, Result, tag_label};

use crate::cmd::util::parse_chunk_tag;

/// List top-level chunks, optionally filtered by tag.
pub fn run(path: PathBuf, tag: Option<String>) -> Result<()> {
	let file = LwoFile::open(&path)?;
	let filter = tag.as_deref().map(parse_chunk_tag).transpose()?;

	println!("path: {}", path.display());
	println!("form_kind: {}", file.header.kind.as_str());

	for chunk in file.chunks() {
		let chunk = chunk?;
		if let Some(wanted) = filter
			&& chunk.tag != wanted
		{
			continue;
		}
		println!("{:>8}  {}  {} bytes", chunk.file_offset, tag_label(chunk.tag), chunk.payload.len());
	}

	Ok(())
}
