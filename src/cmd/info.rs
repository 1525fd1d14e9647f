use std::path::PathBuf;

use lwodoc::lwo::{DecodeOptions, LwoFile, Result, tag_label};

/// Print high-level file and chunk statistics.
pub fn run(path: PathBuf) -> Result<()> {
	let file = LwoFile::open(&path)?;
	let stats = file.scan_chunk_stats()?;
	let model = file.decode(&DecodeOptions::default())?;

	println!("path: {}", path.display());
	println!("file_size: {}", file.bytes().len());
	println!("form_kind: {}", file.header.kind.as_str());
	println!("form_size: {}", file.header.form_size);
	println!("chunk_count: {}", stats.chunk_count);
	println!("layer_count: {}", model.layers.len());
	println!("point_count: {}", model.point_count());
	println!("polygon_count: {}", model.polygon_count());
	println!("surface_count: {}", model.surfaces.len());
	println!("clip_count: {}", model.clips.len());
	println!("warning_count: {}", model.warnings.len());

	let mut entries: Vec<_> = stats.tags.into_iter().collect();
	entries.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0)));

	println!("top_tags:");
	for (tag, count) in entries.into_iter().take(12) {
		println!("  {}: {}", tag_label(tag), count);
	}

	for warning in &model.warnings {
		println!("warning: {warning}");
	}

	Ok(())
}
