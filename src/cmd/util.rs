use lwodoc::lwo::{LwoError, Result};

/// Parse up-to-4 ASCII chunk tag into a space-padded `[u8; 4]`.
pub(crate) fn parse_chunk_tag(tag: &str) -> Result<[u8; 4]> {
	if tag.is_empty() || tag.len() > 4 || !tag.is_ascii() {
		return Err(LwoError::InvalidChunkTag { tag: tag.to_owned() });
	}

	let mut out = [b' '; 4];
	out[..tag.len()].copy_from_slice(tag.as_bytes());
	Ok(out)
}
