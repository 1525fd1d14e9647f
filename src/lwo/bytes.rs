use crate::lwo::{LwoError, Result};

/// Simple bounded cursor over an immutable byte slice.
///
/// All multi-byte reads are big-endian, matching the IFF container format.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(LwoError::TruncatedStream {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Skip `n` bytes, or to end-of-slice if fewer remain.
	pub fn skip(&mut self, n: usize) {
		self.pos = (self.pos + n).min(self.bytes.len());
	}

	/// Read a four-byte tag.
	pub fn read_tag4(&mut self) -> Result<[u8; 4]> {
		let raw = self.read_exact(4)?;
		let mut out = [0_u8; 4];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Read a single byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_exact(1)?[0])
	}

	/// Read a big-endian `u16`.
	pub fn read_u16(&mut self) -> Result<u16> {
		let raw = self.read_exact(2)?;
		let mut buf = [0_u8; 2];
		buf.copy_from_slice(raw);
		Ok(u16::from_be_bytes(buf))
	}

	/// Read a big-endian `i16`.
	pub fn read_i16(&mut self) -> Result<i16> {
		let raw = self.read_exact(2)?;
		let mut buf = [0_u8; 2];
		buf.copy_from_slice(raw);
		Ok(i16::from_be_bytes(buf))
	}

	/// Read a big-endian `u32`.
	pub fn read_u32(&mut self) -> Result<u32> {
		let raw = self.read_exact(4)?;
		let mut buf = [0_u8; 4];
		buf.copy_from_slice(raw);
		Ok(u32::from_be_bytes(buf))
	}

	/// Read a big-endian `f32`.
	pub fn read_f32(&mut self) -> Result<f32> {
		let raw = self.read_exact(4)?;
		let mut buf = [0_u8; 4];
		buf.copy_from_slice(raw);
		Ok(f32::from_be_bytes(buf))
	}

	/// Read three big-endian `f32` values.
	pub fn read_vec3(&mut self) -> Result<[f32; 3]> {
		Ok([self.read_f32()?, self.read_f32()?, self.read_f32()?])
	}

	/// Read a variable-width index (`VX`).
	///
	/// Two bytes normally; a leading `0xFF` byte escapes to a four-byte form
	/// with the index stored in the low 24 bits.
	pub fn read_vx(&mut self) -> Result<u32> {
		let first = self.read_u8()?;
		if first != 0xFF {
			let second = self.read_u8()?;
			return Ok(u32::from(first) << 8 | u32::from(second));
		}

		let raw = self.read_exact(3)?;
		Ok(u32::from(raw[0]) << 16 | u32::from(raw[1]) << 8 | u32::from(raw[2]))
	}

	/// Read a zero-terminated string padded to even total length.
	///
	/// Non-UTF-8 bytes are replaced lossily; some writers put binary data in
	/// string slots.
	pub fn read_string(&mut self) -> Result<Box<str>> {
		let bytes = self.read_string_bytes()?;
		Ok(String::from_utf8_lossy(&bytes).into_owned().into_boxed_str())
	}

	/// Read a zero-terminated, even-padded string as raw bytes.
	///
	/// Texture ordinals use bytes >= 0x80 and must not go through UTF-8.
	pub fn read_string_bytes(&mut self) -> Result<Vec<u8>> {
		let rem = &self.bytes[self.pos..];
		let Some(rel_end) = rem.iter().position(|byte| *byte == 0) else {
			return Err(LwoError::TruncatedStream {
				at: self.pos,
				need: 1,
				rem: self.remaining(),
			});
		};

		let out = rem[..rel_end].to_vec();
		// Terminator included; pad to even total length.
		let mut consumed = rel_end + 1;
		if consumed % 2 == 1 {
			consumed += 1;
		}
		self.skip(consumed);
		Ok(out)
	}
}
