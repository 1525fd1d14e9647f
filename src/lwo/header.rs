use crate::lwo::{LwoError, Result};

/// Root container kind declared after the `FORM` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
	/// LightWave 6+ object.
	Lwo2,
	/// LightWave 5 and earlier object.
	Lwob,
	/// LightWave 5 layered object.
	Lwlo,
}

impl FormKind {
	/// Render the form kind as a stable label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Lwo2 => "LWO2",
			Self::Lwob => "LWOB",
			Self::Lwlo => "LWLO",
		}
	}

	/// Whether this is the pre-6.0 chunk layout.
	pub fn is_legacy(self) -> bool {
		matches!(self, Self::Lwob | Self::Lwlo)
	}
}

/// Parsed `FORM` container header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormHeader {
	/// Declared form size: kind tag plus all chunk bytes.
	pub form_size: u32,
	/// Recognized form kind.
	pub kind: FormKind,
}

impl FormHeader {
	/// Header byte length: `FORM` + size + kind tag.
	pub const SIZE: usize = 12;

	/// Parse the root container header from the beginning of `bytes`.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		if bytes.len() < Self::SIZE {
			if !b"FORM".starts_with(&bytes[..bytes.len().min(4)]) {
				return Err(LwoError::UnknownMagic { magic: first4(bytes) });
			}
			return Err(LwoError::TruncatedStream {
				at: bytes.len(),
				need: Self::SIZE - bytes.len(),
				rem: 0,
			});
		}

		if &bytes[0..4] != b"FORM" {
			return Err(LwoError::UnknownMagic { magic: first4(bytes) });
		}

		let mut size_buf = [0_u8; 4];
		size_buf.copy_from_slice(&bytes[4..8]);
		let form_size = u32::from_be_bytes(size_buf);

		let mut kind_tag = [0_u8; 4];
		kind_tag.copy_from_slice(&bytes[8..12]);
		let kind = match &kind_tag {
			b"LWO2" => FormKind::Lwo2,
			b"LWOB" => FormKind::Lwob,
			b"LWLO" => FormKind::Lwlo,
			_ => return Err(LwoError::UnsupportedFormKind { kind: kind_tag }),
		};

		Ok(Self { form_size, kind })
	}
}

fn first4(bytes: &[u8]) -> [u8; 4] {
	let mut out = [0_u8; 4];
	for (slot, byte) in out.iter_mut().zip(bytes) {
		*slot = *byte;
	}
	out
}
