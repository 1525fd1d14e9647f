//! Synthetic stream builders shared by the decoder tests.

/// Build one top-level chunk: tag, u32 length, payload, pad byte if odd.
pub(crate) fn chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
	let mut out = Vec::new();
	out.extend_from_slice(tag);
	out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
	out.extend_from_slice(payload);
	if payload.len() % 2 == 1 {
		out.push(0);
	}
	out
}

/// Build one sub-chunk: tag, u16 length, payload, pad byte if odd.
pub(crate) fn sub_chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
	let mut out = Vec::new();
	out.extend_from_slice(tag);
	out.extend_from_slice(&(payload.len() as u16).to_be_bytes());
	out.extend_from_slice(payload);
	if payload.len() % 2 == 1 {
		out.push(0);
	}
	out
}

/// Wrap chunk bytes in a `FORM` container of the given kind.
pub(crate) fn form(kind: &[u8; 4], chunks: &[Vec<u8>]) -> Vec<u8> {
	let body_len: usize = chunks.iter().map(Vec::len).sum();
	let mut out = Vec::new();
	out.extend_from_slice(b"FORM");
	out.extend_from_slice(&((body_len + 4) as u32).to_be_bytes());
	out.extend_from_slice(kind);
	for item in chunks {
		out.extend_from_slice(item);
	}
	out
}

/// Zero-terminated string padded to even total length.
pub(crate) fn pad_string(text: &str) -> Vec<u8> {
	let mut out = text.as_bytes().to_vec();
	out.push(0);
	if out.len() % 2 == 1 {
		out.push(0);
	}
	out
}

/// Two-byte variable index form.
pub(crate) fn vx2(index: u16) -> Vec<u8> {
	assert!(index < 0xFF00, "two-byte vx range");
	index.to_be_bytes().to_vec()
}

/// Four-byte escaped variable index form.
pub(crate) fn vx4(index: u32) -> Vec<u8> {
	assert!(index < 1 << 24, "vx index fits 24 bits");
	let raw = index.to_be_bytes();
	vec![0xFF, raw[1], raw[2], raw[3]]
}

/// Build a `PNTS` chunk from raw file-order coordinates.
pub(crate) fn pnts(points: &[[f32; 3]]) -> Vec<u8> {
	let mut payload = Vec::new();
	for point in points {
		for axis in point {
			payload.extend_from_slice(&axis.to_be_bytes());
		}
	}
	chunk(b"PNTS", &payload)
}

/// Build a `POLS FACE` chunk from point index lists.
pub(crate) fn pols_face(polygons: &[&[u16]]) -> Vec<u8> {
	let mut payload = b"FACE".to_vec();
	for polygon in polygons {
		payload.extend_from_slice(&(polygon.len() as u16).to_be_bytes());
		for index in *polygon {
			payload.extend_from_slice(&vx2(*index));
		}
	}
	chunk(b"POLS", &payload)
}

/// Build a `PTAG SURF` chunk from (polygon, tag) pairs.
pub(crate) fn ptag_surf(entries: &[(u16, u16)]) -> Vec<u8> {
	let mut payload = b"SURF".to_vec();
	for (polygon, tag) in entries {
		payload.extend_from_slice(&vx2(*polygon));
		payload.extend_from_slice(&tag.to_be_bytes());
	}
	chunk(b"PTAG", &payload)
}

/// Build a `TAGS` chunk from names.
pub(crate) fn tags(names: &[&str]) -> Vec<u8> {
	let mut payload = Vec::new();
	for name in names {
		payload.extend_from_slice(&pad_string(name));
	}
	chunk(b"TAGS", &payload)
}

/// Build a `LAYR` chunk without a parent index.
pub(crate) fn layr(index: u16, flags: u16, pivot: [f32; 3], name: &str) -> Vec<u8> {
	let mut payload = Vec::new();
	payload.extend_from_slice(&index.to_be_bytes());
	payload.extend_from_slice(&flags.to_be_bytes());
	for axis in pivot {
		payload.extend_from_slice(&axis.to_be_bytes());
	}
	payload.extend_from_slice(&pad_string(name));
	chunk(b"LAYR", &payload)
}

/// Build a `SURF` chunk with the given sub-chunk bodies.
pub(crate) fn surf(name: &str, subs: &[Vec<u8>]) -> Vec<u8> {
	let mut payload = pad_string(name);
	payload.extend_from_slice(&pad_string(""));
	for sub in subs {
		payload.extend_from_slice(sub);
	}
	chunk(b"SURF", &payload)
}

/// Build a `VMAP` chunk from per-point entries.
pub(crate) fn vmap(sub_type: &[u8; 4], dimension: u16, name: &str, entries: &[(u16, &[f32])]) -> Vec<u8> {
	let mut payload = sub_type.to_vec();
	payload.extend_from_slice(&dimension.to_be_bytes());
	payload.extend_from_slice(&pad_string(name));
	for (point, values) in entries {
		payload.extend_from_slice(&vx2(*point));
		for value in *values {
			payload.extend_from_slice(&value.to_be_bytes());
		}
	}
	chunk(b"VMAP", &payload)
}

/// Build a `VMAD` chunk from per-corner entries.
pub(crate) fn vmad(sub_type: &[u8; 4], dimension: u16, name: &str, entries: &[(u16, u16, &[f32])]) -> Vec<u8> {
	let mut payload = sub_type.to_vec();
	payload.extend_from_slice(&dimension.to_be_bytes());
	payload.extend_from_slice(&pad_string(name));
	for (point, polygon, values) in entries {
		payload.extend_from_slice(&vx2(*point));
		payload.extend_from_slice(&vx2(*polygon));
		for value in *values {
			payload.extend_from_slice(&value.to_be_bytes());
		}
	}
	chunk(b"VMAD", &payload)
}

/// The minimal valid object: one layer, one triangle, one surface.
pub(crate) fn minimal_lwo2() -> Vec<u8> {
	form(
		b"LWO2",
		&[
			tags(&["Default"]),
			layr(0, 0, [0.0; 3], "Layer 1"),
			pnts(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
			pols_face(&[&[0, 1, 2]]),
			ptag_surf(&[(0, 0)]),
			surf("Default", &[]),
		],
	)
}
