use crate::lwo::testutil::{chunk, form, pad_string, sub_chunk};
use crate::lwo::{DecodeOptions, FormKind, LwoFile, PolygonKind};

fn srfs(names: &[&str]) -> Vec<u8> {
	let mut payload = Vec::new();
	for name in names {
		payload.extend_from_slice(&pad_string(name));
	}
	chunk(b"SRFS", &payload)
}

fn pnts(points: &[[f32; 3]]) -> Vec<u8> {
	let mut payload = Vec::new();
	for point in points {
		for axis in point {
			payload.extend_from_slice(&axis.to_be_bytes());
		}
	}
	chunk(b"PNTS", &payload)
}

/// Legacy polygon record: u16 count, u16 indices, inline i16 surface id.
fn pols(tag: &[u8; 4], polygons: &[(&[u16], i16)]) -> Vec<u8> {
	let mut payload = Vec::new();
	for (points, sid) in polygons {
		payload.extend_from_slice(&(points.len() as u16).to_be_bytes());
		for index in *points {
			payload.extend_from_slice(&index.to_be_bytes());
		}
		payload.extend_from_slice(&sid.to_be_bytes());
	}
	chunk(tag, &payload)
}

fn surf_legacy(name: &str, subs: &[Vec<u8>]) -> Vec<u8> {
	let mut payload = pad_string(name);
	for sub in subs {
		payload.extend_from_slice(sub);
	}
	chunk(b"SURF", &payload)
}

fn decode(bytes: Vec<u8>) -> crate::lwo::Result<crate::lwo::Model> {
	LwoFile::from_bytes(bytes)?.decode(&DecodeOptions::default())
}

#[test]
fn lwob_decodes_with_implicit_layer_and_inline_surface_ids() {
	let bytes = form(
		b"LWOB",
		&[
			srfs(&["Hull", "Glass"]),
			pnts(&[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
			pols(b"POLS", &[(&[0, 1, 2], 2)]),
			surf_legacy("Hull", &[]),
			surf_legacy("Glass", &[]),
		],
	);
	let model = decode(bytes).expect("decodes");

	assert_eq!(model.kind, FormKind::Lwob);
	assert_eq!(model.layers.len(), 1);
	assert_eq!(&*model.layers[0].name, "Layer 1");

	let polygon = &model.layers[0].polygons[0];
	assert_eq!(polygon.points, vec![2, 1, 0]);
	// Inline surface id 2 is 1-based into the SRFS list.
	let surface = model.polygon_surface(polygon).expect("surface resolves");
	assert_eq!(&*surface.name, "Glass");
}

#[test]
fn negative_inline_surface_id_still_resolves() {
	let bytes = form(
		b"LWOB",
		&[
			srfs(&["Hull"]),
			pnts(&[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
			pols(b"POLS", &[(&[0, 1, 2], -1)]),
			surf_legacy("Hull", &[]),
		],
	);
	let model = decode(bytes).expect("decodes");

	let surface = model.polygon_surface(&model.layers[0].polygons[0]).expect("resolves");
	assert_eq!(&*surface.name, "Hull");
}

#[test]
fn pchs_marks_layer_as_subdivision() {
	let bytes = form(
		b"LWOB",
		&[
			srfs(&["Hull"]),
			pnts(&[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]),
			pols(b"PCHS", &[(&[0, 1, 2], 1)]),
			surf_legacy("Hull", &[]),
		],
	);
	let model = decode(bytes).expect("decodes");

	assert!(model.layers[0].has_subds);
	assert_eq!(model.layers[0].polygons[0].kind, PolygonKind::Patch);
}

#[test]
fn legacy_surface_parameters_scale_from_integers() {
	let bytes = form(
		b"LWOB",
		&[surf_legacy(
			"Hull",
			&[
				sub_chunk(b"COLR", &[255, 128, 0, 0]),
				sub_chunk(b"DIFF", &128_i16.to_be_bytes()),
				sub_chunk(b"LUMI", &64_i16.to_be_bytes()),
				sub_chunk(b"SMAN", &0.5_f32.to_be_bytes()),
			],
		)],
	);
	let model = decode(bytes).expect("decodes");

	let surface = &model.surfaces[0];
	assert_eq!(surface.color[0], 1.0);
	assert_eq!(surface.color[1], 128.0 / 255.0);
	assert_eq!(surface.color[2], 0.0);
	assert_eq!(surface.diffuse, 0.5);
	assert_eq!(surface.luminosity, 0.25);
	assert!(surface.smooth);
}

#[test]
fn legacy_planar_textures_collect_path_and_axis() {
	let bytes = form(
		b"LWOB",
		&[surf_legacy(
			"Hull",
			&[
				sub_chunk(b"CTEX", &pad_string("Planar Image Map")),
				sub_chunk(b"TIMG", &pad_string("hull_decal.iff")),
				sub_chunk(b"TFLG", &2_i16.to_be_bytes()),
			],
		)],
	);
	let model = decode(bytes).expect("decodes");

	let textures = &model.surfaces[0].legacy_textures;
	assert_eq!(textures.len(), 1);
	assert_eq!(&*textures[0].path, "hull_decal.iff");
	assert_eq!(textures[0].axis, [false, true, false]);
}

#[test]
fn none_texture_image_is_dropped() {
	let bytes = form(
		b"LWOB",
		&[surf_legacy(
			"Hull",
			&[
				sub_chunk(b"CTEX", &pad_string("Planar Image Map")),
				sub_chunk(b"TIMG", &pad_string("(none)")),
			],
		)],
	);
	let model = decode(bytes).expect("decodes");
	assert!(model.surfaces[0].legacy_textures.is_empty());
}

#[test]
fn lwlo_layr_chunks_create_layers() {
	let mut layr_payload = Vec::new();
	layr_payload.extend_from_slice(&1_u16.to_be_bytes());
	layr_payload.extend_from_slice(&0_u16.to_be_bytes());
	layr_payload.extend_from_slice(&pad_string("Deck"));

	let bytes = form(
		b"LWLO",
		&[
			srfs(&["Hull"]),
			chunk(b"LAYR", &layr_payload),
			pnts(&[[0.0; 3]]),
		],
	);
	let model = decode(bytes).expect("decodes");

	assert_eq!(model.kind, FormKind::Lwlo);
	assert_eq!(model.layers.len(), 1);
	assert_eq!(&*model.layers[0].name, "Deck");
	assert_eq!(model.layers[0].points.len(), 1);
}
