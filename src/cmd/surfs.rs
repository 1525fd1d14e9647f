use std::path::PathBuf;

use lwodoc::lwo::{DecodeOptions, LwoFile, Result, Surface, tag_label};

/// Print decoded surface parameters, optionally one surface by name.
pub fn run(path: PathBuf, name: Option<String>) -> Result<()> {
	let file = LwoFile::open(&path)?;
	let model = file.decode(&DecodeOptions::default())?;

	println!("path: {}", path.display());
	println!("surface_count: {}", model.surfaces.len());

	for surface in &model.surfaces {
		if let Some(wanted) = &name
			&& &*surface.name != wanted.as_str()
		{
			continue;
		}
		print_surface(surface);
	}

	Ok(())
}

fn print_surface(surface: &Surface) {
	println!("surface: {}", surface.name);
	println!("  color: {:.3} {:.3} {:.3}", surface.color[0], surface.color[1], surface.color[2]);
	println!("  diffuse: {:.3}", surface.diffuse);
	println!("  luminosity: {:.3}", surface.luminosity);
	println!("  specular: {:.3}", surface.specular);
	println!("  reflection: {:.3}", surface.reflection);
	println!("  transparency: {:.3}", surface.transparency);
	println!("  translucency: {:.3}", surface.translucency);
	println!("  glossiness: {:.3}", surface.glossiness);
	println!("  smooth: {}", surface.smooth);
	println!("  double_sided: {}", surface.double_sided);

	for texture in &surface.textures {
		println!(
			"  texture: channel={} projection={} clip={} uv={} image={}",
			tag_label(texture.channel),
			texture.projection,
			texture.clip_id.map_or_else(|| "-".to_owned(), |id| id.to_string()),
			texture.uv_map.as_deref().unwrap_or("-"),
			texture.image.as_deref().unwrap_or("-"),
		);
	}

	for texture in &surface.legacy_textures {
		println!("  legacy_texture: path={} axis={:?}", texture.path, texture.axis);
	}
}
