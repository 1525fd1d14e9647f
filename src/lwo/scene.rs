use std::path::Path;

use crate::lwo::decode::DecodeOptions;
use crate::lwo::file::LwoFile;
use crate::lwo::{LwoError, Model};

/// Host-side consumer of one decoded model.
///
/// The decoder never touches host APIs; everything mesh-, material- or
/// node-graph-shaped happens behind this trait. A builder is invoked at
/// most once per import, and never with a partially decoded model.
pub trait SceneBuilder {
	/// Host-side failure type.
	type Error: std::error::Error;

	/// Consume one fully resolved model.
	fn build_model(&mut self, model: &Model) -> std::result::Result<(), Self::Error>;
}

/// Failure of a full import: either the decode or the host hand-off.
#[derive(Debug, thiserror::Error)]
pub enum ImportError<E: std::error::Error> {
	/// Decoding the file failed; the builder was never invoked.
	#[error("decode: {0}")]
	Decode(#[from] LwoError),
	/// The host builder rejected the model.
	#[error("build: {0}")]
	Build(#[source] E),
}

/// Decode `path` and hand the model to `builder` exactly once.
pub fn import_file<B: SceneBuilder>(
	path: impl AsRef<Path>,
	opt: &DecodeOptions,
	builder: &mut B,
) -> std::result::Result<(), ImportError<B::Error>> {
	let model = LwoFile::open(path)?.decode(opt)?;
	builder.build_model(&model).map_err(ImportError::Build)
}
