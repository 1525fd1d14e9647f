/// Chunk listing command.
pub mod chunks;
/// File-level information command.
pub mod info;
/// Model decode and summary command.
pub mod model;
/// Surface inspection command.
pub mod surfs;
/// Shared argument parsing helpers.
pub mod util;
