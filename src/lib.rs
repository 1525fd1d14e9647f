//! LightWave Object (.lwo) decoding.
//!
//! Walks the tagged IFF container, decodes `LWO2` and legacy `LWOB`/`LWLO`
//! bodies into a renderer-agnostic [`lwo::Model`], validates and resolves
//! all cross-references, and hands the result to a host-provided
//! [`lwo::SceneBuilder`].

/// Container walking, model decoding, and the scene-builder boundary.
pub mod lwo;
