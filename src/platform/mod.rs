//! Platform glue
//!
//! Host-independent helpers live here. The browser canvas surface is only
//! built for wasm32.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

/// Canonical key name as stored in the engine's input map
///
/// Browser key names come in mixed case ("ArrowLeft", "A" with shift held).
pub fn normalize_key(key: &str) -> String {
    match key {
        " " => "space".to_string(),
        other => other.to_lowercase(),
    }
}
