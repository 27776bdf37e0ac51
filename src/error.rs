/// Crate-level error types for scenefix diagnostics.
use std::path::PathBuf;

/// All errors carry enough context to produce a useful diagnostic without
/// a debugger. Repair outcomes that are not failures (nothing to fix) are
/// reported through `RepairReport`, never through this type.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Minting probed past the end of the accepted identifier range.
    #[error("identifier space exhausted: no free fileID at or below {ceiling}")]
    IdSpaceExhausted {
        /// Highest identifier value minting may return.
        ceiling: i64,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON report serialization failed.
    #[error("json serialize: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// The scene path does not resolve to a readable file.
    #[error("scene file not found: {}", path.display())]
    SceneNotFound {
        /// Path that could not be read.
        path: PathBuf,
    },

    /// TOML deserialization of the config file failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// The document contains no recognizable block headers.
    #[error("no scene blocks found; not a Unity text-serialized scene?")]
    UnsupportedDocument,
}
