//! Error taxonomy for the mirror subsystem.
//!
//! Configuration and resolution errors are fatal to subsystem startup and
//! abort before any target is created; GPU errors surface per target at
//! render time and are isolated by the caller.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the mirror render-target subsystem.
#[derive(Debug, Error)]
pub enum MirrorError {
    /// The configuration file could not be read or written.
    #[error("failed to access mirror config `{path}`: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML.
    #[error("failed to parse mirror config `{path}`: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// A default configuration file could not be serialized.
    #[error("failed to write mirror config `{path}`: {reason}")]
    ConfigSerialize { path: PathBuf, reason: String },

    /// A configuration entry failed validation. `index` is 1-based.
    #[error("mirror config `{path}`, entry #{index}: {reason}")]
    ConfigEntry {
        path: PathBuf,
        index: usize,
        reason: String,
    },

    /// A configured structure key has no matching model in the scenario.
    #[error("no model named `{0}` in the scenario model table")]
    ModelNotFound(String),

    /// The same model was registered as a mirror twice.
    #[error("model `{0}` is already registered as a mirror")]
    DuplicateModel(String),

    /// The requested render-target size exceeds what the device supports.
    #[error("render target {width}x{height} exceeds the device texture limit of {max}")]
    TextureAllocation { width: u32, height: u32, max: u32 },

    /// A camera or track transform could not be inverted.
    #[error("transform is singular and cannot be inverted")]
    SingularTransform,
}
