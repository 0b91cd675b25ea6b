//! Declarative mirror configuration.
//!
//! One TOML file per installation, loaded once at startup from an explicit
//! configuration root and auto-created with defaults when absent:
//!
//! ```toml
//! [[mirror]]
//! key = "Mirror1"
//! texture_file_name = "refl.png"
//! texture_width = 256
//! texture_height = 256
//! zoom = 2.0
//! back_draw_distance = 10.0
//! front_draw_distance = 50.0
//! max_fps = 30.0
//! ```
//!
//! Validation runs at load time, before any render target exists; a bad
//! entry fails the whole load with its 1-based position in the file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MirrorError;

/// File name looked up under the configuration root.
pub const CONFIG_FILE_NAME: &str = "mirror.toml";

fn default_texture_size() -> u32 {
    512
}

fn default_zoom() -> f32 {
    1.0
}

/// Declarative settings for one mirror structure.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MirrorStructure {
    /// Name of the scene model to turn into a mirror.
    pub key: String,
    /// Suffix matched against material texture file names, not a path.
    pub texture_file_name: String,
    #[serde(default = "default_texture_size")]
    pub texture_width: u32,
    #[serde(default = "default_texture_size")]
    pub texture_height: u32,
    #[serde(default = "default_zoom")]
    pub zoom: f32,
    /// How far behind the current location the mirror keeps rendering.
    #[serde(default)]
    pub back_draw_distance: f32,
    /// How far ahead of the current location the mirror starts rendering.
    #[serde(default)]
    pub front_draw_distance: f32,
    /// Cap on how often the mirror texture is regenerated.
    pub max_fps: f64,
}

/// The full mirror configuration: an ordered list of structures.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MirrorConfig {
    #[serde(default, rename = "mirror")]
    pub mirror_structures: Vec<MirrorStructure>,
}

impl MirrorConfig {
    /// Load and validate `mirror.toml` from `config_root`.
    ///
    /// Writes an empty default file first when none exists, so a fresh
    /// installation gets a template to fill in.
    pub fn load(config_root: &Path) -> Result<Self, MirrorError> {
        let path = config_root.join(CONFIG_FILE_NAME);

        if !path.exists() {
            MirrorConfig::default().save(&path)?;
            log::info!("created default mirror config at `{}`", path.display());
        }

        let contents = fs::read_to_string(&path).map_err(|source| MirrorError::ConfigIo {
            path: path.clone(),
            source,
        })?;
        let config: MirrorConfig =
            toml::from_str(&contents).map_err(|source| MirrorError::ConfigParse {
                path: path.clone(),
                source,
            })?;

        config.validate(&path)?;

        log::info!(
            "loaded {} mirror structure(s) from `{}`",
            config.mirror_structures.len(),
            path.display()
        );
        Ok(config)
    }

    /// Serialize this configuration to `path` as TOML.
    pub fn save(&self, path: &Path) -> Result<(), MirrorError> {
        let contents =
            toml::to_string_pretty(self).map_err(|source| MirrorError::ConfigSerialize {
                path: path.to_owned(),
                reason: source.to_string(),
            })?;
        fs::write(path, contents).map_err(|source| MirrorError::ConfigIo {
            path: path.to_owned(),
            source,
        })
    }

    fn validate(&self, path: &Path) -> Result<(), MirrorError> {
        for (index, entry) in self.mirror_structures.iter().enumerate() {
            let fail = |reason: &str| {
                Err(MirrorError::ConfigEntry {
                    path: path.to_owned(),
                    index: index + 1,
                    reason: reason.to_owned(),
                })
            };

            if entry.key.trim().is_empty() {
                return fail("`key` must not be empty");
            }
            if entry.texture_file_name.trim().is_empty() {
                return fail("`texture_file_name` must not be empty");
            }
            if entry.texture_width == 0 {
                return fail("`texture_width` must be at least 1");
            }
            if entry.texture_height == 0 {
                return fail("`texture_height` must be at least 1");
            }
            // The negated comparisons also reject NaN.
            if !(entry.zoom > 0.0) {
                return fail("`zoom` must be positive");
            }
            if !(entry.back_draw_distance >= 0.0) {
                return fail("`back_draw_distance` must not be negative");
            }
            if !(entry.front_draw_distance >= 0.0) {
                return fail("`front_draw_distance` must not be negative");
            }
            if !(entry.max_fps > 0.0) {
                return fail("`max_fps` must be positive");
            }
        }

        Ok(())
    }
}
