//! Generation configuration.
//!
//! Handles loading, validating, and merging `imageset.toml`. Stock defaults
//! are overridden by the user file, which is in turn overridden by command
//! line flags.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [generation]
//! max_width = 1920          # Widest rendition, in pixels
//! responsive = true         # Add breakpoint widths (420, 960, 1920) below max_width
//! transparent = false       # PNG fallback instead of JPEG
//! emit_html = true          # Include index.html with a <picture> element
//! emit_css = true           # Include styles.css with background-image rules
//! alt_text = ""             # alt attribute of the generated <img>
//! quality = 90              # JPEG quality (1-100)
//!
//! [processing]
//! max_processes = 4         # Max parallel workers (omit for auto = CPU cores)
//! ```
//!
//! Config files are sparse: override just the values you want. Unknown keys
//! are rejected to catch typos early.

use crate::imaging::Quality;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Top-level contents of `imageset.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// What to generate.
    pub generation: GenerationConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generation.validate()
    }
}

/// Every option of one generation run.
///
/// Immutable once validated; the assembler owns it for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationConfig {
    /// Use a PNG fallback (keeps alpha) instead of JPEG.
    pub transparent: bool,
    /// Add breakpoint widths below `max_width`.
    pub responsive: bool,
    /// Widest rendition, in pixels.
    pub max_width: u32,
    /// Include `index.html`.
    pub emit_html: bool,
    /// Include `styles.css`.
    pub emit_css: bool,
    /// `alt` attribute of the generated `<img>`.
    pub alt_text: String,
    /// JPEG encoding quality.
    pub quality: Quality,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            transparent: false,
            responsive: true,
            max_width: 1920,
            emit_html: true,
            emit_css: true,
            alt_text: String::new(),
            quality: Quality::default(),
        }
    }
}

impl GenerationConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_width == 0 {
            return Err(ConfigError::Validation(
                "generation.max_width must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel encoding workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> toml::Value {
    // Plain bools, integers, and strings: serialization cannot fail.
    toml::Value::try_from(Config::default())
        .unwrap_or_else(|_| toml::Value::Table(toml::map::Map::new()))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, deserialize, validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<Config, ConfigError> {
    let base = stock_defaults_value();
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from a TOML file.
///
/// A missing file is not an error: stock defaults are returned.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let overlay = if path.exists() {
        let content = fs::read_to_string(path)?;
        Some(toml::from_str::<toml::Value>(&content)?)
    } else {
        None
    };
    resolve_config(overlay)
}

/// Returns a fully-commented stock `imageset.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# imageset configuration
# =====================
#
# Every key is optional. Values shown are the defaults.
# Command line flags override anything set here.

[generation]
# Widest rendition in pixels. Must be greater than zero.
# Widths above the source width are upscaled (with a warning).
max_width = 1920

# Add the breakpoint widths 420, 960 and 1920 below max_width.
# A breakpoint is kept only when it is more than 300px narrower than
# max_width, so small max widths produce a single rendition.
responsive = true

# Encode the fallback as PNG (keeps alpha) instead of JPEG.
# The preferred format is always WebP.
transparent = false

# Include index.html with a <picture> element referencing every file.
emit_html = true

# Include styles.css with media-query background-image rules.
emit_css = true

# alt attribute of the generated <img>.
alt_text = ""

# JPEG quality, 1-100. PNG and WebP output is lossless.
quality = 90

[processing]
# Maximum parallel encoding workers. Omit to use every core.
# max_processes = 4
"##
}
