//! # imageset
//!
//! Turns one source image into a ready-to-deploy responsive image set:
//! several widths, each encoded as a fallback format (JPEG, or PNG when
//! transparency matters) plus WebP, together with a `<picture>` snippet and a
//! background-image stylesheet that reference exactly those files. The whole
//! set is packaged as one zip archive.
//!
//! # Pipeline
//!
//! ```text
//! 1. Plan      max width + flags   →  widths × formats     (pure)
//! 2. Render    source image        →  variants             (parallel, all-or-nothing)
//! 3. Describe  variants            →  index.html, styles.css
//! 4. Package   variants + text     →  archive.zip
//! ```
//!
//! Each request owns all of its state. Nothing is cached or shared between
//! requests, so concurrent requests cannot see each other's files.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`sizes`] | Breakpoint ladder and width planning |
//! | [`formats`] | Fallback/preferred output format policy |
//! | [`naming`] | Base-name validation and the `<name>-<width>.<ext>` convention |
//! | [`imaging`] | [`ImageCodec`](imaging::ImageCodec) trait and the pure-Rust codec |
//! | [`render`] | Resizing and encoding every variant, `srcset` index |
//! | [`markup`] | `<picture>` markup via Maud |
//! | [`style`] | Background-image CSS with media queries |
//! | [`package`] | [`ArchivePackager`](package::ArchivePackager) trait and zip writer |
//! | [`assemble`] | Orchestrates one request end to end |
//! | [`resize`] | Standalone resize to an explicit width and height |
//! | [`config`] | `imageset.toml` loading, validation, merging |
//! | [`error`] | Error taxonomy and client/internal classification |
//! | [`output`] | CLI output formatting |
//!
//! # Example
//!
//! ```no_run
//! use imageset::assemble::generate_archive;
//! use imageset::config::GenerationConfig;
//! use imageset::imaging::RustCodec;
//! use imageset::naming::BaseName;
//! use imageset::package::ZipPackager;
//!
//! let source = std::fs::read("harbour.jpg")?;
//! let base = BaseName::new("harbour")?;
//! let config = GenerationConfig {
//!     alt_text: "Harbour at dusk".into(),
//!     ..GenerationConfig::default()
//! };
//! let (_set, zip) =
//!     generate_archive(&RustCodec::new(), &ZipPackager::new(), &source, &base, &config, None)?;
//! std::fs::write("harbour.zip", zip)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod assemble;
pub mod config;
pub mod error;
pub mod formats;
pub mod imaging;
pub mod markup;
pub mod naming;
pub mod output;
pub mod package;
pub mod render;
pub mod resize;
pub mod sizes;
pub mod style;

#[cfg(test)]
pub(crate) mod test_helpers;
