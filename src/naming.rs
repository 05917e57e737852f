//! Filename convention for generated variants.
//!
//! Multi-size sets name every file `<base>-<width>.<ext>`; single-size sets
//! drop the width and use `<base>.<ext>`. Filenames are a projection of the
//! structured [`Variant`](crate::render::Variant) record; nothing in the
//! pipeline reads meaning back out of them. The parser here exists so the
//! assembler can verify the convention still round-trips before packaging.
//!
//! ## Base names
//!
//! A base name is ASCII letters, digits and `_` only. That keeps the
//! convention's own separators (`-`, `.`) out of the stem, and it means the
//! name can be written into `src`, `srcset` and CSS `url('…')` verbatim:
//! - `"sunset"` → ok
//! - `"sunset_2024"` → ok
//! - `"my-photo"` → rejected
//! - `"photo.v2"` → rejected
//! - `"o'neil"`, `"photo#1"` → rejected
//!
//! [`base_name_from_path`] derives a safe base name from an uploaded file by
//! replacing every other character with `_`.

use crate::error::GenerateError;
use crate::formats::OutputFormat;
use std::fmt;
use std::path::Path;

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// A validated filename stem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseName(String);

impl BaseName {
    /// Validate a caller-supplied base name.
    pub fn new(name: &str) -> Result<Self, GenerateError> {
        let reject = |reason: String| GenerateError::InvalidBaseName {
            name: name.to_string(),
            reason,
        };
        if name.is_empty() {
            return Err(reject("must not be empty".into()));
        }
        if let Some(c) = name.chars().find(|&c| !is_name_char(c)) {
            return Err(reject(format!(
                "contains {c:?}; use only ASCII letters, digits and '_' in output names"
            )));
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Derive a base name from a source file path (its stem, sanitized).
///
/// Falls back to `"image"` when the path has no usable stem.
pub fn base_name_from_path(path: &Path) -> BaseName {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let sanitized: String = stem
        .chars()
        .map(|c| if is_name_char(c) { c } else { '_' })
        .collect();
    BaseName::new(&sanitized).unwrap_or_else(|_| BaseName("image".to_string()))
}

/// Project a variant's identity onto its filename.
pub fn variant_filename(base: &BaseName, width: u32, format: OutputFormat, multi: bool) -> String {
    if multi {
        format!("{}-{}.{}", base, width, format.extension())
    } else {
        format!("{}.{}", base, format.extension())
    }
}

/// Result of parsing a multi-size variant filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVariantName {
    pub base: String,
    pub width: u32,
    pub format: OutputFormat,
}

/// Parse `<base>-<width>.<ext>` back into its parts.
pub fn parse_variant_filename(filename: &str) -> Result<ParsedVariantName, GenerateError> {
    let bad = || GenerateError::FilenameParse(filename.to_string());

    let (stem, ext) = filename.rsplit_once('.').ok_or_else(bad)?;
    let format = OutputFormat::from_extension(ext).ok_or_else(bad)?;
    let (base, width) = stem.split_once('-').ok_or_else(bad)?;
    if base.is_empty() || width.is_empty() || !width.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    let width = width.parse::<u32>().map_err(|_| bad())?;

    Ok(ParsedVariantName {
        base: base.to_string(),
        width,
        format,
    })
}
