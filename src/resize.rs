//! Standalone resize: one image to an explicit `width` x `height`.
//!
//! Unlike a generated set, the caller picks both dimensions, so the aspect
//! ratio is not preserved. The output keeps the format of the input file's
//! extension (`.jpg`/`.jpeg`, `.png`, `.webp`). Errors use the same
//! [`GenerateError`] classes as generation: a bad size or extension and an
//! undecodable source are client input; resize and encode failures are
//! internal.

use crate::error::GenerateError;
use crate::formats::OutputFormat;
use crate::imaging::{ImageCodec, Quality};
use crate::render::encode_variant;
use std::path::{Path, PathBuf};

/// Result of a standalone resize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizedImage {
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
}

/// Output format implied by a source path's extension.
pub fn format_for_path(path: &Path) -> Result<OutputFormat, GenerateError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let format = match ext.as_str() {
        "jpg" => Some(OutputFormat::Jpeg),
        other => OutputFormat::from_extension(other),
    };
    format.ok_or(GenerateError::UnsupportedFormat(ext))
}

/// `dir/photo.jpg` → `dir/resized_photo.jpg`.
pub fn default_output_path(source: &Path) -> PathBuf {
    let filename = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    source.with_file_name(format!("resized_{filename}"))
}

/// Decode `source_bytes`, resize to exactly `width` x `height`, re-encode.
pub fn resize_image<C: ImageCodec>(
    codec: &C,
    source_bytes: &[u8],
    width: u32,
    height: u32,
    format: OutputFormat,
    quality: Quality,
) -> Result<ResizedImage, GenerateError> {
    if width == 0 || height == 0 {
        return Err(GenerateError::InvalidConfig(format!(
            "resize target must be positive, got {width}x{height}"
        )));
    }

    let source = codec.decode(source_bytes).map_err(GenerateError::Decode)?;
    let resized = codec
        .resize(&source, width, height)
        .map_err(|source| GenerateError::Resize {
            width,
            height,
            source,
        })?;
    let bytes =
        encode_variant(codec, &resized, format, quality).map_err(|source| GenerateError::Encode {
            width,
            format,
            source,
        })?;

    Ok(ResizedImage {
        width,
        height,
        format,
        bytes,
    })
}
