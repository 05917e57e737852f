//! Variant rendering: one resized, re-encoded file per (width, format) pair.
//!
//! ## Traversal
//!
//! Widths are the outer loop and formats the inner loop, both in planned
//! order. For a 1920px opaque responsive set:
//!
//! ```text
//! name-420.jpeg   name-420.webp
//! name-960.jpeg   name-960.webp
//! name-1920.jpeg  name-1920.webp
//! ```
//!
//! ## Parallelism
//!
//! Each width is resized once and then encoded into every format. Widths are
//! rendered in parallel with [rayon](https://docs.rs/rayon); results are
//! collected by index, so the output order never depends on which worker
//! finishes first. Any failure aborts the whole set.
//!
//! ## Alpha
//!
//! JPEG cannot carry alpha. When the resized image has an alpha channel and
//! the target is JPEG, the alpha channel is dropped first. Transparent pixels
//! keep whatever color values they carry (usually black); no background is
//! composited.

use crate::error::GenerateError;
use crate::formats::{FormatSet, OutputFormat};
use crate::imaging::{Dimensions, ImageCodec, Quality, is_upscale, scaled_height};
use crate::naming::{BaseName, variant_filename};
use crate::sizes::SizeSet;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::mpsc::Sender;

/// One rendition of the source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Caller-facing warning that does not stop generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// A planned width exceeds the source width; quality may degrade.
    Upscale { width: u32, source_width: u32 },
}

/// Progress events sent while rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    SourceDecoded {
        width: u32,
        height: u32,
        has_alpha: bool,
    },
    VariantEncoded {
        filename: String,
        width: u32,
        height: u32,
        bytes: usize,
    },
    Upscale {
        width: u32,
        source_width: u32,
    },
}

/// Everything the renderer produced for one request.
#[derive(Debug, Clone)]
pub struct RenderedSet {
    pub variants: Vec<Variant>,
    pub source: Dimensions,
    pub advisories: Vec<Advisory>,
}

/// Render every (width, format) variant of `source`.
pub fn render_variants<C: ImageCodec>(
    codec: &C,
    source: &C::Image,
    base: &BaseName,
    sizes: &SizeSet,
    formats: &FormatSet,
    quality: Quality,
    events: Option<&Sender<RenderEvent>>,
) -> Result<RenderedSet, GenerateError> {
    let info = codec.info(source);
    let source_dims = info.dimensions;
    let multi = sizes.is_multi();

    let advisories: Vec<Advisory> = sizes
        .widths()
        .iter()
        .filter(|&&w| is_upscale(source_dims, w))
        .map(|&width| Advisory::Upscale {
            width,
            source_width: source_dims.width,
        })
        .collect();
    if let Some(tx) = events {
        for Advisory::Upscale {
            width,
            source_width,
        } in &advisories
        {
            tx.send(RenderEvent::Upscale {
                width: *width,
                source_width: *source_width,
            })
            .ok();
        }
    }

    let per_width: Vec<Vec<Variant>> = sizes
        .widths()
        .par_iter()
        .map(|&width| -> Result<Vec<Variant>, GenerateError> {
            let height = scaled_height(source_dims, width);
            let resized = codec
                .resize(source, width, height)
                .map_err(|source| GenerateError::Resize {
                    width,
                    height,
                    source,
                })?;

            let mut variants = Vec::with_capacity(2);
            for format in formats.generation_order() {
                let bytes = encode_variant(codec, &resized, format, quality)
                    .map_err(|source| GenerateError::Encode {
                        width,
                        format,
                        source,
                    })?;
                let filename = variant_filename(base, width, format, multi);

                if let Some(tx) = events {
                    tx.send(RenderEvent::VariantEncoded {
                        filename: filename.clone(),
                        width,
                        height,
                        bytes: bytes.len(),
                    })
                    .ok();
                }

                variants.push(Variant {
                    width,
                    height,
                    format,
                    filename,
                    bytes,
                });
            }
            Ok(variants)
        })
        .collect::<Result<_, _>>()?;

    Ok(RenderedSet {
        variants: per_width.into_iter().flatten().collect(),
        source: source_dims,
        advisories,
    })
}

/// Encode `image` as `format`, dropping alpha first when the target is JPEG.
pub(crate) fn encode_variant<C: ImageCodec>(
    codec: &C,
    image: &C::Image,
    format: OutputFormat,
    quality: Quality,
) -> Result<Vec<u8>, crate::imaging::CodecError> {
    if format == OutputFormat::Jpeg && codec.info(image).has_alpha {
        let flattened = codec.strip_alpha(image);
        return codec.encode(&flattened, format, quality);
    }
    codec.encode(image, format, quality)
}

/// Per-format `srcset` candidates, sorted by width.
///
/// Built fresh from one request's variants; never shared across requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlSourceIndex {
    sources: BTreeMap<OutputFormat, Vec<(String, u32)>>,
}

impl HtmlSourceIndex {
    pub fn from_variants(variants: &[Variant]) -> Self {
        let mut sources: BTreeMap<OutputFormat, Vec<(String, u32)>> = BTreeMap::new();
        for v in variants {
            sources
                .entry(v.format)
                .or_default()
                .push((v.filename.clone(), v.width));
        }
        for entries in sources.values_mut() {
            entries.sort_by_key(|(_, width)| *width);
        }
        Self { sources }
    }

    /// `(filename, width)` pairs for one format, ascending by width.
    pub fn entries(&self, format: OutputFormat) -> &[(String, u32)] {
        self.sources.get(&format).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `"a-420.webp 420w, a-960.webp 960w"`.
    pub fn srcset(&self, format: OutputFormat) -> String {
        self.entries(format)
            .iter()
            .map(|(filename, width)| format!("{} {}w", filename, width))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Widest entry of `format`.
    pub fn largest(&self, format: OutputFormat) -> Option<&str> {
        self.entries(format)
            .iter()
            .max_by_key(|(_, width)| *width)
            .map(|(filename, _)| filename.as_str())
    }
}
