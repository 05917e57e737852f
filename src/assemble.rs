//! Set assembly: one request in, one artifact set (or archive) out.
//!
//! ```text
//! validate config ─▶ plan sizes ─▶ select formats ─▶ decode ─▶ render variants
//!        ─▶ verify names ─▶ index.html? ─▶ styles.css? ─▶ pack
//! ```
//!
//! Everything here is request-scoped: sizes, formats and the `srcset` index
//! are built fresh on every call and dropped with the result. Any error
//! aborts the request before anything is packaged.

use crate::config::GenerationConfig;
use crate::error::GenerateError;
use crate::formats::{self, FormatSet};
use crate::imaging::{Dimensions, ImageCodec};
use crate::markup;
use crate::naming::{BaseName, parse_variant_filename, variant_filename};
use crate::package::{ArchiveEntry, ArchivePackager};
use crate::render::{Advisory, HtmlSourceIndex, RenderEvent, Variant, render_variants};
use crate::sizes::{self, SizeSet};
use crate::style;
use std::sync::mpsc::Sender;

/// Archive entry name of the generated markup.
pub const HTML_ENTRY: &str = "index.html";
/// Archive entry name of the generated stylesheet.
pub const CSS_ENTRY: &str = "styles.css";

/// The complete output of one request.
#[derive(Debug, Clone)]
pub struct GeneratedArtifactSet {
    pub variants: Vec<Variant>,
    pub html: Option<String>,
    pub css: Option<String>,
    pub advisories: Vec<Advisory>,
    pub source: Dimensions,
}

impl GeneratedArtifactSet {
    /// Variants in render order, then `index.html`, then `styles.css`.
    pub fn archive_entries(&self) -> Vec<ArchiveEntry> {
        let mut entries: Vec<ArchiveEntry> = self
            .variants
            .iter()
            .map(|v| ArchiveEntry::image(v.filename.clone(), v.bytes.clone()))
            .collect();
        if let Some(html) = &self.html {
            entries.push(ArchiveEntry::text(HTML_ENTRY, html.clone()));
        }
        if let Some(css) = &self.css {
            entries.push(ArchiveEntry::text(CSS_ENTRY, css.clone()));
        }
        entries
    }

    pub fn filenames(&self) -> Vec<&str> {
        self.variants.iter().map(|v| v.filename.as_str()).collect()
    }
}

/// Sizes and formats a config resolves to, without touching any pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    pub sizes: SizeSet,
    pub formats: FormatSet,
}

impl GenerationPlan {
    pub fn from_config(config: &GenerationConfig) -> Result<Self, GenerateError> {
        if let Err(e) = config.validate() {
            return Err(GenerateError::InvalidConfig(e.to_string()));
        }
        Ok(Self {
            sizes: sizes::plan(config.max_width, config.responsive)?,
            formats: formats::select(config.transparent),
        })
    }

    /// Filenames the plan will produce, in render order.
    pub fn filenames(&self, base: &BaseName) -> Vec<String> {
        let multi = self.sizes.is_multi();
        self.sizes
            .widths()
            .iter()
            .flat_map(|&width| {
                self.formats
                    .generation_order()
                    .map(|format| variant_filename(base, width, format, multi))
            })
            .collect()
    }
}

/// Check every multi-size filename parses back to its own width and format.
fn verify_naming(variants: &[Variant], base: &BaseName) -> Result<(), GenerateError> {
    for v in variants {
        let parsed = parse_variant_filename(&v.filename)?;
        if parsed.width != v.width || parsed.format != v.format || parsed.base != base.as_str() {
            return Err(GenerateError::FilenameParse(v.filename.clone()));
        }
    }
    Ok(())
}

/// Run the full pipeline and return the artifact set.
pub fn generate_image_set<C: ImageCodec>(
    codec: &C,
    source_bytes: &[u8],
    base: &BaseName,
    config: &GenerationConfig,
    events: Option<&Sender<RenderEvent>>,
) -> Result<GeneratedArtifactSet, GenerateError> {
    let plan = GenerationPlan::from_config(config)?;

    let source = codec.decode(source_bytes).map_err(GenerateError::Decode)?;
    let info = codec.info(&source);
    if let Some(tx) = events {
        tx.send(RenderEvent::SourceDecoded {
            width: info.dimensions.width,
            height: info.dimensions.height,
            has_alpha: info.has_alpha,
        })
        .ok();
    }

    let rendered = render_variants(
        codec,
        &source,
        base,
        &plan.sizes,
        &plan.formats,
        config.quality,
        events,
    )?;
    let variants = rendered.variants;
    let multi = plan.sizes.is_multi();

    if multi {
        verify_naming(&variants, base)?;
    }

    let html = config.emit_html.then(|| {
        if multi {
            let index = HtmlSourceIndex::from_variants(&variants);
            markup::responsive_html(&plan.formats, &index, &config.alt_text, &plan.sizes)
        } else {
            markup::simple_html(&variants, &plan.formats, &config.alt_text)
        }
    });

    let css = config.emit_css.then(|| {
        if multi {
            style::responsive_css(&variants, &plan.formats, &plan.sizes)
        } else {
            style::simple_css(&variants)
        }
    });

    Ok(GeneratedArtifactSet {
        variants,
        html,
        css,
        advisories: rendered.advisories,
        source: rendered.source,
    })
}

/// Run the full pipeline and package the result.
pub fn generate_archive<C: ImageCodec, P: ArchivePackager>(
    codec: &C,
    packager: &P,
    source_bytes: &[u8],
    base: &BaseName,
    config: &GenerationConfig,
    events: Option<&Sender<RenderEvent>>,
) -> Result<(GeneratedArtifactSet, Vec<u8>), GenerateError> {
    let set = generate_image_set(codec, source_bytes, base, config, events)?;
    let archive = packager.pack(&set.archive_entries())?;
    Ok((set, archive))
}
