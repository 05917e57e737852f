//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Source: 3000x2000
//!     name-420.jpeg (420x280, 31.2 KB)
//!     name-420.webp (420x280, 48.0 KB)
//!     ...
//! Warning: 2400px is wider than the 2000px source; upscaled output may look soft
//!
//! Archive: name.zip
//!     6 images, index.html, styles.css
//!     412.9 KB
//! ```
//!
//! ## Resize
//!
//! ```text
//! Resized: resized_photo.jpg
//!     500x500 jpeg, 41.7 KB
//! ```
//!
//! ## Plan
//!
//! ```text
//! Widths: 420, 960, 1920
//! Formats: jpeg (fallback), webp (preferred)
//!     name-420.jpeg
//!     name-420.webp
//!     ...
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::assemble::{CSS_ENTRY, GeneratedArtifactSet, GenerationPlan, HTML_ENTRY};
use crate::naming::BaseName;
use crate::render::{Advisory, RenderEvent};
use crate::resize::ResizedImage;
use std::path::Path;

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Human-readable byte count.
fn format_bytes(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    let b = bytes as f64;
    if b >= MB {
        format!("{:.1} MB", b / MB)
    } else if b >= KB {
        format!("{:.1} KB", b / KB)
    } else {
        format!("{} B", bytes)
    }
}

fn upscale_warning(width: u32, source_width: u32) -> String {
    format!(
        "Warning: {}px is wider than the {}px source; upscaled output may look soft",
        width, source_width
    )
}

// ============================================================================
// Build progress
// ============================================================================

/// Format a single render progress event as display lines.
pub fn format_render_event(event: &RenderEvent) -> Vec<String> {
    match event {
        RenderEvent::SourceDecoded {
            width,
            height,
            has_alpha,
        } => {
            let alpha = if *has_alpha { ", alpha" } else { "" };
            vec![format!("Source: {}x{}{}", width, height, alpha)]
        }
        RenderEvent::VariantEncoded {
            filename,
            width,
            height,
            bytes,
        } => vec![format!(
            "{}{} ({}x{}, {})",
            indent(1),
            filename,
            width,
            height,
            format_bytes(*bytes)
        )],
        RenderEvent::Upscale {
            width,
            source_width,
        } => vec![upscale_warning(*width, *source_width)],
    }
}

/// Format the archive summary printed after a successful build.
pub fn format_build_summary(
    set: &GeneratedArtifactSet,
    archive_path: &Path,
    archive_bytes: usize,
) -> Vec<String> {
    let mut contents = vec![format!("{} images", set.variants.len())];
    if set.html.is_some() {
        contents.push(HTML_ENTRY.to_string());
    }
    if set.css.is_some() {
        contents.push(CSS_ENTRY.to_string());
    }

    let mut lines = vec![
        String::new(),
        format!("Archive: {}", archive_path.display()),
        format!("{}{}", indent(1), contents.join(", ")),
        format!("{}{}", indent(1), format_bytes(archive_bytes)),
    ];
    if !set.advisories.is_empty() {
        lines.push(format!(
            "{}{} upscaled width(s)",
            indent(1),
            set.advisories
                .iter()
                .filter(|a| matches!(a, Advisory::Upscale { .. }))
                .count()
        ));
    }
    lines
}

pub fn print_build_summary(set: &GeneratedArtifactSet, archive_path: &Path, archive_bytes: usize) {
    for line in format_build_summary(set, archive_path, archive_bytes) {
        println!("{}", line);
    }
}

// ============================================================================
// Resize
// ============================================================================

pub fn format_resize_summary(resized: &ResizedImage, path: &Path) -> Vec<String> {
    vec![
        format!("Resized: {}", path.display()),
        format!(
            "{}{}x{} {}, {}",
            indent(1),
            resized.width,
            resized.height,
            resized.format,
            format_bytes(resized.bytes.len())
        ),
    ]
}

pub fn print_resize_summary(resized: &ResizedImage, path: &Path) {
    for line in format_resize_summary(resized, path) {
        println!("{}", line);
    }
}

// ============================================================================
// Plan (dry run)
// ============================================================================

/// Format a plan: widths, formats, and the files they produce.
pub fn format_plan(plan: &GenerationPlan, base: &BaseName) -> Vec<String> {
    let widths = plan
        .sizes
        .widths()
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        format!("Widths: {}", widths),
        format!(
            "Formats: {} (fallback), {} (preferred)",
            plan.formats.fallback(),
            plan.formats.preferred()
        ),
    ];
    lines.extend(
        plan.filenames(base)
            .into_iter()
            .map(|f| format!("{}{}", indent(1), f)),
    );
    lines
}

pub fn print_plan(plan: &GenerationPlan, base: &BaseName) {
    for line in format_plan(plan, base) {
        println!("{}", line);
    }
}
