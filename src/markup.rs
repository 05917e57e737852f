//! `<picture>` markup for a generated set, rendered with [Maud](https://maud.lambda.xyz/).
//!
//! ## Responsive sets
//!
//! One `<source>` per format, preferred format (WebP) first, each listing
//! every width as a `srcset` candidate. The `<img>` points at the widest
//! fallback-format file and carries a `sizes` hint per planned width:
//!
//! ```html
//! <picture>
//!   <source srcset="name-420.webp 420w, name-960.webp 960w, name-1920.webp 1920w" type="image/webp">
//!   <source srcset="name-420.jpeg 420w, name-960.jpeg 960w, name-1920.jpeg 1920w" type="image/jpeg">
//!   <img src="name-1920.jpeg" alt="…" sizes="(max-width: 420px) 420px, (max-width: 960px) 960px, (max-width: 1920px) 1920px">
//! </picture>
//! ```
//!
//! (Output is emitted on a single line; shown indented here for reading.)
//!
//! ## Single-size sets
//!
//! A `<source>` for the WebP file and an `<img>` for the fallback file with
//! explicit `width`/`height` so the browser can reserve layout space.
//!
//! All attribute values go through Maud's escaping, so alt text and names
//! cannot break out of the markup.

use crate::formats::FormatSet;
use crate::render::{HtmlSourceIndex, Variant};
use crate::sizes::SizeSet;
use maud::html;

/// `"(max-width: 420px) 420px, (max-width: 960px) 960px"`.
fn sizes_attribute(sizes: &SizeSet) -> String {
    let mut widths = sizes.widths().to_vec();
    widths.sort_unstable();
    widths
        .iter()
        .map(|w| format!("(max-width: {w}px) {w}px"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Multi-width `<picture>` with `srcset` sources.
pub fn responsive_html(
    formats: &FormatSet,
    index: &HtmlSourceIndex,
    alt_text: &str,
    sizes: &SizeSet,
) -> String {
    let src = index.largest(formats.fallback()).unwrap_or_default();

    html! {
        picture {
            @for format in formats.preference_order() {
                source srcset=(index.srcset(format)) type=(format.mime_type());
            }
            img src=(src) alt=(alt_text) sizes=(sizes_attribute(sizes));
        }
    }
    .into_string()
}

/// Single-width `<picture>`: preferred-format source plus fallback `<img>`.
pub fn simple_html(variants: &[Variant], formats: &FormatSet, alt_text: &str) -> String {
    let primary = variants
        .iter()
        .find(|v| v.format == formats.fallback())
        .or_else(|| variants.first());
    let alternates: Vec<&Variant> = formats
        .preference_order()
        .into_iter()
        .flat_map(|format| variants.iter().filter(move |v| v.format == format))
        .filter(|v| Some(*v) != primary)
        .collect();

    html! {
        picture {
            @for variant in alternates {
                source srcset=(variant.filename) type=(variant.format.mime_type());
            }
            @if let Some(primary) = primary {
                img src=(primary.filename) alt=(alt_text) width=(primary.width) height=(primary.height);
            }
        }
    }
    .into_string()
}
