//! Background-image CSS for a generated set.
//!
//! Responsive sets get a base rule pointing at the widest fallback-format
//! file, then one media query per planned width listing every file of that
//! width:
//!
//! ```css
//! .element { background-image: url('name-1920.jpeg'); }
//! @media (max-width: 420px) { .element { background-image: url('name-420.jpeg'), url('name-420.webp'); } }
//! @media (max-width: 960px) { .element { background-image: url('name-960.jpeg'), url('name-960.webp'); } }
//! @media (max-width: 1920px) { .element { background-image: url('name-1920.jpeg'), url('name-1920.webp'); } }
//! ```
//!
//! Single-size sets collapse to one unconditional rule.

use crate::formats::FormatSet;
use crate::render::Variant;
use crate::sizes::SizeSet;

const SELECTOR: &str = ".element";

fn background_rule<'a>(filenames: impl IntoIterator<Item = &'a str>) -> String {
    let urls = filenames
        .into_iter()
        .map(|f| format!("url('{}')", f))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{SELECTOR} {{ background-image: {urls}; }}")
}

/// Base rule plus one `@media (max-width)` block per planned width.
pub fn responsive_css(variants: &[Variant], formats: &FormatSet, sizes: &SizeSet) -> String {
    let largest = variants
        .iter()
        .filter(|v| v.format == formats.fallback())
        .max_by_key(|v| v.width);

    let mut lines = Vec::with_capacity(sizes.len() + 1);
    if let Some(largest) = largest {
        lines.push(background_rule([largest.filename.as_str()]));
    }

    let mut widths = sizes.widths().to_vec();
    widths.sort_unstable();
    for width in widths {
        let rule = background_rule(
            variants
                .iter()
                .filter(|v| v.width == width)
                .map(|v| v.filename.as_str()),
        );
        lines.push(format!("@media (max-width: {width}px) {{ {rule} }}"));
    }

    lines.join("\n") + "\n"
}

/// Single rule listing every file.
pub fn simple_css(variants: &[Variant]) -> String {
    background_rule(variants.iter().map(|v| v.filename.as_str())) + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::{OutputFormat, select};
    use crate::sizes::plan;

    fn variant(filename: &str, width: u32, format: OutputFormat) -> Variant {
        Variant {
            width,
            height: 1,
            format,
            filename: filename.to_string(),
            bytes: Vec::new(),
        }
    }

    fn scenario_variants() -> Vec<Variant> {
        vec![
            variant("name-420.jpeg", 420, OutputFormat::Jpeg),
            variant("name-420.webp", 420, OutputFormat::WebP),
            variant("name-960.jpeg", 960, OutputFormat::Jpeg),
            variant("name-960.webp", 960, OutputFormat::WebP),
            variant("name-1920.jpeg", 1920, OutputFormat::Jpeg),
            variant("name-1920.webp", 1920, OutputFormat::WebP),
        ]
    }

    #[test]
    fn responsive_scenario_css() {
        let css = responsive_css(&scenario_variants(), &select(false), &plan(1920, true).unwrap());
        let lines: Vec<&str> = css.lines().collect();
        assert_eq!(
            lines,
            vec![
                ".element { background-image: url('name-1920.jpeg'); }",
                "@media (max-width: 420px) { .element { background-image: url('name-420.jpeg'), url('name-420.webp'); } }",
                "@media (max-width: 960px) { .element { background-image: url('name-960.jpeg'), url('name-960.webp'); } }",
                "@media (max-width: 1920px) { .element { background-image: url('name-1920.jpeg'), url('name-1920.webp'); } }",
            ]
        );
    }

    #[test]
    fn base_rule_never_picks_webp() {
        // WebP listed widest-first to make sure format, not order, decides
        let variants = vec![
            variant("a-2000.webp", 2000, OutputFormat::WebP),
            variant("a-420.png", 420, OutputFormat::Png),
            variant("a-2000.png", 2000, OutputFormat::Png),
            variant("a-420.webp", 420, OutputFormat::WebP),
        ];
        let css = responsive_css(&variants, &select(true), &plan(2000, true).unwrap());
        assert!(css.starts_with(".element { background-image: url('a-2000.png'); }"));
    }

    #[test]
    fn simple_css_is_one_rule() {
        let variants = vec![
            variant("name.jpeg", 500, OutputFormat::Jpeg),
            variant("name.webp", 500, OutputFormat::WebP),
        ];
        assert_eq!(
            simple_css(&variants),
            ".element { background-image: url('name.jpeg'), url('name.webp'); }\n"
        );
        assert!(!simple_css(&variants).contains("@media"));
    }
}
