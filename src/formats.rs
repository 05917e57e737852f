//! Output format selection.
//!
//! Every set is encoded in exactly two formats: a universally supported
//! **fallback** (PNG when the source needs transparency, JPEG otherwise) and
//! the **preferred** WebP. Generation walks them fallback-first; markup lists
//! them preferred-first, since browsers take the first `<source>` they support.

use serde::Serialize;
use std::fmt;

/// An encoding the pipeline can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpeg,
    WebP,
}

impl OutputFormat {
    /// File extension used in variant filenames.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::WebP => "webp",
        }
    }

    /// MIME type for `<source type=…>`.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::WebP => "image/webp",
        }
    }

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "png" => Some(OutputFormat::Png),
            "jpeg" => Some(OutputFormat::Jpeg),
            "webp" => Some(OutputFormat::WebP),
            _ => None,
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// The two formats of one generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSet {
    fallback: OutputFormat,
    preferred: OutputFormat,
}

impl FormatSet {
    /// Format used for `<img src>` and the base CSS rule.
    pub fn fallback(&self) -> OutputFormat {
        self.fallback
    }

    pub fn preferred(&self) -> OutputFormat {
        self.preferred
    }

    /// Generation order: fallback, then preferred.
    pub fn generation_order(&self) -> [OutputFormat; 2] {
        [self.fallback, self.preferred]
    }

    /// Markup order: preferred first.
    pub fn preference_order(&self) -> [OutputFormat; 2] {
        [self.preferred, self.fallback]
    }
}

/// Pick the output formats for a run.
pub fn select(transparent: bool) -> FormatSet {
    FormatSet {
        fallback: if transparent {
            OutputFormat::Png
        } else {
            OutputFormat::Jpeg
        },
        preferred: OutputFormat::WebP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_falls_back_to_png() {
        let formats = select(true);
        assert_eq!(formats.fallback(), OutputFormat::Png);
        assert_eq!(formats.preferred(), OutputFormat::WebP);
    }

    #[test]
    fn opaque_falls_back_to_jpeg() {
        let formats = select(false);
        assert_eq!(formats.fallback(), OutputFormat::Jpeg);
        assert_eq!(formats.preferred(), OutputFormat::WebP);
    }

    #[test]
    fn generation_and_preference_orders_are_mirrored() {
        let formats = select(false);
        assert_eq!(
            formats.generation_order(),
            [OutputFormat::Jpeg, OutputFormat::WebP]
        );
        assert_eq!(
            formats.preference_order(),
            [OutputFormat::WebP, OutputFormat::Jpeg]
        );
    }

    #[test]
    fn extension_roundtrips() {
        for format in [OutputFormat::Png, OutputFormat::Jpeg, OutputFormat::WebP] {
            assert_eq!(OutputFormat::from_extension(format.extension()), Some(format));
        }
        assert_eq!(OutputFormat::from_extension("jpg"), None);
    }

    #[test]
    fn mime_types() {
        assert_eq!(OutputFormat::Jpeg.mime_type(), "image/jpeg");
        assert_eq!(OutputFormat::WebP.to_string(), "webp");
    }
}
