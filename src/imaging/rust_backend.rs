//! Pure Rust codec on the `image` crate; everything statically linked.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, WebP) | `image::load_from_memory` |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Strip alpha | `DynamicImage::to_rgb8` (channel drop, no compositing) |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` with quality |
//! | Encode → PNG | `image::codecs::png::PngEncoder` |
//! | Encode → WebP | `image::codecs::webp::WebPEncoder` (lossless) |

use super::backend::{CodecError, Dimensions, ImageCodec, ImageInfo};
use super::params::Quality;
use crate::formats::OutputFormat;
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::imageops::FilterType;

/// Pure Rust codec using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCodec;

impl RustCodec {
    pub fn new() -> Self {
        Self
    }
}

/// Bring an image into a color type the target encoder accepts.
///
/// JPEG takes 8-bit gray or RGB; WebP takes 8-bit RGB or RGBA. PNG accepts
/// everything the decoder can produce.
fn normalize_for(img: &DynamicImage, format: OutputFormat) -> Option<DynamicImage> {
    match (format, img) {
        (OutputFormat::Png, _) => None,
        (OutputFormat::Jpeg, DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_)) => None,
        (OutputFormat::Jpeg, _) => Some(DynamicImage::ImageRgb8(img.to_rgb8())),
        (OutputFormat::WebP, DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_)) => None,
        (OutputFormat::WebP, _) if img.color().has_alpha() => {
            Some(DynamicImage::ImageRgba8(img.to_rgba8()))
        }
        (OutputFormat::WebP, _) => Some(DynamicImage::ImageRgb8(img.to_rgb8())),
    }
}

impl ImageCodec for RustCodec {
    type Image = DynamicImage;

    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, CodecError> {
        image::load_from_memory(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }

    fn info(&self, image: &DynamicImage) -> ImageInfo {
        ImageInfo {
            dimensions: Dimensions {
                width: image.width(),
                height: image.height(),
            },
            has_alpha: image.color().has_alpha(),
        }
    }

    fn resize(
        &self,
        image: &DynamicImage,
        width: u32,
        height: u32,
    ) -> Result<DynamicImage, CodecError> {
        if width == 0 || height == 0 {
            return Err(CodecError::Resize(format!(
                "cannot resize to {width}x{height}"
            )));
        }
        Ok(image.resize_exact(width, height, FilterType::Lanczos3))
    }

    fn strip_alpha(&self, image: &DynamicImage) -> DynamicImage {
        DynamicImage::ImageRgb8(image.to_rgb8())
    }

    fn encode(
        &self,
        image: &DynamicImage,
        format: OutputFormat,
        quality: Quality,
    ) -> Result<Vec<u8>, CodecError> {
        let normalized = normalize_for(image, format);
        let img = normalized.as_ref().unwrap_or(image);

        let mut buf = Vec::new();
        let result = match format {
            OutputFormat::Jpeg => {
                img.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality.value()))
            }
            OutputFormat::Png => img.write_with_encoder(PngEncoder::new(&mut buf)),
            OutputFormat::WebP => img.write_with_encoder(WebPEncoder::new_lossless(&mut buf)),
        };
        result.map_err(|e| CodecError::Encode(format!("{format}: {e}")))?;
        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{png_bytes, rgb_image, rgba_image};

    #[test]
    fn decode_reports_dimensions_and_alpha() {
        let codec = RustCodec::new();

        let opaque = codec.decode(&png_bytes(&rgb_image(64, 48))).unwrap();
        let info = codec.info(&opaque);
        assert_eq!(
            info.dimensions,
            Dimensions {
                width: 64,
                height: 48
            }
        );
        assert!(!info.has_alpha);

        let transparent = codec.decode(&png_bytes(&rgba_image(32, 32))).unwrap();
        assert!(codec.info(&transparent).has_alpha);
    }

    #[test]
    fn decode_garbage_errors() {
        let codec = RustCodec::new();
        let result = codec.decode(b"definitely not an image");
        assert!(matches!(result, Err(CodecError::Decode(_))));
    }

    #[test]
    fn resize_exact_dimensions() {
        let codec = RustCodec::new();
        let resized = codec.resize(&rgb_image(300, 200), 120, 80).unwrap();
        assert_eq!((resized.width(), resized.height()), (120, 80));
    }

    #[test]
    fn resize_to_zero_errors() {
        let codec = RustCodec::new();
        assert!(codec.resize(&rgb_image(10, 10), 0, 5).is_err());
    }

    #[test]
    fn strip_alpha_yields_rgb() {
        let codec = RustCodec::new();
        let stripped = codec.strip_alpha(&rgba_image(16, 16));
        assert!(!codec.info(&stripped).has_alpha);
        assert_eq!((stripped.width(), stripped.height()), (16, 16));
    }

    #[test]
    fn encodes_every_format_and_decodes_back() {
        let codec = RustCodec::new();
        let img = rgb_image(40, 30);
        for format in [OutputFormat::Jpeg, OutputFormat::Png, OutputFormat::WebP] {
            let bytes = codec.encode(&img, format, Quality::new(85)).unwrap();
            assert!(!bytes.is_empty(), "{format} produced no bytes");
            let back = image::load_from_memory(&bytes).unwrap();
            assert_eq!((back.width(), back.height()), (40, 30));
        }
    }

    #[test]
    fn encoded_formats_have_expected_signatures() {
        let codec = RustCodec::new();
        let img = rgb_image(8, 8);
        let jpeg = codec.encode(&img, OutputFormat::Jpeg, Quality::default()).unwrap();
        let png = codec.encode(&img, OutputFormat::Png, Quality::default()).unwrap();
        let webp = codec.encode(&img, OutputFormat::WebP, Quality::default()).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        assert_eq!(&png[1..4], b"PNG");
        assert_eq!(&webp[8..12], b"WEBP");
    }

    #[test]
    fn rgba_png_and_webp_keep_alpha() {
        let codec = RustCodec::new();
        let img = rgba_image(12, 12);
        for format in [OutputFormat::Png, OutputFormat::WebP] {
            let bytes = codec.encode(&img, format, Quality::default()).unwrap();
            let back = image::load_from_memory(&bytes).unwrap();
            assert!(back.color().has_alpha(), "{format} lost alpha");
        }
    }

    #[test]
    fn jpeg_accepts_stripped_rgba() {
        let codec = RustCodec::new();
        let stripped = codec.strip_alpha(&rgba_image(12, 12));
        let bytes = codec
            .encode(&stripped, OutputFormat::Jpeg, Quality::default())
            .unwrap();
        assert!(!bytes.is_empty());
    }

    #[test]
    fn sixteen_bit_source_encodes_to_jpeg_and_webp() {
        let codec = RustCodec::new();
        let img = DynamicImage::ImageRgb16(rgb_image(10, 10).to_rgb16());
        for format in [OutputFormat::Jpeg, OutputFormat::WebP, OutputFormat::Png] {
            assert!(codec.encode(&img, format, Quality::default()).is_ok());
        }
    }
}
