//! Image codec trait and shared types.
//!
//! The [`ImageCodec`] trait is the four primitives the pipeline consumes:
//! decode, resize, strip alpha, and encode (plus an `info` accessor for the
//! decoded image's dimensions and alpha flag).
//!
//! The production implementation is
//! [`RustCodec`](super::rust_backend::RustCodec). Tests use a mock codec that
//! records operations without touching pixels.

use super::params::Quality;
use crate::formats::OutputFormat;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Resize failed: {0}")]
    Resize(String),
    #[error("Encode failed: {0}")]
    Encode(String),
}

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// What the pipeline needs to know about a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub dimensions: Dimensions,
    pub has_alpha: bool,
}

/// Decode/resize/encode primitives.
///
/// `Sync` so a single codec can be shared across rayon workers.
pub trait ImageCodec: Sync {
    /// Decoded in-memory image.
    type Image: Send + Sync;

    /// Decode an encoded image (any supported input format).
    fn decode(&self, bytes: &[u8]) -> Result<Self::Image, CodecError>;

    /// Dimensions and alpha flag of a decoded image.
    fn info(&self, image: &Self::Image) -> ImageInfo;

    /// Resize to exactly `width` x `height`.
    fn resize(&self, image: &Self::Image, width: u32, height: u32)
    -> Result<Self::Image, CodecError>;

    /// Drop the alpha channel, keeping color channels as they are.
    fn strip_alpha(&self, image: &Self::Image) -> Self::Image;

    /// Encode to `format`. `quality` applies to lossy encoders only.
    fn encode(
        &self,
        image: &Self::Image,
        format: OutputFormat,
        quality: Quality,
    ) -> Result<Vec<u8>, CodecError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Stand-in image for the mock: dimensions and alpha only.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MockImage {
        pub width: u32,
        pub height: u32,
        pub has_alpha: bool,
    }

    /// Mock codec that records operations without executing them.
    /// Uses Mutex (not RefCell) so it is Sync and works with rayon's par_iter.
    ///
    /// `decode` ignores its input and returns `source`. Encoded bytes are a
    /// readable `"<format> <width>x<height>"` tag so tests can inspect them.
    #[derive(Default)]
    pub struct MockCodec {
        pub source: Option<MockImage>,
        pub fail_format: Option<OutputFormat>,
        pub fail_resize: bool,
        pub operations: Mutex<Vec<RecordedOp>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Decode,
        Resize {
            width: u32,
            height: u32,
        },
        StripAlpha,
        Encode {
            format: OutputFormat,
            width: u32,
            height: u32,
            has_alpha: bool,
            quality: u8,
        },
    }

    impl MockCodec {
        pub fn with_source(width: u32, height: u32, has_alpha: bool) -> Self {
            Self {
                source: Some(MockImage {
                    width,
                    height,
                    has_alpha,
                }),
                ..Self::default()
            }
        }

        pub fn failing_on(mut self, format: OutputFormat) -> Self {
            self.fail_format = Some(format);
            self
        }

        pub fn failing_resize(mut self) -> Self {
            self.fail_resize = true;
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        fn record(&self, op: RecordedOp) {
            self.operations.lock().unwrap().push(op);
        }
    }

    impl ImageCodec for MockCodec {
        type Image = MockImage;

        fn decode(&self, _bytes: &[u8]) -> Result<MockImage, CodecError> {
            self.record(RecordedOp::Decode);
            self.source
                .ok_or_else(|| CodecError::Decode("No mock source image".to_string()))
        }

        fn info(&self, image: &MockImage) -> ImageInfo {
            ImageInfo {
                dimensions: Dimensions {
                    width: image.width,
                    height: image.height,
                },
                has_alpha: image.has_alpha,
            }
        }

        fn resize(
            &self,
            image: &MockImage,
            width: u32,
            height: u32,
        ) -> Result<MockImage, CodecError> {
            self.record(RecordedOp::Resize { width, height });
            if self.fail_resize {
                return Err(CodecError::Resize("mock rejects resize".to_string()));
            }
            Ok(MockImage {
                width,
                height,
                has_alpha: image.has_alpha,
            })
        }

        fn strip_alpha(&self, image: &MockImage) -> MockImage {
            self.record(RecordedOp::StripAlpha);
            MockImage {
                has_alpha: false,
                ..*image
            }
        }

        fn encode(
            &self,
            image: &MockImage,
            format: OutputFormat,
            quality: Quality,
        ) -> Result<Vec<u8>, CodecError> {
            self.record(RecordedOp::Encode {
                format,
                width: image.width,
                height: image.height,
                has_alpha: image.has_alpha,
                quality: quality.value(),
            });
            if self.fail_format == Some(format) {
                return Err(CodecError::Encode(format!("mock rejects {format}")));
            }
            if format == OutputFormat::Jpeg && image.has_alpha {
                return Err(CodecError::Encode("JPEG cannot carry alpha".to_string()));
            }
            Ok(format!("{} {}x{}", format, image.width, image.height).into_bytes())
        }
    }

    #[test]
    fn mock_decode_without_source_errors() {
        let codec = MockCodec::default();
        assert!(matches!(codec.decode(b""), Err(CodecError::Decode(_))));
    }

    #[test]
    fn mock_records_resize_and_encode() {
        let codec = MockCodec::with_source(800, 600, false);
        let source = codec.decode(b"").unwrap();
        let resized = codec.resize(&source, 400, 300).unwrap();
        let bytes = codec
            .encode(&resized, OutputFormat::WebP, Quality::new(85))
            .unwrap();

        assert_eq!(bytes, b"webp 400x300");
        let ops = codec.get_operations();
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[0], RecordedOp::Decode);
        assert_eq!(
            ops[1],
            RecordedOp::Resize {
                width: 400,
                height: 300
            }
        );
        assert!(matches!(
            &ops[2],
            RecordedOp::Encode {
                format: OutputFormat::WebP,
                quality: 85,
                ..
            }
        ));
    }

    #[test]
    fn mock_rejects_alpha_jpeg() {
        let codec = MockCodec::with_source(10, 10, true);
        let source = codec.decode(b"").unwrap();
        let result = codec.encode(&source, OutputFormat::Jpeg, Quality::default());
        assert!(result.is_err());
    }
}
