//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;

/// Height of a rendition `width` pixels wide, preserving the source aspect ratio.
///
/// Rounds to the nearest pixel and never returns zero.
///
/// # Examples
/// ```
/// # use imageset::imaging::{Dimensions, scaled_height};
/// // 3000x2000 → 420 wide is 280 tall
/// assert_eq!(scaled_height(Dimensions { width: 3000, height: 2000 }, 420), 280);
/// ```
pub fn scaled_height(source: Dimensions, width: u32) -> u32 {
    if source.width == 0 {
        return 1;
    }
    let h = (width as f64 * source.height as f64 / source.width as f64).round() as u32;
    h.max(1)
}

/// True when `width` exceeds the source width.
pub fn is_upscale(source: Dimensions, width: u32) -> bool {
    width > source.width
}
