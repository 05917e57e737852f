//! Size planning: which widths to render.
//!
//! Responsive sets are seeded from a fixed ladder of breakpoints. A breakpoint
//! is kept only if it sits at least [`MINIMUM_STEP`] pixels below the
//! requested maximum, so the ladder never produces two near-identical
//! renditions. The maximum width itself is always the last entry.
//!
//! ```text
//! max_width = 1920, responsive → [420, 960, 1920]
//! max_width = 1000, responsive → [420, 1000]
//! max_width =  500, responsive → [500]          (same as single-size)
//! max_width = 2400, single     → [2400]
//! ```

use crate::error::GenerateError;

/// Named widths of the responsive ladder, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Breakpoint {
    Small,
    Medium,
    ExtraLarge,
}

impl Breakpoint {
    pub const LADDER: [Breakpoint; 3] =
        [Breakpoint::Small, Breakpoint::Medium, Breakpoint::ExtraLarge];

    pub fn width(self) -> u32 {
        match self {
            Breakpoint::Small => 420,
            Breakpoint::Medium => 960,
            Breakpoint::ExtraLarge => 1920,
        }
    }
}

/// Minimum gap between a kept breakpoint and the maximum width.
pub const MINIMUM_STEP: u32 = 300;

/// Ordered, duplicate-free target widths ending in the maximum width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeSet(Vec<u32>);

impl SizeSet {
    pub fn widths(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// More than one width: responsive markup, width-suffixed filenames.
    pub fn is_multi(&self) -> bool {
        self.0.len() > 1
    }

    pub fn largest(&self) -> u32 {
        // Never empty: plan() always pushes max_width.
        self.0.last().copied().unwrap_or_default()
    }
}

/// Plan the widths for one run.
pub fn plan(max_width: u32, responsive: bool) -> Result<SizeSet, GenerateError> {
    if max_width == 0 {
        return Err(GenerateError::InvalidConfig(
            "max_width must be greater than zero".into(),
        ));
    }

    let mut widths: Vec<u32> = if responsive {
        Breakpoint::LADDER
            .iter()
            .map(|bp| bp.width())
            .filter(|&w| w.saturating_add(MINIMUM_STEP) < max_width)
            .collect()
    } else {
        Vec::new()
    };
    widths.push(max_width);

    Ok(SizeSet(widths))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_size_is_max_width_only() {
        let sizes = plan(2400, false).unwrap();
        assert_eq!(sizes.widths(), &[2400]);
        assert!(!sizes.is_multi());
    }

    #[test]
    fn responsive_1920_keeps_small_and_medium() {
        let sizes = plan(1920, true).unwrap();
        assert_eq!(sizes.widths(), &[420, 960, 1920]);
        assert!(sizes.is_multi());
        assert_eq!(sizes.largest(), 1920);
    }

    #[test]
    fn responsive_above_ladder_keeps_every_breakpoint() {
        for max in [2221, 2500, 4000] {
            let sizes = plan(max, true).unwrap();
            assert_eq!(sizes.widths(), &[420, 960, 1920, max]);
        }
    }

    #[test]
    fn breakpoint_exactly_min_step_below_is_dropped() {
        // 960 + 300 == 1260: not strictly less, so dropped
        assert_eq!(plan(1260, true).unwrap().widths(), &[420, 1260]);
        assert_eq!(plan(1261, true).unwrap().widths(), &[420, 960, 1261]);
    }

    #[test]
    fn small_responsive_collapses_to_single() {
        let sizes = plan(500, true).unwrap();
        assert_eq!(sizes.widths(), &[500]);
        assert!(!sizes.is_multi());
        assert_eq!(sizes, plan(500, false).unwrap());
    }

    #[test]
    fn widths_at_or_below_min_step_are_single() {
        for max in [1, 100, MINIMUM_STEP] {
            assert_eq!(plan(max, true).unwrap().widths(), &[max]);
        }
    }

    #[test]
    fn zero_width_is_invalid() {
        let err = plan(0, true).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidConfig(_)));
    }

    #[test]
    fn planned_widths_are_distinct_and_end_with_max() {
        for max in (1..5000).step_by(37) {
            let sizes = plan(max, true).unwrap();
            let widths = sizes.widths();
            assert_eq!(*widths.last().unwrap(), max);
            assert!(widths.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
