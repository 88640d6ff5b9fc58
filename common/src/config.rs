//! Sign configuration: border ratios, styles and sentinel values.
//!
//! Everything a sign needs beyond its runtime value is fixed at construction:
//! two ratios that shape the ring and the palette. Built-in defaults are `const`
//! and validated at compile time.

use crate::colors::{CURRENT_SPEED_PALETTE, Palette, SPEED_LIMIT_PALETTE, UNLIMITED_COLORS, UnlimitedColors};

// =============================================================================
// Sentinels
// =============================================================================

/// Text shown while the current speed is unknown.
pub const NO_DATA_PLACEHOLDER: &str = "--";

/// Speed value meaning "no GPS fix yet". Any negative speed is treated the same.
pub const SPEED_UNKNOWN: f64 = -1.0;

/// Limit value meaning "no limit known". Nothing is drawn.
pub const LIMIT_UNKNOWN: i32 = -1;

/// Limit value meaning "no speed limit". Drawn as the striped glyph.
pub const LIMIT_UNLIMITED: i32 = 0;

// =============================================================================
// Border Ratios
// =============================================================================

/// Ring thickness and inset, both relative to the disc radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderRatios {
    /// Ring stroke width as a fraction of the radius.
    pub width: f32,
    /// Extra gap between the disc edge and the ring, as a fraction of the radius.
    pub inset: f32,
}

impl BorderRatios {
    pub const fn new(
        width: f32,
        inset: f32,
    ) -> Self {
        Self { width, inset }
    }

    /// Both ratios lie in `[0, 1]`.
    pub const fn is_within_unit_range(&self) -> bool {
        self.width >= 0.0 && self.width <= 1.0 && self.inset >= 0.0 && self.inset <= 1.0
    }

    /// The ring stays outside-in: `width / 2 + inset <= 1`, so the border
    /// radius cannot go negative.
    pub const fn keeps_border_inside(&self) -> bool { self.width / 2.0 + self.inset <= 1.0 }
}

/// Current-speed sign: thin ring.
pub const CURRENT_SPEED_RATIOS: BorderRatios = BorderRatios::new(0.1, 0.05);

/// Speed-limit sign: thick ring like a road sign.
pub const SPEED_LIMIT_RATIOS: BorderRatios = BorderRatios::new(0.2, 0.05);

const _: () = assert!(CURRENT_SPEED_RATIOS.is_within_unit_range());
const _: () = assert!(CURRENT_SPEED_RATIOS.keeps_border_inside());
const _: () = assert!(SPEED_LIMIT_RATIOS.is_within_unit_range());
const _: () = assert!(SPEED_LIMIT_RATIOS.keeps_border_inside());

// =============================================================================
// Sign Style
// =============================================================================

/// Immutable style record handed to the renderer on every draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignStyle {
    pub ratios: BorderRatios,
    pub palette: Palette,
    /// Only used by the speed-limit sign when the limit is lifted.
    pub unlimited: UnlimitedColors,
}

impl SignStyle {
    /// Build a style. Ratios outside `[0, 1]` trip a debug assertion; release
    /// builds pass them through to the geometry unchanged.
    pub fn new(
        ratios: BorderRatios,
        palette: Palette,
        unlimited: UnlimitedColors,
    ) -> Self {
        debug_assert!(ratios.is_within_unit_range(), "border ratios must lie in [0, 1]");
        Self {
            ratios,
            palette,
            unlimited,
        }
    }

    pub const fn current_speed() -> Self {
        Self {
            ratios: CURRENT_SPEED_RATIOS,
            palette: CURRENT_SPEED_PALETTE,
            unlimited: UNLIMITED_COLORS,
        }
    }

    pub const fn speed_limit() -> Self {
        Self {
            ratios: SPEED_LIMIT_RATIOS,
            palette: SPEED_LIMIT_PALETTE,
            unlimited: UNLIMITED_COLORS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ratios() {
        assert_eq!(CURRENT_SPEED_RATIOS, BorderRatios::new(0.1, 0.05));
        assert_eq!(SPEED_LIMIT_RATIOS, BorderRatios::new(0.2, 0.05));
    }

    #[test]
    fn test_ratio_validation() {
        assert!(BorderRatios::new(0.0, 0.0).is_within_unit_range());
        assert!(BorderRatios::new(1.0, 1.0).is_within_unit_range());
        assert!(!BorderRatios::new(1.2, 0.0).is_within_unit_range());
        assert!(!BorderRatios::new(0.2, -0.1).is_within_unit_range());

        // In range, but the inset plus half the stroke overshoots the radius
        assert!(!BorderRatios::new(0.9, 0.7).keeps_border_inside());
        assert!(BorderRatios::new(1.0, 0.5).keeps_border_inside());
    }

    #[test]
    fn test_styles_use_variant_defaults() {
        assert_eq!(SignStyle::current_speed().ratios, CURRENT_SPEED_RATIOS);
        assert_eq!(SignStyle::speed_limit().ratios, SPEED_LIMIT_RATIOS);
        assert_eq!(SignStyle::speed_limit().palette, SPEED_LIMIT_PALETTE);
    }

    #[test]
    fn test_custom_style() {
        let style = SignStyle::new(BorderRatios::new(0.3, 0.1), SPEED_LIMIT_PALETTE, UNLIMITED_COLORS);
        assert_eq!(style.ratios.width, 0.3);
        assert_eq!(style.palette, SPEED_LIMIT_PALETTE);
    }

    #[test]
    fn test_sentinels() {
        assert!(SPEED_UNKNOWN < 0.0);
        assert!(LIMIT_UNKNOWN < LIMIT_UNLIMITED);
        assert_eq!(NO_DATA_PLACEHOLDER, "--");
    }
}
