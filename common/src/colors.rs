//! Color constants and sign palettes.
//!
//! Colors use the `RgbColor` trait constants where one exists, the same way the
//! dashboard cells do. Every sign carries a [`Palette`] of five colors that is
//! fixed at construction; the alert flag picks between the normal and alert
//! entries on every draw.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

// =============================================================================
// Standard Colors
// =============================================================================

/// Pure black (0, 0, 0). Sign numerals, speed ring, unlimited glyph.
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// Pure white (31, 63, 31). Sign face and alert numerals.
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// Pure red (31, 0, 0). Speed-limit ring and speeding background.
pub const RED: Rgb565 = Rgb565::RED;

/// Dark gray (8, 16, 8). Simulator header bar and dividers.
pub const GRAY: Rgb565 = Rgb565::new(8, 16, 8);

/// Muted green for the simulator's debug log text.
pub const LOG_GREEN: Rgb565 = Rgb565::new(8, 48, 8);

/// Amber used for warning lines in the debug log.
pub const AMBER: Rgb565 = Rgb565::new(31, 40, 0);

// =============================================================================
// Palettes
// =============================================================================

/// The five colors of a sign.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb565,
    pub border: Rgb565,
    pub alert_background: Rgb565,
    pub text: Rgb565,
    pub alert_text: Rgb565,
}

impl Palette {
    pub const fn new(
        background: Rgb565,
        border: Rgb565,
        alert_background: Rgb565,
        text: Rgb565,
        alert_text: Rgb565,
    ) -> Self {
        Self {
            background,
            border,
            alert_background,
            text,
            alert_text,
        }
    }

    /// Disc fill for the given alert state.
    #[inline]
    pub const fn background_for(
        &self,
        alert: bool,
    ) -> Rgb565 {
        if alert { self.alert_background } else { self.background }
    }

    /// Numeral color for the given alert state.
    #[inline]
    pub const fn text_for(
        &self,
        alert: bool,
    ) -> Rgb565 {
        if alert { self.alert_text } else { self.text }
    }
}

/// Extra colors of the "no speed limit" glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnlimitedColors {
    /// Ring drawn in place of the normal border.
    pub border: Rgb565,
    /// The five diagonal stripes.
    pub stripe: Rgb565,
}

/// Current speed: white face, black ring, black numerals. Never alerts, so the
/// alert entries only fill the slots.
pub const CURRENT_SPEED_PALETTE: Palette = Palette::new(WHITE, BLACK, BLACK, BLACK, BLACK);

/// European-style limit sign: white face, red ring; red face with white
/// numerals while speeding.
pub const SPEED_LIMIT_PALETTE: Palette = Palette::new(WHITE, RED, RED, BLACK, WHITE);

/// Black ring and stripes of the end-of-limit sign.
pub const UNLIMITED_COLORS: UnlimitedColors = UnlimitedColors {
    border: BLACK,
    stripe: BLACK,
};
