//! Font-size search that fits a string inside the sign's text circle.
//!
//! The search treats the text box diagonal as the limiting dimension: a size is
//! accepted when `w² + h²` of the measured box stays within the squared text
//! diameter. This is not the box area; short numerals grow until
//! their corners touch the circle.
//!
//! Measurement sits behind [`TextMetrics`]. [`FontLadder`] measures with the
//! embedded-graphics mono fonts the renderer draws with, [`MonospaceMetrics`]
//! models a scalable face for hosts that rasterize text themselves.

use embedded_graphics::mono_font::ascii::{FONT_4X6, FONT_6X10};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Baseline;
use embedded_graphics::text::renderer::TextRenderer;
use log::debug;
use profont::{PROFONT_12_POINT, PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT};

/// Result floor of the search. A font never shrinks below one unit.
pub const MIN_FONT_SIZE: f32 = 1.0;

/// Upper end of the search range, whatever the bound.
pub const MAX_FONT_SIZE: i32 = 1 << 16;

/// Measured bounding box of a string.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextBox {
    pub width: f32,
    pub height: f32,
    /// Vertical offset of the box center from the baseline (negative: above).
    pub center_offset: f32,
}

impl TextBox {
    /// Sum of squares of the box sides, compared against the area budget.
    #[inline]
    pub fn diagonal_metric(&self) -> f32 { self.width * self.width + self.height * self.height }
}

/// Measures rendered text. Implementations must be monotonic: a larger size
/// never yields a smaller box.
pub trait TextMetrics {
    fn measure(
        &self,
        text: &str,
        size: f32,
    ) -> TextBox;
}

/// Largest integer font size whose box diagonal fits in `max_text_size`.
///
/// Binary search over `[0, max_text_size]` in whole units, capped at
/// [`MAX_FONT_SIZE`]. Returns at least [`MIN_FONT_SIZE`], also when nothing
/// fits or the bound is negative.
pub fn fit_text_size<M>(
    metrics: &M,
    text: &str,
    max_text_size: f32,
) -> f32
where
    M: TextMetrics + ?Sized,
{
    let budget = max_text_size * max_text_size;

    let mut lo: i32 = 0;
    let mut hi: i32 = (max_text_size as i32).min(MAX_FONT_SIZE);
    let mut accepted: i32 = 0;

    while lo <= hi {
        let mid = lo + (hi - lo) / 2;
        let probe = metrics.measure(text, mid as f32);
        if probe.diagonal_metric() <= budget {
            accepted = mid;
            lo = mid + 1;
        } else {
            hi = mid - 1;
        }
    }

    let size = (accepted as f32).max(MIN_FONT_SIZE);
    debug!("fit '{}' into {}: size {}", text, max_text_size, size);
    size
}

// =============================================================================
// Mono Font Ladder
// =============================================================================

/// Fonts available to signs, ascending in glyph height and width.
pub const SIGN_FONTS: &[&MonoFont<'static>] = &[
    &FONT_4X6,
    &FONT_6X10,
    &PROFONT_12_POINT,
    &PROFONT_14_POINT,
    &PROFONT_18_POINT,
    &PROFONT_24_POINT,
];

/// Maps a font size to the largest fixed mono font not taller than it.
///
/// Sizes below the smallest font fall back to the smallest font, so tiny
/// budgets measure too big and the search floors at [`MIN_FONT_SIZE`].
#[derive(Clone, Copy)]
pub struct FontLadder {
    fonts: &'static [&'static MonoFont<'static>],
}

impl FontLadder {
    /// `fonts` must be sorted ascending by glyph size.
    pub const fn new(fonts: &'static [&'static MonoFont<'static>]) -> Self { Self { fonts } }

    /// Font used to draw and measure at `size`. `None` for an empty ladder.
    pub fn font_for(
        &self,
        size: f32,
    ) -> Option<&'static MonoFont<'static>> {
        let mut chosen = self.fonts.first().copied();
        for &font in self.fonts {
            if font.character_size.height as f32 <= size {
                chosen = Some(font);
            } else {
                break;
            }
        }
        chosen
    }
}

impl Default for FontLadder {
    fn default() -> Self { Self::new(SIGN_FONTS) }
}

impl TextMetrics for FontLadder {
    fn measure(
        &self,
        text: &str,
        size: f32,
    ) -> TextBox {
        let Some(font) = self.font_for(size) else {
            return TextBox::default();
        };
        let style = MonoTextStyle::new(font, BinaryColor::On);
        let bbox = style.measure_string(text, Point::zero(), Baseline::Alphabetic).bounding_box;
        TextBox {
            width: bbox.size.width as f32,
            height: bbox.size.height as f32,
            center_offset: bbox.top_left.y as f32 + bbox.size.height as f32 / 2.0,
        }
    }
}

// =============================================================================
// Scalable Monospace Metrics
// =============================================================================

/// Linear model of a scalable monospace face, all ratios per unit of size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    /// Horizontal advance per glyph.
    pub advance: f32,
    /// Box height.
    pub height: f32,
    /// Distance from the box top to the baseline.
    pub ascent: f32,
}

impl MonospaceMetrics {
    /// Bold digits of a typical sans face: 0.6 em advance, 0.72 em cap height.
    pub const BOLD_DIGITS: Self = Self {
        advance: 0.6,
        height: 0.72,
        ascent: 0.72,
    };
}

impl TextMetrics for MonospaceMetrics {
    fn measure(
        &self,
        text: &str,
        size: f32,
    ) -> TextBox {
        let glyphs = text.chars().count() as f32;
        let height = self.height * size;
        TextBox {
            width: glyphs * self.advance * size,
            height,
            center_offset: -self.ascent * size + height / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts probes to check the search stays logarithmic.
    struct CountingMetrics {
        inner: MonospaceMetrics,
        probes: core::cell::Cell<u32>,
    }

    impl TextMetrics for CountingMetrics {
        fn measure(
            &self,
            text: &str,
            size: f32,
        ) -> TextBox {
            self.probes.set(self.probes.get() + 1);
            self.inner.measure(text, size)
        }
    }

    /// Square glyphs: box is `n*size` by `size`.
    const SQUARE: MonospaceMetrics = MonospaceMetrics {
        advance: 1.0,
        height: 1.0,
        ascent: 1.0,
    };

    #[test]
    fn test_fit_largest_size_within_budget() {
        // "60" at size s: (2s)² + s² = 5s² <= 100² -> s <= 44.72
        let size = fit_text_size(&SQUARE, "60", 100.0);
        assert_eq!(size, 44.0);
        assert!(SQUARE.measure("60", size).diagonal_metric() <= 100.0 * 100.0);
        assert!(SQUARE.measure("60", size + 1.0).diagonal_metric() > 100.0 * 100.0);
    }

    #[test]
    fn test_fit_is_idempotent() {
        let a = fit_text_size(&MonospaceMetrics::BOLD_DIGITS, "120", 130.0);
        let b = fit_text_size(&MonospaceMetrics::BOLD_DIGITS, "120", 130.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_fit_is_monotonic_in_budget() {
        for text in ["5", "60", "130", "--", "88888"] {
            let mut previous = 0.0;
            for max in 0..300 {
                let size = fit_text_size(&MonospaceMetrics::BOLD_DIGITS, text, max as f32);
                assert!(size >= previous, "{text}: {size} < {previous} at {max}");
                previous = size;
            }
        }
    }

    #[test]
    fn test_fit_floors_at_one() {
        assert_eq!(fit_text_size(&SQUARE, "60", 0.0), MIN_FONT_SIZE);
        assert_eq!(fit_text_size(&SQUARE, "60", -40.0), MIN_FONT_SIZE);
        assert_eq!(fit_text_size(&SQUARE, "60", f32::NAN), MIN_FONT_SIZE);
    }

    #[test]
    fn test_fit_unbounded_budget_stops_at_ceiling() {
        assert_eq!(fit_text_size(&SQUARE, "60", f32::INFINITY), MAX_FONT_SIZE as f32);
        assert_eq!(fit_text_size(&SQUARE, "60", f32::MAX), MAX_FONT_SIZE as f32);
    }

    #[test]
    fn test_fit_long_text_converges() {
        let long = "12345678901234567890123456789012345678901234567890";
        let size = fit_text_size(&SQUARE, long, 40.0);
        assert_eq!(size, MIN_FONT_SIZE);
    }

    #[test]
    fn test_fit_probe_count_is_logarithmic() {
        let metrics = CountingMetrics {
            inner: MonospaceMetrics::BOLD_DIGITS,
            probes: core::cell::Cell::new(0),
        };
        fit_text_size(&metrics, "60", 1024.0);
        assert!(metrics.probes.get() <= 11, "{} probes", metrics.probes.get());
    }

    #[test]
    fn test_monospace_center_offset() {
        let b = SQUARE.measure("1", 20.0);
        assert_eq!(b.width, 20.0);
        assert_eq!(b.height, 20.0);
        // box spans [-20, 0] around the baseline
        assert_eq!(b.center_offset, -10.0);
    }

    #[test]
    fn test_ladder_heights_ascend() {
        for pair in SIGN_FONTS.windows(2) {
            assert!(pair[0].character_size.height < pair[1].character_size.height);
            assert!(pair[0].character_size.width <= pair[1].character_size.width);
        }
    }

    fn same_font(
        a: &MonoFont<'_>,
        b: &MonoFont<'_>,
    ) -> bool {
        a.character_size == b.character_size && a.baseline == b.baseline
    }

    #[test]
    fn test_ladder_picks_largest_font_not_taller() {
        let ladder = FontLadder::default();
        let tallest = SIGN_FONTS[SIGN_FONTS.len() - 1];
        assert!(same_font(ladder.font_for(1000.0).unwrap(), tallest));
        assert!(same_font(ladder.font_for(10.0).unwrap(), &FONT_6X10));
        assert!(same_font(ladder.font_for(9.9).unwrap(), &FONT_4X6));
        // below the ladder: smallest font
        assert!(same_font(ladder.font_for(0.0).unwrap(), &FONT_4X6));
    }

    #[test]
    fn test_ladder_measures_with_chosen_font() {
        const ONLY_6X10: &[&MonoFont<'static>] = &[&FONT_6X10];
        let ladder = FontLadder::new(ONLY_6X10);
        let b = ladder.measure("88", 500.0);
        let expected_width = 2 * FONT_6X10.character_size.width + FONT_6X10.character_spacing;
        assert_eq!(b.width, expected_width as f32);
        assert_eq!(b.height, FONT_6X10.character_size.height as f32);
        let expected_offset = -(FONT_6X10.baseline as f32) + FONT_6X10.character_size.height as f32 / 2.0;
        assert_eq!(b.center_offset, expected_offset);
    }

    #[test]
    fn test_empty_ladder_measures_nothing() {
        let ladder = FontLadder::new(&[]);
        assert!(ladder.font_for(12.0).is_none());
        assert_eq!(ladder.measure("60", 12.0), TextBox::default());
    }

    #[test]
    fn test_ladder_fit_is_monotonic() {
        let ladder = FontLadder::default();
        let mut previous = 0.0;
        for max in 0..200 {
            let size = fit_text_size(&ladder, "60", max as f32);
            assert!(size >= previous);
            previous = size;
        }
    }
}
