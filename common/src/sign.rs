//! Sign widgets: the current-speed readout and the speed-limit sign.
//!
//! A [`SignWidget`] owns everything one on-screen sign needs: its bounds,
//! derived geometry, the variant state and the fitted font size. Events arrive
//! one at a time from the UI loop:
//!
//! - size change: geometry is recomputed, the text is re-fitted on the next
//!   layout pass
//! - value update: the variant rebuilds its text; a changed string needs a
//!   layout pass, every update needs a redraw
//! - draw: lays out if needed, then plans and rasterizes the sign
//! - pointer: hit test against the disc, [`SignEvent::Activated`] on a hit
//!
//! The two variants are a closed enum. The only behavior they contribute is the
//! content to draw and the alert flag; the rendering is shared.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::String;
use log::{debug, warn};

use crate::config::{LIMIT_UNKNOWN, LIMIT_UNLIMITED, NO_DATA_PLACEHOLDER, SPEED_UNKNOWN, SignStyle};
use crate::geometry::{Bounds, GeometryParams, Padding, PointF};
use crate::hit_test::hit_test;
use crate::render::{SignContent, draw_sign, plan_sign};
use crate::text_fit::{FontLadder, MIN_FONT_SIZE, TextMetrics, fit_text_size};
use crate::units::{SPEED_TEXT_LEN, SpeedFormatter};

/// Capacity of a limit numeral: any `i32` in decimal.
pub const LIMIT_TEXT_LEN: usize = 11;

/// Notifications a sign sends to its owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignEvent {
    /// The disc was pressed.
    Activated,
}

// =============================================================================
// Variants
// =============================================================================

/// Current speed readout. Never in alert state.
#[derive(Clone, Debug, PartialEq)]
pub struct CurrentSpeed {
    speed_mps: f64,
    text: String<SPEED_TEXT_LEN>,
}

impl CurrentSpeed {
    pub fn new() -> Self {
        let mut text = String::new();
        text.push_str(NO_DATA_PLACEHOLDER).ok();
        Self {
            speed_mps: SPEED_UNKNOWN,
            text,
        }
    }

    /// Last speed in m/s; negative while unknown.
    #[inline]
    pub const fn speed_mps(&self) -> f64 { self.speed_mps }

    #[inline]
    pub fn is_known(&self) -> bool { self.speed_mps >= 0.0 }
}

impl Default for CurrentSpeed {
    fn default() -> Self { Self::new() }
}

/// Speed-limit sign with an externally supplied speeding flag.
#[derive(Clone, Debug, PartialEq)]
pub struct SpeedLimit {
    limit: i32,
    alert: bool,
    text: String<LIMIT_TEXT_LEN>,
}

impl SpeedLimit {
    pub const fn new() -> Self {
        Self {
            limit: LIMIT_UNKNOWN,
            alert: false,
            text: String::new(),
        }
    }

    #[inline]
    pub const fn limit(&self) -> i32 { self.limit }

    /// No limit applies on this road.
    #[inline]
    pub const fn is_unlimited(&self) -> bool { self.limit == LIMIT_UNLIMITED }
}

impl Default for SpeedLimit {
    fn default() -> Self { Self::new() }
}

/// The sign variants.
#[derive(Clone, Debug, PartialEq)]
pub enum SignKind {
    CurrentSpeed(CurrentSpeed),
    SpeedLimit(SpeedLimit),
}

impl SignKind {
    /// Text to draw, or `None` when the sign shows no numeral.
    pub fn display_text(&self) -> Option<&str> {
        match self {
            Self::CurrentSpeed(speed) => Some(speed.text.as_str()),
            Self::SpeedLimit(limit) if limit.limit > 0 => Some(limit.text.as_str()),
            Self::SpeedLimit(_) => None,
        }
    }

    /// Alert flag as reported by the variant.
    pub const fn is_alert(&self) -> bool {
        match self {
            Self::CurrentSpeed(_) => false,
            Self::SpeedLimit(limit) => limit.alert,
        }
    }

    /// What the renderer draws for this state.
    pub fn content(&self) -> SignContent<'_> {
        match self {
            Self::SpeedLimit(limit) if limit.is_unlimited() => SignContent::Unlimited,
            _ => match self.display_text() {
                Some(text) => SignContent::Value {
                    text,
                    alert: self.is_alert(),
                },
                None => SignContent::Empty,
            },
        }
    }

    const fn name(&self) -> &'static str {
        match self {
            Self::CurrentSpeed(_) => "current speed",
            Self::SpeedLimit(_) => "speed limit",
        }
    }
}

// =============================================================================
// Widget
// =============================================================================

/// One circular sign and its per-instance state.
#[derive(Clone, Debug)]
pub struct SignWidget {
    kind: SignKind,
    style: SignStyle,
    bounds: Bounds,
    padding: Padding,
    geometry: GeometryParams,
    font_size: f32,
    needs_layout: bool,
    needs_redraw: bool,
}

impl SignWidget {
    pub fn new(
        kind: SignKind,
        style: SignStyle,
    ) -> Self {
        Self {
            kind,
            style,
            bounds: Bounds::default(),
            padding: Padding::ZERO,
            geometry: GeometryParams::default(),
            font_size: MIN_FONT_SIZE,
            needs_layout: true,
            needs_redraw: true,
        }
    }

    /// Current-speed sign with the default style, showing the placeholder.
    pub fn current_speed() -> Self { Self::new(SignKind::CurrentSpeed(CurrentSpeed::new()), SignStyle::current_speed()) }

    /// Speed-limit sign with the default style, showing nothing.
    pub fn speed_limit() -> Self { Self::new(SignKind::SpeedLimit(SpeedLimit::new()), SignStyle::speed_limit()) }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    /// New widget size. Recomputes geometry and schedules a re-fit.
    pub fn on_size_changed(
        &mut self,
        bounds: Bounds,
        padding: Padding,
    ) {
        self.bounds = bounds;
        self.padding = padding;
        self.geometry = GeometryParams::compute(bounds, padding, self.style.ratios);
        self.needs_layout = true;
        self.needs_redraw = true;
    }

    /// Update the current-speed readout. Negative or non-finite speeds show
    /// the placeholder.
    pub fn set_current_speed<F>(
        &mut self,
        mps: f64,
        formatter: &F,
    ) where
        F: SpeedFormatter + ?Sized,
    {
        let SignKind::CurrentSpeed(speed) = &mut self.kind else {
            warn!("set_current_speed on a {} sign ignored", self.kind.name());
            return;
        };

        speed.speed_mps = mps;
        speed.text.clear();
        if !mps.is_finite() || mps < 0.0 {
            speed.text.push_str(NO_DATA_PLACEHOLDER).ok();
        } else {
            let (value, _units) = formatter.format_speed_and_units(mps);
            speed.text.push_str(&value).ok();
        }

        self.needs_layout = true;
        self.needs_redraw = true;
    }

    /// Update the limit and the speeding flag. Only a changed limit needs a
    /// re-fit; the numeral length cannot change otherwise.
    pub fn set_speed_limit(
        &mut self,
        limit: i32,
        alert: bool,
    ) {
        let SignKind::SpeedLimit(sign) = &mut self.kind else {
            warn!("set_speed_limit on a {} sign ignored", self.kind.name());
            return;
        };

        if sign.limit != limit {
            debug!("speed limit {} -> {}", sign.limit, limit);
            sign.limit = limit;
            sign.text.clear();
            let _ = write!(sign.text, "{limit}");
            self.needs_layout = true;
        }
        sign.alert = alert;
        self.needs_redraw = true;
    }

    /// Pointer press at `point`. Returns [`SignEvent::Activated`] when it lands
    /// on the disc.
    pub fn on_pointer(
        &self,
        point: PointF,
    ) -> Option<SignEvent> {
        if hit_test(point, self.geometry.center, self.geometry.radius) {
            debug!("{} sign activated", self.kind.name());
            Some(SignEvent::Activated)
        } else {
            None
        }
    }

    // -------------------------------------------------------------------------
    // Layout and drawing
    // -------------------------------------------------------------------------

    /// Re-fit the text if a size or value change asked for it. Without a
    /// numeral the previous font size is kept.
    pub fn layout<M>(
        &mut self,
        metrics: &M,
    ) where
        M: TextMetrics + ?Sized,
    {
        if !self.needs_layout {
            return;
        }
        if let Some(text) = self.kind.display_text().filter(|t| !t.is_empty()) {
            self.font_size = fit_text_size(metrics, text, self.geometry.max_text_size());
        }
        self.needs_layout = false;
    }

    /// Lay out if needed, then draw the sign.
    pub fn draw<D>(
        &mut self,
        display: &mut D,
        fonts: &FontLadder,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        self.layout(fonts);
        let frame = plan_sign(fonts, &self.geometry, &self.style, self.kind.content(), self.font_size);
        draw_sign(display, fonts, &frame);
        self.needs_redraw = false;
    }

    /// Consume the redraw request. Returns whether one was pending.
    pub fn take_redraw(&mut self) -> bool { core::mem::take(&mut self.needs_redraw) }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[inline]
    pub const fn kind(&self) -> &SignKind { &self.kind }

    #[inline]
    pub const fn style(&self) -> &SignStyle { &self.style }

    #[inline]
    pub const fn bounds(&self) -> Bounds { self.bounds }

    #[inline]
    pub const fn padding(&self) -> Padding { self.padding }

    #[inline]
    pub const fn geometry(&self) -> &GeometryParams { &self.geometry }

    #[inline]
    pub const fn font_size(&self) -> f32 { self.font_size }

    #[inline]
    pub fn display_text(&self) -> Option<&str> { self.kind.display_text() }

    #[inline]
    pub const fn is_alert(&self) -> bool { self.kind.is_alert() }

    #[inline]
    pub const fn is_unlimited(&self) -> bool { matches!(&self.kind, SignKind::SpeedLimit(limit) if limit.is_unlimited()) }

    #[inline]
    pub const fn needs_layout(&self) -> bool { self.needs_layout }

    #[inline]
    pub const fn needs_redraw(&self) -> bool { self.needs_redraw }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::mock_display::MockDisplay;

    use super::*;
    use crate::colors::{RED, WHITE};
    use crate::render::SignShape;
    use crate::text_fit::MonospaceMetrics;
    use crate::units::Units;

    const METRICS: MonospaceMetrics = MonospaceMetrics::BOLD_DIGITS;

    fn sized(mut widget: SignWidget) -> SignWidget {
        widget.on_size_changed(Bounds::new(200.0, 200.0), Padding::ZERO);
        widget.layout(&METRICS);
        widget
    }

    fn plan(widget: &SignWidget) -> std::vec::Vec<SignShape<'_>> {
        plan_sign(&METRICS, widget.geometry(), widget.style(), widget.kind().content(), widget.font_size())
            .shapes()
            .to_vec()
    }

    #[test]
    fn test_unknown_speed_shows_placeholder() {
        let mut sign = sized(SignWidget::current_speed());
        sign.set_current_speed(-1.0, &Units::Metric);
        assert_eq!(sign.display_text(), Some("--"));
        assert!(!sign.is_alert());
        assert!(matches!(sign.kind().content(), SignContent::Value { text: "--", alert: false }));
    }

    #[test]
    fn test_known_speed_uses_formatter() {
        let mut sign = sized(SignWidget::current_speed());
        sign.set_current_speed(13.9, &Units::Metric);
        assert_eq!(sign.display_text(), Some("50"));
        sign.set_current_speed(13.9, &Units::Imperial);
        assert_eq!(sign.display_text(), Some("31"));
        assert!(!sign.is_alert());
    }

    #[test]
    fn test_speed_update_requests_layout_and_redraw() {
        let mut sign = sized(SignWidget::current_speed());
        assert!(sign.take_redraw());
        assert!(!sign.needs_layout());

        sign.set_current_speed(2.0, &Units::Metric);
        assert_eq!(sign.display_text(), Some("7.2"));
        assert!(sign.needs_layout());
        assert!(sign.needs_redraw());

        // three glyphs shrink the font compared to the two-glyph placeholder
        let placeholder_size = sign.font_size();
        sign.layout(&METRICS);
        assert!(sign.font_size() < placeholder_size);
    }

    #[test]
    fn test_unlimited_limit() {
        let mut sign = sized(SignWidget::speed_limit());
        sign.set_speed_limit(0, true);
        assert!(sign.is_unlimited());
        assert_eq!(sign.display_text(), None);
        assert_eq!(sign.kind().content(), SignContent::Unlimited);

        let shapes = plan(&sign);
        assert_eq!(shapes.iter().filter(|s| matches!(s, SignShape::Stripe { .. })).count(), 5);
        assert!(!shapes.iter().any(|s| matches!(s, SignShape::Label { .. })));
        // the unlimited ring replaces the normal one
        let rings: std::vec::Vec<_> = shapes
            .iter()
            .filter_map(|s| match s {
                SignShape::Ring { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        assert_eq!(rings, [sign.style().unlimited.border]);
    }

    #[test]
    fn test_speeding_limit_uses_alert_palette() {
        let mut sign = sized(SignWidget::speed_limit());
        sign.set_speed_limit(60, true);
        sign.layout(&METRICS);

        assert_eq!(sign.display_text(), Some("60"));
        assert!(sign.is_alert());

        let shapes = plan(&sign);
        assert!(!shapes.iter().any(|s| matches!(s, SignShape::Ring { .. })));
        assert!(matches!(shapes[0], SignShape::Disc { color, .. } if color == RED));
        assert!(matches!(shapes[1], SignShape::Label { text: "60", color, .. } if color == WHITE));
    }

    #[test]
    fn test_unknown_limit_draws_nothing() {
        let sign = sized(SignWidget::speed_limit());
        assert_eq!(sign.kind().content(), SignContent::Empty);
        assert!(plan(&sign).is_empty());

        let mut sign = sign;
        sign.set_speed_limit(-5, false);
        assert_eq!(sign.kind().content(), SignContent::Empty);
    }

    #[test]
    fn test_alert_only_change_skips_layout() {
        let mut sign = sized(SignWidget::speed_limit());
        sign.set_speed_limit(80, false);
        sign.layout(&METRICS);
        sign.take_redraw();
        let size = sign.font_size();

        sign.set_speed_limit(80, true);
        assert!(!sign.needs_layout());
        assert!(sign.needs_redraw());
        assert_eq!(sign.font_size(), size);

        sign.set_speed_limit(120, true);
        assert!(sign.needs_layout());
    }

    #[test]
    fn test_limit_text_length_changes_font_size() {
        let mut sign = sized(SignWidget::speed_limit());
        sign.set_speed_limit(30, false);
        sign.layout(&METRICS);
        let two_digits = sign.font_size();

        sign.set_speed_limit(130, false);
        sign.layout(&METRICS);
        assert!(sign.font_size() < two_digits);
    }

    #[test]
    fn test_widest_limits_keep_their_numeral() {
        let mut sign = sized(SignWidget::speed_limit());
        sign.set_speed_limit(123_456_789, false);
        assert_eq!(sign.display_text(), Some("123456789"));
        assert!(matches!(sign.kind().content(), SignContent::Value { text: "123456789", .. }));

        sign.set_speed_limit(i32::MAX, true);
        assert_eq!(sign.display_text(), Some("2147483647"));
        sign.layout(&METRICS);
        assert!(sign.font_size() >= MIN_FONT_SIZE);
    }

    #[test]
    fn test_non_finite_speed_shows_placeholder() {
        let mut sign = sized(SignWidget::current_speed());
        sign.set_current_speed(f64::NAN, &Units::Metric);
        assert_eq!(sign.display_text(), Some(NO_DATA_PLACEHOLDER));
        sign.set_current_speed(f64::INFINITY, &Units::Imperial);
        assert_eq!(sign.display_text(), Some(NO_DATA_PLACEHOLDER));
        // too many digits for the readout
        sign.set_current_speed(1e8, &Units::Metric);
        assert_eq!(sign.display_text(), Some(NO_DATA_PLACEHOLDER));
    }

    #[test]
    fn test_size_change_keeps_bounds_and_padding() {
        let mut sign = SignWidget::current_speed();
        let padding = Padding::new(2.0, 4.0, 6.0, 8.0);
        sign.on_size_changed(Bounds::new(120.0, 90.0), padding);
        assert_eq!(sign.bounds(), Bounds::new(120.0, 90.0));
        assert_eq!(sign.padding(), padding);
        assert_eq!(sign.geometry().center, PointF::new(59.0, 44.0));
    }

    #[test]
    fn test_no_content_keeps_previous_font_size() {
        let mut sign = sized(SignWidget::speed_limit());
        sign.set_speed_limit(50, false);
        sign.layout(&METRICS);
        let size = sign.font_size();

        sign.set_speed_limit(LIMIT_UNKNOWN, false);
        sign.layout(&METRICS);
        assert_eq!(sign.font_size(), size);
    }

    #[test]
    fn test_size_change_refits() {
        let mut sign = sized(SignWidget::speed_limit());
        sign.set_speed_limit(50, false);
        sign.layout(&METRICS);
        let large = sign.font_size();

        sign.on_size_changed(Bounds::new(80.0, 80.0), Padding::ZERO);
        assert!(sign.needs_layout());
        sign.layout(&METRICS);
        assert!(sign.font_size() < large);
    }

    #[test]
    fn test_pointer_hits_disc_only() {
        let sign = sized(SignWidget::speed_limit());
        assert_eq!(sign.on_pointer(PointF::new(100.0, 100.0)), Some(SignEvent::Activated));
        assert_eq!(sign.on_pointer(PointF::new(200.0, 100.0)), Some(SignEvent::Activated));
        assert_eq!(sign.on_pointer(PointF::new(5.0, 5.0)), None);
        assert_eq!(sign.on_pointer(PointF::new(200.5, 100.0)), None);
    }

    #[test]
    fn test_wrong_variant_setters_are_ignored() {
        let mut speed = sized(SignWidget::current_speed());
        speed.take_redraw();
        speed.set_speed_limit(50, true);
        assert_eq!(speed.display_text(), Some("--"));
        assert!(!speed.needs_redraw());

        let mut limit = sized(SignWidget::speed_limit());
        limit.set_current_speed(10.0, &Units::Metric);
        assert_eq!(limit.display_text(), None);
    }

    #[test]
    fn test_zero_size_sign_draws_nothing() {
        let mut sign = SignWidget::speed_limit();
        sign.set_speed_limit(60, false);
        sign.on_size_changed(Bounds::new(0.0, 0.0), Padding::ZERO);
        sign.layout(&METRICS);
        assert_eq!(sign.font_size(), MIN_FONT_SIZE);
        assert!(plan(&sign).is_empty());
    }

    #[test]
    fn test_draw_clears_redraw_request() {
        let mut sign = SignWidget::speed_limit();
        sign.on_size_changed(Bounds::new(60.0, 60.0), Padding::ZERO);
        sign.set_speed_limit(90, false);

        let mut display: MockDisplay<Rgb565> = MockDisplay::new();
        display.set_allow_overdraw(true);
        sign.draw(&mut display, &FontLadder::default());

        assert!(!sign.needs_layout());
        assert!(!sign.take_redraw());
        assert!(sign.font_size() > MIN_FONT_SIZE);
        assert_eq!(display.get_pixel(Point::new(30, 3)), Some(sign.style().palette.border));
    }
}
