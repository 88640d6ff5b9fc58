//! Disc geometry derived from widget bounds.
//!
//! A sign is the largest circle that fits the padded bounds. The ring is
//! stroked centered on `border_radius`, so half its width sits outside that
//! radius; the inset pulls the whole ring further in from the disc edge:
//!
//! ```text
//! radius         = min(usable_w, usable_h) / 2
//! border_width   = radius * ratios.width
//! gap            = radius * ratios.inset
//! border_radius  = radius - border_width / 2 - gap
//! text_radius    = border_radius - border_width
//! ```
//!
//! Nothing here fails. Zero bounds give a zero radius and every later step
//! becomes a no-op. A ratio pair with `width / 2 + inset > 1` yields a negative
//! `border_radius`, which is kept as-is and reported via
//! [`GeometryParams::is_border_inverted`].

use log::{debug, warn};

use crate::config::BorderRatios;

/// A point in widget pixel space. Pointer events and shape anchors use
/// sub-pixel precision; rounding happens only when drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(
        x: f32,
        y: f32,
    ) -> Self {
        Self { x, y }
    }

    /// Squared distance to `other`.
    #[inline]
    pub fn distance_squared(
        self,
        other: Self,
    ) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Widget size in pixels, padding included.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(
        width: f32,
        height: f32,
    ) -> Self {
        Self { width, height }
    }
}

/// Padding on each edge of the widget.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Padding {
    pub const ZERO: Self = Self::uniform(0.0);

    pub const fn new(
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
    ) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    pub const fn uniform(value: f32) -> Self { Self::new(value, value, value, value) }

    /// Same padding with negative sides raised to zero.
    pub fn clamped(&self) -> Self {
        Self::new(self.left.max(0.0), self.right.max(0.0), self.top.max(0.0), self.bottom.max(0.0))
    }
}

/// Derived circle geometry of one sign.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeometryParams {
    /// Disc center, offset by the left/top padding.
    pub center: PointF,
    /// Full disc radius.
    pub radius: f32,
    /// Ring stroke width.
    pub border_width: f32,
    /// Radius the ring stroke is centered on. May be negative (see module docs).
    pub border_radius: f32,
}

impl GeometryParams {
    /// Recompute geometry for new bounds.
    pub fn compute(
        bounds: Bounds,
        padding: Padding,
        ratios: BorderRatios,
    ) -> Self {
        let padding = padding.clamped();
        let usable_width = (bounds.width - padding.left - padding.right).max(0.0);
        let usable_height = (bounds.height - padding.top - padding.bottom).max(0.0);

        let radius = usable_width.min(usable_height) / 2.0;
        let border_width = radius * ratios.width;
        let gap = radius * ratios.inset;
        let border_radius = radius - border_width / 2.0 - gap;

        let params = Self {
            center: PointF::new(padding.left + usable_width / 2.0, padding.top + usable_height / 2.0),
            radius,
            border_width,
            border_radius,
        };

        debug!(
            "sign geometry: radius={} border_width={} border_radius={}",
            params.radius, params.border_width, params.border_radius
        );
        if params.is_border_inverted() {
            warn!(
                "border ratios {}/{} invert the ring (border_radius={})",
                ratios.width, ratios.inset, params.border_radius
            );
        }

        params
    }

    /// Gap between the disc edge and the outside of the ring stroke.
    #[inline]
    pub fn gap(&self) -> f32 { self.radius - self.border_width / 2.0 - self.border_radius }

    /// Radius of the area left for text inside the ring.
    #[inline]
    pub fn text_radius(&self) -> f32 { self.border_radius - self.border_width }

    /// Upper bound of the font-size search: the text circle's diameter.
    #[inline]
    pub fn max_text_size(&self) -> f32 { 2.0 * self.text_radius() }

    /// Maximum permitted `w² + h²` of the text box.
    #[inline]
    pub fn area_budget(&self) -> f32 {
        let size = self.max_text_size();
        size * size
    }

    /// True when there is nothing to draw.
    #[inline]
    pub fn is_empty(&self) -> bool { self.radius <= 0.0 }

    /// True when the configured ratios pushed the ring radius below zero.
    #[inline]
    pub fn is_border_inverted(&self) -> bool { self.border_radius < 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CURRENT_SPEED_RATIOS, SPEED_LIMIT_RATIOS};

    const EPS: f32 = 1e-4;

    fn close(
        a: f32,
        b: f32,
    ) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_speed_limit_reference_geometry() {
        let g = GeometryParams::compute(Bounds::new(200.0, 200.0), Padding::ZERO, SPEED_LIMIT_RATIOS);
        assert!(close(g.radius, 100.0));
        assert!(close(g.border_width, 20.0));
        assert!(close(g.gap(), 5.0));
        assert!(close(g.border_radius, 85.0));
        assert!(close(g.text_radius(), 65.0));
        assert!(close(g.max_text_size(), 130.0));
        assert!(close(g.area_budget(), 16_900.0));
        assert_eq!(g.center, PointF::new(100.0, 100.0));
    }

    #[test]
    fn test_radius_uses_smaller_dimension() {
        let g = GeometryParams::compute(Bounds::new(300.0, 120.0), Padding::ZERO, CURRENT_SPEED_RATIOS);
        assert!(close(g.radius, 60.0));
        assert_eq!(g.center, PointF::new(150.0, 60.0));
    }

    #[test]
    fn test_padding_shrinks_and_offsets() {
        let padding = Padding::new(10.0, 30.0, 5.0, 15.0);
        let g = GeometryParams::compute(Bounds::new(140.0, 120.0), padding, CURRENT_SPEED_RATIOS);
        // usable 100 x 100
        assert!(close(g.radius, 50.0));
        assert_eq!(g.center, PointF::new(60.0, 55.0));
    }

    #[test]
    fn test_oversized_padding_clamps_to_zero() {
        let g = GeometryParams::compute(Bounds::new(20.0, 20.0), Padding::uniform(15.0), SPEED_LIMIT_RATIOS);
        assert_eq!(g.radius, 0.0);
        assert_eq!(g.border_radius, 0.0);
        assert!(g.is_empty());
    }

    #[test]
    fn test_negative_padding_clamps_to_zero() {
        let g = GeometryParams::compute(Bounds::new(100.0, 100.0), Padding::uniform(-10.0), SPEED_LIMIT_RATIOS);
        assert!(close(g.radius, 50.0));
        assert_eq!(g.center, PointF::new(50.0, 50.0));

        // only the negative side is dropped
        let g = GeometryParams::compute(Bounds::new(100.0, 100.0), Padding::new(-10.0, 20.0, 0.0, 0.0), SPEED_LIMIT_RATIOS);
        assert!(close(g.radius, 40.0));
        assert_eq!(g.center, PointF::new(40.0, 50.0));
    }

    #[test]
    fn test_zero_bounds_are_empty() {
        let g = GeometryParams::compute(Bounds::default(), Padding::ZERO, SPEED_LIMIT_RATIOS);
        assert!(g.is_empty());
        assert!(!g.is_border_inverted());
    }

    #[test]
    fn test_border_radius_never_exceeds_radius() {
        let ratios = [0.0f32, 0.05, 0.1, 0.2, 0.5, 0.75, 1.0];
        let sizes = [(0.0f32, 0.0f32), (1.0, 3.0), (48.0, 48.0), (200.0, 90.0), (1080.0, 1920.0)];
        for &(w, h) in &sizes {
            for &width in &ratios {
                for &inset in &ratios {
                    let g = GeometryParams::compute(Bounds::new(w, h), Padding::ZERO, BorderRatios::new(width, inset));
                    assert!(close(g.radius, w.min(h) / 2.0));
                    assert!(g.border_radius <= g.radius, "{w}x{h} {width}/{inset}");
                }
            }
        }
    }

    #[test]
    fn test_inverted_border_is_passed_through() {
        let g = GeometryParams::compute(Bounds::new(100.0, 100.0), Padding::ZERO, BorderRatios::new(1.0, 0.8));
        // 50 - 25 - 40
        assert!(close(g.border_radius, -15.0));
        assert!(g.is_border_inverted());
    }

    #[test]
    fn test_distance_squared() {
        let a = PointF::new(1.0, 2.0);
        let b = PointF::new(4.0, 6.0);
        assert!(close(a.distance_squared(b), 25.0));
    }
}
