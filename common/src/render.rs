//! Sign rendering.
//!
//! Rendering is split in two steps so the decisions stay testable without a
//! display:
//!
//! 1. [`plan_sign`] turns geometry, style and content into a [`SignFrame`], a
//!    short display list of shapes in sub-pixel coordinates.
//! 2. [`draw_sign`] rasterizes the frame onto any `DrawTarget<Color = Rgb565>`
//!    with embedded-graphics primitives.
//!
//! # Shapes per state
//!
//! | Content            | Disc             | Ring           | Extra            |
//! |--------------------|------------------|----------------|------------------|
//! | value, normal      | background       | border color   | label            |
//! | value, alert       | alert background | none           | label, alert text|
//! | unlimited          | background       | unlimited ring | five stripes     |
//! | empty              | none             | none           | none             |

use core::f32::consts::FRAC_1_SQRT_2;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder};
use heapless::Vec;
use log::trace;
use micromath::F32;

use crate::config::SignStyle;
use crate::geometry::{GeometryParams, PointF};
use crate::text_fit::{FontLadder, TextMetrics};

/// Stripes of the unlimited glyph, centered on the middle one.
const STRIPE_HALF_COUNT: i32 = 2;

/// Stripe half-length relative to the disc radius.
const STRIPE_LENGTH_RATIO: f32 = 0.8;

/// Distance between stripes relative to the stripe half-length.
const STRIPE_SPACING_RATIO: f32 = 0.15;

/// Stripe stroke relative to the ring width.
const STRIPE_WIDTH_RATIO: f32 = 0.4;

/// Capacity of a frame: disc, ring and five stripes.
pub const MAX_SHAPES: usize = 8;

/// Labels are centered horizontally and anchored at the alphabetic baseline.
const LABEL_TEXT_STYLE: TextStyle = TextStyleBuilder::new()
    .alignment(Alignment::Center)
    .baseline(Baseline::Alphabetic)
    .build();

/// What a sign shows this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignContent<'a> {
    /// Nothing is drawn.
    Empty,
    /// A numeral or placeholder, optionally in alert colors.
    Value { text: &'a str, alert: bool },
    /// The end-of-limit glyph. Has no text and ignores the alert flag.
    Unlimited,
}

/// One primitive of a sign.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SignShape<'a> {
    Disc {
        center: PointF,
        radius: f32,
        color: Rgb565,
    },
    Ring {
        center: PointF,
        radius: f32,
        width: f32,
        color: Rgb565,
    },
    Stripe {
        start: PointF,
        end: PointF,
        width: f32,
        color: Rgb565,
    },
    Label {
        text: &'a str,
        /// Horizontal center, baseline y.
        origin: PointF,
        size: f32,
        color: Rgb565,
    },
}

/// Display list for one draw of one sign.
#[derive(Clone, Debug, Default)]
pub struct SignFrame<'a> {
    shapes: Vec<SignShape<'a>, MAX_SHAPES>,
}

impl<'a> SignFrame<'a> {
    pub const fn new() -> Self { Self { shapes: Vec::new() } }

    #[inline]
    pub fn shapes(&self) -> &[SignShape<'a>] { &self.shapes }

    #[inline]
    pub fn is_empty(&self) -> bool { self.shapes.is_empty() }

    fn push(
        &mut self,
        shape: SignShape<'a>,
    ) {
        // Capacity covers the largest plan
        self.shapes.push(shape).ok();
    }
}

/// Build the display list of a sign.
///
/// `font_size` is the fitted size; `metrics` must be the same measurer the
/// size was fitted with so the label centers on its measured box.
pub fn plan_sign<'a, M>(
    metrics: &M,
    geometry: &GeometryParams,
    style: &SignStyle,
    content: SignContent<'a>,
    font_size: f32,
) -> SignFrame<'a>
where
    M: TextMetrics + ?Sized,
{
    let mut frame = SignFrame::new();
    if geometry.is_empty() {
        return frame;
    }

    let center = geometry.center;
    match content {
        SignContent::Empty => {}
        SignContent::Unlimited => {
            frame.push(SignShape::Disc {
                center,
                radius: geometry.radius,
                color: style.palette.background,
            });
            frame.push(SignShape::Ring {
                center,
                radius: geometry.border_radius,
                width: geometry.border_width,
                color: style.unlimited.border,
            });
            push_unlimited_stripes(&mut frame, geometry, style);
        }
        SignContent::Value { text, alert } => {
            frame.push(SignShape::Disc {
                center,
                radius: geometry.radius,
                color: style.palette.background_for(alert),
            });
            if !alert {
                frame.push(SignShape::Ring {
                    center,
                    radius: geometry.border_radius,
                    width: geometry.border_width,
                    color: style.palette.border,
                });
            }
            if !text.is_empty() {
                let measured = metrics.measure(text, font_size);
                frame.push(SignShape::Label {
                    text,
                    origin: PointF::new(center.x, center.y - measured.center_offset),
                    size: font_size,
                    color: style.palette.text_for(alert),
                });
            }
        }
    }
    frame
}

/// Five parallel stripes at 45°, running from lower-left to upper-right.
fn push_unlimited_stripes(
    frame: &mut SignFrame<'_>,
    geometry: &GeometryParams,
    style: &SignStyle,
) {
    let half_length = geometry.radius * STRIPE_LENGTH_RATIO;
    let step = half_length * STRIPE_SPACING_RATIO;
    let width = geometry.border_width * STRIPE_WIDTH_RATIO;

    // Stripe direction and its perpendicular
    let (dx, dy) = (-FRAC_1_SQRT_2, FRAC_1_SQRT_2);
    let (px, py) = (-dy, dx);
    let center = geometry.center;

    for i in -STRIPE_HALF_COUNT..=STRIPE_HALF_COUNT {
        let ox = px * step * i as f32;
        let oy = py * step * i as f32;
        frame.push(SignShape::Stripe {
            start: PointF::new(center.x + dx * half_length + ox, center.y + dy * half_length + oy),
            end: PointF::new(center.x - dx * half_length + ox, center.y - dy * half_length + oy),
            width,
            color: style.unlimited.stripe,
        });
    }
}

/// Rasterize a frame. Labels use the ladder font for their fitted size.
pub fn draw_sign<D>(
    display: &mut D,
    fonts: &FontLadder,
    frame: &SignFrame<'_>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    trace!("draw sign: {} shapes", frame.shapes().len());
    for shape in frame.shapes() {
        match *shape {
            SignShape::Disc { center, radius, color } => {
                Circle::with_center(to_pixel(center), diameter_px(radius))
                    .into_styled(PrimitiveStyle::with_fill(color))
                    .draw(display)
                    .ok();
            }
            SignShape::Ring {
                center,
                radius,
                width,
                color,
            } => {
                Circle::with_center(to_pixel(center), diameter_px(radius))
                    .into_styled(PrimitiveStyle::with_stroke(color, stroke_px(width)))
                    .draw(display)
                    .ok();
            }
            SignShape::Stripe {
                start,
                end,
                width,
                color,
            } => {
                Line::new(to_pixel(start), to_pixel(end))
                    .into_styled(PrimitiveStyle::with_stroke(color, stroke_px(width)))
                    .draw(display)
                    .ok();
            }
            SignShape::Label {
                text,
                origin,
                size,
                color,
            } => {
                if let Some(font) = fonts.font_for(size) {
                    Text::with_text_style(text, to_pixel(origin), MonoTextStyle::new(font, color), LABEL_TEXT_STYLE)
                        .draw(display)
                        .ok();
                }
            }
        }
    }
}

#[inline]
fn round_px(value: f32) -> i32 { F32(value).round().0 as i32 }

#[inline]
fn to_pixel(point: PointF) -> Point { Point::new(round_px(point.x), round_px(point.y)) }

/// Circle diameter in whole pixels; negative radii draw nothing.
#[inline]
fn diameter_px(radius: f32) -> u32 { round_px(2.0 * radius).max(0) as u32 }

/// Stroke width in whole pixels; any positive width draws at least one pixel.
#[inline]
fn stroke_px(width: f32) -> u32 {
    if width > 0.0 {
        round_px(width).max(1) as u32
    } else {
        0
    }
}
