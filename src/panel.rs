//! Header bar and on-screen log panel.

use core::fmt::Write;

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Text, TextStyle, TextStyleBuilder};
use heapless::String;
use log::Level;
use profont::PROFONT_12_POINT;
use speed_signs_common::colors::{AMBER, BLACK, GRAY, LOG_GREEN, RED, WHITE};
use speed_signs_common::units::DISTANCE_TEXT_LEN;
use speed_signs_common::{DebugLog, Units, format_distance};

use crate::config::{HEADER_HEIGHT, LOG_DIVIDER_Y, SCREEN_HEIGHT, SCREEN_WIDTH};

// =============================================================================
// Layout Constants
// =============================================================================

/// Baseline of header text.
const HEADER_TEXT_Y: i32 = 17;

/// Left edge of left-aligned text.
const TEXT_X: i32 = 5;

/// Baseline of the first log line.
const LOG_Y: i32 = LOG_DIVIDER_Y + 12;

/// Distance between log baselines.
const LOG_LINE_HEIGHT: i32 = 10;

/// Offset of log text after the level tag.
const LOG_TEXT_X: i32 = TEXT_X + 12;

const LABEL_FONT: &MonoFont = &FONT_6X10;

const TITLE_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&PROFONT_12_POINT, WHITE);

const LABEL_STYLE: MonoTextStyle<'static, Rgb565> = MonoTextStyle::new(&FONT_6X10, WHITE);

const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).build();

const RIGHT_ALIGNED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Right).build();

const HEADER_RECT: Rectangle = Rectangle::new(Point::zero(), Size::new(SCREEN_WIDTH, HEADER_HEIGHT));

const LOG_RECT: Rectangle = Rectangle::new(
    Point::new(0, LOG_DIVIDER_Y + 1),
    Size::new(SCREEN_WIDTH, SCREEN_HEIGHT - LOG_DIVIDER_Y as u32 - 1),
);

// =============================================================================
// Drawing
// =============================================================================

/// Draw the header: title, trip distance and active speed unit.
pub fn draw_header<D>(
    display: &mut D,
    units: Units,
    distance_m: f64,
) where
    D: DrawTarget<Color = Rgb565>,
{
    HEADER_RECT.into_styled(PrimitiveStyle::with_fill(GRAY)).draw(display).ok();

    Text::new("SPEED SIGNS", Point::new(TEXT_X, HEADER_TEXT_Y), TITLE_STYLE)
        .draw(display)
        .ok();

    let mut trip: String<{ DISTANCE_TEXT_LEN + 5 }> = String::new();
    let _ = write!(trip, "TRIP {}", format_distance(distance_m, units));
    Text::with_text_style(&trip, Point::new(SCREEN_WIDTH as i32 / 2 + 20, HEADER_TEXT_Y), LABEL_STYLE, CENTERED)
        .draw(display)
        .ok();

    Text::with_text_style(
        units.speed_label(),
        Point::new(SCREEN_WIDTH as i32 - TEXT_X, HEADER_TEXT_Y),
        LABEL_STYLE,
        RIGHT_ALIGNED,
    )
    .draw(display)
    .ok();
}

/// Draw the log panel below the signs, oldest line on top.
pub fn draw_log_panel<D>(
    display: &mut D,
    log: &DebugLog,
) where
    D: DrawTarget<Color = Rgb565>,
{
    LOG_RECT.into_styled(PrimitiveStyle::with_fill(BLACK)).draw(display).ok();
    Line::new(Point::new(2, LOG_DIVIDER_Y), Point::new(SCREEN_WIDTH as i32 - 2, LOG_DIVIDER_Y))
        .into_styled(PrimitiveStyle::with_stroke(GRAY, 1))
        .draw(display)
        .ok();

    let mut y = LOG_Y;
    for line in log.iter() {
        let mut buf = [0u8; 4];
        let tag = line.tag().encode_utf8(&mut buf);
        let style = MonoTextStyle::new(LABEL_FONT, level_color(line.level));
        Text::new(tag, Point::new(TEXT_X, y), style).draw(display).ok();
        Text::new(&line.text, Point::new(LOG_TEXT_X, y), MonoTextStyle::new(LABEL_FONT, LOG_GREEN))
            .draw(display)
            .ok();
        y += LOG_LINE_HEIGHT;
    }
}

const fn level_color(level: Level) -> Rgb565 {
    match level {
        Level::Error => RED,
        Level::Warn => AMBER,
        _ => LOG_GREEN,
    }
}
