//! Simulator layout and run configuration.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ SPEED SIGNS        TRIP 1.3 km          km/h │  header
//! ├──────────────────────────────────────────────┤
//! │      ( 48 )                  ( 50 )          │  current speed, limit
//! ├──────────────────────────────────────────────┤
//! │ I speeding: 63 in a 50 zone                  │  log panel
//! └──────────────────────────────────────────────┘
//! ```

use std::env;
use std::str::FromStr;

use embedded_graphics::prelude::*;
use log::LevelFilter;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels.
pub const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 240;

/// Header bar height in pixels.
pub const HEADER_HEIGHT: u32 = 26;

// =============================================================================
// Sign Layout
// =============================================================================

/// Square widget size of each sign.
pub const SIGN_SIZE: u32 = 116;

/// Padding inside each sign widget.
pub const SIGN_PADDING: f32 = 4.0;

/// Top-left corner of the current-speed sign.
pub const SPEED_SIGN_ORIGIN: Point = Point::new(30, HEADER_HEIGHT as i32 + 4);

/// Top-left corner of the speed-limit sign.
pub const LIMIT_SIGN_ORIGIN: Point = Point::new(174, HEADER_HEIGHT as i32 + 4);

/// Y of the divider above the log panel.
pub const LOG_DIVIDER_Y: i32 = 152;

const _: () = assert!(SPEED_SIGN_ORIGIN.x + SIGN_SIZE as i32 <= LIMIT_SIGN_ORIGIN.x);
const _: () = assert!(LIMIT_SIGN_ORIGIN.x + SIGN_SIZE as i32 <= SCREEN_WIDTH as i32);
const _: () = assert!(SPEED_SIGN_ORIGIN.y + SIGN_SIZE as i32 <= LOG_DIVIDER_Y);

// =============================================================================
// Run Configuration
// =============================================================================

/// Simulated seconds per frame.
pub const FRAME_DT: f32 = 0.1;

/// Every n-th frame is written to disk.
pub const SAVE_EVERY: u32 = 5;

/// Output directory when none is given on the command line.
pub const DEFAULT_OUTPUT_DIR: &str = "frames";

/// Environment variable holding the log level filter.
pub const LOG_LEVEL_ENV: &str = "SPEED_SIGNS_LOG";

/// A scripted pointer press in screen coordinates.
#[derive(Clone, Copy, Debug)]
pub struct Tap {
    pub frame: u32,
    pub point: Point,
}

/// Toggle to imperial, poke the limit sign, miss the speed sign's corner,
/// toggle back.
pub const TAPS: &[Tap] = &[
    Tap {
        frame: 70,
        point: Point::new(88, 88),
    },
    Tap {
        frame: 120,
        point: Point::new(232, 88),
    },
    Tap {
        frame: 150,
        point: Point::new(34, 34),
    },
    Tap {
        frame: 230,
        point: Point::new(88, 88),
    },
];

/// Log level from [`LOG_LEVEL_ENV`], `info` when unset or invalid.
pub fn log_level() -> LevelFilter {
    env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|value| LevelFilter::from_str(&value).ok())
        .unwrap_or(LevelFilter::Info)
}
