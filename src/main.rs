//! Speed sign simulator.
//!
//! Drives a current-speed sign and a speed-limit sign through a scripted
//! drive, renders them into an `embedded-graphics-simulator` display and
//! writes every few frames to a PNG. Scripted taps on the speed sign toggle
//! between metric and imperial units.
//!
//! ```text
//! speed-signs [OUTPUT_DIR]        default: frames/
//! SPEED_SIGNS_LOG=debug speed-signs
//! ```

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod config;
mod drive;
mod logger;
mod panel;

use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics_simulator::{OutputSettings, OutputSettingsBuilder, SimulatorDisplay};
use log::{debug, error, info};
use speed_signs_common::colors::BLACK;
use speed_signs_common::{Bounds, FontLadder, Padding, PointF, SignEvent, SignWidget, Units};

use crate::config::{
    DEFAULT_OUTPUT_DIR,
    FRAME_DT,
    LIMIT_SIGN_ORIGIN,
    SAVE_EVERY,
    SCREEN_HEIGHT,
    SCREEN_WIDTH,
    SIGN_PADDING,
    SIGN_SIZE,
    SPEED_SIGN_ORIGIN,
    TAPS,
};
use crate::drive::{Drive, SCRIPT, is_speeding, posted_limit};
use crate::panel::{draw_header, draw_log_panel};

fn main() {
    if let Err(err) = logger::init(config::log_level()) {
        eprintln!("speed-signs: {err}");
        process::exit(1);
    }

    let out_dir = env::args().nth(1).map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), PathBuf::from);
    if let Err(err) = run(&out_dir) {
        error!("simulation failed: {err}");
        process::exit(1);
    }
}

fn run(out_dir: &Path) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(out_dir)?;

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(2).build();
    display.clear(BLACK).ok();

    let fonts = FontLadder::default();
    let sign_bounds = Bounds::new(SIGN_SIZE as f32, SIGN_SIZE as f32);
    let mut speed_sign = SignWidget::current_speed();
    let mut limit_sign = SignWidget::speed_limit();
    speed_sign.on_size_changed(sign_bounds, Padding::uniform(SIGN_PADDING));
    limit_sign.on_size_changed(sign_bounds, Padding::uniform(SIGN_PADDING));

    let mut units = Units::default();
    let mut drive = Drive::new(SCRIPT);
    let mut frame = 0u32;
    let mut saved = 0u32;
    let mut last_limit = None;
    let mut was_speeding = false;

    info!("drive started, {} legs", SCRIPT.len());

    while let Some(sample) = drive.step(FRAME_DT) {
        for tap in TAPS.iter().filter(|tap| tap.frame == frame) {
            if speed_sign.on_pointer(to_local(tap.point, SPEED_SIGN_ORIGIN)) == Some(SignEvent::Activated) {
                units = units.toggle();
                info!("units: {}", units.speed_label());
            } else if limit_sign.on_pointer(to_local(tap.point, LIMIT_SIGN_ORIGIN)).is_some() {
                info!("limit sign pressed");
            } else {
                debug!("tap at ({}, {}) missed", tap.point.x, tap.point.y);
            }
        }

        let limit = posted_limit(sample.limit_kmh, units);
        let speeding = is_speeding(sample.speed_mps, limit, units);
        speed_sign.set_current_speed(sample.speed_mps, &units);
        limit_sign.set_speed_limit(limit, speeding);

        if last_limit != Some(limit) {
            match limit {
                l if l < 0 => info!("no limit data"),
                0 => info!("end of limit"),
                l => info!("limit {} {}", l, units.speed_label()),
            }
            last_limit = Some(limit);
        }
        if speeding && !was_speeding {
            info!("speeding in a {} zone", limit);
        }
        was_speeding = speeding;

        draw_header(&mut display, units, sample.distance_m);
        draw_sign_at(&mut display, &mut speed_sign, &fonts, SPEED_SIGN_ORIGIN);
        draw_sign_at(&mut display, &mut limit_sign, &fonts, LIMIT_SIGN_ORIGIN);
        logger::with_screen_log(|log| draw_log_panel(&mut display, log));

        if frame.is_multiple_of(SAVE_EVERY) {
            save_frame(&display, &output_settings, out_dir, frame)?;
            saved += 1;
        }
        frame += 1;
    }

    info!("saved {} of {} frames to {}", saved, frame, out_dir.display());
    Ok(())
}

/// Redraw a sign at `origin` if it asked for it. The widget only paints its
/// disc, so the square behind it is cleared first.
fn draw_sign_at(
    display: &mut SimulatorDisplay<Rgb565>,
    sign: &mut SignWidget,
    fonts: &FontLadder,
    origin: Point,
) {
    if !sign.take_redraw() {
        return;
    }
    Rectangle::new(origin, Size::new(SIGN_SIZE, SIGN_SIZE))
        .into_styled(PrimitiveStyle::with_fill(BLACK))
        .draw(display)
        .ok();
    sign.draw(&mut display.translated(origin), fonts);
}

/// Screen point to sign-local coordinates.
fn to_local(
    point: Point,
    origin: Point,
) -> PointF {
    let local = point - origin;
    PointF::new(local.x as f32, local.y as f32)
}

fn save_frame(
    display: &SimulatorDisplay<Rgb565>,
    output_settings: &OutputSettings,
    out_dir: &Path,
    frame: u32,
) -> Result<(), Box<dyn Error>> {
    let path = out_dir.join(format!("frame_{frame:04}.png"));
    display.to_rgb_output_image(output_settings).save_png(&path)?;
    debug!("wrote {}", path.display());
    Ok(())
}
