//! Self-fitting circular speed signs.
//!
//! Platform-agnostic widgets that draw a current-speed readout and a
//! speed-limit sign onto any embedded-graphics `DrawTarget<Color = Rgb565>`:
//!
//! - [`geometry`]: disc and ring geometry from widget bounds
//! - [`text_fit`]: font-size search and text measurement
//! - [`render`]: display list planning and rasterization
//! - [`hit_test`]: pointer hits on the disc
//! - [`sign`]: the widget and its two variants
//! - [`units`]: speed and distance formatting
//! - [`colors`]: palettes
//! - [`config`]: border ratios, sentinels and styles
//! - [`debug_log`]: on-screen log buffer
//!
//! # no_std Compatibility
//!
//! The crate is `no_std` and allocation-free. Diagnostics go through the `log`
//! facade; hosts install whatever logger they have.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod colors;
pub mod config;
pub mod debug_log;
pub mod geometry;
pub mod render;
pub mod sign;
pub mod text_fit;
pub mod units;

// Re-export commonly used items
pub use colors::*;
pub use config::*;
pub use debug_log::{DebugLog, LogLine};
pub use geometry::{Bounds, GeometryParams, Padding, PointF};
pub use hit_test::hit_test;
pub use render::{SignContent, SignFrame, SignShape, draw_sign, plan_sign};
pub use sign::{CurrentSpeed, SignEvent, SignKind, SignWidget, SpeedLimit};
pub use text_fit::{FontLadder, MonospaceMetrics, TextBox, TextMetrics, fit_text_size};
pub use units::{SpeedFormatter, Units, format_distance, format_speed};
