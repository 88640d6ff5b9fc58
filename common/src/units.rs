//! Speed and distance formatting for sign values and chart axes.
//!
//! Speeds arrive in meters per second from the location provider and are shown
//! in the user's unit system. Small values keep one decimal so walking speeds
//! do not collapse to "0"/"1"; everything from 10 up is a whole number.

use core::fmt::{self, Write};

use heapless::String;

use crate::config::NO_DATA_PLACEHOLDER;

/// Meters per second to kilometers per hour.
pub const MPS_TO_KMH: f64 = 3.6;

/// Meters per second to miles per hour.
pub const MPS_TO_MPH: f64 = 2.236_936_292;

/// Meters to feet.
pub const METERS_TO_FEET: f64 = 3.280_839_895;

/// Meters in one statute mile.
pub const METERS_PER_MILE: f64 = 1_609.344;

/// Below this many units a value keeps one decimal.
const DECIMAL_BELOW: f64 = 10.0;

/// Below this many miles distances are shown in feet.
const FEET_BELOW_MILES: f64 = 0.1;

/// Capacity of a formatted speed ("1234.5").
pub const SPEED_TEXT_LEN: usize = 8;

/// Capacity of a formatted distance with its unit ("12345.6 km").
pub const DISTANCE_TEXT_LEN: usize = 16;

/// Measurement system selected by the user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Unit label of speeds in this system.
    pub const fn speed_label(self) -> &'static str {
        match self {
            Self::Metric => "km/h",
            Self::Imperial => "mph",
        }
    }

    /// Convert meters per second into this system's speed unit.
    pub fn speed_from_mps(
        self,
        mps: f64,
    ) -> f64 {
        match self {
            Self::Metric => mps * MPS_TO_KMH,
            Self::Imperial => mps * MPS_TO_MPH,
        }
    }

    /// The other system. Used by the simulator to flip units on tap.
    pub const fn toggle(self) -> Self {
        match self {
            Self::Metric => Self::Imperial,
            Self::Imperial => Self::Metric,
        }
    }
}

/// Formats a speed reading into a numeral and a unit label.
pub trait SpeedFormatter {
    fn format_speed_and_units(
        &self,
        mps: f64,
    ) -> (String<SPEED_TEXT_LEN>, &'static str);
}

impl SpeedFormatter for Units {
    fn format_speed_and_units(
        &self,
        mps: f64,
    ) -> (String<SPEED_TEXT_LEN>, &'static str) {
        (format_speed(mps, *self), self.speed_label())
    }
}

/// Format `mps` in `units`. Negative or non-finite speeds are unknown, and a
/// value too long for the buffer is not shown; both give the placeholder.
pub fn format_speed(
    mps: f64,
    units: Units,
) -> String<SPEED_TEXT_LEN> {
    let mut text = String::new();
    if mps.is_finite() && mps >= 0.0 && push_measure(&mut text, units.speed_from_mps(mps)).is_ok() {
        return text;
    }
    text.clear();
    text.push_str(NO_DATA_PLACEHOLDER).ok();
    text
}

/// Format a distance for chart axes and route summaries.
pub fn format_distance(
    meters: f64,
    units: Units,
) -> String<DISTANCE_TEXT_LEN> {
    let mut text = String::new();
    match units {
        Units::Metric if meters < 1_000.0 => {
            let _ = write!(text, "{meters:.0} m");
        }
        Units::Metric => {
            let _ = push_measure(&mut text, meters / 1_000.0);
            text.push_str(" km").ok();
        }
        Units::Imperial if meters / METERS_PER_MILE < FEET_BELOW_MILES => {
            let _ = write!(text, "{:.0} ft", meters * METERS_TO_FEET);
        }
        Units::Imperial => {
            let _ = push_measure(&mut text, meters / METERS_PER_MILE);
            text.push_str(" mi").ok();
        }
    }
    text
}

/// One decimal below [`DECIMAL_BELOW`], whole numbers above. Fails when the
/// value does not fit in `text`.
fn push_measure<const N: usize>(
    text: &mut String<N>,
    value: f64,
) -> fmt::Result {
    if value < DECIMAL_BELOW {
        write!(text, "{value:.1}")
    } else {
        write!(text, "{value:.0}")
    }
}
