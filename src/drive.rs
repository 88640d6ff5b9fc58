//! Scripted drive feeding the simulator.
//!
//! A drive is a list of legs. Each leg holds a target speed and the posted
//! limit; the speed ramps from the previous leg's target over
//! [`RAMP_SECONDS`]. A negative speed means no GPS fix, a negative limit means
//! no map data and a zero limit means the road is unrestricted.

use speed_signs_common::Units;
use speed_signs_common::config::{LIMIT_UNKNOWN, LIMIT_UNLIMITED, SPEED_UNKNOWN};
use speed_signs_common::units::MPS_TO_KMH;

/// Time to reach a leg's target speed.
pub const RAMP_SECONDS: f32 = 2.0;

/// Kilometers in a mile, for converting posted limits.
const KM_PER_MILE: f64 = 1.609_344;

/// Imperial limits are posted in steps of this many mph.
const MPH_LIMIT_STEP: f64 = 5.0;

/// One stretch of road.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Leg {
    pub seconds: f32,
    /// Target speed in km/h, negative without a fix.
    pub speed_kmh: f64,
    /// Posted limit in km/h.
    pub limit_kmh: i32,
}

impl Leg {
    pub const fn new(
        seconds: f32,
        speed_kmh: f64,
        limit_kmh: i32,
    ) -> Self {
        Self {
            seconds,
            speed_kmh,
            limit_kmh,
        }
    }
}

/// Town, a speeding stretch, highway, an unrestricted section and back down.
pub const SCRIPT: &[Leg] = &[
    Leg::new(2.0, SPEED_UNKNOWN, LIMIT_UNKNOWN),
    Leg::new(6.0, 48.0, 50),
    Leg::new(5.0, 63.0, 50),
    Leg::new(6.0, 97.0, 100),
    Leg::new(6.0, 142.0, LIMIT_UNLIMITED),
    Leg::new(4.0, 74.0, 80),
];

/// State of the drive at one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DriveSample {
    pub speed_mps: f64,
    pub limit_kmh: i32,
    pub distance_m: f64,
}

/// Steps through a script at a fixed tick.
pub struct Drive {
    legs: &'static [Leg],
    leg: usize,
    leg_elapsed: f32,
    distance_m: f64,
}

impl Drive {
    pub const fn new(legs: &'static [Leg]) -> Self {
        Self {
            legs,
            leg: 0,
            leg_elapsed: 0.0,
            distance_m: 0.0,
        }
    }

    /// Advance by `dt` seconds. `None` once the script has ended.
    pub fn step(
        &mut self,
        dt: f32,
    ) -> Option<DriveSample> {
        while self.legs.get(self.leg).is_some_and(|leg| self.leg_elapsed >= leg.seconds) {
            self.leg_elapsed -= self.legs[self.leg].seconds;
            self.leg += 1;
        }
        let leg = self.legs.get(self.leg)?;

        let speed_kmh = self.ramped_speed(leg);
        let speed_mps = if speed_kmh < 0.0 {
            SPEED_UNKNOWN
        } else {
            speed_kmh / MPS_TO_KMH
        };
        if speed_mps > 0.0 {
            self.distance_m += speed_mps * f64::from(dt);
        }

        self.leg_elapsed += dt;
        Some(DriveSample {
            speed_mps,
            limit_kmh: leg.limit_kmh,
            distance_m: self.distance_m,
        })
    }

    fn ramped_speed(
        &self,
        leg: &Leg,
    ) -> f64 {
        let from = self.leg.checked_sub(1).map(|i| self.legs[i].speed_kmh);
        match from {
            Some(from) if from >= 0.0 && leg.speed_kmh >= 0.0 => {
                let t = f64::from((self.leg_elapsed / RAMP_SECONDS).min(1.0));
                from + (leg.speed_kmh - from) * t
            }
            _ => leg.speed_kmh,
        }
    }
}

/// Limit as shown in `units`. Imperial limits snap to the nearest 5 mph; the
/// unknown and unrestricted sentinels pass through.
pub fn posted_limit(
    limit_kmh: i32,
    units: Units,
) -> i32 {
    match units {
        _ if limit_kmh <= LIMIT_UNLIMITED => limit_kmh,
        Units::Metric => limit_kmh,
        Units::Imperial => {
            let mph = f64::from(limit_kmh) / KM_PER_MILE;
            ((mph / MPH_LIMIT_STEP).round() * MPH_LIMIT_STEP) as i32
        }
    }
}

/// True when the displayed speed is above a real limit.
pub fn is_speeding(
    speed_mps: f64,
    limit: i32,
    units: Units,
) -> bool {
    limit > LIMIT_UNLIMITED && speed_mps >= 0.0 && units.speed_from_mps(speed_mps).round() > f64::from(limit)
}
