//! Car - Individual racer state and per-tick physics
//!
//! Each car has fixed identity and performance figures plus the two
//! mutable fields the simulation touches: current speed and odometer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::error::SimError;

/// One tick represents one second; speeds are in distance units per hour.
const TICKS_PER_HOUR: f64 = 3600.0;

/// A single racer.
///
/// `current_speed` and `odometer` are private and only ever mutated by
/// [`Car::advance`], once per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Car {
    /// Model year
    pub year: i32,
    /// Manufacturer
    pub make: String,
    /// Model name
    pub model: String,
    /// Hard ceiling on current speed (distance/hour)
    pub top_speed: f64,
    /// Speed gained per tick while below top speed (distance/hour per tick)
    pub acceleration: f64,
    /// Current speed (distance/hour), clamped to `top_speed`
    current_speed: f64,
    /// Cumulative distance traveled
    odometer: f64,
}

impl Car {
    /// Create a new car at rest with the odometer zeroed.
    ///
    /// Rejects negative performance figures: a negative top speed breaks
    /// the clamp invariant and a negative acceleration would make the
    /// odometer decrease.
    pub fn new(
        year: i32,
        make: impl Into<String>,
        model: impl Into<String>,
        top_speed: f64,
        acceleration: f64,
    ) -> Result<Self, SimError> {
        if top_speed < 0.0 {
            return Err(SimError::NegativeTopSpeed(top_speed));
        }
        if acceleration < 0.0 {
            return Err(SimError::NegativeAcceleration(acceleration));
        }

        Ok(Self {
            year,
            make: make.into(),
            model: model.into(),
            top_speed,
            acceleration,
            current_speed: 0.0,
            odometer: 0.0,
        })
    }

    /// Advance this car by one tick.
    ///
    /// Speeds up by `acceleration` while below `top_speed`, clamps to
    /// `top_speed`, then accumulates one tick's worth of travel on the
    /// odometer.
    pub fn advance(&mut self) {
        if self.current_speed < self.top_speed {
            self.current_speed += self.acceleration;

            if self.current_speed > self.top_speed {
                self.current_speed = self.top_speed;
            }
        }

        self.odometer += self.current_speed / TICKS_PER_HOUR;
    }

    /// Current speed (distance/hour).
    pub fn current_speed(&self) -> f64 {
        self.current_speed
    }

    /// Cumulative distance traveled.
    pub fn odometer(&self) -> f64 {
        self.odometer
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.year, self.make, self.model)
    }
}

/// Compact car state for the reporting layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarSnapshot {
    pub name: String,
    pub current_speed: f64,
    pub odometer: f64,
}

impl From<&Car> for CarSnapshot {
    fn from(car: &Car) -> Self {
        Self {
            name: car.to_string(),
            current_speed: car.current_speed,
            odometer: car.odometer,
        }
    }
}
