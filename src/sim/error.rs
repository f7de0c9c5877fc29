//! Error types for the race simulation.

use thiserror::Error;

/// Errors surfaced by car and race construction, plus the one
/// runtime condition `run` refuses to spin on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    /// Top speed below zero would break the speed clamp invariant.
    #[error("top speed must be non-negative, got {0}")]
    NegativeTopSpeed(f64),

    /// Negative acceleration would let the odometer run backwards.
    #[error("acceleration must be non-negative, got {0}")]
    NegativeAcceleration(f64),

    /// A race needs at least one car on the grid.
    #[error("race requires a non-empty field of cars")]
    NoRacers,

    /// The finish line has to be ahead of the start.
    #[error("race distance must be positive, got {0}")]
    InvalidDistance(f64),

    /// No car can ever move, so no car can ever finish.
    #[error("no car in the field can make progress")]
    NoProgress,
}
