//! Simulation Module
//!
//! Tick-based race simulation: cars advance once per tick, the race
//! tracks the leader and ends when a car crosses the finish line.

pub mod car;
pub mod error;
pub mod race;
pub mod session;

pub use car::{Car, CarSnapshot};
pub use error::SimError;
pub use race::{Race, RaceSnapshot, RaceStatus};
pub use session::{generate_field, RaceSession, SessionState, SessionStats};
