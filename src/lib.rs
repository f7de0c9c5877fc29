//! Speedway - Car Race Simulation
//!
//! A small deterministic racing core: build a field of cars, set a
//! distance, and tick the race until someone crosses the line. The
//! simulation is single-threaded and has no I/O; reporting layers work
//! from snapshots.

pub mod sim;

pub use sim::{
    generate_field, Car, CarSnapshot, Race, RaceSession, RaceSnapshot, RaceStatus, SessionState,
    SessionStats, SimError,
};
