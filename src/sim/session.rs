//! Session - Race lifecycle driver
//!
//! Wraps a race in an explicit load/start/tick lifecycle and tracks
//! per-tick timing, so callers never construct entities as a side
//! effect of loading the library.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::sim::car::{Car, CarSnapshot};
use crate::sim::error::SimError;
use crate::sim::race::{Race, RaceSnapshot, RaceStatus};

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Loading,
    Ready,
    Racing,
    Results,
}

/// Session statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub avg_tick_time_ms: f32,
    pub car_count: u32,
    pub state: SessionState,
}

/// Drives one race from construction to results.
pub struct RaceSession {
    /// Current lifecycle state
    state: SessionState,
    /// Loaded race (if any)
    race: Option<Race>,
    /// Recent tick durations for averaging
    tick_times: Vec<f32>,
}

impl RaceSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            race: None,
            tick_times: Vec::with_capacity(60),
        }
    }

    /// Load a race onto the session.
    pub fn load_race(&mut self, racers: Vec<Car>, distance: f64) -> Result<(), SimError> {
        self.state = SessionState::Loading;

        let race = Race::new(racers, distance)?;
        log::info!(
            "race loaded: {} cars over {} units",
            race.racers().len(),
            race.distance()
        );

        self.race = Some(race);
        self.state = SessionState::Ready;
        Ok(())
    }

    /// Start the loaded race.
    pub fn start(&mut self) {
        if self.race.is_some() && self.state == SessionState::Ready {
            self.state = SessionState::Racing;
            log::info!("race started");
        }
    }

    /// Perform a single simulation tick and return the current state.
    pub fn tick(&mut self) -> Option<RaceSnapshot> {
        if self.state != SessionState::Racing {
            return self.snapshot();
        }

        let tick_start = Instant::now();

        if let Some(race) = &mut self.race {
            race.tick();

            if race.status() == RaceStatus::Finished {
                self.state = SessionState::Results;
                log::info!("race finished after {} ticks", race.elapsed_time());
            }
        }

        let tick_time = tick_start.elapsed().as_secs_f32() * 1000.0;
        self.tick_times.push(tick_time);
        if self.tick_times.len() > 60 {
            self.tick_times.remove(0);
        }

        self.snapshot()
    }

    /// Tick until the race finishes; returns the winner.
    pub fn run_to_finish(&mut self) -> Result<Option<CarSnapshot>, SimError> {
        let Some(race) = &mut self.race else {
            return Ok(None);
        };

        self.state = SessionState::Racing;
        let winner = race.run()?;
        let snapshot = CarSnapshot::from(winner);

        self.state = SessionState::Results;
        Ok(Some(snapshot))
    }

    /// Current race snapshot without advancing the simulation.
    pub fn snapshot(&self) -> Option<RaceSnapshot> {
        self.race.as_ref().map(|r| r.snapshot())
    }

    /// The winner, once the race has finished.
    pub fn winner(&self) -> Option<&Car> {
        self.race.as_ref().and_then(|r| r.winner())
    }

    /// Session statistics.
    pub fn stats(&self) -> SessionStats {
        let avg_tick_time = if self.tick_times.is_empty() {
            0.0
        } else {
            self.tick_times.iter().sum::<f32>() / self.tick_times.len() as f32
        };

        SessionStats {
            avg_tick_time_ms: avg_tick_time,
            car_count: self.race.as_ref().map(|r| r.racers().len() as u32).unwrap_or(0),
            state: self.state,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// The loaded race, if any.
    pub fn race(&self) -> Option<&Race> {
        self.race.as_ref()
    }

    /// Discard the loaded race and return to idle.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.race = None;
        self.tick_times.clear();
    }
}

impl Default for RaceSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a field of `count` cars with plausible performance figures.
///
/// Roughly one exotic per ten cars, a couple of sports cars, the rest
/// commuters, mirroring a real grid.
pub fn generate_field(count: usize) -> Result<Vec<Car>, SimError> {
    const LINEUP: [(&str, &str); 6] = [
        ("Dodge", "Demon"),
        ("Tesla", "P100D"),
        ("Chevrolet", "Camaro"),
        ("Ford", "Mustang"),
        ("Nissan", "GT-R"),
        ("Mazda", "Miata"),
    ];

    (0..count)
        .map(|i| {
            let (make, model) = LINEUP[i % LINEUP.len()];
            let top_speed = match i % 10 {
                0 => 190.0 + rand::random::<f64>() * 20.0,      // exotic
                1..=2 => 160.0 + rand::random::<f64>() * 25.0,  // sports
                3..=6 => 135.0 + rand::random::<f64>() * 25.0,  // quick commuter
                _ => 105.0 + rand::random::<f64>() * 30.0,      // commuter
            };
            let acceleration = 18.0 + rand::random::<f64>() * 12.0;
            let year = 2015 + (i % 10) as i32;

            Car::new(year, make, model, top_speed, acceleration)
        })
        .collect()
}
