//! Race - Race state and the tick loop
//!
//! Owns the field of cars, advances them one tick at a time, and
//! detects the leader and the finish.

use serde::{Deserialize, Serialize};

use crate::sim::car::{Car, CarSnapshot};
use crate::sim::error::SimError;

/// Race status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaceStatus {
    NotStarted,
    Running,
    Finished,
}

/// A race between a fixed field of cars over a fixed distance.
///
/// Once `Finished` a race is done for good; there is no reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Race {
    /// The field, in grid order
    racers: Vec<Car>,
    /// Finish-line distance
    distance: f64,
    /// Number of ticks executed so far
    elapsed_time: u64,
    /// Current race status
    status: RaceStatus,
}

impl Race {
    /// Create a new race, taking ownership of the field.
    ///
    /// The field must be non-empty and the distance positive.
    pub fn new(racers: Vec<Car>, distance: f64) -> Result<Self, SimError> {
        if racers.is_empty() {
            return Err(SimError::NoRacers);
        }
        if distance <= 0.0 {
            return Err(SimError::InvalidDistance(distance));
        }

        Ok(Self {
            racers,
            distance,
            elapsed_time: 0,
            status: RaceStatus::NotStarted,
        })
    }

    /// Advance the race by one tick and return the current leader.
    ///
    /// Every car advances in grid order, then the leader is the car with
    /// the greatest odometer; ties go to the earliest grid position.
    pub fn tick(&mut self) -> &Car {
        let leader = self.step();
        &self.racers[leader]
    }

    /// Run ticks until a car crosses the finish line; returns the winner.
    ///
    /// Fails up front with `NoProgress` if no car in the field can ever
    /// move, since the loop would otherwise never terminate.
    pub fn run(&mut self) -> Result<&Car, SimError> {
        if !self.racers.iter().any(Self::can_progress) {
            return Err(SimError::NoProgress);
        }

        loop {
            let leader = self.step();
            if self.status == RaceStatus::Finished {
                log::info!(
                    "race finished after {} ticks, winner: {}",
                    self.elapsed_time,
                    self.racers[leader]
                );
                return Ok(&self.racers[leader]);
            }
        }
    }

    /// One tick: bump the clock, advance the field, find the leader,
    /// and transition the status. Returns the leader's grid index.
    fn step(&mut self) -> usize {
        self.elapsed_time += 1;
        if self.status == RaceStatus::NotStarted {
            self.status = RaceStatus::Running;
        }

        for car in &mut self.racers {
            car.advance();
        }

        let leader = self.leader_index();
        if self.racers[leader].odometer() >= self.distance {
            self.status = RaceStatus::Finished;
        }

        leader
    }

    /// Index of the car with the greatest odometer; only a strictly
    /// greater odometer displaces the incumbent, so ties resolve to the
    /// earliest grid position.
    fn leader_index(&self) -> usize {
        let mut leader = 0;
        for (i, car) in self.racers.iter().enumerate().skip(1) {
            if car.odometer() > self.racers[leader].odometer() {
                leader = i;
            }
        }
        leader
    }

    /// Whether a car is capable of covering distance, now or eventually.
    fn can_progress(car: &Car) -> bool {
        car.current_speed() > 0.0 || (car.acceleration > 0.0 && car.top_speed > 0.0)
    }

    /// The field, in grid order.
    pub fn racers(&self) -> &[Car] {
        &self.racers
    }

    /// Finish-line distance.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Number of ticks executed so far.
    pub fn elapsed_time(&self) -> u64 {
        self.elapsed_time
    }

    /// Current race status.
    pub fn status(&self) -> RaceStatus {
        self.status
    }

    /// Current leader without advancing the simulation.
    pub fn leader(&self) -> &Car {
        &self.racers[self.leader_index()]
    }

    /// The winner, once the race has finished.
    pub fn winner(&self) -> Option<&Car> {
        (self.status == RaceStatus::Finished).then(|| self.leader())
    }

    /// Compact snapshot for the reporting layer.
    pub fn snapshot(&self) -> RaceSnapshot {
        RaceSnapshot {
            status: self.status,
            elapsed_time: self.elapsed_time,
            distance: self.distance,
            cars: self.racers.iter().map(CarSnapshot::from).collect(),
        }
    }
}

/// Compact race state for the reporting layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceSnapshot {
    pub status: RaceStatus,
    pub elapsed_time: u64,
    pub distance: f64,
    pub cars: Vec<CarSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demon() -> Car {
        Car::new(2017, "Dodge", "Demon", 168.0, 25.22).unwrap()
    }

    fn tesla() -> Car {
        Car::new(2017, "Tesla", "P100D", 155.0, 26.37).unwrap()
    }

    #[test]
    fn empty_field_is_rejected() {
        let err = Race::new(Vec::new(), 0.20).unwrap_err();
        assert_eq!(err, SimError::NoRacers);
    }

    #[test]
    fn non_positive_distance_is_rejected() {
        let err = Race::new(vec![demon()], 0.0).unwrap_err();
        assert_eq!(err, SimError::InvalidDistance(0.0));
        let err = Race::new(vec![demon()], -5.0).unwrap_err();
        assert_eq!(err, SimError::InvalidDistance(-5.0));
    }

    #[test]
    fn elapsed_time_counts_ticks() {
        let mut race = Race::new(vec![demon(), tesla()], 100.0).unwrap();
        assert_eq!(race.elapsed_time(), 0);
        for n in 1..=25 {
            race.tick();
            assert_eq!(race.elapsed_time(), n);
        }
    }

    #[test]
    fn status_transitions_through_the_race() {
        let mut race = Race::new(vec![demon()], 0.05).unwrap();
        assert_eq!(race.status(), RaceStatus::NotStarted);
        assert!(race.winner().is_none());

        race.tick();
        assert_eq!(race.status(), RaceStatus::Running);

        race.run().unwrap();
        assert_eq!(race.status(), RaceStatus::Finished);
        assert!(race.winner().is_some());
    }

    #[test]
    fn tick_returns_the_max_odometer_car() {
        let mut race = Race::new(vec![demon(), tesla()], 100.0).unwrap();
        for _ in 0..20 {
            let leader_odometer = race.tick().odometer();
            let max = race
                .racers()
                .iter()
                .map(Car::odometer)
                .fold(f64::MIN, f64::max);
            assert_eq!(leader_odometer, max);
        }
    }

    #[test]
    fn exact_ties_go_to_the_earliest_grid_position() {
        // Identical cars stay tied forever; grid position 0 must lead.
        let twin = || Car::new(2020, "Mazda", "Miata", 120.0, 10.0).unwrap();
        let mut race = Race::new(vec![twin(), twin(), twin()], 50.0).unwrap();
        for _ in 0..10 {
            race.tick();
        }
        let leader = race.leader();
        assert!(std::ptr::eq(leader, &race.racers()[0]));
    }

    #[test]
    fn demon_vs_tesla_over_a_fifth_of_a_mile() {
        let mut race = Race::new(vec![demon(), tesla()], 0.20).unwrap();
        let winner = race.run().unwrap();
        assert!(winner.odometer() >= 0.20);
        assert_eq!(winner.to_string(), "2017 Dodge Demon");
        // Well under the tick count a top-speed car would need, plus spin-up.
        assert!(race.elapsed_time() <= 10);
        assert_eq!(race.status(), RaceStatus::Finished);
    }

    #[test]
    fn stuck_field_fails_instead_of_spinning() {
        let parked = Car::new(1970, "Lawn", "Ornament", 0.0, 0.0).unwrap();
        let mut race = Race::new(vec![parked], 1.0).unwrap();
        assert_eq!(race.run().unwrap_err(), SimError::NoProgress);
        // The guard fires before any tick runs.
        assert_eq!(race.elapsed_time(), 0);
    }

    #[test]
    fn capped_but_accelerating_car_counts_as_stuck() {
        // Positive acceleration is useless against a zero top speed.
        let revving = Car::new(1970, "Dyno", "Queen", 0.0, 30.0).unwrap();
        let mut race = Race::new(vec![revving], 1.0).unwrap();
        assert_eq!(race.run().unwrap_err(), SimError::NoProgress);
    }

    #[test]
    fn field_stays_readable_after_the_race() {
        let mut race = Race::new(vec![demon(), tesla()], 0.20).unwrap();
        race.run().unwrap();
        for car in race.racers() {
            assert!(car.odometer() > 0.0);
            assert!(car.current_speed() > 0.0);
        }
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut race = Race::new(vec![demon(), tesla()], 0.20).unwrap();
        race.run().unwrap();

        let json = serde_json::to_string(&race.snapshot()).unwrap();
        let snapshot: RaceSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.status, RaceStatus::Finished);
        assert_eq!(snapshot.elapsed_time, race.elapsed_time());
        assert_eq!(snapshot.cars.len(), 2);
        assert_eq!(snapshot.cars[0].name, "2017 Dodge Demon");
    }
}
