//! Demo driver: a fifth-of-a-mile drag race between two named cars.

use speedway::{Car, RaceSession, SimError};

fn main() -> Result<(), SimError> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let demon = Car::new(2017, "Dodge", "Demon", 168.0, 25.22)?;
    let tesla = Car::new(2017, "Tesla", "P100D", 155.0, 26.37)?;

    let mut session = RaceSession::new();
    session.load_race(vec![demon, tesla], 0.20)?;
    session.start();

    let winner = session
        .run_to_finish()?
        .expect("a race was loaded above");

    println!("Winner: {}\n", winner.name);

    for car in session.race().expect("a race was loaded above").racers() {
        println!("{}", car);
        println!("{}", car.odometer());
        println!("{}\n", car.current_speed());
    }

    if let Some(snapshot) = session.snapshot() {
        log::debug!(
            "final state: {}",
            serde_json::to_string_pretty(&snapshot).unwrap_or_default()
        );
    }

    Ok(())
}
