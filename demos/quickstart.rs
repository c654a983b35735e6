use phasecycle::clock::{ClockPart, SetOptions};
use phasecycle::literal::minutes_to_days;
use phasecycle::{
    Clock, Instant, ObservationLog, PhaseCycle, PhaseCycleRecord, TimeZero, TimezoneOffset,
};

fn main() {
    let record = PhaseCycleRecord {
        name: Some("Galilean moons".to_owned()),
        reference: "Io".to_owned(),
        objects: vec![
            ("Io".to_owned(), "1.769 days".to_owned()),
            ("Europa".to_owned(), "3.551 days".to_owned()),
            ("Ganymede".to_owned(), "7.155 days".to_owned()),
        ],
        steps: 16,
        tzero: TimeZero::Text("01-01-2024 00:00".to_owned()),
        timezone: "utc".to_owned(),
    };

    let cycle = match PhaseCycle::from_record(&record) {
        Ok(cycle) => cycle,
        Err(err) => {
            eprintln!("invalid phase cycle: {err}");
            return;
        }
    };

    for (name, period) in cycle.definition().periods() {
        println!("{name:>9}: {:.3} days", minutes_to_days(*period).value());
    }
    println!(
        "Rotation: {:.1} days, {} steps of {:.2} minutes",
        minutes_to_days(cycle.total_interval()).value(),
        cycle.total_step_count(),
        cycle.step_interval().value()
    );

    let mut clock =
        Clock::from_instant(Instant::from_millis(1_717_200_000_000), TimezoneOffset::utc());
    if let Err(err) = clock.set_next("HH:mm", "21:00", SetOptions::utc().sharp()) {
        eprintln!("{err}");
        return;
    }
    let step = cycle.next_step_index(clock.instant(), true);
    println!(
        "Next step after {} is #{step} at {}",
        clock.to_time_string(true, ClockPart::DateTime),
        cycle.next_occurrence(step, clock.instant())
    );
    for phase in cycle.phases_at(step) {
        println!("{:>9}: {:.3}", phase.name, phase.phase);
    }

    let mut log = ObservationLog::new(&cycle);
    log.add(step, clock.instant(), "Io shadow on the disc", clock.instant());
    println!("Observed steps: {:?}", log.observed_steps().collect::<Vec<_>>());
}
