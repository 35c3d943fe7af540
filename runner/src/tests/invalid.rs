use pretty_assertions::assert_eq;
use processor::{Error, Field, InputError, ProcessEntry, Processor};
use scheduler::{
    fcfs, simulate_fcfs, simulate_round_robin, simulate_sjf, Pid, Process, Scheduler,
    SchedulingError,
};

use super::processes;

#[test]
pub fn no_processes() {
    assert_eq!(simulate_fcfs(&[]), Err(SchedulingError::NoProcesses));
    assert_eq!(simulate_sjf(&[]), Err(SchedulingError::NoProcesses));
    assert_eq!(
        simulate_round_robin(&[], 4),
        Err(SchedulingError::NoProcesses)
    );
}

#[test]
pub fn zero_burst() {
    let input = processes(&[(0, 2), (1, 0)]);
    let error = SchedulingError::ZeroBurst {
        pid: Pid::from_index(1),
    };

    assert_eq!(simulate_fcfs(&input), Err(error));
    assert_eq!(simulate_sjf(&input), Err(error));
    assert_eq!(simulate_round_robin(&input, 2), Err(error));
    assert_eq!(
        error.to_string(),
        "process 2 has a burst time of 0, BT must be > 0"
    );
}

#[test]
pub fn zero_quantum() {
    assert_eq!(
        simulate_round_robin(&processes(&[(0, 2)]), 0),
        Err(SchedulingError::ZeroQuantum)
    );
}

#[test]
pub fn input_is_not_mutated() {
    let input = processes(&[(0, 5), (1, 3)]);
    let before = input.clone();

    let schedule = fcfs().run(&input).unwrap();

    assert_eq!(input, before);
    assert!(input.iter().all(|process| !process.is_completed()));
    assert!(schedule.processes().iter().all(|process| process.is_completed()));
}

#[test]
pub fn empty_arrival_field() {
    let error = Processor::new()
        .run_text(&fcfs(), &[("0", "5"), ("", "3")])
        .unwrap_err();

    assert_eq!(
        error,
        Error::Input(InputError::EmptyField {
            row: Some(1),
            field: Field::ArrivalTime
        })
    );
}

#[test]
pub fn zero_burst_field() {
    let error = Processor::new()
        .run_text(&fcfs(), &[("0", "0")])
        .unwrap_err();

    assert_eq!(
        error,
        Error::Input(InputError::NonPositiveBurst { row: 0, value: 0 })
    );
    assert_eq!(error.to_string(), "invalid input: P1: BT must be > 0, got 0");
}

#[test]
pub fn negative_arrival() {
    let error = Processor::new()
        .run(&fcfs(), &[ProcessEntry::new(-2, 3)])
        .unwrap_err();

    assert_eq!(
        error,
        Error::Input(InputError::NegativeArrival { row: 0, value: -2 })
    );
}

#[test]
pub fn no_entries() {
    let error = Processor::new().run(&fcfs(), &[]).unwrap_err();

    assert_eq!(error, Error::Input(InputError::NoProcesses));
    assert_eq!(error.to_string(), "invalid input: no processes defined");
}

#[test]
pub fn stalled_is_an_internal_error() {
    let error = Error::Scheduling(SchedulingError::Stalled {
        time: 7,
        pending: 2,
    });

    assert_eq!(
        error.to_string(),
        "internal error: simulation stalled at tick 7 with 2 pending processes"
    );
}

#[test]
pub fn clock_overflow() {
    let input = vec![
        Process::numbered(0, 0, usize::MAX / 2),
        Process::numbered(1, 0, usize::MAX / 2),
        Process::numbered(2, 0, usize::MAX / 2),
    ];

    assert_eq!(simulate_fcfs(&input), Err(SchedulingError::ClockOverflow));
    assert_eq!(simulate_sjf(&input), Err(SchedulingError::ClockOverflow));
    assert_eq!(
        simulate_round_robin(&input, 4),
        Err(SchedulingError::ClockOverflow)
    );
    assert_eq!(
        simulate_fcfs(&[Process::numbered(0, usize::MAX, 1)]),
        Err(SchedulingError::ClockOverflow)
    );
}

#[test]
pub fn huge_bursts_are_rejected() {
    let entries = vec![ProcessEntry::new(0, i64::MAX); 3];
    let error = Processor::new().run(&fcfs(), &entries).unwrap_err();

    assert_eq!(error, Error::Scheduling(SchedulingError::ClockOverflow));
    assert_eq!(
        error.to_string(),
        "invalid input: the arrival and burst times are too large to simulate"
    );
}
