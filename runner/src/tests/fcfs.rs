use pretty_assertions::assert_eq;
use scheduler::{simulate_fcfs, Policy, SliceOutcome};

use super::{completions, gantt, processes, turnarounds, waitings};

#[test]
pub fn lab_example() {
    let schedule = simulate_fcfs(&processes(&[(0, 5), (1, 3), (2, 8)])).unwrap();

    assert_eq!(schedule.policy(), Policy::Fcfs);
    assert_eq!(completions(&schedule), [5, 8, 16]);
    assert_eq!(turnarounds(&schedule), [5, 7, 14]);
    assert_eq!(waitings(&schedule), [0, 4, 6]);
    assert_eq!(gantt(&schedule), ["P1[0-5]", "P2[5-8]", "P3[8-16]"]);
}

#[test]
pub fn results_keep_input_order() {
    let schedule = simulate_fcfs(&processes(&[(4, 2), (0, 3), (2, 1)])).unwrap();

    let names: Vec<&str> = schedule.processes().iter().map(|p| p.name()).collect();
    assert_eq!(names, ["P1", "P2", "P3"]);
    assert_eq!(gantt(&schedule), ["P2[0-3]", "P3[3-4]", "P1[4-6]"]);
    assert_eq!(completions(&schedule), [6, 3, 4]);
}

#[test]
pub fn equal_arrivals_keep_submission_order() {
    let schedule = simulate_fcfs(&processes(&[(1, 4), (0, 2), (1, 1), (1, 3)])).unwrap();

    assert_eq!(
        gantt(&schedule),
        ["P2[0-2]", "P1[2-6]", "P3[6-7]", "P4[7-10]"]
    );
}

#[test]
pub fn idle_until_next_arrival() {
    let schedule = simulate_fcfs(&processes(&[(0, 5), (1, 3), (10, 8)])).unwrap();

    assert_eq!(gantt(&schedule), ["P1[0-5]", "P2[5-8]", "P3[10-18]"]);
    assert_eq!(waitings(&schedule), [0, 4, 0]);
    assert_eq!(schedule.busy_time(), 16);
    assert_eq!(schedule.makespan(), 18);
}

#[test]
pub fn late_first_arrival() {
    let schedule = simulate_fcfs(&processes(&[(3, 2)])).unwrap();

    assert_eq!(gantt(&schedule), ["P1[3-5]"]);
    assert_eq!(turnarounds(&schedule), [2]);
    assert_eq!(waitings(&schedule), [0]);
}

#[test]
pub fn intervals_always_complete() {
    let schedule = simulate_fcfs(&processes(&[(0, 7), (2, 9)])).unwrap();

    assert!(schedule
        .gantt()
        .iter()
        .all(|interval| interval.outcome == SliceOutcome::Completed));
}
