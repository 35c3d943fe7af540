use std::env;
use std::fs;

use processor::Report;
use scheduler::{Process, Schedule};

mod cli;
mod fcfs;
mod invalid;

fn write_output(folder: &str, name: &str, output: &str) {
    let quantum = quantum();
    fs::create_dir_all(format!("../outputs/{folder}")).unwrap();
    fs::write(format!("../outputs/{folder}/{name}___q{quantum}.log"), output).unwrap();
}

fn read_output(folder: &str, name: &str) -> String {
    let quantum = quantum();
    fs::read_to_string(format!("../outputs/{folder}/{name}___q{quantum}.log")).unwrap()
}

/// Compares `output` with the reference output of the test, or replaces
/// the reference when `WRITE_OUTPUT` is set.
fn run(folder: &str, name: &str, output: &str) {
    if env::var("WRITE_OUTPUT").is_ok() {
        write_output(folder, name, output);
    } else {
        let reference = read_output(folder, name);

        println!("\nleft = Correct Output\nright = Your Output\n");
        use pretty_assertions::assert_eq;
        assert_eq!(reference, output);
    }
}

fn run_report(folder: &str, name: &str, report: &Report) {
    run(folder, name, &processor::format_report(report));
}

fn quantum() -> usize {
    env::var("QUANTUM")
        .unwrap_or("4".to_string())
        .parse::<usize>()
        .unwrap()
}

/// Builds `P1`, `P2`, ... from `(AT, BT)` pairs.
fn processes(times: &[(usize, usize)]) -> Vec<Process> {
    times
        .iter()
        .enumerate()
        .map(|(index, &(arrival, burst))| Process::numbered(index, arrival, burst))
        .collect()
}

fn completions(schedule: &Schedule) -> Vec<usize> {
    schedule
        .processes()
        .iter()
        .map(|process| process.completion().unwrap())
        .collect()
}

fn turnarounds(schedule: &Schedule) -> Vec<usize> {
    schedule
        .processes()
        .iter()
        .map(|process| process.turnaround().unwrap())
        .collect()
}

fn waitings(schedule: &Schedule) -> Vec<usize> {
    schedule
        .processes()
        .iter()
        .map(|process| process.waiting().unwrap())
        .collect()
}

fn gantt(schedule: &Schedule) -> Vec<String> {
    schedule
        .gantt()
        .iter()
        .map(|interval| interval.to_string())
        .collect()
}
