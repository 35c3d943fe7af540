use std::env;
use std::fs;

use clap::Parser;
use pretty_assertions::assert_eq;
use processor::ProcessEntry;
use scheduler::{Discipline, Policy};

use crate::{Algorithm, Args};

fn args(arguments: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("runner").chain(arguments.iter().copied())).unwrap()
}

fn policies(args: &Args) -> Vec<String> {
    args.schedulers()
        .unwrap()
        .iter()
        .map(|scheduler| scheduler.policy().to_string())
        .collect()
}

#[test]
pub fn defaults() {
    let args = args(&[]);

    assert_eq!(args.algorithm, Algorithm::Fcfs);
    assert_eq!(args.quantum, "4");
    assert_eq!(args.width, processor::DEFAULT_WIDTH);
    assert_eq!(policies(&args), ["First-Come-First-Served"]);
}

#[test]
pub fn processes_from_flags() {
    let args = args(&["-p", "0:5", "--process", " 1 : 3 "]);

    assert_eq!(
        args.entries().unwrap(),
        [ProcessEntry::new(0, 5), ProcessEntry::new(1, 3)]
    );
}

#[test]
pub fn process_without_burst() {
    let error = args(&["-p", "0:5", "-p", "2"]).entries().unwrap_err();

    assert_eq!(error.to_string(), "invalid input: P2: BT must be filled");
}

#[test]
pub fn processes_from_json_file() {
    let path = env::temp_dir().join(format!("runner-input-{}.json", std::process::id()));
    fs::write(
        &path,
        r#"[{"name": "shell", "arrival": 0, "burst": 2}, {"arrival": 1, "burst": 4}]"#,
    )
    .unwrap();

    let entries = args(&["-i", path.to_str().unwrap()]).entries().unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(
        entries,
        [ProcessEntry::named("shell", 0, 2), ProcessEntry::new(1, 4)]
    );
}

#[test]
pub fn input_file_conflicts_with_flags() {
    assert!(Args::try_parse_from(["runner", "-i", "in.json", "-p", "0:1"]).is_err());
}

#[test]
pub fn round_robin_discipline() {
    let args = args(&["-a", "rr", "-q", "3", "--discipline", "ready-queue"]);
    let schedulers = args.schedulers().unwrap();

    assert_eq!(
        schedulers[0].policy(),
        Policy::RoundRobin {
            quantum: std::num::NonZeroUsize::new(3).unwrap(),
            discipline: Discipline::ReadyQueue
        }
    );
}

#[test]
pub fn quantum_is_only_checked_for_round_robin() {
    assert_eq!(policies(&args(&["-a", "sjf", "-q", "zero"])), ["Shortest-Job-First"]);

    let error = args(&["-a", "rr", "-q", "0"]).schedulers().err().unwrap();
    assert_eq!(
        error.to_string(),
        "invalid input: time quantum must be > 0, got 0"
    );
}

#[test]
pub fn all_algorithms() {
    assert_eq!(
        policies(&args(&["--algorithm", "all", "-q", "2"])),
        [
            "First-Come-First-Served",
            "Shortest-Job-First",
            "Round Robin (quantum 2)"
        ]
    );
}
