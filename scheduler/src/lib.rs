//! A CPU scheduling simulation library.
//!
//! This library computes how a set of processes would be executed by the
//! classic First-Come-First-Served, Shortest-Job-First and Round Robin
//! policies. Time is simulated in integer ticks. Every run returns the
//! processes with their completion, turnaround and waiting times together
//! with the Gantt intervals of the execution.
//!
//! ```rust
//! use scheduler::{simulate_round_robin, Process};
//!
//! let processes = vec![
//!     Process::numbered(0, 0, 5),
//!     Process::numbered(1, 1, 3),
//!     Process::numbered(2, 2, 1),
//! ];
//! let schedule = simulate_round_robin(&processes, 4).unwrap();
//!
//! let gantt: Vec<String> = schedule.gantt().iter().map(|i| i.to_string()).collect();
//! assert_eq!(gantt, ["P1[0-4]", "P2[4-7]", "P3[7-8]", "P1[8-9]"]);
//! ```

use std::num::NonZeroUsize;

mod scheduler;

use schedulers::{Fcfs, RoundRobin, Sjf};

pub use crate::scheduler::{
    validate, Discipline, GanttInterval, Pid, Policy, Process, Schedule, Scheduler,
    SchedulingError, SliceOutcome, Slot,
};

mod schedulers;

/// Returns a structure that implements the `Scheduler` trait with a first-come-first-served policy
pub fn fcfs() -> impl Scheduler {
    Fcfs
}

/// Returns a structure that implements the `Scheduler` trait with a non-preemptive
/// shortest-job-first policy
pub fn sjf() -> impl Scheduler {
    Sjf
}

/// Returns a structure that implements the `Scheduler` trait with a round robin scheduler policy
///
/// * `quantum` - the time quanta that a process can run before it is preempted
pub fn round_robin(quantum: NonZeroUsize) -> impl Scheduler {
    RoundRobin::new(quantum)
}

/// Returns a round robin scheduler that picks processes with the given [`Discipline`]
///
/// * `quantum` - the time quanta that a process can run before it is preempted
/// * `discipline` - [`Discipline::FixedCursor`] visits the processes in input order,
///                  [`Discipline::ReadyQueue`] keeps a FIFO queue of ready processes.
pub fn round_robin_with(quantum: NonZeroUsize, discipline: Discipline) -> impl Scheduler {
    RoundRobin::with_discipline(quantum, discipline)
}

/// Simulates first-come-first-served scheduling.
pub fn simulate_fcfs(processes: &[Process]) -> Result<Schedule, SchedulingError> {
    fcfs().run(processes)
}

/// Simulates non-preemptive shortest-job-first scheduling.
pub fn simulate_sjf(processes: &[Process]) -> Result<Schedule, SchedulingError> {
    sjf().run(processes)
}

/// Simulates round robin scheduling with the fixed cursor discipline.
///
/// Fails with [`SchedulingError::ZeroQuantum`] if `quantum` is 0.
pub fn simulate_round_robin(
    processes: &[Process],
    quantum: usize,
) -> Result<Schedule, SchedulingError> {
    let quantum = NonZeroUsize::new(quantum).ok_or(SchedulingError::ZeroQuantum)?;
    round_robin(quantum).run(processes)
}
