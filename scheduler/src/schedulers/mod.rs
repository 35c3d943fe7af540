//! The scheduling policies
//!
//! Each policy lives in its own file and is exported here. Every
//! scheduler works on the processes in input order and reports the
//! Gantt intervals in execution order.
//!
mod fcfs;
pub use fcfs::Fcfs;

mod sjf;
pub use sjf::Sjf;

mod round_robin;
pub use round_robin::RoundRobin;

use crate::{Process, SchedulingError};

/// Returns the earliest arrival after `time` among the processes that
/// still need the CPU.
fn next_arrival(processes: &[Process], time: usize) -> Option<usize> {
    processes
        .iter()
        .filter(|process| process.remaining() > 0 && process.arrival() > time)
        .map(Process::arrival)
        .min()
}

fn stalled(processes: &[Process], time: usize) -> SchedulingError {
    SchedulingError::Stalled {
        time,
        pending: processes
            .iter()
            .filter(|process| !process.is_completed())
            .count(),
    }
}
