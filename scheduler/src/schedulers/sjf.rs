use log::debug;

use super::{next_arrival, stalled};
use crate::{GanttInterval, Policy, Process, Scheduler, SchedulingError};

/// Non-preemptive Shortest-Job-First
///
/// Whenever the CPU is free, the ready process with the shortest burst
/// runs to completion. Equal bursts go to the earliest arrival, then to
/// the process submitted first.
pub struct Sjf;

impl Sjf {
    fn pick(processes: &[Process], time: usize) -> Option<usize> {
        processes
            .iter()
            .enumerate()
            .filter(|(_, process)| process.is_ready(time))
            .min_by_key(|&(index, process)| (process.burst(), process.arrival(), index))
            .map(|(index, _)| index)
    }
}

impl Scheduler for Sjf {
    fn policy(&self) -> Policy {
        Policy::Sjf
    }

    fn simulate(&self, processes: &mut [Process]) -> Result<Vec<GanttInterval>, SchedulingError> {
        let mut gantt = Vec::with_capacity(processes.len());
        let mut time = 0;

        // every process runs exactly once
        while gantt.len() < processes.len() {
            let Some(index) = Sjf::pick(processes, time) else {
                let Some(arrival) = next_arrival(processes, time) else {
                    return Err(stalled(processes, time));
                };
                debug!("idle from {time} to {arrival}");
                time = arrival;
                continue;
            };

            let process = &mut processes[index];
            let burst = process.burst();
            let interval = process.execute(time, burst);
            debug!("run {interval}");

            time = interval.end;
            gantt.push(interval);
        }

        Ok(gantt)
    }
}
