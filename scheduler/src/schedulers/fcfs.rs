use log::debug;

use crate::{GanttInterval, Policy, Process, Scheduler, SchedulingError};

/// First-Come-First-Served
///
/// Processes run to completion in the order of their arrival.
pub struct Fcfs;

impl Scheduler for Fcfs {
    fn policy(&self) -> Policy {
        Policy::Fcfs
    }

    fn simulate(&self, processes: &mut [Process]) -> Result<Vec<GanttInterval>, SchedulingError> {
        // the sort is stable, processes that arrive together keep their input order
        let mut order: Vec<usize> = (0..processes.len()).collect();
        order.sort_by_key(|&index| processes[index].arrival());

        let mut gantt = Vec::with_capacity(processes.len());
        let mut time = 0;
        for index in order {
            let process = &mut processes[index];
            let start = time.max(process.arrival());
            if start > time {
                debug!("idle from {time} to {start}");
            }

            let burst = process.burst();
            let interval = process.execute(start, burst);
            debug!("run {interval}");

            time = interval.end;
            gantt.push(interval);
        }

        Ok(gantt)
    }
}
