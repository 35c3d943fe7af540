use std::collections::VecDeque;
use std::num::NonZeroUsize;

use log::debug;

use super::{next_arrival, stalled};
use crate::{Discipline, GanttInterval, Policy, Process, Scheduler, SchedulingError, SliceOutcome};

pub struct RoundRobin {
    quantum: NonZeroUsize,
    discipline: Discipline,
}

impl RoundRobin {
    pub fn new(quantum: NonZeroUsize) -> Self {
        RoundRobin::with_discipline(quantum, Discipline::default())
    }

    pub fn with_discipline(quantum: NonZeroUsize, discipline: Discipline) -> Self {
        RoundRobin {
            quantum,
            discipline,
        }
    }

    /// Sweeps the processes in input order, giving every ready process
    /// one slice per sweep.
    fn fixed_cursor(&self, processes: &mut [Process]) -> Result<Vec<GanttInterval>, SchedulingError> {
        let count = processes.len();
        let mut gantt = Vec::new();
        let mut completed = 0;
        let mut cursor = 0;
        let mut time = first_arrival(processes);

        while completed < count {
            let mut ran = false;
            for _ in 0..count {
                let process = &mut processes[cursor];
                if process.is_ready(time) {
                    let interval = process.execute(time, self.quantum.get());
                    debug!("run {interval} {}", interval.outcome);

                    if interval.outcome == SliceOutcome::Completed {
                        completed += 1;
                    }
                    time = interval.end;
                    gantt.push(interval);
                    ran = true;
                }
                cursor = (cursor + 1) % count;
            }

            if !ran {
                let Some(arrival) = next_arrival(processes, time) else {
                    return Err(stalled(processes, time));
                };
                debug!("idle from {time} to {arrival}");
                time = arrival;
            }
        }

        Ok(gantt)
    }

    /// Runs the process at the front of a FIFO ready queue. Processes that
    /// arrived during a slice are queued before the preempted process.
    fn ready_queue(&self, processes: &mut [Process]) -> Result<Vec<GanttInterval>, SchedulingError> {
        let count = processes.len();
        let mut gantt = Vec::new();
        let mut ready_queue = VecDeque::with_capacity(count);
        let mut admitted = vec![false; count];
        let mut completed = 0;
        let mut time = first_arrival(processes);

        admit(processes, &mut admitted, &mut ready_queue, time);
        while completed < count {
            let Some(index) = ready_queue.pop_front() else {
                let Some(arrival) = next_arrival(processes, time) else {
                    return Err(stalled(processes, time));
                };
                debug!("idle from {time} to {arrival}");
                time = arrival;
                admit(processes, &mut admitted, &mut ready_queue, time);
                continue;
            };

            let interval = processes[index].execute(time, self.quantum.get());
            debug!("run {interval} {}", interval.outcome);
            time = interval.end;

            admit(processes, &mut admitted, &mut ready_queue, time);
            match interval.outcome {
                SliceOutcome::Completed => completed += 1,
                SliceOutcome::Preempted => ready_queue.push_back(index),
            }
            gantt.push(interval);
        }

        Ok(gantt)
    }
}

impl Scheduler for RoundRobin {
    fn policy(&self) -> Policy {
        Policy::RoundRobin {
            quantum: self.quantum,
            discipline: self.discipline,
        }
    }

    fn simulate(&self, processes: &mut [Process]) -> Result<Vec<GanttInterval>, SchedulingError> {
        match self.discipline {
            Discipline::FixedCursor => self.fixed_cursor(processes),
            Discipline::ReadyQueue => self.ready_queue(processes),
        }
    }
}

/// The CPU starts working when the first process arrives.
fn first_arrival(processes: &[Process]) -> usize {
    processes.iter().map(Process::arrival).min().unwrap_or(0)
}

/// Queues the processes that arrived by `time`, earliest arrival first.
fn admit(
    processes: &[Process],
    admitted: &mut [bool],
    ready_queue: &mut VecDeque<usize>,
    time: usize,
) {
    let mut arrived: Vec<usize> = (0..processes.len())
        .filter(|&index| !admitted[index] && processes[index].arrival() <= time)
        .collect();
    arrived.sort_by_key(|&index| processes[index].arrival());

    for index in arrived {
        admitted[index] = true;
        ready_queue.push_back(index);
    }
}
