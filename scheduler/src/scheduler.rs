use std::error::Error;
use std::fmt::{self, Display};
use std::num::NonZeroUsize;

use log::info;
use serde::Serialize;

/// The PID of a process
///
/// The PID cannot be 0, PIDs start from 1. The PID of a process is
/// derived from its position in the input list, so it can always be
/// used to restore the order in which processes were submitted.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Pid(NonZeroUsize);

impl Pid {
    /// Returns the PID of the process found at `index` in the input list.
    pub fn from_index(index: usize) -> Pid {
        Pid(NonZeroUsize::MIN.saturating_add(index))
    }

    /// The 0-based position of the process in the input list.
    pub fn index(&self) -> usize {
        self.0.get() - 1
    }
}

impl PartialEq<usize> for Pid {
    fn eq(&self, other: &usize) -> bool {
        self.0.get() == *other
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A process record.
///
/// A process is created with its arrival and burst times only. The
/// completion, turnaround and waiting times stay unset until a
/// simulation run completes the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Process {
    pid: Pid,
    name: String,
    arrival: usize,
    burst: usize,
    #[serde(skip)]
    remaining: usize,
    completion: Option<usize>,
    turnaround: Option<usize>,
    waiting: Option<usize>,
}

impl Process {
    /// Creates the process found at `index` in the input list.
    ///
    /// The PID is derived from `index`, see [`Pid`].
    pub fn new(index: usize, name: impl Into<String>, arrival: usize, burst: usize) -> Process {
        Process {
            pid: Pid::from_index(index),
            name: name.into(),
            arrival,
            burst,
            remaining: burst,
            completion: None,
            turnaround: None,
            waiting: None,
        }
    }

    /// Creates the process found at `index` in the input list, named
    /// `P1`, `P2`, ... after its PID.
    pub fn numbered(index: usize, arrival: usize, burst: usize) -> Process {
        let pid = Pid::from_index(index);
        Process::new(index, format!("P{pid}"), arrival, burst)
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The tick at which the process becomes eligible to run (AT).
    pub fn arrival(&self) -> usize {
        self.arrival
    }

    /// The total number of ticks the process needs (BT).
    pub fn burst(&self) -> usize {
        self.burst
    }

    /// The number of ticks the process still needs.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// The tick at which the process finished (CT).
    pub fn completion(&self) -> Option<usize> {
        self.completion
    }

    /// CT - AT
    pub fn turnaround(&self) -> Option<usize> {
        self.turnaround
    }

    /// TAT - BT
    pub fn waiting(&self) -> Option<usize> {
        self.waiting
    }

    pub fn is_completed(&self) -> bool {
        self.completion.is_some()
    }

    pub(crate) fn is_ready(&self, time: usize) -> bool {
        self.remaining > 0 && self.arrival <= time
    }

    /// Discards the results of a previous run.
    pub(crate) fn reset(&mut self) {
        self.remaining = self.burst;
        self.completion = None;
        self.turnaround = None;
        self.waiting = None;
    }

    /// Runs the process for at most `timeslice` ticks starting at `time`.
    ///
    /// Returns the interval that was executed. The process is completed
    /// if it used up its remaining time.
    pub(crate) fn execute(&mut self, time: usize, timeslice: usize) -> GanttInterval {
        let slice = timeslice.min(self.remaining);
        let end = time + slice;
        self.remaining -= slice;

        let outcome = if self.remaining == 0 {
            self.complete(end);
            SliceOutcome::Completed
        } else {
            SliceOutcome::Preempted
        };

        GanttInterval {
            pid: self.pid,
            name: self.name.clone(),
            start: time,
            end,
            outcome,
        }
    }

    fn complete(&mut self, time: usize) {
        let turnaround = time - self.arrival;
        self.completion = Some(time);
        self.turnaround = Some(turnaround);
        self.waiting = Some(turnaround - self.burst);
    }
}

/// Why a process left the CPU at the end of a [`GanttInterval`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceOutcome {
    /// The process used up its burst time and finished.
    Completed,

    /// The quantum allocated for the process has expired and the process
    /// has been preempted.
    Preempted,
}

impl Display for SliceOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SliceOutcome::Completed => write!(f, "completed"),
            SliceOutcome::Preempted => write!(f, "preempted"),
        }
    }
}

/// A contiguous time slice during which one process held the CPU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GanttInterval {
    pub pid: Pid,
    pub name: String,
    pub start: usize,
    pub end: usize,
    pub outcome: SliceOutcome,
}

impl GanttInterval {
    pub fn duration(&self) -> usize {
        self.end - self.start
    }
}

impl Display for GanttInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}-{}]", self.name, self.start, self.end)
    }
}

/// A slot of the timeline: either a process running or the CPU idling.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Slot<'a> {
    Busy(&'a GanttInterval),
    Idle { start: usize, end: usize },
}

impl Slot<'_> {
    pub fn start(&self) -> usize {
        match self {
            Slot::Busy(interval) => interval.start,
            Slot::Idle { start, .. } => *start,
        }
    }

    pub fn end(&self) -> usize {
        match self {
            Slot::Busy(interval) => interval.end,
            Slot::Idle { end, .. } => *end,
        }
    }
}

/// How the round robin scheduler picks the next process.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Discipline {
    /// Visit the processes in input order with a cyclic cursor. A process
    /// that arrives after the cursor went past it waits for the next sweep.
    #[default]
    FixedCursor,

    /// Keep a FIFO queue of ready processes. Newly arrived processes are
    /// queued before the preempted process is put back.
    ReadyQueue,
}

impl Display for Discipline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Discipline::FixedCursor => write!(f, "fixed cursor"),
            Discipline::ReadyQueue => write!(f, "ready queue"),
        }
    }
}

/// The scheduling policy that produced a [`Schedule`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum Policy {
    /// First-Come-First-Served.
    Fcfs,
    /// Non-preemptive Shortest-Job-First.
    Sjf,
    /// Preemptive Round Robin with a fixed quantum.
    RoundRobin {
        quantum: NonZeroUsize,
        discipline: Discipline,
    },
}

impl Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Policy::Fcfs => write!(f, "First-Come-First-Served"),
            Policy::Sjf => write!(f, "Shortest-Job-First"),
            Policy::RoundRobin {
                quantum,
                discipline: Discipline::FixedCursor,
            } => write!(f, "Round Robin (quantum {quantum})"),
            Policy::RoundRobin {
                quantum,
                discipline,
            } => write!(f, "Round Robin (quantum {quantum}, {discipline})"),
        }
    }
}

/// The result of a simulation run.
///
/// The processes are kept in input order, the Gantt
/// intervals in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    policy: Policy,
    processes: Vec<Process>,
    gantt: Vec<GanttInterval>,
}

impl Schedule {
    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn gantt(&self) -> &[GanttInterval] {
        &self.gantt
    }

    /// The PIDs of the Gantt intervals, in execution order.
    pub fn execution_order(&self) -> Vec<Pid> {
        self.gantt.iter().map(|interval| interval.pid).collect()
    }

    /// The tick at which the last process finished.
    pub fn makespan(&self) -> usize {
        self.gantt.last().map_or(0, |interval| interval.end)
    }

    /// The number of ticks the CPU was running a process.
    pub fn busy_time(&self) -> usize {
        self.gantt.iter().map(GanttInterval::duration).sum()
    }

    /// Busy time as a percentage of the makespan.
    pub fn cpu_utilization(&self) -> f64 {
        match self.makespan() {
            0 => 0.0,
            makespan => self.busy_time() as f64 / makespan as f64 * 100.0,
        }
    }

    pub fn total_turnaround(&self) -> usize {
        self.processes.iter().filter_map(Process::turnaround).sum()
    }

    pub fn total_waiting(&self) -> usize {
        self.processes.iter().filter_map(Process::waiting).sum()
    }

    pub fn average_turnaround(&self) -> f64 {
        self.average(self.total_turnaround())
    }

    pub fn average_waiting(&self) -> f64 {
        self.average(self.total_waiting())
    }

    fn average(&self, total: usize) -> f64 {
        if self.processes.is_empty() {
            0.0
        } else {
            total as f64 / self.processes.len() as f64
        }
    }

    /// The timeline from tick 0 to the makespan, with the gaps between
    /// intervals reported as idle slots.
    pub fn timeline(&self) -> Vec<Slot<'_>> {
        let mut slots = Vec::with_capacity(self.gantt.len());
        let mut time = 0;
        for interval in &self.gantt {
            if interval.start > time {
                slots.push(Slot::Idle {
                    start: time,
                    end: interval.start,
                });
            }
            slots.push(Slot::Busy(interval));
            time = interval.end;
        }
        slots
    }
}

/// The reason a simulation was rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SchedulingError {
    /// The list of processes is empty.
    NoProcesses,

    /// A process needs no CPU time at all.
    ZeroBurst {
        /// The offending process.
        pid: Pid,
    },

    /// The round robin quantum is 0.
    ZeroQuantum,

    /// The last arrival plus all the bursts does not fit the clock, or
    /// the totals of the per-process times would not.
    ClockOverflow,

    /// No pending process can ever become eligible.
    ///
    /// This cannot happen for validated input.
    Stalled {
        /// The tick at which the simulation got stuck.
        time: usize,
        /// The number of processes that did not complete.
        pending: usize,
    },
}

impl Display for SchedulingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingError::NoProcesses => write!(f, "no processes to schedule"),
            SchedulingError::ZeroBurst { pid } => {
                write!(f, "process {pid} has a burst time of 0, BT must be > 0")
            }
            SchedulingError::ZeroQuantum => write!(f, "the time quantum must be > 0"),
            SchedulingError::ClockOverflow => {
                write!(f, "the arrival and burst times are too large to simulate")
            }
            SchedulingError::Stalled { time, pending } => write!(
                f,
                "simulation stalled at tick {time} with {pending} pending processes"
            ),
        }
    }
}

impl Error for SchedulingError {}

/// Checks the preconditions shared by every scheduler.
pub fn validate(processes: &[Process]) -> Result<(), SchedulingError> {
    if processes.is_empty() {
        return Err(SchedulingError::NoProcesses);
    }
    if let Some(process) = processes.iter().find(|process| process.burst == 0) {
        return Err(SchedulingError::ZeroBurst { pid: process.pid });
    }

    // every completion is at most the last arrival plus all the bursts
    let last_arrival = processes.iter().map(Process::arrival).max().unwrap_or(0);
    processes
        .iter()
        .try_fold(last_arrival, |clock, process| clock.checked_add(process.burst))
        .and_then(|clock| clock.checked_mul(processes.len()))
        .map(|_| ())
        .ok_or(SchedulingError::ClockOverflow)
}

/// The trait that any scheduler has to implement.
pub trait Scheduler: Send {
    /// Returns the policy implemented by the scheduler.
    fn policy(&self) -> Policy;

    /// Executes the processes and returns the Gantt intervals in execution
    /// order.
    ///
    /// The processes are validated, freshly reset and in input order. They
    /// have to be left in input order.
    fn simulate(&self, processes: &mut [Process]) -> Result<Vec<GanttInterval>, SchedulingError>;

    /// Runs a simulation over a private copy of `processes`.
    ///
    /// The input is validated before anything is computed, so a rejected
    /// call produces no state at all.
    fn run(&self, processes: &[Process]) -> Result<Schedule, SchedulingError> {
        validate(processes)?;

        let mut processes = processes.to_vec();
        processes.iter_mut().for_each(Process::reset);
        let gantt = self.simulate(&mut processes)?;

        let schedule = Schedule {
            policy: self.policy(),
            processes,
            gantt,
        };
        info!(
            "{}: {} processes done at tick {}",
            schedule.policy,
            schedule.processes.len(),
            schedule.makespan()
        );
        Ok(schedule)
    }
}
