//! A presentation library for the [`scheduler`] crate
//!
//! This turns raw user input into processes, runs a simulation and
//! formats the results as a table, a Gantt chart and summary metrics.

use std::error;
use std::fmt::{self, Display};

use log::{info, warn};
use scheduler::{Schedule, Scheduler, SchedulingError};
use serde::Serialize;

mod chart;
mod input;

pub use chart::{GanttChart, DEFAULT_WIDTH};
pub use input::{
    into_processes, parse_entry, parse_quantum, parse_rows, Field, InputError, ProcessEntry,
};

/// The reason a run was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The user input is invalid.
    Input(InputError),

    /// The scheduler refused the processes.
    Scheduling(SchedulingError),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Input(error) => write!(f, "invalid input: {error}"),
            Error::Scheduling(error @ SchedulingError::Stalled { .. }) => {
                write!(f, "internal error: {error}")
            }
            Error::Scheduling(error) => write!(f, "invalid input: {error}"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Input(error) => Some(error),
            Error::Scheduling(error) => Some(error),
        }
    }
}

impl From<InputError> for Error {
    fn from(error: InputError) -> Self {
        Error::Input(error)
    }
}

impl From<SchedulingError> for Error {
    fn from(error: SchedulingError) -> Self {
        Error::Scheduling(error)
    }
}

/// The summary metrics of a run.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// The average turnaround time.
    pub average_turnaround: f64,

    /// The average waiting time.
    pub average_waiting: f64,

    /// The tick at which the last process finished.
    pub total_time: usize,

    /// The percentage of the total time the CPU was busy.
    pub cpu_utilization: f64,
}

impl Summary {
    fn new(schedule: &Schedule) -> Summary {
        Summary {
            average_turnaround: schedule.average_turnaround(),
            average_waiting: schedule.average_waiting(),
            total_time: schedule.makespan(),
            cpu_utilization: schedule.cpu_utilization(),
        }
    }
}

impl Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Average turnaround time: {:.2}", self.average_turnaround)?;
        writeln!(f, "Average waiting time: {:.2}", self.average_waiting)?;
        writeln!(f, "Total execution time: {}", self.total_time)?;
        writeln!(f, "CPU utilization: {:.1}%", self.cpu_utilization)
    }
}

/// The result of a run, ready to be displayed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// The simulated schedule.
    pub schedule: Schedule,

    /// The summary metrics of the schedule.
    pub summary: Summary,

    #[serde(skip)]
    chart_width: usize,
}

impl Report {
    pub fn new(schedule: Schedule) -> Report {
        Report {
            summary: Summary::new(&schedule),
            schedule,
            chart_width: DEFAULT_WIDTH,
        }
    }

    /// Sets the number of columns of the Gantt chart.
    pub fn with_chart_width(self, chart_width: usize) -> Report {
        Report {
            chart_width,
            ..self
        }
    }

    pub fn chart(&self) -> GanttChart<'_> {
        GanttChart::new(&self.schedule).with_width(self.chart_width)
    }
}

fn or_dash(value: Option<usize>) -> String {
    value.map_or_else(|| "-".to_owned(), |value| value.to_string())
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "===== {} =====", self.schedule.policy())?;
        writeln!(f, "PROCESS\tAT\tBT\tCT\tTAT\tWT")?;
        for process in self.schedule.processes() {
            writeln!(
                f,
                "{}\t{}\t{}\t{}\t{}\t{}",
                process.name(),
                process.arrival(),
                process.burst(),
                or_dash(process.completion()),
                or_dash(process.turnaround()),
                or_dash(process.waiting())
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Gantt chart")?;
        writeln!(f, "{}", self.chart())?;
        writeln!(f)?;
        write!(f, "{}", self.summary)
    }
}

/// Runs simulations from user input.
pub struct Processor {
    chart_width: usize,
}

impl Default for Processor {
    fn default() -> Self {
        Processor::new()
    }
}

impl Processor {
    pub fn new() -> Processor {
        Processor {
            chart_width: DEFAULT_WIDTH,
        }
    }

    /// Sets the number of columns of the Gantt charts of the reports.
    pub fn chart_width(self, chart_width: usize) -> Processor {
        Processor { chart_width }
    }

    /// Validates the entries and runs a simulation.
    ///
    /// * `scheduler` - the scheduler to use for the simulation.
    /// * `entries` - the processes, in the order they were submitted.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use processor::{ProcessEntry, Processor};
    ///
    /// let report = Processor::new()
    ///     .run(
    ///         &scheduler::fcfs(),
    ///         &[ProcessEntry::new(0, 5), ProcessEntry::new(1, 3), ProcessEntry::new(2, 8)],
    ///     )
    ///     .unwrap();
    ///
    /// assert_eq!(report.summary.total_time, 16);
    /// ```
    pub fn run<S>(&self, scheduler: &S, entries: &[ProcessEntry]) -> Result<Report, Error>
    where
        S: Scheduler + ?Sized,
    {
        let result = into_processes(entries)
            .map_err(Error::from)
            .and_then(|processes| scheduler.run(&processes).map_err(Error::from));

        match result {
            Ok(schedule) => {
                info!(
                    "{}: average TAT {:.2}, average WT {:.2}",
                    schedule.policy(),
                    schedule.average_turnaround(),
                    schedule.average_waiting()
                );
                Ok(Report::new(schedule).with_chart_width(self.chart_width))
            }
            Err(error) => {
                warn!("{}: {error}", scheduler.policy());
                Err(error)
            }
        }
    }

    /// Parses the `(AT, BT)` text fields and runs a simulation.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use processor::Processor;
    ///
    /// let error = Processor::new()
    ///     .run_text(&scheduler::sjf(), &[("0", "4"), ("", "2")])
    ///     .unwrap_err();
    ///
    /// assert_eq!(error.to_string(), "invalid input: P2: AT must be filled");
    /// ```
    pub fn run_text<S>(&self, scheduler: &S, rows: &[(&str, &str)]) -> Result<Report, Error>
    where
        S: Scheduler + ?Sized,
    {
        let entries = parse_rows(rows).map_err(|error| {
            warn!("{}: {error}", scheduler.policy());
            Error::from(error)
        })?;
        self.run(scheduler, &entries)
    }
}

/// Format a [`Report`] to a [`String`].
pub fn format_report(report: &Report) -> String {
    report.to_string()
}

/// Format the reports of several policies run over the same processes,
/// followed by a comparison of their averages.
///
/// * `reports` - the reports returned by the [`Processor`].
pub fn format_reports(reports: &[Report]) -> String {
    let mut s = String::new();
    for report in reports {
        fmt::write(&mut s, format_args!("{}\n", report)).ok();
    }
    if reports.len() > 1 {
        s.push_str("===== Comparison =====\n");
        s.push_str("POLICY\tAVG TAT\tAVG WT\n");
        for report in reports {
            fmt::write(
                &mut s,
                format_args!(
                    "{}\t{:.2}\t{:.2}\n",
                    report.schedule.policy(),
                    report.summary.average_turnaround,
                    report.summary.average_waiting
                ),
            )
            .ok();
        }
    }
    s
}
