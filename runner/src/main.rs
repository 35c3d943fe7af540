use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::debug;

use processor::{format_report, format_reports, parse_entry, parse_quantum, ProcessEntry, Processor};
use scheduler::{Discipline, Scheduler};

mod logger;

/// Scheduling algorithm options
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
enum Algorithm {
    /// First-Come-First-Served
    Fcfs,
    /// Non-preemptive Shortest-Job-First
    Sjf,
    /// Round Robin with a fixed quantum
    Rr,
    /// Run all algorithms for comparison
    All,
}

/// How Round Robin picks the next process
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
enum QueueDiscipline {
    /// Visit the processes in input order
    FixedCursor,
    /// FIFO queue of ready processes
    ReadyQueue,
}

impl From<QueueDiscipline> for Discipline {
    fn from(discipline: QueueDiscipline) -> Self {
        match discipline {
            QueueDiscipline::FixedCursor => Discipline::FixedCursor,
            QueueDiscipline::ReadyQueue => Discipline::ReadyQueue,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
enum Format {
    Text,
    Json,
}

/// CPU scheduling simulation
#[derive(Parser, Debug)]
#[command(name = "runner")]
#[command(about = "Simulate FCFS, SJF and Round Robin CPU scheduling", long_about = None)]
struct Args {
    /// Scheduling algorithm to use
    #[arg(short, long, value_enum, default_value_t = Algorithm::Fcfs)]
    algorithm: Algorithm,

    /// Round Robin time quantum
    #[arg(short, long, default_value = "4")]
    quantum: String,

    /// Round Robin queue discipline
    #[arg(long, value_enum, default_value_t = QueueDiscipline::FixedCursor)]
    discipline: QueueDiscipline,

    /// A process as arrival and burst time, repeat for every process
    #[arg(short, long = "process", value_name = "AT:BT")]
    processes: Vec<String>,

    /// JSON file with a list of {"name", "arrival", "burst"} processes
    #[arg(short, long, value_name = "FILE", conflicts_with = "processes")]
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Width of the Gantt chart in columns
    #[arg(short, long, default_value_t = processor::DEFAULT_WIDTH)]
    width: usize,

    /// Increase verbosity, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn entries(&self) -> Result<Vec<ProcessEntry>> {
        if let Some(path) = &self.input {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let entries: Vec<ProcessEntry> = serde_json::from_str(&json)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            return Ok(entries);
        }

        let entries = self
            .processes
            .iter()
            .enumerate()
            .map(|(row, process)| {
                let (arrival, burst) = process.split_once(':').unwrap_or((process.as_str(), ""));
                parse_entry(row, arrival, burst)
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(processor::Error::from)?;
        Ok(entries)
    }

    fn schedulers(&self) -> Result<Vec<Box<dyn Scheduler>>> {
        let mut schedulers: Vec<Box<dyn Scheduler>> = Vec::new();
        if matches!(self.algorithm, Algorithm::Fcfs | Algorithm::All) {
            schedulers.push(Box::new(scheduler::fcfs()));
        }
        if matches!(self.algorithm, Algorithm::Sjf | Algorithm::All) {
            schedulers.push(Box::new(scheduler::sjf()));
        }
        // the quantum is only checked when round robin runs
        if matches!(self.algorithm, Algorithm::Rr | Algorithm::All) {
            let quantum = parse_quantum(&self.quantum).map_err(processor::Error::from)?;
            schedulers.push(Box::new(scheduler::round_robin_with(
                quantum,
                self.discipline.into(),
            )));
        }
        Ok(schedulers)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::logger_init(logger::level(args.verbose)).context("failed to set up logging")?;
    debug!("{args:?}");

    let entries = args.entries()?;
    let processor = Processor::new().chart_width(args.width);
    let reports = args
        .schedulers()?
        .iter()
        .map(|scheduler| processor.run(scheduler.as_ref(), &entries))
        .collect::<Result<Vec<_>, _>>()?;

    match args.format {
        Format::Text if reports.len() == 1 => print!("{}", format_report(&reports[0])),
        Format::Text => print!("{}", format_reports(&reports)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests;
