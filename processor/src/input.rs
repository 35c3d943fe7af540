use std::error::Error;
use std::fmt::Display;
use std::num::NonZeroUsize;

use scheduler::{Pid, Process};
use serde::Deserialize;

/// An input field of a process row.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    ArrivalTime,
    BurstTime,
    Quantum,
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::ArrivalTime => write!(f, "AT"),
            Field::BurstTime => write!(f, "BT"),
            Field::Quantum => write!(f, "time quantum"),
        }
    }
}

/// The reason the user input was rejected.
///
/// `row` is the 0-based position of the process in the input, it is
/// [`None`] for the time quantum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// No process was given.
    NoProcesses,

    /// A field was left empty.
    EmptyField { row: Option<usize>, field: Field },

    /// A field does not hold an integer.
    NotANumber {
        row: Option<usize>,
        field: Field,
        text: String,
    },

    /// AT < 0
    NegativeArrival { row: usize, value: i64 },

    /// BT <= 0
    NonPositiveBurst { row: usize, value: i64 },

    /// quantum <= 0
    NonPositiveQuantum { value: i64 },

    /// The value does not fit the simulated clock.
    OutOfRange {
        row: Option<usize>,
        field: Field,
        value: i64,
    },
}

struct Row(Option<usize>);

impl Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(row) => write!(f, "P{}: ", row + 1),
            None => Ok(()),
        }
    }
}

impl Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::NoProcesses => write!(f, "no processes defined"),
            InputError::EmptyField { row, field } => {
                write!(f, "{}{field} must be filled", Row(*row))
            }
            InputError::NotANumber { row, field, text } => {
                write!(f, "{}{field} must be a valid integer, got \"{text}\"", Row(*row))
            }
            InputError::NegativeArrival { row, value } => {
                write!(f, "{}AT must be >= 0, got {value}", Row(Some(*row)))
            }
            InputError::NonPositiveBurst { row, value } => {
                write!(f, "{}BT must be > 0, got {value}", Row(Some(*row)))
            }
            InputError::NonPositiveQuantum { value } => {
                write!(f, "time quantum must be > 0, got {value}")
            }
            InputError::OutOfRange { row, field, value } => {
                write!(f, "{}{field} is out of range, got {value}", Row(*row))
            }
        }
    }
}

impl Error for InputError {}

/// A process as typed by the user, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProcessEntry {
    /// The display name, `P<n>` when missing.
    pub name: Option<String>,
    pub arrival: i64,
    pub burst: i64,
}

impl ProcessEntry {
    pub fn new(arrival: i64, burst: i64) -> ProcessEntry {
        ProcessEntry {
            name: None,
            arrival,
            burst,
        }
    }

    pub fn named(name: &str, arrival: i64, burst: i64) -> ProcessEntry {
        ProcessEntry {
            name: Some(name.to_owned()),
            arrival,
            burst,
        }
    }
}

fn parse_number(row: Option<usize>, field: Field, text: &str) -> Result<i64, InputError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(InputError::EmptyField { row, field });
    }
    text.parse().map_err(|_| InputError::NotANumber {
        row,
        field,
        text: text.to_owned(),
    })
}

/// Parses the AT and BT text fields of the process at `row`.
pub fn parse_entry(row: usize, arrival: &str, burst: &str) -> Result<ProcessEntry, InputError> {
    Ok(ProcessEntry::new(
        parse_number(Some(row), Field::ArrivalTime, arrival)?,
        parse_number(Some(row), Field::BurstTime, burst)?,
    ))
}

/// Parses a table of `(AT, BT)` text fields.
pub fn parse_rows(rows: &[(&str, &str)]) -> Result<Vec<ProcessEntry>, InputError> {
    rows.iter()
        .enumerate()
        .map(|(row, (arrival, burst))| parse_entry(row, arrival, burst))
        .collect()
}

/// Parses the time quantum text field.
pub fn parse_quantum(text: &str) -> Result<NonZeroUsize, InputError> {
    let value = parse_number(None, Field::Quantum, text)?;
    if value <= 0 {
        return Err(InputError::NonPositiveQuantum { value });
    }
    usize::try_from(value)
        .ok()
        .and_then(NonZeroUsize::new)
        .ok_or(InputError::OutOfRange {
            row: None,
            field: Field::Quantum,
            value,
        })
}

/// Validates the entries and turns them into processes.
///
/// The PID of each process is its position in `entries`.
pub fn into_processes(entries: &[ProcessEntry]) -> Result<Vec<Process>, InputError> {
    if entries.is_empty() {
        return Err(InputError::NoProcesses);
    }

    entries
        .iter()
        .enumerate()
        .map(|(row, entry)| {
            if entry.arrival < 0 {
                return Err(InputError::NegativeArrival {
                    row,
                    value: entry.arrival,
                });
            }
            if entry.burst <= 0 {
                return Err(InputError::NonPositiveBurst {
                    row,
                    value: entry.burst,
                });
            }

            let out_of_range = |field: Field, value: i64| InputError::OutOfRange {
                row: Some(row),
                field,
                value,
            };
            let arrival = usize::try_from(entry.arrival)
                .map_err(|_| out_of_range(Field::ArrivalTime, entry.arrival))?;
            let burst = usize::try_from(entry.burst)
                .map_err(|_| out_of_range(Field::BurstTime, entry.burst))?;

            let pid = Pid::from_index(row);
            let name = match &entry.name {
                Some(name) => name.clone(),
                None => format!("P{pid}"),
            };
            Ok(Process::new(row, name, arrival, burst))
        })
        .collect()
}
