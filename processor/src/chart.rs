use std::fmt::{self, Display};

use scheduler::{Schedule, Slot};

/// The default number of columns of a [`GanttChart`].
pub const DEFAULT_WIDTH: usize = 60;

/// A text rendering of the timeline of a [`Schedule`].
///
/// Every tick takes one column as long as the whole run fits the width,
/// longer runs are scaled down to the width. Idle gaps are drawn with `-`
/// and every boundary is labelled with its tick.
///
/// ```text
/// |P1   |P2 |--|P3      |
/// 0     5   8  10       18
/// ```
pub struct GanttChart<'a> {
    schedule: &'a Schedule,
    width: usize,
}

impl<'a> GanttChart<'a> {
    pub fn new(schedule: &'a Schedule) -> GanttChart<'a> {
        GanttChart {
            schedule,
            width: DEFAULT_WIDTH,
        }
    }

    pub fn with_width(self, width: usize) -> GanttChart<'a> {
        GanttChart {
            width: width.max(1),
            ..self
        }
    }

    /// The column of `time`, rounded to the nearest column.
    fn column(&self, time: usize) -> usize {
        let makespan = self.schedule.makespan();
        if makespan <= self.width {
            return time;
        }
        let (time, width, makespan) = (time as u128, self.width as u128, makespan as u128);
        // never above `width`
        ((time * width + makespan / 2) / makespan) as usize
    }
}

impl Display for GanttChart<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut bar = String::new();
        let mut ticks = String::new();

        for slot in self.schedule.timeline() {
            let (label, fill) = match slot {
                Slot::Busy(interval) => (interval.name.as_str(), ' '),
                Slot::Idle { .. } => ("", '-'),
            };
            let columns = self.column(slot.end()) - self.column(slot.start());
            let label_width = label.chars().count();
            let width = columns.max(label_width).max(1);

            bar.push('|');
            bar.push_str(label);
            bar.extend(std::iter::repeat(fill).take(width - label_width));

            let tick = slot.start().to_string();
            ticks.push_str(&format!("{:<width$}", tick, width = width + 1));
            if tick.len() > width {
                // keep neighbouring ticks apart
                ticks.push(' ');
            }
        }
        bar.push('|');
        ticks.push_str(&self.schedule.makespan().to_string());

        writeln!(f, "{bar}")?;
        write!(f, "{ticks}")
    }
}
