use std::env;

use log::{Level, LevelFilter, Metadata, Record, SetLoggerError};

/// The environment variable that overrides the `-v` flags.
pub const LOG_ENV: &str = "SCHED_LOG";

struct StderrLogger;

fn level2color(level: Level) -> u8 {
    match level {
        Level::Error => 31, // 31 Red
        Level::Warn => 93,  // 93 BrightYellow
        _ => 0,
    }
}

macro_rules! with_color {
    ($color: expr, $($arg:tt)*) => {
        format_args!("\u{1B}[{}m{}\u{1B}[0m", $color as u8, format_args!($($arg)*))
    };
}

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let level = match record.level() {
                Level::Error => "[E]",
                Level::Warn => "[W]",
                Level::Info => "[I]",
                Level::Debug => "[D]",
                Level::Trace => "[T]",
            };
            eprintln!(
                "{}",
                with_color!(
                    level2color(record.level()),
                    "{}[{}] {}",
                    level,
                    record.target(),
                    record.args()
                )
            );
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// The level selected by `SCHED_LOG`, or by the number of `-v` flags.
pub fn level(verbose: u8) -> LevelFilter {
    let from_env = env::var(LOG_ENV)
        .ok()
        .and_then(|level| level.parse::<LevelFilter>().ok());

    from_env.unwrap_or(match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    })
}

pub fn logger_init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}
