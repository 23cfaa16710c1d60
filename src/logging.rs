use std::{
    io::{self, Write as _},
    sync::{OnceLock, RwLock},
};

use log::{Log, Metadata, Record};

static LOGGER: OnceLock<CliLogger> = OnceLock::new();

pub fn get_logger() -> &'static CliLogger {
    LOGGER.get_or_init(|| CliLogger::new(log::Level::Warn))
}

pub fn init(min_level: log::Level) -> Result<(), log::SetLoggerError> {
    let logger = get_logger();
    logger.set_min_level(min_level);

    log::set_logger(logger)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

/// Level for the number of `-v` flags, warnings are always shown.
pub fn level_from_verbosity(verbosity: u8) -> log::Level {
    match verbosity {
        0 => log::Level::Warn,
        1 => log::Level::Info,
        2 => log::Level::Debug,
        _ => log::Level::Trace,
    }
}

/// Writes every message to stderr, so the maze on stdout stays clean.
pub struct CliLogger {
    min_level: RwLock<log::Level>,
}

impl CliLogger {
    fn new(min_level: log::Level) -> Self {
        Self {
            min_level: RwLock::new(min_level),
        }
    }

    pub fn min_level(&self) -> log::Level {
        self.min_level
            .read()
            .map(|level| *level)
            .unwrap_or(log::Level::Warn)
    }

    pub fn set_min_level(&self, level: log::Level) {
        if let Ok(mut min_level) = self.min_level.write() {
            *min_level = level;
        }
    }
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let _ = writeln!(
                io::stderr().lock(),
                "[{}] {}: {}",
                record.level(),
                record.module_path().unwrap_or("unknown"),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}
