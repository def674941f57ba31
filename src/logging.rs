use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{LevelFilter, Log, Metadata, Record};

/// Logger writing timestamped lines to stderr or to a log file
struct ExportLogger {
    sink: Mutex<Box<dyn Write + Send>>,
    level: LevelFilter,
}

impl ExportLogger {
    fn stderr(level: LevelFilter) -> Self {
        ExportLogger {
            sink: Mutex::new(Box::new(io::stderr())),
            level,
        }
    }

    fn file(file_path: &Path, level: LevelFilter) -> io::Result<Self> {
        // Create parent directories if they don't exist
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(file_path)?;

        Ok(ExportLogger {
            sink: Mutex::new(Box::new(file)),
            level,
        })
    }
}

impl Log for ExportLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut sink) = self.sink.lock() {
                let _ = writeln!(
                    sink,
                    "[{}] [{}] {}",
                    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                );
                let _ = sink.flush();
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            let _ = sink.flush();
        }
    }
}

/// Level for the number of `-v` flags given
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// Initialize the logger, writing to `log_file` (overwriting previous logs) or to stderr
pub fn init_logger(level: LevelFilter, log_file: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let logger = match log_file {
        Some(path) => ExportLogger::file(path, level)?,
        None => ExportLogger::stderr(level),
    };

    log::set_boxed_logger(Box::new(logger))
        .map(|()| log::set_max_level(level))?;

    Ok(())
}
