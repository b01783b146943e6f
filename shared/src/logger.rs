// Process logger: colored lines on stderr, plain lines in the log file.

use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

pub struct CurtainsLogger {
    level: LevelFilter,
    log_file: Mutex<Option<File>>,
}

impl CurtainsLogger {
    pub fn new(level: LevelFilter, log_path: Option<&Path>) -> Self {
        let log_file = log_path.and_then(|path| {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            match OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
            {
                Ok(file) => Some(file),
                Err(e) => {
                    eprintln!("Warning: Failed to open log file at {:?}: {}", path, e);
                    None
                }
            }
        });

        Self {
            level,
            log_file: Mutex::new(log_file),
        }
    }

    fn level_tag(level: Level) -> &'static str {
        match level {
            Level::Error => "[E]",
            Level::Warn => "[W]",
            Level::Info => "[I]",
            Level::Debug => "[D]",
            Level::Trace => "[T]",
        }
    }

    fn short_target<'a>(record: &'a Record) -> &'a str {
        record
            .target()
            .split("::")
            .last()
            .unwrap_or(record.target())
    }

    pub fn format_plain(record: &Record) -> String {
        let target = Self::short_target(record);
        if target.is_empty() {
            format!("{} {}", Self::level_tag(record.level()), record.args())
        } else {
            format!(
                "{} [{}] {}",
                Self::level_tag(record.level()),
                target,
                record.args()
            )
        }
    }

    fn format_colored(record: &Record) -> String {
        let tag = Self::level_tag(record.level());
        let message = Self::format_plain(record);

        match record.level() {
            Level::Error => message.red().bold().to_string(),
            Level::Warn => message.yellow().bold().to_string(),
            level => {
                let colored_tag = match level {
                    Level::Info => tag.green().bold(),
                    Level::Debug => tag.blue().bold(),
                    _ => tag.white().bold(),
                };
                message.replacen(tag, &colored_tag.to_string(), 1)
            }
        }
    }
}

impl Log for CurtainsLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!("{}", Self::format_colored(record));

        if let Ok(mut file_opt) = self.log_file.lock() {
            if let Some(file) = file_opt.as_mut() {
                let _ = writeln!(file, "{}", Self::format_plain(record));
                let _ = file.flush();
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut file_opt) = self.log_file.lock() {
            if let Some(file) = file_opt.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

pub fn init_logger(level: LevelFilter, log_path: Option<&Path>) -> Result<(), log::SetLoggerError> {
    let logger = CurtainsLogger::new(level, log_path);
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(level);
    Ok(())
}
