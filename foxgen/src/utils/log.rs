use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum LogLevel {
    Quiet = 0,
    Normal = 1,
    Verbose = 2,
}

static LOG_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Normal as u8);

pub fn set_log_level(level: LogLevel) {
    LOG_LEVEL.store(level as u8, Ordering::Relaxed);
    log::set_max_level(match level {
        LogLevel::Quiet => log::LevelFilter::Error,
        LogLevel::Normal => log::LevelFilter::Warn,
        LogLevel::Verbose => log::LevelFilter::Debug,
    });
}

pub fn log_level() -> LogLevel {
    match LOG_LEVEL.load(Ordering::Relaxed) {
        0 => LogLevel::Quiet,
        2 => LogLevel::Verbose,
        _ => LogLevel::Normal,
    }
}

/// Routes `log` records emitted by foxfs through the `[foxgen]` output.
struct Bridge;

static BRIDGE: Bridge = Bridge;

impl log::Log for Bridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        match record.level() {
            log::Level::Error => crate::log_error!("{}", record.args()),
            log::Level::Warn => crate::log_warn!("{}", record.args()),
            _ => crate::log_verbose!("{}", record.args()),
        }
    }

    fn flush(&self) {}
}

pub fn init(level: LogLevel) {
    // a logger may already be installed when running under tests
    let _ = log::set_logger(&BRIDGE);
    set_log_level(level);
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if $crate::utils::log_level() != $crate::utils::LogLevel::Quiet {
            println!("[foxgen] {}", format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_verbose {
    ($($arg:tt)*) => {
        if $crate::utils::log_level() == $crate::utils::LogLevel::Verbose {
            println!("[foxgen] {}", format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if $crate::utils::log_level() != $crate::utils::LogLevel::Quiet {
            use colored::Colorize as _;
            eprintln!("[foxgen] {} {}", "warning:".yellow().bold(), format_args!($($arg)*));
        }
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{
        use colored::Colorize as _;
        eprintln!("[foxgen] {} {}", "error:".red().bold(), format_args!($($arg)*));
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_roundtrip() {
        set_log_level(LogLevel::Verbose);
        assert_eq!(log_level(), LogLevel::Verbose);
        assert_eq!(log::max_level(), log::LevelFilter::Debug);
        set_log_level(LogLevel::Normal);
        assert_eq!(log_level(), LogLevel::Normal);
    }
}
