use anyhow::Result;
use fern::colors::{Color, ColoredLevelConfig};
use fern::Dispatch;
use log::LevelFilter;

/// Verbosity level for logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Error messages only
    Error,
    /// Warning and error messages
    Warning,
    /// Info, warning, and error messages (default)
    Info,
    /// Debug, info, warning, and error messages
    Debug,
    /// Trace, debug, info, warning, and error messages
    Trace,
}

impl LogLevel {
    /// Convert verbosity level to log::LevelFilter
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }

    /// Get the verbosity level from the number of occurrences of a flag
    pub fn from_occurrences(occurrences: u8) -> Self {
        match occurrences {
            0 => LogLevel::Warning, // Default: keep the report stream quiet
            1 => LogLevel::Info,    // -v
            2 => LogLevel::Debug,   // -vv
            _ => LogLevel::Trace,   // -vvv or more
        }
    }
}

/// Initialise the logger with the specified verbosity level
///
/// All log output goes to stderr; stdout is reserved for the flow file
/// report so it can be piped or diffed without log noise.
pub fn init_logger(verbosity: LogLevel) -> Result<()> {
    let colors_line = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::White)
        .debug(Color::White)
        .trace(Color::BrightBlack);

    let use_color = atty::is(atty::Stream::Stderr);

    Dispatch::new()
        .format(move |out, message, record| {
            if use_color {
                out.finish(format_args!(
                    "\x1B[{}m[{}] {}\x1B[0m",
                    colors_line.get_color(&record.level()).to_fg_str(),
                    record.level(),
                    message
                ))
            } else {
                out.finish(format_args!("[{}] {}", record.level(), message))
            }
        })
        .level(verbosity.to_level_filter())
        .chain(std::io::stderr())
        .apply()?;

    log::debug!("Logger initialized with verbosity level: {verbosity:?}");

    Ok(())
}
