//! Shared CLI types and logging setup.

use clap::ValueEnum;
use std::io::{IsTerminal, stderr};

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    /// Whether progress output on stderr should be colored
    #[must_use]
    pub fn use_colors(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => stderr().is_terminal(),
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

impl LogLevel {
    /// The effective level once the `--verbose` flag is taken into account
    #[must_use]
    pub fn with_verbose(self, verbose: bool) -> Self {
        if verbose { self.max(Self::Info) } else { self }
    }
}

/// Install the process-wide logger for the given level.
///
/// `RUST_LOG` takes precedence over `log_level` when set. Installing a logger twice
/// leaves the first one in place.
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_raises_to_info() {
        assert_eq!(LogLevel::None.with_verbose(true), LogLevel::Info);
        assert_eq!(LogLevel::Warn.with_verbose(true), LogLevel::Info);
    }

    #[test]
    fn test_verbose_keeps_higher_levels() {
        assert_eq!(LogLevel::Debug.with_verbose(true), LogLevel::Debug);
        assert_eq!(LogLevel::Trace.with_verbose(true), LogLevel::Trace);
    }

    #[test]
    fn test_without_verbose_level_is_unchanged() {
        assert_eq!(LogLevel::None.with_verbose(false), LogLevel::None);
        assert_eq!(LogLevel::Error.with_verbose(false), LogLevel::Error);
    }

    #[test]
    fn test_explicit_color_modes() {
        assert!(ColorMode::Always.use_colors());
        assert!(!ColorMode::Never.use_colors());
    }

    #[test]
    fn test_init_logging_none_is_noop() {
        init_logging(LogLevel::None);
    }
}
