//! Logger setup for the binary.
//!
//! The library only emits `log` records; nothing is printed unless a
//! logger is installed here.

use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle, opt_format};

/// Log to stderr at `level` unless `RUST_LOG` says otherwise.
///
/// Keep the returned handle alive for as long as logging is needed.
pub fn init(level: &str) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_env_or_str(level)?
        .log_to_stderr()
        .format(opt_format)
        .start()
}
