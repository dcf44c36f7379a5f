//! Provides configuration of a logger.
use env_logger::Builder;
use log::LevelFilter;
use log::trace;
use std::io::Write;

/// Configures the log with the specified verbosity.
///
/// Higher verbosity results in additional log messages
/// up to a maximum verbosity level.
pub fn configure(verbosity: u8) -> Result<(), String> {
    let log_level = level_for(verbosity)?;

    // A second configure in the same process keeps the first logger.
    let _ = Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .filter_level(log_level)
        .try_init();

    trace!("Logger verbosity {log_level}");
    Ok(())
}

fn level_for(verbosity: u8) -> Result<LevelFilter, String> {
    match verbosity {
        0 => Ok(LevelFilter::Error),
        1 => Ok(LevelFilter::Warn),
        2 => Ok(LevelFilter::Info),
        3 => Ok(LevelFilter::Debug),
        4 => Ok(LevelFilter::Trace),
        _ => Err(String::from("Don't be crazy with verbose")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configure_when_verbosity_is_5_then_return_err() {
        let result = configure(5);

        assert!(result.is_err());
    }

    #[test]
    fn level_for_maps_counts() {
        assert_eq!(level_for(0), Ok(LevelFilter::Error));
        assert_eq!(level_for(2), Ok(LevelFilter::Info));
        assert_eq!(level_for(4), Ok(LevelFilter::Trace));
    }
}
