use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{Error, Result};

const DEFAULT_FILTER: &str = "custom_snake=info";

/// Installs a file-backed tracing subscriber.
///
/// The terminal owns stdout and stderr while the game runs, so logging is
/// only enabled when a file is given. `RUST_LOG` overrides the default filter.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| Error::Logging(format!("{}: {error}", path.display())))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|error| Error::Logging(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::init;

    #[test]
    fn no_log_file_installs_nothing() {
        assert!(init(None).is_ok());
    }
}
