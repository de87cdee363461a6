//! Tracing subscriber setup for hosts embedding the block engine

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LogConfig;
use crate::error::{Error, Result};

/// Parse a filter directive such as `"warn,blockdoc_core=debug"`.
pub fn directive_filter(directive: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| Error::Config(format!("invalid log filter `{directive}`: {e}")))
}

/// Install a global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `config.filter` applies. Fails if a
/// subscriber is already installed.
pub fn init(
    config: &LogConfig,
) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter_layer = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => directive_filter(&config.filter)?,
    };

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .compact();

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, warn};

    #[test]
    fn default_filter_parses() {
        assert!(directive_filter(&LogConfig::default().filter).is_ok());
    }

    #[test]
    fn bad_level_is_a_config_error() {
        let err = directive_filter("blockdoc_core=loud").unwrap_err();
        assert!(matches!(err, Error::Config(message) if message.contains("blockdoc_core=loud")));
    }

    #[test]
    fn init_installs_once() {
        let config = LogConfig::default();
        let _ = init(&config);
        assert!(init(&config).is_err());

        debug!(feature = "paragraph", "debug event");
        warn!(block_id = "abc", "warning event");
    }
}
