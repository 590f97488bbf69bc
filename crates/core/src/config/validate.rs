use std::collections::HashSet;

use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Remote ids are non-empty and unique
/// - Downloader concurrency and timeout are non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for remote in &config.remotes {
        if remote.id.is_empty() {
            return Err(ConfigError::ValidationError(
                "remote id cannot be empty".to_string(),
            ));
        }
        if !seen.insert(remote.id.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "duplicate remote id: {}",
                remote.id
            )));
        }
    }

    if config.downloader.max_concurrent == 0 {
        return Err(ConfigError::ValidationError(
            "downloader.max_concurrent cannot be 0".to_string(),
        ));
    }
    if config.downloader.task_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "downloader.task_timeout_secs cannot be 0".to_string(),
        ));
    }

    Ok(())
}
