use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Spotify credentials are non-empty when the section is present
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Spotify validation
    if let Some(spotify) = &config.spotify {
        if spotify.client_id.is_empty() {
            return Err(ConfigError::ValidationError(
                "spotify.client_id cannot be empty".to_string(),
            ));
        }
        if spotify.client_secret.is_empty() {
            return Err(ConfigError::ValidationError(
                "spotify.client_secret cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
