use thiserror::Error;

/// Errors produced by the forecast client.
///
/// Transport and decode failures are passed through as-is; the client does not
/// classify status codes or retry.
#[derive(Debug, Error)]
pub enum DarkSkyError {
    /// A construction-time setting is unusable (unsupported default language,
    /// malformed transport option).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Missing credential: {0}")]
    MissingCredential(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode forecast JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    ConfigFile(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_convert_from_serde() {
        let err: DarkSkyError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();

        assert!(matches!(err, DarkSkyError::Decode(_)));
        assert!(err.to_string().starts_with("Failed to decode forecast JSON"));
    }

    #[test]
    fn messages_carry_details() {
        let err = DarkSkyError::InvalidConfiguration("language 'xx'".into());
        assert_eq!(err.to_string(), "Invalid configuration: language 'xx'");
    }
}
