//! Client configuration.
//!
//! Every field has a default matching the stock race server, so an empty JSON
//! object (or no config at all) gives the classic behaviour: countdown from 3,
//! poll every 500 ms forever, race id offset of 1.

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_API_BASE: &str = "http://localhost:3001";

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the race API, without a trailing slash.
    pub api_base: String,
    /// First number shown by the countdown.
    pub countdown_from: u32,
    /// Pause before the countdown starts ticking.
    pub countdown_delay_ms: u64,
    pub countdown_tick_ms: u64,
    pub poll_interval_ms: u64,
    /// Give up polling after this many ticks. `None` polls until the race ends.
    pub max_poll_attempts: Option<u32>,
    /// The active race id is kept as `server id - race_id_offset`.
    pub race_id_offset: u32,
    /// When set, the final leaderboard is shown once exactly this many racers
    /// have a final position. When unset, once every racer has one.
    pub field_size: Option<usize>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            countdown_from: 3,
            countdown_delay_ms: 1000,
            countdown_tick_ms: 1000,
            poll_interval_ms: 500,
            max_poll_attempts: None,
            race_id_offset: 1,
            field_size: None,
        }
    }
}

impl ClientConfig {
    /// Parse a JSON config document. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.api_base = config.api_base.trim_end_matches('/').to_owned();
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base.is_empty() {
            return Err(ConfigError::Invalid("api_base must not be empty".to_owned()));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("poll_interval_ms must be positive".to_owned()));
        }
        if self.max_poll_attempts == Some(0) {
            return Err(ConfigError::Invalid("max_poll_attempts must be positive; omit it to poll until finished".to_owned()));
        }
        if self.field_size == Some(0) {
            return Err(ConfigError::Invalid("field_size must be positive".to_owned()));
        }
        Ok(())
    }

    pub fn countdown_delay(&self) -> Duration {
        Duration::from_millis(self.countdown_delay_ms)
    }

    pub fn countdown_tick(&self) -> Duration {
        Duration::from_millis(self.countdown_tick_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        assert_eq!(ClientConfig::from_json("{}").unwrap(), ClientConfig::default());
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = ClientConfig::from_json(
            r#"{ "api_base": "https://race.example.com/", "max_poll_attempts": 120, "field_size": 5 }"#,
        )
        .unwrap();
        assert_eq!(config.api_base, "https://race.example.com");
        assert_eq!(config.max_poll_attempts, Some(120));
        assert_eq!(config.field_size, Some(5));
        assert_eq!(config.poll_interval(), Duration::from_millis(500));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(ClientConfig::from_json(r#"{ "poll_interval_ms": 0 }"#).is_err());
        assert!(ClientConfig::from_json(r#"{ "api_base": "" }"#).is_err());
        assert!(ClientConfig::from_json(r#"{ "field_size": 0 }"#).is_err());
        assert!(matches!(
            ClientConfig::from_json(r#"{ "max_poll_attempts": 0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(ClientConfig::from_json(r#"{ "max_poll_attempts": null }"#).is_ok());
        assert!(ClientConfig::from_json(r#"{ "pol_interval_ms": 10 }"#).is_err());
    }
}
