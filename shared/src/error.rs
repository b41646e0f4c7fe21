//! Error types for the racer client.
//!
//! Nothing here is allowed to take the page down: every failure is returned as
//! a value and the UI layer decides whether to log and carry on.

/// Failures talking to the race API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, DNS).
    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The body could not be decoded into the expected shape.
    #[error("malformed response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl ApiError {
    pub(crate) fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode {
                url: url.to_owned(),
                message: err.to_string(),
            }
        } else {
            Self::Transport {
                url: url.to_owned(),
                message: err.to_string(),
            }
        }
    }
}

/// A DOM id that does not start with a number.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("element id {0:?} is not a numeric identifier")]
pub struct SelectionError(pub String);

/// Reasons a race orchestration stopped before polling to completion.
#[derive(Debug, thiserror::Error)]
pub enum RaceError {
    #[error("select a track and a racer before creating a race")]
    MissingSelection,

    #[error("a race is already in flight")]
    AlreadyRunning,

    #[error("no race has been created yet")]
    NoActiveRace,

    #[error("server race id {0} is below the configured offset")]
    InvalidRaceId(u32),

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid client config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid client config: {0}")]
    Invalid(String),
}
