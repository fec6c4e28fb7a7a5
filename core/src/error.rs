use thiserror::Error;

use crate::config::Direction;

/// Errors from the construction side of a handoff.
///
/// Reading a handoff never fails: every decode path collapses to `None`.
/// These variants only surface when building URLs or loading configuration.
#[derive(Error, Debug)]
pub enum HandoffError {
    #[error("Unknown {direction} route: {route}")]
    UnknownRoute { direction: Direction, route: String },

    #[error("Failed to encode handoff state: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid configuration: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl HandoffError {
    /// Create an Unknown Route error
    pub fn unknown_route(direction: Direction, route: impl Into<String>) -> Self {
        Self::UnknownRoute {
            direction,
            route: route.into(),
        }
    }

    /// Create a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

// Convert to String for CLI error reporting
impl From<HandoffError> for String {
    fn from(err: HandoffError) -> Self {
        err.to_string()
    }
}
