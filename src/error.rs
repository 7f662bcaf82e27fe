//! Error types for authentication and Spotify API access.

use std::time::Duration;

use reqwest::Method;

/// Everything that can go wrong while logging in or talking to Spotify.
#[derive(Debug, thiserror::Error)]
pub enum SpotifyError {
    /// The authorization code could not be exchanged. The login attempt is
    /// over and the user has to start a new one.
    #[error("Authorization code exchange failed: {0}")]
    AuthExchange(String),

    /// The refresh token was rejected or the response was unusable. The
    /// session falls back to a full login.
    #[error("Token refresh failed: {0}")]
    AuthRefresh(String),

    /// Network level failure.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(Method),

    /// Spotify answered with a non-success status.
    #[error("Spotify API error {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body was not the JSON we expected.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("No authorization callback received within {0:?}")]
    CallbackTimeout(Duration),

    #[error("Authorization callback failed: {0}")]
    Callback(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SpotifyError {
    /// Whether the only way forward is a fresh login.
    pub fn requires_login(&self) -> bool {
        match self {
            SpotifyError::AuthExchange(_)
            | SpotifyError::AuthRefresh(_)
            | SpotifyError::CallbackTimeout(_)
            | SpotifyError::Callback(_) => true,
            SpotifyError::Api { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// Connect and timeout failures are worth another attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            SpotifyError::Transport(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}
