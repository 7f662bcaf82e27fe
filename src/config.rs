//! Configuration management for the sporlmix CLI.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Only the Spotify client ID has to be provided; the
//! endpoints, redirect URI and scopes are fixed for the deployment and fall back to
//! the constants below unless overridden.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf, time::Duration};

use crate::{Res, SpotifyError};

pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8080/callback";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_SCOPE: &str = "user-read-private user-read-email user-library-read \
playlist-read-private playlist-read-collaborative playlist-modify-private playlist-modify-public";
pub const DEFAULT_CALLBACK_TIMEOUT_SECS: u64 = 120;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the `sporlmix` data directory if it doesn't exist and loads
/// environment variables from `sporlmix/.env` inside it. A missing `.env` file is
/// not an error; the variables may just as well come from the process environment.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/sporlmix/.env`
/// - macOS: `~/Library/Application Support/sporlmix/.env`
/// - Windows: `%LOCALAPPDATA%/sporlmix/.env`
///
/// # Errors
///
/// Returns an error if the data directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Res<()> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path)
            .map_err(|e| SpotifyError::Config(format!("{}: {}", path.display(), e)))?;
    }
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporlmix/.env");
    path
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Returns the Spotify application client ID.
///
/// Reads `SPOTIFY_CLIENT_ID`. This is the only setting without a default.
///
/// # Errors
///
/// Returns [`SpotifyError::Config`] when the variable is unset or empty.
pub fn spotify_client_id() -> Res<String> {
    env::var("SPOTIFY_CLIENT_ID")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| SpotifyError::Config("SPOTIFY_CLIENT_ID must be set".to_string()))
}

/// Returns the address the local callback server binds to (`SERVER_ADDRESS`).
///
/// # Example
///
/// ```
/// let addr = server_addr(); // e.g., "127.0.0.1:8080"
/// ```
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the OAuth redirect URI (`SPOTIFY_REDIRECT_URI`).
///
/// Must match a redirect URI registered in the Spotify application settings
/// and point at [`server_addr`].
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

/// Returns the space-delimited scopes requested at login (`SPOTIFY_SCOPE`).
pub fn spotify_scope() -> String {
    var_or("SPOTIFY_SCOPE", DEFAULT_SCOPE)
}

/// Returns the authorization endpoint (`SPOTIFY_API_AUTH_URL`).
pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Returns the token endpoint used for code exchange and refresh (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Returns the Web API base URL (`SPOTIFY_API_URL`).
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

/// Returns how long to wait for the browser redirect (`SPORLMIX_CALLBACK_TIMEOUT_SECS`).
///
/// Unparseable values fall back to the default of two minutes.
pub fn callback_timeout() -> Duration {
    let secs = env::var("SPORLMIX_CALLBACK_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_CALLBACK_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Everything the authenticator needs to talk to the accounts service.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub client_id: String,
    pub redirect_uri: String,
    pub scopes: String,
    pub auth_url: String,
    pub token_url: String,
}

impl AuthConfig {
    /// Builds a configuration for `client_id` with the deployment defaults.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            scopes: DEFAULT_SCOPE.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }

    /// Builds a configuration from the environment.
    ///
    /// # Errors
    ///
    /// Fails when `SPOTIFY_CLIENT_ID` is missing.
    pub fn from_env() -> Res<Self> {
        Ok(Self {
            client_id: spotify_client_id()?,
            redirect_uri: spotify_redirect_uri(),
            scopes: spotify_scope(),
            auth_url: spotify_apiauth_url(),
            token_url: spotify_apitoken_url(),
        })
    }

    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = redirect_uri.into();
        self
    }
}
