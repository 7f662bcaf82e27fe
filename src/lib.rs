//! Spotify Playlist Drafting CLI Library
//!
//! This library logs a user into the Spotify Web API using the OAuth 2.0
//! Authorization Code flow with PKCE, keeps the resulting access token valid for
//! the lifetime of the process, and exposes typed calls for profile data, liked
//! songs and playlist creation. A small CLI layer renders the data and holds
//! draft playlist forms.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the local OAuth callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy shared by all layers
//! - `management` - In-memory session state (token slot, draft playlists)
//! - `server` - Disposable local HTTP server capturing the authorization code
//! - `spotify` - PKCE authenticator and authenticated Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use sporlmix::{config, spotify::auth::Authenticator};
//!
//! #[tokio::main]
//! async fn main() -> sporlmix::Res<()> {
//!     config::load_env().await?;
//!     let authenticator = Authenticator::new(config::AuthConfig::from_env()?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::SpotifyError;

/// A convenient Result type alias for operations that may fail.
///
/// Every layer of the crate reports failures through [`SpotifyError`], which
/// keeps authentication failures distinguishable from API and transport
/// failures all the way up to the CLI.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, SpotifyError>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Waiting for Spotify authorization...");
/// info!("Found {} liked songs", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// # Behavior
///
/// This macro will cause the program to exit immediately after printing
/// the error message. It should only be used for fatal errors where
/// recovery is not possible.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues, e.g. an API call that failed inside the
/// interactive shell without ending the session.
///
/// # Example
///
/// ```
/// warning!("Failed to load liked songs: {}", err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
