//! # CLI Module
//!
//! User-facing commands of sporlmix. Each command logs in through the browser,
//! keeps the resulting token in memory for the lifetime of the process and
//! renders what it fetched.
//!
//! ## Commands
//!
//! - [`login`] - Runs the OAuth 2.0 PKCE login and reports token validity
//! - [`profile`] - Shows the user's profile and profile image URL
//! - [`liked_songs`] - Shows the most recently liked songs
//! - [`shell`] - Interactive session: profile, liked songs and draft playlists
//!   without logging in again for every command
//!
//! ## Error Handling
//!
//! One-shot commands exit with an error message when login or the API call
//! fails. Inside the shell an API failure only fails that command; failures
//! that need a new login ask the user to type `login`.
//!
//! ## Usage
//!
//! ```bash
//! sporlmix login
//! sporlmix profile
//! sporlmix liked-songs --limit 50
//! sporlmix shell
//! ```

mod auth;
mod profile;
mod shell;

pub use auth::authenticate;
pub use auth::authenticator;
pub use auth::connect;
pub use auth::login;
pub use profile::liked_songs;
pub use profile::profile;
pub use profile::show_liked_songs;
pub use profile::show_profile;
pub use shell::ShellCommand;
pub use shell::shell;
