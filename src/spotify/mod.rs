//! # Spotify Integration Module
//!
//! This module is the integration layer between sporlmix and the Spotify
//! accounts service and Web API.
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer (login, profile, liked songs, shell)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     └── Authenticated Client (token lifecycle, retry)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Accounts Service / Web API
//! ```
//!
//! ## Core Modules
//!
//! ### Authentication Module
//!
//! [`auth`] - OAuth 2.0 Authorization Code flow with PKCE:
//! - **Login Flow Context**: [`auth::LoginFlow`] keeps the verifier for one attempt
//! - **Authorization URL**: [`auth::build_authorization_url`] is a pure function
//! - **Token Exchange**: authorization code + verifier → [`crate::types::TokenData`]
//! - **Token Refresh**: keeps the previous refresh token when Spotify does not rotate it
//! - **Local Callback**: [`auth::login`] drives browser, callback server and exchange
//!
//! ### Client Module
//!
//! [`client`] - [`client::SpotifyClient`] wraps every Web API call:
//! - **Expiry Check**: refreshes before sending when the token has expired
//! - **401 Handling**: refresh and resend, three attempts in total
//! - **Transport Retry**: exponential backoff for connect and timeout failures
//! - **Typed Calls**: profile, profile image, liked songs, playlist creation
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Code exchange and refresh
//! - `GET /me` - Current user's profile
//! - `GET /me/tracks` - Current user's saved tracks (first page only)
//! - `POST /users/{user_id}/playlists` - Create a playlist
//!
//! ## Error Types
//!
//! All functions return [`crate::Res`]; see [`crate::error::SpotifyError`] for
//! which failures end the session and which only fail the current call.
//!
//! ## Thread Safety
//!
//! The token lives in a [`crate::management::TokenStore`] behind a tokio mutex.
//! Expiry checks and refreshes run while holding it, so concurrent requests
//! share a single refresh.

pub mod auth;
pub mod client;
