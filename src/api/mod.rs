//! # API Module
//!
//! HTTP handlers for the disposable local server started during login.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives Spotify's redirect (`/callback?code=...` or
//!   `/callback?error=...`) and hands the outcome to the waiting login flow
//!   through a [`CodeHandoff`]. Only the first outcome is delivered; later
//!   requests are answered with `409 Conflict`.
//! - [`health`] - Returns application status and version.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use sporlmix::api::{CodeHandoff, callback, health};
//!
//! let (tx, rx) = tokio::sync::oneshot::channel();
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health))
//!     .layer(Extension(CodeHandoff::new(tx)));
//! ```

mod callback;
mod health;

pub use callback::{CallbackResult, CodeHandoff, callback};
pub use health::health;
