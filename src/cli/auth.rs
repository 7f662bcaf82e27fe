use std::{net::SocketAddr, str::FromStr, sync::Arc};

use chrono::Local;

use crate::{
    Res, config, error, info,
    management::TokenStore,
    spotify::{self, auth::Authenticator, client::SpotifyClient},
    success,
    types::TokenData,
};

/// Builds the authenticator from the environment or exits.
pub fn authenticator() -> Authenticator {
    match config::AuthConfig::from_env() {
        Ok(config) => Authenticator::new(config),
        Err(e) => error!("{}", e),
    }
}

/// Runs one browser login and returns the token it produced.
pub async fn authenticate(authenticator: &Authenticator) -> Res<TokenData> {
    let addr = match SocketAddr::from_str(&config::server_addr()) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    info!("Opening Spotify authorization in your browser...");
    spotify::auth::login(authenticator, addr, config::callback_timeout()).await
}

/// Logs in and hands back a client bound to a fresh in-memory session.
///
/// Exits the program when the login fails, there is nothing to show without it.
pub async fn connect() -> SpotifyClient {
    let authenticator = authenticator();
    let token = match authenticate(&authenticator).await {
        Ok(token) => token,
        Err(e) => error!("Authentication failed: {}", e),
    };

    success!("Authentication successful!");
    let store = Arc::new(TokenStore::new(authenticator, token));
    SpotifyClient::new(store)
}

pub async fn login() {
    let client = connect().await;
    let token = client.tokens().current_token().await;

    info!(
        "Access token valid until {}",
        token
            .expires_at
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
    );
    if token.refresh_token.is_none() {
        info!("Spotify did not issue a refresh token, the session ends when the access token expires.");
    }
    info!("Tokens are kept in memory only. Use `sporlmix shell` to keep a session open.");
}
