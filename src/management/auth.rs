use tokio::sync::Mutex;
use tracing::debug;

use crate::{Res, SpotifyError, spotify::auth::Authenticator, types::TokenData};

/// The session's single token slot.
///
/// Every read and every refresh goes through one async mutex, so concurrent
/// callers never refresh the same token twice.
pub struct TokenStore {
    authenticator: Authenticator,
    token: Mutex<TokenData>,
}

impl TokenStore {
    pub fn new(authenticator: Authenticator, token: TokenData) -> Self {
        TokenStore {
            authenticator,
            token: Mutex::new(token),
        }
    }

    pub async fn current_token(&self) -> TokenData {
        self.token.lock().await.clone()
    }

    /// Replaces the held token, e.g. after a fresh login.
    pub async fn replace(&self, token: TokenData) {
        *self.token.lock().await = token;
    }

    /// Returns an access token that is not expired, refreshing first if needed.
    pub async fn get_valid_token(&self) -> Res<String> {
        let mut token = self.token.lock().await;
        if token.is_expired() {
            debug!(expired_at = %token.expires_at, "access token expired, refreshing");
            let fresh = self.refresh(&token).await?;
            *token = fresh;
        }

        Ok(token.access_token.clone())
    }

    /// Refreshes after the provider rejected `rejected`.
    ///
    /// When the held token already differs from `rejected` another caller
    /// refreshed in the meantime and that token is returned as is.
    pub async fn refresh_rejected(&self, rejected: &str) -> Res<String> {
        let mut token = self.token.lock().await;
        if token.access_token != rejected {
            return Ok(token.access_token.clone());
        }

        let fresh = self.refresh(&token).await?;
        *token = fresh;
        Ok(token.access_token.clone())
    }

    async fn refresh(&self, current: &TokenData) -> Res<TokenData> {
        let Some(refresh_token) = current.refresh_token.as_deref() else {
            return Err(SpotifyError::AuthRefresh(
                "no refresh token available, please log in again".to_string(),
            ));
        };
        self.authenticator.refresh_access_token(refresh_token).await
    }
}
