use std::{sync::Arc, time::Duration};

use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::{sync::Mutex, time::sleep};
use tracing::{debug, warn};

use crate::{
    Res, SpotifyError, config,
    management::TokenStore,
    types::{CreatePlaylistRequest, CreatePlaylistResponse, SavedTracksPage, TokenData, User},
};

/// Total attempts for one request when Spotify keeps answering 401.
pub const MAX_AUTH_ATTEMPTS: u32 = 3;
/// Total attempts for one request when the connection fails, or when a GET times out.
pub const MAX_TRANSPORT_ATTEMPTS: u32 = 3;
pub const TRANSPORT_BACKOFF: Duration = Duration::from_millis(250);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Authenticated client for the Spotify Web API.
///
/// Callers never see the token lifecycle: every request starts from a valid
/// access token taken from the shared [`TokenStore`], and a 401 triggers a
/// refresh followed by a retry.
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    tokens: Arc<TokenStore>,
    user: Mutex<Option<User>>,
}

impl SpotifyClient {
    pub fn new(tokens: Arc<TokenStore>) -> Self {
        Self::with_base_url(tokens, config::spotify_apiurl())
    }

    pub fn with_base_url(tokens: Arc<TokenStore>, api_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), tokens, api_url)
    }

    pub fn with_client(http: Client, tokens: Arc<TokenStore>, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            tokens,
            user: Mutex::new(None),
        }
    }

    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    /// Starts over with `token` after a new login and forgets the cached profile,
    /// which may belong to a different account.
    pub async fn reset_session(&self, token: TokenData) {
        self.tokens.replace(token).await;
        *self.user.lock().await = None;
    }

    /// Refreshes the held token if it has expired.
    ///
    /// Never contacts the token endpoint while the token is still valid. The
    /// refreshed token replaces the one in the shared store, so every other
    /// holder of the store sees it as well.
    ///
    /// # Errors
    ///
    /// [`SpotifyError::AuthRefresh`] when the refresh is rejected; the session
    /// needs a new login.
    pub async fn ensure_token_valid(&self) -> Res<()> {
        self.tokens.get_valid_token().await.map(|_| ())
    }

    /// Sends an authorized request and returns the decoded JSON body.
    ///
    /// # Arguments
    ///
    /// * `method` - `GET` or `POST`; anything else is rejected
    /// * `url` - Absolute URL of the endpoint
    /// * `payload` - JSON body for `POST`
    /// * `timeout` - Per-attempt timeout
    ///
    /// # Retry Logic
    ///
    /// - **401 Unauthorized**: refresh the token and resend, at most
    ///   [`MAX_AUTH_ATTEMPTS`] attempts in total. The final 401 is returned as
    ///   [`SpotifyError::Api`].
    /// - **Connect failures and GET timeouts**: resend with exponential backoff
    ///   starting at [`TRANSPORT_BACKOFF`], at most [`MAX_TRANSPORT_ATTEMPTS`]
    ///   attempts. A POST that timed out is never resent since Spotify may
    ///   already have applied it.
    ///
    /// # Errors
    ///
    /// - [`SpotifyError::UnsupportedMethod`] for methods other than GET and POST
    /// - [`SpotifyError::Api`] for any non-2xx status
    /// - [`SpotifyError::Decode`] when a 2xx body is not JSON
    /// - [`SpotifyError::Transport`] when the request cannot be sent
    /// - [`SpotifyError::AuthRefresh`] when a needed refresh fails
    ///
    /// An empty 2xx body decodes to `Value::Null`.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        payload: Option<&Value>,
        timeout: Duration,
    ) -> Res<Value> {
        if method != Method::GET && method != Method::POST {
            return Err(SpotifyError::UnsupportedMethod(method));
        }

        let mut access_token = self.tokens.get_valid_token().await?;
        let mut attempt = 1;

        loop {
            let response = self
                .send(&method, url, payload, timeout, &access_token)
                .await?;

            if response.status() == StatusCode::UNAUTHORIZED && attempt < MAX_AUTH_ATTEMPTS {
                debug!(attempt, %url, "access token rejected, refreshing");
                access_token = self.tokens.refresh_rejected(&access_token).await?;
                attempt += 1;
                continue;
            }

            return decode(response).await;
        }
    }

    async fn send(
        &self,
        method: &Method,
        url: &str,
        payload: Option<&Value>,
        timeout: Duration,
        access_token: &str,
    ) -> Res<Response> {
        let mut attempt = 1;

        loop {
            let mut req = self
                .http
                .request(method.clone(), url)
                .bearer_auth(access_token)
                .timeout(timeout);
            if let Some(payload) = payload {
                req = req.json(payload);
            }

            match req.send().await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    let retry = e.is_connect() || (e.is_timeout() && *method == Method::GET);
                    let err = SpotifyError::from(e);
                    if !retry || attempt >= MAX_TRANSPORT_ATTEMPTS {
                        return Err(err);
                    }
                    let delay = TRANSPORT_BACKOFF * 2u32.pow(attempt - 1);
                    warn!(attempt, %url, ?delay, error = %err, "request failed, retrying");
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    /// Fetches the current user's profile (`GET /me`) and caches it.
    pub async fn get_user(&self) -> Res<User> {
        let url = self.endpoint("/me");
        let value = self.request(Method::GET, &url, None, DEFAULT_TIMEOUT).await?;
        let user: User = parse(value)?;

        *self.user.lock().await = Some(user.clone());
        Ok(user)
    }

    async fn current_user(&self) -> Res<User> {
        let cached = self.user.lock().await.clone();
        match cached {
            Some(user) => Ok(user),
            None => self.get_user().await,
        }
    }

    /// URL of the user's first profile image, the largest one Spotify returns.
    ///
    /// Uses the cached profile when there is one. `None` if the user has no images.
    pub async fn get_profile_image_url(&self) -> Res<Option<String>> {
        let user = self.current_user().await?;
        Ok(user.images.first().map(|image| image.url.clone()))
    }

    /// Returns one page of the user's saved tracks (`GET /me/tracks?limit=N`).
    pub async fn get_liked_songs(&self, limit: u32) -> Res<SavedTracksPage> {
        let url = self.endpoint(&format!("/me/tracks?limit={limit}"));
        let value = self.request(Method::GET, &url, None, DEFAULT_TIMEOUT).await?;
        parse(value)
    }

    /// Creates a playlist owned by the current user.
    ///
    /// Resolves the user ID through [`SpotifyClient::get_user`] the first time
    /// and reuses the cached profile afterwards.
    pub async fn create_playlist(
        &self,
        name: &str,
        description: &str,
        public: bool,
    ) -> Res<CreatePlaylistResponse> {
        let user = self.current_user().await?;

        let body = serde_json::to_value(CreatePlaylistRequest {
            name: name.to_string(),
            description: description.to_string(),
            public,
        })
        .map_err(|e| SpotifyError::Decode(e.to_string()))?;

        let url = self.endpoint(&format!("/users/{}/playlists", user.id));
        let value = self
            .request(Method::POST, &url, Some(&body), DEFAULT_TIMEOUT)
            .await?;
        parse(value)
    }
}

async fn decode(response: Response) -> Res<Value> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(SpotifyError::Api {
            status: status.as_u16(),
            body,
        });
    }

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(|e| SpotifyError::Decode(e.to_string()))
}

fn parse<T: DeserializeOwned>(value: Value) -> Res<T> {
    serde_json::from_value(value).map_err(|e| SpotifyError::Decode(e.to_string()))
}
