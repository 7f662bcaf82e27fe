use std::{net::SocketAddr, time::Duration};

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::{
    Res, SpotifyError,
    config::AuthConfig,
    server::CallbackServer,
    types::{PkceChallenge, TokenData, TokenResponse},
    utils, warning,
};

impl PkceChallenge {
    /// Generates a fresh verifier and its S256 challenge.
    pub fn generate() -> Self {
        let verifier = utils::generate_code_verifier();
        let challenge = utils::generate_code_challenge(&verifier);
        Self {
            verifier,
            challenge,
        }
    }
}

/// Builds the URL the user has to open to grant access.
///
/// Pure string construction: the same inputs always produce the same URL. All
/// values are percent-encoded, `scopes` is the space-delimited scope list.
///
/// # Arguments
///
/// * `auth_url` - Authorization endpoint, e.g. `https://accounts.spotify.com/authorize`
/// * `client_id` - Client ID of the registered Spotify application
/// * `redirect_uri` - Where Spotify sends the user back with `?code=...`
/// * `scopes` - Space-delimited capabilities requested
/// * `challenge` - PKCE S256 code challenge
///
/// # Example
///
/// ```
/// let url = build_authorization_url(
///     "https://accounts.spotify.com/authorize",
///     "abc123",
///     "http://127.0.0.1:8080/callback",
///     "user-read-private user-library-read",
///     &challenge,
/// );
/// ```
pub fn build_authorization_url(
    auth_url: &str,
    client_id: &str,
    redirect_uri: &str,
    scopes: &str,
    challenge: &str,
) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("client_id", client_id)
        .append_pair("response_type", "code")
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("code_challenge", challenge)
        .append_pair("code_challenge_method", "S256")
        .append_pair("scope", scopes)
        .finish();

    // form encoding turns spaces into '+', the authorize endpoint expects %20
    let query = query.replace('+', "%20");
    match Url::parse(auth_url) {
        Ok(mut url) => {
            url.set_query(Some(&query));
            url.to_string()
        }
        Err(_) => format!("{auth_url}?{query}"),
    }
}

/// Talks to the Spotify accounts service.
///
/// The authenticator is stateless apart from its configuration and HTTP
/// client, so it is cheap to clone. Per-attempt state (the PKCE verifier) lives
/// in a [`LoginFlow`]; the current token lives with whoever owns the session.
#[derive(Debug, Clone)]
pub struct Authenticator {
    http: Client,
    config: AuthConfig,
}

impl Authenticator {
    pub fn new(config: AuthConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: AuthConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Authorization URL for this configuration and the given challenge.
    pub fn authorization_url(&self, challenge: &str) -> String {
        build_authorization_url(
            &self.config.auth_url,
            &self.config.client_id,
            &self.config.redirect_uri,
            &self.config.scopes,
            challenge,
        )
    }

    /// Exchanges an authorization code for an access token using PKCE.
    ///
    /// Sends a form-encoded `grant_type=authorization_code` request together
    /// with the redirect URI, the client ID and the code verifier matching the
    /// challenge that was part of the authorization URL.
    ///
    /// # Arguments
    ///
    /// * `code` - Authorization code received by the callback
    /// * `verifier` - PKCE code verifier generated for this login attempt
    ///
    /// # Token Contents
    ///
    /// - `refresh_token` is `None` when Spotify does not return one
    /// - `expires_at` is now plus `expires_in`, or one hour when the field is missing
    ///
    /// # Errors
    ///
    /// - [`SpotifyError::AuthExchange`] for a non-2xx status or a body without `access_token`
    /// - [`SpotifyError::Transport`] when the request cannot be sent
    ///
    /// Authorization codes are single-use, so a failed exchange is never retried.
    pub async fn exchange_code_for_token(&self, code: &str, verifier: &str) -> Res<TokenData> {
        let res = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("client_id", self.config.client_id.as_str()),
                ("code_verifier", verifier),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(SpotifyError::AuthExchange(format!("{status}: {body}")));
        }

        let token = token_from_body(&body, None).map_err(SpotifyError::AuthExchange)?;
        debug!(expires_at = %token.expires_at, "authorization code exchanged");
        Ok(token)
    }

    /// Refreshes an expired access token using a refresh token.
    ///
    /// Sends a form-encoded `grant_type=refresh_token` request. Spotify may or
    /// may not rotate the refresh token; when the response omits it, the token
    /// passed in is kept.
    ///
    /// # Arguments
    ///
    /// * `refresh_token` - Refresh token from the previous exchange or refresh
    ///
    /// # Errors
    ///
    /// - [`SpotifyError::AuthRefresh`] for a non-2xx status or a malformed body
    /// - [`SpotifyError::Transport`] when the request cannot be sent
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Res<TokenData> {
        let res = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", self.config.client_id.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        if !status.is_success() {
            return Err(SpotifyError::AuthRefresh(format!("{status}: {body}")));
        }

        let token =
            token_from_body(&body, Some(refresh_token)).map_err(SpotifyError::AuthRefresh)?;
        debug!(
            expires_at = %token.expires_at,
            rotated = token.refresh_token.as_deref() != Some(refresh_token),
            "access token refreshed"
        );
        Ok(token)
    }
}

fn token_from_body(body: &str, previous_refresh: Option<&str>) -> Result<TokenData, String> {
    let parsed: TokenResponse =
        serde_json::from_str(body).map_err(|e| format!("malformed token response: {e}"))?;

    let access_token = parsed
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| "token response lacks access_token".to_string())?;

    let refresh_token = parsed
        .refresh_token
        .filter(|t| !t.is_empty())
        .or_else(|| previous_refresh.map(str::to_string));

    Ok(TokenData {
        access_token,
        refresh_token,
        expires_at: utils::expires_at_from(parsed.expires_in, Utc::now()),
        scope: parsed.scope,
    })
}

/// Where a single login attempt currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Idle,
    AwaitingCode,
    Exchanging,
    Authenticated,
}

/// Session-scoped context for one PKCE login attempt.
///
/// Holds the verifier between issuing the challenge and exchanging the code,
/// so nothing about the attempt lives in process-wide state.
#[derive(Debug)]
pub struct LoginFlow {
    authenticator: Authenticator,
    state: LoginState,
    pkce: Option<PkceChallenge>,
}

impl LoginFlow {
    pub fn new(authenticator: Authenticator) -> Self {
        Self {
            authenticator,
            state: LoginState::Idle,
            pkce: None,
        }
    }

    pub fn state(&self) -> LoginState {
        self.state
    }

    pub fn verifier(&self) -> Option<&str> {
        self.pkce.as_ref().map(|p| p.verifier.as_str())
    }

    /// Starts a new attempt: generates a verifier, keeps it, returns the challenge.
    ///
    /// Calling it again discards the previous attempt.
    pub fn generate_pkce(&mut self) -> String {
        let pkce = PkceChallenge::generate();
        let challenge = pkce.challenge.clone();
        self.pkce = Some(pkce);
        self.state = LoginState::AwaitingCode;
        challenge
    }

    /// Starts a new attempt and returns the authorization URL for it.
    pub fn begin(&mut self) -> String {
        let challenge = self.generate_pkce();
        self.authenticator.authorization_url(&challenge)
    }

    /// Exchanges the code received for the current attempt.
    ///
    /// On failure the flow is back in [`LoginState::Idle`] and a new attempt
    /// has to be started.
    pub async fn complete(&mut self, code: &str) -> Res<TokenData> {
        let pkce = match (self.state, self.pkce.take()) {
            (LoginState::AwaitingCode, Some(pkce)) => pkce,
            (state, _) => {
                self.state = LoginState::Idle;
                return Err(SpotifyError::AuthExchange(format!(
                    "no login attempt awaiting a code (state: {state:?})"
                )));
            }
        };

        self.state = LoginState::Exchanging;
        match self
            .authenticator
            .exchange_code_for_token(code, &pkce.verifier)
            .await
        {
            Ok(token) => {
                self.state = LoginState::Authenticated;
                Ok(token)
            }
            Err(e) => {
                self.state = LoginState::Idle;
                Err(e)
            }
        }
    }

    pub fn abort(&mut self) {
        self.pkce = None;
        self.state = LoginState::Idle;
    }
}

/// Runs the complete OAuth 2.0 PKCE login against Spotify.
///
/// # Authentication Flow
///
/// 1. **Callback Listener**: Binds the disposable callback server on `server_addr`
/// 2. **PKCE Setup**: Starts a [`LoginFlow`], which generates the verifier and challenge
/// 3. **Browser Launch**: Opens the authorization URL in the default browser
/// 4. **Callback Handling**: Waits up to `timeout` for the redirect carrying the code
/// 5. **Token Exchange**: Exchanges the code and verifier for a [`TokenData`]
///
/// # Error Handling
///
/// - Browser launch failures print the URL for manual navigation
/// - No redirect within `timeout` fails with [`SpotifyError::CallbackTimeout`]
/// - A redirect carrying `error=...` fails with [`SpotifyError::Callback`]
/// - Exchange failures are returned as is; the user has to start over
pub async fn login(
    authenticator: &Authenticator,
    server_addr: SocketAddr,
    timeout: Duration,
) -> Res<TokenData> {
    let listener = CallbackServer::start(server_addr).await?;

    let mut flow = LoginFlow::new(authenticator.clone());
    let auth_url = flow.begin();

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Waiting for Spotify authorization...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let code = listener.wait_for_code(timeout).await;
    spinner.finish_and_clear();

    let code = match code {
        Ok(code) => code,
        Err(e) => {
            flow.abort();
            return Err(e);
        }
    };

    flow.complete(&code).await
}
