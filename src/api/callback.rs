use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, http::StatusCode, response::Html};
use tokio::sync::{Mutex, oneshot};
use tracing::{debug, warn};

/// Authorization code, or the `error` value Spotify redirected with.
pub type CallbackResult = Result<String, String>;

/// One-shot handoff of the callback outcome to the waiting login flow.
#[derive(Clone)]
pub struct CodeHandoff(Arc<Mutex<Option<oneshot::Sender<CallbackResult>>>>);

impl CodeHandoff {
    pub fn new(tx: oneshot::Sender<CallbackResult>) -> Self {
        Self(Arc::new(Mutex::new(Some(tx))))
    }

    /// Returns `false` if an outcome was already delivered or nobody waits anymore.
    pub async fn deliver(&self, result: CallbackResult) -> bool {
        let Some(tx) = self.0.lock().await.take() else {
            return false;
        };
        tx.send(result).is_ok()
    }
}

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(handoff): Extension<CodeHandoff>,
) -> (StatusCode, Html<&'static str>) {
    if let Some(code) = params.get("code") {
        if handoff.deliver(Ok(code.clone())).await {
            debug!("authorization code received");
            (
                StatusCode::OK,
                Html("<h2>Authentication successful.</h2><p>You can close this window now.</p>"),
            )
        } else {
            (
                StatusCode::CONFLICT,
                Html("<h4>Authorization code already received.</h4>"),
            )
        }
    } else if let Some(error) = params.get("error") {
        warn!(%error, "authorization denied");
        handoff.deliver(Err(error.clone())).await;
        (StatusCode::BAD_REQUEST, Html("<h4>Login failed.</h4>"))
    } else {
        (
            StatusCode::BAD_REQUEST,
            Html("<h4>Missing authorization code.</h4>"),
        )
    }
}
