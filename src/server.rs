use std::{net::SocketAddr, time::Duration};

use axum::{Extension, Router, routing::get};
use tokio::{net::TcpListener, sync::oneshot};
use tracing::{debug, warn};

use crate::{
    Res, SpotifyError,
    api::{self, CallbackResult, CodeHandoff},
};

/// Disposable local server that captures exactly one authorization code.
///
/// The server stops as soon as [`CallbackServer::wait_for_code`] returns, or
/// when the value is dropped.
pub struct CallbackServer {
    addr: SocketAddr,
    code_rx: oneshot::Receiver<CallbackResult>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl CallbackServer {
    /// Binds `addr` and starts serving `/callback` and `/health` in the background.
    ///
    /// Port `0` picks a free port; see [`CallbackServer::local_addr`].
    pub async fn start(addr: SocketAddr) -> Res<Self> {
        let (code_tx, code_rx) = oneshot::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let app = Router::new()
            .route("/health", get(api::health))
            .route("/callback", get(api::callback))
            .layer(Extension(CodeHandoff::new(code_tx)));

        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        debug!(%addr, "callback server listening");

        tokio::spawn(async move {
            let shutdown = async move {
                let _ = shutdown_rx.await;
            };
            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(shutdown)
                .await
            {
                warn!(error = %e, "callback server stopped with an error");
            }
        });

        Ok(Self {
            addr,
            code_rx,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Waits for the redirect carrying the authorization code, then shuts down.
    ///
    /// # Errors
    ///
    /// - [`SpotifyError::CallbackTimeout`] when nothing arrives within `timeout`
    /// - [`SpotifyError::Callback`] when the provider redirected with an error
    ///   or the server died before a code arrived
    pub async fn wait_for_code(mut self, timeout: Duration) -> Res<String> {
        let received = tokio::time::timeout(timeout, &mut self.code_rx).await;
        self.shutdown();

        match received {
            Err(_) => Err(SpotifyError::CallbackTimeout(timeout)),
            Ok(Err(_)) => Err(SpotifyError::Callback(
                "callback server stopped before a code arrived".to_string(),
            )),
            Ok(Ok(Ok(code))) => Ok(code),
            Ok(Ok(Err(provider_error))) => Err(SpotifyError::Callback(provider_error)),
        }
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for CallbackServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}
