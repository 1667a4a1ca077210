//! HTTP Server
//!
//! Binds the listener and serves the router until a shutdown signal arrives.

use std::future::Future;
use std::net::SocketAddr;

use tokio::net::TcpListener;

use crate::engine::Engine;
use crate::error::{Result, SnapError};

use super::router;

/// HTTP server for SnapKV
pub struct Server {
    engine: Engine,
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl Server {
    /// Bind to the configured listen address
    pub async fn bind(engine: Engine) -> Result<Self> {
        let addr = engine.config().listen_addr.clone();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| SnapError::Network(format!("failed to bind {}: {}", addr, e)))?;
        let local_addr = listener.local_addr()?;

        Ok(Self {
            engine,
            listener,
            local_addr,
        })
    }

    /// Address actually bound (useful when the port was 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!("Listening on http://{}", self.local_addr);

        axum::serve(self.listener, router(self.engine))
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| SnapError::Network(format!("server error: {}", e)))?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolves on SIGINT (Ctrl+C) or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
