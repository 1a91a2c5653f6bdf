//! HTTP server: REST, WebSocket and static files on one listener

use std::net::SocketAddr;
use std::path::Path;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::app::App;
use crate::config::ServerConfig;
use crate::error::Result;
use crate::realtime;
use crate::rest;

/// Message board server
pub struct BoardServer {
    app: App,
    config: ServerConfig,
}

impl BoardServer {
    pub fn new(app: App, config: ServerConfig) -> Self {
        Self { app, config }
    }

    /// Build the router.
    ///
    /// Anything not matched by the REST or socket routes is looked up under
    /// `static_root`.
    pub fn router(app: App, static_root: &Path) -> Router {
        rest::router()
            .merge(realtime::router())
            .fallback_service(ServeDir::new(static_root))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(app)
    }

    /// Bind the configured address
    pub async fn bind(&self) -> Result<TcpListener> {
        Ok(TcpListener::bind(self.config.addr).await?)
    }

    /// Serve on an already bound listener until Ctrl-C
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let addr: SocketAddr = listener.local_addr()?;
        let app = Self::router(self.app, &self.config.static_root);

        tracing::info!("message board listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("message board stopped");
        Ok(())
    }

    /// Bind and serve
    pub async fn start(self) -> Result<()> {
        let listener = self.bind().await?;
        self.serve(listener).await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
