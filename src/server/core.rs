use log::{error, info};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use axum::Router;

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::protocol::{AppState, router};

pub struct Server {
    listener: TcpListener,
    router: Router,
    local_addr: SocketAddr,
}

impl Server {
    /// Opens the server root and binds the listener. Both must succeed
    /// before any request is accepted.
    pub async fn bind(config: &ServerConfig) -> Result<Self, ServerError> {
        let root = config.server_root()?;
        let addr = config.socket_addr()?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        let local_addr = listener.local_addr()?;

        info!("Server bound to {}", local_addr);
        info!("Server root directory: {}", root.path().display());

        Ok(Self {
            listener,
            router: router(AppState::new(root)),
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve until Ctrl-C.
    pub async fn run(self) -> Result<(), ServerError> {
        self.run_until(shutdown_signal()).await
    }

    /// Serve until `shutdown` resolves, then drain in-flight requests.
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!("Starting RAX file server on {}", self.local_addr);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Server on {} stopped", self.local_addr);
        Ok(())
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
