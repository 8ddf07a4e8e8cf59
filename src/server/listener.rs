use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::{Connection, ConnectionLimits};
use crate::routing::Router;
use crate::server::dispatcher::Dispatcher;

const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Binds the configured address and serves `router` until the task is dropped.
pub async fn run(cfg: &Config, router: Router) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    let dispatcher = Arc::new(Dispatcher::new(router));
    serve(listener, dispatcher, cfg.server.limits()).await
}

/// Accept loop: one spawned task per connection, sharing only the dispatcher.
pub async fn serve(
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
    limits: ConnectionLimits,
) -> anyhow::Result<()> {
    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!(error = %e, "Failed to accept connection");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
                continue;
            }
        };
        tracing::debug!("Accepted connection from {}", peer);

        let dispatcher = Arc::clone(&dispatcher);
        tokio::spawn(async move {
            let conn = Connection::new(socket, dispatcher, limits);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
            tracing::debug!("Connection with {} closed", peer);
        });
    }
}
