//! HTTP server startup and lifecycle management.

use std::future::{Future, IntoFuture};
use std::time::Instant;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use super::{ServerError, ServerResult, shutdown_signal};
use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Binds the configured address and serves `app` until a shutdown signal.
///
/// After the signal, in-flight requests get at most the configured shutdown
/// timeout before the server stops waiting for them.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails while
/// running.
pub async fn serve(app: Router, server_config: ServerConfig) -> ServerResult<()> {
    let server_addr = server_config.server_addr();

    let listener = TcpListener::bind(server_addr).await.map_err(|err| {
        let error = ServerError::bind_error(server_addr, err);
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            addr = %server_addr,
            error = %error,
            suggestion = error.suggestion(),
            "Failed to bind to address"
        );
        error
    })?;

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        addr = %server_addr,
        "Server is ready and listening for connections"
    );

    if server_config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "Server bound to all interfaces (0.0.0.0) - ensure firewall is configured"
        );
    }

    let start_time = Instant::now();
    let (signalled_tx, signalled_rx) = oneshot::channel::<()>();
    let graceful = async move {
        shutdown_signal().await;
        let _ = signalled_tx.send(());
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(graceful)
        .into_future();

    let result = tokio::select! {
        result = server => result.map_err(ServerError::Runtime),
        () = drain_deadline(signalled_rx, server_config) => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                "Shutdown timeout elapsed, abandoning in-flight requests"
            );
            Ok(())
        }
    };

    match &result {
        Ok(()) => tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            uptime_secs = start_time.elapsed().as_secs(),
            "Shutdown completed"
        ),
        Err(error) => tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %error,
            uptime_secs = start_time.elapsed().as_secs(),
            "Server encountered an error"
        ),
    }

    result
}

/// Resolves once the shutdown timeout has passed after the signal.
///
/// Never resolves if the server stops before a signal arrives.
fn drain_deadline(
    signalled: oneshot::Receiver<()>,
    server_config: ServerConfig,
) -> impl Future<Output = ()> {
    let shutdown_timeout = server_config.shutdown_timeout();

    async move {
        if signalled.await.is_err() {
            std::future::pending::<()>().await;
        }

        tracing::info!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            timeout_secs = shutdown_timeout.as_secs(),
            "Graceful shutdown initiated"
        );
        tokio::time::sleep(shutdown_timeout).await;
    }
}
