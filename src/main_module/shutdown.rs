use log::{error, info};
use std::io;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// How long in-flight requests may run after a shutdown signal.
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(10);

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, closing server gracefully..."),
        _ = terminate => info!("Received SIGTERM, closing server gracefully..."),
    }
}

fn joined(result: Result<io::Result<()>, tokio::task::JoinError>) -> io::Result<()> {
    result.map_err(io::Error::other)?
}

/// Waits for the server task. Once `signalled` fires, the task gets `grace`
/// to drain; past that it is aborted and a `TimedOut` error is returned.
pub async fn drain_with_deadline(
    mut server: JoinHandle<io::Result<()>>,
    signalled: oneshot::Receiver<()>,
    grace: Duration,
) -> io::Result<()> {
    tokio::select! {
        result = &mut server => return joined(result),
        _ = signalled => {}
    }

    match tokio::time::timeout(grace, &mut server).await {
        Ok(result) => joined(result),
        Err(_) => {
            error!("Forced shutdown after timeout ({}s)", grace.as_secs());
            server.abort();
            Err(io::Error::new(
                io::ErrorKind::TimedOut,
                "in-flight requests did not finish before the shutdown deadline",
            ))
        }
    }
}
