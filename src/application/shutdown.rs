//! Process signal handling

use std::future::Future;
use std::io;
use tracing::info;

/// Install the SIGINT and SIGTERM handlers immediately and return a future
/// that resolves on the first of them.
///
/// Handlers are registered before this returns, so a signal delivered while
/// the service is still starting is held until the future is polled.
#[cfg(unix)]
pub fn install_shutdown_signal() -> io::Result<impl Future<Output = ()>> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    Ok(async move {
        tokio::select! {
            _ = interrupt.recv() => info!("Received SIGINT"),
            _ = terminate.recv() => info!("Received SIGTERM"),
        }
    })
}

#[cfg(not(unix))]
pub fn install_shutdown_signal() -> io::Result<impl Future<Output = ()>> {
    let (tx, rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C");
            let _ = tx.send(());
        }
    });
    Ok(async move {
        if rx.await.is_err() {
            std::future::pending::<()>().await;
        }
    })
}
