use tokio::select;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Cancels `cancelation` once the process receives ctrl-c, or once something else cancelled it.
pub async fn detect_shutdown(cancelation: CancellationToken) {
    select! {
        signal = tokio::signal::ctrl_c() => {
            match signal {
                Ok(()) => info!("Received shutdown signal"),
                Err(e) => error!("Failed to listen for shutdown signal {e:?}"),
            }
            cancelation.cancel();
        },
        _ = cancelation.cancelled() => {},
    };
}
