use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::store::AudioStore;

/// Periodically delete clips older than `retention`
///
/// Runs outside the request path until `shutdown` is cancelled. A failed
/// sweep is logged and retried on the next tick.
pub fn spawn_sweeper(
    store: AudioStore,
    retention: Duration,
    every: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        tracing::info!(
            retention_secs = retention.as_secs(),
            interval_secs = every.as_secs(),
            "audio retention sweeper started"
        );

        loop {
            tokio::select! {
                () = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            match store.sweep(retention).await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "expired audio clips removed"),
                Err(e) => tracing::warn!(error = %e, "audio retention sweep failed"),
            }
        }

        tracing::debug!("audio retention sweeper stopped");
    })
}
