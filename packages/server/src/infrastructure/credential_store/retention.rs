//! Periodic expiry sweep for a credential store.

use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};
use tokio_util::sync::CancellationToken;

use crate::domain::CredentialStore;

/// Spawn a task that calls `remove_expired` every `sweep_interval` until
/// `shutdown` is cancelled.
pub fn spawn_retention_sweep(
    store: Arc<dyn CredentialStore>,
    sweep_interval: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(sweep_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::debug!("OTP retention sweep started (every {:?})", sweep_interval);

        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    let removed = store.remove_expired().await;
                    if removed > 0 {
                        tracing::debug!("Removed {} expired one-time password(s)", removed);
                    }
                }
            }
        }

        tracing::info!("OTP retention sweep stopped");
    })
}
