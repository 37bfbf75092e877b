use log::{error, info};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::Notify;

const SHUTDOWN_PERIOD_MS: u64 = 100;
const MAX_RETRIES: u64 = 10;

pub(crate) struct ShutdownSignal {
    notify: Arc<Notify>,
}

impl ShutdownSignal {
    fn new(notify: Arc<Notify>) -> Self {
        Self { notify }
    }

    /// Waits `run_for_millis`, or for Ctrl+C when `None`, then notifies the waiters.
    /// The notification is repeated a few times to reach waiters registered late.
    async fn listen_for_shutdown(&self, run_for_millis: Option<u64>) {
        match run_for_millis {
            Some(time_to_live_millis) => {
                tokio::time::sleep(Duration::from_millis(time_to_live_millis)).await;
            }
            None => loop {
                match signal::ctrl_c().await {
                    Ok(()) => {
                        info!("Ctrl+C received. Sending stop signal...");
                        break;
                    }
                    Err(e) => {
                        error!("Error while waiting for Ctrl+C: {}", e);
                        tokio::time::sleep(Duration::from_millis(SHUTDOWN_PERIOD_MS)).await;
                    }
                }
            },
        }

        for _ in 0..MAX_RETRIES {
            self.notify.notify_waiters();
            tokio::time::sleep(Duration::from_millis(SHUTDOWN_PERIOD_MS)).await;
        }
    }
}

pub(crate) fn listen_for_shutdown(
    notify: Arc<Notify>,
    run_for_millis: Option<u64>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let shutdown_signal = ShutdownSignal::new(notify);
        shutdown_signal.listen_for_shutdown(run_for_millis).await;
    })
}
