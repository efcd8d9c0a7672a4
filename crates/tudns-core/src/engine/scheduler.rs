//! Fixed-interval pass scheduling

use super::Reconciler;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Drives the [`Reconciler`] on a fixed period
///
/// ## Lifecycle
///
/// 1. [`Scheduler::start()`] runs one pass and waits for it
/// 2. A background task then runs one pass per tick
/// 3. Cancelling the token stops the loop between passes; a running pass
///    always completes
/// 4. [`Scheduler::join()`] waits for the loop to exit
pub struct Scheduler {
    handle: JoinHandle<()>,
    cancel: CancellationToken,
}

impl Scheduler {
    /// Run the initial pass, then start the timer loop
    ///
    /// The initial pass completes before this returns, so the first DNS
    /// convergence does not wait a full interval. Its errors are logged.
    ///
    /// # Parameters
    ///
    /// - `reconciler`: Shared reconciler
    /// - `period`: Time between passes (must be non-zero)
    /// - `cancel`: External cancellation signal
    pub async fn start(
        reconciler: Arc<Reconciler>,
        period: Duration,
        cancel: CancellationToken,
    ) -> Self {
        if let Err(e) = reconciler.run_pass().await {
            error!(error = %e, "Initial DNS update failed");
        }

        let loop_cancel = cancel.clone();
        let handle = tokio::spawn(async move {
            run_loop(reconciler, period, loop_cancel).await;
        });
        info!(interval = ?period, "Scheduler initialized");

        Self { handle, cancel }
    }

    /// Request the loop to stop
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the loop to exit
    pub async fn join(self) {
        if let Err(e) = self.handle.await {
            error!(error = %e, "Scheduler task panicked");
        }
    }
}

async fn run_loop(reconciler: Arc<Reconciler>, period: Duration, cancel: CancellationToken) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(interval = ?period, "Starting DNS update loop");

    loop {
        tokio::select! {
            biased;

            _ = cancel.cancelled() => {
                info!("Stopping DNS update loop");
                break;
            }
            _ = ticker.tick() => {
                if let Err(e) = reconciler.run_pass().await {
                    error!(error = %e, "DNS update failed");
                }
            }
        }
    }
}
