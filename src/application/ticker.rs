// Cancellable periodic task used as the dashboard tick source.
// Invariants: one task per handle, dropping or stopping the handle ends the task.
use std::future::Future;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

#[derive(Debug)]
pub struct PeriodicTask {
    period: Duration,
    cancel: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl PeriodicTask {
    /// Spawn a task calling `on_tick` every `period`, first one period from now.
    ///
    /// A tick that is already running when the task is stopped is aborted at
    /// its next await point; callers that need a hard cut-off check their own
    /// state inside `on_tick`.
    pub fn spawn<F, Fut>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = &mut cancel_rx => return,
                    _ = interval.tick() => on_tick().await,
                }
            }
        });

        Self {
            period,
            cancel: Some(cancel_tx),
            handle,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn stop(mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
