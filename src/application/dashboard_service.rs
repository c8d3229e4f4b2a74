// Dashboard service - Owns control state, series and the tick task
use crate::application::sample_source::{LabelClock, SampleSource};
use crate::application::ticker::PeriodicTask;
use crate::domain::controls::{ControlState, Frequency, LockScreen, TickMode};
use crate::domain::dashboard::{ChartUpdate, Dashboard, DashboardSnapshot};
use crate::domain::error::DashboardError;
use crate::infrastructure::config::DashboardSettings;
use serde::Serialize;
use std::sync::{Arc, Weak};
use tokio::sync::{Mutex, broadcast};

/// Control flags and counters as seen by clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlStatus {
    pub tracking: bool,
    pub transmitting: bool,
    pub frequency: Frequency,
    pub period_ms: u64,
    pub mode: TickMode,
    pub locked: bool,
    pub ticks_fired: u64,
    pub samples_applied: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub status: ControlStatus,
    #[serde(flatten)]
    pub charts: DashboardSnapshot,
}

/// Redraw notifications pushed to connected clients. A `Sample` event only
/// carries the change; clients that missed events resync from a snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    Sample(ChartUpdate),
    Cleared {
        charts: DashboardSnapshot,
    },
    Status {
        status: ControlStatus,
    },
}

struct Inner {
    controls: ControlState,
    screen_lock: LockScreen,
    dashboard: Dashboard,
    source: Box<dyn SampleSource>,
    clock: Arc<dyn LabelClock>,
    ticker: Option<PeriodicTask>,
    generation: u64,
    ticks_fired: u64,
    samples_applied: u64,
}

impl Inner {
    fn status(&self) -> ControlStatus {
        ControlStatus {
            tracking: self.controls.tracking,
            transmitting: self.controls.transmitting,
            frequency: self.controls.frequency,
            period_ms: self.controls.frequency.period().as_millis() as u64,
            mode: self.controls.mode(),
            locked: self.screen_lock.is_locked(),
            ticks_fired: self.ticks_fired,
            samples_applied: self.samples_applied,
        }
    }

    /// Invalidate the running task, if any. Ticks already waiting on the
    /// state lock see a stale generation and do nothing.
    fn stop_ticker(&mut self) {
        self.generation += 1;
        if let Some(ticker) = self.ticker.take() {
            ticker.stop();
        }
    }
}

#[derive(Clone)]
pub struct DashboardService {
    inner: Arc<Mutex<Inner>>,
    events: broadcast::Sender<DashboardEvent>,
}

impl DashboardService {
    pub fn new(
        settings: &DashboardSettings,
        source: Box<dyn SampleSource>,
        clock: Arc<dyn LabelClock>,
    ) -> Result<Self, DashboardError> {
        let frequency = Frequency::new(settings.initial_frequency)?;
        if settings.series_capacity == 0 {
            return Err(DashboardError::InvalidCapacity);
        }
        let (events, _) = broadcast::channel(settings.event_buffer.max(1));

        let inner = Inner {
            controls: ControlState::with_frequency(frequency),
            screen_lock: LockScreen::new(settings.unlock_password.clone()),
            dashboard: Dashboard::new(settings.series_capacity),
            source,
            clock,
            ticker: None,
            generation: 0,
            ticks_fired: 0,
            samples_applied: 0,
        };

        Ok(Self {
            inner: Arc::new(Mutex::new(inner)),
            events,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events.subscribe()
    }

    pub async fn status(&self) -> ControlStatus {
        self.inner.lock().await.status()
    }

    pub async fn snapshot(&self) -> DashboardView {
        let inner = self.inner.lock().await;
        DashboardView {
            status: inner.status(),
            charts: inner.dashboard.snapshot(),
        }
    }

    pub async fn toggle_tracking(&self) -> Result<ControlStatus, DashboardError> {
        let mut inner = self.inner.lock().await;
        inner.screen_lock.ensure_unlocked()?;

        inner.controls.tracking = !inner.controls.tracking;
        tracing::info!(tracking = inner.controls.tracking, "tracking toggled");

        Ok(self.publish_status(&inner))
    }

    pub async fn toggle_transmitting(&self) -> Result<ControlStatus, DashboardError> {
        let mut inner = self.inner.lock().await;
        inner.screen_lock.ensure_unlocked()?;

        inner.controls.transmitting = !inner.controls.transmitting;
        if inner.controls.transmitting {
            self.start_ticker(&mut inner);
        } else {
            inner.stop_ticker();
        }
        tracing::info!(
            transmitting = inner.controls.transmitting,
            "transmitting toggled"
        );

        Ok(self.publish_status(&inner))
    }

    /// Parse and apply a new update frequency. While transmitting, the tick
    /// task is replaced by one running at the new period.
    pub async fn set_frequency(&self, input: &str) -> Result<ControlStatus, DashboardError> {
        let mut inner = self.inner.lock().await;
        inner.screen_lock.ensure_unlocked()?;

        let frequency = Frequency::parse(input).inspect_err(|e| {
            tracing::warn!("Rejected frequency input: {}", e);
        })?;

        inner.controls.frequency = frequency;
        if inner.controls.transmitting {
            self.start_ticker(&mut inner);
        }
        tracing::info!("Update frequency set to {}", frequency);

        Ok(self.publish_status(&inner))
    }

    pub async fn clear(&self) -> Result<DashboardView, DashboardError> {
        let mut inner = self.inner.lock().await;
        inner.screen_lock.ensure_unlocked()?;

        inner.dashboard.clear();
        tracing::info!("Dashboard data cleared");

        let charts = inner.dashboard.snapshot();
        let _ = self.events.send(DashboardEvent::Cleared {
            charts: charts.clone(),
        });

        Ok(DashboardView {
            status: inner.status(),
            charts,
        })
    }

    pub async fn lock(&self) -> ControlStatus {
        let mut inner = self.inner.lock().await;
        inner.screen_lock.lock();
        tracing::info!("Dashboard locked");
        self.publish_status(&inner)
    }

    pub async fn unlock(&self, password: &str) -> Result<ControlStatus, DashboardError> {
        let mut inner = self.inner.lock().await;
        inner.screen_lock.unlock(password).inspect_err(|_| {
            tracing::warn!("Unlock attempt with incorrect password");
        })?;
        tracing::info!("Dashboard unlocked");

        Ok(self.publish_status(&inner))
    }

    fn publish_status(&self, inner: &Inner) -> ControlStatus {
        let status = inner.status();
        let _ = self.events.send(DashboardEvent::Status {
            status: status.clone(),
        });
        status
    }

    /// Replace any running tick task with a fresh one at the current period.
    fn start_ticker(&self, inner: &mut Inner) {
        inner.stop_ticker();

        let generation = inner.generation;
        let period = inner.controls.frequency.period();
        let state = Arc::downgrade(&self.inner);
        let events = self.events.clone();

        let ticker = PeriodicTask::spawn(period, move || {
            let state = state.clone();
            let events = events.clone();
            async move { run_tick(state, events, generation).await }
        });
        tracing::debug!(period = ?ticker.period(), generation, "tick task started");
        inner.ticker = Some(ticker);
    }
}

async fn run_tick(
    state: Weak<Mutex<Inner>>,
    events: broadcast::Sender<DashboardEvent>,
    generation: u64,
) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let mut inner = state.lock().await;
    if inner.generation != generation || !inner.controls.transmitting {
        return;
    }

    inner.ticks_fired += 1;
    if !inner.controls.tracking {
        tracing::debug!(tick = inner.ticks_fired, "tick skipped, not tracking");
        return;
    }

    let sample = inner.source.next_sample();
    let label = inner.clock.now_label();
    let update = inner.dashboard.apply(&sample, &label);
    inner.samples_applied += 1;
    tracing::debug!(
        tick = inner.ticks_fired,
        rcs = sample.rcs,
        speed = sample.speed,
        distance = sample.distance,
        "sample applied"
    );

    let _ = events.send(DashboardEvent::Sample(update));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sample::{Position, Sample};
    use std::time::Duration;
    use tokio::time;

    struct FixedClock;

    impl LabelClock for FixedClock {
        fn now_label(&self) -> String {
            "12:00:00".to_string()
        }
    }

    /// Deterministic source: the n-th sample has rcs n / 10.
    struct CountingSource {
        next: u32,
    }

    impl SampleSource for CountingSource {
        fn next_sample(&mut self) -> Sample {
            let n = f64::from(self.next);
            self.next += 1;
            Sample::new(n, -n, n / 10.0, 1.0, 30.0)
        }
    }

    /// Same sample every tick, so serialized events have a fixed width.
    struct SteadySource;

    impl SampleSource for SteadySource {
        fn next_sample(&mut self) -> Sample {
            Sample::new(12.5, -40.25, 3.0, 1.5, 30.0)
        }
    }

    fn service() -> DashboardService {
        DashboardService::new(
            &DashboardSettings::default(),
            Box::new(CountingSource { next: 0 }),
            Arc::new(FixedClock),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_invalid_initial_frequency() {
        let settings = DashboardSettings {
            initial_frequency: 9,
            ..DashboardSettings::default()
        };
        let result = DashboardService::new(
            &settings,
            Box::new(CountingSource { next: 0 }),
            Arc::new(FixedClock),
        );
        assert!(matches!(result, Err(DashboardError::InvalidFrequency(_))));
    }

    #[test]
    fn test_rejects_zero_series_capacity() {
        let settings = DashboardSettings {
            series_capacity: 0,
            ..DashboardSettings::default()
        };
        let result = DashboardService::new(
            &settings,
            Box::new(CountingSource { next: 0 }),
            Arc::new(FixedClock),
        );
        assert!(matches!(result, Err(DashboardError::InvalidCapacity)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_by_default() {
        let service = service();
        time::sleep(Duration::from_secs(5)).await;

        let status = service.status().await;
        assert_eq!(status.mode, TickMode::Idle);
        assert_eq!(status.frequency.hz(), 1);
        assert_eq!(status.period_ms, 1000);
        assert_eq!(status.ticks_fired, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_active_ticks_apply_one_sample_each() {
        let service = service();
        service.toggle_tracking().await.unwrap();
        let status = service.toggle_transmitting().await.unwrap();
        assert_eq!(status.mode, TickMode::Active);

        time::sleep(Duration::from_millis(3500)).await;

        let view = service.snapshot().await;
        assert_eq!(view.status.ticks_fired, 3);
        assert_eq!(view.status.samples_applied, 3);
        assert_eq!(view.charts.coordinate.len(), 3);
        assert_eq!(view.charts.rcs.datasets, vec![vec![0.0, 0.1, 0.2]]);
        assert_eq!(view.charts.speed_distance.labels, vec!["12:00:00"; 3]);
        assert_eq!(view.charts.longitude, "2.0000");
    }

    #[tokio::test(start_paused = true)]
    async fn test_armed_ticks_apply_no_samples() {
        let service = service();
        let status = service.toggle_transmitting().await.unwrap();
        assert_eq!(status.mode, TickMode::Armed);

        time::sleep(Duration::from_millis(2500)).await;
        service.toggle_transmitting().await.unwrap();
        service.toggle_transmitting().await.unwrap();
        time::sleep(Duration::from_millis(1500)).await;

        let view = service.snapshot().await;
        assert_eq!(view.status.ticks_fired, 3);
        assert_eq!(view.status.samples_applied, 0);
        assert!(view.charts.coordinate.is_empty());
        assert!(view.charts.rcs.labels.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_time_series_capped_position_unbounded() {
        let service = service();
        service.set_frequency("5").await.unwrap();
        service.toggle_tracking().await.unwrap();
        service.toggle_transmitting().await.unwrap();

        time::sleep(Duration::from_millis(5100)).await;

        let view = service.snapshot().await;
        assert_eq!(view.status.samples_applied, 25);
        assert_eq!(view.charts.coordinate.len(), 25);
        assert_eq!(view.charts.rcs.labels.len(), 20);
        assert_eq!(view.charts.rcs.datasets[0][0], 0.5);
        assert_eq!(view.charts.speed_distance.datasets[1].len(), 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_transmitting_cancels_ticks() {
        let service = service();
        service.toggle_tracking().await.unwrap();
        service.toggle_transmitting().await.unwrap();
        time::sleep(Duration::from_millis(2100)).await;

        let status = service.toggle_transmitting().await.unwrap();
        assert_eq!(status.mode, TickMode::Idle);
        time::sleep(Duration::from_secs(10)).await;

        assert_eq!(service.status().await.samples_applied, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_frequency_change_restarts_ticks() {
        let service = service();
        service.toggle_transmitting().await.unwrap();
        time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(service.status().await.ticks_fired, 1);

        let status = service.set_frequency("5").await.unwrap();
        assert_eq!(status.period_ms, 200);

        // New ticks at 1.7s, 1.9s, 2.1s, 2.3s, 2.5s; the old 2.0s tick is gone.
        time::sleep(Duration::from_millis(1050)).await;
        assert_eq!(service.status().await.ticks_fired, 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_frequency_keeps_previous() {
        let service = service();
        service.set_frequency("3").await.unwrap();

        for input in ["0", "6", "-1", "abc"] {
            let err = service.set_frequency(input).await.unwrap_err();
            assert_eq!(err, DashboardError::InvalidFrequency(input.to_string()));
            assert_eq!(service.status().await.frequency.hz(), 3);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_lock_gates_controls() {
        let service = service();
        assert!(service.lock().await.locked);

        assert_eq!(
            service.toggle_tracking().await.unwrap_err(),
            DashboardError::Locked
        );
        assert_eq!(service.clear().await.unwrap_err(), DashboardError::Locked);
        assert_eq!(
            service.unlock("4321").await.unwrap_err(),
            DashboardError::WrongPassword
        );
        assert!(service.status().await.locked);

        let status = service.unlock("1234").await.unwrap();
        assert!(!status.locked);
        assert!(service.toggle_tracking().await.unwrap().tracking);
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_follow_updates() {
        let service = service();
        let mut events = service.subscribe();

        service.toggle_tracking().await.unwrap();
        service.toggle_transmitting().await.unwrap();
        time::sleep(Duration::from_millis(1100)).await;
        service.clear().await.unwrap();

        assert!(matches!(events.recv().await, Ok(DashboardEvent::Status { .. })));
        assert!(matches!(events.recv().await, Ok(DashboardEvent::Status { .. })));
        match events.recv().await {
            Ok(DashboardEvent::Sample(update)) => {
                assert_eq!(update.label, "12:00:00");
                assert_eq!(update.position, Position { x: 0.0, y: 0.0 });
                assert!(!update.rcs_evicted);
            }
            other => panic!("expected sample event, got {:?}", other),
        }
        match events.recv().await {
            Ok(DashboardEvent::Cleared { charts }) => {
                assert!(charts.coordinate.is_empty());
                assert_eq!(charts.longitude, "0.0000");
            }
            other => panic!("expected cleared event, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sample_events_stay_small_as_history_grows() {
        let service = DashboardService::new(
            &DashboardSettings {
                initial_frequency: 5,
                ..DashboardSettings::default()
            },
            Box::new(SteadySource),
            Arc::new(FixedClock),
        )
        .unwrap();
        service.toggle_tracking().await.unwrap();
        let mut events = service.subscribe();
        service.toggle_transmitting().await.unwrap();

        let mut payloads = Vec::new();
        while payloads.len() < 60 {
            match events.recv().await {
                Ok(event @ DashboardEvent::Sample(_)) => {
                    payloads.push(serde_json::to_value(&event).unwrap())
                }
                Ok(_) => {}
                Err(err) => panic!("event stream failed: {:?}", err),
            }
        }

        let last = &payloads[59];
        assert_eq!(last["type"], "sample");
        assert_eq!(last["label"], "12:00:00");
        assert!(last.get("coordinate").is_none());
        assert!(last.get("charts").is_none());
        assert_eq!(payloads[19]["rcs_evicted"], false);
        assert_eq!(payloads[20]["rcs_evicted"], true);
        assert_eq!(last["speed_distance_evicted"], true);

        let size = |i: usize| serde_json::to_vec(&payloads[i]).unwrap().len();
        assert_eq!(size(20), size(40));
        assert_eq!(size(20), size(59));
        assert_eq!(service.snapshot().await.charts.coordinate.len(), 60);
    }
}
