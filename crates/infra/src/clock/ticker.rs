//! Day-cycle ticker
//!
//! Drives the pure day-cycle evaluation on a fixed period with lifecycle
//! management. Each tick reads the wall clock in the configured timezone,
//! resolves the day's maghrib through the schedule source and publishes a
//! fresh snapshot over a watch channel. Ticks are independent and
//! idempotent; stopping simply ceases to schedule the next one.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use miqat_core::{evaluate, PrayerScheduleSource};
use miqat_domain::{ClockConfig, DaySnapshot, MiqatError, Result};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Type alias for task handle to avoid complexity warnings
type TaskHandle = Arc<Mutex<Option<JoinHandle<()>>>>;

/// Periodic driver for the maghrib-to-maghrib clock
///
/// The snapshot channel holds `None` until the first tick fires.
pub struct DayCycleTicker {
    source: Arc<dyn PrayerScheduleSource>,
    config: ClockConfig,
    snapshots: watch::Sender<Option<DaySnapshot>>,
    cancellation_token: CancellationToken,
    task_handle: TaskHandle,
    started: bool,
}

impl DayCycleTicker {
    /// Create a ticker over a schedule source
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if the tick period is zero
    pub fn new(source: Arc<dyn PrayerScheduleSource>, config: ClockConfig) -> Result<Self> {
        if config.tick_interval_ms == 0 {
            return Err(MiqatError::Config("tick interval must be positive".to_string()));
        }
        let (snapshots, _) = watch::channel(None);
        Ok(Self {
            source,
            config,
            snapshots,
            cancellation_token: CancellationToken::new(),
            task_handle: Arc::new(Mutex::new(None)),
            started: false,
        })
    }

    /// Start the ticker
    ///
    /// Spawns the background tick loop; the first tick fires immediately.
    ///
    /// # Errors
    ///
    /// Returns a `Scheduler` error if the ticker is already running
    #[instrument(skip(self))]
    pub async fn start(&mut self) -> Result<()> {
        if self.is_running().await {
            return Err(MiqatError::Scheduler("day-cycle ticker already running".to_string()));
        }

        info!(period_ms = self.config.tick_interval_ms, "Starting day-cycle ticker");

        // Fresh cancellation token so the ticker can restart after a stop
        self.cancellation_token = CancellationToken::new();

        let source = Arc::clone(&self.source);
        let timezone = self.config.timezone;
        let period = Duration::from_millis(self.config.tick_interval_ms);
        let snapshots = self.snapshots.clone();
        let cancel = self.cancellation_token.clone();

        let handle = tokio::spawn(async move {
            Self::tick_loop(source, timezone, period, snapshots, cancel).await;
        });

        *self.task_handle.lock().await = Some(handle);
        self.started = true;

        Ok(())
    }

    /// Stop the ticker gracefully
    ///
    /// Cancels the tick loop and awaits its completion.
    ///
    /// # Errors
    ///
    /// Returns a `Scheduler` error if the ticker is not running or its
    /// task fails to shut down
    #[instrument(skip(self))]
    pub async fn stop(&mut self) -> Result<()> {
        if !self.is_running().await {
            return Err(MiqatError::Scheduler("day-cycle ticker not running".to_string()));
        }

        info!("Stopping day-cycle ticker");

        self.cancellation_token.cancel();
        self.started = false;

        if let Some(handle) = self.task_handle.lock().await.take() {
            match tokio::time::timeout(Duration::from_secs(5), handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    warn!("Ticker task panicked: {}", e);
                    return Err(MiqatError::Scheduler("ticker task panicked".to_string()));
                }
                Err(_) => {
                    warn!("Ticker task did not complete within timeout");
                    return Err(MiqatError::Scheduler("ticker task timeout".to_string()));
                }
            }
        }

        Ok(())
    }

    /// Check if the ticker is running
    pub async fn is_running(&self) -> bool {
        self.task_handle.lock().await.is_some()
    }

    /// Subscribe to day-cycle snapshots
    ///
    /// The receiver observes every published snapshot; the value is `None`
    /// until the first tick after a start.
    pub fn subscribe(&self) -> watch::Receiver<Option<DaySnapshot>> {
        self.snapshots.subscribe()
    }

    /// Background tick loop
    async fn tick_loop(
        source: Arc<dyn PrayerScheduleSource>,
        timezone: chrono_tz::Tz,
        period: Duration,
        snapshots: watch::Sender<Option<DaySnapshot>>,
        cancel: CancellationToken,
    ) {
        let mut interval = tokio::time::interval(period);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Tick loop cancelled");
                    break;
                }
                _ = interval.tick() => {
                    let now = Utc::now().with_timezone(&timezone);
                    match source.schedule_for(now.date_naive()).await {
                        Ok(times) => {
                            let maghrib = times.maghrib.with_timezone(&timezone);
                            snapshots.send_replace(Some(evaluate(&now, &maghrib)));
                        }
                        Err(e) => {
                            // A tick with no schedule publishes nothing; the
                            // previous snapshot stays current
                            warn!(error = %e, "Schedule unavailable, skipping tick");
                        }
                    }
                }
            }
        }
    }
}

/// Ensure the tick loop is cancelled when dropped
impl Drop for DayCycleTicker {
    fn drop(&mut self) {
        // Best-effort cleanup; can't await the handle here. A ticker that
        // was never started has nothing to cancel and drops silently.
        if self.started && !self.cancellation_token.is_cancelled() {
            warn!("DayCycleTicker dropped while running; cancelling");
            self.cancellation_token.cancel();
        }
    }
}
