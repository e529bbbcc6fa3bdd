//! Connection state machine driving what the main window shows.
//!
//! `Probing -> Connected`, or `Probing -> Launching -> WaitingRetry -> Probing`
//! until the gateway answers. Every trigger (`connect`, `shutdown`) bumps a
//! generation counter; results from an older generation are dropped, and the
//! window content is only changed while the lock is held and the generation is
//! current. At most one retry timer exists at any time.

use std::{
    future::Future,
    pin::Pin,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use serde::Serialize;
use tokio::{runtime::Handle, task::JoinHandle};

use crate::{
    gateway_health::GatewayProbe, gateway_launcher::GatewayLauncher, ConnectionConfig,
    STATUS_STARTING_GATEWAY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) enum ConnectionPhase {
    Idle,
    Probing,
    Launching,
    WaitingRetry,
    Connected,
}

/// What the controller may do to the window.
pub(crate) trait ConnectionSurface: Send + Sync {
    fn show_placeholder(&self, status: &str);
    fn load_gateway(&self, url: &str);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RetryTimerStats {
    pub(crate) scheduled: u64,
    pub(crate) fired: u64,
    pub(crate) cancelled: u64,
}

impl RetryTimerStats {
    pub(crate) fn outstanding(&self) -> u64 {
        self.scheduled
            .saturating_sub(self.fired)
            .saturating_sub(self.cancelled)
    }
}

pub(crate) fn waiting_status(port: u16) -> String {
    format!("Waiting for gateway on port {port}…")
}

struct ControllerInner {
    phase: ConnectionPhase,
    generation: u64,
    config: Arc<ConnectionConfig>,
    // Some iff phase == WaitingRetry.
    pending_retry: Option<JoinHandle<()>>,
    timers: RetryTimerStats,
}

type RetryTask = Pin<Box<dyn Future<Output = ()> + Send>>;

pub(crate) struct ConnectionController {
    probe: Arc<dyn GatewayProbe>,
    launcher: Arc<dyn GatewayLauncher>,
    surface: Arc<dyn ConnectionSurface>,
    runtime: Handle,
    retry_delay: Duration,
    inner: Mutex<ControllerInner>,
}

impl ConnectionController {
    pub(crate) fn new(
        probe: Arc<dyn GatewayProbe>,
        launcher: Arc<dyn GatewayLauncher>,
        surface: Arc<dyn ConnectionSurface>,
        runtime: Handle,
        retry_delay: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            probe,
            launcher,
            surface,
            runtime,
            retry_delay,
            inner: Mutex::new(ControllerInner {
                phase: ConnectionPhase::Idle,
                generation: 0,
                config: Arc::new(ConnectionConfig::default()),
                pending_retry: None,
                timers: RetryTimerStats::default(),
            }),
        })
    }

    fn lock(&self) -> MutexGuard<'_, ControllerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn phase(&self) -> ConnectionPhase {
        self.lock().phase
    }

    pub(crate) fn current_config(&self) -> Arc<ConnectionConfig> {
        Arc::clone(&self.lock().config)
    }

    #[cfg(test)]
    pub(crate) fn timer_stats(&self) -> RetryTimerStats {
        self.lock().timers
    }

    #[cfg(test)]
    pub(crate) fn has_pending_retry(&self) -> bool {
        self.lock().pending_retry.is_some()
    }

    /// Starts a fresh cycle with `config`, superseding whatever is in flight.
    pub(crate) fn connect(self: &Arc<Self>, config: ConnectionConfig) {
        let generation = {
            let mut inner = self.lock();
            cancel_pending_retry(&mut inner);
            inner.generation += 1;
            inner.config = Arc::new(config);
            inner.phase = ConnectionPhase::Probing;
            log::info!(
                "connection cycle {} started for port {}",
                inner.generation,
                inner.config.port
            );
            log::debug!(
                "retry timers {:?}, outstanding {}",
                inner.timers,
                inner.timers.outstanding()
            );
            inner.generation
        };

        self.runtime.spawn(Arc::clone(self).run_cycle(generation));
    }

    pub(crate) fn shutdown(&self) {
        let mut inner = self.lock();
        cancel_pending_retry(&mut inner);
        inner.generation += 1;
        inner.phase = ConnectionPhase::Idle;
        log::info!("connection controller reset");
    }

    async fn run_cycle(self: Arc<Self>, generation: u64) {
        let config = {
            let inner = self.lock();
            if inner.generation != generation {
                return;
            }
            Arc::clone(&inner.config)
        };

        let reachable = self.probe.probe(&config).await;

        {
            let mut inner = self.lock();
            if inner.generation != generation {
                log::debug!("discarding probe result from superseded cycle {generation}");
                return;
            }
            if reachable {
                inner.phase = ConnectionPhase::Connected;
                log::info!("gateway reachable on port {}; loading UI", config.port);
                self.surface.load_gateway(&config.gateway_url());
                return;
            }
            inner.phase = ConnectionPhase::Launching;
            log::info!("gateway unreachable on port {}; attempting start", config.port);
            self.surface.show_placeholder(STATUS_STARTING_GATEWAY);
        }

        let started = self.launcher.attempt_start().await;
        log::debug!("gateway launch attempt finished (started={started})");

        let mut inner = self.lock();
        if inner.generation != generation {
            log::debug!("discarding launch result from superseded cycle {generation}");
            return;
        }
        self.schedule_retry(&mut inner, generation, config.port);
    }

    fn schedule_retry(self: &Arc<Self>, inner: &mut ControllerInner, generation: u64, port: u16) {
        cancel_pending_retry(inner);
        inner.phase = ConnectionPhase::WaitingRetry;
        self.surface.show_placeholder(&waiting_status(port));
        inner.pending_retry = Some(
            self.runtime
                .spawn(Arc::clone(self).retry_task(generation, self.retry_delay)),
        );
        inner.timers.scheduled += 1;
    }

    fn retry_task(self: Arc<Self>, generation: u64, delay: Duration) -> RetryTask {
        Box::pin(async move {
            tokio::time::sleep(delay).await;
            self.on_retry_fired(generation).await;
        })
    }

    async fn on_retry_fired(self: Arc<Self>, generation: u64) {
        {
            let mut inner = self.lock();
            if inner.generation != generation
                || inner.phase != ConnectionPhase::WaitingRetry
                || inner.pending_retry.take().is_none()
            {
                return;
            }
            inner.timers.fired += 1;
            inner.phase = ConnectionPhase::Probing;
        }
        self.run_cycle(generation).await;
    }
}

fn cancel_pending_retry(inner: &mut ControllerInner) {
    if let Some(handle) = inner.pending_retry.take() {
        handle.abort();
        inner.timers.cancelled += 1;
        log::debug!("cancelled pending gateway retry");
    }
}
