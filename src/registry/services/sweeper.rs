//! Periodic background eviction of expired services.

use super::registry::ServiceRegistry;
use crate::registry::{
    domain::{AgentRecord, ToolRecord},
    ports::ServiceRepository,
};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

const MIN_PERIOD: Duration = Duration::from_millis(1);
const MAX_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// Background task that calls [`ServiceRegistry::sweep`] on an interval.
///
/// Sweeping only reclaims memory. Reads evict expired records on their own,
/// so a stopped or failing sweeper never changes what callers observe.
pub struct LivenessSweeper<A, T, C>
where
    A: ServiceRepository<AgentRecord>,
    T: ServiceRepository<ToolRecord>,
    C: Clock + Send + Sync,
{
    registry: Arc<ServiceRegistry<A, T, C>>,
    period: Duration,
}

impl<A, T, C> LivenessSweeper<A, T, C>
where
    A: ServiceRepository<AgentRecord> + 'static,
    T: ServiceRepository<ToolRecord> + 'static,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a sweeper running every `period`.
    ///
    /// The period is clamped between one millisecond and one day.
    #[must_use]
    pub fn new(registry: Arc<ServiceRegistry<A, T, C>>, period: Duration) -> Self {
        Self {
            registry,
            period: period.clamp(MIN_PERIOD, MAX_PERIOD),
        }
    }

    /// Returns the sweep interval.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Spawns the sweep loop onto the current runtime.
    ///
    /// The loop stops when `shutdown` observes `true` or its sender is
    /// dropped. The first sweep runs one period after spawning.
    #[must_use]
    pub fn spawn(self, mut shutdown: watch::Receiver<bool>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + self.period, self.period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            tracing::info!(period_ms = self.period.as_millis(), "liveness sweeper started");

            loop {
                if *shutdown.borrow() {
                    break;
                }
                tokio::select! {
                    _ = ticker.tick() => {
                        match self.registry.sweep().await {
                            Ok(report) if report.total() > 0 => tracing::info!(
                                agents = report.agents(),
                                tools = report.tools(),
                                "swept expired services"
                            ),
                            Ok(_) => {}
                            Err(err) => tracing::error!(error = %err, "liveness sweep failed"),
                        }
                    }
                    changed = shutdown.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }

            tracing::info!("liveness sweeper stopped");
        })
    }
}
