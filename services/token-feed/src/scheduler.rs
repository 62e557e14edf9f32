//! Timer-driven mutation scheduler
//!
//! Two states: Idle (no task armed) and Running (one tokio task driven
//! by an interval timer). Each tick draws a small random batch of
//! records, runs the mutate capability on each, writes the results
//! back, and broadcasts one price-update per successful write, in
//! mutation order.
//!
//! Ticks run whether or not anyone is subscribed: the data keeps
//! evolving unobserved so it looks alive the moment a client connects.

use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::broadcast::SubscriberRegistry;
use crate::config::FeedConfig;
use crate::generator::TokenGenerator;
use crate::messages::PushPayload;
use crate::store::TokenStore;

enum SchedulerState {
    Idle,
    Running {
        shutdown: watch::Sender<bool>,
        handle: JoinHandle<()>,
    },
}

/// Owns the periodic mutate-and-broadcast loop.
pub struct MutationScheduler {
    store: Arc<TokenStore>,
    registry: Arc<SubscriberRegistry>,
    update_interval: Duration,
    updates_per_tick: RangeInclusive<usize>,
    state: Mutex<SchedulerState>,
}

impl MutationScheduler {
    pub fn new(
        store: Arc<TokenStore>,
        registry: Arc<SubscriberRegistry>,
        config: &FeedConfig,
    ) -> Self {
        Self {
            store,
            registry,
            update_interval: config.update_interval,
            updates_per_tick: config.updates_per_tick.clone(),
            state: Mutex::new(SchedulerState::Idle),
        }
    }

    /// Arm the timer: Idle → Running.
    ///
    /// The generator is moved into the tick task. Returns `false` (and
    /// drops the generator) if the scheduler is already running.
    pub fn start<G: TokenGenerator + 'static>(&self, mut generator: G) -> bool {
        let mut state = self.state.lock();
        if matches!(*state, SchedulerState::Running { .. }) {
            warn!("mutation scheduler already running");
            return false;
        }

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let store = Arc::clone(&self.store);
        let registry = Arc::clone(&self.registry);
        let period = self.update_interval;
        let updates_per_tick = self.updates_per_tick.clone();

        let handle = tokio::spawn(async move {
            let mut rng = ChaCha8Rng::from_entropy();
            // First tick fires one full period after start
            let mut interval =
                tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        run_tick(&store, &registry, &mut generator, &mut rng, &updates_per_tick);
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }
            debug!("scheduler task exited");
        });

        *state = SchedulerState::Running {
            shutdown: shutdown_tx,
            handle,
        };
        info!(
            period_ms = self.update_interval.as_millis() as u64,
            "mutation scheduler started"
        );
        true
    }

    /// Disarm the timer: Running → Idle.
    ///
    /// No tick begins after this returns; a tick already in flight is
    /// allowed to finish (the task handle is awaited). Idempotent.
    pub async fn stop(&self) {
        let previous = {
            let mut state = self.state.lock();
            std::mem::replace(&mut *state, SchedulerState::Idle)
        };

        if let SchedulerState::Running { shutdown, handle } = previous {
            let _ = shutdown.send(true);
            let _ = handle.await;
            info!("mutation scheduler stopped");
        }
    }

    /// Whether the timer is currently armed.
    pub fn is_running(&self) -> bool {
        matches!(*self.state.lock(), SchedulerState::Running { .. })
    }
}

/// One scheduler tick: sample, mutate, write back, broadcast.
///
/// Returns the number of records mutated. A generation failure skips
/// that record only; an empty store is a no-op, not a failure.
fn run_tick<G: TokenGenerator, R: Rng>(
    store: &TokenStore,
    registry: &SubscriberRegistry,
    generator: &mut G,
    rng: &mut R,
    updates_per_tick: &RangeInclusive<usize>,
) -> usize {
    if store.is_empty() {
        debug!("tick skipped: store is empty");
        return 0;
    }

    let count = rng.gen_range(updates_per_tick.clone());
    let sample = store.random_sample(rng, count);

    let mut mutated = 0usize;
    for token in sample {
        let previous_price = token.price;
        let updated = match generator.mutate(&token) {
            Ok(updated) => updated,
            Err(error) => {
                warn!(token_id = %token.id, %error, "mutation failed, skipping record");
                continue;
            }
        };

        let Some(written) = store.apply_mutation(token.id, move |_| updated) else {
            continue;
        };

        registry.broadcast(PushPayload::PriceUpdate {
            id: written.id,
            new_price: written.price,
            new_price_change: written.price_change,
            previous_price,
        });
        mutated += 1;
    }

    debug!(
        mutated,
        subscribers = registry.subscriber_count(),
        "mutation tick complete"
    );
    mutated
}
