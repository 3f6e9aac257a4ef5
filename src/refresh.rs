//! Listing refresh: on demand, on an empty store, and on a schedule.
//!
//! Every refresh goes through one gate so two refreshes never interleave.
//! Scheduled ticks skip when the gate is held; explicit requests wait for it.
//! A failed or timed-out generator never touches the store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::models::{NewProperty, Property};
use crate::scrapers::{seed, ListingGenerator, SearchParams};
use crate::storage::PropertyStore;

/// Timing and default criteria for refreshes
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshSettings {
    pub interval: Duration,
    pub initial_delay: Duration,
    pub generator_timeout: Duration,
    /// Criteria for scheduled and empty-store refreshes. The city is only
    /// used when the generator offers no rotation.
    pub defaults: SearchParams,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(120),
            initial_delay: Duration::from_secs(30),
            generator_timeout: Duration::from_secs(30),
            defaults: SearchParams::default(),
        }
    }
}

pub struct Refresher {
    store: Arc<PropertyStore>,
    generator: Arc<dyn ListingGenerator>,
    settings: RefreshSettings,
    gate: Mutex<()>,
    city_index: AtomicUsize,
    last_refreshed: RwLock<Option<DateTime<Utc>>>,
}

impl Refresher {
    pub fn new(
        store: Arc<PropertyStore>,
        generator: Arc<dyn ListingGenerator>,
        settings: RefreshSettings,
    ) -> Self {
        Self {
            store,
            generator,
            settings,
            gate: Mutex::new(()),
            city_index: AtomicUsize::new(0),
            last_refreshed: RwLock::new(None),
        }
    }

    pub fn settings(&self) -> &RefreshSettings {
        &self.settings
    }

    /// Refresh now, waiting for any refresh already in flight.
    pub async fn refresh(&self, params: &SearchParams) -> Result<Vec<Property>> {
        let guard = self.gate.lock().await;
        self.refresh_locked(&guard, params).await
    }

    /// Refresh unless one is already in flight, in which case `Ok(None)`.
    pub async fn try_refresh(&self, params: &SearchParams) -> Result<Option<Vec<Property>>> {
        let Ok(guard) = self.gate.try_lock() else {
            return Ok(None);
        };
        self.refresh_locked(&guard, params).await.map(Some)
    }

    /// Generate listings for `params` without touching the store.
    pub async fn generate(&self, params: &SearchParams) -> Result<Vec<NewProperty>> {
        let source = self.generator.source_name();
        let generation = self.generator.generate(params);
        let listings = tokio::time::timeout(self.settings.generator_timeout, generation)
            .await
            .with_context(|| format!("{} generator timed out for {}", source, params.city))?
            .with_context(|| format!("{} generator failed for {}", source, params.city))?;

        if listings.is_empty() {
            anyhow::bail!("{} generator returned no listings for {}", source, params.city);
        }
        if listings.len() < 4 {
            warn!("Only got {} listings from {} for {}", listings.len(), source, params.city);
        }
        Ok(listings)
    }

    async fn refresh_locked(
        &self,
        _gate: &MutexGuard<'_, ()>,
        params: &SearchParams,
    ) -> Result<Vec<Property>> {
        let listings = self.generate(params).await?;
        let stored = self.store.replace_all(listings).await;
        *self.last_refreshed.write().await = Some(Utc::now());
        info!(city = %params.city, count = stored.len(), "Refreshed listings");
        Ok(stored)
    }

    /// Fill an empty store before it is queried. Falls back to the built-in
    /// sample set if the generator cannot deliver.
    pub async fn ensure_populated(&self) {
        if !self.store.is_empty().await {
            return;
        }

        let guard = self.gate.lock().await;
        // Someone else may have filled it while we waited.
        if !self.store.is_empty().await {
            return;
        }

        info!("No properties in storage, generating fresh properties");
        if let Err(e) = self.refresh_locked(&guard, &self.settings.defaults).await {
            warn!("Refill failed, loading sample data: {:#}", e);
            self.store.replace_all(seed::fallback_sample()).await;
        }
    }

    /// Initial population at startup: hardcoded listings for the default city
    /// when there are any, otherwise the generator, otherwise the sample set.
    pub async fn seed(&self) {
        let guard = self.gate.lock().await;
        let city = &self.settings.defaults.city;

        let hardcoded = seed::hardcoded_for_city(city, &mut fastrand::Rng::new());
        if !hardcoded.is_empty() {
            let stored = self.store.replace_all(hardcoded).await;
            info!("Initialized storage with {} hardcoded properties from {}", stored.len(), city);
            return;
        }

        match self.refresh_locked(&guard, &self.settings.defaults).await {
            Ok(stored) => info!(
                "Initialized storage with {} generated properties from {}",
                stored.len(),
                city
            ),
            Err(e) => {
                error!("Failed to initialize with generated data, using sample data: {:#}", e);
                self.store.replace_all(seed::fallback_sample()).await;
            }
        }
    }

    /// Next city in the generator's rotation
    pub fn next_city(&self) -> String {
        let cities = self.generator.available_cities();
        if cities.is_empty() {
            return self.settings.defaults.city.clone();
        }

        let index = self.city_index.fetch_add(1, Ordering::Relaxed) % cities.len();
        if index == cities.len() - 1 {
            debug!("Completed full city cycle");
        }
        cities[index].clone()
    }

    pub fn is_refreshing(&self) -> bool {
        self.gate.try_lock().is_err()
    }

    pub async fn last_refreshed(&self) -> Option<DateTime<Utc>> {
        *self.last_refreshed.read().await
    }

    async fn scheduled_tick(&self) {
        let params = SearchParams {
            city: self.next_city(),
            ..self.settings.defaults.clone()
        };

        info!(city = %params.city, "Auto-refreshing properties");
        match self.try_refresh(&params).await {
            Ok(Some(_)) => {}
            Ok(None) => debug!("Refresh already in flight, skipping tick"),
            Err(e) => error!("Scheduled refresh failed, keeping previous listings: {:#}", e),
        }
    }

    /// Start the background refresh task. One refresh runs after the initial
    /// delay, then one every `interval` counted from start.
    pub fn start(self: &Arc<Self>) -> RefreshHandle {
        let token = CancellationToken::new();
        let refresher = Arc::clone(self);
        let cancel = token.clone();

        info!(
            interval_secs = self.settings.interval.as_secs(),
            initial_delay_secs = self.settings.initial_delay.as_secs(),
            "Starting auto-refresh"
        );

        let task = tokio::spawn(async move {
            let period = refresher.settings.interval;
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            let warm_up = tokio::time::sleep(refresher.settings.initial_delay);
            tokio::pin!(warm_up);
            let mut warmed_up = false;

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = &mut warm_up, if !warmed_up => warmed_up = true,
                    _ = interval.tick() => {}
                }
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = refresher.scheduled_tick() => {}
                }
            }

            info!("Stopped auto-refresh");
        });

        RefreshHandle { token, task }
    }
}

/// Owner of a running background refresh
pub struct RefreshHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Cancel the task and wait for it to wind down.
    pub async fn stop(self) {
        self.token.cancel();
        if let Err(e) = self.task.await {
            error!("Auto-refresh task ended abnormally: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
