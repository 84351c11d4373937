//! Weather synchronization engine use case

use std::sync::{Arc, Mutex as StdMutex, Weak};
use std::time::Duration;

use serde_json::json;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::domain::config::{OverrideTable, WeatherConfig};
use crate::domain::error::{ConfigError, InvalidPresetError, InvalidSlotError};
use crate::domain::weather::{resolve_effective, EffectiveWeather, WeatherSnapshot};

use super::bus::{EngineEvent, NotificationBus, PollStatus};
use super::poller;
use super::ports::{ConfigStore, FetchError, FetchOutcome, NodeGraphWriter, WeatherProvider};

/// Node the engine writes weather properties to.
const NODE_PATH: &str = "WeatherControl";

/// Upper bound on a single provider fetch, seconds. The effective budget is
/// the poll interval capped at this value, so a slow provider can never
/// overlap the next cycle.
const MAX_FETCH_TIMEOUT_SECS: u64 = 30;

struct EngineState {
    config: WeatherConfig,
    snapshot: Option<WeatherSnapshot>,
    last_fetch_valid: bool,
    dirty: bool,
    linked: bool,
    overridden: bool,
    last_status_message: String,
    status_repeat: u32,
}

struct PollHandle {
    stop_tx: watch::Sender<bool>,
    _task: JoinHandle<()>,
}

/// The state synchronization engine.
///
/// Owns the configuration, the last-known-good snapshot, and all runtime
/// flags behind a single mutex; every mutating operation goes through this
/// one owner. The poll scheduler is a spawned task holding a cancellation
/// token that is cleared synchronously by [`stop_polling`].
///
/// [`stop_polling`]: WeatherEngine::stop_polling
pub struct WeatherEngine<P, G, S> {
    provider: P,
    node_graph: G,
    store: S,
    bus: NotificationBus,
    table: OverrideTable,
    state: Mutex<EngineState>,
    poll: StdMutex<Option<PollHandle>>,
    // Handle to self for spawning the scheduler task
    weak: Weak<Self>,
}

impl<P, G, S> WeatherEngine<P, G, S>
where
    P: WeatherProvider + 'static,
    G: NodeGraphWriter + 'static,
    S: ConfigStore + 'static,
{
    pub fn new(provider: P, node_graph: G, store: S, config: WeatherConfig) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            provider,
            node_graph,
            store,
            bus: NotificationBus::new(),
            table: OverrideTable::builtin(),
            state: Mutex::new(EngineState {
                config,
                snapshot: None,
                last_fetch_valid: false,
                dirty: false,
                linked: false,
                overridden: false,
                last_status_message: String::new(),
                status_repeat: 0,
            }),
            poll: StdMutex::new(None),
            weak: weak.clone(),
        })
    }

    /// Event fan-out to the connected client.
    pub fn bus(&self) -> &NotificationBus {
        &self.bus
    }

    // --- Polling lifecycle ---

    /// Arm the poll scheduler. No-op if already running.
    pub fn start_polling(&self) {
        // Only reachable while the engine is owned by an Arc
        let Some(engine) = self.weak.upgrade() else {
            return;
        };

        {
            let mut poll = self.poll.lock().unwrap_or_else(|e| e.into_inner());
            if poll.is_some() {
                log::debug!("Polling already active, leaving timer untouched");
                return;
            }

            let (stop_tx, stop_rx) = watch::channel(false);
            let task = tokio::spawn(async move { poller::run(engine, stop_rx).await });
            *poll = Some(PollHandle {
                stop_tx,
                _task: task,
            });
        }

        log::info!("Polling started");
        self.bus.publish(&EngineEvent::StatusChange {
            status: PollStatus::Started,
        });
    }

    /// Cancel the poll scheduler. No-op if not running.
    ///
    /// The handle is cleared and the cancellation token signalled before this
    /// returns; a fetch already in flight completes but never re-arms.
    pub fn stop_polling(&self) {
        let handle = self
            .poll
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        let Some(handle) = handle else {
            log::debug!("Polling already stopped");
            return;
        };

        let _ = handle.stop_tx.send(true);
        log::info!("Polling stopped");
        self.bus.publish(&EngineEvent::StatusChange {
            status: PollStatus::Stopped,
        });
    }

    pub fn is_running(&self) -> bool {
        self.poll.lock().unwrap_or_else(|e| e.into_inner()).is_some()
    }

    pub fn status(&self) -> PollStatus {
        if self.is_running() {
            PollStatus::Started
        } else {
            PollStatus::Stopped
        }
    }

    // --- Poll cycle ---

    /// Run one fetch attempt. Failures are classified, reported through the
    /// bus, and contained to this cycle.
    pub async fn poll_once(&self) {
        let (city_id, api_token, interval) = {
            let state = self.state.lock().await;
            (
                state.config.city_id.clone(),
                state.config.api_token.clone(),
                state.config.update_interval,
            )
        };

        let budget = interval.clamp(1, MAX_FETCH_TIMEOUT_SECS);
        let fetched = tokio::time::timeout(
            Duration::from_secs(budget),
            self.provider.fetch_current(&city_id, &api_token),
        )
        .await;

        match fetched {
            Err(_) => {
                let err = FetchError::TimedOut(budget);
                log::error!("{err}");
                let mut state = self.state.lock().await;
                self.report_status_locked(&mut state, err.to_string());
            }
            Ok(Err(err)) => {
                log::error!("Weather fetch failed: {err}");
                let mut state = self.state.lock().await;
                self.report_status_locked(&mut state, err.to_string());
            }
            Ok(Ok(outcome)) => {
                if let Err(err) = self.ingest(outcome).await {
                    log::error!("Weather ingest failed: {err}");
                }
            }
        }
    }

    /// Validate and apply one fetch outcome.
    ///
    /// On success the stored snapshot is replaced wholesale and downstream
    /// consumers are notified; on any failure the existing snapshot stays
    /// untouched and the last fetch is marked invalid.
    pub async fn ingest(&self, outcome: FetchOutcome) -> Result<WeatherSnapshot, FetchError> {
        let mut state = self.state.lock().await;

        if !outcome.is_success() {
            state.last_fetch_valid = false;
            let err = FetchError::BadStatus {
                code: outcome.status,
                reason: outcome.reason,
            };
            self.report_status_locked(&mut state, err.to_string());
            return Err(err);
        }

        let snapshot = match WeatherSnapshot::from_provider_json(&outcome.body) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                state.last_fetch_valid = false;
                return Err(FetchError::MalformedPayload(err.reason));
            }
        };

        state.snapshot = Some(snapshot.clone());
        state.last_fetch_valid = true;
        state.config.city = snapshot.city.clone();

        self.report_status_locked(&mut state, "Weather Data received.".to_string());
        self.bus.publish(&EngineEvent::WeatherData {
            snapshot: snapshot.clone(),
        });

        if state.linked {
            self.send_update(&state, &snapshot).await;
        }

        self.persist_locked(&mut state).await;

        Ok(snapshot)
    }

    // --- Client-facing getters ---

    pub async fn polling_interval(&self) -> u64 {
        self.state.lock().await.config.update_interval
    }

    pub async fn city_id(&self) -> String {
        self.state.lock().await.config.city_id.clone()
    }

    pub async fn token(&self) -> String {
        self.state.lock().await.config.api_token.clone()
    }

    pub async fn is_linked(&self) -> bool {
        self.state.lock().await.linked
    }

    pub async fn is_overridden(&self) -> bool {
        self.state.lock().await.overridden
    }

    pub async fn current_override(&self) -> u8 {
        self.state.lock().await.config.current_override
    }

    /// Ordered (id, label) preset pairs for client display.
    pub fn override_labels(&self) -> Vec<(u8, &'static str)> {
        self.table.labels()
    }

    pub async fn config(&self) -> WeatherConfig {
        self.state.lock().await.config.clone()
    }

    pub async fn last_fetch_valid(&self) -> bool {
        self.state.lock().await.last_fetch_valid
    }

    pub async fn snapshot(&self) -> Option<WeatherSnapshot> {
        self.state.lock().await.snapshot.clone()
    }

    // --- Client-facing commands ---

    /// Change the poll interval. Takes effect on the cycle after the one
    /// already armed.
    pub async fn change_polling_interval(&self, interval: u64) -> Result<(), ConfigError> {
        if interval == 0 {
            return Err(ConfigError::ValidationError {
                key: "update_interval".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        let mut state = self.state.lock().await;
        if state.config.update_interval == interval {
            log::info!("Poll interval {interval}s is already active");
            return Ok(());
        }
        log::info!("Changing poll interval to {interval}s");
        state.config.update_interval = interval;
        state.dirty = true;
        Ok(())
    }

    /// Change the active location. While polling is running this restarts
    /// the scheduler so the new location is fetched immediately; while
    /// stopped it only updates state.
    pub async fn change_city_id(&self, city_id: impl Into<String>) {
        let city_id = city_id.into();
        {
            let mut state = self.state.lock().await;
            if state.config.city_id == city_id {
                log::info!("City id {city_id} is already active");
            } else {
                log::info!("Changing city id to {city_id}");
                state.config.city_id = city_id;
                state.dirty = true;
            }
        }

        if self.is_running() {
            self.stop_polling();
            self.start_polling();
        }
    }

    pub async fn change_token(&self, api_token: impl Into<String>) {
        let api_token = api_token.into();
        let mut state = self.state.lock().await;
        if state.config.api_token == api_token {
            log::info!("API token is already the active one");
            return;
        }
        log::info!("Changing API token");
        state.config.api_token = api_token;
        state.dirty = true;
    }

    /// Toggle forwarding of resolved values to the node graph.
    pub async fn change_linked(&self, linked: bool) {
        let mut state = self.state.lock().await;
        log::info!("Changing link state to {linked}");
        state.linked = linked;
        self.bus.publish(&EngineEvent::LinkChange { is_linked: linked });
    }

    /// Toggle override mode. Re-resolves and pushes immediately when linked.
    pub async fn change_overridden(&self, overridden: bool) {
        let mut state = self.state.lock().await;
        log::info!("Changing override state to {overridden}");
        state.overridden = overridden;
        self.bus.publish(&EngineEvent::OverrideChange {
            is_overridden: overridden,
        });
        if state.linked {
            self.push_resolved(&state).await;
        }
    }

    /// Select an override preset. Re-resolves and pushes immediately when
    /// linked; out-of-range ids are rejected.
    pub async fn change_current_override(&self, preset: u8) -> Result<(), InvalidPresetError> {
        self.table.validate(preset)?;

        let mut state = self.state.lock().await;
        if state.config.current_override == preset {
            log::info!("Override preset {preset} is already selected");
            return Ok(());
        }
        log::info!("Selecting override preset {preset}");
        state.config.current_override = preset;
        state.dirty = true;
        self.bus.publish(&EngineEvent::CurrentOverrideChange {
            current_override: preset,
        });
        if state.linked {
            self.push_resolved(&state).await;
        }
        Ok(())
    }

    /// Store the current location into a favorite slot.
    ///
    /// Only accepted after a valid fetch, so a favorite always captures a
    /// confirmed location name. Re-storing the same city id is a no-op.
    pub async fn change_fav(&self, slot: u8) -> Result<(), InvalidSlotError> {
        let mut state = self.state.lock().await;
        // Validates the slot index before the validity gate
        state.config.favorites.get(slot)?;

        if !state.last_fetch_valid {
            log::warn!("Not saving favorite {slot}, last response was invalid");
            return Ok(());
        }

        let city = state.config.city.clone();
        let city_id = state.config.city_id.clone();
        if !state.config.favorites.assign(slot, city.clone(), city_id.clone())? {
            log::info!("Favorite slot {slot} already holds city id {city_id}");
            return Ok(());
        }

        log::info!("Saved favorite {slot}: {city} ({city_id})");
        state.dirty = true;
        let favorites = state.config.favorites.clone();
        self.bus.publish(&EngineEvent::Favorites { favorites });
        self.persist_locked(&mut state).await;
        Ok(())
    }

    /// Start or stop polling from the durable auto-update flag.
    pub async fn change_auto_polling(&self, enable: bool) {
        let running = self.is_running();
        if enable && !running {
            self.start_polling();
            self.state.lock().await.dirty = true;
            log::info!("Auto update activated");
        } else if !enable && running {
            self.stop_polling();
            self.state.lock().await.dirty = true;
            log::info!("Auto update deactivated");
        } else {
            log::info!("Auto update state unchanged");
        }
        self.persist().await;
    }

    /// Re-broadcast the stored snapshot, if any.
    pub async fn emit_current_weather_data(&self) {
        let state = self.state.lock().await;
        if let Some(snapshot) = &state.snapshot {
            self.bus.publish(&EngineEvent::WeatherData {
                snapshot: snapshot.clone(),
            });
        }
    }

    /// Re-broadcast the favorites table.
    pub async fn emit_favs(&self) {
        let state = self.state.lock().await;
        self.bus.publish(&EngineEvent::Favorites {
            favorites: state.config.favorites.clone(),
        });
    }

    /// Write the configuration to durable storage, gated on the dirty flag
    /// and the validity of the most recent fetch.
    pub async fn persist(&self) {
        let mut state = self.state.lock().await;
        self.persist_locked(&mut state).await;
    }

    // --- Internals ---

    async fn persist_locked(&self, state: &mut EngineState) {
        if !state.dirty {
            log::debug!("No changes in config, skipping save");
            return;
        }
        if !state.last_fetch_valid {
            log::warn!("Refusing to save config after invalid response");
            return;
        }

        state.config.auto_updating = self.is_running();
        match self.store.save(&state.config).await {
            Ok(()) => {
                state.dirty = false;
                log::info!("Config saved to {}", self.store.path().display());
            }
            // Dirty stays set so a later persist can retry
            Err(err) => log::error!("Config save failed, keeping changes pending: {err}"),
        }
    }

    fn report_status_locked(&self, state: &mut EngineState, message: String) {
        if message == state.last_status_message {
            state.status_repeat += 1;
        } else {
            state.last_status_message = message.clone();
            state.status_repeat = 1;
        }
        self.bus.publish(&EngineEvent::StatusMessage {
            message,
            repeat: state.status_repeat,
        });
    }

    /// Push the resolved (weather id, cloud coverage) pair to the node graph.
    async fn push_resolved(&self, state: &EngineState) {
        let effective = match (&state.snapshot, state.overridden) {
            (Some(snapshot), _) => resolve_effective(
                state.overridden,
                state.config.current_override,
                &self.table,
                snapshot,
            ),
            (None, true) => match self.table.get(state.config.current_override) {
                Some(preset) => EffectiveWeather {
                    weather_id: preset.weather_id,
                    cloud_coverage: preset.cloud_coverage,
                },
                None => return,
            },
            // Nothing to resolve yet
            (None, false) => return,
        };

        for (path, value) in [
            ("Weather Data//WeatherID/0", json!(effective.weather_id)),
            (
                "Weather Data//CloudCoverage/0",
                json!(effective.cloud_coverage),
            ),
        ] {
            if let Err(err) = self.node_graph.set_property(NODE_PATH, path, value).await {
                log::warn!("Node graph write to {path} failed: {err}");
            }
        }
    }

    /// Push the full snapshot to the node graph, one property per field.
    /// Writes are best-effort; failures are logged and never retried.
    async fn send_update(&self, state: &EngineState, snapshot: &WeatherSnapshot) {
        log::debug!("Sending weather update to node graph");

        let effective = resolve_effective(
            state.overridden,
            state.config.current_override,
            &self.table,
            snapshot,
        );

        let writes = [
            ("City Info//CityName/0", json!(snapshot.city)),
            ("City Info//CityID/0", json!(snapshot.city_id)),
            ("City Info//Time/0", json!(local_time_iso(snapshot))),
            (
                "City Info//Timezone/0",
                json!(snapshot.timezone_offset as f64 / 3600.0),
            ),
            ("City Info//Latitude/0", json!(snapshot.latitude)),
            ("City Info//Longitude/0", json!(snapshot.longitude)),
            ("Weather Data//Temperature/0", json!(snapshot.temperature)),
            ("Weather Data//Humidity/0", json!(snapshot.humidity)),
            ("Weather Data//Pressure/0", json!(snapshot.pressure)),
            ("Weather Data//WindSpeed/0", json!(snapshot.wind_speed)),
            (
                "Weather Data//WindDirection/0",
                json!(snapshot.wind_direction),
            ),
            ("Weather Data//Weather/0", json!(snapshot.weather_main)),
            ("Weather Data//WeatherID/0", json!(effective.weather_id)),
            (
                "Weather Data//CloudCoverage/0",
                json!(effective.cloud_coverage),
            ),
        ];

        for (path, value) in writes {
            if let Err(err) = self.node_graph.set_property(NODE_PATH, path, value).await {
                log::warn!("Node graph write to {path} failed: {err}");
            }
        }
    }
}

/// Local time at the observed location, ISO-8601 without offset suffix.
fn local_time_iso(snapshot: &WeatherSnapshot) -> String {
    chrono::DateTime::from_timestamp(snapshot.observed_at + snapshot.timezone_offset, 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_default()
}
