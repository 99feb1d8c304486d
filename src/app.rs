//! Widget state and the refresh loop.
//!
//! All mutable state lives in [`App`]; the loop multiplexes a one-second
//! clock tick, a ten-minute weather poll, selection commands, and fetch
//! completions over a single task. Fetches run detached so a slow or
//! stalled request never delays a clock tick, and each request carries a
//! generation number so only the most recently issued one may update the
//! display.

use crate::catalog::CityEntry;
use crate::clock;
use crate::map::MapViewport;
use crate::settings::{Settings, SettingsStore, Unit};
use crate::surface::Surface;
use crate::weather::{WeatherClient, WeatherError, WeatherReading};
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

const CLOCK_TICK: Duration = Duration::from_secs(1);
const WEATHER_POLL: Duration = Duration::from_secs(600);
const FALLBACK_TEXT: &str = "Weather unavailable";

/// A selection change or shutdown request from the outside.
#[derive(Debug, Clone, Copy)]
pub enum Command {
    SelectCity(&'static CityEntry),
    SelectUnit(Unit),
    Quit,
}

type WeatherCompletion = (u64, Result<WeatherReading, WeatherError>);

/// The widget: current selection plus the surface it renders to.
pub struct App<S: Surface> {
    surface: S,
    store: SettingsStore,
    weather: WeatherClient,
    selection: Settings,
    weather_gen: u64,
    readings_tx: mpsc::Sender<WeatherCompletion>,
    readings_rx: Option<mpsc::Receiver<WeatherCompletion>>,
}

impl<S: Surface> App<S> {
    /// Build the widget with the selection loaded from the store.
    pub fn new(surface: S, store: SettingsStore, weather: WeatherClient) -> Self {
        let selection = store.load();
        let (readings_tx, readings_rx) = mpsc::channel(8);
        Self {
            surface,
            store,
            weather,
            selection,
            weather_gen: 0,
            readings_tx,
            readings_rx: Some(readings_rx),
        }
    }

    /// Apply command-line overrides before the first render. Persisted,
    /// so they behave exactly like a selection change.
    pub fn preselect(&mut self, city: Option<&'static CityEntry>, unit: Option<Unit>) {
        let mut changed = false;
        if let Some(city) = city {
            self.selection.city = city;
            changed = true;
        }
        if let Some(unit) = unit {
            self.selection.unit = unit;
            changed = true;
        }
        if changed {
            self.persist();
        }
    }

    /// Run until a quit command arrives or the command channel closes.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        let mut readings = match self.readings_rx.take() {
            Some(rx) => rx,
            None => return,
        };
        self.startup();

        let mut clock = time::interval_at(time::Instant::now() + CLOCK_TICK, CLOCK_TICK);
        clock.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut poll = time::interval_at(time::Instant::now() + WEATHER_POLL, WEATHER_POLL);
        poll.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = clock.tick() => self.redraw_time(),
                _ = poll.tick() => self.request_weather(),
                Some((generation, result)) = readings.recv() => {
                    self.apply_reading(generation, result)
                }
                command = commands.recv() => match command {
                    Some(Command::SelectCity(city)) => self.select_city(city),
                    Some(Command::SelectUnit(unit)) => self.select_unit(unit),
                    Some(Command::Quit) | None => break,
                },
            }
        }
    }

    /// Render a single frame, wait for its weather fetch, and stop.
    pub async fn render_once(&mut self) {
        self.startup();
        if let Some((generation, result)) = self.next_completion().await {
            self.apply_reading(generation, result);
        }
    }

    fn startup(&mut self) {
        self.surface
            .reflect_selection(self.selection.city.key, self.selection.unit);
        self.render_full();
    }

    /// One full frame: title, time, weather request, map viewport.
    /// Time and weather are independent; a failure in one never touches
    /// the other.
    fn render_full(&mut self) {
        self.surface.set_title(self.selection.city.label);
        self.redraw_time();
        self.request_weather();
        self.surface.set_map(&MapViewport::for_city(self.selection.city));
    }

    fn select_city(&mut self, city: &'static CityEntry) {
        self.selection.city = city;
        self.persist();
        self.surface
            .reflect_selection(city.key, self.selection.unit);
        self.render_full();
    }

    fn select_unit(&mut self, unit: Unit) {
        self.selection.unit = unit;
        self.persist();
        self.surface
            .reflect_selection(self.selection.city.key, unit);
        self.render_full();
    }

    fn persist(&self) {
        self.store
            .save(self.selection.city.key, self.selection.unit);
    }

    fn redraw_time(&mut self) {
        if let Some(text) = self.time_text_at(Utc::now()) {
            self.surface.set_time(&text);
        }
    }

    fn time_text_at(&self, instant: DateTime<Utc>) -> Option<String> {
        match clock::format_local_time(self.selection.city.tz, instant) {
            Ok(text) => Some(text),
            Err(e) => {
                // Unreachable for catalog zones, which are tested valid.
                log::warn!("cannot render clock for {}: {}", self.selection.city.key, e);
                None
            }
        }
    }

    /// Issue a detached fetch for the current selection. The generation
    /// stamp lets stale completions be recognized and dropped.
    fn request_weather(&mut self) {
        self.weather_gen += 1;
        let generation = self.weather_gen;
        let client = self.weather.clone();
        let tx = self.readings_tx.clone();
        let city = self.selection.city;
        let unit = self.selection.unit;
        log::debug!("weather request #{} for {}", generation, city.key);
        tokio::spawn(async move {
            let result = client.fetch_current(city.lat, city.lon, city.tz, unit).await;
            let _ = tx.send((generation, result)).await;
        });
    }

    fn apply_reading(&mut self, generation: u64, result: Result<WeatherReading, WeatherError>) {
        if generation != self.weather_gen {
            log::debug!(
                "dropping weather response #{} (current is #{})",
                generation,
                self.weather_gen
            );
            return;
        }
        match result {
            Ok(reading) => {
                let text = reading.display_text(self.selection.unit);
                self.surface.set_weather(&text);
            }
            Err(e) => {
                log::warn!(
                    "weather refresh for {} failed: {}",
                    self.selection.city.key,
                    e
                );
                self.surface.set_weather(FALLBACK_TEXT);
            }
        }
    }

    async fn next_completion(&mut self) -> Option<WeatherCompletion> {
        match self.readings_rx.as_mut() {
            Some(rx) => rx.recv().await,
            None => None,
        }
    }
}
