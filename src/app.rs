//! Application state management for the ZiaMet dashboard
//!
//! This module holds the view state: the current station list, the selected
//! station, the search filter, the chart measurement and the loading flag.
//! Derived values (the filtered list, the plotted trend field) are computed
//! on every read and never stored.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::cli::StartupConfig;
use crate::data::{
    filter_stations, MeasurementType, StationProvider, StationSnapshot, TrendField,
};
use crate::refresh::{RefreshHandle, RefreshMessage, RefreshSchedule};

/// How keyboard input is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are commands
    Normal,
    /// Keys edit the search term
    Search,
}

/// Main application struct managing view state and data
pub struct App {
    /// Station list from the latest completed fetch
    pub stations: Vec<StationSnapshot>,
    /// Id of the selected station
    selected_id: Option<String>,
    /// Current search filter
    pub search_term: String,
    /// True while a fetch is in flight
    pub loading: bool,
    /// Which trend field the chart plots
    pub measurement_type: MeasurementType,
    /// Whether keys edit the search term
    pub input_mode: InputMode,
    /// Whether the station list is shown on narrow terminals
    pub sidebar_open: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Timestamp of last applied refresh
    pub last_refresh: Option<DateTime<Local>>,
    mounted: bool,
    provider: Arc<dyn StationProvider>,
    refresh: RefreshHandle,
    schedule: RefreshSchedule,
}

impl App {
    /// Creates a new App backed by `provider`
    pub fn new(provider: Arc<dyn StationProvider>) -> Self {
        Self {
            stations: Vec::new(),
            selected_id: None,
            search_term: String::new(),
            loading: true,
            measurement_type: MeasurementType::default(),
            input_mode: InputMode::Normal,
            sidebar_open: false,
            show_help: false,
            should_quit: false,
            last_refresh: None,
            mounted: false,
            provider,
            refresh: RefreshHandle::new(),
            schedule: RefreshSchedule::new(None),
        }
    }

    /// Creates a new App with CLI startup settings and an optional
    /// auto-refresh interval
    pub fn with_startup_config(
        provider: Arc<dyn StationProvider>,
        config: &StartupConfig,
        auto_refresh: Option<Duration>,
    ) -> Self {
        let mut app = Self::new(provider);

        if let Some(term) = &config.search_term {
            app.set_search_term(term.clone());
        }
        if let Some(measurement) = config.measurement {
            app.set_measurement_type(measurement);
        }
        app.schedule = RefreshSchedule::new(auto_refresh);

        app
    }

    /// Triggers the initial refresh; later calls do nothing
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.request_refresh();
    }

    /// Number of refreshes started in the background
    pub fn refreshes_requested(&self) -> u64 {
        self.refresh.requests_started()
    }

    /// Fetches stations and applies them before returning
    pub async fn refresh(&mut self) {
        self.loading = true;
        let stations = self.provider.get_stations().await;
        self.apply_stations(stations);
    }

    /// Starts a background refresh; the result is applied by
    /// [`App::poll_refresh`] or [`App::wait_for_refresh`]
    ///
    /// Must be called from within a tokio runtime. Overlapping requests all
    /// complete and the last one to finish wins.
    pub fn request_refresh(&mut self) {
        self.loading = true;
        self.schedule.mark(Instant::now());
        self.refresh.spawn_fetch(self.provider.clone());
        tracing::info!(
            request = self.refresh.requests_started(),
            "Refreshing station data"
        );
    }

    /// Applies every completed background fetch; returns true if any was
    /// applied
    pub fn poll_refresh(&mut self) -> bool {
        let mut applied = false;
        while let Some(message) = self.refresh.try_recv() {
            self.apply_message(message);
            applied = true;
        }
        applied
    }

    /// Waits for the next background fetch and applies it
    pub async fn wait_for_refresh(&mut self) {
        if let Some(message) = self.refresh.recv().await {
            self.apply_message(message);
        }
    }

    /// Starts a refresh if the auto-refresh interval has elapsed
    pub fn tick(&mut self) {
        if !self.loading && self.schedule.is_due(Instant::now()) {
            self.request_refresh();
        }
    }

    fn apply_message(&mut self, message: RefreshMessage) {
        match message {
            RefreshMessage::StationsLoaded { request, stations } => {
                tracing::info!(request, count = stations.len(), "Station data updated");
                self.apply_stations(stations);
            }
        }
    }

    /// Replaces the station list wholesale
    ///
    /// Selects the first station only when nothing was selected before.
    fn apply_stations(&mut self, stations: Vec<StationSnapshot>) {
        self.stations = stations;
        if self.selected_id.is_none() {
            self.selected_id = self.stations.first().map(|s| s.id.clone());
        }
        self.loading = false;
        self.last_refresh = Some(Local::now());
    }

    /// Selects the station with `id`; ignored if it is not in the list
    pub fn select(&mut self, id: &str) -> bool {
        if self.stations.iter().any(|s| s.id == id) {
            self.selected_id = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Id of the selected station, which may be stale after a refresh
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// The selected station as it appears in the current list
    pub fn selected_station(&self) -> Option<&StationSnapshot> {
        let id = self.selected_id.as_deref()?;
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Stations matching the search term, in list order
    pub fn filtered_stations(&self) -> Vec<&StationSnapshot> {
        filter_stations(&self.stations, &self.search_term)
    }

    pub fn set_measurement_type(&mut self, measurement: MeasurementType) {
        self.measurement_type = measurement;
    }

    pub fn toggle_measurement_type(&mut self) {
        self.measurement_type = self.measurement_type.toggled();
    }

    /// The trend field the chart plots
    pub fn active_trend_field(&self) -> TrendField {
        self.measurement_type.trend_field()
    }

    /// The plotted values of `station`'s trend series, in order
    pub fn active_trend_values(&self, station: &StationSnapshot) -> Vec<f64> {
        let field = self.active_trend_field();
        station.trends.iter().map(|p| field.value(p)).collect()
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_open = !self.sidebar_open;
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `q`: Quit (`Ctrl-C` quits from any mode)
    /// - `Up`/`k`, `Down`/`j`: Select previous/next station in the filtered list
    /// - `Enter`: Confirm selection and close the station list overlay
    /// - `/`: Edit the search term
    /// - `r`: Refresh data
    /// - `t`/`Tab`: Toggle the chart measurement
    /// - `s`: Show/hide the station list
    /// - `?`: Toggle help
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match self.input_mode {
            InputMode::Search => match key_event.code {
                KeyCode::Enter => {
                    self.input_mode = InputMode::Normal;
                }
                KeyCode::Esc => {
                    self.search_term.clear();
                    self.input_mode = InputMode::Normal;
                }
                KeyCode::Backspace => {
                    self.search_term.pop();
                }
                KeyCode::Char(c) => {
                    self.search_term.push(c);
                }
                _ => {}
            },
            InputMode::Normal => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Esc => {
                    self.sidebar_open = false;
                }
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_selection_up();
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_selection_down();
                }
                KeyCode::Enter => {
                    if let Some(id) = self.cursor_target() {
                        self.select(&id);
                    }
                    self.sidebar_open = false;
                }
                KeyCode::Char('/') => {
                    self.input_mode = InputMode::Search;
                }
                KeyCode::Char('r') => {
                    self.request_refresh();
                }
                KeyCode::Char('t') | KeyCode::Tab => {
                    self.toggle_measurement_type();
                }
                KeyCode::Char('s') => {
                    self.toggle_sidebar();
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
        }
    }

    /// Position of the selected station within the filtered list
    pub fn selected_filtered_index(&self) -> Option<usize> {
        let id = self.selected_id.as_deref()?;
        self.filtered_stations().iter().position(|s| s.id == id)
    }

    /// The station Enter would select: the current one if visible, else the
    /// first visible one
    fn cursor_target(&self) -> Option<String> {
        let filtered = self.filtered_stations();
        let index = self.selected_filtered_index().unwrap_or(0);
        filtered.get(index).map(|s| s.id.clone())
    }

    /// Selects the previous station in the filtered list, wrapping to bottom
    fn move_selection_up(&mut self) {
        let count = self.filtered_stations().len();
        if count == 0 {
            return;
        }
        let index = match self.selected_filtered_index() {
            Some(0) | None => count - 1,
            Some(i) => i - 1,
        };
        self.select_filtered(index);
    }

    /// Selects the next station in the filtered list, wrapping to top
    fn move_selection_down(&mut self) {
        let count = self.filtered_stations().len();
        if count == 0 {
            return;
        }
        let index = match self.selected_filtered_index() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.select_filtered(index);
    }

    fn select_filtered(&mut self, index: usize) {
        let id = self.filtered_stations().get(index).map(|s| s.id.clone());
        if let Some(id) = id {
            self.select(&id);
        }
    }
}
