//! Application state for an interactive viewing session
//!
//! The session owns the loaded rows plus every piece of user-chosen view
//! state. Setters only record input; the comparison, history and picker
//! lists are recomputed from the current rows on every read.

use crate::compare::compare;
use crate::config::ViewerConfig;
use crate::data::load_rows;
use crate::error::Result;
use crate::history::{history, player_options, seasons};
use crate::model::{ComparisonRecord, PlayerOption, Row};
use crate::projection::{project, SortConfig, SortField};
use crate::store::{LoadTicket, SnapshotStore};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};

/// Result of a background parse, tagged with the load it belongs to
struct LoadOutcome {
    ticket: LoadTicket,
    source: PathBuf,
    result: std::result::Result<Vec<Row>, String>,
}

pub struct Session {
    config: ViewerConfig,
    store: SnapshotStore,
    from_season: String,
    to_season: String,
    filter: String,
    sort: Option<SortConfig>,
    selected_player: Option<String>,
    last_error: Option<String>,
    pending: usize,
    load_tx: Sender<LoadOutcome>,
    load_rx: Receiver<LoadOutcome>,
}

impl Session {
    pub fn new(config: ViewerConfig) -> Self {
        let (load_tx, load_rx) = channel();
        Self {
            config,
            store: SnapshotStore::new(),
            from_season: String::new(),
            to_season: String::new(),
            filter: String::new(),
            sort: None,
            selected_player: None,
            last_error: None,
            pending: 0,
            load_tx,
            load_rx,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn rows(&self) -> &[Row] {
        self.store.rows()
    }

    /// Replace rows directly, bypassing file parsing
    pub fn set_rows(&mut self, source: PathBuf, rows: Vec<Row>) {
        self.store.replace(source, rows);
        self.last_error = None;
    }

    /// Parse `path` on the calling thread. On failure the previous rows
    /// stay in place and the error is both returned and remembered.
    pub fn load_blocking(&mut self, path: &Path) -> Result<usize> {
        let ticket = self.store.begin_load();
        match load_rows(&self.config, path) {
            Ok(rows) => {
                let count = rows.len();
                self.store.commit(ticket, path.to_path_buf(), rows);
                self.last_error = None;
                Ok(count)
            }
            Err(e) => {
                self.store.abandon(ticket);
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Start parsing `path` on the rayon pool. The outcome is applied by
    /// `poll_loads` or `wait_for_loads`; outcomes of loads superseded by a
    /// newer one are dropped.
    pub fn load_in_background(&mut self, path: &Path) -> LoadTicket {
        let ticket = self.store.begin_load();
        let config = self.config.clone();
        let source = path.to_path_buf();
        let tx = self.load_tx.clone();
        self.pending += 1;

        log::debug!("Starting background load of {} (generation {})", source.display(), ticket.generation());
        rayon::spawn(move || {
            let result = load_rows(&config, &source).map_err(|e| e.to_string());
            // the receiver lives as long as the session
            let _ = tx.send(LoadOutcome { ticket, source, result });
        });
        ticket
    }

    /// Apply every finished load without blocking. Returns how many were applied.
    pub fn poll_loads(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.load_rx.try_recv() {
            self.apply(outcome);
            applied += 1;
        }
        applied
    }

    /// Block until every started background load has reported
    pub fn wait_for_loads(&mut self) {
        while self.pending > 0 {
            match self.load_rx.recv() {
                Ok(outcome) => self.apply(outcome),
                Err(_) => break,
            }
        }
    }

    pub fn pending_loads(&self) -> usize {
        self.pending
    }

    fn apply(&mut self, outcome: LoadOutcome) {
        self.pending = self.pending.saturating_sub(1);
        match outcome.result {
            Ok(rows) => {
                if self.store.commit(outcome.ticket, outcome.source, rows) {
                    self.last_error = None;
                }
            }
            Err(message) => {
                if self.store.abandon(outcome.ticket) {
                    log::warn!("Load of {} failed: {}", outcome.source.display(), message);
                    self.last_error = Some(message);
                } else {
                    log::debug!("Ignoring failure of superseded load {}", outcome.source.display());
                }
            }
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn set_from_season(&mut self, season: impl Into<String>) {
        self.from_season = season.into();
    }

    pub fn set_to_season(&mut self, season: impl Into<String>) {
        self.to_season = season.into();
    }

    pub fn seasons_selected(&self) -> (&str, &str) {
        (&self.from_season, &self.to_season)
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Apply a header click on `field`
    pub fn request_sort(&mut self, field: SortField) -> SortConfig {
        let next = SortConfig::request(self.sort, field);
        self.sort = Some(next);
        next
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    pub fn sort(&self) -> Option<SortConfig> {
        self.sort
    }

    pub fn select_player(&mut self, player: impl Into<String>) {
        let player = player.into();
        self.selected_player = (!player.trim().is_empty()).then_some(player);
    }

    pub fn clear_player(&mut self) {
        self.selected_player = None;
    }

    pub fn selected_player(&self) -> Option<&str> {
        self.selected_player.as_deref()
    }

    /// Filtered and sorted comparison of the two selected seasons
    pub fn comparison(&self) -> Vec<ComparisonRecord> {
        let records = compare(self.rows(), &self.from_season, &self.to_season);
        project(&records, &self.filter, self.sort)
    }

    /// History of the selected player
    pub fn history(&self) -> Vec<&Row> {
        history(self.rows(), self.selected_player.as_deref())
    }

    pub fn player_options(&self) -> Vec<PlayerOption> {
        player_options(self.rows())
    }

    pub fn seasons(&self) -> Vec<i64> {
        seasons(self.rows())
    }
}
