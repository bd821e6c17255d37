//! In-memory snapshot store with load generations

use crate::model::Row;
use std::path::{Path, PathBuf};

/// Proof that a load was started; only the newest ticket may commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Holds the full set of rows from the most recent successful load.
/// Rows are replaced wholesale, never merged.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    rows: Vec<Row>,
    source: Option<PathBuf>,
    started: u64,
    settled: u64,
    committed: u64,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Generation of the rows currently held (0 before the first load)
    pub fn generation(&self) -> u64 {
        self.committed
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.started += 1;
        LoadTicket(self.started)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.started
    }

    /// True while the newest started load has neither committed nor failed
    pub fn is_loading(&self) -> bool {
        self.started != self.settled
    }

    /// Settle a failed load so the store no longer reports it as pending
    pub fn abandon(&mut self, ticket: LoadTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.settled = ticket.0;
        true
    }

    /// Install rows from a finished load. Stale tickets are ignored and
    /// `false` is returned.
    pub fn commit(&mut self, ticket: LoadTicket, source: PathBuf, rows: Vec<Row>) -> bool {
        if !self.is_current(ticket) {
            log::debug!(
                "Discarding stale load of {} (generation {}, newest {})",
                source.display(),
                ticket.0,
                self.started
            );
            return false;
        }

        log::debug!("Committed {} rows from {} (generation {})", rows.len(), source.display(), ticket.0);
        self.rows = rows;
        self.source = Some(source);
        self.committed = ticket.0;
        self.settled = ticket.0;
        true
    }

    /// Synchronous replacement: begin and commit in one step
    pub fn replace(&mut self, source: PathBuf, rows: Vec<Row>) {
        let ticket = self.begin_load();
        self.commit(ticket, source, rows);
    }
}
