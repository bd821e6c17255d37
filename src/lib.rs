//! # rosterdiff
//!
//! Season-over-season comparison of player roster exports: load a tabular
//! file, pair each player's ratings from two seasons, look up a player's
//! history, and filter/sort the result for display.

pub mod cli;
pub mod error;
pub mod config;
pub mod model;
pub mod data;
pub mod store;
pub mod compare;
pub mod history;
pub mod projection;
pub mod tier;
pub mod session;
pub mod output;
pub mod progress;
pub mod view;
pub mod commands;

pub use error::{Result, RosterError};
pub use compare::compare;
pub use history::history;
pub use projection::project;
pub use session::Session;

/// Current format version written into configuration files
pub const FORMAT_VERSION: &str = "1.0.0";
