//! Meetric: rule-based meeting transcript analysis.
//!
//! The `analysis` module is the engine (pure, deterministic, no I/O);
//! `transcript` handles CSV intake, `report` renders bundles, `db` keeps
//! run history, and `api`/`cli` are the two entry points around them.

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod global;
pub mod report;
pub mod transcript;
