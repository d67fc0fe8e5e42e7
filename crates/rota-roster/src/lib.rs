//! `rota-roster` — shift roster records with pattern-based range fill.
//!
//! # Overview
//!
//! Shift assignments are persisted to a SQLite `shifts` table, one row per
//! calendar date. The [`engine::RosterEngine`] fills an inclusive date range
//! by walking it day by day and assigning each still-empty date a label from
//! a fixed 21-day cycle (seven day shifts, then alternating night/off).
//!
//! A manual correction never replaces the generated assignment: it is stored
//! alongside it in `changed_work_type`, so reruns of the generator and the
//! original value both survive.

pub mod db;
pub mod engine;
pub mod error;
pub mod pattern;
pub mod store;
pub mod types;

pub use engine::RosterEngine;
pub use error::{Result, RosterError};
pub use store::ShiftStore;
pub use types::{GenerationReport, ShiftRecord, ShiftType};
