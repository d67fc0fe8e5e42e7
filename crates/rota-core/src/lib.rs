//! `rota-core` — configuration and shared error type for the rota workspace.

pub mod config;
pub mod error;

pub use config::RotaConfig;
pub use error::{Result, RotaError};
