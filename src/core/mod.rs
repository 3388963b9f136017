//! Core type definitions, errors and configuration

pub mod config;
pub mod error;
pub mod types;

pub use config::GameConfig;
pub use error::{Result, ZombsoleError};
pub use types::{Position, ThingId, Tick, MAX_LIFE};
