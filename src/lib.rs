//! User Records Server Library
//!
//! This module exports the core types and functions for testing and reuse.

pub mod config;
pub mod constants;
pub mod error;
pub mod import;
pub mod models;
pub mod routes;
pub mod stats;
pub mod store;

pub use config::Config;
pub use error::{AppError, Result};
pub use store::{open_store, SharedStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub config: Config,
}

impl AppState {
    /// Create a new AppState with the given store and configuration
    pub fn new(store: SharedStore, config: Config) -> Self {
        Self { store, config }
    }
}
