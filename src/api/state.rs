//! Application state for the Payslip Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::IndicatorStore;

/// Shared application state.
///
/// Holds the loaded indicator store, shared read-only across handlers.
#[derive(Clone)]
pub struct AppState {
    indicators: Arc<IndicatorStore>,
}

impl AppState {
    /// Creates a new application state around a loaded store.
    pub fn new(indicators: IndicatorStore) -> Self {
        Self {
            indicators: Arc::new(indicators),
        }
    }

    /// Returns the indicator store.
    pub fn indicators(&self) -> &IndicatorStore {
        &self.indicators
    }
}
