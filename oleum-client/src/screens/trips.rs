//! Trips screen

use crate::backend::{self, Backend, Select};
use shared::error::AppResult;
use shared::models::{Trip, tables};

/// Shipment timeline, most recent first
#[derive(Debug, Clone, Default)]
pub struct TripsScreen {
    trips: Vec<Trip>,
    loading: bool,
}

impl TripsScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Trips in the order the backend returned them
    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn mount(&mut self) {
        self.loading = true;
    }

    pub fn apply(&mut self, result: AppResult<Vec<Trip>>) {
        self.loading = false;
        self.trips = result.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to load trips");
            Vec::new()
        });
    }

    pub async fn refresh(&mut self, backend: &dyn Backend) {
        self.mount();
        let result = load_trips(backend).await;
        self.apply(result);
    }
}

/// All trips ordered by date descending; the ordering is the backend's
pub async fn load_trips(backend: &dyn Backend) -> AppResult<Vec<Trip>> {
    let query = Select::from(tables::TRIPS).order("date", false);
    Ok(backend::select_all(backend, &query).await?)
}
