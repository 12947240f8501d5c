//! Network screen

use crate::backend::{self, Backend, Select};
use shared::error::AppResult;
use shared::models::{Facility, NetworkEntry, NetworkFilter, Press, merge_network, tables};

/// Result of the two concurrent reads
#[derive(Debug, Clone)]
pub struct NetworkLoad {
    pub presses: AppResult<Vec<Press>>,
    pub facilities: AppResult<Vec<Facility>>,
}

/// Directory of presses and facilities
#[derive(Debug, Clone, Default)]
pub struct NetworkScreen {
    entries: Vec<NetworkEntry>,
    filter: NetworkFilter,
    loading: bool,
}

impl NetworkScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn filter(&self) -> NetworkFilter {
        self.filter
    }

    /// All merged entries, presses first
    pub fn entries(&self) -> &[NetworkEntry] {
        &self.entries
    }

    /// Start loading
    pub fn mount(&mut self) {
        self.loading = true;
    }

    /// Merge a load. A failed collection is logged and contributes nothing.
    pub fn apply(&mut self, load: NetworkLoad) {
        let presses = load.presses.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to load presses");
            Vec::new()
        });
        let facilities = load.facilities.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Failed to load facilities");
            Vec::new()
        });
        self.entries = merge_network(presses, facilities);
        self.loading = false;
    }

    /// Client-side only; never re-fetches
    pub fn set_filter(&mut self, filter: NetworkFilter) {
        self.filter = filter;
    }

    pub fn cycle_filter(&mut self) {
        self.filter = self.filter.next();
    }

    /// Entries passing the current filter
    pub fn visible(&self) -> Vec<&NetworkEntry> {
        self.entries
            .iter()
            .filter(|entry| self.filter.matches(entry))
            .collect()
    }

    pub async fn refresh(&mut self, backend: &dyn Backend) {
        self.mount();
        let load = load_network(backend).await;
        self.apply(load);
    }
}

/// Read presses and facilities concurrently
pub async fn load_network(backend: &dyn Backend) -> NetworkLoad {
    let press_query = Select::from(tables::PRESSES);
    let facility_query = Select::from(tables::FACILITIES);
    let (presses, facilities) = futures::join!(
        backend::select_all::<Press>(backend, &press_query),
        backend::select_all::<Facility>(backend, &facility_query),
    );
    NetworkLoad {
        presses: presses.map_err(Into::into),
        facilities: facilities.map_err(Into::into),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::AppError;
    use shared::models::FacilityKind;

    fn press(id: &str) -> Press {
        Press {
            id: id.into(),
            name: id.to_uppercase(),
            location: "Tubas".into(),
            capacity: None,
        }
    }

    fn facility(id: &str) -> Facility {
        Facility {
            id: id.into(),
            name: id.to_uppercase(),
            location: "Hebron".into(),
            kind: FacilityKind::Buyer,
        }
    }

    #[test]
    fn test_failed_collection_contributes_nothing() {
        let mut screen = NetworkScreen::new();
        screen.mount();
        screen.apply(NetworkLoad {
            presses: Err(AppError::transport("timeout")),
            facilities: Ok(vec![facility("f1"), facility("f2")]),
        });
        assert!(!screen.is_loading());
        assert_eq!(screen.entries().len(), 2);
        assert!(screen.entries().iter().all(|e| !e.is_press()));
    }

    #[test]
    fn test_filter_is_client_side() {
        let mut screen = NetworkScreen::new();
        screen.apply(NetworkLoad {
            presses: Ok(vec![press("p1"), press("p2")]),
            facilities: Ok(vec![facility("f1"), facility("f2"), facility("f3")]),
        });
        assert_eq!(screen.visible().len(), 5);
        screen.set_filter(NetworkFilter::Press);
        assert_eq!(screen.visible().len(), 2);
        screen.cycle_filter();
        assert_eq!(screen.filter(), NetworkFilter::Facility);
        assert_eq!(screen.visible().len(), 3);
    }
}
