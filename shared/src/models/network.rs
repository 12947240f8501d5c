//! Network directory entries
//!
//! Presses and facilities fetched from two collections are merged into one
//! list. The origin collection is carried by the variant, not by a marker
//! field on the row.

use super::facility::Facility;
use super::press::Press;

/// One partner in the network directory
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkEntry {
    Press(Press),
    Facility(Facility),
}

impl NetworkEntry {
    pub fn id(&self) -> &str {
        match self {
            NetworkEntry::Press(p) => &p.id,
            NetworkEntry::Facility(f) => &f.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            NetworkEntry::Press(p) => &p.name,
            NetworkEntry::Facility(f) => &f.name,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            NetworkEntry::Press(p) => &p.location,
            NetworkEntry::Facility(f) => &f.location,
        }
    }

    /// Badge text: "Press", or the facility type
    pub fn badge(&self) -> &str {
        match self {
            NetworkEntry::Press(_) => "Press",
            NetworkEntry::Facility(f) => f.kind.as_str(),
        }
    }

    pub fn is_press(&self) -> bool {
        matches!(self, NetworkEntry::Press(_))
    }
}

/// Merge fetched collections: presses first, then facilities, each in
/// the order the store returned them.
pub fn merge_network(presses: Vec<Press>, facilities: Vec<Facility>) -> Vec<NetworkEntry> {
    presses
        .into_iter()
        .map(NetworkEntry::Press)
        .chain(facilities.into_iter().map(NetworkEntry::Facility))
        .collect()
}

/// Category filter of the network screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NetworkFilter {
    #[default]
    All,
    Press,
    Facility,
}

impl NetworkFilter {
    /// Filters in display order
    pub const ALL: [NetworkFilter; 3] = [
        NetworkFilter::All,
        NetworkFilter::Press,
        NetworkFilter::Facility,
    ];

    pub fn label(self) -> &'static str {
        match self {
            NetworkFilter::All => "All Locations",
            NetworkFilter::Press => "Presses",
            NetworkFilter::Facility => "Facilities",
        }
    }

    pub fn matches(self, entry: &NetworkEntry) -> bool {
        match self {
            NetworkFilter::All => true,
            NetworkFilter::Press => matches!(entry, NetworkEntry::Press(_)),
            NetworkFilter::Facility => matches!(entry, NetworkEntry::Facility(_)),
        }
    }

    /// Next filter, wrapping around
    pub fn next(self) -> Self {
        match self {
            NetworkFilter::All => NetworkFilter::Press,
            NetworkFilter::Press => NetworkFilter::Facility,
            NetworkFilter::Facility => NetworkFilter::All,
        }
    }
}
