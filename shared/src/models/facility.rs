//! Facility Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of downstream facility, from the `facilities.type` column.
///
/// Unknown values are kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FacilityKind {
    Bottler,
    Buyer,
    Storage,
    Other(String),
}

impl FacilityKind {
    pub fn as_str(&self) -> &str {
        match self {
            FacilityKind::Bottler => "Bottler",
            FacilityKind::Buyer => "Buyer",
            FacilityKind::Storage => "Storage",
            FacilityKind::Other(s) => s,
        }
    }
}

impl From<String> for FacilityKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Bottler" => FacilityKind::Bottler,
            "Buyer" => FacilityKind::Buyer,
            "Storage" => FacilityKind::Storage,
            _ => FacilityKind::Other(s),
        }
    }
}

impl From<FacilityKind> for String {
    fn from(kind: FacilityKind) -> Self {
        match kind {
            FacilityKind::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for FacilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bottling / buying / storage site, destination for oil batches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    #[serde(deserialize_with = "crate::util::id_string")]
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: FacilityKind,
}

impl Facility {
    /// Label used in destination pickers
    pub fn label(&self) -> String {
        format!("{} ({}) - {}", self.name, self.location, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facility_type_column() {
        let facility: Facility = serde_json::from_str(
            r#"{"id":"f1","name":"Zaytoun Bottling","location":"Nablus","type":"Bottler"}"#,
        )
        .unwrap();
        assert_eq!(facility.kind, FacilityKind::Bottler);
        assert_eq!(facility.label(), "Zaytoun Bottling (Nablus) - Bottler");
    }

    #[test]
    fn test_unknown_facility_type_kept() {
        let facility: Facility = serde_json::from_str(
            r#"{"id":"f9","name":"Jaffa Refinery","location":"Jaffa","type":"Refinery"}"#,
        )
        .unwrap();
        assert_eq!(facility.kind, FacilityKind::Other("Refinery".into()));
        assert_eq!(facility.label(), "Jaffa Refinery (Jaffa) - Refinery");
        assert_eq!(
            serde_json::to_value(&facility).unwrap()["type"],
            serde_json::json!("Refinery")
        );
    }
}
