//! Trip Model

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shipment status as stored in the `trips.status` column.
///
/// Unknown strings are kept verbatim rather than rejected, so one odd row
/// never blanks the whole timeline.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TripStatus {
    InTransit,
    Delivered,
    Pending,
    Other(String),
}

/// Visual classification of a trip status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusTone {
    Green,
    Blue,
    Yellow,
}

impl TripStatus {
    pub fn as_str(&self) -> &str {
        match self {
            TripStatus::InTransit => "In Transit",
            TripStatus::Delivered => "Delivered",
            TripStatus::Pending => "Pending",
            TripStatus::Other(s) => s,
        }
    }

    /// Delivered is green, in transit is blue, everything else is yellow
    pub fn tone(&self) -> StatusTone {
        match self {
            TripStatus::Delivered => StatusTone::Green,
            TripStatus::InTransit => StatusTone::Blue,
            TripStatus::Pending | TripStatus::Other(_) => StatusTone::Yellow,
        }
    }
}

impl From<String> for TripStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "In Transit" => TripStatus::InTransit,
            "Delivered" => TripStatus::Delivered,
            "Pending" => TripStatus::Pending,
            _ => TripStatus::Other(s),
        }
    }
}

impl From<TripStatus> for String {
    fn from(status: TripStatus) -> Self {
        match status {
            TripStatus::Other(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row of `trips` (read-only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(deserialize_with = "crate::util::id_string")]
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub status: TripStatus,
    pub date: String,
    #[serde(default)]
    pub driver_name: Option<String>,
}

impl Trip {
    /// Calendar date of the trip, if the column parses as one
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        let raw = self.date.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.date_naive());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt.date());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
            return Some(dt.date());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }

    /// Date for display; falls back to the raw column text
    pub fn display_date(&self) -> String {
        self.calendar_date()
            .map(|d| d.format("%d %b %Y").to_string())
            .unwrap_or_else(|| self.date.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn trip(status: &str, date: &str) -> Trip {
        serde_json::from_value(json!({
            "id": "t1",
            "origin": "Jenin",
            "destination": "Haifa Port",
            "status": status,
            "date": date,
        }))
        .unwrap()
    }

    #[test]
    fn test_status_tones() {
        assert_eq!(trip("Delivered", "2024-10-01").status.tone(), StatusTone::Green);
        assert_eq!(trip("In Transit", "2024-10-01").status.tone(), StatusTone::Blue);
        assert_eq!(trip("Pending", "2024-10-01").status.tone(), StatusTone::Yellow);
    }

    #[test]
    fn test_pending_matches_unknown_status() {
        let pending = trip("Pending", "2024-10-01");
        let unknown = trip("Lost at sea", "2024-10-01");
        assert_eq!(unknown.status, TripStatus::Other("Lost at sea".into()));
        assert_eq!(pending.status.tone(), unknown.status.tone());
    }

    #[test]
    fn test_status_serializes_back_verbatim() {
        let t = trip("Lost at sea", "2024-10-01");
        let value = serde_json::to_value(&t).unwrap();
        assert_eq!(value["status"], "Lost at sea");
        let t = trip("In Transit", "2024-10-01");
        let value = serde_json::to_value(&t).unwrap();
        assert_eq!(value["status"], "In Transit");
    }

    #[test]
    fn test_display_date() {
        assert_eq!(trip("Pending", "2024-10-01").display_date(), "01 Oct 2024");
        assert_eq!(
            trip("Pending", "2024-10-01T14:30:00+00:00").display_date(),
            "01 Oct 2024"
        );
        assert_eq!(
            trip("Pending", "2024-10-01T14:30:00.123").display_date(),
            "01 Oct 2024"
        );
        assert_eq!(trip("Pending", "next week").display_date(), "next week");
    }

    #[test]
    fn test_driver_name_optional() {
        let t = trip("Pending", "2024-10-01");
        assert_eq!(t.driver_name, None);
    }
}
