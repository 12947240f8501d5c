//! Press Model

use serde::{Deserialize, Serialize};

/// Olive press (maasara), destination for olive batches
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Press {
    #[serde(deserialize_with = "crate::util::id_string")]
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub capacity: Option<f64>,
}

impl Press {
    /// Label used in destination pickers
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.location)
    }
}
