//! Batch Models
//!
//! Batches are insert-only from the client: the `New*` payloads are what
//! gets written, the row types mirror what the store echoes back.

use super::tables;
use super::user::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What is being shipped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderKind {
    #[default]
    Olives,
    Oil,
}

impl OrderKind {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            OrderKind::Olives => OrderKind::Oil,
            OrderKind::Oil => OrderKind::Olives,
        }
    }

    /// Collection holding the valid destinations for this kind
    pub fn destination_table(self) -> &'static str {
        match self {
            OrderKind::Olives => tables::PRESSES,
            OrderKind::Oil => tables::FACILITIES,
        }
    }

    /// Collection batches of this kind are inserted into
    pub fn batch_table(self) -> &'static str {
        match self {
            OrderKind::Olives => tables::OLIVE_BATCHES,
            OrderKind::Oil => tables::OIL_BATCHES,
        }
    }

    /// Name of the quantity being entered
    pub fn quantity_name(self) -> &'static str {
        match self {
            OrderKind::Olives => "weight",
            OrderKind::Oil => "volume",
        }
    }

    /// Unit of the quantity
    pub fn unit(self) -> &'static str {
        match self {
            OrderKind::Olives => "kg",
            OrderKind::Oil => "L",
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderKind::Olives => f.write_str("olives"),
            OrderKind::Oil => f.write_str("oil"),
        }
    }
}

/// Insert payload for `olive_batches`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOliveBatch {
    pub user_id: UserId,
    pub press_id: String,
    pub weight_kg: f64,
}

/// Insert payload for `oil_batches`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOilBatch {
    pub user_id: UserId,
    pub facility_id: String,
    pub volume_liters: f64,
}

/// One batch ready to be inserted
#[derive(Debug, Clone, PartialEq)]
pub enum NewBatch {
    Olives(NewOliveBatch),
    Oil(NewOilBatch),
}

impl NewBatch {
    /// Build the payload for `kind` from the form values
    pub fn new(kind: OrderKind, user_id: UserId, destination_id: String, quantity: f64) -> Self {
        match kind {
            OrderKind::Olives => NewBatch::Olives(NewOliveBatch {
                user_id,
                press_id: destination_id,
                weight_kg: quantity,
            }),
            OrderKind::Oil => NewBatch::Oil(NewOilBatch {
                user_id,
                facility_id: destination_id,
                volume_liters: quantity,
            }),
        }
    }

    pub fn kind(&self) -> OrderKind {
        match self {
            NewBatch::Olives(_) => OrderKind::Olives,
            NewBatch::Oil(_) => OrderKind::Oil,
        }
    }

    /// Target collection
    pub fn table(&self) -> &'static str {
        self.kind().batch_table()
    }

    /// JSON row to insert
    pub fn to_row(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            NewBatch::Olives(b) => serde_json::to_value(b),
            NewBatch::Oil(b) => serde_json::to_value(b),
        }
    }
}
