//! New-Order screen
//!
//! Two modes, olives to a press or oil to a facility. Each mode change loads
//! that mode's destinations; submission inserts exactly one batch row.

use crate::backend::{self, Backend, Select};
use shared::error::{AppError, AppResult};
use shared::models::{Facility, NewBatch, OrderKind, Press, UserId};

/// Shown after a successful insert
pub const SUCCESS_MESSAGE: &str = "Batch dispatched successfully!";

/// Destinations fetched for one mode
#[derive(Debug, Clone, PartialEq)]
pub enum Destinations {
    Presses(Vec<Press>),
    Facilities(Vec<Facility>),
}

impl Destinations {
    pub fn kind(&self) -> OrderKind {
        match self {
            Destinations::Presses(_) => OrderKind::Olives,
            Destinations::Facilities(_) => OrderKind::Oil,
        }
    }
}

/// One entry of the destination picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestinationOption {
    pub id: String,
    pub label: String,
}

/// Feedback line under the form
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Error(AppError),
}

impl Notice {
    pub fn text(&self) -> String {
        match self {
            Notice::Success(msg) => msg.clone(),
            Notice::Error(e) if e.code.is_local() => e.display_message().to_string(),
            Notice::Error(e) => format!("Error: {}", e.display_message()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// State of the order form
#[derive(Debug, Clone)]
pub struct NewOrderScreen {
    user_id: UserId,
    kind: OrderKind,
    /// Olive weight in kg, as typed
    pub weight: String,
    /// Oil volume in liters, as typed
    pub volume: String,
    selected: Option<String>,
    presses: Vec<Press>,
    facilities: Vec<Facility>,
    fetching: bool,
    submitting: bool,
    notice: Option<Notice>,
}

impl NewOrderScreen {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            kind: OrderKind::default(),
            weight: String::new(),
            volume: String::new(),
            selected: None,
            presses: Vec::new(),
            facilities: Vec::new(),
            fetching: false,
            submitting: false,
            notice: None,
        }
    }

    pub fn kind(&self) -> OrderKind {
        self.kind
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The quantity field of the current mode
    pub fn quantity(&self) -> &str {
        match self.kind {
            OrderKind::Olives => &self.weight,
            OrderKind::Oil => &self.volume,
        }
    }

    pub fn quantity_mut(&mut self) -> &mut String {
        match self.kind {
            OrderKind::Olives => &mut self.weight,
            OrderKind::Oil => &mut self.volume,
        }
    }

    /// Start the destination fetch for the current mode
    pub fn mount(&mut self) -> OrderKind {
        self.fetching = true;
        self.kind
    }

    /// Switch mode; returns the kind to fetch when it changed
    pub fn set_kind(&mut self, kind: OrderKind) -> Option<OrderKind> {
        if kind == self.kind {
            return None;
        }
        self.kind = kind;
        self.selected = None;
        Some(self.mount())
    }

    /// Apply a destination fetch. Results for a mode that is no longer
    /// current are dropped.
    pub fn apply_destinations(&mut self, kind: OrderKind, result: AppResult<Destinations>) {
        if kind != self.kind {
            tracing::debug!(%kind, current = %self.kind, "Dropping stale destinations");
            return;
        }
        self.fetching = false;
        match result {
            Ok(Destinations::Presses(presses)) => self.presses = presses,
            Ok(Destinations::Facilities(facilities)) => self.facilities = facilities,
            Err(e) => {
                tracing::error!(%kind, error = %e, "Error fetching targets");
                match kind {
                    OrderKind::Olives => self.presses.clear(),
                    OrderKind::Oil => self.facilities.clear(),
                }
            }
        }
    }

    /// Picker entries for the current mode
    pub fn destinations(&self) -> Vec<DestinationOption> {
        match self.kind {
            OrderKind::Olives => self
                .presses
                .iter()
                .map(|p| DestinationOption {
                    id: p.id.clone(),
                    label: p.label(),
                })
                .collect(),
            OrderKind::Oil => self
                .facilities
                .iter()
                .map(|f| DestinationOption {
                    id: f.id.clone(),
                    label: f.label(),
                })
                .collect(),
        }
    }

    /// Placeholder line of the picker
    pub fn destination_placeholder(&self) -> &'static str {
        match (self.fetching, self.kind) {
            (true, _) => "Loading...",
            (false, OrderKind::Olives) => "Select a press",
            (false, OrderKind::Oil) => "Select a facility",
        }
    }

    /// Select a destination by id; unknown ids clear the selection
    pub fn select_destination(&mut self, id: Option<&str>) {
        self.selected = id
            .filter(|id| self.destinations().iter().any(|d| d.id == *id))
            .map(str::to_string);
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.fetching
    }

    /// Validate the form and enter `submitting`.
    ///
    /// Returns the batch to insert, or `None` when blocked (in flight,
    /// fetching, or failed validation with the notice set).
    pub fn begin_submit(&mut self) -> Option<NewBatch> {
        if !self.can_submit() {
            return None;
        }
        let Some(destination) = self.selected.clone() else {
            self.notice = Some(Notice::Error(AppError::validation(
                "Please select a destination",
            )));
            return None;
        };
        let quantity = match parse_quantity(self.quantity()) {
            Some(q) => q,
            None => {
                self.notice = Some(Notice::Error(AppError::validation(format!(
                    "Please enter a positive {}",
                    self.kind.quantity_name()
                ))));
                return None;
            }
        };
        self.submitting = true;
        self.notice = None;
        Some(NewBatch::new(self.kind, self.user_id, destination, quantity))
    }

    /// Leave `submitting`. Success clears the form; failure keeps it.
    pub fn finish_submit(&mut self, result: AppResult<()>) {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.weight.clear();
                self.volume.clear();
                self.selected = None;
                self.notice = Some(Notice::Success(SUCCESS_MESSAGE.to_string()));
            }
            Err(e) => {
                tracing::error!(error = %e, "Batch submission failed");
                self.notice = Some(Notice::Error(e));
            }
        }
    }

    /// Fetch destinations for the current mode
    pub async fn refresh(&mut self, backend: &dyn Backend) {
        let kind = self.mount();
        let result = load_destinations(backend, kind).await;
        self.apply_destinations(kind, result);
    }

    /// Validate and insert
    pub async fn submit(&mut self, backend: &dyn Backend) {
        if let Some(batch) = self.begin_submit() {
            let result = insert_batch(backend, &batch).await;
            self.finish_submit(result);
        }
    }
}

/// Positive, finite amount
fn parse_quantity(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|q| q.is_finite() && *q > 0.0)
}

/// Load the full destination list for `kind`
pub async fn load_destinations(backend: &dyn Backend, kind: OrderKind) -> AppResult<Destinations> {
    let query = Select::from(kind.destination_table());
    Ok(match kind {
        OrderKind::Olives => Destinations::Presses(backend::select_all(backend, &query).await?),
        OrderKind::Oil => Destinations::Facilities(backend::select_all(backend, &query).await?),
    })
}

/// Insert one batch row
pub async fn insert_batch(backend: &dyn Backend, batch: &NewBatch) -> AppResult<()> {
    let row = batch.to_row().map_err(|e| AppError::validation(e.to_string()))?;
    backend.insert(batch.table(), row).await?;
    tracing::info!(table = batch.table(), "Batch dispatched");
    Ok(())
}
