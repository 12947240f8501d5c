//! Screen state models
//!
//! Each screen owns its fetched lists and flags. Backend work is split into
//! `begin_*` / `apply_*` steps so a front-end can run the call elsewhere and
//! feed the result back; `refresh` / `submit` do both in one await.

pub mod auth;
pub mod network;
pub mod new_order;
pub mod trips;

pub use auth::{AuthMode, AuthRequest, AuthScreen};
pub use network::{NetworkLoad, NetworkScreen};
pub use new_order::{DestinationOption, Destinations, NewOrderScreen, Notice};
pub use trips::TripsScreen;
