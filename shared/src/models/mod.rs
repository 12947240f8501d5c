//! Data models
//!
//! Mirrors of the hosted store's rows. The client only keeps the columns it
//! reads or writes.

pub mod batch;
pub mod facility;
pub mod network;
pub mod press;
pub mod trip;
pub mod user;

// Re-exports
pub use batch::*;
pub use facility::*;
pub use network::*;
pub use press::*;
pub use trip::*;
pub use user::*;

/// Collection names in the hosted store
pub mod tables {
    pub const USERS: &str = "users";
    pub const PRESSES: &str = "presses";
    pub const FACILITIES: &str = "facilities";
    pub const TRIPS: &str = "trips";
    pub const OLIVE_BATCHES: &str = "olive_batches";
    pub const OIL_BATCHES: &str = "oil_batches";
}
