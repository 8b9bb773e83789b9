//! Client-side stores
//!
//! Each store is the single owner of one remote-backed collection and the
//! form state around it. Presentation code reads snapshots and calls store
//! operations; it never mutates the collections itself.

pub mod draft;
pub mod in_flight;
pub mod products;
pub mod sales;

pub use draft::{Draft, SaleDraft};
pub use in_flight::Operation;
pub use products::{PageInfo, ProductStore};
pub use sales::SalesStore;

/// Result of a read; reads report failure instead of returning `Err`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Collection replaced with `count` records
    Refreshed { count: usize },
    /// Request failed, previous collection kept
    Kept { message: String },
}

impl FetchOutcome {
    pub fn is_refreshed(&self) -> bool {
        matches!(self, Self::Refreshed { .. })
    }
}
