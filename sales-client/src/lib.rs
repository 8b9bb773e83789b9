//! Sales Client - client core for the sales tracker API
//!
//! Typed HTTP access to the remote sales service, plus the stores that keep
//! an in-memory copy of sales and products in step with it and the pure
//! views (search, totals, CSV) computed from those copies.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod money;
pub mod session;
pub mod store;
pub mod views;

pub use client::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use client::OneshotHttpClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use session::{AuthSession, SessionStatus};
pub use store::{Draft, FetchOutcome, Operation, ProductStore, SaleDraft, SalesStore};

// Re-export shared types for convenience
pub use shared::{
    Dashboard, ExportFormat, ExportQuery, PaginatedResponse, Product, ProductInput, ProductPatch,
    ProductQuery, Sale, SaleFilter, User,
};
