//! Shared types for the sales tracker
//!
//! Wire types exchanged with the remote sales API. Field names follow the
//! remote JSON (camelCase, Portuguese), Rust names stay English.

pub mod client;
pub mod models;
pub mod query;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{AuthResponse, LoginRequest, RegisterRequest};
pub use models::{Dashboard, Product, ProductInput, ProductPatch, Sale, SalePayload, User};
pub use query::{ExportFormat, ExportQuery, PaginatedResponse, ProductQuery, SaleFilter};
