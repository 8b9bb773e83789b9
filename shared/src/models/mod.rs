//! Data models
//!
//! Mirrors of the remote API's records. All IDs are `i64` and are assigned
//! by the remote store, never by the client.

pub mod dashboard;
pub mod product;
pub mod sale;
pub mod user;

// Re-exports
pub use dashboard::*;
pub use product::*;
pub use sale::*;
pub use user::*;
