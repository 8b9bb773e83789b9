//! Transport module
//!
//! `HttpClient` is the seam the API services and stores are generic over:
//! `NetworkHttpClient` talks to the real service over reqwest,
//! `OneshotHttpClient` calls an in-process axum `Router`.

pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

// Re-export main types
pub use http::{HttpClient, NetworkHttpClient, Query};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
