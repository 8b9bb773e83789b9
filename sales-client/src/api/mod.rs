//! Typed API services
//!
//! Thin views over an [`HttpClient`], one per remote resource. They hold no
//! state of their own; construct them on demand from a borrowed transport.

pub mod auth;
pub mod products;
pub mod reports;
pub mod sales;

pub use auth::AuthApi;
pub use products::ProductsApi;
pub use reports::ReportsApi;
pub use sales::SalesApi;

use crate::client::HttpClient;
use crate::{ClientError, ClientResult};

/// Authenticated endpoints are never called without a token
pub(crate) fn require_token<C: HttpClient>(http: &C) -> ClientResult<()> {
    if http.session().is_authenticated() {
        Ok(())
    } else {
        Err(ClientError::MissingToken)
    }
}
