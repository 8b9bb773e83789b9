//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account that owns products and sales
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
