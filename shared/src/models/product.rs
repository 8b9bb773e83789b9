//! Product Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub nome: String,
    #[serde(default)]
    pub descricao: Option<String>,
    /// Unit price; the API returns it as a decimal string (e.g. "19.90")
    pub preco: String,
    #[serde(default)]
    pub categoria: Option<String>,
    pub ativo: bool,
    pub usuario_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "_count", default, skip_serializing_if = "Option::is_none")]
    pub count: Option<ProductCounts>,
}

impl Product {
    /// Parsed unit price, `None` if the API sent something unparsable
    pub fn price(&self) -> Option<f64> {
        self.preco.trim().parse().ok()
    }

    /// Number of sales referencing this product, when the API included it
    pub fn sales_count(&self) -> u64 {
        self.count.as_ref().map(|c| c.vendas).unwrap_or(0)
    }
}

/// Relation counters attached by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCounts {
    pub vendas: u64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub nome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    pub preco: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ativo: Option<bool>,
}

/// Partial update payload (`PATCH /produtos/{id}`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preco: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ativo: Option<bool>,
}

impl From<ProductInput> for ProductPatch {
    fn from(input: ProductInput) -> Self {
        Self {
            nome: Some(input.nome),
            descricao: input.descricao,
            preco: Some(input.preco),
            categoria: input.categoria,
            ativo: input.ativo,
        }
    }
}
