//! Dashboard Model
//!
//! Server-computed metrics returned by `GET /relatorios/dashboard`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Aggregated dashboard metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub resumo_mensal: PeriodSummary,
    pub resumo_anual: PeriodSummary,
    #[serde(default)]
    pub produtos_mais_vendidos: Vec<TopProduct>,
    #[serde(default)]
    pub vendas_por_categoria: BTreeMap<String, CategorySales>,
    /// Date key → amount sold that day
    #[serde(default)]
    pub vendas_por_dia: BTreeMap<String, f64>,
}

/// Totals over one period (month or year)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub total_vendas: f64,
    pub quantidade_vendas: u64,
    pub ticket_medio: f64,
}

/// Best-selling product entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProduct {
    pub produto: ProductRef,
    pub quantidade_vendida: u64,
    /// Decimal string, like `Product::preco`
    pub valor_total: String,
}

/// Minimal product reference embedded in reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRef {
    pub nome: String,
    #[serde(default)]
    pub categoria: Option<String>,
}

/// Per-category totals
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CategorySales {
    pub quantidade: u64,
    pub valor: f64,
}
