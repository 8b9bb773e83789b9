//! Query types
//!
//! Filters and pagination parameters sent as URL query strings, plus the
//! paginated envelope the API wraps list responses in.

use serde::{Deserialize, Serialize};

/// Day / month / year filter for `GET /vendas`
///
/// Each dimension is independent. `None` means "no constraint"; a zero is
/// treated the same way since the API only knows positive values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleFilter {
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<u32>,
}

impl SaleFilter {
    pub fn new(day: Option<u32>, month: Option<u32>, year: Option<u32>) -> Self {
        Self { day, month, year }
    }

    pub fn day(mut self, day: u32) -> Self {
        self.day = Some(day);
        self
    }

    pub fn month(mut self, month: u32) -> Self {
        self.month = Some(month);
        self
    }

    pub fn year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }

    /// Per-dimension merge: a value in `overrides` wins, otherwise `self`
    pub fn overridden_by(&self, overrides: &SaleFilter) -> SaleFilter {
        SaleFilter {
            day: overrides.day.or(self.day),
            month: overrides.month.or(self.month),
            year: overrides.year.or(self.year),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }

    /// Query pairs (`dia`, `mes`, `ano`) for the defined, non-zero dimensions
    pub fn to_query(&self) -> Vec<(&'static str, u32)> {
        [("dia", self.day), ("mes", self.month), ("ano", self.year)]
            .into_iter()
            .filter_map(|(key, value)| value.filter(|v| *v > 0).map(|v| (key, v)))
            .collect()
    }
}

/// Product list parameters for `GET /produtos`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "categoria", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProductQuery {
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page,
            limit,
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        // Empty category means "all", same as omitting it
        self.category = (!category.is_empty()).then_some(category);
        self
    }
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::page(1, 10)
    }
}

/// Paginated list envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// Items on this page
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Total number of records
    pub total: u64,
    /// Current page (1-based)
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Total number of pages
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit > 0 {
            total.div_ceil(limit as u64) as u32
        } else {
            1
        };

        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Report export format (`formato`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// Export parameters for `GET /relatorios/exportar`
#[derive(Debug, Clone, Serialize)]
pub struct ExportQuery {
    pub formato: ExportFormat,
    #[serde(rename = "mes", skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(rename = "ano", skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
}
