//! Report endpoints (`/relatorios`)

use shared::{Dashboard, ExportFormat, ExportQuery};

use super::require_token;
use crate::ClientResult;
use crate::client::HttpClient;

pub const DASHBOARD_PATH: &str = "/relatorios/dashboard";
pub const MONTHLY_COMPARISON_PATH: &str = "/relatorios/comparativo-mensal";
pub const DETAILED_PATH: &str = "/relatorios/detalhado";
pub const EXPORT_PATH: &str = "/relatorios/exportar";

/// Download name for an exported report
pub fn report_file_name(format: ExportFormat) -> String {
    format!("relatorio-vendas.{}", format.as_str())
}

pub struct ReportsApi<'a, C: HttpClient> {
    http: &'a C,
}

impl<'a, C: HttpClient> ReportsApi<'a, C> {
    pub fn new(http: &'a C) -> Self {
        Self { http }
    }

    pub async fn dashboard(&self) -> ClientResult<Dashboard> {
        require_token(self.http)?;
        self.http.get(DASHBOARD_PATH).await
    }

    /// Month-by-month comparison for a year; shape is server defined
    pub async fn monthly_comparison(&self, year: u32) -> ClientResult<serde_json::Value> {
        require_token(self.http)?;
        self.http
            .get_with_query(MONTHLY_COMPARISON_PATH, &[("ano", year.to_string())])
            .await
    }

    /// Detailed report for one month; shape is server defined
    pub async fn detailed(&self, month: u32, year: u32) -> ClientResult<serde_json::Value> {
        require_token(self.http)?;
        self.http
            .get_with_query(
                DETAILED_PATH,
                &[("mes", month.to_string()), ("ano", year.to_string())],
            )
            .await
    }

    /// Raw export body (JSON or CSV text)
    pub async fn export(&self, query: &ExportQuery) -> ClientResult<Vec<u8>> {
        require_token(self.http)?;
        let mut pairs = vec![("formato", query.formato.as_str().to_string())];
        if let Some(month) = query.month.filter(|m| *m > 0) {
            pairs.push(("mes", month.to_string()));
        }
        if let Some(year) = query.year.filter(|y| *y > 0) {
            pairs.push(("ano", year.to_string()));
        }
        self.http.get_bytes(EXPORT_PATH, &pairs).await
    }
}
