//! Sales endpoints (`/vendas`)

use serde::de::IgnoredAny;
use shared::{Sale, SaleFilter, SalePayload};

use super::require_token;
use crate::ClientResult;
use crate::client::HttpClient;

pub const SALES_PATH: &str = "/vendas";
pub const SALES_TOTAL_PATH: &str = "/vendas/total";

pub struct SalesApi<'a, C: HttpClient> {
    http: &'a C,
}

impl<'a, C: HttpClient> SalesApi<'a, C> {
    pub fn new(http: &'a C) -> Self {
        Self { http }
    }

    /// `GET /vendas?dia=&mes=&ano=` with only the defined dimensions
    pub async fn list(&self, filter: &SaleFilter) -> ClientResult<Vec<Sale>> {
        require_token(self.http)?;
        let query: Vec<(&str, String)> = filter
            .to_query()
            .into_iter()
            .map(|(k, v)| (k, v.to_string()))
            .collect();
        self.http.get_with_query(SALES_PATH, &query).await
    }

    pub async fn create(&self, payload: &SalePayload) -> ClientResult<()> {
        require_token(self.http)?;
        let _: IgnoredAny = self.http.post(SALES_PATH, payload).await?;
        Ok(())
    }

    pub async fn update(&self, id: i64, payload: &SalePayload) -> ClientResult<()> {
        require_token(self.http)?;
        let _: IgnoredAny = self.http.put(&sale_path(id), payload).await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        require_token(self.http)?;
        let _: IgnoredAny = self.http.delete(&sale_path(id)).await?;
        Ok(())
    }

    /// Server-computed grand total over every sale (ignores any filter)
    pub async fn total(&self) -> ClientResult<f64> {
        require_token(self.http)?;
        self.http.get(SALES_TOTAL_PATH).await
    }
}

fn sale_path(id: i64) -> String {
    format!("{}/{}", SALES_PATH, id)
}
