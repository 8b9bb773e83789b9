//! Product catalog endpoints (`/produtos`)

use serde::de::IgnoredAny;
use shared::{PaginatedResponse, Product, ProductInput, ProductPatch, ProductQuery};

use super::require_token;
use crate::client::HttpClient;
use crate::{ClientError, ClientResult};

pub const PRODUCTS_PATH: &str = "/produtos";

pub struct ProductsApi<'a, C: HttpClient> {
    http: &'a C,
}

impl<'a, C: HttpClient> ProductsApi<'a, C> {
    pub fn new(http: &'a C) -> Self {
        Self { http }
    }

    /// `GET /produtos?page=&limit=&categoria=`
    pub async fn list(&self, query: &ProductQuery) -> ClientResult<PaginatedResponse<Product>> {
        require_token(self.http)?;
        let mut pairs = vec![
            ("page", query.page.to_string()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(category) = &query.category {
            pairs.push(("categoria", category.clone()));
        }
        self.http.get_with_query(PRODUCTS_PATH, &pairs).await
    }

    pub async fn get(&self, id: i64) -> ClientResult<Product> {
        require_token(self.http)?;
        self.http.get(&product_path(id)).await
    }

    pub async fn create(&self, input: &ProductInput) -> ClientResult<Product> {
        require_token(self.http)?;
        self.http.post(PRODUCTS_PATH, input).await
    }

    /// Partial update, only the fields set in `patch` are sent
    pub async fn update(&self, id: i64, patch: &ProductPatch) -> ClientResult<Product> {
        require_token(self.http)?;
        self.http.patch(&product_path(id), patch).await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        require_token(self.http)?;
        let _: IgnoredAny = self.http.delete(&product_path(id)).await?;
        Ok(())
    }

    /// `GET /produtos/mais-vendidos?limit=`
    pub async fn top_selling(&self, limit: u32) -> ClientResult<Vec<Product>> {
        require_token(self.http)?;
        let path = format!("{}/mais-vendidos", PRODUCTS_PATH);
        self.http
            .get_with_query(&path, &[("limit", limit.to_string())])
            .await
    }

    /// `GET /produtos/categoria/{categoria}`
    pub async fn by_category(&self, category: &str) -> ClientResult<Vec<Product>> {
        require_token(self.http)?;
        let path = format!("{}/categoria/{}", PRODUCTS_PATH, encode_segment(category)?);
        self.http.get(&path).await
    }
}

fn product_path(id: i64) -> String {
    format!("{}/{}", PRODUCTS_PATH, id)
}

/// Percent-encode a single path segment
fn encode_segment(segment: &str) -> ClientResult<String> {
    let mut url = reqwest::Url::parse("http://segment.local/")
        .map_err(|e| ClientError::Internal(format!("Invalid URL: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| ClientError::Internal("URL cannot be a base".into()))?
        .clear()
        .push(segment);
    Ok(url.path().trim_start_matches('/').to_string())
}
