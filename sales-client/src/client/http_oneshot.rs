// sales-client/src/client/http_oneshot.rs
// Oneshot HTTP client: in-memory calls into an axum Router
//
// Requires the "in-process" feature

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Method, Request};
use serde::de::DeserializeOwned;
use tower::ServiceExt;

use crate::{AuthSession, ClientError, ClientResult};

use super::http::{HttpClient, Query, check_status, decode_response};

/// Oneshot HTTP client (in-memory calls)
///
/// Drives a Tower `oneshot` straight into a `Router`, so a fake or embedded
/// sales API can be exercised without opening a socket.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use sales_client::{AuthSession, OneshotHttpClient};
///
/// let router: Router = fake_sales_api();
/// let client = OneshotHttpClient::new(router, AuthSession::new(Some("token".into())));
/// let total: f64 = client.get("/vendas/total").await?;
/// ```
#[derive(Debug, Clone)]
pub struct OneshotHttpClient {
    router: Router,
    session: AuthSession,
}

impl OneshotHttpClient {
    /// # Arguments
    /// * `router` - Router with its state already attached
    /// * `session` - Bearer session shared with the stores
    pub fn new(router: Router, session: AuthSession) -> Self {
        Self { router, session }
    }

    fn uri(path: &str, query: Query<'_>) -> ClientResult<String> {
        let path = format!("/{}", path.trim_start_matches('/'));
        if query.is_empty() {
            return Ok(path);
        }
        let mut url = reqwest::Url::parse("http://in-process.local")
            .map_err(|e| ClientError::Internal(format!("Invalid URL: {}", e)))?;
        url.set_path(&path);
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        Ok(match url.query() {
            Some(q) => format!("{}?{}", url.path(), q),
            None => url.path().to_string(),
        })
    }

    fn build_request(&self, method: Method, uri: &str, body: Body) -> ClientResult<Request<Body>> {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(auth) = self.session.bearer() {
            builder = builder.header(http::header::AUTHORIZATION, auth);
        }

        builder
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(body)
            .map_err(|e| ClientError::Internal(format!("Failed to build request: {}", e)))
    }

    fn build_request_with_body<B: serde::Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<Request<Body>> {
        let body_bytes = serde_json::to_vec(body)?;
        self.build_request(method, &Self::uri(path, &[])?, Body::from(body_bytes))
    }

    async fn call(&self, request: Request<Body>) -> ClientResult<(http::StatusCode, Vec<u8>)> {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ClientError::Internal(format!("Oneshot call failed: {}", e)))?;

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .map_err(|e| ClientError::Internal(format!("Failed to read body: {}", e)))?;
        Ok((status, body_bytes.to_vec()))
    }

    async fn execute<T: DeserializeOwned>(&self, request: Request<Body>) -> ClientResult<T> {
        let (status, body) = self.call(request).await?;
        decode_response(&self.session, status, &body)
    }
}

#[async_trait]
impl HttpClient for OneshotHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::GET, &Self::uri(path, &[])?, Body::empty())?;
        self.execute(request).await
    }

    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Query<'_>,
    ) -> ClientResult<T> {
        let request = self.build_request(Method::GET, &Self::uri(path, query)?, Body::empty())?;
        self.execute(request).await
    }

    async fn get_bytes(&self, path: &str, query: Query<'_>) -> ClientResult<Vec<u8>> {
        let request = self.build_request(Method::GET, &Self::uri(path, query)?, Body::empty())?;
        let (status, body) = self.call(request).await?;
        check_status(&self.session, status, &body)?;
        Ok(body)
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.build_request_with_body(Method::POST, path, body)?;
        self.execute(request).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.build_request_with_body(Method::PUT, path, body)?;
        self.execute(request).await
    }

    async fn patch<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.build_request_with_body(Method::PATCH, path, body)?;
        self.execute(request).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.build_request(Method::DELETE, &Self::uri(path, &[])?, Body::empty())?;
        self.execute(request).await
    }

    fn session(&self) -> &AuthSession {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uri_encodes_query() {
        assert_eq!(OneshotHttpClient::uri("vendas", &[]).unwrap(), "/vendas");
        let query = [("dia", "5".to_string()), ("categoria", "Pão doce".to_string())];
        assert_eq!(
            OneshotHttpClient::uri("/produtos", &query).unwrap(),
            "/produtos?dia=5&categoria=P%C3%A3o+doce"
        );
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let client = OneshotHttpClient::new(Router::new(), AuthSession::default());
        let err = client.get::<()>("/nowhere").await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }
}
