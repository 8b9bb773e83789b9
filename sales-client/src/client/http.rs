// sales-client/src/client/http.rs
// HTTP transport: network implementation and the trait every transport shares

use async_trait::async_trait;
use http::StatusCode;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{AuthSession, ClientConfig, ClientError, ClientResult};

/// Query string pairs, already stringified
pub type Query<'a> = &'a [(&'a str, String)];

/// HTTP transport trait
///
/// Every request carries the session's bearer token when there is one. A 401
/// clears the session before the error is returned.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Query<'_>,
    ) -> ClientResult<T>;
    /// Raw body (report downloads)
    async fn get_bytes(&self, path: &str, query: Query<'_>) -> ClientResult<Vec<u8>>;
    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn patch<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    fn session(&self) -> &AuthSession;
}

/// Turn a status + body into the typed result, clearing the session on 401
pub(crate) fn decode_response<T: DeserializeOwned>(
    session: &AuthSession,
    status: StatusCode,
    body: &[u8],
) -> ClientResult<T> {
    let body = check_status(session, status, body)?;
    // DELETE and friends may answer 204 / empty body
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        b"null".as_slice()
    } else {
        body
    };
    serde_json::from_slice(body)
        .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))
}

pub(crate) fn check_status<'a>(
    session: &AuthSession,
    status: StatusCode,
    body: &'a [u8],
) -> ClientResult<&'a [u8]> {
    if status.is_success() {
        return Ok(body);
    }
    if status == StatusCode::UNAUTHORIZED {
        tracing::warn!("API answered 401, clearing session");
        session.clear();
    }
    Err(ClientError::from_status(
        status,
        String::from_utf8_lossy(body).into_owned(),
    ))
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    session: AuthSession,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig, session: AuthSession) -> Result<Self, ClientError> {
        config.validate()?;
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        if let Some(token) = &config.token {
            session.set_token(token.clone());
        }
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = self.url(path);
        tracing::debug!(method = method.as_str(), url = %url, "API request");
        let mut req = self.client.request(method, &url);
        if let Some(auth) = self.session.bearer() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }
        req
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> ClientResult<(StatusCode, Vec<u8>)> {
        let response = req.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok((status, body.to_vec()))
    }

    async fn execute<T: DeserializeOwned>(&self, req: reqwest::RequestBuilder) -> ClientResult<T> {
        let (status, body) = self.send(req).await?;
        decode_response(&self.session, status, &body)
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(self.request(reqwest::Method::GET, path)).await
    }

    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Query<'_>,
    ) -> ClientResult<T> {
        let req = self.request(reqwest::Method::GET, path).query(query);
        self.execute(req).await
    }

    async fn get_bytes(&self, path: &str, query: Query<'_>) -> ClientResult<Vec<u8>> {
        let req = self.request(reqwest::Method::GET, path).query(query);
        let (status, body) = self.send(req).await?;
        check_status(&self.session, status, &body)?;
        Ok(body)
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(reqwest::Method::POST, path).json(body);
        self.execute(req).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(reqwest::Method::PUT, path).json(body);
        self.execute(req).await
    }

    async fn patch<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let req = self.request(reqwest::Method::PATCH, path).json(body);
        self.execute(req).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(self.request(reqwest::Method::DELETE, path)).await
    }

    fn session(&self) -> &AuthSession {
        &self.session
    }
}
