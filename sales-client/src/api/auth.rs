//! Auth endpoints (`/auth`)

use shared::{AuthResponse, LoginRequest, RegisterRequest, User};

use crate::ClientResult;
use crate::client::HttpClient;

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";

pub struct AuthApi<'a, C: HttpClient> {
    http: &'a C,
}

impl<'a, C: HttpClient> AuthApi<'a, C> {
    pub fn new(http: &'a C) -> Self {
        Self { http }
    }

    /// Log in and keep the returned token in the session
    pub async fn login(&self, email: &str, senha: &str) -> ClientResult<User> {
        let req = LoginRequest {
            email: email.to_string(),
            senha: senha.to_string(),
        };
        let resp: AuthResponse = self.http.post(LOGIN_PATH, &req).await?;
        self.http.session().set_token(resp.token);
        tracing::info!(user_id = resp.user.id, "Logged in");
        Ok(resp.user)
    }

    /// Create an account; a returned token also signs the user in
    pub async fn register(&self, nome: &str, email: &str, senha: &str) -> ClientResult<User> {
        let req = RegisterRequest {
            nome: nome.to_string(),
            email: email.to_string(),
            senha: senha.to_string(),
        };
        let resp: AuthResponse = self.http.post(REGISTER_PATH, &req).await?;
        self.http.session().set_token(resp.token);
        tracing::info!(user_id = resp.user.id, "Registered");
        Ok(resp.user)
    }

    /// Local sign-out; the API has no logout endpoint
    pub fn logout(&self) {
        self.http.session().clear();
    }
}
