// sales-client/tests/support/mod.rs
// In-process fake of the remote sales API

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::{Mutex, MutexGuard};
use sales_client::{AuthSession, OneshotHttpClient, Product, Sale};
use serde_json::{Value, json};
use shared::{ProductInput, ProductPatch, SalePayload};

pub const TOKEN: &str = "test-token";

#[derive(Default)]
pub struct FakeState {
    pub sales: Vec<Sale>,
    pub products: Vec<Product>,
    pub next_id: i64,
    /// "METHOD /path?query" in arrival order
    pub requests: Vec<String>,
    pub fail_list: bool,
    pub fail_writes: bool,
    pub total_override: Option<f64>,
    /// Product ids the fake refuses to delete
    pub linked_products: Vec<i64>,
}

#[derive(Clone, Default)]
pub struct FakeApi {
    inner: Arc<Mutex<FakeState>>,
}

impl FakeApi {
    pub fn with_sales(sales: Vec<Sale>) -> Self {
        let fake = Self::default();
        {
            let mut state = fake.state();
            state.next_id = sales.iter().map(|s| s.id).max().unwrap_or(0) + 1;
            state.sales = sales;
        }
        fake
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.inner.lock()
    }

    pub fn requests(&self) -> Vec<String> {
        self.state().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state().requests.clear();
    }

    pub fn router(&self) -> Router {
        let protected = Router::new()
            .route("/vendas", get(list_sales).post(create_sale))
            .route("/vendas/total", get(sales_total))
            .route("/vendas/{id}", axum::routing::put(update_sale).delete(delete_sale))
            .route("/produtos", get(list_products).post(create_product))
            .route("/produtos/mais-vendidos", get(top_products))
            .route("/produtos/categoria/{categoria}", get(products_in_category))
            .route(
                "/produtos/{id}",
                axum::routing::patch(patch_product).delete(delete_product),
            )
            .route("/relatorios/exportar", get(export_report))
            .route("/relatorios/dashboard", get(dashboard))
            .layer(middleware::from_fn(require_bearer));

        Router::new()
            .route("/auth/login", post(login))
            .merge(protected)
            .layer(middleware::from_fn_with_state(self.clone(), record))
            .with_state(self.clone())
    }

    /// Client wired to this fake with a valid token
    pub fn client(&self) -> OneshotHttpClient {
        self.client_with(AuthSession::new(Some(TOKEN.into())))
    }

    pub fn client_with(&self, session: AuthSession) -> OneshotHttpClient {
        OneshotHttpClient::new(self.router(), session)
    }
}

pub fn sale(id: i64, date: &str, amount: f64) -> Sale {
    Sale {
        id,
        data_formatada: date.into(),
        valor: amount,
    }
}

pub fn product(id: i64, nome: &str, preco: &str, categoria: Option<&str>) -> Product {
    serde_json::from_value(json!({
        "id": id,
        "nome": nome,
        "preco": preco,
        "categoria": categoria,
        "ativo": true,
        "usuarioId": 1,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    }))
    .unwrap()
}

async fn record(State(fake): State<FakeApi>, req: Request, next: Next) -> Response {
    let line = format!("{} {}", req.method(), req.uri());
    fake.state().requests.push(line);
    next.run(req).await
}

async fn require_bearer(req: Request, next: Next) -> Response {
    let expected = format!("Bearer {}", TOKEN);
    let authorized = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Token inválido" })))
            .into_response();
    }
    next.run(req).await
}

fn unavailable() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "Serviço indisponível" })),
    )
        .into_response()
}

fn not_found(what: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": format!("{} não encontrado", what) })),
    )
        .into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    if body["senha"] != "segredo" {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Credenciais inválidas" })))
            .into_response();
    }
    Json(json!({
        "token": TOKEN,
        "user": {
            "id": 1,
            "nome": "Ana",
            "email": body["email"],
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }
    }))
    .into_response()
}

/// Honors `ano` against the `dd/mm/yyyy` suffix; other dimensions are only recorded
async fn list_sales(
    State(fake): State<FakeApi>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let state = fake.state();
    if state.fail_list {
        return unavailable();
    }
    let sales: Vec<Sale> = state
        .sales
        .iter()
        .filter(|s| {
            params
                .get("ano")
                .is_none_or(|year| s.data_formatada.ends_with(year.as_str()))
        })
        .cloned()
        .collect();
    Json(sales).into_response()
}

async fn create_sale(State(fake): State<FakeApi>, Json(body): Json<SalePayload>) -> Response {
    let mut state = fake.state();
    if state.fail_writes {
        return unavailable();
    }
    let id = state.next_id.max(1);
    state.next_id = id + 1;
    let created = sale(id, &body.data_formatada, body.valor);
    state.sales.push(created.clone());
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update_sale(
    State(fake): State<FakeApi>,
    Path(id): Path<i64>,
    Json(body): Json<SalePayload>,
) -> Response {
    let mut state = fake.state();
    if state.fail_writes {
        return unavailable();
    }
    match state.sales.iter_mut().find(|s| s.id == id) {
        Some(existing) => {
            existing.data_formatada = body.data_formatada;
            existing.valor = body.valor;
            Json(existing.clone()).into_response()
        }
        None => not_found("Venda"),
    }
}

async fn delete_sale(State(fake): State<FakeApi>, Path(id): Path<i64>) -> Response {
    let mut state = fake.state();
    if state.fail_writes {
        return unavailable();
    }
    let before = state.sales.len();
    state.sales.retain(|s| s.id != id);
    if state.sales.len() == before {
        return not_found("Venda");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn sales_total(State(fake): State<FakeApi>) -> Response {
    let state = fake.state();
    let total = state
        .total_override
        .unwrap_or_else(|| state.sales.iter().map(|s| s.valor).sum());
    Json(total).into_response()
}

async fn list_products(
    State(fake): State<FakeApi>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let state = fake.state();
    if state.fail_list {
        return unavailable();
    }
    let page: u32 = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let limit: u32 = params.get("limit").and_then(|p| p.parse().ok()).unwrap_or(10);
    let data: Vec<&Product> = state
        .products
        .iter()
        .filter(|p| {
            params
                .get("categoria")
                .is_none_or(|c| p.categoria.as_deref() == Some(c.as_str()))
        })
        .collect();
    let total = data.len() as u64;
    Json(json!({
        "data": data,
        "total": total,
        "page": page,
        "limit": limit,
        "totalPages": total.div_ceil(limit as u64)
    }))
    .into_response()
}

async fn create_product(State(fake): State<FakeApi>, Json(body): Json<ProductInput>) -> Response {
    let mut state = fake.state();
    if state.fail_writes {
        return unavailable();
    }
    let id = state.products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    let created = product(
        id,
        &body.nome,
        &format!("{:.2}", body.preco),
        body.categoria.as_deref(),
    );
    state.products.push(created.clone());
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn patch_product(
    State(fake): State<FakeApi>,
    Path(id): Path<i64>,
    Json(body): Json<ProductPatch>,
) -> Response {
    let mut state = fake.state();
    match state.products.iter_mut().find(|p| p.id == id) {
        Some(existing) => {
            if let Some(nome) = body.nome {
                existing.nome = nome;
            }
            if let Some(preco) = body.preco {
                existing.preco = format!("{:.2}", preco);
            }
            if body.categoria.is_some() {
                existing.categoria = body.categoria;
            }
            Json(existing.clone()).into_response()
        }
        None => not_found("Produto"),
    }
}

async fn delete_product(State(fake): State<FakeApi>, Path(id): Path<i64>) -> Response {
    let mut state = fake.state();
    if state.linked_products.contains(&id) {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Produto possui vendas vinculadas" })),
        )
            .into_response();
    }
    state.products.retain(|p| p.id != id);
    StatusCode::NO_CONTENT.into_response()
}

async fn top_products(
    State(fake): State<FakeApi>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(5);
    let state = fake.state();
    let top: Vec<&Product> = state.products.iter().take(limit).collect();
    Json(top).into_response()
}

async fn products_in_category(
    State(fake): State<FakeApi>,
    Path(categoria): Path<String>,
) -> Response {
    let state = fake.state();
    let matching: Vec<&Product> = state
        .products
        .iter()
        .filter(|p| p.categoria.as_deref() == Some(categoria.as_str()))
        .collect();
    Json(matching).into_response()
}

async fn export_report(Query(params): Query<HashMap<String, String>>) -> Response {
    match params.get("formato").map(String::as_str) {
        Some("csv") => (
            [(header::CONTENT_TYPE, "text/csv")],
            "produto,quantidade\nBrigadeiro,3",
        )
            .into_response(),
        Some("json") => Json(json!({ "vendas": [] })).into_response(),
        _ => (StatusCode::BAD_REQUEST, "formato inválido").into_response(),
    }
}

async fn dashboard() -> Response {
    Json(json!({
        "resumoMensal": { "totalVendas": 150.0, "quantidadeVendas": 3, "ticketMedio": 50.0 },
        "resumoAnual": { "totalVendas": 1200.0, "quantidadeVendas": 30, "ticketMedio": 40.0 },
        "produtosMaisVendidos": [
            { "produto": { "nome": "Brigadeiro", "categoria": "Doces" }, "quantidadeVendida": 12, "valorTotal": "30.00" }
        ],
        "vendasPorCategoria": { "Doces": { "quantidade": 12, "valor": 30.0 } },
        "vendasPorDia": { "2024-03-01": 50.0 }
    }))
    .into_response()
}
