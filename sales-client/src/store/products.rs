//! Product catalog store
//!
//! Same shape as the sales store: a cached page of the catalog, reloaded
//! after every successful mutation, plus the id being edited and the
//! error list for the form.

use parking_lot::RwLock;
use shared::{PaginatedResponse, Product, ProductInput, ProductPatch, ProductQuery};

use super::FetchOutcome;
use super::in_flight::{InFlight, Operation};
use crate::api::ProductsApi;
use crate::client::HttpClient;
use crate::views;
use crate::{ClientError, ClientResult};

pub const MSG_LOAD_FAILED: &str = "Erro ao carregar produtos";
pub const MSG_SAVE_FAILED: &str = "Erro ao salvar produto";
pub const MSG_DELETE_FAILED: &str = "Erro ao excluir produto";

/// Page position of the loaded catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> From<&PaginatedResponse<T>> for PageInfo {
    fn from(resp: &PaginatedResponse<T>) -> Self {
        Self {
            total: resp.total,
            page: resp.page,
            limit: resp.limit,
            total_pages: resp.total_pages,
        }
    }
}

#[derive(Debug)]
struct CatalogState {
    products: Vec<Product>,
    query: ProductQuery,
    page: Option<PageInfo>,
    editing: Option<i64>,
    errors: Vec<String>,
}

pub struct ProductStore<C: HttpClient> {
    http: C,
    state: RwLock<CatalogState>,
    in_flight: InFlight,
}

impl<C: HttpClient> ProductStore<C> {
    pub fn new(http: C) -> Self {
        Self::with_query(http, ProductQuery::page(1, 50))
    }

    pub fn with_query(http: C, query: ProductQuery) -> Self {
        Self {
            http,
            state: RwLock::new(CatalogState {
                products: Vec::new(),
                query,
                page: None,
                editing: None,
                errors: Vec::new(),
            }),
            in_flight: InFlight::default(),
        }
    }

    /// Load one page; becomes the query used by later reloads
    pub async fn load(&self, query: ProductQuery) -> FetchOutcome {
        self.state.write().query = query;
        self.reload().await
    }

    /// Reload the last requested page. Failure keeps the current catalog.
    pub async fn reload(&self) -> FetchOutcome {
        let _op = self.in_flight.begin(Operation::Fetch);
        let query = self.state.read().query.clone();

        match ProductsApi::new(&self.http).list(&query).await {
            Ok(resp) => {
                let count = resp.data.len();
                let mut state = self.state.write();
                state.page = Some(PageInfo::from(&resp));
                state.products = resp.data;
                tracing::debug!(count, page = query.page, "Catalog refreshed");
                FetchOutcome::Refreshed { count }
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load products");
                self.state.write().errors = vec![MSG_LOAD_FAILED.to_string()];
                FetchOutcome::Kept {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Create, or patch the product being edited, then reload
    pub async fn save(&self, input: ProductInput) -> ClientResult<Product> {
        let editing = self.state.read().editing;
        let api = ProductsApi::new(&self.http);

        let result = match editing {
            Some(id) => {
                let _op = self.in_flight.begin(Operation::Update(id));
                api.update(id, &ProductPatch::from(input)).await
            }
            None => {
                let _op = self.in_flight.begin(Operation::Create);
                api.create(&input).await
            }
        };

        match result {
            Ok(product) => {
                self.reload().await;
                let mut state = self.state.write();
                state.editing = None;
                state.errors.clear();
                tracing::info!(id = product.id, "Product saved");
                Ok(product)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to save product");
                self.state.write().errors = vec![MSG_SAVE_FAILED.to_string()];
                Err(e)
            }
        }
    }

    /// Delete, then reload. The API's own message is shown when it sends one.
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        let result = {
            let _op = self.in_flight.begin(Operation::Delete(id));
            ProductsApi::new(&self.http).delete(id).await
        };

        match result {
            Ok(()) => {
                self.reload().await;
                tracing::info!(id, "Product deleted");
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, id, "Failed to delete product");
                let message = e.api_message().unwrap_or(MSG_DELETE_FAILED).to_string();
                self.state.write().errors = vec![message];
                Err(e)
            }
        }
    }

    /// Mark a loaded product as being edited and return its form values
    pub fn begin_edit(&self, id: i64) -> ClientResult<ProductInput> {
        let mut state = self.state.write();
        let product = state
            .products
            .iter()
            .find(|p| p.id == id)
            .ok_or(ClientError::ProductNotFound(id))?;
        let form = ProductInput {
            nome: product.nome.clone(),
            descricao: product.descricao.clone(),
            preco: product.price().unwrap_or_default(),
            categoria: product.categoria.clone(),
            ativo: Some(product.ativo),
        };
        state.editing = Some(id);
        Ok(form)
    }

    pub fn cancel_edit(&self) {
        self.state.write().editing = None;
    }

    pub fn editing(&self) -> Option<i64> {
        self.state.read().editing
    }

    pub fn products(&self) -> Vec<Product> {
        self.state.read().products.clone()
    }

    /// Products whose name or category contains `term`
    pub fn filtered(&self, term: &str) -> Vec<Product> {
        let state = self.state.read();
        views::search(&state.products, term)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn page(&self) -> Option<PageInfo> {
        self.state.read().page
    }

    pub fn errors(&self) -> Vec<String> {
        self.state.read().errors.clone()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }
}
