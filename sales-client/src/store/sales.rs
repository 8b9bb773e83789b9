//! Sales aggregate store
//!
//! Owns the in-memory copy of the sales list plus the filter, the form
//! draft and the error list shown next to it. The copy is never patched
//! locally: every successful mutation is followed by a refetch, and
//! whichever refetch resolves last wins.
//!
//! Operations take `&self` and may overlap. There is no mutation queue
//! and no ordering of responses.

use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use shared::{Sale, SaleFilter, SalePayload};

use super::draft::{Draft, MSG_AMOUNT_NOT_POSITIVE, SaleDraft, validate_new_draft};
use super::in_flight::{InFlight, Operation};
use super::FetchOutcome;
use crate::api::SalesApi;
use crate::client::HttpClient;
use crate::export;
use crate::views::{self, SalesSummary};
use crate::{ClientError, ClientResult};

pub const MSG_CREATE_FAILED: &str = "Erro ao criar venda";
pub const MSG_UPDATE_FAILED: &str = "Erro ao atualizar venda";
pub const MSG_DELETE_FAILED: &str = "Erro ao deletar venda";

#[derive(Debug, Default)]
struct SalesState {
    sales: Vec<Sale>,
    filter: SaleFilter,
    draft: Draft,
    errors: Vec<String>,
}

pub struct SalesStore<C: HttpClient> {
    http: C,
    state: RwLock<SalesState>,
    in_flight: InFlight,
}

impl<C: HttpClient> SalesStore<C> {
    pub fn new(http: C) -> Self {
        Self {
            http,
            state: RwLock::new(SalesState::default()),
            in_flight: InFlight::default(),
        }
    }

    // ========== Remote operations ==========

    /// Reload the collection.
    ///
    /// Each dimension set in `overrides` replaces the stored filter for this
    /// call only. Failures are logged and leave the current collection as it
    /// was; they never surface as an error.
    pub async fn fetch(&self, overrides: SaleFilter) -> FetchOutcome {
        let _op = self.in_flight.begin(Operation::Fetch);
        let filter = self.state.read().filter.overridden_by(&overrides);

        match SalesApi::new(&self.http).list(&filter).await {
            Ok(sales) => {
                let count = sales.len();
                self.state.write().sales = sales;
                tracing::debug!(count, ?filter, "Sales refreshed");
                FetchOutcome::Refreshed { count }
            }
            Err(e) => {
                tracing::error!(error = %e, ?filter, "Failed to fetch sales");
                FetchOutcome::Kept {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Reload with the stored filter
    pub async fn refresh(&self) -> FetchOutcome {
        self.fetch(SaleFilter::default()).await
    }

    /// Register a sale, then refetch.
    ///
    /// On success only a `New` draft is cleared; an `Edit` draft stays.
    pub async fn create(&self, date: &str, amount: f64) -> ClientResult<()> {
        let _op = self.in_flight.begin(Operation::Create);
        let payload = SalePayload::new(date, amount);

        if let Err(e) = SalesApi::new(&self.http).create(&payload).await {
            return Err(self.fail(MSG_CREATE_FAILED, e));
        }
        self.refresh().await;

        let mut state = self.state.write();
        if state.draft.is_new() {
            state.draft = Draft::Idle;
        }
        state.errors.clear();
        tracing::info!(date, amount, "Sale created");
        Ok(())
    }

    /// Update a sale by id, then refetch.
    ///
    /// The id is not checked against the loaded collection; the remote
    /// answer decides.
    pub async fn update(&self, id: i64, date: &str, amount: f64) -> ClientResult<()> {
        let _op = self.in_flight.begin(Operation::Update(id));
        let payload = SalePayload::new(date, amount);

        if let Err(e) = SalesApi::new(&self.http).update(id, &payload).await {
            return Err(self.fail(MSG_UPDATE_FAILED, e));
        }
        self.refresh().await;

        let mut state = self.state.write();
        if state.draft.editing_id().is_some() {
            state.draft = Draft::Idle;
        }
        state.errors.clear();
        tracing::info!(id, date, amount, "Sale updated");
        Ok(())
    }

    /// Delete a sale, then refetch. Confirmation is the caller's job.
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        let _op = self.in_flight.begin(Operation::Delete(id));

        if let Err(e) = SalesApi::new(&self.http).delete(id).await {
            return Err(self.fail(MSG_DELETE_FAILED, e));
        }
        self.refresh().await;
        tracing::info!(id, "Sale deleted");
        Ok(())
    }

    /// Server-side grand total, independent of the loaded (filtered) list
    pub async fn total_amount(&self) -> ClientResult<f64> {
        let _op = self.in_flight.begin(Operation::Total);
        SalesApi::new(&self.http).total().await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to fetch sales total");
        })
    }

    /// Route the form: update when editing, create otherwise
    pub async fn submit(&self, date: &str, amount: f64) -> ClientResult<()> {
        let editing = self.state.read().draft.editing_id();
        match editing {
            Some(id) => self.update(id, date, amount).await,
            None => self.create(date, amount).await,
        }
    }

    /// Submit whatever the active draft holds
    ///
    /// An idle form, or a draft without an amount, fails locally with the
    /// validation messages and nothing is sent.
    pub async fn submit_draft(&self) -> ClientResult<()> {
        let fields = self.state.read().draft.fields().cloned();
        let (date, amount) = match fields {
            Some(SaleDraft {
                date,
                amount: Some(amount),
            }) => (date, amount),
            other => {
                let mut errors = validate_new_draft(other.as_ref());
                if errors.is_empty() {
                    errors.push(MSG_AMOUNT_NOT_POSITIVE.to_string());
                }
                let message = errors.join("; ");
                tracing::warn!(%message, "Nothing to submit");
                self.state.write().errors = errors;
                return Err(ClientError::Validation(message));
            }
        };
        self.submit(&date, amount).await
    }

    fn fail(&self, message: &str, error: ClientError) -> ClientError {
        tracing::error!(error = %error, "{}", message);
        self.state.write().errors = vec![message.to_string()];
        error
    }

    // ========== Local state ==========

    /// Load a sale into an `Edit` draft
    pub fn begin_edit(&self, id: i64) -> ClientResult<()> {
        let mut state = self.state.write();
        let sale = state
            .sales
            .iter()
            .find(|s| s.id == id)
            .ok_or(ClientError::SaleNotFound(id))?;
        let draft = SaleDraft::new(sale.data_formatada.clone(), sale.valor);
        state.draft = Draft::Edit { id, draft };
        Ok(())
    }

    /// Start (or restart) a new-sale draft
    pub fn start_new_draft(&self, draft: SaleDraft) {
        self.state.write().draft = Draft::New(draft);
    }

    /// Replace the fields of the active draft; an idle form becomes `New`
    pub fn edit_draft_fields(&self, fields: SaleDraft) {
        let mut state = self.state.write();
        state.draft = match std::mem::take(&mut state.draft) {
            Draft::Edit { id, .. } => Draft::Edit { id, draft: fields },
            Draft::Idle | Draft::New(_) => Draft::New(fields),
        };
    }

    pub fn clear_draft(&self) {
        self.state.write().draft = Draft::Idle;
    }

    pub fn draft(&self) -> Draft {
        self.state.read().draft.clone()
    }

    /// Check the new-sale draft and replace the error list with the result.
    ///
    /// An `Edit` draft is not inspected.
    pub fn validate(&self) -> bool {
        let mut state = self.state.write();
        let new_draft = match &state.draft {
            Draft::New(draft) => Some(draft),
            _ => None,
        };
        let errors = validate_new_draft(new_draft);
        let valid = errors.is_empty();
        state.errors = errors;
        valid
    }

    pub fn errors(&self) -> Vec<String> {
        self.state.read().errors.clone()
    }

    pub fn sales(&self) -> Vec<Sale> {
        self.state.read().sales.clone()
    }

    /// Run `f` against the loaded collection without cloning it
    pub fn with_sales<R>(&self, f: impl FnOnce(&[Sale]) -> R) -> R {
        f(&self.state.read().sales)
    }

    pub fn filter(&self) -> SaleFilter {
        self.state.read().filter
    }

    pub fn set_filter(&self, filter: SaleFilter) {
        self.state.write().filter = filter;
    }

    pub fn set_day(&self, day: Option<u32>) {
        self.state.write().filter.day = day;
    }

    pub fn set_month(&self, month: Option<u32>) {
        self.state.write().filter.month = month;
    }

    pub fn set_year(&self, year: Option<u32>) {
        self.state.write().filter.year = year;
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_busy()
    }

    pub fn in_flight(&self) -> Vec<Operation> {
        self.in_flight.snapshot()
    }

    // ========== Derived views ==========

    /// Count / total / average over the records matching `term` and `date_prefix`
    pub fn summary(&self, term: &str, date_prefix: &str) -> SalesSummary {
        self.with_sales(|sales| SalesSummary::of(views::filter_records(sales, term, date_prefix)))
    }

    /// CSV of the loaded collection (no network call)
    pub fn export_csv(&self) -> ClientResult<String> {
        self.with_sales(export::sales_to_csv)
    }

    /// Write `vendas.csv` into `dir`
    pub fn write_csv(&self, dir: &Path) -> ClientResult<PathBuf> {
        self.with_sales(|sales| export::write_sales_csv(dir, sales))
    }
}
