//! Command execution
//!
//! Each command drives the client stores the same way a screen would and
//! prints plain text to stdout.

use anyhow::{Context, bail};
use sales_client::api::reports::report_file_name;
use sales_client::api::{AuthApi, ProductsApi, ReportsApi};
use sales_client::money::{CurrencyFormat, format_amount, format_currency};
use sales_client::{
    ExportQuery, FetchOutcome, HttpClient, Product, ProductQuery, ProductStore, SaleDraft,
    SaleFilter, SalesStore, export, views,
};
use shared::ProductPatch;

use crate::cli::{Command, FilterArgs, ProductsCommand, ReportCommand, SalesCommand};

impl From<FilterArgs> for SaleFilter {
    fn from(args: FilterArgs) -> Self {
        SaleFilter::new(args.day, args.month, args.year)
    }
}

pub async fn run<C: HttpClient>(command: Command, http: C) -> anyhow::Result<()> {
    match command {
        Command::Login { email, senha } => {
            let user = AuthApi::new(&http).login(&email, &senha).await?;
            println!("Logged in as {} <{}>", user.nome, user.email);
            if let Some(token) = http.session().token() {
                println!("SALES_API_TOKEN={}", token);
            }
        }
        Command::Register { nome, email, senha } => {
            let user = AuthApi::new(&http).register(&nome, &email, &senha).await?;
            println!("Account created for {} <{}>", user.nome, user.email);
            if let Some(token) = http.session().token() {
                println!("SALES_API_TOKEN={}", token);
            }
        }
        Command::Sales(cmd) => sales(cmd, SalesStore::new(http)).await?,
        Command::Products(cmd) => products(cmd, http).await?,
        Command::Report(cmd) => report(cmd, &http).await?,
    }
    Ok(())
}

fn ensure_loaded(outcome: FetchOutcome, what: &str) -> anyhow::Result<()> {
    match outcome {
        FetchOutcome::Refreshed { .. } => Ok(()),
        FetchOutcome::Kept { message } => bail!("Could not load {}: {}", what, message),
    }
}

/// Store errors first, then the underlying cause
fn form_error<C: HttpClient>(store: &SalesStore<C>, err: sales_client::ClientError) -> anyhow::Error {
    anyhow::anyhow!("{} ({})", store.errors().join("; "), err)
}

async fn sales<C: HttpClient>(cmd: SalesCommand, store: SalesStore<C>) -> anyhow::Result<()> {
    let brl = CurrencyFormat::pt_br();

    match cmd {
        SalesCommand::List {
            filter,
            search,
            since,
            summary,
        } => {
            store.set_filter(filter.into());
            ensure_loaded(store.refresh().await, "sales")?;

            store.with_sales(|sales| {
                for sale in views::filter_records(sales, &search, &since) {
                    println!(
                        "{:>6}  {}  {:>14}",
                        sale.id,
                        sale.data_formatada,
                        format_amount(sale.valor, &brl)
                    );
                }
            });

            if summary {
                let s = store.summary(&search, &since);
                println!("---");
                println!("Sales:   {}", s.count);
                println!("Total:   {}", format_currency(s.total, &brl));
                println!("Average: {}", format_currency(s.average, &brl));
            }
        }
        SalesCommand::Create { date, amount } => {
            store.start_new_draft(SaleDraft::new(date, amount));
            if !store.validate() {
                bail!("{}", store.errors().join("; "));
            }
            if let Err(e) = store.submit_draft().await {
                return Err(form_error(&store, e));
            }
            println!("Sale registered ({} records loaded)", store.sales().len());
        }
        SalesCommand::Update { id, date, amount } => {
            if let Err(e) = store.update(id, &date, amount).await {
                return Err(form_error(&store, e));
            }
            println!("Sale {} updated", id);
        }
        SalesCommand::Delete { id } => {
            if let Err(e) = store.delete(id).await {
                return Err(form_error(&store, e));
            }
            println!("Sale {} deleted", id);
        }
        SalesCommand::Total => {
            let total = store.total_amount().await?;
            println!("{}", format_amount(total, &brl));
        }
        SalesCommand::ExportCsv { filter, dir } => {
            store.set_filter(filter.into());
            ensure_loaded(store.refresh().await, "sales")?;
            let path = store
                .write_csv(&dir)
                .with_context(|| format!("writing CSV into {}", dir.display()))?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn print_product(product: &Product, brl: &CurrencyFormat) {
    let price = product
        .price()
        .map(|p| format_amount(p, brl))
        .unwrap_or_else(|| product.preco.clone());
    println!(
        "{:>6}  {:<30}  {:<16}  {:>12}{}",
        product.id,
        product.nome,
        product.categoria.as_deref().unwrap_or("-"),
        price,
        if product.ativo { "" } else { "  (inativo)" }
    );
}

async fn products<C: HttpClient>(cmd: ProductsCommand, http: C) -> anyhow::Result<()> {
    let brl = CurrencyFormat::pt_br();

    match cmd {
        ProductsCommand::List {
            page,
            limit,
            category,
            search,
        } => {
            let store = ProductStore::new(http);
            let query = match category {
                Some(category) => ProductQuery::page(page, limit).with_category(category),
                None => ProductQuery::page(page, limit),
            };
            ensure_loaded(store.load(query).await, "products")?;

            for product in store.filtered(&search) {
                print_product(&product, &brl);
            }
            if let Some(info) = store.page() {
                println!(
                    "--- page {}/{} ({} products)",
                    info.page, info.total_pages, info.total
                );
            }
        }
        ProductsCommand::Create(args) => {
            let store = ProductStore::new(http);
            match store.save(args.into()).await {
                Ok(product) => print_product(&product, &brl),
                Err(e) => bail!("{} ({})", store.errors().join("; "), e),
            }
        }
        ProductsCommand::Update {
            id,
            nome,
            preco,
            categoria,
            descricao,
        } => {
            let patch = ProductPatch {
                nome,
                descricao,
                preco,
                categoria,
                ativo: None,
            };
            let product = ProductsApi::new(&http).update(id, &patch).await?;
            print_product(&product, &brl);
        }
        ProductsCommand::Delete { id } => {
            let store = ProductStore::new(http);
            if let Err(e) = store.delete(id).await {
                bail!("{} ({})", store.errors().join("; "), e);
            }
            println!("Product {} deleted", id);
        }
        ProductsCommand::Top { limit } => {
            for product in ProductsApi::new(&http).top_selling(limit).await? {
                println!("{:>4}x  {}", product.sales_count(), product.nome);
            }
        }
        ProductsCommand::Category { name } => {
            for product in ProductsApi::new(&http).by_category(&name).await? {
                print_product(&product, &brl);
            }
        }
    }
    Ok(())
}

async fn report<C: HttpClient>(cmd: ReportCommand, http: &C) -> anyhow::Result<()> {
    let brl = CurrencyFormat::pt_br();
    let api = ReportsApi::new(http);

    match cmd {
        ReportCommand::Dashboard => {
            let dashboard = api.dashboard().await?;
            for (label, period) in [
                ("Month", dashboard.resumo_mensal),
                ("Year", dashboard.resumo_anual),
            ] {
                println!(
                    "{:<6} {:>5} sales  total {:>14}  average {:>12}",
                    label,
                    period.quantidade_vendas,
                    format_amount(period.total_vendas, &brl),
                    format_amount(period.ticket_medio, &brl)
                );
            }
            if !dashboard.produtos_mais_vendidos.is_empty() {
                println!("Top products:");
                for top in &dashboard.produtos_mais_vendidos {
                    println!("  {:>4}x  {}", top.quantidade_vendida, top.produto.nome);
                }
            }
            if !dashboard.vendas_por_categoria.is_empty() {
                println!("By category:");
                for (category, sales) in &dashboard.vendas_por_categoria {
                    println!(
                        "  {:<16} {:>5}  {:>14}",
                        category,
                        sales.quantidade,
                        format_amount(sales.valor, &brl)
                    );
                }
            }
        }
        ReportCommand::Comparison { year } => {
            let body = api.monthly_comparison(year).await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        ReportCommand::Detailed { month, year } => {
            let body = api.detailed(month, year).await?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        ReportCommand::Export {
            format,
            month,
            year,
            dir,
        } => {
            let format = format.into();
            let query = ExportQuery {
                formato: format,
                month,
                year,
            };
            let body = api.export(&query).await?;
            let path = export::write_report(&dir, format, &body)
                .with_context(|| format!("saving {}", report_file_name(format)))?;
            println!("{}", path.display());
        }
    }
    Ok(())
}
