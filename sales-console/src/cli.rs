//! Command line definition

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sales_client::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use sales_client::{ClientConfig, ExportFormat, ProductInput};

#[derive(Parser, Debug)]
#[command(name = "sales-console", version, about = "Sales tracker console")]
pub struct Cli {
    /// API base URL
    #[arg(long, env = "SALES_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Bearer token from a previous login
    #[arg(long, env = "SALES_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "SALES_API_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Log level for this tool and the client library
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Write logs to a daily file in this directory instead of stderr
    #[arg(long, env = "LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api_url.clone()).with_timeout(self.timeout);
        match self.token.as_deref().filter(|t| !t.is_empty()) {
            Some(token) => config.with_token(token),
            None => config,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and print the token to export as SALES_API_TOKEN
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        senha: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        nome: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        senha: String,
    },
    /// Sales records
    #[command(subcommand)]
    Sales(SalesCommand),
    /// Product catalog
    #[command(subcommand)]
    Products(ProductsCommand),
    /// Server-side reports
    #[command(subcommand)]
    Report(ReportCommand),
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct FilterArgs {
    #[arg(long)]
    pub day: Option<u32>,
    #[arg(long)]
    pub month: Option<u32>,
    #[arg(long)]
    pub year: Option<u32>,
}

#[derive(Subcommand, Debug)]
pub enum SalesCommand {
    /// List sales matching the filter
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Case-insensitive text search over the loaded records
        #[arg(long, default_value = "")]
        search: String,
        /// Date prefix, e.g. 2024-03
        #[arg(long, default_value = "")]
        since: String,
        /// Print count, total and average after the list
        #[arg(long)]
        summary: bool,
    },
    /// Register a sale
    Create {
        /// Date as dd/mm/yyyy
        #[arg(long)]
        date: String,
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
    },
    /// Update a sale by id
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        date: String,
        #[arg(long, allow_negative_numbers = true)]
        amount: f64,
    },
    /// Delete a sale by id
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Grand total computed by the server
    Total,
    /// Write the filtered sales to vendas.csv
    ExportCsv {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ProductArgs {
    #[arg(long)]
    pub nome: String,
    #[arg(long)]
    pub preco: f64,
    #[arg(long)]
    pub categoria: Option<String>,
    #[arg(long)]
    pub descricao: Option<String>,
    /// Mark the product inactive
    #[arg(long)]
    pub inactive: bool,
}

impl From<ProductArgs> for ProductInput {
    fn from(args: ProductArgs) -> Self {
        ProductInput {
            nome: args.nome,
            descricao: args.descricao,
            preco: args.preco,
            categoria: args.categoria,
            ativo: Some(!args.inactive),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ProductsCommand {
    /// List one page of the catalog
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 50)]
        limit: u32,
        #[arg(long)]
        category: Option<String>,
        /// Name or category search over the loaded page
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Add a product
    Create(ProductArgs),
    /// Change fields of a product; omitted fields keep their value
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        nome: Option<String>,
        #[arg(long)]
        preco: Option<f64>,
        #[arg(long)]
        categoria: Option<String>,
        #[arg(long)]
        descricao: Option<String>,
    },
    /// Remove a product
    Delete {
        #[arg(long)]
        id: i64,
    },
    /// Best sellers
    Top {
        #[arg(long, default_value_t = 5)]
        limit: u32,
    },
    /// Products in one category
    Category { name: String },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ReportFormat {
    Json,
    Csv,
}

impl From<ReportFormat> for ExportFormat {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Json => ExportFormat::Json,
            ReportFormat::Csv => ExportFormat::Csv,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ReportCommand {
    /// Monthly and yearly summaries
    Dashboard,
    /// Month-by-month comparison for a year
    Comparison {
        #[arg(long)]
        year: u32,
    },
    /// Detailed report for one month
    Detailed {
        #[arg(long)]
        month: u32,
        #[arg(long)]
        year: u32,
    },
    /// Download a report file
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ReportFormat,
        #[arg(long)]
        month: Option<u32>,
        #[arg(long)]
        year: Option<u32>,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sales_list_with_filter() {
        let cli = Cli::try_parse_from([
            "sales-console",
            "--api-url",
            "http://api.local",
            "--token",
            "abc",
            "sales",
            "list",
            "--month",
            "3",
            "--year",
            "2024",
            "--summary",
        ])
        .unwrap();

        let config = cli.client_config();
        assert_eq!(config.base_url, "http://api.local");
        assert_eq!(config.token.as_deref(), Some("abc"));

        match cli.command {
            Command::Sales(SalesCommand::List {
                filter, summary, ..
            }) => {
                assert_eq!(filter.month, Some(3));
                assert_eq!(filter.year, Some(2024));
                assert_eq!(filter.day, None);
                assert!(summary);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_empty_token_is_ignored() {
        let cli = Cli::try_parse_from([
            "sales-console",
            "--api-url",
            "http://api.local",
            "--token",
            "",
            "sales",
            "total",
        ])
        .unwrap();
        assert!(cli.client_config().token.is_none());
    }

    #[test]
    fn test_report_format_maps_to_export_format() {
        assert_eq!(ExportFormat::from(ReportFormat::Csv), ExportFormat::Csv);
        assert_eq!(ExportFormat::from(ReportFormat::Json), ExportFormat::Json);
    }
}
