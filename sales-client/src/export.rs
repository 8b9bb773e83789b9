//! Local file export
//!
//! The sales CSV is built client-side from whatever collection is loaded.
//! Fields are written unquoted. Dates and amounts never contain commas; a
//! free-text column would need an escaping scheme first.

use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use shared::{ExportFormat, Sale};

use crate::api::reports::report_file_name;
use crate::{ClientError, ClientResult};

pub const SALES_CSV_FILE: &str = "vendas.csv";
pub const SALES_CSV_HEADER: [&str; 3] = ["ID", "Data", "Valor"];

/// Header plus one `id,date,amount` row per sale, joined by `\n`
pub fn sales_to_csv(sales: &[Sale]) -> ClientResult<String> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    wtr.write_record(SALES_CSV_HEADER)?;
    for sale in sales {
        wtr.write_record([
            sale.id.to_string(),
            sale.data_formatada.clone(),
            sale.valor.to_string(),
        ])?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| ClientError::Io(e.into_error()))?;
    let mut text = String::from_utf8(bytes)
        .map_err(|e| ClientError::Internal(format!("CSV is not UTF-8: {}", e)))?;
    // No terminator after the last row
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

/// Write `vendas.csv` into `dir`, returning the file path
pub fn write_sales_csv(dir: &Path, sales: &[Sale]) -> ClientResult<PathBuf> {
    let path = dir.join(SALES_CSV_FILE);
    std::fs::write(&path, sales_to_csv(sales)?)?;
    tracing::info!(path = %path.display(), rows = sales.len(), "Exported sales CSV");
    Ok(path)
}

/// Write a server-generated report as `relatorio-vendas.{format}`
pub fn write_report(dir: &Path, format: ExportFormat, body: &[u8]) -> ClientResult<PathBuf> {
    let path = dir.join(report_file_name(format));
    std::fs::write(&path, body)?;
    tracing::info!(path = %path.display(), bytes = body.len(), "Saved report");
    Ok(path)
}
