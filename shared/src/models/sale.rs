//! Sale Model

use serde::{Deserialize, Serialize};

/// Sale entity as listed by `GET /vendas`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: i64,
    /// Display date (`dd/mm/yyyy`), sent back to the API verbatim
    pub data_formatada: String,
    /// Amount in currency units
    pub valor: f64,
}

/// Create / update sale payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalePayload {
    pub data_formatada: String,
    pub valor: f64,
}

impl SalePayload {
    pub fn new(date: impl Into<String>, amount: f64) -> Self {
        Self {
            data_formatada: date.into(),
            valor: amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sale_wire_names() {
        let sale: Sale =
            serde_json::from_str(r#"{"id":7,"dataFormatada":"03/02/2024","valor":12.5}"#).unwrap();
        assert_eq!(sale.id, 7);
        assert_eq!(sale.data_formatada, "03/02/2024");
        assert_eq!(sale.valor, 12.5);

        let body = serde_json::to_value(SalePayload::new("03/02/2024", 12.5)).unwrap();
        assert_eq!(body["dataFormatada"], "03/02/2024");
        assert_eq!(body["valor"], 12.5);
    }
}
