//! Derived views
//!
//! Pure functions over an in-memory collection. Nothing here is cached: call
//! them again whenever the collection, the search term, or the date window
//! changes.
//!
//! `aggregate_total` sums whatever subset it is given and is a different
//! number from the server's `/vendas/total`, which is unfiltered.

use std::borrow::Cow;

use rust_decimal::Decimal;
use shared::{Product, Sale};

use crate::money::sum_amounts;

/// Fields a record exposes to free-text search
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

/// Sortable date key (`yyyy-mm-dd...`) used for date-window filtering
pub trait Dated {
    fn date_key(&self) -> Cow<'_, str>;
}

/// Monetary amount a record contributes to totals
pub trait Priced {
    fn amount(&self) -> f64;
}

impl Searchable for Sale {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.data_formatada.as_str()]
    }
}

impl Dated for Sale {
    fn date_key(&self) -> Cow<'_, str> {
        iso_date_key(&self.data_formatada)
    }
}

impl Priced for Sale {
    fn amount(&self) -> f64 {
        self.valor
    }
}

impl Searchable for Product {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.nome.as_str()];
        if let Some(category) = &self.categoria {
            fields.push(category.as_str());
        }
        fields
    }
}

impl Dated for Product {
    fn date_key(&self) -> Cow<'_, str> {
        Cow::Owned(self.created_at.format("%Y-%m-%d").to_string())
    }
}

impl Priced for Product {
    fn amount(&self) -> f64 {
        self.price().unwrap_or_default()
    }
}

/// `dd/mm/yyyy` → `yyyy-mm-dd`; anything else is returned unchanged
pub fn iso_date_key(display_date: &str) -> Cow<'_, str> {
    let parts: Vec<&str> = display_date.trim().split('/').collect();
    match parts.as_slice() {
        [d, m, y]
            if d.len() == 2
                && m.len() == 2
                && y.len() == 4
                && parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())) =>
        {
            Cow::Owned(format!("{}-{}-{}", y, m, d))
        }
        _ => Cow::Borrowed(display_date),
    }
}

/// Case-insensitive substring match on any search field; empty term keeps all
pub fn search<'a, T: Searchable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    let needle = term.to_lowercase();
    items
        .iter()
        .filter(|item| {
            needle.is_empty()
                || item
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Date-key prefix match (e.g. `"2024-03"`); empty prefix keeps all
pub fn within_date_window<'a, T: Dated>(
    items: impl IntoIterator<Item = &'a T>,
    prefix: &str,
) -> Vec<&'a T>
where
    T: 'a,
{
    items
        .into_iter()
        .filter(|item| prefix.is_empty() || item.date_key().starts_with(prefix))
        .collect()
}

/// Search and date window together, as the sales list screen applies them
pub fn filter_records<'a, T: Searchable + Dated>(
    items: &'a [T],
    term: &str,
    date_prefix: &str,
) -> Vec<&'a T> {
    within_date_window(search(items, term), date_prefix)
}

/// Sum of amounts over exactly the given records, saturating at Decimal's bounds
pub fn aggregate_total<'a, T: Priced + 'a>(items: impl IntoIterator<Item = &'a T>) -> Decimal {
    sum_amounts(items.into_iter().map(|item| item.amount()))
}

/// Mean amount; zero for an empty subset
pub fn average_ticket<'a, T: Priced + 'a>(items: impl IntoIterator<Item = &'a T>) -> Decimal {
    SalesSummary::of(items).average
}

/// Count, total and average of one filtered subset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SalesSummary {
    pub count: usize,
    pub total: Decimal,
    pub average: Decimal,
}

impl SalesSummary {
    pub fn of<'a, T: Priced + 'a>(items: impl IntoIterator<Item = &'a T>) -> Self {
        let mut count = 0usize;
        let total = sum_amounts(items.into_iter().map(|item| {
            count += 1;
            item.amount()
        }));
        let average = if count == 0 {
            Decimal::ZERO
        } else {
            total / Decimal::from(count)
        };
        Self {
            count,
            total,
            average,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::to_f64;

    fn sale(id: i64, date: &str, amount: f64) -> Sale {
        Sale {
            id,
            data_formatada: date.into(),
            valor: amount,
        }
    }

    fn product(nome: &str, categoria: Option<&str>, preco: &str) -> Product {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "nome": nome,
            "preco": preco,
            "categoria": categoria,
            "ativo": true,
            "usuarioId": 1,
            "createdAt": "2024-03-05T10:00:00Z",
            "updatedAt": "2024-03-05T10:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_iso_date_key() {
        assert_eq!(iso_date_key("05/03/2024"), "2024-03-05");
        assert_eq!(iso_date_key("2024-03-05"), "2024-03-05");
        assert_eq!(iso_date_key("5/3/2024"), "5/3/2024");
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let products = vec![
            product("Bolo de Cenoura", Some("Bolos"), "30.00"),
            product("Brigadeiro", Some("Doces"), "2.50"),
            product("Café", None, "5.00"),
        ];
        assert_eq!(search(&products, "").len(), 3);
        assert_eq!(search(&products, "BOLO").len(), 1);
        let doces = search(&products, "doce");
        assert_eq!(doces.len(), 1);
        assert_eq!(doces[0].nome, "Brigadeiro");
        assert!(search(&products, "pizza").is_empty());
    }

    #[test]
    fn test_date_window() {
        let sales = vec![
            sale(1, "10/01/2024", 10.0),
            sale(2, "15/02/2024", 20.0),
            sale(3, "20/02/2024", 30.0),
        ];
        assert_eq!(within_date_window(&sales, "").len(), 3);
        let feb = within_date_window(&sales, "2024-02");
        assert_eq!(feb.iter().map(|s| s.id).collect::<Vec<_>>(), vec![2, 3]);
        assert!(within_date_window(&sales, "2023").is_empty());
    }

    #[test]
    fn test_filter_records_combines_both() {
        let sales = vec![sale(1, "10/01/2024", 10.0), sale(2, "10/02/2024", 20.0)];
        let hits = filter_records(&sales, "10/0", "2024-02");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }

    #[test]
    fn test_aggregate_total_and_average() {
        let sales = vec![
            sale(1, "01/01/2024", 0.1),
            sale(2, "02/01/2024", 0.2),
            sale(3, "03/01/2024", 0.3),
        ];
        assert_eq!(to_f64(aggregate_total(&sales)), 0.6);
        assert_eq!(to_f64(average_ticket(&sales)), 0.2);

        let summary = SalesSummary::of(within_date_window(&sales, "2024-01"));
        assert_eq!(summary.count, 3);
        assert_eq!(to_f64(summary.total), 0.6);
    }

    #[test]
    fn test_average_of_empty_subset_is_zero() {
        let sales = vec![sale(1, "01/01/2024", 50.0)];
        let none = within_date_window(&sales, "1999");
        assert_eq!(average_ticket(none.iter().copied()), Decimal::ZERO);
        assert_eq!(SalesSummary::of(Vec::<&Sale>::new()), SalesSummary::default());
    }

    #[test]
    fn test_summary_of_amounts_beyond_decimal_range() {
        let sales = vec![sale(1, "01/01/2024", 5e28), sale(2, "02/01/2024", 5e28)];
        let summary = SalesSummary::of(&sales);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total, Decimal::MAX);
        assert_eq!(summary.average, Decimal::MAX / Decimal::from(2));
        assert_eq!(aggregate_total(&sales), Decimal::MAX);
    }

    #[test]
    fn test_product_price_counts_toward_total() {
        let products = vec![product("A", None, "1.50"), product("B", None, "oops")];
        assert_eq!(to_f64(aggregate_total(&products)), 1.5);
        assert_eq!(products[0].date_key(), "2024-03-05");
    }
}
