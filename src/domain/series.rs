//! Per-product record series.

use crate::domain::price_record::PriceRecord;
use std::collections::HashSet;

/// Records for a single product, non-decreasing by (day, timestamp).
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub product: String,
    pub records: Vec<PriceRecord>,
}

impl Series {
    /// Wraps records that are already filtered and sorted.
    pub fn new(product: impl Into<String>, records: Vec<PriceRecord>) -> Self {
        Self {
            product: product.into(),
            records,
        }
    }

    /// Filters `records` to `product` and stable-sorts by (day, timestamp).
    pub fn for_product(records: &[PriceRecord], product: &str) -> Self {
        let mut filtered: Vec<PriceRecord> = records
            .iter()
            .filter(|r| r.product == product)
            .cloned()
            .collect();
        filtered.sort_by_key(PriceRecord::time_key);
        Self::new(product, filtered)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn mid_prices(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.mid_price).collect()
    }
}

/// Distinct product identifiers in first-seen order.
pub fn list_products(records: &[PriceRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.product.as_str()))
        .map(|r| r.product.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(product: &str, day: i64, timestamp: i64, mid: f64) -> PriceRecord {
        PriceRecord {
            product: product.to_string(),
            day,
            timestamp,
            mid_price: mid,
            bid_price_1: mid - 1.0,
            ask_price_1: mid + 1.0,
            profit_and_loss: None,
        }
    }

    #[test]
    fn for_product_filters_and_sorts() {
        let records = vec![
            make_record("KELP", 0, 200, 3.0),
            make_record("RESIN", 0, 100, 99.0),
            make_record("KELP", -1, 900, 1.0),
            make_record("KELP", 0, 100, 2.0),
        ];
        let series = Series::for_product(&records, "KELP");

        assert_eq!(series.product, "KELP");
        assert_eq!(series.len(), 3);
        assert_eq!(series.mid_prices(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn for_product_sort_is_stable_on_equal_keys() {
        let records = vec![
            make_record("KELP", 0, 100, 1.0),
            make_record("KELP", 0, 100, 2.0),
        ];
        let series = Series::for_product(&records, "KELP");
        assert_eq!(series.mid_prices(), vec![1.0, 2.0]);
    }

    #[test]
    fn for_product_unknown_is_empty() {
        let records = vec![make_record("KELP", 0, 100, 1.0)];
        let series = Series::for_product(&records, "SQUID");
        assert!(series.is_empty());
    }

    #[test]
    fn list_products_first_seen_order() {
        let records = vec![
            make_record("RESIN", 0, 100, 1.0),
            make_record("KELP", 0, 100, 1.0),
            make_record("RESIN", 0, 200, 1.0),
        ];
        assert_eq!(list_products(&records), vec!["RESIN", "KELP"]);
    }
}
