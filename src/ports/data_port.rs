//! Tick data access port trait.

use crate::domain::error::TickscopeError;
use crate::domain::price_record::PriceRecord;

pub trait TickDataPort {
    /// Every record in the source, in source order, with mid prices filled.
    fn fetch_all(&self) -> Result<Vec<PriceRecord>, TickscopeError>;

    /// Records for `product`, sorted by (day, timestamp).
    fn fetch_records(&self, product: &str) -> Result<Vec<PriceRecord>, TickscopeError> {
        let mut records: Vec<PriceRecord> = self
            .fetch_all()?
            .into_iter()
            .filter(|r| r.product == product)
            .collect();
        records.sort_by_key(PriceRecord::time_key);
        Ok(records)
    }

    /// Distinct products in first-seen order.
    fn list_products(&self) -> Result<Vec<String>, TickscopeError> {
        Ok(crate::domain::series::list_products(&self.fetch_all()?))
    }
}
