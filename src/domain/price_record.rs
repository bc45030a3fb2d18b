//! Market tick record representation.

#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub product: String,
    pub day: i64,
    pub timestamp: i64,
    pub mid_price: f64,
    pub bid_price_1: f64,
    pub ask_price_1: f64,
    /// Present only on rows that record a closed historical trade.
    pub profit_and_loss: Option<f64>,
}

impl PriceRecord {
    /// ask_price_1 - bid_price_1
    pub fn spread(&self) -> f64 {
        self.ask_price_1 - self.bid_price_1
    }

    /// Ordering key within a product: (day, timestamp).
    pub fn time_key(&self) -> (i64, i64) {
        (self.day, self.timestamp)
    }
}
