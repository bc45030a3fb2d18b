//! Single-position simulation state and closed trades.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Long,
    Short,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Long => write!(f, "LONG"),
            Side::Short => write!(f, "SHORT"),
        }
    }
}

/// State threaded through a backtest pass.
///
/// `position` is signed: positive long, negative short, 0 flat.
/// `entry_price` and `entry_index` are only meaningful while not flat.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationState {
    pub position: f64,
    pub entry_price: f64,
    pub entry_index: usize,
    pub realized_pnl: f64,
}

impl SimulationState {
    pub fn is_flat(&self) -> bool {
        self.position == 0.0
    }

    pub fn is_long(&self) -> bool {
        self.position > 0.0
    }

    pub fn is_short(&self) -> bool {
        self.position < 0.0
    }

    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        if self.is_flat() {
            0.0
        } else {
            (price - self.entry_price) * self.position
        }
    }

    /// realized + unrealized at `price`.
    pub fn mark_to_market(&self, price: f64) -> f64 {
        self.realized_pnl + self.unrealized_pnl(price)
    }

    /// Realizes any open position at `price` and leaves the state flat.
    pub fn close(&mut self, index: usize, price: f64) -> Option<ClosedTrade> {
        if self.is_flat() {
            return None;
        }

        let pnl = (price - self.entry_price) * self.position;
        let trade = ClosedTrade {
            side: if self.is_long() { Side::Long } else { Side::Short },
            size: self.position.abs(),
            entry_index: self.entry_index,
            exit_index: index,
            entry_price: self.entry_price,
            exit_price: price,
            pnl,
        };

        self.realized_pnl += pnl;
        self.position = 0.0;
        Some(trade)
    }

    /// Closes any open position, then opens `side` with `size` at `price`.
    pub fn reverse_into(
        &mut self,
        side: Side,
        size: f64,
        index: usize,
        price: f64,
    ) -> Option<ClosedTrade> {
        let closed = self.close(index, price);
        self.position = match side {
            Side::Long => size,
            Side::Short => -size,
        };
        self.entry_price = price;
        self.entry_index = index;
        closed
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClosedTrade {
    pub side: Side,
    pub size: f64,
    pub entry_index: usize,
    pub exit_index: usize,
    pub entry_price: f64,
    pub exit_price: f64,
    pub pnl: f64,
}

impl ClosedTrade {
    /// Holding period in records.
    pub fn duration(&self) -> usize {
        self.exit_index - self.entry_index
    }
}
