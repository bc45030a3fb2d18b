//! Crossover strategy parameters.

pub const DEFAULT_FAST_WINDOW: usize = 5;
pub const DEFAULT_SLOW_WINDOW: usize = 20;
pub const DEFAULT_THRESHOLD: f64 = 0.0;
pub const DEFAULT_TRADE_SIZE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyParams {
    pub fast_window: usize,
    pub slow_window: usize,
    /// Half-width of the neutral band around a zero MA diff.
    pub threshold: f64,
    pub trade_size: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            fast_window: DEFAULT_FAST_WINDOW,
            slow_window: DEFAULT_SLOW_WINDOW,
            threshold: DEFAULT_THRESHOLD,
            trade_size: DEFAULT_TRADE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params() {
        let p = StrategyParams::default();
        assert_eq!(p.fast_window, 5);
        assert_eq!(p.slow_window, 20);
        assert_eq!(p.threshold, 0.0);
        assert_eq!(p.trade_size, 10.0);
    }

    #[test]
    fn override_with_struct_update() {
        let p = StrategyParams {
            threshold: 0.5,
            ..StrategyParams::default()
        };
        assert_eq!(p.threshold, 0.5);
        assert_eq!(p.fast_window, DEFAULT_FAST_WINDOW);
    }
}
