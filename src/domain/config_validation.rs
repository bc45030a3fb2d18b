//! Strategy configuration validation.
//!
//! Validates `[strategy]` values before any pipeline pass runs, and the
//! assembled [`StrategyParams`] after CLI overrides are applied.

use crate::domain::error::TickscopeError;
use crate::domain::strategy::{
    DEFAULT_FAST_WINDOW, DEFAULT_SLOW_WINDOW, DEFAULT_THRESHOLD, DEFAULT_TRADE_SIZE,
    StrategyParams,
};
use crate::ports::config_port::ConfigPort;

const SECTION: &str = "strategy";

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), TickscopeError> {
    validate_window(config, "fast_window")?;
    validate_window(config, "slow_window")?;
    validate_threshold(config)?;
    validate_trade_size(config)?;
    Ok(())
}

/// Reads `[strategy]`, falling back to defaults for absent keys.
pub fn build_strategy_params(config: &dyn ConfigPort) -> Result<StrategyParams, TickscopeError> {
    validate_strategy_config(config)?;
    Ok(StrategyParams {
        fast_window: config.get_int(SECTION, "fast_window", DEFAULT_FAST_WINDOW as i64) as usize,
        slow_window: config.get_int(SECTION, "slow_window", DEFAULT_SLOW_WINDOW as i64) as usize,
        threshold: config.get_double(SECTION, "threshold", DEFAULT_THRESHOLD),
        trade_size: config.get_double(SECTION, "trade_size", DEFAULT_TRADE_SIZE),
    })
}

pub fn validate_params(params: &StrategyParams) -> Result<(), TickscopeError> {
    if params.fast_window == 0 {
        return Err(TickscopeError::InvalidWindow {
            window: params.fast_window,
        });
    }
    if params.slow_window == 0 {
        return Err(TickscopeError::InvalidWindow {
            window: params.slow_window,
        });
    }
    if !params.threshold.is_finite() || params.threshold < 0.0 {
        return Err(TickscopeError::InvalidParameter {
            name: "threshold".to_string(),
            reason: "threshold must be a non-negative number".to_string(),
        });
    }
    if !params.trade_size.is_finite() || params.trade_size <= 0.0 {
        return Err(TickscopeError::InvalidParameter {
            name: "trade_size".to_string(),
            reason: "trade_size must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_window(config: &dyn ConfigPort, key: &str) -> Result<(), TickscopeError> {
    let Some(raw) = config.get_string(SECTION, key) else {
        return Ok(());
    };
    match raw.trim().parse::<i64>() {
        Ok(v) if v >= 1 => Ok(()),
        Ok(_) => Err(TickscopeError::ConfigInvalid {
            section: SECTION.to_string(),
            key: key.to_string(),
            reason: format!("{} must be at least 1", key),
        }),
        Err(_) => Err(TickscopeError::ConfigInvalid {
            section: SECTION.to_string(),
            key: key.to_string(),
            reason: format!("{} must be an integer", key),
        }),
    }
}

fn validate_threshold(config: &dyn ConfigPort) -> Result<(), TickscopeError> {
    let Some(raw) = config.get_string(SECTION, "threshold") else {
        return Ok(());
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(()),
        _ => Err(TickscopeError::ConfigInvalid {
            section: SECTION.to_string(),
            key: "threshold".to_string(),
            reason: "threshold must be a non-negative number".to_string(),
        }),
    }
}

fn validate_trade_size(config: &dyn ConfigPort) -> Result<(), TickscopeError> {
    let Some(raw) = config.get_string(SECTION, "trade_size") else {
        return Ok(());
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(()),
        _ => Err(TickscopeError::ConfigInvalid {
            section: SECTION.to_string(),
            key: "trade_size".to_string(),
            reason: "trade_size must be positive".to_string(),
        }),
    }
}
