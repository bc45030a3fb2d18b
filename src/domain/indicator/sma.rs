//! Rolling mean with a shrinking window at the series start.
//!
//! SMA(n)[i] = mean(v[max(0, i-n+1)..=i])
//! No warmup: the first elements average over the available prefix, so
//! SMA(n)[0] == v[0] for every n.

use crate::domain::error::TickscopeError;

pub fn rolling_mean(values: &[f64], window: usize) -> Result<Vec<f64>, TickscopeError> {
    if window == 0 {
        return Err(TickscopeError::InvalidWindow { window });
    }

    let mut means = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        let start = (i + 1).saturating_sub(window);
        let slice = &values[start..=i];
        means.push(slice.iter().sum::<f64>() / slice.len() as f64);
    }
    Ok(means)
}
