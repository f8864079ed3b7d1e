//! Trailing moving averages over a price column.
//!
//! Every function returns a vector aligned 1:1 with its input. Entries that
//! lack enough history are `NaN`, and a `NaN` inside a window makes that
//! window's value `NaN` too.

use crate::model::Price;

fn undefined(len: usize) -> Vec<Price> {
    vec![Price::NAN; len]
}

/// Simple moving average: mean of the trailing `period` values.
pub fn sma(values: &[Price], period: usize) -> Vec<Price> {
    if period == 0 || values.len() < period {
        return undefined(values.len());
    }

    let mut result = undefined(period - 1);
    result.extend(
        values
            .windows(period)
            .map(|w| w.iter().sum::<Price>() / period as Price),
    );
    result
}

/// Exponential moving average with `alpha = 2 / (period + 1)`, seeded by the
/// first value. Defined from index 0; index `i` only reads `values[..=i]`.
pub fn ema(values: &[Price], period: usize) -> Vec<Price> {
    if period == 0 {
        return undefined(values.len());
    }

    let alpha = 2.0 / (period as Price + 1.0);
    let mut result = Vec::with_capacity(values.len());
    let mut prev: Option<Price> = None;

    for &value in values {
        let next = match prev {
            None => value,
            Some(p) => alpha * value + (1.0 - alpha) * p,
        };
        result.push(next);
        prev = Some(next);
    }

    result
}

/// Linearly weighted moving average, weights `1..=period` with the most
/// recent value weighted highest.
pub fn wma(values: &[Price], period: usize) -> Vec<Price> {
    if period == 0 || values.len() < period {
        return undefined(values.len());
    }

    let norm = (period * (period + 1)) as Price / 2.0;
    let mut result = undefined(period - 1);
    result.extend(values.windows(period).map(|w| {
        w.iter()
            .enumerate()
            .map(|(ix, v)| (ix + 1) as Price * v)
            .sum::<Price>()
            / norm
    }));
    result
}

/// Hull moving average:
/// `WMA(2 * WMA(values, period / 2) - WMA(values, period), round(sqrt(period)))`.
pub fn hma(values: &[Price], period: usize) -> Vec<Price> {
    let half = period / 2;
    let smooth = (period as Price).sqrt().round() as usize;
    if half == 0 || smooth == 0 {
        return undefined(values.len());
    }

    let fast = wma(values, half);
    let slow = wma(values, period);
    let diff: Vec<Price> = fast
        .iter()
        .zip(&slow)
        .map(|(f, s)| 2.0 * f - s)
        .collect();

    wma(&diff, smooth)
}
