use moving_min_max::{MovingMax, MovingMin};
use serde::{Deserialize, Serialize};

use crate::model::Price;
use crate::moving_average::sma;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: Vec<Price>,
    pub middle: Vec<Price>,
    pub lower: Vec<Price>,
}

/// Rolling mean plus/minus `multiplier` population standard deviations over
/// a trailing window that includes the current point.
pub fn bollinger_bands(values: &[Price], window: usize, multiplier: f64) -> BollingerBands {
    let middle = sma(values, window);
    let mut upper = vec![Price::NAN; values.len()];
    let mut lower = vec![Price::NAN; values.len()];

    if window > 0 && values.len() >= window {
        for (offset, w) in values.windows(window).enumerate() {
            let ix = offset + window - 1;
            let mean = middle[ix];
            let variance = w.iter().map(|v| (v - mean).powi(2)).sum::<Price>() / window as Price;
            let deviation = multiplier * variance.sqrt();

            upper[ix] = mean + deviation;
            lower[ix] = mean - deviation;
        }
    }

    BollingerBands {
        upper,
        middle,
        lower,
    }
}

/// Trailing rolling minimum and maximum, `NaN` until `window` values exist.
pub fn rolling_extremes(values: &[Price], window: usize) -> (Vec<Price>, Vec<Price>) {
    let mut lows = MovingMin::<Price>::new();
    let mut highs = MovingMax::<Price>::new();
    let mut mins = Vec::with_capacity(values.len());
    let mut maxs = Vec::with_capacity(values.len());

    for (ix, &value) in values.iter().enumerate() {
        if window > 0 && ix >= window {
            lows.pop();
            highs.pop();
        }
        lows.push(value);
        highs.push(value);

        if window > 0 && ix + 1 >= window {
            mins.push(lows.min().copied().unwrap_or(Price::NAN));
            maxs.push(highs.max().copied().unwrap_or(Price::NAN));
        } else {
            mins.push(Price::NAN);
            maxs.push(Price::NAN);
        }
    }

    (mins, maxs)
}

/// Recent trading-range boundaries, taken at the newest bar only.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupportResistance {
    pub support: Price,
    pub resistance: Price,
}

impl SupportResistance {
    /// Both levels repeated as flat lines of `len` points.
    pub fn lines(&self, len: usize) -> (Vec<Price>, Vec<Price>) {
        (vec![self.support; len], vec![self.resistance; len])
    }
}

/// Min and max of the last `window` values. `None` without enough history.
pub fn support_resistance(values: &[Price], window: usize) -> Option<SupportResistance> {
    if window == 0 || values.len() < window {
        return None;
    }

    let (mins, maxs) = rolling_extremes(values, window);
    Some(SupportResistance {
        support: *mins.last()?,
        resistance: *maxs.last()?,
    })
}
