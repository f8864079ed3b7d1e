use chrono::NaiveDateTime;
use itertools::Itertools;
use serde::Serialize;

use crate::model::{Price, PriceSeries};

/// Latest close against the one before it, as shown in a header metric or a
/// watchlist row.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct QuoteSnapshot {
    pub timestamp: NaiveDateTime,
    pub open: Price,
    pub last: Price,
    pub volume: Option<f64>,
    pub previous: Option<Price>,
    pub change: Option<Price>,
    /// `NaN` when the previous close is zero.
    pub percent_change: Option<f64>,
}

impl QuoteSnapshot {
    pub fn from_series(series: &PriceSeries) -> Option<Self> {
        let latest = series.last()?;
        let mut snapshot = Self {
            timestamp: latest.timestamp,
            open: latest.open,
            last: latest.close,
            volume: latest.volume,
            previous: None,
            change: None,
            percent_change: None,
        };

        if let Some((prev, next)) = series.bars().iter().tuple_windows().last() {
            let change = next.close - prev.close;
            snapshot.previous = Some(prev.close);
            snapshot.change = Some(change);
            snapshot.percent_change = Some(if prev.close == 0.0 {
                f64::NAN
            } else {
                change / prev.close * 100.0
            });
        }

        Some(snapshot)
    }
}
