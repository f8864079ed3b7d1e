use tracing::debug;

use crate::model::{Bar, Price, PriceSeries, RawBar};

fn present(value: Option<Price>) -> Option<Price> {
    value.filter(|v| v.is_finite())
}

fn complete(raw: &RawBar) -> Option<Bar> {
    Some(Bar {
        timestamp: raw.timestamp,
        open: present(raw.open)?,
        high: present(raw.high)?,
        low: present(raw.low)?,
        close: present(raw.close)?,
        volume: raw.volume.filter(|v| v.is_finite()),
    })
}

/// Drops rows with a missing (absent or non-finite) OHLC field and rows that
/// would break the strictly increasing time index.
///
/// Returns `None` when nothing survives; callers treat that as "nothing to
/// chart". Surviving rows keep their original order.
pub fn validate(raw: &[RawBar]) -> Option<PriceSeries> {
    let mut bars: Vec<Bar> = Vec::with_capacity(raw.len());
    let mut incomplete = 0usize;
    let mut out_of_order = 0usize;

    for row in raw {
        let Some(bar) = complete(row) else {
            incomplete += 1;
            continue;
        };

        if let Some(prev) = bars.last() {
            if bar.timestamp <= prev.timestamp {
                out_of_order += 1;
                continue;
            }
        }

        bars.push(bar);
    }

    if incomplete > 0 || out_of_order > 0 {
        debug!(
            rows = raw.len(),
            incomplete, out_of_order, "dropped rows while validating series"
        );
    }

    if bars.is_empty() {
        None
    } else {
        Some(PriceSeries::from_validated(bars))
    }
}
