use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type Price = f64;

/// One row as delivered by a market-data provider. Any field may be missing.
#[derive(Default, Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBar {
    pub timestamp: NaiveDateTime,
    pub open: Option<Price>,
    pub high: Option<Price>,
    pub low: Option<Price>,
    pub close: Option<Price>,
    pub volume: Option<f64>,
}

pub type RawSeries = Vec<RawBar>;

#[derive(Default, Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: NaiveDateTime,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    /// Absent for instruments without traded volume.
    pub volume: Option<f64>,
}

/// Validated OHLCV series with strictly increasing timestamps.
///
/// Only [`crate::validator::validate`] builds one, so every instance upholds
/// the ordering and completeness invariants.
#[derive(Default, Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    pub(crate) fn from_validated(bars: Vec<Bar>) -> Self {
        Self { bars }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<Price> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.bars.iter().map(|b| b.timestamp).collect()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }
}
