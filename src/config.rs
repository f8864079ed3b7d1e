use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::request::IndicatorRequest;
use crate::timeframe::Timeframe;

pub const ALLOWED_PERIODS: [usize; 7] = [5, 10, 20, 30, 40, 50, 60];
pub const BOLLINGER_WINDOWS: [usize; 4] = [5, 10, 20, 50];
pub const MIN_STDDEV_MULTIPLIER: f64 = 1.0;
pub const MAX_STDDEV_MULTIPLIER: f64 = 3.0;
pub const DEFAULT_BOLLINGER_WINDOW: usize = 20;
pub const DEFAULT_STDDEV_MULTIPLIER: f64 = 2.0;
pub const SUPPORT_RESISTANCE_WINDOW: usize = 30;

/// What to chart: the timeframe preset plus the overlays to draw on it.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default)]
    pub timeframe: Timeframe,
    #[serde(default)]
    pub request: IndicatorRequest,
}

impl ChartConfig {
    pub fn from_json_str(json: &str) -> eyre::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?;
        Self::from_json_str(&text)
    }
}
