use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::{
    ALLOWED_PERIODS, BOLLINGER_WINDOWS, DEFAULT_BOLLINGER_WINDOW, DEFAULT_STDDEV_MULTIPLIER,
    MAX_STDDEV_MULTIPLIER, MIN_STDDEV_MULTIPLIER,
};
use crate::error::RequestError;

/// A moving-average lookback drawn from [`ALLOWED_PERIODS`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Period(usize);

impl Period {
    pub fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<usize> for Period {
    type Error = RequestError;

    fn try_from(period: usize) -> Result<Self, Self::Error> {
        if ALLOWED_PERIODS.contains(&period) {
            Ok(Self(period))
        } else {
            Err(RequestError::UnsupportedPeriod { period })
        }
    }
}

impl From<Period> for usize {
    fn from(period: Period) -> Self {
        period.0
    }
}

/// A Bollinger window drawn from [`BOLLINGER_WINDOWS`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct BollingerWindow(usize);

impl BollingerWindow {
    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for BollingerWindow {
    fn default() -> Self {
        Self(DEFAULT_BOLLINGER_WINDOW)
    }
}

impl TryFrom<usize> for BollingerWindow {
    type Error = RequestError;

    fn try_from(window: usize) -> Result<Self, Self::Error> {
        if BOLLINGER_WINDOWS.contains(&window) {
            Ok(Self(window))
        } else {
            Err(RequestError::UnsupportedWindow { window })
        }
    }
}

impl From<BollingerWindow> for usize {
    fn from(window: BollingerWindow) -> Self {
        window.0
    }
}

/// Band width in standard deviations, within
/// `[MIN_STDDEV_MULTIPLIER, MAX_STDDEV_MULTIPLIER]`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct StdDevMultiplier(f64);

impl StdDevMultiplier {
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for StdDevMultiplier {
    fn default() -> Self {
        Self(DEFAULT_STDDEV_MULTIPLIER)
    }
}

impl TryFrom<f64> for StdDevMultiplier {
    type Error = RequestError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if (MIN_STDDEV_MULTIPLIER..=MAX_STDDEV_MULTIPLIER).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RequestError::MultiplierOutOfRange { value })
        }
    }
}

impl From<StdDevMultiplier> for f64 {
    fn from(multiplier: StdDevMultiplier) -> Self {
        multiplier.0
    }
}

#[derive(Default, Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct BollingerConfig {
    #[serde(default)]
    pub window: BollingerWindow,
    #[serde(default)]
    pub multiplier: StdDevMultiplier,
}

/// Which overlays to compute. Periods keep selection order; repeats collapse.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRequest {
    #[serde(default, deserialize_with = "unique_periods")]
    sma: Vec<Period>,
    #[serde(default, deserialize_with = "unique_periods")]
    ema: Vec<Period>,
    #[serde(default, deserialize_with = "unique_periods")]
    hma: Vec<Period>,
    #[serde(default)]
    bollinger: Option<BollingerConfig>,
    #[serde(default)]
    support_resistance: bool,
}

fn unique_periods<'de, D>(deserializer: D) -> Result<Vec<Period>, D::Error>
where
    D: Deserializer<'de>,
{
    let periods = Vec::<Period>::deserialize(deserializer)?;
    Ok(periods.into_iter().unique().collect())
}

fn merge(into: &mut Vec<Period>, periods: impl IntoIterator<Item = Period>) {
    for period in periods {
        if !into.contains(&period) {
            into.push(period);
        }
    }
}

impl IndicatorRequest {
    pub fn with_sma(mut self, periods: impl IntoIterator<Item = Period>) -> Self {
        merge(&mut self.sma, periods);
        self
    }

    pub fn with_ema(mut self, periods: impl IntoIterator<Item = Period>) -> Self {
        merge(&mut self.ema, periods);
        self
    }

    pub fn with_hma(mut self, periods: impl IntoIterator<Item = Period>) -> Self {
        merge(&mut self.hma, periods);
        self
    }

    pub fn with_bollinger(mut self, config: BollingerConfig) -> Self {
        self.bollinger = Some(config);
        self
    }

    pub fn with_support_resistance(mut self, value: bool) -> Self {
        self.support_resistance = value;
        self
    }

    pub fn sma_periods(&self) -> &[Period] {
        &self.sma
    }

    pub fn ema_periods(&self) -> &[Period] {
        &self.ema
    }

    pub fn hma_periods(&self) -> &[Period] {
        &self.hma
    }

    pub fn bollinger(&self) -> Option<BollingerConfig> {
        self.bollinger
    }

    pub fn support_resistance(&self) -> bool {
        self.support_resistance
    }
}

/// Parses loosely typed period numbers, e.g. from a form, into `Period`s.
pub fn periods(values: &[usize]) -> Result<Vec<Period>, RequestError> {
    values.iter().map(|&p| Period::try_from(p)).collect()
}
