use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::QuoteSnapshot;
use crate::compositor::{compose, legend};
use crate::loader::MarketDataSource;
use crate::model::PriceSeries;
use crate::overlay::{LegendEntry, Overlay};
use crate::request::IndicatorRequest;
use crate::timeframe::Timeframe;
use crate::validator::validate;

/// Everything a renderer needs for one ticker.
#[derive(Debug, Clone, Serialize)]
pub enum ChartOutcome {
    Charted {
        series: PriceSeries,
        overlays: Vec<Overlay>,
        legend: Vec<LegendEntry>,
        snapshot: Option<QuoteSnapshot>,
    },
    NoData,
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct TickerChart {
    pub ticker: String,
    pub outcome: ChartOutcome,
}

pub fn chart_ticker<S: MarketDataSource + ?Sized>(
    source: &S,
    ticker: &str,
    timeframe: Timeframe,
    request: &IndicatorRequest,
) -> ChartOutcome {
    let raw = match source.fetch(ticker, timeframe) {
        Ok(Some(raw)) => raw,
        Ok(None) => return ChartOutcome::NoData,
        Err(e) => {
            warn!(ticker, error = %e, "market data fetch failed");
            return ChartOutcome::Failed {
                reason: format!("{e:#}"),
            };
        }
    };

    let Some(series) = validate(&raw) else {
        return ChartOutcome::NoData;
    };

    let overlays = compose(&series, request);
    ChartOutcome::Charted {
        legend: legend(&overlays),
        snapshot: QuoteSnapshot::from_series(&series),
        series,
        overlays,
    }
}

/// Charts each ticker independently, in input order. A failing ticker does
/// not stop the rest.
pub fn chart_tickers<S, T>(
    source: &S,
    tickers: &[T],
    timeframe: Timeframe,
    request: &IndicatorRequest,
) -> Vec<TickerChart>
where
    S: MarketDataSource + ?Sized,
    T: AsRef<str>,
{
    let charts: Vec<TickerChart> = tickers
        .iter()
        .map(|t| TickerChart {
            ticker: t.as_ref().to_owned(),
            outcome: chart_ticker(source, t.as_ref(), timeframe, request),
        })
        .collect();

    let charted = charts
        .iter()
        .filter(|c| matches!(c.outcome, ChartOutcome::Charted { .. }))
        .count();
    info!(
        tickers = charts.len(),
        charted,
        timeframe = %timeframe,
        "charted batch"
    );
    charts
}
