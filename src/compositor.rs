//! Turns a validated series and an [`IndicatorRequest`] into the ordered list
//! of overlays a renderer draws: SMA, EMA, HMA, Bollinger, then
//! support/resistance.

use tracing::debug;

use crate::bands::{bollinger_bands, support_resistance};
use crate::config::SUPPORT_RESISTANCE_WINDOW;
use crate::model::{Price, PriceSeries};
use crate::moving_average::{ema, hma, sma};
use crate::overlay::{
    palette_color, LegendEntry, Overlay, OverlayKind, BOLLINGER_BAND_COLOR,
    BOLLINGER_MIDDLE_COLOR, EMA_COLORS, HMA_COLORS, RESISTANCE_COLOR, SMA_COLORS, SUPPORT_COLOR,
};
use crate::request::{IndicatorRequest, Period};

fn fits(window: usize, len: usize) -> bool {
    window >= 2 && window <= len
}

type MovingAverageFn = fn(&[Price], usize) -> Vec<Price>;

fn moving_averages(
    overlays: &mut Vec<Overlay>,
    closes: &[Price],
    kind: OverlayKind,
    periods: &[Period],
    palette: &[&'static str],
    compute: MovingAverageFn,
) {
    // Palette slots follow selection order, so a skipped period still uses one.
    for (ix, period) in periods.iter().enumerate() {
        let period = period.get();
        if !fits(period, closes.len()) {
            debug!(%kind, period, len = closes.len(), "skipping overlay, not enough history");
            continue;
        }

        let color = palette_color(palette, ix);
        let overlay = Overlay::new(kind, period, color, compute(closes, period));
        if overlay.is_defined() {
            overlays.push(overlay);
        } else {
            debug!(%kind, period, "skipping overlay, no defined points");
        }
    }
}

/// Computes every requested overlay. The input series is only read.
pub fn compose(series: &PriceSeries, request: &IndicatorRequest) -> Vec<Overlay> {
    let mut overlays = Vec::new();
    if series.len() < 2 {
        return overlays;
    }

    let closes = series.closes();
    let len = closes.len();

    let averages: [(OverlayKind, &[Period], &[&'static str], MovingAverageFn); 3] = [
        (OverlayKind::Sma, request.sma_periods(), &SMA_COLORS[..], sma as MovingAverageFn),
        (OverlayKind::Ema, request.ema_periods(), &EMA_COLORS[..], ema as MovingAverageFn),
        (OverlayKind::Hma, request.hma_periods(), &HMA_COLORS[..], hma as MovingAverageFn),
    ];
    for (kind, periods, palette, compute) in averages {
        moving_averages(&mut overlays, &closes, kind, periods, palette, compute);
    }

    if let Some(config) = request.bollinger() {
        let window = config.window.get();
        if fits(window, len) {
            let bands = bollinger_bands(&closes, window, config.multiplier.value());
            overlays.extend([
                Overlay::new(
                    OverlayKind::BollingerUpper,
                    window,
                    BOLLINGER_BAND_COLOR,
                    bands.upper,
                ),
                Overlay::new(
                    OverlayKind::BollingerMiddle,
                    window,
                    BOLLINGER_MIDDLE_COLOR,
                    bands.middle,
                ),
                Overlay::new(
                    OverlayKind::BollingerLower,
                    window,
                    BOLLINGER_BAND_COLOR,
                    bands.lower,
                ),
            ]);
        } else {
            debug!(window, len, "skipping bollinger bands, not enough history");
        }
    }

    if request.support_resistance() {
        match support_resistance(&closes, SUPPORT_RESISTANCE_WINDOW) {
            Some(levels) => {
                let (support, resistance) = levels.lines(len);
                let window = SUPPORT_RESISTANCE_WINDOW;
                overlays.extend([
                    Overlay::new(OverlayKind::Support, window, SUPPORT_COLOR, support),
                    Overlay::new(OverlayKind::Resistance, window, RESISTANCE_COLOR, resistance),
                ]);
            }
            None => debug!(len, "skipping support/resistance, not enough history"),
        }
    }

    debug!(bars = len, overlays = overlays.len(), "composed overlays");
    overlays
}

/// Legend entries in overlay order. The Bollinger upper and lower bands share
/// one entry.
pub fn legend(overlays: &[Overlay]) -> Vec<LegendEntry> {
    overlays
        .iter()
        .filter_map(|o| {
            let label = match o.kind {
                OverlayKind::BollingerUpper => "BB Upper/Lower".to_owned(),
                OverlayKind::BollingerLower => return None,
                _ => o.label.clone(),
            };
            Some(LegendEntry {
                label,
                color: o.color,
                style: o.style,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use itertools::Itertools;

    use super::{compose, legend};
    use crate::model::{Bar, Price, PriceSeries};
    use crate::overlay::{LineStyle, Overlay, OverlayKind, EMA_COLORS, HMA_COLORS, SMA_COLORS};
    use crate::request::{periods, BollingerConfig, IndicatorRequest};

    fn daily(closes: &[Price]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        PriceSeries::from_validated(
            closes
                .iter()
                .enumerate()
                .map(|(ix, &close)| Bar {
                    timestamp: start + Duration::days(ix as i64),
                    open: close - 0.5,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: Some(1_000.0),
                })
                .collect(),
        )
    }

    fn rising(n: usize) -> PriceSeries {
        daily(&(0..n).map(|i| 100.0 + i as f64).collect_vec())
    }

    #[test]
    fn sixty_day_sma_and_bollinger() -> eyre::Result<()> {
        let series = rising(60);
        let request = IndicatorRequest::default()
            .with_sma(periods(&[5, 20])?)
            .with_bollinger(BollingerConfig::default());

        let overlays = compose(&series, &request);

        let kinds = overlays.iter().map(|o| o.kind).collect_vec();
        assert_eq!(
            kinds,
            vec![
                OverlayKind::Sma,
                OverlayKind::Sma,
                OverlayKind::BollingerUpper,
                OverlayKind::BollingerMiddle,
                OverlayKind::BollingerLower,
            ]
        );
        assert_eq!(overlays[0].label, "SMA(5)");
        assert_eq!(overlays[1].label, "SMA(20)");
        assert!(overlays.iter().all(|o| o.len() == 60));

        let leading_undefined = |values: &[f64]| values.iter().take_while(|v| v.is_nan()).count();
        assert_eq!(leading_undefined(&overlays[0].values), 4);
        assert_eq!(leading_undefined(&overlays[1].values), 19);
        assert!((overlays[0].values[59] - 157.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn empty_and_single_bar_series_yield_nothing() -> eyre::Result<()> {
        let request = IndicatorRequest::default()
            .with_sma(periods(&[5])?)
            .with_ema(periods(&[5])?)
            .with_bollinger(BollingerConfig::default())
            .with_support_resistance(true);

        assert!(compose(&PriceSeries::default(), &request).is_empty());
        assert!(compose(&daily(&[100.0]), &request).is_empty());
        Ok(())
    }

    #[test]
    fn skips_periods_longer_than_history() -> eyre::Result<()> {
        let series = rising(15);
        let request = IndicatorRequest::default()
            .with_sma(periods(&[5, 20, 10])?)
            .with_ema(periods(&[20, 5])?)
            .with_hma(periods(&[30, 10])?)
            .with_bollinger(BollingerConfig::default())
            .with_support_resistance(true);

        let overlays = compose(&series, &request);
        let labels = overlays.iter().map(|o| o.label.as_str()).collect_vec();

        assert_eq!(labels, vec!["SMA(5)", "SMA(10)", "EMA(5)", "HMA(10)"]);
        // Kept periods hold the palette slot of their selection position.
        assert_eq!(overlays[1].color, SMA_COLORS[2]);
        assert_eq!(overlays[2].color, EMA_COLORS[1]);
        assert_eq!(overlays[3].color, HMA_COLORS[1]);
        assert!(overlays.iter().all(|o| o.len() == 15));
        Ok(())
    }

    #[test]
    fn drops_hma_without_defined_points() -> eyre::Result<()> {
        // HMA(10) needs 12 bars before its first value.
        let request = IndicatorRequest::default().with_hma(periods(&[10])?);

        assert!(compose(&rising(11), &request).is_empty());
        let overlays = compose(&rising(12), &request);
        assert_eq!(overlays.len(), 1);
        assert_eq!(overlays[0].color, HMA_COLORS[0]);
        Ok(())
    }

    #[test]
    fn full_request_order_is_stable() -> eyre::Result<()> {
        let series = daily(&(0..70).map(|i| 50.0 + (i as f64 * 0.3).cos() * 4.0).collect_vec());
        let request = IndicatorRequest::default()
            .with_hma(periods(&[20])?)
            .with_ema(periods(&[10, 5])?)
            .with_sma(periods(&[60])?)
            .with_support_resistance(true)
            .with_bollinger(BollingerConfig::default());

        let overlays = compose(&series, &request);
        let labels = overlays.iter().map(|o| o.label.as_str()).collect_vec();
        assert_eq!(
            labels,
            vec![
                "SMA(60)",
                "EMA(10)",
                "EMA(5)",
                "HMA(20)",
                "BB Upper",
                "BB SMA",
                "BB Lower",
                "Support",
                "Resistance",
            ]
        );
        assert_eq!(overlays[2].color, EMA_COLORS[1]);
        assert_eq!(overlays[7].color, "green");
        assert_eq!(overlays[8].color, "red");

        let again = compose(&series, &request);
        assert_eq!(again.len(), overlays.len());
        for (a, b) in again.iter().zip(&overlays) {
            assert_eq!(a.label, b.label);
            assert_eq!(a.color, b.color);
            let bits = |o: &Overlay| o.values.iter().map(|v| v.to_bits()).collect_vec();
            assert_eq!(bits(a), bits(b));
        }
        Ok(())
    }

    #[test]
    fn support_resistance_are_flat_lines() {
        let series = rising(40);
        let request = IndicatorRequest::default().with_support_resistance(true);

        let overlays = compose(&series, &request);
        assert_eq!(overlays.len(), 2);
        assert!(overlays[0].values.iter().all(|v| *v == 110.0));
        assert!(overlays[1].values.iter().all(|v| *v == 139.0));
    }

    #[test]
    fn input_series_is_untouched() -> eyre::Result<()> {
        let series = rising(30);
        let before = series.clone();
        let request = IndicatorRequest::default()
            .with_sma(periods(&[5])?)
            .with_bollinger(BollingerConfig::default());

        compose(&series, &request);
        assert_eq!(series, before);
        Ok(())
    }

    #[test]
    fn legend_groups_bollinger_outer_bands() -> eyre::Result<()> {
        let request = IndicatorRequest::default()
            .with_sma(periods(&[5])?)
            .with_bollinger(BollingerConfig::default())
            .with_support_resistance(true);

        let entries = legend(&compose(&rising(40), &request));
        let labels = entries.iter().map(|e| e.label.as_str()).collect_vec();

        assert_eq!(labels, vec!["SMA(5)", "BB Upper/Lower", "BB SMA", "Support", "Resistance"]);
        assert_eq!(entries[0].style, LineStyle::Solid);
        assert_eq!(entries[1].color, "purple");
        assert_eq!(entries[2].style, LineStyle::Dashed);
        Ok(())
    }
}
