use chrono::Duration;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Chart range and bar interval presets, as offered to the user.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Timeframe {
    #[default]
    #[display(fmt = "5Y / Monthly")]
    FiveYearsMonthly,
    #[display(fmt = "2Y / Weekly")]
    TwoYearsWeekly,
    #[display(fmt = "1Y / Daily")]
    OneYearDaily,
    #[display(fmt = "3M / Daily")]
    ThreeMonthsDaily,
    #[display(fmt = "6M / 4H")]
    SixMonthsFourHour,
    #[display(fmt = "1M / 4H")]
    OneMonthFourHour,
    #[display(fmt = "1M / 1H")]
    OneMonthHourly,
    #[display(fmt = "5D / 30m")]
    FiveDaysThirtyMinute,
    #[display(fmt = "1D / 15m")]
    OneDayFifteenMinute,
    #[display(fmt = "1D / 5m")]
    OneDayFiveMinute,
}

impl Timeframe {
    pub const ALL: [Timeframe; 10] = [
        Timeframe::FiveYearsMonthly,
        Timeframe::TwoYearsWeekly,
        Timeframe::OneYearDaily,
        Timeframe::ThreeMonthsDaily,
        Timeframe::SixMonthsFourHour,
        Timeframe::OneMonthFourHour,
        Timeframe::OneMonthHourly,
        Timeframe::FiveDaysThirtyMinute,
        Timeframe::OneDayFifteenMinute,
        Timeframe::OneDayFiveMinute,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.to_string() == label)
    }

    /// Provider range code, e.g. `"3mo"`.
    pub fn period(self) -> &'static str {
        match self {
            Timeframe::FiveYearsMonthly => "5y",
            Timeframe::TwoYearsWeekly => "2y",
            Timeframe::OneYearDaily => "1y",
            Timeframe::ThreeMonthsDaily => "3mo",
            Timeframe::SixMonthsFourHour => "6mo",
            Timeframe::OneMonthFourHour | Timeframe::OneMonthHourly => "1mo",
            Timeframe::FiveDaysThirtyMinute => "5d",
            Timeframe::OneDayFifteenMinute | Timeframe::OneDayFiveMinute => "1d",
        }
    }

    /// Provider bar interval code, e.g. `"1d"`.
    pub fn interval(self) -> &'static str {
        match self {
            Timeframe::FiveYearsMonthly => "1mo",
            Timeframe::TwoYearsWeekly => "1wk",
            Timeframe::OneYearDaily | Timeframe::ThreeMonthsDaily => "1d",
            Timeframe::SixMonthsFourHour | Timeframe::OneMonthFourHour => "4h",
            Timeframe::OneMonthHourly => "1h",
            Timeframe::FiveDaysThirtyMinute => "30m",
            Timeframe::OneDayFifteenMinute => "15m",
            Timeframe::OneDayFiveMinute => "5m",
        }
    }

    /// Approximate calendar span covered by [`Timeframe::period`].
    pub fn lookback(self) -> Duration {
        match self {
            Timeframe::FiveYearsMonthly => Duration::days(5 * 365),
            Timeframe::TwoYearsWeekly => Duration::days(2 * 365),
            Timeframe::OneYearDaily => Duration::days(365),
            Timeframe::SixMonthsFourHour => Duration::days(182),
            Timeframe::ThreeMonthsDaily => Duration::days(91),
            Timeframe::OneMonthFourHour | Timeframe::OneMonthHourly => Duration::days(30),
            Timeframe::FiveDaysThirtyMinute => Duration::days(5),
            Timeframe::OneDayFifteenMinute | Timeframe::OneDayFiveMinute => Duration::days(1),
        }
    }
}
