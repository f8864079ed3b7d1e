use derive_more::{Display, Error};

#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum WatchlistError {
    #[display(fmt = "watchlist name and tickers must not be empty")]
    EmptyInput,
    #[display(fmt = "watchlist '{}' already exists", name)]
    DuplicateName { name: String },
    #[display(fmt = "watchlist '{}' not found", name)]
    NotFound { name: String },
}

#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum RequestError {
    #[display(fmt = "period {} is not one of the allowed periods", period)]
    UnsupportedPeriod { period: usize },
    #[display(fmt = "bollinger window {} is not supported", window)]
    UnsupportedWindow { window: usize },
    #[display(fmt = "stddev multiplier {} is outside [1.0, 3.0]", value)]
    MultiplierOutOfRange { value: f64 },
}
