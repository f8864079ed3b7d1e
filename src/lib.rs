pub mod analysis;
pub mod bands;
pub mod chart;
pub mod compositor;
pub mod config;
pub mod error;
pub mod loader;
pub mod model;
pub mod moving_average;
pub mod overlay;
pub mod request;
pub mod timeframe;
pub mod validator;
pub mod watchlist;

pub use chart::{chart_tickers, ChartOutcome, TickerChart};
pub use compositor::{compose, legend};
pub use config::ChartConfig;
pub use model::{Bar, PriceSeries, RawBar, RawSeries};
pub use overlay::{Overlay, OverlayKind};
pub use request::IndicatorRequest;
pub use validator::validate;
pub use watchlist::{WatchlistRepository, WatchlistStore};
