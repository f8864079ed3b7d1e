use std::env;

use chart_overlay::{
    chart_tickers, loader::CsvDirectorySource, watchlist::normalize_tickers, ChartConfig,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = env::args().skip(1).collect::<Vec<_>>();
    let [data_dir, config_path, tickers @ ..] = args.as_slice() else {
        eyre::bail!("usage: chart-overlay <data-dir> <config.json> <TICKER>...");
    };

    let config = ChartConfig::load(config_path)?;
    let tickers = normalize_tickers(tickers);
    if tickers.is_empty() {
        eyre::bail!("no tickers given");
    }

    info!(timeframe = %config.timeframe, tickers = ?tickers, "charting");
    let source = CsvDirectorySource::new(data_dir);
    let charts = chart_tickers(&source, &tickers, config.timeframe, &config.request);

    println!("{}", serde_json::to_string_pretty(&charts)?);
    Ok(())
}
