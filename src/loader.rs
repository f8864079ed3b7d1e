use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use chrono::{NaiveDate, NaiveDateTime};
use itertools::Itertools;
use tracing::debug;

use crate::model::{RawBar, RawSeries};
use crate::timeframe::Timeframe;

/// Supplies raw OHLCV rows for a ticker.
///
/// `Ok(None)` and an empty series both mean the provider has nothing for the
/// ticker; `Err` is a real fetch failure.
pub trait MarketDataSource {
    fn fetch(&self, ticker: &str, timeframe: Timeframe) -> eyre::Result<Option<RawSeries>>;
}

/// Reads `<root>/<TICKER>.csv` files laid out as
/// `Date,Open,High,Low,Close[,Volume]`.
pub struct CsvDirectorySource {
    root: PathBuf,
}

impl CsvDirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl MarketDataSource for CsvDirectorySource {
    fn fetch(&self, ticker: &str, timeframe: Timeframe) -> eyre::Result<Option<RawSeries>> {
        let path = self.root.join(format!("{}.csv", ticker.to_uppercase()));
        if !path.is_file() {
            debug!(ticker, path = %path.display(), "no data file");
            return Ok(None);
        }

        let rows = load_rows(&path)?;
        let Some(newest) = rows.iter().map(|r| r.timestamp).max() else {
            return Ok(Some(rows));
        };

        let since = newest - timeframe.lookback();
        Ok(Some(rows.into_iter().filter(|r| r.timestamp >= since).collect()))
    }
}

fn parse_timestamp(cell: &str) -> eyre::Result<NaiveDateTime> {
    let cell = cell.trim();
    if let Ok(ts) = NaiveDateTime::parse_from_str(cell, "%Y-%m-%d %H:%M:%S") {
        return Ok(ts);
    }
    let date = NaiveDate::parse_from_str(cell, "%Y-%m-%d")?;
    date.and_hms_opt(0, 0, 0)
        .ok_or_else(|| eyre::eyre!("invalid date {cell}"))
}

fn parse_cell(cell: Option<&&str>) -> eyre::Result<Option<f64>> {
    match cell.map(|c| c.trim()) {
        None | Some("") => Ok(None),
        Some(c) => Ok(Some(c.parse()?)),
    }
}

fn load_rows(path: impl AsRef<Path>) -> eyre::Result<RawSeries> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut rows = vec![];

    for line in reader.lines().skip(1) {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let splits = line.split(',').collect_vec();

        rows.push(RawBar {
            timestamp: parse_timestamp(splits[0])?,
            open: parse_cell(splits.get(1))?,
            high: parse_cell(splits.get(2))?,
            low: parse_cell(splits.get(3))?,
            close: parse_cell(splits.get(4))?,
            volume: parse_cell(splits.get(5))?,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        ops::Deref,
        path::{Path, PathBuf},
    };

    use super::{CsvDirectorySource, MarketDataSource};
    use crate::timeframe::Timeframe;

    /// Scratch directory under `temp_dir()`, removed on drop.
    struct FixtureDir(PathBuf);

    impl Deref for FixtureDir {
        type Target = Path;

        fn deref(&self) -> &Path {
            &self.0
        }
    }

    impl Drop for FixtureDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn fixture_dir(name: &str) -> eyre::Result<FixtureDir> {
        let dir = std::env::temp_dir().join(format!("chart-overlay-{name}-{}", std::process::id()));
        fs::create_dir_all(&dir)?;
        Ok(FixtureDir(dir))
    }

    #[test]
    fn fixture_dir_is_removed_on_drop() -> eyre::Result<()> {
        let dir = fixture_dir("cleanup")?;
        fs::write(dir.join("X.csv"), "Date,Open,High,Low,Close\n")?;
        let path = dir.to_path_buf();

        drop(dir);
        assert!(!path.exists());
        Ok(())
    }

    #[test]
    fn reads_rows_with_missing_cells() -> eyre::Result<()> {
        let dir = fixture_dir("missing")?;
        fs::write(
            dir.join("AAPL.csv"),
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-02,10,11,9,10.5,100\n\
             2024-01-03,,11,9,10.7,\n\
             2024-01-04 15:30:00,10.7,11.2,10.1,11.0\n",
        )?;

        let rows = CsvDirectorySource::new(dir.to_path_buf())
            .fetch("aapl", Timeframe::OneYearDaily)?
            .unwrap();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].close, Some(10.5));
        assert_eq!(rows[0].volume, Some(100.0));
        assert_eq!(rows[1].open, None);
        assert_eq!(rows[1].volume, None);
        assert_eq!(rows[2].timestamp.to_string(), "2024-01-04 15:30:00");
        Ok(())
    }

    #[test]
    fn trims_to_lookback() -> eyre::Result<()> {
        let dir = fixture_dir("lookback")?;
        fs::write(
            dir.join("SPY.csv"),
            "Date,Open,High,Low,Close,Volume\n\
             2023-01-02,1,1,1,1,1\n\
             2024-06-01,2,2,2,2,2\n\
             2024-06-10,3,3,3,3,3\n",
        )?;

        let rows = CsvDirectorySource::new(dir.to_path_buf())
            .fetch("SPY", Timeframe::OneMonthHourly)?
            .unwrap();
        assert_eq!(rows.len(), 2);
        Ok(())
    }

    #[test]
    fn missing_file_is_no_data() -> eyre::Result<()> {
        let dir = fixture_dir("nofile")?;
        assert!(CsvDirectorySource::new(dir.to_path_buf())
            .fetch("NOPE", Timeframe::OneYearDaily)?
            .is_none());
        Ok(())
    }

    #[test]
    fn malformed_number_is_an_error() -> eyre::Result<()> {
        let dir = fixture_dir("malformed")?;
        fs::write(dir.join("BAD.csv"), "Date,Open,High,Low,Close\n2024-01-02,x,1,1,1\n")?;

        assert!(CsvDirectorySource::new(dir.to_path_buf())
            .fetch("BAD", Timeframe::OneYearDaily)
            .is_err());
        Ok(())
    }
}
