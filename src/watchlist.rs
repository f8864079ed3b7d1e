use itertools::Itertools;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::WatchlistError;

/// Trims, uppercases and deduplicates ticker symbols, dropping blanks.
pub fn normalize_tickers<I, S>(tickers: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    tickers
        .into_iter()
        .map(|t| t.as_ref().trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .unique()
        .collect()
}

/// Splits a comma separated list such as `"aapl, msft,,"`.
pub fn parse_tickers(raw: &str) -> Vec<String> {
    normalize_tickers(raw.split(','))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Watchlist {
    pub name: String,
    pub tickers: Vec<String>,
}

/// Operations a watchlist backend has to support, whether it lives in memory
/// for one session or in a durable store.
pub trait WatchlistRepository {
    fn create(&mut self, name: &str, tickers: &[&str]) -> Result<(), WatchlistError>;
    fn add_ticker(&mut self, name: &str, ticker: &str) -> Result<(), WatchlistError>;
    fn remove_ticker(&mut self, name: &str, ticker: &str) -> Result<(), WatchlistError>;
    fn delete(&mut self, name: &str) -> Result<(), WatchlistError>;
    fn list(&self) -> Vec<Watchlist>;
}

/// Session-lifetime watchlists, listed in creation order.
#[derive(Default, Debug, Clone)]
pub struct WatchlistStore {
    lists: Vec<Watchlist>,
}

impl WatchlistStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Watchlist> {
        let name = name.trim();
        self.lists.iter().find(|w| w.name == name)
    }

    fn get_mut(&mut self, name: &str) -> Result<&mut Watchlist, WatchlistError> {
        let name = name.trim();
        self.lists
            .iter_mut()
            .find(|w| w.name == name)
            .ok_or_else(|| WatchlistError::NotFound {
                name: name.to_owned(),
            })
    }
}

impl WatchlistRepository for WatchlistStore {
    fn create(&mut self, name: &str, tickers: &[&str]) -> Result<(), WatchlistError> {
        let name = name.trim();
        let tickers = normalize_tickers(tickers);
        if name.is_empty() || tickers.is_empty() {
            return Err(WatchlistError::EmptyInput);
        }
        if self.get(name).is_some() {
            return Err(WatchlistError::DuplicateName {
                name: name.to_owned(),
            });
        }

        info!(name, tickers = tickers.len(), "created watchlist");
        self.lists.push(Watchlist {
            name: name.to_owned(),
            tickers,
        });
        Ok(())
    }

    fn add_ticker(&mut self, name: &str, ticker: &str) -> Result<(), WatchlistError> {
        let ticker = ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(WatchlistError::EmptyInput);
        }

        let list = self.get_mut(name)?;
        if !list.tickers.contains(&ticker) {
            list.tickers.push(ticker);
        }
        Ok(())
    }

    fn remove_ticker(&mut self, name: &str, ticker: &str) -> Result<(), WatchlistError> {
        let ticker = ticker.trim().to_uppercase();
        let list = self.get_mut(name)?;
        list.tickers.retain(|t| *t != ticker);
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<(), WatchlistError> {
        let name = name.trim();
        let (ix, _) = self
            .lists
            .iter()
            .find_position(|w| w.name == name)
            .ok_or_else(|| WatchlistError::NotFound {
                name: name.to_owned(),
            })?;

        self.lists.remove(ix);
        info!(name, "deleted watchlist");
        Ok(())
    }

    fn list(&self) -> Vec<Watchlist> {
        self.lists.clone()
    }
}

/// A store shared between request contexts: one mutation at a time, reads
/// in parallel.
#[derive(Default, Debug)]
pub struct SharedWatchlistStore {
    inner: RwLock<WatchlistStore>,
}

impl SharedWatchlistStore {
    pub fn new(store: WatchlistStore) -> Self {
        Self {
            inner: RwLock::new(store),
        }
    }

    pub fn create(&self, name: &str, tickers: &[&str]) -> Result<(), WatchlistError> {
        self.inner.write().create(name, tickers)
    }

    pub fn add_ticker(&self, name: &str, ticker: &str) -> Result<(), WatchlistError> {
        self.inner.write().add_ticker(name, ticker)
    }

    pub fn remove_ticker(&self, name: &str, ticker: &str) -> Result<(), WatchlistError> {
        self.inner.write().remove_ticker(name, ticker)
    }

    pub fn delete(&self, name: &str) -> Result<(), WatchlistError> {
        self.inner.write().delete(name)
    }

    pub fn list(&self) -> Vec<Watchlist> {
        self.inner.read().list()
    }

    pub fn tickers(&self, name: &str) -> Option<Vec<String>> {
        self.inner.read().get(name).map(|w| w.tickers.clone())
    }
}
