//! Leaderboard builder component
//!
//! Assembles the three ranked lists (most searched, top hype, top safety)
//! from the durable state, windowing search events by a trailing day count.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::board::storage::BoardStorage;
use crate::board::types::{BoardError, HypeEntry, Leaderboard, SafetyEntry, SearchedEntry};

/// Number of entries each leaderboard list is truncated to.
pub const LIST_LIMIT: u32 = 10;
/// Window applied when the caller supplies no usable day count.
pub const DEFAULT_WINDOW_DAYS: f64 = 30.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// LeaderboardBuilder runs the windowed aggregation queries and annotates
/// each list with 1-based ranks.
#[derive(Clone)]
pub struct LeaderboardBuilder {
    storage: Arc<dyn BoardStorage>,
}

impl LeaderboardBuilder {
    pub fn new(storage: Arc<dyn BoardStorage>) -> Self {
        Self { storage }
    }

    /// Builds the full leaderboard over a trailing window of `window_days`.
    /// Missing or non-finite day counts fall back to the default window.
    pub async fn build(&self, window_days: Option<f64>) -> Result<Leaderboard, BoardError> {
        let days = window_days
            .filter(|d| d.is_finite())
            .unwrap_or(DEFAULT_WINDOW_DAYS);
        let now = Utc::now().timestamp_millis();
        let since = now.saturating_sub((days * MILLIS_PER_DAY) as i64);

        debug!("Building leaderboard over {} day window (since {})", days, since);

        let most_searched = self.storage.most_searched_since(since, LIST_LIMIT).await?;
        let top_hype = self.storage.top_by_hype(LIST_LIMIT).await?;
        let top_safety = self.storage.top_by_safety(LIST_LIMIT).await?;

        Ok(Leaderboard {
            most_searched: most_searched
                .into_iter()
                .enumerate()
                .map(|(i, row)| SearchedEntry {
                    rank: i as u32 + 1,
                    address: row.address,
                    symbol: row.symbol,
                    name: row.name,
                    hype: row.hype,
                    safety: row.safety,
                    hits: row.hits,
                })
                .collect(),
            top_hype: top_hype
                .into_iter()
                .enumerate()
                .map(|(i, token)| HypeEntry {
                    rank: i as u32 + 1,
                    address: token.address,
                    symbol: token.symbol,
                    name: token.name,
                    hype: token.last_hype,
                })
                .collect(),
            top_safety: top_safety
                .into_iter()
                .enumerate()
                .map(|(i, token)| SafetyEntry {
                    rank: i as u32 + 1,
                    address: token.address,
                    symbol: token.symbol,
                    name: token.name,
                    safety: token.last_safety,
                })
                .collect(),
        })
    }
}
