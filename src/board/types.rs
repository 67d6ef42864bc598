//! Domain types for the board: observations, token records and leaderboard
//! rows shared between the recorder, the leaderboard builder and storage.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

use crate::types::Address;

/// Chain identifier applied when an observation does not carry one.
pub const DEFAULT_CHAIN_ID: &str = "pulsechain";

/// Failures surfaced by the board components.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The submitted address does not look like a token address.
    #[error("invalid address")]
    InvalidAddress,
    /// Any failure from the persistence layer, passed through unchanged.
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// A validated, coerced observation ready to be merged into the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Lowercase `0x...` address
    pub address: Address,
    /// Chain identifier, defaulted when the caller sent none
    pub chain_id: String,
    /// Display symbol, if supplied
    pub symbol: Option<String>,
    /// Display name, if supplied
    pub name: Option<String>,
    /// Hype score clamped to 0..=100
    pub hype: i64,
    /// Safety score clamped to 0..=100
    pub safety: i64,
    /// Millisecond timestamp of this observation
    pub observed_at: i64,
}

/// Durable per-token state, one row per address.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TokenRecord {
    pub address: Address,
    pub chain_id: String,
    pub symbol: Option<String>,
    pub name: Option<String>,
    /// High-water mark of observed hype scores
    pub last_hype: i64,
    /// High-water mark of observed safety scores
    pub last_safety: i64,
    /// Millisecond timestamp of the most recent observation
    pub last_seen: i64,
}

/// One row of the most-searched ranking: an address's windowed hit count
/// joined against its current token metadata. Tokens without a stored
/// record come back with null display fields and zero scores.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct SearchedToken {
    pub address: Address,
    pub hits: i64,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub hype: i64,
    pub safety: i64,
}

/// Ranked entry of the most-searched list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchedEntry {
    pub rank: u32,
    pub address: Address,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub hype: i64,
    pub safety: i64,
    pub hits: i64,
}

/// Ranked entry of the top-hype list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypeEntry {
    pub rank: u32,
    pub address: Address,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub hype: i64,
}

/// Ranked entry of the top-safety list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyEntry {
    pub rank: u32,
    pub address: Address,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub safety: i64,
}

/// The three independently ranked leaderboard lists, each at most ten rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub most_searched: Vec<SearchedEntry>,
    pub top_hype: Vec<HypeEntry>,
    pub top_safety: Vec<SafetyEntry>,
}
