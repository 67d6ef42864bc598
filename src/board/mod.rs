//! Board module - recorder and leaderboard components
//!
//! This module contains the write path (Recorder) that folds raw
//! observations into durable token state, the read path
//! (LeaderboardBuilder) that assembles ranked views over it, and the
//! storage contract both sit on.

pub mod leaderboard;
pub mod recorder;
pub mod storage;
pub mod types;
pub mod validate;

// Re-export main types
pub use types::{
    BoardError, HypeEntry, Leaderboard, Observation,
    SafetyEntry, SearchedEntry, SearchedToken, TokenRecord,
    DEFAULT_CHAIN_ID,
};

// Re-export key components
pub use leaderboard::{LeaderboardBuilder, DEFAULT_WINDOW_DAYS, LIST_LIMIT};
pub use recorder::Recorder;
pub use storage::{BoardStorage, SqliteBoard};
