//! Hypeboard - token search tracking and leaderboard service
//!
//! This crate records loosely typed token observations into a durable
//! SQLite store and serves ranked leaderboard views (most searched, top
//! hype, top safety) over a small HTTP API.

pub mod board;
pub mod config;
pub mod types;
pub mod web;

// Re-export main types for convenience
pub use types::{Address, ObservationInput};
