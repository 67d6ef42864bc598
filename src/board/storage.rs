//! Storage abstraction layer for the board
//!
//! This module defines the formal contract for data persistence operations,
//! allowing for clean separation between business logic and storage implementation.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::board::types::{Observation, SearchedToken, TokenRecord};

/// Formal contract for the durable token and search-event state.
/// Defines operations that must be supported by any database engine.
#[async_trait]
pub trait BoardStorage: Send + Sync {
    /// Merges one observation into the token table as a single atomic
    /// write: insert when the address is new, otherwise keep the higher
    /// score per score column, keep existing display fields unless the
    /// observation carries replacements, and overwrite chain and
    /// last-seen unconditionally.
    async fn upsert_token(&self, observation: &Observation) -> Result<()>;

    /// Appends one immutable search event for an address.
    async fn insert_search(&self, address: &str, ts: i64) -> Result<()>;

    /// Retrieves the current record for an address, if any.
    async fn token(&self, address: &str) -> Result<Option<TokenRecord>>;

    /// Retrieves the addresses with the most search events at or after
    /// `since`, joined against current token metadata, ordered by hit
    /// count (descending).
    async fn most_searched_since(&self, since: i64, limit: u32) -> Result<Vec<SearchedToken>>;

    /// Retrieves token records ordered by hype score, then recency.
    async fn top_by_hype(&self, limit: u32) -> Result<Vec<TokenRecord>>;

    /// Retrieves token records ordered by safety score, then recency.
    async fn top_by_safety(&self, limit: u32) -> Result<Vec<TokenRecord>>;

    /// Counts the search events for an address at or after `since`.
    async fn search_count_since(&self, address: &str, since: i64) -> Result<i64>;

    /// Health check for the storage backend.
    async fn health_check(&self) -> Result<bool>;
}

/// SQLite implementation of the BoardStorage trait.
/// Holds both tables in one database file so a single service process
/// owns the full state.
pub struct SqliteBoard {
    pool: Pool<Sqlite>,
}

impl SqliteBoard {
    /// Opens (or creates) the database at `database_url` and prepares the
    /// schema. Accepts any sqlx SQLite URL, e.g. `sqlite:hypeboard.db?mode=rwc`
    /// or `sqlite::memory:`.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("Invalid SQLite URL: {}", database_url))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5));

        // A single connection serializes writers ahead of SQLite's own
        // locking and keeps in-memory databases shared across calls.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .context("Failed to connect to SQLite database")?;

        Self::create_schema(&pool).await?;

        info!("SqliteBoard initialized and connected to {}", database_url);

        Ok(Self { pool })
    }

    async fn create_schema(pool: &Pool<Sqlite>) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS tokens (
                address TEXT PRIMARY KEY,
                chain_id TEXT NOT NULL,
                symbol TEXT,
                name TEXT,
                last_hype INTEGER NOT NULL DEFAULT 0,
                last_safety INTEGER NOT NULL DEFAULT 0,
                last_seen INTEGER NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await
        .context("Failed to create tokens table")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS searches (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                address TEXT NOT NULL,
                ts INTEGER NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await
        .context("Failed to create searches table")?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_searches_ts ON searches (ts);")
            .execute(pool)
            .await
            .context("Failed to create searches timestamp index")?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_searches_address_ts ON searches (address, ts);")
            .execute(pool)
            .await
            .context("Failed to create searches address index")?;

        Ok(())
    }
}

#[async_trait]
impl BoardStorage for SqliteBoard {
    async fn upsert_token(&self, observation: &Observation) -> Result<()> {
        debug!("Upserting token record for address: {}", observation.address);

        sqlx::query(
            r#"
            INSERT INTO tokens (address, chain_id, symbol, name, last_hype, last_safety, last_seen)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(address) DO UPDATE SET
                chain_id    = excluded.chain_id,
                symbol      = COALESCE(excluded.symbol, tokens.symbol),
                name        = COALESCE(excluded.name, tokens.name),
                last_hype   = MAX(tokens.last_hype, excluded.last_hype),
                last_safety = MAX(tokens.last_safety, excluded.last_safety),
                last_seen   = excluded.last_seen;
            "#,
        )
        .bind(&observation.address)
        .bind(&observation.chain_id)
        .bind(observation.symbol.as_deref())
        .bind(observation.name.as_deref())
        .bind(observation.hype)
        .bind(observation.safety)
        .bind(observation.observed_at)
        .execute(&self.pool)
        .await
        .context("Failed to upsert token record")?;

        Ok(())
    }

    async fn insert_search(&self, address: &str, ts: i64) -> Result<()> {
        debug!("Appending search event for address: {}", address);

        sqlx::query("INSERT INTO searches (address, ts) VALUES (?, ?);")
            .bind(address)
            .bind(ts)
            .execute(&self.pool)
            .await
            .context("Failed to append search event")?;

        Ok(())
    }

    async fn token(&self, address: &str) -> Result<Option<TokenRecord>> {
        let row: Option<TokenRecord> = sqlx::query_as(
            r#"
            SELECT address, chain_id, symbol, name, last_hype, last_safety, last_seen
            FROM tokens
            WHERE address = ?;
            "#,
        )
        .bind(address)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch token record")?;

        Ok(row)
    }

    async fn most_searched_since(&self, since: i64, limit: u32) -> Result<Vec<SearchedToken>> {
        let rows: Vec<SearchedToken> = sqlx::query_as(
            r#"
            SELECT s.address,
                   COUNT(*) AS hits,
                   t.symbol,
                   t.name,
                   COALESCE(t.last_hype, 0) AS hype,
                   COALESCE(t.last_safety, 0) AS safety
            FROM searches s
            LEFT JOIN tokens t ON t.address = s.address
            WHERE s.ts >= ?
            GROUP BY s.address
            ORDER BY hits DESC
            LIMIT ?;
            "#,
        )
        .bind(since)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch most searched addresses")?;

        Ok(rows)
    }

    async fn top_by_hype(&self, limit: u32) -> Result<Vec<TokenRecord>> {
        let rows: Vec<TokenRecord> = sqlx::query_as(
            r#"
            SELECT address, chain_id, symbol, name, last_hype, last_safety, last_seen
            FROM tokens
            ORDER BY last_hype DESC, last_seen DESC
            LIMIT ?;
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch top tokens by hype")?;

        Ok(rows)
    }

    async fn top_by_safety(&self, limit: u32) -> Result<Vec<TokenRecord>> {
        let rows: Vec<TokenRecord> = sqlx::query_as(
            r#"
            SELECT address, chain_id, symbol, name, last_hype, last_safety, last_seen
            FROM tokens
            ORDER BY last_safety DESC, last_seen DESC
            LIMIT ?;
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch top tokens by safety")?;

        Ok(rows)
    }

    async fn search_count_since(&self, address: &str, since: i64) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM searches WHERE address = ? AND ts >= ?;")
                .bind(address)
                .bind(since)
                .fetch_one(&self.pool)
                .await
                .context("Failed to count search events")?;

        Ok(count.0)
    }

    async fn health_check(&self) -> Result<bool> {
        match sqlx::query("SELECT 1").execute(&self.pool).await {
            Ok(_) => Ok(true),
            Err(_) => Ok(false),
        }
    }
}
