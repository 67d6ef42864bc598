//! Recorder component
//!
//! Folds incoming observations into durable token state and logs every
//! accepted observation as a search event.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;

use crate::board::storage::BoardStorage;
use crate::board::types::BoardError;
use crate::board::validate;
use crate::types::ObservationInput;

/// Recorder validates raw observations and merges them into the store.
#[derive(Clone)]
pub struct Recorder {
    storage: Arc<dyn BoardStorage>,
}

impl Recorder {
    pub fn new(storage: Arc<dyn BoardStorage>) -> Self {
        Self { storage }
    }

    /// Coerces and persists one observation, then appends its search event.
    ///
    /// The token merge and the search append are two independent writes.
    /// A crash between them leaves the token updated with the search
    /// uncounted, which the leaderboard tolerates.
    pub async fn record(&self, input: &ObservationInput) -> Result<(), BoardError> {
        let observed_at = Utc::now().timestamp_millis();
        let observation = validate::normalize(input, observed_at)?;

        debug!(
            "Recording observation for {} (hype: {}, safety: {})",
            observation.address, observation.hype, observation.safety
        );

        self.storage.upsert_token(&observation).await?;
        self.storage
            .insert_search(&observation.address, observation.observed_at)
            .await?;

        Ok(())
    }
}
