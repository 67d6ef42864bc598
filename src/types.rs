//! Core types and data structures for the Hypeboard tracking service.

use serde::Deserialize;
use serde_json::Value;

/// A token address as it travels on the wire (lowercase `0x...` string).
pub type Address = String;

/// Raw `/record` request body, before any validation.
///
/// Every field is optional and may arrive as any JSON type; the recorder
/// coerces each one into its storable shape and only rejects the whole
/// observation when the address is unusable. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ObservationInput {
    /// The token address being observed
    #[serde(default)]
    pub address: Option<Value>,
    /// Chain the token lives on (e.g., "pulsechain")
    #[serde(default, rename = "chainId")]
    pub chain_id: Option<Value>,
    /// Display symbol of the token
    #[serde(default)]
    pub symbol: Option<Value>,
    /// Display name of the token
    #[serde(default)]
    pub name: Option<Value>,
    /// Hype score reported by the caller
    #[serde(default)]
    pub hype: Option<Value>,
    /// Safety score reported by the caller
    #[serde(default)]
    pub safety: Option<Value>,
}
