//! Pricing-run payloads for reporting collaborators.
//!
//! A [`PricingRun`] captures the inputs of one run and whichever results the requested
//! [`PricingStyle`] produced. Nothing here touches the filesystem; callers decide where the
//! encoded bytes go.
//!
//! # Examples
//! ```rust
//! use ferric_vanilla::config::EngineConfig;
//! use ferric_vanilla::core::{from_json, to_json_pretty, PricingRun, PricingStyle};
//! use ferric_vanilla::instruments::VanillaOption;
//! use ferric_vanilla::market::Market;
//! use ferric_vanilla::pricing::run_pricing;
//!
//! let option = VanillaOption::american_put(100.0, 1.0);
//! let market = Market::new(100.0, 0.05, 0.0, 0.2).unwrap();
//! let run = run_pricing(PricingStyle::Comparison, &option, &market, &EngineConfig::default())
//!     .expect("valid inputs");
//!
//! let json = to_json_pretty(&run).expect("json serialization");
//! let decoded: PricingRun = from_json(&json).expect("json deserialization");
//! assert_eq!(decoded, run);
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::{PricingError, PricingResult, PricingStyle};
use crate::instruments::vanilla::VanillaOption;
use crate::market::Market;

/// Inputs of a pricing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunInputs {
    pub style: PricingStyle,
    pub option: VanillaOption,
    pub market: Market,
    /// Premium used for payoff diagrams: the American price for the American style and the
    /// European price otherwise.
    pub premium: f64,
}

/// Results of a pricing run; a leg is `None` when the style did not request it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutputs {
    /// Closed-form price with raw analytic Greeks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub european: Option<PricingResult>,
    /// Lattice price with market-convention finite-difference Greeks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub american: Option<PricingResult>,
}

impl RunOutputs {
    /// `american - european` when both legs are present.
    pub fn early_exercise_premium(&self) -> Option<f64> {
        match (&self.european, &self.american) {
            (Some(eu), Some(am)) => Some(am.price - eu.price),
            _ => None,
        }
    }
}

/// One complete pricing run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingRun {
    pub inputs: RunInputs,
    pub outputs: RunOutputs,
}

/// Serialize a value to pretty JSON.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, PricingError> {
    serde_json::to_string_pretty(value).map_err(|e| PricingError::Serialization(e.to_string()))
}

/// Deserialize a value from JSON.
pub fn from_json<T: DeserializeOwned>(payload: &str) -> Result<T, PricingError> {
    serde_json::from_str(payload).map_err(|e| PricingError::Serialization(e.to_string()))
}

/// Serialize a value to MessagePack bytes.
pub fn to_msgpack<T: Serialize>(value: &T) -> Result<Vec<u8>, PricingError> {
    rmp_serde::to_vec_named(value).map_err(|e| PricingError::Serialization(e.to_string()))
}

/// Deserialize a value from MessagePack bytes.
pub fn from_msgpack<T: DeserializeOwned>(payload: &[u8]) -> Result<T, PricingError> {
    rmp_serde::from_slice(payload).map_err(|e| PricingError::Serialization(e.to_string()))
}
