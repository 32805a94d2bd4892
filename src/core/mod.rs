//! Core traits, common domain types, and library-wide result/error structures.

use serde::{Deserialize, Serialize};

use crate::market::Market;

pub mod serialization;
pub mod types;

pub use serialization::*;
pub use types::*;

/// Vega is quoted per one volatility point (1%).
pub const VEGA_SCALE: f64 = 0.01;
/// Rho is quoted per one rate point (1%).
pub const RHO_SCALE: f64 = 0.01;
/// Theta is quoted per calendar day.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Units in which a [`Greeks`] value is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GreeksConvention {
    /// Raw partial derivatives: vega per unit vol, rho per unit rate, theta per year.
    Raw,
    /// Desk convention: vega and rho per 1% move, theta per calendar day.
    Market,
}

/// Standardized Greeks container used by engine results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// First derivative to spot.
    pub delta: f64,
    /// Second derivative to spot.
    pub gamma: f64,
    /// First derivative to volatility.
    pub vega: f64,
    /// Sensitivity to maturity. Closed-form engines report time decay `-dV/dT`; the lattice
    /// estimator reports `dV/dT`.
    pub theta: f64,
    /// First derivative to rate.
    pub rho: f64,
}

impl Greeks {
    /// Rescales raw derivatives to the market convention.
    ///
    /// Delta and gamma are untouched; vega and rho are multiplied by 0.01 and theta
    /// is divided by 365.
    pub fn to_market_convention(self) -> Self {
        Self {
            delta: self.delta,
            gamma: self.gamma,
            vega: self.vega * VEGA_SCALE,
            theta: self.theta / DAYS_PER_YEAR,
            rho: self.rho * RHO_SCALE,
        }
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.delta.is_finite()
            && self.gamma.is_finite()
            && self.vega.is_finite()
            && self.theta.is_finite()
            && self.rho.is_finite()
    }
}

/// Unified engine result payload: premium plus the five sensitivities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Present value in units of the underlying's currency.
    pub price: f64,
    /// Sensitivities of `price`.
    pub greeks: Greeks,
    /// Units of `greeks`.
    pub convention: GreeksConvention,
}

/// Market or contract field named by a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    Spot,
    Strike,
    Expiry,
    Volatility,
    Rate,
    DividendYield,
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Spot => "spot",
            Self::Strike => "strike",
            Self::Expiry => "expiry",
            Self::Volatility => "volatility",
            Self::Rate => "rate",
            Self::DividendYield => "dividend yield",
        };
        f.write_str(name)
    }
}

/// Engine and model errors surfaced by the API.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    /// A parameter lies outside the model's domain.
    #[error("domain error: {parameter} = {value} is outside the model domain")]
    Domain { parameter: Parameter, value: f64 },

    /// Lattice risk-neutral probability is not a probability.
    #[error(
        "inconsistent lattice parameters: risk-neutral probability {probability} is outside [0, 1] with {steps} steps"
    )]
    InconsistentLattice { probability: f64, steps: usize },

    /// An optional routine the operation relies on is not installed.
    #[error("capability missing: {0}")]
    CapabilityMissing(&'static str),

    /// Contract exercise style does not match the engine.
    #[error("{engine} cannot price {found} exercise")]
    ExerciseMismatch {
        engine: &'static str,
        found: ExerciseStyle,
    },

    /// Input validation error not tied to a market or contract field.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Numerical issue (overflow, invalid state, etc.).
    #[error("numerical error: {0}")]
    NumericalError(String),

    /// Configuration could not be read or is inconsistent.
    #[error("config error: {0}")]
    Config(String),

    /// Report payload could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Rejects values that are not finite and strictly positive.
#[inline]
pub(crate) fn require_positive(parameter: Parameter, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::Domain { parameter, value })
    }
}

/// Common trait implemented by every priceable instrument.
pub trait Instrument: std::fmt::Debug {
    /// Returns a short type identifier for diagnostics.
    fn instrument_type(&self) -> &str;
}

/// Pricing engine abstraction over an instrument type.
///
/// Price and sensitivities are separate capabilities so a caller can request either
/// on its own.
pub trait PricingEngine<I: Instrument> {
    /// Prices an instrument under the provided market state.
    fn price(&self, instrument: &I, market: &Market) -> Result<f64, PricingError>;

    /// Sensitivities in the engine's native [`GreeksConvention`].
    fn greeks(&self, instrument: &I, market: &Market) -> Result<Greeks, PricingError>;

    /// Units returned by [`PricingEngine::greeks`].
    fn convention(&self) -> GreeksConvention;

    /// Price and sensitivities together.
    fn evaluate(&self, instrument: &I, market: &Market) -> Result<PricingResult, PricingError> {
        Ok(PricingResult {
            price: self.price(instrument, market)?,
            greeks: self.greeks(instrument, market)?,
            convention: self.convention(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_convention_rescales_vega_rho_and_theta_only() {
        let raw = Greeks {
            delta: 0.6,
            gamma: 0.02,
            vega: 37.5,
            theta: -6.5,
            rho: 53.0,
        };
        let scaled = raw.to_market_convention();

        assert_eq!(scaled.delta, raw.delta);
        assert_eq!(scaled.gamma, raw.gamma);
        assert!((scaled.vega - 0.375).abs() < 1e-12);
        assert!((scaled.rho - 0.53).abs() < 1e-12);
        assert!((scaled.theta - -6.5 / 365.0).abs() < 1e-15);
    }

    #[test]
    fn domain_error_names_offending_parameter() {
        let err = require_positive(Parameter::Volatility, 0.0).unwrap_err();
        assert_eq!(
            err,
            PricingError::Domain {
                parameter: Parameter::Volatility,
                value: 0.0
            }
        );
        assert!(err.to_string().contains("volatility"));
        assert!(require_positive(Parameter::Spot, f64::NAN).is_err());
        assert!(require_positive(Parameter::Spot, f64::INFINITY).is_err());
        assert!(require_positive(Parameter::Spot, 1e-300).is_ok());
    }
}
