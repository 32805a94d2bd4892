//! Function-style pricing API.
//!
//! Each function names the exercise convention it prices under, so the contract's own
//! `exercise` field is overridden here. Use the engines directly to have a mismatched
//! contract rejected instead.
//!
//! # Examples
//! ```rust
//! use ferric_vanilla::instruments::VanillaOption;
//! use ferric_vanilla::market::Market;
//! use ferric_vanilla::pricing::{price_american, price_european};
//!
//! let call = VanillaOption::european_call(100.0, 1.0);
//! let market = Market::new(100.0, 0.05, 0.0, 0.2).unwrap();
//!
//! let european = price_european(&call, &market).unwrap();
//! let american = price_american(&call, &market, 200).unwrap();
//! assert!((european - 10.4506).abs() < 1e-4);
//! assert!((american - european).abs() < 0.02);
//! ```

pub mod payoff;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::core::{
    ExerciseStyle, Greeks, PricingEngine, PricingError, PricingResult, PricingRun,
    PricingStyle, RunInputs, RunOutputs,
};
use crate::engines::analytic::BlackScholesEngine;
use crate::engines::numerical::AmericanBinomialEngine;
use crate::instruments::vanilla::VanillaOption;
use crate::market::Market;

pub use payoff::{PayoffPoint, net_payoff, payoff_diagram};

/// Closed-form Black-Scholes-Merton price.
pub fn price_european(option: &VanillaOption, market: &Market) -> Result<f64, PricingError> {
    BlackScholesEngine::new().price(&option.with_exercise(ExerciseStyle::European), market)
}

/// Analytic Greeks: vega and rho per unit, theta per year.
pub fn greeks_european(option: &VanillaOption, market: &Market) -> Result<Greeks, PricingError> {
    BlackScholesEngine::new().greeks(&option.with_exercise(ExerciseStyle::European), market)
}

/// Analytic Greeks rescaled to the market convention of [`greeks_american`].
pub fn greeks_european_scaled(
    option: &VanillaOption,
    market: &Market,
) -> Result<Greeks, PricingError> {
    Ok(greeks_european(option, market)?.to_market_convention())
}

/// CRR lattice price with early exercise at every step.
pub fn price_american(
    option: &VanillaOption,
    market: &Market,
    steps: usize,
) -> Result<f64, PricingError> {
    AmericanBinomialEngine::new(steps).price(&option.with_exercise(ExerciseStyle::American), market)
}

/// Finite-difference lattice Greeks: vega and rho per 1%, theta per calendar day.
pub fn greeks_american(
    option: &VanillaOption,
    market: &Market,
    steps: usize,
) -> Result<Greeks, PricingError> {
    AmericanBinomialEngine::new(steps)
        .greeks(&option.with_exercise(ExerciseStyle::American), market)
}

/// Finite-difference lattice Greeks before rescaling.
pub fn greeks_american_raw(
    option: &VanillaOption,
    market: &Market,
    steps: usize,
) -> Result<Greeks, PricingError> {
    AmericanBinomialEngine::new(steps)
        .raw_greeks(&option.with_exercise(ExerciseStyle::American), market)
}

/// European and American results for the same contract.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleComparison {
    /// Closed-form price with raw analytic Greeks.
    pub european: PricingResult,
    /// Lattice price with market-convention Greeks.
    pub american: PricingResult,
    /// `american.price - european.price`.
    pub early_exercise_premium: f64,
}

/// Prices `option` under both conventions.
pub fn compare_styles(
    option: &VanillaOption,
    market: &Market,
    steps: usize,
) -> Result<StyleComparison, PricingError> {
    let european = BlackScholesEngine::new()
        .evaluate(&option.with_exercise(ExerciseStyle::European), market)?;
    let american = AmericanBinomialEngine::new(steps)
        .evaluate(&option.with_exercise(ExerciseStyle::American), market)?;
    let early_exercise_premium = american.price - european.price;
    debug!(
        european = european.price,
        american = american.price,
        early_exercise_premium,
        "style comparison"
    );

    Ok(StyleComparison {
        european,
        american,
        early_exercise_premium,
    })
}

/// Runs the legs `style` asks for and records inputs and outputs together.
///
/// The American leg uses `config.lattice.steps`.
pub fn run_pricing(
    style: PricingStyle,
    option: &VanillaOption,
    market: &Market,
    config: &EngineConfig,
) -> Result<PricingRun, PricingError> {
    config.validate()?;

    let european = if style.includes_european() {
        Some(
            BlackScholesEngine::new()
                .evaluate(&option.with_exercise(ExerciseStyle::European), market)?,
        )
    } else {
        None
    };
    let american = if style.includes_american() {
        Some(
            AmericanBinomialEngine::new(config.lattice.steps)
                .evaluate(&option.with_exercise(ExerciseStyle::American), market)?,
        )
    } else {
        None
    };

    let premium = match (style, &european, &american) {
        (PricingStyle::American, _, Some(am)) => am.price,
        (_, Some(eu), _) => eu.price,
        _ => {
            return Err(PricingError::NumericalError(format!(
                "{style} run produced no price"
            )));
        }
    };
    debug!(%style, premium, "pricing run complete");

    Ok(PricingRun {
        inputs: RunInputs {
            style,
            option: *option,
            market: *market,
            premium,
        },
        outputs: RunOutputs { european, american },
    })
}
