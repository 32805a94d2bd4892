//! Module `pricing::payoff`.
//!
//! Position-adjusted payoff at expiry, independent of any pricing model.
//!
//! Primary API surface: [`net_payoff`] for a single terminal spot and [`payoff_diagram`] for a
//! grid of terminal spots around the strike.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::core::{OptionType, Position, PricingError};
use crate::instruments::vanilla::VanillaOption;
use crate::math::linspace;

/// Net payoff at expiry for one contract.
///
/// Long positions receive the intrinsic value and have paid `premium`; short positions owe
/// the intrinsic value and have received it. Total over all finite inputs.
///
/// # Examples
/// ```rust
/// use ferric_vanilla::core::{OptionType, Position};
/// use ferric_vanilla::pricing::payoff::net_payoff;
///
/// assert_eq!(net_payoff(OptionType::Call, Position::Long, 120.0, 100.0, 5.0), 15.0);
/// assert_eq!(net_payoff(OptionType::Put, Position::Short, 120.0, 100.0, 5.0), 5.0);
/// ```
#[inline]
pub fn net_payoff(
    option_type: OptionType,
    position: Position,
    terminal_spot: f64,
    strike: f64,
    premium: f64,
) -> f64 {
    let intrinsic = option_type.intrinsic(terminal_spot, strike);
    match position {
        Position::Long => intrinsic - premium,
        Position::Short => premium - intrinsic,
    }
}

/// One sample of a payoff diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoffPoint {
    pub terminal_spot: f64,
    pub net_payoff: f64,
}

/// Net payoff of `option` on `linspace(lower * K, upper * K, points)` from `config.payoff`.
pub fn payoff_diagram(
    option: &VanillaOption,
    premium: f64,
    config: &EngineConfig,
) -> Result<Vec<PayoffPoint>, PricingError> {
    option.validate()?;
    config.validate()?;
    if !premium.is_finite() {
        return Err(PricingError::InvalidInput(format!(
            "premium must be finite, got {premium}"
        )));
    }

    let grid = linspace(
        config.payoff.lower * option.strike,
        config.payoff.upper * option.strike,
        config.payoff.points,
    );
    Ok(grid
        .into_iter()
        .map(|terminal_spot| PayoffPoint {
            terminal_spot,
            net_payoff: net_payoff(
                option.option_type,
                option.position,
                terminal_spot,
                option.strike,
                premium,
            ),
        })
        .collect())
}
