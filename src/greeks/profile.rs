//! Sensitivity profiles across a grid of spot values, the input to Greek charts.
//!
//! Closed-form Greeks are reported raw; lattice Greeks use the market convention and
//! [`crate::config::LatticeSettings::profile_steps`] steps per point.
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::core::{ExerciseStyle, Greeks, PricingEngine, PricingError, PricingStyle};
use crate::engines::analytic::BlackScholesEngine;
use crate::engines::numerical::AmericanBinomialEngine;
use crate::instruments::vanilla::VanillaOption;
use crate::market::Market;
use crate::math::linspace;

/// Greeks at one spot value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GreekPoint {
    pub spot: f64,
    /// Raw closed-form Greeks, when the style includes European pricing.
    pub european: Option<Greeks>,
    /// Market-convention lattice Greeks, when the style includes American pricing.
    pub american: Option<Greeks>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreekProfile {
    pub style: PricingStyle,
    pub points: Vec<GreekPoint>,
}

impl GreekProfile {
    /// Spot axis of the profile.
    pub fn spots(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.spot).collect()
    }
}

/// Greeks on `linspace(lower * S, upper * S, n)`.
///
/// `n` is `profile.american_points` whenever lattice Greeks are requested and
/// `profile.european_points` otherwise. Any failing point fails the whole profile.
pub fn greek_profile(
    option: &VanillaOption,
    market: &Market,
    style: PricingStyle,
    config: &EngineConfig,
) -> Result<GreekProfile, PricingError> {
    option.validate()?;
    market.validate()?;
    config.validate()?;

    let points = if style.includes_american() {
        config.profile.american_points
    } else {
        config.profile.european_points
    };
    let spots = linspace(
        config.profile.lower * market.spot,
        config.profile.upper * market.spot,
        points,
    );

    let european_option = option.with_exercise(ExerciseStyle::European);
    let american_option = option.with_exercise(ExerciseStyle::American);
    let closed_form = BlackScholesEngine::new();
    let lattice = AmericanBinomialEngine::new(config.lattice.profile_steps);

    let at_spot = |spot: &f64| -> Result<GreekPoint, PricingError> {
        let bumped = market.with_spot(*spot);
        let european = if style.includes_european() {
            Some(closed_form.greeks(&european_option, &bumped)?)
        } else {
            None
        };
        let american = if style.includes_american() {
            Some(lattice.greeks(&american_option, &bumped)?)
        } else {
            None
        };
        Ok(GreekPoint {
            spot: *spot,
            european,
            american,
        })
    };

    #[cfg(feature = "parallel")]
    let points = spots
        .par_iter()
        .map(at_spot)
        .collect::<Result<Vec<_>, _>>()?;
    #[cfg(not(feature = "parallel"))]
    let points = spots.iter().map(at_spot).collect::<Result<Vec<_>, _>>()?;

    Ok(GreekProfile { style, points })
}
