//! Greeks and sensitivity analytics.
//!
//! Bump-and-reprice estimator for pricers without closed-form sensitivities (the American
//! lattice), plus spot-grid sensitivity profiles in [`profile`].
//!
//! Bumps are fixed: `hS = max(0.01, 0.01 S)`, `h_sigma = 0.01`, `h_r = 1e-4`,
//! `h_T = min(1/365, T/2)`. Down-bumps of spot, volatility and expiry are floored at
//! [`BUMP_FLOOR`]. Every difference is centered; the unbumped price is evaluated once
//! and shared by gamma.
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::core::{Greeks, PricingError};
use crate::instruments::vanilla::VanillaOption;
use crate::market::Market;

pub mod profile;

pub use profile::{GreekPoint, GreekProfile, greek_profile};

/// Lower bound applied to down-bumped spot, volatility and expiry.
pub const BUMP_FLOOR: f64 = 1e-12;

/// Perturbation sizes for the centered differences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BumpSizes {
    pub spot: f64,
    pub vol: f64,
    pub rate: f64,
    pub expiry: f64,
}

impl BumpSizes {
    /// Standard bump sizes for a given spot and time to maturity.
    pub fn for_inputs(spot: f64, expiry: f64) -> Self {
        Self {
            spot: (0.01 * spot).max(0.01),
            vol: 0.01,
            rate: 1e-4,
            expiry: (1.0 / 365.0_f64).min(expiry / 2.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scenario {
    Base,
    SpotUp,
    SpotDown,
    VolUp,
    VolDown,
    RateUp,
    RateDown,
    ExpiryUp,
    ExpiryDown,
}

const SCENARIOS: [Scenario; 9] = [
    Scenario::Base,
    Scenario::SpotUp,
    Scenario::SpotDown,
    Scenario::VolUp,
    Scenario::VolDown,
    Scenario::RateUp,
    Scenario::RateDown,
    Scenario::ExpiryUp,
    Scenario::ExpiryDown,
];

impl Scenario {
    fn inputs(
        self,
        option: &VanillaOption,
        market: &Market,
        h: &BumpSizes,
    ) -> (VanillaOption, Market) {
        let o = *option;
        let m = *market;
        match self {
            Self::Base => (o, m),
            Self::SpotUp => (o, m.with_spot(m.spot + h.spot)),
            Self::SpotDown => (o, m.with_spot((m.spot - h.spot).max(BUMP_FLOOR))),
            Self::VolUp => (o, m.with_vol(m.vol + h.vol)),
            Self::VolDown => (o, m.with_vol((m.vol - h.vol).max(BUMP_FLOOR))),
            Self::RateUp => (o, m.with_rate(m.rate + h.rate)),
            Self::RateDown => (o, m.with_rate(m.rate - h.rate)),
            Self::ExpiryUp => (o.with_expiry(o.expiry + h.expiry), m),
            Self::ExpiryDown => (o.with_expiry((o.expiry - h.expiry).max(BUMP_FLOOR)), m),
        }
    }
}

/// Raw finite-difference Greeks with the standard [`BumpSizes`].
///
/// `pricer` is re-invoked nine times (base plus eight bumps). Vega and rho are per unit.
/// Theta is the centered difference in maturity, `dV/dT` per year, with no sign flip; it is
/// positive when a longer-dated contract is worth more.
pub fn finite_difference_greeks<P>(
    pricer: &P,
    option: &VanillaOption,
    market: &Market,
) -> Result<Greeks, PricingError>
where
    P: Fn(&VanillaOption, &Market) -> Result<f64, PricingError> + Sync,
{
    option.validate()?;
    market.validate()?;
    let bumps = BumpSizes::for_inputs(market.spot, option.expiry);
    finite_difference_greeks_with(pricer, option, market, &bumps)
}

/// Raw finite-difference Greeks with caller-chosen bump sizes.
pub fn finite_difference_greeks_with<P>(
    pricer: &P,
    option: &VanillaOption,
    market: &Market,
    bumps: &BumpSizes,
) -> Result<Greeks, PricingError>
where
    P: Fn(&VanillaOption, &Market) -> Result<f64, PricingError> + Sync,
{
    debug!(
        h_spot = bumps.spot,
        h_vol = bumps.vol,
        h_rate = bumps.rate,
        h_expiry = bumps.expiry,
        "finite-difference bumps"
    );

    let evaluate = |scenario: &Scenario| {
        let (o, m) = scenario.inputs(option, market, bumps);
        pricer(&o, &m)
    };

    #[cfg(feature = "parallel")]
    let prices = SCENARIOS
        .par_iter()
        .map(evaluate)
        .collect::<Result<Vec<_>, _>>()?;
    #[cfg(not(feature = "parallel"))]
    let prices = SCENARIOS
        .iter()
        .map(evaluate)
        .collect::<Result<Vec<_>, _>>()?;

    let [p0, s_up, s_dn, v_up, v_dn, r_up, r_dn, t_up, t_dn]: [f64; 9] = prices
        .try_into()
        .map_err(|_| PricingError::NumericalError("missing bumped price".to_string()))?;

    let (ds, dv, dr, dt) = (bumps.spot, bumps.vol, bumps.rate, bumps.expiry);
    let greeks = Greeks {
        delta: (s_up - s_dn) / (2.0 * ds),
        gamma: (s_up - 2.0 * p0 + s_dn) / (ds * ds),
        vega: (v_up - v_dn) / (2.0 * dv),
        theta: (t_up - t_dn) / (2.0 * dt),
        rho: (r_up - r_dn) / (2.0 * dr),
    };

    if !greeks.is_finite() {
        return Err(PricingError::NumericalError(
            "finite-difference greeks are not finite".to_string(),
        ));
    }
    Ok(greeks)
}
