//! Module `engines::numerical::american_binomial`.
//!
//! Cox-Ross-Rubinstein binomial lattice for American vanillas with a continuous dividend
//! yield.
//!
//! References: Hull (11th ed.) Ch. 13, Cox-Ross-Rubinstein (1979), and backward-induction
//! recursions around Eq. (13.10).
//!
//! Key types and purpose: `AmericanBinomialEngine` prices, `LatticeParams` holds the per-step
//! up/down factors, risk-neutral probability and discount.
//!
//! Numerical considerations: the risk-neutral probability is checked before any node is
//! evaluated; `sigma * sqrt(dt)` small relative to `(r - q) * dt` pushes it outside `[0, 1]`.
//! Work is `O(N^2)` in the step count with a single `N + 1` buffer rewritten in place.
//!
//! When to use: early-exercise contracts. Sensitivities come from bump-and-reprice in
//! [`crate::greeks`].
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::core::{
    ExerciseStyle, Greeks, GreeksConvention, Instrument, OptionType, PricingEngine,
    PricingError,
};
use crate::greeks::finite_difference_greeks;
use crate::instruments::vanilla::VanillaOption;
use crate::market::Market;
use crate::math::arena::PricingArena;

/// Default number of lattice steps.
pub const DEFAULT_STEPS: usize = 200;

/// Per-step CRR lattice parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeParams {
    /// Step length in years.
    pub dt: f64,
    /// Up factor `exp(sigma * sqrt(dt))`.
    pub u: f64,
    /// Down factor `1 / u`.
    pub d: f64,
    /// Risk-neutral up probability.
    pub p: f64,
    /// One-step discount factor `exp(-r * dt)`.
    pub disc: f64,
}

impl LatticeParams {
    /// Derives CRR parameters for `steps` steps to `expiry`.
    ///
    /// # Errors
    /// [`PricingError::InvalidInput`] for zero steps and
    /// [`PricingError::InconsistentLattice`] when `p` falls outside `[0, 1]`.
    pub fn crr(market: &Market, expiry: f64, steps: usize) -> Result<Self, PricingError> {
        if steps == 0 {
            return Err(PricingError::InvalidInput(
                "binomial steps must be > 0".to_string(),
            ));
        }

        let dt = expiry / steps as f64;
        let u = (market.vol * dt.sqrt()).exp();
        let d = 1.0 / u;
        let growth = ((market.rate - market.dividend_yield) * dt).exp();
        let p = (growth - d) / (u - d);
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(PricingError::InconsistentLattice {
                probability: p,
                steps,
            });
        }
        let disc = (-market.rate * dt).exp();

        Ok(Self { dt, u, d, p, disc })
    }
}

/// Cox-Ross-Rubinstein binomial tree engine for American vanilla options.
#[derive(Debug, Clone)]
pub struct AmericanBinomialEngine {
    /// Number of tree steps.
    pub steps: usize,
    arena: Option<Arc<Mutex<PricingArena>>>,
}

impl Default for AmericanBinomialEngine {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            arena: None,
        }
    }
}

impl AmericanBinomialEngine {
    /// Creates an American binomial engine with a custom number of steps.
    pub fn new(steps: usize) -> Self {
        Self { steps, arena: None }
    }

    /// Creates an engine that reuses a shared pre-allocated pricing arena.
    pub fn with_arena(steps: usize, arena: Arc<Mutex<PricingArena>>) -> Self {
        Self {
            steps,
            arena: Some(arena),
        }
    }

    /// Raw finite-difference sensitivities (vega/rho per unit, theta per year).
    pub fn raw_greeks(
        &self,
        instrument: &VanillaOption,
        market: &Market,
    ) -> Result<Greeks, PricingError> {
        let pricer = |o: &VanillaOption, m: &Market| self.price(o, m);
        finite_difference_greeks(&pricer, instrument, market)
    }
}

#[allow(clippy::too_many_arguments)]
fn rollback_american_binomial(
    values: &mut [f64],
    steps: usize,
    spot0: f64,
    strike: f64,
    option_type: OptionType,
    u: f64,
    d: f64,
    p: f64,
    disc: f64,
) -> f64 {
    debug_assert!(values.len() > steps);

    // spot0 * u^j * d^(steps-j) = spot0 * d^steps * (u/d)^j
    let ratio = u / d;
    let one_minus_p = 1.0 - p;

    {
        let mut st = spot0 * d.powi(steps as i32);
        for value in values.iter_mut().take(steps + 1) {
            *value = option_type.intrinsic(st, strike);
            st *= ratio;
        }
    }

    // base = spot0 * d^i
    let mut base = spot0 * d.powi((steps - 1) as i32);
    for i in (0..steps).rev() {
        let mut st = base;
        for j in 0..=i {
            let continuation = disc * (p * values[j + 1] + one_minus_p * values[j]);
            let exercise = option_type.intrinsic(st, strike);
            values[j] = continuation.max(exercise);
            st *= ratio;
        }
        base *= u;
    }

    values[0]
}

impl PricingEngine<VanillaOption> for AmericanBinomialEngine {
    fn price(&self, instrument: &VanillaOption, market: &Market) -> Result<f64, PricingError> {
        instrument.validate()?;
        market.validate()?;

        if instrument.exercise != ExerciseStyle::American {
            return Err(PricingError::ExerciseMismatch {
                engine: "AmericanBinomialEngine",
                found: instrument.exercise,
            });
        }

        let LatticeParams { u, d, p, disc, .. } =
            LatticeParams::crr(market, instrument.expiry, self.steps)?;
        debug!(
            instrument = instrument.instrument_type(),
            steps = self.steps,
            u,
            d,
            p,
            disc,
            "crr lattice parameters"
        );

        let price = if let Some(arena) = &self.arena {
            let mut guard = arena.lock().unwrap_or_else(|poison| poison.into_inner());
            let values = guard.tree_slice(self.steps + 1);
            rollback_american_binomial(
                values,
                self.steps,
                market.spot,
                instrument.strike,
                instrument.option_type,
                u,
                d,
                p,
                disc,
            )
        } else {
            let mut values = vec![0.0_f64; self.steps + 1];
            rollback_american_binomial(
                &mut values,
                self.steps,
                market.spot,
                instrument.strike,
                instrument.option_type,
                u,
                d,
                p,
                disc,
            )
        };

        if !price.is_finite() {
            return Err(PricingError::NumericalError(format!(
                "lattice price is not finite with {} steps",
                self.steps
            )));
        }
        Ok(price)
    }

    /// Finite-difference sensitivities rescaled to the market convention.
    fn greeks(&self, instrument: &VanillaOption, market: &Market) -> Result<Greeks, PricingError> {
        Ok(self.raw_greeks(instrument, market)?.to_market_convention())
    }

    fn convention(&self) -> GreeksConvention {
        GreeksConvention::Market
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::{AmericanBinomialEngine, LatticeParams};
    use crate::core::{ExerciseStyle, OptionType, Parameter, PricingEngine, PricingError};
    use crate::instruments::VanillaOption;
    use crate::market::Market;
    use crate::math::arena::PricingArena;

    fn setup_market() -> Market {
        Market::builder()
            .spot(100.0)
            .rate(0.03)
            .dividend_yield(0.01)
            .flat_vol(0.25)
            .build()
            .expect("valid market")
    }

    #[test]
    fn american_binomial_with_arena_matches_non_arena_exactly() {
        let market = setup_market();
        let option = VanillaOption::american_put(100.0, 1.0);
        let steps = 400;

        let baseline = AmericanBinomialEngine::new(steps)
            .price(&option, &market)
            .expect("baseline pricing succeeds");

        let arena = Arc::new(Mutex::new(PricingArena::with_capacity(steps)));
        let arena_price = AmericanBinomialEngine::with_arena(steps, Arc::clone(&arena))
            .price(&option, &market)
            .expect("arena pricing succeeds");

        assert_eq!(arena_price, baseline);
    }

    #[test]
    fn american_binomial_shared_arena_is_reusable() {
        let market = setup_market();
        let option = VanillaOption::american_call(95.0, 1.5);
        let steps = 300;

        let shared = Arc::new(Mutex::new(PricingArena::with_capacity(32)));
        let engine = AmericanBinomialEngine::with_arena(steps, Arc::clone(&shared));

        let first = engine.price(&option, &market).expect("first pricing succeeds");
        let second = engine.price(&option, &market).expect("second pricing succeeds");

        assert_eq!(first, second);

        let guard = shared.lock().unwrap_or_else(|poison| poison.into_inner());
        assert!(guard.tree_buffer.len() >= steps + 1);
    }

    #[test]
    fn single_step_tree_matches_hand_computation() {
        let market = Market::new(100.0, 0.05, 0.0, 0.2).unwrap();
        let option = VanillaOption::american_put(100.0, 1.0);
        let params = LatticeParams::crr(&market, 1.0, 1).unwrap();

        let down_spot = 100.0 * params.d;
        let continuation = params.disc * (1.0 - params.p) * (100.0 - down_spot);
        let expected = continuation.max(0.0);

        let price = AmericanBinomialEngine::new(1).price(&option, &market).unwrap();
        assert!((price - expected).abs() < 1e-12);
    }

    #[test]
    fn default_engine_uses_two_hundred_steps() {
        assert_eq!(AmericanBinomialEngine::default().steps, 200);
    }

    #[test]
    fn zero_steps_is_rejected() {
        let err = AmericanBinomialEngine::new(0)
            .price(&VanillaOption::american_put(100.0, 1.0), &setup_market())
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }

    #[test]
    fn probability_outside_unit_interval_fails_before_rollback() {
        // One step over ten years with tiny vol: growth far exceeds the up factor.
        let market = Market::new(100.0, 0.5, 0.0, 0.01).unwrap();
        let option = VanillaOption::american_call(100.0, 10.0);

        let err = AmericanBinomialEngine::new(1)
            .price(&option, &market)
            .unwrap_err();
        match err {
            PricingError::InconsistentLattice { probability, steps } => {
                assert!(probability > 1.0);
                assert_eq!(steps, 1);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn zero_vol_is_a_domain_error() {
        let market = Market {
            vol: 0.0,
            ..setup_market()
        };
        let err = AmericanBinomialEngine::default()
            .price(&VanillaOption::american_call(100.0, 1.0), &market)
            .unwrap_err();
        assert_eq!(
            err,
            PricingError::Domain {
                parameter: Parameter::Volatility,
                value: 0.0
            }
        );
    }

    #[test]
    fn european_contract_is_refused() {
        let option = VanillaOption::new(OptionType::Put, 100.0, 1.0, ExerciseStyle::European);
        let err = AmericanBinomialEngine::default()
            .price(&option, &setup_market())
            .unwrap_err();
        assert!(matches!(err, PricingError::ExerciseMismatch { .. }));
    }

    #[test]
    fn deep_itm_put_is_worth_at_least_intrinsic() {
        let market = Market::new(50.0, 0.05, 0.0, 0.2).unwrap();
        let price = AmericanBinomialEngine::default()
            .price(&VanillaOption::american_put(100.0, 0.25), &market)
            .unwrap();
        assert!(price >= 50.0 - 1e-12);
        assert!(price < 51.0);
    }
}
