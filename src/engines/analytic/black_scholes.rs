//! Module `engines::analytic::black_scholes`.
//!
//! Black-Scholes-Merton closed form for European vanillas with a continuous dividend yield.
//!
//! References: Hull (11th ed.) Ch. 15 and 19, Eq. (15.20)-(15.21) and Table 19.6.
//!
//! The `bs_*` free functions assume validated inputs (`S, K, T, sigma > 0`); the engine
//! validates before calling them and never clamps. Analytic sensitivities are a separate
//! capability ([`AnalyticGreeks`]) so a caller can price without them or swap the routine.
use std::sync::Arc;

use tracing::debug;

use crate::core::{
    ExerciseStyle, Greeks, GreeksConvention, Instrument, OptionType, PricingEngine,
    PricingError,
};
use crate::instruments::vanilla::VanillaOption;
use crate::market::Market;
use crate::math::{normal_cdf, normal_pdf};

#[inline]
pub fn d1_d2(
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> (f64, f64) {
    let sig_sqrt_t = vol * expiry.sqrt();
    let d1 =
        ((spot / strike).ln() + (rate - dividend_yield + 0.5 * vol * vol) * expiry) / sig_sqrt_t;
    (d1, d1 - sig_sqrt_t)
}

#[inline]
pub fn bs_price(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    let df_r = (-rate * expiry).exp();
    let df_q = (-dividend_yield * expiry).exp();
    let (d1, d2) = d1_d2(spot, strike, rate, dividend_yield, vol, expiry);
    match option_type {
        OptionType::Call => spot * df_q * normal_cdf(d1) - strike * df_r * normal_cdf(d2),
        OptionType::Put => strike * df_r * normal_cdf(-d2) - spot * df_q * normal_cdf(-d1),
    }
}

#[inline]
pub fn bs_delta(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    let (d1, _) = d1_d2(spot, strike, rate, dividend_yield, vol, expiry);
    let df_q = (-dividend_yield * expiry).exp();
    match option_type {
        OptionType::Call => df_q * normal_cdf(d1),
        OptionType::Put => df_q * (normal_cdf(d1) - 1.0),
    }
}

#[inline]
pub fn bs_gamma(
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    let (d1, _) = d1_d2(spot, strike, rate, dividend_yield, vol, expiry);
    let df_q = (-dividend_yield * expiry).exp();
    df_q * normal_pdf(d1) / (spot * vol * expiry.sqrt())
}

/// Vega per unit of volatility.
#[inline]
pub fn bs_vega(
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    let (d1, _) = d1_d2(spot, strike, rate, dividend_yield, vol, expiry);
    let df_q = (-dividend_yield * expiry).exp();
    spot * df_q * normal_pdf(d1) * expiry.sqrt()
}

/// Theta per year, with the time-decay sign (`-dV/dT`).
#[inline]
pub fn bs_theta(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    let (d1, d2) = d1_d2(spot, strike, rate, dividend_yield, vol, expiry);
    let sqrt_t = expiry.sqrt();
    let df_q = (-dividend_yield * expiry).exp();
    let df_r = (-rate * expiry).exp();
    let decay = -spot * df_q * normal_pdf(d1) * vol / (2.0 * sqrt_t);
    match option_type {
        OptionType::Call => {
            decay + dividend_yield * spot * df_q * normal_cdf(d1)
                - rate * strike * df_r * normal_cdf(d2)
        }
        OptionType::Put => {
            decay - dividend_yield * spot * df_q * normal_cdf(-d1)
                + rate * strike * df_r * normal_cdf(-d2)
        }
    }
}

/// Rho per unit of rate.
#[inline]
pub fn bs_rho(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    let (_, d2) = d1_d2(spot, strike, rate, dividend_yield, vol, expiry);
    let df_r = (-rate * expiry).exp();
    match option_type {
        OptionType::Call => strike * expiry * df_r * normal_cdf(d2),
        OptionType::Put => -strike * expiry * df_r * normal_cdf(-d2),
    }
}

/// Source of closed-form European sensitivities.
///
/// Implementations receive inputs already validated by the engine and return raw
/// per-unit Greeks (theta per year).
pub trait AnalyticGreeks: std::fmt::Debug + Send + Sync {
    fn greeks(&self, option: &VanillaOption, market: &Market) -> Greeks;
}

/// Black-Scholes-Merton closed-form Greeks from the same `d1`, `d2` and `N(.)` used for
/// pricing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosedFormGreeks;

impl AnalyticGreeks for ClosedFormGreeks {
    fn greeks(&self, option: &VanillaOption, market: &Market) -> Greeks {
        let (s, k, r, q, v, t) = (
            market.spot,
            option.strike,
            market.rate,
            market.dividend_yield,
            market.vol,
            option.expiry,
        );
        Greeks {
            delta: bs_delta(option.option_type, s, k, r, q, v, t),
            gamma: bs_gamma(s, k, r, q, v, t),
            vega: bs_vega(s, k, r, q, v, t),
            theta: bs_theta(option.option_type, s, k, r, q, v, t),
            rho: bs_rho(option.option_type, s, k, r, q, v, t),
        }
    }
}

/// Analytic Black-Scholes engine for European vanilla options.
#[derive(Debug, Clone)]
pub struct BlackScholesEngine {
    analytic_greeks: Option<Arc<dyn AnalyticGreeks>>,
}

impl Default for BlackScholesEngine {
    fn default() -> Self {
        Self {
            analytic_greeks: Some(Arc::new(ClosedFormGreeks)),
        }
    }
}

impl BlackScholesEngine {
    /// Creates a Black-Scholes engine with closed-form Greeks installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine that prices but has no sensitivity routine.
    pub fn without_analytic_greeks() -> Self {
        Self {
            analytic_greeks: None,
        }
    }

    /// Replaces the sensitivity routine.
    pub fn with_analytic_greeks(mut self, analytic_greeks: Arc<dyn AnalyticGreeks>) -> Self {
        self.analytic_greeks = Some(analytic_greeks);
        self
    }

    fn check_inputs(instrument: &VanillaOption, market: &Market) -> Result<(), PricingError> {
        instrument.validate()?;
        market.validate()?;
        if instrument.exercise != ExerciseStyle::European {
            return Err(PricingError::ExerciseMismatch {
                engine: "BlackScholesEngine",
                found: instrument.exercise,
            });
        }
        Ok(())
    }
}

impl PricingEngine<VanillaOption> for BlackScholesEngine {
    fn price(&self, instrument: &VanillaOption, market: &Market) -> Result<f64, PricingError> {
        Self::check_inputs(instrument, market)?;

        let (d1, d2) = d1_d2(
            market.spot,
            instrument.strike,
            market.rate,
            market.dividend_yield,
            market.vol,
            instrument.expiry,
        );
        let price = bs_price(
            instrument.option_type,
            market.spot,
            instrument.strike,
            market.rate,
            market.dividend_yield,
            market.vol,
            instrument.expiry,
        );
        debug!(
            instrument = instrument.instrument_type(),
            option_type = %instrument.option_type,
            d1,
            d2,
            price,
            "black-scholes price"
        );

        if !price.is_finite() {
            return Err(PricingError::NumericalError(format!(
                "black-scholes price is not finite (d1 = {d1}, d2 = {d2})"
            )));
        }
        Ok(price)
    }

    fn greeks(&self, instrument: &VanillaOption, market: &Market) -> Result<Greeks, PricingError> {
        Self::check_inputs(instrument, market)?;
        let routine = self
            .analytic_greeks
            .as_ref()
            .ok_or(PricingError::CapabilityMissing("analytic european greeks"))?;

        let greeks = routine.greeks(instrument, market);
        if !greeks.is_finite() {
            return Err(PricingError::NumericalError(
                "analytic greeks are not finite".to_string(),
            ));
        }
        Ok(greeks)
    }

    fn convention(&self) -> GreeksConvention {
        GreeksConvention::Raw
    }
}

/// One-liner convenience wrapper for Black-Scholes-Merton pricing.
pub fn black_scholes(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> Result<f64, PricingError> {
    let instrument = VanillaOption::new(option_type, strike, expiry, ExerciseStyle::European);
    let market = Market::new(spot, rate, dividend_yield, vol)?;
    BlackScholesEngine::new().price(&instrument, &market)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Parameter;
    use approx::assert_relative_eq;

    fn atm_market() -> Market {
        Market::new(100.0, 0.05, 0.0, 0.20).unwrap()
    }

    #[test]
    fn hull_reference_call_price_and_delta() {
        let engine = BlackScholesEngine::new();
        let option = VanillaOption::european_call(100.0, 1.0);

        let price = engine.price(&option, &atm_market()).unwrap();
        let greeks = engine.greeks(&option, &atm_market()).unwrap();

        assert_relative_eq!(price, 10.4506, epsilon = 5e-4);
        assert_relative_eq!(greeks.delta, 0.6368, epsilon = 5e-4);
        assert_relative_eq!(greeks.gamma, 0.01876, epsilon = 5e-5);
        assert_relative_eq!(greeks.vega, 37.524, epsilon = 5e-3);
        assert_relative_eq!(greeks.theta, -6.414, epsilon = 5e-3);
        assert_relative_eq!(greeks.rho, 53.232, epsilon = 5e-3);
    }

    #[test]
    fn zero_vol_is_rejected_not_priced() {
        let engine = BlackScholesEngine::new();
        let option = VanillaOption::european_call(100.0, 1.0);
        let market = Market {
            vol: 0.0,
            ..atm_market()
        };

        assert_eq!(
            engine.price(&option, &market),
            Err(PricingError::Domain {
                parameter: Parameter::Volatility,
                value: 0.0
            })
        );
    }

    #[test]
    fn american_contract_is_refused() {
        let engine = BlackScholesEngine::new();
        let err = engine
            .price(&VanillaOption::american_put(100.0, 1.0), &atm_market())
            .unwrap_err();
        assert_eq!(
            err,
            PricingError::ExerciseMismatch {
                engine: "BlackScholesEngine",
                found: ExerciseStyle::American
            }
        );
    }

    #[test]
    fn missing_greeks_routine_fails_instead_of_returning_zeros() {
        let engine = BlackScholesEngine::without_analytic_greeks();
        let option = VanillaOption::european_put(100.0, 1.0);

        assert!(engine.price(&option, &atm_market()).is_ok());
        assert_eq!(
            engine.greeks(&option, &atm_market()),
            Err(PricingError::CapabilityMissing("analytic european greeks"))
        );
    }

    #[test]
    fn custom_greeks_routine_is_used() {
        #[derive(Debug)]
        struct Fixed;
        impl AnalyticGreeks for Fixed {
            fn greeks(&self, _: &VanillaOption, _: &Market) -> Greeks {
                Greeks {
                    delta: 1.0,
                    ..Greeks::default()
                }
            }
        }

        let engine =
            BlackScholesEngine::without_analytic_greeks().with_analytic_greeks(Arc::new(Fixed));
        let g = engine
            .greeks(&VanillaOption::european_call(100.0, 1.0), &atm_market())
            .unwrap();
        assert_eq!(g.delta, 1.0);
    }

    #[test]
    fn parity_holds_when_d1_or_d2_is_exactly_zero() {
        // S = K with (r - q +/- vol^2 / 2) T == 0 in exact arithmetic.
        for (rate, dividend_yield) in [(0.0, 0.125), (0.125, 0.0)] {
            let (d1, d2) = d1_d2(100.0, 100.0, rate, dividend_yield, 0.5, 1.0);
            assert!(d1 == 0.0 || d2 == 0.0, "d1 = {d1}, d2 = {d2}");

            let call = bs_price(OptionType::Call, 100.0, 100.0, rate, dividend_yield, 0.5, 1.0);
            let put = bs_price(OptionType::Put, 100.0, 100.0, rate, dividend_yield, 0.5, 1.0);
            let forward_gap = 100.0 * (-dividend_yield).exp() - 100.0 * (-rate).exp();
            assert!(
                (call - put - forward_gap).abs() < 1e-12,
                "parity residual {}",
                call - put - forward_gap
            );
        }
    }

    #[test]
    fn convenience_wrapper_matches_engine() {
        let px = black_scholes(OptionType::Put, 100.0, 100.0, 0.05, 0.0, 0.2, 1.0).unwrap();
        assert_relative_eq!(px, 5.5735, epsilon = 5e-4);
    }
}
