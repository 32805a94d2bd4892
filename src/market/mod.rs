//! Market state consumed by every pricer.
//!
//! A [`Market`] is an immutable snapshot of spot, continuously-compounded rate,
//! continuous dividend yield and flat volatility. Bumped scenarios are new copies built
//! with [`Market::with_spot`], [`Market::with_vol`] and [`Market::with_rate`].

use serde::{Deserialize, Serialize};

use crate::core::{Parameter, PricingError, require_positive};

/// Market snapshot used by all pricing engines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Spot price.
    pub spot: f64,
    /// Continuously compounded risk-free rate. May be negative.
    pub rate: f64,
    /// Continuously compounded dividend yield.
    pub dividend_yield: f64,
    /// Annualized flat volatility.
    pub vol: f64,
}

impl Market {
    /// Builds and validates a market snapshot.
    pub fn new(spot: f64, rate: f64, dividend_yield: f64, vol: f64) -> Result<Self, PricingError> {
        let market = Self {
            spot,
            rate,
            dividend_yield,
            vol,
        };
        market.validate()?;
        Ok(market)
    }

    /// Starts a market builder.
    ///
    /// # Examples
    /// ```
    /// use ferric_vanilla::market::Market;
    ///
    /// let market = Market::builder()
    ///     .spot(100.0)
    ///     .rate(0.03)
    ///     .dividend_yield(0.01)
    ///     .flat_vol(0.20)
    ///     .build()
    ///     .unwrap();
    ///
    /// assert_eq!(market.spot, 100.0);
    /// ```
    #[inline]
    pub fn builder() -> MarketBuilder {
        MarketBuilder::default()
    }

    /// Checks the model domain: `spot > 0`, `vol > 0`, `dividend_yield >= 0`, finite rate.
    ///
    /// # Errors
    /// Returns [`PricingError::Domain`] naming the first offending field.
    pub fn validate(&self) -> Result<(), PricingError> {
        require_positive(Parameter::Spot, self.spot)?;
        require_positive(Parameter::Volatility, self.vol)?;
        if !self.rate.is_finite() {
            return Err(PricingError::Domain {
                parameter: Parameter::Rate,
                value: self.rate,
            });
        }
        if !(self.dividend_yield.is_finite() && self.dividend_yield >= 0.0) {
            return Err(PricingError::Domain {
                parameter: Parameter::DividendYield,
                value: self.dividend_yield,
            });
        }
        Ok(())
    }

    /// Copy with a different spot.
    #[inline]
    pub fn with_spot(self, spot: f64) -> Self {
        Self { spot, ..self }
    }

    /// Copy with a different volatility.
    #[inline]
    pub fn with_vol(self, vol: f64) -> Self {
        Self { vol, ..self }
    }

    /// Copy with a different risk-free rate.
    #[inline]
    pub fn with_rate(self, rate: f64) -> Self {
        Self { rate, ..self }
    }
}

/// Builder for [`Market`].
#[derive(Debug, Clone, Default)]
pub struct MarketBuilder {
    spot: Option<f64>,
    rate: Option<f64>,
    dividend_yield: Option<f64>,
    flat_vol: Option<f64>,
}

impl MarketBuilder {
    /// Sets the spot price.
    #[inline]
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the flat risk-free rate.
    #[inline]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Sets the continuous dividend yield.
    #[inline]
    pub fn dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = Some(dividend_yield);
        self
    }

    /// Sets the flat volatility.
    #[inline]
    pub fn flat_vol(mut self, vol: f64) -> Self {
        self.flat_vol = Some(vol);
        self
    }

    /// Validates and builds a [`Market`].
    ///
    /// Rate and dividend yield default to zero.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] when spot or volatility is missing and
    /// [`PricingError::Domain`] when a supplied value is outside the model domain.
    pub fn build(self) -> Result<Market, PricingError> {
        let spot = self
            .spot
            .ok_or_else(|| PricingError::InvalidInput("market spot is required".to_string()))?;
        let vol = self.flat_vol.ok_or_else(|| {
            PricingError::InvalidInput("market flat_vol is required".to_string())
        })?;

        Market::new(
            spot,
            self.rate.unwrap_or(0.0),
            self.dividend_yield.unwrap_or(0.0),
            vol,
        )
    }
}
