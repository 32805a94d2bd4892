//! Canonical plain-vanilla option contract definition used throughout the library.
//!
//! [`VanillaOption`] stores side, strike, expiry, exercise rights
//! ([`crate::core::ExerciseStyle`]: European/American) and the holder's
//! [`crate::core::Position`].
//! References: Hull (2018), Ch. 10-13 for payoff and exercise conventions.
//! Validation rejects non-positive or non-finite strike and expiry; there is no
//! immediate-expiry shortcut.
//! Contracts are plain `Copy` values: finite-difference bumps build new copies and never
//! mutate the original.

use serde::{Deserialize, Serialize};

use crate::core::{
    ExerciseStyle, Instrument, OptionType, Parameter, Position, PricingError, require_positive,
};

/// Vanilla option contract.
///
/// This is the canonical input for the Black-Scholes and lattice engines:
/// strike `K`, expiry `T`, option side, exercise rights and holder position.
///
/// # Examples
/// ```
/// use ferric_vanilla::core::{ExerciseStyle, OptionType, Position};
/// use ferric_vanilla::instruments::VanillaOption;
///
/// let option = VanillaOption {
///     option_type: OptionType::Call,
///     strike: 100.0,
///     expiry: 1.0,
///     exercise: ExerciseStyle::European,
///     position: Position::Long,
/// };
/// assert!(option.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VanillaOption {
    /// Call or put.
    pub option_type: OptionType,
    /// Strike level.
    pub strike: f64,
    /// Expiry in years.
    pub expiry: f64,
    /// Exercise style.
    pub exercise: ExerciseStyle,
    /// Holder side.
    #[serde(default)]
    pub position: Position,
}

impl VanillaOption {
    /// Builds a long option with the given side and exercise style.
    pub fn new(option_type: OptionType, strike: f64, expiry: f64, exercise: ExerciseStyle) -> Self {
        Self {
            option_type,
            strike,
            expiry,
            exercise,
            position: Position::Long,
        }
    }

    /// Builds a European call option.
    ///
    /// `strike` and `expiry` are interpreted in spot units and year fractions.
    ///
    /// # Examples
    /// ```
    /// use ferric_vanilla::core::{ExerciseStyle, OptionType};
    /// use ferric_vanilla::instruments::VanillaOption;
    ///
    /// let call = VanillaOption::european_call(100.0, 1.0);
    /// assert_eq!(call.option_type, OptionType::Call);
    /// assert!(matches!(call.exercise, ExerciseStyle::European));
    /// ```
    pub fn european_call(strike: f64, expiry: f64) -> Self {
        Self::new(OptionType::Call, strike, expiry, ExerciseStyle::European)
    }

    /// Builds a European put option.
    pub fn european_put(strike: f64, expiry: f64) -> Self {
        Self::new(OptionType::Put, strike, expiry, ExerciseStyle::European)
    }

    /// Builds an American call option.
    pub fn american_call(strike: f64, expiry: f64) -> Self {
        Self::new(OptionType::Call, strike, expiry, ExerciseStyle::American)
    }

    /// Builds an American put option.
    ///
    /// # Examples
    /// ```
    /// use ferric_vanilla::core::ExerciseStyle;
    /// use ferric_vanilla::instruments::VanillaOption;
    ///
    /// let put = VanillaOption::american_put(100.0, 2.0);
    /// assert!(matches!(put.exercise, ExerciseStyle::American));
    /// ```
    pub fn american_put(strike: f64, expiry: f64) -> Self {
        Self::new(OptionType::Put, strike, expiry, ExerciseStyle::American)
    }

    /// Returns a copy held on the given side.
    pub fn with_position(self, position: Position) -> Self {
        Self { position, ..self }
    }

    /// Returns a copy with different exercise rights.
    pub fn with_exercise(self, exercise: ExerciseStyle) -> Self {
        Self { exercise, ..self }
    }

    /// Returns a copy with a different time to maturity.
    pub fn with_expiry(self, expiry: f64) -> Self {
        Self { expiry, ..self }
    }

    /// Validates instrument fields.
    ///
    /// # Errors
    /// Returns [`PricingError::Domain`] when `strike` or `expiry` is not finite and
    /// strictly positive.
    pub fn validate(&self) -> Result<(), PricingError> {
        require_positive(Parameter::Strike, self.strike)?;
        require_positive(Parameter::Expiry, self.expiry)?;
        Ok(())
    }
}

impl Instrument for VanillaOption {
    fn instrument_type(&self) -> &str {
        "VanillaOption"
    }
}
