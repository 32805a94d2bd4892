use serde::{Deserialize, Serialize};

/// Plain-vanilla option side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    /// Call option payoff profile.
    Call,
    /// Put option payoff profile.
    Put,
}

impl OptionType {
    /// Intrinsic value `max(±(spot - strike), 0)`.
    #[inline]
    pub fn intrinsic(self, spot: f64, strike: f64) -> f64 {
        match self {
            Self::Call => (spot - strike).max(0.0),
            Self::Put => (strike - spot).max(0.0),
        }
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => f.write_str("call"),
            Self::Put => f.write_str("put"),
        }
    }
}

/// Exercise rights for an option contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseStyle {
    /// Exercise only at expiry.
    European,
    /// Exercise at any time up to expiry.
    American,
}

impl std::fmt::Display for ExerciseStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::European => f.write_str("european"),
            Self::American => f.write_str("american"),
        }
    }
}

/// Holder side of the contract.
///
/// Position only enters the net payoff; premiums and sensitivities are quoted for one
/// long unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Bought the option and paid the premium.
    #[default]
    Long,
    /// Sold the option and received the premium.
    Short,
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Long => f.write_str("long"),
            Self::Short => f.write_str("short"),
        }
    }
}

/// Which pricing conventions a run should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingStyle {
    /// Closed-form price and analytic Greeks only.
    European,
    /// Lattice price and finite-difference Greeks only.
    American,
    /// Both conventions side by side.
    Comparison,
}

impl PricingStyle {
    pub fn includes_european(self) -> bool {
        matches!(self, Self::European | Self::Comparison)
    }

    pub fn includes_american(self) -> bool {
        matches!(self, Self::American | Self::Comparison)
    }
}

impl std::fmt::Display for PricingStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::European => f.write_str("european"),
            Self::American => f.write_str("american"),
            Self::Comparison => f.write_str("comparison"),
        }
    }
}
