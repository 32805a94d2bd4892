//! Ferric Vanilla prices single-underlying vanilla options under two exercise conventions
//! and derives their sensitivities.
//!
//! European contracts use the Black-Scholes-Merton closed form with a continuous dividend
//! yield and analytic Greeks. American contracts use a Cox-Ross-Rubinstein binomial lattice
//! with Greeks estimated by centered bump-and-reprice on the lattice.
//!
//! References used across modules include:
//! - Hull, *Options, Futures, and Other Derivatives* (11th ed.), notably Ch. 13, 15, 19.
//! - Cox, Ross and Rubinstein (1979) for the binomial lattice.
//! - Abramowitz and Stegun 7.1.26 for the normal CDF.
//!
//! Numerical considerations:
//! - The lattice converges at first order in the step count; the default of 200 steps is
//!   within about 0.01 of the closed form for an at-the-money one-year contract.
//! - Lattice gamma from a 1% spot bump is noisy because the lattice price is piecewise
//!   linear in spot between node crossings. Use more steps when gamma matters.
//! - Lattice Greeks are reported per 1% vol, per 1% rate and per calendar day; closed-form
//!   Greeks are raw unless rescaled with [`core::Greeks::to_market_convention`].
//!
//! # Feature Flags
//! - `parallel`: evaluates the bumped lattices and profile points with Rayon.
//!
//! # Quick Start
//! Price a European call and its Greeks:
//! ```rust
//! use ferric_vanilla::instruments::VanillaOption;
//! use ferric_vanilla::market::Market;
//! use ferric_vanilla::pricing::{greeks_european, price_european};
//!
//! let call = VanillaOption::european_call(100.0, 1.0);
//! let market = Market::new(100.0, 0.05, 0.0, 0.2).unwrap();
//!
//! let px = price_european(&call, &market).unwrap();
//! let g = greeks_european(&call, &market).unwrap();
//! assert!((px - 10.4506).abs() < 1e-4);
//! assert!((g.delta - 0.6368).abs() < 1e-4);
//! ```
//!
//! Price an American put on the lattice through the engine API:
//! ```rust
//! use ferric_vanilla::prelude::*;
//!
//! let put = VanillaOption::american_put(100.0, 1.0);
//! let market = Market::builder().spot(100.0).rate(0.05).flat_vol(0.2).build().unwrap();
//!
//! let result = AmericanBinomialEngine::default().evaluate(&put, &market).unwrap();
//! assert!(result.price > 6.0 && result.price < 6.2);
//! assert_eq!(result.convention, GreeksConvention::Market);
//! ```
//!
//! Net payoff at expiry:
//! ```rust
//! use ferric_vanilla::core::{OptionType, Position};
//! use ferric_vanilla::pricing::net_payoff;
//!
//! assert_eq!(net_payoff(OptionType::Put, Position::Long, 90.0, 100.0, 4.0), 6.0);
//! ```

pub mod config;
pub mod core;
pub mod engines;
pub mod greeks;
pub mod instruments;
pub mod market;
pub mod math;
pub mod pricing;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::config::EngineConfig;
    pub use crate::core::*;
    pub use crate::engines::analytic::*;
    pub use crate::engines::numerical::*;
    pub use crate::instruments::*;
    pub use crate::market::*;
}
