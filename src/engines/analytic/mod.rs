//! Closed-form analytic pricing engines.

pub mod black_scholes;

pub use black_scholes::{AnalyticGreeks, BlackScholesEngine, ClosedFormGreeks, black_scholes};
