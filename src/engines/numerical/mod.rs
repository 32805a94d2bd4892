//! Module `engines::numerical::mod`.
//!
//! Lattice engines for contracts with early exercise.
//!
//! References: Hull (11th ed.) Ch. 13, Cox-Ross-Rubinstein (1979).
//!
//! Numerical considerations: convergence is first order in the step count; deep ITM/OTM
//! contracts may need a deeper lattice.

pub mod american_binomial;

pub use american_binomial::{AmericanBinomialEngine, DEFAULT_STEPS, LatticeParams};
