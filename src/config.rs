//! Engine configuration.
//!
//! Step counts and grid shapes can be loaded from a TOML file; anything omitted keeps its
//! default. Finite-difference bump sizes and the market-convention scale factors are fixed
//! and deliberately absent here.
//!
//! ```toml
//! [lattice]
//! steps = 200
//! profile_steps = 120
//!
//! [profile]
//! lower = 0.6
//! upper = 1.4
//! european_points = 40
//! american_points = 18
//!
//! [payoff]
//! lower = 0.5
//! upper = 1.5
//! points = 200
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::PricingError;
use crate::engines::numerical::american_binomial::DEFAULT_STEPS;

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Lattice depth settings.
    #[serde(default)]
    pub lattice: LatticeSettings,
    /// Spot grid for sensitivity profiles.
    #[serde(default)]
    pub profile: ProfileSettings,
    /// Terminal-spot grid for payoff diagrams.
    #[serde(default)]
    pub payoff: PayoffSettings,
}

/// Lattice depth settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeSettings {
    /// Steps for headline American prices and Greeks.
    #[serde(default = "default_steps")]
    pub steps: usize,
    /// Steps for each point of a sensitivity profile.
    #[serde(default = "default_profile_steps")]
    pub profile_steps: usize,
}

fn default_steps() -> usize {
    DEFAULT_STEPS
}

fn default_profile_steps() -> usize {
    120
}

impl Default for LatticeSettings {
    fn default() -> Self {
        Self {
            steps: DEFAULT_STEPS,
            profile_steps: 120,
        }
    }
}

/// Spot grid for sensitivity profiles, as multiples of the current spot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSettings {
    #[serde(default = "default_profile_lower")]
    pub lower: f64,
    #[serde(default = "default_profile_upper")]
    pub upper: f64,
    /// Grid size when only closed-form Greeks are requested.
    #[serde(default = "default_european_points")]
    pub european_points: usize,
    /// Grid size whenever lattice Greeks are requested.
    #[serde(default = "default_american_points")]
    pub american_points: usize,
}

fn default_profile_lower() -> f64 {
    0.6
}

fn default_profile_upper() -> f64 {
    1.4
}

fn default_european_points() -> usize {
    40
}

fn default_american_points() -> usize {
    18
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            lower: 0.6,
            upper: 1.4,
            european_points: 40,
            american_points: 18,
        }
    }
}

/// Terminal-spot grid for payoff diagrams, as multiples of the strike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffSettings {
    #[serde(default = "default_payoff_lower")]
    pub lower: f64,
    #[serde(default = "default_payoff_upper")]
    pub upper: f64,
    #[serde(default = "default_payoff_points")]
    pub points: usize,
}

fn default_payoff_lower() -> f64 {
    0.5
}

fn default_payoff_upper() -> f64 {
    1.5
}

fn default_payoff_points() -> usize {
    200
}

impl Default for PayoffSettings {
    fn default() -> Self {
        Self {
            lower: 0.5,
            upper: 1.5,
            points: 200,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PricingError> {
        let path = path.as_ref();
        info!("Loading engine configuration from: {}", path.display());

        let content = fs::read_to_string(path)
            .map_err(|e| PricingError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, PricingError> {
        let config: EngineConfig =
            toml::from_str(content).map_err(|e| PricingError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML text.
    pub fn to_toml_string(&self) -> Result<String, PricingError> {
        toml::to_string_pretty(self).map_err(|e| PricingError::Config(e.to_string()))
    }

    /// Rejects zero step counts, empty grids and inverted or non-positive bounds.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.lattice.steps == 0 || self.lattice.profile_steps == 0 {
            return Err(PricingError::Config(
                "lattice step counts must be > 0".to_string(),
            ));
        }
        check_grid("profile", self.profile.lower, self.profile.upper)?;
        check_grid("payoff", self.payoff.lower, self.payoff.upper)?;
        if self.profile.european_points == 0
            || self.profile.american_points == 0
            || self.payoff.points == 0
        {
            return Err(PricingError::Config(
                "grid point counts must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn check_grid(name: &str, lower: f64, upper: f64) -> Result<(), PricingError> {
    if !(lower.is_finite() && upper.is_finite() && lower > 0.0 && lower < upper) {
        return Err(PricingError::Config(format!(
            "{name} grid needs 0 < lower < upper, got [{lower}, {upper}]"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_file_gives_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.lattice.steps, 200);
        assert_eq!(config.lattice.profile_steps, 120);
        assert_eq!(config.profile.american_points, 18);
        assert_eq!(config.payoff.points, 200);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = EngineConfig::from_toml_str("[lattice]\nsteps = 500\n").unwrap();
        assert_eq!(config.lattice.steps, 500);
        assert_eq!(config.lattice.profile_steps, 120);
        assert_eq!(config.profile, ProfileSettings::default());
    }

    #[test]
    fn zero_steps_rejected() {
        let err = EngineConfig::from_toml_str("[lattice]\nsteps = 0\n").unwrap_err();
        assert!(matches!(err, PricingError::Config(_)));
    }

    #[test]
    fn inverted_grid_rejected() {
        let err = EngineConfig::from_toml_str("[profile]\nlower = 1.4\nupper = 0.6\n").unwrap_err();
        assert!(err.to_string().contains("profile"));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        assert!(matches!(
            EngineConfig::from_toml_str("[lattice\nsteps = 3"),
            Err(PricingError::Config(_))
        ));
    }

    #[test]
    fn load_from_file_round_trips() {
        let mut config = EngineConfig::default();
        config.lattice.steps = 321;
        config.payoff.points = 51;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(config.to_toml_string().unwrap().as_bytes())
            .unwrap();

        let loaded = EngineConfig::load(file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = EngineConfig::load("/nonexistent/ferric-vanilla.toml").unwrap_err();
        assert!(matches!(err, PricingError::Config(_)));
    }
}
