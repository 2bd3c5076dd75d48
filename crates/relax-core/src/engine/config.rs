use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tunable parameters of one relaxation call.
///
/// The integration constants were chosen for strained nucleic-acid backbones
/// and are deliberately crude: forward Euler with multiplicative momentum
/// damping dissipates energy every step, driving the system toward a local
/// minimum of the restraint energy instead of conserving dynamics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelaxConfig {
    /// Integration time step (5-time-unit step at the default mass scale).
    pub step_size: f32,
    /// Uniform particle mass applied to every atom.
    pub particle_mass: f32,
    /// Per-step multiplicative momentum attenuation.
    pub momentum_scale: f32,
    /// Stiffness of the banded chain restraints.
    pub k_chain: f32,
    /// Stiffness of the rigid-body restraints.
    pub k_rigid: f32,
    /// Iteration budget. Fractional values truncate toward zero; the
    /// float typing is part of the external contract.
    pub resource_limit: f32,
}

impl Default for RelaxConfig {
    fn default() -> Self {
        Self {
            step_size: 0.010,
            particle_mass: 325.0,
            momentum_scale: 0.99,
            k_chain: 1.0,
            k_rigid: 1.0,
            resource_limit: 5.0,
        }
    }
}

impl RelaxConfig {
    /// Number of integration steps: `resource_limit` truncated toward zero.
    /// Negative and non-finite budgets run zero steps.
    pub fn iterations(&self) -> usize {
        if self.resource_limit.is_finite() && self.resource_limit > 0.0 {
            self.resource_limit.trunc() as usize
        } else {
            0
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
