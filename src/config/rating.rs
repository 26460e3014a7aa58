//! Rating system configuration

use serde::{Deserialize, Serialize};

/// Rating constants used by the engine and at registration.
///
/// `default_mu`/`default_sigma` form the bootstrap prior returned by the
/// engine; `registration_sigma` is the uncertainty actually stored when a
/// player registers. The two sigma constants are deliberately independent
/// and are not assumed equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingSettings {
    /// Prior mean skill for new players
    pub default_mu: f64,
    /// Prior uncertainty returned by the bootstrap
    pub default_sigma: f64,
    /// Uncertainty stored for both modes at registration time
    pub registration_sigma: f64,
    /// Performance-noise scale: score randomness per side not explained
    /// by skill. The engine adds `beta^2` of variance per side per match.
    pub beta: f64,
    /// Lower bound on uncertainty after an update
    pub sigma_floor: f64,
    /// Multiplier applied to the update when a game went under.
    /// 1.0 leaves the flag informational.
    pub went_under_weight: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            default_mu: 25.0,
            default_sigma: 25.0 / 3.0,
            registration_sigma: 8.3,
            beta: 25.0 / 6.0,
            sigma_floor: 0.1,
            went_under_weight: 1.0,
        }
    }
}
