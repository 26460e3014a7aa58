//! TrueSkill-family rating update implementation
//!
//! Pairwise Bayesian skill update over Gaussian beliefs. A side's combined
//! performance is the sum of its members' beliefs plus a fixed
//! performance-noise variance; the observed win/loss truncates the
//! predicted performance-difference distribution, and the resulting
//! correction is distributed across members in proportion to their personal
//! variance.

use crate::config::RatingSettings;
use crate::error::LeagueError;
use crate::rating::engine::RatingEngine;
use crate::types::Rating;
use serde::{Deserialize, Serialize};

/// Configuration for the TrueSkill update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrueSkillConfig {
    /// Performance-noise scale per side; `beta^2` of variance is added to
    /// each side's combined belief
    pub beta: f64,
    /// Uncertainty never shrinks below this bound
    pub sigma_floor: f64,
    /// Multiplier on the correction terms when a game went under
    pub went_under_weight: f64,
    /// Bootstrap prior mean
    pub initial_mu: f64,
    /// Bootstrap prior uncertainty
    pub initial_sigma: f64,
}

impl Default for TrueSkillConfig {
    fn default() -> Self {
        Self::from(&RatingSettings::default())
    }
}

impl From<&RatingSettings> for TrueSkillConfig {
    fn from(settings: &RatingSettings) -> Self {
        Self {
            beta: settings.beta,
            sigma_floor: settings.sigma_floor,
            went_under_weight: settings.went_under_weight,
            initial_mu: settings.default_mu,
            initial_sigma: settings.default_sigma,
        }
    }
}

impl TrueSkillConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.beta <= 0.0 {
            return Err(LeagueError::ConfigurationError {
                message: "Beta must be positive".to_string(),
            }
            .into());
        }

        if self.sigma_floor <= 0.0 {
            return Err(LeagueError::ConfigurationError {
                message: "Sigma floor must be positive".to_string(),
            }
            .into());
        }

        if self.went_under_weight <= 0.0 {
            return Err(LeagueError::ConfigurationError {
                message: "Went-under weight must be positive".to_string(),
            }
            .into());
        }

        if self.initial_sigma <= self.sigma_floor {
            return Err(LeagueError::ConfigurationError {
                message: "Initial sigma must exceed the sigma floor".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// TrueSkill rating engine
#[derive(Debug)]
pub struct TrueSkillEngine {
    config: TrueSkillConfig,
}

impl TrueSkillEngine {
    /// Create a new TrueSkill engine
    pub fn new(config: TrueSkillConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    /// Combined belief of one side: summed means, summed variances plus
    /// the performance-noise variance.
    fn side_belief(&self, side: &[Rating]) -> (f64, f64) {
        let mean: f64 = side.iter().map(|r| r.mu).sum();
        let variance: f64 =
            side.iter().map(|r| r.sigma * r.sigma).sum::<f64>() + self.config.beta * self.config.beta;
        (mean, variance)
    }

    /// Apply the correction to one member. `sign` is +1 for winners and
    /// -1 for losers; `c` and `c2` describe the predicted
    /// performance-difference distribution.
    fn update_member(&self, rating: Rating, sign: f64, c: f64, c2: f64, v: f64, w: f64) -> Rating {
        let variance = rating.sigma * rating.sigma;
        let mu = rating.mu + sign * (variance / c) * v;
        let shrink = (1.0 - (variance / c2) * w).max(0.0);
        let sigma = (variance * shrink).sqrt().max(self.config.sigma_floor);
        Rating::new(mu, sigma)
    }
}

impl RatingEngine for TrueSkillEngine {
    fn rate(
        &self,
        winners: &[Rating],
        losers: &[Rating],
        went_under: bool,
    ) -> crate::error::Result<(Vec<Rating>, Vec<Rating>)> {
        if winners.is_empty() || losers.is_empty() {
            return Err(LeagueError::InternalError {
                message: "Rating sides cannot be empty".to_string(),
            }
            .into());
        }

        for rating in winners.iter().chain(losers.iter()) {
            if rating.sigma <= 0.0 {
                return Err(LeagueError::DegenerateRating {
                    sigma: rating.sigma,
                }
                .into());
            }
        }

        let (win_mean, win_var) = self.side_belief(winners);
        let (lose_mean, lose_var) = self.side_belief(losers);

        // Predicted performance difference, winner minus loser
        let c2 = win_var + lose_var;
        let c = c2.sqrt();
        let t = (win_mean - lose_mean) / c;

        let weight = if went_under {
            self.config.went_under_weight
        } else {
            1.0
        };
        let v = v_win(t) * weight;
        let w = w_win(t) * weight;

        let new_winners = winners
            .iter()
            .map(|&r| self.update_member(r, 1.0, c, c2, v, w))
            .collect();
        let new_losers = losers
            .iter()
            .map(|&r| self.update_member(r, -1.0, c, c2, v, w))
            .collect();

        Ok((new_winners, new_losers))
    }

    fn initial_rating(&self) -> Rating {
        Rating::new(self.config.initial_mu, self.config.initial_sigma)
    }
}

/// Additive correction for the winner's mean: `v(t) = pdf(t) / cdf(t)`,
/// the hazard of the standard normal at the standardized margin. Falls
/// back to the hazard asymptote once the cdf underflows.
fn v_win(t: f64) -> f64 {
    let denom = normal_cdf(t);
    if denom <= f64::MIN_POSITIVE {
        -t - 1.0 / t
    } else {
        normal_pdf(t) / denom
    }
}

/// Multiplicative shrinkage for the variance: `w(t) = v(t) * (v(t) + t)`,
/// in (0, 1]. Clamped so tail rounding can never push the shrink factor
/// negative.
fn w_win(t: f64) -> f64 {
    let v = v_win(t);
    (v * (v + t)).min(1.0)
}

fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / std::f64::consts::TAU.sqrt()
}

fn normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x * std::f64::consts::FRAC_1_SQRT_2)
}

/// Complementary error function via the Chebyshev fit with fractional
/// error below 1.2e-7 everywhere, so deep-tail values keep their
/// magnitude and `v_win` stays accurate for lopsided upsets.
fn erfc(x: f64) -> f64 {
    if x < 0.0 {
        return 2.0 - erfc(-x);
    }
    let t = 1.0 / (1.0 + 0.5 * x);
    t * (-x * x - 1.26551223
        + t * (1.00002368
            + t * (0.37409196
                + t * (0.09678418
                    + t * (-0.18628806
                        + t * (0.27886807
                            + t * (-1.13520398
                                + t * (1.48851587
                                    + t * (-0.82215223 + t * 0.17087277)))))))))
    .exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> TrueSkillEngine {
        TrueSkillEngine::new(TrueSkillConfig::default()).unwrap()
    }

    #[test]
    fn test_config_validation() {
        assert!(TrueSkillConfig::default().validate().is_ok());

        let mut config = TrueSkillConfig::default();
        config.beta = -1.0;
        assert!(config.validate().is_err());

        let mut config = TrueSkillConfig::default();
        config.sigma_floor = 0.0;
        assert!(config.validate().is_err());

        let mut config = TrueSkillConfig::default();
        config.went_under_weight = 0.0;
        assert!(config.validate().is_err());

        let mut config = TrueSkillConfig::default();
        config.initial_sigma = config.sigma_floor;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_gaussian_helpers() {
        assert!((erfc(0.0) - 1.0).abs() < 1e-7);
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-7);
        assert!((normal_cdf(1.96) - 0.975).abs() < 1e-4);
        assert!((normal_pdf(0.0) - 0.398942).abs() < 1e-6);

        // cdf(x) + cdf(-x) == 1
        for x in [0.3, 1.0, 2.5] {
            assert!((normal_cdf(x) + normal_cdf(-x) - 1.0).abs() < 1e-7);
        }
    }

    #[test]
    fn test_truncation_corrections() {
        // Even match: v(0) = pdf(0)/0.5, w(0) = v(0)^2
        assert!((v_win(0.0) - 0.797_884_560_8).abs() < 1e-6);
        assert!((w_win(0.0) - 0.636_619_772_4).abs() < 1e-6);

        // Upset: v(-2) = pdf(2)/cdf(-2)
        assert!((v_win(-2.0) - 2.373_607).abs() < 1e-4);

        // v decreases as the predicted margin grows
        assert!(v_win(-1.0) > v_win(0.0));
        assert!(v_win(0.0) > v_win(1.0));

        // w stays inside (0, 1) across the range, including the asymptote
        for t in [-8.0, -5.5, -3.0, -1.0, 0.0, 1.0, 3.0] {
            let w = w_win(t);
            assert!(w > 0.0 && w < 1.0, "w({t}) = {w} out of range");
        }
    }

    #[test]
    fn test_even_solo_match() {
        let engine = engine();
        let a = Rating::new(25.0, 8.3);
        let b = Rating::new(25.0, 8.3);

        let (winners, losers) = engine.rate(&[a], &[b], false).unwrap();

        // Hand-computed for mu=25, sigma=8.3, beta=25/6:
        // c^2 = 2 * (8.3^2 + beta^2) = 172.5022, t = 0
        // delta_mu = sigma^2 / c * v(0) = 4.185
        // sigma' = sqrt(sigma^2 * (1 - sigma^2/c^2 * w(0))) = 7.1678
        assert!((winners[0].mu - 29.185).abs() < 1e-3);
        assert!((losers[0].mu - 20.815).abs() < 1e-3);
        assert!((winners[0].sigma - 7.1678).abs() < 1e-3);
        assert!((losers[0].sigma - 7.1678).abs() < 1e-3);

        // Equal priors: the swing is symmetric
        assert!((winners[0].mu - 25.0 + (losers[0].mu - 25.0)).abs() < 1e-9);
    }

    #[test]
    fn test_winner_up_loser_down() {
        let engine = engine();
        // Underdog wins
        let weak = Rating::new(20.0, 6.0);
        let strong = Rating::new(30.0, 3.0);

        let (winners, losers) = engine.rate(&[weak], &[strong], false).unwrap();

        assert!(winners[0].mu > weak.mu);
        assert!(losers[0].mu < strong.mu);
        assert!(winners[0].sigma <= weak.sigma);
        assert!(losers[0].sigma <= strong.sigma);
    }

    #[test]
    fn test_team_update_distributes_by_uncertainty() {
        let engine = engine();
        let settled = Rating::new(25.0, 4.0);
        let fresh = Rating::new(25.0, 8.3);

        let (winners, losers) = engine
            .rate(&[settled, fresh], &[fresh, settled], false)
            .unwrap();

        // Every winner gains, every loser drops
        assert!(winners.iter().all(|r| r.mu > 25.0));
        assert!(losers.iter().all(|r| r.mu < 25.0));

        // The less certain teammate absorbs the larger share of the swing
        assert!(winners[1].mu - 25.0 > winners[0].mu - 25.0);
        assert!(25.0 - losers[0].mu > 25.0 - losers[1].mu);
    }

    #[test]
    fn test_sigma_floor_holds() {
        let mut config = TrueSkillConfig::default();
        config.sigma_floor = 8.0;
        let engine = TrueSkillEngine::new(config).unwrap();

        let a = Rating::new(25.0, 8.3);
        let b = Rating::new(25.0, 8.3);
        let (winners, losers) = engine.rate(&[a], &[b], false).unwrap();

        // Unfloored shrink would land at ~7.17
        assert_eq!(winners[0].sigma, 8.0);
        assert_eq!(losers[0].sigma, 8.0);
    }

    #[test]
    fn test_went_under_is_informational_by_default() {
        let engine = engine();
        let a = Rating::new(27.0, 7.0);
        let b = Rating::new(24.0, 5.0);

        let plain = engine.rate(&[a], &[b], false).unwrap();
        let under = engine.rate(&[a], &[b], true).unwrap();

        assert_eq!(plain, under);
    }

    #[test]
    fn test_went_under_weight_scales_update() {
        let mut config = TrueSkillConfig::default();
        config.went_under_weight = 0.5;
        let engine = TrueSkillEngine::new(config).unwrap();

        let a = Rating::new(25.0, 8.3);
        let b = Rating::new(25.0, 8.3);

        let (full, _) = engine.rate(&[a], &[b], false).unwrap();
        let (halved, _) = engine.rate(&[a], &[b], true).unwrap();

        let full_delta = full[0].mu - 25.0;
        let halved_delta = halved[0].mu - 25.0;
        assert!((halved_delta - full_delta / 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_deterministic() {
        let engine = engine();
        let a = Rating::new(26.2, 7.1);
        let b = Rating::new(23.9, 8.0);

        let first = engine.rate(&[a], &[b], false).unwrap();
        let second = engine.rate(&[a], &[b], false).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_degenerate_sigma_rejected() {
        let engine = engine();
        let ok = Rating::new(25.0, 8.3);
        let degenerate = Rating::new(25.0, 0.0);

        let err = engine.rate(&[ok], &[degenerate], false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LeagueError>(),
            Some(LeagueError::DegenerateRating { .. })
        ));

        let negative = Rating::new(25.0, -1.0);
        assert!(engine.rate(&[negative], &[ok], false).is_err());
    }

    #[test]
    fn test_extreme_upset_stays_finite() {
        let engine = engine();
        let favorite = Rating::new(50.0, 0.5);
        let longshot = Rating::new(0.0, 0.5);

        let (winners, losers) = engine.rate(&[longshot], &[favorite], false).unwrap();

        assert!(winners[0].mu.is_finite() && losers[0].mu.is_finite());
        assert!(winners[0].mu > longshot.mu);
        assert!(losers[0].mu < favorite.mu);
        assert!(winners[0].sigma > 0.0 && winners[0].sigma <= longshot.sigma);
        assert!(losers[0].sigma > 0.0 && losers[0].sigma <= favorite.sigma);
    }

    #[test]
    fn test_empty_side_rejected() {
        let engine = engine();
        let a = Rating::new(25.0, 8.3);
        assert!(engine.rate(&[], &[a], false).is_err());
        assert!(engine.rate(&[a], &[], false).is_err());
    }

    #[test]
    fn test_initial_rating_comes_from_config() {
        let engine = engine();
        let prior = engine.initial_rating();
        assert_eq!(prior.mu, 25.0);
        assert!((prior.sigma - 25.0 / 3.0).abs() < 1e-12);
    }
}
