use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculators::stats::percentile;
use crate::error::{RiskError, RiskResult};

pub const DEFAULT_NUM_SIMULATIONS: usize = 10_000;
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub num_simulations: usize,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_simulations: DEFAULT_NUM_SIMULATIONS,
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarInput {
    pub portfolio_value: f64,
    pub daily_volatility_pct: f64,
    pub confidence_level: f64, // percent, typically 90 / 95 / 99
    pub time_horizon_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarEstimate {
    /// Loss not exceeded with `confidence_level` probability over the horizon.
    pub var_amount: f64,
    pub var_pct_of_portfolio: f64,
    /// Daily return at the tail percentile, before horizon scaling.
    pub tail_daily_return: f64,
    pub confidence_level: f64,
    pub time_horizon_days: u32,
}

/// Monte Carlo VaR: draws normal daily returns, takes the tail percentile and
/// scales by the square root of the horizon.
///
/// The sampler is seeded, so a given input and config always produce the same
/// estimate.
pub fn monte_carlo_var(input: &VarInput, config: &SimulationConfig) -> RiskResult<VarEstimate> {
    if !(input.confidence_level > 0.0 && input.confidence_level < 100.0) {
        return Err(RiskError::InvalidInput(format!(
            "confidence_level must be between 0 and 100, got {}",
            input.confidence_level
        )));
    }
    if input.time_horizon_days == 0 {
        return Err(RiskError::InvalidInput(
            "time_horizon_days must be at least 1".to_string(),
        ));
    }
    if config.num_simulations == 0 {
        return Err(RiskError::InvalidInput(
            "num_simulations must be greater than 0".to_string(),
        ));
    }

    let samples = simulate_daily_returns(input.daily_volatility_pct, config)?;
    let tail_daily_return = percentile(&samples, 100.0 - input.confidence_level).unwrap_or(0.0);

    let var_amount =
        input.portfolio_value * tail_daily_return.abs() * (input.time_horizon_days as f64).sqrt();
    let var_pct_of_portfolio = if input.portfolio_value != 0.0 {
        var_amount / input.portfolio_value * 100.0
    } else {
        0.0
    };

    debug!(
        "VaR {:.0}% / {}d: tail return {:.5}, amount {:.2}",
        input.confidence_level, input.time_horizon_days, tail_daily_return, var_amount
    );

    Ok(VarEstimate {
        var_amount,
        var_pct_of_portfolio,
        tail_daily_return,
        confidence_level: input.confidence_level,
        time_horizon_days: input.time_horizon_days,
    })
}

/// Daily returns drawn from `Normal(0, daily_volatility_pct / 100)`.
pub fn simulate_daily_returns(
    daily_volatility_pct: f64,
    config: &SimulationConfig,
) -> RiskResult<Vec<f64>> {
    // Normal::new accepts any finite std dev, negative included
    if !(daily_volatility_pct >= 0.0 && daily_volatility_pct.is_finite()) {
        return Err(RiskError::InvalidInput(format!(
            "daily_volatility_pct must be a non-negative number, got {}",
            daily_volatility_pct
        )));
    }
    let normal = Normal::new(0.0, daily_volatility_pct / 100.0).map_err(|e| {
        RiskError::InvalidInput(format!(
            "daily_volatility_pct {} is not a valid standard deviation: {}",
            daily_volatility_pct, e
        ))
    })?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    Ok(normal
        .sample_iter(&mut rng)
        .take(config.num_simulations)
        .collect())
}
