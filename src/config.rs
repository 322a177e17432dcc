use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::analytics::roi::RoiAssumptions;
use crate::booking::{BookingThresholds, BrokerPolicy, RiskTolerance};
use crate::calculators::var::SimulationConfig;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub booking: BookingConfig,
    pub simulation: SimulationConfig,
    pub roi: RoiAssumptions,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookingConfig {
    pub thresholds: BookingThresholds,
    /// Policy applied when a request does not carry its own.
    pub default_policy: BrokerPolicy,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl ApiConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            booking: BookingConfig {
                thresholds: BookingThresholds::default(),
                default_policy: BrokerPolicy {
                    lp_commission_cost_per_lot: 5.0,
                    risk_tolerance: RiskTolerance::Moderate,
                },
            },
            simulation: SimulationConfig::default(),
            roi: RoiAssumptions::default(),
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 3002,
            },
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source; unset or
    /// unparsable numeric values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let get = |key: &str, default: f64| parse_or(&lookup, key, default);

        let thresholds = BookingThresholds {
            toxic_win_rate: get("BOOKING_TOXIC_WIN_RATE", defaults.booking.thresholds.toxic_win_rate),
            b_book_max_win_rate: get(
                "BOOKING_B_BOOK_MAX_WIN_RATE",
                defaults.booking.thresholds.b_book_max_win_rate,
            ),
            toxic_trade_size: get(
                "BOOKING_TOXIC_TRADE_SIZE",
                defaults.booking.thresholds.toxic_trade_size,
            ),
            max_trade_size: get("BOOKING_MAX_TRADE_SIZE", defaults.booking.thresholds.max_trade_size),
            min_hold_time_hours: get(
                "BOOKING_MIN_HOLD_TIME_HOURS",
                defaults.booking.thresholds.min_hold_time_hours,
            ),
        };

        // Unknown tolerances are rejected, not defaulted
        let risk_tolerance = match lookup("RISK_TOLERANCE") {
            Some(raw) => raw.parse::<RiskTolerance>()?,
            None => defaults.booking.default_policy.risk_tolerance,
        };

        let default_policy = BrokerPolicy {
            lp_commission_cost_per_lot: get(
                "LP_COMMISSION_COST_PER_LOT",
                defaults.booking.default_policy.lp_commission_cost_per_lot,
            ),
            risk_tolerance,
        };

        let simulation = SimulationConfig {
            num_simulations: parse_or(
                &lookup,
                "VAR_NUM_SIMULATIONS",
                defaults.simulation.num_simulations,
            ),
            seed: parse_or(&lookup, "VAR_SEED", defaults.simulation.seed),
        };

        let roi = RoiAssumptions {
            churn_reduction_pct: get("ROI_CHURN_REDUCTION_PCT", defaults.roi.churn_reduction_pct),
            support_reduction_pct: get(
                "ROI_SUPPORT_REDUCTION_PCT",
                defaults.roi.support_reduction_pct,
            ),
            platform_cost_annual: get("ROI_PLATFORM_COST_ANNUAL", defaults.roi.platform_cost_annual),
        };

        let api = ApiConfig {
            host: lookup("API_HOST").unwrap_or(defaults.api.host),
            port: parse_or(&lookup, "API_PORT", defaults.api.port),
        };

        Ok(Config {
            booking: BookingConfig {
                thresholds,
                default_policy,
            },
            simulation,
            roi,
            api,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}
