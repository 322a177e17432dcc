use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RiskError;

/// Trading activity of one client over the observation window (30 days).
///
/// Records are assumed to be range-checked by whoever collects them; only the
/// zero-trades case is guarded when deriving the win rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientActivity {
    pub client_id: String,
    pub total_trades: u32,
    pub winning_trades: u32,
    pub avg_trade_size: f64,      // lots
    pub total_volume: f64,        // lots
    pub avg_hold_time_hours: f64,
    pub gross_pnl: f64,           // client side, negative = client lost
    pub commission_paid: f64,
}

impl ClientActivity {
    /// Percentage of winning trades, 0 when no trades were recorded.
    pub fn win_rate(&self) -> f64 {
        if self.total_trades == 0 {
            return 0.0;
        }
        self.winning_trades as f64 / self.total_trades as f64 * 100.0
    }

    /// Broker revenue when the flow is passed to a liquidity provider.
    pub fn a_book_revenue(&self, lp_commission_cost_per_lot: f64) -> f64 {
        self.commission_paid - self.total_volume * lp_commission_cost_per_lot
    }

    /// Broker revenue when the broker takes the other side of the flow.
    pub fn b_book_revenue(&self) -> f64 {
        self.commission_paid - self.gross_pnl
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTolerance {
    #[serde(alias = "conservative")]
    Conservative,
    #[serde(alias = "moderate")]
    Moderate,
    #[serde(alias = "aggressive")]
    Aggressive,
}

impl RiskTolerance {
    /// Whether the broker is willing to warehouse client risk on its own book.
    pub fn allows_internalization(self) -> bool {
        matches!(self, Self::Moderate | Self::Aggressive)
    }
}

impl FromStr for RiskTolerance {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conservative" => Ok(Self::Conservative),
            "moderate" => Ok(Self::Moderate),
            "aggressive" => Ok(Self::Aggressive),
            _ => Err(RiskError::UnknownRiskTolerance(s.to_string())),
        }
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conservative => write!(f, "Conservative"),
            Self::Moderate => write!(f, "Moderate"),
            Self::Aggressive => write!(f, "Aggressive"),
        }
    }
}

/// Broker-side parameters shared by every client in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrokerPolicy {
    pub lp_commission_cost_per_lot: f64,
    pub risk_tolerance: RiskTolerance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
    #[serde(rename = "A-Book")]
    ABook,
    #[serde(rename = "B-Book")]
    BBook,
    Hybrid,
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ABook => write!(f, "A-Book"),
            Self::BBook => write!(f, "B-Book"),
            Self::Hybrid => write!(f, "Hybrid"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingReason {
    #[serde(rename = "Toxic flow - hedge with LP")]
    ToxicFlow,
    #[serde(rename = "Profitable client pattern")]
    ProfitableClientPattern,
    #[serde(rename = "Conservative policy")]
    ConservativePolicy,
    #[serde(rename = "Large position size risk")]
    LargePositionSize,
    #[serde(rename = "More profitable to internalize")]
    MoreProfitableToInternalize,
    #[serde(rename = "Better A-Book economics")]
    BetterABookEconomics,
}

impl BookingReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToxicFlow => "Toxic flow - hedge with LP",
            Self::ProfitableClientPattern => "Profitable client pattern",
            Self::ConservativePolicy => "Conservative policy",
            Self::LargePositionSize => "Large position size risk",
            Self::MoreProfitableToInternalize => "More profitable to internalize",
            Self::BetterABookEconomics => "Better A-Book economics",
        }
    }
}

impl fmt::Display for BookingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Routing decision for one client.
///
/// `win_rate` and `is_toxic` are carried along for display; both revenue
/// projections are always populated whatever the recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientDecision {
    pub client_id: String,
    pub recommendation: Recommendation,
    pub reason: BookingReason,
    pub a_book_revenue: f64,
    pub b_book_revenue: f64,
    pub win_rate: f64,
    pub is_toxic: bool,
}
