use serde::{Deserialize, Serialize};

/// A trade idea with two profit targets and a round-trip commission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradePlan {
    pub entry: f64,
    pub stop: f64,
    pub target_1: f64,
    pub target_2: f64,
    pub win_rate: f64, // percent
    pub shares: f64,
    pub commission_per_trade: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRewardAnalysis {
    pub risk_per_share: f64,
    pub rr_ratio_1: f64,
    pub rr_ratio_2: f64,
    pub max_loss: f64,
    pub max_gain_1: f64,
    pub max_gain_2: f64,
    pub expected_value: f64,
}

pub fn analyze_trade(plan: &TradePlan) -> RiskRewardAnalysis {
    let risk = (plan.entry - plan.stop).abs();
    let reward_1 = (plan.target_1 - plan.entry).abs();
    let reward_2 = (plan.target_2 - plan.entry).abs();

    let ratio = |reward: f64| if risk > 0.0 { reward / risk } else { 0.0 };

    // Commission is paid on entry and on exit
    let round_trip = 2.0 * plan.commission_per_trade;
    let max_loss = risk * plan.shares + round_trip;
    let max_gain_1 = reward_1 * plan.shares - round_trip;
    let max_gain_2 = reward_2 * plan.shares - round_trip;

    let p = plan.win_rate / 100.0;
    let expected_value = p * max_gain_1 - (1.0 - p) * max_loss;

    RiskRewardAnalysis {
        risk_per_share: risk,
        rr_ratio_1: ratio(reward_1),
        rr_ratio_2: ratio(reward_2),
        max_loss,
        max_gain_1,
        max_gain_2,
        expected_value,
    }
}
