//! Fixed-fractional position sizing from account risk and stop distance
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionSizeInput {
    pub account_balance: f64,
    pub risk_percentage: f64, // percent of balance, e.g. 2.0
    pub entry_price: f64,
    pub stop_loss: f64,
    pub target_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionSize {
    pub position_size: f64, // units / shares
    pub position_value: f64,
    pub risk_amount: f64,
    pub price_risk: f64,
    pub potential_profit: f64,
    pub risk_reward_ratio: f64,
}

/// Units to buy so that a stop-out loses exactly `risk_percentage` of the account
///
/// size = (balance * risk% / 100) / |entry - stop|
///
/// A stop at the entry price has no defined size; returns 0 in that case.
#[inline(always)]
pub fn units_for_risk(account_balance: f64, risk_percentage: f64, entry_price: f64, stop_loss: f64) -> f64 {
    let risk_amount = account_balance * (risk_percentage / 100.0);
    let price_risk = (entry_price - stop_loss).abs();
    if price_risk == 0.0 {
        return 0.0;
    }
    risk_amount / price_risk
}

pub fn calculate_position_size(input: &PositionSizeInput) -> PositionSize {
    let position_size = units_for_risk(
        input.account_balance,
        input.risk_percentage,
        input.entry_price,
        input.stop_loss,
    );
    let risk_amount = input.account_balance * (input.risk_percentage / 100.0);
    let price_risk = (input.entry_price - input.stop_loss).abs();
    let potential_profit = (input.target_price - input.entry_price).abs();
    let risk_reward_ratio = if price_risk > 0.0 {
        potential_profit / price_risk
    } else {
        0.0
    };

    PositionSize {
        position_size,
        position_value: position_size * input.entry_price,
        risk_amount,
        price_risk,
        potential_profit,
        risk_reward_ratio,
    }
}
