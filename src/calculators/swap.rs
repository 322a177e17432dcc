use serde::{Deserialize, Serialize};

use crate::calculators::lots::{LotType, PositionSide};

/// Rollover days charged per calendar year: 365 plus two extra days for each
/// of the 52 triple-swap Wednesdays.
pub const ANNUAL_SWAP_DAYS: f64 = 365.0 + 52.0 * 2.0;

/// Longest holding period shown on the cumulative swap curve.
pub const MAX_CURVE_DAYS: u32 = 90;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapInput {
    pub position_lots: f64,
    #[serde(default)]
    pub lot_type: LotType,
    pub side: PositionSide,
    pub long_swap_rate: f64,  // pips per day, negative = cost
    pub short_swap_rate: f64, // pips per day, negative = cost
    pub broker_markup_pct: f64,
    pub days_held: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapAnalysis {
    pub base_swap_rate: f64,
    pub swap_with_markup: f64,
    pub pip_value: f64,
    pub daily_swap: f64,
    pub wednesdays: u32,
    pub swap_days: u64,
    pub total_swap: f64,
    pub annual_swap: f64,
    pub broker_revenue_daily: f64,
    pub broker_revenue_total: f64,
}

/// Rollover days charged for holding `days` calendar days, counting one
/// triple-swap Wednesday per full week. Counted in `u64`; the full `u32`
/// input range fits.
pub fn swap_days(days: u32) -> u64 {
    let wednesdays = u64::from(days / 7);
    u64::from(days) + wednesdays * 2
}

pub fn analyze_swap(input: &SwapInput) -> SwapAnalysis {
    let base_swap_rate = match input.side {
        PositionSide::Long => input.long_swap_rate,
        PositionSide::Short => input.short_swap_rate,
    };
    let swap_with_markup = base_swap_rate * (1.0 + input.broker_markup_pct / 100.0);
    let pip_value = input.lot_type.usd_pip_value(input.position_lots);

    let daily_swap = swap_with_markup * pip_value;
    let charged_days = swap_days(input.days_held);

    let broker_revenue_daily = daily_swap - base_swap_rate * pip_value;

    SwapAnalysis {
        base_swap_rate,
        swap_with_markup,
        pip_value,
        daily_swap,
        wednesdays: input.days_held / 7,
        swap_days: charged_days,
        total_swap: daily_swap * charged_days as f64,
        annual_swap: daily_swap * ANNUAL_SWAP_DAYS,
        broker_revenue_daily,
        broker_revenue_total: broker_revenue_daily * charged_days as f64,
    }
}

/// Cumulative swap for each day `1..=min(days_held, 90)` as `(day, amount)`.
pub fn cumulative_swap_curve(daily_swap: f64, days_held: u32) -> Vec<(u32, f64)> {
    (1..=days_held.min(MAX_CURVE_DAYS))
        .map(|day| (day, daily_swap * swap_days(day) as f64))
        .collect()
}
