use serde::{Deserialize, Serialize};

use crate::calculators::lots::LotType;

pub const STANDARD_PIP_SIZE: f64 = 0.0001;
pub const JPY_PIP_SIZE: f64 = 0.01;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipInput {
    pub currency_pair: String, // e.g. "EUR/USD"
    pub account_currency: String,
    pub current_price: f64,
    pub position_lots: f64,
    #[serde(default)]
    pub lot_type: LotType,
    pub spread_pips: f64,
    pub commission_per_lot: f64,
    pub monthly_volume_lots: f64,
    pub pip_movement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipAnalysis {
    pub pip_size: f64,
    pub pip_value: f64,
    pub spread_cost: f64,
    pub total_commission: f64,
    pub total_cost: f64,
    pub gross_pnl: f64,
    pub net_pnl: f64,
    pub monthly_spread_revenue: f64,
    pub monthly_commission_revenue: f64,
    pub monthly_total_revenue: f64,
    pub annual_revenue: f64,
    pub cost_pct_of_position: f64,
    pub breakeven_pips: f64,
}

pub fn is_jpy_pair(currency_pair: &str) -> bool {
    currency_pair.to_ascii_uppercase().contains("JPY")
}

pub fn pip_size(currency_pair: &str) -> f64 {
    if is_jpy_pair(currency_pair) {
        JPY_PIP_SIZE
    } else {
        STANDARD_PIP_SIZE
    }
}

/// Value of a one-pip move in account currency.
///
/// USD accounts trading non-JPY pairs use the flat $10 per standard lot;
/// everything else converts the pip through the current price.
pub fn pip_value(
    currency_pair: &str,
    account_currency: &str,
    current_price: f64,
    lot_type: LotType,
    lots: f64,
) -> f64 {
    let usd_account = account_currency.eq_ignore_ascii_case("USD");
    if usd_account && !is_jpy_pair(currency_pair) {
        return lot_type.usd_pip_value(lots);
    }
    if current_price <= 0.0 {
        return 0.0;
    }
    (pip_size(currency_pair) / current_price) * lot_type.contract_size() * lots
}

pub fn analyze_pip(input: &PipInput) -> PipAnalysis {
    let contract_size = input.lot_type.contract_size();
    let pip_value = pip_value(
        &input.currency_pair,
        &input.account_currency,
        input.current_price,
        input.lot_type,
        input.position_lots,
    );

    let spread_cost = input.spread_pips * pip_value;
    let total_commission = input.commission_per_lot * input.position_lots;
    let total_cost = spread_cost + total_commission;

    let gross_pnl = input.pip_movement * pip_value;

    let monthly_spread_revenue = input.spread_pips * pip_value * input.monthly_volume_lots;
    let monthly_commission_revenue = input.commission_per_lot * input.monthly_volume_lots;
    let monthly_total_revenue = monthly_spread_revenue + monthly_commission_revenue;

    let notional = contract_size * input.position_lots * input.current_price;

    PipAnalysis {
        pip_size: pip_size(&input.currency_pair),
        pip_value,
        spread_cost,
        total_commission,
        total_cost,
        gross_pnl,
        net_pnl: gross_pnl - total_cost,
        monthly_spread_revenue,
        monthly_commission_revenue,
        monthly_total_revenue,
        annual_revenue: monthly_total_revenue * 12.0,
        cost_pct_of_position: if notional > 0.0 { total_cost / notional * 100.0 } else { 0.0 },
        breakeven_pips: if pip_value > 0.0 { total_cost / pip_value } else { 0.0 },
    }
}

/// Net P&L after costs for pip moves from -200 to +200 in steps of 10.
pub fn pnl_curve(pip_value: f64, total_cost: f64) -> Vec<(i32, f64)> {
    (-200..=200)
        .step_by(10)
        .map(|pips| (pips, pips as f64 * pip_value - total_cost))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eurusd() -> PipInput {
        PipInput {
            currency_pair: "EUR/USD".into(),
            account_currency: "USD".into(),
            current_price: 1.25,
            position_lots: 1.0,
            lot_type: LotType::Standard,
            spread_pips: 2.0,
            commission_per_lot: 7.0,
            monthly_volume_lots: 100.0,
            pip_movement: 50.0,
        }
    }

    #[test]
    fn test_usd_quoted_pair() {
        let a = analyze_pip(&eurusd());
        assert_eq!(a.pip_value, 10.0);
        assert_eq!(a.spread_cost, 20.0);
        assert_eq!(a.total_commission, 7.0);
        assert_eq!(a.total_cost, 27.0);
        assert_eq!(a.gross_pnl, 500.0);
        assert_eq!(a.net_pnl, 473.0);
        assert_eq!(a.monthly_spread_revenue, 2000.0);
        assert_eq!(a.monthly_commission_revenue, 700.0);
        assert_eq!(a.annual_revenue, 32_400.0);
        assert!((a.breakeven_pips - 2.7).abs() < 1e-12);
    }

    #[test]
    fn test_jpy_pair_converts_through_price() {
        let value = pip_value("USD/JPY", "USD", 150.0, LotType::Standard, 1.0);
        assert!((value - 1000.0 / 150.0).abs() < 1e-9);
        assert_eq!(pip_size("usd/jpy"), JPY_PIP_SIZE);
    }

    #[test]
    fn test_non_usd_account() {
        let value = pip_value("EUR/USD", "EUR", 1.25, LotType::Mini, 1.0);
        assert!((value - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_losing_move() {
        let mut input = eurusd();
        input.pip_movement = -30.0;
        let a = analyze_pip(&input);
        assert_eq!(a.net_pnl, -327.0);
    }

    #[test]
    fn test_pnl_curve() {
        let curve = pnl_curve(10.0, 27.0);
        assert_eq!(curve.len(), 41);
        assert_eq!(curve[0], (-200, -2027.0));
        assert_eq!(curve[20], (0, -27.0));
    }
}
