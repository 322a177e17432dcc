use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculators::lots::LotType;
use crate::error::{RiskError, RiskResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginInput {
    pub account_equity: f64,
    pub leverage: f64,
    pub margin_call_level: f64, // percent
    pub stop_out_level: f64,    // percent
    pub position_lots: f64,
    #[serde(default)]
    pub lot_type: LotType,
    pub current_price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarginStatus {
    Healthy,
    MarginCall,
    StopOut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarginAnalysis {
    pub position_value: f64,
    pub required_margin: f64,
    pub free_margin: f64,
    /// Equity / used margin in percent; 0 when nothing is margined.
    pub margin_level: f64,
    pub max_lots: f64,
    pub margin_call_equity: f64,
    pub stop_out_equity: f64,
    pub loss_to_margin_call: f64,
    pub status: MarginStatus,
}

pub fn analyze_margin(input: &MarginInput) -> RiskResult<MarginAnalysis> {
    if input.leverage <= 0.0 {
        return Err(RiskError::InvalidInput("leverage must be positive".to_string()));
    }
    if input.current_price <= 0.0 {
        return Err(RiskError::InvalidInput("current_price must be positive".to_string()));
    }

    let contract_size = input.lot_type.contract_size();
    let position_value = input.position_lots * contract_size * input.current_price;

    let required_margin = position_value / input.leverage;
    let used_margin = required_margin;
    let free_margin = input.account_equity - used_margin;

    let margin_level = if used_margin > 0.0 {
        input.account_equity / used_margin * 100.0
    } else {
        0.0
    };

    let max_position_value = input.account_equity * input.leverage;
    let max_lots = max_position_value / (contract_size * input.current_price);

    let margin_call_equity = (input.margin_call_level / 100.0) * used_margin;
    let stop_out_equity = (input.stop_out_level / 100.0) * used_margin;

    let status = if used_margin <= 0.0 {
        MarginStatus::Healthy
    } else if margin_level <= input.stop_out_level {
        MarginStatus::StopOut
    } else if margin_level <= input.margin_call_level {
        MarginStatus::MarginCall
    } else {
        MarginStatus::Healthy
    };

    if status != MarginStatus::Healthy {
        warn!(
            "⚠️ Margin level {:.1}% breaches {:?} threshold",
            margin_level, status
        );
    }

    Ok(MarginAnalysis {
        position_value,
        required_margin,
        free_margin,
        margin_level,
        max_lots,
        margin_call_equity,
        stop_out_equity,
        loss_to_margin_call: input.account_equity - margin_call_equity,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(equity: f64, lots: f64) -> MarginInput {
        MarginInput {
            account_equity: equity,
            leverage: 100.0,
            margin_call_level: 100.0,
            stop_out_level: 50.0,
            position_lots: lots,
            lot_type: LotType::Standard,
            current_price: 1.25,
        }
    }

    #[test]
    fn test_margin_requirements() {
        let a = analyze_margin(&input(10_000.0, 1.0)).unwrap();
        assert_eq!(a.position_value, 125_000.0);
        assert_eq!(a.required_margin, 1_250.0);
        assert_eq!(a.free_margin, 8_750.0);
        assert_eq!(a.margin_level, 800.0);
        assert_eq!(a.max_lots, 8.0);
        assert_eq!(a.margin_call_equity, 1_250.0);
        assert_eq!(a.stop_out_equity, 625.0);
        assert_eq!(a.loss_to_margin_call, 8_750.0);
        assert_eq!(a.status, MarginStatus::Healthy);
    }

    #[test]
    fn test_margin_call_and_stop_out() {
        // used margin 1250 -> level 80%
        let call = analyze_margin(&input(1_000.0, 1.0)).unwrap();
        assert_eq!(call.status, MarginStatus::MarginCall);

        // level 40%
        let stop = analyze_margin(&input(500.0, 1.0)).unwrap();
        assert_eq!(stop.status, MarginStatus::StopOut);
        assert!(stop.free_margin < 0.0);
    }

    #[test]
    fn test_no_position() {
        let a = analyze_margin(&input(10_000.0, 0.0)).unwrap();
        assert_eq!(a.margin_level, 0.0);
        assert_eq!(a.status, MarginStatus::Healthy);
        assert_eq!(a.free_margin, 10_000.0);
    }

    #[test]
    fn test_invalid_leverage() {
        let mut i = input(10_000.0, 1.0);
        i.leverage = 0.0;
        assert!(matches!(analyze_margin(&i), Err(RiskError::InvalidInput(_))));
    }
}
