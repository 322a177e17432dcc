use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub shares: f64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingExposure {
    pub symbol: String,
    pub value: f64,
    pub weight_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioExposure {
    pub total_value: f64,
    pub position_count: usize,
    /// Weight of the largest holding, a simple concentration measure.
    pub largest_weight_pct: f64,
    pub holdings: Vec<HoldingExposure>,
}

pub fn portfolio_exposure(holdings: &[Holding]) -> PortfolioExposure {
    let values: Vec<f64> = holdings.iter().map(|h| h.shares * h.price).collect();
    let total_value: f64 = values.iter().sum();

    let holdings: Vec<HoldingExposure> = holdings
        .iter()
        .zip(values)
        .map(|(h, value)| HoldingExposure {
            symbol: h.symbol.clone(),
            value,
            weight_pct: if total_value > 0.0 {
                value / total_value * 100.0
            } else {
                0.0
            },
        })
        .collect();

    let largest_weight_pct = holdings
        .iter()
        .map(|h| h.weight_pct)
        .fold(0.0_f64, f64::max);

    PortfolioExposure {
        total_value,
        position_count: holdings.len(),
        largest_weight_pct,
        holdings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holding(symbol: &str, shares: f64, price: f64) -> Holding {
        Holding {
            symbol: symbol.into(),
            shares,
            price,
        }
    }

    #[test]
    fn test_weights() {
        let exposure = portfolio_exposure(&[
            holding("AAA", 100.0, 30.0),
            holding("BBB", 50.0, 100.0),
            holding("CCC", 10.0, 200.0),
        ]);
        assert_eq!(exposure.total_value, 10_000.0);
        assert_eq!(exposure.position_count, 3);
        assert!((exposure.holdings[0].weight_pct - 30.0).abs() < 1e-9);
        assert_eq!(exposure.holdings[1].weight_pct, 50.0);
        assert_eq!(exposure.largest_weight_pct, 50.0);
    }

    #[test]
    fn test_empty_and_zero_value() {
        let empty = portfolio_exposure(&[]);
        assert_eq!(empty.total_value, 0.0);
        assert_eq!(empty.largest_weight_pct, 0.0);

        let zero = portfolio_exposure(&[holding("AAA", 0.0, 10.0)]);
        assert_eq!(zero.holdings[0].weight_pct, 0.0);
    }
}
