use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::RiskError;

/// Units of base currency per standard lot.
pub const STANDARD_LOT_UNITS: f64 = 100_000.0;

/// Dollar value of one pip on one standard lot of a USD-quoted pair.
pub const USD_PIP_VALUE_PER_STANDARD_LOT: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LotType {
    #[default]
    Standard,
    Mini,
    Micro,
}

impl LotType {
    pub fn contract_size(self) -> f64 {
        match self {
            Self::Standard => 100_000.0,
            Self::Mini => 10_000.0,
            Self::Micro => 1_000.0,
        }
    }

    /// Pip value in USD for `lots` of a USD-quoted pair.
    pub fn usd_pip_value(self, lots: f64) -> f64 {
        USD_PIP_VALUE_PER_STANDARD_LOT * (self.contract_size() / STANDARD_LOT_UNITS) * lots
    }
}

impl FromStr for LotType {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "mini" => Ok(Self::Mini),
            "micro" => Ok(Self::Micro),
            _ => Err(RiskError::UnknownLotType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionSide {
    Long,
    Short,
}

impl FromStr for PositionSide {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" | "buy" => Ok(Self::Long),
            "short" | "sell" => Ok(Self::Short),
            _ => Err(RiskError::UnknownSide(s.to_string())),
        }
    }
}
