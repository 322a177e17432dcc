pub mod classifier;
pub mod summary;
pub mod types;

pub use classifier::{classify, BookingClassifier, BookingThresholds};
pub use summary::{summarize, BatchSummary};
pub use types::{
    BookingReason, BrokerPolicy, ClientActivity, ClientDecision, Recommendation, RiskTolerance,
};

use std::path::Path;

use crate::error::RiskResult;

/// Reads a JSON array of client activity records.
pub fn load_clients(path: impl AsRef<Path>) -> RiskResult<Vec<ClientActivity>> {
    let raw = std::fs::read_to_string(path)?;
    parse_clients(&raw)
}

pub fn parse_clients(raw: &str) -> RiskResult<Vec<ClientActivity>> {
    Ok(serde_json::from_str(raw)?)
}
