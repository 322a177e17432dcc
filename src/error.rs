use thiserror::Error;

#[derive(Debug, Error)]
pub enum RiskError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown risk tolerance '{0}' (expected conservative, moderate or aggressive)")]
    UnknownRiskTolerance(String),

    #[error("unknown lot type '{0}' (expected standard, mini or micro)")]
    UnknownLotType(String),

    #[error("unknown position side '{0}' (expected long or short)")]
    UnknownSide(String),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse input: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RiskResult<T> = Result<T, RiskError>;
