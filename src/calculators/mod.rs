pub mod exposure;
pub mod lots;
pub mod margin;
pub mod pip;
pub mod position_sizing;
pub mod risk_reward;
pub mod stats;
pub mod swap;
pub mod var;
