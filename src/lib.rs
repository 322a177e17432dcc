//! Broker risk desk: client booking classification (A-Book / B-Book / Hybrid)
//! plus the trader and broker calculators that sit around it: position
//! sizing, risk/reward, exposure, Monte Carlo VaR, margin, swap, pip value and
//! broker ROI.

pub mod analytics;
pub mod booking;
pub mod calculators;
pub mod config;
pub mod error;

pub use error::{RiskError, RiskResult};
