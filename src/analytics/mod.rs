pub mod api;
pub mod roi;

pub use api::{router, run_server, SharedConfig};
pub use roi::{analyze_roi, churn_sensitivity, BrokerProfile, RoiAnalysis, RoiAssumptions};
