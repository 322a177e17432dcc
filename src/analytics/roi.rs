use serde::{Deserialize, Serialize};

/// Platform assumptions used to project the value delivered to a broker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoiAssumptions {
    pub churn_reduction_pct: f64,
    pub support_reduction_pct: f64,
    pub platform_cost_annual: f64,
}

impl Default for RoiAssumptions {
    fn default() -> Self {
        Self {
            churn_reduction_pct: 25.0,
            support_reduction_pct: 56.0,
            platform_cost_annual: 34_800.0, // $2,900/mo
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerProfile {
    pub active_clients: f64,
    pub baseline_churn_pct: f64, // 90-day churn
    pub client_acquisition_cost: f64,
    pub support_tickets_per_month: f64,
    pub cost_per_ticket: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiAnalysis {
    pub churned_clients_baseline: f64,
    pub clients_saved: f64,
    pub churn_savings: f64,
    pub support_savings_annual: f64,
    pub total_annual_value: f64,
    pub platform_cost_annual: f64,
    pub net_benefit: f64,
    pub roi_pct: f64,
}

pub fn analyze_roi(profile: &BrokerProfile, assumptions: &RoiAssumptions) -> RoiAnalysis {
    let churned_clients_baseline = profile.active_clients * (profile.baseline_churn_pct / 100.0);
    let clients_saved = churned_clients_baseline * (assumptions.churn_reduction_pct / 100.0);
    let churn_savings = clients_saved * profile.client_acquisition_cost;

    let support_savings_annual = support_savings(profile, assumptions);
    let total_annual_value = churn_savings + support_savings_annual;

    RoiAnalysis {
        churned_clients_baseline,
        clients_saved,
        churn_savings,
        support_savings_annual,
        total_annual_value,
        platform_cost_annual: assumptions.platform_cost_annual,
        net_benefit: total_annual_value - assumptions.platform_cost_annual,
        roi_pct: roi_ratio(total_annual_value, assumptions.platform_cost_annual) * 100.0,
    }
}

/// ROI ratio for each churn-reduction percentage from 15 to 35.
pub fn churn_sensitivity(profile: &BrokerProfile, assumptions: &RoiAssumptions) -> Vec<(u32, f64)> {
    let churned = profile.active_clients * (profile.baseline_churn_pct / 100.0);
    let support = support_savings(profile, assumptions);
    (15..=35)
        .map(|pct| {
            let churn_savings = churned * (pct as f64 / 100.0) * profile.client_acquisition_cost;
            (pct, roi_ratio(churn_savings + support, assumptions.platform_cost_annual))
        })
        .collect()
}

fn support_savings(profile: &BrokerProfile, assumptions: &RoiAssumptions) -> f64 {
    profile.support_tickets_per_month
        * 12.0
        * profile.cost_per_ticket
        * (assumptions.support_reduction_pct / 100.0)
}

fn roi_ratio(value: f64, cost: f64) -> f64 {
    if cost == 0.0 {
        return 0.0;
    }
    (value - cost) / cost
}
