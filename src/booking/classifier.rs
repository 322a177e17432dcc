use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::booking::types::{
    BookingReason, BrokerPolicy, ClientActivity, ClientDecision, Recommendation, RiskTolerance,
};

pub const DEFAULT_TOXIC_WIN_RATE: f64 = 60.0;
pub const DEFAULT_B_BOOK_MAX_WIN_RATE: f64 = 45.0;
pub const DEFAULT_TOXIC_TRADE_SIZE: f64 = 5.0;
pub const DEFAULT_MAX_TRADE_SIZE: f64 = 5.0;
pub const DEFAULT_MIN_HOLD_TIME_HOURS: f64 = 2.0;

/// Policy thresholds driving the routing rules. All comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookingThresholds {
    /// Win rate (percent) above which flow is considered toxic.
    pub toxic_win_rate: f64,
    /// Win rate (percent) below which a client is a candidate for internalization.
    pub b_book_max_win_rate: f64,
    /// Average trade size (lots) above which flow is considered toxic.
    pub toxic_trade_size: f64,
    /// Average trade size (lots) above which a non-toxic client is still too large to warehouse.
    pub max_trade_size: f64,
    /// Average hold time (hours) below which flow is considered toxic.
    pub min_hold_time_hours: f64,
}

impl Default for BookingThresholds {
    fn default() -> Self {
        Self {
            toxic_win_rate: DEFAULT_TOXIC_WIN_RATE,
            b_book_max_win_rate: DEFAULT_B_BOOK_MAX_WIN_RATE,
            toxic_trade_size: DEFAULT_TOXIC_TRADE_SIZE,
            max_trade_size: DEFAULT_MAX_TRADE_SIZE,
            min_hold_time_hours: DEFAULT_MIN_HOLD_TIME_HOURS,
        }
    }
}

impl BookingThresholds {
    pub fn is_toxic(&self, activity: &ClientActivity) -> bool {
        activity.win_rate() > self.toxic_win_rate
            || activity.avg_trade_size > self.toxic_trade_size
            || activity.avg_hold_time_hours < self.min_hold_time_hours
    }
}

/// Everything a rule may look at, derived once per client.
struct RuleInput<'a> {
    activity: &'a ClientActivity,
    policy: &'a BrokerPolicy,
    thresholds: &'a BookingThresholds,
    win_rate: f64,
    is_toxic: bool,
    a_book_revenue: f64,
    b_book_revenue: f64,
}

type Verdict = (Recommendation, BookingReason);
type Rule = fn(&RuleInput) -> Option<Verdict>;

/// Guard rules in priority order. A client none of them catches is routed by
/// `revenue_comparison`.
const RULES: [(&str, Rule); 3] = [
    ("toxic_flow", toxic_flow),
    ("losing_client", losing_client),
    ("large_position", large_position),
];

fn toxic_flow(input: &RuleInput) -> Option<Verdict> {
    input
        .is_toxic
        .then_some((Recommendation::ABook, BookingReason::ToxicFlow))
}

fn losing_client(input: &RuleInput) -> Option<Verdict> {
    if input.win_rate >= input.thresholds.b_book_max_win_rate {
        return None;
    }
    if input.policy.risk_tolerance.allows_internalization() {
        Some((Recommendation::BBook, BookingReason::ProfitableClientPattern))
    } else {
        Some((Recommendation::ABook, BookingReason::ConservativePolicy))
    }
}

fn large_position(input: &RuleInput) -> Option<Verdict> {
    (input.activity.avg_trade_size > input.thresholds.max_trade_size)
        .then_some((Recommendation::ABook, BookingReason::LargePositionSize))
}

fn revenue_comparison(input: &RuleInput) -> Verdict {
    if input.b_book_revenue > input.a_book_revenue && !input.is_toxic {
        let recommendation = match input.policy.risk_tolerance {
            RiskTolerance::Conservative => Recommendation::Hybrid,
            RiskTolerance::Moderate | RiskTolerance::Aggressive => Recommendation::BBook,
        };
        (recommendation, BookingReason::MoreProfitableToInternalize)
    } else {
        (Recommendation::ABook, BookingReason::BetterABookEconomics)
    }
}

/// Routes clients to A-Book, B-Book or Hybrid.
///
/// Stateless: the same activity and policy always produce the same decision,
/// and clients in a batch never influence each other.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BookingClassifier {
    thresholds: BookingThresholds,
}

impl BookingClassifier {
    pub fn new(thresholds: BookingThresholds) -> Self {
        Self { thresholds }
    }

    pub fn classify(&self, activity: &ClientActivity, policy: &BrokerPolicy) -> ClientDecision {
        let input = RuleInput {
            activity,
            policy,
            thresholds: &self.thresholds,
            win_rate: activity.win_rate(),
            is_toxic: self.thresholds.is_toxic(activity),
            a_book_revenue: activity.a_book_revenue(policy.lp_commission_cost_per_lot),
            b_book_revenue: activity.b_book_revenue(),
        };

        let (rule, (recommendation, reason)) = RULES
            .iter()
            .find_map(|(name, rule)| rule(&input).map(|verdict| (*name, verdict)))
            .unwrap_or_else(|| ("revenue_comparison", revenue_comparison(&input)));

        debug!(
            client_id = %activity.client_id,
            rule,
            win_rate = input.win_rate,
            "{} -> {} ({})",
            activity.client_id,
            recommendation,
            reason
        );

        ClientDecision {
            client_id: activity.client_id.clone(),
            recommendation,
            reason,
            a_book_revenue: input.a_book_revenue,
            b_book_revenue: input.b_book_revenue,
            win_rate: input.win_rate,
            is_toxic: input.is_toxic,
        }
    }

    /// Classifies every client independently, preserving input order.
    pub fn classify_batch(
        &self,
        clients: &[ClientActivity],
        policy: &BrokerPolicy,
    ) -> Vec<ClientDecision> {
        clients.iter().map(|c| self.classify(c, policy)).collect()
    }
}

/// Classifies one client with the default thresholds.
pub fn classify(activity: &ClientActivity, policy: &BrokerPolicy) -> ClientDecision {
    BookingClassifier::default().classify(activity, policy)
}
