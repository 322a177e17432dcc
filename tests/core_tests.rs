use broker_risk_desk::booking::{
    classify, summarize, BookingClassifier, BookingReason, BookingThresholds, BrokerPolicy,
    ClientActivity, Recommendation, RiskTolerance,
};

const ALL_TOLERANCES: [RiskTolerance; 3] = [
    RiskTolerance::Conservative,
    RiskTolerance::Moderate,
    RiskTolerance::Aggressive,
];

fn activity(
    total_trades: u32,
    winning_trades: u32,
    avg_trade_size: f64,
    gross_pnl: f64,
    commission_paid: f64,
) -> ClientActivity {
    ClientActivity {
        client_id: "C001".into(),
        total_trades,
        winning_trades,
        avg_trade_size,
        total_volume: 50.0,
        avg_hold_time_hours: 24.0,
        gross_pnl,
        commission_paid,
    }
}

fn policy(risk_tolerance: RiskTolerance) -> BrokerPolicy {
    BrokerPolicy {
        lp_commission_cost_per_lot: 5.0,
        risk_tolerance,
    }
}

#[test]
fn test_high_win_rate_is_toxic() {
    let client = activity(50, 35, 1.0, 1000.0, 350.0);
    let decision = classify(&client, &policy(RiskTolerance::Moderate));
    assert_eq!(decision.win_rate, 70.0);
    assert!(decision.is_toxic);
    assert_eq!(decision.recommendation, Recommendation::ABook);
    assert_eq!(decision.reason, BookingReason::ToxicFlow);
    assert_eq!(decision.reason.as_str(), "Toxic flow - hedge with LP");
}

#[test]
fn test_losing_client_internalized_under_moderate() {
    let client = activity(50, 15, 1.0, -500.0, 350.0);
    let decision = classify(&client, &policy(RiskTolerance::Moderate));
    assert_eq!(decision.win_rate, 30.0);
    assert!(!decision.is_toxic);
    assert_eq!(decision.recommendation, Recommendation::BBook);
    assert_eq!(decision.reason, BookingReason::ProfitableClientPattern);
}

#[test]
fn test_losing_client_hedged_under_conservative() {
    let client = activity(50, 15, 1.0, -500.0, 350.0);
    let decision = classify(&client, &policy(RiskTolerance::Conservative));
    assert_eq!(decision.recommendation, Recommendation::ABook);
    assert_eq!(decision.reason, BookingReason::ConservativePolicy);
}

#[test]
fn test_oversized_client_always_hedged() {
    // 6 lots average exceeds the default toxic size cutoff, so the toxic rule fires first
    let client = activity(50, 25, 6.0, 200.0, 300.0);
    for risk in ALL_TOLERANCES {
        let decision = classify(&client, &policy(risk));
        assert_eq!(decision.win_rate, 50.0);
        assert_eq!(decision.recommendation, Recommendation::ABook);
        assert_eq!(decision.reason, BookingReason::ToxicFlow);
    }
}

#[test]
fn test_oversized_client_reaches_size_rule_when_not_toxic() {
    let classifier = BookingClassifier::new(BookingThresholds {
        toxic_trade_size: 20.0,
        ..BookingThresholds::default()
    });
    let client = activity(50, 25, 6.0, 200.0, 300.0);
    for risk in ALL_TOLERANCES {
        let decision = classifier.classify(&client, &policy(risk));
        assert!(!decision.is_toxic);
        assert_eq!(decision.recommendation, Recommendation::ABook);
        assert_eq!(decision.reason, BookingReason::LargePositionSize);
    }
}

#[test]
fn test_revenue_comparison_by_tolerance() {
    let client = activity(50, 25, 1.0, -100.0, 100.0);

    let aggressive = classify(&client, &policy(RiskTolerance::Aggressive));
    assert_eq!(aggressive.a_book_revenue, -150.0);
    assert_eq!(aggressive.b_book_revenue, 200.0);
    assert_eq!(aggressive.recommendation, Recommendation::BBook);
    assert_eq!(aggressive.reason, BookingReason::MoreProfitableToInternalize);

    let conservative = classify(&client, &policy(RiskTolerance::Conservative));
    assert_eq!(conservative.recommendation, Recommendation::Hybrid);
    assert_eq!(conservative.reason, BookingReason::MoreProfitableToInternalize);
}

#[test]
fn test_better_a_book_economics() {
    // A = 400 - 50*5 = 150, B = 400 - 300 = 100
    let client = activity(50, 30, 1.0, 300.0, 400.0);
    let decision = classify(&client, &policy(RiskTolerance::Aggressive));
    assert_eq!(decision.recommendation, Recommendation::ABook);
    assert_eq!(decision.reason, BookingReason::BetterABookEconomics);
}

#[test]
fn test_toxic_ignores_policy_and_revenue() {
    let mut client = activity(10, 9, 1.0, -100_000.0, 10_000.0);
    client.avg_hold_time_hours = 0.25;
    for risk in ALL_TOLERANCES {
        for lp_cost in [0.0, 5.0, 500.0] {
            let p = BrokerPolicy {
                lp_commission_cost_per_lot: lp_cost,
                risk_tolerance: risk,
            };
            let decision = classify(&client, &p);
            assert_eq!(decision.recommendation, Recommendation::ABook);
            assert_eq!(decision.reason, BookingReason::ToxicFlow);
        }
    }
}

#[test]
fn test_zero_trades_does_not_panic() {
    let client = activity(0, 0, 1.0, -100.0, 0.0);
    let decision = classify(&client, &policy(RiskTolerance::Moderate));
    assert_eq!(decision.win_rate, 0.0);
    assert!(!decision.is_toxic);
    // a 0% win rate falls into the losing-client rule
    assert_eq!(decision.reason, BookingReason::ProfitableClientPattern);
}

#[test]
fn test_classification_is_idempotent() {
    let client = activity(50, 25, 1.0, -100.0, 100.0);
    let p = policy(RiskTolerance::Conservative);
    assert_eq!(classify(&client, &p), classify(&client, &p));
}

#[test]
fn test_win_rate_boundary_at_45() {
    // exactly 45% skips the losing-client rule
    let at_boundary = activity(100, 45, 1.0, -100.0, 100.0);
    let decision = classify(&at_boundary, &policy(RiskTolerance::Conservative));
    assert_eq!(decision.win_rate, 45.0);
    assert_ne!(decision.reason, BookingReason::ConservativePolicy);
    assert_eq!(decision.reason, BookingReason::MoreProfitableToInternalize);

    // 4499 / 10000 = 44.99%
    let below = activity(10_000, 4_499, 1.0, -100.0, 100.0);
    let decision = classify(&below, &policy(RiskTolerance::Conservative));
    assert!(decision.win_rate < 45.0);
    assert_eq!(decision.reason, BookingReason::ConservativePolicy);
}

#[test]
fn test_trade_size_boundary_at_5() {
    let classifier = BookingClassifier::new(BookingThresholds {
        toxic_trade_size: 20.0,
        ..BookingThresholds::default()
    });
    let p = policy(RiskTolerance::Aggressive);

    let at_limit = activity(50, 25, 5.0, -100.0, 100.0);
    assert_ne!(classifier.classify(&at_limit, &p).reason, BookingReason::LargePositionSize);

    let above = activity(50, 25, 5.0001, -100.0, 100.0);
    assert_eq!(classifier.classify(&above, &p).reason, BookingReason::LargePositionSize);

    // with default thresholds 5 lots is fine and 5.0001 is toxic
    assert!(!classify(&at_limit, &p).is_toxic);
    assert!(classify(&above, &p).is_toxic);
}

#[test]
fn test_batch_summary_from_scenarios() {
    let clients = vec![
        activity(50, 35, 1.0, 1000.0, 350.0), // toxic -> A-Book, A = 350 - 250 = 100
        activity(50, 15, 1.0, -500.0, 350.0), // B-Book, B = 850
        activity(50, 25, 1.0, -100.0, 100.0), // B-Book, B = 200
    ];
    let classifier = BookingClassifier::default();
    let decisions = classifier.classify_batch(&clients, &policy(RiskTolerance::Aggressive));
    let summary = summarize(&decisions);

    assert_eq!(summary.total_clients, 3);
    assert_eq!(summary.toxic_count, 1);
    assert_eq!(summary.a_book_count, 1);
    assert_eq!(summary.b_book_count, 2);
    assert_eq!(summary.hybrid_count, 0);
    assert_eq!(summary.a_book_total_revenue, 100.0);
    assert_eq!(summary.b_book_total_revenue, 1050.0);
    assert_eq!(summary.projected_total_revenue, 1150.0);
}

#[test]
fn test_hybrid_excluded_from_revenue() {
    let clients = vec![activity(50, 25, 1.0, -100.0, 100.0)];
    let decisions =
        BookingClassifier::default().classify_batch(&clients, &policy(RiskTolerance::Conservative));
    let summary = summarize(&decisions);
    assert_eq!(summary.hybrid_count, 1);
    assert_eq!(summary.projected_total_revenue, 0.0);
}

#[test]
fn test_batch_decisions_are_independent() {
    let a = activity(50, 15, 1.0, -500.0, 350.0);
    let b = activity(50, 35, 1.0, 1000.0, 350.0);
    let p = policy(RiskTolerance::Moderate);
    let classifier = BookingClassifier::default();

    let forward = classifier.classify_batch(&[a.clone(), b.clone()], &p);
    let reverse = classifier.classify_batch(&[b, a], &p);
    assert_eq!(forward[0], reverse[1]);
    assert_eq!(forward[1], reverse[0]);
}
