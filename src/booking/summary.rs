use serde::{Deserialize, Serialize};
use tracing::info;

use crate::booking::types::{ClientDecision, Recommendation};

/// Batch-level counts and revenue totals over a set of decisions.
///
/// Each client contributes only the revenue of the book it was assigned to.
/// Hybrid clients are counted but add nothing to either revenue total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_clients: usize,
    pub toxic_count: usize,
    pub a_book_count: usize,
    pub b_book_count: usize,
    pub hybrid_count: usize,
    pub a_book_total_revenue: f64,
    pub b_book_total_revenue: f64,
    pub projected_total_revenue: f64,
}

pub fn summarize(decisions: &[ClientDecision]) -> BatchSummary {
    let mut summary = BatchSummary {
        total_clients: decisions.len(),
        ..BatchSummary::default()
    };

    for decision in decisions {
        if decision.is_toxic {
            summary.toxic_count += 1;
        }
        match decision.recommendation {
            Recommendation::ABook => {
                summary.a_book_count += 1;
                summary.a_book_total_revenue += decision.a_book_revenue;
            }
            Recommendation::BBook => {
                summary.b_book_count += 1;
                summary.b_book_total_revenue += decision.b_book_revenue;
            }
            // TODO: decide how hybrid flow splits revenue between books; counted only for now
            Recommendation::Hybrid => summary.hybrid_count += 1,
        }
    }

    summary.projected_total_revenue = summary.a_book_total_revenue + summary.b_book_total_revenue;

    info!(
        "📊 Booking summary: {} clients | A-Book {} (${:.2}) | B-Book {} (${:.2}) | Hybrid {} | projected ${:.2}",
        summary.total_clients,
        summary.a_book_count,
        summary.a_book_total_revenue,
        summary.b_book_count,
        summary.b_book_total_revenue,
        summary.hybrid_count,
        summary.projected_total_revenue
    );

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::types::BookingReason;

    fn decision(id: &str, rec: Recommendation, a: f64, b: f64) -> ClientDecision {
        ClientDecision {
            client_id: id.into(),
            recommendation: rec,
            reason: BookingReason::BetterABookEconomics,
            a_book_revenue: a,
            b_book_revenue: b,
            win_rate: 50.0,
            is_toxic: false,
        }
    }

    #[test]
    fn test_empty_batch() {
        let summary = summarize(&[]);
        assert_eq!(summary, BatchSummary::default());
    }

    #[test]
    fn test_uses_assigned_revenue_only() {
        let decisions = vec![
            decision("a", Recommendation::ABook, 100.0, 900.0),
            decision("b", Recommendation::BBook, 900.0, 250.0),
            decision("c", Recommendation::ABook, -50.0, 10.0),
        ];
        let summary = summarize(&decisions);
        assert_eq!(summary.a_book_count, 2);
        assert_eq!(summary.b_book_count, 1);
        assert_eq!(summary.a_book_total_revenue, 50.0);
        assert_eq!(summary.b_book_total_revenue, 250.0);
        assert_eq!(summary.projected_total_revenue, 300.0);
    }

    #[test]
    fn test_hybrid_contributes_no_revenue() {
        let decisions = vec![
            decision("h", Recommendation::Hybrid, 500.0, 800.0),
            decision("b", Recommendation::BBook, 0.0, 40.0),
        ];
        let summary = summarize(&decisions);
        assert_eq!(summary.hybrid_count, 1);
        assert_eq!(summary.total_clients, 2);
        assert_eq!(summary.a_book_total_revenue, 0.0);
        assert_eq!(summary.projected_total_revenue, 40.0);
    }

    #[test]
    fn test_counts_toxic_clients() {
        let mut toxic = decision("t", Recommendation::ABook, 10.0, 0.0);
        toxic.is_toxic = true;
        let summary = summarize(&[toxic, decision("n", Recommendation::BBook, 0.0, 5.0)]);
        assert_eq!(summary.toxic_count, 1);
    }
}
