//! FILENAME: core/roster-engine/src/stats.rs
//! PURPOSE: Aggregate statistics over filtered and selected record sets.
//! CONTEXT: Recomputed in full whenever the input set changes; record counts
//! are bounded (low thousands) so there is no incremental update path.
//! Wage, profit, and age aggregates only consider positive values: zeros and
//! absent fields are data-entry gaps, not real figures, and must not drag
//! averages down.

use chrono::NaiveDateTime;
use engine::{expiring_within_window, is_active_status, Record};
use serde::Serialize;

// ============================================================================
// TABLE STATS
// ============================================================================

/// Summary figures for the footer of a list view, computed over the
/// currently filtered set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStats {
    pub total: usize,
    pub active_count: usize,
    /// Mean hourly wage over records with a positive wage, rounded to the
    /// nearest integer; 0 when no record qualifies.
    pub average_hourly_wage: i64,
    pub visa_expiring_count: usize,
}

/// Collects the positive numeric values of a logical field.
fn positive_values(records: &[Record], key: &str) -> Vec<f64> {
    records
        .iter()
        .filter_map(|r| r.number(key))
        .filter(|n| *n > 0.0)
        .collect()
}

fn rounded_mean(values: &[f64]) -> i64 {
    if values.is_empty() {
        return 0;
    }
    let sum: f64 = values.iter().sum();
    (sum / values.len() as f64).round() as i64
}

/// Computes footer statistics for a filtered record set.
pub fn compute_stats(records: &[Record], now: NaiveDateTime) -> TableStats {
    let wages = positive_values(records, "hourlyWage");
    TableStats {
        total: records.len(),
        active_count: records
            .iter()
            .filter(|r| is_active_status(&r.text("status")))
            .count(),
        average_hourly_wage: rounded_mean(&wages),
        visa_expiring_count: records
            .iter()
            .filter(|r| expiring_within_window(&r.text("visaExpiry"), now))
            .count(),
    }
}

// ============================================================================
// SELECTION STATS
// ============================================================================

/// Summary figures for the selection toolbar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionStats {
    pub count: usize,
    /// Mean over positive wages in the selection, rounded; 0 when none.
    pub average_hourly_wage: i64,
    /// Sum over positive profit margins only.
    pub total_profit_margin: f64,
    /// Mean over positive ages; 0.0 when none.
    pub average_age: f64,
}

/// Computes selection statistics, or `None` for an empty selection.
/// Callers rely on the distinction: `None` means "nothing selected", while
/// a selection of records without usable figures yields zeros.
pub fn compute_selection_stats(selected: &[Record]) -> Option<SelectionStats> {
    if selected.is_empty() {
        return None;
    }
    let wages = positive_values(selected, "hourlyWage");
    let ages = positive_values(selected, "age");
    let profit: f64 = positive_values(selected, "profitMargin").iter().sum();
    let average_age = if ages.is_empty() {
        0.0
    } else {
        ages.iter().sum::<f64>() / ages.len() as f64
    };
    Some(SelectionStats {
        count: selected.len(),
        average_hourly_wage: rounded_mean(&wages),
        total_profit_margin: profit,
        average_age,
    })
}
