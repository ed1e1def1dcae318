//! FILENAME: core/roster-engine/src/filter.rs
//! PURPOSE: The two-stage filter pipeline for roster list views.
//! CONTEXT: A category quick filter runs first, then a free-text global
//! filter over a fixed set of searchable fields. Both stages are pure and
//! order-preserving; the result always equals
//! `text_filter(quick_filter(records, ..), ..)`.

use chrono::NaiveDateTime;
use engine::{expiring_within_window, is_active_status, is_terminated_status, Record};
use serde::{Deserialize, Serialize};

/// Fields the global text filter searches, each resolved through the
/// dual-key accessor so mixed-origin records match under either schema.
pub const SEARCH_FIELD_KEYS: [&str; 4] = ["fullName", "empId", "department", "dispatchCompany"];

// ============================================================================
// QUICK FILTER
// ============================================================================

/// Category quick filter shown as toolbar buttons above the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickFilter {
    /// Pass every record.
    All,
    /// Status matches the active vocabulary.
    Active,
    /// Status matches the terminated vocabulary.
    Terminated,
    /// Visa expires within the alert window (inclusive).
    VisaExpiring,
}

impl Default for QuickFilter {
    fn default() -> Self {
        QuickFilter::All
    }
}

impl QuickFilter {
    /// Pure predicate over a single record.
    /// `now` is injected so expiry checks stay deterministic.
    pub fn matches(&self, record: &Record, now: NaiveDateTime) -> bool {
        match self {
            QuickFilter::All => true,
            QuickFilter::Active => is_active_status(&record.text("status")),
            QuickFilter::Terminated => is_terminated_status(&record.text("status")),
            QuickFilter::VisaExpiring => {
                expiring_within_window(&record.text("visaExpiry"), now)
            }
        }
    }
}

// ============================================================================
// PIPELINE STAGES
// ============================================================================

/// Stage 1: category quick filter. Preserves input order.
pub fn quick_filter(records: &[Record], filter: QuickFilter, now: NaiveDateTime) -> Vec<Record> {
    records
        .iter()
        .filter(|r| filter.matches(r, now))
        .cloned()
        .collect()
}

/// Substring filter over an explicit field-key set. An empty query passes
/// everything; otherwise the lowercased query must appear in at least one of
/// the given fields. Preserves input order.
pub fn text_filter_fields(records: &[Record], keys: &[&str], query: &str) -> Vec<Record> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| {
            keys.iter().any(|key| {
                let value = r.text(key);
                !value.is_empty() && value.to_lowercase().contains(&needle)
            })
        })
        .cloned()
        .collect()
}

/// Stage 2: global text filter over the roster's searchable fields.
pub fn text_filter(records: &[Record], query: &str) -> Vec<Record> {
    text_filter_fields(records, &SEARCH_FIELD_KEYS, query)
}

/// The full pipeline: quick filter, then text filter.
pub fn filter_records(
    records: &[Record],
    filter: QuickFilter,
    query: &str,
    now: NaiveDateTime,
) -> Vec<Record> {
    text_filter(&quick_filter(records, filter, now), query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn staff(id: u32, name: &str, status: &str) -> Record {
        Record::new()
            .with("id", id)
            .with("fullName", name)
            .with("status", status)
    }

    fn sample() -> Vec<Record> {
        vec![
            staff(1, "田中太郎", "現在"),
            staff(2, "鈴木花子", "退社"),
            staff(3, "Tanaka Jiro", "現在").with("visaExpiry", "2026-02-15"),
            staff(4, "佐藤一郎", "在籍").with("visa_expiry", "2027-06-01"),
        ]
    }

    #[test]
    fn test_all_passes_everything_in_order() {
        let records = sample();
        let out = filter_records(&records, QuickFilter::All, "", now());
        assert_eq!(out.len(), 4);
        let ids: Vec<String> = out.iter().map(|r| r.id()).collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_active_and_terminated_categories() {
        let records = sample();
        let active = filter_records(&records, QuickFilter::Active, "", now());
        assert_eq!(active.len(), 3);
        let terminated = filter_records(&records, QuickFilter::Terminated, "", now());
        assert_eq!(terminated.len(), 1);
        assert_eq!(terminated[0].id(), "2");
    }

    #[test]
    fn test_visa_expiring_reads_both_schemas() {
        let records = sample();
        let expiring = filter_records(&records, QuickFilter::VisaExpiring, "", now());
        // Record 3 expires within 90 days; record 4 (snake_case key) does not,
        // but the accessor still resolved its date. Records without a date
        // never match.
        assert_eq!(expiring.len(), 1);
        assert_eq!(expiring[0].id(), "3");
    }

    #[test]
    fn test_text_filter_is_case_insensitive() {
        let records = sample();
        let out = filter_records(&records, QuickFilter::All, "tanaka", now());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id(), "3");
    }

    #[test]
    fn test_text_filter_searches_dual_keyed_fields() {
        let records = vec![
            Record::new().with("id", 1).with("emp_id", "S-0042"),
            Record::new().with("id", 2).with("empId", "S-0099"),
        ];
        let out = text_filter(&records, "0042");
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id(), "1");
    }

    #[test]
    fn test_stages_compose() {
        let records = sample();
        let composed = filter_records(&records, QuickFilter::Active, "tanaka", now());
        let staged = text_filter(&quick_filter(&records, QuickFilter::Active, now()), "tanaka");
        assert_eq!(composed, staged);
    }

    #[test]
    fn test_blank_query_is_a_no_op() {
        let records = sample();
        assert_eq!(text_filter(&records, "   ").len(), 4);
    }
}
