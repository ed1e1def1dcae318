//! FILENAME: core/roster-engine/src/sort.rs
//! PURPOSE: Kind-aware stable sorting of record lists.
//! CONTEXT: Single-column sort. Number and date columns compare on their
//! parsed values, everything else on lowercased text. Empty values order
//! after present values in both directions, so the interesting rows surface
//! first. Stability preserves the incoming (filter) order for ties.

use chrono::Datelike;
use engine::{parse_date, FieldKind, Record};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The active sort: which column and which way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

/// Comparable projection of one record's sort column.
enum SortKey {
    Number(f64),
    Text(String),
}

fn sort_key(record: &Record, key: &str, kind: FieldKind) -> Option<SortKey> {
    match kind {
        FieldKind::Number => record.number(key).map(SortKey::Number),
        FieldKind::Date => {
            let raw = record.text(key);
            parse_date(&raw).map(|d| {
                // Days keep date ordering and reuse the numeric comparator
                SortKey::Number(d.num_days_from_ce() as f64)
            })
        }
        _ => {
            let text = record.text(key);
            if text.is_empty() {
                None
            } else {
                Some(SortKey::Text(text.to_lowercase()))
            }
        }
    }
}

fn compare_keys(a: &SortKey, b: &SortKey) -> Ordering {
    match (a, b) {
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(y),
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(y),
        // Mixed kinds only happen on dirty text columns; numbers sort first
        (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
        (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
    }
}

/// Sorts records in place by the given spec. Stable; empty values stay at
/// the end regardless of direction.
pub fn sort_records(records: &mut [Record], spec: &SortSpec, kind: FieldKind) {
    records.sort_by(|a, b| {
        let ka = sort_key(a, &spec.key, kind);
        let kb = sort_key(b, &spec.key, kind);
        match (ka, kb) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(ka), Some(kb)) => {
                let ord = compare_keys(&ka, &kb);
                match spec.direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(key: &str, direction: SortDirection) -> SortSpec {
        SortSpec { key: key.to_string(), direction }
    }

    fn by_wage(wages: &[Option<i64>]) -> Vec<Record> {
        wages
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let r = Record::new().with("id", i as i64);
                match w {
                    Some(w) => r.with("hourlyWage", *w),
                    None => r,
                }
            })
            .collect()
    }

    fn ids(records: &[Record]) -> Vec<String> {
        records.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn test_numeric_ascending_with_empties_last() {
        let mut records = by_wage(&[Some(1500), None, Some(1200), Some(1800)]);
        sort_records(&mut records, &spec("hourlyWage", SortDirection::Ascending), FieldKind::Number);
        assert_eq!(ids(&records), ["2", "0", "3", "1"]);
    }

    #[test]
    fn test_numeric_descending_keeps_empties_last() {
        let mut records = by_wage(&[Some(1500), None, Some(1200), Some(1800)]);
        sort_records(&mut records, &spec("hourlyWage", SortDirection::Descending), FieldKind::Number);
        assert_eq!(ids(&records), ["3", "0", "2", "1"]);
    }

    #[test]
    fn test_text_sort_is_case_insensitive() {
        let mut records = vec![
            Record::new().with("id", 1).with("fullName", "suzuki"),
            Record::new().with("id", 2).with("fullName", "Abe"),
            Record::new().with("id", 3).with("fullName", "tanaka"),
        ];
        sort_records(&mut records, &spec("fullName", SortDirection::Ascending), FieldKind::Text);
        assert_eq!(ids(&records), ["2", "1", "3"]);
    }

    #[test]
    fn test_date_sort_parses_mixed_formats() {
        let mut records = vec![
            Record::new().with("id", 1).with("visaExpiry", "2026/06/01"),
            Record::new().with("id", 2).with("visa_expiry", "2026-02-15"),
            Record::new().with("id", 3),
        ];
        sort_records(&mut records, &spec("visaExpiry", SortDirection::Ascending), FieldKind::Date);
        assert_eq!(ids(&records), ["2", "1", "3"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut records = by_wage(&[Some(1500), Some(1500), Some(1500)]);
        sort_records(&mut records, &spec("hourlyWage", SortDirection::Ascending), FieldKind::Number);
        assert_eq!(ids(&records), ["0", "1", "2"]);
    }
}
