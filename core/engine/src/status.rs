//! FILENAME: core/engine/src/status.rs
//! PURPOSE: Employment-status vocabulary and classification.
//! CONTEXT: Status is free text entered over years of mixed Japanese and
//! English data entry. Matching is substring-based over the normalized
//! (trimmed, lowercased) form; the vocabulary lists below are the single
//! source of truth shared by the quick filter and the aggregate calculator.

use serde::{Deserialize, Serialize};

/// Substrings meaning "currently employed".
const ACTIVE_MARKERS: &[&str] = &["現在", "在籍", "active"];

/// Substrings meaning "left the company".
const TERMINATED_MARKERS: &[&str] = &["退", "終了", "terminated"];

/// Substrings meaning "on leave / suspended".
const SUSPENDED_MARKERS: &[&str] = &["休", "停止"];

/// Substrings meaning "hiring in progress".
const PENDING_MARKERS: &[&str] = &["pending", "待"];

/// Normalizes raw status text for matching.
pub fn normalize_status(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn contains_any(normalized: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| normalized.contains(m))
}

pub fn is_active_status(raw: &str) -> bool {
    contains_any(&normalize_status(raw), ACTIVE_MARKERS)
}

pub fn is_terminated_status(raw: &str) -> bool {
    contains_any(&normalize_status(raw), TERMINATED_MARKERS)
}

// ============================================================================
// STATUS CLASS
// ============================================================================

/// Coarse status classification for badge rendering.
/// Terminated and suspended markers are checked before active ones: a status
/// like "退社済み(在籍なし)" must classify as terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusClass {
    Active,
    Terminated,
    Suspended,
    Pending,
    Other,
}

pub fn classify_status(raw: &str) -> StatusClass {
    let s = normalize_status(raw);
    if contains_any(&s, TERMINATED_MARKERS) {
        StatusClass::Terminated
    } else if contains_any(&s, SUSPENDED_MARKERS) {
        StatusClass::Suspended
    } else if contains_any(&s, PENDING_MARKERS) {
        StatusClass::Pending
    } else if contains_any(&s, ACTIVE_MARKERS) {
        StatusClass::Active
    } else {
        StatusClass::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_vocabulary() {
        assert!(is_active_status("現在"));
        assert!(is_active_status("在籍"));
        assert!(is_active_status("Active"));
        assert!(!is_active_status("退社"));
        assert!(!is_active_status(""));
    }

    #[test]
    fn test_terminated_vocabulary() {
        assert!(is_terminated_status("退社"));
        assert!(is_terminated_status("契約終了"));
        assert!(is_terminated_status("Terminated"));
        assert!(!is_terminated_status("現在"));
    }

    #[test]
    fn test_classification_precedence() {
        assert_eq!(classify_status("現在"), StatusClass::Active);
        assert_eq!(classify_status("退社"), StatusClass::Terminated);
        assert_eq!(classify_status("休職中"), StatusClass::Suspended);
        assert_eq!(classify_status("入社待ち"), StatusClass::Pending);
        assert_eq!(classify_status("???"), StatusClass::Other);
        // Terminated markers win over active ones
        assert_eq!(classify_status("退社(元在籍)"), StatusClass::Terminated);
    }

    #[test]
    fn test_matching_is_case_insensitive_and_trimmed() {
        assert!(is_active_status("  ACTIVE  "));
        assert!(is_terminated_status(" TERMINATED"));
    }
}
