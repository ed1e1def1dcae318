//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for Meibo integration tests.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use meibo::{BackendConfig, MemoryStore, Record};
use std::sync::Arc;

/// Test harness wiring an in-process store to a configured (or degraded)
/// backend.
pub struct TestHarness {
    pub store: Arc<MemoryStore>,
    pub config: BackendConfig,
}

impl TestHarness {
    /// A configured harness with an empty store.
    pub fn new() -> Self {
        TestHarness {
            store: Arc::new(MemoryStore::new()),
            config: BackendConfig::new("https://roster.example.com", "test-key"),
        }
    }

    /// A harness with no backend configuration (degraded mode).
    pub fn unconfigured() -> Self {
        TestHarness {
            store: Arc::new(MemoryStore::new()),
            config: BackendConfig::unconfigured(),
        }
    }

    /// A configured harness seeded with the standard staff fixture.
    pub fn with_staff_fixture() -> Self {
        let harness = Self::new();
        harness.store.seed("staff", StaffFixture::records());
        harness
    }
}

/// A deterministic "now" for expiry calculations.
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

/// Builds one staff record. Even-numbered records use display-schema keys,
/// odd-numbered ones storage-schema keys, so every pipeline stage exercises
/// the dual-key accessor.
pub fn staff_record(n: usize, name: &str, status: &str, wage: Option<i64>) -> Record {
    let id = format!("S{:03}", n);
    let mut record = Record::new()
        .with("id", id.clone())
        .with("category", "dispatch")
        .with("status", status);
    if n % 2 == 0 {
        record.set("fullName", name);
        record.set("empId", id);
        if let Some(wage) = wage {
            record.set("hourlyWage", wage);
        }
    } else {
        record.set("full_name", name);
        record.set("emp_id", id);
        if let Some(wage) = wage {
            record.set("hourly_wage", wage);
        }
    }
    record
}

/// Standard roster fixture.
pub struct StaffFixture;

impl StaffFixture {
    /// 50 dispatch staff: 30 active ("現在") with wages alternating 1400 and
    /// 1600 (mean 1500), 20 terminated ("退社") without wages.
    pub fn records() -> Vec<Record> {
        let mut records = Vec::with_capacity(50);
        for n in 0..30 {
            let wage = if n % 2 == 0 { 1400 } else { 1600 };
            records.push(staff_record(n, &format!("在籍社員{}", n), "現在", Some(wage)));
        }
        for n in 30..50 {
            records.push(staff_record(n, &format!("退職社員{}", n), "退社", None));
        }
        records
    }
}
