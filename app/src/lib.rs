//! FILENAME: app/src/lib.rs
//! PURPOSE: Main library entry point for the Meibo roster data engine.
//! CONTEXT: Composes the core crates into the surface a UI shell consumes:
//! realtime collection subscriptions, the grid state controller, bulk
//! actions, and backend configuration. There is no process entry point -
//! this crate is embedded by the shell.

pub mod actions;
pub mod config;
pub mod datasource;
pub mod grid;
pub mod keyboard;
pub mod memory;
pub mod remote;
pub mod services;

pub use actions::{delete_records, BulkDeleteFailure, BulkDeleteOutcome};
pub use config::{backend_config, BackendConfig, BACKEND_KEY_ENV, BACKEND_URL_ENV};
pub use datasource::{
    application_records, factory_records, resume_records, staff_count, staff_records,
    RealtimeQuery,
};
pub use grid::{GridController, TableView};
pub use keyboard::{grid_action, GridAction, Key, KeyInput};
pub use memory::MemoryStore;
pub use remote::{
    next_channel_seq, ChangeChannel, ChangeEvent, ChangeKind, ChannelHandle, RecordStore,
    StoreError,
};
pub use services::{ApplicationService, FactoryService, ResumeService, StaffService};

// Re-export the core layers so shells depend on one crate
pub use engine::{
    classify_status, is_active_status, is_terminated_status, FieldDescriptor, FieldKind,
    FieldValue, Record, StaffCategory, StatusClass, CONTRACT_FIELDS, DISPATCH_FIELDS,
};
pub use persistence::{
    FilePreferenceStore, GridPreferences, MemoryPreferenceStore, PersistenceError,
    PreferenceStore,
};
pub use roster_engine::{
    compute_selection_stats, compute_stats, filter_records, to_csv, to_printable_document,
    QuickFilter, SelectionStats, SortDirection, SortSpec, TableStats, PAGE_SIZES,
    PRINT_FIELD_LIMIT,
};

/// The wall-clock instant used for expiry calculations, as a naive local
/// timestamp.
pub fn local_now() -> chrono::NaiveDateTime {
    chrono::Local::now().naive_local()
}
