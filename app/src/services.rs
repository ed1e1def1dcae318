//! FILENAME: app/src/services.rs
//! PURPOSE: Typed per-collection services over the record store.
//! CONTEXT: Thin wrappers that pin down the collection name, the category
//! filter for staff, and each collection's searchable fields. All heavier
//! filtering and aggregation happens client-side in `roster-engine`.

use engine::{Record, StaffCategory};
use roster_engine::filter::text_filter_fields;
use std::sync::Arc;

use crate::remote::{RecordStore, StoreError};

pub const STAFF_COLLECTION: &str = "staff";
pub const RESUME_COLLECTION: &str = "resumes";
pub const APPLICATION_COLLECTION: &str = "applications";
pub const FACTORY_COLLECTION: &str = "factories";

/// Searchable fields for resumes.
const RESUME_SEARCH_KEYS: [&str; 3] = ["fullName", "applicantId", "phone"];

// ============================================================================
// STAFF
// ============================================================================

#[derive(Clone)]
pub struct StaffService {
    store: Arc<dyn RecordStore>,
}

impl StaffService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        StaffService { store }
    }

    /// All staff, optionally narrowed to one category.
    pub async fn get_all(
        &self,
        category: Option<StaffCategory>,
    ) -> Result<Vec<Record>, StoreError> {
        let mut records = self.store.get_all(STAFF_COLLECTION).await?;
        if let Some(category) = category {
            records.retain(|r| r.text("category") == category.as_str());
        }
        Ok(records)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Record>, StoreError> {
        self.store.get_by_id(STAFF_COLLECTION, id).await
    }

    /// Creates a staff record tagged with its category.
    pub async fn create(
        &self,
        category: StaffCategory,
        record: Record,
    ) -> Result<Record, StoreError> {
        let record = record.with("category", category.as_str());
        self.store.create(STAFF_COLLECTION, record).await
    }

    pub async fn update(&self, id: &str, patch: Record) -> Result<Record, StoreError> {
        self.store.update(STAFF_COLLECTION, id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(STAFF_COLLECTION, id).await
    }

    /// Substring search over the staff searchable fields.
    pub async fn search(
        &self,
        term: &str,
        category: Option<StaffCategory>,
    ) -> Result<Vec<Record>, StoreError> {
        let records = self.get_all(category).await?;
        Ok(text_filter_fields(
            &records,
            &roster_engine::SEARCH_FIELD_KEYS,
            term,
        ))
    }

    pub async fn count(&self, category: Option<StaffCategory>) -> Result<usize, StoreError> {
        Ok(self.get_all(category).await?.len())
    }
}

// ============================================================================
// RESUMES
// ============================================================================

#[derive(Clone)]
pub struct ResumeService {
    store: Arc<dyn RecordStore>,
}

impl ResumeService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        ResumeService { store }
    }

    pub async fn get_all(&self) -> Result<Vec<Record>, StoreError> {
        self.store.get_all(RESUME_COLLECTION).await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Record>, StoreError> {
        self.store.get_by_id(RESUME_COLLECTION, id).await
    }

    pub async fn create(&self, record: Record) -> Result<Record, StoreError> {
        self.store.create(RESUME_COLLECTION, record).await
    }

    pub async fn update(&self, id: &str, patch: Record) -> Result<Record, StoreError> {
        self.store.update(RESUME_COLLECTION, id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(RESUME_COLLECTION, id).await
    }

    pub async fn search(&self, term: &str) -> Result<Vec<Record>, StoreError> {
        let records = self.get_all().await?;
        Ok(text_filter_fields(&records, &RESUME_SEARCH_KEYS, term))
    }

    pub async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.get_all().await?.len())
    }
}

// ============================================================================
// APPLICATIONS
// ============================================================================

#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<dyn RecordStore>,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        ApplicationService { store }
    }

    pub async fn get_all(&self) -> Result<Vec<Record>, StoreError> {
        self.store.get_all(APPLICATION_COLLECTION).await
    }

    /// Applications in one workflow state (draft/pending/approved/completed).
    pub async fn get_by_status(&self, status: &str) -> Result<Vec<Record>, StoreError> {
        let mut records = self.get_all().await?;
        records.retain(|r| r.text("status") == status);
        Ok(records)
    }

    pub async fn create(&self, record: Record) -> Result<Record, StoreError> {
        self.store.create(APPLICATION_COLLECTION, record).await
    }

    pub async fn update(&self, id: &str, patch: Record) -> Result<Record, StoreError> {
        self.store.update(APPLICATION_COLLECTION, id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(APPLICATION_COLLECTION, id).await
    }

    pub async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.get_all().await?.len())
    }
}

// ============================================================================
// FACTORIES
// ============================================================================

#[derive(Clone)]
pub struct FactoryService {
    store: Arc<dyn RecordStore>,
}

impl FactoryService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        FactoryService { store }
    }

    /// All factories, name-ordered for pickers.
    pub async fn get_all(&self) -> Result<Vec<Record>, StoreError> {
        let mut records = self.store.get_all(FACTORY_COLLECTION).await?;
        records.sort_by_key(|r| r.text("name"));
        Ok(records)
    }

    pub async fn create(&self, record: Record) -> Result<Record, StoreError> {
        self.store.create(FACTORY_COLLECTION, record).await
    }

    pub async fn update(&self, id: &str, patch: Record) -> Result<Record, StoreError> {
        self.store.update(FACTORY_COLLECTION, id, patch).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(FACTORY_COLLECTION, id).await
    }
}
