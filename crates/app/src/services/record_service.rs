//! Record service — the generic CRUD use-cases shared by every record type.

use std::marker::PhantomData;

use careport_domain::error::CareportError;
use careport_domain::record::Record;

use crate::ports::Repository;

/// Application service for record CRUD and partial-update merging.
///
/// The single choke point for persistence calls: every mutating operation
/// writes through to the repository immediately, with no batching or
/// caching. One instance per record type, each wrapping its own repository.
pub struct RecordService<T, R> {
    repo: R,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record, R: Repository<T>> RecordService<T, R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            _record: PhantomData,
        }
    }

    /// Persist a new or overwritten record; the store assigns an
    /// identifier when the record carries none.
    ///
    /// # Errors
    ///
    /// Returns [`CareportError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    pub async fn save(&self, record: T) -> Result<T, CareportError> {
        tracing::debug!(entity = T::ENTITY_NAME, "request to save record");
        record.validate()?;
        self.repo.save(record).await
    }

    /// Replace an existing record wholesale.
    ///
    /// The caller (resource layer) guarantees the identifier is present
    /// and matches a stored row; this layer does not re-check.
    ///
    /// # Errors
    ///
    /// Returns [`CareportError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    pub async fn update(&self, record: T) -> Result<T, CareportError> {
        tracing::debug!(entity = T::ENTITY_NAME, "request to update record");
        record.validate()?;
        self.repo.save(record).await
    }

    /// Merge a patch into the stored record with the given identifier.
    ///
    /// Returns `Ok(None)` when no such record exists — the recognized
    /// race where the row vanished between the caller's existence check
    /// and the merge. Fields absent from the patch keep their stored
    /// values; present fields overwrite wholesale.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn partial_update(
        &self,
        id: T::Id,
        patch: T::Patch,
    ) -> Result<Option<T>, CareportError> {
        tracing::debug!(entity = T::ENTITY_NAME, %id, "request to partially update record");
        let Some(mut existing) = self.repo.find_by_id(id).await? else {
            return Ok(None);
        };
        existing.apply(patch);
        let merged = self.repo.save(existing).await?;
        Ok(Some(merged))
    }

    /// Get all records, in store order, without pagination.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn find_all(&self) -> Result<Vec<T>, CareportError> {
        tracing::debug!(entity = T::ENTITY_NAME, "request to list records");
        self.repo.find_all().await
    }

    /// Look up one record by identifier.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn find_one(&self, id: T::Id) -> Result<Option<T>, CareportError> {
        tracing::debug!(entity = T::ENTITY_NAME, %id, "request to get record");
        self.repo.find_by_id(id).await
    }

    /// Delete a record by identifier. Idempotent at this layer: deleting
    /// an absent identifier is not an error.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn delete(&self, id: T::Id) -> Result<(), CareportError> {
        tracing::debug!(entity = T::ENTITY_NAME, %id, "request to delete record");
        self.repo.delete_by_id(id).await
    }

    /// Check whether a record with the given identifier exists.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn exists(&self, id: T::Id) -> Result<bool, CareportError> {
        self.repo.exists_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use careport_domain::error::ValidationError;
    use careport_domain::hospital::{Hospital, HospitalPatch};
    use careport_domain::id::HospitalId;
    use std::collections::BTreeMap;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryHospitalRepo {
        inner: Mutex<Inner>,
    }

    #[derive(Default)]
    struct Inner {
        rows: BTreeMap<i64, Hospital>,
        next_id: i64,
    }

    impl Repository<Hospital> for InMemoryHospitalRepo {
        fn find_by_id(
            &self,
            id: HospitalId,
        ) -> impl Future<Output = Result<Option<Hospital>, CareportError>> + Send {
            let inner = self.inner.lock().unwrap();
            let result = inner.rows.get(&id.as_i64()).cloned();
            async { Ok(result) }
        }

        fn find_all(
            &self,
        ) -> impl Future<Output = Result<Vec<Hospital>, CareportError>> + Send {
            let inner = self.inner.lock().unwrap();
            let result: Vec<Hospital> = inner.rows.values().cloned().collect();
            async { Ok(result) }
        }

        fn save(
            &self,
            mut record: Hospital,
        ) -> impl Future<Output = Result<Hospital, CareportError>> + Send {
            let mut inner = self.inner.lock().unwrap();
            let id = match record.id {
                Some(id) => id,
                None => {
                    inner.next_id += 1;
                    let id = HospitalId::from_i64(inner.next_id);
                    record.id = Some(id);
                    id
                }
            };
            inner.rows.insert(id.as_i64(), record.clone());
            async { Ok(record) }
        }

        fn delete_by_id(
            &self,
            id: HospitalId,
        ) -> impl Future<Output = Result<(), CareportError>> + Send {
            let mut inner = self.inner.lock().unwrap();
            inner.rows.remove(&id.as_i64());
            async { Ok(()) }
        }

        fn exists_by_id(
            &self,
            id: HospitalId,
        ) -> impl Future<Output = Result<bool, CareportError>> + Send {
            let inner = self.inner.lock().unwrap();
            let result = inner.rows.contains_key(&id.as_i64());
            async move { Ok(result) }
        }
    }

    fn make_service() -> RecordService<Hospital, InMemoryHospitalRepo> {
        RecordService::new(InMemoryHospitalRepo::default())
    }

    fn general() -> Hospital {
        Hospital::builder()
            .name("General")
            .address("1 Main St")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_assign_id_and_keep_fields_when_saving_new_record() {
        let svc = make_service();

        let saved = svc.save(general()).await.unwrap();

        assert!(saved.id.is_some());
        assert_eq!(saved.name, "General");
        assert_eq!(saved.address.as_deref(), Some("1 Main St"));
    }

    #[tokio::test]
    async fn should_reject_save_when_name_is_empty() {
        let svc = make_service();
        let mut hospital = general();
        hospital.name = String::new();

        let result = svc.save(hospital).await;
        assert!(matches!(
            result,
            Err(CareportError::Validation(ValidationError::EmptyName))
        ));
    }

    #[tokio::test]
    async fn should_replace_all_fields_when_updating() {
        let svc = make_service();
        let saved = svc.save(general()).await.unwrap();
        let id = saved.id.unwrap();

        let replacement = Hospital {
            id: Some(id),
            name: "Central".to_string(),
            address: None,
            phone: Some("555-0101".to_string()),
        };
        let updated = svc.update(replacement.clone()).await.unwrap();
        assert_eq!(updated, replacement);

        let fetched = svc.find_one(id).await.unwrap().unwrap();
        assert_eq!(fetched.address, None);
    }

    #[tokio::test]
    async fn should_merge_only_provided_fields_when_partially_updating() {
        let svc = make_service();
        let saved = svc.save(general()).await.unwrap();
        let id = saved.id.unwrap();

        let merged = svc
            .partial_update(
                id,
                HospitalPatch {
                    name: Some("Central".to_string()),
                    ..HospitalPatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(merged.name, "Central");
        assert_eq!(merged.address.as_deref(), Some("1 Main St"));

        let fetched = svc.find_one(id).await.unwrap().unwrap();
        assert_eq!(fetched, merged);
    }

    #[tokio::test]
    async fn should_return_none_when_partially_updating_missing_record() {
        let svc = make_service();

        let result = svc
            .partial_update(
                HospitalId::from_i64(99),
                HospitalPatch {
                    name: Some("Ghost".to_string()),
                    ..HospitalPatch::default()
                },
            )
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn should_list_records_in_store_order() {
        let svc = make_service();
        svc.save(general()).await.unwrap();
        svc.save(Hospital::builder().name("Central").build().unwrap())
            .await
            .unwrap();

        let all = svc.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "General");
        assert_eq!(all[1].name, "Central");
    }

    #[tokio::test]
    async fn should_find_nothing_after_delete_regardless_of_prior_state() {
        let svc = make_service();
        let saved = svc.save(general()).await.unwrap();
        let id = saved.id.unwrap();

        svc.delete(id).await.unwrap();
        assert!(svc.find_one(id).await.unwrap().is_none());

        // Second delete of the same id is a no-op, not an error.
        svc.delete(id).await.unwrap();
        assert!(svc.find_one(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_report_existence_only_for_stored_ids() {
        let svc = make_service();
        let saved = svc.save(general()).await.unwrap();
        let id = saved.id.unwrap();

        assert!(svc.exists(id).await.unwrap());
        assert!(!svc.exists(HospitalId::from_i64(99)).await.unwrap());
    }
}
