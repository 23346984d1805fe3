//! Storage port — the repository trait for persistence.

use std::future::Future;

use careport_domain::error::CareportError;
use careport_domain::record::Record;

/// Durable store for records of type `T`, keyed by the record's identifier.
///
/// One generic trait serves every record type; adapters implement it once
/// per table. The store owns the canonical copy — values passed through
/// here are transient copies.
pub trait Repository<T: Record> {
    /// Look up a record by its identifier.
    fn find_by_id(
        &self,
        id: T::Id,
    ) -> impl Future<Output = Result<Option<T>, CareportError>> + Send;

    /// Get all records in store order.
    fn find_all(&self) -> impl Future<Output = Result<Vec<T>, CareportError>> + Send;

    /// Persist a record. Assigns an identifier when the record carries
    /// none; otherwise overwrites the row at that identifier. Returns the
    /// stored form with the identifier populated.
    fn save(&self, record: T) -> impl Future<Output = Result<T, CareportError>> + Send;

    /// Remove a record by its identifier. Removing an absent identifier
    /// is not an error.
    fn delete_by_id(&self, id: T::Id) -> impl Future<Output = Result<(), CareportError>> + Send;

    /// Check whether a record with the given identifier exists.
    fn exists_by_id(
        &self,
        id: T::Id,
    ) -> impl Future<Output = Result<bool, CareportError>> + Send;
}
