//! Shared per-resource state for axum handlers.

use std::sync::Arc;

use careport_app::ports::Repository;
use careport_app::services::RecordService;
use careport_domain::record::Record;

/// State shared by all handlers of one resource.
///
/// Holds the use-case service plus a repository handle of its own: the
/// resource layer pre-checks existence directly against the store before
/// delegating mutations to the service. Generic over the repository type
/// to avoid dynamic dispatch. `Clone` is implemented manually so the
/// service itself does not need to be `Clone` — only the `Arc` wrapper
/// and the repository handle are cloned.
pub struct ResourceState<T, R> {
    /// Record CRUD service.
    pub service: Arc<RecordService<T, R>>,
    /// Repository handle for existence pre-checks.
    pub repo: R,
}

impl<T, R: Clone> Clone for ResourceState<T, R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            repo: self.repo.clone(),
        }
    }
}

impl<T, R> ResourceState<T, R>
where
    T: Record,
    R: Repository<T> + Clone + Send + Sync + 'static,
{
    /// Wire a resource state from a repository handle: the service gets
    /// its own clone of the handle.
    pub fn new(repo: R) -> Self {
        Self {
            service: Arc::new(RecordService::new(repo.clone())),
            repo,
        }
    }
}
