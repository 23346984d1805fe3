//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use careport_app::ports::Repository;
use careport_domain::department::Department;
use careport_domain::hospital::Hospital;

use crate::resource;
use crate::state::ResourceState;

/// Build the top-level axum [`Router`].
///
/// Nests one generic resource sub-router per record type under `/api`.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<HR, DR>(
    hospitals: ResourceState<Hospital, HR>,
    departments: ResourceState<Department, DR>,
) -> Router
where
    HR: Repository<Hospital> + Clone + Send + Sync + 'static,
    DR: Repository<Department> + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/hospitals", resource::routes(hospitals))
        .nest("/api/departments", resource::routes(departments))
        .layer(TraceLayer::new_for_http())
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use careport_domain::error::CareportError;
    use careport_domain::record::Record;
    use std::future::Future;
    use tower::ServiceExt;

    #[derive(Clone)]
    struct StubRepo;

    impl<T: Record> Repository<T> for StubRepo {
        fn find_by_id(
            &self,
            _id: T::Id,
        ) -> impl Future<Output = Result<Option<T>, CareportError>> + Send {
            async { Ok(None) }
        }

        fn find_all(&self) -> impl Future<Output = Result<Vec<T>, CareportError>> + Send {
            async { Ok(vec![]) }
        }

        fn save(&self, record: T) -> impl Future<Output = Result<T, CareportError>> + Send {
            async { Ok(record) }
        }

        fn delete_by_id(
            &self,
            _id: T::Id,
        ) -> impl Future<Output = Result<(), CareportError>> + Send {
            async { Ok(()) }
        }

        fn exists_by_id(
            &self,
            _id: T::Id,
        ) -> impl Future<Output = Result<bool, CareportError>> + Send {
            async { Ok(false) }
        }
    }

    fn app() -> Router {
        build(
            ResourceState::<Hospital, _>::new(StubRepo),
            ResourceState::<Department, _>::new(StubRepo),
        )
    }

    #[tokio::test]
    async fn should_return_ok_when_health_check_called() {
        let resp = app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn should_serve_both_resource_collections() {
        for uri in ["/api/hospitals", "/api/departments"] {
            let resp = app()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::OK, "unexpected status for {uri}");
        }
    }

    #[tokio::test]
    async fn should_return_not_found_for_unknown_route() {
        let resp = app()
            .oneshot(
                Request::builder()
                    .uri("/api/wards")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
