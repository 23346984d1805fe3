//! `SQLite` implementation of [`Repository`] for [`Hospital`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use careport_app::ports::Repository;
use careport_domain::error::CareportError;
use careport_domain::hospital::Hospital;
use careport_domain::id::HospitalId;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Hospital`].
struct Wrapper(Hospital);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Hospital> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let address: Option<String> = row.try_get("address")?;
        let phone: Option<String> = row.try_get("phone")?;

        Ok(Self(Hospital {
            id: Some(HospitalId::from_i64(id)),
            name,
            address,
            phone,
        }))
    }
}

const INSERT: &str = "INSERT INTO hospitals (name, address, phone) VALUES (?, ?, ?) RETURNING id";
const UPSERT: &str = "INSERT INTO hospitals (id, name, address, phone) VALUES (?, ?, ?, ?) \
     ON CONFLICT (id) DO UPDATE \
     SET name = excluded.name, address = excluded.address, phone = excluded.phone";
const SELECT_BY_ID: &str = "SELECT * FROM hospitals WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM hospitals ORDER BY id";
const DELETE_BY_ID: &str = "DELETE FROM hospitals WHERE id = ?";
const EXISTS_BY_ID: &str = "SELECT EXISTS (SELECT 1 FROM hospitals WHERE id = ?)";

/// `SQLite`-backed hospital repository. Cloning shares the pool.
#[derive(Clone)]
pub struct SqliteHospitalRepository {
    pool: SqlitePool,
}

impl SqliteHospitalRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<Hospital> for SqliteHospitalRepository {
    fn find_by_id(
        &self,
        id: HospitalId,
    ) -> impl Future<Output = Result<Option<Hospital>, CareportError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.as_i64())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn find_all(&self) -> impl Future<Output = Result<Vec<Hospital>, CareportError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn save(
        &self,
        mut record: Hospital,
    ) -> impl Future<Output = Result<Hospital, CareportError>> + Send {
        let pool = self.pool.clone();
        async move {
            // Explicit transaction scope: commit on success, rollback on
            // every other exit path (dropping the transaction rolls back).
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            if let Some(id) = record.id {
                sqlx::query(UPSERT)
                    .bind(id.as_i64())
                    .bind(&record.name)
                    .bind(record.address.as_deref())
                    .bind(record.phone.as_deref())
                    .execute(&mut *tx)
                    .await
                    .map_err(StorageError::from)?;
            } else {
                let row = sqlx::query(INSERT)
                    .bind(&record.name)
                    .bind(record.address.as_deref())
                    .bind(record.phone.as_deref())
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(StorageError::from)?;
                let id: i64 = row.try_get("id").map_err(StorageError::from)?;
                record.id = Some(HospitalId::from_i64(id));
            }

            tx.commit().await.map_err(StorageError::from)?;
            Ok(record)
        }
    }

    fn delete_by_id(
        &self,
        id: HospitalId,
    ) -> impl Future<Output = Result<(), CareportError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            // Affected-row count deliberately ignored: deleting an absent
            // id is a no-op.
            sqlx::query(DELETE_BY_ID)
                .bind(id.as_i64())
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            tx.commit().await.map_err(StorageError::from)?;
            Ok(())
        }
    }

    fn exists_by_id(
        &self,
        id: HospitalId,
    ) -> impl Future<Output = Result<bool, CareportError>> + Send {
        let pool = self.pool.clone();
        async move {
            let exists: bool = sqlx::query_scalar(EXISTS_BY_ID)
                .bind(id.as_i64())
                .fetch_one(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(exists)
        }
    }
}
