//! `SQLite` implementation of [`Repository`] for [`Department`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use careport_app::ports::Repository;
use careport_domain::department::Department;
use careport_domain::error::CareportError;
use careport_domain::id::{DepartmentId, HospitalId};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Department`].
struct Wrapper(Department);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Department> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let available: Option<i64> = row.try_get("available")?;
        let released: Option<i64> = row.try_get("released")?;
        let assigned: Option<i64> = row.try_get("assigned")?;
        let hospital_id: Option<i64> = row.try_get("hospital_id")?;

        Ok(Self(Department {
            id: Some(DepartmentId::from_i64(id)),
            name,
            available,
            released,
            assigned,
            hospital_id: hospital_id.map(HospitalId::from_i64),
        }))
    }
}

const INSERT: &str =
    "INSERT INTO departments (name, available, released, assigned, hospital_id) \
     VALUES (?, ?, ?, ?, ?) RETURNING id";
const UPSERT: &str =
    "INSERT INTO departments (id, name, available, released, assigned, hospital_id) \
     VALUES (?, ?, ?, ?, ?, ?) \
     ON CONFLICT (id) DO UPDATE \
     SET name = excluded.name, available = excluded.available, \
         released = excluded.released, assigned = excluded.assigned, \
         hospital_id = excluded.hospital_id";
const SELECT_BY_ID: &str = "SELECT * FROM departments WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM departments ORDER BY id";
const DELETE_BY_ID: &str = "DELETE FROM departments WHERE id = ?";
const EXISTS_BY_ID: &str = "SELECT EXISTS (SELECT 1 FROM departments WHERE id = ?)";

/// `SQLite`-backed department repository. Cloning shares the pool.
#[derive(Clone)]
pub struct SqliteDepartmentRepository {
    pool: SqlitePool,
}

impl SqliteDepartmentRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<Department> for SqliteDepartmentRepository {
    fn find_by_id(
        &self,
        id: DepartmentId,
    ) -> impl Future<Output = Result<Option<Department>, CareportError>> + Send {
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

    fn find_all(&self) -> impl Future<Output = Result<Vec<Department>, CareportError>> + Send {
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
        mut record: Department,
    ) -> impl Future<Output = Result<Department, CareportError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            if let Some(id) = record.id {
                sqlx::query(UPSERT)
                    .bind(id.as_i64())
                    .bind(&record.name)
                    .bind(record.available)
                    .bind(record.released)
                    .bind(record.assigned)
                    .bind(record.hospital_id.map(HospitalId::as_i64))
                    .execute(&mut *tx)
                    .await
                    .map_err(StorageError::from)?;
            } else {
                let row = sqlx::query(INSERT)
                    .bind(&record.name)
                    .bind(record.available)
                    .bind(record.released)
                    .bind(record.assigned)
                    .bind(record.hospital_id.map(HospitalId::as_i64))
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(StorageError::from)?;
                let id: i64 = row.try_get("id").map_err(StorageError::from)?;
                record.id = Some(DepartmentId::from_i64(id));
            }

            tx.commit().await.map_err(StorageError::from)?;
            Ok(record)
        }
    }

    fn delete_by_id(
        &self,
        id: DepartmentId,
    ) -> impl Future<Output = Result<(), CareportError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

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
        id: DepartmentId,
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
