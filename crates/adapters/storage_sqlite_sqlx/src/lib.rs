//! # careport-adapter-storage-sqlite-sqlx
//!
//! `SQLite` persistence adapter using [sqlx](https://docs.rs/sqlx).
//!
//! ## Responsibilities
//! - Implement the [`Repository`](careport_app::ports::Repository) port
//!   trait for each record type
//! - Manage the `SQLite` connection pool lifecycle
//! - Run database migrations (sqlx embedded migrations)
//! - Map between domain types and database rows
//! - Scope every mutating operation in an explicit transaction
//!
//! ## Dependency rule
//! Depends on `careport-app` (for the port trait) and `careport-domain`
//! (for record types). The `app` and `domain` crates must never reference
//! this adapter.

pub mod department_repo;
pub mod error;
pub mod hospital_repo;
pub mod pool;

pub use department_repo::SqliteDepartmentRepository;
pub use hospital_repo::SqliteHospitalRepository;
pub use pool::{Config, Database};
