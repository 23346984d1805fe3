//! # careport-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define the **storage port trait** that adapters must implement:
//!   [`ports::Repository`] — lookup, save, delete, exists for any record type
//! - Provide the generic use-case service: [`services::RecordService`] —
//!   save, update, partial-update merge, list, find-one, delete
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `careport-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
