//! # careport-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the JSON REST API (`/api/hospitals`, `/api/departments`)
//! - Validate the HTTP-level contract (path/body identifier consistency,
//!   existence pre-checks) before any mutation reaches a service
//! - Map application results into status-bearing HTTP responses
//!
//! ## Dependency rule
//! Depends on `careport-app` (for the port trait and services) and
//! `careport-domain` (for record types used in request/response mapping).
//! Never leaks axum types into the domain.

pub mod error;
pub mod resource;
pub mod router;
pub mod state;
