//! Application services — use-case implementations.
//!
//! The service struct accepts a port trait implementation via a generic
//! parameter (constructor injection), keeping this layer decoupled from
//! concrete adapters.

pub mod record_service;

pub use record_service::RecordService;
