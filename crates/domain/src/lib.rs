//! # careport-domain
//!
//! Pure domain model for the careport hospital registry.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers and error conventions
//! - Define **Records** (persisted rows with a store-assigned identity)
//! - Define the concrete record types: [`hospital::Hospital`] and
//!   [`department::Department`], plus their patch types
//! - Contain all invariant enforcement and the per-record merge logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod record;

pub mod department;
pub mod hospital;
