//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts via `#[from]`;
//! no `String` variants.

/// Top-level error for all careport operations.
#[derive(Debug, thiserror::Error)]
pub enum CareportError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// The request carried a missing, mismatched, or unknown identifier.
    #[error("identifier error")]
    Identifier(#[from] IdentifierError),

    /// A record referenced by the request does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The persistence backend failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A record's `name` field is empty.
    #[error("name must not be empty")]
    EmptyName,
}

/// Identifier problems detected before a mutation reaches the store.
///
/// Each variant maps to one of the machine-readable reason codes the API
/// reports in bad-request bodies (see [`IdentifierError::code`]).
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    /// The request body carried no identifier where one is required.
    #[error("{entity} identifier is required")]
    Missing { entity: &'static str },

    /// The body identifier disagrees with the request path.
    #[error("{entity} identifier does not match the request path")]
    Mismatch { entity: &'static str },

    /// The identifier passed validation but matches no stored record.
    #[error("no {entity} exists with identifier {id}")]
    Unknown { entity: &'static str, id: String },

    /// A new record arrived already carrying an identifier.
    #[error("a new {entity} cannot already have an identifier")]
    AlreadyAssigned { entity: &'static str },
}

impl IdentifierError {
    /// The entity-name tag carried by the error.
    #[must_use]
    pub fn entity(&self) -> &'static str {
        match self {
            Self::Missing { entity }
            | Self::Mismatch { entity }
            | Self::Unknown { entity, .. }
            | Self::AlreadyAssigned { entity } => entity,
        }
    }

    /// The machine-readable reason code reported to API clients.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "idnull",
            Self::Mismatch { .. } => "idinvalid",
            Self::Unknown { .. } => "idnotfound",
            Self::AlreadyAssigned { .. } => "idexists",
        }
    }
}

/// A lookup by identifier found nothing.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("no {entity} exists with identifier {id}")]
pub struct NotFoundError {
    /// Entity-name tag (e.g. `"hospital"`).
    pub entity: &'static str,
    /// The identifier that missed, rendered as text.
    pub id: String,
}
