//! Record — the shape every persisted row type shares.
//!
//! The generic service and resource layers are written once against this
//! trait; each concrete record supplies its own identifier type, patch
//! type, and field-merge logic.

use std::fmt;
use std::str::FromStr;

use crate::error::CareportError;

/// A persisted row type with a store-assigned identity.
///
/// A record is *new* while [`Record::id`] is `None`; the store assigns an
/// identifier on first save and the identifier never changes afterwards.
pub trait Record: Clone + Send + Sync + 'static {
    /// Store-assigned key type.
    type Id: Copy + Eq + fmt::Display + fmt::Debug + FromStr + Send + Sync + 'static;

    /// Partial-update payload: one `Option` per mutable field.
    type Patch: RecordPatch<Id = Self::Id>;

    /// Singular entity tag used in error bodies and logs (e.g. `"hospital"`).
    const ENTITY_NAME: &'static str;

    /// Plural collection segment used in URLs (e.g. `"hospitals"`).
    const COLLECTION: &'static str;

    /// The identifier, if one has been assigned.
    fn id(&self) -> Option<Self::Id>;

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CareportError::Validation`] when an invariant fails.
    fn validate(&self) -> Result<(), CareportError>;

    /// Merge a patch into this record: every field the patch carries
    /// overwrites the stored value wholesale, every absent field is left
    /// untouched. The identifier is never merged.
    fn apply(&mut self, patch: Self::Patch);
}

/// Partial-update payload for a [`Record`].
pub trait RecordPatch: Send + Sync + 'static {
    /// Key type of the record being patched.
    type Id;

    /// The identifier carried by the patch body, if any.
    ///
    /// Used by the resource layer to validate path/body consistency; the
    /// merge itself never touches the stored identifier.
    fn id(&self) -> Option<Self::Id>;
}
