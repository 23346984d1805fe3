//! Department — a unit within a hospital with bed-count bookkeeping.

use serde::{Deserialize, Serialize};

use crate::error::{CareportError, ValidationError};
use crate::id::{DepartmentId, HospitalId};
use crate::record::{Record, RecordPatch};

/// A hospital department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Store-assigned key; `None` until the first save.
    pub id: Option<DepartmentId>,
    pub name: String,
    /// Beds currently available.
    pub available: Option<i64>,
    /// Beds released back to the pool.
    pub released: Option<i64>,
    /// Beds assigned to patients.
    pub assigned: Option<i64>,
    /// Owning hospital, if linked.
    pub hospital_id: Option<HospitalId>,
}

impl Department {
    /// Create a builder for constructing a [`Department`].
    #[must_use]
    pub fn builder() -> DepartmentBuilder {
        DepartmentBuilder::default()
    }
}

/// Step-by-step builder for [`Department`].
#[derive(Debug, Default)]
pub struct DepartmentBuilder {
    id: Option<DepartmentId>,
    name: Option<String>,
    available: Option<i64>,
    released: Option<i64>,
    assigned: Option<i64>,
    hospital_id: Option<HospitalId>,
}

impl DepartmentBuilder {
    #[must_use]
    pub fn id(mut self, id: DepartmentId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn available(mut self, available: i64) -> Self {
        self.available = Some(available);
        self
    }

    #[must_use]
    pub fn released(mut self, released: i64) -> Self {
        self.released = Some(released);
        self
    }

    #[must_use]
    pub fn assigned(mut self, assigned: i64) -> Self {
        self.assigned = Some(assigned);
        self
    }

    #[must_use]
    pub fn hospital_id(mut self, hospital_id: HospitalId) -> Self {
        self.hospital_id = Some(hospital_id);
        self
    }

    /// Consume the builder, validate, and return a [`Department`].
    ///
    /// # Errors
    ///
    /// Returns [`CareportError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Department, CareportError> {
        let department = Department {
            id: self.id,
            name: self.name.unwrap_or_default(),
            available: self.available,
            released: self.released,
            assigned: self.assigned,
            hospital_id: self.hospital_id,
        };
        department.validate()?;
        Ok(department)
    }
}

/// Partial-update payload for [`Department`]: absent fields keep their
/// stored value. The hospital link is deliberately not patchable; moving
/// a department between hospitals goes through a full update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DepartmentPatch {
    pub id: Option<DepartmentId>,
    pub name: Option<String>,
    pub available: Option<i64>,
    pub released: Option<i64>,
    pub assigned: Option<i64>,
}

impl RecordPatch for DepartmentPatch {
    type Id = DepartmentId;

    fn id(&self) -> Option<DepartmentId> {
        self.id
    }
}

impl Record for Department {
    type Id = DepartmentId;
    type Patch = DepartmentPatch;

    const ENTITY_NAME: &'static str = "department";
    const COLLECTION: &'static str = "departments";

    fn id(&self) -> Option<DepartmentId> {
        self.id
    }

    fn validate(&self) -> Result<(), CareportError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    fn apply(&mut self, patch: DepartmentPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(available) = patch.available {
            self.available = Some(available);
        }
        if let Some(released) = patch.released {
            self.released = Some(released);
        }
        if let Some(assigned) = patch.assigned {
            self.assigned = Some(assigned);
        }
    }
}
