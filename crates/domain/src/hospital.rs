//! Hospital — a care facility that owns zero or more departments.

use serde::{Deserialize, Serialize};

use crate::error::{CareportError, ValidationError};
use crate::id::HospitalId;
use crate::record::{Record, RecordPatch};

/// A care facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hospital {
    /// Store-assigned key; `None` until the first save.
    pub id: Option<HospitalId>,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl Hospital {
    /// Create a builder for constructing a [`Hospital`].
    #[must_use]
    pub fn builder() -> HospitalBuilder {
        HospitalBuilder::default()
    }
}

/// Step-by-step builder for [`Hospital`].
#[derive(Debug, Default)]
pub struct HospitalBuilder {
    id: Option<HospitalId>,
    name: Option<String>,
    address: Option<String>,
    phone: Option<String>,
}

impl HospitalBuilder {
    #[must_use]
    pub fn id(mut self, id: HospitalId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Consume the builder, validate, and return a [`Hospital`].
    ///
    /// # Errors
    ///
    /// Returns [`CareportError::Validation`] if `name` is missing or empty.
    pub fn build(self) -> Result<Hospital, CareportError> {
        let hospital = Hospital {
            id: self.id,
            name: self.name.unwrap_or_default(),
            address: self.address,
            phone: self.phone,
        };
        hospital.validate()?;
        Ok(hospital)
    }
}

/// Partial-update payload for [`Hospital`]: absent fields keep their
/// stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HospitalPatch {
    pub id: Option<HospitalId>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

impl RecordPatch for HospitalPatch {
    type Id = HospitalId;

    fn id(&self) -> Option<HospitalId> {
        self.id
    }
}

impl Record for Hospital {
    type Id = HospitalId;
    type Patch = HospitalPatch;

    const ENTITY_NAME: &'static str = "hospital";
    const COLLECTION: &'static str = "hospitals";

    fn id(&self) -> Option<HospitalId> {
        self.id
    }

    fn validate(&self) -> Result<(), CareportError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        Ok(())
    }

    fn apply(&mut self, patch: HospitalPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(address) = patch.address {
            self.address = Some(address);
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_valid_hospital_when_name_provided() {
        let hospital = Hospital::builder().name("General").build().unwrap();
        assert_eq!(hospital.name, "General");
        assert!(hospital.id.is_none());
        assert!(hospital.address.is_none());
    }

    #[test]
    fn should_return_validation_error_when_name_is_empty() {
        let result = Hospital::builder().build();
        assert!(matches!(
            result,
            Err(CareportError::Validation(ValidationError::EmptyName))
        ));
    }

    #[test]
    fn should_leave_unpatched_fields_untouched_when_applying_patch() {
        let mut hospital = Hospital::builder()
            .name("General")
            .address("1 Main St")
            .phone("555-0100")
            .build()
            .unwrap();

        hospital.apply(HospitalPatch {
            name: Some("Central".to_string()),
            ..HospitalPatch::default()
        });

        assert_eq!(hospital.name, "Central");
        assert_eq!(hospital.address.as_deref(), Some("1 Main St"));
        assert_eq!(hospital.phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn should_not_change_id_when_applying_patch() {
        let mut hospital = Hospital::builder()
            .id(HospitalId::from_i64(7))
            .name("General")
            .build()
            .unwrap();

        hospital.apply(HospitalPatch {
            id: Some(HospitalId::from_i64(9)),
            name: Some("Central".to_string()),
            ..HospitalPatch::default()
        });

        assert_eq!(hospital.id, Some(HospitalId::from_i64(7)));
    }

    #[test]
    fn should_deserialize_body_without_id() {
        let hospital: Hospital = serde_json::from_str(r#"{"name":"General"}"#).unwrap();
        assert!(hospital.id.is_none());
        assert_eq!(hospital.name, "General");
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let hospital = Hospital::builder()
            .id(HospitalId::from_i64(3))
            .name("General")
            .phone("555-0100")
            .build()
            .unwrap();
        let json = serde_json::to_string(&hospital).unwrap();
        let parsed: Hospital = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, hospital);
    }
}
