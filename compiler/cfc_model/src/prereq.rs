//! A parcel's dependency on another parcel.

use crate::{is_valid_parcel_name, ModelError, Version};

/// A named dependency with a minimum required version.
///
/// Created while parsing a parcel spec and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Prereq {
    name: String,
    version: Version,
    any_version: bool,
}

impl Prereq {
    /// Create a prereq. A missing version means "any version" and is stored
    /// as `v0`.
    pub fn new(name: &str, version: Option<Version>) -> Result<Self, ModelError> {
        if !is_valid_parcel_name(name) {
            return Err(ModelError::InvalidName {
                what: "prereq name",
                value: name.to_string(),
            });
        }
        Ok(Prereq {
            name: name.to_string(),
            any_version: version.is_none(),
            version: version.unwrap_or_else(Version::zero),
        })
    }

    /// Name of the required parcel.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Minimum acceptable version.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Whether the spec left the version open (`null`). Such a prereq
    /// accepts any major version of the required parcel.
    pub fn is_any_version(&self) -> bool {
        self.any_version
    }
}
