//! Parcels: named, versioned units that own classes and declare prereqs.
//!
//! A parcel is usually read from a `.cfp` spec:
//!
//! ```text
//! {
//!     "name": "Animal",
//!     "nickname": "Anml",
//!     "version": "v0.1.0",
//!     "prerequisites": { "Clownfish": "v0.5" }
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::json::{self, JsonHash, JsonValue};
use crate::{is_valid_parcel_name, ClassId, ModelError, ParcelId, Prereq, Version};

/// Location of a spec file and whether it was found via an include dir.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FileSpec {
    path: PathBuf,
    included: bool,
}

impl FileSpec {
    pub fn new(path: impl Into<PathBuf>, included: bool) -> Self {
        FileSpec {
            path: path.into(),
            included,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if the file came from an include dir rather than a source dir.
    pub fn included(&self) -> bool {
        self.included
    }
}

/// Progress of `ModelContext::check_prereqs` through this parcel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum VisitState {
    #[default]
    Unvisited,
    /// On the current depth-first path.
    InProgress,
    /// Fully checked, together with everything it requires.
    Required,
}

/// A parcel definition.
#[derive(Clone, Debug)]
pub struct Parcel {
    name: String,
    nickname: String,
    version: Version,
    major_version: Version,
    /// `lowercase(nickname) + "_"`
    prefix: String,
    /// `nickname + "_"`
    camel_prefix: String,
    /// `uppercase(nickname) + "_"`
    upper_prefix: String,
    privacy_sym: String,
    included: bool,
    installed: bool,
    prereqs: Vec<Prereq>,
    source: Option<PathBuf>,
    /// Classes in declaration order until sorted, then parent-first.
    pub(crate) classes: Vec<ClassId>,
    /// Other parcels holding parents of this parcel's classes.
    pub(crate) inherited: Vec<ParcelId>,
    pub(crate) visit: VisitState,
    pub(crate) host_module: Option<String>,
}

impl Parcel {
    /// Create a parcel. The nickname defaults to the name and the version
    /// to `v0`.
    pub fn new(
        name: &str,
        nickname: Option<&str>,
        version: Option<Version>,
        included: bool,
    ) -> Result<Self, ModelError> {
        if !is_valid_parcel_name(name) {
            return Err(ModelError::InvalidName {
                what: "parcel name",
                value: name.to_string(),
            });
        }
        let nickname = match nickname {
            Some(nick) if !is_valid_parcel_name(nick) => {
                return Err(ModelError::InvalidName {
                    what: "parcel nickname",
                    value: nick.to_string(),
                });
            }
            Some(nick) => nick.to_string(),
            None => name.to_string(),
        };

        let camel_prefix = if nickname.is_empty() {
            String::new()
        } else {
            format!("{nickname}_")
        };

        Ok(Parcel {
            name: name.to_string(),
            prefix: camel_prefix.to_ascii_lowercase(),
            upper_prefix: camel_prefix.to_ascii_uppercase(),
            privacy_sym: format!("CFP_{}", nickname.to_ascii_uppercase()),
            camel_prefix,
            nickname,
            version: version.unwrap_or_else(Version::zero),
            major_version: Version::zero(),
            included,
            installed: !included,
            prereqs: Vec::new(),
            source: None,
            classes: Vec::new(),
            inherited: Vec::new(),
            visit: VisitState::Unvisited,
            host_module: None,
        })
    }

    /// Set the major version, the oldest version this one is compatible with.
    #[must_use]
    pub fn with_major_version(mut self, major_version: Version) -> Self {
        self.major_version = major_version;
        self
    }

    /// Declare whether the parcel gets installed. Included parcels are never
    /// installed, whatever their spec says.
    #[must_use]
    pub fn with_installed(mut self, installed: bool) -> Self {
        self.installed = installed && !self.included;
        self
    }

    #[must_use]
    pub fn with_prereqs(mut self, prereqs: Vec<Prereq>) -> Self {
        self.prereqs = prereqs;
        self
    }

    #[must_use]
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Parse a parcel spec read from `spec`.
    pub fn from_spec(text: &str, spec: &FileSpec) -> Result<Self, ModelError> {
        let path = spec.path().display().to_string();
        let parcel = parse_spec(text, &path, spec.included())?;
        Ok(parcel.with_source(spec.path()))
    }

    /// Parse a parcel spec that did not come from a file.
    pub fn from_json(text: &str, included: bool) -> Result<Self, ModelError> {
        parse_spec(text, "[NULL]", included)
    }

    /// Read and parse the spec file at `spec`.
    pub fn from_file(spec: &FileSpec) -> Result<Self, ModelError> {
        let text = fs::read_to_string(spec.path())
            .map_err(|e| ModelError::io(spec.path().display().to_string(), e))?;
        Parcel::from_spec(&text, spec)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn major_version(&self) -> &Version {
        &self.major_version
    }

    /// Lowercase symbol prefix, e.g. `anml_`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Prefix with the nickname's own casing, e.g. `Anml_`.
    pub fn camel_prefix(&self) -> &str {
        &self.camel_prefix
    }

    /// Uppercase symbol prefix, e.g. `ANML_`.
    pub fn upper_prefix(&self) -> &str {
        &self.upper_prefix
    }

    /// Macro guarding parcel-private symbols, e.g. `CFP_ANML`.
    pub fn privacy_sym(&self) -> &str {
        &self.privacy_sym
    }

    pub fn included(&self) -> bool {
        self.included
    }

    pub fn is_installed(&self) -> bool {
        self.installed
    }

    /// True once `check_prereqs` has validated this parcel.
    pub fn is_required(&self) -> bool {
        self.visit == VisitState::Required
    }

    pub fn prereqs(&self) -> &[Prereq] {
        &self.prereqs
    }

    /// Owned classes; parent-first after `connect_and_sort_classes`.
    pub fn classes(&self) -> &[ClassId] {
        &self.classes
    }

    pub fn inherited_parcels(&self) -> &[ParcelId] {
        &self.inherited
    }

    /// Path of the `.cfp` file this parcel was read from.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Host-language module name from the host side file.
    pub fn host_module(&self) -> Option<&str> {
        self.host_module.as_deref()
    }

    /// Identity comparison: name, nickname, version and included flag.
    pub fn equals(&self, other: &Parcel) -> bool {
        self.name == other.name
            && self.nickname == other.nickname
            && self.version == other.version
            && self.included == other.included
    }
}

fn parse_spec(text: &str, path: &str, included: bool) -> Result<Parcel, ModelError> {
    let parsed = json::parse(text).ok_or_else(|| ModelError::InvalidJson {
        path: path.to_string(),
    })?;
    let JsonValue::Hash(spec) = parsed else {
        return Err(ModelError::NotAHash {
            path: path.to_string(),
        });
    };

    let mut name = None;
    let mut nickname = None;
    let mut version = None;
    let mut major_version = None;
    let mut installed = true;
    let mut prereqs = Vec::new();

    for (key, value) in spec.iter() {
        match key {
            "name" => name = Some(expect_string(key, value, path)?),
            "nickname" => nickname = Some(expect_string(key, value, path)?),
            "version" => version = Some(parse_version(expect_string(key, value, path)?, path)?),
            "major_version" => {
                major_version = Some(parse_version(expect_string(key, value, path)?, path)?);
            }
            "installed" => match value {
                JsonValue::Bool(flag) => installed = *flag,
                _ => return Err(wrong_type(key, "boolean", path)),
            },
            "prerequisites" => match value {
                JsonValue::Hash(hash) => prereqs = parse_prereqs(hash, path)?,
                _ => return Err(wrong_type(key, "hash", path)),
            },
            _ => {
                return Err(ModelError::UnknownKey {
                    key: key.to_string(),
                    path: path.to_string(),
                })
            }
        }
    }

    let name = name.ok_or_else(|| ModelError::MissingKey {
        key: "name",
        path: path.to_string(),
    })?;
    let version = version.ok_or_else(|| ModelError::MissingKey {
        key: "version",
        path: path.to_string(),
    })?;

    let mut parcel = Parcel::new(name, nickname, Some(version), included)
        .map_err(|e| e.in_file(path))?
        .with_installed(installed)
        .with_prereqs(prereqs);
    if let Some(major_version) = major_version {
        parcel = parcel.with_major_version(major_version);
    }
    Ok(parcel)
}

fn parse_prereqs(hash: &JsonHash, path: &str) -> Result<Vec<Prereq>, ModelError> {
    hash.iter()
        .map(|(name, value)| {
            let version = match value {
                JsonValue::String(vstring) => Some(parse_version(vstring, path)?),
                JsonValue::Null => None,
                _ => {
                    return Err(ModelError::InvalidPrereqValue {
                        name: name.to_string(),
                        path: path.to_string(),
                    })
                }
            };
            Prereq::new(name, version).map_err(|e| e.in_file(path))
        })
        .collect()
}

fn parse_version(vstring: &str, path: &str) -> Result<Version, ModelError> {
    Version::parse(vstring).map_err(|e| e.in_file(path))
}

fn expect_string<'a>(key: &str, value: &'a JsonValue, path: &str) -> Result<&'a str, ModelError> {
    match value {
        JsonValue::String(string) => Ok(string),
        _ => Err(wrong_type(key, "string", path)),
    }
}

#[cold]
pub(crate) fn wrong_type(key: &str, expected: &'static str, path: &str) -> ModelError {
    ModelError::WrongType {
        key: key.to_string(),
        expected,
        path: path.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
