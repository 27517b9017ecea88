//! Errors raised while building and resolving the parcel/class model.
//!
//! Every variant is fatal for the current invocation. Messages name the
//! offending identifiers and, where one is known, the source path.

use std::io;

/// Category of a [`ModelError`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed spec text, wrong value type, unknown or missing key.
    Parse,
    /// Duplicate parcel name/nickname, or clashing classes within a parcel.
    IdentityConflict,
    /// Missing prereq parcel, parent class or host-data class.
    UnresolvedReference,
    /// A prereq's version requirement is not met.
    VersionIncompatible,
    /// Malformed symbol passed to a symbol lookup.
    InvalidSymbol,
    /// Prerequisite or inheritance cycle.
    CyclicDependency,
    /// A class inherits from a final class.
    InvalidInheritance,
    /// Inconsistent internal bookkeeping; indicates a bug, not bad input.
    Internal,
}

/// A fatal model error.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    // Parse errors
    #[error("Can't read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Invalid JSON parcel definition in '{path}'")]
    InvalidJson { path: String },
    #[error("Parcel definition must be a hash in '{path}'")]
    NotAHash { path: String },
    #[error("'{key}' must be a {expected} (filepath '{path}')")]
    WrongType {
        key: String,
        expected: &'static str,
        path: String,
    },
    #[error("Unrecognized key: '{key}' (filepath '{path}')")]
    UnknownKey { key: String, path: String },
    #[error("Missing required key '{key}' (filepath '{path}')")]
    MissingKey { key: &'static str, path: String },
    #[error("Invalid prereq value for '{name}' (filepath '{path}')")]
    InvalidPrereqValue { name: String, path: String },
    #[error("Invalid {what}: '{value}'")]
    InvalidName { what: &'static str, value: String },
    #[error("Invalid version string: '{vstring}'")]
    InvalidVersion { vstring: String },
    /// A path-less error raised while reading the file at `path`.
    #[error("{source} (filepath '{path}')")]
    InFile {
        path: String,
        #[source]
        source: Box<ModelError>,
    },

    // Identity conflicts
    #[error("Parcel '{name}' already registered")]
    DuplicateParcelName { name: String },
    #[error("Parcel with nickname '{nickname}' already registered")]
    DuplicateParcelNickname { nickname: String },
    #[error("Two classes with name {name}")]
    DuplicateClassName { name: String },
    #[error("Class name conflict between {first} and {second}")]
    ClassSymbolConflict { first: String, second: String },
    #[error("Class nickname conflict between {first} and {second}")]
    ClassNicknameConflict { first: String, second: String },

    // Unresolved references
    #[error("Parcel '{name}' required by '{required_by}' not found")]
    UnresolvedPrereq { name: String, required_by: String },
    #[error("Parent class {parent} of {class} not found")]
    UnresolvedParent { parent: String, class: String },
    #[error("Parcel '{name}' not found (filepath '{path}')")]
    UnknownParcel { name: String, path: String },
    #[error("Class '{class}' in '{path}' not found")]
    UnknownHostClass { class: String, path: String },

    // Version incompatibilities
    #[error(
        "Version {found} of parcel '{name}' required by '{required_by}' is lower \
         than required version {required}"
    )]
    VersionTooLow {
        name: String,
        required_by: String,
        found: String,
        required: String,
    },
    #[error(
        "Major version {found} of parcel '{name}' required by '{required_by}' is \
         higher than required version {required}"
    )]
    MajorVersionTooHigh {
        name: String,
        required_by: String,
        found: String,
        required: String,
    },

    #[error("Invalid prefix in symbol '{symbol}'")]
    InvalidPrefix { symbol: String },

    // Cycles
    #[error("Class {class} inherits from final class {parent}")]
    FinalParent { class: String, parent: String },

    #[error("Prerequisite cycle: {cycle}")]
    PrereqCycle { cycle: String },
    #[error("Inheritance cycle involving class {class}")]
    InheritanceCycle { class: String },

    #[error(
        "Internal error sorting classes of parcel '{parcel}': expected {expected}, \
         visited {visited}"
    )]
    SortInvariant {
        parcel: String,
        expected: usize,
        visited: usize,
    },
}

impl ModelError {
    /// Taxonomy category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ModelError::Io { .. }
            | ModelError::InvalidJson { .. }
            | ModelError::NotAHash { .. }
            | ModelError::WrongType { .. }
            | ModelError::UnknownKey { .. }
            | ModelError::MissingKey { .. }
            | ModelError::InvalidPrereqValue { .. }
            | ModelError::InvalidName { .. }
            | ModelError::InvalidVersion { .. } => ErrorKind::Parse,
            ModelError::InFile { source, .. } => source.kind(),
            ModelError::DuplicateParcelName { .. }
            | ModelError::DuplicateParcelNickname { .. }
            | ModelError::DuplicateClassName { .. }
            | ModelError::ClassSymbolConflict { .. }
            | ModelError::ClassNicknameConflict { .. } => ErrorKind::IdentityConflict,
            ModelError::UnresolvedPrereq { .. }
            | ModelError::UnresolvedParent { .. }
            | ModelError::UnknownParcel { .. }
            | ModelError::UnknownHostClass { .. } => ErrorKind::UnresolvedReference,
            ModelError::VersionTooLow { .. } | ModelError::MajorVersionTooHigh { .. } => {
                ErrorKind::VersionIncompatible
            }
            ModelError::InvalidPrefix { .. } => ErrorKind::InvalidSymbol,
            ModelError::PrereqCycle { .. } | ModelError::InheritanceCycle { .. } => {
                ErrorKind::CyclicDependency
            }
            ModelError::FinalParent { .. } => ErrorKind::InvalidInheritance,
            ModelError::SortInvariant { .. } => ErrorKind::Internal,
        }
    }

    /// Build an [`ModelError::Io`] for `path`.
    #[cold]
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        ModelError::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach `path` to errors that are raised without one.
    pub(crate) fn in_file(self, path: &str) -> Self {
        match self {
            ModelError::InvalidName { .. } | ModelError::InvalidVersion { .. } => {
                ModelError::InFile {
                    path: path.to_string(),
                    source: Box::new(self),
                }
            }
            other => other,
        }
    }
}
