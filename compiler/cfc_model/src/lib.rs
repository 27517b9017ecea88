//! CFC Model - Parcels, Classes and their Resolution
//!
//! This crate holds the semantic core of the class-definition compiler:
//! - `Version` and `Prereq` values parsed from parcel specs
//! - A restricted JSON reader for `.cfp` and host side files
//! - `Parcel` and `Class` definitions with derived symbols
//! - `ModelContext`, the arena that owns every parcel and class of one
//!   compiler invocation, together with the parcel registry
//!
//! # Phases
//!
//! ```text
//! register parcels ──→ add classes ──→ check_prereqs ──→ connect_and_sort_classes
//!                                                              │
//!                                   symbol lookup / emitters ←─┘
//! ```
//!
//! All phases fail fast: the first `ModelError` aborts the invocation and
//! the partially built model is not used further.

mod class;
mod context;
mod error;
mod host;
mod ids;
pub mod json;
mod lookup;
mod parcel;
mod prereq;
mod registry;
mod resolve;
mod sort;
mod version;

pub use class::{Class, ClassDecl, ClassFlags};
pub use context::{ModelContext, ModelWarning};
pub use error::{ErrorKind, ModelError};
pub use ids::{ClassId, ParcelId};
pub use json::{JsonHash, JsonValue};
pub use parcel::{FileSpec, Parcel};
pub use prereq::Prereq;
pub use registry::ParcelRegistry;
pub use version::Version;

/// Validate a parcel name, parcel nickname or prereq name.
///
/// Only ASCII letters are allowed; the empty string is rejected.
pub(crate) fn is_valid_parcel_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphabetic())
}
