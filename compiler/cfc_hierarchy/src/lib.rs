//! CFC Hierarchy - Source Trees, Files and Staleness
//!
//! A [`Hierarchy`] collects `.cfp` parcel specs and `.cfh` class headers
//! from source and include directories, registers everything in a
//! [`ModelContext`](cfc_model::ModelContext), and resolves the model:
//!
//! ```text
//! discover .cfp ──→ register parcels ──→ discover .cfh ──→ scan + add classes
//!                                                               │
//!      propagate_modified ←── ordered_classes ←── check_prereqs + sort
//! ```
//!
//! File modification times come through the [`Timestamps`] trait so tests
//! can drive staleness without touching the clock.

mod cfh;
mod discovery;
mod error;
mod file;
mod hierarchy;
mod timestamps;

pub use cfh::{scan, Decl};
pub use discovery::discover;
pub use error::HierarchyError;
pub use file::{Block, SourceFile};
pub use hierarchy::Hierarchy;
pub use timestamps::{is_current, FsTimestamps, Timestamps};
