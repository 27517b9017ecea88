//! Arena indices for parcels and classes.
//!
//! Ids are only meaningful for the `ModelContext` that issued them and are
//! invalidated by `ModelContext::reap_singletons`.

use std::fmt;

/// Index of a registered parcel.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct ParcelId(u32);

impl ParcelId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "arena length is bounded by declared parcels"
    )]
    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        ParcelId(index as u32)
    }

    /// Position in the context's parcel arena (registration order).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ParcelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParcelId({})", self.0)
    }
}

/// Index of a class owned by some parcel.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct ClassId(u32);

impl ClassId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "arena length is bounded by declared classes"
    )]
    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        ClassId(index as u32)
    }

    /// Position in the context's class arena (declaration order).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}
