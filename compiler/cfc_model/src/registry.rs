//! Registry of parcels, keyed by unique name and unique nickname.
//!
//! The registry only holds indices; the parcels themselves live in the
//! `ModelContext` arena. Iteration follows registration order.

use rustc_hash::FxHashMap;

use crate::{ModelError, ParcelId};

#[derive(Clone, Debug, Default)]
pub struct ParcelRegistry {
    order: Vec<ParcelId>,
    by_name: FxHashMap<String, ParcelId>,
    by_nickname: FxHashMap<String, ParcelId>,
}

impl ParcelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail if `name` or `nickname` is already taken.
    pub fn check(&self, name: &str, nickname: &str) -> Result<(), ModelError> {
        if self.by_name.contains_key(name) {
            return Err(ModelError::DuplicateParcelName {
                name: name.to_string(),
            });
        }
        if self.by_nickname.contains_key(nickname) {
            return Err(ModelError::DuplicateParcelNickname {
                nickname: nickname.to_string(),
            });
        }
        Ok(())
    }

    /// Add `id` under `name` and `nickname`. Nothing is inserted on failure.
    pub(crate) fn insert(
        &mut self,
        id: ParcelId,
        name: &str,
        nickname: &str,
    ) -> Result<(), ModelError> {
        self.check(name, nickname)?;
        self.order.push(id);
        self.by_name.insert(name.to_string(), id);
        self.by_nickname.insert(nickname.to_string(), id);
        Ok(())
    }

    /// Look up a parcel by exact name.
    pub fn fetch(&self, name: &str) -> Option<ParcelId> {
        self.by_name.get(name).copied()
    }

    pub fn fetch_by_nickname(&self, nickname: &str) -> Option<ParcelId> {
        self.by_nickname.get(nickname).copied()
    }

    /// Every registered parcel, in registration order.
    pub fn all(&self) -> &[ParcelId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Forget every registration.
    pub fn clear(&mut self) {
        self.order.clear();
        self.by_name.clear();
        self.by_nickname.clear();
    }
}
