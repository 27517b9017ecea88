//! Struct-symbol lookup.
//!
//! Short symbols (`Dog`) are looked up in the parcel itself and then in its
//! direct prereqs; a short symbol defined by more than one prereq is
//! ambiguous. Full symbols (`anml_Dog`) carry their parcel prefix, which
//! selects the parcel directly.

use crate::{ClassId, ModelContext, ModelError, ModelWarning, ParcelId};

impl ModelContext {
    /// Find a class by unprefixed struct symbol as seen from `parcel_id`.
    ///
    /// Returns `None` if no class matches or if several prereq parcels define
    /// the symbol; the latter also records a [`ModelWarning`].
    pub fn class_by_short_sym(&mut self, parcel_id: ParcelId, sym: &str) -> Option<ClassId> {
        if let Some(found) = self.class_by_struct_sym(parcel_id, sym) {
            return Some(found);
        }

        let matches: Vec<ClassId> = self
            .prereq_parcels(parcel_id)
            .into_iter()
            .filter_map(|prereq| self.class_by_struct_sym(prereq, sym))
            .take(2)
            .collect();
        let (first, second) = match matches[..] {
            [] => return None,
            [only] => return Some(only),
            [first, second, ..] => (first, second),
        };

        let warning = ModelWarning::AmbiguousSymbol {
            symbol: sym.to_string(),
            first: self.class(first).full_struct_sym().to_string(),
            second: self.class(second).full_struct_sym().to_string(),
        };
        self.warn(warning);
        None
    }

    /// Find a class by prefixed struct symbol as seen from `parcel_id`.
    ///
    /// The prefix is everything before the first uppercase character and
    /// must match the prefix of `parcel_id` or one of its direct prereqs.
    pub fn class_by_full_sym(
        &self,
        parcel_id: ParcelId,
        full_sym: &str,
    ) -> Result<Option<ClassId>, ModelError> {
        let split = full_sym
            .find(|c: char| c.is_ascii_uppercase())
            .ok_or_else(|| ModelError::InvalidPrefix {
                symbol: full_sym.to_string(),
            })?;
        let (prefix, short_sym) = full_sym.split_at(split);

        let found = std::iter::once(parcel_id)
            .chain(self.prereq_parcels(parcel_id))
            .filter(|&id| self.parcel(id).prefix() == prefix)
            .find_map(|id| self.class_by_struct_sym(id, short_sym));
        Ok(found)
    }

    fn class_by_struct_sym(&self, parcel_id: ParcelId, sym: &str) -> Option<ClassId> {
        self.parcel(parcel_id)
            .classes()
            .iter()
            .copied()
            .find(|&id| self.class(id).struct_sym() == sym)
    }
}
