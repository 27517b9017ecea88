//! Parent linkage and parent-first ordering of a parcel's classes.
//!
//! # Algorithm
//!
//! 1. Link every unlinked class to its declared parent, searching this
//!    parcel, then its direct prereqs, then indirect prereqs.
//! 2. Subtree roots are classes without a parent or whose parent lives in
//!    another parcel. They are sorted by name.
//! 3. Depth-first walk from each root; at every node the children that
//!    belong to this parcel are visited in name order.
//!
//! The result replaces the parcel's class list. Code generation relies on
//! it: a subclass's generated code embeds its parent's layout, so parents
//! must be emitted first.

use rustc_hash::FxHashSet;

use crate::{ClassId, ModelContext, ModelError, ParcelId};

impl ModelContext {
    /// Link parents and sort the classes of `parcel_id` parent-first.
    ///
    /// Parents are linked only once, so calling this again is harmless.
    pub fn connect_and_sort_classes(&mut self, parcel_id: ParcelId) -> Result<(), ModelError> {
        let class_ids = self.parcel(parcel_id).classes().to_vec();

        for &class_id in &class_ids {
            self.link_parent(parcel_id, class_id)?;
        }

        let mut roots: Vec<ClassId> = class_ids
            .iter()
            .copied()
            .filter(|&id| {
                self.class(id)
                    .parent()
                    .map_or(true, |parent| self.class(parent).parcel() != parcel_id)
            })
            .collect();
        self.sort_by_name(&mut roots);

        let mut sorted = Vec::with_capacity(class_ids.len());
        let mut stack: Vec<ClassId> = roots.into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            sorted.push(id);
            let mut kids: Vec<ClassId> = self
                .class(id)
                .children()
                .iter()
                .copied()
                .filter(|&kid| self.class(kid).parcel() == parcel_id)
                .collect();
            self.sort_by_name(&mut kids);
            stack.extend(kids.into_iter().rev());
        }

        if sorted.len() != class_ids.len() {
            // Classes unreachable from any root have a looping parent chain.
            let visited: FxHashSet<ClassId> = sorted.iter().copied().collect();
            let mut stuck: Vec<ClassId> = class_ids
                .iter()
                .copied()
                .filter(|id| !visited.contains(id))
                .collect();
            self.sort_by_name(&mut stuck);
            if let Some(&first) = stuck.first() {
                return Err(ModelError::InheritanceCycle {
                    class: self.class(first).name().to_string(),
                });
            }
            return Err(ModelError::SortInvariant {
                parcel: self.parcel(parcel_id).name().to_string(),
                expected: class_ids.len(),
                visited: sorted.len(),
            });
        }

        tracing::debug!(
            parcel = self.parcel(parcel_id).name(),
            classes = sorted.len(),
            "sorted classes"
        );
        self.parcels[parcel_id.index()].classes = sorted;
        Ok(())
    }

    fn link_parent(&mut self, parcel_id: ParcelId, class_id: ClassId) -> Result<(), ModelError> {
        let class = self.class(class_id);
        if class.parent().is_some() {
            return Ok(());
        }
        let Some(parent_name) = class.parent_name() else {
            return Ok(());
        };

        let parent_id = self.find_class_in_scope(parcel_id, parent_name).ok_or_else(|| {
            ModelError::UnresolvedParent {
                parent: parent_name.to_string(),
                class: class.name().to_string(),
            }
        })?;
        if self.class(parent_id).is_final() {
            return Err(ModelError::FinalParent {
                class: class.name().to_string(),
                parent: parent_name.to_string(),
            });
        }
        tracing::trace!(
            class = class.name(),
            parent = parent_name,
            "linked parent"
        );

        let parent_parcel = self.class(parent_id).parcel();
        self.classes[class_id.index()].parent = Some(parent_id);
        self.classes[parent_id.index()].children.push(class_id);
        if parent_parcel != parcel_id && !self.parcel(parcel_id).inherited.contains(&parent_parcel) {
            self.parcels[parcel_id.index()].inherited.push(parent_parcel);
        }
        Ok(())
    }

    /// Find a class by name visible from `parcel_id`: the parcel itself
    /// first, then its direct prereqs, then indirect prereqs, breadth-first.
    pub fn find_class_in_scope(&self, parcel_id: ParcelId, name: &str) -> Option<ClassId> {
        let mut seen = FxHashSet::default();
        seen.insert(parcel_id);
        let mut level = vec![parcel_id];

        while !level.is_empty() {
            for &id in &level {
                if let Some(found) = self.fetch_class(id, name) {
                    return Some(found);
                }
            }
            let mut next = Vec::new();
            for &id in &level {
                for prereq in self.prereq_parcels(id) {
                    if seen.insert(prereq) {
                        next.push(prereq);
                    }
                }
            }
            level = next;
        }
        None
    }

    fn sort_by_name(&self, ids: &mut [ClassId]) {
        ids.sort_by(|&a, &b| self.class(a).name().cmp(self.class(b).name()));
    }
}
