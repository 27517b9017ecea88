//! The compilation context: every parcel and class of one invocation.
//!
//! `ModelContext` replaces process-wide state. It owns the parcel and class
//! arenas together with the [`ParcelRegistry`], and is passed explicitly
//! through every resolution step. Its lifetime is one compiler invocation;
//! `reap_singletons` resets it for reuse.
//!
//! Resolution passes live in sibling modules as further `impl` blocks:
//! - `resolve`: prerequisite closure (`check_prereqs`)
//! - `sort`: parent linkage and ordering (`connect_and_sort_classes`)
//! - `lookup`: struct-symbol lookup
//! - `host`: host-language side files

use std::fmt;

use crate::{Class, ClassDecl, ClassId, ModelError, Parcel, ParcelId, ParcelRegistry};

/// A recoverable condition noticed during resolution.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ModelWarning {
    /// Several prerequisite parcels define the same short struct symbol.
    AmbiguousSymbol {
        symbol: String,
        first: String,
        second: String,
    },
}

impl fmt::Display for ModelWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelWarning::AmbiguousSymbol {
                symbol,
                first,
                second,
            } => write!(
                f,
                "Type '{symbol}' is ambiguous. Do you mean {first} or {second}?"
            ),
        }
    }
}

/// Owner of all parcels and classes of one invocation.
#[derive(Clone, Debug, Default)]
pub struct ModelContext {
    pub(crate) parcels: Vec<Parcel>,
    pub(crate) classes: Vec<Class>,
    registry: ParcelRegistry,
    warnings: Vec<ModelWarning>,
}

impl ModelContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parcel, taking ownership of it.
    ///
    /// Fails without modifying the context if the name or nickname is
    /// already taken.
    pub fn register(&mut self, parcel: Parcel) -> Result<ParcelId, ModelError> {
        let id = ParcelId::from_index(self.parcels.len());
        self.registry.insert(id, parcel.name(), parcel.nickname())?;
        tracing::debug!(
            name = parcel.name(),
            nickname = parcel.nickname(),
            included = parcel.included(),
            "registered parcel"
        );
        self.parcels.push(parcel);
        Ok(id)
    }

    pub fn registry(&self) -> &ParcelRegistry {
        &self.registry
    }

    /// Look up a registered parcel by name.
    pub fn fetch_parcel(&self, name: &str) -> Option<&Parcel> {
        self.registry.fetch(name).map(|id| self.parcel(id))
    }

    pub fn parcel_id(&self, name: &str) -> Option<ParcelId> {
        self.registry.fetch(name)
    }

    /// The parcel behind `id`.
    ///
    /// Panics if `id` was not issued by this context.
    pub fn parcel(&self, id: ParcelId) -> &Parcel {
        &self.parcels[id.index()]
    }

    /// Every registered parcel, in registration order.
    pub fn all_parcels(&self) -> impl Iterator<Item = &Parcel> + '_ {
        self.registry.all().iter().map(|&id| self.parcel(id))
    }

    /// Ids of every registered parcel, in registration order.
    pub fn parcel_ids(&self) -> &[ParcelId] {
        self.registry.all()
    }

    /// Add a class to a registered parcel.
    ///
    /// A parcel never holds two classes with the same name, the same struct
    /// symbol or the same nickname.
    pub fn add_class(&mut self, parcel_id: ParcelId, decl: ClassDecl) -> Result<ClassId, ModelError> {
        let id = ClassId::from_index(self.classes.len());
        let class = Class::new(id, parcel_id, self.parcel(parcel_id), decl)?;

        for &other_id in self.parcel(parcel_id).classes() {
            let other = self.class(other_id);
            if other.name() == class.name() {
                return Err(ModelError::DuplicateClassName {
                    name: class.name().to_string(),
                });
            }
            if other.struct_sym() == class.struct_sym() {
                return Err(ModelError::ClassSymbolConflict {
                    first: other.name().to_string(),
                    second: class.name().to_string(),
                });
            }
            if other.nickname() == class.nickname() {
                return Err(ModelError::ClassNicknameConflict {
                    first: other.name().to_string(),
                    second: class.name().to_string(),
                });
            }
        }

        tracing::debug!(
            class = class.name(),
            parcel = self.parcel(parcel_id).name(),
            "added class"
        );
        self.parcels[parcel_id.index()].classes.push(id);
        self.classes.push(class);
        Ok(id)
    }

    /// The class behind `id`.
    ///
    /// Panics if `id` was not issued by this context.
    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes[id.index()]
    }

    /// Every class, in declaration order.
    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    /// Find a class of `parcel_id` by fully qualified name.
    pub fn fetch_class(&self, parcel_id: ParcelId, name: &str) -> Option<ClassId> {
        self.parcel(parcel_id)
            .classes()
            .iter()
            .copied()
            .find(|&id| self.class(id).name() == name)
    }

    /// Resolved parcels of the direct prereqs of `parcel_id`, in declaration
    /// order. Unregistered prereqs are skipped.
    pub fn prereq_parcels(&self, parcel_id: ParcelId) -> Vec<ParcelId> {
        self.parcel(parcel_id)
            .prereqs()
            .iter()
            .filter_map(|prereq| self.registry.fetch(prereq.name()))
            .collect()
    }

    /// True if `other` is `parcel_id` itself or one of its direct prereqs.
    pub fn has_prereq(&self, parcel_id: ParcelId, other: ParcelId) -> bool {
        let name = self.parcel(other).name();
        parcel_id == other
            || self
                .parcel(parcel_id)
                .prereqs()
                .iter()
                .any(|prereq| prereq.name() == name)
    }

    /// Descendants of `root` in depth-first order, siblings by link order.
    /// `root` itself is not included.
    pub fn descendants(&self, root: ClassId) -> Vec<ClassId> {
        let mut out = Vec::new();
        let mut stack: Vec<ClassId> = self.class(root).children().iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.class(id).children().iter().rev().copied());
        }
        out
    }

    /// Warnings recorded so far.
    pub fn warnings(&self) -> &[ModelWarning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<ModelWarning> {
        std::mem::take(&mut self.warnings)
    }

    pub(crate) fn warn(&mut self, warning: ModelWarning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Release every parcel and class and return to the freshly created
    /// state. Previously issued ids become invalid.
    pub fn reap_singletons(&mut self) {
        self.parcels.clear();
        self.classes.clear();
        self.registry.clear();
        self.warnings.clear();
    }
}
