//! Classes: nodes of the inheritance forest.
//!
//! A class is owned by exactly one parcel. Its parent is declared by name
//! and linked to a [`ClassId`] once, during `connect_and_sort_classes`.
//! Child links are back-references used for traversal only.

use bitflags::bitflags;
use smallvec::SmallVec;

use crate::{ClassId, JsonHash, ModelError, Parcel, ParcelId};

bitflags! {
    /// Declaration modifiers of a class.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ClassFlags: u8 {
        const PUBLIC = 1 << 0;
        const FINAL = 1 << 1;
        /// Only inert (static) members; never instantiated.
        const INERT = 1 << 2;
        const ABSTRACT = 1 << 3;
    }
}

/// A class as declared in a header, before it joins a parcel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,
    pub nickname: Option<String>,
    pub parent: Option<String>,
    pub flags: ClassFlags,
}

impl ClassDecl {
    pub fn new(name: impl Into<String>) -> Self {
        ClassDecl {
            name: name.into(),
            nickname: None,
            parent: None,
            flags: ClassFlags::empty(),
        }
    }

    #[must_use]
    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: ClassFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// A class registered in a parcel.
#[derive(Clone, Debug)]
pub struct Class {
    id: ClassId,
    parcel: ParcelId,
    name: String,
    nickname: String,
    struct_sym: String,
    full_struct_sym: String,
    short_class_var: String,
    full_class_var: String,
    flags: ClassFlags,
    included: bool,
    parent_name: Option<String>,
    pub(crate) parent: Option<ClassId>,
    pub(crate) children: SmallVec<[ClassId; 4]>,
    pub(crate) host_data: Option<JsonHash>,
}

impl Class {
    pub(crate) fn new(
        id: ClassId,
        parcel_id: ParcelId,
        parcel: &Parcel,
        decl: ClassDecl,
    ) -> Result<Self, ModelError> {
        if !is_valid_class_name(&decl.name) {
            return Err(ModelError::InvalidName {
                what: "class name",
                value: decl.name,
            });
        }
        if let Some(parent) = decl.parent.as_deref() {
            if !is_valid_class_name(parent) {
                return Err(ModelError::InvalidName {
                    what: "parent class name",
                    value: parent.to_string(),
                });
            }
        }

        let struct_sym = decl
            .name
            .rsplit("::")
            .next()
            .unwrap_or(&decl.name)
            .to_string();
        let nickname = match decl.nickname {
            Some(nick) if !is_valid_identifier(&nick) => {
                return Err(ModelError::InvalidName {
                    what: "class nickname",
                    value: nick,
                });
            }
            Some(nick) => nick,
            None => struct_sym.clone(),
        };
        let short_class_var = struct_sym.to_ascii_uppercase();

        Ok(Class {
            id,
            parcel: parcel_id,
            full_struct_sym: format!("{}{struct_sym}", parcel.prefix()),
            full_class_var: format!("{}{short_class_var}", parcel.upper_prefix()),
            short_class_var,
            struct_sym,
            nickname,
            name: decl.name,
            flags: decl.flags,
            included: parcel.included(),
            parent_name: decl.parent,
            parent: None,
            children: SmallVec::new(),
            host_data: None,
        })
    }

    pub fn id(&self) -> ClassId {
        self.id
    }

    /// Owning parcel.
    pub fn parcel(&self) -> ParcelId {
        self.parcel
    }

    /// Fully qualified name, e.g. `Animal::Dog`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    /// Unprefixed struct symbol: the last component of the name.
    pub fn struct_sym(&self) -> &str {
        &self.struct_sym
    }

    /// Struct symbol with the parcel prefix, e.g. `anml_Dog`.
    pub fn full_struct_sym(&self) -> &str {
        &self.full_struct_sym
    }

    /// Class variable name without prefix, e.g. `DOG`.
    pub fn short_class_var(&self) -> &str {
        &self.short_class_var
    }

    /// Class variable name with prefix, e.g. `ANML_DOG`.
    pub fn full_class_var(&self) -> &str {
        &self.full_class_var
    }

    pub fn flags(&self) -> ClassFlags {
        self.flags
    }

    pub fn is_inert(&self) -> bool {
        self.flags.contains(ClassFlags::INERT)
    }

    /// A final class may not be subclassed.
    pub fn is_final(&self) -> bool {
        self.flags.contains(ClassFlags::FINAL)
    }

    pub fn is_abstract(&self) -> bool {
        self.flags.contains(ClassFlags::ABSTRACT)
    }

    /// True iff the owning parcel came from an include dir.
    pub fn included(&self) -> bool {
        self.included
    }

    /// Declared parent class name.
    pub fn parent_name(&self) -> Option<&str> {
        self.parent_name.as_deref()
    }

    /// Linked parent; `None` for roots and before linkage.
    pub fn parent(&self) -> Option<ClassId> {
        self.parent
    }

    /// Linked children, in link order. May include classes of other parcels.
    pub fn children(&self) -> &[ClassId] {
        &self.children
    }

    /// Host-specific metadata from the host side file.
    pub fn host_data(&self) -> Option<&JsonHash> {
        self.host_data.as_ref()
    }
}

/// `Foo::Bar::Baz`: components start with an uppercase letter.
fn is_valid_class_name(name: &str) -> bool {
    name.split("::").all(|component| {
        component
            .bytes()
            .next()
            .is_some_and(|b| b.is_ascii_uppercase())
            && is_valid_identifier(component)
    })
}

fn is_valid_identifier(ident: &str) -> bool {
    let mut bytes = ident.bytes();
    bytes
        .next()
        .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
