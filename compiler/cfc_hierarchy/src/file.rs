//! Parsed `.cfh` files.

use std::path::{Path, PathBuf};

use cfc_model::{ClassId, ParcelId};

/// A top-level item of a `.cfh` file, resolved into the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Parcel(ParcelId),
    Class(ClassId),
    /// Verbatim text of a `__C__ ... __END_C__` block.
    CBlock(String),
}

/// One `.cfh` file found under a source or include dir.
#[derive(Clone, Debug)]
pub struct SourceFile {
    path: PathBuf,
    path_part: PathBuf,
    included: bool,
    parcel: Option<ParcelId>,
    blocks: Vec<Block>,
    pub(crate) modified: bool,
}

impl SourceFile {
    pub(crate) fn new(
        path: PathBuf,
        path_part: PathBuf,
        included: bool,
        parcel: Option<ParcelId>,
        blocks: Vec<Block>,
    ) -> Self {
        SourceFile {
            path,
            path_part,
            included,
            parcel,
            blocks,
            modified: false,
        }
    }

    /// Full path of the `.cfh` file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path relative to its directory, without extension: `Animal/Dog`.
    pub fn path_part(&self) -> &Path {
        &self.path_part
    }

    pub fn included(&self) -> bool {
        self.included
    }

    /// Parcel named by the file's `parcel` statement.
    pub fn parcel(&self) -> Option<ParcelId> {
        self.parcel
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Classes declared in this file, in file order.
    pub fn classes(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.blocks.iter().filter_map(|block| match block {
            Block::Class(id) => Some(*id),
            _ => None,
        })
    }

    /// True once `propagate_modified` decided the generated code is stale.
    pub fn modified(&self) -> bool {
        self.modified
    }

    /// Generated header path under `include_dest`: `<path_part>.h`.
    pub fn h_path(&self, include_dest: &Path) -> PathBuf {
        include_dest.join(self.path_part.with_extension("h"))
    }

    /// Generated source path under `source_dest`: `<path_part>.c`.
    pub fn c_path(&self, source_dest: &Path) -> PathBuf {
        source_dest.join(self.path_part.with_extension("c"))
    }
}
