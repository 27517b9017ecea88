//! The set of parcels, files and classes built from source and include
//! directories.
//!
//! Source dirs hold the code being compiled; include dirs hold headers of
//! already installed parcels. Parcels and files found in include dirs are
//! marked `included`, and an include-dir entry never overrides one that
//! was found earlier.

use std::fs;
use std::path::{Path, PathBuf};

use cfc_model::{ClassId, FileSpec, ModelContext, ModelError, Parcel, ParcelId};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::cfh::{self, Decl};
use crate::timestamps::{is_current, Timestamps};
use crate::{discover, Block, HierarchyError, SourceFile};

/// Source and include dirs plus everything parsed from them.
#[derive(Clone, Debug)]
pub struct Hierarchy {
    dest: PathBuf,
    include_dest: PathBuf,
    source_dest: PathBuf,
    source_dirs: Vec<PathBuf>,
    include_dirs: Vec<PathBuf>,
    files: Vec<SourceFile>,
    file_by_class: FxHashMap<ClassId, usize>,
}

impl Hierarchy {
    /// Create an empty hierarchy generating code below `dest`.
    pub fn new(dest: impl Into<PathBuf>) -> Self {
        let dest = dest.into();
        Hierarchy {
            include_dest: dest.join("include"),
            source_dest: dest.join("source"),
            dest,
            source_dirs: Vec::new(),
            include_dirs: Vec::new(),
            files: Vec::new(),
            file_by_class: FxHashMap::default(),
        }
    }

    pub fn dest(&self) -> &Path {
        &self.dest
    }

    /// Where generated headers go: `dest/include`.
    pub fn include_dest(&self) -> &Path {
        &self.include_dest
    }

    /// Where generated C sources go: `dest/source`.
    pub fn source_dest(&self) -> &Path {
        &self.source_dest
    }

    pub fn source_dirs(&self) -> &[PathBuf] {
        &self.source_dirs
    }

    pub fn include_dirs(&self) -> &[PathBuf] {
        &self.include_dirs
    }

    /// Add a source dir. Adding the same dir twice has no effect.
    pub fn add_source_dir(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        if !self.source_dirs.contains(&dir) {
            self.source_dirs.push(dir);
        }
    }

    /// Add an include dir. Adding the same dir twice has no effect.
    pub fn add_include_dir(&mut self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        if !self.include_dirs.contains(&dir) {
            self.include_dirs.push(dir);
        }
    }

    /// Parse every parcel spec and header, then resolve prereqs and sort
    /// the classes of each parcel.
    pub fn build(&mut self, ctx: &mut ModelContext) -> Result<(), HierarchyError> {
        for (dir, included) in self.all_dirs() {
            self.parse_parcel_files(ctx, &dir, included)?;
        }

        let mut seen: FxHashMap<PathBuf, PathBuf> = FxHashMap::default();
        for (dir, included) in self.all_dirs() {
            self.parse_cfh_files(ctx, &dir, included, &mut seen)?;
        }

        let parcel_ids = ctx.parcel_ids().to_vec();
        for &id in &parcel_ids {
            if !ctx.parcel(id).included() {
                ctx.check_prereqs(id)?;
            }
        }
        for &id in &parcel_ids {
            if !ctx.parcel(id).classes().is_empty() {
                ctx.connect_and_sort_classes(id)?;
            }
        }

        tracing::debug!(
            parcels = parcel_ids.len(),
            files = self.files.len(),
            "built hierarchy"
        );
        Ok(())
    }

    /// Source dirs first, then include dirs.
    fn all_dirs(&self) -> Vec<(PathBuf, bool)> {
        self.source_dirs
            .iter()
            .map(|dir| (dir.clone(), false))
            .chain(self.include_dirs.iter().map(|dir| (dir.clone(), true)))
            .collect()
    }

    fn parse_parcel_files(
        &self,
        ctx: &mut ModelContext,
        dir: &Path,
        included: bool,
    ) -> Result<(), HierarchyError> {
        for path in discover(dir, "cfp")? {
            let parcel = Parcel::from_file(&FileSpec::new(&path, included))?;
            if included && ctx.fetch_parcel(parcel.name()).is_some() {
                tracing::debug!(
                    parcel = parcel.name(),
                    path = %path.display(),
                    "skipping included parcel found earlier"
                );
                continue;
            }
            ctx.register(parcel)?;
        }
        Ok(())
    }

    /// `seen` maps each relative path to the dir it was first found in.
    fn parse_cfh_files(
        &mut self,
        ctx: &mut ModelContext,
        dir: &Path,
        included: bool,
        seen: &mut FxHashMap<PathBuf, PathBuf>,
    ) -> Result<(), HierarchyError> {
        for path in discover(dir, "cfh")? {
            let path_part = path.strip_prefix(dir).unwrap_or(&path).with_extension("");
            if let Some(first) = seen.get(&path_part) {
                if included {
                    continue;
                }
                return Err(HierarchyError::FoundTwice {
                    path_part: path_part.with_extension("cfh").display().to_string(),
                    first: first.display().to_string(),
                    second: dir.display().to_string(),
                });
            }
            seen.insert(path_part.clone(), dir.to_path_buf());

            let shown = path.display().to_string();
            let text = fs::read_to_string(&path).map_err(|e| HierarchyError::io(&shown, e))?;
            let file = self.add_file(ctx, &text, path, path_part, included)?;
            tracing::debug!(path = %shown, blocks = file.blocks().len(), "parsed file");
        }
        Ok(())
    }

    fn add_file(
        &mut self,
        ctx: &mut ModelContext,
        text: &str,
        path: PathBuf,
        path_part: PathBuf,
        included: bool,
    ) -> Result<&SourceFile, HierarchyError> {
        let shown = path.display().to_string();
        let index = self.files.len();
        let mut file_parcel: Option<ParcelId> = None;
        let mut blocks = Vec::new();

        for decl in cfh::scan(text, &shown)? {
            match decl {
                Decl::Parcel(name) => {
                    let id = parcel_in_file(ctx, name, &shown)?;
                    if file_parcel.is_none() {
                        file_parcel = Some(id);
                    }
                    blocks.push(Block::Parcel(id));
                }
                Decl::Class { parcel, decl } => {
                    let parcel_id = parcel_in_file(ctx, parcel, &shown)?;
                    let parcel = ctx.parcel(parcel_id);
                    if !included && parcel.included() {
                        return Err(HierarchyError::SourceClassInIncludedParcel {
                            class: decl.name,
                            parcel: parcel.name().to_string(),
                        });
                    }
                    let class_id = ctx.add_class(parcel_id, decl)?;
                    self.file_by_class.insert(class_id, index);
                    blocks.push(Block::Class(class_id));
                }
                Decl::CBlock(code) => blocks.push(Block::CBlock(code)),
            }
        }

        self.files
            .push(SourceFile::new(path, path_part, included, file_parcel, blocks));
        Ok(&self.files[index])
    }

    /// Every parsed file: source dirs first, then include dirs, each in
    /// path order.
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// The file that declares `class_id`.
    pub fn file_for_class(&self, class_id: ClassId) -> Option<&SourceFile> {
        self.file_by_class
            .get(&class_id)
            .map(|&index| &self.files[index])
    }

    /// Every class, parents before children.
    ///
    /// Parcels are listed after their prereqs, otherwise in registration
    /// order; each contributes its sorted class list.
    pub fn ordered_classes(&self, ctx: &ModelContext) -> Vec<ClassId> {
        let mut order = Vec::new();
        let mut seen = FxHashSet::default();
        for &id in ctx.parcel_ids() {
            visit_parcel(ctx, id, &mut seen, &mut order);
        }
        order
            .into_iter()
            .flat_map(|id| ctx.parcel(id).classes().iter().copied())
            .collect()
    }

    /// Mark files whose generated header is out of date, together with
    /// every file declaring a subclass of a class in such a file.
    ///
    /// With `force`, every file is marked. Returns whether any file is
    /// marked.
    pub fn propagate_modified(
        &mut self,
        ctx: &ModelContext,
        timestamps: &dyn Timestamps,
        force: bool,
    ) -> bool {
        for file in &mut self.files {
            let h_path = file.h_path(&self.include_dest);
            file.modified = force || !is_current(timestamps, file.path(), &h_path);
            tracing::debug!(
                path = %file.path().display(),
                stale = file.modified,
                "checked generated header"
            );
        }

        // Parents precede children, so one pass reaches the fixed point.
        let mut class_modified = vec![false; ctx.classes().len()];
        for class_id in self.ordered_classes(ctx) {
            let Some(&index) = self.file_by_class.get(&class_id) else {
                continue;
            };
            let parent_modified = ctx
                .class(class_id)
                .parent()
                .is_some_and(|parent| class_modified[parent.index()]);
            let modified = self.files[index].modified || parent_modified;
            class_modified[class_id.index()] = modified;
            if modified && !self.files[index].modified {
                tracing::debug!(
                    class = ctx.class(class_id).name(),
                    "parent modified, marking file"
                );
                self.files[index].modified = true;
            }
        }

        self.files.iter().any(SourceFile::modified)
    }

    /// Load `parcel_<host_lang>.json` for every parcel read from a file.
    #[allow(clippy::unused_self, reason = "parcels live in the context, not the hierarchy")]
    pub fn read_host_data_json(
        &self,
        ctx: &mut ModelContext,
        host_lang: &str,
    ) -> Result<(), HierarchyError> {
        for id in ctx.parcel_ids().to_vec() {
            ctx.read_host_data_json(id, host_lang)?;
        }
        Ok(())
    }
}

/// Resolve a parcel named in the header at `path`.
fn parcel_in_file(ctx: &ModelContext, name: String, path: &str) -> Result<ParcelId, ModelError> {
    ctx.parcel_id(&name).ok_or_else(|| ModelError::UnknownParcel {
        name,
        path: path.to_string(),
    })
}

/// Post-order over prereqs: `id` lands after everything it requires.
fn visit_parcel(
    ctx: &ModelContext,
    id: ParcelId,
    seen: &mut FxHashSet<ParcelId>,
    order: &mut Vec<ParcelId>,
) {
    if !seen.insert(id) {
        return;
    }
    for prereq in ctx.prereq_parcels(id) {
        visit_parcel(ctx, prereq, seen, order);
    }
    order.push(id);
}
