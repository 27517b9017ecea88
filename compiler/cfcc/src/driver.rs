//! One compiler invocation: build, resolve, check staleness.

use std::fmt::Write;
use std::path::PathBuf;

use cfc_hierarchy::{FsTimestamps, Hierarchy, HierarchyError};
use cfc_model::ModelContext;

use crate::Options;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}

/// Resolved facts about one class, as the code emitters see them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassInfo {
    pub name: String,
    pub parcel: String,
    pub full_struct_sym: String,
    pub parent: Option<String>,
    pub included: bool,
}

/// Outcome of [`run`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Report {
    /// Every class, parents before children.
    pub classes: Vec<ClassInfo>,
    /// Files whose generated code must be rewritten.
    pub modified_files: Vec<PathBuf>,
}

impl Report {
    pub fn any_modified(&self) -> bool {
        !self.modified_files.is_empty()
    }

    /// Human-readable listing; `verbose` adds symbols and parents.
    pub fn render(&self, verbose: bool) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Classes ({}):", self.classes.len());
        for class in &self.classes {
            if !verbose {
                let _ = writeln!(out, "  {}", class.name);
                continue;
            }
            let _ = write!(out, "  {} [{}] {}", class.name, class.parcel, class.full_struct_sym);
            if let Some(parent) = &class.parent {
                let _ = write!(out, " inherits {parent}");
            }
            if class.included {
                out.push_str(" (included)");
            }
            out.push('\n');
        }

        if self.any_modified() {
            let _ = writeln!(out, "Modified files ({}):", self.modified_files.len());
            for path in &self.modified_files {
                let _ = writeln!(out, "  {}", path.display());
            }
        } else {
            out.push_str("Everything up to date\n");
        }
        out
    }
}

/// Build the hierarchy described by `options` and report what it holds.
pub fn run(options: &Options) -> Result<Report, CliError> {
    let mut ctx = ModelContext::new();
    let mut hierarchy = Hierarchy::new(&options.dest);
    for dir in &options.source_dirs {
        hierarchy.add_source_dir(dir);
    }
    for dir in &options.include_dirs {
        hierarchy.add_include_dir(dir);
    }

    hierarchy.build(&mut ctx)?;
    if let Some(lang) = &options.host {
        hierarchy.read_host_data_json(&mut ctx, lang)?;
    }
    let any_modified = hierarchy.propagate_modified(&ctx, &FsTimestamps, options.force_modified);
    tracing::debug!(any_modified, "propagated modifications");

    let classes = hierarchy
        .ordered_classes(&ctx)
        .into_iter()
        .map(|id| {
            let class = ctx.class(id);
            ClassInfo {
                name: class.name().to_string(),
                parcel: ctx.parcel(class.parcel()).name().to_string(),
                full_struct_sym: class.full_struct_sym().to_string(),
                parent: class.parent().map(|parent| ctx.class(parent).name().to_string()),
                included: class.included(),
            }
        })
        .collect();
    let modified_files = hierarchy
        .files()
        .iter()
        .filter(|file| file.modified())
        .map(|file| file.path().to_path_buf())
        .collect();

    Ok(Report {
        classes,
        modified_files,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
