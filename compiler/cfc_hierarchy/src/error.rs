//! Errors raised while building a [`Hierarchy`](crate::Hierarchy).

use std::io;

use cfc_model::ModelError;

#[derive(Debug, thiserror::Error)]
pub enum HierarchyError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Can't read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{path}:{line}: {message}")]
    Syntax {
        path: String,
        line: usize,
        message: String,
    },

    #[error("File {path_part} found twice in {first} and {second}")]
    FoundTwice {
        path_part: String,
        first: String,
        second: String,
    },

    #[error("Class {class} from source dir found in parcel {parcel} from include dir")]
    SourceClassInIncludedParcel { class: String, parcel: String },
}

impl HierarchyError {
    #[cold]
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        HierarchyError::Io {
            path: path.into(),
            source,
        }
    }
}
