// union_types_codegen/src/error.rs

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schema error in '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: syn::Error,
    },

    #[error("OUT_DIR is not set; configure an output directory or run from a build script")]
    MissingOutDir,

    #[error("Hint '{hint}' is produced by more than one union ({first} and {second})")]
    DuplicateHint {
        hint: String,
        first: String,
        second: String,
    },
}

pub type Result<T> = std::result::Result<T, BuildError>;
