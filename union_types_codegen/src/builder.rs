// union_types_codegen/src/builder.rs

//! Build-script entry point: expands `*.union` schema files into `OUT_DIR`.
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     union_types_codegen::Builder::new()
//!         .source_dir("schemas")
//!         .serde(true)
//!         .generate()
//!         .unwrap();
//! }
//!
//! // src/lib.rs
//! include!(concat!(env!("OUT_DIR"), "/shapes.rs"));
//! ```

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use quote::quote;
use walkdir::WalkDir;

use crate::config::GeneratorOptions;
use crate::driver::{Generator, SourceUnit};
use crate::error::{BuildError, Result};
use crate::parse::Ast;

pub const DEFAULT_EXTENSION: &str = "union";

#[derive(Debug, Clone)]
pub struct Builder {
    source_dirs: Vec<PathBuf>,
    out_dir: Option<PathBuf>,
    extension: String,
    emit_rerun_if_changed: bool,
    options: GeneratorOptions,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            source_dirs: Vec::new(),
            out_dir: None,
            extension: DEFAULT_EXTENSION.to_string(),
            emit_rerun_if_changed: true,
            options: GeneratorOptions::default().with_serde(true),
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory searched recursively for schema files. Defaults to
    /// `src` when none is given.
    pub fn source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dirs.push(dir.into());
        self
    }

    /// Output directory; defaults to `$OUT_DIR`.
    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = Some(dir.into());
        self
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub const fn emit_rerun_if_changed(mut self, emit: bool) -> Self {
        self.emit_rerun_if_changed = emit;
        self
    }

    pub fn serde(mut self, serde: bool) -> Self {
        self.options.serde = serde;
        self
    }

    pub fn case_field(mut self, case_field: impl Into<String>) -> Self {
        self.options.case_field = case_field.into();
        self
    }

    pub fn runtime(mut self, runtime: syn::Path) -> Self {
        self.options.runtime = runtime;
        self
    }

    /// Expands every schema and returns the aggregate files written, one
    /// `<stem>.rs` per schema, in discovery order.
    pub fn generate(&self) -> Result<Vec<PathBuf>> {
        let out_dir = match &self.out_dir {
            Some(dir) => dir.clone(),
            None => env::var_os("OUT_DIR")
                .map(PathBuf::from)
                .ok_or(BuildError::MissingOutDir)?,
        };
        let generator = Generator::new(self.options.clone());

        let mut written = Vec::new();
        for schema in self.discover() {
            if self.emit_rerun_if_changed {
                println!("cargo:rerun-if-changed={}", schema.display());
            }
            written.push(self.generate_schema(&generator, &schema, &out_dir)?);
        }
        if self.emit_rerun_if_changed {
            for dir in self.source_dirs() {
                println!("cargo:rerun-if-changed={}", dir.display());
            }
        }
        Ok(written)
    }

    fn source_dirs(&self) -> Vec<PathBuf> {
        if self.source_dirs.is_empty() {
            vec![PathBuf::from("src")]
        } else {
            self.source_dirs.clone()
        }
    }

    /// Schema files under the source directories, sorted for stable output.
    fn discover(&self) -> Vec<PathBuf> {
        let mut found: Vec<PathBuf> = self
            .source_dirs()
            .iter()
            .flat_map(|dir| WalkDir::new(dir).into_iter().filter_map(std::result::Result::ok))
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|path| path.extension().is_some_and(|ext| ext == self.extension.as_str()))
            .collect();
        found.sort();
        found.dedup();
        found
    }

    fn generate_schema(
        &self,
        generator: &Generator,
        schema: &Path,
        out_dir: &Path,
    ) -> Result<PathBuf> {
        tracing::debug!("discovered schema {}", schema.display());
        let content = fs::read_to_string(schema).map_err(|source| BuildError::Io {
            path: schema.to_path_buf(),
            source,
        })?;
        let parse_error = |source| BuildError::Parse {
            path: schema.to_path_buf(),
            source,
        };
        let ast: Ast = syn::parse_str(&content).map_err(parse_error)?;

        let stem = schema
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let unit_dir = out_dir.join(&stem);

        let mut units: Vec<SourceUnit> = Vec::new();
        let aggregate = generator
            .render(&ast.items, &mut Vec::new(), &mut |unit| {
                let path = unit_dir.join(&unit.hint_name).to_string_lossy().into_owned();
                units.push(unit);
                Ok(quote!(include!(#path);))
            })
            .map_err(parse_error)?;

        let mut seen: HashMap<&str, &str> = HashMap::new();
        for unit in &units {
            if let Some(first) = seen.insert(&unit.hint_name, &unit.full_name) {
                return Err(BuildError::DuplicateHint {
                    hint: unit.hint_name.clone(),
                    first: first.to_string(),
                    second: unit.full_name.clone(),
                });
            }
        }

        create_dir(&unit_dir)?;
        for unit in &units {
            write(&unit_dir.join(&unit.hint_name), &unit.tokens.to_string())?;
        }
        let aggregate_path = out_dir.join(format!("{stem}.rs"));
        write(&aggregate_path, &aggregate.to_string())?;
        Ok(aggregate_path)
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}
