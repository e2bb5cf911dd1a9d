// Code generation engine for union types.
//
// The pipeline runs once per `#[union_type]` declaration:
// - `parse`: schema tokens into modules, unions and verbatim items
// - `analyze`: case signatures into an ordered case model
// - `shape`: the declared type's header, derives and storage kind
// - `lower`: every identifier the templates need
// - `codegen`: storage, constructors, tag enum, matchers, Debug and serde
//
// `Generator` drives it for the `unions!` macro; `Builder` drives it from
// build scripts over `*.union` files.

mod analyze;
mod builder;
mod codegen;
mod config;
mod driver;
mod error;
mod lower;
mod names;
mod parse;
mod shape;
mod symbols;

pub use builder::{Builder, DEFAULT_EXTENSION};
pub use config::{DEFAULT_CASE_FIELD, GeneratorOptions};
pub use driver::{Generator, SourceUnit};
pub use error::{BuildError, Result};
pub use parse::{Ast, parse};
