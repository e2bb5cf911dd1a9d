// Procedural macro front-end for union types.
//
// `unions!` takes a schema of Rust items and expands every declaration marked
// `#[union_type]` into a closed sum type. The heavy lifting lives in
// `union_types_codegen`; this crate only bridges the compiler's token types.

use proc_macro::TokenStream;
use proc_macro_error::{abort, proc_macro_error};
use union_types_codegen::{Generator, GeneratorOptions};

/// Declares one or more union types.
///
/// Each declaration is a `struct` carrying the `#[union_type]` marker whose
/// body lists case constructors as body-less signatures returning the type
/// itself. Members with a body are kept as ordinary inherent methods; every
/// other item in the schema passes through unchanged. Modules in the schema
/// are ordinary modules: nothing is imported into them, so they `use` what
/// they need as usual.
///
/// A case may not be named after a generated method (`case`, `match_with`,
/// `match_or`, `do_with`, `do_or`), and with serde enabled no parameter may
/// share its JSON name with the case field.
///
/// # Marker properties
///
/// - `case_field = "..."`: JSON field holding the case name (default `"$case"`)
/// - `shared`: keep the payload behind an `Arc`; the default case, if any, is
///   stored as `None` and never allocates
/// - `serde = true|false`: override whether `Serialize`/`Deserialize` are generated
/// - `tag = "..."`: name of the generated tag enum (default `{Type}Case`)
/// - `crate = "..."`: path to the runtime crate (default `::union_types`)
///
/// # Example
///
/// ```ignore
/// union_types::unions! {
///     #[union_type]
///     #[derive(Clone, PartialEq)]
///     pub struct Shape {
///         pub fn empty() -> Self;
///         pub fn circle(radius: f64) -> Self;
///         pub fn rect(width: f64, height: f64) -> Self;
///
///         pub fn area(&self) -> f64 {
///             self.clone().match_with(|| 0.0, |r| 3.14 * r * r, |w, h| w * h)
///         }
///     }
/// }
/// ```
#[proc_macro]
#[proc_macro_error]
pub fn unions(item: TokenStream) -> TokenStream {
    let options = GeneratorOptions::default().with_serde(cfg!(feature = "serde"));
    match Generator::new(options).expand(item.into()) {
        Ok(tokens) => tokens.into(),
        Err(e) => abort!(e.span(), e),
    }
}
