// union_types_codegen/src/config.rs

use syn::{Attribute, Ident, LitBool, LitStr, Meta, Path, Result};

/// Default name of the JSON field holding the case tag.
pub const DEFAULT_CASE_FIELD: &str = "$case";

/// Options shared by every union a generator expands.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Emit `Serialize`/`Deserialize` impls unless a declaration opts out.
    pub serde: bool,
    /// Case-tag field name used when a declaration does not override it.
    pub case_field: String,
    /// Path of the runtime crate referenced from generated code.
    pub runtime: Path,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            serde: false,
            case_field: DEFAULT_CASE_FIELD.to_string(),
            runtime: syn::parse_quote!(::union_types),
        }
    }
}

impl GeneratorOptions {
    pub fn with_serde(mut self, serde: bool) -> Self {
        self.serde = serde;
        self
    }

    pub fn with_case_field(mut self, case_field: impl Into<String>) -> Self {
        self.case_field = case_field.into();
        self
    }

    pub fn with_runtime(mut self, runtime: Path) -> Self {
        self.runtime = runtime;
        self
    }
}

/// Per-declaration settings read from the `#[union_type(...)]` marker.
#[derive(Debug, Clone)]
pub struct UnionConfig {
    pub case_field: String,
    pub shared: bool,
    pub serde: bool,
    pub tag: Option<Ident>,
    pub runtime: Path,
}

impl UnionConfig {
    pub fn from_options(options: &GeneratorOptions) -> Self {
        UnionConfig {
            case_field: options.case_field.clone(),
            shared: false,
            serde: options.serde,
            tag: None,
            runtime: options.runtime.clone(),
        }
    }

    /// Reads `#[union_type]` or `#[union_type(key = value, flag, ...)]`.
    pub fn from_marker(marker: &Attribute, options: &GeneratorOptions) -> Result<Self> {
        let mut config = Self::from_options(options);
        if matches!(marker.meta, Meta::Path(_)) {
            return Ok(config);
        }

        marker.parse_nested_meta(|meta| {
            if meta.path.is_ident("case_field") {
                let lit: LitStr = meta.value()?.parse()?;
                if lit.value().is_empty() {
                    return Err(syn::Error::new_spanned(lit, "case_field must not be empty"));
                }
                config.case_field = lit.value();
            } else if meta.path.is_ident("shared") {
                config.shared = true;
            } else if meta.path.is_ident("serde") {
                config.serde = if meta.input.peek(syn::Token![=]) {
                    meta.value()?.parse::<LitBool>()?.value
                } else {
                    true
                };
            } else if meta.path.is_ident("tag") {
                let lit: LitStr = meta.value()?.parse()?;
                config.tag = Some(lit.parse()?);
            } else if meta.path.is_ident("crate") {
                let lit: LitStr = meta.value()?.parse()?;
                config.runtime = lit.parse()?;
            } else {
                return Err(meta.error("unsupported union_type property"));
            }
            Ok(())
        })?;

        Ok(config)
    }
}
