// union_types_codegen/src/driver.rs

use proc_macro2::TokenStream;
use quote::quote;
use syn::Result;

use crate::analyze::{analyze, reject_case_field_clash};
use crate::codegen::codegen;
use crate::config::{GeneratorOptions, UnionConfig};
use crate::lower::lower;
use crate::parse::{Ast, Item, UnionDecl, parse};
use crate::shape::{StorageKind, TypeShape, reopen};
use crate::symbols::{Container, TypeSymbol};

/// Generated code for one union declaration.
#[derive(Debug, Clone)]
pub struct SourceUnit {
    /// Stable output key, e.g. ``geometry.Option`1.rs``.
    pub hint_name: String,
    /// Module path and type name, e.g. `geometry::Option`.
    pub full_name: String,
    /// The generated items, wrapped in the declaration's modules.
    pub tokens: TokenStream,
}

/// Runs the parse → analyze → lower → codegen pipeline over a schema.
#[derive(Debug, Clone, Default)]
pub struct Generator {
    options: GeneratorOptions,
}

impl Generator {
    pub const fn new(options: GeneratorOptions) -> Self {
        Generator { options }
    }

    pub const fn options(&self) -> &GeneratorOptions {
        &self.options
    }

    /// Expands a whole schema in place: verbatim items are kept, modules are
    /// rebuilt, and every union declaration is replaced by its generated code.
    pub fn expand(&self, input: TokenStream) -> Result<TokenStream> {
        let ast = parse(input)?;
        self.render(&ast.items, &mut Vec::new(), &mut |unit| Ok(unit.tokens))
    }

    /// One unit per union declaration, each wrapped in its enclosing modules.
    pub fn units(&self, ast: &Ast) -> Result<Vec<SourceUnit>> {
        let mut units = Vec::new();
        self.collect_units(&ast.items, &mut Vec::new(), &mut units)?;
        Ok(units)
    }

    fn collect_units(
        &self,
        items: &[Item],
        containers: &mut Vec<Container>,
        units: &mut Vec<SourceUnit>,
    ) -> Result<()> {
        for item in items {
            match item {
                Item::Union(decl) => {
                    let mut unit = self.synthesize(decl, containers)?;
                    unit.tokens = reopen(containers, unit.tokens);
                    units.push(unit);
                }
                Item::Module(module) => {
                    containers.push(Container::of(module));
                    self.collect_units(&module.items, containers, units)?;
                    containers.pop();
                }
                Item::Verbatim(_) => {}
            }
        }
        Ok(())
    }

    /// Rebuilds the module tree, asking `place` what to put where each union
    /// was declared.
    pub(crate) fn render<F>(
        &self,
        items: &[Item],
        containers: &mut Vec<Container>,
        place: &mut F,
    ) -> Result<TokenStream>
    where
        F: FnMut(SourceUnit) -> Result<TokenStream>,
    {
        let mut out = TokenStream::new();
        for item in items {
            let tokens = match item {
                Item::Union(decl) => place(self.synthesize(decl, containers)?)?,
                Item::Module(module) => {
                    let container = Container::of(module);
                    containers.push(container.clone());
                    let inner = self.render(&module.items, containers, place)?;
                    containers.pop();
                    reopen(std::slice::from_ref(&container), inner)
                }
                Item::Verbatim(item) => quote!(#item),
            };
            out.extend(tokens);
        }
        Ok(out)
    }

    /// The full pipeline for one declaration. The returned tokens are not
    /// wrapped in the declaration's modules.
    pub(crate) fn synthesize(
        &self,
        decl: &UnionDecl,
        containers: &[Container],
    ) -> Result<SourceUnit> {
        let symbol = TypeSymbol::new(decl, containers);
        let config = UnionConfig::from_marker(&decl.marker, &self.options)?;
        let model = analyze(&symbol)?;
        if config.serde {
            reject_case_field_clash(&model, &config.case_field)?;
        }
        let storage = if config.shared {
            StorageKind::Shared
        } else {
            StorageKind::Inline
        };
        let shape = TypeShape::resolve(&symbol, storage)?;

        let hint_name = hint_name(&symbol);
        let full_name = symbol.full_name();
        if config.serde && symbol.has_lifetimes() {
            tracing::debug!("{hint_name}: borrows data, only Serialize is generated");
        }
        tracing::debug!(
            "{} ({}): {} case(s), default case: {}",
            hint_name,
            symbol.local_name(),
            model.cases.len(),
            model
                .default_case()
                .map_or("none", |case| case.pascal_name.as_str())
        );

        let ir = lower(model, shape, config, full_name.clone());
        Ok(SourceUnit {
            hint_name,
            full_name,
            tokens: codegen(&ir),
        })
    }
}

pub(crate) fn hint_name(symbol: &TypeSymbol) -> String {
    format!("{}.rs", symbol.metadata_name())
}
