// union_types_codegen/src/shape.rs

use proc_macro2::TokenStream;
use quote::quote;
use syn::punctuated::Punctuated;
use syn::{Attribute, Generics, Ident, Path, Result, Token, Visibility, WherePredicate};

use crate::symbols::{Container, TypeSymbol};

/// Derives that are generated and therefore dropped from the declaration.
const GENERATED_DERIVES: &[&str] = &["Debug", "Default"];

/// Derives that must also hold for the private storage enum.
const MIRRORED_DERIVES: &[&str] = &[
    "Clone",
    "Copy",
    "PartialEq",
    "Eq",
    "PartialOrd",
    "Ord",
    "Hash",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Payload lives inline: value semantics.
    Inline,
    /// Payload lives behind an `Arc`: reference semantics.
    Shared,
}

/// Everything needed to re-declare the union type and reopen it with `impl`
/// blocks.
#[derive(Clone)]
pub struct TypeShape {
    /// Attributes other than derives.
    pub attrs: Vec<Attribute>,
    pub derives: Vec<Path>,
    pub mirrored_derives: Vec<Path>,
    pub vis: Visibility,
    pub storage: StorageKind,
    pub ident: Ident,
    pub generics: Generics,
}

impl TypeShape {
    pub fn resolve(symbol: &TypeSymbol, storage: StorageKind) -> Result<Self> {
        let decl = symbol.decl();
        let mut attrs = Vec::new();
        let mut derives = Vec::new();
        for attr in &decl.attrs {
            if attr.path().is_ident("derive") {
                let paths =
                    attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)?;
                derives.extend(paths);
            } else {
                attrs.push(attr.clone());
            }
        }
        derives.retain(|path| !derive_named(path, GENERATED_DERIVES));

        let mut mirrored_derives: Vec<Path> = derives
            .iter()
            .filter(|path| derive_named(path, MIRRORED_DERIVES))
            .cloned()
            .collect();
        let mirrors_clone = mirrored_derives
            .iter()
            .any(|path| derive_named(path, &["Clone"]));
        if storage == StorageKind::Shared && !mirrors_clone {
            mirrored_derives.insert(0, syn::parse_quote!(::core::clone::Clone));
        }

        Ok(TypeShape {
            attrs,
            derives,
            mirrored_derives,
            vis: symbol.accessibility().clone(),
            storage,
            ident: symbol.ident().clone(),
            generics: decl.generics.clone(),
        })
    }

    pub fn is_shared(&self) -> bool {
        self.storage == StorageKind::Shared
    }

    pub fn derive_attr(&self) -> TokenStream {
        derive_attr(&self.derives)
    }

    pub fn mirrored_derive_attr(&self) -> TokenStream {
        derive_attr(&self.mirrored_derives)
    }

    /// `impl<..> Type<..> where .. { body }`
    pub fn impl_block(&self, body: TokenStream) -> TokenStream {
        self.impl_block_where(&[], body)
    }

    /// An inherent `impl` block with extra where-clause predicates.
    pub fn impl_block_where(
        &self,
        extra_bounds: &[WherePredicate],
        body: TokenStream,
    ) -> TokenStream {
        let ident = &self.ident;
        let generics = self.with_bounds(extra_bounds);
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
        quote! {
            impl #impl_generics #ident #ty_generics #where_clause {
                #body
            }
        }
    }

    /// `impl<..> Trait for Type<..> where .., extra { body }`
    pub fn impl_trait(
        &self,
        trait_path: TokenStream,
        extra_bounds: &[WherePredicate],
        body: TokenStream,
    ) -> TokenStream {
        let ident = &self.ident;
        let generics = self.with_bounds(extra_bounds);
        let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
        quote! {
            impl #impl_generics #trait_path for #ident #ty_generics #where_clause {
                #body
            }
        }
    }

    /// Like [`TypeShape::impl_trait`] with an extra leading lifetime, for
    /// traits such as `Deserialize<'de>`.
    pub fn impl_trait_with_lifetime(
        &self,
        lifetime: &syn::Lifetime,
        trait_path: TokenStream,
        extra_bounds: &[WherePredicate],
        body: TokenStream,
    ) -> TokenStream {
        let ident = &self.ident;
        let mut generics = self.with_bounds(extra_bounds);
        generics
            .params
            .insert(0, syn::GenericParam::Lifetime(syn::LifetimeParam::new(lifetime.clone())));
        let (impl_generics, _, where_clause) = generics.split_for_impl();
        let (_, ty_generics, _) = self.generics.split_for_impl();
        quote! {
            impl #impl_generics #trait_path for #ident #ty_generics #where_clause {
                #body
            }
        }
    }

    /// `Type<..>` as written inside the declaring module.
    pub fn self_type(&self) -> TokenStream {
        let ident = &self.ident;
        let (_, ty_generics, _) = self.generics.split_for_impl();
        quote!(#ident #ty_generics)
    }

    /// One `bound` predicate per type parameter, e.g. `T: ::core::fmt::Debug`.
    pub fn type_param_bounds(&self, bound: TokenStream) -> Vec<WherePredicate> {
        self.generics
            .type_params()
            .map(|param| {
                let ident = &param.ident;
                syn::parse_quote!(#ident: #bound)
            })
            .collect()
    }

    fn with_bounds(&self, extra_bounds: &[WherePredicate]) -> Generics {
        let mut generics = self.generics.clone();
        if !extra_bounds.is_empty() {
            generics
                .make_where_clause()
                .predicates
                .extend(extra_bounds.iter().cloned());
        }
        generics
    }
}

fn derive_named(path: &Path, names: &[&str]) -> bool {
    path.segments
        .last()
        .is_some_and(|segment| names.iter().any(|name| segment.ident == name))
}

fn derive_attr(paths: &[Path]) -> TokenStream {
    if paths.is_empty() {
        quote!()
    } else {
        quote!(#[derive(#(#paths),*)])
    }
}

/// Reopens the module chain around `body`, innermost last. Each level
/// contributes one header and one closing delimiter. Nothing is imported into
/// the modules: generated code only names items by absolute path.
pub fn reopen(containers: &[Container], body: TokenStream) -> TokenStream {
    containers.iter().rev().fold(body, |inner, container| {
        let Container { attrs, vis, ident } = container;
        quote! {
            #(#attrs)*
            #vis mod #ident {
                #inner
            }
        }
    })
}
