// union_types_codegen/src/symbols.rs

use proc_macro2::TokenStream;
use quote::quote;
use syn::{GenericArgument, GenericParam, Ident, PathArguments, ReturnType, Type, Visibility};

use crate::names;
use crate::parse::{Member, ModuleDecl, UnionDecl};

/// One enclosing module of a declaration, outermost first.
#[derive(Clone)]
pub struct Container {
    pub attrs: Vec<syn::Attribute>,
    pub vis: Visibility,
    pub ident: Ident,
}

impl Container {
    pub fn of(module: &ModuleDecl) -> Self {
        Container {
            attrs: module.attrs.clone(),
            vis: module.vis.clone(),
            ident: module.ident.clone(),
        }
    }
}

/// Read-only queries over a union declaration and its nesting chain.
pub struct TypeSymbol<'a> {
    decl: &'a UnionDecl,
    containers: &'a [Container],
}

impl<'a> TypeSymbol<'a> {
    pub const fn new(decl: &'a UnionDecl, containers: &'a [Container]) -> Self {
        TypeSymbol { decl, containers }
    }

    pub const fn decl(&self) -> &'a UnionDecl {
        self.decl
    }

    pub const fn ident(&self) -> &'a Ident {
        &self.decl.ident
    }

    pub const fn accessibility(&self) -> &'a Visibility {
        &self.decl.vis
    }

    /// Enclosing modules from outermost to innermost.
    pub const fn nesting(&self) -> &'a [Container] {
        self.containers
    }

    /// Module chain and type name joined with `::`, e.g. `geometry::Shape`.
    pub fn full_name(&self) -> String {
        self.nesting()
            .iter()
            .map(|c| names::unraw(&c.ident))
            .chain(std::iter::once(names::unraw(self.ident())))
            .collect::<Vec<_>>()
            .join("::")
    }

    /// Dotted name with the generic arity suffix, e.g. ``geometry.Option`1``.
    pub fn metadata_name(&self) -> String {
        let mut name = self
            .containers
            .iter()
            .map(|c| names::unraw(&c.ident))
            .chain(std::iter::once(names::unraw(self.ident())))
            .collect::<Vec<_>>()
            .join(".");
        if self.is_generic() {
            name.push_str(&format!("`{}", self.decl.generics.params.len()));
        }
        name
    }

    /// The unqualified name with its generic parameter list, e.g. `Option<T>`.
    pub fn local_name(&self) -> TokenStream {
        let ident = self.ident();
        let (_, ty_generics, _) = self.decl.generics.split_for_impl();
        quote!(#ident #ty_generics)
    }

    pub fn is_generic(&self) -> bool {
        !self.decl.generics.params.is_empty()
    }

    pub fn has_lifetimes(&self) -> bool {
        self.decl.generics.lifetimes().next().is_some()
    }

    pub fn methods(&self) -> impl Iterator<Item = &'a Member> {
        self.decl.members.iter()
    }

    /// Whether `ret` names this very type: `Self`, or the type's identifier
    /// carrying its own generic parameters in declaration order.
    pub fn is_self_return(&self, ret: &ReturnType) -> bool {
        match ret {
            ReturnType::Default => false,
            ReturnType::Type(_, ty) => self.is_self_type(ty),
        }
    }

    pub fn is_self_type(&self, ty: &Type) -> bool {
        let Type::Path(type_path) = ty else {
            return false;
        };
        if type_path.qself.is_some() || type_path.path.segments.len() != 1 {
            return false;
        }
        let segment = &type_path.path.segments[0];
        if segment.ident == "Self" {
            return segment.arguments.is_empty();
        }
        if segment.ident != self.decl.ident {
            return false;
        }

        let params = &self.decl.generics.params;
        match &segment.arguments {
            PathArguments::None => params.is_empty(),
            PathArguments::AngleBracketed(args) => {
                args.args.len() == params.len()
                    && args
                        .args
                        .iter()
                        .zip(params.iter())
                        .all(|(arg, param)| argument_names_param(arg, param))
            }
            PathArguments::Parenthesized(_) => false,
        }
    }
}

fn argument_names_param(arg: &GenericArgument, param: &GenericParam) -> bool {
    match (arg, param) {
        (GenericArgument::Lifetime(lifetime), GenericParam::Lifetime(def)) => {
            lifetime.ident == def.lifetime.ident
        }
        (GenericArgument::Type(Type::Path(path)), GenericParam::Type(def)) => {
            path.qself.is_none() && path.path.is_ident(&def.ident)
        }
        (GenericArgument::Type(Type::Path(path)), GenericParam::Const(def)) => {
            path.qself.is_none() && path.path.is_ident(&def.ident)
        }
        (GenericArgument::Const(syn::Expr::Path(path)), GenericParam::Const(def)) => {
            path.path.is_ident(&def.ident)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{Item, parse};
    use quote::quote;
    use syn::parse_quote;

    fn decl(ts: TokenStream) -> UnionDecl {
        match parse(ts).unwrap().items.pop() {
            Some(Item::Union(decl)) => decl,
            _ => panic!("expected union declaration"),
        }
    }

    fn container(name: &str) -> Container {
        Container {
            attrs: Vec::new(),
            vis: Visibility::Inherited,
            ident: Ident::new(name, proc_macro2::Span::call_site()),
        }
    }

    #[test]
    fn test_names() {
        let decl = decl(quote! {
            #[union_type]
            pub struct Option<T> {}
        });
        let containers = vec![container("common"), container("inner")];
        let symbol = TypeSymbol::new(&decl, &containers);

        assert_eq!(symbol.full_name(), "common::inner::Option");
        assert_eq!(symbol.metadata_name(), "common.inner.Option`1");
        assert_eq!(symbol.local_name().to_string(), quote!(Option<T>).to_string());
        assert!(symbol.is_generic());
        assert!(!symbol.has_lifetimes());
        assert_eq!(symbol.nesting().len(), 2);
    }

    #[test]
    fn test_metadata_name_without_generics() {
        let decl = decl(quote! {
            #[union_type]
            pub struct Shape {}
        });
        let symbol = TypeSymbol::new(&decl, &[]);
        assert_eq!(symbol.metadata_name(), "Shape");
        assert_eq!(symbol.full_name(), "Shape");
    }

    #[test]
    fn test_self_type_matching() {
        let decl = decl(quote! {
            #[union_type]
            pub struct Pair<'a, T, const N: usize> {}
        });
        let symbol = TypeSymbol::new(&decl, &[]);

        assert!(symbol.is_self_type(&parse_quote!(Self)));
        assert!(symbol.is_self_type(&parse_quote!(Pair<'a, T, N>)));
        assert!(!symbol.is_self_type(&parse_quote!(Pair<'a, T>)));
        assert!(!symbol.is_self_type(&parse_quote!(Pair<'a, U, N>)));
        assert!(!symbol.is_self_type(&parse_quote!(Pair<'a, i32, N>)));
        assert!(!symbol.is_self_type(&parse_quote!(other::Pair<'a, T, N>)));
        assert!(!symbol.is_self_type(&parse_quote!(Other)));
        assert!(!symbol.is_self_type(&parse_quote!(&Self)));
        assert!(!symbol.is_self_return(&ReturnType::Default));
    }
}
