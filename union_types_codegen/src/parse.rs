// union_types_codegen/src/parse.rs

use proc_macro2::TokenStream;
use syn::parse::{Parse, ParseStream};
use syn::{Attribute, Block, Generics, Ident, Result, Signature, Token, Visibility, braced, token};

/// A whole schema: the body of a `unions!` invocation or a `*.union` file.
pub struct Ast {
    pub items: Vec<Item>,
}

pub enum Item {
    /// A declaration carrying the `#[union_type]` marker.
    Union(UnionDecl),
    /// An inline module whose items are scanned recursively.
    Module(ModuleDecl),
    /// Any other Rust item, emitted unchanged.
    Verbatim(syn::Item),
}

pub struct ModuleDecl {
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub ident: Ident,
    pub items: Vec<Item>,
}

pub struct UnionDecl {
    pub marker: Attribute,
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub ident: Ident,
    pub generics: Generics,
    pub members: Vec<Member>,
}

/// A function-like member of a union declaration. Case signatures have no
/// body; members with a body are hand-written and kept as-is.
#[derive(Clone)]
pub struct Member {
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub sig: Signature,
    pub body: Option<Block>,
}

impl Member {
    pub const fn is_signature(&self) -> bool {
        self.body.is_none()
    }
}

pub fn is_marker(attr: &Attribute) -> bool {
    attr.path()
        .segments
        .last()
        .is_some_and(|segment| segment.ident == "union_type")
}

impl Parse for Ast {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(Ast {
            items: parse_items(input)?,
        })
    }
}

fn parse_items(input: ParseStream) -> Result<Vec<Item>> {
    let mut items = Vec::new();
    while !input.is_empty() {
        items.push(input.parse()?);
    }
    Ok(items)
}

impl Parse for Item {
    fn parse(input: ParseStream) -> Result<Self> {
        // Look ahead without consuming so verbatim items keep their attributes
        let fork = input.fork();
        let attrs = fork.call(Attribute::parse_outer)?;
        if attrs.iter().any(is_marker) {
            return input.parse().map(Item::Union);
        }

        fork.parse::<Visibility>()?;
        if fork.peek(Token![mod]) && fork.peek2(Ident) && fork.peek3(token::Brace) {
            return input.parse().map(Item::Module);
        }

        input.parse().map(Item::Verbatim)
    }
}

impl Parse for ModuleDecl {
    fn parse(input: ParseStream) -> Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis = input.parse()?;
        input.parse::<Token![mod]>()?;
        let ident = input.parse()?;
        let content;
        braced!(content in input);
        let items = parse_items(&content)?;
        Ok(ModuleDecl {
            attrs,
            vis,
            ident,
            items,
        })
    }
}

impl Parse for UnionDecl {
    fn parse(input: ParseStream) -> Result<Self> {
        let all_attrs = input.call(Attribute::parse_outer)?;
        let (markers, attrs): (Vec<_>, Vec<_>) = all_attrs.into_iter().partition(is_marker);
        let mut markers = markers.into_iter();
        let Some(marker) = markers.next() else {
            return Err(input.error("expected a #[union_type] marker"));
        };
        if let Some(extra) = markers.next() {
            return Err(syn::Error::new_spanned(
                extra,
                "duplicate #[union_type] marker",
            ));
        }

        let vis = input.parse()?;
        input.parse::<Token![struct]>()?;
        let ident = input.parse()?;
        let mut generics: Generics = input.parse()?;
        generics.where_clause = input.parse()?;

        let content;
        braced!(content in input);
        let mut members = Vec::new();
        while !content.is_empty() {
            members.push(content.parse()?);
        }

        Ok(UnionDecl {
            marker,
            attrs,
            vis,
            ident,
            generics,
            members,
        })
    }
}

impl Parse for Member {
    fn parse(input: ParseStream) -> Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis = input.parse()?;
        let sig = input.parse()?;
        let body = if input.peek(Token![;]) {
            input.parse::<Token![;]>()?;
            None
        } else {
            Some(input.parse()?)
        };
        Ok(Member {
            attrs,
            vis,
            sig,
            body,
        })
    }
}

pub fn parse(ts: TokenStream) -> Result<Ast> {
    syn::parse2::<Ast>(ts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn only_union(ast: &Ast) -> &UnionDecl {
        match ast.items.as_slice() {
            [Item::Union(decl)] => decl,
            _ => panic!("expected exactly one union declaration"),
        }
    }

    #[test]
    fn test_parse_single_union() {
        let ast = parse(quote! {
            /// A shape.
            #[union_type]
            #[derive(Clone)]
            pub struct Shape {
                pub fn circle(radius: f64) -> Shape;
                pub fn rect(width: f64, height: f64) -> Self;
            }
        })
        .unwrap();

        let decl = only_union(&ast);
        assert_eq!(decl.ident.to_string(), "Shape");
        assert_eq!(decl.attrs.len(), 2, "doc and derive are kept, marker is split off");
        assert!(is_marker(&decl.marker));
        assert_eq!(decl.members.len(), 2);
        assert!(decl.members.iter().all(Member::is_signature));
        assert_eq!(decl.members[1].sig.inputs.len(), 2);
    }

    #[test]
    fn test_parse_marker_with_arguments_and_path() {
        let ast = parse(quote! {
            #[union_types::union_type(case_field = "kind", shared)]
            struct Token {}
        })
        .unwrap();

        let decl = only_union(&ast);
        assert!(decl.members.is_empty());
        assert!(matches!(decl.vis, Visibility::Inherited));
    }

    #[test]
    fn test_parse_generics_and_where_clause() {
        let ast = parse(quote! {
            #[union_type]
            pub struct Either<L, R> where L: Clone {
                pub fn left(value: L) -> Either<L, R>;
                pub fn right(value: R) -> Either<L, R>;
            }
        })
        .unwrap();

        let decl = only_union(&ast);
        assert_eq!(decl.generics.params.len(), 2);
        assert!(decl.generics.where_clause.is_some());
    }

    #[test]
    fn test_parse_members_with_bodies() {
        let ast = parse(quote! {
            #[union_type]
            pub struct Flag {
                pub fn on() -> Self;
                pub fn off() -> Self;

                pub fn is_on(&self) -> bool {
                    self.case() == FlagCase::On
                }
            }
        })
        .unwrap();

        let decl = only_union(&ast);
        assert_eq!(decl.members.len(), 3);
        assert!(!decl.members[2].is_signature());
    }

    #[test]
    fn test_parse_modules_and_verbatim_items() {
        let ast = parse(quote! {
            use std::fmt;

            pub mod outer {
                #[derive(Debug)]
                pub struct Plain;

                mod inner {
                    #[union_type]
                    pub(crate) struct Deep {
                        fn only() -> Self;
                    }
                }
            }

            mod external;
        })
        .unwrap();

        assert_eq!(ast.items.len(), 3);
        assert!(matches!(ast.items[0], Item::Verbatim(syn::Item::Use(_))));
        assert!(matches!(ast.items[2], Item::Verbatim(syn::Item::Mod(_))));

        let Item::Module(outer) = &ast.items[1] else {
            panic!("expected module");
        };
        assert_eq!(outer.ident.to_string(), "outer");
        assert!(matches!(outer.items[0], Item::Verbatim(syn::Item::Struct(_))));
        let Item::Module(inner) = &outer.items[1] else {
            panic!("expected nested module");
        };
        assert!(matches!(inner.items[0], Item::Union(_)));
    }

    #[test]
    fn test_parse_empty_schema() {
        let ast = parse(quote! {}).unwrap();
        assert!(ast.items.is_empty());
    }

    #[test]
    fn test_parse_error_duplicate_marker() {
        let err = parse(quote! {
            #[union_type]
            #[union_type]
            struct Twice {}
        })
        .err()
        .expect("duplicate marker must be rejected");
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_parse_error_missing_semicolon() {
        let result = parse(quote! {
            #[union_type]
            struct Broken {
                fn a() -> Self
            }
        });
        assert!(result.is_err());
    }
}
