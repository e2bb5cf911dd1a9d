// union_types_codegen/src/lower.rs

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::visit_mut::{self, VisitMut};
use syn::{Attribute, Generics, Ident, Path, Type, Visibility};

use crate::analyze::{Case, Model};
use crate::config::UnionConfig;
use crate::parse::Member;
use crate::shape::TypeShape;

/// How a case keeps its arguments inside the storage enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// The default case: the zero value, nothing allocated.
    Zero,
    /// A nullary case that is not the default: a unit sentinel.
    Sentinel,
    /// The single argument is the payload.
    Single,
    /// Several arguments held by one struct-like variant.
    Aggregate,
}

/// Whether a match consumes the storage or inspects it through `&self`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Owned,
    Borrowed,
}

#[derive(Clone)]
pub struct ParamRef {
    /// Declared name; used for constructor parameters and aggregate fields.
    pub ident: Ident,
    /// Positional binding used when unpacking the payload.
    pub binding: Ident,
    pub ty: Type,
    /// `ty` with `Self` spelled out, for use inside the storage enum.
    pub storage_ty: Type,
    /// Field name on the JSON wire.
    pub wire_name: String,
    pub nullable: bool,
}

#[derive(Clone)]
pub struct CaseRef {
    pub index: usize,
    pub ctor: Ident,
    pub vis: Visibility,
    pub attrs: Vec<Attribute>,
    /// Storage and tag variant name.
    pub variant: Ident,
    /// Name of this case's callback parameter in matchers.
    pub callback: Ident,
    pub name: String,
    pub payload: Payload,
    pub params: Vec<ParamRef>,
}

pub struct Ir {
    pub shape: TypeShape,
    pub type_name: String,
    pub tag: Ident,
    pub repr: Ident,
    /// Marker type keeping every generic parameter in use by the storage enum.
    pub phantom: Option<TokenStream>,
    /// Name of the fallback callback in partial matchers.
    pub otherwise: Ident,
    pub cases: Vec<CaseRef>,
    pub members: Vec<Member>,
    pub runtime: Path,
    pub case_field: String,
    pub serde: bool,
    pub deserialize: bool,
}

impl Ir {
    pub fn default_case(&self) -> Option<&CaseRef> {
        self.cases.iter().find(|case| case.payload == Payload::Zero)
    }

    pub fn tag_variants(&self) -> Vec<&Ident> {
        self.cases.iter().map(|case| &case.variant).collect()
    }

    /// Shared storage with a default case keeps that case as `None`, so the
    /// zero value never allocates.
    pub fn detached_default(&self) -> bool {
        self.shape.is_shared() && self.default_case().is_some()
    }

    /// Wraps a storage value in the representation the type holds.
    pub fn wrap(&self, value: TokenStream) -> TokenStream {
        if self.detached_default() {
            quote!(::core::option::Option::Some(::std::sync::Arc::new(#value)))
        } else if self.shape.is_shared() {
            quote!(::std::sync::Arc::new(#value))
        } else {
            value
        }
    }

    /// The storage enum as a place, for matches with no arms.
    pub fn repr_place(&self) -> TokenStream {
        if self.shape.is_shared() {
            quote!(*self.repr)
        } else {
            quote!(self.repr)
        }
    }

    /// The storage enum borrowed from `&self`.
    pub fn repr_ref(&self) -> TokenStream {
        if self.detached_default() {
            quote!(self.repr.as_deref())
        } else if self.shape.is_shared() {
            quote!(&*self.repr)
        } else {
            quote!(&self.repr)
        }
    }

    /// The storage enum moved out of `self`.
    pub fn repr_owned(&self) -> TokenStream {
        if self.detached_default() {
            quote!(self.repr.map(::std::sync::Arc::unwrap_or_clone))
        } else if self.shape.is_shared() {
            quote!(::std::sync::Arc::unwrap_or_clone(self.repr))
        } else {
            quote!(self.repr)
        }
    }

    /// Puts a storage pattern behind the `Some` of a detached default.
    fn present(&self, pattern: TokenStream) -> TokenStream {
        if self.detached_default() {
            quote!(::core::option::Option::Some(#pattern))
        } else {
            pattern
        }
    }

    /// `Repr::Variant`, `Repr::Variant(__0)` or `Repr::Variant { a: __0, b: __1 }`.
    pub fn pattern(&self, case: &CaseRef) -> TokenStream {
        let repr = &self.repr;
        let variant = &case.variant;
        match case.payload {
            Payload::Zero if self.detached_default() => quote!(::core::option::Option::None),
            Payload::Zero | Payload::Sentinel => self.present(quote!(#repr::#variant)),
            Payload::Single => {
                let binding = &case.params[0].binding;
                self.present(quote!(#repr::#variant(#binding)))
            }
            Payload::Aggregate => {
                let fields = case.params.iter().map(|p| &p.ident);
                let bindings = case.params.iter().map(|p| &p.binding);
                self.present(quote!(#repr::#variant { #(#fields: #bindings),* }))
            }
        }
    }

    /// `match` over the storage with the given arms, plus the arm for the
    /// uninhabited marker variant when there is one.
    pub fn match_repr(
        &self,
        access: Access,
        arms: impl IntoIterator<Item = TokenStream>,
    ) -> TokenStream {
        let arms: Vec<TokenStream> = arms.into_iter().collect();
        if arms.is_empty() && self.phantom.is_none() {
            let place = self.repr_place();
            return quote!(match #place {});
        }

        let (scrutinee, never) = match access {
            Access::Owned => (self.repr_owned(), quote!(__never)),
            Access::Borrowed => (self.repr_ref(), quote!(*__never)),
        };
        let repr = &self.repr;
        let marker = match &self.phantom {
            Some(_) => {
                let pattern = self.present(quote!(#repr::__Marker(_, __never)));
                Some(quote!(#pattern => match #never {},))
            }
            // Only the default case: the `Some` side holds an empty enum
            None if self.detached_default() && self.cases.len() == 1 => {
                Some(quote!(::core::option::Option::Some(__never) => match #never {},))
            }
            None => None,
        };
        quote! {
            match #scrutinee {
                #(#arms,)*
                #marker
            }
        }
    }

    /// Like [`Ir::pattern`] but ignoring the payload.
    pub fn wildcard_pattern(&self, case: &CaseRef) -> TokenStream {
        let repr = &self.repr;
        let variant = &case.variant;
        match case.payload {
            Payload::Zero if self.detached_default() => quote!(::core::option::Option::None),
            Payload::Zero | Payload::Sentinel => self.present(quote!(#repr::#variant)),
            Payload::Single => self.present(quote!(#repr::#variant(..))),
            Payload::Aggregate => self.present(quote!(#repr::#variant { .. })),
        }
    }
}

pub fn lower(model: Model, shape: TypeShape, config: UnionConfig, type_name: String) -> Ir {
    let ident = &shape.ident;
    let (_, ty_generics, _) = shape.generics.split_for_impl();
    let tag = config
        .tag
        .clone()
        .unwrap_or_else(|| format_ident!("{}Case", ident));
    let repr = format_ident!("__{}Repr", ident);
    let self_type: Type = syn::parse_quote!(#ident #ty_generics);
    let cases: Vec<CaseRef> = model
        .cases
        .into_iter()
        .map(|case| lower_case(case, &self_type))
        .collect();
    let otherwise = if cases.iter().any(|case| case.callback == "otherwise") {
        format_ident!("__otherwise")
    } else {
        format_ident!("otherwise")
    };
    let deserialize = config.serde && shape.generics.lifetimes().next().is_none();

    Ir {
        type_name,
        tag,
        repr,
        phantom: phantom_of(&shape.generics),
        otherwise,
        cases,
        members: model.members,
        runtime: config.runtime,
        case_field: config.case_field,
        serde: config.serde,
        deserialize,
        shape,
    }
}

fn phantom_of(generics: &Generics) -> Option<TokenStream> {
    let lifetimes: Vec<_> = generics.lifetimes().map(|def| &def.lifetime).collect();
    let types: Vec<_> = generics.type_params().map(|def| &def.ident).collect();
    if lifetimes.is_empty() && types.is_empty() {
        return None;
    }
    Some(quote!(::core::marker::PhantomData<(#(&#lifetimes (),)* #(fn() -> #types,)*)>))
}

/// Spells out `Self` so a type can be used outside the union's own `impl`.
struct ReplaceSelf<'a>(&'a Type);

impl VisitMut for ReplaceSelf<'_> {
    fn visit_type_mut(&mut self, ty: &mut Type) {
        if let Type::Path(type_path) = ty {
            if type_path.qself.is_none() && type_path.path.is_ident("Self") {
                *ty = self.0.clone();
                return;
            }
        }
        visit_mut::visit_type_mut(self, ty);
    }
}

fn lower_case(case: Case, self_type: &Type) -> CaseRef {
    let payload = if case.emits_case_type() {
        Payload::Aggregate
    } else if !case.is_nullary() {
        Payload::Single
    } else if case.is_default {
        Payload::Zero
    } else {
        Payload::Sentinel
    };
    let variant = Ident::new(&case.pascal_name, case.ident.span());
    let params = case
        .parameters
        .into_iter()
        .enumerate()
        .map(|(i, param)| {
            let mut storage_ty = param.ty.clone();
            ReplaceSelf(self_type).visit_type_mut(&mut storage_ty);
            ParamRef {
                binding: Ident::new(&format!("__{i}"), Span::call_site()),
                wire_name: param.camel_name,
                nullable: param.nullable,
                ident: param.ident,
                ty: param.ty,
                storage_ty,
            }
        })
        .collect();

    CaseRef {
        index: case.index,
        callback: case.escaped_name,
        ctor: case.ident,
        vis: case.accessibility,
        attrs: case.attrs,
        variant,
        name: case.pascal_name,
        payload,
        params,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze;
    use crate::config::{GeneratorOptions, UnionConfig};
    use crate::parse::{Item, parse};
    use crate::shape::StorageKind;
    use crate::symbols::TypeSymbol;

    fn ir(ts: TokenStream, storage: StorageKind) -> Ir {
        let Some(Item::Union(decl)) = parse(ts).unwrap().items.pop() else {
            panic!("expected union declaration");
        };
        let symbol = TypeSymbol::new(&decl, &[]);
        let config = UnionConfig::from_marker(&decl.marker, &GeneratorOptions::default()).unwrap();
        let model = analyze(&symbol).unwrap();
        let shape = TypeShape::resolve(&symbol, storage).unwrap();
        lower(model, shape, config, symbol.full_name())
    }

    #[test]
    fn test_payload_kinds() {
        let ir = ir(
            quote! {
                #[union_type]
                pub struct Shape {
                    pub fn circle(radius: f64) -> Self;
                    pub fn rect(width: f64, height: f64) -> Self;
                    pub fn empty() -> Self;
                }
            },
            StorageKind::Inline,
        );

        let payloads: Vec<Payload> = ir.cases.iter().map(|c| c.payload).collect();
        assert_eq!(
            payloads,
            [Payload::Zero, Payload::Single, Payload::Aggregate]
        );
        assert_eq!(ir.tag.to_string(), "ShapeCase");
        assert_eq!(ir.repr.to_string(), "__ShapeRepr");
        assert_eq!(ir.default_case().unwrap().name, "Empty");
        assert_eq!(ir.type_name, "Shape");
    }

    #[test]
    fn test_sentinels_when_no_default() {
        let ir = ir(
            quote! {
                #[union_type(tag = "Signal")]
                pub struct Light {
                    pub fn red() -> Self;
                    pub fn green() -> Self;
                }
            },
            StorageKind::Inline,
        );
        assert!(ir.cases.iter().all(|c| c.payload == Payload::Sentinel));
        assert!(ir.default_case().is_none());
        assert_eq!(ir.tag.to_string(), "Signal");
    }

    #[test]
    fn test_patterns() {
        let ir = ir(
            quote! {
                #[union_type]
                pub struct Shape {
                    pub fn circle(radius: f64) -> Self;
                    pub fn rect(width: f64, height: f64) -> Self;
                }
            },
            StorageKind::Inline,
        );

        assert_eq!(
            ir.pattern(&ir.cases[0]).to_string(),
            quote!(__ShapeRepr::Circle(__0)).to_string()
        );
        assert_eq!(
            ir.pattern(&ir.cases[1]).to_string(),
            quote!(__ShapeRepr::Rect { width: __0, height: __1 }).to_string()
        );
        assert_eq!(
            ir.wildcard_pattern(&ir.cases[1]).to_string(),
            quote!(__ShapeRepr::Rect { .. }).to_string()
        );
        assert_eq!(ir.cases[1].params[0].wire_name, "width");
    }

    #[test]
    fn test_shared_storage_access() {
        let ir = ir(
            quote! {
                #[union_type(shared)]
                pub struct Tree {
                    pub fn leaf(value: u8) -> Self;
                }
            },
            StorageKind::Shared,
        );
        assert!(!ir.detached_default());
        assert_eq!(
            ir.wrap(quote!(x)).to_string(),
            quote!(::std::sync::Arc::new(x)).to_string()
        );
        assert_eq!(ir.repr_ref().to_string(), quote!(&*self.repr).to_string());
        assert_eq!(
            ir.repr_owned().to_string(),
            quote!(::std::sync::Arc::unwrap_or_clone(self.repr)).to_string()
        );
    }

    #[test]
    fn test_shared_default_case_is_detached() {
        let ir = ir(
            quote! {
                #[union_type(shared)]
                pub struct Json {
                    pub fn null() -> Self;
                    pub fn number(value: f64) -> Self;
                }
            },
            StorageKind::Shared,
        );
        assert!(ir.detached_default());
        assert_eq!(
            ir.wrap(quote!(x)).to_string(),
            quote!(::core::option::Option::Some(::std::sync::Arc::new(x))).to_string()
        );
        assert_eq!(ir.repr_ref().to_string(), quote!(self.repr.as_deref()).to_string());
        assert_eq!(
            ir.pattern(&ir.cases[0]).to_string(),
            quote!(::core::option::Option::None).to_string()
        );
        assert_eq!(
            ir.pattern(&ir.cases[1]).to_string(),
            quote!(::core::option::Option::Some(__JsonRepr::Number(__0))).to_string()
        );
    }

    #[test]
    fn test_shared_default_only_covers_the_empty_side() {
        let ir = ir(
            quote! {
                #[union_type(shared)]
                pub struct Blank {
                    pub fn blank() -> Self;
                }
            },
            StorageKind::Shared,
        );
        let arms = ir.cases.iter().map(|case| {
            let pattern = ir.pattern(case);
            quote!(#pattern => 0)
        });
        let expanded: syn::ExprMatch = syn::parse2(ir.match_repr(Access::Borrowed, arms)).unwrap();
        assert_eq!(expanded.arms.len(), 2);
    }

    #[test]
    fn test_self_is_spelled_out_for_storage() {
        let ir = ir(
            quote! {
                #[union_type(shared)]
                pub struct Tree<T> {
                    pub fn leaf(value: T) -> Self;
                    pub fn node(children: Vec<Self>) -> Tree<T>;
                }
            },
            StorageKind::Shared,
        );
        let node = &ir.cases[1].params[0];
        let ty = &node.ty;
        let storage_ty = &node.storage_ty;
        assert_eq!(quote!(#ty).to_string(), quote!(Vec<Self>).to_string());
        assert_eq!(quote!(#storage_ty).to_string(), quote!(Vec<Tree<T> >).to_string());
        assert!(ir.phantom.is_some());
    }

    #[test]
    fn test_empty_match_and_marker_arm() {
        let plain = ir(
            quote! {
                #[union_type]
                pub struct Never {}
            },
            StorageKind::Inline,
        );
        assert!(plain.phantom.is_none());
        assert_eq!(
            plain.match_repr(Access::Borrowed, Vec::new()).to_string(),
            quote!(match self.repr {}).to_string()
        );

        let generic = ir(
            quote! {
                #[union_type]
                pub struct Never<T> {}
            },
            StorageKind::Inline,
        );
        let expanded: syn::ExprMatch =
            syn::parse2(generic.match_repr(Access::Borrowed, Vec::new())).unwrap();
        assert_eq!(expanded.arms.len(), 1);
    }

    #[test]
    fn test_otherwise_is_renamed_on_collision() {
        let ir = ir(
            quote! {
                #[union_type]
                pub struct Choice {
                    pub fn otherwise(value: u8) -> Self;
                    pub fn first(value: u8) -> Self;
                }
            },
            StorageKind::Inline,
        );
        assert_eq!(ir.otherwise.to_string(), "__otherwise");
    }

    #[test]
    fn test_lifetimes_disable_deserialize() {
        let ir = ir(
            quote! {
                #[union_type(serde)]
                pub struct Borrowed<'a> {
                    pub fn text(value: &'a str) -> Self;
                }
            },
            StorageKind::Inline,
        );
        assert!(ir.serde);
        assert!(!ir.deserialize);
    }
}
