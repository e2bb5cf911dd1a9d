// union_types_codegen/src/codegen/constructors.rs

use proc_macro2::TokenStream;
use quote::quote;

use crate::lower::{CaseRef, Ir, Payload};

/// One constructor per case, followed by the hand-written members.
pub fn constructors(ir: &Ir) -> TokenStream {
    let constructors = ir.cases.iter().map(|case| constructor(ir, case));
    let members = ir.members.iter().map(|member| {
        let attrs = &member.attrs;
        let vis = &member.vis;
        let sig = &member.sig;
        let body = &member.body;
        quote! {
            #(#attrs)*
            #vis #sig #body
        }
    });

    ir.shape.impl_block(quote! {
        #(#constructors)*
        #(#members)*
    })
}

fn constructor(ir: &Ir, case: &CaseRef) -> TokenStream {
    let attrs = &case.attrs;
    let vis = &case.vis;
    let ctor = &case.ctor;
    let repr = &ir.repr;
    let variant = &case.variant;
    let params = case.params.iter().map(|p| {
        let ident = &p.ident;
        let ty = &p.ty;
        quote!(#ident: #ty)
    });
    let idents: Vec<_> = case.params.iter().map(|p| &p.ident).collect();

    let body = match case.payload {
        Payload::Zero => quote!(<Self as ::core::default::Default>::default()),
        Payload::Sentinel => {
            let value = ir.wrap(quote!(#repr::#variant));
            quote!(Self { repr: #value })
        }
        Payload::Single => {
            let value = ir.wrap(quote!(#repr::#variant(#(#idents)*)));
            quote!(Self { repr: #value })
        }
        Payload::Aggregate => {
            let value = ir.wrap(quote!(#repr::#variant { #(#idents),* }));
            quote!(Self { repr: #value })
        }
    };

    quote! {
        #(#attrs)*
        #[must_use]
        #vis fn #ctor(#(#params),*) -> Self {
            #body
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::tests::{ir, method};
    use crate::shape::StorageKind;

    fn body(f: &syn::ImplItemFn) -> String {
        let block = &f.block;
        quote!(#block).to_string()
    }

    #[test]
    fn test_constructor_bodies() {
        let ir = ir(
            quote! {
                #[union_type]
                pub struct Shape {
                    /// The empty shape.
                    pub fn empty() -> Self;
                    pub fn circle(radius: f64) -> Self;
                    pub(crate) fn rect(width: f64, mut height: f64) -> Shape;
                }
            },
            StorageKind::Inline,
        );
        let file: syn::File = syn::parse2(constructors(&ir)).unwrap();

        let empty = method(&file, "empty");
        assert!(empty.attrs.iter().any(|a| a.path().is_ident("doc")));
        assert_eq!(
            body(empty),
            quote!({ <Self as ::core::default::Default>::default() }).to_string()
        );
        assert_eq!(
            body(method(&file, "circle")),
            quote!({ Self { repr: __ShapeRepr::Circle(radius) } }).to_string()
        );

        let rect = method(&file, "rect");
        assert!(matches!(rect.vis, syn::Visibility::Restricted(_)));
        assert_eq!(rect.sig.inputs.len(), 2);
        assert_eq!(
            body(rect),
            quote!({ Self { repr: __ShapeRepr::Rect { width, height } } }).to_string()
        );
    }

    #[test]
    fn test_shared_constructors_allocate() {
        let ir = ir(
            quote! {
                #[union_type(shared)]
                pub struct Light {
                    fn red() -> Self;
                    fn green() -> Self;
                }
            },
            StorageKind::Shared,
        );
        let file: syn::File = syn::parse2(constructors(&ir)).unwrap();
        let red = method(&file, "red");
        assert!(matches!(red.vis, syn::Visibility::Inherited));
        assert_eq!(
            body(red),
            quote!({ Self { repr: ::std::sync::Arc::new(__LightRepr::Red) } }).to_string()
        );
    }

    #[test]
    fn test_hand_written_members_are_kept() {
        let ir = ir(
            quote! {
                #[union_type]
                pub struct Flag {
                    pub fn on() -> Self;
                    pub fn off() -> Self;

                    /// Flips the flag.
                    pub fn toggled(&self) -> Self {
                        match self.case() {
                            FlagCase::On => Self::off(),
                            FlagCase::Off => Self::on(),
                        }
                    }
                }
            },
            StorageKind::Inline,
        );
        let file: syn::File = syn::parse2(constructors(&ir)).unwrap();
        let toggled = method(&file, "toggled");
        assert!(toggled.attrs.iter().any(|a| a.path().is_ident("doc")));
        assert!(toggled.sig.receiver().is_some());
    }
}
