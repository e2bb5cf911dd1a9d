// union_types_codegen/src/codegen/storage.rs

use proc_macro2::TokenStream;
use quote::quote;

use crate::lower::{Ir, Payload};

/// The union struct, its private storage enum and the `Default` impl.
pub fn storage(ir: &Ir) -> TokenStream {
    let shape = &ir.shape;
    let attrs = &shape.attrs;
    let derive = shape.derive_attr();
    let mirrored = shape.mirrored_derive_attr();
    let vis = &shape.vis;
    let ident = &shape.ident;
    let generics = &shape.generics;
    let where_clause = &generics.where_clause;
    let (_, ty_generics, _) = generics.split_for_impl();
    let repr = &ir.repr;

    let field_ty = if ir.detached_default() {
        quote!(::core::option::Option<::std::sync::Arc<#repr #ty_generics>>)
    } else if shape.is_shared() {
        quote!(::std::sync::Arc<#repr #ty_generics>)
    } else {
        quote!(#repr #ty_generics)
    };

    // A detached default case is `None` and has no storage variant
    let stored = ir
        .cases
        .iter()
        .filter(|case| !(ir.detached_default() && case.payload == Payload::Zero));
    let variants = stored.map(|case| {
        let variant = &case.variant;
        match case.payload {
            Payload::Zero | Payload::Sentinel => quote!(#variant),
            Payload::Single => {
                let ty = &case.params[0].storage_ty;
                quote!(#variant(#ty))
            }
            Payload::Aggregate => {
                let fields = case.params.iter().map(|p| {
                    let ident = &p.ident;
                    let ty = &p.storage_ty;
                    quote!(#ident: #ty)
                });
                quote!(#variant { #(#fields),* })
            }
        }
    });
    let marker = ir
        .phantom
        .as_ref()
        .map(|phantom| quote!(__Marker(#phantom, ::core::convert::Infallible)));

    let default_impl = ir.default_case().map(|case| {
        let variant = &case.variant;
        let value = if ir.detached_default() {
            quote!(::core::option::Option::None)
        } else {
            quote!(#repr::#variant)
        };
        shape.impl_trait(
            quote!(::core::default::Default),
            &[],
            quote! {
                fn default() -> Self {
                    Self { repr: #value }
                }
            },
        )
    });

    quote! {
        #(#attrs)*
        #derive
        #vis struct #ident #generics #where_clause {
            repr: #field_ty,
        }

        #[doc(hidden)]
        #[allow(non_camel_case_types, dead_code)]
        #mirrored
        enum #repr #generics #where_clause {
            #(#variants,)*
            #marker
        }

        #default_impl
    }
}
