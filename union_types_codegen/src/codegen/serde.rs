// union_types_codegen/src/codegen/serde.rs

use proc_macro2::{Literal, TokenStream};
use quote::quote;

use crate::lower::{Access, Ir, Payload};

/// `Serialize`, and `Deserialize` unless the type borrows.
pub fn serde(ir: &Ir) -> TokenStream {
    let serialize = serialize(ir);
    let deserialize = ir.deserialize.then(|| deserialize(ir));
    quote! {
        #serialize
        #deserialize
    }
}

fn serialize(ir: &Ir) -> TokenStream {
    let rt = &ir.runtime;
    let case_field = &ir.case_field;

    let arms = ir.cases.iter().map(|case| {
        let pattern = ir.pattern(case);
        if case.payload == Payload::Zero && ir.shape.is_shared() {
            return quote!(#pattern => serializer.serialize_none());
        }

        let name = &case.name;
        let len = Literal::usize_unsuffixed(1 + case.params.len());
        let entries = case.params.iter().map(|p| {
            let wire_name = &p.wire_name;
            let binding = &p.binding;
            quote!(__map.serialize_entry(#wire_name, #binding)?;)
        });
        quote! {
            #pattern => {
                let mut __map = serializer.serialize_map(::core::option::Option::Some(#len))?;
                __map.serialize_entry(#case_field, #name)?;
                #(#entries)*
                __map.end()
            }
        }
    });
    let body = ir.match_repr(Access::Borrowed, arms);
    let bounds = ir
        .shape
        .type_param_bounds(quote!(#rt::__private::serde::Serialize));

    ir.shape.impl_trait(
        quote!(#rt::__private::serde::Serialize),
        &bounds,
        quote! {
            #[allow(unused_imports)]
            fn serialize<__S>(&self, serializer: __S) -> ::core::result::Result<__S::Ok, __S::Error>
            where
                __S: #rt::__private::serde::Serializer,
            {
                use #rt::__private::serde::ser::SerializeMap as _;
                #body
            }
        },
    )
}

fn deserialize(ir: &Ir) -> TokenStream {
    let rt = &ir.runtime;
    let tag = &ir.tag;
    let case_field = &ir.case_field;
    let type_name = &ir.type_name;
    let custom = quote!(<__D::Error as #rt::__private::serde::de::Error>::custom);

    let on_null = if ir.default_case().is_some() {
        quote!(return ::core::result::Result::Ok(<Self as ::core::default::Default>::default()))
    } else {
        quote! {
            return ::core::result::Result::Err(#custom(#rt::UnionError::unexpected_null(#type_name)))
        }
    };

    let arms = ir.cases.iter().map(|case| {
        let variant = &case.variant;
        let ctor = &case.ctor;
        let args = case.params.iter().map(|p| {
            let ty = &p.ty;
            let wire_name = &p.wire_name;
            let read = if p.nullable {
                quote!(field_or_default)
            } else {
                quote!(field)
            };
            quote!(__fields.#read::<#ty>(#wire_name).map_err(#custom)?)
        });
        quote!(#tag::#variant => ::core::result::Result::Ok(Self::#ctor(#(#args),*)))
    });
    let bounds = ir
        .shape
        .type_param_bounds(quote!(#rt::__private::serde::de::DeserializeOwned));
    let lifetime: syn::Lifetime = syn::parse_quote!('de);

    ir.shape.impl_trait_with_lifetime(
        &lifetime,
        quote!(#rt::__private::serde::Deserialize<'de>),
        &bounds,
        quote! {
            fn deserialize<__D>(deserializer: __D) -> ::core::result::Result<Self, __D::Error>
            where
                __D: #rt::__private::serde::Deserializer<'de>,
            {
                let __fields = match #rt::__private::CaseFields::read(deserializer, #type_name, #case_field)? {
                    ::core::option::Option::Some(__fields) => __fields,
                    ::core::option::Option::None => #on_null,
                };
                match __fields.case::<#tag>().map_err(#custom)? {
                    #(#arms,)*
                }
            }
        },
    )
}
