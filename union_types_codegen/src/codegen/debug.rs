// union_types_codegen/src/codegen/debug.rs

use proc_macro2::TokenStream;
use quote::quote;

use crate::lower::{Access, Ir};

/// `Debug` rendering as `Case(arg, ...)`, or just `Case` when nullary.
pub fn debug(ir: &Ir) -> TokenStream {
    let arms = ir.cases.iter().map(|case| {
        let pattern = ir.pattern(case);
        let name = &case.name;
        if case.params.is_empty() {
            quote!(#pattern => f.write_str(#name))
        } else {
            let bindings = case.params.iter().map(|p| &p.binding);
            quote!(#pattern => f.debug_tuple(#name) #(.field(#bindings))* .finish())
        }
    });
    let body = ir.match_repr(Access::Borrowed, arms);
    let bounds = ir.shape.type_param_bounds(quote!(::core::fmt::Debug));

    ir.shape.impl_trait(
        quote!(::core::fmt::Debug),
        &bounds,
        quote! {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                #body
            }
        },
    )
}
