// union_types_codegen/src/codegen/matchers.rs

use proc_macro2::TokenStream;
use quote::quote;

use crate::lower::{Access, CaseRef, Ir};

/// `match_with`, `match_or`, `do_with` and `do_or`.
pub fn matchers(ir: &Ir) -> TokenStream {
    let consuming = consuming(ir);
    let borrowing = borrowing(ir);

    // Moving out of shared storage clones the payload when it is aliased
    let bounds = if ir.shape.is_shared() {
        ir.shape.type_param_bounds(quote!(::core::clone::Clone))
    } else {
        Vec::new()
    };

    let consuming = ir.shape.impl_block_where(&bounds, consuming);
    let borrowing = ir.shape.impl_block(borrowing);
    quote! {
        #consuming
        #borrowing
    }
}

fn arguments(case: &CaseRef) -> Vec<&syn::Ident> {
    case.params.iter().map(|p| &p.binding).collect()
}

fn consuming(ir: &Ir) -> TokenStream {
    let otherwise = &ir.otherwise;

    let exhaustive_params = ir.cases.iter().map(|case| {
        let callback = &case.callback;
        let tys = case.params.iter().map(|p| &p.ty);
        quote!(#callback: impl ::core::ops::FnOnce(#(#tys),*) -> __Out)
    });
    let exhaustive_arms = ir.cases.iter().map(|case| {
        let pattern = ir.pattern(case);
        let callback = &case.callback;
        let args = arguments(case);
        quote!(#pattern => #callback(#(#args),*))
    });
    let exhaustive = ir.match_repr(Access::Owned, exhaustive_arms);

    let partial_params = ir.cases.iter().map(|case| {
        let callback = &case.callback;
        let tys = case.params.iter().map(|p| &p.ty);
        quote!(#callback: ::core::option::Option<&mut dyn ::core::ops::FnMut(#(#tys),*) -> __Out>)
    });
    let partial_arms = ir.cases.iter().map(|case| {
        let pattern = ir.pattern(case);
        let callback = &case.callback;
        let args = arguments(case);
        quote! {
            #pattern => match #callback {
                ::core::option::Option::Some(__handler) => __handler(#(#args),*),
                ::core::option::Option::None => #otherwise(),
            }
        }
    });
    let partial = ir.match_repr(Access::Owned, partial_arms);

    quote! {
        /// Consumes the value, calling the callback of the active case with
        /// its arguments.
        pub fn match_with<__Out>(self, #(#exhaustive_params),*) -> __Out {
            #exhaustive
        }

        /// Like `match_with`, with `None` for the cases handled by `otherwise`.
        #[allow(unused_variables)]
        pub fn match_or<__Out>(
            self,
            #otherwise: impl ::core::ops::FnOnce() -> __Out,
            #(#partial_params),*
        ) -> __Out {
            #partial
        }
    }
}

fn borrowing(ir: &Ir) -> TokenStream {
    let otherwise = &ir.otherwise;

    let exhaustive_params = ir.cases.iter().map(|case| {
        let callback = &case.callback;
        let tys = case.params.iter().map(|p| &p.ty);
        quote!(#callback: impl ::core::ops::FnOnce(#(&#tys),*))
    });
    let exhaustive_arms = ir.cases.iter().map(|case| {
        let pattern = ir.pattern(case);
        let callback = &case.callback;
        let args = arguments(case);
        quote!(#pattern => #callback(#(#args),*))
    });
    let exhaustive = ir.match_repr(Access::Borrowed, exhaustive_arms);

    let partial_params = ir.cases.iter().map(|case| {
        let callback = &case.callback;
        let tys = case.params.iter().map(|p| &p.ty);
        quote!(#callback: ::core::option::Option<&mut dyn ::core::ops::FnMut(#(&#tys),*)>)
    });
    let partial_arms = ir.cases.iter().map(|case| {
        let pattern = ir.pattern(case);
        let callback = &case.callback;
        let args = arguments(case);
        quote! {
            #pattern => match #callback {
                ::core::option::Option::Some(__handler) => __handler(#(#args),*),
                ::core::option::Option::None => #otherwise(),
            }
        }
    });
    let partial = ir.match_repr(Access::Borrowed, partial_arms);

    quote! {
        /// Calls the callback of the active case with borrowed arguments.
        pub fn do_with(&self, #(#exhaustive_params),*) {
            #exhaustive
        }

        /// Like `do_with`, with `None` for the cases handled by `otherwise`.
        #[allow(unused_variables)]
        pub fn do_or(
            &self,
            #otherwise: impl ::core::ops::FnOnce(),
            #(#partial_params),*
        ) {
            #partial
        }
    }
}
