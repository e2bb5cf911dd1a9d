// union_types_codegen/src/codegen/tag.rs

use proc_macro2::{Literal, TokenStream};
use quote::quote;

use crate::lower::{Access, Ir};

/// The tag enumeration, its conversions, and the `case()` accessor.
pub fn tag(ir: &Ir) -> TokenStream {
    let rt = &ir.runtime;
    let vis = &ir.shape.vis;
    let tag = &ir.tag;
    let type_name = &ir.type_name;
    let count = ir.cases.len();
    let variants = ir.tag_variants();
    let names: Vec<&str> = ir.cases.iter().map(|case| case.name.as_str()).collect();
    let indices: Vec<Literal> = ir
        .cases
        .iter()
        .map(|case| Literal::usize_unsuffixed(case.index))
        .collect();
    let doc = format!(" Identifies the active case of [`{}`].", ir.shape.ident);

    let accessor_arms = ir.cases.iter().map(|case| {
        let pattern = ir.wildcard_pattern(case);
        let variant = &case.variant;
        quote!(#pattern => #tag::#variant)
    });
    let accessor = ir.match_repr(Access::Borrowed, accessor_arms);

    let case_accessor = ir.shape.impl_block(quote! {
        /// The active case.
        pub fn case(&self) -> #tag {
            #accessor
        }
    });
    let union_type = ir.shape.impl_trait(
        quote!(#rt::UnionType),
        &[],
        quote! {
            type Case = #tag;
            const TYPE_NAME: &'static str = #type_name;

            fn case(&self) -> #tag {
                Self::case(self)
            }
        },
    );

    quote! {
        #[doc = #doc]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #vis enum #tag {
            #(#variants = #indices,)*
        }

        impl #tag {
            /// Every case, in index order.
            pub const ALL: [Self; #count] = [#(Self::#variants),*];

            /// The PascalCase case name.
            pub const fn name(self) -> &'static str {
                match self {
                    #(Self::#variants => #names,)*
                }
            }

            pub const fn index(self) -> usize {
                match self {
                    #(Self::#variants => #indices,)*
                }
            }
        }

        impl ::core::fmt::Display for #tag {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl ::core::str::FromStr for #tag {
            type Err = #rt::UnionError;

            fn from_str(s: &str) -> ::core::result::Result<Self, #rt::UnionError> {
                match s {
                    #(#names => ::core::result::Result::Ok(Self::#variants),)*
                    _ => ::core::result::Result::Err(#rt::UnionError::unknown_case(#type_name, s)),
                }
            }
        }

        impl ::core::convert::TryFrom<usize> for #tag {
            type Error = #rt::UnionError;

            fn try_from(index: usize) -> ::core::result::Result<Self, #rt::UnionError> {
                match index {
                    #(#indices => ::core::result::Result::Ok(Self::#variants),)*
                    _ => ::core::result::Result::Err(#rt::UnionError::unknown_index(#type_name, index)),
                }
            }
        }

        impl #rt::CaseTag for #tag {
            const ALL: &'static [Self] = &Self::ALL;

            fn name(self) -> &'static str {
                Self::name(self)
            }

            fn index(self) -> usize {
                Self::index(self)
            }
        }

        #case_accessor
        #union_type
    }
}
