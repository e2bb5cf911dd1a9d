// union_types_codegen/src/codegen/mod.rs

//! Renders a lowered union into Rust items.

use proc_macro2::TokenStream;
use quote::quote;

use crate::lower::Ir;

mod constructors;
mod debug;
mod matchers;
mod serde;
mod storage;
mod tag;

pub fn codegen(ir: &Ir) -> TokenStream {
    let storage = storage::storage(ir);
    let tag = tag::tag(ir);
    let constructors = constructors::constructors(ir);
    let matchers = matchers::matchers(ir);
    let debug = debug::debug(ir);
    let serde = ir.serde.then(|| serde::serde(ir));

    quote! {
        #storage
        #tag
        #constructors
        #matchers
        #debug
        #serde
    }
}
