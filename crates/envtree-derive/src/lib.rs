//! Procedural macros for `envtree`.
//!
//! All macros in this crate are re-exported from the `envtree` crate. See its docs for more details
//! and the examples of usage.

// Documentation settings
#![doc(html_root_url = "https://docs.rs/envtree-derive/0.1.0")]
// General settings
#![recursion_limit = "128"]
// Linter settings
#![allow(missing_docs)] // Adding docs here would interfere with docs in the main crate

extern crate proc_macro;

use proc_macro::TokenStream;

mod describe;
mod populate;
mod utils;

#[proc_macro_derive(DescribeConfig, attributes(config))]
pub fn describe_config(input: TokenStream) -> TokenStream {
    describe::impl_describe_config(input)
}

#[proc_macro_derive(PopulateConfig, attributes(config))]
pub fn populate_config(input: TokenStream) -> TokenStream {
    populate::impl_populate_config(input)
}
