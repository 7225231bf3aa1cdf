// Copyright (C) Microsoft Corporation. All rights reserved.

//! Proc macro for the `#[test_with_tracing::test]` attribute.
//!
//! The attribute behaves like `#[test]` but first installs the process-wide
//! tracing subscriber from `test_with_tracing::init`, so log output from the
//! code under test is captured per test.
//!
//! ```ignore
//! use test_with_tracing::test;
//!
//! #[test]
//! fn test_round_trip() {
//!     tracing::debug!("captured in the test output");
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;
use syn::spanned::Spanned;
use syn::ItemFn;

/// Test attribute that initializes tracing before running the body.
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as ItemFn);
    expand_test(attr.into(), item)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn expand_test(attr: proc_macro2::TokenStream, item: ItemFn) -> syn::Result<proc_macro2::TokenStream> {
    if !attr.is_empty() {
        return Err(syn::Error::new(
            attr.span(),
            "#[test_with_tracing::test] takes no arguments",
        ));
    }
    if item.sig.asyncness.is_some() {
        return Err(syn::Error::new(
            item.sig.fn_token.span(),
            "#[test_with_tracing::test] does not support async functions",
        ));
    }

    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = item;

    Ok(quote! {
        #[::core::prelude::v1::test]
        #(#attrs)*
        #vis #sig {
            ::test_with_tracing::init();
            #block
        }
    })
}
