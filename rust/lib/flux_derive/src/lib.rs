//! Attribute macros for campus flux types.
//!
//! - `#[state("path")]` marks a struct stored in the state tree.
//! - `#[request("path")]` marks a struct emitted as a request payload.
//!
//! Both add `pub const PATH: &'static str` and fill in missing derives:
//! states get `Debug, Clone, PartialEq`, requests get `Debug, Clone`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, ItemStruct};

/// Define a state type.
///
/// ```ignore
/// #[state("nav/state")]
/// pub struct NavMenu {
///     pub rows: Vec<NavRow>,
/// }
/// ```
#[proc_macro_attribute]
pub fn state(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as ItemStruct);
    expand(attr.into(), item, &["Debug", "Clone", "PartialEq"])
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Define a request type.
///
/// ```ignore
/// #[request("nav/toggle")]
/// pub struct NavToggleReq {
///     pub id: i64,
/// }
/// ```
#[proc_macro_attribute]
pub fn request(attr: TokenStream, item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as ItemStruct);
    expand(attr.into(), item, &["Debug", "Clone"])
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

fn expand(attr: TokenStream2, mut item: ItemStruct, wanted: &[&str]) -> syn::Result<TokenStream2> {
    let path = parse_path(attr)?;

    let present = collect_derives(&item);
    let missing: Vec<syn::Ident> = wanted
        .iter()
        .filter(|w| !present.iter().any(|p| p == *w))
        .map(|w| syn::Ident::new(w, proc_macro2::Span::call_site()))
        .collect();
    if !missing.is_empty() {
        // Derives go first so user attributes like #[serde(..)] stay valid.
        item.attrs.insert(0, syn::parse_quote!(#[derive(#(#missing),*)]));
    }

    let name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();

    Ok(quote! {
        #item

        impl #impl_generics #name #ty_generics #where_clause {
            /// Flux path this type lives at.
            pub const PATH: &'static str = #path;
        }
    })
}

/// Paths are plain `/`-separated segments. Wildcards belong to
/// subscription patterns, never to a concrete type.
fn parse_path(attr: TokenStream2) -> syn::Result<String> {
    let lit: syn::LitStr = syn::parse2(attr)?;
    let path = lit.value();
    if path.is_empty() {
        return Err(syn::Error::new(lit.span(), "flux path cannot be empty"));
    }
    for segment in path.split('/') {
        if segment.is_empty() {
            return Err(syn::Error::new(lit.span(), "flux path has an empty segment"));
        }
        if segment == "+" || segment == "#" {
            return Err(syn::Error::new(
                lit.span(),
                "flux path cannot contain wildcards",
            ));
        }
    }
    Ok(path)
}

fn collect_derives(item: &ItemStruct) -> Vec<String> {
    let mut derives = Vec::new();
    for attr in item.attrs.iter().filter(|a| a.path().is_ident("derive")) {
        let parsed = attr.parse_args_with(
            syn::punctuated::Punctuated::<syn::Path, syn::Token![,]>::parse_terminated,
        );
        if let Ok(paths) = parsed {
            derives.extend(
                paths
                    .iter()
                    .filter_map(|p| p.segments.last())
                    .map(|s| s.ident.to_string()),
            );
        }
    }
    derives
}
