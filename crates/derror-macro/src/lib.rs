// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Oxide Computer Company

use darling::FromDeriveInput;
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;
use syn::parse_macro_input;

#[derive(FromDeriveInput)]
#[darling(attributes(derror))]
struct Args {
    leaf_data: Option<syn::Path>,
}

/// Generate a `DError` implementation given a tree-structured enum
/// where only leaf nodes hold additional data.
///
/// This lets a rejected header walk be reported as a short list of
/// static names (e.g. `BoundsViolation` -> `Ipv4Options`) without
/// calling `format!()` on the fast path.
///
/// ```ignore
/// #[derive(DError)]
/// #[derror(leaf_data = WalkError::data)]
/// enum WalkError {
///     BoundsViolation(BoundsViolation),
///     #[leaf]
///     Opaque(u32),
///     DepthExceeded { depth: usize },
/// }
/// ```
/// Every variant name becomes its discriminant string. Single-element
/// tuple variants are descended into (their field must implement
/// `DError`) unless annotated `#[leaf]`. A `leaf_data` function can be
/// given to fill in the data slots carried alongside the names.
#[proc_macro_derive(DError, attributes(derror, leaf))]
pub fn derive_derror(
    input: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let derive_input = parse_macro_input!(input);

    let parsed_args = match Args::from_derive_input(&derive_input) {
        Ok(o) => o,
        Err(e) => return e.write_errors().into(),
    };

    let DeriveInput { ident, data, generics, .. } = derive_input;

    let syn::Data::Enum(data) = data else {
        return syn::Error::new(
            ident.span(),
            "cannot autoderive `DError` for struct or union",
        )
        .to_compile_error()
        .into();
    };

    let mut name_arms: Vec<TokenStream> = vec![];
    let mut child_arms: Vec<TokenStream> = vec![];

    for variant in data.variants {
        let var_name = variant.ident;
        let name_lit = syn::LitStr::new(&var_name.to_string(), var_name.span());

        let known_leaf =
            variant.attrs.iter().any(|v| v.path().is_ident("leaf"));

        let (name_arm, child_arm) = match variant.fields {
            syn::Fields::Unnamed(fields) => (
                quote! { Self::#var_name(..) => #name_lit, },
                if !known_leaf && fields.unnamed.len() == 1 {
                    quote! { Self::#var_name(f) => Some(f), }
                } else {
                    quote! { Self::#var_name(..) => None, }
                },
            ),
            syn::Fields::Named(_) => (
                quote! { Self::#var_name { .. } => #name_lit, },
                quote! { Self::#var_name { .. } => None, },
            ),
            syn::Fields::Unit => (
                quote! { Self::#var_name => #name_lit, },
                quote! { Self::#var_name => None, },
            ),
        };

        name_arms.push(name_arm);
        child_arms.push(child_arm);
    }

    let leaf_data_impl = parsed_args.leaf_data.map(|data_fn| {
        quote! {
            fn leaf_data(&self, data: &mut [u64]) {
                #data_fn(self, data);
            }
        }
    });

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        impl #impl_generics DError for #ident #ty_generics #where_clause {
            fn discriminant(&self) -> &'static str {
                match self {
                    #( #name_arms )*
                }
            }

            fn child(&self) -> Option<&dyn DError> {
                match self {
                    #( #child_arms )*
                }
            }

            #leaf_data_impl
        }
    }
    .into()
}
