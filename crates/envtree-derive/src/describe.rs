//! `DescribeConfig` derive macro implementation.

use proc_macro::TokenStream;
use quote::{quote, quote_spanned};
use syn::{DeriveInput, spanned::Spanned};

use crate::utils::{ConfigContainer, ConfigField, FieldMode};

impl ConfigField {
    fn required_expr(&self) -> proc_macro2::TokenStream {
        match &self.required {
            Some(required) => quote!(#required),
            None => quote!(""),
        }
    }

    fn describe(&self, parent: &ConfigContainer) -> Option<proc_macro2::TokenStream> {
        let name = &self.name;
        let name_span = name.span();
        let cr = parent.cr(name_span);
        let help = &self.docs;
        let required = self.required_expr();
        let ty = &self.ty;

        let kind = match &self.mode {
            FieldMode::Param { env, allowed } => {
                let allowed = allowed.as_ref().map_or_else(|| quote!(""), |lit| quote!(#lit));
                let ty_in_code = if let Some(text) = ty.span().source_text() {
                    quote!(#text)
                } else {
                    quote!(::core::stringify!(#ty))
                };
                quote_spanned! {ty.span()=>
                    #cr::metadata::FieldKind::Param(#cr::metadata::ParamMetadata {
                        env: #env,
                        allowed: #allowed,
                        rust_type: #cr::metadata::RustType::of::<#ty>(#ty_in_code),
                        kind: <#ty as #cr::de::WellKnown>::KIND,
                    })
                }
            }
            FieldMode::Nest => quote_spanned! {ty.span()=>
                #cr::metadata::FieldKind::Nested(&<#ty as #cr::DescribeConfig>::DESCRIPTION)
            },
            FieldMode::Skip => return None,
        };

        Some(quote_spanned! {name_span=>
            #cr::metadata::FieldMetadata {
                rust_field_name: ::core::stringify!(#name),
                help: #help,
                required: #required,
                kind: #kind,
            }
        })
    }
}

impl ConfigContainer {
    fn derive_describe_config(&self) -> proc_macro2::TokenStream {
        let name = &self.name;
        let cr = self.cr(name.span());
        let name_str = name.to_string();
        let help = &self.help;
        let fields = self.fields.iter().filter_map(|field| field.describe(self));

        quote! {
            impl #cr::DescribeConfig for #name {
                const DESCRIPTION: #cr::metadata::ConfigMetadata = #cr::metadata::ConfigMetadata {
                    ty: #cr::metadata::RustType::of::<#name>(#name_str),
                    help: #help,
                    fields: &[#(#fields,)*],
                };
            }

            const _: () = <#name as #cr::DescribeConfig>::DESCRIPTION.assert_valid();
        }
    }
}

pub(crate) fn impl_describe_config(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse(input) {
        Ok(input) => input,
        Err(err) => return err.into_compile_error().into(),
    };
    let trait_impl = match ConfigContainer::new(&input) {
        Ok(trait_impl) => trait_impl,
        Err(err) => return err.into_compile_error().into(),
    };
    trait_impl.derive_describe_config().into()
}
