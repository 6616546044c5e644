//! `PopulateConfig` derive macro implementation.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{quote, quote_spanned};
use syn::DeriveInput;

use crate::utils::{ConfigContainer, ConfigField, FieldMode};

impl ConfigField {
    fn populate(&self, index: usize) -> proc_macro2::TokenStream {
        let name = &self.name;
        if matches!(self.mode, FieldMode::Nest) {
            quote_spanned!(name.span()=> group.nested(#index, &mut self.#name))
        } else {
            quote_spanned!(name.span()=> group.param(#index, &mut self.#name))
        }
    }
}

impl ConfigContainer {
    fn derive_populate_config(&self) -> proc_macro2::TokenStream {
        let name = &self.name;
        let cr = self.cr(Span::call_site());
        let fields = self
            .described_fields()
            .map(|(index, field)| field.populate(index));

        quote! {
            impl #cr::PopulateConfig for #name {
                #[allow(unused_variables)]
                fn populate_config(
                    &mut self,
                    group: &#cr::GroupPopulator<'_>,
                ) -> ::core::result::Result<(), #cr::ParseError> {
                    #(#fields?;)*
                    ::core::result::Result::Ok(())
                }
            }
        }
    }
}

pub(crate) fn impl_populate_config(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse(input) {
        Ok(input) => input,
        Err(err) => return err.into_compile_error().into(),
    };
    let trait_impl = match ConfigContainer::new(&input) {
        Ok(trait_impl) => trait_impl,
        Err(err) => return err.into_compile_error().into(),
    };
    trait_impl.derive_populate_config().into()
}
