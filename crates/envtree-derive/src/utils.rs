//! Parsing `#[config(_)]` attributes shared by all derive macros.

use proc_macro2::{Ident, Span};
use quote::{quote, quote_spanned};
use syn::{
    Attribute, Data, DeriveInput, Expr, Field, Fields, Lit, LitStr, Path, Type, spanned::Spanned,
};

pub(crate) fn parse_docs(attrs: &[Attribute]) -> String {
    let doc_lines = attrs.iter().filter_map(|attr| {
        if attr.meta.path().is_ident("doc") {
            let name_value = attr.meta.require_name_value().ok()?;
            let Expr::Lit(doc_literal) = &name_value.value else {
                return None;
            };
            match &doc_literal.lit {
                Lit::Str(doc_literal) => Some(doc_literal.value()),
                _ => None,
            }
        } else {
            None
        }
    });

    let mut docs = String::new();
    for line in doc_lines {
        let line = line.trim();
        if line.is_empty() {
            if !docs.is_empty() {
                // New paragraph; convert it to a new line.
                docs.push('\n');
            }
        } else {
            if !docs.is_empty() && !docs.ends_with(|ch: char| ch.is_ascii_whitespace()) {
                docs.push(' ');
            }
            docs.push_str(line);
        }
    }
    docs
}

/// How a field is handled by the derived code.
#[derive(Debug)]
pub(crate) enum FieldMode {
    /// Param read from the specified env variable.
    Param { env: LitStr, allowed: Option<LitStr> },
    /// Nested config.
    Nest,
    /// Field excluded from parsing.
    Skip,
}

#[derive(Debug, Default)]
struct ConfigFieldAttrs {
    env: Option<LitStr>,
    required: Option<LitStr>,
    allowed: Option<LitStr>,
    nest: Option<Span>,
    skip: Option<Span>,
}

impl ConfigFieldAttrs {
    fn new(attrs: &[Attribute]) -> syn::Result<Self> {
        let config_attrs = attrs.iter().filter(|attr| attr.path().is_ident("config"));

        let mut this = Self::default();
        for attr in config_attrs {
            attr.parse_nested_meta(|meta| {
                let slot = if meta.path.is_ident("env") {
                    &mut this.env
                } else if meta.path.is_ident("required") {
                    &mut this.required
                } else if meta.path.is_ident("allowed") {
                    &mut this.allowed
                } else if meta.path.is_ident("nest") {
                    this.nest = Some(meta.path.span());
                    return Ok(());
                } else if meta.path.is_ident("skip") {
                    this.skip = Some(meta.path.span());
                    return Ok(());
                } else {
                    return Err(meta.error(
                        "Unsupported attribute; only `env`, `required`, `allowed`, `nest` and `skip` are supported",
                    ));
                };

                if slot.is_some() {
                    return Err(meta.error("Attribute is specified multiple times"));
                }
                *slot = Some(meta.value()?.parse()?);
                Ok(())
            })?;
        }
        Ok(this)
    }

    fn into_mode(self, field: &Field) -> syn::Result<(FieldMode, Option<LitStr>)> {
        if let Some(skip_span) = self.skip {
            if self.env.is_some()
                || self.required.is_some()
                || self.allowed.is_some()
                || self.nest.is_some()
            {
                let message = "`skip` cannot be combined with other attributes";
                return Err(syn::Error::new(skip_span, message));
            }
            return Ok((FieldMode::Skip, None));
        }

        if self.nest.is_some() {
            // `env` and `allowed` are meaningless for nested configs.
            return Ok((FieldMode::Nest, self.required));
        }

        let Some(env) = self.env else {
            let message =
                "Field must be either a param (`#[config(env = \"...\")]`), a nested config (`#[config(nest)]`), \
                 or skipped (`#[config(skip)]`)";
            return Err(syn::Error::new_spanned(field, message));
        };
        let mode = FieldMode::Param {
            env,
            allowed: self.allowed,
        };
        Ok((mode, self.required))
    }
}

#[derive(Debug)]
pub(crate) struct ConfigField {
    pub(crate) name: Ident,
    pub(crate) ty: Type,
    pub(crate) docs: String,
    pub(crate) mode: FieldMode,
    pub(crate) required: Option<LitStr>,
}

impl ConfigField {
    fn new(raw: &Field) -> syn::Result<Self> {
        let name = raw.ident.clone().ok_or_else(|| {
            let message = "Only named fields are supported";
            syn::Error::new_spanned(raw, message)
        })?;
        let attrs = ConfigFieldAttrs::new(&raw.attrs)?;
        let (mode, required) = attrs.into_mode(raw)?;

        Ok(Self {
            name,
            ty: raw.ty.clone(),
            docs: parse_docs(&raw.attrs),
            mode,
            required,
        })
    }

    pub(crate) fn is_described(&self) -> bool {
        !matches!(self.mode, FieldMode::Skip)
    }
}

#[derive(Debug, Default)]
struct ConfigContainerAttrs {
    cr: Option<Path>,
}

impl ConfigContainerAttrs {
    fn new(attrs: &[Attribute]) -> syn::Result<Self> {
        let config_attrs = attrs.iter().filter(|attr| attr.path().is_ident("config"));

        let mut cr = None;
        for attr in config_attrs {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("crate") {
                    cr = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("Unsupported attribute; only `crate` is supported"))
                }
            })?;
        }
        Ok(Self { cr })
    }
}

#[derive(Debug)]
pub(crate) struct ConfigContainer {
    attrs: ConfigContainerAttrs,
    pub(crate) name: Ident,
    pub(crate) help: String,
    pub(crate) fields: Vec<ConfigField>,
}

impl ConfigContainer {
    pub(crate) fn new(raw: &DeriveInput) -> syn::Result<Self> {
        let Data::Struct(data) = &raw.data else {
            let message = "Config derives can only be placed on structs";
            return Err(syn::Error::new_spanned(raw, message));
        };
        let Fields::Named(fields) = &data.fields else {
            let message = "Only structs with named fields are supported";
            return Err(syn::Error::new_spanned(&data.fields, message));
        };
        if raw.generics.type_params().count() != 0
            || raw.generics.const_params().count() != 0
            || raw.generics.lifetimes().count() != 0
        {
            let message = "generics are not supported";
            return Err(syn::Error::new_spanned(&raw.generics, message));
        }

        let attrs = ConfigContainerAttrs::new(&raw.attrs)?;
        let fields = fields
            .named
            .iter()
            .map(ConfigField::new)
            .collect::<syn::Result<_>>()?;
        Ok(Self {
            attrs,
            name: raw.ident.clone(),
            help: parse_docs(&raw.attrs),
            fields,
        })
    }

    pub(crate) fn cr(&self, span: Span) -> proc_macro2::TokenStream {
        if let Some(cr) = &self.attrs.cr {
            quote!(#cr)
        } else {
            quote_spanned!(span=> ::envtree)
        }
    }

    /// Iterates over fields included into the config metadata, together with their indices in the metadata.
    pub(crate) fn described_fields(&self) -> impl Iterator<Item = (usize, &ConfigField)> + '_ {
        self.fields
            .iter()
            .filter(|field| field.is_described())
            .enumerate()
    }
}
