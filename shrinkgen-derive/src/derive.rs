//! Expansion of `#[derive(Arbitrary)]`.
//!
//! The derived generator is an `exec` body that picks every field in
//! declaration order, so the resulting values shrink field by field.

use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::{
    Attribute, Data, DeriveInput, Error, Field, Fields, GenericParam, Lit, Meta, MetaNameValue,
    Result, Type, Variant, parse_macro_input, parse_quote,
};

/// Main entry point for the Arbitrary derive macro
pub fn derive_arbitrary_impl(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_arbitrary_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn generate_arbitrary_impl(input: &DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;

    let mut bounded_generics = input.generics.clone();
    add_trait_bounds(&mut bounded_generics);
    let (impl_generics, ty_generics, where_clause) = bounded_generics.split_for_impl();

    let body = match &input.data {
        Data::Struct(data_struct) => build_fields(quote! { #name }, &data_struct.fields)?,
        Data::Enum(data_enum) => {
            build_enum(name, &data_enum.variants.iter().collect::<Vec<_>>())?
        }
        Data::Union(_) => {
            return Err(Error::new_spanned(
                input,
                "Arbitrary derive is not supported for unions",
            ));
        }
    };

    Ok(quote! {
        impl #impl_generics ::shrinkgen::Arbitrary for #name #ty_generics #where_clause {
            fn arbitrary() -> ::shrinkgen::Gen<Self> {
                ::shrinkgen::exec(|| ::core::result::Result::Ok(#body))
            }
        }
    })
}

/// Type parameters must be pickable themselves
fn add_trait_bounds(generics: &mut syn::Generics) {
    for param in &mut generics.params {
        if let GenericParam::Type(ref mut type_param) = *param {
            type_param.bounds.push(parse_quote!(::shrinkgen::Arbitrary));
            type_param.bounds.push(parse_quote!(::core::clone::Clone));
            type_param.bounds.push(parse_quote!(::core::fmt::Debug));
        }
    }
}

/// Constructor expression for `path` with every field picked
fn build_fields(path: TokenStream, fields: &Fields) -> Result<TokenStream> {
    match fields {
        Fields::Named(named) => {
            let picks = named
                .named
                .iter()
                .map(|field| {
                    let ident = &field.ident;
                    let pick = field_pick(field)?;
                    Ok(quote! { #ident: #pick })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(quote! { #path { #(#picks,)* } })
        }
        Fields::Unnamed(unnamed) => {
            let picks = unnamed
                .unnamed
                .iter()
                .map(field_pick)
                .collect::<Result<Vec<_>>>()?;
            Ok(quote! { #path( #(#picks,)* ) })
        }
        Fields::Unit => Ok(path),
    }
}

/// Picks a variant index uniformly, then the variant's fields
fn build_enum(name: &syn::Ident, variants: &[&Variant]) -> Result<TokenStream> {
    let Some((last, rest)) = variants.split_last() else {
        return Err(Error::new_spanned(
            name,
            "Cannot derive Arbitrary for empty enum",
        ));
    };

    let variant_count = variants.len();
    let arms = rest
        .iter()
        .enumerate()
        .map(|(index, variant)| {
            let ident = &variant.ident;
            let body = build_fields(quote! { #name::#ident }, &variant.fields)?;
            Ok(quote! { #index => #body })
        })
        .collect::<Result<Vec<_>>>()?;

    let last_ident = &last.ident;
    let last_body = build_fields(quote! { #name::#last_ident }, &last.fields)?;

    Ok(quote! {
        match ::shrinkgen::Gen::pick(&::shrinkgen::in_range(0usize, #variant_count))? {
            #(#arms,)*
            _ => #last_body,
        }
    })
}

/// Expression picking one field's value
fn field_pick(field: &Field) -> Result<TokenStream> {
    let field_type = &field.ty;

    for attr in &field.attrs {
        if attr.path().is_ident("arbitrary") {
            let generator = parse_arbitrary_attribute(attr, field_type)?;
            return Ok(quote! { ::shrinkgen::Gen::pick(&#generator)? });
        }
    }

    Ok(quote! {
        ::shrinkgen::Gen::pick(&<#field_type as ::shrinkgen::Arbitrary>::arbitrary())?
    })
}

/// Parse `#[arbitrary(range = "min..max")]` or `#[arbitrary(with = "path")]`
/// into a generator expression
fn parse_arbitrary_attribute(attr: &Attribute, field_type: &Type) -> Result<TokenStream> {
    let Meta::List(list) = &attr.meta else {
        return Err(Error::new_spanned(attr, "Arbitrary attribute must be a list"));
    };

    let parser = syn::punctuated::Punctuated::<Meta, syn::Token![,]>::parse_terminated;
    let parsed = parser.parse2(list.tokens.clone())?;
    let mut metas = parsed.into_iter();

    let meta = match (metas.next(), metas.next()) {
        (Some(meta), None) => meta,
        _ => {
            return Err(Error::new_spanned(
                list,
                "Expected exactly one of `range = \"min..max\"` or `with = \"path\"`",
            ));
        }
    };

    let Meta::NameValue(MetaNameValue { path, value, .. }) = &meta else {
        return Err(Error::new_spanned(meta, "Unsupported arbitrary attribute format"));
    };

    let literal = match value {
        syn::Expr::Lit(syn::ExprLit {
            lit: Lit::Str(lit_str),
            ..
        }) => lit_str,
        _ => return Err(Error::new_spanned(value, "Expected a string literal")),
    };

    if path.is_ident("range") {
        let (start, end) = parse_range_string(&literal.value()).ok_or_else(|| {
            Error::new_spanned(
                literal,
                "Range attribute must be a string literal in format \"min..max\"",
            )
        })?;
        Ok(quote! { ::shrinkgen::in_range::<#field_type>(#start, #end) })
    } else if path.is_ident("with") {
        let function: syn::Path = literal.parse()?;
        Ok(quote! { #function() })
    } else {
        Err(Error::new_spanned(path, "Unknown arbitrary attribute"))
    }
}

/// Parse a range string like "1..100" into (start, end) as token streams
fn parse_range_string(range_str: &str) -> Option<(TokenStream, TokenStream)> {
    let (start, end) = range_str.split_once("..")?;
    if start.trim().is_empty() || end.trim().is_empty() {
        return None;
    }
    Some((start.parse().ok()?, end.parse().ok()?))
}
