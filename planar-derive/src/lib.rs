use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    parenthesized,
    parse_macro_input,
    punctuated::Punctuated,
    spanned::Spanned,
    Data,
    DeriveInput,
    Fields,
    Token,
    Type,
};

/// Derives `planar::util::linalg::VectorType` for a newtype over `Vector2` or over another
/// derived vector type.
///
/// ```ignore
/// #[derive(Copy, Clone, Debug, VectorType)]
/// struct Position(Vector2);
///
/// #[derive(Copy, Clone, Debug, VectorType)]
/// struct Velocity(Position);
///
/// // Grandparents are named explicitly so that mixed arithmetic resolves to `Impulse`.
/// #[derive(Copy, Clone, Debug, VectorType)]
/// #[vector(ancestors(Position))]
/// struct Impulse(Velocity);
/// ```
#[proc_macro_derive(VectorType, attributes(vector))]
pub fn derive_vector_type(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match vector_type_impl(&input) {
        Ok(expanded) => proc_macro::TokenStream::from(expanded),
        Err(e) => proc_macro::TokenStream::from(e.to_compile_error()),
    }
}

fn is_vector2(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        type_path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Vector2")
    } else {
        false
    }
}

fn parent_type(input: &DeriveInput) -> syn::Result<Type> {
    let Data::Struct(data_struct) = &input.data else {
        return Err(syn::Error::new(
            input.span(),
            "VectorType can only be derived for structs",
        ));
    };
    match &data_struct.fields {
        Fields::Unnamed(fields) if fields.unnamed.len() == 1 => {
            Ok(fields.unnamed[0].ty.clone())
        }
        fields => Err(syn::Error::new(
            fields.span(),
            "VectorType needs a tuple struct with a single field holding the parent vector type",
        )),
    }
}

fn named_ancestors(input: &DeriveInput) -> syn::Result<Vec<Type>> {
    let mut ancestors = Vec::new();
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("vector")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("ancestors") {
                let content;
                parenthesized!(content in meta.input);
                let types = Punctuated::<Type, Token![,]>::parse_terminated(&content)?;
                ancestors.extend(types);
                Ok(())
            } else {
                Err(meta.error("unsupported vector attribute, expected `ancestors(...)`"))
            }
        })?;
    }
    Ok(ancestors)
}

fn vector_type_impl(input: &DeriveInput) -> syn::Result<TokenStream> {
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new(
            input.generics.span(),
            "VectorType cannot be derived for generic types",
        ));
    }
    let name = &input.ident;
    let name_str = name.to_string();
    let parent = parent_type(input)?;

    // Vector2 gets its own impls below.
    let mut seen = HashSet::new();
    let ancestors = std::iter::once(parent.clone())
        .chain(named_ancestors(input)?)
        .filter(|ty| !is_vector2(ty))
        .filter(|ty| seen.insert(quote!(#ty).to_string()))
        .collect::<Vec<_>>();

    let vector_type = quote! { ::planar::util::linalg::VectorType };
    let vector2 = quote! { ::planar::util::linalg::Vector2 };
    let more_specific = quote! { ::planar::core::ops::MoreSpecific };

    let ancestor_impls = ancestors.iter().map(|ancestor| {
        quote! {
            impl #more_specific<#ancestor> for #name {
                type Output = #name;
            }
            impl #more_specific<#name> for #ancestor {
                type Output = #name;
            }
            ::planar::impl_binary_vector_ops!(#name, #ancestor);
            ::planar::impl_binary_vector_ops!(#ancestor, #name);
        }
    });

    Ok(quote! {
        impl #vector_type for #name {
            const NAME: &'static str = #name_str;
            const DEPTH: usize = <#parent as #vector_type>::DEPTH + 1;

            fn from_coords(x: f64, y: f64) -> Self {
                Self(<#parent as #vector_type>::from_coords(x, y))
            }
            fn x(&self) -> f64 {
                <#parent as #vector_type>::x(&self.0)
            }
            fn y(&self) -> f64 {
                <#parent as #vector_type>::y(&self.0)
            }
        }

        impl ::std::convert::From<#name> for #vector2 {
            fn from(v: #name) -> Self {
                #vector2::new(<#name as #vector_type>::x(&v), <#name as #vector_type>::y(&v))
            }
        }
        impl ::std::convert::From<#vector2> for #name {
            fn from(v: #vector2) -> Self {
                <#name as #vector_type>::from_coords(v.x(), v.y())
            }
        }

        impl ::std::ops::Index<usize> for #name {
            type Output = f64;

            fn index(&self, index: usize) -> &Self::Output {
                &self.0[index]
            }
        }
        impl ::std::ops::Index<&str> for #name {
            type Output = f64;

            fn index(&self, name: &str) -> &Self::Output {
                &self.0[name]
            }
        }

        impl #more_specific<#name> for #name {
            type Output = #name;
        }
        impl #more_specific<#vector2> for #name {
            type Output = #name;
        }
        impl #more_specific<#name> for #vector2 {
            type Output = #name;
        }
        ::planar::impl_binary_vector_ops!(#name, #name);
        ::planar::impl_binary_vector_ops!(#name, #vector2);
        ::planar::impl_binary_vector_ops!(#vector2, #name);
        ::planar::impl_binary_vector_ops!(#name, (f64, f64));
        ::planar::impl_binary_vector_ops!(#name, [f64; 2]);
        ::planar::impl_scalar_vector_ops!(#name);

        #(#ancestor_impls)*
    })
}
