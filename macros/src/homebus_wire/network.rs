use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{Data, DataStruct, DeriveInput, Fields, Generics, Ident, Index, Path};

struct BodyInfo {
    ident: Ident,
    generics: Generics,
    path: Path,
}

fn parse(item: TokenStream) -> (BodyInfo, DataStruct) {
    let item: DeriveInput = syn::parse2(item.into()).expect("Derive input must be an item.");

    let data = match item.data {
        Data::Struct(s) => s,
        _ => panic!("Network serializer is only implemented for structs."),
    };

    let info = BodyInfo {
        ident: item.ident,
        generics: item.generics,
        path: syn::parse2(quote! { homebus_wire }).expect("Crate path is a valid path."),
    };

    (info, data)
}

fn serialize_struct(s: &DataStruct, info: &BodyInfo) -> TokenStream2 {
    let implementer = &info.ident;
    let path = &info.path;
    let (impl_generics, ty_generics, where_clause) = info.generics.split_for_impl();

    let types: Vec<_> = s.fields.iter().map(|field| &field.ty).collect();

    let (ser_body, deser_body) = match &s.fields {
        Fields::Unit => (quote! { Ok(()) }, quote! { Ok(Self) }),
        Fields::Unnamed(fields) => {
            let positions: Vec<_> = (0..fields.unnamed.len()).map(Index::from).collect();

            (
                quote! {
                    let mut dst = dst.into_iter();

                    #(
                        #path::SerializeIter::serialize_iter(&self.#positions, &mut dst)?;
                    )*

                    Ok(())
                },
                quote! {
                    let mut src = src.into_iter();

                    Ok(Self(
                        #(
                            <#types as #path::SerializeIter>::deserialize_iter(&mut src)?,
                        )*
                    ))
                },
            )
        }
        Fields::Named(fields) => {
            let idents: Vec<_> = fields
                .named
                .iter()
                .filter_map(|field| field.ident.as_ref())
                .collect();

            (
                quote! {
                    let mut dst = dst.into_iter();

                    #(
                        #path::SerializeIter::serialize_iter(&self.#idents, &mut dst)?;
                    )*

                    Ok(())
                },
                quote! {
                    let mut src = src.into_iter();

                    Ok(Self {
                        #(
                            #idents: <#types as #path::SerializeIter>::deserialize_iter(&mut src)?,
                        )*
                    })
                },
            )
        }
    };

    let word = quote! { <#path::encoding::network::Network as #path::encoding::Encoding>::Word };

    quote! {
        impl #impl_generics #path::SerializeIter for #implementer #ty_generics #where_clause {
            fn serialize_iter<'a>(&self, dst: impl IntoIterator<Item = &'a mut #word>) -> Result<(), #path::error::EndOfInput>
            where
                #word: 'a,
            {
                #ser_body
            }

            fn deserialize_iter<'a>(src: impl IntoIterator<Item = &'a #word>) -> Result<Self, #path::error::EndOfInput>
            where
                #word: 'a,
            {
                #deser_body
            }
        }
    }
}

fn size_of_struct(s: &DataStruct, info: &BodyInfo) -> TokenStream2 {
    let types: Vec<_> = s.fields.iter().map(|field| &field.ty).collect();
    let path = &info.path;

    if types.is_empty() {
        quote! { 0 }
    } else {
        quote! { #( <<#types as #path::SerializeBuf>::Serialized as #path::Medium>::SIZE )+* }
    }
}

pub fn serialize_iter(item: TokenStream) -> TokenStream {
    let (info, data) = parse(item);

    serialize_struct(&data, &info).into()
}

pub fn serialize_buf(item: TokenStream) -> TokenStream {
    let (info, data) = parse(item);

    if !info.generics.params.is_empty() {
        panic!("SerializeBuf is incompatible with generic types. You may still use SerializeIter.");
    }

    let size = size_of_struct(&data, &info);
    let path = &info.path;
    let ident = &info.ident;

    quote! {
        // SAFETY: the size is the sum of the exact sizes of every field
        unsafe impl #path::SerializeBuf for #ident {
            type Serialized = [u8; #size];
        }
    }
    .into()
}
