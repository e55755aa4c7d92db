use proc_macro::TokenStream;

mod homebus_wire;

/// Generates the implementation block for conforming to `SerializeIter` of the "network" flavor.
///
/// Fields are serialized in declaration order, so the struct definition is the wire layout.
///
/// # Note
///
/// Requires `homebus_wire` to be in scope with that name.
#[proc_macro_derive(SerializeIter)]
pub fn serialize_iter_network(item: TokenStream) -> TokenStream {
    homebus_wire::network::serialize_iter(item)
}

/// Generates the implementation block for conforming to `SerializeBuf` of the "network" flavor.
///
/// Generic types *cannot* implement `SerializeBuf`. You may still derive `SerializeIter`.
///
/// # Note
///
/// Requires `homebus_wire` to be in scope with that name.
#[proc_macro_derive(SerializeBuf)]
pub fn serialize_buf_network(item: TokenStream) -> TokenStream {
    homebus_wire::network::serialize_buf(item)
}
