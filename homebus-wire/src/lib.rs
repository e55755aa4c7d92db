//! Fixed-layout serialization for Homebus and TMCL frames.
//!
//! Every frame on either leg of the gateway is a short, fixed sequence of
//! bytes. Types describe their own layout by implementing [`SerializeIter`]
//! (usually via the derive macros in [`encoding::network`]) and are then
//! moved to and from byte buffers without any offset arithmetic.

#![no_std]

pub mod encoding;

use encoding::{network::Network, Encoding};

pub mod error {
    /// The serialization medium ran out of words
    /// before the value was complete.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct EndOfInput;
}

/// Types implement this trait to be used
/// as serialization mediums.
pub trait Medium<E: Encoding = Network> {
    const SIZE: usize;

    fn get_iter<'a>(&'a self) -> impl Iterator<Item = &'a E::Word>
    where
        E::Word: 'a;
    fn get_iter_mut<'a>(&'a mut self) -> impl Iterator<Item = &'a mut E::Word>
    where
        E::Word: 'a;
}

impl<E: Encoding, const N: usize> Medium<E> for [E::Word; N] {
    const SIZE: usize = N;

    fn get_iter<'a>(&'a self) -> impl Iterator<Item = &'a E::Word>
    where
        E::Word: 'a,
    {
        self.iter()
    }

    fn get_iter_mut<'a>(&'a mut self) -> impl Iterator<Item = &'a mut E::Word>
    where
        E::Word: 'a,
    {
        self.iter_mut()
    }
}

/// Serialize to and deserialize from a
/// medium through word iterators.
///
/// Fields are visited in declaration order, so the
/// layout of a derived type is its wire layout.
pub trait SerializeIter<E: Encoding = Network>: Sized {
    /// Write the value into the words yielded by `dst`.
    fn serialize_iter<'a>(
        &self,
        dst: impl IntoIterator<Item = &'a mut E::Word>,
    ) -> Result<(), error::EndOfInput>
    where
        E::Word: 'a;

    /// Read a value from the words yielded by `src`.
    fn deserialize_iter<'a>(
        src: impl IntoIterator<Item = &'a E::Word>,
    ) -> Result<Self, error::EndOfInput>
    where
        E::Word: 'a;
}

/// Exact-size counterpart of [`SerializeIter`].
///
/// Implementers name a buffer type that is exactly as long as
/// their serialized form, which makes both directions infallible.
///
/// # Safety
///
/// `Serialized` must hold at least as many words as `serialize_iter`
/// writes and `deserialize_iter` reads. A short buffer *will* result in UB.
/// Leave this implementation to the derive macro.
pub unsafe trait SerializeBuf<E: Encoding = Network>: SerializeIter<E> {
    type Serialized: Medium<E>;

    /// Serialize into a buffer of the exact length.
    fn serialize_buf(&self, dst: &mut Self::Serialized) {
        // SAFETY: `Serialized` is long enough by the trait contract.
        unsafe { SerializeIter::serialize_iter(self, dst.get_iter_mut()).unwrap_unchecked() };
    }

    /// Deserialize from a buffer of the exact length.
    fn deserialize_buf(src: &Self::Serialized) -> Self {
        // SAFETY: `Serialized` is long enough by the trait contract,
        // and every word pattern is a valid value.
        unsafe { SerializeIter::deserialize_iter(src.get_iter()).unwrap_unchecked() }
    }
}
