use super::Encoding;

use crate::{error, SerializeBuf, SerializeIter};

use fill_array::fill;
// export proc macro
pub use macros::{SerializeBuf, SerializeIter};

/// Byte-oriented encoding with multi-byte integers
/// sent most significant byte first.
pub struct Network;
impl Encoding for Network {
    type Word = u8;
}

macro_rules! impl_number {
    ($TYPE:ty, $SIZE:expr) => {
        impl SerializeIter for $TYPE {
            fn serialize_iter<'a>(
                &self,
                dst: impl IntoIterator<Item = &'a mut <Network as Encoding>::Word>,
            ) -> Result<(), error::EndOfInput>
            where
                <Network as Encoding>::Word: 'a,
            {
                let mut dst = dst.into_iter();

                for byte in self.to_be_bytes() {
                    *dst.next().ok_or(error::EndOfInput)? = byte;
                }

                Ok(())
            }

            fn deserialize_iter<'a>(
                src: impl IntoIterator<Item = &'a <Network as Encoding>::Word>,
            ) -> Result<Self, error::EndOfInput>
            where
                <Network as Encoding>::Word: 'a,
            {
                let mut src = src.into_iter();

                let bytes = fill![*src.next().ok_or(error::EndOfInput)?; $SIZE];

                Ok(Self::from_be_bytes(bytes))
            }
        }

        // SAFETY: $SIZE is checked against `from_be_bytes` at compile time
        unsafe impl SerializeBuf for $TYPE {
            type Serialized = [u8; $SIZE];
        }
    };
}

impl_number!(u8, 1);
impl_number!(u16, 2);
impl_number!(u32, 4);
impl_number!(i8, 1);
impl_number!(i16, 2);
impl_number!(i32, 4);

// byte strings, e.g. version identifiers

impl<const N: usize> SerializeIter for [u8; N] {
    fn serialize_iter<'a>(
        &self,
        dst: impl IntoIterator<Item = &'a mut <Network as Encoding>::Word>,
    ) -> Result<(), error::EndOfInput>
    where
        <Network as Encoding>::Word: 'a,
    {
        let mut dst = dst.into_iter();

        for byte in self {
            *dst.next().ok_or(error::EndOfInput)? = *byte;
        }

        Ok(())
    }

    fn deserialize_iter<'a>(
        src: impl IntoIterator<Item = &'a <Network as Encoding>::Word>,
    ) -> Result<Self, error::EndOfInput>
    where
        <Network as Encoding>::Word: 'a,
    {
        let mut src = src.into_iter();
        let mut bytes = [0; N];

        for byte in bytes.iter_mut() {
            *byte = *src.next().ok_or(error::EndOfInput)?;
        }

        Ok(bytes)
    }
}

// SAFETY: a byte string is its own serialized form
unsafe impl<const N: usize> SerializeBuf for [u8; N] {
    type Serialized = [u8; N];
}
