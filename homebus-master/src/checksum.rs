use core::marker::PhantomData;

use homebus_wire::{Medium, SerializeBuf, SerializeIter};

pub mod error {
    /// The received checksum does not match the body.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct Mismatch;
}

/// Describes types that can provide
/// a checksum computation.
pub trait ChecksumProvider {
    type Word;
    type Rep: Eq;

    fn update(&mut self, word: &Self::Word);

    /// Produce the checksum and reset
    /// the provider for the next frame.
    fn finalize(&mut self) -> Self::Rep;
}

/// Byte sum modulo 256, as used by TMCL and Homebus.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Sum8(u8);

impl Sum8 {
    pub const fn new() -> Self {
        Self(0)
    }

    /// Checksum of a complete byte slice.
    pub fn digest(bytes: &[u8]) -> u8 {
        bytes.iter().fold(0, |sum, byte| sum.wrapping_add(*byte))
    }
}

impl ChecksumProvider for Sum8 {
    type Word = u8;
    type Rep = u8;

    #[inline]
    fn update(&mut self, word: &u8) {
        self.0 = self.0.wrapping_add(*word);
    }

    #[inline]
    fn finalize(&mut self) -> u8 {
        core::mem::take(&mut self.0)
    }
}

/// A body with an attached checksum
/// for transmission validation.
#[derive(Debug, PartialEq)]
pub struct ChecksumPacket<P: SerializeIter, C: ChecksumProvider> {
    payload: P,
    _checksum_provider: PhantomData<C>,
}

impl<P: SerializeIter, C: ChecksumProvider<Word = u8>> ChecksumPacket<P, C> {
    pub const fn new(payload: P) -> Self {
        Self {
            payload,
            _checksum_provider: PhantomData,
        }
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn into_payload(self) -> P {
        self.payload
    }
}

impl<P: SerializeBuf, C: ChecksumProvider<Word = u8>> ChecksumPacket<P, C> {
    /// Render the body for transmission,
    /// returning the checksum to append.
    pub fn render_buf(&self, body: &mut P::Serialized, checksum_provider: &mut C) -> C::Rep {
        self.payload.serialize_buf(body);
        body.get_iter().for_each(|word| checksum_provider.update(word));

        checksum_provider.finalize()
    }

    /// Construct the packet from a received body
    /// and the checksum that accompanied it.
    pub fn construct_buf(
        body: &P::Serialized,
        read_checksum: &C::Rep,
        checksum_provider: &mut C,
    ) -> Result<Self, error::Mismatch> {
        body.get_iter().for_each(|word| checksum_provider.update(word));

        if checksum_provider.finalize() != *read_checksum {
            Err(error::Mismatch)?
        }

        Ok(Self::new(P::deserialize_buf(body)))
    }
}

#[cfg(test)]
mod tests {
    use homebus_wire::encoding::network;

    use super::*;

    #[derive(Debug, PartialEq, network::SerializeIter, network::SerializeBuf)]
    struct Foo {
        a: i8,
        b: u32,
    }

    mod sum8 {
        use super::*;

        #[test]
        fn wraps() {
            assert_eq!(0, Sum8::digest(&[]));
            assert_eq!(0x2c, Sum8::digest(&[0xff, 0x2d]));
            assert_eq!(0xf8, Sum8::digest(&[0xff; 8]));
        }

        #[test]
        fn finalize_resets() {
            let mut sum = Sum8::new();

            sum.update(&0x80);
            sum.update(&0x81);
            assert_eq!(1, sum.finalize());

            sum.update(&3);
            assert_eq!(3, sum.finalize());
        }
    }

    mod packet {
        use super::*;

        #[test]
        fn basic() {
            let mut body = [0u8; 5];

            let test_packet = ChecksumPacket::<_, Sum8>::new(Foo {
                a: -1,
                b: 0xdeadbeef,
            });

            let checksum = test_packet.render_buf(&mut body, &mut Sum8::new());

            assert_eq!([0xff, 0xde, 0xad, 0xbe, 0xef], body);
            assert_eq!(Sum8::digest(&body), checksum);

            let read_packet =
                ChecksumPacket::<Foo, Sum8>::construct_buf(&body, &checksum, &mut Sum8::new())
                    .unwrap();

            assert_eq!(test_packet, read_packet);
        }

        #[test]
        fn bad_checksum() {
            let mut body = [0u8; 5];

            let test_packet = ChecksumPacket::<_, Sum8>::new(Foo { a: 3, b: 7 });
            let checksum = test_packet.render_buf(&mut body, &mut Sum8::new());

            match ChecksumPacket::<Foo, Sum8>::construct_buf(
                &body,
                &checksum.wrapping_add(1),
                &mut Sum8::new(),
            ) {
                Err(error::Mismatch) => {}
                _ => panic!("Packet construction should fail on a checksum mismatch."),
            }
        }
    }
}
