//! Wire encodings.
//!
//! An encoding fixes the word a medium is made of and the order in which
//! multi-byte values are split into words. TMCL and Homebus frames only
//! use [`network::Network`]: bytes, most significant first.

pub mod network;

/// Marker for a wire encoding, naming its word.
pub trait Encoding {
    /// One cell of a medium in this encoding, `u8` on a serial line.
    type Word;
}
