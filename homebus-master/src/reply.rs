//! Serialization of the reply owed to the host.

use crate::config::Config;
use crate::frame::{encode_reply_frame, Frame, Reply, Status, FRAME_LEN};

/// Layout of the next frame sent to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReplyFormat {
    /// The live [`Reply`] in standard layout.
    Standard,
    /// A synthetic reply to a frame whose checksum was wrong.
    ChecksumError,
    /// The staged [`SpecialReply`], sent verbatim.
    Special,
}

/// A reply frame whose layout is chosen by a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpecialReply(Frame);

impl SpecialReply {
    pub const fn new(frame: Frame) -> Self {
        Self(frame)
    }

    #[inline]
    pub fn as_frame(&self) -> &Frame {
        &self.0
    }
}

impl Default for SpecialReply {
    fn default() -> Self {
        Self::new([0; FRAME_LEN])
    }
}

/// The reply sent for a frame that failed its checksum.
pub const CHECKSUM_ERROR_REPLY: Reply = Reply {
    status: Status::CHECKSUM_ERROR,
    opcode: 0,
    value: 0,
};

/// Owns the special reply buffer between a handler
/// filling it and the dispatcher sending it.
#[derive(Debug, Default)]
pub struct ReplyFormatter {
    special: SpecialReply,
}

impl ReplyFormatter {
    pub const fn new() -> Self {
        Self {
            special: SpecialReply::new([0; FRAME_LEN]),
        }
    }

    /// Hold a special reply until the next [`ReplyFormat::Special`] render.
    pub fn stage_special(&mut self, special: SpecialReply) {
        self.special = special;
    }

    pub fn render(&self, format: ReplyFormat, reply: &Reply, config: &Config) -> Frame {
        match format {
            ReplyFormat::Standard => {
                encode_reply_frame(config.host_address, config.module_address, reply)
            }
            ReplyFormat::ChecksumError => encode_reply_frame(
                config.host_address,
                config.module_address,
                &CHECKSUM_ERROR_REPLY,
            ),
            ReplyFormat::Special => *self.special.as_frame(),
        }
    }
}
