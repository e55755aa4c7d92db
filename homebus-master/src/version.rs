//! GetVersion (opcode 136), the only command answered locally.

use homebus_wire::{encoding::network, SerializeBuf};

use crate::config::Config;
use crate::frame::{Command, Frame, Reply, Status, FRAME_LEN};
use crate::reply::SpecialReply;

/// Version identifier as an ASCII string in a special reply.
pub const TYPE_STRING: u8 = 0;
/// Module type and firmware version packed into the reply value.
pub const TYPE_BINARY: u8 = 1;
/// Ask the Homebus slave for its binary version instead.
pub const TYPE_SLAVE: u8 = 4;

/// Layout of the version string reply.
#[derive(network::SerializeIter, network::SerializeBuf)]
struct VersionString {
    host: u8,
    version: [u8; 8],
}

/// What the dispatcher must do after a local handler ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Send the (possibly updated) reply in standard layout.
    Standard,
    /// Send this frame instead of a standard reply.
    Special(SpecialReply),
    /// Forward this command to the slave and relay its answer.
    Forward(Command),
}

pub fn get_version(command: &Command, reply: &mut Reply, config: &Config) -> Outcome {
    match command.kind {
        TYPE_STRING => {
            let mut frame: Frame = [0; FRAME_LEN];

            VersionString {
                host: config.host_address,
                version: config.version_string,
            }
            .serialize_buf(&mut frame);

            Outcome::Special(SpecialReply::new(frame))
        }
        TYPE_BINARY => {
            let [type_high, type_low] = config.device_type;
            let [version_high, version_low] = config.firmware_version;

            reply.value = i32::from_be_bytes([type_high, type_low, version_high, version_low]);

            Outcome::Standard
        }
        TYPE_SLAVE => Outcome::Forward(Command {
            kind: TYPE_BINARY,
            ..*command
        }),
        _ => {
            reply.status = Status::WRONG_TYPE;

            Outcome::Standard
        }
    }
}
