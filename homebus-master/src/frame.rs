//! Wire layout of TMCL commands and replies.
//!
//! Both legs exchange 9-byte frames: an 8-byte body followed by the
//! modulo-256 sum of the body. Commands travel as a [`Request`] (target
//! address first), replies as a [`Response`] (host and module address
//! first). Values are sent most significant byte first.

use homebus_wire::{encoding::network, SerializeBuf};

use crate::checksum::{ChecksumPacket, Sum8};
use crate::config::DeviceChecksum;

pub use crate::checksum::error::Mismatch as ChecksumMismatch;

/// Length of every frame on either leg.
pub const FRAME_LEN: usize = 9;

const BODY_LEN: usize = FRAME_LEN - 1;

pub type Frame = [u8; FRAME_LEN];

/// Reply status byte.
///
/// Kept open so statuses reported by the slave pass through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, network::SerializeIter, network::SerializeBuf)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(transparent)]
pub struct Status(pub u8);

impl Status {
    pub const OK: Self = Self(100);
    pub const CHECKSUM_ERROR: Self = Self(1);
    pub const INVALID_COMMAND: Self = Self(2);
    pub const WRONG_TYPE: Self = Self(3);
    pub const INVALID_VALUE: Self = Self(4);
    pub const EEPROM_LOCKED: Self = Self(5);
    pub const COMMAND_NOT_AVAILABLE: Self = Self(6);

    #[inline]
    pub const fn is_ok(self) -> bool {
        self.0 == Self::OK.0
    }
}

/// A decoded TMCL instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, network::SerializeIter, network::SerializeBuf)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    pub opcode: u8,
    /// TMCL "type" number, the sub-function of the opcode.
    pub kind: u8,
    /// Motor or bank index.
    pub motor: u8,
    pub value: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, network::SerializeIter, network::SerializeBuf)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reply {
    pub status: Status,
    pub opcode: u8,
    pub value: i32,
}

impl Reply {
    /// The reply every command starts out with:
    /// its own opcode and value, status OK.
    pub const fn echo(command: &Command) -> Self {
        Self {
            status: Status::OK,
            opcode: command.opcode,
            value: command.value,
        }
    }
}

/// Body of a frame carrying a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, network::SerializeIter, network::SerializeBuf)]
pub struct Request {
    pub address: u8,
    pub command: Command,
}

/// Body of a frame carrying a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, network::SerializeIter, network::SerializeBuf)]
pub struct Response {
    pub host: u8,
    pub module: u8,
    pub reply: Reply,
}

/// Address a frame is meant for.
#[inline]
pub const fn target_address(frame: &Frame) -> u8 {
    frame[0]
}

/// Validate and decode a command frame received from the host.
///
/// The target address is not checked here.
pub fn decode_host_frame(frame: &Frame) -> Result<Command, ChecksumMismatch> {
    let (body, checksum) = split(frame);
    let packet = ChecksumPacket::<Request, Sum8>::construct_buf(&body, &checksum, &mut Sum8::new())?;

    Ok(packet.into_payload().command)
}

/// Encode a standard reply frame for the host.
pub fn encode_reply_frame(host_address: u8, module_address: u8, reply: &Reply) -> Frame {
    seal(Response {
        host: host_address,
        module: module_address,
        reply: *reply,
    })
}

/// Encode a command frame for the Homebus slave.
pub fn encode_device_frame(slave_address: u8, command: &Command) -> Frame {
    seal(Request {
        address: slave_address,
        command: *command,
    })
}

/// Decode a reply frame received from the Homebus slave.
///
/// With [`DeviceChecksum::Trust`] the checksum byte is ignored.
pub fn decode_device_reply(frame: &Frame, policy: DeviceChecksum) -> Result<Reply, ChecksumMismatch> {
    let (body, checksum) = split(frame);

    let response = match policy {
        DeviceChecksum::Verify => {
            ChecksumPacket::<Response, Sum8>::construct_buf(&body, &checksum, &mut Sum8::new())?
                .into_payload()
        }
        DeviceChecksum::Trust => Response::deserialize_buf(&body),
    };

    Ok(response.reply)
}

fn seal<P: SerializeBuf<Serialized = [u8; BODY_LEN]>>(payload: P) -> Frame {
    let mut body = [0; BODY_LEN];
    let checksum = ChecksumPacket::<P, Sum8>::new(payload).render_buf(&mut body, &mut Sum8::new());

    let mut frame = [0; FRAME_LEN];
    frame[..BODY_LEN].copy_from_slice(&body);
    frame[BODY_LEN] = checksum;

    frame
}

fn split(frame: &Frame) -> ([u8; BODY_LEN], u8) {
    let mut body = [0; BODY_LEN];
    body.copy_from_slice(&frame[..BODY_LEN]);

    (body, frame[BODY_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::host_frame;

    mod host {
        use super::*;

        #[test]
        fn decode() {
            let frame = host_frame(1, 4, 0, 2, -1000);

            assert_eq!(
                Ok(Command {
                    opcode: 4,
                    kind: 0,
                    motor: 2,
                    value: -1000,
                }),
                decode_host_frame(&frame)
            );
        }

        #[test]
        fn accepts_only_matching_checksum() {
            let mut frame = host_frame(1, 1, 0, 0, 1000);
            let good = frame[8];

            for checksum in 0..=u8::MAX {
                frame[8] = checksum;

                assert_eq!(checksum == good, decode_host_frame(&frame).is_ok());
            }
        }

        #[test]
        fn checksum_wraps() {
            let frame = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xf8];

            assert_eq!(
                Ok(Command {
                    opcode: 0xff,
                    kind: 0xff,
                    motor: 0xff,
                    value: -1,
                }),
                decode_host_frame(&frame)
            );
        }

        #[test]
        fn address_is_not_checked() {
            let frame = host_frame(42, 1, 0, 0, 0);

            assert_eq!(42, target_address(&frame));
            assert!(decode_host_frame(&frame).is_ok());
        }

        #[test]
        fn encode_reply() {
            let reply = Reply {
                status: Status::OK,
                opcode: 1,
                value: 1000,
            };

            // 2 + 1 + 100 + 1 + 3 + 0xe8 = 339 = 0x153
            assert_eq!(
                [2, 1, 100, 1, 0x00, 0x00, 0x03, 0xe8, 0x53],
                encode_reply_frame(2, 1, &reply)
            );
        }
    }

    mod device {
        use super::*;

        #[test]
        fn encode_command() {
            let command = Command {
                opcode: 1,
                kind: 0,
                motor: 0,
                value: 1000,
            };

            let frame = encode_device_frame(1, &command);

            assert_eq!([1, 1, 0, 0, 0x00, 0x00, 0x03, 0xe8], frame[..8]);
            assert_eq!(Sum8::digest(&frame[..8]), frame[8]);
            assert_eq!(Ok(command), decode_host_frame(&frame));
        }

        #[test]
        fn decode_reply() {
            let reply = Reply {
                status: Status(4),
                opcode: 6,
                value: -7,
            };
            let frame = encode_reply_frame(2, 1, &reply);

            assert_eq!(Ok(reply), decode_device_reply(&frame, DeviceChecksum::Verify));
            assert_eq!(Ok(reply), decode_device_reply(&frame, DeviceChecksum::Trust));
        }

        #[test]
        fn corrupt_reply() {
            let reply = Reply {
                status: Status::OK,
                opcode: 6,
                value: 12,
            };
            let mut frame = encode_reply_frame(2, 1, &reply);
            frame[8] ^= 0x10;

            assert_eq!(
                Err(ChecksumMismatch),
                decode_device_reply(&frame, DeviceChecksum::Verify)
            );
            assert_eq!(Ok(reply), decode_device_reply(&frame, DeviceChecksum::Trust));
        }
    }

    mod status {
        use super::*;

        #[test]
        fn wire_values() {
            assert_eq!(100, Status::OK.0);
            assert_eq!(1, Status::CHECKSUM_ERROR.0);
            assert_eq!(2, Status::INVALID_COMMAND.0);
            assert_eq!(3, Status::WRONG_TYPE.0);
            assert_eq!(6, Status::COMMAND_NOT_AVAILABLE.0);

            assert!(Status::OK.is_ok());
            assert!(!Status::WRONG_TYPE.is_ok());
        }

        #[test]
        fn echo() {
            let command = Command {
                opcode: 200,
                kind: 3,
                motor: 1,
                value: 77,
            };

            assert_eq!(
                Reply {
                    status: Status::OK,
                    opcode: 200,
                    value: 77,
                },
                Reply::echo(&command)
            );
        }
    }
}
