//! Relaying a command to the Homebus slave.

use crate::config::Config;
use crate::frame::{decode_device_reply, encode_device_frame, Command, Reply, Status};
use crate::gateway::{Clock, DeviceBus};

/// Send `command` to the slave and wait for its reply.
///
/// Busy-polls the bus until a reply arrives or `reply_timeout_ticks`
/// have elapsed. On timeout the command is echoed back with
/// [`Status::COMMAND_NOT_AVAILABLE`]; nothing is retried.
pub fn forward<D, C>(bus: &mut D, clock: &C, config: &Config, command: &Command) -> Reply
where
    D: DeviceBus,
    C: Clock,
{
    debug!(
        "forwarding opcode {} type {} to slave {}",
        command.opcode,
        command.kind,
        config.slave_address
    );

    if bus
        .send(&encode_device_frame(config.slave_address, command))
        .is_err()
    {
        warn!("homebus send failed");
    }

    let mark = clock.now();

    loop {
        if let Some(frame) = bus.try_receive() {
            match decode_device_reply(&frame, config.device_checksum) {
                Ok(reply) => return reply,
                Err(_) => warn!("discarding homebus reply with bad checksum"),
            }
        }

        if clock.elapsed_since(mark) >= config.reply_timeout_ticks {
            break;
        }
    }

    warn!("no homebus reply to opcode {}", command.opcode);

    Reply {
        status: Status::COMMAND_NOT_AVAILABLE,
        ..Reply::echo(command)
    }
}
