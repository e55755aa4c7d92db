//! The command/reply state machine.
//!
//! One call to [`Dispatcher::poll`] is one cycle:
//!
//! 1. send the reply owed for the previous cycle's command, if any,
//! 2. go idle,
//! 3. poll the host link once for a new frame,
//! 4. execute a freshly decoded command, locally or on the slave.
//!
//! Replies therefore leave at the start of the *next* cycle, and at most one
//! reply is ever pending. Frames addressed to other nodes are dropped without
//! a trace, since several modules share the host link.

use crate::config::Config;
use crate::forward::forward;
use crate::frame::{decode_host_frame, target_address, Command, Reply, Status};
use crate::gateway::{Clock, DeviceBus, HostLink};
use crate::opcode::{route, LocalHandler, Route};
use crate::reply::{ReplyFormat, ReplyFormatter, CHECKSUM_ERROR_REPLY};
use crate::version::{self, Outcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchState {
    Idle,
    /// A reply in the given format goes out next cycle.
    AwaitingReply(ReplyFormat),
}

pub struct Dispatcher<H, D, C>
where
    H: HostLink,
    D: DeviceBus,
    C: Clock,
{
    host: H,
    bus: D,
    clock: C,
    config: Config,
    state: DispatchState,
    command: Command,
    reply: Reply,
    formatter: ReplyFormatter,
}

impl<H, D, C> Dispatcher<H, D, C>
where
    H: HostLink,
    D: DeviceBus,
    C: Clock,
{
    pub const fn new(host: H, bus: D, clock: C, config: Config) -> Self {
        const NOTHING: Command = Command {
            opcode: 0,
            kind: 0,
            motor: 0,
            value: 0,
        };

        Self {
            host,
            bus,
            clock,
            config,
            state: DispatchState::Idle,
            command: NOTHING,
            reply: Reply::echo(&NOTHING),
            formatter: ReplyFormatter::new(),
        }
    }

    /// Run one cycle. Returns the state carried into the next one.
    pub fn poll(&mut self) -> DispatchState {
        self.flush();
        self.state = DispatchState::Idle;

        self.acquire();

        if self.state == DispatchState::AwaitingReply(ReplyFormat::Standard) {
            self.execute();
        }

        self.state
    }

    /// Send the reply owed from the previous cycle.
    fn flush(&mut self) {
        let DispatchState::AwaitingReply(format) = self.state else {
            return;
        };

        let frame = self.formatter.render(format, &self.reply, &self.config);

        if self.host.send(&frame).is_err() {
            warn!("host link send failed, reply dropped");
        }
    }

    /// Take at most one frame from the host link.
    fn acquire(&mut self) {
        let Some(frame) = self.host.try_receive() else {
            return;
        };

        if target_address(&frame) != self.config.module_address {
            return;
        }

        match decode_host_frame(&frame) {
            Ok(command) => {
                trace!(
                    "command opcode {} type {} motor {} value {}",
                    command.opcode,
                    command.kind,
                    command.motor,
                    command.value
                );

                self.command = command;
                self.state = DispatchState::AwaitingReply(ReplyFormat::Standard);
            }
            Err(_) => {
                warn!("host frame checksum mismatch");

                self.reply = CHECKSUM_ERROR_REPLY;
                self.state = DispatchState::AwaitingReply(ReplyFormat::ChecksumError);
            }
        }
    }

    fn execute(&mut self) {
        self.reply = Reply::echo(&self.command);

        match route(self.command.opcode) {
            Some(Route::Forward) => self.relay(),
            Some(Route::Local(LocalHandler::GetVersion)) => {
                match version::get_version(&self.command, &mut self.reply, &self.config) {
                    Outcome::Standard => {}
                    Outcome::Special(special) => {
                        self.formatter.stage_special(special);
                        self.state = DispatchState::AwaitingReply(ReplyFormat::Special);
                    }
                    Outcome::Forward(command) => {
                        self.command = command;
                        self.relay();
                    }
                }
            }
            None => {
                debug!("unsupported opcode {}", self.command.opcode);

                self.reply.status = Status::INVALID_COMMAND;
            }
        }
    }

    fn relay(&mut self) {
        self.reply = forward(&mut self.bus, &self.clock, &self.config, &self.command);
    }

    #[inline]
    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// The most recently accepted command.
    #[inline]
    pub fn command(&self) -> &Command {
        &self.command
    }

    /// The reply owed for the most recent frame,
    /// the checksum error reply included.
    #[inline]
    pub fn reply(&self) -> &Reply {
        &self.reply
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn host_link_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn device_bus_mut(&mut self) -> &mut D {
        &mut self.bus
    }

    /// Give back the transports and the clock.
    pub fn release(self) -> (H, D, C) {
        (self.host, self.bus, self.clock)
    }
}
