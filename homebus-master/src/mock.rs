//! Scripted transports and clock for tests.

use core::cell::Cell;

use heapless::{Deque, Vec};

use crate::checksum::Sum8;
use crate::frame::{encode_reply_frame, Frame, Reply, Status, FRAME_LEN};
use crate::gateway::{Clock, DeviceBus, HostLink};

const DEPTH: usize = 16;

/// Build a host frame with a correct checksum.
pub fn host_frame(address: u8, opcode: u8, kind: u8, motor: u8, value: i32) -> Frame {
    let mut frame = [0; FRAME_LEN];
    frame[..4].copy_from_slice(&[address, opcode, kind, motor]);
    frame[4..8].copy_from_slice(&value.to_be_bytes());
    frame[8] = Sum8::digest(&frame[..8]);

    frame
}

/// Build a reply frame as the Homebus slave would send it.
pub fn slave_reply(status: Status, opcode: u8, value: i32) -> Frame {
    encode_reply_frame(
        2,
        1,
        &Reply {
            status,
            opcode,
            value,
        },
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendFailed;

#[derive(Default)]
pub struct MockHost {
    pub inbound: Deque<Frame, DEPTH>,
    pub sent: Vec<Frame, DEPTH>,
    pub fail_sends: bool,
}

impl MockHost {
    pub fn push(&mut self, frame: Frame) {
        self.inbound.push_back(frame).unwrap();
    }
}

impl HostLink for MockHost {
    type Error = SendFailed;

    fn try_receive(&mut self) -> Option<Frame> {
        self.inbound.pop_front()
    }

    fn send(&mut self, frame: &Frame) -> Result<(), SendFailed> {
        if self.fail_sends {
            return Err(SendFailed);
        }

        self.sent.push(*frame).unwrap();
        Ok(())
    }
}

/// A slave that answers with queued frames once
/// `latency` polls have passed since the last send.
#[derive(Default)]
pub struct MockBus {
    pub sent: Vec<Frame, DEPTH>,
    pub replies: Deque<Frame, DEPTH>,
    pub latency: u32,
    pub polls: u32,
    pub fail_sends: bool,
    polls_since_send: u32,
}

impl MockBus {
    pub fn answer(&mut self, frame: Frame) {
        self.replies.push_back(frame).unwrap();
    }
}

impl DeviceBus for MockBus {
    type Error = SendFailed;

    fn send(&mut self, frame: &Frame) -> Result<(), SendFailed> {
        self.polls_since_send = 0;

        if self.fail_sends {
            return Err(SendFailed);
        }

        self.sent.push(*frame).unwrap();
        Ok(())
    }

    fn try_receive(&mut self) -> Option<Frame> {
        self.polls += 1;
        self.polls_since_send += 1;

        if self.polls_since_send > self.latency {
            self.replies.pop_front()
        } else {
            None
        }
    }
}

/// A clock that advances by `step` ticks every time it is read.
pub struct SteppingClock {
    now: Cell<u32>,
    step: u32,
}

impl SteppingClock {
    pub const fn new(start: u32, step: u32) -> Self {
        Self {
            now: Cell::new(start),
            step,
        }
    }

    pub fn ticks(&self) -> u32 {
        self.now.get()
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> u32 {
        let now = self.now.get();
        self.now.set(now.wrapping_add(self.step));

        now
    }
}
