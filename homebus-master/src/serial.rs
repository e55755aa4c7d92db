//! Frame assembly over a blocking `embedded-io` serial port.

use embedded_io::{ErrorType, Read, ReadReady, Write};
use heapless::Vec;

use crate::frame::{Frame, FRAME_LEN};
use crate::gateway::{DeviceBus, HostLink};

type FrameBuffer = Vec<u8, FRAME_LEN>;

/// Turns a byte port into a frame link.
///
/// Bytes are only read while the port reports them ready, so neither
/// receive path ever blocks. Frames are not delimited on the wire: a
/// dropped byte shifts every following frame until [`SerialLink::reset`]
/// is called, typically after a line break or an idle gap.
pub struct SerialLink<P>
where
    P: Read + ReadReady + Write,
{
    port: P,
    buf: FrameBuffer,
}

impl<P> SerialLink<P>
where
    P: Read + ReadReady + Write,
{
    pub const fn new(port: P) -> Self {
        Self {
            port,
            buf: FrameBuffer::new(),
        }
    }

    /// Discard a partially received frame.
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Number of bytes of the next frame received so far.
    #[inline]
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn release(self) -> P {
        self.port
    }

    fn receive(&mut self) -> Option<Frame> {
        while !self.buf.is_full() {
            match self.port.read_ready() {
                Ok(true) => {}
                Ok(false) => return None,
                Err(_) => {
                    warn!("serial port fault, dropping {} bytes", self.buf.len());
                    self.reset();

                    return None;
                }
            }

            let mut chunk = [0; FRAME_LEN];
            let room = FRAME_LEN - self.buf.len();

            match self.port.read(&mut chunk[..room]) {
                Ok(0) => return None,
                Ok(n) => {
                    // `room` bounds `n`
                    let _ = self.buf.extend_from_slice(&chunk[..n]);
                }
                Err(_) => {
                    warn!("serial read failed, dropping {} bytes", self.buf.len());
                    self.reset();

                    return None;
                }
            }
        }

        let frame = Frame::try_from(self.buf.as_slice()).ok();
        self.buf.clear();

        frame
    }

    fn transmit(&mut self, frame: &Frame) -> Result<(), <P as ErrorType>::Error> {
        self.port.write_all(frame)?;
        self.port.flush()
    }
}

impl<P> HostLink for SerialLink<P>
where
    P: Read + ReadReady + Write,
{
    type Error = <P as ErrorType>::Error;

    fn try_receive(&mut self) -> Option<Frame> {
        self.receive()
    }

    fn send(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        self.transmit(frame)
    }
}

impl<P> DeviceBus for SerialLink<P>
where
    P: Read + ReadReady + Write,
{
    type Error = <P as ErrorType>::Error;

    fn send(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        self.transmit(frame)
    }

    fn try_receive(&mut self) -> Option<Frame> {
        self.receive()
    }
}
