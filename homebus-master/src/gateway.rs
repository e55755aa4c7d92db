//! Seams to the transports and the tick source.
//!
//! Implementations own the hardware: UART drivers, bus transceivers and
//! the system timer. The dispatcher only ever sees whole frames and tick
//! counts.

use crate::frame::Frame;

/// The RS485 link to the host.
pub trait HostLink {
    type Error;

    /// Take a complete frame if one has arrived. Never blocks.
    fn try_receive(&mut self) -> Option<Frame>;

    fn send(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

/// The Homebus link to the slave controller.
pub trait DeviceBus {
    type Error;

    fn send(&mut self, frame: &Frame) -> Result<(), Self::Error>;

    /// Take a complete frame if one has arrived. Never blocks.
    fn try_receive(&mut self) -> Option<Frame>;
}

/// A free-running tick counter.
pub trait Clock {
    /// Current tick count. Wraps at `u32::MAX`.
    fn now(&self) -> u32;

    /// Ticks since `mark`, correct across one wrap of the counter.
    #[inline]
    fn elapsed_since(&self, mark: u32) -> u32 {
        self.now().wrapping_sub(mark)
    }
}

impl<T: HostLink + ?Sized> HostLink for &mut T {
    type Error = T::Error;

    #[inline]
    fn try_receive(&mut self) -> Option<Frame> {
        T::try_receive(self)
    }

    #[inline]
    fn send(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        T::send(self, frame)
    }
}

impl<T: DeviceBus + ?Sized> DeviceBus for &mut T {
    type Error = T::Error;

    #[inline]
    fn send(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        T::send(self, frame)
    }

    #[inline]
    fn try_receive(&mut self) -> Option<Frame> {
        T::try_receive(self)
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    #[inline]
    fn now(&self) -> u32 {
        T::now(self)
    }
}
