//! A dispatcher shared between execution contexts.
//!
//! The dispatcher's command, reply and state belong together, so every
//! access goes through one lock and sees a whole cycle or none of it.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};

use crate::dispatcher::{DispatchState, Dispatcher};
use crate::gateway::{Clock, DeviceBus, HostLink};

pub struct SharedDispatcher<M, H, D, C>
where
    M: RawMutex,
    H: HostLink,
    D: DeviceBus,
    C: Clock,
{
    inner: Mutex<M, RefCell<Dispatcher<H, D, C>>>,
}

impl<M, H, D, C> SharedDispatcher<M, H, D, C>
where
    M: RawMutex,
    H: HostLink,
    D: DeviceBus,
    C: Clock,
{
    pub const fn new(dispatcher: Dispatcher<H, D, C>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(dispatcher)),
        }
    }

    /// Run one cycle under the lock.
    ///
    /// # Panics
    ///
    /// If called from inside [`SharedDispatcher::inspect`].
    pub fn poll(&self) -> DispatchState {
        self.inner.lock(|dispatcher| dispatcher.borrow_mut().poll())
    }

    /// Look at the dispatcher between cycles.
    pub fn inspect<R>(&self, f: impl FnOnce(&Dispatcher<H, D, C>) -> R) -> R {
        self.inner.lock(|dispatcher| f(&dispatcher.borrow()))
    }

    pub fn into_inner(self) -> Dispatcher<H, D, C> {
        self.inner.into_inner().into_inner()
    }
}
