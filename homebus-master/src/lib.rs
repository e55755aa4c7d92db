//! TMCL to Homebus gateway for a motion-control master node.
//!
//! Commands arrive from the host over an addressed RS485 link, are validated
//! and either answered locally or forwarded to the single Homebus slave. The
//! slave's reply is reformatted and sent back to the host at the start of the
//! next cycle.
//!
//! The crate owns only protocol semantics. Byte transport and the tick source
//! are supplied through the traits in [`gateway`]; [`serial`] adapts any
//! blocking `embedded-io` port to them.

#![no_std]

// must come first so the macros are visible to every module below
#[macro_use]
mod fmt;

pub mod checksum;
pub mod config;
pub mod dispatcher;
pub mod forward;
pub mod frame;
pub mod gateway;
pub mod opcode;
pub mod reply;
pub mod serial;
pub mod shared;
pub mod version;

pub use config::Config;
pub use dispatcher::{DispatchState, Dispatcher};
pub use frame::{Command, Frame, Reply, Status, FRAME_LEN};
pub use gateway::{Clock, DeviceBus, HostLink};
pub use reply::ReplyFormat;

#[cfg(test)]
mod mock;
