//! Unified error type for peripheral bring-up.
//!
//! Every driver and the subsystem layer return [`Error`]. Variants are
//! `Copy` and carry only static context strings so they can be logged and
//! passed around without allocation on the embedded target.

use core::fmt;

/// Every fallible bring-up or programming step funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// No configuration descriptor exists for the requested device id.
    DeviceNotFound(&'static str),
    /// A descriptor was found but binding the driver instance failed.
    InitFailed(&'static str),
    /// A caller-supplied value cannot be programmed into the hardware.
    InvalidArgument(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeviceNotFound(what) => write!(f, "{what} device not found"),
            Self::InitFailed(what) => write!(f, "{what} initialization failed"),
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
