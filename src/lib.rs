//! Peripheral bring-up for the VPSS example design.
//!
//! Binds the test pattern generator, video timing controller, and the
//! reset/monitor GPIO lines to driver instances and programs them for a
//! requested video mode. Drivers are generic over [`drivers::io::RegisterIo`]
//! so the same code runs against real MMIO on the target and against the
//! simulated bus in [`adapters`] on a development host.

#![cfg_attr(target_os = "none", no_std)]
#![deny(unused_must_use)]

pub mod config;
pub mod drivers;
pub mod params;
pub mod periph;
pub mod video;

pub mod error;

// Host-only: needs `std` for the shared register file and thread sleep.
#[cfg(not(target_os = "none"))]
pub mod adapters;

pub use error::{Error, Result};
pub use periph::Periph;
