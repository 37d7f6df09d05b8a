//! Register-level drivers for the VPSS example-design peripherals.

pub mod gpio;
pub mod io;
pub mod tpg;
pub mod vtc;
