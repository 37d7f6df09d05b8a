//! Host-side adapters: simulated register bus and delay provider.
//!
//! These let the drivers and the subsystem layer run on a development
//! machine with no FPGA attached, for tests and the `vpss-sim` binary.

pub mod sim_bus;
pub mod std_delay;
