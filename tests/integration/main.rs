//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises one part of the bring-up
//! against the simulated register bus. All tests run on the host with no
//! FPGA attached.

mod bringup_tests;
mod mock_delay;
mod tpg_tests;
mod vtc_tests;
