//! Fuzz target: bring-up configuration parsing and validation.

#![no_main]

use libfuzzer_sys::fuzz_target;
use vpss_periph::config::BringupConfig;
use vpss_periph::periph::generator_timing;

fuzz_target!(|data: &[u8]| {
    let Ok(config) = serde_json::from_slice::<BringupConfig>(data) else {
        return;
    };
    if config.validate().is_ok() {
        // Every preset is programmable at every supported width.
        assert!(generator_timing(&config.stream(), config.pixels_per_clock).is_ok());
    }
});
