//! Fuzz target: VTC programming with arbitrary raster timings.
//!
//! Any timing must either be rejected or programmed without panicking,
//! and accepted timings must leave the generator enabled.

#![no_main]

use embedded_hal::delay::DelayNs;
use libfuzzer_sys::fuzz_target;
use vpss_periph::adapters::sim_bus::SimBus;
use vpss_periph::drivers::vtc;
use vpss_periph::params;
use vpss_periph::periph::Periph;
use vpss_periph::video::{ColorFormat, VideoStream, VideoTiming};

struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

fn word(data: &[u8], i: usize) -> u16 {
    let lo = data.get(2 * i).copied().unwrap_or(0);
    let hi = data.get(2 * i + 1).copied().unwrap_or(0);
    u16::from_le_bytes([lo, hi])
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 18 {
        return;
    }
    // Keep each count small enough that totals cannot overflow u16.
    let c = |i| word(data, i) & 0x0FFF;
    let mut timing = VideoTiming::progressive(
        (c(0), c(1), c(2), c(3)),
        data[16] & 1 != 0,
        (c(4), c(5), c(6), c(7)),
        data[16] & 2 != 0,
    );
    timing.f1_v_front_porch = c(5);
    timing.f1_v_sync_width = c(6);
    timing.f1_v_back_porch = c(7);
    let stream = VideoStream {
        timing,
        color_format: ColorFormat::Rgb,
        frame_rate: 60,
        interlaced: data[16] & 4 != 0,
    };
    let ppc = data[17];

    let bus = SimBus::new();
    let Ok(periph) = Periph::power_on_init(bus.clone(), NoDelay) else {
        return;
    };
    if periph.config_vtc(&stream, ppc).is_ok() {
        let ctl = bus.peek(params::VTC_0_BASEADDR + vtc::CTL_OFFSET);
        assert_ne!(ctl & vtc::CTL_GE_MASK, 0);
    }
});
