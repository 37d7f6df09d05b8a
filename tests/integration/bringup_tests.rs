//! Integration tests: power-on init and the reset network.

use vpss_periph::adapters::sim_bus::SimBus;
use vpss_periph::params;
use vpss_periph::periph::{self, Periph};

use crate::mock_delay::MockDelay;

fn bring_up() -> (SimBus, MockDelay, Periph<SimBus, MockDelay>) {
    let bus = SimBus::new();
    let delay = MockDelay::new();
    let p = Periph::power_on_init(bus.clone(), delay.clone()).expect("power-on init");
    (bus, delay, p)
}

#[test]
fn binds_every_peripheral_to_its_table_entry() {
    let (_, _, p) = bring_up();
    assert_eq!(p.tpg().config().base_address, params::TPG_0_BASEADDR);
    assert_eq!(p.vtc().config().base_address, params::VTC_0_BASEADDR);
    assert_eq!(
        p.vid_lock_monitor().config().base_address,
        params::VIDEO_LOCK_MONITOR_BASEADDR
    );
}

#[test]
fn power_on_init_does_not_touch_video_cores() {
    let (bus, _, _) = bring_up();
    for w in bus.writes() {
        assert!(
            !(params::TPG_0_BASEADDR..params::TPG_0_BASEADDR + 0x1000).contains(&w.addr),
            "unexpected TPG write at {:#x}",
            w.addr
        );
        assert!(
            !(params::VTC_0_BASEADDR..params::VTC_0_BASEADDR + 0x1000).contains(&w.addr),
            "unexpected VTC write at {:#x}",
            w.addr
        );
    }
}

#[test]
fn device_report_lists_present_cores() {
    let inventory = periph::report_device_info();
    let names: Vec<_> = inventory.entries().map(|(name, _)| name).collect();
    assert_eq!(names, ["UART-Lite core", "TPG", "VTC", "GPIO"]);
    assert_eq!(inventory.gpio, params::GPIO_NUM_INSTANCES);
}

#[cfg(feature = "hls-ip-reset")]
mod with_reset_network {
    use super::*;
    use vpss_periph::drivers::gpio::DATA_OFFSET;

    const RESET_DATA: u32 = params::HLS_IP_RESET_BASEADDR + DATA_OFFSET;

    #[test]
    fn video_in_is_pulsed_then_left_running() {
        let (bus, delay, p) = bring_up();
        assert_eq!(bus.writes_to(RESET_DATA), vec![0, params::RSTMASK_VIDEO_IN]);
        assert_eq!(
            delay.waits_ms(),
            vec![params::RESET_SETTLE_MS, params::RESET_SETTLE_MS]
        );
        assert_eq!(p.reset_state(), Some(params::RSTMASK_VIDEO_IN));
    }

    #[test]
    fn power_on_does_not_pulse_hls_ip() {
        let (bus, _, _) = bring_up();
        assert!(
            bus.writes_to(RESET_DATA)
                .iter()
                .all(|v| v & params::RSTMASK_IP == 0)
        );
    }

    #[test]
    fn disable_vid_in_keeps_other_lines() {
        let (bus, delay, mut p) = bring_up();
        bus.poke(RESET_DATA, params::RSTMASK_VIDEO_IN | params::RSTMASK_IP);
        delay.clear();

        p.disable_vid_in().unwrap();
        assert_eq!(bus.peek(RESET_DATA), params::RSTMASK_IP);
        p.enable_vid_in().unwrap();
        assert_eq!(bus.peek(RESET_DATA), params::RSTMASK_VIDEO_IN | params::RSTMASK_IP);
        assert_eq!(delay.total_ms(), 2 * params::RESET_SETTLE_MS);
    }

    #[test]
    fn hls_ip_reset_holds_then_releases() {
        let (bus, delay, mut p) = bring_up();
        bus.clear_journal();
        delay.clear();

        p.reset_hls_ip().unwrap();
        let values = bus.writes_to(RESET_DATA);
        assert_eq!(values.len(), 2);
        assert_eq!(values[0] & params::RSTMASK_IP, 0);
        assert_ne!(values[1] & params::RSTMASK_IP, 0);
        assert_eq!(
            delay.waits_ms(),
            vec![params::RESET_SETTLE_MS, params::RESET_SETTLE_MS]
        );
    }
}

#[cfg(not(feature = "hls-ip-reset"))]
#[test]
fn without_reset_network_nothing_is_pulsed() {
    let (bus, delay, mut p) = bring_up();
    assert!(p.hls_ip_reset().is_none());
    p.reset_hls_ip().unwrap();
    assert!(bus.writes().is_empty());
    assert_eq!(delay.total_ms(), 0);
}

#[test]
fn lock_monitor_follows_gpio_input() {
    let (bus, _, p) = bring_up();
    let data = params::VIDEO_LOCK_MONITOR_BASEADDR + vpss_periph::drivers::gpio::DATA_OFFSET;
    bus.poke(data, 0x1);
    assert!(p.is_video_locked());
    bus.poke(data, 0x0);
    assert!(!p.is_video_locked());
}
