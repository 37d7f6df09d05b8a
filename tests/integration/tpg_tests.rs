//! Integration tests: TPG programming sequence and status report.

use vpss_periph::adapters::sim_bus::SimBus;
use vpss_periph::drivers::tpg::*;
use vpss_periph::params::TPG_0_BASEADDR;
use vpss_periph::periph::Periph;
use vpss_periph::video::{ColorFormat, TpgPattern};

use crate::mock_delay::MockDelay;

fn bring_up() -> (SimBus, Periph<SimBus, MockDelay>) {
    let bus = SimBus::new();
    let p = Periph::power_on_init(bus.clone(), MockDelay::new()).expect("power-on init");
    bus.clear_journal();
    (bus, p)
}

fn tpg_writes(bus: &SimBus) -> Vec<(u32, u32)> {
    bus.writes()
        .into_iter()
        .filter(|w| w.addr >= TPG_0_BASEADDR && w.addr < TPG_0_BASEADDR + 0x1_0000)
        .map(|w| (w.addr - TPG_0_BASEADDR, w.value))
        .collect()
}

#[test]
fn config_tpg_stops_programs_and_restarts() {
    let (bus, mut p) = bring_up();
    p.set_tpg_params(1280, 720, ColorFormat::YCrCb422, TpgPattern::ZonePlate, false);
    p.config_tpg().unwrap();

    assert_eq!(
        tpg_writes(&bus),
        vec![
            (CTRL_ADDR_AP_CTRL, 0),
            (CTRL_ADDR_HEIGHT_DATA, 720),
            (CTRL_ADDR_WIDTH_DATA, 1280),
            (CTRL_ADDR_COLORFORMAT_DATA, 2),
            (CTRL_ADDR_BCKGNDID_DATA, 10),
            (CTRL_ADDR_OVRLAYID_DATA, 0),
            (CTRL_ADDR_AP_CTRL, AP_AUTO_RESTART),
            (CTRL_ADDR_AP_CTRL, AP_AUTO_RESTART | AP_START),
        ]
    );
}

#[test]
fn interlaced_flag_is_recorded_but_not_programmed() {
    let (bus, mut p) = bring_up();
    p.set_tpg_interlaced_mode(true);
    p.config_tpg().unwrap();
    assert!(p.tpg_config().interlaced);
    assert_eq!(tpg_writes(&bus).len(), 8);
}

#[test]
fn failed_validation_leaves_tpg_untouched() {
    let (bus, mut p) = bring_up();
    p.set_tpg_height(0);
    assert!(p.config_tpg().is_err());
    assert!(tpg_writes(&bus).is_empty());
}

#[test]
fn disable_clears_auto_restart() {
    let (bus, p) = bring_up();
    p.config_tpg().unwrap();
    bus.clear_journal();
    p.disable_tpg();
    assert_eq!(tpg_writes(&bus), vec![(CTRL_ADDR_AP_CTRL, 0)]);
}

#[test]
fn status_report_reads_back_programmed_frame() {
    let (bus, mut p) = bring_up();
    p.set_tpg_params(640, 480, ColorFormat::YCrCb444, TpgPattern::SolidBlue, false);
    p.config_tpg().unwrap();

    // The core consumed ap_start and finished a frame.
    bus.poke(
        TPG_0_BASEADDR + CTRL_ADDR_AP_CTRL,
        AP_AUTO_RESTART | AP_DONE | AP_IDLE,
    );

    let status = p.tpg_dbg_report_status();
    assert!(status.done);
    assert!(status.idle);
    assert!(status.ready);
    assert_eq!(status.ctrl, AP_AUTO_RESTART | AP_DONE | AP_IDLE);
    assert_eq!((status.width, status.height), (640, 480));
    assert_eq!(status.bckgnd_id, TpgPattern::SolidBlue.id());
    assert_eq!(status.color_format, ColorFormat::YCrCb444.code());
}
