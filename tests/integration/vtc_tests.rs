//! Integration tests: VTC generator programming for the standard modes.

use vpss_periph::Error;
use vpss_periph::adapters::sim_bus::SimBus;
use vpss_periph::drivers::vtc::*;
use vpss_periph::params::VTC_0_BASEADDR;
use vpss_periph::periph::Periph;
use vpss_periph::video::{ColorFormat, VideoMode, VideoStream};

use crate::mock_delay::MockDelay;

fn bring_up() -> (SimBus, Periph<SimBus, MockDelay>) {
    let bus = SimBus::new();
    let p = Periph::power_on_init(bus.clone(), MockDelay::new()).expect("power-on init");
    bus.clear_journal();
    (bus, p)
}

fn reg(bus: &SimBus, offset: u32) -> u32 {
    bus.peek(VTC_0_BASEADDR + offset)
}

#[test]
fn ctl_sequence_resets_selects_generator_and_enables() {
    let (bus, p) = bring_up();
    let stream = VideoStream::from_mode(VideoMode::FullHd1920x1080p60, ColorFormat::Rgb);
    p.config_vtc(&stream, 2).unwrap();

    assert_eq!(
        bus.writes_to(VTC_0_BASEADDR + CTL_OFFSET),
        vec![
            CTL_RESET_MASK,
            CTL_RESET_MASK,
            CTL_RESET_MASK,
            CTL_ALL_SOURCES_GENERATOR,
            CTL_ALL_SOURCES_GENERATOR | CTL_SW_MASK,
            CTL_ALL_SOURCES_GENERATOR | CTL_SW_MASK | CTL_GE_MASK,
            CTL_ALL_SOURCES_GENERATOR | CTL_SW_MASK | CTL_GE_MASK | CTL_RU_MASK,
        ]
    );
}

#[test]
fn full_hd_at_two_pixels_per_clock() {
    let (bus, p) = bring_up();
    let stream = VideoStream::from_mode(VideoMode::FullHd1920x1080p60, ColorFormat::Rgb);
    p.config_vtc(&stream, 2).unwrap();

    assert_eq!(reg(&bus, GASIZE_OFFSET), (1080 << 16) | 960);
    assert_eq!(reg(&bus, GHSIZE_OFFSET), 1100);
    assert_eq!(reg(&bus, GVSIZE_OFFSET), (1125 << 16) | 1125);
    // hsync from 960 + 44 to 1004 + 22.
    assert_eq!(reg(&bus, GHSYNC_OFFSET), (1026 << 16) | 1004);
    // vsync from line 1084 to 1089.
    assert_eq!(reg(&bus, GVSYNC_OFFSET), (1089 << 16) | 1084);
    assert_eq!(reg(&bus, GFENC_OFFSET), 0);
}

#[test]
fn positive_sync_mode_sets_all_sync_and_blank_polarities() {
    let (bus, p) = bring_up();
    let stream = VideoStream::from_mode(VideoMode::Hd1280x720p60, ColorFormat::Rgb);
    p.config_vtc(&stream, 1).unwrap();

    let expected = POL_ACTIVE_CHROMA_MASK
        | POL_ACTIVE_VIDEO_MASK
        | POL_VBLANK_MASK
        | POL_VSYNC_MASK
        | POL_HBLANK_MASK
        | POL_HSYNC_MASK;
    assert_eq!(reg(&bus, GPOL_OFFSET), expected);
    assert_eq!(reg(&bus, GPOL_OFFSET) & POL_FIELD_ID_MASK, 0);
}

#[test]
fn negative_sync_mode_keeps_only_active_polarities() {
    let (bus, p) = bring_up();
    let stream = VideoStream::from_mode(VideoMode::Vga640x480p60, ColorFormat::Rgb);
    p.config_vtc(&stream, 1).unwrap();
    assert_eq!(
        reg(&bus, GPOL_OFFSET),
        POL_ACTIVE_CHROMA_MASK | POL_ACTIVE_VIDEO_MASK
    );
}

#[test]
fn interlaced_stream_is_generated_progressive() {
    let (bus, p) = bring_up();
    let mut stream = VideoStream::from_mode(VideoMode::Hd1280x720p60, ColorFormat::Rgb);
    stream.interlaced = true;
    p.config_vtc(&stream, 1).unwrap();
    assert_eq!(reg(&bus, GFENC_OFFSET) & ENC_INTERLACED_MASK, 0);
}

#[test]
fn every_preset_fits_the_counters_at_its_native_width() {
    for mode in VideoMode::ALL {
        let (_, p) = bring_up();
        let stream = VideoStream::from_mode(mode, ColorFormat::Rgb);
        assert!(p.config_vtc(&stream, 1).is_ok(), "{}", mode.name());
    }
}

#[test]
fn rejected_stream_writes_nothing() {
    let (bus, p) = bring_up();
    let stream = VideoStream::from_mode(VideoMode::Hd1280x720p60, ColorFormat::Rgb);
    assert!(matches!(
        p.config_vtc(&stream, 3),
        Err(Error::InvalidArgument(_))
    ));
    assert!(bus.writes().is_empty());
}
