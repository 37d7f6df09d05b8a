//! Hardware parameters of the VPSS example design.
//!
//! Single source of truth for device ids, base addresses, and instance
//! counts exported by the FPGA image. Every driver looks its descriptor up
//! here rather than hard-coding addresses. Image variants are selected with
//! cargo features.

use crate::drivers::{gpio, tpg, vtc};

// ---------------------------------------------------------------------------
// Test pattern generator
// ---------------------------------------------------------------------------

pub const TPG_0_DEVICE_ID: u16 = 0;
pub const TPG_0_BASEADDR: u32 = 0x44A4_0000;
/// Widest frame the core was synthesised for.
pub const TPG_0_MAX_COLS: u16 = 3840;
pub const TPG_0_MAX_ROWS: u16 = 2160;

// ---------------------------------------------------------------------------
// Video timing controller
// ---------------------------------------------------------------------------

pub const VTC_0_DEVICE_ID: u16 = 0;
pub const VTC_0_BASEADDR: u32 = 0x44A5_0000;

// ---------------------------------------------------------------------------
// GPIO: video lock monitor and HLS IP reset network
// ---------------------------------------------------------------------------

pub const VIDEO_LOCK_MONITOR_DEVICE_ID: u16 = 0;
pub const VIDEO_LOCK_MONITOR_BASEADDR: u32 = 0x4000_0000;

#[cfg(feature = "hls-ip-reset")]
pub const HLS_IP_RESET_DEVICE_ID: u16 = 1;
#[cfg(feature = "hls-ip-reset")]
pub const HLS_IP_RESET_BASEADDR: u32 = 0x4001_0000;

/// GPIO channel carrying the reset network and the lock indicator.
pub const GPIO_CHANNEL_1: u32 = 1;

/// Reset line going to the video block feeding the VPSS.
pub const RSTMASK_VIDEO_IN: u32 = 0x01;
/// Reset line for the VPSS internal HLS IP block.
pub const RSTMASK_IP: u32 = 0x02;

/// Hold time after asserting a reset line, and start-up time after
/// releasing it.
pub const RESET_SETTLE_MS: u32 = 10;

// ---------------------------------------------------------------------------
// Instance counts
// ---------------------------------------------------------------------------

pub const UARTLITE_NUM_INSTANCES: u32 = 1;
pub const TPG_NUM_INSTANCES: u32 = 1;
pub const VTC_NUM_INSTANCES: u32 = 1;
#[cfg(feature = "hls-ip-reset")]
pub const GPIO_NUM_INSTANCES: u32 = 2;
#[cfg(not(feature = "hls-ip-reset"))]
pub const GPIO_NUM_INSTANCES: u32 = 1;

// ---------------------------------------------------------------------------
// Descriptor tables
// ---------------------------------------------------------------------------

pub static TPG_CONFIG_TABLE: [tpg::Config; 1] = [tpg::Config {
    device_id: TPG_0_DEVICE_ID,
    base_address: TPG_0_BASEADDR,
    max_cols: TPG_0_MAX_COLS,
    max_rows: TPG_0_MAX_ROWS,
}];

pub static VTC_CONFIG_TABLE: [vtc::Config; 1] = [vtc::Config {
    device_id: VTC_0_DEVICE_ID,
    base_address: VTC_0_BASEADDR,
}];

#[cfg(not(feature = "hls-ip-reset"))]
pub static GPIO_CONFIG_TABLE: [gpio::Config; 1] = [gpio::Config {
    device_id: VIDEO_LOCK_MONITOR_DEVICE_ID,
    base_address: VIDEO_LOCK_MONITOR_BASEADDR,
    interrupt_present: false,
    is_dual: false,
}];

#[cfg(feature = "hls-ip-reset")]
pub static GPIO_CONFIG_TABLE: [gpio::Config; 2] = [
    gpio::Config {
        device_id: VIDEO_LOCK_MONITOR_DEVICE_ID,
        base_address: VIDEO_LOCK_MONITOR_BASEADDR,
        interrupt_present: false,
        is_dual: false,
    },
    gpio::Config {
        device_id: HLS_IP_RESET_DEVICE_ID,
        base_address: HLS_IP_RESET_BASEADDR,
        interrupt_present: false,
        is_dual: false,
    },
];
