//! Test pattern generator (HLS core) driver.
//!
//! The core is an HLS block with the usual `ap_ctrl` handshake. With
//! auto-restart set it free-runs, producing one frame after another; clearing
//! auto-restart stops it at the end of the current frame.

use log::debug;

use crate::drivers::io::RegisterIo;
use crate::error::{Error, Result};
use crate::params;

// ── Register map ──────────────────────────────────────────────

pub const CTRL_ADDR_AP_CTRL: u32 = 0x00;
pub const CTRL_ADDR_GIE: u32 = 0x04;
pub const CTRL_ADDR_IER: u32 = 0x08;
pub const CTRL_ADDR_ISR: u32 = 0x0C;
pub const CTRL_ADDR_HEIGHT_DATA: u32 = 0x10;
pub const CTRL_ADDR_WIDTH_DATA: u32 = 0x18;
pub const CTRL_ADDR_BCKGNDID_DATA: u32 = 0x20;
pub const CTRL_ADDR_OVRLAYID_DATA: u32 = 0x28;
pub const CTRL_ADDR_MASKID_DATA: u32 = 0x30;
pub const CTRL_ADDR_MOTIONSPEED_DATA: u32 = 0x38;
pub const CTRL_ADDR_COLORFORMAT_DATA: u32 = 0x40;

pub const AP_START: u32 = 0x01;
pub const AP_DONE: u32 = 0x02;
pub const AP_IDLE: u32 = 0x04;
pub const AP_READY: u32 = 0x08;
pub const AP_AUTO_RESTART: u32 = 0x80;

const HEIGHT_MASK: u32 = 0xFFFF;
const WIDTH_MASK: u32 = 0xFFFF;
const ID_MASK: u32 = 0xFF;

/// Hardware descriptor exported by the FPGA image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub device_id: u16,
    pub base_address: u32,
    pub max_cols: u16,
    pub max_rows: u16,
}

/// Find the descriptor for `device_id` in the static peripheral table.
pub fn lookup_config(device_id: u16) -> Option<&'static Config> {
    params::TPG_CONFIG_TABLE
        .iter()
        .find(|c| c.device_id == device_id)
}

pub struct Tpg<Io: RegisterIo> {
    io: Io,
    config: Config,
}

impl<Io: RegisterIo> Tpg<Io> {
    /// Look up `device_id` and bind a driver instance to it.
    pub fn initialize(io: Io, device_id: u16) -> Result<Self> {
        let config = lookup_config(device_id).ok_or(Error::DeviceNotFound("TPG"))?;
        Ok(Self::cfg_initialize(io, config))
    }

    pub fn cfg_initialize(io: Io, config: &Config) -> Self {
        debug!(
            "TPG: bound device {} at {:#010x}",
            config.device_id, config.base_address
        );
        Self {
            io,
            config: *config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn read(&self, offset: u32) -> u32 {
        self.io.read32(self.config.base_address + offset)
    }

    fn write(&self, offset: u32, value: u32) {
        self.io.write32(self.config.base_address + offset, value);
    }

    // ── ap_ctrl handshake ─────────────────────────────────────

    /// Raw `ap_ctrl` register.
    pub fn ctrl(&self) -> u32 {
        self.read(CTRL_ADDR_AP_CTRL)
    }

    pub fn start(&self) {
        let data = self.ctrl() & AP_AUTO_RESTART;
        self.write(CTRL_ADDR_AP_CTRL, data | AP_START);
    }

    pub fn is_done(&self) -> bool {
        self.ctrl() & AP_DONE != 0
    }

    pub fn is_idle(&self) -> bool {
        self.ctrl() & AP_IDLE != 0
    }

    /// Ready for the next input once `ap_start` has been consumed.
    pub fn is_ready(&self) -> bool {
        self.ctrl() & AP_START == 0
    }

    pub fn enable_auto_restart(&self) {
        self.write(CTRL_ADDR_AP_CTRL, AP_AUTO_RESTART);
    }

    pub fn disable_auto_restart(&self) {
        self.write(CTRL_ADDR_AP_CTRL, 0);
    }

    // ── Frame parameters ──────────────────────────────────────

    pub fn set_height(&self, height: u16) {
        self.write(CTRL_ADDR_HEIGHT_DATA, u32::from(height));
    }

    pub fn height(&self) -> u16 {
        (self.read(CTRL_ADDR_HEIGHT_DATA) & HEIGHT_MASK) as u16
    }

    pub fn set_width(&self, width: u16) {
        self.write(CTRL_ADDR_WIDTH_DATA, u32::from(width));
    }

    pub fn width(&self) -> u16 {
        (self.read(CTRL_ADDR_WIDTH_DATA) & WIDTH_MASK) as u16
    }

    pub fn set_bckgnd_id(&self, id: u8) {
        self.write(CTRL_ADDR_BCKGNDID_DATA, u32::from(id));
    }

    pub fn bckgnd_id(&self) -> u8 {
        (self.read(CTRL_ADDR_BCKGNDID_DATA) & ID_MASK) as u8
    }

    pub fn set_ovrlay_id(&self, id: u8) {
        self.write(CTRL_ADDR_OVRLAYID_DATA, u32::from(id));
    }

    pub fn ovrlay_id(&self) -> u8 {
        (self.read(CTRL_ADDR_OVRLAYID_DATA) & ID_MASK) as u8
    }

    pub fn set_mask_id(&self, id: u8) {
        self.write(CTRL_ADDR_MASKID_DATA, u32::from(id));
    }

    pub fn mask_id(&self) -> u8 {
        (self.read(CTRL_ADDR_MASKID_DATA) & ID_MASK) as u8
    }

    pub fn set_motion_speed(&self, speed: u8) {
        self.write(CTRL_ADDR_MOTIONSPEED_DATA, u32::from(speed));
    }

    pub fn motion_speed(&self) -> u8 {
        (self.read(CTRL_ADDR_MOTIONSPEED_DATA) & ID_MASK) as u8
    }

    pub fn set_color_format(&self, format: u8) {
        self.write(CTRL_ADDR_COLORFORMAT_DATA, u32::from(format));
    }

    pub fn color_format(&self) -> u8 {
        (self.read(CTRL_ADDR_COLORFORMAT_DATA) & ID_MASK) as u8
    }
}
