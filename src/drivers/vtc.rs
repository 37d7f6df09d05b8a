//! Video timing controller driver (generator side).
//!
//! The generator counts in "origin at start of active video" coordinates:
//! each line starts with the active region, followed by front porch, sync
//! and back porch. [`Vtc::set_generator_timing`] converts a [`Timing`]
//! record into those start positions and programs the generator block.
//! Detector registers are never touched.

use log::debug;

use crate::drivers::io::RegisterIo;
use crate::error::{Error, Result};
use crate::params;

// ── Register map ──────────────────────────────────────────────

pub const CTL_OFFSET: u32 = 0x000;
pub const ISR_OFFSET: u32 = 0x004;
pub const ERROR_OFFSET: u32 = 0x008;
pub const IER_OFFSET: u32 = 0x00C;
pub const VER_OFFSET: u32 = 0x010;

pub const GASIZE_OFFSET: u32 = 0x060;
pub const GSTAT_OFFSET: u32 = 0x064;
pub const GFENC_OFFSET: u32 = 0x068;
pub const GPOL_OFFSET: u32 = 0x06C;
pub const GHSIZE_OFFSET: u32 = 0x070;
pub const GVSIZE_OFFSET: u32 = 0x074;
pub const GHSYNC_OFFSET: u32 = 0x078;
pub const GVBHOFF_OFFSET: u32 = 0x07C;
pub const GVSYNC_OFFSET: u32 = 0x080;
pub const GVSHOFF_OFFSET: u32 = 0x084;
pub const GVBHOFF_F1_OFFSET: u32 = 0x088;
pub const GVSYNC_F1_OFFSET: u32 = 0x08C;
pub const GVSHOFF_F1_OFFSET: u32 = 0x090;
pub const GASIZE_F1_OFFSET: u32 = 0x094;

// ── CTL bits ──────────────────────────────────────────────────

pub const CTL_SW_MASK: u32 = 0x0000_0001;
pub const CTL_RU_MASK: u32 = 0x0000_0002;
pub const CTL_GE_MASK: u32 = 0x0000_0004;
pub const CTL_DE_MASK: u32 = 0x0000_0008;
pub const CTL_SRST_MASK: u32 = 0x4000_0000;
pub const CTL_RESET_MASK: u32 = 0x8000_0000;

/// Every source-select bit (including interlace) pointing at the generator
/// registers rather than the detector.
pub const CTL_ALL_SOURCES_GENERATOR: u32 = 0x07FF_FF00;

// ── GPOL bits ─────────────────────────────────────────────────

pub const POL_VBLANK_MASK: u32 = 0x01;
pub const POL_HBLANK_MASK: u32 = 0x02;
pub const POL_VSYNC_MASK: u32 = 0x04;
pub const POL_HSYNC_MASK: u32 = 0x08;
pub const POL_ACTIVE_VIDEO_MASK: u32 = 0x10;
pub const POL_ACTIVE_CHROMA_MASK: u32 = 0x20;
pub const POL_FIELD_ID_MASK: u32 = 0x40;

/// Field encoding: set for interlaced output.
pub const ENC_INTERLACED_MASK: u32 = 0x40;

/// Width of every generator counter.
pub const COUNT_MASK: u32 = 0x1FFF;
pub const COUNT_MAX: u16 = COUNT_MASK as u16;

/// Hardware descriptor exported by the FPGA image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub device_id: u16,
    pub base_address: u32,
}

pub fn lookup_config(device_id: u16) -> Option<&'static Config> {
    params::VTC_CONFIG_TABLE
        .iter()
        .find(|c| c.device_id == device_id)
}

/// Generator timing, in clock cycles horizontally and lines vertically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timing {
    pub h_active_video: u16,
    pub h_front_porch: u16,
    pub h_sync_width: u16,
    pub h_back_porch: u16,
    pub h_sync_polarity: bool,

    pub v_active_video: u16,
    pub v0_front_porch: u16,
    pub v0_sync_width: u16,
    pub v0_back_porch: u16,
    pub v1_front_porch: u16,
    pub v1_sync_width: u16,
    pub v1_back_porch: u16,
    pub v_sync_polarity: bool,

    pub interlaced: bool,
}

impl Timing {
    pub fn h_total(&self) -> u32 {
        u32::from(self.h_active_video)
            + u32::from(self.h_front_porch)
            + u32::from(self.h_sync_width)
            + u32::from(self.h_back_porch)
    }

    pub fn v0_total(&self) -> u32 {
        u32::from(self.v_active_video)
            + u32::from(self.v0_front_porch)
            + u32::from(self.v0_sync_width)
            + u32::from(self.v0_back_porch)
    }

    pub fn v1_total(&self) -> u32 {
        u32::from(self.v_active_video)
            + u32::from(self.v1_front_porch)
            + u32::from(self.v1_sync_width)
            + u32::from(self.v1_back_porch)
    }
}

/// Start positions derived from a [`Timing`], origin at active video.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signal {
    pub h_total: u32,
    pub h_front_porch_start: u32,
    pub h_sync_start: u32,
    pub h_back_porch_start: u32,

    pub v0_total: u32,
    pub v0_front_porch_start: u32,
    pub v0_sync_start: u32,
    pub v0_back_porch_start: u32,

    pub v1_total: u32,
    pub v1_front_porch_start: u32,
    pub v1_sync_start: u32,
    pub v1_back_porch_start: u32,
}

impl From<&Timing> for Signal {
    fn from(t: &Timing) -> Self {
        let h_active = u32::from(t.h_active_video);
        let v_active = u32::from(t.v_active_video);

        let h_sync_start = h_active + u32::from(t.h_front_porch);
        let v0_sync_start = v_active + u32::from(t.v0_front_porch);

        // Progressive output repeats field 0 for field 1.
        let (v1_sync_start, v1_back_porch_start, v1_total) = if t.interlaced {
            let start = v_active + u32::from(t.v1_front_porch);
            (start, start + u32::from(t.v1_sync_width), t.v1_total())
        } else {
            (
                v0_sync_start,
                v0_sync_start + u32::from(t.v0_sync_width),
                t.v0_total(),
            )
        };

        Self {
            h_total: t.h_total(),
            h_front_porch_start: h_active,
            h_sync_start,
            h_back_porch_start: h_sync_start + u32::from(t.h_sync_width),

            v0_total: t.v0_total(),
            v0_front_porch_start: v_active,
            v0_sync_start,
            v0_back_porch_start: v0_sync_start + u32::from(t.v0_sync_width),

            v1_total,
            v1_front_porch_start: v_active,
            v1_sync_start,
            v1_back_porch_start,
        }
    }
}

/// Output polarity of every generated signal; `true` is active high.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Polarity {
    pub active_chroma: bool,
    pub active_video: bool,
    pub field_id: bool,
    pub v_blank: bool,
    pub v_sync: bool,
    pub h_blank: bool,
    pub h_sync: bool,
}

impl Polarity {
    pub fn bits(&self) -> u32 {
        let mut bits = 0;
        for (on, mask) in [
            (self.v_blank, POL_VBLANK_MASK),
            (self.h_blank, POL_HBLANK_MASK),
            (self.v_sync, POL_VSYNC_MASK),
            (self.h_sync, POL_HSYNC_MASK),
            (self.active_video, POL_ACTIVE_VIDEO_MASK),
            (self.active_chroma, POL_ACTIVE_CHROMA_MASK),
            (self.field_id, POL_FIELD_ID_MASK),
        ] {
            if on {
                bits |= mask;
            }
        }
        bits
    }
}

fn pack(lo: u32, hi: u32) -> u32 {
    (lo & COUNT_MASK) | ((hi & COUNT_MASK) << 16)
}

pub struct Vtc<Io: RegisterIo> {
    io: Io,
    config: Config,
}

impl<Io: RegisterIo> Vtc<Io> {
    /// Bind a driver instance to `config`, using `base_address` for
    /// register access.
    pub fn cfg_initialize(io: Io, config: &Config, base_address: u32) -> Result<Self> {
        if base_address == 0 {
            return Err(Error::InitFailed("VTC"));
        }
        debug!("VTC: bound device {} at {:#010x}", config.device_id, base_address);
        Ok(Self {
            io,
            config: Config {
                base_address,
                ..*config
            },
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn read_reg(&self, offset: u32) -> u32 {
        self.io.read32(self.config.base_address + offset)
    }

    pub fn write_reg(&self, offset: u32, value: u32) {
        self.io.write32(self.config.base_address + offset, value);
    }

    fn modify_ctl(&self, set: u32, clear: u32) {
        let ctl = self.read_reg(CTL_OFFSET);
        self.write_reg(CTL_OFFSET, (ctl & !clear) | set);
    }

    /// Hard reset of the core; the bit self-clears in hardware.
    pub fn reset(&self) {
        self.write_reg(CTL_OFFSET, CTL_RESET_MASK);
    }

    pub fn enable(&self) {
        self.modify_ctl(CTL_SW_MASK, 0);
    }

    pub fn disable(&self) {
        self.modify_ctl(0, CTL_SW_MASK);
    }

    pub fn enable_generator(&self) {
        self.modify_ctl(CTL_GE_MASK, 0);
    }

    pub fn disable_generator(&self) {
        self.modify_ctl(0, CTL_GE_MASK);
    }

    /// Let the core latch newly written generator registers.
    pub fn reg_update_enable(&self) {
        self.modify_ctl(CTL_RU_MASK, 0);
    }

    /// Overwrite CTL with a raw source-select word.
    pub fn write_source_select(&self, raw: u32) {
        self.write_reg(CTL_OFFSET, raw);
    }

    pub fn version(&self) -> u32 {
        self.read_reg(VER_OFFSET)
    }

    pub fn set_generator_timing(&self, timing: &Timing) {
        let s = Signal::from(timing);

        self.write_reg(
            GASIZE_OFFSET,
            pack(s.h_front_porch_start, s.v0_front_porch_start),
        );
        self.write_reg(
            GASIZE_F1_OFFSET,
            pack(s.h_front_porch_start, s.v1_front_porch_start),
        );
        self.write_reg(GHSIZE_OFFSET, s.h_total & COUNT_MASK);
        self.write_reg(GVSIZE_OFFSET, pack(s.v0_total, s.v1_total));
        self.write_reg(GHSYNC_OFFSET, pack(s.h_sync_start, s.h_back_porch_start));

        // Vertical blank and sync change state at the horizontal positions
        // where active video and horizontal sync begin respectively.
        self.write_reg(
            GVBHOFF_OFFSET,
            pack(s.h_front_porch_start, s.h_front_porch_start),
        );
        self.write_reg(GVSYNC_OFFSET, pack(s.v0_sync_start, s.v0_back_porch_start));
        self.write_reg(GVSHOFF_OFFSET, pack(s.h_sync_start, s.h_sync_start));

        self.write_reg(
            GVBHOFF_F1_OFFSET,
            pack(s.h_front_porch_start, s.h_front_porch_start),
        );
        self.write_reg(GVSYNC_F1_OFFSET, pack(s.v1_sync_start, s.v1_back_porch_start));
        self.write_reg(GVSHOFF_F1_OFFSET, pack(s.h_sync_start, s.h_sync_start));

        let enc = if timing.interlaced { ENC_INTERLACED_MASK } else { 0 };
        self.write_reg(GFENC_OFFSET, enc);

        debug!(
            "VTC: generator {}x{} total {}x{}",
            s.h_front_porch_start, s.v0_front_porch_start, s.h_total, s.v0_total
        );
    }

    pub fn set_polarity(&self, polarity: &Polarity) {
        self.write_reg(GPOL_OFFSET, polarity.bits());
    }

    pub fn polarity_bits(&self) -> u32 {
        self.read_reg(GPOL_OFFSET)
    }
}
