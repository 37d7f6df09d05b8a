//! Bring-up configuration.
//!
//! Static hardware parameters live in [`crate::params`]; this module holds
//! the run-time choices: which video mode to raise, how many pixels the
//! datapath carries per clock, and what the TPG should draw.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::video::{ColorFormat, TpgPattern, VideoMode, VideoStream};

/// Pixels-per-clock values the VPSS datapath can be built with.
pub const SUPPORTED_PIXELS_PER_CLOCK: [u8; 4] = [1, 2, 4, 8];

/// TPG configuration record; written to the core by `Periph::config_tpg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TpgConfig {
    pub width: u16,
    pub height: u16,
    pub color_format: ColorFormat,
    pub pattern: TpgPattern,
    pub interlaced: bool,
}

impl Default for TpgConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            color_format: ColorFormat::Rgb,
            pattern: TpgPattern::ColorBars,
            interlaced: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BringupConfig {
    pub mode: VideoMode,
    pub pixels_per_clock: u8,
    pub color_format: ColorFormat,
    pub pattern: TpgPattern,
}

impl Default for BringupConfig {
    fn default() -> Self {
        Self {
            mode: VideoMode::FullHd1920x1080p60,
            pixels_per_clock: 2,
            color_format: ColorFormat::Rgb,
            pattern: TpgPattern::ColorBars,
        }
    }
}

impl BringupConfig {
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_PIXELS_PER_CLOCK.contains(&self.pixels_per_clock) {
            return Err(Error::InvalidArgument("pixels per clock must be 1, 2, 4 or 8"));
        }
        Ok(())
    }

    /// Stream the VTC should generate for this configuration.
    pub fn stream(&self) -> VideoStream {
        VideoStream::from_mode(self.mode, self.color_format)
    }

    /// TPG record matching the active area of the selected mode.
    pub fn tpg_config(&self) -> TpgConfig {
        let timing = self.mode.timing();
        TpgConfig {
            width: timing.h_active,
            height: timing.v_active,
            color_format: self.color_format,
            pattern: self.pattern,
            interlaced: false,
        }
    }
}
