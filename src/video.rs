//! Video stream description shared by the TPG and VTC configuration paths.
//!
//! Modes come from a fixed table of standard timings; nothing here derives
//! timing from a resolution.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Pixel color format, encoded as the TPG `colorFormat` register expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum ColorFormat {
    #[default]
    Rgb = 0,
    YCrCb444 = 1,
    YCrCb422 = 2,
    YCrCb420 = 3,
}

impl ColorFormat {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for ColorFormat {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::Rgb),
            1 => Ok(Self::YCrCb444),
            2 => Ok(Self::YCrCb422),
            3 => Ok(Self::YCrCb420),
            _ => Err(Error::InvalidArgument("unknown color format")),
        }
    }
}

/// Background pattern ids understood by the TPG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TpgPattern {
    PassThrough = 0,
    HorizontalRamp = 1,
    VerticalRamp = 2,
    TemporalRamp = 3,
    SolidRed = 4,
    SolidGreen = 5,
    SolidBlue = 6,
    SolidBlack = 7,
    SolidWhite = 8,
    #[default]
    ColorBars = 9,
    ZonePlate = 10,
    TartanColorBars = 11,
    CrossHatch = 12,
    RainbowColor = 13,
    HvRamp = 14,
    CheckerBoard = 15,
    Prbs = 16,
    DpColorRamp = 17,
    DpBwVerticalLine = 18,
    DpColorSquare = 19,
}

impl TpgPattern {
    pub const fn id(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for TpgPattern {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self> {
        const ALL: [TpgPattern; 20] = [
            TpgPattern::PassThrough,
            TpgPattern::HorizontalRamp,
            TpgPattern::VerticalRamp,
            TpgPattern::TemporalRamp,
            TpgPattern::SolidRed,
            TpgPattern::SolidGreen,
            TpgPattern::SolidBlue,
            TpgPattern::SolidBlack,
            TpgPattern::SolidWhite,
            TpgPattern::ColorBars,
            TpgPattern::ZonePlate,
            TpgPattern::TartanColorBars,
            TpgPattern::CrossHatch,
            TpgPattern::RainbowColor,
            TpgPattern::HvRamp,
            TpgPattern::CheckerBoard,
            TpgPattern::Prbs,
            TpgPattern::DpColorRamp,
            TpgPattern::DpBwVerticalLine,
            TpgPattern::DpColorSquare,
        ];
        ALL.get(usize::from(id))
            .copied()
            .ok_or(Error::InvalidArgument("unknown TPG pattern"))
    }
}

/// Full raster timing, in pixels horizontally and lines vertically.
///
/// Field 1 counts only matter for interlaced streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VideoTiming {
    pub h_active: u16,
    pub h_front_porch: u16,
    pub h_sync_width: u16,
    pub h_back_porch: u16,
    pub h_total: u16,
    pub h_sync_polarity: bool,

    pub v_active: u16,
    pub f0_pv_front_porch: u16,
    pub f0_pv_sync_width: u16,
    pub f0_pv_back_porch: u16,
    pub f0_pv_total: u16,

    pub f1_v_front_porch: u16,
    pub f1_v_sync_width: u16,
    pub f1_v_back_porch: u16,
    pub f1_v_total: u16,

    pub v_sync_polarity: bool,
}

impl VideoTiming {
    /// Progressive timing with totals filled in from the blanking counts.
    /// Totals saturate at `u16::MAX`.
    pub const fn progressive(
        h: (u16, u16, u16, u16),
        h_sync_polarity: bool,
        v: (u16, u16, u16, u16),
        v_sync_polarity: bool,
    ) -> Self {
        Self {
            h_active: h.0,
            h_front_porch: h.1,
            h_sync_width: h.2,
            h_back_porch: h.3,
            h_total: h.0.saturating_add(h.1).saturating_add(h.2).saturating_add(h.3),
            h_sync_polarity,
            v_active: v.0,
            f0_pv_front_porch: v.1,
            f0_pv_sync_width: v.2,
            f0_pv_back_porch: v.3,
            f0_pv_total: v.0.saturating_add(v.1).saturating_add(v.2).saturating_add(v.3),
            f1_v_front_porch: 0,
            f1_v_sync_width: 0,
            f1_v_back_porch: 0,
            f1_v_total: 0,
            v_sync_polarity,
        }
    }
}

/// A stream as seen on the video bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoStream {
    pub timing: VideoTiming,
    pub color_format: ColorFormat,
    pub frame_rate: u16,
    pub interlaced: bool,
}

impl VideoStream {
    pub fn from_mode(mode: VideoMode, color_format: ColorFormat) -> Self {
        Self {
            timing: mode.timing(),
            color_format,
            frame_rate: mode.frame_rate(),
            interlaced: false,
        }
    }
}

/// Standard modes the example design supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VideoMode {
    #[serde(rename = "640x480@60")]
    Vga640x480p60,
    #[serde(rename = "1280x720@60")]
    Hd1280x720p60,
    #[default]
    #[serde(rename = "1920x1080@60")]
    FullHd1920x1080p60,
    #[serde(rename = "3840x2160@30")]
    Uhd3840x2160p30,
}

impl VideoMode {
    pub const ALL: [VideoMode; 4] = [
        Self::Vga640x480p60,
        Self::Hd1280x720p60,
        Self::FullHd1920x1080p60,
        Self::Uhd3840x2160p30,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Vga640x480p60 => "640x480@60",
            Self::Hd1280x720p60 => "1280x720@60",
            Self::FullHd1920x1080p60 => "1920x1080@60",
            Self::Uhd3840x2160p30 => "3840x2160@30",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    pub const fn frame_rate(self) -> u16 {
        match self {
            Self::Uhd3840x2160p30 => 30,
            _ => 60,
        }
    }

    pub const fn timing(self) -> VideoTiming {
        match self {
            Self::Vga640x480p60 => {
                VideoTiming::progressive((640, 16, 96, 48), false, (480, 10, 2, 33), false)
            }
            Self::Hd1280x720p60 => {
                VideoTiming::progressive((1280, 110, 40, 220), true, (720, 5, 5, 20), true)
            }
            Self::FullHd1920x1080p60 => {
                VideoTiming::progressive((1920, 88, 44, 148), true, (1080, 4, 5, 36), true)
            }
            Self::Uhd3840x2160p30 => {
                VideoTiming::progressive((3840, 176, 88, 296), true, (2160, 8, 10, 72), true)
            }
        }
    }
}
