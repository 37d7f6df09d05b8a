//! Peripheral subsystem of the VPSS example design.
//!
//! [`Periph`] owns one driver instance per peripheral (test pattern
//! generator, video timing controller, video lock monitor GPIO, and, in
//! images built with the HLS IP reset network, the reset GPIO). It is
//! created once by [`Periph::power_on_init`] and lives for the rest of the
//! program.
//!
//! ```text
//!   params tables ──lookup──▶ driver Config ──bind──▶ Periph
//!                                                     │
//!        set_tpg_* ──▶ TpgConfig ──config_tpg──▶ TPG registers
//!        VideoStream ──────────────config_vtc──▶ VTC generator
//!        enable/disable_vid_in, reset_hls_ip ──▶ reset GPIO
//! ```

pub mod reset;

use embedded_hal::delay::DelayNs;
use log::{error, info};

use crate::config::{SUPPORTED_PIXELS_PER_CLOCK, TpgConfig};
use crate::drivers::gpio::{self, Gpio};
use crate::drivers::io::RegisterIo;
use crate::drivers::tpg::Tpg;
use crate::drivers::vtc::{self, Polarity, Timing, Vtc};
use crate::error::{Error, Result};
use crate::params;
use crate::video::{ColorFormat, TpgPattern, VideoStream};

/// Number of instances of each core included in the design.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInventory {
    pub uartlite: u32,
    pub tpg: u32,
    pub vtc: u32,
    pub gpio: u32,
}

impl DeviceInventory {
    /// Cores present in the design, with their instance counts.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, u32)> {
        [
            ("UART-Lite core", self.uartlite),
            ("TPG", self.tpg),
            ("VTC", self.vtc),
            ("GPIO", self.gpio),
        ]
        .into_iter()
        .filter(|&(_, n)| n > 0)
    }
}

/// Snapshot of the TPG handshake and frame registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TpgStatus {
    pub done: bool,
    pub idle: bool,
    pub ready: bool,
    pub ctrl: u32,
    pub width: u16,
    pub height: u16,
    pub bckgnd_id: u8,
    pub color_format: u8,
}

pub struct Periph<Io: RegisterIo, D: DelayNs> {
    tpg: Tpg<Io>,
    vtc: Vtc<Io>,
    vid_lock_monitor: Gpio<Io>,
    hls_ip_reset: Option<Gpio<Io>>,
    tpg_config: TpgConfig,
    delay: D,
}

/// Log and return the cores included in the design.
pub fn report_device_info() -> DeviceInventory {
    let inventory = DeviceInventory {
        uartlite: params::UARTLITE_NUM_INSTANCES,
        tpg: params::TPG_NUM_INSTANCES,
        vtc: params::VTC_NUM_INSTANCES,
        gpio: params::GPIO_NUM_INSTANCES,
    };
    info!("periph: system peripherals included");
    for (name, count) in inventory.entries() {
        info!("periph:   {} {}", count, name);
    }
    inventory
}

fn init_gpio<Io: RegisterIo>(io: Io, device_id: u16, name: &'static str) -> Result<Gpio<Io>> {
    let Some(cfg) = gpio::lookup_config(device_id) else {
        error!("periph: {} device not found", name);
        return Err(Error::DeviceNotFound(name));
    };
    Gpio::cfg_initialize(io, cfg, cfg.base_address).map_err(|e| {
        error!("periph: {} initialization failed: {}", name, e);
        Error::InitFailed(name)
    })
}

impl<Io: RegisterIo, D: DelayNs> Periph<Io, D> {
    /// Bind every peripheral to its driver and bring the reset network up.
    ///
    /// With a reset GPIO present, the video input is pulsed through reset
    /// and left running.
    pub fn power_on_init(io: Io, delay: D) -> Result<Self> {
        let tpg = Tpg::initialize(io.clone(), params::TPG_0_DEVICE_ID).inspect_err(|_| {
            error!("periph: TPG device not found");
        })?;

        let Some(vtc_cfg) = vtc::lookup_config(params::VTC_0_DEVICE_ID) else {
            error!("periph: VTC device not found");
            return Err(Error::DeviceNotFound("VTC"));
        };
        let vtc = Vtc::cfg_initialize(io.clone(), vtc_cfg, vtc_cfg.base_address).map_err(|e| {
            error!("periph: VTC initialization failed: {}", e);
            Error::InitFailed("VTC")
        })?;

        let vid_lock_monitor = init_gpio(
            io.clone(),
            params::VIDEO_LOCK_MONITOR_DEVICE_ID,
            "Video Lock Monitor GPIO",
        )?;

        #[cfg(feature = "hls-ip-reset")]
        let hls_ip_reset = Some(init_gpio(
            io,
            params::HLS_IP_RESET_DEVICE_ID,
            "HLS IP Reset GPIO",
        )?);
        #[cfg(not(feature = "hls-ip-reset"))]
        let hls_ip_reset = {
            drop(io);
            None
        };

        let mut periph = Self {
            tpg,
            vtc,
            vid_lock_monitor,
            hls_ip_reset,
            tpg_config: TpgConfig::default(),
            delay,
        };

        if periph.hls_ip_reset.is_some() {
            periph.disable_vid_in()?;
            periph.enable_vid_in()?;
        }

        info!("periph: power-on init complete");
        Ok(periph)
    }

    // ── Reset network ─────────────────────────────────────────

    /// Hold the video source feeding the VPSS in reset.
    pub fn disable_vid_in(&mut self) -> Result<()> {
        self.pulse_edge(params::RSTMASK_VIDEO_IN, false)
    }

    /// Release the video source feeding the VPSS from reset.
    pub fn enable_vid_in(&mut self) -> Result<()> {
        self.pulse_edge(params::RSTMASK_VIDEO_IN, true)
    }

    /// Pulse the VPSS internal HLS IP through reset.
    pub fn reset_hls_ip(&mut self) -> Result<()> {
        self.pulse_edge(params::RSTMASK_IP, false)?;
        self.pulse_edge(params::RSTMASK_IP, true)
    }

    fn pulse_edge(&mut self, mask: u32, run: bool) -> Result<()> {
        let Some(gpio) = self.hls_ip_reset.as_ref() else {
            return Ok(());
        };
        if run {
            reset::enable_block(Some(gpio), params::GPIO_CHANNEL_1, mask)?;
        } else {
            reset::reset_block(Some(gpio), params::GPIO_CHANNEL_1, mask)?;
        }
        self.delay.delay_ms(params::RESET_SETTLE_MS);
        Ok(())
    }

    /// Raw reset network state, `None` without a reset GPIO.
    pub fn reset_state(&self) -> Option<u32> {
        self.hls_ip_reset
            .as_ref()
            .and_then(|g| reset::reset_state(g, params::GPIO_CHANNEL_1).ok())
    }

    pub fn is_video_locked(&self) -> bool {
        matches!(
            self.vid_lock_monitor.discrete_read(params::GPIO_CHANNEL_1),
            Ok(v) if v & 0x1 != 0
        )
    }

    // ── Test pattern generator ────────────────────────────────

    pub fn tpg_config(&self) -> &TpgConfig {
        &self.tpg_config
    }

    pub fn set_tpg_width(&mut self, width: u16) {
        self.tpg_config.width = width;
    }

    pub fn set_tpg_height(&mut self, height: u16) {
        self.tpg_config.height = height;
    }

    pub fn set_tpg_color_format(&mut self, format: ColorFormat) {
        self.tpg_config.color_format = format;
    }

    pub fn set_tpg_pattern(&mut self, pattern: TpgPattern) {
        self.tpg_config.pattern = pattern;
    }

    pub fn set_tpg_interlaced_mode(&mut self, interlaced: bool) {
        self.tpg_config.interlaced = interlaced;
    }

    /// Update the TPG record; hardware is written by [`Self::config_tpg`].
    pub fn set_tpg_params(
        &mut self,
        width: u16,
        height: u16,
        format: ColorFormat,
        pattern: TpgPattern,
        interlaced: bool,
    ) {
        self.set_tpg_width(width);
        self.set_tpg_height(height);
        self.set_tpg_color_format(format);
        self.set_tpg_pattern(pattern);
        self.set_tpg_interlaced_mode(interlaced);
    }

    /// Stop the TPG, program the current record, and restart it free-running.
    pub fn config_tpg(&self) -> Result<()> {
        let c = self.tpg_config;
        let limits = self.tpg.config();
        if c.width == 0 || c.height == 0 {
            return Err(Error::InvalidArgument("TPG frame size must be non-zero"));
        }
        if c.width > limits.max_cols || c.height > limits.max_rows {
            return Err(Error::InvalidArgument("TPG frame exceeds synthesised maximum"));
        }

        self.tpg.disable_auto_restart();

        self.tpg.set_height(c.height);
        self.tpg.set_width(c.width);
        self.tpg.set_color_format(c.color_format.code());
        self.tpg.set_bckgnd_id(c.pattern.id());
        self.tpg.set_ovrlay_id(0);

        self.tpg.enable_auto_restart();
        self.tpg.start();

        info!(
            "periph: TPG {}x{} {:?} pattern {:?}",
            c.width, c.height, c.color_format, c.pattern
        );
        Ok(())
    }

    /// Stop the TPG after the frame in flight.
    pub fn disable_tpg(&self) {
        self.tpg.disable_auto_restart();
    }

    pub fn tpg_dbg_report_status(&self) -> TpgStatus {
        let status = TpgStatus {
            done: self.tpg.is_done(),
            idle: self.tpg.is_idle(),
            ready: self.tpg.is_ready(),
            ctrl: self.tpg.ctrl(),
            width: self.tpg.width(),
            height: self.tpg.height(),
            bckgnd_id: self.tpg.bckgnd_id(),
            color_format: self.tpg.color_format(),
        };

        info!("----->TPG STATUS<----");
        info!("IsDone:  {}", u8::from(status.done));
        info!("IsIdle:  {}", u8::from(status.idle));
        info!("IsReady: {}", u8::from(status.ready));
        info!("Ctrl:    {:#x}", status.ctrl);
        info!("Width:        {}", status.width);
        info!("Height:       {}", status.height);
        info!("Backgnd Id:   {}", status.bckgnd_id);
        info!("Color Format: {}", status.color_format);

        status
    }

    // ── Video timing controller ───────────────────────────────

    /// Program the VTC generator to emit `stream` on a datapath carrying
    /// `pixels_per_clock` pixels per clock.
    pub fn config_vtc(&self, stream: &VideoStream, pixels_per_clock: u8) -> Result<()> {
        let timing = generator_timing(stream, pixels_per_clock)?;

        self.vtc.reset();
        self.vtc.disable_generator();
        self.vtc.disable();

        // Raw write: the source-select record has no interlace field.
        self.vtc.write_source_select(vtc::CTL_ALL_SOURCES_GENERATOR);

        self.vtc.set_generator_timing(&timing);

        let polarity = Polarity {
            active_chroma: true,
            active_video: true,
            field_id: false,
            v_blank: timing.v_sync_polarity,
            v_sync: timing.v_sync_polarity,
            h_blank: timing.h_sync_polarity,
            h_sync: timing.h_sync_polarity,
        };
        self.vtc.set_polarity(&polarity);

        self.vtc.enable();
        self.vtc.enable_generator();
        self.vtc.reg_update_enable();

        info!(
            "periph: VTC {}x{}@{} ({} ppc)",
            stream.timing.h_active, stream.timing.v_active, stream.frame_rate, pixels_per_clock
        );
        Ok(())
    }

    // ── Driver access ─────────────────────────────────────────

    pub fn tpg(&self) -> &Tpg<Io> {
        &self.tpg
    }

    pub fn vtc(&self) -> &Vtc<Io> {
        &self.vtc
    }

    pub fn vid_lock_monitor(&self) -> &Gpio<Io> {
        &self.vid_lock_monitor
    }

    pub fn hls_ip_reset(&self) -> Option<&Gpio<Io>> {
        self.hls_ip_reset.as_ref()
    }
}

/// Generator timing for `stream`: horizontal counts scaled to clock cycles,
/// vertical counts in lines, always progressive.
pub fn generator_timing(stream: &VideoStream, pixels_per_clock: u8) -> Result<Timing> {
    if !SUPPORTED_PIXELS_PER_CLOCK.contains(&pixels_per_clock) {
        return Err(Error::InvalidArgument("pixels per clock must be 1, 2, 4 or 8"));
    }
    let ppc = u16::from(pixels_per_clock);
    let t = &stream.timing;

    let timing = Timing {
        h_active_video: t.h_active / ppc,
        h_front_porch: t.h_front_porch / ppc,
        h_sync_width: t.h_sync_width / ppc,
        h_back_porch: t.h_back_porch / ppc,
        h_sync_polarity: t.h_sync_polarity,

        v_active_video: t.v_active,
        v0_front_porch: t.f0_pv_front_porch,
        v0_sync_width: t.f0_pv_sync_width,
        v0_back_porch: t.f0_pv_back_porch,
        v1_front_porch: t.f1_v_front_porch,
        v1_sync_width: t.f1_v_sync_width,
        v1_back_porch: t.f1_v_back_porch,
        v_sync_polarity: t.v_sync_polarity,

        interlaced: false,
    };

    // Field-1 counts are carried but unused while progressive.
    let max = u32::from(vtc::COUNT_MAX);
    if timing.h_total() > max || timing.v0_total() > max {
        return Err(Error::InvalidArgument("timing exceeds VTC counter width"));
    }
    Ok(timing)
}
