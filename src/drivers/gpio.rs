//! AXI GPIO driver (discrete I/O, one or two channels).

use log::debug;

use crate::drivers::io::RegisterIo;
use crate::error::{Error, Result};
use crate::params;

pub const DATA_OFFSET: u32 = 0x0;
pub const TRI_OFFSET: u32 = 0x4;
/// Channel 2 registers sit one register pair above channel 1.
pub const CHAN_OFFSET: u32 = 0x8;

/// Hardware descriptor exported by the FPGA image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub device_id: u16,
    pub base_address: u32,
    pub interrupt_present: bool,
    pub is_dual: bool,
}

pub fn lookup_config(device_id: u16) -> Option<&'static Config> {
    params::GPIO_CONFIG_TABLE
        .iter()
        .find(|c| c.device_id == device_id)
}

pub struct Gpio<Io: RegisterIo> {
    io: Io,
    config: Config,
}

impl<Io: RegisterIo> Gpio<Io> {
    pub fn cfg_initialize(io: Io, config: &Config, base_address: u32) -> Result<Self> {
        if base_address == 0 {
            return Err(Error::InitFailed("GPIO"));
        }
        debug!("GPIO: bound device {} at {:#010x}", config.device_id, base_address);
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

    /// Byte offset of `reg` for `channel` (1 or 2).
    fn channel_reg(&self, channel: u32, reg: u32) -> Result<u32> {
        match channel {
            1 => Ok(self.config.base_address + reg),
            2 if self.config.is_dual => Ok(self.config.base_address + CHAN_OFFSET + reg),
            _ => Err(Error::InvalidArgument("GPIO channel not present")),
        }
    }

    pub fn discrete_read(&self, channel: u32) -> Result<u32> {
        Ok(self.io.read32(self.channel_reg(channel, DATA_OFFSET)?))
    }

    pub fn discrete_write(&self, channel: u32, value: u32) -> Result<()> {
        self.io.write32(self.channel_reg(channel, DATA_OFFSET)?, value);
        Ok(())
    }

    /// Set the tri-state mask; a `1` bit makes the line an input.
    pub fn set_data_direction(&self, channel: u32, input_mask: u32) -> Result<()> {
        self.io
            .write32(self.channel_reg(channel, TRI_OFFSET)?, input_mask);
        Ok(())
    }

    pub fn data_direction(&self, channel: u32) -> Result<u32> {
        Ok(self.io.read32(self.channel_reg(channel, TRI_OFFSET)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sim_bus::SimBus;

    fn gpio(is_dual: bool) -> (SimBus, Gpio<SimBus>) {
        let bus = SimBus::new();
        let cfg = Config {
            device_id: 9,
            base_address: 0x4002_0000,
            interrupt_present: false,
            is_dual,
        };
        let gpio = Gpio::cfg_initialize(bus.clone(), &cfg, cfg.base_address).unwrap();
        (bus, gpio)
    }

    #[test]
    fn lock_monitor_is_in_the_table() {
        let cfg = lookup_config(params::VIDEO_LOCK_MONITOR_DEVICE_ID).unwrap();
        assert_eq!(cfg.base_address, params::VIDEO_LOCK_MONITOR_BASEADDR);
        assert!(lookup_config(0xFF).is_none());
    }

    #[test]
    fn zero_base_address_fails_to_bind() {
        let cfg = lookup_config(params::VIDEO_LOCK_MONITOR_DEVICE_ID).unwrap();
        let err = Gpio::cfg_initialize(SimBus::new(), cfg, 0).err();
        assert_eq!(err, Some(Error::InitFailed("GPIO")));
    }

    #[test]
    fn second_channel_requires_dual_core() {
        let (_, single) = gpio(false);
        assert!(single.discrete_write(2, 1).is_err());
        assert!(single.discrete_read(3).is_err());

        let (bus, dual) = gpio(true);
        dual.discrete_write(2, 0xA5).unwrap();
        assert_eq!(bus.peek(0x4002_0000 + CHAN_OFFSET + DATA_OFFSET), 0xA5);
    }

    #[test]
    fn direction_goes_to_tri_register() {
        let (bus, gpio) = gpio(false);
        gpio.set_data_direction(1, 0xF0).unwrap();
        assert_eq!(bus.peek(0x4002_0000 + TRI_OFFSET), 0xF0);
        assert_eq!(gpio.data_direction(1).unwrap(), 0xF0);
    }
}
