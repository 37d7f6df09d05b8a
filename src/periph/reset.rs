//! HLS IP reset network.
//!
//! Reset lines are active low on a GPIO output channel: a cleared bit holds
//! the attached block in reset, a set bit lets it run. Every helper is a
//! read-modify-write so lines owned by other blocks keep their state, and
//! every helper is a no-op when the image carries no reset GPIO.

use crate::drivers::gpio::Gpio;
use crate::drivers::io::RegisterIo;
use crate::error::Result;

/// Raw state of the reset lines on `channel`; `1` = running, `0` = reset.
pub fn reset_state<Io: RegisterIo>(reset: &Gpio<Io>, channel: u32) -> Result<u32> {
    reset.discrete_read(channel)
}

/// Release the lines in `ip_block` from reset.
pub fn enable_block<Io: RegisterIo>(
    reset: Option<&Gpio<Io>>,
    channel: u32,
    ip_block: u32,
) -> Result<()> {
    if let Some(gpio) = reset {
        let val = reset_state(gpio, channel)? | ip_block;
        gpio.discrete_write(channel, val)?;
    }
    Ok(())
}

/// Hold the lines in `ip_block` in reset.
pub fn reset_block<Io: RegisterIo>(
    reset: Option<&Gpio<Io>>,
    channel: u32,
    ip_block: u32,
) -> Result<()> {
    if let Some(gpio) = reset {
        let val = reset_state(gpio, channel)? & !ip_block;
        gpio.discrete_write(channel, val)?;
    }
    Ok(())
}
