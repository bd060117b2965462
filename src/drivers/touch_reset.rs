//! GT911 touch controller reset with I²C address strap.
//!
//! The GT911 samples its INT line on the rising edge of RST to pick its
//! I²C address: INT high selects 0x5D, INT low selects 0x14.  This must
//! run before anything talks on the touch I²C bus, and before the INT pad
//! is reused (on the reference board it doubles as the converter clock).
//!
//! ```text
//!  INT ___/‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾ (released to input by caller)
//!  RST ‾‾‾‾‾‾‾‾\_________/‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾‾
//!         2ms     20ms        120ms
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::info;

/// Address latched when INT is held high through reset.
pub const GT911_ADDR_HIGH: u8 = 0x5D;

const INT_SETUP_MS: u32 = 2;
const RESET_LOW_MS: u32 = 20;
const BOOT_WAIT_MS: u32 = 120;

/// Reset the controller so it answers on [`GT911_ADDR_HIGH`].
///
/// On return RST is released and INT is still driven HIGH; the caller
/// must turn INT back into an input (or hand the pad to its next user).
pub fn reset_with_address_0x5d<INT, RST, D>(int: &mut INT, rst: &mut RST, delay: &mut D)
where
    INT: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    let _ = int.set_high();
    delay.delay_ms(INT_SETUP_MS);

    let _ = rst.set_low();
    delay.delay_ms(RESET_LOW_MS);
    let _ = rst.set_high();
    delay.delay_ms(BOOT_WAIT_MS);

    info!("touch: GT911 reset, address {:#04x}", GT911_ADDR_HIGH);
}
