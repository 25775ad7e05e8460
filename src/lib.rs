//! This Rust `embedded-hal-async`-based library drives a [HD44780](https://en.wikipedia.org/wiki/Hitachi_HD44780_LCD_controller)
//! compatible character display over its parallel bus in an embedded, `no_std` environment. The display can be wired through any
//! transport that implements the [`BusAdapter`] trait. Two adapters are included:
//!
//! - **PCF8574-based I2C adapter** - The ubiquitous "I2C backpack". The display 4-bit data pins are connected to P4-P7 of the
//!   PCF8574 and RS, RW, E and the backlight transistor to P0-P3.
//! - **Direct GPIO wiring** - RS, RW, E, an optional backlight pin and either 4 or 8 bidirectional data pins.
//!
//! Key features include:
//! - Every bus transaction and delay is an `.await` point, so the driver cooperates with other tasks on an async executor
//! - Busy flag polling with a bounded wait, instead of fixed worst-case delays
//! - Tracking of the controller's address counter, enabling `\n`, `\r` and backspace handling in text output
//! - Support for custom characters, in both the 5x8 and 5x10 fonts
//! - Formatted output with `write!` or with the built-in printf-style [`format`] module
//! - Optional support for the `defmt` and `ufmt` logging frameworks
//!
//! ## Usage
//! Add this to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! parallel-character-display = { version = "0.1", features = ["defmt"] }
//! ```
//! The `features = ["defmt"]` line is optional and enables the `defmt` feature, which allows the library's errors to be used with the `defmt` logging
//! framework and emits trace level logging of the instructions sent. Another optional feature is `features = ["ufmt"]`, which implements
//! `ufmt::uDisplay` for the error types.
//!
//! The busy-flag wait is bounded with `embassy-time`, so the application must provide an
//! `embassy-time` driver, as embassy HALs do. Then create the display object with a bus adapter and
//! an async delay:
//! ```rust,ignore
//! use parallel_character_display::{CharacterDisplayPCF8574T, DisplayGeometry};
//!
//! // board setup
//! let i2c = ...; // embedded_hal_async::i2c::I2c implementation
//! let delay = embassy_time::Delay; // or any embedded_hal_async::delay::DelayNs implementation
//!
//! let mut lcd = CharacterDisplayPCF8574T::new_pcf8574t(i2c, delay);
//! lcd.set_geometry(DisplayGeometry::new(2, 16));
//! ```
//!
//! Initialize the display:
//! ```rust,ignore
//! if let Err(e) = lcd.init().await {
//!    panic!("Error initializing LCD: {}", e);
//! }
//! ```
//! Use the display:
//! ```rust,ignore
//! // set up the display
//! lcd.backlight(true).await?.display_clear().await?;
//! // print a message
//! lcd.write("Hello, world!\n").await?;
//! // formatted output
//! write!(lcd, "{} C", 21).await?;
//! lcd.printf_xy(0, 1, "%5.1f%%", &[Argument::from(99.5)]).await?;
//! ```
//!
//! The methods for controlling the display each return a `Result` that wraps the display object in `Ok()`, allowing for chaining of commands.
//!
//! ### Reading from the display
//! The busy flag is read after every instruction and the address counter read alongside it is kept by the driver, see
//! [`HD44780::address_counter`]. The `read_data` method reads from either the CGRAM or DDRAM at the current address. The specific
//! meaning of the data depends on the prior commands sent to the display. See the HD44780 datasheet for more information.
//!
#![no_std]
use core::fmt::Display;

mod bit_configurations;
mod config;
mod driver;
pub mod format;
#[cfg(test)]
mod mock;

pub use bit_configurations::{
    ControllerConfig, DisplayControl, EntryMode, FunctionSet, MoveDirection,
};
pub use config::{
    DeviceSetupConfig, DisplayGeometry, InterfaceWidth, Timing, UnsupportedInterfaceWidth,
};
pub use driver::hd44780::{
    adapter::{
        generic_pcf8574t::GenericPCF8574TAdapter, parallel_gpio::ParallelBusAdapter, BusAdapter,
    },
    FORMAT_BUFFER_SIZE, HD44780, MAX_CUSTOM_CHARACTER_SLOT,
};
pub use format::{Argument, FormatError};

/// HD44780 based character display using a generic PCF8574T I2C adapter.
pub type CharacterDisplayPCF8574T<I2C, DELAY> = HD44780<GenericPCF8574TAdapter<I2C>, DELAY>;

/// HD44780 based character display wired directly to GPIO pins, with `N` data lines. `ADELAY`
/// times reads in the adapter, `DELAY` the protocol waits.
pub type ParallelCharacterDisplay<RS, RW, EN, BL, D, ADELAY, DELAY, const N: usize> =
    HD44780<ParallelBusAdapter<RS, RW, EN, BL, D, ADELAY, N>, DELAY>;

impl<I2C, DELAY> CharacterDisplayPCF8574T<I2C, DELAY>
where
    I2C: embedded_hal_async::i2c::I2c,
    DELAY: embedded_hal_async::delay::DelayNs,
{
    /// Create a display on a PCF8574T adapter at the default I2C address.
    pub fn new_pcf8574t(i2c: I2C, delay: DELAY) -> Self {
        Self::new(GenericPCF8574TAdapter::new(i2c), delay, InterfaceWidth::Four)
    }

    /// Create a display on a PCF8574T adapter at a specific I2C address.
    pub fn new_pcf8574t_with_address(i2c: I2C, address: u8, delay: DELAY) -> Self {
        Self::new(
            GenericPCF8574TAdapter::new_with_address(i2c, address),
            delay,
            InterfaceWidth::Four,
        )
    }
}

impl<RS, RW, EN, BL, D, ADELAY, DELAY, const N: usize>
    ParallelCharacterDisplay<RS, RW, EN, BL, D, ADELAY, DELAY, N>
where
    RS: embedded_hal::digital::OutputPin,
    RW: embedded_hal::digital::OutputPin,
    EN: embedded_hal::digital::OutputPin,
    BL: embedded_hal::digital::OutputPin,
    D: embedded_hal::digital::OutputPin + embedded_hal::digital::InputPin,
    ADELAY: embedded_hal_async::delay::DelayNs,
    DELAY: embedded_hal_async::delay::DelayNs,
{
    /// Create a display on directly wired GPIO pins. The interface width follows the number of data
    /// pins.
    pub fn new_parallel(
        adapter: ParallelBusAdapter<RS, RW, EN, BL, D, ADELAY, N>,
        delay: DELAY,
    ) -> Self {
        let interface_width = adapter.interface_width();
        Self::new(adapter, delay, interface_width)
    }
}

#[derive(Debug, PartialEq, Copy, Clone)]
/// Errors that can occur when using the display
pub enum CharacterDisplayError<E> {
    /// Error returned from the underlying bus adapter
    BusError(E),
    /// The busy flag did not clear within the configured wait budget
    Timeout,
    /// Custom character slot is out of range
    InvalidSlot,
    /// Custom character bitmap must have 8 or 10 rows
    InvalidBitmapLength,
    /// The interface width is neither 4 nor 8 bits
    UnsupportedInterfaceWidth(u8),
    /// Formatting error
    FormattingError(core::fmt::Error),
    /// printf-style formatting error
    Format(FormatError),
}

impl<E> From<core::fmt::Error> for CharacterDisplayError<E> {
    fn from(err: core::fmt::Error) -> Self {
        CharacterDisplayError::FormattingError(err)
    }
}

impl<E> From<FormatError> for CharacterDisplayError<E> {
    fn from(err: FormatError) -> Self {
        CharacterDisplayError::Format(err)
    }
}

impl<E> From<UnsupportedInterfaceWidth> for CharacterDisplayError<E> {
    fn from(err: UnsupportedInterfaceWidth) -> Self {
        CharacterDisplayError::UnsupportedInterfaceWidth(err.0)
    }
}

impl<E> From<&CharacterDisplayError<E>> for &'static str {
    fn from(err: &CharacterDisplayError<E>) -> Self {
        match err {
            CharacterDisplayError::BusError(_) => "Bus error",
            CharacterDisplayError::Timeout => "Timed out waiting for busy flag",
            CharacterDisplayError::InvalidSlot => "Custom character slot out of range",
            CharacterDisplayError::InvalidBitmapLength => "Invalid custom character bitmap length",
            CharacterDisplayError::UnsupportedInterfaceWidth(_) => "Unsupported interface width",
            CharacterDisplayError::FormattingError(_) => "Formatting error",
            CharacterDisplayError::Format(err) => From::from(err),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for CharacterDisplayError<E> {
    fn format(&self, fmt: defmt::Formatter) {
        let msg: &'static str = From::from(self);
        defmt::write!(fmt, "{}", msg);
    }
}

#[cfg(feature = "ufmt")]
impl<E> ufmt::uDisplay for CharacterDisplayError<E> {
    fn fmt<W>(&self, w: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        let msg: &'static str = From::from(self);
        ufmt::uwrite!(w, "{}", msg)
    }
}

impl<E> Display for CharacterDisplayError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg: &'static str = From::from(self);
        write!(f, "{}", msg)
    }
}
