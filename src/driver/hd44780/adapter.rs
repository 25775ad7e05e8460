pub mod generic_pcf8574t;
pub mod parallel_gpio;

/// Trait for implementing the physical bus between the host and a HD44780 controller. The driver
/// only ever talks to the controller through these four operations, so any wiring (direct GPIO,
/// an I2C GPIO expander, a shift register) can be supported by implementing this trait.
///
/// Every method is a suspension point. Implementations should not retry; an error is propagated
/// to the caller unchanged, wrapped in [`crate::CharacterDisplayError::BusError`].
#[allow(async_fn_in_trait)]
pub trait BusAdapter {
    /// Error returned by the underlying pin or bus implementation.
    type Error: core::fmt::Debug;

    /// Drives the enable (strobe) line.
    async fn set_enable(&mut self, state: bool) -> Result<(), Self::Error>;

    /// Drives the backlight control line. A value of `true` turns the backlight on.
    async fn set_backlight(&mut self, state: bool) -> Result<(), Self::Error>;

    /// Places one unit of data on the data lines with the given register select state. A value of
    /// `false` selects the instruction register, while a value of `true` selects the data register.
    /// In 8-bit mode the unit is the full byte; in 4-bit mode the nibble is in the upper 4 bits of
    /// `data`. The driver strobes the enable line afterwards.
    async fn raw_write(&mut self, register_select: bool, data: u8) -> Result<(), Self::Error>;

    /// Samples one unit of data from the data lines with the given register select state. In 4-bit
    /// mode the nibble is returned in the upper 4 bits. The adapter is responsible for strobing
    /// the enable line around the sample.
    async fn raw_read(&mut self, register_select: bool) -> Result<u8, Self::Error>;
}

impl<T: BusAdapter + ?Sized> BusAdapter for &mut T {
    type Error = T::Error;

    async fn set_enable(&mut self, state: bool) -> Result<(), Self::Error> {
        T::set_enable(self, state).await
    }

    async fn set_backlight(&mut self, state: bool) -> Result<(), Self::Error> {
        T::set_backlight(self, state).await
    }

    async fn raw_write(&mut self, register_select: bool, data: u8) -> Result<(), Self::Error> {
        T::raw_write(self, register_select, data).await
    }

    async fn raw_read(&mut self, register_select: bool) -> Result<u8, Self::Error> {
        T::raw_read(self, register_select).await
    }
}
