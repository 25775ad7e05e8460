use embedded_hal::digital::{Error as _, ErrorKind, InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

use super::BusAdapter;
use crate::InterfaceWidth;

// data output delay after enable rises (tDDR)
const DATA_DELAY_NS: u32 = 360;

/// Bus adapter for a HD44780 controller wired directly to GPIO pins.
///
/// The data pins must be readable as well as writable. On most HALs this means configuring them as
/// open-drain outputs with pull-ups, so that setting a line high releases it and the controller can
/// drive it during a read. `N` is the number of data lines: the 4-bit wiring uses D4-D7, the 8-bit
/// wiring D0-D7, given in that order. `delay` times the data output delay of a read.
pub struct ParallelBusAdapter<RS, RW, EN, BL, D, DELAY, const N: usize> {
    rs: RS,
    rw: RW,
    enable: EN,
    backlight: Option<BL>,
    data: [D; N],
    delay: DELAY,
}

impl<RS, RW, EN, BL, D, DELAY> ParallelBusAdapter<RS, RW, EN, BL, D, DELAY, 4>
where
    RS: OutputPin,
    RW: OutputPin,
    EN: OutputPin,
    BL: OutputPin,
    D: OutputPin + InputPin,
    DELAY: DelayNs,
{
    /// Create an adapter for the 4-bit wiring. `data` is D4, D5, D6, D7.
    pub fn new_4bit(
        rs: RS,
        rw: RW,
        enable: EN,
        backlight: Option<BL>,
        data: [D; 4],
        delay: DELAY,
    ) -> Self {
        Self {
            rs,
            rw,
            enable,
            backlight,
            data,
            delay,
        }
    }
}

impl<RS, RW, EN, BL, D, DELAY> ParallelBusAdapter<RS, RW, EN, BL, D, DELAY, 8>
where
    RS: OutputPin,
    RW: OutputPin,
    EN: OutputPin,
    BL: OutputPin,
    D: OutputPin + InputPin,
    DELAY: DelayNs,
{
    /// Create an adapter for the 8-bit wiring. `data` is D0 through D7.
    pub fn new_8bit(
        rs: RS,
        rw: RW,
        enable: EN,
        backlight: Option<BL>,
        data: [D; 8],
        delay: DELAY,
    ) -> Self {
        Self {
            rs,
            rw,
            enable,
            backlight,
            data,
            delay,
        }
    }
}

impl<RS, RW, EN, BL, D, DELAY, const N: usize> ParallelBusAdapter<RS, RW, EN, BL, D, DELAY, N> {
    /// The interface width matching the number of wired data lines.
    pub const fn interface_width(&self) -> InterfaceWidth {
        if N == 8 {
            InterfaceWidth::Eight
        } else {
            InterfaceWidth::Four
        }
    }

    /// Consume the adapter and return the pins and the delay.
    pub fn release(self) -> (RS, RW, EN, Option<BL>, [D; N], DELAY) {
        (
            self.rs,
            self.rw,
            self.enable,
            self.backlight,
            self.data,
            self.delay,
        )
    }

    // bit of the bus byte carried by the first data line
    const FIRST_BIT: usize = 8 - N;
}

fn set_pin<P: OutputPin>(pin: &mut P, state: bool) -> Result<(), ErrorKind> {
    pin.set_state(state.into()).map_err(|e| e.kind())
}

impl<RS, RW, EN, BL, D, DELAY, const N: usize> BusAdapter
    for ParallelBusAdapter<RS, RW, EN, BL, D, DELAY, N>
where
    RS: OutputPin,
    RW: OutputPin,
    EN: OutputPin,
    BL: OutputPin,
    D: OutputPin + InputPin,
    DELAY: DelayNs,
{
    type Error = ErrorKind;

    async fn set_enable(&mut self, state: bool) -> Result<(), Self::Error> {
        set_pin(&mut self.enable, state)
    }

    async fn set_backlight(&mut self, state: bool) -> Result<(), Self::Error> {
        match self.backlight.as_mut() {
            Some(pin) => set_pin(pin, state),
            None => Ok(()),
        }
    }

    async fn raw_write(&mut self, register_select: bool, data: u8) -> Result<(), Self::Error> {
        set_pin(&mut self.rs, register_select)?;
        set_pin(&mut self.rw, false)?;
        for (i, pin) in self.data.iter_mut().enumerate() {
            set_pin(pin, data & (1 << (Self::FIRST_BIT + i)) != 0)?;
        }
        Ok(())
    }

    async fn raw_read(&mut self, register_select: bool) -> Result<u8, Self::Error> {
        set_pin(&mut self.rs, register_select)?;
        set_pin(&mut self.rw, true)?;
        // release the data lines so the controller can drive them
        for pin in self.data.iter_mut() {
            set_pin(pin, true)?;
        }

        set_pin(&mut self.enable, true)?;
        self.delay.delay_ns(DATA_DELAY_NS).await;
        let mut value = 0;
        for (i, pin) in self.data.iter_mut().enumerate() {
            if pin.is_high().map_err(|e| e.kind())? {
                value |= 1 << (Self::FIRST_BIT + i);
            }
        }
        set_pin(&mut self.enable, false)?;
        set_pin(&mut self.rw, false)?;

        Ok(value)
    }
}
