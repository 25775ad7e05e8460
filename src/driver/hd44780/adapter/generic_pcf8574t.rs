use bitfield::bitfield;
use embedded_hal_async::i2c;

use super::BusAdapter;

// Configuration for the PCF8574T based 4-bit LCD interface
bitfield! {
    pub struct GenericPCF8574TBitField(u8);
    impl Debug;
    impl BitAnd;
    pub rs, set_rs: 0, 0;
    pub rw, set_rw: 1, 1;
    pub enable, set_enable: 2, 2;
    pub backlight, set_backlight: 3, 3;
    pub data, set_data: 7, 4;
}

impl Clone for GenericPCF8574TBitField {
    fn clone(&self) -> Self {
        Self(self.0)
    }
}

/// Bus adapter based on the PCF8574T I2C GPIO expander interfacing with the HD44780 controller via a
/// 4-bit interface. The most common wiring, used here, has the display data pins D4-D7 connected to
/// P4-P7 of the expander, and RS, RW, E and the backlight transistor on P0-P3.
///
/// Must be used with [`crate::InterfaceWidth::Four`].
pub struct GenericPCF8574TAdapter<I2C>
where
    I2C: i2c::I2c,
{
    i2c: I2C,
    address: u8,
    bits: GenericPCF8574TBitField,
}

impl<I2C> GenericPCF8574TAdapter<I2C>
where
    I2C: i2c::I2c,
{
    /// Default I2C address of the PCF8574T with all address pins pulled high.
    pub const DEFAULT_I2C_ADDRESS: u8 = 0x27;

    /// Create an adapter using the default I2C address.
    pub fn new(i2c: I2C) -> Self {
        Self::new_with_address(i2c, Self::DEFAULT_I2C_ADDRESS)
    }

    /// Create an adapter using a specific I2C address.
    pub fn new_with_address(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            bits: GenericPCF8574TBitField(0),
        }
    }

    /// returns configured i2c address
    pub fn i2c_address(&self) -> u8 {
        self.address
    }

    /// Consume the adapter and return the I2C peripheral.
    pub fn release(self) -> I2C {
        self.i2c
    }

    async fn write_bits_to_gpio(&mut self) -> Result<(), I2C::Error> {
        let data = [self.bits.0];
        self.i2c.write(self.address, &data).await
    }
}

impl<I2C> BusAdapter for GenericPCF8574TAdapter<I2C>
where
    I2C: i2c::I2c,
{
    type Error = I2C::Error;

    async fn set_enable(&mut self, state: bool) -> Result<(), Self::Error> {
        self.bits.set_enable(state as u8);
        self.write_bits_to_gpio().await
    }

    async fn set_backlight(&mut self, state: bool) -> Result<(), Self::Error> {
        self.bits.set_backlight(state as u8);
        self.write_bits_to_gpio().await
    }

    async fn raw_write(&mut self, register_select: bool, data: u8) -> Result<(), Self::Error> {
        self.bits.set_rs(register_select as u8);
        self.bits.set_rw(0);
        self.bits.set_data(data >> 4);
        self.write_bits_to_gpio().await
    }

    async fn raw_read(&mut self, register_select: bool) -> Result<u8, Self::Error> {
        // need to set all data bits to HIGH to read, per PFC8574 data sheet description of Quasi-bidirectional I/Os
        self.bits.set_data(0b1111);
        self.bits.set_rs(register_select as u8);
        self.bits.set_rw(1);
        self.bits.set_enable(0);
        self.write_bits_to_gpio().await?;

        self.bits.set_enable(1);
        self.write_bits_to_gpio().await?;
        let mut data = [0];
        self.i2c.read(self.address, &mut data).await?;

        self.bits.set_enable(0);
        self.write_bits_to_gpio().await?;

        Ok(GenericPCF8574TBitField(data[0]).data() << 4)
    }
}
