// HD44780 Support
// This module provides the protocol layer for HD44780-based character displays. The HD44780 struct
// owns a BusAdapter (the physical wiring) and an async delay provider. Every instruction is written
// through `cooked_write`, which splits bytes into nibbles on a 4-bit bus and then polls the busy
// flag, bounded by the embassy-time clock. Polling is also the only way the tracked address
// counter is refreshed. Text output lives in `text`, custom characters in `cgram` and coordinate
// arithmetic in `address`.
//

pub mod adapter;
mod address;
mod cgram;
mod text;

use embassy_time::{Duration, Instant};
use embedded_hal_async::delay::DelayNs;

use crate::{
    bit_configurations::{
        move_bits, ControllerConfig, MoveDirection, FUNCTION_SET_DATALINK8BIT,
    },
    driver::{
        hd44780::adapter::BusAdapter, LCD_ADDRESS_MASK, LCD_BUSY_FLAG, LCD_CMD_CLEARDISPLAY,
        LCD_CMD_CURSORSHIFT, LCD_CMD_DISPLAYCONTROL, LCD_CMD_ENTRYMODESET, LCD_CMD_FUNCTIONSET,
        LCD_CMD_RETURNHOME, LCD_CMD_SETDDRAMADDR,
    },
    CharacterDisplayError, DeviceSetupConfig, DisplayGeometry, InterfaceWidth, Timing,
};

pub use cgram::MAX_CUSTOM_CHARACTER_SLOT;
pub use text::FORMAT_BUFFER_SIZE;

fn no_bell() {}

/// A HD44780 controller on a parallel bus.
///
/// All operations take `&mut self` and suspend at every bus transaction and timed wait, so a
/// single owner drives the bus one operation at a time.
pub struct HD44780<BUS, DELAY>
where
    BUS: BusAdapter,
    DELAY: DelayNs,
{
    bus: BUS,
    delay: DELAY,
    config: DeviceSetupConfig,
    state: ControllerConfig,
    address_counter: Option<u8>,
    bell: fn(),
}

impl<BUS, DELAY> HD44780<BUS, DELAY>
where
    BUS: BusAdapter,
    DELAY: DelayNs,
{
    /// Create a new display object with the default 2x40 geometry and datasheet timing.
    pub fn new(bus: BUS, delay: DELAY, interface_width: InterfaceWidth) -> Self {
        Self::new_with_config(bus, delay, DeviceSetupConfig::new(interface_width))
    }

    /// Create a new display object with a specific configuration.
    pub fn new_with_config(bus: BUS, delay: DELAY, config: DeviceSetupConfig) -> Self {
        Self {
            bus,
            delay,
            config,
            state: ControllerConfig::default(),
            address_counter: None,
            bell: no_bell,
        }
    }

    /// Consume the display object and return the bus and delay.
    pub fn release(self) -> (BUS, DELAY) {
        (self.bus, self.delay)
    }

    #[cfg(test)]
    pub(crate) fn bus(&mut self) -> &mut BUS {
        &mut self.bus
    }

    pub fn interface_width(&self) -> InterfaceWidth {
        self.config.interface_width
    }

    pub fn geometry(&self) -> DisplayGeometry {
        self.config.geometry
    }

    /// Reconfigure the display dimensions used for coordinate arithmetic.
    pub fn set_geometry(&mut self, geometry: DisplayGeometry) -> &mut Self {
        self.config.geometry = geometry;
        self
    }

    pub fn timing(&self) -> Timing {
        self.config.timing
    }

    /// The configuration registers as last sent to the controller.
    pub fn state(&self) -> &ControllerConfig {
        &self.state
    }

    /// The address counter reported by the controller during the last busy-wait, or `None` if it
    /// has not been read yet.
    pub fn address_counter(&self) -> Option<u8> {
        self.address_counter
    }

    /// Set the function called when a bell (0x07) is written.
    pub fn set_bell(&mut self, bell: fn()) -> &mut Self {
        self.bell = bell;
        self
    }

    //--------------------------------------------------------------------------------------------------
    // bus protocol
    //--------------------------------------------------------------------------------------------------

    async fn microsleep(&mut self, us: u32) {
        if us > 0 {
            self.delay.delay_us(us).await;
        }
    }

    async fn pulse_wait(&mut self) {
        let pulse_ns = self.config.timing.pulse_ns;
        if pulse_ns > 0 {
            self.delay.delay_ns(pulse_ns).await;
        }
    }

    async fn pulse_enable(&mut self) -> Result<(), CharacterDisplayError<BUS::Error>> {
        self.bus
            .set_enable(true)
            .await
            .map_err(CharacterDisplayError::BusError)?;
        self.pulse_wait().await;
        self.bus
            .set_enable(false)
            .await
            .map_err(CharacterDisplayError::BusError)?;
        self.pulse_wait().await;
        Ok(())
    }

    /// Places one bus unit on the data lines and latches it with an enable pulse.
    async fn write_unit(
        &mut self,
        rs_setting: bool,
        value: u8,
    ) -> Result<(), CharacterDisplayError<BUS::Error>> {
        self.bus
            .raw_write(rs_setting, value)
            .await
            .map_err(CharacterDisplayError::BusError)?;
        self.pulse_enable().await
    }

    /// Writes a full byte to the controller and waits until it has been processed. If `rs_setting`
    /// is `true`, the data is written to the data register, either the CGRAM or DDRAM, depending on
    /// prior command sent. If `rs_setting` is `false`, the data is written to the instruction register.
    pub async fn cooked_write(
        &mut self,
        rs_setting: bool,
        value: u8,
    ) -> Result<(), CharacterDisplayError<BUS::Error>> {
        match self.config.interface_width {
            InterfaceWidth::Four => {
                self.write_unit(rs_setting, value & 0xF0).await?;
                self.write_unit(rs_setting, (value & 0x0F) << 4).await?;
            }
            InterfaceWidth::Eight => {
                self.write_unit(rs_setting, value).await?;
            }
        }
        self.busy_wait().await
    }

    /// Reads a full byte from the controller. With `rs_setting` `false` this is the busy flag and
    /// address counter; with `true` it is the data at the current CGRAM or DDRAM address.
    pub async fn cooked_read(
        &mut self,
        rs_setting: bool,
    ) -> Result<u8, CharacterDisplayError<BUS::Error>> {
        match self.config.interface_width {
            InterfaceWidth::Four => {
                let high = self
                    .bus
                    .raw_read(rs_setting)
                    .await
                    .map_err(CharacterDisplayError::BusError)?;
                let low = self
                    .bus
                    .raw_read(rs_setting)
                    .await
                    .map_err(CharacterDisplayError::BusError)?;
                Ok((high & 0xF0) + (low >> 4))
            }
            InterfaceWidth::Eight => self
                .bus
                .raw_read(rs_setting)
                .await
                .map_err(CharacterDisplayError::BusError),
        }
    }

    /// Polls the busy flag until it clears, refreshing the address counter on every read. Fails
    /// with [`CharacterDisplayError::Timeout`] once the wait budget is exceeded.
    pub async fn busy_wait(&mut self) -> Result<(), CharacterDisplayError<BUS::Error>> {
        let max_wait = Duration::from_micros(u64::from(self.config.timing.max_wait_us));
        let started = Instant::now();
        loop {
            let waited = started.elapsed();
            if waited > max_wait {
                #[cfg(feature = "defmt")]
                defmt::warn!("busy flag still set after {=u64} us", waited.as_micros());
                return Err(CharacterDisplayError::Timeout);
            }
            let value = self.cooked_read(false).await?;
            self.address_counter = Some(value & LCD_ADDRESS_MASK);
            if value & LCD_BUSY_FLAG == 0 {
                return Ok(());
            }
        }
    }

    /// Sends an instruction byte to the controller.
    pub async fn send_command(
        &mut self,
        command: u8,
    ) -> Result<(), CharacterDisplayError<BUS::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("command {=u8:#x}", command);
        self.cooked_write(false, command).await
    }

    /// Runs the power-on initialization sequence. Must be called once before using the display. If it
    /// fails, the controller is left in an unknown state.
    pub async fn init(&mut self) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("initializing HD44780 over {} bus", self.config.interface_width);
        let timing = self.config.timing;
        let if8bit = LCD_CMD_FUNCTIONSET | (1 << FUNCTION_SET_DATALINK8BIT);

        // the busy flag cannot be checked until the controller is synchronized
        self.microsleep(timing.setup_0_us).await;
        self.write_unit(false, if8bit).await?;
        self.microsleep(timing.setup_1_us).await;
        self.write_unit(false, if8bit).await?;
        self.microsleep(timing.setup_2_us).await;
        self.write_unit(false, if8bit).await?;
        self.microsleep(timing.setup_2_us).await;

        match self.config.interface_width {
            InterfaceWidth::Four => {
                self.write_unit(false, LCD_CMD_FUNCTIONSET).await?;
                self.set_function(Some(false), Some(true), Some(false)).await?;
            }
            InterfaceWidth::Eight => {
                self.set_function(Some(true), Some(true), Some(false)).await?;
            }
        }
        self.set_display_control(Some(false), Some(false), Some(false))
            .await?;
        self.display_clear().await?;
        self.set_entry_mode(Some(true), Some(false)).await?;
        self.set_display_control(Some(true), Some(false), Some(false))
            .await?;

        #[cfg(feature = "defmt")]
        defmt::debug!("HD44780 initialized");
        Ok(self)
    }

    //--------------------------------------------------------------------------------------------------
    // configuration registers
    //--------------------------------------------------------------------------------------------------

    /// Update the function set register. Fields passed as `None` keep their current value.
    pub async fn set_function(
        &mut self,
        datalink8bit: Option<bool>,
        multiline: Option<bool>,
        font5x10: Option<bool>,
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        self.state
            .function_set
            .update(datalink8bit, multiline, font5x10);
        self.send_command(LCD_CMD_FUNCTIONSET | self.state.function_set.bits())
            .await?;
        Ok(self)
    }

    /// Update the display control register. Fields passed as `None` keep their current value.
    pub async fn set_display_control(
        &mut self,
        display: Option<bool>,
        cursor: Option<bool>,
        blink: Option<bool>,
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        self.state.display_control.update(display, cursor, blink);
        self.send_command(LCD_CMD_DISPLAYCONTROL | self.state.display_control.bits())
            .await?;
        Ok(self)
    }

    /// Update the entry mode register. Fields passed as `None` keep their current value.
    pub async fn set_entry_mode(
        &mut self,
        left_or_right: Option<bool>,
        cursor_or_display: Option<bool>,
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        self.state
            .entry_mode
            .update(left_or_right, cursor_or_display);
        self.send_command(LCD_CMD_ENTRYMODESET | self.state.entry_mode.bits())
            .await?;
        Ok(self)
    }

    /// Set the display visibility.
    pub async fn display_visible(
        &mut self,
        visible: bool,
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        self.state.display_control.display = visible;
        self.set_display_control(None, None, None).await
    }

    /// Set the cursor blinking.
    pub async fn cursor_blink(
        &mut self,
        blink: bool,
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        self.state.display_control.blink = blink;
        self.set_display_control(None, None, None).await
    }

    /// Set the underline cursor visibility.
    pub async fn cursor_visible(
        &mut self,
        visible: bool,
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        self.state.display_control.cursor = visible;
        self.set_display_control(None, None, None).await
    }

    /// Set the text flow direction to left to right.
    pub async fn left_to_right(&mut self) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        self.set_entry_mode(Some(true), None).await
    }

    /// Set the text flow direction to right to left.
    pub async fn right_to_left(&mut self) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        self.set_entry_mode(Some(false), None).await
    }

    /// Set the auto scroll mode.
    pub async fn autoscroll(
        &mut self,
        autoscroll: bool,
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        self.set_entry_mode(None, Some(autoscroll)).await
    }

    //--------------------------------------------------------------------------------------------------
    // cursor and display movement
    //--------------------------------------------------------------------------------------------------

    /// Move the cursor (`display_or_cursor == false`) or shift the display contents one position.
    /// Does not change any stored configuration.
    pub async fn set_move(
        &mut self,
        display_or_cursor: bool,
        direction: MoveDirection,
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        self.send_command(LCD_CMD_CURSORSHIFT | move_bits(display_or_cursor, direction))
            .await?;
        Ok(self)
    }

    pub async fn cursor_move(
        &mut self,
        direction: MoveDirection,
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        self.set_move(false, direction).await
    }

    pub async fn display_shift(
        &mut self,
        direction: MoveDirection,
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        self.set_move(true, direction).await
    }

    /// Scroll the display to the left.
    pub async fn display_shift_left(
        &mut self,
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        self.set_move(true, MoveDirection::Left).await
    }

    /// Scroll the display to the right.
    pub async fn display_shift_right(
        &mut self,
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        self.set_move(true, MoveDirection::Right).await
    }

    /// Clear the display and return the cursor home.
    pub async fn display_clear(&mut self) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        self.send_command(LCD_CMD_CLEARDISPLAY).await?;
        Ok(self)
    }

    /// Set the cursor to the home position and undo any display shift.
    pub async fn display_home(&mut self) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        self.send_command(LCD_CMD_RETURNHOME).await?;
        Ok(self)
    }

    /// Turn the backlight on or off
    pub async fn backlight(
        &mut self,
        on: bool,
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        self.bus
            .set_backlight(on)
            .await
            .map_err(CharacterDisplayError::BusError)?;
        Ok(self)
    }

    //--------------------------------------------------------------------------------------------------
    // addressing and reads
    //--------------------------------------------------------------------------------------------------

    /// Set the DDRAM address. Only the low 7 bits are used.
    pub async fn set_address(
        &mut self,
        address: u8,
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        self.send_command(LCD_CMD_SETDDRAMADDR | (address & LCD_ADDRESS_MASK))
            .await?;
        Ok(self)
    }

    /// Set the DDRAM address from a column and row. Out of range coordinates are clamped.
    pub async fn set_address_xy(
        &mut self,
        x: i32,
        y: i32,
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        let address = self.calc_address(x, y);
        self.set_address((address & u16::from(LCD_ADDRESS_MASK)) as u8)
            .await
    }

    /// Polls the controller and returns the current address counter.
    pub async fn read_address_counter(
        &mut self,
    ) -> Result<u8, CharacterDisplayError<BUS::Error>> {
        self.busy_wait().await?;
        Ok(self.address_counter.unwrap_or(0))
    }

    /// Reads into the buffer data from either the CGRAM or DDRAM, starting at the current address.
    /// The amount of data read is determined by the length of the buffer.
    pub async fn read_data(
        &mut self,
        buffer: &mut [u8],
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        for byte in buffer.iter_mut() {
            *byte = self.cooked_read(true).await?;
            self.busy_wait().await?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use super::*;
    use crate::mock::{BusEvent, FailingBus, MockBus, MockBusError};
    use embassy_futures::block_on;
    use embedded_hal_mock::eh1::delay::{CheckedDelay, NoopDelay, Transaction};

    fn display(
        bus: MockBus,
        interface_width: InterfaceWidth,
    ) -> HD44780<MockBus, NoopDelay> {
        HD44780::new(bus, NoopDelay::new(), interface_width)
    }

    fn command_writes(bytes: &[u8]) -> std::vec::Vec<(bool, u8)> {
        bytes.iter().map(|b| (false, *b)).collect()
    }

    #[test]
    fn test_4bit_cooked_write_splits_nibbles() {
        let mut lcd = display(MockBus::default(), InterfaceWidth::Four);
        assert!(block_on(lcd.cooked_write(true, 0xA5)).is_ok());

        assert_eq!(
            lcd.bus().events,
            std::vec![
                BusEvent::Write { rs: true, data: 0xA0 },
                BusEvent::Enable(true),
                BusEvent::Enable(false),
                BusEvent::Write { rs: true, data: 0x50 },
                BusEvent::Enable(true),
                BusEvent::Enable(false),
                // busy-wait: two nibble reads of the instruction register
                BusEvent::Read { rs: false },
                BusEvent::Read { rs: false },
            ]
        );
    }

    #[test]
    fn test_8bit_cooked_write_single_unit() {
        let mut lcd = display(MockBus::default(), InterfaceWidth::Eight);
        assert!(block_on(lcd.cooked_write(false, 0xA5)).is_ok());

        assert_eq!(
            lcd.bus().events,
            std::vec![
                BusEvent::Write { rs: false, data: 0xA5 },
                BusEvent::Enable(true),
                BusEvent::Enable(false),
                BusEvent::Read { rs: false },
            ]
        );
    }

    #[test]
    fn test_4bit_cooked_read_combines_nibbles() {
        let mut lcd = display(MockBus::with_reads(&[0x3F, 0xC7]), InterfaceWidth::Four);
        assert_eq!(block_on(lcd.cooked_read(true)), Ok(0x3C));
    }

    #[test]
    fn test_busy_wait_tracks_address_counter() {
        let mut lcd = display(MockBus::with_reads(&[0x80, 0x05]), InterfaceWidth::Eight);
        assert_eq!(lcd.address_counter(), None);

        assert!(block_on(lcd.busy_wait()).is_ok());
        assert_eq!(lcd.address_counter(), Some(5));
        assert_eq!(lcd.bus().read_count(), 2);
    }

    #[test]
    fn test_busy_wait_timeout() {
        let mut bus = MockBus::default();
        bus.idle_read = 0x80 | 0x22;
        bus.read_time_us = 10;
        let mut lcd = display(bus, InterfaceWidth::Eight);
        lcd.config.timing.max_wait_us = 50;

        assert_eq!(block_on(lcd.busy_wait()), Err(CharacterDisplayError::Timeout));
        // each read takes 10 us, so the budget is spent after at most 6 reads
        let reads = lcd.bus().read_count();
        assert!(reads <= 6, "{reads} reads");
        if reads > 0 {
            // the address counter follows reads that still have the busy flag set
            assert_eq!(lcd.address_counter(), Some(0x22));
        }
    }

    #[test]
    fn test_bus_errors_propagate() {
        let mut lcd = HD44780::new(FailingBus, NoopDelay::new(), InterfaceWidth::Four);
        assert_eq!(
            block_on(lcd.send_command(LCD_CMD_CLEARDISPLAY)).err(),
            Some(CharacterDisplayError::BusError(MockBusError))
        );
        assert_eq!(
            block_on(lcd.backlight(true)).err(),
            Some(CharacterDisplayError::BusError(MockBusError))
        );
    }

    #[test]
    fn test_pulse_width_delays() {
        let config = DeviceSetupConfig::new(InterfaceWidth::Eight).with_timing(Timing {
            pulse_ns: 450,
            ..Timing::default()
        });
        let delay = CheckedDelay::new(&[Transaction::delay_ns(450), Transaction::delay_ns(450)]);
        let mut lcd = HD44780::new_with_config(MockBus::default(), delay, config);
        assert!(block_on(lcd.send_command(LCD_CMD_RETURNHOME)).is_ok());

        let (_, mut delay) = lcd.release();
        delay.done();
    }

    #[test]
    fn test_init_8bit() {
        let delay = CheckedDelay::new(&[
            Transaction::delay_us(15_000),
            Transaction::delay_us(4_100),
            Transaction::delay_us(100),
            Transaction::delay_us(100),
        ]);
        let mut lcd = HD44780::new(MockBus::default(), delay, InterfaceWidth::Eight);
        assert!(block_on(lcd.init()).is_ok());

        assert_eq!(
            lcd.bus().writes(),
            command_writes(&[
                0x30, 0x30, 0x30, // synchronize, no busy-wait
                0x38, // function set: 8-bit, 2 lines, 5x8
                0x08, // display off
                0x01, // clear
                0x06, // entry mode: left to right, no shift
                0x0C, // display on
            ])
        );
        // one busy-wait read per cooked write
        assert_eq!(lcd.bus().read_count(), 5);
        assert_eq!(
            *lcd.state(),
            ControllerConfig {
                function_set: crate::FunctionSet {
                    datalink8bit: true,
                    multiline: true,
                    font5x10: false
                },
                display_control: crate::DisplayControl {
                    display: true,
                    cursor: false,
                    blink: false
                },
                entry_mode: crate::EntryMode {
                    left_or_right: true,
                    cursor_or_display: false
                },
            }
        );

        let (_, mut delay) = lcd.release();
        delay.done();
    }

    #[test]
    fn test_init_4bit() {
        let mut lcd = display(MockBus::default(), InterfaceWidth::Four);
        assert!(block_on(lcd.init()).is_ok());

        assert_eq!(
            lcd.bus().writes(),
            command_writes(&[
                0x30, 0x30, 0x30, // synchronize
                0x20, // switch to 4-bit
                0x20, 0x80, // function set 0x28
                0x00, 0x80, // display control 0x08
                0x00, 0x10, // clear 0x01
                0x00, 0x60, // entry mode 0x06
                0x00, 0xC0, // display control 0x0C
            ])
        );
        assert_eq!(lcd.bus().read_count(), 10);
        assert!(!lcd.state().function_set.datalink8bit);
    }

    #[test]
    fn test_init_timeout_aborts() {
        let mut bus = MockBus::default();
        bus.idle_read = 0x80;
        bus.read_time_us = 20;
        let mut lcd = display(bus, InterfaceWidth::Eight);
        lcd.config.timing.max_wait_us = 50;
        assert_eq!(block_on(lcd.init()).err(), Some(CharacterDisplayError::Timeout));
        // the sequence stops at the first cooked write
        assert_eq!(
            lcd.bus().writes(),
            command_writes(&[0x30, 0x30, 0x30, 0x38])
        );
    }

    #[test]
    fn test_set_display_control_partial_update() {
        let mut lcd = display(MockBus::default(), InterfaceWidth::Eight);
        block_on(async {
            lcd.set_display_control(Some(false), Some(true), Some(false))
                .await
                .unwrap();
            lcd.bus().clear();
            lcd.set_display_control(Some(true), None, None).await.unwrap();
        });

        assert!(lcd.state().display_control.display);
        assert!(lcd.state().display_control.cursor);
        assert!(!lcd.state().display_control.blink);
        assert_eq!(lcd.bus().writes(), command_writes(&[0x08 | 0b110]));
    }

    #[test]
    fn test_derived_toggles_resend_full_state() {
        let mut lcd = display(MockBus::default(), InterfaceWidth::Eight);
        block_on(async {
            lcd.display_visible(true).await.unwrap();
            lcd.cursor_blink(true).await.unwrap();
            lcd.cursor_visible(true).await.unwrap();
            lcd.display_visible(false).await.unwrap();
        });

        assert_eq!(
            lcd.bus().writes(),
            command_writes(&[0x0C, 0x0D, 0x0F, 0x0B])
        );
    }

    #[test]
    fn test_set_function_and_entry_mode() {
        let mut lcd = display(MockBus::default(), InterfaceWidth::Eight);
        block_on(async {
            lcd.set_function(None, Some(true), None).await.unwrap();
            lcd.set_function(None, None, Some(true)).await.unwrap();
            lcd.right_to_left().await.unwrap();
            lcd.autoscroll(true).await.unwrap();
            lcd.left_to_right().await.unwrap();
        });

        assert_eq!(
            lcd.bus().writes(),
            command_writes(&[0x38, 0x3C, 0x04, 0x05, 0x07])
        );
    }

    #[test]
    fn test_moves_do_not_touch_state() {
        let mut lcd = display(MockBus::default(), InterfaceWidth::Eight);
        let before = *lcd.state();
        block_on(async {
            lcd.cursor_move(MoveDirection::Left).await.unwrap();
            lcd.cursor_move(MoveDirection::Right).await.unwrap();
            lcd.display_shift(MoveDirection::Left).await.unwrap();
            lcd.display_shift_right().await.unwrap();
            lcd.display_shift_left().await.unwrap();
        });

        assert_eq!(
            lcd.bus().writes(),
            command_writes(&[0x10, 0x14, 0x18, 0x1C, 0x18])
        );
        assert_eq!(*lcd.state(), before);
    }

    #[test]
    fn test_clear_home_and_backlight() {
        let mut lcd = display(MockBus::default(), InterfaceWidth::Eight);
        block_on(async {
            lcd.backlight(true)
                .await
                .unwrap()
                .display_clear()
                .await
                .unwrap()
                .display_home()
                .await
                .unwrap();
        });

        assert_eq!(lcd.bus().events[0], BusEvent::Backlight(true));
        assert_eq!(lcd.bus().writes(), command_writes(&[0x01, 0x02]));
    }

    #[test]
    fn test_set_address_masks_and_clamps() {
        let mut lcd = display(MockBus::default(), InterfaceWidth::Eight);
        block_on(async {
            lcd.set_address(0xFF).await.unwrap();
            lcd.set_address_xy(5, 1).await.unwrap();
            lcd.set_address_xy(999, 0).await.unwrap();
            lcd.set_address_xy(-3, -3).await.unwrap();
        });

        assert_eq!(
            lcd.bus().writes(),
            command_writes(&[0x80 | 0x7F, 0x80 | 45, 0x80 | 40, 0x80])
        );
    }

    #[test]
    fn test_read_address_counter_and_data() {
        let mut lcd = display(
            MockBus::with_reads(&[0x80 | 0x07, 0x07, b'H', 0x08, b'i', 0x09]),
            InterfaceWidth::Eight,
        );
        assert_eq!(block_on(lcd.read_address_counter()), Ok(7));

        let mut buffer = [0_u8; 2];
        assert!(block_on(lcd.read_data(&mut buffer)).is_ok());
        assert_eq!(&buffer, b"Hi");
        assert_eq!(lcd.address_counter(), Some(9));
        assert_eq!(
            lcd.bus().events[2..],
            [
                BusEvent::Read { rs: true },
                BusEvent::Read { rs: false },
                BusEvent::Read { rs: true },
                BusEvent::Read { rs: false },
            ]
        );
    }
}
