// Conversion between (x, y) character positions and linear DDRAM addresses. Addresses are laid out
// row after row, `columns` cells per row.

use embedded_hal_async::delay::DelayNs;

use super::HD44780;
use crate::{BusAdapter, DisplayGeometry};

impl DisplayGeometry {
    /// Linear address of the cell at column `x` and row `y`. Coordinates are clamped to
    /// `0..=columns` and `0..=rows` before the conversion.
    pub fn calc_address(&self, x: i32, y: i32) -> u16 {
        let x = x.clamp(0, i32::from(self.columns()));
        let y = y.clamp(0, i32::from(self.rows()));
        (x + y * i32::from(self.columns())) as u16
    }

    /// Column and row of a linear address. The address is clamped to the last cell of the display.
    pub fn calc_xy(&self, address: u16) -> (u8, u8) {
        let columns = u16::from(self.columns());
        let last = u16::from(self.rows()) * columns - 1;
        let address = address.min(last);
        ((address % columns) as u8, (address / columns) as u8)
    }
}

impl<BUS, DELAY> HD44780<BUS, DELAY>
where
    BUS: BusAdapter,
    DELAY: DelayNs,
{
    /// Linear DDRAM address for a position, using the configured geometry.
    pub fn calc_address(&self, x: i32, y: i32) -> u16 {
        self.geometry().calc_address(x, y)
    }

    /// Position of a linear DDRAM address, using the configured geometry.
    pub fn calc_xy(&self, address: u16) -> (u8, u8) {
        self.geometry().calc_xy(address)
    }

    /// Cursor position derived from the last known address counter. An unknown counter is
    /// treated as address 0.
    pub fn cursor_xy(&self) -> (u8, u8) {
        self.calc_xy(u16::from(self.address_counter().unwrap_or(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mock::MockBus, InterfaceWidth};
    use embassy_futures::block_on;
    use embedded_hal_mock::eh1::delay::NoopDelay;

    #[test]
    fn test_calc_address() {
        let geometry = DisplayGeometry::default();
        assert_eq!(geometry.calc_address(0, 0), 0);
        assert_eq!(geometry.calc_address(5, 1), 45);
        assert_eq!(geometry.calc_address(999, 0), 40);
        assert_eq!(geometry.calc_address(-5, 0), 0);
        // the row clamp admits `rows` itself
        assert_eq!(geometry.calc_address(0, 7), 80);
    }

    #[test]
    fn test_calc_address_small_display() {
        let geometry = DisplayGeometry::new(4, 20);
        assert_eq!(geometry.calc_address(19, 3), 79);
        assert_eq!(geometry.calc_address(3, -1), 3);
    }

    #[test]
    fn test_calc_xy_follows_address_counter() {
        let geometry = DisplayGeometry::default();
        assert_eq!(geometry.calc_xy(0), (0, 0));
        assert_eq!(geometry.calc_xy(39), (39, 0));
        assert_eq!(geometry.calc_xy(40), (0, 1));
        assert_eq!(geometry.calc_xy(45), (5, 1));
        assert_eq!(geometry.calc_xy(79), (39, 1));
        // out of range addresses stay on the last cell
        assert_eq!(geometry.calc_xy(0x7F), (39, 1));
    }

    #[test]
    fn test_cursor_xy_from_busy_wait() {
        let mut lcd = HD44780::new(
            MockBus::with_reads(&[42]),
            NoopDelay::new(),
            InterfaceWidth::Eight,
        );
        assert_eq!(lcd.cursor_xy(), (0, 0));

        assert!(block_on(lcd.busy_wait()).is_ok());
        assert_eq!(lcd.cursor_xy(), (2, 1));

        lcd.set_geometry(DisplayGeometry::new(4, 20));
        assert_eq!(lcd.cursor_xy(), (2, 2));
    }
}
