// Text output. Printable characters are written to the data register at the current address;
// a handful of ASCII control codes are interpreted instead:
//
//   0x07 bell            calls the configured bell hook
//   0x08 backspace       moves the cursor against the text flow direction
//   0x0A line feed       moves to the start of the next row, wrapping to the first
//   0x0C form feed       clears the display
//   0x0D carriage return moves to the start of the current row
//   0x0E shift out       digits '0'-'7' print custom characters 0-7 until shift in
//   0x0F shift in        back to normal characters
//
// Other control codes are ignored.

use embedded_hal_async::delay::DelayNs;
use heapless::String;

use super::HD44780;
use crate::{
    bit_configurations::MoveDirection,
    format::{self, Argument},
    BusAdapter, CharacterDisplayError,
};

/// Capacity of the buffer formatted text is rendered into before it is written.
pub const FORMAT_BUFFER_SIZE: usize = 128;

const BELL: char = '\x07';
const BACKSPACE: char = '\x08';
const LINE_FEED: char = '\x0A';
const FORM_FEED: char = '\x0C';
const CARRIAGE_RETURN: char = '\x0D';
const SHIFT_OUT: char = '\x0E';
const SHIFT_IN: char = '\x0F';

impl<BUS, DELAY> HD44780<BUS, DELAY>
where
    BUS: BusAdapter,
    DELAY: DelayNs,
{
    /// Writes text at the current cursor position, interpreting control codes. Characters above
    /// 0xFF are written as their low byte.
    pub async fn write(
        &mut self,
        text: &str,
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        let mut custom_characters = false;
        for c in text.chars() {
            match c {
                BELL => (self.bell)(),
                BACKSPACE => {
                    let direction = MoveDirection::from(!self.state().entry_mode.left_or_right);
                    self.cursor_move(direction).await?;
                }
                LINE_FEED => {
                    let (_, y) = self.cursor_xy();
                    let rows = i32::from(self.geometry().rows());
                    self.set_address_xy(0, (i32::from(y) + 1) % rows).await?;
                }
                FORM_FEED => {
                    self.display_clear().await?;
                }
                CARRIAGE_RETURN => {
                    let (_, y) = self.cursor_xy();
                    self.set_address_xy(0, i32::from(y)).await?;
                }
                SHIFT_OUT => custom_characters = true,
                SHIFT_IN => custom_characters = false,
                c if (c as u32) < 0x20 => {}
                '0'..='7' if custom_characters => {
                    self.cooked_write(true, c as u8 - b'0').await?;
                }
                _ if custom_characters => {}
                c => {
                    self.cooked_write(true, (c as u32 & 0xFF) as u8).await?;
                }
            }
        }
        Ok(self)
    }

    /// Moves the cursor to column `x` of row `y`, then writes the text.
    pub async fn write_xy(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        self.set_address_xy(x, y).await?;
        self.write(text).await
    }

    /// Writes formatted text. Allows `write!(lcd, ...).await`.
    pub async fn write_fmt(
        &mut self,
        args: core::fmt::Arguments<'_>,
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        let mut buffer: String<FORMAT_BUFFER_SIZE> = String::new();
        core::fmt::write(&mut buffer, args)?;
        self.write(&buffer).await
    }

    /// Writes text rendered with the printf-style formatter, see [`crate::format`].
    pub async fn printf(
        &mut self,
        format: &str,
        args: &[Argument<'_>],
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        let buffer: String<FORMAT_BUFFER_SIZE> = format::sprintf(format, args)?;
        self.write(&buffer).await
    }

    /// Moves the cursor to column `x` of row `y`, then writes formatted text.
    pub async fn printf_xy(
        &mut self,
        x: i32,
        y: i32,
        format: &str,
        args: &[Argument<'_>],
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        let buffer: String<FORMAT_BUFFER_SIZE> = format::sprintf(format, args)?;
        self.write_xy(x, y, &buffer).await
    }
}
