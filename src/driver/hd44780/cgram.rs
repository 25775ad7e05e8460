use embedded_hal_async::delay::DelayNs;

use super::HD44780;
use crate::{
    driver::{LCD_CGRAM_ADDRESS_MASK, LCD_CMD_SETCGRAMADDR},
    BusAdapter, CharacterDisplayError,
};

/// Highest custom character slot.
pub const MAX_CUSTOM_CHARACTER_SLOT: u8 = 7;

impl<BUS, DELAY> HD44780<BUS, DELAY>
where
    BUS: BusAdapter,
    DELAY: DelayNs,
{
    /// Stores a custom character glyph in CGRAM. `bitmap` holds one byte per pixel row: 8 rows for
    /// the 5x8 font, 10 for 5x10. The glyph is printed by writing the slot number as a character,
    /// or the digits '0'-'7' in shift mode.
    ///
    /// Nothing is sent to the controller if `slot` or the bitmap length is invalid. The address
    /// counter is left in CGRAM, so set a DDRAM address before writing text again.
    pub async fn store_custom_bitmap(
        &mut self,
        slot: u8,
        bitmap: &[u8],
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        if slot > MAX_CUSTOM_CHARACTER_SLOT {
            return Err(CharacterDisplayError::InvalidSlot);
        }
        if bitmap.len() != 8 && bitmap.len() != 10 {
            return Err(CharacterDisplayError::InvalidBitmapLength);
        }
        let rows_per_glyph = if self.state().function_set.font5x10 {
            10
        } else {
            8
        };
        let base = (slot * rows_per_glyph) & LCD_CGRAM_ADDRESS_MASK;
        self.send_command(LCD_CMD_SETCGRAMADDR | base).await?;
        for row in bitmap {
            self.cooked_write(true, *row).await?;
        }
        Ok(self)
    }

    /// Stores a 5x8 custom character glyph in CGRAM.
    pub async fn create_char(
        &mut self,
        slot: u8,
        charmap: [u8; 8],
    ) -> Result<&mut Self, CharacterDisplayError<BUS::Error>> {
        self.store_custom_bitmap(slot, &charmap).await
    }
}
