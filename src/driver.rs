pub mod hd44780;

// commands
pub(crate) const LCD_CMD_CLEARDISPLAY: u8 = 0x01; //  Clear display, set cursor position to zero
pub(crate) const LCD_CMD_RETURNHOME: u8 = 0x02; //  Set cursor position to zero
pub(crate) const LCD_CMD_ENTRYMODESET: u8 = 0x04; //  Sets the entry mode
pub(crate) const LCD_CMD_DISPLAYCONTROL: u8 = 0x08; //  Controls the display; does stuff like turning it off and on
pub(crate) const LCD_CMD_CURSORSHIFT: u8 = 0x10; //  Lets you move the cursor
pub(crate) const LCD_CMD_FUNCTIONSET: u8 = 0x20; //  Used to send the function to set to the display
pub(crate) const LCD_CMD_SETCGRAMADDR: u8 = 0x40; //  Used to set the CGRAM (character generator RAM) with characters
pub(crate) const LCD_CMD_SETDDRAMADDR: u8 = 0x80; //  Used to set the DDRAM (Display Data RAM)

/// Busy flag in the byte read from the instruction register
pub(crate) const LCD_BUSY_FLAG: u8 = 0x80;
/// Address counter bits in the byte read from the instruction register
pub(crate) const LCD_ADDRESS_MASK: u8 = 0x7F;
/// CGRAM addresses are 6 bits wide
pub(crate) const LCD_CGRAM_ADDRESS_MASK: u8 = 0x3F;
