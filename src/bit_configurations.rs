//! Controller configuration registers and the bit positions used to encode them into the option
//! bits of the corresponding instruction.

// function set bit positions
pub(crate) const FUNCTION_SET_DATALINK8BIT: u8 = 4;
pub(crate) const FUNCTION_SET_MULTILINE: u8 = 3;
pub(crate) const FUNCTION_SET_FONT5X10: u8 = 2;

// display control bit positions
pub(crate) const DISPLAY_CONTROL_DISPLAY: u8 = 2;
pub(crate) const DISPLAY_CONTROL_CURSOR: u8 = 1;
pub(crate) const DISPLAY_CONTROL_BLINK: u8 = 0;

// entry mode bit positions
pub(crate) const ENTRY_MODE_LEFT_OR_RIGHT: u8 = 1;
pub(crate) const ENTRY_MODE_CURSOR_OR_DISPLAY: u8 = 0;

// cursor/display shift bit positions
pub(crate) const MOVE_DISPLAY_OR_CURSOR: u8 = 3;
pub(crate) const MOVE_LEFT_OR_RIGHT: u8 = 2;

/// Function set register: bus width, number of display lines and font.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FunctionSet {
    /// `true` for an 8-bit data bus, `false` for 4-bit.
    pub datalink8bit: bool,
    /// `true` for two-line (multi-line) mode.
    pub multiline: bool,
    /// `true` for the 5x10 dot font, `false` for 5x8.
    pub font5x10: bool,
}

impl Default for FunctionSet {
    fn default() -> Self {
        Self {
            datalink8bit: true,
            multiline: false,
            font5x10: false,
        }
    }
}

impl FunctionSet {
    /// Merge the provided fields into the register. `None` leaves a field unchanged.
    pub fn update(
        &mut self,
        datalink8bit: Option<bool>,
        multiline: Option<bool>,
        font5x10: Option<bool>,
    ) {
        if let Some(value) = datalink8bit {
            self.datalink8bit = value;
        }
        if let Some(value) = multiline {
            self.multiline = value;
        }
        if let Some(value) = font5x10 {
            self.font5x10 = value;
        }
    }

    /// The option bits OR'd onto `FUNCTIONSET`.
    pub const fn bits(&self) -> u8 {
        ((self.datalink8bit as u8) << FUNCTION_SET_DATALINK8BIT)
            | ((self.multiline as u8) << FUNCTION_SET_MULTILINE)
            | ((self.font5x10 as u8) << FUNCTION_SET_FONT5X10)
    }
}

/// Display on/off control register.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayControl {
    pub display: bool,
    /// Underline cursor.
    pub cursor: bool,
    /// Blinking block cursor.
    pub blink: bool,
}

impl DisplayControl {
    /// Merge the provided fields into the register. `None` leaves a field unchanged.
    pub fn update(&mut self, display: Option<bool>, cursor: Option<bool>, blink: Option<bool>) {
        if let Some(value) = display {
            self.display = value;
        }
        if let Some(value) = cursor {
            self.cursor = value;
        }
        if let Some(value) = blink {
            self.blink = value;
        }
    }

    /// The option bits OR'd onto `DISPLAYCONTROL`.
    pub const fn bits(&self) -> u8 {
        ((self.display as u8) << DISPLAY_CONTROL_DISPLAY)
            | ((self.cursor as u8) << DISPLAY_CONTROL_CURSOR)
            | ((self.blink as u8) << DISPLAY_CONTROL_BLINK)
    }
}

/// Entry mode register.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EntryMode {
    /// `true` increments the address counter after each write (text flows left to right).
    pub left_or_right: bool,
    /// `true` shifts the display instead of moving the cursor (autoscroll).
    pub cursor_or_display: bool,
}

impl Default for EntryMode {
    fn default() -> Self {
        Self {
            left_or_right: true,
            cursor_or_display: false,
        }
    }
}

impl EntryMode {
    /// Merge the provided fields into the register. `None` leaves a field unchanged.
    pub fn update(&mut self, left_or_right: Option<bool>, cursor_or_display: Option<bool>) {
        if let Some(value) = left_or_right {
            self.left_or_right = value;
        }
        if let Some(value) = cursor_or_display {
            self.cursor_or_display = value;
        }
    }

    /// The option bits OR'd onto `ENTRYMODESET`.
    pub const fn bits(&self) -> u8 {
        ((self.left_or_right as u8) << ENTRY_MODE_LEFT_OR_RIGHT)
            | ((self.cursor_or_display as u8) << ENTRY_MODE_CURSOR_OR_DISPLAY)
    }
}

/// Mirror of the controller's configuration registers, updated in lockstep with every command sent.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    pub function_set: FunctionSet,
    pub display_control: DisplayControl,
    pub entry_mode: EntryMode,
}

/// Direction of a cursor move or display shift.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MoveDirection {
    Left,
    Right,
}

impl From<bool> for MoveDirection {
    /// `true` is right, matching the entry mode `left_or_right` flag.
    fn from(right: bool) -> Self {
        if right {
            MoveDirection::Right
        } else {
            MoveDirection::Left
        }
    }
}

/// The option bits OR'd onto `CURSORSHIFT`.
pub(crate) const fn move_bits(display_or_cursor: bool, direction: MoveDirection) -> u8 {
    let right = matches!(direction, MoveDirection::Right);
    ((display_or_cursor as u8) << MOVE_DISPLAY_OR_CURSOR) | ((right as u8) << MOVE_LEFT_OR_RIGHT)
}
