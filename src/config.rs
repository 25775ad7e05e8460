use core::fmt::Display;

/// Width of the data bus between the host and the HD44780 controller.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InterfaceWidth {
    /// 4 data lines (D4-D7). Every byte is transferred as two nibbles.
    Four,
    /// 8 data lines (D0-D7).
    Eight,
}

/// Returned when converting a bus width other than 4 or 8 into an [`InterfaceWidth`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnsupportedInterfaceWidth(pub u8);

impl TryFrom<u8> for InterfaceWidth {
    type Error = UnsupportedInterfaceWidth;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            4 => Ok(InterfaceWidth::Four),
            8 => Ok(InterfaceWidth::Eight),
            other => Err(UnsupportedInterfaceWidth(other)),
        }
    }
}

impl From<InterfaceWidth> for u8 {
    fn from(width: InterfaceWidth) -> Self {
        match width {
            InterfaceWidth::Four => 4,
            InterfaceWidth::Eight => 8,
        }
    }
}

impl From<&InterfaceWidth> for &'static str {
    fn from(width: &InterfaceWidth) -> Self {
        match width {
            InterfaceWidth::Four => "4-bit",
            InterfaceWidth::Eight => "8-bit",
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for InterfaceWidth {
    fn format(&self, fmt: defmt::Formatter) {
        let msg: &'static str = From::from(self);
        defmt::write!(fmt, "{}", msg);
    }
}

#[cfg(feature = "ufmt")]
impl ufmt::uDisplay for InterfaceWidth {
    fn fmt<W>(&self, w: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        let msg: &'static str = From::from(self);
        ufmt::uwrite!(w, "{}", msg)
    }
}

impl Display for InterfaceWidth {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg: &'static str = From::from(self);
        write!(f, "{}", msg)
    }
}

/// Number of rows and columns of the display. Defines the valid coordinate and address ranges
/// used when converting between `(x, y)` positions and linear DDRAM addresses.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayGeometry {
    rows: u8,
    columns: u8,
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self {
            rows: 2,
            columns: 40,
        }
    }
}

impl DisplayGeometry {
    /// Create a geometry. Zero dimensions are raised to one.
    pub const fn new(rows: u8, columns: u8) -> Self {
        Self {
            rows: if rows == 0 { 1 } else { rows },
            columns: if columns == 0 { 1 } else { columns },
        }
    }

    pub const fn rows(&self) -> u8 {
        self.rows
    }

    pub const fn columns(&self) -> u8 {
        self.columns
    }
}

/// Timing contract of the bus. Delays are suspension points on the async delay provider.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Enable pulse width in nanoseconds. The controller needs ~450 ns; 0 relies on bus latency.
    pub pulse_ns: u32,
    /// Power-on settle time before the first instruction.
    pub setup_0_us: u32,
    /// Wait after the first 8-bit function set.
    pub setup_1_us: u32,
    /// Wait after the second and third 8-bit function set.
    pub setup_2_us: u32,
    /// Budget for the busy flag to clear before a busy-wait fails with a timeout.
    pub max_wait_us: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            pulse_ns: 0,
            setup_0_us: 15_000,
            setup_1_us: 4_100,
            setup_2_us: 100,
            max_wait_us: 25_000,
        }
    }
}

/// Static configuration of a display instance.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceSetupConfig {
    pub interface_width: InterfaceWidth,
    pub geometry: DisplayGeometry,
    pub timing: Timing,
}

impl DeviceSetupConfig {
    /// Configuration with the default 2x40 geometry and datasheet timing.
    pub fn new(interface_width: InterfaceWidth) -> Self {
        Self {
            interface_width,
            geometry: DisplayGeometry::default(),
            timing: Timing::default(),
        }
    }

    pub fn with_geometry(mut self, geometry: DisplayGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }
}
