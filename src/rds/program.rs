//! Station identity fields carried in every group
//!
//! Program identification (block A) and program type (block B bits 9..5).

use core::fmt;
use heapless::String;

/// Program identification code
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u16);

impl ProgramId {
    /// Render as four upper-case hex digits
    #[must_use]
    pub fn to_hex(self) -> String<4> {
        let mut out = String::new();
        for shift in [12u16, 8, 4, 0] {
            let nibble = ((self.0 >> shift) & 0xF) as u8;
            let ch = if nibble < 10 {
                b'0' + nibble
            } else {
                b'A' + nibble - 10
            };
            // Capacity is exactly four digits
            let _ = out.push(char::from(ch));
        }
        out
    }

    /// Country code nibble
    #[must_use]
    pub const fn country(self) -> u8 {
        (self.0 >> 12) as u8
    }

    /// Program area coverage nibble
    #[must_use]
    pub const fn coverage(self) -> u8 {
        ((self.0 >> 8) & 0xF) as u8
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ProgramId {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "PI {=u16:04X}", self.0);
    }
}

/// Program type code (0-31)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ProgramType(u8);

/// Program type names (European RDS table)
const PTY_NAMES: [&str; 32] = [
    "None",
    "News",
    "Current Affairs",
    "Information",
    "Sport",
    "Education",
    "Drama",
    "Culture",
    "Science",
    "Varied",
    "Pop Music",
    "Rock Music",
    "Easy Listening",
    "Light Classical",
    "Serious Classical",
    "Other Music",
    "Weather",
    "Finance",
    "Children's Programmes",
    "Social Affairs",
    "Religion",
    "Phone-In",
    "Travel",
    "Leisure",
    "Jazz Music",
    "Country Music",
    "National Music",
    "Oldies Music",
    "Folk Music",
    "Documentary",
    "Alarm Test",
    "Alarm",
];

impl ProgramType {
    /// Create from the 5-bit field; upper bits are masked off
    #[must_use]
    pub const fn new(code: u8) -> Self {
        Self(code & 0x1F)
    }

    /// Get the numeric code
    #[must_use]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Human-readable program type name
    #[must_use]
    pub const fn name(self) -> &'static str {
        PTY_NAMES[self.0 as usize]
    }
}

impl fmt::Display for ProgramType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ProgramType {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "PTY {=u8} ({=str})", self.0, self.name());
    }
}
