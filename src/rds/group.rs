//! RDS group framing and classification
//!
//! A group is four 16-bit blocks. Fields are extracted by masking and
//! shifting the raw words, so nothing depends on struct layout or
//! endianness:
//!
//! ```text
//! block B:  15..12  11   10   9..5   4..0
//!           type    ver  TP   PTY    group-specific
//! ```

use core::fmt;

use super::program::{ProgramId, ProgramType};

/// One RDS group: blocks A, B, C and D
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Group([u16; 4]);

impl Group {
    /// Build a group from its four blocks
    #[must_use]
    pub const fn new(a: u16, b: u16, c: u16, d: u16) -> Self {
        Self([a, b, c, d])
    }

    /// Build a group from a block array in A, B, C, D order
    #[must_use]
    pub const fn from_blocks(blocks: [u16; 4]) -> Self {
        Self(blocks)
    }

    /// Block A
    #[must_use]
    pub const fn a(&self) -> u16 {
        self.0[0]
    }

    /// Block B
    #[must_use]
    pub const fn b(&self) -> u16 {
        self.0[1]
    }

    /// Block C
    #[must_use]
    pub const fn c(&self) -> u16 {
        self.0[2]
    }

    /// Block D
    #[must_use]
    pub const fn d(&self) -> u16 {
        self.0[3]
    }

    /// Program identification (block A)
    #[must_use]
    pub const fn program_id(&self) -> ProgramId {
        ProgramId(self.a())
    }

    /// Group type number (0-15)
    #[must_use]
    pub const fn type_number(&self) -> u8 {
        (self.b() >> 12) as u8
    }

    /// Group version
    #[must_use]
    pub const fn version(&self) -> Version {
        if self.b() & 0x0800 == 0 {
            Version::A
        } else {
            Version::B
        }
    }

    /// Type and version together
    #[must_use]
    pub const fn group_type(&self) -> GroupType {
        GroupType::new(self.type_number(), self.version())
    }

    /// Traffic program flag (block B bit 10)
    #[must_use]
    pub const fn traffic_program(&self) -> bool {
        self.b() & 0x0400 != 0
    }

    /// Program type (block B bits 9..5)
    #[must_use]
    pub const fn program_type(&self) -> ProgramType {
        ProgramType::new((self.b() >> 5) as u8)
    }

    /// Group-specific bits (block B bits 4..0)
    #[must_use]
    pub const fn group_bits(&self) -> u8 {
        (self.b() & 0x1F) as u8
    }

    /// Test a single bit of block B
    #[must_use]
    pub const fn b_bit(&self, bit: u8) -> bool {
        (self.b() >> bit) & 1 != 0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Group {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{=u16:04X} {=u16:04X} {=u16:04X} {=u16:04X}",
            self.0[0],
            self.0[1],
            self.0[2],
            self.0[3]
        );
    }
}

/// Group version
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Version {
    /// Version A: block C carries data
    A,
    /// Version B: block C repeats the PI code
    B,
}

impl Version {
    /// Wire bit (0 = A, 1 = B)
    #[must_use]
    pub const fn bit(self) -> u8 {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::B => f.write_str("B"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Version {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::A => defmt::write!(f, "A"),
            Self::B => defmt::write!(f, "B"),
        }
    }
}

/// Group type number plus version, e.g. 11A
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GroupType {
    number: u8,
    version: Version,
}

impl GroupType {
    /// Create a group type; the number is masked to 4 bits
    #[must_use]
    pub const fn new(number: u8, version: Version) -> Self {
        Self {
            number: number & 0x0F,
            version,
        }
    }

    /// Decode the 5-bit application group type code used by ODA announcements
    ///
    /// Bits 4..1 are the type number and bit 0 the version.
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        let version = if code & 1 == 0 { Version::A } else { Version::B };
        Self::new((code >> 1) & 0x0F, version)
    }

    /// Type number (0-15)
    #[must_use]
    pub const fn number(self) -> u8 {
        self.number
    }

    /// Version
    #[must_use]
    pub const fn version(self) -> Version {
        self.version
    }
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.version)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for GroupType {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=u8}{}", self.number, self.version);
    }
}

/// Decoder selected for a group
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupKind {
    /// 0A / 0B: basic tuning and switching information
    Basic(Version),
    /// 2A / 2B: RadioText
    RadioText(Version),
    /// 3A: open-data application announcement
    OdaAnnouncement,
    /// 4A: clock time and date
    ClockTime,
    /// The group type currently assigned to RadioText-Plus
    RadioTextPlus,
    /// Anything else; consumed without effect
    Unsupported(GroupType),
}

impl GroupKind {
    /// Classify a group
    ///
    /// `rt_plus` is the group type RadioText-Plus is currently carried in.
    /// Fixed assignments take precedence over the RadioText-Plus one.
    #[must_use]
    pub const fn classify(group: &Group, rt_plus: GroupType) -> Self {
        let number = group.type_number();
        let version = group.version();
        match (number, version) {
            (0, v) => Self::Basic(v),
            (2, v) => Self::RadioText(v),
            (3, Version::A) => Self::OdaAnnouncement,
            (4, Version::A) => Self::ClockTime,
            _ if number == rt_plus.number && version.bit() == rt_plus.version.bit() => {
                Self::RadioTextPlus
            }
            _ => Self::Unsupported(GroupType::new(number, version)),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for GroupKind {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Basic(v) => defmt::write!(f, "0{}", v),
            Self::RadioText(v) => defmt::write!(f, "2{}", v),
            Self::OdaAnnouncement => defmt::write!(f, "3A"),
            Self::ClockTime => defmt::write!(f, "4A"),
            Self::RadioTextPlus => defmt::write!(f, "RT+"),
            Self::Unsupported(t) => defmt::write!(f, "unsupported {}", t),
        }
    }
}
