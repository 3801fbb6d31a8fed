//! Shared types used across the FM/RDS firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;

/// FM broadcast frequency in Hertz with validation
///
/// Represents a valid frequency within the FM broadcast band.
/// The frequency is stored in Hz for precision.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u32);

impl Frequency {
    /// Minimum supported frequency (87.5 MHz)
    pub const MIN_HZ: u32 = 87_500_000;

    /// Maximum supported frequency (108.0 MHz)
    pub const MAX_HZ: u32 = 108_000_000;

    /// Create a new Frequency from Hz, returns None if out of range
    #[must_use]
    pub const fn from_hz(hz: u32) -> Option<Self> {
        if hz >= Self::MIN_HZ && hz <= Self::MAX_HZ {
            Some(Self(hz))
        } else {
            None
        }
    }

    /// Create a new Frequency from kHz
    #[must_use]
    pub const fn from_khz(khz: u32) -> Option<Self> {
        if khz > u32::MAX / 1000 {
            return None;
        }
        Self::from_hz(khz * 1000)
    }

    /// Decode an RDS alternative-frequency code (1..=204)
    ///
    /// Code `n` is 87.5 MHz + n × 100 kHz. Filler, count and LF/MF
    /// marker codes return `None`.
    #[must_use]
    pub const fn from_af_code(code: u8) -> Option<Self> {
        if code == 0 || code > 204 {
            return None;
        }
        Self::from_hz(87_500_000 + code as u32 * 100_000)
    }

    /// Get the frequency in Hz
    #[must_use]
    pub const fn as_hz(self) -> u32 {
        self.0
    }

    /// Get the frequency in kHz (truncated)
    #[must_use]
    pub const fn as_khz(self) -> u32 {
        self.0 / 1000
    }

    /// Whole megahertz and the tenths digit, for display without floats
    #[must_use]
    pub const fn as_mhz_parts(self) -> (u32, u32) {
        (self.0 / 1_000_000, (self.0 / 100_000) % 10)
    }

    /// Step up one channel, wrapping to the bottom of the band
    #[must_use]
    pub const fn step_up(self, band: &FmBand) -> Self {
        let next = self.0 + band.spacing_hz;
        if next > band.top.0 {
            band.bottom
        } else {
            Self(next)
        }
    }

    /// Step down one channel, wrapping to the top of the band
    #[must_use]
    pub const fn step_down(self, band: &FmBand) -> Self {
        if self.0 < band.bottom.0 + band.spacing_hz {
            band.top
        } else {
            Self(self.0 - band.spacing_hz)
        }
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({} Hz)", self.0)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (mhz, tenths) = self.as_mhz_parts();
        write!(f, "{mhz}.{tenths} MHz")
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        let (mhz, tenths) = self.as_mhz_parts();
        defmt::write!(f, "{}.{} MHz", mhz, tenths);
    }
}

/// A tunable band: inclusive bottom/top and channel spacing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FmBand {
    /// Lowest tunable frequency
    pub bottom: Frequency,
    /// Highest tunable frequency
    pub top: Frequency,
    /// Channel spacing in Hz
    pub spacing_hz: u32,
}

impl FmBand {
    /// Check whether a frequency lies inside the band
    #[must_use]
    pub const fn contains(&self, freq: Frequency) -> bool {
        freq.0 >= self.bottom.0 && freq.0 <= self.top.0
    }

    /// Number of channels between `bottom` and `freq`
    #[must_use]
    pub const fn channel_of(&self, freq: Frequency) -> u16 {
        ((freq.0.saturating_sub(self.bottom.0)) / self.spacing_hz) as u16
    }

    /// Frequency of a channel number, `None` if past the top of the band
    #[must_use]
    pub const fn frequency_of(&self, channel: u16) -> Option<Frequency> {
        let hz = self.bottom.0 + channel as u32 * self.spacing_hz;
        if hz > self.top.0 {
            None
        } else {
            Some(Frequency(hz))
        }
    }
}

/// Seek direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeekDirection {
    /// Towards higher frequencies
    Up,
    /// Towards lower frequencies
    Down,
}

#[cfg(feature = "embedded")]
impl defmt::Format for SeekDirection {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Up => defmt::write!(f, "UP"),
            Self::Down => defmt::write!(f, "DOWN"),
        }
    }
}

/// Audio volume (0 = silent, 15 = maximum)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Volume(u8);

impl Volume {
    /// Minimum volume
    pub const MIN: Self = Self(0);

    /// Maximum volume (4-bit DAC gain)
    pub const MAX: Self = Self(15);

    /// Create a volume level, clamped to the valid range
    #[must_use]
    pub const fn new(level: u8) -> Self {
        if level > Self::MAX.0 {
            Self::MAX
        } else {
            Self(level)
        }
    }

    /// Get the raw level
    #[must_use]
    pub const fn level(self) -> u8 {
        self.0
    }

    /// One step louder, saturating at maximum
    #[must_use]
    pub const fn up(self) -> Self {
        Self::new(self.0 + 1)
    }

    /// One step quieter, saturating at zero
    #[must_use]
    pub const fn down(self) -> Self {
        Self(self.0.saturating_sub(1))
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(1)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Volume {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "vol {}", self.0);
    }
}

/// Received signal strength as reported by the tuner
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Rssi(pub u8);

#[cfg(feature = "embedded")]
impl defmt::Format for Rssi {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "RSSI {}", self.0);
    }
}
