//! Clock time and date (4A)
//!
//! A single group carries the whole timestamp:
//!
//! ```text
//! block B bits 1..0   MJD bits 16..15
//! block C bits 15..1  MJD bits 14..0
//! block C bit 0       hour bit 4
//! block D bits 15..12 hour bits 3..0
//! block D bits 11..6  minute
//! block D bit 5       offset sign (1 = negative)
//! block D bits 4..0   offset magnitude in half hours
//! ```
//!
//! Times are kept in UTC with the broadcast offset alongside; local time
//! is left to the consumer.

use core::fmt;

use super::group::Group;

/// Calendar date
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct CalendarDate {
    /// Year, e.g. 2020
    pub year: u16,
    /// Month (1-12)
    pub month: u8,
    /// Day of month (1-31)
    pub day: u8,
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Local time offset from UTC, in signed half hours
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct UtcOffset(i8);

impl UtcOffset {
    /// Decode the 6-bit field (sign bit 5, magnitude bits 4..0)
    #[must_use]
    pub const fn from_field(field: u8) -> Self {
        let magnitude = (field & 0x1F) as i8;
        if field & 0x20 != 0 {
            Self(-magnitude)
        } else {
            Self(magnitude)
        }
    }

    /// Signed number of half hours
    #[must_use]
    pub const fn half_hours(self) -> i8 {
        self.0
    }

    /// Signed offset in minutes
    #[must_use]
    pub const fn as_minutes(self) -> i16 {
        self.0 as i16 * 30
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.as_minutes();
        let sign = if minutes < 0 { '-' } else { '+' };
        let minutes = minutes.unsigned_abs();
        write!(f, "UTC{sign}{:02}:{:02}", minutes / 60, minutes % 60)
    }
}

/// Decoded clock-time group
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClockTime {
    mjd: u32,
    date: CalendarDate,
    hour: u8,
    minute: u8,
    offset: UtcOffset,
}

impl ClockTime {
    /// Decode a 4A group; `None` when hour or minute is out of range
    #[must_use]
    pub fn decode(group: &Group) -> Option<Self> {
        let (b, c, d) = (group.b(), group.c(), group.d());
        let mjd = (u32::from(b & 0x3) << 15) | u32::from(c >> 1);
        let hour = (((c & 0x1) << 4) | (d >> 12)) as u8;
        let minute = ((d >> 6) & 0x3F) as u8;
        let offset = UtcOffset::from_field((d & 0x3F) as u8);

        if hour >= 24 || minute >= 60 {
            trace!("CT rejected {=u8}:{=u8}", hour, minute);
            return None;
        }

        Some(Self {
            mjd,
            date: mjd_to_date(mjd),
            hour,
            minute,
            offset,
        })
    }

    /// Modified Julian Day
    #[must_use]
    pub const fn mjd(&self) -> u32 {
        self.mjd
    }

    /// UTC date
    #[must_use]
    pub const fn date(&self) -> CalendarDate {
        self.date
    }

    /// UTC hour (0-23)
    #[must_use]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    /// UTC minute (0-59)
    #[must_use]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Broadcast local time offset
    #[must_use]
    pub const fn offset(&self) -> UtcOffset {
        self.offset
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}:{:02} UTC ({})",
            self.date, self.hour, self.minute, self.offset
        )
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for ClockTime {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "{=u16}-{=u8}-{=u8} {=u8}:{=u8} UTC {=i8}/2h",
            self.date.year,
            self.date.month,
            self.date.day,
            self.hour,
            self.minute,
            self.offset.0
        );
    }
}

/// Convert a Modified Julian Day to a Gregorian date
///
/// Integer form of the Julian-day algorithm: every division truncates,
/// with the fractional constants scaled to whole numbers.
#[must_use]
pub const fn mjd_to_date(mjd: u32) -> CalendarDate {
    let jd = mjd + 2_400_001;
    let alpha = (jd * 100 - 186_721_625) / 3_652_425;
    let c = jd + alpha - alpha / 4 + 1525;
    let y = (c * 100 - 12_210) / 36_525;
    let d = 36_525 * y / 100;
    let m = (c - d) * 10_000 / 306_001;

    let day = c - d - 306_001 * m / 10_000;
    let month = if m > 13 { m - 13 } else { m - 1 };
    let year = if month > 2 { y - 4716 } else { y - 4715 };

    CalendarDate {
        year: year as u16,
        month: month as u8,
        day: day as u8,
    }
}
