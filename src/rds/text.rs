//! Bounded RDS text
//!
//! RDS strings are byte sequences in the RDS character set with a fixed
//! capacity (8 for the program-service name, 64 for RadioText). A
//! committed text carries an explicit length; "not yet received" is
//! modelled by wrapping it in `Option`, so an available empty string
//! stays distinct from an unavailable one.

use core::fmt;
use heapless::Vec;

/// Fixed-capacity RDS text
#[derive(Clone, PartialEq, Eq, Default)]
pub struct RdsText<const N: usize> {
    bytes: Vec<u8, N>,
}

impl<const N: usize> RdsText<N> {
    /// Create an empty text
    #[must_use]
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Build from a raw buffer, stopping at the first NUL or at capacity
    #[must_use]
    pub fn from_raw(raw: &[u8]) -> Self {
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len()).min(N);
        let mut bytes = Vec::new();
        // `end` never exceeds the capacity
        let _ = bytes.extend_from_slice(&raw[..end]);
        Self { bytes }
    }

    /// Raw characters
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of characters
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when no characters are present
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// View as `&str` when every byte is ASCII-compatible UTF-8
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.bytes).ok()
    }

    /// Copy of `len` characters starting at `start`, clipped to what is present
    #[must_use]
    pub fn slice<const M: usize>(&self, start: usize, len: usize) -> RdsText<M> {
        let begin = start.min(self.bytes.len());
        let end = start.saturating_add(len).min(self.bytes.len());
        RdsText::from_raw(&self.bytes[begin..end])
    }

    /// Printable rendering of each character
    ///
    /// ASCII passes through; control and extended characters show as `?`.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.bytes.iter().map(|&b| {
            if (0x20..0x7F).contains(&b) {
                char::from(b)
            } else {
                '?'
            }
        })
    }
}

impl<const N: usize> PartialEq<str> for RdsText<N> {
    fn eq(&self, other: &str) -> bool {
        self.bytes.as_slice() == other.as_bytes()
    }
}

impl<const N: usize> PartialEq<&str> for RdsText<N> {
    fn eq(&self, other: &&str) -> bool {
        self.bytes.as_slice() == other.as_bytes()
    }
}

impl<const N: usize> fmt::Display for RdsText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use fmt::Write;
        for ch in self.chars() {
            f.write_char(ch)?;
        }
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for RdsText<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{self}\"")
    }
}

#[cfg(feature = "embedded")]
impl<const N: usize> defmt::Format for RdsText<N> {
    fn format(&self, f: defmt::Formatter) {
        match self.as_str() {
            Some(s) => defmt::write!(f, "\"{=str}\"", s),
            None => defmt::write!(f, "{=[u8]}", self.as_bytes()),
        }
    }
}
