//! RadioText (2A / 2B)
//!
//! 2A groups carry four characters per address (64 total), 2B groups two
//! (32 total). A carriage return ends the message early. Two committed
//! texts are kept, one per value of the A/B flip flag.

use super::group::{Group, Version};
use super::text::RdsText;
use crate::config::{RT_2B_LEN, RT_LEN};

/// Message terminator
const CARRIAGE_RETURN: u8 = b'\r';

/// Committed RadioText
pub type RadioTextString = RdsText<RT_LEN>;

/// The A/B flip flag distinguishing consecutive messages
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAb {
    /// Flag clear
    A,
    /// Flag set
    B,
}

impl TextAb {
    const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TextAb {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::A => defmt::write!(f, "A"),
            Self::B => defmt::write!(f, "B"),
        }
    }
}

/// RadioText reassembly state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RadioTextDecoder {
    scratch: [u8; RT_LEN],
    scratch_flag: Option<TextAb>,
    committed: [Option<RadioTextString>; 2],
    latest: Option<TextAb>,
}

impl RadioTextDecoder {
    /// Create an empty decoder
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scratch: [0; RT_LEN],
            scratch_flag: None,
            committed: [None, None],
            latest: None,
        }
    }

    /// Apply a 2A or 2B group
    ///
    /// Returns the flag of the message committed by this group, if any.
    pub fn apply(&mut self, group: &Group) -> Option<TextAb> {
        let flag = if group.b_bit(4) { TextAb::B } else { TextAb::A };
        if self.scratch_flag.is_some_and(|current| current != flag) {
            // A new message started; drop whatever the old one left behind
            self.scratch = [0; RT_LEN];
            trace!("RT flip, scratch cleared");
        }
        self.scratch_flag = Some(flag);

        let address = usize::from(group.b() & 0xF);
        let [c0, c1] = group.c().to_be_bytes();
        let [d0, d1] = group.d().to_be_bytes();
        let payload = [c0, c1, d0, d1];
        let (chars, mut index, capacity) = match group.version() {
            Version::A => (&payload[..], address * 4, RT_LEN),
            Version::B => (&payload[2..], address * 2, RT_2B_LEN),
        };

        let mut finished = false;
        for &ch in chars {
            if ch == CARRIAGE_RETURN {
                self.scratch[index] = 0;
                finished = true;
                break;
            }
            self.scratch[index] = ch;
            index += 1;
            if index == capacity {
                finished = true;
                break;
            }
        }

        if !finished {
            return None;
        }
        self.committed[flag.index()] = Some(RadioTextString::from_raw(&self.scratch[..capacity]));
        self.latest = Some(flag);
        debug!("RT {} committed", flag);
        Some(flag)
    }

    /// Committed text for one flip-flag value
    #[must_use]
    pub fn text(&self, flag: TextAb) -> Option<&RadioTextString> {
        self.committed[flag.index()].as_ref()
    }

    /// Most recently committed text
    #[must_use]
    pub fn latest(&self) -> Option<&RadioTextString> {
        self.latest.and_then(|flag| self.text(flag))
    }

    /// Flag of the most recently committed text
    #[must_use]
    pub const fn latest_flag(&self) -> Option<TextAb> {
        self.latest
    }
}

impl Default for RadioTextDecoder {
    fn default() -> Self {
        Self::new()
    }
}
