//! Basic tuning groups (0A / 0B)
//!
//! Reassembles the 8-character program-service name from four addressed
//! 2-character segments and accumulates the decoder-identification bits
//! that ride along with them. Also tracks the traffic-announcement and
//! music/speech switches and, in 0A groups, the alternative frequencies.

use heapless::Vec;

use super::group::{Group, Version};
use super::text::RdsText;
use crate::config::{AF_LIST_LEN, PS_LEN};
use crate::types::Frequency;

/// Number of 2-character segments in a program-service name
const SEGMENTS: u8 = 4;

/// All segment bits set
const ALL_SEGMENTS: u8 = (1 << SEGMENTS) - 1;

/// Program-service name
pub type PsName = RdsText<PS_LEN>;

/// Decoder identification bits
///
/// Bit 0 (d0) arrives with segment 3, bit 3 (d3) with segment 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct DecoderIdentification(u8);

impl DecoderIdentification {
    /// Create from the 4-bit field
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0x0F)
    }

    /// Raw bits (d3..d0)
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// d0: stereo (otherwise mono)
    #[must_use]
    pub const fn stereo(self) -> bool {
        self.0 & 0b0001 != 0
    }

    /// d1: artificial head recording
    #[must_use]
    pub const fn artificial_head(self) -> bool {
        self.0 & 0b0010 != 0
    }

    /// d2: compressed audio
    #[must_use]
    pub const fn compressed(self) -> bool {
        self.0 & 0b0100 != 0
    }

    /// d3: program type changes dynamically
    #[must_use]
    pub const fn dynamic_pty(self) -> bool {
        self.0 & 0b1000 != 0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for DecoderIdentification {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "DI {=u8:04b}", self.0);
    }
}

/// Music/speech switch
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MusicSpeech {
    /// Speech is being broadcast
    Speech,
    /// Music is being broadcast
    Music,
}

#[cfg(feature = "embedded")]
impl defmt::Format for MusicSpeech {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Speech => defmt::write!(f, "speech"),
            Self::Music => defmt::write!(f, "music"),
        }
    }
}

/// Program-service name, DI, TA/MS and AF decoder state
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgramServiceDecoder {
    scratch: [u8; PS_LEN],
    received: u8,
    di_scratch: u8,
    name: Option<PsName>,
    di: Option<DecoderIdentification>,
    traffic_announcement: Option<bool>,
    music_speech: Option<MusicSpeech>,
    alt_freqs: Vec<u8, AF_LIST_LEN>,
}

impl ProgramServiceDecoder {
    /// Create an empty decoder
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scratch: [0; PS_LEN],
            received: 0,
            di_scratch: 0,
            name: None,
            di: None,
            traffic_announcement: None,
            music_speech: None,
            alt_freqs: Vec::new(),
        }
    }

    /// Apply a 0A or 0B group
    ///
    /// Returns true when a complete name was committed.
    pub fn apply(&mut self, group: &Group) -> bool {
        self.traffic_announcement = Some(group.b_bit(4));
        self.music_speech = Some(if group.b_bit(3) {
            MusicSpeech::Music
        } else {
            MusicSpeech::Speech
        });

        if group.version() == Version::A {
            let [f0, f1] = group.c().to_be_bytes();
            self.add_alt_freq(f0);
            self.add_alt_freq(f1);
        }

        let address = group.b() & 0x3;
        let offset = usize::from(address) * 2;
        let [ch0, ch1] = group.d().to_be_bytes();
        self.scratch[offset] = ch0;
        self.scratch[offset + 1] = ch1;

        let di_index = !address & 0x3;
        let di_bit = u8::from(group.b_bit(2));
        self.di_scratch = (self.di_scratch & !(1 << di_index)) | (di_bit << di_index);

        let was_complete = self.received == ALL_SEGMENTS;
        self.received |= 1 << address;
        let complete = self.received == ALL_SEGMENTS;

        // Commit on every segment 3 once all slots have been seen, and on
        // the first group that completes the set in any order
        if complete && (address == 3 || !was_complete) {
            self.name = Some(PsName::from_raw(&self.scratch));
            self.di = Some(DecoderIdentification::from_bits(self.di_scratch));
            debug!("PS committed, DI {=u8}", self.di_scratch);
            true
        } else {
            false
        }
    }

    fn add_alt_freq(&mut self, code: u8) {
        if Frequency::from_af_code(code).is_none() {
            return;
        }
        if self.alt_freqs.contains(&code) {
            return;
        }
        // A full list ignores further entries
        let _ = self.alt_freqs.push(code);
    }

    /// Committed program-service name
    #[must_use]
    pub fn name(&self) -> Option<&PsName> {
        self.name.as_ref()
    }

    /// Committed decoder identification
    #[must_use]
    pub const fn decoder_id(&self) -> Option<DecoderIdentification> {
        self.di
    }

    /// Traffic announcement switch from the latest type-0 group
    #[must_use]
    pub const fn traffic_announcement(&self) -> Option<bool> {
        self.traffic_announcement
    }

    /// Music/speech switch from the latest type-0 group
    #[must_use]
    pub const fn music_speech(&self) -> Option<MusicSpeech> {
        self.music_speech
    }

    /// Alternative frequencies in order of first reception
    pub fn alt_frequencies(&self) -> impl Iterator<Item = Frequency> + '_ {
        self.alt_freqs.iter().filter_map(|&code| Frequency::from_af_code(code))
    }
}

impl Default for ProgramServiceDecoder {
    fn default() -> Self {
        Self::new()
    }
}
