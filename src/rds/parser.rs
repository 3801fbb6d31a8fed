//! RDS parser state
//!
//! Aggregates the per-group decoders. Each group commits PI, PTY and TP,
//! then goes to exactly one decoder. Decoders reassemble in private
//! scratch buffers and only publish complete values, so anything read
//! from here is either whole or absent.

use core::fmt;

use heapless::Vec;

use super::clock::ClockTime;
use super::group::{Group, GroupKind, GroupType, Version};
use super::program::{ProgramId, ProgramType};
use super::ps::{DecoderIdentification, MusicSpeech, ProgramServiceDecoder, PsName};
use super::radiotext::{RadioTextDecoder, RadioTextString, TextAb};
use super::rtplus::{RtPlusDecoder, RtPlusTag};
use super::text::RdsText;
use crate::config::{AF_LIST_LEN, RT_LEN, RT_PLUS_AID, RT_PLUS_DEFAULT_GROUP};
use crate::types::Frequency;

/// RDS decoder state for one station
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RdsParser {
    program_id: Option<ProgramId>,
    program_type: ProgramType,
    traffic_program: bool,
    ps: ProgramServiceDecoder,
    radio_text: RadioTextDecoder,
    clock: Option<ClockTime>,
    rt_plus: RtPlusDecoder,
    rt_plus_group: GroupType,
    groups: u32,
}

impl RdsParser {
    /// Create a parser with nothing received
    #[must_use]
    pub const fn new() -> Self {
        Self {
            program_id: None,
            program_type: ProgramType::new(0),
            traffic_program: false,
            ps: ProgramServiceDecoder::new(),
            radio_text: RadioTextDecoder::new(),
            clock: None,
            rt_plus: RtPlusDecoder::new(),
            rt_plus_group: GroupType::new(RT_PLUS_DEFAULT_GROUP, Version::A),
            groups: 0,
        }
    }

    /// Forget everything, committed and in progress
    ///
    /// Call on every frequency change so one station's data never leaks
    /// into the next.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Consume one group
    ///
    /// Returns the decoder the group was routed to.
    pub fn update(&mut self, group: &Group) -> GroupKind {
        self.groups = self.groups.wrapping_add(1);
        self.program_id = Some(group.program_id());
        self.program_type = group.program_type();
        self.traffic_program = group.traffic_program();

        let kind = GroupKind::classify(group, self.rt_plus_group);
        match kind {
            GroupKind::Basic(_) => {
                self.ps.apply(group);
            }
            GroupKind::RadioText(_) => {
                self.radio_text.apply(group);
            }
            GroupKind::OdaAnnouncement => self.apply_oda(group),
            GroupKind::ClockTime => {
                if let Some(time) = ClockTime::decode(group) {
                    debug!("CT {}", time);
                    self.clock = Some(time);
                }
            }
            GroupKind::RadioTextPlus => {
                self.rt_plus.apply(group, self.radio_text.latest());
            }
            GroupKind::Unsupported(_) => {}
        }
        kind
    }

    fn apply_oda(&mut self, group: &Group) {
        if group.d() != RT_PLUS_AID {
            return;
        }
        let code = group.group_bits();
        // Code 0 means the application is not carried in groups
        if code == 0 {
            return;
        }
        let target = GroupType::from_code(code);
        if target != self.rt_plus_group {
            info!("RT+ carried in {}", target);
            self.rt_plus_group = target;
        }
    }

    /// Program identification of the latest group
    #[must_use]
    pub const fn program_id(&self) -> Option<ProgramId> {
        self.program_id
    }

    /// Program type of the latest group
    #[must_use]
    pub const fn program_type(&self) -> ProgramType {
        self.program_type
    }

    /// Traffic program flag of the latest group
    #[must_use]
    pub const fn traffic_program(&self) -> bool {
        self.traffic_program
    }

    /// Traffic announcement switch
    #[must_use]
    pub const fn traffic_announcement(&self) -> Option<bool> {
        self.ps.traffic_announcement()
    }

    /// Music/speech switch
    #[must_use]
    pub const fn music_speech(&self) -> Option<MusicSpeech> {
        self.ps.music_speech()
    }

    /// Decoder identification
    #[must_use]
    pub const fn decoder_id(&self) -> Option<DecoderIdentification> {
        self.ps.decoder_id()
    }

    /// Program-service name, `None` until complete
    #[must_use]
    pub fn program_service(&self) -> Option<&PsName> {
        self.ps.name()
    }

    /// RadioText for one flip-flag value, `None` until complete
    #[must_use]
    pub fn radio_text(&self, flag: TextAb) -> Option<&RadioTextString> {
        self.radio_text.text(flag)
    }

    /// Most recently completed RadioText
    #[must_use]
    pub fn latest_radio_text(&self) -> Option<&RadioTextString> {
        self.radio_text.latest()
    }

    /// Last valid clock time
    #[must_use]
    pub const fn clock_time(&self) -> Option<&ClockTime> {
        self.clock.as_ref()
    }

    /// RT+ tag descriptors
    #[must_use]
    pub const fn rt_plus_tags(&self) -> &[Option<RtPlusTag>; 2] {
        self.rt_plus.tags()
    }

    /// Title from RT+ (possibly empty)
    #[must_use]
    pub const fn title(&self) -> &RdsText<RT_LEN> {
        self.rt_plus.title()
    }

    /// Artist from RT+ (possibly empty)
    #[must_use]
    pub const fn artist(&self) -> &RdsText<RT_LEN> {
        self.rt_plus.artist()
    }

    /// Group type RT+ is currently expected in
    #[must_use]
    pub const fn rt_plus_group(&self) -> GroupType {
        self.rt_plus_group
    }

    /// Alternative frequencies
    pub fn alt_frequencies(&self) -> impl Iterator<Item = Frequency> + '_ {
        self.ps.alt_frequencies()
    }

    /// Groups consumed since the last reset
    #[must_use]
    pub const fn group_count(&self) -> u32 {
        self.groups
    }

    /// Copy of everything committed
    #[must_use]
    pub fn snapshot(&self) -> RdsSnapshot {
        RdsSnapshot {
            program_id: self.program_id,
            program_type: self.program_type,
            traffic_program: self.traffic_program,
            traffic_announcement: self.traffic_announcement(),
            music_speech: self.music_speech(),
            decoder_id: self.decoder_id(),
            program_service: self.program_service().cloned(),
            radio_text: [
                self.radio_text(TextAb::A).cloned(),
                self.radio_text(TextAb::B).cloned(),
            ],
            latest_text: self.radio_text.latest_flag(),
            clock: self.clock,
            rt_plus_tags: *self.rt_plus_tags(),
            title: self.title().clone(),
            artist: self.artist().clone(),
            alt_frequencies: self.alt_frequencies().collect(),
        }
    }
}

impl Default for RdsParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Committed RDS data, detached from the parser
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RdsSnapshot {
    /// Program identification
    pub program_id: Option<ProgramId>,
    /// Program type
    pub program_type: ProgramType,
    /// Traffic program flag
    pub traffic_program: bool,
    /// Traffic announcement switch
    pub traffic_announcement: Option<bool>,
    /// Music/speech switch
    pub music_speech: Option<MusicSpeech>,
    /// Decoder identification
    pub decoder_id: Option<DecoderIdentification>,
    /// Program-service name
    pub program_service: Option<PsName>,
    /// RadioText indexed by flip flag (A, B)
    pub radio_text: [Option<RadioTextString>; 2],
    /// Flag of the most recently completed RadioText
    pub latest_text: Option<TextAb>,
    /// Last valid clock time
    pub clock: Option<ClockTime>,
    /// RT+ tag descriptors
    pub rt_plus_tags: [Option<RtPlusTag>; 2],
    /// RT+ title
    pub title: RdsText<RT_LEN>,
    /// RT+ artist
    pub artist: RdsText<RT_LEN>,
    /// Alternative frequencies
    pub alt_frequencies: Vec<Frequency, AF_LIST_LEN>,
}

impl fmt::Display for RdsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.program_id {
            Some(pi) => write!(f, "PI: {pi}")?,
            None => f.write_str("PI: Unknown")?,
        }
        write!(f, ", PTY: {}, TP: {}", self.program_type, u8::from(self.traffic_program))?;
        if let Some(ta) = self.traffic_announcement {
            write!(f, ", TA: {}", u8::from(ta))?;
        }
        if let Some(ms) = self.music_speech {
            write!(f, ", MS: {}", u8::from(ms == MusicSpeech::Music))?;
        }
        f.write_str("\n")?;

        match &self.program_service {
            Some(ps) => writeln!(f, "  PS: {ps}")?,
            None => writeln!(f, "  PS: Not available")?,
        }
        if let Some(rt) = &self.radio_text[0] {
            writeln!(f, "  RT-A: {rt}")?;
        }
        if let Some(rt) = &self.radio_text[1] {
            writeln!(f, "  RT-B: {rt}")?;
        }
        match &self.clock {
            Some(ct) => writeln!(f, "  Time: {ct}")?,
            None => writeln!(f, "  Time: Not available")?,
        }
        if !self.title.is_empty() {
            writeln!(f, "  Title: {}", self.title)?;
        }
        if !self.artist.is_empty() {
            writeln!(f, "  Artist: {}", self.artist)?;
        }
        Ok(())
    }
}
