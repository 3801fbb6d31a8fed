//! Radio Data System decoding
//!
//! Turns the stream of 4-block groups delivered by the tuner into
//! station identity, program-service name, RadioText, clock time and
//! RadioText-Plus metadata, using only fixed-size buffers.

pub mod clock;
pub mod group;
pub mod parser;
pub mod program;
pub mod ps;
pub mod radiotext;
pub mod rtplus;
pub mod shared;
pub mod text;

pub use clock::{mjd_to_date, CalendarDate, ClockTime, UtcOffset};
pub use group::{Group, GroupKind, GroupType, Version};
pub use parser::{RdsParser, RdsSnapshot};
pub use program::{ProgramId, ProgramType};
pub use ps::{DecoderIdentification, MusicSpeech, PsName};
pub use radiotext::{RadioTextString, TextAb};
pub use rtplus::{ContentType, RtPlusTag};
pub use shared::SharedRdsParser;
pub use text::RdsText;
