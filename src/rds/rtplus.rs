//! RadioText-Plus tags
//!
//! RT+ does not carry text of its own: each group holds two tag
//! descriptors pointing into the RadioText already on air. Title and
//! artist tags are resolved against the latest committed RadioText.
//!
//! ```text
//! block B bit 4        running
//! tag 0: type  C 15..10, start C 9..4,  length C 3..0 + D 15..14
//! tag 1: type  D 13..8,  start D 7..2,  length D 1..0
//! ```

use super::group::Group;
use super::radiotext::RadioTextString;
use super::text::RdsText;
use crate::config::RT_LEN;

/// RT+ content type code
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContentType(pub u8);

impl ContentType {
    /// Placeholder, no content
    pub const DUMMY: Self = Self(0);

    /// ITEM.TITLE
    pub const ITEM_TITLE: Self = Self(1);

    /// ITEM.ALBUM
    pub const ITEM_ALBUM: Self = Self(2);

    /// ITEM.ARTIST
    pub const ITEM_ARTIST: Self = Self(4);
}

#[cfg(feature = "embedded")]
impl defmt::Format for ContentType {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ctype {=u8}", self.0);
    }
}

/// One tag descriptor: a span of the RadioText with a meaning attached
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RtPlusTag {
    /// What the span holds
    pub content_type: ContentType,
    /// First character
    pub start: u8,
    /// Number of characters
    pub length: u8,
}

impl RtPlusTag {
    /// The span lies inside the 64-character RadioText
    #[must_use]
    pub const fn in_bounds(&self) -> bool {
        self.start as usize + self.length as usize <= RT_LEN
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RtPlusTag {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} @{=u8}+{=u8}", self.content_type, self.start, self.length);
    }
}

/// Resolved RT+ metadata
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RtPlusDecoder {
    tags: [Option<RtPlusTag>; 2],
    title: RdsText<RT_LEN>,
    artist: RdsText<RT_LEN>,
}

impl RtPlusDecoder {
    /// Create an empty decoder
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tags: [None, None],
            title: RdsText::new(),
            artist: RdsText::new(),
        }
    }

    /// Unpack both tag descriptors from a group
    #[must_use]
    pub const fn descriptors(group: &Group) -> [RtPlusTag; 2] {
        let c = group.c();
        let d = group.d();
        [
            RtPlusTag {
                content_type: ContentType(((c >> 10) & 0x3F) as u8),
                start: ((c >> 4) & 0x3F) as u8,
                length: (((c & 0x0F) << 2) | ((d >> 14) & 0x03)) as u8,
            },
            RtPlusTag {
                content_type: ContentType(((d >> 8) & 0x3F) as u8),
                start: ((d >> 2) & 0x3F) as u8,
                length: (d & 0x03) as u8,
            },
        ]
    }

    /// Apply an RT+ group against the latest committed RadioText
    pub fn apply(&mut self, group: &Group, radio_text: Option<&RadioTextString>) {
        if !group.b_bit(4) {
            return;
        }

        let empty = RadioTextString::new();
        let source = radio_text.unwrap_or(&empty);

        for (slot, tag) in Self::descriptors(group).into_iter().enumerate() {
            if !tag.in_bounds() {
                warn!("RT+ tag {=usize} out of bounds", slot);
                continue;
            }
            self.tags[slot] = Some(tag);

            let start = usize::from(tag.start);
            let length = usize::from(tag.length);
            if tag.content_type == ContentType::ITEM_TITLE {
                self.title = source.slice(start, length);
                debug!("RT+ title {}", tag);
            } else if tag.content_type == ContentType::ITEM_ARTIST {
                self.artist = source.slice(start, length);
                debug!("RT+ artist {}", tag);
            }
        }
    }

    /// Committed tag descriptors
    #[must_use]
    pub const fn tags(&self) -> &[Option<RtPlusTag>; 2] {
        &self.tags
    }

    /// Current title (empty until a title tag resolves)
    #[must_use]
    pub const fn title(&self) -> &RdsText<RT_LEN> {
        &self.title
    }

    /// Current artist (empty until an artist tag resolves)
    #[must_use]
    pub const fn artist(&self) -> &RdsText<RT_LEN> {
        &self.artist
    }
}

impl Default for RtPlusDecoder {
    fn default() -> Self {
        Self::new()
    }
}
