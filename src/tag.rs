//! The unified tag model and the parsing entry points.

use crate::err::{ParseError, ParseResult};
use crate::frame_map::FrameMap;
use crate::id3v2::header::{ExtendedHeader, TagFlags};
use crate::{id3v1, id3v2};
use std::fmt::{self, Display, Formatter};

/// The tag dialects quaver decodes.
///
/// The dialect has to be picked by the caller, since an ID3v1 record sits in
/// the last 128 bytes of a file while ID3v2 tags start at the front. Use
/// [`probe`] when the input should speak for itself.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Version {
    V1,
    V11,
    V22,
    V23,
    V24,
}

impl Display for Version {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::V1 => write![f, "ID3v1"],
            Self::V11 => write![f, "ID3v1.1"],
            Self::V22 => write![f, "ID3v2.2"],
            Self::V23 => write![f, "ID3v2.3"],
            Self::V24 => write![f, "ID3v2.4"],
        }
    }
}

/// A fully decoded tag.
///
/// Everything in a `Tag` is built during the parse and immutable afterwards.
#[derive(Clone, Debug)]
pub struct Tag {
    pub(crate) version: Version,
    pub(crate) flags: Option<TagFlags>,
    pub(crate) ext_header: Option<ExtendedHeader>,
    pub(crate) frames: FrameMap,
}

impl Tag {
    /// The dialect this tag was actually decoded as. Parsing an ID3v1 block
    /// reports here whether the record used the v1.1 comment split.
    pub fn version(&self) -> Version {
        self.version
    }

    /// The decoded tag header flags. ID3v1 records have none.
    pub fn flags(&self) -> Option<&TagFlags> {
        self.flags.as_ref()
    }

    /// The extended header, when the tag declared one.
    pub fn ext_header(&self) -> Option<&ExtendedHeader> {
        self.ext_header.as_ref()
    }

    pub fn frames(&self) -> &FrameMap {
        &self.frames
    }

    pub fn into_frames(self) -> FrameMap {
        self.frames
    }
}

/// How the parser reacts to a frame body it cannot decode.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParseConfig {
    /// When set, a malformed frame body is dropped and parsing moves on to
    /// the next frame instead of failing the whole tag. Header problems are
    /// always fatal.
    pub lenient: bool,
}

/// A receiver for the conditions a parse can shrug off.
///
/// Unknown frame identifiers are not errors, and in lenient mode neither are
/// malformed frame bodies, so they are reported here instead. The default
/// implementations ignore everything.
pub trait DiagnosticSink {
    /// An identifier with no known schema was skipped.
    fn unknown_frame(&mut self, label: &str) {
        let _ = label;
    }

    /// A frame was dropped under [`ParseConfig::lenient`].
    fn dropped_frame(&mut self, label: &str, error: &ParseError) {
        let _ = (label, error);
    }
}

/// The default sink: discards every diagnostic.
pub struct Discard;

impl DiagnosticSink for Discard {}

/// Decode a tag of the given dialect from `data`, failing on the first
/// malformed frame.
pub fn parse(data: &[u8], version: Version) -> ParseResult<Tag> {
    parse_with(data, version, &ParseConfig::default(), &mut Discard)
}

/// Decode a tag with explicit error policy and diagnostics.
pub fn parse_with(
    data: &[u8],
    version: Version,
    config: &ParseConfig,
    sink: &mut dyn DiagnosticSink,
) -> ParseResult<Tag> {
    match version {
        Version::V1 | Version::V11 => id3v1::parse(data),
        _ => id3v2::parse(data, version, config, sink),
    }
}

/// Look for tag magic in `data` and return the dialect to request from
/// [`parse`], preferring an ID3v2 tag at the front over a trailer.
pub fn probe(data: &[u8]) -> Option<Version> {
    if data.len() >= 10 && &data[0..3] == crate::id3v2::header::ID_HEADER {
        match data[3] {
            2 => return Some(Version::V22),
            3 => return Some(Version::V23),
            4 => return Some(Version::V24),
            _ => {}
        }
    }

    if data.len() >= 128 {
        let trailer = &data[data.len() - 128..];

        if &trailer[0..3] == id3v1::ID_TRAILER {
            // The comment separator decides which v1 flavor this is.
            return Some(if trailer[125] == 0 {
                Version::V11
            } else {
                Version::V1
            });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_versions() {
        assert_eq!(probe(b"ID3\x04\x00\x00\x00\x00\x00\x00"), Some(Version::V24));
        assert_eq!(probe(b"ID3\x02\x00\x00\x00\x00\x00\x00"), Some(Version::V22));
        assert_eq!(probe(b"ID3\x09\x00\x00\x00\x00\x00\x00"), None);
        assert_eq!(probe(b"not a tag"), None);

        let mut v1 = vec![0x16; 64];
        v1.extend(b"TAG");
        v1.extend([0; 125]);
        assert_eq!(probe(&v1), Some(Version::V11));

        // A non-zero separator means the comment runs the full 30 bytes.
        v1[64 + 125] = b'!';
        assert_eq!(probe(&v1), Some(Version::V1));
    }
}
