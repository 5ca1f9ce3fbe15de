//! Frame types and implementations.
//!
//! An ID3v2 tag is primarily made up of chunks of data, called "frames".
//! Frames are highly structured and can contain a variety of information
//! about the audio, from simple text to audio adjustments and binary data.
//! Every frame schema the four tag dialects define gets its own body type
//! here, collected into the [`FrameBody`] union; identifiers outside that
//! set are skipped during parsing and reported as diagnostics.

pub mod audio;
pub mod bin;
pub mod comments;
pub(crate) mod encoding;
pub mod file;
pub mod lang;
pub mod lyrics;
pub mod owner;
pub mod stats;
pub mod text;
pub mod time;
pub mod url;

pub use crate::core::string::Encoding;

pub use audio::{
    AudioEncryptionFrame, BufferSizeFrame, Equalization2Frame, EqualizationFrame,
    MpegLookupFrame, RelativeVolume2Frame, RelativeVolumeFrame, ReverbFrame,
};
pub use bin::{
    BinaryFrame, EncryptedMetaFrame, EncryptionMethodFrame, FileIdFrame, GroupIdFrame,
    PrivateFrame,
};
pub use comments::CommentFrame;
pub use file::{ObjectFrame, PictureFrame, PictureType};
pub use lang::Language;
pub use lyrics::SyncedLyricsFrame;
pub use owner::{CommercialFrame, OwnershipFrame, ReceivedAs, TermsOfUseFrame};
pub use stats::{PlayCountFrame, PopularimeterFrame};
pub use text::{CreditsFrame, TextFrame, UserTextFrame};
pub use time::{TimestampFormat, TimestampFrame};
pub use url::{LinkedFrame, UrlFrame, UserUrlFrame};

use std::fmt::{self, Display, Formatter};

/// A single decoded frame: its identifier as written in the tag, the frame
/// header flags where the dialect has them, and the typed body.
#[derive(Clone, Debug)]
pub struct Frame {
    label: String,
    flags: Option<FrameFlags>,
    body: FrameBody,
}

impl Frame {
    pub(crate) fn new(label: String, flags: Option<FrameFlags>, body: FrameBody) -> Self {
        Frame { label, flags, body }
    }

    /// The frame identifier: four characters in ID3v2.3/v2.4, three in
    /// ID3v2.2, and a field name for the fixed records of ID3v1.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn flags(&self) -> Option<&FrameFlags> {
        self.flags.as_ref()
    }

    pub fn body(&self) -> &FrameBody {
        &self.body
    }

    pub fn into_body(self) -> FrameBody {
        self.body
    }
}

impl Display for Frame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        self.body.fmt(f)
    }
}

/// The decoded frame header flag word of ID3v2.3 and ID3v2.4.
///
/// Flags that attach extra bytes to the frame carry them here, pulled out of
/// the body before the schema decoder runs. A payload field is populated
/// exactly when its bit is set in the raw word.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameFlags {
    raw: u16,
    pub tag_alter_preserve: bool,
    pub file_alter_preserve: bool,
    pub read_only: bool,
    pub compressed: bool,
    pub unsync: bool,
    pub group_id: Option<u8>,
    pub encryption_method: Option<u8>,
    /// The decompressed size in ID3v2.3, or the data length indicator in
    /// ID3v2.4.
    pub data_length: Option<u32>,
}

impl FrameFlags {
    pub(crate) fn with_raw(raw: u16) -> Self {
        FrameFlags {
            raw,
            ..Self::default()
        }
    }

    /// The flag word exactly as it appeared in the frame header.
    pub fn raw(&self) -> u16 {
        self.raw
    }
}

/// Every frame body the decoder can produce.
///
/// Most schemas are shared across tag versions under different identifiers,
/// so the variants are named for their shape rather than any one identifier.
#[derive(Clone, Debug)]
pub enum FrameBody {
    Text(TextFrame),
    UserText(UserTextFrame),
    Url(UrlFrame),
    UserUrl(UserUrlFrame),
    Credits(CreditsFrame),
    Comment(CommentFrame),
    TermsOfUse(TermsOfUseFrame),
    SyncedLyrics(SyncedLyricsFrame),
    Picture(PictureFrame),
    Object(ObjectFrame),
    PlayCount(PlayCountFrame),
    Popularimeter(PopularimeterFrame),
    FileId(FileIdFrame),
    EncryptedMeta(EncryptedMetaFrame),
    AudioEncryption(AudioEncryptionFrame),
    Linked(LinkedFrame),
    RelativeVolume(RelativeVolumeFrame),
    RelativeVolume2(RelativeVolume2Frame),
    Equalization(EqualizationFrame),
    Equalization2(Equalization2Frame),
    Reverb(ReverbFrame),
    MpegLookup(MpegLookupFrame),
    Timestamp(TimestampFrame),
    BufferSize(BufferSizeFrame),
    Ownership(OwnershipFrame),
    Commercial(CommercialFrame),
    EncryptionMethod(EncryptionMethodFrame),
    GroupId(GroupIdFrame),
    Private(PrivateFrame),
    Binary(BinaryFrame),
    /// A fixed-width ISO-8859-1 field from an ID3v1 record.
    V1Text(String),
    /// A single-byte field from an ID3v1 record.
    V1Byte(u8),
}

impl FrameBody {
    /// The text of a [`Text`](FrameBody::Text) or
    /// [`V1Text`](FrameBody::V1Text) body, if this is one.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(frame) => Some(frame.text()),
            Self::V1Text(text) => Some(text),
            _ => None,
        }
    }
}

impl Display for FrameBody {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Text(frame) => frame.fmt(f),
            Self::UserText(frame) => frame.fmt(f),
            Self::Url(frame) => frame.fmt(f),
            Self::UserUrl(frame) => frame.fmt(f),
            Self::Credits(frame) => frame.fmt(f),
            Self::Comment(frame) => frame.fmt(f),
            Self::TermsOfUse(frame) => frame.fmt(f),
            Self::SyncedLyrics(frame) => frame.fmt(f),
            Self::Picture(frame) => frame.fmt(f),
            Self::Object(frame) => frame.fmt(f),
            Self::PlayCount(frame) => frame.fmt(f),
            Self::Popularimeter(frame) => frame.fmt(f),
            Self::FileId(frame) => frame.fmt(f),
            Self::EncryptedMeta(frame) => frame.fmt(f),
            Self::AudioEncryption(frame) => frame.fmt(f),
            Self::Linked(frame) => frame.fmt(f),
            Self::RelativeVolume(frame) => frame.fmt(f),
            Self::RelativeVolume2(frame) => frame.fmt(f),
            Self::Equalization(frame) => frame.fmt(f),
            Self::Equalization2(frame) => frame.fmt(f),
            Self::Reverb(frame) => frame.fmt(f),
            Self::MpegLookup(frame) => frame.fmt(f),
            Self::Timestamp(frame) => frame.fmt(f),
            Self::BufferSize(frame) => frame.fmt(f),
            Self::Ownership(frame) => frame.fmt(f),
            Self::Commercial(frame) => frame.fmt(f),
            Self::EncryptionMethod(frame) => frame.fmt(f),
            Self::GroupId(frame) => frame.fmt(f),
            Self::Private(frame) => frame.fmt(f),
            Self::Binary(frame) => frame.fmt(f),
            Self::V1Text(text) => text.fmt(f),
            Self::V1Byte(byte) => byte.fmt(f),
        }
    }
}
