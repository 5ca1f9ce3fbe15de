//! ID3v2 tag decoding.
//!
//! The three ID3v2 revisions share a general shape [a header, optional
//! extended header, then a run of frames followed by padding] but differ in
//! nearly every detail: identifier width, size encoding, frame flags, and
//! which preprocessing steps apply. Each revision gets its own frame-header
//! walk here, converging on a shared dispatch into the frame body decoders.

pub mod header;
pub(crate) mod syncdata;

use crate::core::io::BufStream;
use crate::err::{ParseError, ParseResult};
use crate::frame_map::FrameMap;
use crate::frames::{
    AudioEncryptionFrame, BinaryFrame, BufferSizeFrame, CommentFrame, CommercialFrame,
    CreditsFrame, EncryptedMetaFrame, EncryptionMethodFrame, Equalization2Frame,
    EqualizationFrame, FileIdFrame, Frame, FrameBody, FrameFlags, GroupIdFrame, LinkedFrame,
    MpegLookupFrame, ObjectFrame, OwnershipFrame, PictureFrame, PlayCountFrame,
    PopularimeterFrame, PrivateFrame, RelativeVolume2Frame, RelativeVolumeFrame, ReverbFrame,
    SyncedLyricsFrame, TermsOfUseFrame, TextFrame, TimestampFrame, UrlFrame, UserTextFrame,
    UserUrlFrame,
};
use crate::tag::{DiagnosticSink, ParseConfig, Tag, Version};
use header::{ExtendedHeader, TagHeader};
use log::warn;

pub(crate) fn parse(
    data: &[u8],
    version: Version,
    config: &ParseConfig,
    sink: &mut dyn DiagnosticSink,
) -> ParseResult<Tag> {
    let mut stream = BufStream::new(data);
    let header = TagHeader::parse(stream.read_array()?)?;

    let expected = match version {
        Version::V22 => 2,
        Version::V23 => 3,
        _ => 4,
    };

    if header.major() != expected {
        return Err(ParseError::UnsupportedVersion);
    }

    // Everything the tag owns sits in the next tag_size bytes. Frames never
    // read past this, and whatever they leave behind is padding.
    let mut body = stream.slice_stream(header.size())?;

    // Tag-level unsynchronisation covers the whole remainder, extended
    // header included, so it has to be undone before anything else is read.
    let decoded: Vec<u8>;

    if header.flags().unsync {
        decoded = syncdata::decode(body.take_rest());
        body = BufStream::new(&decoded);
    }

    let mut ext_header = None;

    if header.flags().extended {
        ext_header = Some(ExtendedHeader::parse(&mut body, header.major())?);
    }

    let frames = parse_frames(version, header.flags().unsync, &mut body, config, sink)?;

    Ok(Tag {
        version,
        flags: Some(*header.flags()),
        ext_header,
        frames,
    })
}

enum FrameResult {
    Frame(Frame),
    Unknown(String),
}

fn parse_frames(
    version: Version,
    tag_unsync: bool,
    stream: &mut BufStream,
    config: &ParseConfig,
    sink: &mut dyn DiagnosticSink,
) -> ParseResult<FrameMap> {
    let mut frames = FrameMap::new();

    while !stream.is_empty() {
        // A zero byte where an identifier should start means we've walked
        // into the padding, which runs to the end of the tag.
        if stream.peek(0..1)?[0] == 0 {
            break;
        }

        // Read the frame header and carve out the body. Failures here are
        // always fatal, since there is no way to find the next frame.
        let (label, raw_flags, mut body) = match version {
            Version::V22 => {
                let label = read_label(stream, 3)?;
                let size = stream.read_u24()? as usize;

                (label, None, stream.slice_stream(size)?)
            }

            Version::V23 => {
                let label = read_label(stream, 4)?;
                let size = stream.read_u32()? as usize;
                let raw_flags = stream.read_u16()?;

                (label, Some(raw_flags), stream.slice_stream(size)?)
            }

            _ => {
                let label = read_label(stream, 4)?;
                let size = syncdata::read_u28(stream)? as usize;
                let raw_flags = stream.read_u16()?;

                (label, Some(raw_flags), stream.slice_stream(size)?)
            }
        };

        let result = decode_frame(version, tag_unsync, &label, raw_flags, &mut body);

        match result {
            Ok(FrameResult::Frame(frame)) => frames.add(frame),

            Ok(FrameResult::Unknown(label)) => {
                warn!(target: "id3v2", "unknown frame {}, skipping", label);
                sink.unknown_frame(&label);
            }

            Err(err) if config.lenient => {
                warn!(target: "id3v2", "dropping malformed frame {}: {}", label, err);
                sink.dropped_frame(&label, &err);
            }

            Err(err) => return Err(err),
        }
    }

    Ok(frames)
}

fn read_label(stream: &mut BufStream, len: usize) -> ParseResult<String> {
    let raw = stream.slice(len)?;

    for ch in raw {
        // Valid frame IDs can only contain uppercase ASCII chars and numbers.
        if !ch.is_ascii_uppercase() && !ch.is_ascii_digit() {
            return Err(ParseError::Malformed("invalid frame id"));
        }
    }

    Ok(String::from_utf8_lossy(raw).into_owned())
}

fn decode_frame(
    version: Version,
    tag_unsync: bool,
    label: &str,
    raw_flags: Option<u16>,
    stream: &mut BufStream,
) -> ParseResult<FrameResult> {
    match version {
        Version::V22 => dispatch(version, label, None, stream),

        Version::V23 => {
            let flags = read_flags_v3(raw_flags.unwrap_or_default(), stream)?;
            dispatch(version, label, Some(flags), stream)
        }

        _ => decode_frame_v4(label, raw_flags.unwrap_or_default(), tag_unsync, stream),
    }
}

fn decode_frame_v4(
    label: &str,
    raw: u16,
    tag_unsync: bool,
    stream: &mut BufStream,
) -> ParseResult<FrameResult> {
    // Frame-level unsynchronisation covers the flag payloads too, so it has
    // to be undone before anything in the body is read. A globally unsynced
    // tag has already been decoded wholesale.
    let mut body = BufStream::new(stream.take_rest());
    let decoded: Vec<u8>;

    if raw & 0x0002 != 0 && !tag_unsync {
        decoded = syncdata::decode(body.take_rest());
        body = BufStream::new(&decoded);
    }

    let flags = read_flags_v4(raw, &mut body)?;

    dispatch(Version::V24, label, Some(flags), &mut body)
}

fn read_flags_v3(raw: u16, stream: &mut BufStream) -> ParseResult<FrameFlags> {
    let mut flags = FrameFlags::with_raw(raw);

    flags.tag_alter_preserve = raw & 0x8000 != 0;
    flags.file_alter_preserve = raw & 0x4000 != 0;
    flags.read_only = raw & 0x2000 != 0;
    flags.compressed = raw & 0x0080 != 0;

    // The format flags tack extra bytes onto the front of the body, in flag
    // order, all counted by the declared frame size.
    if flags.compressed {
        flags.data_length = Some(stream.read_u32()?);
    }

    if raw & 0x0040 != 0 {
        flags.encryption_method = Some(stream.read_u8()?);
    }

    if raw & 0x0020 != 0 {
        flags.group_id = Some(stream.read_u8()?);
    }

    Ok(flags)
}

fn read_flags_v4(raw: u16, stream: &mut BufStream) -> ParseResult<FrameFlags> {
    let mut flags = FrameFlags::with_raw(raw);

    flags.tag_alter_preserve = raw & 0x4000 != 0;
    flags.file_alter_preserve = raw & 0x2000 != 0;
    flags.read_only = raw & 0x1000 != 0;
    flags.compressed = raw & 0x0008 != 0;
    flags.unsync = raw & 0x0002 != 0;

    if raw & 0x0040 != 0 {
        flags.group_id = Some(stream.read_u8()?);
    }

    if raw & 0x0004 != 0 {
        flags.encryption_method = Some(stream.read_u8()?);
    }

    // Compression implies a data length even when the indicator bit is unset.
    if raw & 0x0001 != 0 || flags.compressed {
        flags.data_length = Some(syncdata::read_u28(stream)?);
    }

    Ok(flags)
}

fn dispatch(
    version: Version,
    label: &str,
    flags: Option<FrameFlags>,
    stream: &mut BufStream,
) -> ParseResult<FrameResult> {
    // Compressed or encrypted bodies can't be decoded structurally, so they
    // are carried raw, with the flags saying what happened to them.
    if let Some(flags) = &flags {
        if flags.compressed || flags.encryption_method.is_some() {
            let body = FrameBody::Binary(BinaryFrame::parse(stream)?);

            return Ok(FrameResult::Frame(Frame::new(
                label.to_string(),
                Some(*flags),
                body,
            )));
        }
    }

    let body = match version {
        Version::V22 => decode_body_v2(label, stream)?,
        Version::V23 => decode_body_v3(label, stream)?,
        _ => decode_body_v4(label, stream)?,
    };

    Ok(match body {
        Some(body) => FrameResult::Frame(Frame::new(label.to_string(), flags, body)),
        None => FrameResult::Unknown(label.to_string()),
    })
}

fn decode_body_v2(label: &str, stream: &mut BufStream) -> ParseResult<Option<FrameBody>> {
    let body = match label.as_bytes() {
        // Recommended buffer size
        b"BUF" => FrameBody::BufferSize(BufferSizeFrame::parse(stream)?),

        // Play counter
        b"CNT" => FrameBody::PlayCount(PlayCountFrame::parse(stream)?),

        // Comments & unsynchronised lyrics
        b"COM" | b"ULT" => FrameBody::Comment(CommentFrame::parse(stream)?),

        // Audio encryption
        b"CRA" => FrameBody::AudioEncryption(AudioEncryptionFrame::parse(stream)?),

        // Encrypted metadata, which never made it past this revision
        b"CRM" => FrameBody::EncryptedMeta(EncryptedMetaFrame::parse(stream)?),

        // Equalisation
        b"EQU" => FrameBody::Equalization(EqualizationFrame::parse(stream)?),

        // Event timing codes & synchronised tempo codes
        b"ETC" | b"STC" => FrameBody::Timestamp(TimestampFrame::parse(stream)?),

        // General encapsulated object
        b"GEO" => FrameBody::Object(ObjectFrame::parse(stream)?),

        // Involved people list
        b"IPL" => FrameBody::Credits(CreditsFrame::parse(stream)?),

        // Linked information
        b"LNK" => FrameBody::Linked(LinkedFrame::parse(Version::V22, stream)?),

        // Music CD identifier
        b"MCI" => FrameBody::Binary(BinaryFrame::parse(stream)?),

        // MPEG location lookup table
        b"MLL" => FrameBody::MpegLookup(MpegLookupFrame::parse(stream)?),

        // Attached picture
        b"PIC" => FrameBody::Picture(PictureFrame::parse(Version::V22, stream)?),

        // Popularimeter
        b"POP" => FrameBody::Popularimeter(PopularimeterFrame::parse(stream)?),

        // Reverb
        b"REV" => FrameBody::Reverb(ReverbFrame::parse(stream)?),

        // Relative volume adjustment
        b"RVA" => FrameBody::RelativeVolume(RelativeVolumeFrame::parse(Version::V22, stream)?),

        // Synchronised lyrics
        b"SLT" => FrameBody::SyncedLyrics(SyncedLyricsFrame::parse(stream)?),

        // Unique file identifier
        b"UFI" => FrameBody::FileId(FileIdFrame::parse(stream)?),

        // User-defined text & URL
        b"TXX" => FrameBody::UserText(UserTextFrame::parse(stream)?),
        b"WXX" => FrameBody::UserUrl(UserUrlFrame::parse(stream)?),

        // Everything else starting with T or W shares a schema.
        [b'T', ..] => FrameBody::Text(TextFrame::parse(Version::V22, stream)?),
        [b'W', ..] => FrameBody::Url(UrlFrame::parse(stream)?),

        _ => return Ok(None),
    };

    Ok(Some(body))
}

fn decode_body_v3(label: &str, stream: &mut BufStream) -> ParseResult<Option<FrameBody>> {
    let body = match label.as_bytes() {
        // Audio encryption
        b"AENC" => FrameBody::AudioEncryption(AudioEncryptionFrame::parse(stream)?),

        // Attached picture
        b"APIC" => FrameBody::Picture(PictureFrame::parse(Version::V23, stream)?),

        // Comments & unsynchronised lyrics
        b"COMM" | b"USLT" => FrameBody::Comment(CommentFrame::parse(stream)?),

        // Commercial frame
        b"COMR" => FrameBody::Commercial(CommercialFrame::parse(stream)?),

        // Encryption method registration
        b"ENCR" => FrameBody::EncryptionMethod(EncryptionMethodFrame::parse(stream)?),

        // Equalisation
        b"EQUA" => FrameBody::Equalization(EqualizationFrame::parse(stream)?),

        // Event timing codes, synchronised tempo codes & position sync
        b"ETCO" | b"SYTC" | b"POSS" => FrameBody::Timestamp(TimestampFrame::parse(stream)?),

        // General encapsulated object
        b"GEOB" => FrameBody::Object(ObjectFrame::parse(stream)?),

        // Group identification registration
        b"GRID" => FrameBody::GroupId(GroupIdFrame::parse(stream)?),

        // Involved people list
        b"IPLS" => FrameBody::Credits(CreditsFrame::parse(stream)?),

        // Linked information
        b"LINK" => FrameBody::Linked(LinkedFrame::parse(Version::V23, stream)?),

        // Music CD identifier
        b"MCDI" => FrameBody::Binary(BinaryFrame::parse(stream)?),

        // MPEG location lookup table
        b"MLLT" => FrameBody::MpegLookup(MpegLookupFrame::parse(stream)?),

        // Ownership
        b"OWNE" => FrameBody::Ownership(OwnershipFrame::parse(stream)?),

        // Play counter & popularimeter
        b"PCNT" => FrameBody::PlayCount(PlayCountFrame::parse(stream)?),
        b"POPM" => FrameBody::Popularimeter(PopularimeterFrame::parse(stream)?),

        // Private frame
        b"PRIV" => FrameBody::Private(PrivateFrame::parse(stream)?),

        // Recommended buffer size
        b"RBUF" => FrameBody::BufferSize(BufferSizeFrame::parse(stream)?),

        // Relative volume adjustment
        b"RVAD" => FrameBody::RelativeVolume(RelativeVolumeFrame::parse(Version::V23, stream)?),

        // Reverb
        b"RVRB" => FrameBody::Reverb(ReverbFrame::parse(stream)?),

        // Synchronised lyrics
        b"SYLT" => FrameBody::SyncedLyrics(SyncedLyricsFrame::parse(stream)?),

        // Terms of use
        b"USER" => FrameBody::TermsOfUse(TermsOfUseFrame::parse(stream)?),

        // Unique file identifier
        b"UFID" => FrameBody::FileId(FileIdFrame::parse(stream)?),

        // User-defined text & URL
        b"TXXX" => FrameBody::UserText(UserTextFrame::parse(stream)?),
        b"WXXX" => FrameBody::UserUrl(UserUrlFrame::parse(stream)?),

        // Everything else starting with T or W shares a schema.
        [b'T', ..] => FrameBody::Text(TextFrame::parse(Version::V23, stream)?),
        [b'W', ..] => FrameBody::Url(UrlFrame::parse(stream)?),

        _ => return Ok(None),
    };

    Ok(Some(body))
}

fn decode_body_v4(label: &str, stream: &mut BufStream) -> ParseResult<Option<FrameBody>> {
    let body = match label.as_bytes() {
        // Frames revised in this revision, replacing their older shapes
        b"EQU2" => FrameBody::Equalization2(Equalization2Frame::parse(stream)?),
        b"RVA2" => FrameBody::RelativeVolume2(RelativeVolume2Frame::parse(stream)?),

        // Involved people was split into two text-style frames.
        b"TIPL" | b"TMCL" => FrameBody::Credits(CreditsFrame::parse(stream)?),

        b"AENC" => FrameBody::AudioEncryption(AudioEncryptionFrame::parse(stream)?),
        b"APIC" => FrameBody::Picture(PictureFrame::parse(Version::V24, stream)?),
        b"COMM" | b"USLT" => FrameBody::Comment(CommentFrame::parse(stream)?),
        b"COMR" => FrameBody::Commercial(CommercialFrame::parse(stream)?),
        b"ENCR" => FrameBody::EncryptionMethod(EncryptionMethodFrame::parse(stream)?),
        b"ETCO" | b"SYTC" | b"POSS" => FrameBody::Timestamp(TimestampFrame::parse(stream)?),
        b"GEOB" => FrameBody::Object(ObjectFrame::parse(stream)?),
        b"GRID" => FrameBody::GroupId(GroupIdFrame::parse(stream)?),
        b"LINK" => FrameBody::Linked(LinkedFrame::parse(Version::V24, stream)?),
        b"MCDI" => FrameBody::Binary(BinaryFrame::parse(stream)?),
        b"MLLT" => FrameBody::MpegLookup(MpegLookupFrame::parse(stream)?),
        b"OWNE" => FrameBody::Ownership(OwnershipFrame::parse(stream)?),
        b"PCNT" => FrameBody::PlayCount(PlayCountFrame::parse(stream)?),
        b"POPM" => FrameBody::Popularimeter(PopularimeterFrame::parse(stream)?),
        b"PRIV" => FrameBody::Private(PrivateFrame::parse(stream)?),
        b"RBUF" => FrameBody::BufferSize(BufferSizeFrame::parse(stream)?),
        b"RVRB" => FrameBody::Reverb(ReverbFrame::parse(stream)?),
        b"SYLT" => FrameBody::SyncedLyrics(SyncedLyricsFrame::parse(stream)?),
        b"USER" => FrameBody::TermsOfUse(TermsOfUseFrame::parse(stream)?),
        b"UFID" => FrameBody::FileId(FileIdFrame::parse(stream)?),

        b"TXXX" => FrameBody::UserText(UserTextFrame::parse(stream)?),
        b"WXXX" => FrameBody::UserUrl(UserUrlFrame::parse(stream)?),

        // Text frames here can hold multiple NUL-separated values.
        [b'T', ..] => FrameBody::Text(TextFrame::parse(Version::V24, stream)?),
        [b'W', ..] => FrameBody::Url(UrlFrame::parse(stream)?),

        _ => return Ok(None),
    };

    Ok(Some(body))
}
