//! ID3v1 and ID3v1.1 trailer decoding.
//!
//! The original ID3 "tag" is a fixed 128-byte record at the very end of the
//! file: no frames, no encodings, just padded ISO-8859-1 fields. ID3v1.1
//! later carved the last two comment bytes into a separator and a track
//! number. To keep the rest of the crate uniform, the fields are surfaced as
//! frames under their field names.

use crate::core::io::BufStream;
use crate::core::string::{self, Encoding};
use crate::err::{ParseError, ParseResult};
use crate::frame_map::FrameMap;
use crate::frames::{Frame, FrameBody};
use crate::tag::{Tag, Version};

pub(crate) const ID_TRAILER: &[u8] = b"TAG";

pub(crate) fn parse(data: &[u8]) -> ParseResult<Tag> {
    let mut stream = BufStream::new(data);

    if stream.slice(3)? != ID_TRAILER {
        return Err(ParseError::MissingIdentifier);
    }

    let songname = read_field(&mut stream, 30)?;
    let artist = read_field(&mut stream, 30)?;
    let album = read_field(&mut stream, 30)?;
    let year = read_field(&mut stream, 4)?;

    let comment_raw: [u8; 30] = stream.read_array()?;
    let genre = stream.read_u8()?;

    // A zeroed separator before the last comment byte marks an ID3v1.1
    // record, which stores the track number there instead of comment text.
    let (version, comment, track) = if comment_raw[28] == 0 {
        (
            Version::V11,
            strip_field(&comment_raw[..28]),
            Some(comment_raw[29]),
        )
    } else {
        (Version::V1, strip_field(&comment_raw), None)
    };

    let mut frames = FrameMap::new();

    add_text(&mut frames, "songname", songname);
    add_text(&mut frames, "artist", artist);
    add_text(&mut frames, "album", album);
    add_text(&mut frames, "year", year);
    add_text(&mut frames, "comment", comment);

    if let Some(track) = track {
        frames.add(Frame::new(
            String::from("track_number"),
            None,
            FrameBody::V1Byte(track),
        ));
    }

    frames.add(Frame::new(String::from("genre"), None, FrameBody::V1Byte(genre)));

    Ok(Tag {
        version,
        flags: None,
        ext_header: None,
        frames,
    })
}

fn add_text(frames: &mut FrameMap, label: &str, text: String) {
    frames.add(Frame::new(label.to_string(), None, FrameBody::V1Text(text)));
}

fn read_field(stream: &mut BufStream, n: usize) -> ParseResult<String> {
    Ok(strip_field(stream.slice(n)?))
}

fn strip_field(raw: &[u8]) -> String {
    // Writers fill the fixed fields out with trailing NULs, which aren't
    // part of the text.
    let end = raw
        .iter()
        .rposition(|&byte| byte != 0)
        .map_or(0, |pos| pos + 1);

    string::decode(Encoding::Latin1, &raw[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(comment_tail: [u8; 2]) -> Vec<u8> {
        let mut data = Vec::new();

        data.extend(b"TAG");
        data.extend(b"Ever Failing Light\0\0\0\0\0\0\0\0\0\0\0\0");
        data.extend(b"Worriedaboutsatan\0\0\0\0\0\0\0\0\0\0\0\0\0");
        data.extend(b"Revenant\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0\0");
        data.extend(b"2016");
        data.extend(b"A 28 byte comment padding!\0\0");
        data.extend(comment_tail);
        data.push(86);

        assert_eq!(data.len(), 128);

        data
    }

    #[test]
    fn parse_v1_1() {
        let tag = parse(&record([0x00, 0x05])).unwrap();

        assert_eq!(tag.version(), Version::V11);
        assert!(tag.flags().is_none());

        let frames = tag.frames();
        assert_eq!(frames["songname"][0].to_string(), "Ever Failing Light");
        assert_eq!(frames["artist"][0].to_string(), "Worriedaboutsatan");
        assert_eq!(frames["album"][0].to_string(), "Revenant");
        assert_eq!(frames["year"][0].to_string(), "2016");
        assert_eq!(frames["comment"][0].to_string(), "A 28 byte comment padding!");

        assert!(matches!(
            frames["track_number"][0].body(),
            FrameBody::V1Byte(5)
        ));
        assert!(matches!(frames["genre"][0].body(), FrameBody::V1Byte(86)));
    }

    #[test]
    fn parse_v1() {
        // A non-zero separator makes the tail part of a 30-byte comment.
        let tag = parse(&record([b'!', b'?'])).unwrap();

        assert_eq!(tag.version(), Version::V1);
        assert!(!tag.frames().contains("track_number"));
        assert_eq!(
            tag.frames()["comment"][0].to_string(),
            "A 28 byte comment padding!\0\0!?"
        );
    }

    #[test]
    fn parse_missing_magic() {
        let mut data = record([0x00, 0x05]);
        data[0] = b'X';

        assert_eq!(parse(&data).unwrap_err(), ParseError::MissingIdentifier);
        assert_eq!(parse(b"TA").unwrap_err(), ParseError::Underflow);
    }
}
