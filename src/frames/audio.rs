//! Frames that describe how to play the audio back, rather than what it is.

use crate::core::io::BufStream;
use crate::core::string::{self, Encoding};
use crate::err::{ParseError, ParseResult};
use crate::tag::Version;
use std::fmt::{self, Display, Formatter};

/// The relative volume adjustment frame of ID3v2.2 and ID3v2.3.
///
/// The body is a run of equally-sized fields whose width comes from the
/// bits-per-volume byte. Only the front channel pair is mandatory; everything
/// after it shows up only if the tagger kept writing.
#[derive(Clone, Debug)]
pub struct RelativeVolumeFrame {
    /// The raw increment/decrement bits. A set bit means the matching channel
    /// adjusts upwards, a clear bit downwards.
    pub increment: u8,
    pub bits: u8,
    pub right: u64,
    pub left: u64,
    pub peak_right: Option<u64>,
    pub peak_left: Option<u64>,
    pub right_rear: Option<u64>,
    pub left_rear: Option<u64>,
    pub peak_right_rear: Option<u64>,
    pub peak_left_rear: Option<u64>,
    pub center: Option<u64>,
    pub peak_center: Option<u64>,
    pub bass: Option<u64>,
    pub peak_bass: Option<u64>,
}

impl RelativeVolumeFrame {
    pub(crate) fn parse(version: Version, stream: &mut BufStream) -> ParseResult<Self> {
        let increment = stream.read_u8()?;

        // ID3v2.2 only describes front-channel increment bits, while ID3v2.3
        // re-uses the byte with a different bit layout.
        let permitted = if version == Version::V22 { 0x03 } else { 0x21 };

        if increment & !permitted != 0 {
            return Err(ParseError::Malformed("bad increment flags"));
        }

        let bits = stream.read_u8()?;

        if bits == 0 {
            return Err(ParseError::Malformed("zero bits per volume"));
        }

        let len = (usize::from(bits) + 7) / 8;

        let right = stream.read_uint(len)?;
        let left = stream.read_uint(len)?;

        Ok(Self {
            increment,
            bits,
            right,
            left,
            peak_right: next_field(len, stream)?,
            peak_left: next_field(len, stream)?,
            right_rear: next_field(len, stream)?,
            left_rear: next_field(len, stream)?,
            peak_right_rear: next_field(len, stream)?,
            peak_left_rear: next_field(len, stream)?,
            center: next_field(len, stream)?,
            peak_center: next_field(len, stream)?,
            bass: next_field(len, stream)?,
            peak_bass: next_field(len, stream)?,
        })
    }
}

impl Display for RelativeVolumeFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}R, {}L", self.right, self.left]
    }
}

/// Read one more volume field if the body still has one. Leftover bytes that
/// can't fill a whole field mean the frame was cut short.
fn next_field(len: usize, stream: &mut BufStream) -> ParseResult<Option<u64>> {
    if stream.is_empty() {
        return Ok(None);
    }

    if stream.remaining() < len {
        return Err(ParseError::Malformed("truncated volume field"));
    }

    Ok(Some(stream.read_uint(len)?))
}

/// The ID3v2.4 relative volume frame. The per-channel adjustment list is kept
/// undecoded.
#[derive(Clone, Debug)]
pub struct RelativeVolume2Frame {
    pub identification: String,
    pub data: Vec<u8>,
}

impl RelativeVolume2Frame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let identification = string::read_terminated(Encoding::Latin1, stream)?;
        let data = stream.take_rest().to_vec();

        Ok(Self {
            identification,
            data,
        })
    }
}

impl Display for RelativeVolume2Frame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.identification]
    }
}

/// The equalisation frame of ID3v2.2 and ID3v2.3: an adjustment width plus
/// the undecoded curve points.
#[derive(Clone, Debug)]
pub struct EqualizationFrame {
    pub adjustment_bits: u8,
    pub data: Vec<u8>,
}

impl EqualizationFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let adjustment_bits = stream.read_u8()?;
        let data = stream.take_rest().to_vec();

        Ok(Self {
            adjustment_bits,
            data,
        })
    }
}

impl Display for EqualizationFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{} bytes", self.data.len()]
    }
}

/// The ID3v2.4 equalisation frame, which swapped the packed curve for an
/// interpolation method and an identification string.
#[derive(Clone, Debug)]
pub struct Equalization2Frame {
    pub interpolation: u8,
    pub identification: String,
    pub data: Vec<u8>,
}

impl Equalization2Frame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let interpolation = stream.read_u8()?;
        let identification = string::read_terminated(Encoding::Latin1, stream)?;
        let data = stream.take_rest().to_vec();

        Ok(Self {
            interpolation,
            identification,
            data,
        })
    }
}

impl Display for Equalization2Frame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.identification]
    }
}

/// The reverb frame: ten packed knobs nobody has turned since 1999.
#[derive(Clone, Debug)]
pub struct ReverbFrame {
    pub reverb_left: u16,
    pub reverb_right: u16,
    pub bounces_left: u8,
    pub bounces_right: u8,
    pub feedback_left_left: u8,
    pub feedback_left_right: u8,
    pub feedback_right_right: u8,
    pub feedback_right_left: u8,
    pub premix_left_right: u8,
    pub premix_right_left: u8,
}

impl ReverbFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        Ok(Self {
            reverb_left: stream.read_u16()?,
            reverb_right: stream.read_u16()?,
            bounces_left: stream.read_u8()?,
            bounces_right: stream.read_u8()?,
            feedback_left_left: stream.read_u8()?,
            feedback_left_right: stream.read_u8()?,
            feedback_right_right: stream.read_u8()?,
            feedback_right_left: stream.read_u8()?,
            premix_left_right: stream.read_u8()?,
            premix_right_left: stream.read_u8()?,
        })
    }
}

impl Display for ReverbFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}ms L, {}ms R", self.reverb_left, self.reverb_right]
    }
}

/// The MPEG location lookup table, used by players to seek without scanning
/// the whole stream. The reference table itself stays undecoded.
#[derive(Clone, Debug)]
pub struct MpegLookupFrame {
    pub frames_between_refs: u16,
    pub bytes_between_refs: u32,
    pub millis_between_refs: u32,
    pub byte_deviation_bits: u8,
    pub millis_deviation_bits: u8,
    pub data: Vec<u8>,
}

impl MpegLookupFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        Ok(Self {
            frames_between_refs: stream.read_u16()?,
            bytes_between_refs: stream.read_u24()?,
            millis_between_refs: stream.read_u24()?,
            byte_deviation_bits: stream.read_u8()?,
            millis_deviation_bits: stream.read_u8()?,
            data: stream.take_rest().to_vec(),
        })
    }
}

impl Display for MpegLookupFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![
            f,
            "every {} frames / {} bytes / {}ms",
            self.frames_between_refs, self.bytes_between_refs, self.millis_between_refs
        ]
    }
}

/// An audio encryption frame, marking the stream as scrambled and pointing at
/// an unencrypted preview.
#[derive(Clone, Debug)]
pub struct AudioEncryptionFrame {
    pub owner: String,
    pub preview_start: u16,
    pub preview_length: u16,
    pub data: Vec<u8>,
}

impl AudioEncryptionFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let owner = string::read_terminated(Encoding::Latin1, stream)?;

        if owner.is_empty() {
            return Err(ParseError::Malformed("empty owner"));
        }

        Ok(Self {
            owner,
            preview_start: stream.read_u16()?,
            preview_length: stream.read_u16()?,
            data: stream.take_rest().to_vec(),
        })
    }
}

impl Display for AudioEncryptionFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{}", self.owner]
    }
}

/// A recommended buffer size frame for streaming playback.
#[derive(Clone, Debug)]
pub struct BufferSizeFrame {
    pub buffer_size: u32,
    pub embedded_info: bool,
    pub next_tag_offset: Option<u64>,
}

impl BufferSizeFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let buffer_size = stream.read_u24()?;
        let embed = stream.read_u8()?;

        if embed & !0x01 != 0 {
            return Err(ParseError::Malformed("bad embedded info byte"));
        }

        let next_tag_offset = if stream.is_empty() {
            None
        } else {
            Some(stream.read_uint_to_end())
        };

        Ok(Self {
            buffer_size,
            embedded_info: embed != 0,
            next_tag_offset,
        })
    }
}

impl Display for BufferSizeFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{} bytes", self.buffer_size]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RVAD_DATA: &[u8] = b"\x01\x20\
                               \xAB\xCD\xEF\x16\
                               \x01\x02\x04\x08\
                               \x16\x16\x16\x16\
                               \x00\x00\x00\x00\
                               \x00\xFF\x00\xFF\
                               \xFF\x00\xFF\x00\
                               \x61\xFE\xDC\xBA\
                               \x20\x40\x80\x00\
                               \x00\x00\x00\x00\
                               \x00\x00\x10\x10\
                               \x4F\x58\x43\x42\
                               \xFF\xFF\xFF\xFF";

    const RVA_V2_DATA: &[u8] = b"\x02\x10\
                                 \x12\x34\
                                 \x00\x00\
                                 \x16\x16\
                                 \xAB\xCD";

    const RVA2_DATA: &[u8] = b"album\0\
                               \x01\xFC\x00\x10\x1F\x18";

    const EQU2_DATA: &[u8] = b"\x01\
                               album\0\
                               \x01\xF4\x02\x08";

    const RVRB_DATA: &[u8] = b"\x00\xFA\x01\x2C\x04\x08\x10\x20\x30\x40\x50\x60";

    const MLLT_DATA: &[u8] = b"\x00\x10\
                               \x00\x0E\x10\
                               \x00\x01\xA4\
                               \x08\
                               \x08\
                               \x16\x16\x16";

    const CRA_DATA: &[u8] = b"scheme@test.com\0\
                              \x00\x10\
                              \x01\x00\
                              \xAB\xCD";

    const BUF_DATA: &[u8] = b"\x00\x10\x00\
                              \x01\
                              \x00\x00\x04\x00";

    #[test]
    fn parse_rvad() {
        let frame =
            RelativeVolumeFrame::parse(Version::V23, &mut BufStream::new(RVAD_DATA)).unwrap();

        assert_eq!(frame.increment, 0x01);
        assert_eq!(frame.bits, 0x20);

        assert_eq!(frame.right, 0xABCDEF16);
        assert_eq!(frame.left, 0x01020408);
        assert_eq!(frame.peak_right, Some(0x16161616));
        assert_eq!(frame.peak_left, Some(0));

        assert_eq!(frame.right_rear, Some(0x00FF00FF));
        assert_eq!(frame.left_rear, Some(0xFF00FF00));
        assert_eq!(frame.peak_right_rear, Some(0x61FEDCBA));
        assert_eq!(frame.peak_left_rear, Some(0x20408000));

        assert_eq!(frame.center, Some(0));
        assert_eq!(frame.peak_center, Some(0x1010));

        assert_eq!(frame.bass, Some(0x4F584342));
        assert_eq!(frame.peak_bass, Some(0xFFFFFFFF));
    }

    #[test]
    fn parse_rva_v2() {
        let frame =
            RelativeVolumeFrame::parse(Version::V22, &mut BufStream::new(RVA_V2_DATA)).unwrap();

        assert_eq!(frame.right, 0x1234);
        assert_eq!(frame.left, 0x0000);
        assert_eq!(frame.peak_right, Some(0x1616));
        assert_eq!(frame.peak_left, Some(0xABCD));
        assert_eq!(frame.right_rear, None);
    }

    #[test]
    fn parse_rva_bad_flags() {
        // Bit 1 is only valid in ID3v2.2.
        let err = RelativeVolumeFrame::parse(Version::V23, &mut BufStream::new(RVA_V2_DATA))
            .unwrap_err();

        assert_eq!(err, ParseError::Malformed("bad increment flags"));
    }

    #[test]
    fn parse_rva_zero_bits() {
        let err = RelativeVolumeFrame::parse(Version::V23, &mut BufStream::new(b"\x01\x00\x16"))
            .unwrap_err();

        assert_eq!(err, ParseError::Malformed("zero bits per volume"));
    }

    #[test]
    fn parse_rva_truncated_field() {
        let data = b"\x01\x10\x12\x34\x56\x78\x9A";
        let err =
            RelativeVolumeFrame::parse(Version::V23, &mut BufStream::new(data)).unwrap_err();

        assert_eq!(err, ParseError::Malformed("truncated volume field"));
    }

    #[test]
    fn parse_rva2() {
        let frame = RelativeVolume2Frame::parse(&mut BufStream::new(RVA2_DATA)).unwrap();

        assert_eq!(frame.identification, "album");
        assert_eq!(frame.data, b"\x01\xFC\x00\x10\x1F\x18");
    }

    #[test]
    fn parse_equ2() {
        let frame = Equalization2Frame::parse(&mut BufStream::new(EQU2_DATA)).unwrap();

        assert_eq!(frame.interpolation, 0x01);
        assert_eq!(frame.identification, "album");
        assert_eq!(frame.data, b"\x01\xF4\x02\x08");
    }

    #[test]
    fn parse_rvrb() {
        let frame = ReverbFrame::parse(&mut BufStream::new(RVRB_DATA)).unwrap();

        assert_eq!(frame.reverb_left, 250);
        assert_eq!(frame.reverb_right, 300);
        assert_eq!(frame.bounces_left, 0x04);
        assert_eq!(frame.bounces_right, 0x08);
        assert_eq!(frame.feedback_left_left, 0x10);
        assert_eq!(frame.feedback_left_right, 0x20);
        assert_eq!(frame.feedback_right_right, 0x30);
        assert_eq!(frame.feedback_right_left, 0x40);
        assert_eq!(frame.premix_left_right, 0x50);
        assert_eq!(frame.premix_right_left, 0x60);
    }

    #[test]
    fn parse_mllt() {
        let frame = MpegLookupFrame::parse(&mut BufStream::new(MLLT_DATA)).unwrap();

        assert_eq!(frame.frames_between_refs, 0x10);
        assert_eq!(frame.bytes_between_refs, 0xE10);
        assert_eq!(frame.millis_between_refs, 0x1A4);
        assert_eq!(frame.byte_deviation_bits, 8);
        assert_eq!(frame.millis_deviation_bits, 8);
        assert_eq!(frame.data, b"\x16\x16\x16");
    }

    #[test]
    fn parse_cra() {
        let frame = AudioEncryptionFrame::parse(&mut BufStream::new(CRA_DATA)).unwrap();

        assert_eq!(frame.owner, "scheme@test.com");
        assert_eq!(frame.preview_start, 0x10);
        assert_eq!(frame.preview_length, 0x100);
        assert_eq!(frame.data, b"\xAB\xCD");
    }

    #[test]
    fn parse_buf() {
        let frame = BufferSizeFrame::parse(&mut BufStream::new(BUF_DATA)).unwrap();

        assert_eq!(frame.buffer_size, 0x1000);
        assert!(frame.embedded_info);
        assert_eq!(frame.next_tag_offset, Some(0x400));
    }

    #[test]
    fn parse_buf_bad_embed() {
        let err = BufferSizeFrame::parse(&mut BufStream::new(b"\x00\x10\x00\x02")).unwrap_err();

        assert_eq!(err, ParseError::Malformed("bad embedded info byte"));
    }
}
