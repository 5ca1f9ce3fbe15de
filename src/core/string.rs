use crate::core::io::BufStream;
use crate::err::{ParseError, ParseResult};

/// The text encodings a tag can declare for its string data.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Encoding {
    Latin1,
    Utf16,
    Utf16Be,
    Utf8,
}

impl Encoding {
    pub(crate) fn nul_size(&self) -> usize {
        match self {
            Encoding::Utf8 | Encoding::Latin1 => 1,
            _ => 2,
        }
    }
}

pub(crate) fn read(encoding: Encoding, stream: &mut BufStream) -> String {
    self::decode(encoding, stream.take_rest())
}

pub(crate) fn read_exact(
    encoding: Encoding,
    stream: &mut BufStream,
    size: usize,
) -> ParseResult<String> {
    Ok(self::decode(encoding, stream.slice(size)?))
}

/// Read a NUL-terminated string, leaving the stream past the terminator. The
/// terminator is a single zero byte in Latin1/UTF-8 and an aligned zero pair in
/// the UTF-16 encodings. A string with no terminator in the remaining data is
/// an error, and the stream will not advance.
pub(crate) fn read_terminated(encoding: Encoding, stream: &mut BufStream) -> ParseResult<String> {
    let data = stream.as_slice();
    let nul = encoding.nul_size();
    let mut pos = 0;

    while pos + nul <= data.len() {
        if data[pos..pos + nul].iter().all(|&byte| byte == 0) {
            let string = decode(encoding, &data[..pos]);
            stream.skip(pos + nul)?;
            return Ok(string);
        }

        // Terminators in UTF-16 data must line up with the 16-bit codepoints,
        // otherwise a codepoint pair like 0x04 0x00 would end the string early.
        pos += nul;
    }

    Err(ParseError::Malformed("unterminated string"))
}

/// Read the remainder of the stream as a run of NUL-separated strings. The last
/// string does not need a terminator, and empty strings from zero padding are
/// dropped.
pub(crate) fn read_sequence(encoding: Encoding, stream: &mut BufStream) -> Vec<String> {
    let mut text = Vec::new();

    while !stream.is_empty() {
        let string = match read_terminated(encoding, stream) {
            Ok(string) => string,
            Err(_) => read(encoding, stream),
        };

        if !string.is_empty() {
            text.push(string);
        }
    }

    text
}

pub(crate) fn decode(encoding: Encoding, data: &[u8]) -> String {
    match encoding {
        Encoding::Latin1 => decode_latin1(data),
        Encoding::Utf16 => decode_utf16(data),
        Encoding::Utf16Be => decode_utf16be(data),
        Encoding::Utf8 => String::from_utf8_lossy(data).to_string(),
    }
}

fn decode_latin1(data: &[u8]) -> String {
    // UTF-8 expresses high bits as two bytes instead of one, so we cannot convert directly.
    // Instead, we simply reinterpret the bytes as chars to make sure the codepoints line up.
    data.iter().map(|&byte| byte as char).collect()
}

fn decode_utf16(data: &[u8]) -> String {
    if data.len() < 2 {
        return String::new();
    }

    // UTF-16 requires us to figure out the endianness ourselves from the BOM
    match (data[0], data[1]) {
        (0xFF, 0xFE) => decode_utf16le(&data[2..]), // Little Endian
        (0xFE, 0xFF) => decode_utf16be(&data[2..]), // Big Endian
        _ => decode_utf16le(data),                  // No BOM, assume UTF16-LE
    }
}

fn decode_utf16be(data: &[u8]) -> String {
    String::from_utf16_lossy(
        data.chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect::<Vec<u16>>()
            .as_slice(),
    )
}

fn decode_utf16le(data: &[u8]) -> String {
    String::from_utf16_lossy(
        data.chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect::<Vec<u16>>()
            .as_slice(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const STR_LATIN1: &str = "L\u{ee}ke \u{e2} while loop w\u{ef}th n\u{f8} escap\u{ea}";

    const DATA_LATIN1: &[u8] = b"L\xEEke \xE2 while loop w\xEFth n\xF8 escap\xEA";

    const DATA_UTF16: &[u8] = b"\xFF\xFE\x4c\x00\xee\x00\x6b\x00\x65\x00\x20\x00\
                                \xe2\x00\x20\x00\x77\x00\x68\x00\x69\x00\x6c\x00\
                                \x65\x00\x20\x00\x6c\x00\x6f\x00\x6f\x00\x70\x00\
                                \x20\x00\x77\x00\xef\x00\x74\x00\x68\x00\x20\x00\
                                \x6e\x00\xf8\x00\x20\x00\x65\x00\x73\x00\x63\x00\
                                \x61\x00\x70\x00\xea\x00";

    const DATA_UTF16BE: &[u8] = b"\xFE\xFF\x00\x4c\x00\xee\x00\x6b\x00\x65\x00\x20\
                                  \x00\xe2\x00\x20\x00\x77\x00\x68\x00\x69\x00\x6c\
                                  \x00\x65\x00\x20\x00\x6c\x00\x6f\x00\x6f\x00\x70\
                                  \x00\x20\x00\x77\x00\xef\x00\x74\x00\x68\x00\x20\
                                  \x00\x6e\x00\xf8\x00\x20\x00\x65\x00\x73\x00\x63\
                                  \x00\x61\x00\x70\x00\xea";

    #[test]
    fn parse_latin1() {
        assert_eq!(decode(Encoding::Latin1, DATA_LATIN1), STR_LATIN1);
    }

    #[test]
    fn parse_utf16() {
        assert_eq!(decode(Encoding::Utf16, DATA_UTF16), STR_LATIN1);
        assert_eq!(decode(Encoding::Utf16, DATA_UTF16BE), STR_LATIN1);
    }

    #[test]
    fn parse_utf16_without_bom() {
        // No BOM means the data is assumed to be little-endian.
        assert_eq!(decode(Encoding::Utf16, &DATA_UTF16[2..]), STR_LATIN1);
    }

    #[test]
    fn parse_utf16be() {
        assert_eq!(decode(Encoding::Utf16Be, &DATA_UTF16BE[2..]), STR_LATIN1);
    }

    #[test]
    fn parse_utf8() {
        let data = "\u{2551} L\u{ee}ke \u{e2} loop \u{2551}".as_bytes();
        assert_eq!(decode(Encoding::Utf8, data), "\u{2551} L\u{ee}ke \u{e2} loop \u{2551}");
    }

    #[test]
    fn parse_empty() {
        assert_eq!(decode(Encoding::Utf16, b""), "");
        assert_eq!(decode(Encoding::Latin1, b""), "");
    }

    #[test]
    fn parse_terminated() {
        let data = b"L\xEEke \xE2 while loo\0p w\xEFth n\xF8 escap\xEA\0";
        let mut stream = BufStream::new(data);

        let terminated = read_terminated(Encoding::Latin1, &mut stream).unwrap();
        assert_eq!(terminated, "L\u{ee}ke \u{e2} while loo");

        let rest = read_terminated(Encoding::Latin1, &mut stream).unwrap();
        assert_eq!(rest, "p w\u{ef}th n\u{f8} escap\u{ea}");
        assert!(stream.is_empty());
    }

    #[test]
    fn parse_terminated_utf16() {
        // The 0x04 0x00 codepoint straddles a byte-level zero pair, which must
        // not be mistaken for a terminator.
        let data = b"\xFF\xFE\x04\x04\x04\x00\x61\x00\0\0\xFF\xFE\x62\x00";
        let mut stream = BufStream::new(data);

        let terminated = read_terminated(Encoding::Utf16, &mut stream).unwrap();
        assert_eq!(terminated, "\u{404}\u{4}a");

        let rest = read_terminated(Encoding::Utf16, &mut stream);
        assert_eq!(rest, Err(ParseError::Malformed("unterminated string")));
        assert_eq!(read(Encoding::Utf16, &mut stream), "b");
    }

    #[test]
    fn parse_unterminated() {
        let mut stream = BufStream::new(b"no terminator here");

        assert!(read_terminated(Encoding::Latin1, &mut stream).is_err());
        assert_eq!(stream.pos(), 0);
    }

    #[test]
    fn parse_sequence() {
        let mut stream = BufStream::new(b"Post-Rock\0Electronica\0\0\0");
        let text = read_sequence(Encoding::Latin1, &mut stream);

        assert_eq!(text, vec!["Post-Rock", "Electronica"]);
    }
}
