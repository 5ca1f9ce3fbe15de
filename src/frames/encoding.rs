use crate::core::io::BufStream;
use crate::core::string::Encoding;
use crate::err::{ParseError, ParseResult};

const FLAG_LATIN1: u8 = 0x00;
const FLAG_UTF16: u8 = 0x01;
const FLAG_UTF16BE: u8 = 0x02;
const FLAG_UTF8: u8 = 0x03;

/// Parse the encoding selector byte that leads most text-bearing frame bodies.
pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Encoding> {
    match stream.read_u8()? {
        // Latin1 [Basically ASCII but now europe exists]
        FLAG_LATIN1 => Ok(Encoding::Latin1),

        // UTF16 with BOM [Can be both LE or BE]
        FLAG_UTF16 => Ok(Encoding::Utf16),

        // UTF16 without BOM [Always BE]
        FLAG_UTF16BE => Ok(Encoding::Utf16Be),

        // UTF8, the only one that needs no shims
        FLAG_UTF8 => Ok(Encoding::Utf8),

        _ => Err(ParseError::Malformed("bad encoding byte")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_encodings() {
        let mut stream = BufStream::new(b"\x00\x01\x02\x03\x04");

        assert_eq!(parse(&mut stream).unwrap(), Encoding::Latin1);
        assert_eq!(parse(&mut stream).unwrap(), Encoding::Utf16);
        assert_eq!(parse(&mut stream).unwrap(), Encoding::Utf16Be);
        assert_eq!(parse(&mut stream).unwrap(), Encoding::Utf8);
        assert_eq!(
            parse(&mut stream).unwrap_err(),
            ParseError::Malformed("bad encoding byte")
        );
    }
}
