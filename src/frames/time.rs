use crate::core::io::BufStream;
use crate::err::ParseResult;
use std::fmt::{self, Display, Formatter};

byte_enum! {
    /// How the timestamps inside a frame body are expressed.
    pub enum TimestampFormat {
        Other = 0x00,
        MpegFrames = 0x01,
        Millis = 0x02,
    };
    TimestampFormat::Other
}

impl Default for TimestampFormat {
    fn default() -> Self {
        TimestampFormat::Millis
    }
}

/// A frame that pairs a timestamp format with an undecoded event table, such
/// as event timing codes, synchronised tempo codes, and position offsets.
#[derive(Clone, Debug, Default)]
pub struct TimestampFrame {
    pub format: TimestampFormat,
    pub data: Vec<u8>,
}

impl TimestampFrame {
    pub(crate) fn parse(stream: &mut BufStream) -> ParseResult<Self> {
        let format = TimestampFormat::parse(stream.read_u8()?);
        let data = stream.take_rest().to_vec();

        Ok(Self { format, data })
    }
}

impl Display for TimestampFrame {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write![f, "{:?} [{} bytes]", self.format, self.data.len()]
    }
}
