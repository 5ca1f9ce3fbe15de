//! Quaver is a decoding library for the ID3 family of audio metadata tags.
//!
//! It understands the four tag dialects found in the wild: ID3v1/ID3v1.1
//! trailers and the ID3v2.2, ID3v2.3, and ID3v2.4 header formats, each with
//! its own frame layout, text encodings, size semantics, and preprocessing
//! quirks. The caller hands in a byte slice plus the dialect to decode, and
//! gets back a [`Tag`](tag::Tag) or a typed error.
//!
//! Quaver only reads. File I/O, locating the audio stream, and writing tags
//! back are left to the caller, as is any interpretation of the decoded
//! payloads themselves.

#![forbid(unsafe_code)]

#[macro_use]
mod core;

pub mod err;
pub mod frame_map;
pub mod frames;
mod id3v1;
pub mod id3v2;
pub mod tag;

pub use err::{ParseError, ParseResult};
pub use tag::{parse, parse_with, probe, DiagnosticSink, Discard, ParseConfig, Tag, Version};

#[cfg(test)]
mod tests;
