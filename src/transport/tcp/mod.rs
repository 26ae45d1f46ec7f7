//! TCP (Transmission Control Protocol) segment codec
//!
//! This module provides TCP header encoding and decoding, option parsing
//! and checksum computation over the IPv4 pseudo-header.

pub mod checksum;
pub mod flags;
pub mod header;
pub mod options;
pub mod segment;

pub use flags::TcpFlags;
pub use header::{EncodeConfig, TcpHeader, TCP_HEADER_LEN};
pub use options::{decode_options, encode_options, OptionKind, Padding, TcpOption};
pub use segment::TcpSegment;
