//! A TCP segment header codec in Rust
//!
//! This library provides:
//! - TCP header encoding and decoding, including variable-length options
//! - The IPv4 pseudo-header used for transport checksums
//! - Internet checksum computation and validation

pub mod error;
pub mod network;
pub mod transport;

// Re-export commonly used types
pub use error::{Error, OptionError, Result};
pub use network::{Checksum, PseudoHeader};
pub use transport::tcp::{EncodeConfig, OptionKind, Padding, TcpFlags, TcpHeader, TcpOption, TcpSegment};
