//! Network layer helpers used by the transport codecs
//!
//! This module contains the pieces of the IP layer that a transport
//! checksum depends on:
//! - Checksum: the Internet one's-complement sum
//! - PseudoHeader: the IPv4 pseudo-header fed into transport checksums

pub mod checksum;
pub mod pseudo_header;

// Re-export commonly used items
pub use checksum::Checksum;
pub use pseudo_header::{protocol, PseudoHeader, PSEUDO_HEADER_LEN};

/// Calculate Internet checksum
///
/// Algorithm: Sum data in 16-bit chunks, add carry bits to the sum,
/// and return the one's complement of the result.
pub fn checksum(data: &[u8]) -> u16 {
    Checksum::new().add(data).finish()
}
