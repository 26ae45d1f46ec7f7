//! A decoded TCP segment that still borrows its wire bytes
//!
//! Keeping the raw header span lets the checksum be validated exactly as
//! received, after the fields have already been parsed.

use std::net::Ipv4Addr;

use log::warn;

use super::checksum;
use super::header::TcpHeader;
use crate::error::{Error, Result};
use crate::network::PseudoHeader;

/// Parsed TCP segment borrowing from the received buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpSegment<'a> {
    pub header: TcpHeader,
    raw_header: &'a [u8],
    pub payload: &'a [u8],
}

impl<'a> TcpSegment<'a> {
    /// Decode a segment (header, options and payload)
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let (header, payload) = TcpHeader::decode(data)?;
        let raw_header = &data[..header.header_len()];
        Ok(TcpSegment {
            header,
            raw_header,
            payload,
        })
    }

    /// The header and options bytes exactly as received
    pub fn header_bytes(&self) -> &'a [u8] {
        self.raw_header
    }

    /// Total segment length in bytes
    pub fn len(&self) -> usize {
        self.raw_header.len() + self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build the pseudo-header this segment was checksummed with
    pub fn pseudo_header(&self, src_addr: Ipv4Addr, dst_addr: Ipv4Addr) -> Result<PseudoHeader> {
        let length = u16::try_from(self.len()).map_err(|_| {
            Error::invalid_field(
                "payload",
                format!("segment of {} bytes does not fit a 16-bit length", self.len()),
            )
        })?;
        Ok(PseudoHeader::tcp(src_addr, dst_addr, length))
    }

    /// Validate the received checksum
    ///
    /// A mismatch is reported as [`Error::ChecksumMismatch`]; the parsed
    /// header stays available to the caller either way.
    pub fn verify_checksum(&self, src_addr: Ipv4Addr, dst_addr: Ipv4Addr) -> Result<()> {
        let pseudo = self.pseudo_header(src_addr, dst_addr)?;
        if checksum::verify(&pseudo, self.raw_header, self.payload) {
            return Ok(());
        }

        let computed = checksum::compute(&pseudo, self.raw_header, self.payload);
        warn!(
            "tcp checksum mismatch {}:{} -> {}:{}: received {:#06x}, computed {:#06x}",
            src_addr, self.header.src_port, dst_addr, self.header.dst_port, self.header.checksum, computed
        );
        Err(Error::ChecksumMismatch {
            received: self.header.checksum,
            computed,
        })
    }
}
