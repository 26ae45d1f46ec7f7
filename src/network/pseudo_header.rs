//! IPv4 pseudo-header
//!
//! The pseudo-header is never transmitted. It binds a transport checksum to
//! the IP addresses and protocol the segment travels with.

use std::net::Ipv4Addr;

use byteorder::{BigEndian, ByteOrder};

/// Serialized pseudo-header length: src(4) + dst(4) + zero(1) + protocol(1) + length(2)
pub const PSEUDO_HEADER_LEN: usize = 12;

/// IP protocol numbers
pub mod protocol {
    pub const TCP: u8 = 6;
}

/// IPv4 pseudo-header used as checksum input only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PseudoHeader {
    pub src_addr: Ipv4Addr,
    pub dst_addr: Ipv4Addr,
    pub zero: u8,
    pub protocol: u8,
    /// Transport segment length in bytes (header + options + payload)
    pub length: u16,
}

impl PseudoHeader {
    /// Create a pseudo-header for an arbitrary transport protocol
    pub fn new(src_addr: Ipv4Addr, dst_addr: Ipv4Addr, protocol: u8, length: u16) -> Self {
        PseudoHeader {
            src_addr,
            dst_addr,
            zero: 0,
            protocol,
            length,
        }
    }

    /// Create a pseudo-header for a TCP segment of `tcp_length` bytes
    pub fn tcp(src_addr: Ipv4Addr, dst_addr: Ipv4Addr, tcp_length: u16) -> Self {
        Self::new(src_addr, dst_addr, protocol::TCP, tcp_length)
    }

    /// Serialize to the 12 bytes summed by the checksum
    pub fn to_bytes(&self) -> [u8; PSEUDO_HEADER_LEN] {
        let mut bytes = [0u8; PSEUDO_HEADER_LEN];
        bytes[0..4].copy_from_slice(&self.src_addr.octets());
        bytes[4..8].copy_from_slice(&self.dst_addr.octets());
        bytes[8] = self.zero;
        bytes[9] = self.protocol;
        BigEndian::write_u16(&mut bytes[10..12], self.length);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tcp_layout() {
        let pseudo = PseudoHeader::tcp(Ipv4Addr::new(192, 0, 2, 1), Ipv4Addr::new(192, 0, 2, 2), 20);
        assert_eq!(pseudo.protocol, 6);
        assert_eq!(pseudo.zero, 0);
        assert_eq!(
            pseudo.to_bytes(),
            [192, 0, 2, 1, 192, 0, 2, 2, 0, 6, 0, 20]
        );
    }

    #[test]
    fn accepts_raw_u32_addresses() {
        let pseudo = PseudoHeader::tcp(0x0a00_0001.into(), 0x0a00_0002.into(), 0x1234);
        assert_eq!(&pseudo.to_bytes()[..4], &[10, 0, 0, 1]);
        assert_eq!(&pseudo.to_bytes()[10..], &[0x12, 0x34]);
    }
}
