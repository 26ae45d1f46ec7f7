//! TCP header codec
//!
//! Encodes and decodes the fixed 20-byte header plus its options region.
//! The data offset is always derived from the encoded options; callers never
//! supply it.

use std::net::Ipv4Addr;

use byteorder::{BigEndian, ByteOrder};
use log::debug;

use super::checksum::{self, CHECKSUM_OFFSET};
use super::flags::TcpFlags;
use super::options::{decode_options, encode_options, pad_options, Padding, TcpOption, MAX_OPTIONS_LEN};
use crate::error::{Error, Result};
use crate::network::PseudoHeader;

/// Length of the fixed part of the TCP header
pub const TCP_HEADER_LEN: usize = 20;

/// Data offset of a header without options, in 32-bit words
pub const MIN_DATA_OFFSET: u8 = 5;

/// Encoder settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeConfig {
    /// Fill used to pad the options region to a 32-bit boundary
    pub padding: Padding,
}

/// TCP packet header structure
///
/// Represents the header as defined in RFC 793, including its options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TcpHeader {
    pub src_port: u16,
    pub dst_port: u16,
    pub seq_number: u32,
    pub ack_number: u32,
    /// Header length in 32-bit words; filled in by decode, recomputed by encode
    pub data_offset: u8,
    /// Low nibble of byte 12; must be zero to encode
    pub reserved: u8,
    pub flags: TcpFlags,
    pub window_size: u16,
    pub checksum: u16,
    pub urgent_ptr: u16,
    pub options: Vec<TcpOption>,
}

impl Default for TcpHeader {
    fn default() -> Self {
        TcpHeader {
            src_port: 0,
            dst_port: 0,
            seq_number: 0,
            ack_number: 0,
            data_offset: MIN_DATA_OFFSET,
            reserved: 0,
            flags: TcpFlags::empty(),
            window_size: 0,
            checksum: 0,
            urgent_ptr: 0,
            options: Vec::new(),
        }
    }
}

impl TcpHeader {
    /// Create a header between two ports with every other field zeroed
    pub fn new(src_port: u16, dst_port: u16) -> Self {
        TcpHeader {
            src_port,
            dst_port,
            ..Default::default()
        }
    }

    /// Parse a TCP header from the start of a segment
    ///
    /// Returns the header and the payload that follows its options.
    pub fn decode(data: &[u8]) -> Result<(Self, &[u8])> {
        if data.len() < TCP_HEADER_LEN {
            debug!("tcp segment of {} bytes is shorter than a header", data.len());
            return Err(Error::Truncated {
                needed: TCP_HEADER_LEN,
                available: data.len(),
            });
        }

        let data_offset = data[12] >> 4;
        let reserved = data[12] & 0x0F;
        if data_offset < MIN_DATA_OFFSET {
            debug!("tcp data offset {} is below the minimum", data_offset);
            return Err(Error::invalid_field(
                "data_offset",
                format!("{} words is shorter than the fixed header", data_offset),
            ));
        }

        let header_len = data_offset as usize * 4;
        if header_len > data.len() {
            debug!(
                "tcp data offset claims {} bytes but only {} are present",
                header_len,
                data.len()
            );
            return Err(Error::Truncated {
                needed: header_len,
                available: data.len(),
            });
        }
        if reserved != 0 {
            debug!("tcp reserved bits set: {:#x}", reserved);
        }

        let header = TcpHeader {
            src_port: BigEndian::read_u16(&data[0..2]),
            dst_port: BigEndian::read_u16(&data[2..4]),
            seq_number: BigEndian::read_u32(&data[4..8]),
            ack_number: BigEndian::read_u32(&data[8..12]),
            data_offset,
            reserved,
            flags: TcpFlags::from(data[13]),
            window_size: BigEndian::read_u16(&data[14..16]),
            checksum: BigEndian::read_u16(&data[16..18]),
            urgent_ptr: BigEndian::read_u16(&data[18..20]),
            options: decode_options(&data[TCP_HEADER_LEN..header_len])?,
        };

        Ok((header, &data[header_len..]))
    }

    /// Serialize header, padded options and payload with default settings
    ///
    /// The checksum field is written as zero.
    pub fn encode(&self, payload: &[u8]) -> Result<Vec<u8>> {
        self.encode_with(payload, &EncodeConfig::default())
    }

    /// Serialize header, padded options and payload
    pub fn encode_with(&self, payload: &[u8], config: &EncodeConfig) -> Result<Vec<u8>> {
        if self.reserved != 0 {
            return Err(Error::invalid_field(
                "reserved",
                format!("must be zero, got {:#x}", self.reserved),
            ));
        }

        let mut options = encode_options(&self.options)?;
        pad_options(&mut options, self.options.last(), config.padding);
        if options.len() > MAX_OPTIONS_LEN {
            return Err(Error::invalid_field(
                "data_offset",
                format!(
                    "{} option bytes exceed the {} a 4-bit offset can describe",
                    options.len(),
                    MAX_OPTIONS_LEN
                ),
            ));
        }
        let data_offset = MIN_DATA_OFFSET + (options.len() / 4) as u8;

        let mut bytes = Vec::with_capacity(TCP_HEADER_LEN + options.len() + payload.len());
        bytes.resize(TCP_HEADER_LEN, 0);
        BigEndian::write_u16(&mut bytes[0..2], self.src_port);
        BigEndian::write_u16(&mut bytes[2..4], self.dst_port);
        BigEndian::write_u32(&mut bytes[4..8], self.seq_number);
        BigEndian::write_u32(&mut bytes[8..12], self.ack_number);
        bytes[12] = data_offset << 4;
        bytes[13] = self.flags.into();
        BigEndian::write_u16(&mut bytes[14..16], self.window_size);
        // bytes[16..18] stays zero until the checksum is known
        BigEndian::write_u16(&mut bytes[18..20], self.urgent_ptr);
        bytes.extend_from_slice(&options);
        bytes.extend_from_slice(payload);

        Ok(bytes)
    }

    /// Encode a complete segment with its checksum filled in
    pub fn to_segment(&self, src_addr: Ipv4Addr, dst_addr: Ipv4Addr, payload: &[u8]) -> Result<Vec<u8>> {
        let mut segment = self.encode(payload)?;
        let length = u16::try_from(segment.len()).map_err(|_| {
            Error::invalid_field(
                "payload",
                format!("segment of {} bytes does not fit a 16-bit length", segment.len()),
            )
        })?;

        let header_len = segment.len() - payload.len();
        let pseudo = PseudoHeader::tcp(src_addr, dst_addr, length);
        let csum = checksum::compute(&pseudo, &segment[..header_len], payload);
        BigEndian::write_u16(&mut segment[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 2], csum);

        Ok(segment)
    }

    /// Get the data offset (header length) in bytes
    pub fn header_len(&self) -> usize {
        self.data_offset as usize * 4
    }

    /// Value of the first maximum segment size option, if any
    pub fn mss(&self) -> Option<u16> {
        self.options.iter().find_map(|option| match option {
            TcpOption::MaximumSegmentSize(mss) => Some(*mss),
            _ => None,
        })
    }

    /// Check if SYN flag is set
    pub fn is_syn(&self) -> bool {
        self.flags.contains(TcpFlags::SYN)
    }

    /// Check if ACK flag is set
    pub fn is_ack(&self) -> bool {
        self.flags.contains(TcpFlags::ACK)
    }

    /// Check if FIN flag is set
    pub fn is_fin(&self) -> bool {
        self.flags.contains(TcpFlags::FIN)
    }

    /// Check if RST flag is set
    pub fn is_rst(&self) -> bool {
        self.flags.contains(TcpFlags::RST)
    }

    /// Check if PSH flag is set
    pub fn is_psh(&self) -> bool {
        self.flags.contains(TcpFlags::PSH)
    }

    /// Check if URG flag is set
    pub fn is_urg(&self) -> bool {
        self.flags.contains(TcpFlags::URG)
    }

    pub fn is_ece(&self) -> bool {
        self.flags.contains(TcpFlags::ECE)
    }

    pub fn is_cwr(&self) -> bool {
        self.flags.contains(TcpFlags::CWR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syn_header() -> TcpHeader {
        TcpHeader {
            seq_number: 0x0102_0304,
            ack_number: 0x0a0b_0c0d,
            flags: TcpFlags::SYN | TcpFlags::ECE | TcpFlags::CWR,
            window_size: 0xfaf0,
            urgent_ptr: 7,
            options: vec![TcpOption::MaximumSegmentSize(1460)],
            ..TcpHeader::new(40000, 443)
        }
    }

    #[test]
    fn wire_layout() {
        let bytes = syn_header().encode(b"hi").unwrap();
        assert_eq!(
            bytes,
            vec![
                0x9c, 0x40, 0x01, 0xbb, // ports
                0x01, 0x02, 0x03, 0x04, // seq
                0x0a, 0x0b, 0x0c, 0x0d, // ack
                0x60, 0xc2, // offset 6, CWR|ECE|SYN
                0xfa, 0xf0, 0x00, 0x00, 0x00, 0x07, // window, checksum, urgent
                0x02, 0x04, 0x05, 0xb4, // mss 1460
                b'h', b'i',
            ]
        );
    }

    #[test]
    fn decode_reads_fields_and_payload() {
        let bytes = syn_header().encode(b"hi").unwrap();
        let (header, payload) = TcpHeader::decode(&bytes).unwrap();
        assert_eq!(header.data_offset, 6);
        assert_eq!(header.header_len(), 24);
        assert_eq!(header, TcpHeader { data_offset: 6, ..syn_header() });
        assert_eq!(payload, b"hi");
        assert!(header.is_syn() && header.is_ece() && header.is_cwr());
        assert!(!header.is_ack() && !header.is_fin() && !header.is_rst());
        assert_eq!(header.mss(), Some(1460));
    }

    #[test]
    fn data_offset_is_computed() {
        let mut header = syn_header();
        header.data_offset = 15;
        header.options = vec![TcpOption::NoOperation; 5];
        let bytes = header.encode(&[]).unwrap();
        assert_eq!(bytes[12] >> 4, 7);
        assert_eq!(bytes.len(), 28);
        assert_eq!(&bytes[20..], &[1, 1, 1, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn nop_padding_config() {
        let mut header = syn_header();
        header.options = vec![TcpOption::MaximumSegmentSize(536), TcpOption::NoOperation];
        let config = EncodeConfig { padding: Padding::NoOperation };
        let bytes = header.encode_with(&[], &config).unwrap();
        assert_eq!(&bytes[20..], &[2, 4, 0x02, 0x18, 1, 1, 1, 1]);
    }

    #[test]
    fn rejects_reserved_bits() {
        let header = TcpHeader { reserved: 0x1, ..TcpHeader::new(1, 2) };
        assert!(matches!(
            header.encode(&[]),
            Err(Error::InvalidField { field: "reserved", .. })
        ));
    }

    #[test]
    fn rejects_oversized_options() {
        let header = TcpHeader {
            options: vec![TcpOption::Unknown { kind: 30, data: vec![0; 40] }],
            ..TcpHeader::new(1, 2)
        };
        assert!(matches!(
            header.encode(&[]),
            Err(Error::InvalidField { field: "data_offset", .. })
        ));

        let full = TcpHeader {
            options: vec![TcpOption::Unknown { kind: 30, data: vec![0; 38] }],
            ..TcpHeader::new(1, 2)
        };
        assert_eq!(full.encode(&[]).unwrap()[12] >> 4, 15);
    }

    #[test]
    fn decode_truncated_header() {
        assert_eq!(
            TcpHeader::decode(&[0u8; 19]),
            Err(Error::Truncated { needed: 20, available: 19 })
        );
    }

    #[test]
    fn decode_offset_past_end() {
        let mut bytes = TcpHeader::new(1, 2).encode(&[]).unwrap();
        bytes[12] = 6 << 4;
        assert_eq!(
            TcpHeader::decode(&bytes),
            Err(Error::Truncated { needed: 24, available: 20 })
        );
    }

    #[test]
    fn decode_offset_below_minimum() {
        let mut bytes = TcpHeader::new(1, 2).encode(&[]).unwrap();
        bytes[12] = 4 << 4;
        assert!(matches!(
            TcpHeader::decode(&bytes),
            Err(Error::InvalidField { field: "data_offset", .. })
        ));
    }

    #[test]
    fn decode_keeps_reserved_bits() {
        let mut bytes = TcpHeader::new(1, 2).encode(&[]).unwrap();
        bytes[12] |= 0x01;
        let (header, _) = TcpHeader::decode(&bytes).unwrap();
        assert_eq!(header.reserved, 1);
    }

    #[test]
    fn decode_rejects_bad_options() {
        let mut bytes = TcpHeader::new(1, 2).encode(&[0, 0, 0, 0]).unwrap();
        bytes[12] = 6 << 4;
        bytes[20] = 2;
        bytes[21] = 1;
        assert!(matches!(
            TcpHeader::decode(&bytes),
            Err(Error::MalformedOptions { offset: 0, .. })
        ));
    }
}
