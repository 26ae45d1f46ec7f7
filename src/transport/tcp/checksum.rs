//! TCP checksum over pseudo-header, header and payload

use log::trace;

use crate::network::{Checksum, PseudoHeader};

/// Byte offset of the checksum field within the TCP header
pub const CHECKSUM_OFFSET: usize = 16;

/// Compute the checksum to transmit for a segment
///
/// The checksum field inside `header` is summed as zero whatever it holds.
/// A result of zero is sent as 0xFFFF, since zero means "no checksum".
pub fn compute(pseudo: &PseudoHeader, header: &[u8], payload: &[u8]) -> u16 {
    let (before, rest) = header.split_at(header.len().min(CHECKSUM_OFFSET));
    let skip = rest.len().min(2);

    let mut csum = Checksum::new();
    csum.add(&pseudo.to_bytes())
        .add(before)
        .add(&[0u8; 2][..skip])
        .add(&rest[skip..])
        .add(payload);

    let result = match csum.finish() {
        0 => 0xFFFF,
        value => value,
    };
    trace!(
        "tcp checksum {:#06x} over {} header + {} payload bytes",
        result,
        header.len(),
        payload.len()
    );
    result
}

/// Check a received segment against its pseudo-header
///
/// Sums the header with the checksum field as received; the segment is valid
/// only when the complemented sum is zero.
pub fn verify(pseudo: &PseudoHeader, header: &[u8], payload: &[u8]) -> bool {
    let mut csum = Checksum::new();
    csum.add(&pseudo.to_bytes()).add(header).add(payload);
    csum.finish() == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn pseudo(len: u16) -> PseudoHeader {
        PseudoHeader::tcp(Ipv4Addr::new(192, 0, 2, 1), Ipv4Addr::new(192, 0, 2, 2), len)
    }

    // src port 1234, dst port 80, data offset 5, ACK, window 8192
    fn ack_header() -> [u8; 20] {
        [
            0x04, 0xd2, 0x00, 0x50, 0, 0, 0, 0, 0, 0, 0, 0, 0x50, 0x10, 0x20, 0x00, 0, 0, 0, 0,
        ]
    }

    #[test]
    fn known_vector() {
        let mut header = ack_header();
        let csum = compute(&pseudo(20), &header, &[]);
        assert_eq!(csum, 0x06af);

        header[16..18].copy_from_slice(&csum.to_be_bytes());
        assert!(verify(&pseudo(20), &header, &[]));

        header[16..18].copy_from_slice(&(csum + 1).to_be_bytes());
        assert!(!verify(&pseudo(20), &header, &[]));
    }

    #[test]
    fn checksum_field_is_ignored_by_compute() {
        let mut header = ack_header();
        let clean = compute(&pseudo(20), &header, &[]);
        header[16] = 0xde;
        header[17] = 0xad;
        assert_eq!(compute(&pseudo(20), &header, &[]), clean);
    }

    #[test]
    fn odd_payload_is_padded() {
        let header = ack_header();
        let odd = compute(&pseudo(23), &header, b"abc");
        let padded = compute(&pseudo(23), &header, b"abc\0");
        assert_eq!(odd, padded);
    }

    #[test]
    fn zero_result_is_sent_as_all_ones() {
        // Pseudo-header and header words sum to 0xffff, so the complement is zero.
        let pseudo = PseudoHeader::new(Ipv4Addr::new(0, 0, 0, 0), Ipv4Addr::new(0, 0, 0, 0), 0, 0);
        let mut header = [0u8; 20];
        header[0] = 0xff;
        header[1] = 0xff;
        assert_eq!(compute(&pseudo, &header, &[]), 0xffff);

        header[16..18].copy_from_slice(&0xffffu16.to_be_bytes());
        assert!(verify(&pseudo, &header, &[]));
    }

    #[test]
    fn short_header_does_not_panic() {
        let header = ack_header();
        compute(&pseudo(17), &header[..17], &[]);
        compute(&pseudo(10), &header[..10], &[]);
    }
}
