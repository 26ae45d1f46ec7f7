//! TCP control bits
//!
//! Byte 13 of the header carries the eight control bits in RFC 793/3168
//! order, most significant first: CWR ECE URG ACK PSH RST SYN FIN.

use bitflags::bitflags;

bitflags! {
    /// Control bits carried in byte 13 of the TCP header
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct TcpFlags: u8 {
        const FIN = 0b0000_0001;
        const SYN = 0b0000_0010;
        const RST = 0b0000_0100;
        const PSH = 0b0000_1000;
        const ACK = 0b0001_0000;
        const URG = 0b0010_0000;
        const ECE = 0b0100_0000;
        const CWR = 0b1000_0000;
    }
}

impl From<u8> for TcpFlags {
    fn from(byte: u8) -> Self {
        // All eight bits are defined, so nothing is lost.
        TcpFlags::from_bits_retain(byte)
    }
}

impl From<TcpFlags> for u8 {
    fn from(flags: TcpFlags) -> Self {
        flags.bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_positions() {
        assert_eq!(u8::from(TcpFlags::SYN | TcpFlags::ACK), 0x12);
        assert_eq!(u8::from(TcpFlags::CWR | TcpFlags::ECE), 0xc0);
        assert_eq!(TcpFlags::from(0x29), TcpFlags::URG | TcpFlags::PSH | TcpFlags::FIN);
        assert_eq!(TcpFlags::from(0xff), TcpFlags::all());
    }
}
