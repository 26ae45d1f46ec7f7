//! TCP options codec
//!
//! Options follow the fixed 20-byte header. Every option starts with a kind
//! byte; all kinds except End-of-Option-List and No-Operation are followed by
//! a length byte covering the kind byte, the length byte and the payload.

use byteorder::{BigEndian, ByteOrder};
use log::debug;

use crate::error::{Error, OptionError, Result};

/// Largest options region a 4-bit data offset can describe: (15 - 5) * 4
pub const MAX_OPTIONS_LEN: usize = 40;

/// Largest payload an option with a length byte can carry: 255 - 2
pub const MAX_OPTION_DATA_LEN: usize = 253;

/// Option kind tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKind {
    EndOfOptionList,
    NoOperation,
    MaximumSegmentSize,
    /// Any kind without dedicated handling; still parsed as kind/length/data.
    Unknown(u8),
}

impl From<u8> for OptionKind {
    fn from(kind: u8) -> Self {
        match kind {
            0 => OptionKind::EndOfOptionList,
            1 => OptionKind::NoOperation,
            2 => OptionKind::MaximumSegmentSize,
            other => OptionKind::Unknown(other),
        }
    }
}

impl From<OptionKind> for u8 {
    fn from(kind: OptionKind) -> Self {
        match kind {
            OptionKind::EndOfOptionList => 0,
            OptionKind::NoOperation => 1,
            OptionKind::MaximumSegmentSize => 2,
            OptionKind::Unknown(other) => other,
        }
    }
}

/// A single TCP option
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TcpOption {
    EndOfOptionList,
    NoOperation,
    MaximumSegmentSize(u16),
    Unknown { kind: u8, data: Vec<u8> },
}

impl TcpOption {
    pub fn kind(&self) -> OptionKind {
        match self {
            TcpOption::EndOfOptionList => OptionKind::EndOfOptionList,
            TcpOption::NoOperation => OptionKind::NoOperation,
            TcpOption::MaximumSegmentSize(_) => OptionKind::MaximumSegmentSize,
            TcpOption::Unknown { kind, .. } => OptionKind::from(*kind),
        }
    }

    /// Number of bytes this option occupies on the wire
    pub fn encoded_len(&self) -> usize {
        match self {
            TcpOption::EndOfOptionList | TcpOption::NoOperation => 1,
            TcpOption::MaximumSegmentSize(_) => 4,
            TcpOption::Unknown { data, .. } => 2 + data.len(),
        }
    }

    fn write(&self, buf: &mut Vec<u8>) {
        match self {
            TcpOption::EndOfOptionList => buf.push(0),
            TcpOption::NoOperation => buf.push(1),
            TcpOption::MaximumSegmentSize(mss) => {
                buf.extend_from_slice(&[2, 4]);
                buf.extend_from_slice(&mss.to_be_bytes());
            }
            TcpOption::Unknown { kind, data } => {
                buf.push(*kind);
                buf.push((2 + data.len()) as u8);
                buf.extend_from_slice(data);
            }
        }
    }
}

/// How the options region is filled up to the next 32-bit boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Padding {
    /// Zero bytes, which read back as End-of-Option-List followed by zeros
    #[default]
    EndOfOptionList,
    /// No-Operation bytes
    NoOperation,
}

/// Serialize options in list order, without padding
///
/// End-of-Option-List may only appear as the last entry, and `Unknown` may
/// not stand in for a kind that has its own variant.
pub fn encode_options(options: &[TcpOption]) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(options.iter().map(TcpOption::encoded_len).sum());

    for (i, option) in options.iter().enumerate() {
        match option {
            TcpOption::EndOfOptionList if i + 1 != options.len() => {
                return Err(Error::invalid_field(
                    "options",
                    "end-of-option-list must be the last option",
                ));
            }
            TcpOption::Unknown { kind, .. } if *kind <= 2 => {
                return Err(Error::invalid_field(
                    "options",
                    format!("kind {} must use its dedicated variant", kind),
                ));
            }
            TcpOption::Unknown { kind, data } if data.len() > MAX_OPTION_DATA_LEN => {
                return Err(Error::invalid_field(
                    "options",
                    format!(
                        "kind {} carries {} bytes, at most {} fit",
                        kind,
                        data.len(),
                        MAX_OPTION_DATA_LEN
                    ),
                ));
            }
            _ => {}
        }
        option.write(&mut buf);
    }

    Ok(buf)
}

/// Pad an encoded options region to a multiple of 4 bytes
///
/// Bytes after an explicit End-of-Option-List are always zero.
pub fn pad_options(buf: &mut Vec<u8>, last: Option<&TcpOption>, padding: Padding) {
    let fill = match (last, padding) {
        (Some(TcpOption::EndOfOptionList), _) => 0,
        (_, Padding::EndOfOptionList) => 0,
        (_, Padding::NoOperation) => 1,
    };
    while buf.len() % 4 != 0 {
        buf.push(fill);
    }
}

/// Parse an options region
///
/// Parsing stops at End-of-Option-List, which is kept as the last entry;
/// whatever follows it is not inspected. No-Operation entries are kept in
/// place. Error offsets are relative to the start of `data`.
pub fn decode_options(data: &[u8]) -> Result<Vec<TcpOption>> {
    let mut options = Vec::new();
    let mut i = 0;

    while i < data.len() {
        let kind = data[i];
        match OptionKind::from(kind) {
            OptionKind::EndOfOptionList => {
                options.push(TcpOption::EndOfOptionList);
                break;
            }
            OptionKind::NoOperation => {
                options.push(TcpOption::NoOperation);
                i += 1;
                continue;
            }
            _ => {}
        }

        let length = *data
            .get(i + 1)
            .ok_or_else(|| malformed(i, OptionError::MissingLength { kind }))?;
        if length < 2 {
            return Err(malformed(i, OptionError::IllegalLength { kind, length }));
        }
        let end = i + length as usize;
        if end > data.len() {
            return Err(malformed(
                i,
                OptionError::LengthExceedsBuffer {
                    kind,
                    length,
                    remaining: data.len() - i,
                },
            ));
        }
        let body = &data[i + 2..end];

        let option = match OptionKind::from(kind) {
            OptionKind::MaximumSegmentSize => {
                if length != 4 {
                    return Err(malformed(i, OptionError::BadMssLength { length }));
                }
                TcpOption::MaximumSegmentSize(BigEndian::read_u16(body))
            }
            _ => TcpOption::Unknown {
                kind,
                data: body.to_vec(),
            },
        };
        options.push(option);
        i = end;
    }

    Ok(options)
}

fn malformed(offset: usize, cause: OptionError) -> Error {
    debug!("rejecting options region at byte {}: {}", offset, cause);
    Error::MalformedOptions { offset, cause }
}
