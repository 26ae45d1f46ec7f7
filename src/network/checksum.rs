//! Internet checksum (RFC 1071) accumulator
//!
//! Sums 16-bit big-endian words into a 32-bit accumulator and folds the
//! carries back into the low 16 bits explicitly, so the result never depends
//! on integer wraparound.

/// Streaming one's-complement sum over one or more byte slices
///
/// Slices are treated as one contiguous byte stream: an odd trailing byte in
/// one call is paired with the first byte of the next. A final odd byte is
/// padded with zero when the sum is taken.
#[derive(Debug, Clone, Copy, Default)]
pub struct Checksum {
    sum: u32,
    pending: Option<u8>,
}

impl Checksum {
    /// Start a new accumulator with a zero sum
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a previously computed partial sum
    pub fn with_initial(init: u16) -> Self {
        Checksum {
            sum: init as u32,
            pending: None,
        }
    }

    /// Add a byte slice to the running sum
    pub fn add(&mut self, data: &[u8]) -> &mut Self {
        let mut data = data;

        if let Some(high) = self.pending.take() {
            match data.split_first() {
                Some((&low, rest)) => {
                    self.add_word(u16::from_be_bytes([high, low]));
                    data = rest;
                }
                None => {
                    self.pending = Some(high);
                    return self;
                }
            }
        }

        let mut chunks = data.chunks_exact(2);
        for chunk in &mut chunks {
            self.add_word(u16::from_be_bytes([chunk[0], chunk[1]]));
        }
        if let [last] = chunks.remainder() {
            self.pending = Some(*last);
        }
        self
    }

    /// Add a single 16-bit word
    pub fn add_u16(&mut self, word: u16) -> &mut Self {
        self.add(&word.to_be_bytes())
    }

    fn add_word(&mut self, word: u16) {
        self.sum += word as u32;
        // Keep headroom in the accumulator for arbitrarily long inputs.
        if self.sum & 0x8000_0000 != 0 {
            self.sum = fold(self.sum) as u32;
        }
    }

    /// The folded 16-bit one's-complement sum, without the final complement
    pub fn sum(&self) -> u16 {
        let mut sum = self.sum;
        if let Some(high) = self.pending {
            sum += (high as u32) << 8;
        }
        fold(sum)
    }

    /// The one's complement of the folded sum
    pub fn finish(&self) -> u16 {
        !self.sum()
    }
}

/// Add the high 16 bits into the low 16 bits until no carry remains
fn fold(mut sum: u32) -> u16 {
    while (sum >> 16) > 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    sum as u16
}
