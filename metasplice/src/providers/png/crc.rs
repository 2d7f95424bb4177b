//! CRC-32, as PNG uses it: ISO 3309 polynomial, reflected, with the usual
//! all-ones start and final inversion.

const POLY: u32 = 0xEDB8_8320;

/// One entry per byte value.
static TABLE: [u32; 256] = make_table();

const fn make_table() -> [u32; 256] {
    let mut table = [0_u32; 256];
    let mut n = 0_usize;

    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 != 0 { POLY ^ (c >> 1) } else { c >> 1 };
            k += 1;
        }
        table[n] = c;
        n += 1;
    }

    table
}

/// A running CRC-32.
///
/// Feed it the chunk type, then the data, in as many pieces as you like.
#[derive(Clone, Copy, Debug)]
pub struct Crc32(u32);

impl Crc32 {
    pub fn new() -> Self {
        Self(0xFFFF_FFFF)
    }

    pub fn update(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = TABLE[((self.0 ^ b as u32) & 0xFF) as usize] ^ (self.0 >> 8);
        }
    }

    pub fn finish(self) -> u32 {
        !self.0
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

/// The CRC of a chunk with this type and data.
pub fn chunk_crc(fourcc: &[u8; 4], data: &[u8]) -> u32 {
    let mut crc = Crc32::new();
    crc.update(fourcc);
    crc.update(data);
    crc.finish()
}

#[cfg(test)]
mod tests {
    use super::{Crc32, chunk_crc};

    #[test]
    fn known_values() {
        // the standard check value
        let mut crc = Crc32::new();
        crc.update(b"123456789");
        assert_eq!(crc.finish(), 0xCBF4_3926);

        // every PNG's IEND chunk carries this
        assert_eq!(chunk_crc(b"IEND", &[]), 0xAE42_6082);
    }

    #[test]
    fn pieces_match_whole() {
        let data: Vec<u8> = (0..=255_u8).cycle().take(10_000).collect();

        let mut pieces = Crc32::new();
        pieces.update(b"IDAT");
        for part in data.chunks(777) {
            pieces.update(part);
        }

        assert_eq!(pieces.finish(), chunk_crc(b"IDAT", &data));
    }
}
