//! JPEG marker codes.
//!
//! Every JPEG segment starts with a two-byte marker: `0xFF`, then a code.
//! [`Marker`] names the codes from ITU T.81, and keeps anything else as
//! [`Marker::Unknown`] so it can be written back out unchanged.

/// A JPEG marker.
///
/// Numbered families (`SOFn`, `RSTn`, `APPn`, `JPGn`) carry their index.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub enum Marker {
    /// Start of image.
    Soi,

    /// End of image.
    Eoi,

    /// Start of scan. Entropy-coded data follows its header.
    Sos,

    /// Start of frame, `n` in `0..=15` except 4, 8, and 12.
    Sof(u8),

    /// Define Huffman table(s).
    Dht,

    /// Define arithmetic coding conditioning(s).
    Dac,

    /// Define quantization table(s).
    Dqt,

    /// Define number of lines.
    Dnl,

    /// Define restart interval.
    Dri,

    /// Define hierarchical progression.
    Dhp,

    /// Expand reference component(s).
    Exp,

    /// Restart marker, `n` in `0..=7`.
    Rst(u8),

    /// Application segment, `n` in `0..=15`.
    App(u8),

    /// Comment.
    Com,

    /// Reserved for JPEG extensions.
    Jpg,

    /// Reserved for JPEG extensions, `n` in `0..=13`.
    Jpgn(u8),

    /// For temporary private use in arithmetic coding.
    Tem,

    /// Any other code, kept as its raw two bytes.
    Unknown(u16),
}

impl Marker {
    /// Whether this marker stands alone, without a length or payload.
    pub const fn is_standalone(&self) -> bool {
        matches!(
            self,
            Marker::Soi | Marker::Eoi | Marker::Rst(_) | Marker::Tem | Marker::Jpg | Marker::Jpgn(_)
        )
    }

    /// Returns the raw two-byte code.
    pub const fn code(&self) -> u16 {
        match *self {
            Marker::Soi => 0xFFD8,
            Marker::Eoi => 0xFFD9,
            Marker::Sos => 0xFFDA,
            Marker::Sof(n) => 0xFFC0 + n as u16,
            Marker::Dht => 0xFFC4,
            Marker::Dac => 0xFFCC,
            Marker::Dqt => 0xFFDB,
            Marker::Dnl => 0xFFDC,
            Marker::Dri => 0xFFDD,
            Marker::Dhp => 0xFFDE,
            Marker::Exp => 0xFFDF,
            Marker::Rst(n) => 0xFFD0 + n as u16,
            Marker::App(n) => 0xFFE0 + n as u16,
            Marker::Com => 0xFFFE,
            Marker::Jpg => 0xFFC8,
            Marker::Jpgn(n) => 0xFFF0 + n as u16,
            Marker::Tem => 0xFF01,
            Marker::Unknown(raw) => raw,
        }
    }
}

impl From<u16> for Marker {
    fn from(value: u16) -> Self {
        let [prefix, code] = value.to_be_bytes();
        if prefix != 0xFF {
            return Marker::Unknown(value);
        }

        match code {
            0xD8 => Marker::Soi,
            0xD9 => Marker::Eoi,
            0xDA => Marker::Sos,
            0xC4 => Marker::Dht,
            0xC8 => Marker::Jpg,
            0xCC => Marker::Dac,
            0xC0..=0xCF => Marker::Sof(code - 0xC0),
            0xDB => Marker::Dqt,
            0xDC => Marker::Dnl,
            0xDD => Marker::Dri,
            0xDE => Marker::Dhp,
            0xDF => Marker::Exp,
            0xD0..=0xD7 => Marker::Rst(code - 0xD0),
            0xE0..=0xEF => Marker::App(code - 0xE0),
            0xF0..=0xFD => Marker::Jpgn(code - 0xF0),
            0xFE => Marker::Com,
            0x01 => Marker::Tem,
            _ => Marker::Unknown(value),
        }
    }
}

impl From<Marker> for u16 {
    fn from(value: Marker) -> Self {
        value.code()
    }
}

impl core::fmt::Display for Marker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Marker::Sof(n) => write!(f, "SOF{n}"),
            Marker::Rst(n) => write!(f, "RST{n}"),
            Marker::App(n) => write!(f, "APP{n}"),
            Marker::Jpgn(n) => write!(f, "JPG{n}"),
            Marker::Unknown(raw) => write!(f, "unknown marker `{raw:#06X}`"),
            other => f.write_str(match other {
                Marker::Soi => "SOI",
                Marker::Eoi => "EOI",
                Marker::Sos => "SOS",
                Marker::Dht => "DHT",
                Marker::Dac => "DAC",
                Marker::Dqt => "DQT",
                Marker::Dnl => "DNL",
                Marker::Dri => "DRI",
                Marker::Dhp => "DHP",
                Marker::Exp => "EXP",
                Marker::Com => "COM",
                Marker::Jpg => "JPG",
                Marker::Tem => "TEM",
                _ => unreachable!("numbered markers are handled above"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Marker;

    #[test]
    fn every_code_round_trips() {
        for raw in 0_u16..=u16::MAX {
            assert_eq!(u16::from(Marker::from(raw)), raw, "code `{raw:#06X}`");
        }
    }

    #[test]
    fn families_are_indexed() {
        assert_eq!(Marker::from(0xFFE1), Marker::App(1));
        assert_eq!(Marker::from(0xFFED), Marker::App(13));
        assert_eq!(Marker::from(0xFFC2), Marker::Sof(2));
        assert_eq!(Marker::from(0xFFF3), Marker::Jpgn(3));
        assert_eq!(Marker::from(0xFF02), Marker::Unknown(0xFF02));
        assert_eq!(Marker::from(0xFF01), Marker::Tem);
    }

    #[test]
    fn standalone_markers() {
        assert!(Marker::Tem.is_standalone());
        assert!(Marker::Rst(3).is_standalone());
        assert!(Marker::Jpgn(0).is_standalone());
        assert!(!Marker::Com.is_standalone());
        assert!(!Marker::Unknown(0xFF02).is_standalone());
    }
}
