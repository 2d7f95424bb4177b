//! PNG chunk types.
//!
//! A chunk type is four ASCII letters. The standard ones are named here;
//! anything else becomes [`ChunkType::Unknown`].

/// The type of a PNG chunk.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub enum ChunkType {
    /// Image header. Always first.
    Ihdr,

    /// Palette.
    Plte,

    /// Image data.
    Idat,

    /// Image trailer. Always last.
    Iend,

    /// Background color.
    Bkgd,

    /// Primary chromaticities and white point.
    Chrm,

    /// Image gamma.
    Gama,

    /// Embedded ICC profile.
    Iccp,

    /// Physical pixel dimensions.
    Phys,

    /// Standard RGB color space.
    Srgb,

    /// Transparency.
    Trns,

    /// Image histogram.
    Hist,

    /// Last modification time.
    Time,

    /// Suggested palette.
    Splt,

    /// Significant bits.
    Sbit,

    /// International textual data.
    Itxt,

    /// Textual data.
    Text,

    /// Compressed textual data.
    Ztxt,

    /// Exif.
    Exif,

    /// Anything else.
    Unknown([u8; 4]),
}

/// How the transcoder treats a chunk type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChunkClass {
    /// Required to display the image. Never dropped.
    Critical,

    /// Optional, but kept since it changes how the image looks.
    RetainedAncillary,

    /// Optional and dropped.
    StrippedAncillary,
}

impl ChunkType {
    /// Returns the four bytes that identify this chunk type.
    pub const fn fourcc(&self) -> [u8; 4] {
        match *self {
            ChunkType::Ihdr => *b"IHDR",
            ChunkType::Plte => *b"PLTE",
            ChunkType::Idat => *b"IDAT",
            ChunkType::Iend => *b"IEND",
            ChunkType::Bkgd => *b"bKGD",
            ChunkType::Chrm => *b"cHRM",
            ChunkType::Gama => *b"gAMA",
            ChunkType::Iccp => *b"iCCP",
            ChunkType::Phys => *b"pHYs",
            ChunkType::Srgb => *b"sRGB",
            ChunkType::Trns => *b"tRNS",
            ChunkType::Hist => *b"hIST",
            ChunkType::Time => *b"tIME",
            ChunkType::Splt => *b"sPLT",
            ChunkType::Sbit => *b"sBIT",
            ChunkType::Itxt => *b"iTXt",
            ChunkType::Text => *b"tEXt",
            ChunkType::Ztxt => *b"zTXt",
            ChunkType::Exif => *b"eXIf",
            ChunkType::Unknown(fourcc) => fourcc,
        }
    }

    /// Whether this is one of the four critical chunk types.
    pub const fn is_critical(&self) -> bool {
        matches!(
            self,
            ChunkType::Ihdr | ChunkType::Plte | ChunkType::Idat | ChunkType::Iend
        )
    }

    /// Sorts the chunk type into a [`ChunkClass`].
    ///
    /// Unknown types are always stripped, even if their first letter claims
    /// they're critical.
    pub const fn class(&self) -> ChunkClass {
        match self {
            ChunkType::Ihdr | ChunkType::Plte | ChunkType::Idat | ChunkType::Iend => {
                ChunkClass::Critical
            }

            ChunkType::Bkgd
            | ChunkType::Chrm
            | ChunkType::Gama
            | ChunkType::Iccp
            | ChunkType::Phys
            | ChunkType::Srgb
            | ChunkType::Trns => ChunkClass::RetainedAncillary,

            ChunkType::Hist
            | ChunkType::Time
            | ChunkType::Splt
            | ChunkType::Sbit
            | ChunkType::Itxt
            | ChunkType::Text
            | ChunkType::Ztxt
            | ChunkType::Exif
            | ChunkType::Unknown(_) => ChunkClass::StrippedAncillary,
        }
    }

    /// Whether the transcoder writes this chunk back out.
    pub const fn is_retained(&self) -> bool {
        !matches!(self.class(), ChunkClass::StrippedAncillary)
    }
}

impl From<[u8; 4]> for ChunkType {
    fn from(value: [u8; 4]) -> Self {
        match &value {
            b"IHDR" => ChunkType::Ihdr,
            b"PLTE" => ChunkType::Plte,
            b"IDAT" => ChunkType::Idat,
            b"IEND" => ChunkType::Iend,
            b"bKGD" => ChunkType::Bkgd,
            b"cHRM" => ChunkType::Chrm,
            b"gAMA" => ChunkType::Gama,
            b"iCCP" => ChunkType::Iccp,
            b"pHYs" => ChunkType::Phys,
            b"sRGB" => ChunkType::Srgb,
            b"tRNS" => ChunkType::Trns,
            b"hIST" => ChunkType::Hist,
            b"tIME" => ChunkType::Time,
            b"sPLT" => ChunkType::Splt,
            b"sBIT" => ChunkType::Sbit,
            b"iTXt" => ChunkType::Itxt,
            b"tEXt" => ChunkType::Text,
            b"zTXt" => ChunkType::Ztxt,
            b"eXIf" => ChunkType::Exif,
            _ => ChunkType::Unknown(value),
        }
    }
}

impl core::fmt::Display for ChunkType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let fourcc = self.fourcc();
        match core::str::from_utf8(&fourcc) {
            Ok(s) => f.write_str(s),
            Err(_) => write!(f, "{fourcc:02X?}"),
        }
    }
}
