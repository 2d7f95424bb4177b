/// An error from building or parsing Photoshop image resource blocks.
#[derive(Clone, Debug, PartialEq, PartialOrd, Hash)]
pub enum IrbError {
    /// The resource's name didn't fit in its one-byte length prefix.
    NameTooLong {
        /// The name's length, in bytes.
        len: usize,
    },

    /// The resource's data didn't fit in its four-byte size field.
    DataTooLong {
        /// The data's length, in bytes.
        len: usize,
    },

    /// A resource block didn't start with `8BIM`.
    BadSignature {
        /// The four bytes found instead.
        found: [u8; 4],
    },

    /// A resource block ended before its declared contents did.
    Truncated {
        /// Offset of the resource block that was cut short.
        offset: usize,
    },
}

impl core::fmt::Display for IrbError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NameTooLong { len } => write!(
                f,
                "Image resource name was `{len}` bytes long, but the maximum is `255`."
            ),
            Self::DataTooLong { len } => write!(
                f,
                "Image resource data was `{len}` bytes long, but the maximum is `{}`.",
                u32::MAX
            ),
            Self::BadSignature { found } => write!(
                f,
                "Image resource block should start with `8BIM`, but got: `{found:02X?}`"
            ),
            Self::Truncated { offset } => write!(
                f,
                "Image resource block at offset `{offset}` ran out of data."
            ),
        }
    }
}

impl core::error::Error for IrbError {}
