/// An error that occurred while handling IPTC.
#[derive(Clone, Debug, PartialEq, PartialOrd, Hash)]
pub enum IptcError {
    /// A dataset said its value was longer than the rest of the buffer.
    ///
    /// Datasets decoded before this one are still usable.
    TruncatedRecord {
        /// Where the dataset's tag marker was found.
        offset: usize,

        /// The value length the dataset declared.
        declared: u16,

        /// How many bytes were actually left for the value.
        remaining: usize,
    },

    /// A dataset's value was too long to be described by its `u16` size.
    DataTooLong {
        /// The length of the value we were given.
        len: usize,
    },
}

impl core::fmt::Display for IptcError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TruncatedRecord {
                offset,
                declared,
                remaining,
            } => write!(
                f,
                "IPTC dataset at offset `{offset}` declared `{declared}` bytes \
                of data, but only `{remaining}` bytes were left."
            ),

            Self::DataTooLong { len } => write!(
                f,
                "IPTC dataset value was `{len}` bytes long, but the maximum is `{}`.",
                u16::MAX
            ),
        }
    }
}

impl core::error::Error for IptcError {}
