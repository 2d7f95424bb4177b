use std::{io, sync::Arc};

use metasplice_types::png::ChunkType;

/// An error that stopped a PNG from being rewritten.
///
/// Bytes already written to the output aren't taken back.
#[derive(Clone, Debug)]
pub enum PngTranscodeError {
    /// The input didn't start with the PNG signature, so nothing was
    /// written.
    InvalidContainer {
        /// The first eight bytes of the input, zero-padded if it was shorter.
        found: [u8; 8],
    },

    /// The input ended in the middle of something.
    UnexpectedEndOfStream {
        /// What we were trying to read.
        reading: &'static str,
    },

    /// A chunk declared a length over `2^31 - 1`, which PNG doesn't allow.
    ChunkTooLong {
        /// The chunk's type.
        ty: ChunkType,

        /// Its declared length.
        len: u32,
    },

    /// Reading or writing failed for some other reason.
    Io(
        // note: `Arc` allows us to impl `Clone`
        Arc<io::Error>,
    ),
}

impl PngTranscodeError {
    /// Creates a mapper for errors from reading `what`.
    pub(super) fn reading(what: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                log::error!("PNG ended while reading {what}!");
                Self::UnexpectedEndOfStream { reading: what }
            } else {
                log::error!("Failed to read {what}! err: {e}");
                Self::Io(Arc::new(e))
            }
        }
    }
}

impl From<io::Error> for PngTranscodeError {
    fn from(value: io::Error) -> Self {
        log::error!("I/O failed while handling PNG! err: {value}");
        Self::Io(Arc::new(value))
    }
}

impl core::fmt::Display for PngTranscodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidContainer { found } => write!(
                f,
                "Input doesn't start with the PNG signature. got: `{found:02X?}`"
            ),
            Self::UnexpectedEndOfStream { reading } => {
                write!(f, "The PNG ended early, while reading {reading}.")
            }
            Self::ChunkTooLong { ty, len } => write!(
                f,
                "PNG chunk `{ty}` claims `{len}` bytes, but the limit is `{}`.",
                i32::MAX
            ),
            Self::Io(e) => write!(f, "I/O error while handling PNG. err: {e}"),
        }
    }
}

impl core::error::Error for PngTranscodeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
