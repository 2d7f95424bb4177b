use std::{io, sync::Arc};

use metasplice_types::jpeg::Marker;

use crate::{iptc::error::IptcError, irb::error::IrbError};

/// An error that stopped a JPEG from being read or rewritten.
///
/// Bytes already written to the output aren't taken back. Callers should
/// throw away partial output when they get one of these.
#[derive(Clone, Debug)]
pub enum JpegTranscodeError {
    /// A JPEG file must start with `SOI` (`0xFFD8`).
    ///
    /// This one didn't, so nothing was written.
    InvalidContainer {
        /// The first two bytes of the input.
        found: [u8; 2],
    },

    /// The first byte of a marker should be `0xFF`.
    ///
    /// It wasn't!
    MarkerByteWasWrong(u8),

    /// The input ended in the middle of something.
    UnexpectedEndOfStream {
        /// What we were trying to read.
        reading: &'static str,
    },

    /// A segment's length was below 2, so it can't even cover itself.
    SegmentLengthTooShort {
        /// The afflicted segment's marker.
        marker: Marker,

        /// The length it declared.
        len: u16,
    },

    /// A payload was too big to fit in one segment.
    SegmentTooLarge {
        /// The segment's marker.
        marker: Marker,

        /// The payload's length, in bytes.
        len: usize,
    },

    /// Existing IPTC couldn't be decoded.
    Iptc(IptcError),

    /// The new image resource block couldn't be built.
    Irb(IrbError),

    /// Reading or writing failed for some other reason.
    Io(
        // note: `Arc` allows us to impl `Clone`
        Arc<io::Error>,
    ),
}

impl JpegTranscodeError {
    /// Creates a mapper for errors from reading `what`.
    ///
    /// Running out of input becomes `UnexpectedEndOfStream`.
    pub(super) fn reading(what: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                log::error!("JPEG ended while reading {what}!");
                Self::UnexpectedEndOfStream { reading: what }
            } else {
                log::error!("Failed to read {what}! err: {e}");
                Self::Io(Arc::new(e))
            }
        }
    }
}

impl From<io::Error> for JpegTranscodeError {
    fn from(value: io::Error) -> Self {
        log::error!("I/O failed while handling JPEG! err: {value}");
        Self::Io(Arc::new(value))
    }
}

impl From<IptcError> for JpegTranscodeError {
    fn from(value: IptcError) -> Self {
        Self::Iptc(value)
    }
}

impl From<IrbError> for JpegTranscodeError {
    fn from(value: IrbError) -> Self {
        Self::Irb(value)
    }
}

impl core::fmt::Display for JpegTranscodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidContainer { found } => write!(
                f,
                "A JPEG file's first marker should be SOI (`0xFFD8`), \
                but the file started with: `{found:02X?}`"
            ),

            Self::MarkerByteWasWrong(other) => write!(
                f,
                "JPEG marker's first byte was wrong. \
                    expected: `255`; \
                    got: `{other}`",
            ),

            Self::UnexpectedEndOfStream { reading } => {
                write!(f, "The JPEG ended early, while reading {reading}.")
            }

            Self::SegmentLengthTooShort { marker, len } => write!(
                f,
                "JPEG segment {marker} had a length of `{len}`, \
                but lengths include their own 2 bytes."
            ),

            Self::SegmentTooLarge { marker, len } => write!(
                f,
                "JPEG segment {marker} would carry `{len}` bytes, \
                but the maximum is `{}`.",
                u16::MAX - 2
            ),

            Self::Iptc(e) => write!(f, "Existing IPTC couldn't be decoded. err: {e}"),
            Self::Irb(e) => write!(f, "Couldn't build image resource block. err: {e}"),
            Self::Io(e) => write!(f, "I/O error while handling JPEG. err: {e}"),
        }
    }
}

impl core::error::Error for JpegTranscodeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Iptc(e) => Some(e),
            Self::Irb(e) => Some(e),
            Self::Io(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
