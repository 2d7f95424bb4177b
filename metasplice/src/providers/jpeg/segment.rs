use std::io::Write;

use metasplice_types::jpeg::Marker;

use super::JpegTranscodeError;

/// The largest payload a segment can carry.
///
/// The length field is a `u16` that counts its own two bytes.
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize - 2;

/// One segment of a JPEG file's metadata region.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A marker with no data.
    Standalone {
        /// An identifier for a marker.
        marker: Marker,
    },

    /// A marker with a payload and length.
    Full {
        /// An identifier for a marker.
        marker: Marker,

        /// The segment's payload.
        ///
        /// This does NOT include the two length bytes.
        payload: Vec<u8>,
    },
}

impl Segment {
    /// Creates a segment with a payload.
    ///
    /// # Errors
    ///
    /// Fails if the payload is longer than [`MAX_PAYLOAD_LEN`].
    pub fn full(marker: Marker, payload: Vec<u8>) -> Result<Self, JpegTranscodeError> {
        if payload.len() > MAX_PAYLOAD_LEN {
            log::error!(
                "Payload for {marker} is too large for one segment! len: `{}`",
                payload.len()
            );
            return Err(JpegTranscodeError::SegmentTooLarge {
                marker,
                len: payload.len(),
            });
        }

        Ok(Self::Full { marker, payload })
    }

    /// This segment's marker.
    pub fn marker(&self) -> Marker {
        match self {
            Segment::Standalone { marker } | Segment::Full { marker, .. } => *marker,
        }
    }

    /// This segment's payload, if it has one.
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Segment::Standalone { .. } => None,
            Segment::Full { payload, .. } => Some(payload),
        }
    }

    /// The length field as written to the file, if this segment has one.
    ///
    /// That's the payload length plus 2. A hand-built [`Segment::Full`] can
    /// have a payload too large for the `u16` field; [`Segment::write_to`]
    /// refuses to write those.
    pub fn declared_len(&self) -> Option<usize> {
        self.payload().map(|p| p.len() + 2)
    }

    /// Writes the segment: its marker, then its length and payload if it
    /// has them.
    ///
    /// # Errors
    ///
    /// Fails with [`JpegTranscodeError::SegmentTooLarge`] before writing
    /// anything if the payload doesn't fit in one segment.
    pub fn write_to<W: Write + ?Sized>(&self, output: &mut W) -> Result<(), JpegTranscodeError> {
        let marker: Marker = self.marker();

        let framed: Option<(u16, &[u8])> = match self.payload() {
            None => None,
            Some(payload) => {
                let Ok(len) = u16::try_from(payload.len() + 2) else {
                    log::error!(
                        "Can't write {marker}: payload is too large! len: `{}`",
                        payload.len()
                    );
                    return Err(JpegTranscodeError::SegmentTooLarge {
                        marker,
                        len: payload.len(),
                    });
                };
                Some((len, payload))
            }
        };

        output.write_all(&marker.code().to_be_bytes())?;
        if let Some((len, payload)) = framed {
            output.write_all(&len.to_be_bytes())?;
            output.write_all(payload)?;
        }

        Ok(())
    }
}
