use std::io::Read;

use metasplice_types::jpeg::Marker;

use crate::providers::shared::{read_array, read_vec};

use super::{JpegTranscodeError, segment::Segment};

/// What the scanner found next.
///
/// `fill` counts the extra `0xFF` bytes found before the marker. They're
/// legal padding, and writing them back keeps the output byte-identical.
pub(super) enum Scanned {
    /// A segment in the metadata region.
    Segment { fill: usize, segment: Segment },

    /// The marker that ends the metadata region: either `SOS` or `EOI`.
    ///
    /// Only the marker itself has been consumed.
    End { fill: usize, marker: Marker },
}

/// Checks that the input starts with `SOI`.
///
/// Nothing gets written if this fails.
pub(super) fn soi<R: Read + ?Sized>(input: &mut R) -> Result<(), JpegTranscodeError> {
    let found: [u8; 2] = read_array(input).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            log::error!("Input was too short to be a JPEG.");
            JpegTranscodeError::InvalidContainer { found: [0_u8; 2] }
        } else {
            JpegTranscodeError::from(e)
        }
    })?;

    if u16::from_be_bytes(found) != Marker::Soi.code() {
        log::error!(
            "The first marker of a JPEG file should be `SOI`, \
            but it wasn't! \
            got: `{found:02X?}`"
        );
        return Err(JpegTranscodeError::InvalidContainer { found });
    }

    Ok(())
}

/// Reads one marker, returning it with the number of fill bytes (extra
/// `0xFF`s) that came before its code.
fn marker<R: Read + ?Sized>(input: &mut R) -> Result<(usize, Marker), JpegTranscodeError> {
    let [first] = read_array::<1, R>(input).map_err(JpegTranscodeError::reading("marker"))?;
    if first != 0xFF {
        log::error!("Marker's first byte should be `0xFF`, but got `{first:#04X}`.");
        return Err(JpegTranscodeError::MarkerByteWasWrong(first));
    }

    let mut fill: usize = 0_usize;
    let [mut code] = read_array::<1, R>(input).map_err(JpegTranscodeError::reading("marker"))?;
    while code == 0xFF {
        fill += 1;
        [code] = read_array::<1, R>(input).map_err(JpegTranscodeError::reading("marker"))?;
    }

    Ok((fill, Marker::from(u16::from_be_bytes([0xFF, code]))))
}

/// Reads the next segment of the metadata region.
pub(super) fn next_segment<R: Read + ?Sized>(input: &mut R) -> Result<Scanned, JpegTranscodeError> {
    let (fill, marker) = marker(input)?;
    if fill > 0 {
        log::trace!("Found `{fill}` fill bytes before {marker}.");
    }

    match marker {
        Marker::Sos | Marker::Eoi => {
            log::trace!("Found {marker}. Metadata region is over.");
            return Ok(Scanned::End { fill, marker });
        }

        m if m.is_standalone() => {
            log::trace!("Found standalone marker {m}.");
            return Ok(Scanned::Segment {
                fill,
                segment: Segment::Standalone { marker: m },
            });
        }

        _ => (),
    }

    // grab the length. it includes its own two bytes
    let len: u16 = u16::from_be_bytes(
        read_array(input).map_err(JpegTranscodeError::reading("segment length"))?,
    );
    if len < 2 {
        log::error!("Segment {marker} declared a length of `{len}`, which is too short!");
        return Err(JpegTranscodeError::SegmentLengthTooShort { marker, len });
    }

    let payload: Vec<u8> = read_vec(input, len as usize - 2)
        .map_err(JpegTranscodeError::reading("segment payload"))?;

    log::trace!("Found segment {marker} with `{}` bytes of payload.", payload.len());
    Ok(Scanned::Segment {
        fill,
        segment: Segment::Full { marker, payload },
    })
}
