//! Contains the transcoder for the PNG format.
//!
//! PNG, or the Portable Network Graphics format, is a run of chunks after an
//! eight-byte signature. Each chunk is a length, a four-letter type, data,
//! and a CRC over the type and data.
//!
//! Chunks before the first `IDAT` are read into memory and filtered. Only
//! critical chunks and the ancillary chunks that change how the image looks
//! survive. See [`ChunkType::class`]. From the first `IDAT` on, chunks are
//! streamed one at a time with the same filter applied. Everything after
//! `IEND` is copied as-is.

use std::io::{Read, Write};

use metasplice_types::png::ChunkType;

use crate::providers::shared::copy_tail;

mod chunk;
mod crc;
mod error;
pub mod text;

pub use chunk::{Chunk, MAX_CHUNK_LEN};
pub use crc::{Crc32, chunk_crc};
pub use error::PngTranscodeError;

use chunk::ChunkHeader;

/// Every PNG file starts with these eight bytes.
pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Rewrites a PNG, stripping ancillary chunks and optionally adding XMP.
///
/// If `xmp` is given, it's written in an `iTXt` chunk just before the first
/// `IDAT`. Any XMP already in the file is stripped along with every other
/// text chunk.
///
/// # Errors
///
/// If the input doesn't start with the PNG signature, this fails before
/// anything is written. Any later failure may leave partial output behind.
///
/// Chunks with bad CRCs aren't errors. They're warned about, then written
/// with a correct CRC.
pub fn transcode<R, W>(
    input: &mut R,
    output: &mut W,
    xmp: Option<&str>,
) -> Result<(), PngTranscodeError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    signature(input)?;
    output.write_all(&SIGNATURE)?;

    // buffer the chunks before the image data
    let mut head: Vec<Chunk> = Vec::new();
    let mut header: ChunkHeader = loop {
        let header: ChunkHeader = ChunkHeader::read(input)?;
        if matches!(header.ty, ChunkType::Idat | ChunkType::Iend) {
            break header;
        }
        head.push(Chunk::read_body(header, input)?);
    };

    for chunk in retain(head) {
        chunk.write_to(output)?;
    }

    if let Some(packet) = xmp {
        log::debug!("Adding `{}` bytes of XMP.", packet.len());
        text::xmp(packet).write_to(output)?;
    }

    // stream the rest, chunk by chunk
    loop {
        let ty: ChunkType = header.ty;
        if ty.is_retained() {
            chunk::stream(header, input, output)?;
        } else {
            log::debug!("Skipping chunk `{ty}` after image data.");
            chunk::skip(header, input)?;
        }

        if ty == ChunkType::Iend {
            break;
        }
        header = ChunkHeader::read(input)?;
    }

    let copied: u64 = copy_tail(input, output)?;
    if copied > 0 {
        log::debug!("Copied `{copied}` bytes found after `IEND`.");
    }

    Ok(())
}

/// Keeps only the chunks whose type is retained, in order.
pub fn retain(chunks: impl IntoIterator<Item = Chunk>) -> Vec<Chunk> {
    chunks
        .into_iter()
        .filter(|c| {
            let keep: bool = c.ty().is_retained();
            if !keep {
                log::debug!("Dropping chunk `{}`.", c.ty());
            }
            keep
        })
        .collect()
}

/// Checks that the input starts with the PNG signature.
fn signature<R: Read + ?Sized>(input: &mut R) -> Result<(), PngTranscodeError> {
    let mut read: Vec<u8> = Vec::with_capacity(SIGNATURE.len());
    (&mut *input)
        .take(SIGNATURE.len() as u64)
        .read_to_end(&mut read)?;

    let mut found = [0_u8; 8];
    found[..read.len()].copy_from_slice(&read);

    if read.len() < SIGNATURE.len() || found != SIGNATURE {
        log::error!("Input doesn't start with the PNG signature! got: `{found:02X?}`");
        return Err(PngTranscodeError::InvalidContainer { found });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use metasplice_types::png::ChunkType;

    use super::{Chunk, PngTranscodeError, SIGNATURE, retain, text, transcode};
    use crate::util::logger;

    fn chunk(ty: &[u8; 4], data: &[u8]) -> Chunk {
        Chunk::new(ChunkType::from(*ty), data.to_vec())
    }

    fn make_png(chunks: &[Chunk]) -> Vec<u8> {
        let mut out = SIGNATURE.to_vec();
        for c in chunks {
            c.write_to(&mut out).unwrap();
        }
        out
    }

    fn run(input: &[u8], xmp: Option<&str>) -> Vec<u8> {
        let mut out = Vec::new();
        transcode(&mut &*input, &mut out, xmp).unwrap();
        out
    }

    #[test]
    fn retain_filters_in_one_pass() {
        let kept = retain([
            chunk(b"IHDR", &[0; 13]),
            chunk(b"tIME", &[0; 7]),
            chunk(b"gAMA", &[0; 4]),
            chunk(b"zzZZ", &[]),
            chunk(b"pHYs", &[0; 9]),
        ]);

        assert_eq!(
            kept.iter().map(Chunk::ty).collect::<Vec<_>>(),
            vec![ChunkType::Ihdr, ChunkType::Gama, ChunkType::Phys]
        );
    }

    #[test]
    fn strips_and_keeps() {
        logger();

        let ihdr = chunk(b"IHDR", &[0; 13]);
        let srgb = chunk(b"sRGB", &[0]);
        let idat = chunk(b"IDAT", &[1, 2, 3, 4]);
        let iend = chunk(b"IEND", &[]);

        let png = make_png(&[
            ihdr.clone(),
            chunk(b"tEXt", b"Comment\0hi"),
            srgb.clone(),
            chunk(b"eXIf", b"MM\0*"),
            idat.clone(),
            chunk(b"tIME", &[0; 7]),
            iend.clone(),
        ]);

        assert_eq!(run(&png, None), make_png(&[ihdr, srgb, idat, iend]));
    }

    #[test]
    fn xmp_goes_before_image_data() {
        logger();

        let ihdr = chunk(b"IHDR", &[0; 13]);
        let idat = chunk(b"IDAT", &[9; 100]);
        let iend = chunk(b"IEND", &[]);
        let png = make_png(&[
            ihdr.clone(),
            text::xmp("<old/>"),
            idat.clone(),
            iend.clone(),
        ]);

        assert_eq!(
            run(&png, Some("<new/>")),
            make_png(&[ihdr, text::xmp("<new/>"), idat, iend])
        );
    }

    #[test]
    fn trailing_bytes_survive() {
        logger();

        let mut png = make_png(&[
            chunk(b"IHDR", &[0; 13]),
            chunk(b"IDAT", &[0; 4]),
            chunk(b"IEND", &[]),
        ]);
        png.extend_from_slice(b"trailer");

        let out = run(&png, None);
        assert_eq!(out, png);
    }

    #[test]
    fn not_a_png_writes_nothing() {
        logger();

        let mut out = Vec::new();
        assert!(matches!(
            transcode(&mut [0xFF, 0xD8, 0xFF].as_slice(), &mut out, None),
            Err(PngTranscodeError::InvalidContainer {
                found: [0xFF, 0xD8, 0xFF, 0, 0, 0, 0, 0]
            })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn missing_iend_fails() {
        logger();

        let png = make_png(&[chunk(b"IHDR", &[0; 13]), chunk(b"IDAT", &[0; 4])]);

        let mut out = Vec::new();
        assert!(matches!(
            transcode(&mut png.as_slice(), &mut out, None),
            Err(PngTranscodeError::UnexpectedEndOfStream {
                reading: "chunk length"
            })
        ));
    }
}
