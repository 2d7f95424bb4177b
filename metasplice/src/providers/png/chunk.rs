use std::io::{self, Read, Write};

use metasplice_types::png::ChunkType;

use crate::providers::shared::{read_array, read_vec};

use super::{PngTranscodeError, crc};

/// The largest length a chunk may declare.
pub const MAX_CHUNK_LEN: u32 = i32::MAX as u32;

/// How much chunk data is moved at a time while streaming.
const STREAM_BUF_LEN: usize = 8 * 1024;

/// A chunk's length and type: the first eight bytes of every chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct ChunkHeader {
    pub len: u32,
    pub ty: ChunkType,
}

impl ChunkHeader {
    pub fn read<R: Read + ?Sized>(input: &mut R) -> Result<Self, PngTranscodeError> {
        let len: u32 = u32::from_be_bytes(
            read_array(input).map_err(PngTranscodeError::reading("chunk length"))?,
        );
        let ty: ChunkType = ChunkType::from(read_array::<4, R>(input).map_err(
            PngTranscodeError::reading("chunk type"),
        )?);

        if len > MAX_CHUNK_LEN {
            log::error!("Chunk `{ty}` claims `{len}` bytes, which is over the limit!");
            return Err(PngTranscodeError::ChunkTooLong { ty, len });
        }

        Ok(Self { len, ty })
    }

    fn write_to<W: Write + ?Sized>(&self, output: &mut W) -> io::Result<()> {
        output.write_all(&self.len.to_be_bytes())?;
        output.write_all(&self.ty.fourcc())
    }
}

/// A whole PNG chunk, held in memory.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Chunk {
    ty: ChunkType,
    data: Vec<u8>,
    crc: u32,
}

impl Chunk {
    /// Creates a chunk with a freshly computed CRC.
    pub fn new(ty: ChunkType, data: Vec<u8>) -> Self {
        let crc: u32 = crc::chunk_crc(&ty.fourcc(), &data);
        Self { ty, data, crc }
    }

    /// Reads the rest of a chunk whose header was already read.
    ///
    /// A bad CRC is only warned about. The chunk is taken as-is.
    pub(super) fn read_body<R: Read + ?Sized>(
        header: ChunkHeader,
        input: &mut R,
    ) -> Result<Self, PngTranscodeError> {
        let data: Vec<u8> = read_vec(input, header.len as usize)
            .map_err(PngTranscodeError::reading("chunk data"))?;
        let crc: u32 =
            u32::from_be_bytes(read_array(input).map_err(PngTranscodeError::reading("chunk CRC"))?);

        let chunk = Self {
            ty: header.ty,
            data,
            crc,
        };
        if !chunk.crc_matches() {
            log::warn!(
                "Chunk `{}` has a bad CRC. Keeping it anyway. \
                stored: `{crc:#010X}`",
                chunk.ty
            );
        }

        Ok(chunk)
    }

    /// The chunk's type.
    pub fn ty(&self) -> ChunkType {
        self.ty
    }

    /// The chunk's data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The CRC stored with the chunk.
    pub fn crc(&self) -> u32 {
        self.crc
    }

    /// Whether the stored CRC is right for this chunk's type and data.
    pub fn crc_matches(&self) -> bool {
        self.crc == crc::chunk_crc(&self.ty.fourcc(), &self.data)
    }

    /// Writes the chunk, with a CRC computed from its type and data.
    pub fn write_to<W: Write + ?Sized>(&self, output: &mut W) -> io::Result<()> {
        ChunkHeader {
            len: self.data.len() as u32,
            ty: self.ty,
        }
        .write_to(output)?;
        output.write_all(&self.data)?;
        output.write_all(&crc::chunk_crc(&self.ty.fourcc(), &self.data).to_be_bytes())
    }
}

/// Copies the rest of a chunk from `input` to `output` without holding it
/// all in memory.
///
/// The CRC is recomputed as the data goes by, and the stored one is checked
/// against it.
pub(super) fn stream<R, W>(
    header: ChunkHeader,
    input: &mut R,
    output: &mut W,
) -> Result<(), PngTranscodeError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    header.write_to(output)?;

    let mut crc = crc::Crc32::new();
    crc.update(&header.ty.fourcc());

    let mut buf = [0_u8; STREAM_BUF_LEN];
    let mut remaining: usize = header.len as usize;
    while remaining > 0 {
        let n: usize = remaining.min(buf.len());
        input
            .read_exact(&mut buf[..n])
            .map_err(PngTranscodeError::reading("chunk data"))?;
        crc.update(&buf[..n]);
        output.write_all(&buf[..n])?;
        remaining -= n;
    }

    let stored: u32 =
        u32::from_be_bytes(read_array(input).map_err(PngTranscodeError::reading("chunk CRC"))?);
    let computed: u32 = crc.finish();
    if stored != computed {
        log::warn!(
            "Chunk `{}` has a bad CRC. Writing a fixed one. \
            stored: `{stored:#010X}`, computed: `{computed:#010X}`",
            header.ty
        );
    }

    output.write_all(&computed.to_be_bytes())?;
    Ok(())
}

/// Skips the rest of a chunk.
pub(super) fn skip<R: Read + ?Sized>(
    header: ChunkHeader,
    input: &mut R,
) -> Result<(), PngTranscodeError> {
    // data and CRC
    let len: u64 = header.len as u64 + 4;
    let skipped: u64 = io::copy(&mut (&mut *input).take(len), &mut io::sink())?;

    if skipped != len {
        log::error!("PNG ended while skipping chunk `{}`!", header.ty);
        return Err(PngTranscodeError::UnexpectedEndOfStream {
            reading: "chunk data",
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use metasplice_types::png::ChunkType;

    use super::{Chunk, ChunkHeader, skip, stream};
    use crate::{providers::png::PngTranscodeError, util::logger};

    fn framed(ty: &[u8; 4], data: &[u8], crc: u32) -> Vec<u8> {
        let mut out = (data.len() as u32).to_be_bytes().to_vec();
        out.extend_from_slice(ty);
        out.extend_from_slice(data);
        out.extend_from_slice(&crc.to_be_bytes());
        out
    }

    #[test]
    fn reads_and_writes_a_chunk() {
        logger();

        let chunk = Chunk::new(ChunkType::Gama, vec![0, 0, 0xB1, 0x8F]);
        let mut bytes = Vec::new();
        chunk.write_to(&mut bytes).unwrap();
        assert_eq!(bytes, framed(b"gAMA", &[0, 0, 0xB1, 0x8F], chunk.crc()));

        let input = &mut bytes.as_slice();
        let header = ChunkHeader::read(input).unwrap();
        assert_eq!(
            header,
            ChunkHeader {
                len: 4,
                ty: ChunkType::Gama
            }
        );
        assert_eq!(Chunk::read_body(header, input).unwrap(), chunk);
        assert!(input.is_empty());
    }

    #[test]
    fn bad_crc_is_kept_and_fixed_on_write() {
        logger();

        let bytes = framed(b"tRNS", &[1, 2], 0xDEAD_BEEF);
        let input = &mut bytes.as_slice();
        let header = ChunkHeader::read(input).unwrap();
        let chunk = Chunk::read_body(header, input).unwrap();

        assert!(!chunk.crc_matches());
        assert_eq!(chunk.crc(), 0xDEAD_BEEF);

        let mut out = Vec::new();
        chunk.write_to(&mut out).unwrap();
        assert_eq!(out, {
            let mut fixed = Vec::new();
            Chunk::new(ChunkType::Trns, vec![1, 2]).write_to(&mut fixed).unwrap();
            fixed
        });
    }

    #[test]
    fn streaming_matches_buffered() {
        logger();

        let data: Vec<u8> = (0..=255_u8).cycle().take(20_000).collect();
        let chunk = Chunk::new(ChunkType::Idat, data);
        let mut bytes = Vec::new();
        chunk.write_to(&mut bytes).unwrap();

        let input = &mut bytes.as_slice();
        let header = ChunkHeader::read(input).unwrap();
        let mut out = Vec::new();
        stream(header, input, &mut out).unwrap();

        assert_eq!(out, bytes);
    }

    #[test]
    fn skipping() {
        logger();

        let mut bytes = framed(b"tEXt", b"a\0b", 0);
        bytes.push(0x42);

        let input = &mut bytes.as_slice();
        skip(ChunkHeader::read(input).unwrap(), input).unwrap();
        assert_eq!(*input, &[0x42]);

        let cut = framed(b"tEXt", b"a\0b", 0);
        let short = &mut &cut[..9];
        assert!(matches!(
            skip(ChunkHeader::read(short).unwrap(), short),
            Err(PngTranscodeError::UnexpectedEndOfStream { .. })
        ));
    }

    #[test]
    fn overlong_chunk() {
        logger();

        let bytes = [0x80, 0, 0, 0, b'I', b'D', b'A', b'T'];
        assert!(matches!(
            ChunkHeader::read(&mut bytes.as_slice()),
            Err(PngTranscodeError::ChunkTooLong {
                ty: ChunkType::Idat,
                len: 0x8000_0000
            })
        ));
    }
}
