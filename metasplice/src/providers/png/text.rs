//! Builds `iTXt` (international text) chunks.

use metasplice_types::png::ChunkType;

use super::chunk::Chunk;

/// The keyword readers look for when finding XMP in a PNG.
pub const XMP_KEYWORD: &str = "XML:com.adobe.xmp";

/// Builds an uncompressed `iTXt` chunk with no language tag or translated
/// keyword.
///
/// Layout: keyword, `NUL`, compression flag, compression method, language
/// tag, `NUL`, translated keyword, `NUL`, then the text.
pub fn itxt(keyword: &str, text: &str) -> Chunk {
    let mut data: Vec<u8> = Vec::with_capacity(keyword.len() + 5 + text.len());

    data.extend_from_slice(keyword.as_bytes());
    data.push(0);

    // uncompressed, so the method is ignored
    data.push(0);
    data.push(0);

    // empty language tag and translated keyword
    data.push(0);
    data.push(0);

    data.extend_from_slice(text.as_bytes());
    Chunk::new(ChunkType::Itxt, data)
}

/// Builds the `iTXt` chunk that carries an XMP packet.
pub fn xmp(packet: &str) -> Chunk {
    itxt(XMP_KEYWORD, packet)
}
