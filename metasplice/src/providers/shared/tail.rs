use std::io::{self, Read, Write};

/// Copies everything left in `input` to `output`, byte for byte.
///
/// This is used once a container's metadata has been handled: the rest of
/// the file (compressed image data, trailers, whatever else) isn't ours to
/// interpret. Returns how many bytes were copied.
///
/// Neither stream is closed or flushed.
pub fn copy_tail<R, W>(input: &mut R, output: &mut W) -> io::Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let copied: u64 = io::copy(input, output)?;
    log::trace!("Copied `{copied}` trailing bytes verbatim.");
    Ok(copied)
}
