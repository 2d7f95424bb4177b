//! # Shared
//!
//! Stuff that's shared between multiple container formats.
//!
//! Both JPEG and PNG read their metadata from a stream, then hand the rest
//! of the file over untouched. Those helpers live here.

use std::io::{self, Read};

mod tail;

pub use tail::copy_tail;

/// Reads exactly `N` bytes.
pub(crate) fn read_array<const N: usize, R: Read + ?Sized>(input: &mut R) -> io::Result<[u8; N]> {
    let mut buf = [0_u8; N];
    input.read_exact(&mut buf)?;
    Ok(buf)
}

/// Reads exactly `len` bytes into a new `Vec`.
///
/// The buffer grows as data arrives, so a bogus length can't make us
/// allocate more than the stream actually holds.
pub(crate) fn read_vec<R: Read + ?Sized>(input: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut buf: Vec<u8> = Vec::new();
    let got: usize = (&mut *input).take(len as u64).read_to_end(&mut buf)?;

    if got != len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("wanted `{len}` bytes, but the stream ended after `{got}`"),
        ));
    }

    Ok(buf)
}
