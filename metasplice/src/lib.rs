//! # `metasplice`
//!
//! A library to strip, replace, and inject metadata in media files without
//! touching their image data.
//!
//! ## Supported formats
//!
//! - JPEG: remove segments by [`MetadataKind`], and add IPTC wrapped in a
//!   Photoshop image resource block. See [`providers::jpeg`].
//! - PNG: strip ancillary chunks that don't affect how the image looks, and
//!   add XMP in an `iTXt` chunk. See [`providers::png`].
//!
//! In both cases, the compressed image data is copied byte-for-byte.
//!
//! ## Usage
//!
//! ```
//! use metasplice::{MetadataKind, iptc::IptcDataSet, providers::jpeg};
//!
//! # let jpeg_bytes: Vec<u8> = vec![0xFF, 0xD8, 0xFF, 0xDA, 0x00, 0x02, 0xFF, 0xD9];
//! let keyword = IptcDataSet::new(2, 25, b"cat".to_vec()).unwrap();
//!
//! let mut out: Vec<u8> = Vec::new();
//! jpeg::transcode(
//!     &mut jpeg_bytes.as_slice(),
//!     &mut out,
//!     Some(&[keyword]),
//!     &[MetadataKind::Comment],
//! )
//! .unwrap();
//! ```
//!
//! ## Streams
//!
//! The transcoders never close or seek the streams they're handed. Only the
//! metadata at the start of a file is held in memory; everything after it is
//! streamed through.
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`](https://docs.rs/log) facade. Install
//! whichever logger you like to see them.
//!
//! ## License
//!
//! This project is dual-licensed under either the Apache License 2.0 or the MIT License at your option.

#![forbid(unsafe_code)]

use crate::iptc::IptcDataSet;

pub use metasplice_types::kind::MetadataKind;

pub mod comment;
pub mod iptc;
pub mod irb;
pub mod providers;

/// Receives metadata found while reading a file.
///
/// All methods do nothing by default, so implementors only pick what they
/// care about.
pub trait MetadataSink {
    /// Called with the raw bytes of each comment, in file order.
    fn comment(&mut self, raw: &[u8]) {
        _ = raw;
    }

    /// Called with each IPTC dataset, in file order.
    fn iptc(&mut self, dataset: IptcDataSet) {
        _ = dataset;
    }
}

/// Internal utility methods.
pub(crate) mod util {
    /// Helper function to initialize the logger for testing.
    #[cfg(test)]
    pub fn logger() {
        _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::max())
            .format_file(true)
            .format_line_number(true)
            .try_init();
    }
}
