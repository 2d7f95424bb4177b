//! # `metasplice_types`
//!
//! Static tables used by `metasplice` when it rewrites metadata.
//!
//! None of these types perform I/O. They describe what the engine may find
//! inside a container: JPEG markers, PNG chunk types, IPTC dataset tags, and
//! the kinds of metadata a caller can ask to remove.

#![forbid(unsafe_code)]

pub mod iptc;
pub mod jpeg;
pub mod kind;
pub mod png;
