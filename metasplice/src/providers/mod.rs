//! # Providers
//!
//! Each provider handles one container format. They all work the same way:
//! the metadata at the start of the file is buffered and rewritten, then
//! the rest of the file is streamed through unchanged.

pub mod jpeg;
pub mod png;
pub mod shared;
