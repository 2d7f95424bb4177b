//! Comments, like those in JPEG `COM` segments.

use std::collections::VecDeque;

use crate::MetadataSink;

/// An error from decoding comments.
#[derive(Clone, Debug, PartialEq, PartialOrd, Hash)]
pub enum CommentError {
    /// A comment wasn't valid UTF-8.
    UnsupportedEncoding {
        /// How many comments had been decoded before this one.
        index: usize,

        /// How many bytes of the comment were valid.
        valid_up_to: usize,
    },
}

impl core::fmt::Display for CommentError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedEncoding { index, valid_up_to } => write!(
                f,
                "Comment `{index}` isn't valid UTF-8. \
                valid up to: `{valid_up_to}` bytes"
            ),
        }
    }
}

impl core::error::Error for CommentError {}

/// A list of comments.
///
/// Raw comments are queued with [`Comments::add_raw`] and decoded later by
/// [`Comments::read`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Comments {
    queue: VecDeque<Vec<u8>>,
    comments: Vec<String>,
}

impl Comments {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw comment for decoding.
    pub fn add_raw(&mut self, raw: impl Into<Vec<u8>>) {
        self.queue.push_back(raw.into());
    }

    /// Adds an already-decoded comment.
    pub fn add(&mut self, comment: impl Into<String>) {
        self.comments.push(comment.into());
    }

    /// Decodes every queued comment as UTF-8, in order.
    ///
    /// # Errors
    ///
    /// Stops at the first comment that isn't UTF-8. It stays at the front of
    /// the queue; everything decoded before it is kept.
    pub fn read(&mut self) -> Result<(), CommentError> {
        while let Some(raw) = self.queue.pop_front() {
            match String::from_utf8(raw) {
                Ok(s) => self.comments.push(s),
                Err(e) => {
                    let valid_up_to: usize = e.utf8_error().valid_up_to();
                    log::error!(
                        "Comment `{}` isn't UTF-8! valid up to: `{valid_up_to}` bytes",
                        self.comments.len()
                    );
                    self.queue.push_front(e.into_bytes());
                    return Err(CommentError::UnsupportedEncoding {
                        index: self.comments.len(),
                        valid_up_to,
                    });
                }
            }
        }

        Ok(())
    }

    /// The decoded comments.
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    /// How many raw comments are waiting to be decoded.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl MetadataSink for Comments {
    fn comment(&mut self, raw: &[u8]) {
        self.add_raw(raw);
    }
}

#[cfg(test)]
mod tests {
    use super::{CommentError, Comments};
    use crate::util::logger;

    #[test]
    fn decodes_in_order() {
        logger();

        let mut c = Comments::new();
        c.add_raw(*b"first");
        c.add_raw("second ✓".as_bytes());
        c.read().unwrap();

        assert_eq!(c.comments(), &["first".to_string(), "second ✓".to_string()]);
        assert_eq!(c.pending(), 0);
    }

    #[test]
    fn bad_utf8_keeps_earlier_comments() {
        logger();

        let mut c = Comments::new();
        c.add_raw(*b"fine");
        c.add_raw(vec![b'o', b'k', 0xFF]);
        c.add_raw(*b"later");

        assert_eq!(
            c.read(),
            Err(CommentError::UnsupportedEncoding {
                index: 1,
                valid_up_to: 2,
            })
        );
        assert_eq!(c.comments(), &["fine".to_string()]);
        assert_eq!(c.pending(), 2);
    }
}
