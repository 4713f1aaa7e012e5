//! Word buffer.

use crate::{
    arch::word::Word,
    error::panic_allocate_too_much,
    primitive::WORD_BITS_USIZE,
};
use alloc::{boxed::Box, vec};
use core::{
    fmt,
    hash::{Hash, Hasher},
    ops::{Deref, DerefMut},
};

/// An owned buffer of words allocated on the heap, with a length fixed at
/// allocation time.
///
/// Unlike a growable vector, a `Buffer` holds exactly the number of limbs it
/// was created with; a mantissa keeps the same buffer for its whole life and
/// only a precision change reallocates it.
pub struct Buffer {
    words: Box<[Word]>,
}

impl Buffer {
    /// Maximum number of `Word`s.
    ///
    /// This ensures that the number of **bits** fits in `usize`, which is
    /// useful for bit count operations.
    pub const MAX_CAPACITY: usize = usize::MAX / WORD_BITS_USIZE;

    /// Creates a `Buffer` of `num_words` zero words.
    pub fn allocate(num_words: usize) -> Self {
        if num_words > Self::MAX_CAPACITY {
            panic_allocate_too_much()
        }
        Buffer {
            words: vec![0; num_words].into_boxed_slice(),
        }
    }

    /// Creates a `Buffer` holding a copy of the given words.
    pub fn from_words(words: &[Word]) -> Self {
        if words.len() > Self::MAX_CAPACITY {
            panic_allocate_too_much()
        }
        Buffer {
            words: words.into(),
        }
    }

    /// Return the length of words contained in the buffer
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Fill the whole buffer with zeros.
    #[inline]
    pub fn fill_zero(&mut self) {
        self.words.fill(0);
    }
}

impl Clone for Buffer {
    fn clone(&self) -> Self {
        Buffer {
            words: self.words.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if self.len() == source.len() {
            self.words.copy_from_slice(&source.words);
        } else {
            self.words = source.words.clone();
        }
    }
}

impl Deref for Buffer {
    type Target = [Word];

    #[inline]
    fn deref(&self) -> &[Word] {
        &self.words
    }
}

impl DerefMut for Buffer {
    #[inline]
    fn deref_mut(&mut self) -> &mut [Word] {
        &mut self.words
    }
}

impl PartialEq for Buffer {
    #[inline]
    fn eq(&self, other: &Buffer) -> bool {
        self.words == other.words
    }
}

impl Eq for Buffer {}

impl Hash for Buffer {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.words.hash(state)
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.words.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate() {
        let buf = Buffer::allocate(3);
        assert_eq!(buf.len(), 3);
        assert_eq!(&*buf, &[0, 0, 0]);
    }

    #[test]
    fn test_from_words() {
        let mut buf = Buffer::from_words(&[1, 2, 3]);
        assert_eq!(buf.len(), 3);
        buf[0] = 7;
        assert_eq!(&*buf, &[7, 2, 3]);
        let buf2 = buf.clone();
        assert_eq!(buf, buf2);
        buf.fill_zero();
        assert_eq!(&*buf, &[0, 0, 0]);
    }
}
