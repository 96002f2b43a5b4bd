//! Suffix tree construction in linear time, with suffix array extraction.
//!
//! The tree is built online with Ukkonen's algorithm, one character per
//! phase, and the suffix array falls out of an alphabet-ordered walk over
//! the finished tree. Usage is very simple:
//!
//! ```rust
//! use stree::SuffixArray;
//!
//! let sa = SuffixArray::new("banana").unwrap();
//! assert_eq!(sa.table(), &[6, 5, 3, 1, 0, 4, 2]);
//! ```
//!
//! The text must consist of characters in the code point range `[37, 126]`
//! (`%` through `~`). A unique terminator, `$` (code point 36), is appended
//! internally before construction, which is why the table above has seven
//! entries for a six character text. Anything outside that range, including
//! the terminator itself, is rejected before any tree state is built.
//!
//! There is a command line utility included in this repository called
//! `stree` that will print the suffix array of its argument, or write the
//! suffix tree in GraphViz's `dot` format. From there, it's very easy to
//! visualize it:
//!
//! ```ignore
//! stree --dot "banana" | dot -Tpng > banana.png
//! ```

use std::error;
use std::fmt;

pub use crate::array::SuffixArray;
pub use crate::tree::{Children, EdgeRef, NodeId, SuffixTree};

mod array;
mod tree;

/// An error produced when the input text cannot be indexed.
///
/// Both variants are detected up front, before any tree state exists, so a
/// failed construction never exposes a partial result.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// A character fell outside the supported alphabet.
    OutOfAlphabet {
        /// The offending character.
        ch: char,
        /// Its byte offset in the input text.
        position: usize,
    },
    /// The input contained the reserved terminator character, `$`.
    Terminator {
        /// Its byte offset in the input text.
        position: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::OutOfAlphabet { ch, position } => {
                write!(
                    f,
                    "character {:?} at byte offset {} is outside the \
                     supported alphabet ('%' through '~')",
                    ch, position
                )
            }
            Error::Terminator { position } => {
                write!(
                    f,
                    "the terminator character '$' at byte offset {} is \
                     reserved and may not appear in the text",
                    position
                )
            }
        }
    }
}

impl error::Error for Error {}

/// Binary search to find first element such that `pred(T) == true`.
///
/// Assumes that if `pred(xs[i]) == true` then `pred(xs[i+1]) == true`.
///
/// If all elements yield `pred(x) == false`, then `xs.len()` is returned.
pub(crate) fn binary_search<T, F>(xs: &[T], mut pred: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    let (mut left, mut right) = (0, xs.len());
    while left < right {
        let mid = (left + right) / 2;
        if pred(&xs[mid]) {
            right = mid;
        } else {
            left = mid + 1;
        }
    }
    left
}
