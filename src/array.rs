use std::cmp;
use std::fmt;

use crate::binary_search;
use crate::tree::{validate, SuffixTree, TERMINATOR};
use crate::Error;

/// A suffix array over a text with the terminator appended.
///
/// The table holds the starting offset of every suffix of
/// `text + terminator`, ordered lexicographically, so it always has
/// `text.len() + 1` entries and the terminator's own suffix ranks first.
#[derive(Clone, Eq, PartialEq)]
pub struct SuffixArray {
    text: String, // terminator included
    table: Vec<u32>,
}

impl SuffixArray {
    /// Build the suffix array for `text`.
    ///
    /// The array is derived from the suffix tree: the tree is built online
    /// with Ukkonen's algorithm and its leaves are collected in alphabet
    /// order. Fails on any character outside the content alphabet.
    pub fn new(text: &str) -> Result<SuffixArray, Error> {
        SuffixTree::new(text).map(SuffixTree::into_suffix_array)
    }

    /// Build the suffix array by sorting suffixes outright.
    ///
    /// Slow, but stupidly simple and therefore difficult to get wrong.
    /// Only here as a test oracle.
    #[doc(hidden)]
    pub fn new_naive(text: &str) -> Result<SuffixArray, Error> {
        validate(text)?;
        let mut full = String::with_capacity(text.len() + 1);
        full.push_str(text);
        full.push(TERMINATOR);
        let mut table: Vec<u32> = (0..full.len() as u32).collect();
        table.sort_by(|&a, &b| full[a as usize..].cmp(&full[b as usize..]));
        Ok(SuffixArray { text: full, table })
    }

    pub(crate) fn from_parts(text: String, table: Vec<u32>) -> SuffixArray {
        SuffixArray { text, table }
    }

    /// The suffix starting offsets, in lexicographic order of the suffixes
    /// they denote.
    #[inline]
    pub fn table(&self) -> &[u32] {
        &self.table
    }

    /// The indexed text, terminator included.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The number of suffixes, always `text.len() + 1` for the text passed
    /// to `new`.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if there are no suffixes. Never the case for an array
    /// built by `new`, which always indexes at least the terminator.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// The suffix at rank `i`.
    #[inline]
    pub fn suffix(&self, i: usize) -> &str {
        &self.text[self.table[i] as usize..]
    }

    /// Returns true if and only if `query` occurs in the indexed text.
    pub fn contains(&self, query: &str) -> bool {
        !query.is_empty()
            && self
                .table
                .binary_search_by(|&sufi| {
                    let sufi = sufi as usize;
                    let len = cmp::min(query.len(), self.text.len() - sufi);
                    self.text[sufi..(sufi + len)].cmp(query)
                })
                .is_ok()
    }

    /// Every starting position of `query` in the indexed text, in suffix
    /// rank order (not ascending position order).
    pub fn positions(&self, query: &str) -> &[u32] {
        // We can quickly decide whether the query won't match at all if
        // it's outside the range of suffixes.
        if self.table.is_empty()
            || query.is_empty()
            || (query < self.suffix(0) && !self.suffix(0).starts_with(query))
            || query > self.suffix(self.len() - 1)
        {
            return &[];
        }

        let start = binary_search(&self.table, |&sufi| {
            query <= &self.text[sufi as usize..]
        });
        let end = binary_search(&self.table, |&sufi| {
            !self.text[sufi as usize..].starts_with(query)
        });

        if start > end {
            return &[];
        }
        &self.table[start..end]
    }
}

impl fmt::Debug for SuffixArray {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "\n-----------------------------------------")?;
        writeln!(f, "SUFFIX ARRAY")?;
        writeln!(f, "text: {}", self.text())?;
        for (rank, &sufstart) in self.table.iter().enumerate() {
            writeln!(f, "suffix[{}] {}, {}", rank, sufstart, self.suffix(rank))?;
        }
        writeln!(f, "-----------------------------------------")
    }
}
