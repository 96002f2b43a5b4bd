use std::fmt;
use std::iter;

use crate::array::SuffixArray;
use crate::Error;

// The fixed alphabet: code points 36 through 126, inclusive. The low end is
// the terminator, so content characters occupy 37 through 126.
const ALPHABET_START: u8 = b'$';
const ALPHABET_END: u8 = b'~';
const ALPHABET_LEN: usize = (ALPHABET_END - ALPHABET_START) as usize + 1;

/// The terminator appended to every text before construction.
pub(crate) const TERMINATOR: char = '$';

const ROOT: NodeId = NodeId(0);

/// Map a byte to its slot in a node's edge table.
#[inline]
fn slot(b: u8) -> usize {
    debug_assert!(ALPHABET_START <= b && b <= ALPHABET_END);
    (b - ALPHABET_START) as usize
}

/// Check that every character of `text` lies in the content alphabet.
pub(crate) fn validate(text: &str) -> Result<(), Error> {
    for (position, ch) in text.char_indices() {
        if ch == TERMINATOR {
            return Err(Error::Terminator { position });
        }
        let cp = ch as u32;
        if cp < ALPHABET_START as u32 || cp > ALPHABET_END as u32 {
            return Err(Error::OutOfAlphabet { ch, position });
        }
    }
    Ok(())
}

/// A handle to a node in a suffix tree.
///
/// Nodes live in an arena owned by the tree, so a handle is just a stable
/// index into it. Handles from one tree are meaningless in another.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NodeId(u32);

struct Node {
    edges: [Option<Edge>; ALPHABET_LEN],
    // Assigned at most once, when the next internal node (or leaf insertion
    // point) of the phase is known. The root links to itself as a sentinel.
    link: Option<NodeId>,
}

impl Node {
    fn new() -> Node {
        Node { edges: [None; ALPHABET_LEN], link: None }
    }
}

#[derive(Clone, Copy)]
struct Edge {
    start: u32,
    end: EdgeEnd,
    kind: EdgeKind,
}

#[derive(Clone, Copy)]
enum EdgeEnd {
    /// The edge ends at the shared end marker and grows with every phase.
    Open,
    /// The end was snapshotted when a split created this edge.
    Closed(u32),
}

/// What an edge leads to: exactly one of a child node or a suffix id, so
/// the leaf/internal invariant holds by construction.
#[derive(Clone, Copy)]
enum EdgeKind {
    Internal(NodeId),
    Leaf { suffix: u32 },
}

impl Edge {
    fn leaf(start: u32, suffix: u32) -> Edge {
        Edge { start, end: EdgeEnd::Open, kind: EdgeKind::Leaf { suffix } }
    }

    fn internal(start: u32, end: u32, child: NodeId) -> Edge {
        Edge { start, end: EdgeEnd::Closed(end), kind: EdgeKind::Internal(child) }
    }

    /// Inclusive end offset, resolved against the shared end marker.
    #[inline]
    fn end_offset(&self, shared_end: u32) -> u32 {
        match self.end {
            EdgeEnd::Open => shared_end,
            EdgeEnd::Closed(end) => end,
        }
    }

    #[inline]
    fn len(&self, shared_end: u32) -> u32 {
        self.end_offset(shared_end) - self.start + 1
    }
}

/// The construction cursor: `length` characters have been matched along the
/// edge leaving `node` keyed by the character at text offset `edge`.
struct ActivePoint {
    node: NodeId,
    edge: usize,
    length: u32,
}

struct Builder {
    text: String, // terminator included
    nodes: Vec<Node>,
    /// The shared end marker. Every open edge resolves its end against the
    /// current value, so advancing it once per phase extends them all.
    end: u32,
    active: ActivePoint,
    /// Suffixes not yet explicitly inserted in the current phase.
    remainder: u32,
    /// Internal node created earlier in the current phase, still owed its
    /// suffix link.
    previous: Option<NodeId>,
}

impl Builder {
    fn new(text: String) -> Builder {
        let mut root = Node::new();
        root.link = Some(ROOT);
        Builder {
            text,
            nodes: vec![root],
            end: 0,
            active: ActivePoint { node: ROOT, edge: 0, length: 0 },
            remainder: 0,
            previous: None,
        }
    }

    fn build(mut self) -> SuffixTree {
        for i in 0..self.text.len() {
            self.end = i as u32;
            self.remainder += 1;
            self.previous = None;
            self.extend(i);
        }
        SuffixTree { text: self.text, nodes: self.nodes, end: self.end }
    }

    /// One phase of Ukkonen's algorithm: fold the character at `i` into the
    /// tree, inserting every suffix still owed by `remainder`.
    fn extend(&mut self, i: usize) {
        let current = self.byte(i);
        while self.remainder > 0 {
            // The active edge is only meaningful once some characters have
            // been matched; with none, the phase character keys the lookup.
            if self.active.length == 0 {
                self.active.edge = i;
            }
            let key = slot(self.byte(self.active.edge));
            match self.edge_at(self.active.node, key) {
                None => {
                    // Rule 2: nothing leaves the active node on this
                    // character, so the suffix ends in a fresh leaf.
                    let sufi = i as u32 + 1 - self.remainder;
                    self.attach(self.active.node, key, Edge::leaf(i as u32, sufi));
                    if let Some(prev) = self.previous.take() {
                        self.set_link(prev, self.active.node);
                    }
                }
                Some(edge) => {
                    let len = edge.len(self.end);
                    if self.active.length >= len {
                        // Walk-down: reposition past this edge. No suffix
                        // was inserted, so remainder is untouched.
                        self.active.edge += len as usize;
                        self.active.length -= len;
                        self.active.node = match edge.kind {
                            EdgeKind::Internal(child) => child,
                            // A matched path never outruns a leaf edge.
                            EdgeKind::Leaf { .. } => {
                                unreachable!("walk-down into a leaf edge")
                            }
                        };
                        continue;
                    }
                    let next = edge.start as usize + self.active.length as usize;
                    if self.byte(next) == current {
                        // Rule 3, the showstopper: the character is already
                        // on the edge, so every suffix still owed this
                        // phase is implicitly present.
                        self.active.length += 1;
                        if let Some(prev) = self.previous.take() {
                            self.set_link(prev, self.active.node);
                        }
                        return;
                    }
                    self.split(i, key, edge);
                }
            }
            self.remainder -= 1;
            self.relocate(i);
        }
    }

    /// Rule 2 with a mismatch inside an edge: cut the edge at the matched
    /// length, push its tail under a new internal node, and hang a leaf for
    /// the current character off the same node.
    fn split(&mut self, i: usize, key: usize, edge: Edge) {
        let internal = self.push_node();
        let sufi = i as u32 + 1 - self.remainder;
        self.attach(internal, slot(self.byte(i)), Edge::leaf(i as u32, sufi));

        // The matched head becomes a closed edge into the new node; its end
        // is snapshotted now and never tracks the shared marker again.
        let head =
            Edge::internal(edge.start, edge.start + self.active.length - 1, internal);

        // The tail keeps its end and payload but starts past the match. Its
        // slot must be recomputed from the new start, after truncation.
        let mut tail = edge;
        tail.start += self.active.length;
        self.attach(internal, slot(self.byte(tail.start as usize)), tail);

        self.attach(self.active.node, key, head);

        if let Some(prev) = self.previous {
            self.set_link(prev, internal);
        }
        self.previous = Some(internal);
    }

    /// Move the active point to the next suffix owed this phase.
    fn relocate(&mut self, i: usize) {
        if self.active.node == ROOT && self.active.length > 0 {
            self.active.length -= 1;
            self.active.edge = i + 1 - self.remainder as usize;
        } else {
            // Follow the suffix link when one exists; nodes still owed a
            // link fall back to the root.
            self.active.node = self.nodes[self.active.node.0 as usize]
                .link
                .unwrap_or(ROOT);
        }
    }

    fn push_node(&mut self) -> NodeId {
        self.nodes.push(Node::new());
        NodeId((self.nodes.len() - 1) as u32)
    }

    fn set_link(&mut self, from: NodeId, to: NodeId) {
        let link = &mut self.nodes[from.0 as usize].link;
        // A node's suffix link is assigned at most once over a build.
        debug_assert!(link.is_none());
        *link = Some(to);
    }

    #[inline]
    fn attach(&mut self, node: NodeId, key: usize, edge: Edge) {
        self.nodes[node.0 as usize].edges[key] = Some(edge);
    }

    #[inline]
    fn edge_at(&self, node: NodeId, key: usize) -> Option<Edge> {
        self.nodes[node.0 as usize].edges[key]
    }

    #[inline]
    fn byte(&self, i: usize) -> u8 {
        self.text.as_bytes()[i]
    }
}

/// A suffix tree, built online in linear time.
///
/// The tree indexes `text` plus the terminator, so it has exactly
/// `text.len() + 1` leaves, one per suffix.
pub struct SuffixTree {
    text: String, // terminator included
    nodes: Vec<Node>,
    end: u32, // final value of the shared end marker
}

impl SuffixTree {
    /// Build the suffix tree for `text`.
    ///
    /// Fails if any character of `text` lies outside the content alphabet
    /// (`%` through `~`) or equals the reserved terminator `$`.
    pub fn new(text: &str) -> Result<SuffixTree, Error> {
        validate(text)?;
        let mut full = String::with_capacity(text.len() + 1);
        full.push_str(text);
        full.push(TERMINATOR);
        Ok(Builder::new(full).build())
    }

    /// The text this tree indexes, without the terminator.
    pub fn text(&self) -> &str {
        &self.text[..self.text.len() - 1]
    }

    /// The root node.
    #[inline]
    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// An iterator over the edges leaving `node`, in alphabet order.
    pub fn children(&self, node: NodeId) -> Children<'_> {
        Children { tree: self, node, slot: 0 }
    }

    /// Extract the suffix array by visiting leaves in alphabet order.
    pub fn into_suffix_array(self) -> SuffixArray {
        let table = self.leaf_table();
        SuffixArray::from_parts(self.text, table)
    }

    fn leaf_table(&self) -> Vec<u32> {
        let mut table = Vec::with_capacity(self.text.len());
        // An explicit stack of (node, next slot) pairs rather than
        // recursion: the tree can be as deep as the text is long.
        let mut stack: Vec<(NodeId, usize)> = vec![(ROOT, 0)];
        while let Some(top) = stack.last_mut() {
            let (node, slot) = *top;
            if slot == ALPHABET_LEN {
                stack.pop();
                continue;
            }
            top.1 += 1;
            match self.nodes[node.0 as usize].edges[slot] {
                None => {}
                Some(Edge { kind: EdgeKind::Leaf { suffix }, .. }) => {
                    table.push(suffix);
                }
                Some(Edge { kind: EdgeKind::Internal(child), .. }) => {
                    stack.push((child, 0));
                }
            }
        }
        debug_assert_eq!(table.len(), self.text.len());
        table
    }
}

impl fmt::Debug for SuffixTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn fmt_node(
            f: &mut fmt::Formatter,
            st: &SuffixTree,
            node: NodeId,
            depth: usize,
        ) -> fmt::Result {
            let indent: String = iter::repeat(' ').take(depth * 2).collect();
            for edge in st.children(node) {
                if let Some(child) = edge.target() {
                    writeln!(f, "{}{}", indent, edge.label())?;
                    fmt_node(f, st, child, depth + 1)?;
                } else if let Some(sufi) = edge.suffix_id() {
                    writeln!(f, "{}{} [{}]", indent, edge.label(), sufi)?;
                }
            }
            Ok(())
        }
        writeln!(f, "\n-----------------------------------------")?;
        writeln!(f, "SUFFIX TREE")?;
        writeln!(f, "text: {}", self.text())?;
        writeln!(f, "ROOT")?;
        fmt_node(f, self, ROOT, 1)?;
        writeln!(f, "-----------------------------------------")
    }
}

/// An iterator over the edges leaving a node, in alphabet order.
///
/// `'t` is the lifetime of the suffix tree.
pub struct Children<'t> {
    tree: &'t SuffixTree,
    node: NodeId,
    slot: usize,
}

impl<'t> Iterator for Children<'t> {
    type Item = EdgeRef<'t>;

    fn next(&mut self) -> Option<EdgeRef<'t>> {
        while self.slot < ALPHABET_LEN {
            let slot = self.slot;
            self.slot += 1;
            if let Some(edge) = self.tree.nodes[self.node.0 as usize].edges[slot] {
                return Some(EdgeRef { tree: self.tree, edge });
            }
        }
        None
    }
}

/// A borrowed view of one edge in a suffix tree.
///
/// `'t` is the lifetime of the suffix tree.
#[derive(Clone, Copy)]
pub struct EdgeRef<'t> {
    tree: &'t SuffixTree,
    edge: Edge,
}

impl<'t> EdgeRef<'t> {
    /// The substring labeling this edge.
    ///
    /// Labels of leaf edges include the terminator.
    pub fn label(&self) -> &'t str {
        let start = self.edge.start as usize;
        let end = self.edge.end_offset(self.tree.end) as usize;
        &self.tree.text[start..end + 1]
    }

    /// The child node, for internal edges.
    pub fn target(&self) -> Option<NodeId> {
        match self.edge.kind {
            EdgeKind::Internal(child) => Some(child),
            EdgeKind::Leaf { .. } => None,
        }
    }

    /// The starting offset of the suffix this edge ends, for leaf edges.
    pub fn suffix_id(&self) -> Option<u32> {
        match self.edge.kind {
            EdgeKind::Leaf { suffix } => Some(suffix),
            EdgeKind::Internal(_) => None,
        }
    }
}
