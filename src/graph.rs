//! # Word Graph
//!
//! Implements a minimal acyclic word automaton (DAWG): a read-only
//! dictionary supporting membership, word-id lookup
//! and prefix enumeration, built once by [`crate::builder::GraphBuilder`]
//! and loaded thereafter from the binary format in
//! [`crate::serialize`].
//!
//! ## Architecture
//!
//! Nodes reference each other exclusively by `u32` index into a flat
//! `Vec<Node>`, never by pointer, so the graph is position-independent and
//! can be reconstructed directly from a serialized byte stream. Each node's
//! outgoing edges are stored as two parallel sorted arrays (labels, then
//! targets) so that edge lookup is a binary search rather than a hash
//! lookup, favouring cache-friendly small collections over hashmaps.
//!
//! ## Example
//!
//! ```rust
//! use swipe_input_engine::builder::GraphBuilder;
//!
//! let words = vec!["an".to_string(), "and".to_string(), "ant".to_string(), "any".to_string()];
//! let graph = GraphBuilder::build(words).unwrap();
//! assert!(graph.contains("and"));
//! assert!(!graph.contains("a"));
//! ```

/// A single node in the word graph.
///
/// Edges are sorted strictly ascending by label so that
/// [`Node::find_edge`] can binary search them.
///
/// Deliberately carries no per-node word id: minimality requires that two
/// nodes with identical `(terminal, edges)` never coexist, and a childless
/// terminal node (a leaf) is reachable by every word that happens to end
/// there, so a single physical node cannot own a single word id without
/// breaking that invariant. [`WordGraph::word_id`] derives ids from the
/// word table instead (see there).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub terminal: bool,
    pub edge_labels: Vec<char>,
    pub edge_targets: Vec<u32>,
}

impl Node {
    pub(crate) fn new() -> Self {
        Self {
            terminal: false,
            edge_labels: Vec::new(),
            edge_targets: Vec::new(),
        }
    }

    /// Binary searches this node's sorted edges for `label`, returning the
    /// target node index on a hit.
    pub fn find_edge(&self, label: char) -> Option<u32> {
        self.edge_labels
            .binary_search(&label)
            .ok()
            .map(|i| self.edge_targets[i])
    }

    /// Number of outgoing edges.
    pub fn out_degree(&self) -> usize {
        self.edge_labels.len()
    }
}

/// The minimal acyclic word automaton.
///
/// Node 0 is always the root. `words` is indexed by word id and holds the
/// original (lowercased) strings in the order they were assigned ids by the
/// builder.
#[derive(Debug, Clone, PartialEq)]
pub struct WordGraph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) words: Vec<String>,
}

impl WordGraph {
    pub(crate) fn from_parts(nodes: Vec<Node>, words: Vec<String>) -> Self {
        Self { nodes, words }
    }

    /// Root node index.
    pub fn root(&self) -> u32 {
        0
    }

    pub fn node(&self, idx: u32) -> &Node {
        &self.nodes[idx as usize]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Walks from the root matching lowercased characters of `word` via
    /// binary search on each node's sorted edges. Returns the final node
    /// index if the full walk succeeds, `None` on the first missing edge.
    fn walk(&self, word: &str) -> Option<u32> {
        let mut cur = self.root();
        for c in word.chars().flat_map(char::to_lowercase) {
            cur = self.node(cur).find_edge(c)?;
        }
        Some(cur)
    }

    /// Returns `true` iff `word` names a terminal node reachable from the
    /// root.
    pub fn contains(&self, word: &str) -> bool {
        self.walk(word)
            .map(|n| self.node(n).terminal)
            .unwrap_or(false)
    }

    /// Returns the word id assigned to `word`, or `None` if `word` is not
    /// in the dictionary.
    ///
    /// Ids are lexicographic ranks, recovered by binary search over `words`
    /// rather than read off a node, since the graph's structural nodes may
    /// be shared by several words (see [`Node`]).
    pub fn word_id(&self, word: &str) -> Option<u32> {
        let n = self.walk(word)?;
        if !self.node(n).terminal {
            return None;
        }
        let lower: String = word.chars().flat_map(char::to_lowercase).collect();
        self.words.binary_search(&lower).ok().map(|i| i as u32)
    }

    /// Depth-first enumerates up to `limit` words beginning with `prefix`,
    /// in the stable order determined by each node's sorted edge traversal.
    pub fn prefix_search(&self, prefix: &str, limit: usize) -> Vec<String> {
        let Some(start) = self.walk(prefix) else {
            return Vec::new();
        };
        let mut results = Vec::new();
        let mut buf = prefix.to_string();
        self.collect_words(start, &mut buf, limit, &mut results);
        results
    }

    fn collect_words(&self, node_idx: u32, buf: &mut String, limit: usize, out: &mut Vec<String>) {
        if out.len() >= limit {
            return;
        }
        let node = self.node(node_idx);
        if node.terminal {
            out.push(buf.clone());
            if out.len() >= limit {
                return;
            }
        }
        for i in 0..node.edge_labels.len() {
            let label = node.edge_labels[i];
            let target = node.edge_targets[i];
            buf.push(label);
            self.collect_words(target, buf, limit, out);
            buf.pop();
            if out.len() >= limit {
                return;
            }
        }
    }

    /// All words known to the graph, indexed by word id.
    pub fn all_words(&self) -> &[String] {
        &self.words
    }

    /// Loads a graph previously written by [`crate::serialize::write`] from
    /// a path, synchronously.
    pub fn load(path: &std::path::Path) -> crate::error::Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| {
            crate::error::EngineError::CorruptResource(format!(
                "opening {}: {e}",
                path.display()
            ))
        })?;
        crate::serialize::read(std::io::BufReader::new(file))
    }

    /// Loads a graph previously written by [`crate::serialize::write`] from
    /// a path, asynchronously, so a large resource file does not block the
    /// calling task's thread.
    pub async fn load_async(path: &std::path::Path) -> crate::error::Result<Self> {
        crate::serialize::read_async(path).await
    }
}
