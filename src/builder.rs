//! # Graph Builder
//!
//! Builds a minimal acyclic word graph (DAWG) from a lexicographically
//! sorted word list using Daciuk et al.'s incremental construction:
//! maintain the rightmost path from the root as a stack of *unchecked*
//! nodes, freeze (and possibly merge) nodes off that stack as soon as a new
//! word proves they can no longer grow, and look up each frozen node's
//! structural signature in a registry of already-canonical nodes before
//! deciding whether to keep it or replace it with an existing equivalent.
//!
//! Because a node's children are always already canonical by the time the
//! node itself is tested (equivalence is checked bottom-up, off the stack),
//! structural equality on `(terminal, edges -> canonical targets)` coincides
//! with right-language equality, including for terminal leaves: two words
//! that both end without further suffix-sharing (e.g. "and"/"ant"/"any")
//! legitimately collapse onto one shared `(terminal=true, edges=[])` node.
//! Word ids are therefore not stored on nodes at all -- see
//! [`crate::graph::WordGraph::word_id`].

use crate::error::{EngineError, Result};
use crate::graph::{Node, WordGraph};
use std::collections::{HashMap, VecDeque};

const ROOT: usize = 0;

#[derive(Debug, Clone)]
struct BuildNode {
    terminal: bool,
    children: Vec<(char, usize)>,
}

impl BuildNode {
    fn new() -> Self {
        Self {
            terminal: false,
            children: Vec::new(),
        }
    }
}

/// Signature used to test whether a frozen node is structurally
/// interchangeable with an already-canonical one. Children are compared by
/// `(label, canonical target index)`, which is sound because children are
/// always frozen (and thus canonical) before their parent is considered.
type Signature = (bool, Vec<(char, usize)>);

fn signature_of(node: &BuildNode) -> Signature {
    (node.terminal, node.children.clone())
}

/// Incrementally constructs a [`WordGraph`] from a sorted word list.
pub struct GraphBuilder {
    arena: Vec<BuildNode>,
    registry: HashMap<Signature, usize>,
    unchecked: Vec<(usize, char, usize)>,
    previous_word: String,
    words: Vec<String>,
}

impl GraphBuilder {
    fn new() -> Self {
        Self {
            arena: vec![BuildNode::new()],
            registry: HashMap::new(),
            unchecked: Vec::new(),
            previous_word: String::new(),
            words: Vec::new(),
        }
    }

    /// Builds a minimal word graph from `words`, which must already be
    /// lexicographically sorted (duplicates are tolerated as no-ops).
    /// Returns [`EngineError::UnsortedLexicon`] on the first out-of-order
    /// entry rather than silently re-sorting.
    pub fn build(words: Vec<String>) -> Result<WordGraph> {
        let mut builder = Self::new();
        for (idx, word) in words.into_iter().enumerate() {
            builder.insert(&word, idx)?;
        }
        builder.freeze_to(0);
        Ok(builder.flatten())
    }

    fn insert(&mut self, word: &str, index: usize) -> Result<()> {
        if word == self.previous_word {
            return Ok(());
        }
        if !self.previous_word.is_empty() && word < self.previous_word.as_str() {
            return Err(EngineError::UnsortedLexicon { at: index });
        }

        let common = common_prefix_len(&self.previous_word, word);
        self.freeze_to(common);

        let mut parent = self
            .unchecked
            .last()
            .map(|&(_, _, child)| child)
            .unwrap_or(ROOT);

        for c in word.chars().skip(common) {
            let child = self.arena.len();
            self.arena.push(BuildNode::new());
            self.arena[parent].children.push((c, child));
            self.unchecked.push((parent, c, child));
            parent = child;
        }

        let final_node = self
            .unchecked
            .last()
            .map(|&(_, _, child)| child)
            .unwrap_or(ROOT);
        self.arena[final_node].terminal = true;
        self.words.push(word.to_string());
        self.previous_word = word.to_string();
        Ok(())
    }

    /// Pops the unchecked stack down to `depth`, merging each popped node
    /// with its registered canonical equivalent if one exists, or
    /// registering it as canonical otherwise.
    fn freeze_to(&mut self, depth: usize) {
        while self.unchecked.len() > depth {
            let (parent, label, child) = self.unchecked.pop().unwrap();
            let sig = signature_of(&self.arena[child]);
            if let Some(&canonical) = self.registry.get(&sig) {
                if let Some(entry) = self.arena[parent]
                    .children
                    .iter_mut()
                    .find(|(l, _)| *l == label)
                {
                    entry.1 = canonical;
                }
            } else {
                self.registry.insert(sig, child);
            }
        }
    }

    /// BFS from the root over whatever arena nodes survived freezing,
    /// assigning each a dense index (root always becomes 0) and rewriting
    /// edges to point at those dense indices.
    fn flatten(self) -> WordGraph {
        let mut dense_of = HashMap::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::new();

        dense_of.insert(ROOT, 0u32);
        order.push(ROOT);
        queue.push_back(ROOT);

        while let Some(cur) = queue.pop_front() {
            for &(_, target) in &self.arena[cur].children {
                if !dense_of.contains_key(&target) {
                    dense_of.insert(target, order.len() as u32);
                    order.push(target);
                    queue.push_back(target);
                }
            }
        }

        let nodes = order
            .iter()
            .map(|&arena_idx| {
                let bn = &self.arena[arena_idx];
                let mut edge_labels = Vec::with_capacity(bn.children.len());
                let mut edge_targets = Vec::with_capacity(bn.children.len());
                for &(label, target) in &bn.children {
                    edge_labels.push(label);
                    edge_targets.push(dense_of[&target]);
                }
                Node {
                    terminal: bn.terminal,
                    edge_labels,
                    edge_targets,
                }
            })
            .collect();

        WordGraph::from_parts(nodes, self.words)
    }
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars().zip(b.chars()).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rejects_unsorted_input() {
        let err = GraphBuilder::build(words(&["banana", "apple"])).unwrap_err();
        assert!(matches!(err, EngineError::UnsortedLexicon { at: 1 }));
    }

    #[test]
    fn tolerates_duplicates() {
        let graph = GraphBuilder::build(words(&["cat", "cat", "dog"])).unwrap();
        assert_eq!(graph.all_words().len(), 2);
        assert!(graph.contains("cat"));
        assert!(graph.contains("dog"));
    }

    #[test]
    fn empty_input_yields_root_only_graph() {
        let graph = GraphBuilder::build(Vec::new()).unwrap();
        assert_eq!(graph.node_count(), 1);
        assert!(graph.all_words().is_empty());
        assert!(!graph.contains("anything"));
    }

    #[test]
    fn merges_shared_suffix_structure() {
        // "ring" and "sing" share the suffix "ing"; the nodes for 'n','g'
        // (and the node for 'i' once both branches reach it) should be the
        // same physical nodes reachable via both 'r' and 's'.
        let graph = GraphBuilder::build(words(&["ring", "sing"])).unwrap();
        assert!(graph.contains("ring"));
        assert!(graph.contains("sing"));

        let r_path = graph.node(graph.root()).find_edge('r').unwrap();
        let s_path = graph.node(graph.root()).find_edge('s').unwrap();
        let r_i = graph.node(r_path).find_edge('i').unwrap();
        let s_i = graph.node(s_path).find_edge('i').unwrap();
        let r_n = graph.node(r_i).find_edge('n').unwrap();
        let s_n = graph.node(s_i).find_edge('n').unwrap();
        assert_eq!(r_n, s_n, "shared suffix 'ng' should be merged");
    }

    #[test]
    fn colliding_terminal_leaves_merge_but_keep_distinct_word_ids() {
        // "and", "ant" and "any" each end in a childless (terminal, edges=[])
        // leaf -- structurally identical, so minimality requires all three
        // to share one physical node -- yet each word must still resolve to
        // its own distinct, correct word id.
        let graph = GraphBuilder::build(words(&["and", "ant", "any"])).unwrap();

        let a = graph.node(graph.root()).find_edge('a').unwrap();
        let n = graph.node(a).find_edge('n').unwrap();
        let d_leaf = graph.node(n).find_edge('d').unwrap();
        let t_leaf = graph.node(n).find_edge('t').unwrap();
        let y_leaf = graph.node(n).find_edge('y').unwrap();
        assert_eq!(d_leaf, t_leaf, "childless terminal leaves must merge");
        assert_eq!(t_leaf, y_leaf, "childless terminal leaves must merge");
        assert_eq!(graph.node_count(), 4, "merged leaf should not be triplicated");

        let id_and = graph.word_id("and").unwrap();
        let id_ant = graph.word_id("ant").unwrap();
        let id_any = graph.word_id("any").unwrap();
        assert_ne!(id_and, id_ant);
        assert_ne!(id_ant, id_any);
        assert_ne!(id_and, id_any);
        assert_eq!(graph.all_words()[id_and as usize], "and");
        assert_eq!(graph.all_words()[id_ant as usize], "ant");
        assert_eq!(graph.all_words()[id_any as usize], "any");
    }
}
