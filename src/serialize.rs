//! # Binary Word-Graph Serialization
//!
//! The on-disk resource format for a built [`crate::graph::WordGraph`]:
//! node count and word count, then each node in BFS (dense-index) order as
//! a terminal flag, an edge count and the edges themselves (codepoint,
//! target), followed by the word table. All integers are little-endian.
//!
//! ```text
//! node_count:  u32
//! word_count:  u32
//! nodes:       node_count * Node
//!   terminal:    u8 (0 or 1)
//!   edge_count:  u16
//!   edges:       edge_count * (codepoint: u16, target: i32)
//! words:       word_count * (len: u16, utf8 bytes)
//! ```
//!
//! This deliberately omits the per-node word id that a node-attached format
//! would otherwise carry: minimality merges every childless terminal leaf
//! that several different words end on (see [`crate::builder`]), so no
//! single physical node can own a single word id. Word ids are instead the
//! word's position in the trailing word table, recovered at lookup time by
//! [`crate::graph::WordGraph::word_id`] rather than stored per node.
//!
//! Loading validates every edge target against `node_count` and every edge
//! codepoint against the Basic Multilingual Plane, returning
//! [`crate::error::EngineError::CorruptResource`] on any violation rather
//! than panicking on malformed input -- deserializing a resource file is
//! one of the two fatal-error surfaces in the engine.

use crate::error::{EngineError, Result};
use crate::graph::{Node, WordGraph};
use std::io::{self, Read, Write};

/// Serializes `graph` into the binary format described above.
///
/// Returns an [`io::Error`] if a word's UTF-8 length or a node's edge count
/// exceeds `u16::MAX`, or if an edge label falls outside the Basic
/// Multilingual Plane -- all of which indicate a graph that cannot be
/// represented in the baseline format rather than an I/O failure.
pub fn write<W: Write>(graph: &WordGraph, mut out: W) -> io::Result<()> {
    out.write_all(&(graph.node_count() as u32).to_le_bytes())?;
    out.write_all(&(graph.all_words().len() as u32).to_le_bytes())?;

    for idx in 0..graph.node_count() {
        let node = graph.node(idx as u32);
        out.write_all(&[node.terminal as u8])?;

        let edge_count: u16 = node.edge_labels.len().try_into().map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidData, "node has more than u16::MAX edges")
        })?;
        out.write_all(&edge_count.to_le_bytes())?;

        for i in 0..node.edge_labels.len() {
            let code = node.edge_labels[i] as u32;
            let code: u16 = code.try_into().map_err(|_| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    "edge label outside the Basic Multilingual Plane",
                )
            })?;
            out.write_all(&code.to_le_bytes())?;
            out.write_all(&(node.edge_targets[i] as i32).to_le_bytes())?;
        }
    }

    for word in graph.all_words() {
        let bytes = word.as_bytes();
        let len: u16 = bytes.len().try_into().map_err(|_| {
            io::Error::new(io::ErrorKind::InvalidData, "word longer than u16::MAX bytes")
        })?;
        out.write_all(&len.to_le_bytes())?;
        out.write_all(bytes)?;
    }

    Ok(())
}

/// Deserializes a [`WordGraph`] previously written by [`write`], validating
/// internal consistency (every edge target in range, every edge codepoint a
/// valid `char`) before returning it.
pub fn read<R: Read>(mut input: R) -> Result<WordGraph> {
    let node_count = read_u32(&mut input)? as usize;
    let word_count = read_u32(&mut input)? as usize;

    let mut nodes = Vec::with_capacity(node_count);
    for _ in 0..node_count {
        let mut terminal_byte = [0u8; 1];
        read_exact(&mut input, &mut terminal_byte)?;
        let terminal = terminal_byte[0] != 0;
        let edge_count = read_u16(&mut input)? as usize;

        let mut edge_labels = Vec::with_capacity(edge_count);
        let mut edge_targets = Vec::with_capacity(edge_count);
        for _ in 0..edge_count {
            let label_code = read_u16(&mut input)?;
            let label = char::from_u32(label_code as u32).ok_or_else(|| {
                EngineError::CorruptResource(format!("invalid char code point {label_code}"))
            })?;
            let target = read_i32(&mut input)?;
            if target < 0 || target as usize >= node_count {
                return Err(EngineError::CorruptResource(format!(
                    "edge target {target} out of range ({node_count} nodes)"
                )));
            }
            edge_labels.push(label);
            edge_targets.push(target as u32);
        }

        nodes.push(Node {
            terminal,
            edge_labels,
            edge_targets,
        });
    }

    let mut words = Vec::with_capacity(word_count);
    for _ in 0..word_count {
        let len = read_u16(&mut input)? as usize;
        let mut buf = vec![0u8; len];
        read_exact(&mut input, &mut buf)?;
        let word = String::from_utf8(buf)
            .map_err(|e| EngineError::CorruptResource(format!("word table: {e}")))?;
        words.push(word);
    }

    Ok(WordGraph::from_parts(nodes, words))
}

/// Asynchronous counterpart to [`read`], used by the loading path so a
/// large resource file does not block the decoder's worker thread; the
/// decoder itself remains entirely synchronous once loaded.
pub async fn read_async(path: &std::path::Path) -> Result<WordGraph> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| EngineError::CorruptResource(format!("reading {}: {e}", path.display())))?;
    read(io::Cursor::new(bytes))
}

fn read_u32<R: Read>(input: &mut R) -> Result<u32> {
    let mut buf = [0u8; 4];
    read_exact(input, &mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_i32<R: Read>(input: &mut R) -> Result<i32> {
    let mut buf = [0u8; 4];
    read_exact(input, &mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

fn read_u16<R: Read>(input: &mut R) -> Result<u16> {
    let mut buf = [0u8; 2];
    read_exact(input, &mut buf)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_exact<R: Read>(input: &mut R, buf: &mut [u8]) -> Result<()> {
    input
        .read_exact(buf)
        .map_err(|e| EngineError::CorruptResource(format!("unexpected end of resource: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;

    fn sample_graph() -> WordGraph {
        GraphBuilder::build(
            ["an", "and", "ant", "any"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn round_trips_a_built_graph() {
        let graph = sample_graph();
        let mut buf = Vec::new();
        write(&graph, &mut buf).unwrap();
        let loaded = read(io::Cursor::new(buf)).unwrap();
        assert_eq!(loaded.all_words(), graph.all_words());
        assert!(loaded.contains("and"));
        assert!(!loaded.contains("a"));
        assert_eq!(loaded.node_count(), graph.node_count());
        for word in graph.all_words() {
            assert_eq!(loaded.word_id(word), graph.word_id(word));
        }
    }

    #[test]
    fn rejects_truncated_input() {
        let graph = sample_graph();
        let mut buf = Vec::new();
        write(&graph, &mut buf).unwrap();
        buf.truncate(buf.len() - 4);
        let err = read(io::Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, EngineError::CorruptResource(_)));
    }

    #[test]
    fn rejects_out_of_range_edge_target() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&1u32.to_le_bytes()); // node_count = 1
        buf.extend_from_slice(&0u32.to_le_bytes()); // word_count = 0
        buf.push(0); // not terminal
        buf.extend_from_slice(&1u16.to_le_bytes()); // edge_count = 1
        buf.extend_from_slice(&(b'a' as u16).to_le_bytes());
        buf.extend_from_slice(&99i32.to_le_bytes()); // target out of range
        let err = read(io::Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, EngineError::CorruptResource(_)));
    }

    #[test]
    fn rejects_negative_edge_target() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&1u32.to_le_bytes());
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.push(0);
        buf.extend_from_slice(&1u16.to_le_bytes());
        buf.extend_from_slice(&(b'a' as u16).to_le_bytes());
        buf.extend_from_slice(&(-1i32).to_le_bytes());
        let err = read(io::Cursor::new(buf)).unwrap_err();
        assert!(matches!(err, EngineError::CorruptResource(_)));
    }

    #[test]
    fn empty_graph_round_trips() {
        let graph = GraphBuilder::build(Vec::new()).unwrap();
        let mut buf = Vec::new();
        write(&graph, &mut buf).unwrap();
        let loaded = read(io::Cursor::new(buf)).unwrap();
        assert_eq!(loaded.node_count(), 1);
        assert!(loaded.all_words().is_empty());
    }
}
