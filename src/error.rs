//! # Error Types
//!
//! The engine surfaces exactly two fatal error conditions: a lexicon that
//! wasn't sorted before being handed to the [`crate::builder::GraphBuilder`],
//! and a resource file that fails validation on load. Everything else that
//! might look like an error case (an unmappable template character, a
//! too-short gesture) is not fatal and is represented as data instead --
//! see `TemplateStore::build`'s skipped-word count and
//! `SwipeDecoder::decode`'s empty-vec result.

use thiserror::Error;

/// Fatal error conditions raised by the engine's offline construction and
/// resource-loading paths. The hot-path decoder never returns this type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The graph builder was given a word list that was not lexicographically
    /// sorted. `at` is the index of the first word found out of order.
    #[error("lexicon is not sorted: word at index {at} is out of order")]
    UnsortedLexicon { at: usize },

    /// A serialized word-graph resource failed validation on load. `reason`
    /// describes which check failed (bad counts, an out-of-range index, a
    /// truncated stream, or invalid UTF-8 in a word).
    #[error("corrupt resource: {0}")]
    CorruptResource(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
