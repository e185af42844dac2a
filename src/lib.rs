//! # Swipe Input Engine
//!
//! A mobile gesture-keyboard input engine core: an offline minimal acyclic
//! word graph (DAWG) and template store, and an online SHARK2-style swipe
//! decoder built on banded dynamic time warping with early abandonment.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//! - `error`: The two fatal error kinds the engine can raise
//! - `config`: Tunable construction and decode-time constants
//! - `graph`: The word graph (DAWG), read-only at decode time
//! - `builder`: Incremental, equivalence-merging DAWG construction
//! - `layout`: Key-centre coordinates for a keyboard layout
//! - `resample`: Equal-arc-length polyline resampling
//! - `templates`: Per-word ideal swipe paths and their endpoint index
//! - `gesture`: Touch capture state machine and per-point feature derivation
//! - `dtw`: Banded dynamic time warping with early abandonment
//! - `language_model`: Pluggable word scoring used to rerank candidates
//! - `decoder`: The online gesture-to-candidates pipeline
//! - `serialize`: The binary word-graph resource format
//! - `cli`: Command-line interface for building and exercising the engine
//!
//! ## Key Features
//!
//! - **Minimal Word Graph**: Daciuk-style incremental DAWG construction with
//!   bottom-up equivalence merging
//! - **Real-Time Swipe Decoding**: resample, endpoint pre-filter, banded
//!   DTW with early abandonment, geometric top-K, language-model rerank
//! - **Pluggable Language Model**: a trait object lets callers swap in a
//!   richer model without touching the decoder
//! - **Binary Resource Format**: a compact, validated on-disk representation
//!   of a built word graph
//! - **Async Resource Loading**: `tokio`-backed async load path, kept
//!   separate from the synchronous, single-threaded decode hot path
//!
//! ## Example
//!
//! ```rust
//! use swipe_input_engine::builder::GraphBuilder;
//! use swipe_input_engine::config::EngineConfig;
//! use swipe_input_engine::layout::KeyLayout;
//! use swipe_input_engine::templates::TemplateStore;
//!
//! let words = vec!["cat".to_string(), "dog".to_string()];
//! let graph = GraphBuilder::build(words).unwrap();
//! let layout = KeyLayout::qwerty();
//! let config = EngineConfig::default();
//! let (templates, skipped) = TemplateStore::build(&graph, &layout, &config);
//! assert_eq!(skipped, 0);
//! assert_eq!(templates.templates().len(), 2);
//! ```

pub mod builder;
pub mod cli;
pub mod config;
pub mod decoder;
pub mod dtw;
pub mod error;
pub mod gesture;
pub mod graph;
pub mod language_model;
pub mod layout;
pub mod resample;
pub mod serialize;
pub mod templates;
