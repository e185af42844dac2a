//! # Template Store
//!
//! For every dictionary word of length >= 2, generates a fixed-length
//! resampled "ideal" swipe path across the key layout's key centres, and
//! indexes those templates by `(first char, last char)` for the decoder's
//! endpoint pre-filter.

use crate::config::EngineConfig;
use crate::graph::WordGraph;
use crate::layout::{KeyLayout, Point};
use crate::resample::{arc_length, resample};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One word's ideal swipe path, resampled to `RESAMPLE_N` points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    pub word_id: u32,
    pub first_char: char,
    pub last_char: char,
    pub points: Vec<Point>,
    pub arc_length: f32,
}

/// All templates in a dictionary, plus the `(first, last)` -> indices
/// endpoint index used to pre-filter decode candidates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateStore {
    templates: Vec<Template>,
    endpoint_index: HashMap<(char, char), Vec<usize>>,
}

impl TemplateStore {
    /// Generates templates for every word in `graph` of length >= 2 whose
    /// characters are all placeable by `layout`, resampling each to
    /// `config.resample_n` points. Returns the store and the number of
    /// words skipped because they were unmappable (too short, or containing
    /// a character the layout can't place) -- not treated as a fatal error.
    pub fn build(graph: &WordGraph, layout: &KeyLayout, config: &EngineConfig) -> (Self, usize) {
        let mut templates = Vec::new();
        let mut endpoint_index: HashMap<(char, char), Vec<usize>> = HashMap::new();
        let mut skipped = 0usize;

        for (word_id, word) in graph.all_words().iter().enumerate() {
            match build_one(word, layout, config.resample_n) {
                Some(points) => {
                    let first = points.0;
                    let last = points.1;
                    let idx = templates.len();
                    templates.push(Template {
                        word_id: word_id as u32,
                        first_char: first,
                        last_char: last,
                        points: points.2,
                        arc_length: points.3,
                    });
                    endpoint_index.entry((first, last)).or_default().push(idx);
                }
                None => {
                    skipped += 1;
                    log::debug!("skipping unmappable template word: {word}");
                }
            }
        }

        log::info!(
            "built {} templates from {} words ({} skipped)",
            templates.len(),
            graph.all_words().len(),
            skipped
        );

        (
            Self {
                templates,
                endpoint_index,
            },
            skipped,
        )
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, idx: usize) -> &Template {
        &self.templates[idx]
    }

    /// Template indices whose `(first, last)` endpoint pair matches exactly.
    pub fn by_endpoints(&self, first: char, last: char) -> &[usize] {
        self.endpoint_index
            .get(&(first, last))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Maps `word`'s characters to key centres, collapses consecutive
/// duplicates, computes arc length, and resamples. Returns `None` if any
/// character is unmappable or fewer than two distinct points remain.
fn build_one(word: &str, layout: &KeyLayout, resample_n: usize) -> Option<(char, char, Vec<Point>, f32)> {
    let mut raw = Vec::with_capacity(word.chars().count());
    for c in word.chars() {
        raw.push(layout.center(c)?);
    }

    let mut collapsed: Vec<Point> = Vec::with_capacity(raw.len());
    for p in raw {
        if collapsed.last().map(|last: &Point| *last != p).unwrap_or(true) {
            collapsed.push(p);
        }
    }

    if collapsed.len() < 2 {
        return None;
    }

    let length = arc_length(&collapsed);
    let resampled = resample(&collapsed, resample_n);
    let first = word.chars().next()?;
    let last = word.chars().last()?;
    Some((first, last, resampled, length))
}
