//! # Swipe Decoder
//!
//! The online pipeline: resample the captured gesture, pre-filter
//! templates by endpoint proximity, compare surviving templates via banded
//! DTW with early abandonment while tracking a running geometric top-K,
//! normalise distances into `[0,1]` scores, rerank with an injected
//! language model, and return the final top-N candidates.
//!
//! Candidates are pre-filtered by endpoint character, matched with a
//! running best-score used as a comparison cutoff, and finally
//! sorted-then-truncated -- with a banded-DTW-with-feedback-threshold
//! comparison and a fixed 0.6/0.4 combined score driving the ranking.

use crate::config::EngineConfig;
use crate::dtw::banded_dtw;
use crate::gesture::GesturePoint;
use crate::graph::WordGraph;
use crate::language_model::LanguageModel;
use crate::layout::{KeyLayout, Point};
use crate::resample::resample;
use crate::templates::TemplateStore;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// A ranked decode result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub word: String,
    pub geometric_score: f32,
    pub language_score: f32,
    pub combined_score: f32,
}

/// Maintains the running top-K of (distance, template index) pairs used
/// both to produce the final geometric-score normaliser and to derive the
/// DTW early-abandonment threshold.
///
/// The threshold is monotonically non-decreasing within a decode: once the
/// top-K set first reaches size `k`, the threshold is pinned at that
/// moment's K-th-best distance rather than tightening further as better
/// candidates arrive. This remains sound for early abandonment -- it is a
/// looser-than-necessary bound, never a tighter one.
struct TopK {
    k: usize,
    entries: Vec<(f32, usize)>,
    threshold: f32,
}

impl TopK {
    fn new(k: usize) -> Self {
        Self {
            k,
            entries: Vec::with_capacity(k + 1),
            threshold: f32::INFINITY,
        }
    }

    fn threshold(&self) -> f32 {
        self.threshold
    }

    fn consider(&mut self, distance: f32, template_idx: usize) {
        if !distance.is_finite() {
            return;
        }
        let pos = self.entries.partition_point(|&(d, _)| d <= distance);
        self.entries.insert(pos, (distance, template_idx));
        if self.entries.len() > self.k {
            self.entries.truncate(self.k);
        }
        if self.entries.len() == self.k && self.threshold.is_infinite() {
            self.threshold = self.entries[self.k - 1].0;
        }
    }

    fn worst_distance(&self) -> Option<f32> {
        self.entries.last().map(|&(d, _)| d)
    }
}

/// The online gesture-to-candidates pipeline, holding shared read-only
/// references to the word graph, template store and key layout, plus an
/// injected language-model scorer.
pub struct SwipeDecoder {
    config: EngineConfig,
    graph: Arc<WordGraph>,
    templates: Arc<TemplateStore>,
    layout: Arc<KeyLayout>,
    language_model: Arc<dyn LanguageModel>,
}

impl SwipeDecoder {
    pub fn new(
        config: EngineConfig,
        graph: Arc<WordGraph>,
        templates: Arc<TemplateStore>,
        layout: Arc<KeyLayout>,
        language_model: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            config,
            graph,
            templates,
            layout,
            language_model,
        }
    }

    /// Decodes a captured gesture into ranked candidates. Always returns
    /// (never errors); an empty list is a valid "no suggestion" result for
    /// a too-short gesture, an empty pre-filter, or universal pruning.
    pub fn decode(&self, gesture: &[GesturePoint], context: &str) -> Vec<Candidate> {
        if gesture.len() < 2 {
            return Vec::new();
        }

        let positions: Vec<Point> = gesture.iter().map(|g| g.position).collect();
        let input_path = resample(&positions, self.config.resample_n);
        let first_point = *input_path.first().unwrap();
        let last_point = *input_path.last().unwrap();

        let start_chars = self.chars_near(first_point);
        let end_chars = self.chars_near(last_point);
        if start_chars.is_empty() || end_chars.is_empty() {
            return Vec::new();
        }

        let mut candidate_indices: HashSet<usize> = HashSet::new();
        for &s in &start_chars {
            for &e in &end_chars {
                for &idx in self.templates.by_endpoints(s, e) {
                    candidate_indices.insert(idx);
                }
            }
        }
        if candidate_indices.is_empty() {
            return Vec::new();
        }

        let mut top_k = TopK::new(self.config.geometric_top_n);
        for &idx in &candidate_indices {
            let template = self.templates.get(idx);
            let distance = banded_dtw(
                &input_path,
                &template.points,
                self.config.band_width,
                top_k.threshold(),
            );
            top_k.consider(distance, idx);
        }

        let Some(worst) = top_k.worst_distance() else {
            return Vec::new();
        };
        let normalizer = 1.2 * worst;

        let mut candidates: Vec<Candidate> = top_k
            .entries
            .iter()
            .map(|&(distance, idx)| {
                let template = self.templates.get(idx);
                let word = &self.graph.all_words()[template.word_id as usize];
                let geometric = if normalizer > 1e-9 {
                    (1.0 - distance / normalizer).max(0.0)
                } else {
                    1.0
                };
                let language = self.language_model.score(word, context);
                let combined = 0.6 * geometric + 0.4 * language;
                Candidate {
                    word: word.clone(),
                    geometric_score: geometric,
                    language_score: language,
                    combined_score: combined,
                }
            })
            .collect();

        candidates.sort_by(|a, b| {
            b.combined_score
                .partial_cmp(&a.combined_score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.word.cmp(&b.word))
        });
        candidates.truncate(self.config.final_top_n);
        candidates
    }

    /// Characters whose key centre lies within `ENDPOINT_RADIUS` of `p`.
    fn chars_near(&self, p: Point) -> Vec<char> {
        self.layout
            .chars()
            .filter(|&(_, centre)| centre.distance(&p) <= self.config.endpoint_radius)
            .map(|(c, _)| c)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::GraphBuilder;
    use crate::language_model::NeutralModel;

    fn build(words: &[&str], config: EngineConfig) -> (Arc<WordGraph>, Arc<TemplateStore>, Arc<KeyLayout>) {
        let graph = GraphBuilder::build(words.iter().map(|s| s.to_string()).collect()).unwrap();
        let layout = KeyLayout::qwerty();
        let (templates, _) = TemplateStore::build(&graph, &layout, &config);
        (Arc::new(graph), Arc::new(templates), Arc::new(layout))
    }

    fn gesture_along(chars: &[char], layout: &KeyLayout, n: usize) -> Vec<GesturePoint> {
        let key_points: Vec<Point> = chars.iter().map(|&c| layout.center(c).unwrap()).collect();
        let path = resample(&key_points, n);
        path.iter()
            .enumerate()
            .map(|(i, &p)| GesturePoint {
                position: p,
                timestamp: i as f32 * 0.016,
                velocity: 0.0,
                direction: 0.0,
                curvature: 0.0,
            })
            .collect()
    }

    #[test]
    fn straight_line_swipe_recovers_exact_word() {
        let config = EngineConfig::default();
        let (graph, templates, layout) = build(&["qwerty", "query", "queer"], config);
        let decoder = SwipeDecoder::new(
            config,
            graph,
            templates,
            layout.clone(),
            Arc::new(NeutralModel),
        );
        let gesture = gesture_along(&['q', 'w', 'e', 'r', 't', 'y'], &layout, 64);
        let candidates = decoder.decode(&gesture, "");
        assert!(!candidates.is_empty());
        assert_eq!(candidates[0].word, "qwerty");
        assert!(candidates[0].geometric_score > 0.9);
    }

    #[test]
    fn tight_endpoint_radius_excludes_non_matching_endpoints() {
        let config = EngineConfig::default().with_endpoint_radius(0.02);
        let (graph, templates, layout) = build(&["qwerty", "query", "queer"], config);
        let decoder = SwipeDecoder::new(
            config,
            graph,
            templates,
            layout.clone(),
            Arc::new(NeutralModel),
        );
        let gesture = gesture_along(&['q', 'w', 'e', 'r', 't', 'y'], &layout, 64);
        let candidates = decoder.decode(&gesture, "");
        assert!(!candidates.iter().any(|c| c.word == "query" || c.word == "queer"));
    }

    #[test]
    fn degenerate_single_point_gesture_yields_no_candidates() {
        let config = EngineConfig::default();
        let (graph, templates, layout) = build(&["qwerty"], config);
        let decoder = SwipeDecoder::new(config, graph, templates, layout, Arc::new(NeutralModel));
        let gesture = vec![GesturePoint {
            position: Point::new(0.2, 0.2),
            timestamp: 0.0,
            velocity: 0.0,
            direction: 0.0,
            curvature: 0.0,
        }];
        assert!(decoder.decode(&gesture, "").is_empty());
    }

    #[test]
    fn empty_prefilter_yields_no_candidates() {
        let config = EngineConfig::default();
        let (graph, templates, layout) = build(&["qwerty"], config);
        let decoder = SwipeDecoder::new(config, graph, templates, layout.clone(), Arc::new(NeutralModel));
        // Gesture over keys with no dictionary word sharing those endpoints.
        let gesture = gesture_along(&['z', 'x'], &layout, 64);
        assert!(decoder.decode(&gesture, "").is_empty());
    }

    #[test]
    fn candidates_are_sorted_descending_by_combined_score() {
        let config = EngineConfig::default();
        let (graph, templates, layout) = build(&["qwerty", "query", "queer"], config);
        let decoder = SwipeDecoder::new(config, graph, templates, layout.clone(), Arc::new(NeutralModel));
        let gesture = gesture_along(&['q', 'w', 'e', 'r', 't', 'y'], &layout, 64);
        let candidates = decoder.decode(&gesture, "");
        for w in candidates.windows(2) {
            assert!(w[0].combined_score >= w[1].combined_score);
        }
    }

    #[test]
    fn top_k_threshold_stays_infinite_until_first_fill() {
        let mut top_k = TopK::new(2);
        assert!(top_k.threshold().is_infinite());
        top_k.consider(5.0, 0);
        assert!(top_k.threshold().is_infinite(), "not yet filled to k");
        top_k.consider(3.0, 1);
        assert_eq!(top_k.threshold(), 5.0, "pinned to k-th best on first fill");
        top_k.consider(1.0, 2);
        assert_eq!(
            top_k.threshold(),
            5.0,
            "threshold must not widen back out after pinning"
        );
    }

    #[test]
    fn smaller_k_yields_a_tighter_prune_threshold() {
        // A smaller top-K pins its threshold earlier (and tighter), which is
        // exactly what lets a small GEOMETRIC_TOP_N abandon more DTW rows --
        // a threshold stuck at infinity would make every K behave alike.
        let mut small = TopK::new(1);
        let mut large = TopK::new(3);
        for (i, d) in [1.0_f32, 2.0, 3.0, 4.0, 5.0].into_iter().enumerate() {
            small.consider(d, i);
            large.consider(d, i);
        }
        assert!(small.threshold().is_finite());
        assert!(large.threshold().is_finite());
        assert!(small.threshold() < large.threshold());
    }

    #[test]
    fn pruning_with_top_1_yields_same_winner_as_top_50() {
        let config_wide = EngineConfig::default().with_geometric_top_n(50);
        let config_narrow = EngineConfig::default().with_geometric_top_n(1);
        let (graph_w, templates_w, layout_w) = build(&["qwerty", "query", "queer"], config_wide);
        let (graph_n, templates_n, layout_n) = build(&["qwerty", "query", "queer"], config_narrow);

        let decoder_wide = SwipeDecoder::new(
            config_wide,
            graph_w,
            templates_w,
            layout_w.clone(),
            Arc::new(NeutralModel),
        );
        let decoder_narrow = SwipeDecoder::new(
            config_narrow,
            graph_n,
            templates_n,
            layout_n.clone(),
            Arc::new(NeutralModel),
        );

        let gesture_wide = gesture_along(&['q', 'w', 'e', 'r', 't', 'y'], &layout_w, 64);
        let gesture_narrow = gesture_along(&['q', 'w', 'e', 'r', 't', 'y'], &layout_n, 64);

        let wide = decoder_wide.decode(&gesture_wide, "");
        let narrow = decoder_narrow.decode(&gesture_narrow, "");
        assert_eq!(wide[0].word, narrow[0].word);
    }
}
