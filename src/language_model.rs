//! # Language Model Interface
//!
//! A narrow capability the decoder consults to rerank geometric
//! candidates: `score(word, context) -> f32 in [0,1]`. Implementations
//! range from a constant stub through a log-frequency unigram table to
//! future context-aware models; a trait object keeps the decoder
//! decoupled from which one is in use.

use std::collections::HashMap;

/// A capability that scores how likely `word` is given `context` (the
/// text immediately preceding the cursor), returning a value in `[0,1]`.
/// Called synchronously from the decoder's thread only; a stateful
/// implementation must handle its own synchronisation if shared across
/// decoders.
pub trait LanguageModel: Send + Sync {
    fn score(&self, word: &str, context: &str) -> f32;
}

/// A stub that disables reranking: every word scores exactly `0.5`, so the
/// combined score reduces to `0.6 * geometric + 0.2`, preserving the
/// geometric ranking order.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeutralModel;

impl LanguageModel for NeutralModel {
    fn score(&self, _word: &str, _context: &str) -> f32 {
        0.5
    }
}

/// A unigram model backed by a `word<TAB>frequency` table, scoring by
/// min-max normalised log-frequency. `context` is accepted but unused --
/// richer models may consult it, this one does not.
#[derive(Debug, Clone, Default)]
pub struct UnigramModel {
    log_freq: HashMap<String, f32>,
    min_log_freq: f32,
    max_log_freq: f32,
}

impl UnigramModel {
    /// Parses `text`, one `word<TAB>frequency` pair per line (blank lines
    /// and lines that fail to parse a frequency are skipped), and
    /// precomputes the min/max log-frequency used to normalise scores into
    /// `[0,1]`.
    pub fn from_text(text: &str) -> Self {
        let mut log_freq = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((word, freq_str)) = line.split_once('\t') else {
                continue;
            };
            let Ok(freq) = freq_str.trim().parse::<f64>() else {
                continue;
            };
            if freq <= 0.0 {
                continue;
            }
            log_freq.insert(word.to_string(), (freq.ln()) as f32);
        }

        let (min_log_freq, max_log_freq) = log_freq
            .values()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        Self {
            log_freq,
            min_log_freq,
            max_log_freq,
        }
    }

    pub fn len(&self) -> usize {
        self.log_freq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log_freq.is_empty()
    }
}

impl LanguageModel for UnigramModel {
    fn score(&self, word: &str, _context: &str) -> f32 {
        let Some(&log_f) = self.log_freq.get(word) else {
            return 0.0;
        };
        let range = self.max_log_freq - self.min_log_freq;
        if range <= 1e-6 {
            return 1.0;
        }
        ((log_f - self.min_log_freq) / range).clamp(0.0, 1.0)
    }
}
