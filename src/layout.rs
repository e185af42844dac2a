//! # Key Layout
//!
//! A pure mapping from character to a normalised key-centre coordinate in
//! the unit square, used both by the [`crate::templates`] generator (to
//! place ideal swipe paths) and by the [`crate::decoder`] (to place a
//! captured gesture's first/last points for the endpoint pre-filter).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A point in normalised `[0,1]^2` space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A partial mapping from character to key centre. Case is folded before
/// lookup, so callers need not worry about matching the layout's own case.
#[derive(Debug, Clone, Default)]
pub struct KeyLayout {
    centers: HashMap<char, Point>,
}

impl KeyLayout {
    /// Builds a layout from an arbitrary set of `(character, centre)`
    /// pairs. Characters are lowercased on insertion.
    pub fn from_pairs<I: IntoIterator<Item = (char, Point)>>(pairs: I) -> Self {
        let mut centers = HashMap::new();
        for (c, p) in pairs {
            for lc in c.to_lowercase() {
                centers.insert(lc, p);
            }
        }
        Self { centers }
    }

    /// Returns the key centre for `c` (case-folded), if the layout places
    /// that character.
    pub fn center(&self, c: char) -> Option<Point> {
        let mut lower = c.to_lowercase();
        let first = lower.next()?;
        self.centers.get(&first).copied()
    }

    /// Iterates over every `(character, centre)` pair the layout places,
    /// used by the decoder's endpoint pre-filter to find characters near a
    /// gesture's first/last sampled point.
    pub fn chars(&self) -> impl Iterator<Item = (char, Point)> + '_ {
        self.centers.iter().map(|(&c, &p)| (c, p))
    }

    /// The default QWERTY layout: three rows at `y ∈ {0.17, 0.50, 0.83}`,
    /// row widths 10/9/7 keys, row offsets `0, 0.5, 1.5` key-widths, each
    /// key `0.1` wide.
    pub fn qwerty() -> Self {
        const ROWS: [(&str, f32, f32); 3] = [
            ("qwertyuiop", 0.17, 0.0),
            ("asdfghjkl", 0.50, 0.5),
            ("zxcvbnm", 0.83, 1.5),
        ];
        const KEY_WIDTH: f32 = 0.1;

        let mut pairs = Vec::new();
        for (row, y, offset_in_keys) in ROWS {
            for (i, c) in row.chars().enumerate() {
                let x = (offset_in_keys + i as f32) * KEY_WIDTH + KEY_WIDTH / 2.0;
                pairs.push((c, Point::new(x, y)));
            }
        }
        Self::from_pairs(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qwerty_places_every_letter() {
        let layout = KeyLayout::qwerty();
        for c in 'a'..='z' {
            assert!(layout.center(c).is_some(), "missing key centre for {c}");
        }
    }

    #[test]
    fn qwerty_case_is_folded() {
        let layout = KeyLayout::qwerty();
        assert_eq!(layout.center('q'), layout.center('Q'));
    }

    #[test]
    fn custom_layout_is_opaque_to_missing_characters() {
        let layout = KeyLayout::from_pairs([('a', Point::new(0.1, 0.1))]);
        assert!(layout.center('a').is_some());
        assert!(layout.center('z').is_none());
    }

    #[test]
    fn centers_lie_within_unit_square() {
        let layout = KeyLayout::qwerty();
        for c in 'a'..='z' {
            let p = layout.center(c).unwrap();
            assert!((0.0..=1.0).contains(&p.x));
            assert!((0.0..=1.0).contains(&p.y));
        }
    }
}
