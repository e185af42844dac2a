//! # Polyline Resampling
//!
//! Shared by template generation ([`crate::templates`]) and gesture-path
//! extraction ([`crate::decoder`]): replaces a polyline with exactly `n`
//! points spaced uniformly along its arc length.
//!
//! Advancing the input cursor only when a whole source segment is consumed
//! clusters output points near segment boundaries whenever the target
//! spacing is smaller than a typical segment, so this walks a single
//! monotonically increasing arc-length cursor across segments instead,
//! which guarantees uniform spacing regardless of how segment lengths
//! compare to the target spacing.

use crate::layout::Point;

/// Resamples `path` to exactly `n` equidistant points (by arc length).
///
/// - If `path` has fewer than 2 points, or `n == 0`, returns `n` copies of
///   `path`'s only point (or an empty vec if `path` is empty).
/// - If the polyline's total arc length is approximately zero, returns `n`
///   copies of the start point.
/// - Otherwise the first output point equals the input start, the last
///   equals the input end (within floating-point tolerance), and
///   consecutive outputs are separated by `L / (n - 1)` arc length along
///   the original polyline.
pub fn resample(path: &[Point], n: usize) -> Vec<Point> {
    if n == 0 {
        return Vec::new();
    }
    if path.is_empty() {
        return Vec::new();
    }
    if path.len() == 1 || n == 1 {
        return vec![path[0]; n];
    }

    let segment_lengths: Vec<f32> = path
        .windows(2)
        .map(|w| w[0].distance(&w[1]))
        .collect();
    let total_length: f32 = segment_lengths.iter().sum();

    if total_length < 1e-6 {
        return vec![path[0]; n];
    }

    let step = total_length / (n - 1) as f32;
    let mut out = Vec::with_capacity(n);
    out.push(path[0]);

    let mut seg_idx = 0usize;
    let mut seg_start_dist = 0.0f32;

    for k in 1..n - 1 {
        let target = step * k as f32;
        while seg_idx < segment_lengths.len()
            && seg_start_dist + segment_lengths[seg_idx] < target
        {
            seg_start_dist += segment_lengths[seg_idx];
            seg_idx += 1;
        }
        if seg_idx >= segment_lengths.len() {
            out.push(*path.last().unwrap());
            continue;
        }
        let seg_len = segment_lengths[seg_idx];
        let t = if seg_len > 1e-9 {
            ((target - seg_start_dist) / seg_len).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let a = path[seg_idx];
        let b = path[seg_idx + 1];
        out.push(Point::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t));
    }

    out.push(*path.last().unwrap());

    // Guarantee exactly n points even under rounding: pad or truncate.
    while out.len() < n {
        out.push(*path.last().unwrap());
    }
    out.truncate(n);
    out
}

/// Total arc length of a polyline.
pub fn arc_length(path: &[Point]) -> f32 {
    path.windows(2).map(|w| w[0].distance(&w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resample_produces_exactly_n_points() {
        let path = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)];
        let out = resample(&path, 64);
        assert_eq!(out.len(), 64);
    }

    #[test]
    fn resample_preserves_endpoints() {
        let path = vec![
            Point::new(0.1, 0.2),
            Point::new(0.5, 0.5),
            Point::new(0.9, 0.1),
        ];
        let out = resample(&path, 10);
        assert!((out.first().unwrap().x - path[0].x).abs() < 1e-5);
        assert!((out.first().unwrap().y - path[0].y).abs() < 1e-5);
        assert!((out.last().unwrap().x - path[2].x).abs() < 1e-5);
        assert!((out.last().unwrap().y - path[2].y).abs() < 1e-5);
    }

    #[test]
    fn resample_is_idempotent_on_output() {
        let path = vec![
            Point::new(0.0, 0.0),
            Point::new(0.3, 0.4),
            Point::new(1.0, 1.0),
        ];
        let once = resample(&path, 32);
        let twice = resample(&once, 32);
        for (a, b) in once.iter().zip(twice.iter()) {
            assert!((a.x - b.x).abs() < 1e-4);
            assert!((a.y - b.y).abs() < 1e-4);
        }
    }

    #[test]
    fn degenerate_path_returns_repeated_start_point() {
        let path = vec![Point::new(0.5, 0.5); 4];
        let out = resample(&path, 16);
        assert_eq!(out.len(), 16);
        for p in &out {
            assert!((p.x - 0.5).abs() < 1e-6);
            assert!((p.y - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn single_point_path_returns_n_copies() {
        let out = resample(&[Point::new(0.2, 0.3)], 8);
        assert_eq!(out.len(), 8);
        assert!(out.iter().all(|p| p.x == 0.2 && p.y == 0.3));
    }

    #[test]
    fn spacing_is_uniform_on_a_straight_line() {
        let path = vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        let out = resample(&path, 5);
        let step = out[1].x - out[0].x;
        for w in out.windows(2) {
            assert!(((w[1].x - w[0].x) - step).abs() < 1e-4);
        }
    }
}
