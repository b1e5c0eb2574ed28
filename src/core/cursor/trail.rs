//=========================================================================
// Trail History
//=========================================================================
//
// Timestamped pointer samples with time-based retention.
//
// Architecture:
//   PointerEvent::Moved → push() → Vec<TrailPoint> (chronological)
//                                        ↓
//   frame tick ─────────→ purge(now) → segments(now) → renderer
//
// Retention is by age, not by count: fast movement yields more live
// points (a denser trail) than slow movement over the same window.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::time::Timestamp;

//=== Constants ===========================================================

/// Age in milliseconds after which a trail point is no longer drawn or kept.
pub const DEFAULT_MAX_AGE_MS: f64 = 800.0;

//=== Decay Law ===========================================================

/// Opacity of a sample of the given age.
///
/// `1 - age / max_age`, clamped to `[0, 1]`. Strictly decreasing on
/// `[0, max_age)` and exactly `0.0` from `max_age` on.
pub fn fade(age: f64, max_age: f64) -> f32 {
    let normalized = age.max(0.0) / max_age;
    (1.0 - normalized).max(0.0) as f32
}

//=== TrailPoint ==========================================================

/// One pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub x: f32,
    pub y: f32,
    pub captured_at: Timestamp,
}

impl TrailPoint {
    /// Milliseconds since capture.
    pub fn age(&self, now: Timestamp) -> f64 {
        now.elapsed_since(self.captured_at)
    }
}

//=== TrailSegment ========================================================

/// Line between two consecutive samples, ready to stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailSegment {
    pub from: (f32, f32),
    pub to: (f32, f32),

    /// Age of the older endpoint divided by the max age, in `[0, 1)`.
    pub normalized_age: f32,

    /// Opacity from [`fade`], always `> 0`.
    pub opacity: f32,
}

//=== TrailHistory ========================================================

/// Chronological list of live trail points.
#[derive(Debug, Clone)]
pub struct TrailHistory {
    points: Vec<TrailPoint>,
    max_age: f64,
}

impl TrailHistory {
    /// Creates an empty history with the given retention window.
    ///
    /// # Panics
    ///
    /// Panics if `max_age_ms` is not positive.
    pub fn new(max_age_ms: f64) -> Self {
        assert!(max_age_ms > 0.0, "Trail max age must be positive, got {}", max_age_ms);
        Self {
            points: Vec::with_capacity(64),
            max_age: max_age_ms,
        }
    }

    /// Appends a sample. Samples must arrive in chronological order.
    pub fn push(&mut self, x: f32, y: f32, captured_at: Timestamp) {
        self.points.push(TrailPoint { x, y, captured_at });
    }

    /// Drops every point whose age has reached the max age.
    ///
    /// Returns the number of points removed.
    pub fn purge(&mut self, now: Timestamp) -> usize {
        let before = self.points.len();
        let max_age = self.max_age;
        self.points.retain(|p| p.age(now) < max_age);
        before - self.points.len()
    }

    /// Opacity of a point at `now`.
    pub fn opacity_of(&self, point: &TrailPoint, now: Timestamp) -> f32 {
        fade(point.age(now), self.max_age)
    }

    /// Visible segments between consecutive points, oldest first.
    ///
    /// Each segment takes the age of its older endpoint, so the tail fades
    /// out first. Segments that would be fully transparent are skipped.
    pub fn segments(&self, now: Timestamp) -> impl Iterator<Item = TrailSegment> + '_ {
        let max_age = self.max_age;
        self.points.windows(2).filter_map(move |pair| {
            let (older, newer) = (pair[0], pair[1]);
            let age = older.age(now).max(0.0);
            let opacity = fade(age, max_age);
            if opacity <= 0.0 {
                return None;
            }
            Some(TrailSegment {
                from: (older.x, older.y),
                to: (newer.x, newer.y),
                normalized_age: (age / max_age) as f32,
                opacity,
            })
        })
    }

    pub fn points(&self) -> &[TrailPoint] {
        &self.points
    }

    pub fn max_age(&self) -> f64 {
        self.max_age
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl Default for TrailHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_AGE_MS)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: f64) -> Timestamp {
        Timestamp::from_millis(ms)
    }

    //=====================================================================
    // Decay Law
    //=====================================================================

    #[test]
    fn fresh_point_is_opaque() {
        assert_eq!(fade(0.0, DEFAULT_MAX_AGE_MS), 1.0);
    }

    #[test]
    fn opacity_is_linear_in_age() {
        assert!((fade(200.0, 800.0) - 0.75).abs() < 1e-6);
        assert!((fade(400.0, 800.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn opacity_strictly_decreases_until_max_age() {
        let mut previous = fade(0.0, DEFAULT_MAX_AGE_MS);
        let mut age = 1.0;
        while age < DEFAULT_MAX_AGE_MS {
            let current = fade(age, DEFAULT_MAX_AGE_MS);
            assert!(current < previous, "opacity at {} not below {}", age, previous);
            previous = current;
            age += 1.0;
        }
    }

    #[test]
    fn opacity_is_zero_at_and_past_max_age() {
        assert_eq!(fade(800.0, 800.0), 0.0);
        assert_eq!(fade(801.0, 800.0), 0.0);
        assert_eq!(fade(10_000.0, 800.0), 0.0);
    }

    #[test]
    fn negative_age_clamps_to_opaque() {
        assert_eq!(fade(-50.0, 800.0), 1.0);
    }

    //=====================================================================
    // Retention
    //=====================================================================

    #[test]
    fn purge_keeps_points_younger_than_max_age() {
        let mut trail = TrailHistory::default();
        for t in [0.0, 100.0, 200.0, 300.0, 400.0] {
            trail.push(t as f32, t as f32, at(t));
        }

        // Ages at t=900: 900, 800, 700, 600, 500
        let removed = trail.purge(at(900.0));

        assert_eq!(removed, 2);
        let remaining: Vec<f64> = trail.points().iter().map(|p| p.captured_at.millis()).collect();
        assert_eq!(remaining, vec![200.0, 300.0, 400.0]);
    }

    #[test]
    fn all_points_gone_once_newest_reaches_max_age() {
        let mut trail = TrailHistory::default();
        for t in [0.0, 100.0, 200.0, 300.0, 400.0] {
            trail.push(10.0, 10.0, at(t));
        }

        trail.purge(at(1200.0));

        assert!(trail.is_empty());
    }

    #[test]
    fn idle_for_max_age_empties_trail() {
        let mut trail = TrailHistory::default();
        trail.push(1.0, 2.0, at(5_000.0));
        trail.push(3.0, 4.0, at(5_010.0));

        trail.purge(at(5_010.0 + DEFAULT_MAX_AGE_MS));

        assert!(trail.is_empty());
    }

    #[test]
    fn fast_motion_keeps_more_points_than_slow() {
        let mut fast = TrailHistory::default();
        let mut slow = TrailHistory::default();
        for i in 0..80 {
            fast.push(i as f32, 0.0, at(i as f64 * 10.0));
        }
        for i in 0..8 {
            slow.push(i as f32, 0.0, at(i as f64 * 100.0));
        }

        fast.purge(at(800.0));
        slow.purge(at(800.0));

        assert!(fast.len() > slow.len());
    }

    //=====================================================================
    // Segments
    //=====================================================================

    #[test]
    fn segments_connect_consecutive_points() {
        let mut trail = TrailHistory::default();
        trail.push(0.0, 0.0, at(0.0));
        trail.push(10.0, 0.0, at(100.0));
        trail.push(20.0, 5.0, at(200.0));

        let segments: Vec<_> = trail.segments(at(400.0)).collect();

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].from, (0.0, 0.0));
        assert_eq!(segments[0].to, (10.0, 0.0));
        assert!((segments[0].opacity - 0.5).abs() < 1e-6);
        assert!((segments[1].opacity - 0.625).abs() < 1e-6);
        assert!(segments[1].normalized_age < segments[0].normalized_age);
    }

    #[test]
    fn expired_segments_are_skipped_without_purge() {
        let mut trail = TrailHistory::default();
        trail.push(0.0, 0.0, at(0.0));
        trail.push(1.0, 1.0, at(200.0));
        trail.push(2.0, 2.0, at(900.0));

        let segments: Vec<_> = trail.segments(at(900.0)).collect();

        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].from, (1.0, 1.0));
    }

    #[test]
    fn single_point_has_no_segments() {
        let mut trail = TrailHistory::default();
        trail.push(0.0, 0.0, at(0.0));
        assert_eq!(trail.segments(at(0.0)).count(), 0);
    }

    #[test]
    #[should_panic(expected = "Trail max age must be positive")]
    fn zero_max_age_panics() {
        TrailHistory::new(0.0);
    }
}
