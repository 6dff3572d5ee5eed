//! Live touch point bookkeeping.
//!
//! The native layer delivers touches in frames: `begin_session`, one
//! `update` per point, `end_session`. Points stay tracked across frames from
//! their `Pressed` update until the frame in which they are `Released`.

use crate::event::{TouchId, TouchPhase};
use crate::geometry::Point;

/// Receives the touch count when a frame changes it.
pub trait TouchCountObserver {
    /// Called from [`TouchPointTracker::end_session`] with the new count.
    fn touch_count_changed(&mut self, count: usize);
}

impl<F: FnMut(usize)> TouchCountObserver for F {
    fn touch_count_changed(&mut self, count: usize) {
        self(count);
    }
}

/// A touch point tracked between press and release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedPoint {
    /// Touch ID.
    pub id: TouchId,
    /// Last surface-local position.
    pub position: Point,
    /// Last screen position.
    pub screen_position: Point,
    released: bool,
}

impl TrackedPoint {
    /// Whether the point was released in the current frame.
    #[must_use]
    pub const fn is_released(&self) -> bool {
        self.released
    }
}

/// Tracks active touch points and their count.
#[derive(Debug, Clone)]
pub struct TouchPointTracker {
    /// Points in press order, including points released this frame.
    points: Vec<TrackedPoint>,
    /// Count when the current frame started.
    frame_start_count: usize,
    /// Points announced by the native layer for this frame.
    expected: usize,
    /// Points delivered so far in this frame.
    delivered: usize,
    filter_coordinates: bool,
}

impl TouchPointTracker {
    /// Create a tracker that reports unchanged moves as stationary.
    #[must_use]
    pub fn new() -> Self {
        Self::with_filter(true)
    }

    /// Create a tracker with coordinate filtering on or off.
    #[must_use]
    pub fn with_filter(filter_coordinates: bool) -> Self {
        Self {
            points: Vec::new(),
            frame_start_count: 0,
            expected: 0,
            delivered: 0,
            filter_coordinates,
        }
    }

    /// Start a native touch frame.
    pub fn begin_session(&mut self, expected_count: usize) {
        self.purge_released();
        self.frame_start_count = self.count();
        self.expected = expected_count;
        self.delivered = 0;
    }

    /// Record a touch point and return its effective phase.
    ///
    /// Releasing an untracked id and moving an untracked id are recorded as
    /// no-ops; the phase is still returned so the host sees the event.
    pub fn update(
        &mut self,
        id: TouchId,
        phase: TouchPhase,
        position: Point,
        screen_position: Point,
    ) -> TouchPhase {
        tracing::trace!(?id, ?phase, x = position.x, y = position.y, "touch point");
        self.delivered += 1;
        let index = self.points.iter().position(|p| p.id == id);

        match (phase, index) {
            (TouchPhase::Pressed, Some(i)) => {
                let point = &mut self.points[i];
                point.position = position;
                point.screen_position = screen_position;
                point.released = false;
                phase
            }
            (TouchPhase::Pressed, None) => {
                self.points.push(TrackedPoint {
                    id,
                    position,
                    screen_position,
                    released: false,
                });
                phase
            }
            (TouchPhase::Moved | TouchPhase::Stationary, Some(i)) if !self.points[i].released => {
                let point = &mut self.points[i];
                let unchanged =
                    point.position == position && point.screen_position == screen_position;
                point.position = position;
                point.screen_position = screen_position;
                if self.filter_coordinates && unchanged {
                    TouchPhase::Stationary
                } else {
                    phase
                }
            }
            (TouchPhase::Released, Some(i)) => {
                let point = &mut self.points[i];
                point.position = position;
                point.screen_position = screen_position;
                point.released = true;
                phase
            }
            _ => phase,
        }
    }

    /// Number of points down and not yet released.
    #[must_use]
    pub fn count(&self) -> usize {
        self.points.iter().filter(|p| !p.released).count()
    }

    /// True when no point is down.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Finish the frame: drop released points and notify `observer` if the
    /// count differs from the one at frame start. Returns the new count.
    pub fn end_session(&mut self, observer: &mut dyn TouchCountObserver) -> usize {
        if self.delivered != self.expected {
            tracing::debug!(
                expected = self.expected,
                delivered = self.delivered,
                "touch frame point count mismatch"
            );
        }
        self.purge_released();
        let count = self.count();
        if count != self.frame_start_count {
            tracing::debug!(from = self.frame_start_count, to = count, "touch count changed");
            self.frame_start_count = count;
            observer.touch_count_changed(count);
        }
        count
    }

    /// Ids of the points currently down, in press order.
    #[must_use]
    pub fn ids(&self) -> Vec<TouchId> {
        self.active().map(|p| p.id).collect()
    }

    /// Look up a point that is down.
    #[must_use]
    pub fn point(&self, id: TouchId) -> Option<&TrackedPoint> {
        self.active().find(|p| p.id == id)
    }

    /// Snapshot of the points currently down, in press order.
    #[must_use]
    pub fn points(&self) -> Vec<TrackedPoint> {
        self.active().copied().collect()
    }

    /// Forget every point without notifying anyone.
    pub fn clear(&mut self) {
        self.points.clear();
        self.frame_start_count = 0;
        self.expected = 0;
        self.delivered = 0;
    }

    fn active(&self) -> impl Iterator<Item = &TrackedPoint> {
        self.points.iter().filter(|p| !p.released)
    }

    fn purge_released(&mut self) {
        self.points.retain(|p| !p.released);
    }
}

impl Default for TouchPointTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn press(t: &mut TouchPointTracker, id: i64) {
        t.update(TouchId(id), TouchPhase::Pressed, p(0.0, 0.0), p(0.0, 0.0));
    }

    #[test]
    fn test_tracker_new_is_empty() {
        let t = TouchPointTracker::new();
        assert_eq!(t.count(), 0);
        assert!(t.is_empty());
    }

    #[test]
    fn test_tracker_press_and_release() {
        let mut t = TouchPointTracker::new();
        t.begin_session(1);
        press(&mut t, 1);
        assert_eq!(t.count(), 1);
        t.update(TouchId(1), TouchPhase::Released, p(1.0, 1.0), p(1.0, 1.0));
        assert_eq!(t.count(), 0);
        let mut seen = Vec::new();
        let count = t.end_session(&mut |c: usize| seen.push(c));
        assert_eq!(count, 0);
        // Pressed and released in the same frame: net count unchanged.
        assert!(seen.is_empty());
    }

    #[test]
    fn test_tracker_points_persist_across_frames() {
        let mut t = TouchPointTracker::new();
        t.begin_session(2);
        press(&mut t, 1);
        press(&mut t, 2);
        let mut seen = Vec::new();
        t.end_session(&mut |c: usize| seen.push(c));
        t.begin_session(2);
        t.update(TouchId(1), TouchPhase::Moved, p(5.0, 5.0), p(5.0, 5.0));
        t.update(TouchId(2), TouchPhase::Moved, p(6.0, 6.0), p(6.0, 6.0));
        t.end_session(&mut |c: usize| seen.push(c));
        assert_eq!(t.count(), 2);
        assert_eq!(seen, vec![2]);
    }

    #[test]
    fn test_tracker_observer_on_change_only() {
        let mut t = TouchPointTracker::new();
        let mut seen = Vec::new();

        t.begin_session(1);
        press(&mut t, 1);
        t.end_session(&mut |c: usize| seen.push(c));

        t.begin_session(1);
        t.update(TouchId(1), TouchPhase::Moved, p(1.0, 0.0), p(1.0, 0.0));
        t.end_session(&mut |c: usize| seen.push(c));

        t.begin_session(1);
        t.update(TouchId(1), TouchPhase::Released, p(1.0, 0.0), p(1.0, 0.0));
        t.end_session(&mut |c: usize| seen.push(c));

        assert_eq!(seen, vec![1, 0]);
    }

    #[test]
    fn test_tracker_release_untracked_is_noop() {
        let mut t = TouchPointTracker::new();
        press(&mut t, 1);
        let phase = t.update(TouchId(9), TouchPhase::Released, p(0.0, 0.0), p(0.0, 0.0));
        assert_eq!(phase, TouchPhase::Released);
        assert_eq!(t.count(), 1);
    }

    #[test]
    fn test_tracker_double_press_counts_once() {
        let mut t = TouchPointTracker::new();
        press(&mut t, 1);
        press(&mut t, 1);
        assert_eq!(t.count(), 1);
    }

    #[test]
    fn test_tracker_stationary_filter() {
        let mut t = TouchPointTracker::new();
        t.update(TouchId(1), TouchPhase::Pressed, p(3.0, 4.0), p(13.0, 14.0));
        let phase = t.update(TouchId(1), TouchPhase::Moved, p(3.0, 4.0), p(13.0, 14.0));
        assert_eq!(phase, TouchPhase::Stationary);
        let phase = t.update(TouchId(1), TouchPhase::Moved, p(3.0, 5.0), p(13.0, 15.0));
        assert_eq!(phase, TouchPhase::Moved);
    }

    #[test]
    fn test_tracker_no_filter_keeps_moved() {
        let mut t = TouchPointTracker::with_filter(false);
        t.update(TouchId(1), TouchPhase::Pressed, p(3.0, 4.0), p(3.0, 4.0));
        let phase = t.update(TouchId(1), TouchPhase::Moved, p(3.0, 4.0), p(3.0, 4.0));
        assert_eq!(phase, TouchPhase::Moved);
    }

    #[test]
    fn test_tracker_ids_in_press_order() {
        let mut t = TouchPointTracker::new();
        press(&mut t, 7);
        press(&mut t, 3);
        press(&mut t, 5);
        t.update(TouchId(3), TouchPhase::Released, p(0.0, 0.0), p(0.0, 0.0));
        assert_eq!(t.ids(), vec![TouchId(7), TouchId(5)]);
        assert!(t.point(TouchId(3)).is_none());
        assert!(t.point(TouchId(5)).is_some());
    }

    #[test]
    fn test_tracker_clear() {
        let mut t = TouchPointTracker::new();
        press(&mut t, 1);
        t.clear();
        assert!(t.is_empty());
        assert!(t.points().is_empty());
    }

    #[test]
    fn test_tracker_counts_delivered_points() {
        let mut t = TouchPointTracker::new();
        t.begin_session(2);
        press(&mut t, 1);
        assert_eq!((t.expected, t.delivered), (2, 1));
        // A short frame still finishes normally.
        assert_eq!(t.end_session(&mut |_: usize| {}), 1);

        t.begin_session(1);
        assert_eq!(t.delivered, 0);
        t.update(TouchId(1), TouchPhase::Moved, p(3.0, 3.0), p(3.0, 3.0));
        assert_eq!((t.expected, t.delivered), (1, 1));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Press(i64),
        Move(i64),
        Release(i64),
        EndFrame,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0i64..5).prop_map(Op::Press),
            (0i64..5).prop_map(Op::Move),
            (0i64..5).prop_map(Op::Release),
            Just(Op::EndFrame),
        ]
    }

    proptest! {
        #[test]
        fn prop_count_matches_pressed_minus_released(ops in prop::collection::vec(op(), 0..64)) {
            let mut t = TouchPointTracker::new();
            let mut model = std::collections::BTreeSet::new();
            t.begin_session(0);
            for op in ops {
                match op {
                    Op::Press(id) => {
                        t.update(TouchId(id), TouchPhase::Pressed, p(0.0, 0.0), p(0.0, 0.0));
                        model.insert(id);
                    }
                    Op::Move(id) => {
                        t.update(TouchId(id), TouchPhase::Moved, p(id as f64, 1.0), p(0.0, 0.0));
                    }
                    Op::Release(id) => {
                        t.update(TouchId(id), TouchPhase::Released, p(0.0, 0.0), p(0.0, 0.0));
                        model.remove(&id);
                    }
                    Op::EndFrame => {
                        let count = t.end_session(&mut |_: usize| {});
                        prop_assert_eq!(count, model.len());
                        t.begin_session(0);
                    }
                }
                prop_assert_eq!(t.count(), model.len());
            }
        }
    }
}
