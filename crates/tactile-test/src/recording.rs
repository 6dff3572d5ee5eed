//! Recording host and scriptable test surface.

use std::cell::Cell;
use tactile_core::{
    GestureEvent, GestureHost, GestureKind, GesturePhase, HostEvent, MouseAction, MouseEvent,
    Rect, Surface, SurfaceId, TouchSample,
};

/// Host that records every notification in delivery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingHost {
    events: Vec<(SurfaceId, HostEvent)>,
}

impl RecordingHost {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far.
    #[must_use]
    pub fn events(&self) -> &[(SurfaceId, HostEvent)] {
        &self.events
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// True when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Forget recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Gesture notifications, in order.
    #[must_use]
    pub fn gestures(&self) -> Vec<GestureEvent> {
        self.events
            .iter()
            .filter_map(|(_, e)| match e {
                HostEvent::Gesture(g) => Some(*g),
                _ => None,
            })
            .collect()
    }

    /// Gesture notifications as `(kind, phase)` pairs.
    #[must_use]
    pub fn gesture_phases(&self) -> Vec<(GestureKind, GesturePhase)> {
        self.gestures().iter().map(|g| (g.kind, g.phase)).collect()
    }

    /// Synthesized mouse events, in order.
    #[must_use]
    pub fn mouse_events(&self) -> Vec<MouseEvent> {
        self.events
            .iter()
            .filter_map(|(_, e)| match e {
                HostEvent::Mouse(m) => Some(*m),
                _ => None,
            })
            .collect()
    }

    /// Synthesized mouse actions, in order.
    #[must_use]
    pub fn mouse_actions(&self) -> Vec<MouseAction> {
        self.mouse_events().iter().map(|m| m.action).collect()
    }

    /// Touch points forwarded to the host, in order.
    #[must_use]
    pub fn touches(&self) -> Vec<TouchSample> {
        self.events
            .iter()
            .filter_map(|(_, e)| match e {
                HostEvent::Touch(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    /// Serialize the recording as JSON lines for golden files.
    #[must_use]
    pub fn to_json_lines(&self) -> String {
        self.events
            .iter()
            .filter_map(|(_, e)| serde_json::to_string(e).ok())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl GestureHost for RecordingHost {
    fn notify(&mut self, surface: SurfaceId, event: HostEvent) {
        self.events.push((surface, event));
    }
}

/// Surface whose window can be moved, resized or detached between calls.
#[derive(Debug)]
pub struct TestSurface {
    id: SurfaceId,
    bounds: Cell<Option<Rect>>,
    queries: Cell<usize>,
}

impl TestSurface {
    /// Surface attached to a window with the given screen bounds.
    #[must_use]
    pub const fn new(id: u64, bounds: Rect) -> Self {
        Self {
            id: SurfaceId(id),
            bounds: Cell::new(Some(bounds)),
            queries: Cell::new(0),
        }
    }

    /// Move or resize the window.
    pub fn set_bounds(&self, bounds: Rect) {
        self.bounds.set(Some(bounds));
    }

    /// Detach the surface from its window.
    pub fn detach(&self) {
        self.bounds.set(None);
    }

    /// Current bounds without counting a query.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        self.bounds.get()
    }

    /// How often the dispatcher asked for the window bounds.
    #[must_use]
    pub fn bounds_queries(&self) -> usize {
        self.queries.get()
    }
}

impl Surface for TestSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn window_bounds(&self) -> Option<Rect> {
        self.queries.set(self.queries.get() + 1);
        self.bounds.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactile_core::{Point, TouchId, TouchPhase};

    #[test]
    fn test_recording_host_filters() {
        let mut host = RecordingHost::new();
        host.notify(SurfaceId(1), HostEvent::TouchEnd);
        host.notify(
            SurfaceId(1),
            HostEvent::Touch(TouchSample {
                id: TouchId(1),
                phase: TouchPhase::Pressed,
                position: Point::ORIGIN,
                screen_position: Point::ORIGIN,
            }),
        );
        assert_eq!(host.len(), 2);
        assert_eq!(host.touches().len(), 1);
        assert!(host.gestures().is_empty());
        assert!(host.mouse_events().is_empty());
        assert_eq!(host.to_json_lines().lines().count(), 2);
        host.clear();
        assert!(host.is_empty());
    }

    #[test]
    fn test_surface_counts_queries() {
        let s = TestSurface::new(7, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(s.id(), SurfaceId(7));
        s.window_bounds();
        s.window_bounds();
        assert_eq!(s.bounds_queries(), 2);
        s.detach();
        assert_eq!(s.window_bounds(), None);
    }
}
