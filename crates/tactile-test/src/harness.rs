//! Scripted touch harness.

use crate::recording::{RecordingHost, TestSurface};
use tactile_core::{
    Dispatcher, GestureEvent, GestureKind, GesturePhase, Modifiers, MouseAction, Point, Rect,
    Surface, TouchConfig, TouchId, TouchPhase,
};

/// Drives a dispatcher like a windowing backend and records the results.
#[derive(Debug)]
pub struct Harness {
    dispatcher: Dispatcher<RecordingHost>,
    surface: TestSurface,
    /// False while the surface is treated as destroyed
    attached: bool,
    modifiers: Modifiers,
    direct: bool,
}

impl Harness {
    /// Harness with default configuration and an 800x600 window at the
    /// screen origin.
    pub fn new() -> Self {
        Self::with_config(TouchConfig::default())
    }

    /// Harness with a custom configuration.
    pub fn with_config(config: TouchConfig) -> Self {
        Self {
            dispatcher: Dispatcher::with_config(config, RecordingHost::new()),
            surface: TestSurface::new(1, Rect::new(0.0, 0.0, 800.0, 600.0)),
            attached: true,
            modifiers: Modifiers::NONE,
            direct: true,
        }
    }

    /// Place the window.
    #[must_use]
    pub fn window(self, bounds: Rect) -> Self {
        self.surface.set_bounds(bounds);
        self
    }

    // === Session state ===

    /// Modifiers reported by subsequent callbacks.
    pub fn modifiers(&mut self, modifiers: Modifiers) -> &mut Self {
        self.modifiers = modifiers;
        self
    }

    /// Report subsequent input as coming from a touchpad.
    pub fn indirect(&mut self) -> &mut Self {
        self.direct = false;
        self
    }

    /// Move or resize the window.
    pub fn move_window(&mut self, bounds: Rect) -> &mut Self {
        self.surface.set_bounds(bounds);
        self
    }

    /// Treat the surface as destroyed for subsequent callbacks.
    pub fn detach(&mut self) -> &mut Self {
        self.attached = false;
        self
    }

    /// Undo [`Self::detach`].
    pub fn attach(&mut self) -> &mut Self {
        self.attached = true;
        self
    }

    // === Touch simulation ===

    /// Deliver one native touch frame. Positions are window-relative.
    pub fn frame(&mut self, points: &[(TouchPhase, i64, f64, f64)]) -> &mut Self {
        let surface = target(self.attached, &self.surface);
        self.dispatcher
            .begin_touch_session(surface, self.modifiers, self.direct, points.len());
        for &(phase, id, x, y) in points {
            let position = Point::new(x, y);
            let screen = self.to_screen(position);
            self.dispatcher
                .next_touch_point(surface, phase, TouchId(id), position, screen);
        }
        self.dispatcher.end_touch_session(surface);
        self
    }

    /// Put a finger down.
    pub fn press(&mut self, id: i64, x: f64, y: f64) -> &mut Self {
        self.frame(&[(TouchPhase::Pressed, id, x, y)])
    }

    /// Move a finger.
    pub fn move_to(&mut self, id: i64, x: f64, y: f64) -> &mut Self {
        self.frame(&[(TouchPhase::Moved, id, x, y)])
    }

    /// Lift a finger.
    pub fn release(&mut self, id: i64, x: f64, y: f64) -> &mut Self {
        self.frame(&[(TouchPhase::Released, id, x, y)])
    }

    /// Press and release in place.
    pub fn tap(&mut self, id: i64, x: f64, y: f64) -> &mut Self {
        self.press(id, x, y).release(id, x, y)
    }

    /// Press, move in `steps` frames, release.
    pub fn drag(&mut self, id: i64, from: Point, to: Point, steps: u32) -> &mut Self {
        self.press(id, from.x, from.y);
        let steps = steps.max(1);
        for step in 1..=steps {
            let t = f64::from(step) / f64::from(steps);
            let p = from + (to - from) * t;
            self.move_to(id, p.x, p.y);
        }
        self.release(id, to.x, to.y)
    }

    /// Lift every finger, as on focus loss.
    pub fn release_all(&mut self) -> &mut Self {
        let surface = target(self.attached, &self.surface);
        self.dispatcher.release_touch_points(surface);
        self
    }

    // === Native gesture callbacks ===

    /// Pinch callback with scale relative to the pinch start.
    pub fn pinch(&mut self, x: f64, y: f64, scale: f64) -> &mut Self {
        let surface = target(self.attached, &self.surface);
        let position = Point::new(x, y);
        let screen = self.to_screen(position);
        self.dispatcher
            .pinch_update(surface, self.modifiers, self.direct, position, screen, scale);
        self
    }

    /// Rotation callback with angle in radians relative to the start.
    pub fn rotate(&mut self, x: f64, y: f64, radians: f64) -> &mut Self {
        let surface = target(self.attached, &self.surface);
        let position = Point::new(x, y);
        let screen = self.to_screen(position);
        self.dispatcher
            .rotate_update(surface, self.modifiers, self.direct, position, screen, radians);
        self
    }

    /// Pan callback with offset accumulated since the drag began.
    pub fn pan(&mut self, x: f64, y: f64, dx: f64, dy: f64) -> &mut Self {
        let surface = target(self.attached, &self.surface);
        let position = Point::new(x, y);
        let screen = self.to_screen(position);
        self.dispatcher.pan_update(
            surface,
            self.modifiers,
            self.direct,
            position,
            screen,
            Point::new(dx, dy),
        );
        self
    }

    /// Forget recorded host events.
    pub fn clear(&mut self) -> &mut Self {
        self.dispatcher.host_mut().clear();
        self
    }

    // === Queries ===

    /// The dispatcher under test.
    pub const fn dispatcher(&self) -> &Dispatcher<RecordingHost> {
        &self.dispatcher
    }

    /// Recorded host events.
    pub const fn host(&self) -> &RecordingHost {
        self.dispatcher.host()
    }

    /// The simulated surface.
    pub const fn surface(&self) -> &TestSurface {
        &self.surface
    }

    /// Recorded gesture events.
    pub fn gestures(&self) -> Vec<GestureEvent> {
        self.host().gestures()
    }

    /// Recorded mouse actions.
    pub fn mouse_actions(&self) -> Vec<MouseAction> {
        self.host().mouse_actions()
    }

    // === Assertions ===

    /// Assert the number of touch points down.
    ///
    /// # Panics
    ///
    /// Panics if the count differs.
    pub fn assert_touch_count(&self, expected: usize) -> &Self {
        let actual = self.dispatcher.touch_count();
        assert_eq!(
            actual, expected,
            "Expected {expected} touch points but tracker has {actual}"
        );
        self
    }

    /// Assert the recorded gesture sequence.
    ///
    /// # Panics
    ///
    /// Panics if the sequence differs.
    pub fn assert_gestures(&self, expected: &[(GestureKind, GesturePhase)]) -> &Self {
        let actual = self.host().gesture_phases();
        assert_eq!(actual, expected, "Unexpected gesture sequence");
        self
    }

    /// Assert that no gesture events were recorded.
    ///
    /// # Panics
    ///
    /// Panics if any gesture was recorded.
    pub fn assert_no_gestures(&self) -> &Self {
        self.assert_gestures(&[])
    }

    /// Assert the recorded mouse action sequence.
    ///
    /// # Panics
    ///
    /// Panics if the sequence differs.
    pub fn assert_mouse_actions(&self, expected: &[MouseAction]) -> &Self {
        let actual = self.mouse_actions();
        assert_eq!(actual, expected, "Unexpected mouse sequence");
        self
    }

    /// Assert whether a gesture kind is currently recognized.
    ///
    /// # Panics
    ///
    /// Panics if the state differs.
    pub fn assert_active(&self, kind: GestureKind, expected: bool) -> &Self {
        let actual = self.dispatcher.coordinator().state(kind).is_active();
        assert_eq!(
            actual, expected,
            "Expected {kind:?} active={expected} but was {actual}"
        );
        self
    }

    /// Assert which touch holds the mouse capture.
    ///
    /// # Panics
    ///
    /// Panics if the capture differs.
    pub fn assert_captured(&self, expected: Option<i64>) -> &Self {
        let actual = self.dispatcher.mouse().tracked_id();
        assert_eq!(actual, expected.map(TouchId), "Unexpected mouse capture");
        self
    }

    fn to_screen(&self, position: Point) -> Point {
        self.surface
            .bounds()
            .map_or(position, |b| position + b.origin())
    }
}

fn target(attached: bool, surface: &TestSurface) -> Option<&dyn Surface> {
    attached.then_some(surface as &dyn Surface)
}
