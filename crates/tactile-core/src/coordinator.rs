//! Gesture state machine.
//!
//! [`GestureCoordinator`] owns one [`GestureState`] per gesture family and
//! decides begin/continue/end transitions. Scroll is exclusive with zoom and
//! rotate; zoom and rotate may run together (pinch and twist).

use crate::context::SessionContext;
use crate::event::{GestureEvent, GestureKind, GesturePhase, GestureValue};
use crate::geometry::{Point, Rect};

/// Active/idle state of one gesture family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GestureState {
    active: bool,
}

impl GestureState {
    /// Whether the gesture is active.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Enter the active state. Returns the phase to report.
    fn advance(&mut self, kind: GestureKind) -> GesturePhase {
        if self.active {
            GesturePhase::Continue
        } else {
            tracing::debug!(?kind, "gesture begin");
            self.active = true;
            GesturePhase::Begin
        }
    }

    /// Leave the active state. Returns false if it was idle.
    fn finish(&mut self, kind: GestureKind) -> bool {
        if self.active {
            tracing::debug!(?kind, "gesture end");
            self.active = false;
            true
        } else {
            false
        }
    }
}

/// A pan update from the native layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanUpdate {
    /// Surface-local position
    pub position: Point,
    /// Screen position
    pub screen_position: Point,
    /// Offset accumulated by the native drag, in native units
    pub offset: Point,
}

/// A pinch update from the native layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchUpdate {
    /// Surface-local position
    pub position: Point,
    /// Screen position
    pub screen_position: Point,
    /// Scale relative to the start of the pinch
    pub scale: f64,
}

/// A rotation update from the native layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateUpdate {
    /// Surface-local position
    pub position: Point,
    /// Screen position
    pub screen_position: Point,
    /// Angle relative to the start of the rotation, in radians
    pub radians: f64,
}

/// Coordinates scroll, zoom and rotate recognition.
#[derive(Debug, Clone)]
pub struct GestureCoordinator {
    scroll: GestureState,
    zoom: GestureState,
    rotate: GestureState,
    /// Scroll offset reported so far, in pixels.
    scroll_total: Point,
    /// Scale reported so far.
    zoom_total: f64,
    /// Angle reported so far, in degrees.
    rotate_total: f64,
}

impl GestureCoordinator {
    /// Create a coordinator with every gesture idle.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scroll: GestureState { active: false },
            zoom: GestureState { active: false },
            rotate: GestureState { active: false },
            scroll_total: Point::ORIGIN,
            zoom_total: 1.0,
            rotate_total: 0.0,
        }
    }

    /// Whether a scroll is active.
    #[must_use]
    pub const fn is_scrolling(&self) -> bool {
        self.scroll.is_active()
    }

    /// Whether a zoom is active.
    #[must_use]
    pub const fn is_zooming(&self) -> bool {
        self.zoom.is_active()
    }

    /// Whether a rotation is active.
    #[must_use]
    pub const fn is_rotating(&self) -> bool {
        self.rotate.is_active()
    }

    /// Whether a two-finger gesture (zoom or rotate) is active.
    #[must_use]
    pub const fn is_multi_touch_active(&self) -> bool {
        self.zoom.is_active() || self.rotate.is_active()
    }

    /// State of one gesture family.
    #[must_use]
    pub const fn state(&self, kind: GestureKind) -> GestureState {
        match kind {
            GestureKind::Scroll => self.scroll,
            GestureKind::Zoom => self.zoom,
            GestureKind::Rotate => self.rotate,
        }
    }

    /// Handle a pan update.
    ///
    /// Scrolls only while exactly one touch is down, no zoom or rotate is
    /// active, and the screen position lies inside `window`. Updates that
    /// fail these checks, or that do not move, are ignored.
    pub fn pan(
        &mut self,
        ctx: &SessionContext,
        touch_count: usize,
        window: Option<Rect>,
        update: &PanUpdate,
        multiplier: (f64, f64),
    ) -> Vec<GestureEvent> {
        if touch_count != 1 || self.is_multi_touch_active() {
            return Vec::new();
        }
        let Some(window) = window else {
            return Vec::new();
        };
        if !window.contains_point(&update.screen_position) {
            tracing::trace!(
                x = update.screen_position.x,
                y = update.screen_position.y,
                "pan outside window"
            );
            return Vec::new();
        }

        let total = update.offset.scale(multiplier.0, multiplier.1);
        let delta = total - self.scroll_total;
        if delta.is_zero() {
            return Vec::new();
        }

        let phase = self.scroll.advance(GestureKind::Scroll);
        self.scroll_total = total;
        let event = Self::event(
            ctx,
            GestureKind::Scroll,
            phase,
            touch_count,
            update.position,
            update.screen_position,
            GestureValue::Scroll { delta, total },
        );
        self.check_invariants();
        vec![event]
    }

    /// Handle a pinch update. Ends an active scroll first.
    pub fn pinch(
        &mut self,
        ctx: &SessionContext,
        touch_count: usize,
        update: &PinchUpdate,
    ) -> Vec<GestureEvent> {
        let mut events = self.end_scroll_for_multi_touch(ctx, touch_count);

        let previous = self.zoom_total;
        if update.scale == previous {
            return events;
        }
        let scale = if previous == 0.0 {
            update.scale
        } else {
            update.scale / previous
        };

        let phase = self.zoom.advance(GestureKind::Zoom);
        self.zoom_total = update.scale;
        events.push(Self::event(
            ctx,
            GestureKind::Zoom,
            phase,
            touch_count,
            update.position,
            update.screen_position,
            GestureValue::Zoom {
                scale,
                total_scale: update.scale,
                expansion: 0.0,
                total_expansion: 0.0,
            },
        ));
        self.check_invariants();
        events
    }

    /// Handle a rotation update. Radians are reported as degrees. Ends an
    /// active scroll first.
    pub fn rotate(
        &mut self,
        ctx: &SessionContext,
        touch_count: usize,
        update: &RotateUpdate,
    ) -> Vec<GestureEvent> {
        let mut events = self.end_scroll_for_multi_touch(ctx, touch_count);

        let total_angle = update.radians.to_degrees();
        let angle = total_angle - self.rotate_total;
        if angle == 0.0 {
            return events;
        }

        let phase = self.rotate.advance(GestureKind::Rotate);
        self.rotate_total = total_angle;
        events.push(Self::event(
            ctx,
            GestureKind::Rotate,
            phase,
            touch_count,
            update.position,
            update.screen_position,
            GestureValue::Rotate { angle, total_angle },
        ));
        self.check_invariants();
        events
    }

    /// End the gestures whose end condition holds for `touch_count`.
    ///
    /// Evaluated once per finished touch frame, in the order scroll, rotate,
    /// zoom. Scroll ends at zero touches; rotate and zoom below two.
    pub fn evaluate_endings(
        &mut self,
        ctx: &SessionContext,
        touch_count: usize,
        inertia: bool,
    ) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        if touch_count == 0 {
            events.extend(self.end(ctx, GestureKind::Scroll, touch_count, inertia));
        }
        if touch_count < 2 {
            events.extend(self.end(ctx, GestureKind::Rotate, touch_count, inertia));
            events.extend(self.end(ctx, GestureKind::Zoom, touch_count, inertia));
        }
        events
    }

    /// React to a change of the touch count.
    ///
    /// A scroll belongs to exactly one finger and ends as soon as the count
    /// leaves one; rotate and zoom end below two fingers.
    pub fn touch_count_changed(
        &mut self,
        ctx: &SessionContext,
        touch_count: usize,
    ) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        if touch_count != 1 {
            events.extend(self.end(ctx, GestureKind::Scroll, touch_count, false));
        }
        if touch_count < 2 {
            events.extend(self.end(ctx, GestureKind::Rotate, touch_count, false));
            events.extend(self.end(ctx, GestureKind::Zoom, touch_count, false));
        }
        events
    }

    /// Return every gesture to idle without reporting.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn end_scroll_for_multi_touch(
        &mut self,
        ctx: &SessionContext,
        touch_count: usize,
    ) -> Vec<GestureEvent> {
        self.end(ctx, GestureKind::Scroll, touch_count, false)
            .into_iter()
            .collect()
    }

    fn end(
        &mut self,
        ctx: &SessionContext,
        kind: GestureKind,
        touch_count: usize,
        inertia: bool,
    ) -> Option<GestureEvent> {
        let ended = match kind {
            GestureKind::Scroll => {
                self.scroll_total = Point::ORIGIN;
                self.scroll.finish(kind)
            }
            GestureKind::Zoom => {
                self.zoom_total = 1.0;
                self.zoom.finish(kind)
            }
            GestureKind::Rotate => {
                self.rotate_total = 0.0;
                self.rotate.finish(kind)
            }
        };
        ended.then(|| GestureEvent {
            kind,
            phase: GesturePhase::End,
            modifiers: ctx.modifiers(),
            direct: ctx.is_direct(),
            inertia,
            touch_count,
            position: None,
            screen_position: None,
            value: None,
        })
    }

    fn event(
        ctx: &SessionContext,
        kind: GestureKind,
        phase: GesturePhase,
        touch_count: usize,
        position: Point,
        screen_position: Point,
        value: GestureValue,
    ) -> GestureEvent {
        GestureEvent {
            kind,
            phase,
            modifiers: ctx.modifiers(),
            direct: ctx.is_direct(),
            inertia: false,
            touch_count,
            position: Some(position),
            screen_position: Some(screen_position),
            value: Some(value),
        }
    }

    fn check_invariants(&self) {
        debug_assert!(
            !(self.scroll.is_active() && self.is_multi_touch_active()),
            "scroll active together with zoom/rotate"
        );
    }
}

impl Default for GestureCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
