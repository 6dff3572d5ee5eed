//! Entry point for native touch callbacks.
//!
//! The windowing layer calls into [`Dispatcher`] synchronously from its event
//! thread. Each call updates touch bookkeeping, runs gesture recognition and
//! mouse synthesis, and forwards the results to the [`GestureHost`].
//!
//! Passing `None` as the surface models a view destroyed mid-session:
//! bookkeeping still runs so counts and the mouse capture stay correct, but
//! nothing is reported and gesture-end evaluation is skipped. Gestures left
//! active that way are ended when the next sequence begins on a surface.

use crate::config::TouchConfig;
use crate::context::SessionContext;
use crate::coordinator::{GestureCoordinator, PanUpdate, PinchUpdate, RotateUpdate};
use crate::event::{GestureEvent, HostEvent, Modifiers, SurfaceId, TouchId, TouchPhase, TouchSample};
use crate::geometry::Point;
use crate::host::{GestureHost, Surface};
use crate::mouse::SingleTouchMouseEmitter;
use crate::tracker::TouchPointTracker;

/// Routes native touch and gesture callbacks to a host.
#[derive(Debug)]
pub struct Dispatcher<H> {
    config: TouchConfig,
    tracker: TouchPointTracker,
    coordinator: GestureCoordinator,
    mouse: SingleTouchMouseEmitter,
    context: SessionContext,
    host: H,
}

impl<H: GestureHost> Dispatcher<H> {
    /// Create a dispatcher with the default configuration.
    pub fn new(host: H) -> Self {
        Self::with_config(TouchConfig::default(), host)
    }

    /// Create a dispatcher with a custom configuration.
    pub fn with_config(config: TouchConfig, host: H) -> Self {
        Self {
            tracker: TouchPointTracker::with_filter(config.filter_touch_coordinates),
            coordinator: GestureCoordinator::new(),
            mouse: SingleTouchMouseEmitter::new(config.mouse_emulation),
            context: SessionContext::new(),
            config,
            host,
        }
    }

    /// Active configuration.
    pub const fn config(&self) -> &TouchConfig {
        &self.config
    }

    /// Touch bookkeeping.
    pub const fn tracker(&self) -> &TouchPointTracker {
        &self.tracker
    }

    /// Gesture state.
    pub const fn coordinator(&self) -> &GestureCoordinator {
        &self.coordinator
    }

    /// Mouse synthesis state.
    pub const fn mouse(&self) -> &SingleTouchMouseEmitter {
        &self.mouse
    }

    /// Last modifier state seen.
    pub const fn context(&self) -> &SessionContext {
        &self.context
    }

    /// Number of touch points down.
    pub fn touch_count(&self) -> usize {
        self.tracker.count()
    }

    /// The host.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Consume the dispatcher and return the host.
    pub fn into_host(self) -> H {
        self.host
    }

    /// A native touch frame starts.
    pub fn begin_touch_session(
        &mut self,
        surface: Option<&dyn Surface>,
        modifiers: Modifiers,
        direct: bool,
        expected_count: usize,
    ) {
        self.context.record(modifiers, direct);
        self.tracker.begin_session(expected_count);
        let Some(surface) = surface else {
            return;
        };
        let target = surface.id();

        // Gestures still active with no finger down outlived a detached
        // surface; close them before the new sequence starts.
        if self.tracker.is_empty() {
            let stale = self.coordinator.evaluate_endings(&self.context, 0, false);
            if !stale.is_empty() {
                tracing::debug!(count = stale.len(), "ending gestures from a previous sequence");
            }
            self.emit(target, stale);
        }

        self.host.notify(
            target,
            HostEvent::TouchBegin {
                modifiers,
                direct,
                count: expected_count,
            },
        );
    }

    /// One touch point of the current frame.
    pub fn next_touch_point(
        &mut self,
        surface: Option<&dyn Surface>,
        phase: TouchPhase,
        id: TouchId,
        position: Point,
        screen_position: Point,
    ) {
        self.context.record_touch(id);
        let before = self.tracker.count();
        let phase = self.tracker.update(id, phase, position, screen_position);
        // A released point still counts while its own update is processed.
        let touch_count = before.max(self.tracker.count());

        let sample = TouchSample {
            id,
            phase,
            position,
            screen_position,
        };
        // Capture bookkeeping runs even when the events have nowhere to go.
        let mouse = self.mouse.process(
            &sample,
            touch_count,
            self.coordinator.is_multi_touch_active(),
            self.context.modifiers(),
        );
        let Some(surface) = surface else {
            return;
        };
        let target = surface.id();
        for event in mouse {
            self.host.notify(target, HostEvent::Mouse(event));
        }
        self.host.notify(target, HostEvent::Touch(sample));
    }

    /// The current touch frame is complete.
    pub fn end_touch_session(&mut self, surface: Option<&dyn Surface>) {
        let Some(surface) = surface else {
            self.tracker.end_session(&mut |_: usize| {});
            tracing::debug!("surface gone, skipping gesture end evaluation");
            return;
        };

        let mut ended = Vec::new();
        let coordinator = &mut self.coordinator;
        let context = &self.context;
        let count = self.tracker.end_session(&mut |count: usize| {
            ended.extend(coordinator.touch_count_changed(context, count));
        });
        ended.extend(self.coordinator.evaluate_endings(&self.context, count, false));

        let target = surface.id();
        self.host.notify(target, HostEvent::TouchEnd);
        self.emit(target, ended);
    }

    /// Pinch callback; `scale` is relative to the start of the pinch.
    pub fn pinch_update(
        &mut self,
        surface: Option<&dyn Surface>,
        modifiers: Modifiers,
        direct: bool,
        position: Point,
        screen_position: Point,
        scale: f64,
    ) {
        self.context.record(modifiers, direct);
        let Some(surface) = surface else {
            return;
        };
        let update = PinchUpdate {
            position,
            screen_position,
            scale,
        };
        let events = self
            .coordinator
            .pinch(&self.context, self.tracker.count(), &update);
        self.emit(surface.id(), events);
    }

    /// Rotation callback; `radians` is relative to the start of the
    /// rotation.
    pub fn rotate_update(
        &mut self,
        surface: Option<&dyn Surface>,
        modifiers: Modifiers,
        direct: bool,
        position: Point,
        screen_position: Point,
        radians: f64,
    ) {
        self.context.record(modifiers, direct);
        let Some(surface) = surface else {
            return;
        };
        let update = RotateUpdate {
            position,
            screen_position,
            radians,
        };
        let events = self
            .coordinator
            .rotate(&self.context, self.tracker.count(), &update);
        self.emit(surface.id(), events);
    }

    /// Pan callback; `offset` is accumulated since the drag began.
    ///
    /// The window bounds are queried on every call since the window may
    /// move or resize during the gesture.
    pub fn pan_update(
        &mut self,
        surface: Option<&dyn Surface>,
        modifiers: Modifiers,
        direct: bool,
        position: Point,
        screen_position: Point,
        offset: Point,
    ) {
        self.context.record(modifiers, direct);
        let Some(surface) = surface else {
            return;
        };
        let update = PanUpdate {
            position,
            screen_position,
            offset,
        };
        let multiplier = (
            self.config.scroll_multiplier_x,
            self.config.scroll_multiplier_y,
        );
        let events = self.coordinator.pan(
            &self.context,
            self.tracker.count(),
            surface.window_bounds(),
            &update,
            multiplier,
        );
        self.emit(surface.id(), events);
    }

    /// Release every tracked point, e.g. when the window loses focus.
    ///
    /// Runs a full frame of `Released` points at their last positions. The
    /// mouse capture is dropped without a mouse-up.
    pub fn release_touch_points(&mut self, surface: Option<&dyn Surface>) {
        let points = self.tracker.points();
        if points.is_empty() {
            return;
        }
        tracing::debug!(count = points.len(), "releasing touch points");
        self.mouse.abandon();
        self.begin_touch_session(
            surface,
            self.context.modifiers(),
            self.context.is_direct(),
            points.len(),
        );
        for point in points {
            let phase = self.tracker.update(
                point.id,
                TouchPhase::Released,
                point.position,
                point.screen_position,
            );
            if let Some(surface) = surface {
                self.host.notify(
                    surface.id(),
                    HostEvent::Touch(TouchSample {
                        id: point.id,
                        phase,
                        position: point.position,
                        screen_position: point.screen_position,
                    }),
                );
            }
        }
        self.end_touch_session(surface);
    }

    /// Forget all touch, gesture and mouse state without reporting.
    pub fn reset(&mut self) {
        self.tracker.clear();
        self.coordinator.reset();
        self.mouse.abandon();
        self.context = SessionContext::new();
    }

    fn emit(&mut self, target: SurfaceId, events: Vec<GestureEvent>) {
        for event in events {
            self.host.notify(target, HostEvent::Gesture(event));
        }
    }
}
