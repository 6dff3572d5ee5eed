//! Mouse synthesis from single touches.
//!
//! Lets hosts without touch support be driven by one finger. Synthesis stops
//! as soon as a second finger or a zoom/rotate gesture shows up.

use crate::config::MouseEmulation;
use crate::event::{Modifiers, MouseAction, MouseButton, MouseEvent, TouchId, TouchPhase, TouchSample};

/// Touch currently driving the synthesized mouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SingleTouchSession {
    /// Captured touch, if any
    pub tracked_id: Option<TouchId>,
}

/// Converts a lone touch point into primary-button mouse events.
#[derive(Debug, Clone)]
pub struct SingleTouchMouseEmitter {
    mode: MouseEmulation,
    session: SingleTouchSession,
}

impl SingleTouchMouseEmitter {
    /// Create an emitter with the given policy.
    #[must_use]
    pub const fn new(mode: MouseEmulation) -> Self {
        Self {
            mode,
            session: SingleTouchSession { tracked_id: None },
        }
    }

    /// Active policy.
    #[must_use]
    pub const fn mode(&self) -> MouseEmulation {
        self.mode
    }

    /// Currently captured touch.
    #[must_use]
    pub const fn tracked_id(&self) -> Option<TouchId> {
        self.session.tracked_id
    }

    /// Drop the capture without synthesizing a mouse-up.
    pub fn abandon(&mut self) {
        if let Some(id) = self.session.tracked_id.take() {
            tracing::debug!(?id, "mouse capture abandoned");
        }
    }

    /// Process one touch point.
    ///
    /// `touch_count` counts the point itself even when it is being released.
    /// `multi_touch_active` is true while a zoom or rotate is recognized.
    pub fn process(
        &mut self,
        sample: &TouchSample,
        touch_count: usize,
        multi_touch_active: bool,
        modifiers: Modifiers,
    ) -> Vec<MouseEvent> {
        match self.mode {
            MouseEmulation::Off => Vec::new(),
            MouseEmulation::Immediate => {
                Self::immediate(sample, touch_count, multi_touch_active, modifiers)
                    .into_iter()
                    .collect()
            }
            MouseEmulation::Capture => {
                self.capture(sample, touch_count, multi_touch_active, modifiers)
            }
        }
    }

    fn capture(
        &mut self,
        sample: &TouchSample,
        touch_count: usize,
        multi_touch_active: bool,
        modifiers: Modifiers,
    ) -> Vec<MouseEvent> {
        if touch_count != 1 || multi_touch_active {
            self.abandon();
            return Vec::new();
        }

        match (self.session.tracked_id, sample.phase) {
            (Some(id), TouchPhase::Moved) if id == sample.id => {
                vec![Self::mouse(MouseAction::Drag, sample, modifiers)]
            }
            (Some(id), TouchPhase::Released) if id == sample.id => {
                self.session.tracked_id = None;
                tracing::debug!(?id, "mouse capture released");
                vec![Self::mouse(MouseAction::Up, sample, modifiers)]
            }
            (Some(id), _) if id == sample.id => Vec::new(),
            (_, TouchPhase::Moved) => {
                self.abandon();
                self.session.tracked_id = Some(sample.id);
                tracing::debug!(id = ?sample.id, "mouse capture");
                vec![Self::mouse(MouseAction::Down, sample, modifiers)]
            }
            (_, TouchPhase::Released) => {
                // Released without a prior move: a tap.
                self.abandon();
                vec![
                    Self::mouse(MouseAction::Down, sample, modifiers),
                    Self::mouse(MouseAction::Up, sample, modifiers),
                ]
            }
            _ => Vec::new(),
        }
    }

    fn immediate(
        sample: &TouchSample,
        touch_count: usize,
        multi_touch_active: bool,
        modifiers: Modifiers,
    ) -> Option<MouseEvent> {
        if touch_count >= 2 || multi_touch_active {
            return None;
        }
        let action = match sample.phase {
            TouchPhase::Pressed => MouseAction::Down,
            TouchPhase::Moved => MouseAction::Drag,
            TouchPhase::Released => MouseAction::Up,
            TouchPhase::Stationary => return None,
        };
        Some(Self::mouse(action, sample, modifiers))
    }

    fn mouse(action: MouseAction, sample: &TouchSample, modifiers: Modifiers) -> MouseEvent {
        let modifiers = match action {
            MouseAction::Down | MouseAction::Drag => modifiers | Modifiers::BUTTON_PRIMARY,
            MouseAction::Up => modifiers.without(Modifiers::BUTTON_PRIMARY),
        };
        MouseEvent {
            action,
            button: MouseButton::Primary,
            position: sample.position,
            screen_position: sample.screen_position,
            modifiers,
            synthesized: true,
        }
    }
}

impl Default for SingleTouchMouseEmitter {
    fn default() -> Self {
        Self::new(MouseEmulation::default())
    }
}
