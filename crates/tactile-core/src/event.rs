//! Touch input and host-bound events.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::ops::{BitOr, BitOrAssign};

/// Opaque touch identifier assigned by the native layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct TouchId(pub i64);

/// Identifier of the surface (view) an event is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct SurfaceId(pub u64);

/// Phase of a single touch point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchPhase {
    /// Finger touched down
    Pressed,
    /// Finger moved
    Moved,
    /// A move that did not change coordinates. Never sent by the native
    /// layer; produced by coordinate filtering.
    Stationary,
    /// Finger lifted
    Released,
}

/// Keyboard and button modifier bitset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Modifiers(pub u32);

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self(0);
    /// Shift key.
    pub const SHIFT: Self = Self(1 << 0);
    /// Function key.
    pub const FUNCTION: Self = Self(1 << 1);
    /// Control key.
    pub const CONTROL: Self = Self(1 << 2);
    /// Alt / Option key.
    pub const ALT: Self = Self(1 << 3);
    /// Meta / Windows / Command key.
    pub const META: Self = Self(1 << 4);
    /// Primary mouse button held.
    pub const BUTTON_PRIMARY: Self = Self(1 << 5);
    /// Secondary mouse button held.
    pub const BUTTON_SECONDARY: Self = Self(1 << 6);
    /// Middle mouse button held.
    pub const BUTTON_MIDDLE: Self = Self(1 << 7);

    /// Raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Check whether every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Add bits.
    #[must_use]
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Remove bits.
    #[must_use]
    pub const fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// True when no bit is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.with(rhs)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.with(rhs);
    }
}

/// One touch point as reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchSample {
    /// Touch identifier
    pub id: TouchId,
    /// Effective phase
    pub phase: TouchPhase,
    /// Surface-local position
    pub position: Point,
    /// Screen position
    pub screen_position: Point,
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Primary (left) button
    Primary,
    /// Secondary (right) button
    Secondary,
    /// Middle button
    Middle,
}

/// Kind of synthesized mouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseAction {
    /// Button pressed
    Down,
    /// Moved with the button held
    Drag,
    /// Button released
    Up,
}

/// A mouse event derived from touch input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseEvent {
    /// Down, drag or up
    pub action: MouseAction,
    /// Button involved
    pub button: MouseButton,
    /// Surface-local position
    pub position: Point,
    /// Screen position
    pub screen_position: Point,
    /// Modifiers, including held button bits
    pub modifiers: Modifiers,
    /// Always true for events generated from touches
    pub synthesized: bool,
}

/// Gesture family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureKind {
    /// Single-finger pan reported as scrolling
    Scroll,
    /// Pinch
    Zoom,
    /// Twist
    Rotate,
}

/// Transition reported for a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GesturePhase {
    /// First update of the gesture
    Begin,
    /// Subsequent update
    Continue,
    /// Gesture finished; carries no geometry
    End,
}

/// Per-kind gesture payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureValue {
    /// Scroll offsets in pixels
    Scroll {
        /// Change since the previous update
        delta: Point,
        /// Offset accumulated since the gesture began
        total: Point,
    },
    /// Pinch scale
    Zoom {
        /// Scale relative to the previous update
        scale: f64,
        /// Scale relative to the gesture start
        total_scale: f64,
        /// Expansion since the previous update
        expansion: f64,
        /// Expansion since the gesture start
        total_expansion: f64,
    },
    /// Rotation in degrees
    Rotate {
        /// Angle since the previous update
        angle: f64,
        /// Angle since the gesture start
        total_angle: f64,
    },
}

/// A gesture notification.
///
/// End events carry `None` for `position`, `screen_position` and `value`;
/// consumers keep the values of the last `Continue`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    /// Gesture family
    pub kind: GestureKind,
    /// Transition
    pub phase: GesturePhase,
    /// Modifiers at the time of the event
    pub modifiers: Modifiers,
    /// Touchscreen (true) or trackpad (false)
    pub direct: bool,
    /// Ended by momentum rather than a finger lift
    pub inertia: bool,
    /// Touch points active when the event was produced
    pub touch_count: usize,
    /// Surface-local position
    pub position: Option<Point>,
    /// Screen position
    pub screen_position: Option<Point>,
    /// Gesture payload
    pub value: Option<GestureValue>,
}

impl GestureEvent {
    /// Whether this is an end event.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.phase == GesturePhase::End
    }

    /// Whether the event carries no geometry.
    #[must_use]
    pub fn has_no_value(&self) -> bool {
        self.position.is_none() && self.screen_position.is_none() && self.value.is_none()
    }
}

/// Event delivered to the host pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostEvent {
    /// A native touch frame started
    TouchBegin {
        /// Modifiers of the frame
        modifiers: Modifiers,
        /// Touchscreen (true) or trackpad (false)
        direct: bool,
        /// Number of points the native layer will send
        count: usize,
    },
    /// A touch point of the current frame
    Touch(TouchSample),
    /// The current touch frame finished
    TouchEnd,
    /// Synthesized mouse event
    Mouse(MouseEvent),
    /// Gesture notification
    Gesture(GestureEvent),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_bit_ops() {
        let m = Modifiers::SHIFT | Modifiers::CONTROL;
        assert!(m.contains(Modifiers::SHIFT));
        assert!(m.contains(Modifiers::CONTROL));
        assert!(!m.contains(Modifiers::ALT));
        assert_eq!(m.without(Modifiers::SHIFT), Modifiers::CONTROL);
        assert!(Modifiers::NONE.is_empty());
    }

    #[test]
    fn test_modifiers_bitor_assign() {
        let mut m = Modifiers::ALT;
        m |= Modifiers::BUTTON_PRIMARY;
        assert_eq!(m.bits(), Modifiers::ALT.bits() | Modifiers::BUTTON_PRIMARY.bits());
    }

    #[test]
    fn test_gesture_event_no_value() {
        let e = GestureEvent {
            kind: GestureKind::Zoom,
            phase: GesturePhase::End,
            modifiers: Modifiers::NONE,
            direct: true,
            inertia: false,
            touch_count: 1,
            position: None,
            screen_position: None,
            value: None,
        };
        assert!(e.is_end());
        assert!(e.has_no_value());
    }

    #[test]
    fn test_host_event_serializes() {
        let e = HostEvent::Mouse(MouseEvent {
            action: MouseAction::Down,
            button: MouseButton::Primary,
            position: Point::new(5.0, 5.0),
            screen_position: Point::new(105.0, 105.0),
            modifiers: Modifiers::BUTTON_PRIMARY,
            synthesized: true,
        });
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"Mouse\""));
        assert!(json.contains("\"Down\""));
        let back: HostEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }
}
