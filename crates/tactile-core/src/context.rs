//! Per-dispatcher session context.
//!
//! Gesture end notifications carry no modifier data from the native layer,
//! so the most recent values seen on any callback are kept here and read
//! back when a gesture ends.

use crate::event::{Modifiers, TouchId};
use serde::{Deserialize, Serialize};

/// Last modifier state observed from the native layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModifierSnapshot {
    /// Keyboard and button modifiers
    pub modifiers: Modifiers,
    /// Touchscreen (true) or trackpad (false)
    pub direct: bool,
    /// Most recent touch id seen
    pub last_known_id: Option<TouchId>,
}

/// Mutable state shared by the callbacks of one dispatcher.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    snapshot: ModifierSnapshot,
}

impl SessionContext {
    /// Create an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Context seeded with modifiers and direct flag.
    #[must_use]
    pub fn with_modifiers(modifiers: Modifiers, direct: bool) -> Self {
        let mut ctx = Self::default();
        ctx.record(modifiers, direct);
        ctx
    }

    /// Record the modifiers and direct flag of a callback.
    pub fn record(&mut self, modifiers: Modifiers, direct: bool) {
        self.snapshot.modifiers = modifiers;
        self.snapshot.direct = direct;
    }

    /// Record the id of a touch point.
    pub fn record_touch(&mut self, id: TouchId) {
        self.snapshot.last_known_id = Some(id);
    }

    /// Current snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> ModifierSnapshot {
        self.snapshot
    }

    /// Last recorded modifiers.
    #[must_use]
    pub const fn modifiers(&self) -> Modifiers {
        self.snapshot.modifiers
    }

    /// Last recorded direct flag.
    #[must_use]
    pub const fn is_direct(&self) -> bool {
        self.snapshot.direct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_default() {
        let ctx = SessionContext::new();
        assert_eq!(ctx.snapshot(), ModifierSnapshot::default());
        assert!(ctx.snapshot().last_known_id.is_none());
    }

    #[test]
    fn test_context_record_overwrites() {
        let mut ctx = SessionContext::with_modifiers(Modifiers::SHIFT, true);
        ctx.record(Modifiers::ALT, false);
        assert_eq!(ctx.modifiers(), Modifiers::ALT);
        assert!(!ctx.is_direct());
    }

    #[test]
    fn test_context_record_touch() {
        let mut ctx = SessionContext::new();
        ctx.record(Modifiers::CONTROL, true);
        ctx.record_touch(TouchId(42));
        assert_eq!(ctx.modifiers(), Modifiers::CONTROL);
        assert_eq!(ctx.snapshot().last_known_id, Some(TouchId(42)));
        assert!(ctx.is_direct());
    }
}
