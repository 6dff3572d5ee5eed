//! Multi-touch gesture recognition for windowing backends.
//!
//! This crate turns raw per-finger touch updates and native gesture
//! callbacks into a small set of host notifications:
//! - Touch bookkeeping: [`TouchPointTracker`]
//! - Scroll / zoom / rotate recognition: [`GestureCoordinator`]
//! - Single-touch mouse synthesis: [`SingleTouchMouseEmitter`]
//! - Native callback entry point: [`Dispatcher`]
//!
//! ```
//! use tactile_core::{Dispatcher, HostEvent, Modifiers, Point, Rect, Surface, SurfaceId, TouchId, TouchPhase};
//!
//! struct View;
//!
//! impl Surface for View {
//!     fn id(&self) -> SurfaceId {
//!         SurfaceId(1)
//!     }
//!
//!     fn window_bounds(&self) -> Option<Rect> {
//!         Some(Rect::new(0.0, 0.0, 800.0, 600.0))
//!     }
//! }
//!
//! let view = View;
//! let mut dispatcher = Dispatcher::new(Vec::<(SurfaceId, HostEvent)>::new());
//! dispatcher.begin_touch_session(Some(&view), Modifiers::NONE, true, 1);
//! dispatcher.next_touch_point(Some(&view), TouchPhase::Pressed, TouchId(1), Point::new(5.0, 5.0), Point::new(5.0, 5.0));
//! dispatcher.end_touch_session(Some(&view));
//!
//! assert_eq!(dispatcher.touch_count(), 1);
//! assert!(matches!(dispatcher.host().last(), Some((_, HostEvent::TouchEnd))));
//! ```

mod config;
mod context;
mod coordinator;
mod dispatch;
mod event;
mod geometry;
mod host;
mod mouse;
mod tracker;

pub use config::{ConfigError, MouseEmulation, TouchConfig};
pub use context::{ModifierSnapshot, SessionContext};
pub use coordinator::{GestureCoordinator, GestureState, PanUpdate, PinchUpdate, RotateUpdate};
pub use dispatch::Dispatcher;
pub use event::{
    GestureEvent, GestureKind, GesturePhase, GestureValue, HostEvent, Modifiers, MouseAction,
    MouseButton, MouseEvent, SurfaceId, TouchId, TouchPhase, TouchSample,
};
pub use geometry::{Point, Rect};
pub use host::{GestureHost, Surface};
pub use mouse::{SingleTouchMouseEmitter, SingleTouchSession};
pub use tracker::{TouchCountObserver, TouchPointTracker, TrackedPoint};
