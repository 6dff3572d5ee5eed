#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::float_cmp)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::new_without_default)]
//! Test harness for tactile gesture recognition.
//!
//! Drives a [`tactile_core::Dispatcher`] the way a windowing backend would
//! and records what the host receives.
//!
//! ```
//! use tactile_core::{GestureKind, GesturePhase, MouseAction};
//! use tactile_test::Harness;
//!
//! let mut h = Harness::new();
//! h.press(1, 10.0, 10.0).pan(10.0, 10.0, 3.0, -2.0).release(1, 13.0, 8.0);
//!
//! h.assert_touch_count(0).assert_gestures(&[
//!     (GestureKind::Scroll, GesturePhase::Begin),
//!     (GestureKind::Scroll, GesturePhase::End),
//! ]);
//! ```

mod harness;
mod recording;

pub use harness::Harness;
pub use recording::{RecordingHost, TestSurface};
