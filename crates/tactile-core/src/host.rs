//! Seams to the windowing layer and the host event pipeline.

use crate::event::{HostEvent, SurfaceId};
use crate::geometry::Rect;

/// A view that receives touch input.
pub trait Surface {
    /// Identifier used to route host events.
    fn id(&self) -> SurfaceId;

    /// Current screen bounds of the owning window, or `None` if the surface
    /// is not attached to a window. Queried on every pan update; do not
    /// cache.
    fn window_bounds(&self) -> Option<Rect>;
}

/// Receiver of touch, mouse and gesture notifications.
pub trait GestureHost {
    /// Deliver one event for `surface`.
    fn notify(&mut self, surface: SurfaceId, event: HostEvent);
}

impl GestureHost for Vec<(SurfaceId, HostEvent)> {
    fn notify(&mut self, surface: SurfaceId, event: HostEvent) {
        self.push((surface, event));
    }
}

impl<H: GestureHost + ?Sized> GestureHost for &mut H {
    fn notify(&mut self, surface: SurfaceId, event: HostEvent) {
        (**self).notify(surface, event);
    }
}

impl<H: GestureHost + ?Sized> GestureHost for Box<H> {
    fn notify(&mut self, surface: SurfaceId, event: HostEvent) {
        (**self).notify(surface, event);
    }
}
