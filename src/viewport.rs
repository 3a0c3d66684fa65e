//! Viewport capability interface.
//!
//! The rendering widget owns viewport state (visible bounds, zoom). The
//! layer never reaches into widget internals for it; instead a widget
//! adapter implements this narrow trait and is bound to the layer while the
//! layer is active on a live map.

use crate::geo::GeoBounds;

/// Read access to the current viewport of an active map widget.
pub trait Viewport: Send + Sync {
    /// Current visible geographic bounds.
    fn bounds(&self) -> GeoBounds;

    /// Current zoom level.
    fn zoom(&self) -> u8;

    /// Zoom level to embed in tile URLs.
    ///
    /// Defaults to [`zoom`](Self::zoom); widgets that render tiles at an
    /// offset or reversed zoom override this.
    fn zoom_for_url(&self) -> u8 {
        self.zoom()
    }
}
