//! Surface size negotiation.

use mozview_common::{Change, RectF, SizeF};
use tracing::trace;

use crate::lifecycle::{Disposition, Op};
use crate::surface::SurfaceContext;

use super::WebPage;

impl WebPage {
    pub fn size(&self) -> SizeF {
        self.state.size()
    }

    pub fn width(&self) -> f64 {
        self.state.size().width
    }

    pub fn height(&self) -> f64 {
        self.state.size().height
    }

    /// Resize the page and its render surface.
    ///
    /// Exact comparison: an identical size does nothing at all. Otherwise the
    /// rounded surface size is published to the compositor and pushed to the
    /// engine view, then per-axis notifications fire for the axes that moved,
    /// followed by one `SizeChanged`.
    pub fn set_size(&mut self, size: SizeF) {
        let old = self.state.size();
        if old == size {
            return;
        }

        let width_changed = old.width != size.width;
        let height_changed = old.height != size.height;

        self.state.store_size(size);
        let surface = size.to_size();
        self.surface.set_size(surface);

        if self.gate(Op::UpdateSize) == Disposition::Forward {
            if let Some(view) = self.lifecycle.view_mut() {
                view.update_view_size(surface);
            }
        }

        if width_changed {
            self.changes.emit(Change::WidthChanged);
        }
        if height_changed {
            self.changes.emit(Change::HeightChanged);
        }
        self.changes.emit(Change::SizeChanged);
    }

    pub fn set_width(&mut self, width: f64) {
        let height = self.state.size().height;
        self.set_size(SizeF::new(width, height));
    }

    pub fn set_height(&mut self, height: f64) {
        let width = self.state.size().width;
        self.set_size(SizeF::new(width, height));
    }

    /// Host item geometry moved. Only the size matters to the engine.
    pub fn geometry_changed(&mut self, new_geometry: RectF, old_geometry: RectF) {
        trace!(
            new = %new_geometry.size(),
            old = %old_geometry.size(),
            "geometry changed"
        );
        self.set_size(new_geometry.size());
    }

    /// Same answer the compositor gets through the view listener.
    pub fn request_surface_context(&self) -> SurfaceContext {
        self.surface.request_context()
    }
}
