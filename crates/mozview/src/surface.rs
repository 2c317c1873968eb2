//! Render-surface size shared with the compositor thread.
//!
//! The UI thread is the only writer. The compositor reads the size on every
//! frame through [`RenderSurface::request_context`]; both axes live in a
//! single atomic word so a reader never sees one axis from an older size.
//! Only the first request after each resize is reported to observers.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use mozview_common::{Change, ChangeSink, Size};

/// Answer to the engine's render-context request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceContext {
    pub has_context: bool,
    pub size: Size,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SurfaceCell(Arc<AtomicU64>);

impl SurfaceCell {
    pub(crate) fn store(&self, size: Size) {
        self.0.store(pack(size), Ordering::Release);
    }

    pub(crate) fn load(&self) -> Size {
        unpack(self.0.load(Ordering::Acquire))
    }
}

fn pack(size: Size) -> u64 {
    (u64::from(size.width as u32) << 32) | u64::from(size.height as u32)
}

fn unpack(word: u64) -> Size {
    Size::new((word >> 32) as u32 as i32, word as u32 as i32)
}

/// Thread-safe handle the compositor uses to query the surface.
#[derive(Debug, Clone)]
pub struct RenderSurface {
    cell: SurfaceCell,
    /// Set once `GlContextRequested` went out for the current size.
    requested: Arc<AtomicBool>,
    changes: ChangeSink,
}

impl RenderSurface {
    pub(crate) fn new(changes: ChangeSink) -> Self {
        Self {
            cell: SurfaceCell::default(),
            requested: Arc::new(AtomicBool::new(false)),
            changes,
        }
    }

    pub fn size(&self) -> Size {
        self.cell.load()
    }

    pub(crate) fn set_size(&self, size: Size) {
        self.cell.store(size);
        self.requested.store(false, Ordering::Release);
    }

    /// The context is always reported available. The first request per
    /// surface size emits `GlContextRequested` for GL setup; repeats
    /// from later frames are silent.
    pub fn request_context(&self) -> SurfaceContext {
        if !self.requested.swap(true, Ordering::AcqRel) {
            self.changes.emit(Change::GlContextRequested);
        }
        self.context()
    }

    /// Answer without notifying observers.
    pub(crate) fn context(&self) -> SurfaceContext {
        SurfaceContext {
            has_context: true,
            size: self.cell.load(),
        }
    }
}
