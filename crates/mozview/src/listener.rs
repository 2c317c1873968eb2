//! Inbound bridge between the engine and a page.
//!
//! The engine holds an `Arc<ListenerBridge>` as its `ViewListener`. UI-thread
//! callbacks are queued in the bridge inbox and applied by
//! `WebPage::process_pending`; the render-thread context request is answered
//! in place from the shared surface. Revoking the bridge makes it drop every
//! later callback, so a view that outlives its page cannot reach it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::engine::{EngineView, ScrollUpdate, ViewListener};
use crate::surface::{RenderSurface, SurfaceContext};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EngineCallback {
    Initialized,
    LoadProgress(i32),
    LoadingState(bool),
    Location {
        url: String,
        can_go_back: bool,
        can_go_forward: bool,
    },
    Title(String),
    Scroll(ScrollUpdate),
    FirstPaint,
    Message {
        name: String,
        payload: serde_json::Value,
    },
}

pub(crate) struct ListenerBridge {
    attached: AtomicBool,
    inbox: Mutex<Vec<EngineCallback>>,
    surface: RenderSurface,
}

impl ListenerBridge {
    pub(crate) fn new(surface: RenderSurface) -> Self {
        Self {
            attached: AtomicBool::new(true),
            inbox: Mutex::new(Vec::new()),
            surface,
        }
    }

    fn push(&self, callback: EngineCallback) {
        if !self.attached.load(Ordering::Acquire) {
            debug!(?callback, "callback after detach dropped");
            return;
        }
        if let Ok(mut inbox) = self.inbox.lock() {
            inbox.push(callback);
        }
    }

    pub(crate) fn take(&self) -> Vec<EngineCallback> {
        match self.inbox.lock() {
            Ok(mut inbox) => std::mem::take(&mut *inbox),
            Err(_) => Vec::new(),
        }
    }

    fn revoke(&self) {
        self.attached.store(false, Ordering::Release);
        if let Ok(mut inbox) = self.inbox.lock() {
            inbox.clear();
        }
    }
}

impl ViewListener for ListenerBridge {
    fn on_view_initialized(&self) {
        self.push(EngineCallback::Initialized);
    }

    fn on_load_progress(&self, progress: i32) {
        self.push(EngineCallback::LoadProgress(progress));
    }

    fn on_loading_state_changed(&self, loading: bool) {
        self.push(EngineCallback::LoadingState(loading));
    }

    fn on_location_changed(&self, url: &str, can_go_back: bool, can_go_forward: bool) {
        self.push(EngineCallback::Location {
            url: url.to_string(),
            can_go_back,
            can_go_forward,
        });
    }

    fn on_title_changed(&self, title: &str) {
        self.push(EngineCallback::Title(title.to_string()));
    }

    fn on_scroll_changed(&self, update: ScrollUpdate) {
        self.push(EngineCallback::Scroll(update));
    }

    fn on_first_paint(&self) {
        self.push(EngineCallback::FirstPaint);
    }

    fn recv_async_message(&self, name: &str, payload: serde_json::Value) {
        self.push(EngineCallback::Message {
            name: name.to_string(),
            payload,
        });
    }

    fn request_gl_context(&self) -> SurfaceContext {
        if !self.attached.load(Ordering::Acquire) {
            return self.surface.context();
        }
        self.surface.request_context()
    }
}

/// Capability to receive callbacks from one engine view.
///
/// Held separately from the view itself so detaching never depends on the
/// view still being owned.
pub(crate) struct ListenerAttachment {
    bridge: Arc<ListenerBridge>,
}

impl ListenerAttachment {
    pub(crate) fn attach(surface: RenderSurface, view: &mut dyn EngineView) -> Self {
        let bridge = Arc::new(ListenerBridge::new(surface));
        view.set_listener(Some(bridge.clone() as Arc<dyn ViewListener>));
        Self { bridge }
    }

    pub(crate) fn take(&self) -> Vec<EngineCallback> {
        self.bridge.take()
    }

    /// Clear the view's listener and stop accepting callbacks.
    pub(crate) fn detach(self, view: &mut dyn EngineView) {
        view.set_listener(None);
        self.bridge.revoke();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mozview_common::{Change, ChangeSink, Size};

    fn bridge() -> (ListenerBridge, ChangeSink) {
        let changes = ChangeSink::new();
        (ListenerBridge::new(RenderSurface::new(changes.clone())), changes)
    }

    #[test]
    fn callbacks_are_queued_in_order() {
        let (bridge, _changes) = bridge();
        bridge.on_view_initialized();
        bridge.on_load_progress(40);
        bridge.on_title_changed("Example");

        assert_eq!(
            bridge.take(),
            vec![
                EngineCallback::Initialized,
                EngineCallback::LoadProgress(40),
                EngineCallback::Title("Example".into()),
            ]
        );
        assert!(bridge.take().is_empty());
    }

    #[test]
    fn revoked_bridge_drops_callbacks() {
        let (bridge, _changes) = bridge();
        bridge.on_load_progress(10);
        bridge.revoke();
        bridge.on_view_initialized();
        assert!(bridge.take().is_empty());
    }

    #[test]
    fn gl_context_request_bypasses_inbox() {
        let (bridge, changes) = bridge();
        bridge.surface.set_size(Size::new(320, 240));

        let context = bridge.request_gl_context();
        assert!(context.has_context);
        assert_eq!(context.size, Size::new(320, 240));
        assert!(bridge.take().is_empty());
        assert_eq!(changes.drain(), vec![Change::GlContextRequested]);
    }

    #[test]
    fn revoked_bridge_answers_context_silently() {
        let (bridge, changes) = bridge();
        bridge.surface.set_size(Size::new(320, 240));
        bridge.revoke();

        for _ in 0..1000 {
            assert_eq!(bridge.request_gl_context().size, Size::new(320, 240));
        }
        assert!(changes.is_empty());
    }
}
