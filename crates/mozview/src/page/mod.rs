//! The embeddable page item.
//!
//! `WebPage` owns exactly one engine view for its whole lifetime. The view
//! is created lazily, once the embedding context is ready (or when a parent
//! id is assigned), and destroyed exactly once, by [`WebPage::destroy`] or
//! on drop. All methods run on the UI thread; the compositor thread only
//! talks to the page through [`RenderSurface`].

use std::sync::Arc;

use mozview_common::{Change, ChangeSink, PointF, RectF, Size, SizeF};
use tokio::sync::oneshot;

use crate::engine::EmbedRuntime;
use crate::ipc::MessageQueue;
use crate::lifecycle::{policy, Disposition, Lifecycle, Op, Phase};
use crate::state::ViewState;
use crate::surface::RenderSurface;

mod geometry;
mod input;
mod lifecycle;
mod messaging;
mod navigation;
mod types;


pub use types::ViewConfig;

pub struct WebPage {
    runtime: Arc<dyn EmbedRuntime>,
    config: ViewConfig,
    lifecycle: Lifecycle,
    state: ViewState,
    surface: RenderSurface,
    changes: ChangeSink,
    /// Last `set_active` value requested before initialization.
    pending_active: Option<bool>,
    /// Last URL requested before initialization.
    pending_url: Option<String>,
    outbox: MessageQueue,
    /// Subscription to the runtime's context-ready notification.
    context_ready: Option<oneshot::Receiver<()>>,
}

impl WebPage {
    /// Create a page and, if the embedding context is already up, its
    /// engine view.
    pub fn new(runtime: Arc<dyn EmbedRuntime>, config: ViewConfig) -> Self {
        let changes = ChangeSink::new();
        let surface = RenderSurface::new(changes.clone());
        let mut state = ViewState::new(changes.clone());

        state.init_active(config.active_on_start);
        state.set_parent_id(config.parent_id);
        state.set_private_mode(config.private_mode);
        state.store_size(config.size);
        surface.set_size(config.size.to_size());
        // Construction-time values are not observable changes.
        changes.drain();

        let mut page = Self {
            runtime,
            config,
            lifecycle: Lifecycle::Uncreated,
            state,
            surface,
            changes,
            pending_active: None,
            pending_url: None,
            outbox: MessageQueue::default(),
            context_ready: None,
        };
        page.create();
        page
    }

    fn gate(&self, op: Op) -> Disposition {
        policy(op, self.lifecycle.phase())
    }

    /// Pending change notifications.
    pub fn changes(&self) -> &ChangeSink {
        &self.changes
    }

    pub fn drain_changes(&self) -> Vec<Change> {
        self.changes.drain()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Handle for the compositor thread.
    pub fn render_surface(&self) -> RenderSurface {
        self.surface.clone()
    }

    /// True once the engine view exists (initialized or not).
    pub fn has_view(&self) -> bool {
        self.lifecycle.live().is_some()
    }

    pub fn is_initialized(&self) -> bool {
        self.lifecycle.phase() == Phase::Initialized
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifecycle.phase() == Phase::Destroyed
    }

    /// Engine id of the view, or 0 without one.
    pub fn unique_id(&self) -> u32 {
        self.lifecycle
            .live()
            .map(|live| live.view.unique_id())
            .unwrap_or(0)
    }

    pub fn parent_id(&self) -> u32 {
        self.state.parent_id()
    }

    /// Assigning a non-zero parent creates the view if it does not exist.
    pub fn set_parent_id(&mut self, parent_id: u32) {
        self.state.set_parent_id(parent_id);
        if parent_id != 0 {
            self.create();
        }
    }

    pub fn private_mode(&self) -> bool {
        self.state.private_mode()
    }

    /// Ignored with a diagnostic once the engine view has been created.
    pub fn set_private_mode(&mut self, private_mode: bool) {
        match self.gate(Op::SetPrivateMode) {
            Disposition::Forward => {
                self.state.set_private_mode(private_mode);
            }
            _ => {
                tracing::warn!(
                    requested = private_mode,
                    "private_mode cannot be changed after the view is created"
                );
            }
        }
    }

    pub fn active(&self) -> bool {
        self.state.active()
    }

    pub fn background(&self) -> bool {
        self.state.background()
    }

    pub fn set_background(&mut self, background: bool) {
        self.state.set_background(background);
    }

    pub fn loaded(&self) -> bool {
        self.state.loaded()
    }

    pub fn loading(&self) -> bool {
        self.state.loading()
    }

    pub fn load_progress(&self) -> i32 {
        self.state.progress()
    }

    pub fn completed(&self) -> bool {
        self.state.completed()
    }

    pub fn url(&self) -> &str {
        self.state.url()
    }

    pub fn title(&self) -> &str {
        self.state.title()
    }

    pub fn can_go_back(&self) -> bool {
        self.state.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.state.can_go_forward()
    }

    pub fn content_rect(&self) -> RectF {
        self.state.content_rect()
    }

    pub fn scrollable_size(&self) -> SizeF {
        self.state.scrollable_size()
    }

    pub fn scrollable_offset(&self) -> PointF {
        self.state.scrollable_offset()
    }

    pub fn content_width(&self) -> f64 {
        self.state.scrollable_size().width
    }

    pub fn content_height(&self) -> f64 {
        self.state.scrollable_size().height
    }

    pub fn resolution(&self) -> f32 {
        self.state.resolution()
    }

    pub fn is_painted(&self) -> bool {
        self.state.painted()
    }

    pub fn chrome(&self) -> bool {
        self.state.chrome()
    }

    pub fn set_chrome(&mut self, chrome: bool) {
        self.state.set_chrome(chrome);
    }

    pub fn chrome_gesture_enabled(&self) -> bool {
        self.state.chrome_gesture_enabled()
    }

    pub fn set_chrome_gesture_enabled(&mut self, enabled: bool) {
        self.state.set_chrome_gesture_enabled(enabled);
    }

    pub fn chrome_gesture_threshold(&self) -> f64 {
        self.state.chrome_gesture_threshold()
    }

    pub fn set_chrome_gesture_threshold(&mut self, threshold: f64) {
        self.state.set_chrome_gesture_threshold(threshold);
    }

    pub fn surface_size(&self) -> Size {
        self.surface.size()
    }
}

impl Drop for WebPage {
    fn drop(&mut self) {
        self.destroy();
    }
}
