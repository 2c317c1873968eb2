//! Interfaces to the embedding engine.
//!
//! The engine is reached through two traits: [`EmbedRuntime`], the
//! process-wide embedding context that creates and destroys views, and
//! [`EngineView`], one live engine-side view. [`ViewListener`] is the
//! inbound half: the engine calls it to report view state.

use std::sync::Arc;

use mozview_common::{EngineError, PointF, RectF, Size, SizeF};
use tokio::sync::oneshot;

use crate::input::{InputMethodEvent, KeyEvent, TouchEvent};
use crate::surface::SurfaceContext;

/// The embedding context shared by every page of the host.
pub trait EmbedRuntime: Send + Sync {
    fn is_context_initialized(&self) -> bool;

    /// One-shot notification fired when the context finishes initializing.
    fn context_ready(&self) -> oneshot::Receiver<()>;

    fn set_accelerated(&self, accelerated: bool);

    fn create_view(
        &self,
        parent_id: u32,
        private_mode: bool,
    ) -> Result<Box<dyn EngineView>, EngineError>;

    fn destroy_view(&self, view: Box<dyn EngineView>);
}

/// One engine-side browser view.
pub trait EngineView: Send {
    fn unique_id(&self) -> u32;

    /// Attach or (with `None`) detach the inbound listener.
    fn set_listener(&mut self, listener: Option<Arc<dyn ViewListener>>);

    fn set_active(&mut self, active: bool);
    fn suspend_rendering(&mut self);
    fn resume_rendering(&mut self);
    fn suspend_timeouts(&mut self);
    fn resume_timeouts(&mut self);
    fn set_focused(&mut self, focused: bool);

    fn go_back(&mut self);
    fn go_forward(&mut self);
    fn stop_load(&mut self);
    fn reload(&mut self, hard: bool);
    fn load_url(&mut self, url: &str);

    fn update_view_size(&mut self, size: Size);

    fn send_async_message(&mut self, name: &str, payload: &serde_json::Value);
    fn add_message_listener(&mut self, name: &str);
    fn load_frame_script(&mut self, name: &str);

    fn key_press(&mut self, event: &KeyEvent);
    fn key_release(&mut self, event: &KeyEvent);
    fn touch_event(&mut self, event: &TouchEvent);
    fn input_method_event(&mut self, event: &InputMethodEvent);
}

/// Scroll metrics reported by the compositor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollUpdate {
    pub content_rect: RectF,
    pub scrollable_size: SizeF,
    pub scrollable_offset: PointF,
    pub resolution: f32,
}

/// Callbacks the engine invokes on a view's listener.
///
/// `request_gl_context` runs on the compositor thread and must answer
/// without waiting on the UI thread. Every other callback is delivered on
/// the UI thread.
pub trait ViewListener: Send + Sync {
    fn on_view_initialized(&self);
    fn on_load_progress(&self, progress: i32);
    fn on_loading_state_changed(&self, loading: bool);
    fn on_location_changed(&self, url: &str, can_go_back: bool, can_go_forward: bool);
    fn on_title_changed(&self, title: &str);
    fn on_scroll_changed(&self, update: ScrollUpdate);
    fn on_first_paint(&self);
    fn recv_async_message(&self, name: &str, payload: serde_json::Value);
    fn request_gl_context(&self) -> SurfaceContext;
}
