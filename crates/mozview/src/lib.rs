//! Host-side adapter for an embedded, GPU-composited browser view.
//!
//! A [`WebPage`] owns one engine view and provides:
//! - Lazy view creation once the embedding context is ready
//! - The initialization handshake and active/suspend/resume state machine
//! - Surface size negotiation between UI geometry and the render thread
//! - Keyboard, touch, focus and input-method forwarding
//! - Asynchronous named messages to and from the content process
//!
//! The engine itself sits behind the [`EmbedRuntime`] and [`EngineView`]
//! traits. [`headless`] provides an in-process implementation.

pub mod engine;
pub mod headless;
pub mod input;
pub mod ipc;
mod lifecycle;
mod listener;
pub mod page;
pub mod state;
pub mod surface;

pub use engine::{EmbedRuntime, EngineView, ScrollUpdate, ViewListener};
pub use input::{InputMethodEvent, KeyEvent, TouchEvent, TouchKind, TouchPoint};
pub use ipc::OutgoingMessage;
pub use page::{ViewConfig, WebPage};
pub use state::ViewState;
pub use surface::{RenderSurface, SurfaceContext};

pub use mozview_common::{Change, ChangeSink, PointF, RectF, Size, SizeF};
