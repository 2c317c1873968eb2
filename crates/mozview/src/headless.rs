//! In-process embedding runtime with no rendering.
//!
//! Views record every call they receive and expose their attached listener,
//! so a host (or a test) can play the engine side of the conversation:
//! fire initialization, load progress, messages, and compositor requests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use mozview_common::{EngineError, Size};
use tokio::sync::oneshot;
use tracing::debug;

use crate::engine::{EmbedRuntime, EngineView, ViewListener};
use crate::input::{InputMethodEvent, KeyEvent, TouchEvent, TouchKind};

/// One call received by a headless view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    SetListener(bool),
    SetActive(bool),
    SuspendRendering,
    ResumeRendering,
    SuspendTimeouts,
    ResumeTimeouts,
    SetFocused(bool),
    GoBack,
    GoForward,
    StopLoad,
    Reload(bool),
    LoadUrl(String),
    UpdateViewSize(Size),
    SendAsyncMessage {
        name: String,
        payload: serde_json::Value,
    },
    AddMessageListener(String),
    LoadFrameScript(String),
    KeyPress(u32),
    KeyRelease(u32),
    Touch(TouchKind),
    InputMethod(String),
}

/// Record of a view handed back to the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestroyedView {
    pub id: u32,
    /// Whether a listener was still attached when destruction was requested.
    pub listener_attached: bool,
}

type SharedListener = Arc<Mutex<Option<Arc<dyn ViewListener>>>>;

struct ViewRecord {
    parent_id: u32,
    private_mode: bool,
    calls: Arc<Mutex<Vec<ViewCall>>>,
    listener: SharedListener,
}

#[derive(Default)]
struct RuntimeInner {
    context_initialized: bool,
    ready_waiters: Vec<oneshot::Sender<()>>,
    accelerated: Option<bool>,
    next_id: u32,
    views: HashMap<u32, ViewRecord>,
    destroyed: Vec<DestroyedView>,
    fail_next_create: bool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct HeadlessRuntime {
    inner: Mutex<RuntimeInner>,
}

impl HeadlessRuntime {
    pub fn new(context_initialized: bool) -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(RuntimeInner {
                context_initialized,
                next_id: 1,
                ..Default::default()
            }),
        })
    }

    /// Finish context initialization and notify every waiter.
    pub fn initialize_context(&self) {
        let waiters = {
            let mut inner = lock(&self.inner);
            inner.context_initialized = true;
            std::mem::take(&mut inner.ready_waiters)
        };
        debug!(waiters = waiters.len(), "headless context initialized");
        for waiter in waiters {
            let _ = waiter.send(());
        }
    }

    /// Make the next `create_view` fail.
    pub fn fail_next_create(&self) {
        lock(&self.inner).fail_next_create = true;
    }

    pub fn accelerated(&self) -> Option<bool> {
        lock(&self.inner).accelerated
    }

    /// Ids of every view created so far, in creation order.
    pub fn view_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = lock(&self.inner).views.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// `(parent_id, private_mode)` the view was created with.
    pub fn created_with(&self, id: u32) -> Option<(u32, bool)> {
        lock(&self.inner)
            .views
            .get(&id)
            .map(|v| (v.parent_id, v.private_mode))
    }

    pub fn calls(&self, id: u32) -> Vec<ViewCall> {
        let Some(calls) = self.view_calls(id) else {
            return Vec::new();
        };
        let recorded = lock(&calls).clone();
        recorded
    }

    pub fn take_calls(&self, id: u32) -> Vec<ViewCall> {
        let Some(calls) = self.view_calls(id) else {
            return Vec::new();
        };
        let recorded = std::mem::take(&mut *lock(&calls));
        recorded
    }

    fn view_calls(&self, id: u32) -> Option<Arc<Mutex<Vec<ViewCall>>>> {
        lock(&self.inner).views.get(&id).map(|v| v.calls.clone())
    }

    pub fn destroyed(&self) -> Vec<DestroyedView> {
        lock(&self.inner).destroyed.clone()
    }

    /// The listener currently attached to a view.
    pub fn listener(&self, id: u32) -> Option<Arc<dyn ViewListener>> {
        let shared = lock(&self.inner).views.get(&id)?.listener.clone();
        let listener = lock(&shared).clone();
        listener
    }

    /// Run `f` against the view's listener, if one is attached. The runtime
    /// lock is not held while `f` runs.
    pub fn with_listener(&self, id: u32, f: impl FnOnce(&dyn ViewListener)) -> bool {
        match self.listener(id) {
            Some(listener) => {
                f(listener.as_ref());
                true
            }
            None => false,
        }
    }
}

impl EmbedRuntime for HeadlessRuntime {
    fn is_context_initialized(&self) -> bool {
        lock(&self.inner).context_initialized
    }

    fn context_ready(&self) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        let mut inner = lock(&self.inner);
        if inner.context_initialized {
            let _ = tx.send(());
        } else {
            inner.ready_waiters.push(tx);
        }
        rx
    }

    fn set_accelerated(&self, accelerated: bool) {
        lock(&self.inner).accelerated = Some(accelerated);
    }

    fn create_view(
        &self,
        parent_id: u32,
        private_mode: bool,
    ) -> Result<Box<dyn EngineView>, EngineError> {
        let mut inner = lock(&self.inner);
        if !inner.context_initialized {
            return Err(EngineError::ContextUnavailable);
        }
        if std::mem::take(&mut inner.fail_next_create) {
            return Err(EngineError::CreateFailed("headless create failure".into()));
        }

        let id = inner.next_id;
        inner.next_id += 1;

        let calls = Arc::new(Mutex::new(Vec::new()));
        let listener: SharedListener = Arc::new(Mutex::new(None));
        inner.views.insert(
            id,
            ViewRecord {
                parent_id,
                private_mode,
                calls: calls.clone(),
                listener: listener.clone(),
            },
        );
        debug!(id, parent_id, private_mode, "headless view created");

        Ok(Box::new(HeadlessView {
            id,
            calls,
            listener,
        }))
    }

    fn destroy_view(&self, view: Box<dyn EngineView>) {
        let id = view.unique_id();
        let mut inner = lock(&self.inner);
        let listener_attached = inner
            .views
            .get(&id)
            .map(|v| lock(&v.listener).is_some())
            .unwrap_or(false);
        inner.destroyed.push(DestroyedView {
            id,
            listener_attached,
        });
        debug!(id, "headless view destroyed");
    }
}

pub struct HeadlessView {
    id: u32,
    calls: Arc<Mutex<Vec<ViewCall>>>,
    listener: SharedListener,
}

impl HeadlessView {
    fn record(&self, call: ViewCall) {
        lock(&self.calls).push(call);
    }
}

impl EngineView for HeadlessView {
    fn unique_id(&self) -> u32 {
        self.id
    }

    fn set_listener(&mut self, listener: Option<Arc<dyn ViewListener>>) {
        self.record(ViewCall::SetListener(listener.is_some()));
        *lock(&self.listener) = listener;
    }

    fn set_active(&mut self, active: bool) {
        self.record(ViewCall::SetActive(active));
    }

    fn suspend_rendering(&mut self) {
        self.record(ViewCall::SuspendRendering);
    }

    fn resume_rendering(&mut self) {
        self.record(ViewCall::ResumeRendering);
    }

    fn suspend_timeouts(&mut self) {
        self.record(ViewCall::SuspendTimeouts);
    }

    fn resume_timeouts(&mut self) {
        self.record(ViewCall::ResumeTimeouts);
    }

    fn set_focused(&mut self, focused: bool) {
        self.record(ViewCall::SetFocused(focused));
    }

    fn go_back(&mut self) {
        self.record(ViewCall::GoBack);
    }

    fn go_forward(&mut self) {
        self.record(ViewCall::GoForward);
    }

    fn stop_load(&mut self) {
        self.record(ViewCall::StopLoad);
    }

    fn reload(&mut self, hard: bool) {
        self.record(ViewCall::Reload(hard));
    }

    fn load_url(&mut self, url: &str) {
        self.record(ViewCall::LoadUrl(url.to_string()));
    }

    fn update_view_size(&mut self, size: Size) {
        self.record(ViewCall::UpdateViewSize(size));
    }

    fn send_async_message(&mut self, name: &str, payload: &serde_json::Value) {
        self.record(ViewCall::SendAsyncMessage {
            name: name.to_string(),
            payload: payload.clone(),
        });
    }

    fn add_message_listener(&mut self, name: &str) {
        self.record(ViewCall::AddMessageListener(name.to_string()));
    }

    fn load_frame_script(&mut self, name: &str) {
        self.record(ViewCall::LoadFrameScript(name.to_string()));
    }

    fn key_press(&mut self, event: &KeyEvent) {
        self.record(ViewCall::KeyPress(event.key));
    }

    fn key_release(&mut self, event: &KeyEvent) {
        self.record(ViewCall::KeyRelease(event.key));
    }

    fn touch_event(&mut self, event: &TouchEvent) {
        self.record(ViewCall::Touch(event.kind));
    }

    fn input_method_event(&mut self, event: &InputMethodEvent) {
        self.record(ViewCall::InputMethod(event.commit.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_ready_fires_once_initialized() {
        let runtime = HeadlessRuntime::new(false);
        let mut rx = runtime.context_ready();
        assert!(rx.try_recv().is_err());

        runtime.initialize_context();
        assert!(rx.try_recv().is_ok());
        assert!(runtime.is_context_initialized());
    }

    #[test]
    fn context_ready_is_immediate_when_initialized() {
        let runtime = HeadlessRuntime::new(true);
        let mut rx = runtime.context_ready();
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn create_requires_context() {
        let runtime = HeadlessRuntime::new(false);
        assert!(matches!(
            runtime.create_view(0, false),
            Err(EngineError::ContextUnavailable)
        ));
    }

    #[test]
    fn views_get_sequential_ids() {
        let runtime = HeadlessRuntime::new(true);
        let a = runtime.create_view(0, false).unwrap();
        let b = runtime.create_view(a.unique_id(), true).unwrap();
        assert_eq!(a.unique_id(), 1);
        assert_eq!(b.unique_id(), 2);
        assert_eq!(runtime.created_with(2), Some((1, true)));
        assert_eq!(runtime.view_ids(), vec![1, 2]);
    }

    #[test]
    fn fail_next_create_fails_once() {
        let runtime = HeadlessRuntime::new(true);
        runtime.fail_next_create();
        assert!(runtime.create_view(0, false).is_err());
        assert!(runtime.create_view(0, false).is_ok());
    }

    #[test]
    fn calls_are_recorded() {
        let runtime = HeadlessRuntime::new(true);
        let mut view = runtime.create_view(0, false).unwrap();
        view.go_back();
        view.reload(true);
        assert_eq!(
            runtime.take_calls(1),
            vec![ViewCall::GoBack, ViewCall::Reload(true)]
        );
        assert!(runtime.calls(1).is_empty());
    }
}
