//! View creation, the initialization handshake, activity and teardown.

use mozview_common::Change;
use tokio::sync::oneshot::error::TryRecvError;
use tracing::{debug, error, info, warn};

use crate::lifecycle::{Disposition, Lifecycle, LiveView, Op};
use crate::listener::{EngineCallback, ListenerAttachment};

use super::WebPage;

impl WebPage {
    /// Create the engine view if the context allows it.
    ///
    /// Without an initialized context this subscribes, once, to the
    /// runtime's context-ready notification; [`WebPage::process_pending`]
    /// retries creation when it fires. No-op if a view already exists.
    pub fn create(&mut self) {
        if self.gate(Op::Create) != Disposition::Forward {
            return;
        }

        if !self.runtime.is_context_initialized() {
            if self.context_ready.is_none() {
                debug!("embedding context not ready, waiting");
                self.context_ready = Some(self.runtime.context_ready());
            }
            return;
        }
        self.context_ready = None;

        let parent_id = self.state.parent_id();
        let private_mode = self.state.private_mode();

        self.runtime.set_accelerated(self.config.accelerated);
        let mut view = match self.runtime.create_view(parent_id, private_mode) {
            Ok(view) => view,
            Err(e) => {
                error!(parent_id, error = %e, "failed to create engine view");
                return;
            }
        };

        let listener = ListenerAttachment::attach(self.surface.clone(), view.as_mut());
        let flushed = self.outbox.flush(view.as_mut());
        let view_id = view.unique_id();
        self.lifecycle = Lifecycle::Created(LiveView { view, listener });

        info!(view_id, parent_id, private_mode, flushed, "engine view created");
    }

    /// Apply everything the engine reported since the last call.
    ///
    /// Call from the host's UI loop. Also picks up the context-ready
    /// notification when creation was waiting on it.
    pub fn process_pending(&mut self) {
        self.poll_context_ready();

        let callbacks = match self.lifecycle.live() {
            Some(live) => live.listener.take(),
            None => return,
        };
        for callback in callbacks {
            self.apply_callback(callback);
        }
    }

    fn poll_context_ready(&mut self) {
        let Some(receiver) = self.context_ready.as_mut() else {
            return;
        };
        match receiver.try_recv() {
            Ok(()) => {
                self.context_ready = None;
                debug!("embedding context ready");
                self.create();
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Closed) => {
                self.context_ready = None;
                warn!("embedding runtime dropped the context-ready notification");
            }
        }
    }

    fn apply_callback(&mut self, callback: EngineCallback) {
        match callback {
            EngineCallback::Initialized => self.handle_view_initialized(),
            EngineCallback::LoadProgress(progress) => self.state.set_progress(progress),
            EngineCallback::LoadingState(loading) => self.state.set_loading(loading),
            EngineCallback::Location {
                url,
                can_go_back,
                can_go_forward,
            } => self.state.set_location(&url, can_go_back, can_go_forward),
            EngineCallback::Title(title) => self.state.set_title(&title),
            EngineCallback::Scroll(update) => self.state.apply_scroll(update),
            EngineCallback::FirstPaint => {
                self.state.set_painted(true);
            }
            EngineCallback::Message { name, payload } => {
                self.changes.emit(Change::AsyncMessage { name, payload });
            }
        }
    }

    fn handle_view_initialized(&mut self) {
        match self.gate(Op::Initialize) {
            Disposition::Forward => {}
            Disposition::Fatal => panic!("view initialized before it was created"),
            Disposition::Defer | Disposition::Ignore => {
                warn!("duplicate view initialization ignored");
                return;
            }
        }

        self.lifecycle = match std::mem::replace(&mut self.lifecycle, Lifecycle::Uncreated) {
            Lifecycle::Created(live) => Lifecycle::Initialized(live),
            other => other,
        };
        info!(view_id = self.unique_id(), "engine view initialized");
        self.changes.emit(Change::ViewInitialized);

        let surface = self.surface.size();
        if !surface.is_empty() {
            if let Some(view) = self.lifecycle.view_mut() {
                view.update_view_size(surface);
            }
        }

        if let Some(active) = self.pending_active.take() {
            self.set_active(active);
        }
        if let Some(url) = self.pending_url.take() {
            self.load(&url);
        }
        if self.config.focus_on_complete {
            self.force_active_focus();
        }

        self.state.set_completed(true);
    }

    /// Before initialization the value is held and applied once the view
    /// reports ready; only the last such value survives. Afterwards the
    /// local flag notifies on change while the engine is always told.
    pub fn set_active(&mut self, active: bool) {
        match self.gate(Op::SetActive) {
            Disposition::Defer => {
                debug!(active, "activation deferred until view initialization");
                self.pending_active = Some(active);
            }
            Disposition::Forward => {
                self.state.set_active(active);
                if let Some(view) = self.lifecycle.view_mut() {
                    view.set_active(active);
                    if active {
                        view.resume_rendering();
                    } else {
                        view.suspend_rendering();
                    }
                }
            }
            Disposition::Ignore | Disposition::Fatal => {
                debug!(active, "set_active ignored, view destroyed");
            }
        }
    }

    /// Activate the view and give it engine focus.
    ///
    /// # Panics
    ///
    /// If the view has not reported initialization. Callers gate on
    /// `Change::CompletedChanged`.
    pub fn force_active_focus(&mut self) {
        match self.gate(Op::ForceFocus) {
            Disposition::Forward => {}
            Disposition::Fatal => {
                panic!("force_active_focus called before the view was initialized")
            }
            Disposition::Defer | Disposition::Ignore => return,
        }
        self.set_active(true);
        if let Some(view) = self.lifecycle.view_mut() {
            view.set_focused(true);
        }
    }

    /// Deactivate and pause the engine's timers.
    pub fn suspend(&mut self) {
        if self.gate(Op::SuspendResume) != Disposition::Forward {
            return;
        }
        self.set_active(false);
        if let Some(view) = self.lifecycle.view_mut() {
            view.suspend_timeouts();
        }
    }

    /// Reactivate and restart the engine's timers.
    pub fn resume(&mut self) {
        if self.gate(Op::SuspendResume) != Disposition::Forward {
            return;
        }
        self.set_active(true);
        if let Some(view) = self.lifecycle.view_mut() {
            view.resume_timeouts();
        }
    }

    /// Tear down the engine view.
    ///
    /// The listener is detached before the runtime destroys the view, so no
    /// callback can arrive mid-teardown. Runs at most once; every later
    /// operation on the page is a no-op.
    pub fn destroy(&mut self) {
        let previous = std::mem::replace(&mut self.lifecycle, Lifecycle::Destroyed);
        self.context_ready = None;
        self.outbox.clear();

        let LiveView { mut view, listener } = match previous {
            Lifecycle::Created(live) | Lifecycle::Initialized(live) => live,
            Lifecycle::Uncreated => {
                debug!("page destroyed before its view was created");
                return;
            }
            Lifecycle::Destroyed => return,
        };

        listener.detach(view.as_mut());
        let view_id = view.unique_id();
        self.runtime.destroy_view(view);
        info!(view_id, "engine view destroyed");
    }
}
