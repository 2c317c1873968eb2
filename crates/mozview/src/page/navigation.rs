//! Navigation. Every operation here needs an initialized view and is
//! silently dropped otherwise, except `load`, which is held until then.

use tracing::debug;

use crate::lifecycle::{Disposition, Op};

use super::WebPage;

impl WebPage {
    pub fn go_back(&mut self) {
        if self.gate(Op::Navigate) != Disposition::Forward {
            return;
        }
        if let Some(view) = self.lifecycle.view_mut() {
            view.go_back();
        }
    }

    pub fn go_forward(&mut self) {
        if self.gate(Op::Navigate) != Disposition::Forward {
            return;
        }
        if let Some(view) = self.lifecycle.view_mut() {
            view.go_forward();
        }
    }

    pub fn stop(&mut self) {
        if self.gate(Op::Navigate) != Disposition::Forward {
            return;
        }
        if let Some(view) = self.lifecycle.view_mut() {
            view.stop_load();
        }
    }

    /// Soft reload. The page counts as unpainted until the engine reports
    /// its next first paint.
    pub fn reload(&mut self) {
        if self.gate(Op::Navigate) != Disposition::Forward {
            return;
        }
        self.state.set_painted(false);
        if let Some(view) = self.lifecycle.view_mut() {
            view.reload(false);
        }
    }

    /// Load `url`, or remember it until the view is initialized.
    pub fn load(&mut self, url: &str) {
        match self.gate(Op::LoadUrl) {
            Disposition::Forward => {
                if let Some(view) = self.lifecycle.view_mut() {
                    view.load_url(url);
                }
            }
            Disposition::Defer => {
                debug!(url, "load deferred until view initialization");
                self.pending_url = Some(url.to_string());
            }
            Disposition::Ignore | Disposition::Fatal => {}
        }
    }

    pub fn set_url(&mut self, url: &str) {
        self.load(url);
    }
}
