//! Input forwarding.

use tracing::trace;

use crate::engine::EngineView;
use crate::input::{InputMethodEvent, KeyEvent, TouchEvent};
use crate::lifecycle::{Disposition, Op};

use super::WebPage;

impl WebPage {
    fn input_view(&mut self) -> Option<&mut dyn EngineView> {
        if self.gate(Op::Input) != Disposition::Forward {
            return None;
        }
        self.lifecycle.view_mut()
    }

    pub fn key_press_event(&mut self, event: &KeyEvent) {
        if let Some(view) = self.input_view() {
            view.key_press(event);
        }
    }

    pub fn key_release_event(&mut self, event: &KeyEvent) {
        if let Some(view) = self.input_view() {
            view.key_release(event);
        }
    }

    /// Touches are always accepted, even with no view to receive them, so
    /// they never propagate past the page.
    pub fn touch_event(&mut self, event: &mut TouchEvent) {
        if let Some(view) = self.input_view() {
            view.touch_event(event);
        }
        event.accept();
    }

    pub fn input_method_event(&mut self, event: &InputMethodEvent) {
        if let Some(view) = self.input_view() {
            view.input_method_event(event);
        }
    }

    pub fn focus_in_event(&mut self) {
        if let Some(view) = self.input_view() {
            view.set_focused(true);
        }
    }

    pub fn focus_out_event(&mut self) {
        if let Some(view) = self.input_view() {
            view.set_focused(false);
        }
    }

    pub fn input_method_hints(&self) -> u32 {
        self.state.input_method_hints()
    }

    pub fn set_input_method_hints(&mut self, hints: u32) {
        self.state.set_input_method_hints(hints);
    }

    pub fn synth_touch_begin(&mut self, touches: &serde_json::Value) {
        self.synth_touch("begin", touches);
    }

    pub fn synth_touch_move(&mut self, touches: &serde_json::Value) {
        self.synth_touch("move", touches);
    }

    pub fn synth_touch_end(&mut self, touches: &serde_json::Value) {
        self.synth_touch("end", touches);
    }

    /// Synthetic touches are accepted and discarded.
    fn synth_touch(&mut self, phase: &str, touches: &serde_json::Value) {
        if self.gate(Op::SyntheticTouch) == Disposition::Ignore {
            trace!(phase, ?touches, "synthetic touch ignored");
        }
    }

    /// # Panics
    ///
    /// Always: mouse injection is not supported by this page.
    pub fn recv_mouse_move(&mut self, x: i32, y: i32) {
        self.mouse_injection("recv_mouse_move", x, y);
    }

    /// # Panics
    ///
    /// Always: mouse injection is not supported by this page.
    pub fn recv_mouse_press(&mut self, x: i32, y: i32) {
        self.mouse_injection("recv_mouse_press", x, y);
    }

    /// # Panics
    ///
    /// Always: mouse injection is not supported by this page.
    pub fn recv_mouse_release(&mut self, x: i32, y: i32) {
        self.mouse_injection("recv_mouse_release", x, y);
    }

    fn mouse_injection(&self, op: &str, x: i32, y: i32) {
        if self.gate(Op::MouseInjection) == Disposition::Fatal {
            panic!("calling {op}({x}, {y}) not supported");
        }
    }
}
