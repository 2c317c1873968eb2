//! Message passing to the content process.
//!
//! Unlike navigation these calls never check for initialization: with a
//! view they go straight through, without one they are queued and replayed
//! when the view is created.

use tracing::debug;

use crate::ipc::OutgoingMessage;
use crate::lifecycle::{Disposition, Op};

use super::WebPage;

impl WebPage {
    pub fn send_async_message(&mut self, name: &str, payload: serde_json::Value) {
        self.dispatch_message(OutgoingMessage::Send {
            name: name.to_string(),
            payload,
        });
    }

    pub fn add_message_listener(&mut self, name: &str) {
        self.dispatch_message(OutgoingMessage::AddListener {
            name: name.to_string(),
        });
    }

    pub fn add_message_listeners<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.add_message_listener(name.as_ref());
        }
    }

    pub fn load_frame_script(&mut self, name: &str) {
        self.dispatch_message(OutgoingMessage::LoadFrameScript {
            name: name.to_string(),
        });
    }

    /// Messages waiting for the view to be created.
    pub fn queued_messages(&self) -> usize {
        self.outbox.len()
    }

    fn dispatch_message(&mut self, message: OutgoingMessage) {
        match self.gate(Op::Messaging) {
            Disposition::Forward => {
                if let Some(view) = self.lifecycle.view_mut() {
                    message.deliver(view);
                }
            }
            Disposition::Defer => {
                debug!(name = message.name(), "message queued until view creation");
                self.outbox.push(message);
            }
            Disposition::Ignore | Disposition::Fatal => {
                debug!(name = message.name(), "message dropped, view destroyed");
            }
        }
    }
}
