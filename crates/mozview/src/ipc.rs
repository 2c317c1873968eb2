//! Outgoing messages to the content process.
//!
//! Messaging calls are never validated or gated on initialization. While a
//! page has no engine view they wait in a [`MessageQueue`] and are replayed
//! in order once the view exists.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::engine::EngineView;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OutgoingMessage {
    Send {
        name: String,
        payload: serde_json::Value,
    },
    AddListener {
        name: String,
    },
    LoadFrameScript {
        name: String,
    },
}

impl OutgoingMessage {
    pub fn name(&self) -> &str {
        match self {
            Self::Send { name, .. } | Self::AddListener { name } | Self::LoadFrameScript { name } => {
                name
            }
        }
    }

    pub(crate) fn deliver(&self, view: &mut dyn EngineView) {
        match self {
            Self::Send { name, payload } => view.send_async_message(name, payload),
            Self::AddListener { name } => view.add_message_listener(name),
            Self::LoadFrameScript { name } => view.load_frame_script(name),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct MessageQueue {
    pending: VecDeque<OutgoingMessage>,
}

impl MessageQueue {
    pub(crate) fn push(&mut self, message: OutgoingMessage) {
        self.pending.push_back(message);
    }

    /// Deliver every queued message in submission order.
    pub(crate) fn flush(&mut self, view: &mut dyn EngineView) -> usize {
        let count = self.pending.len();
        for message in self.pending.drain(..) {
            message.deliver(view);
        }
        count
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessRuntime, ViewCall};
    use crate::engine::EmbedRuntime;

    #[test]
    fn flush_preserves_submission_order() {
        let runtime = HeadlessRuntime::new(true);
        let mut view = runtime.create_view(0, false).unwrap();
        let id = view.unique_id();

        let mut queue = MessageQueue::default();
        queue.push(OutgoingMessage::AddListener {
            name: "embed:find".into(),
        });
        queue.push(OutgoingMessage::LoadFrameScript {
            name: "chrome://content/helper.js".into(),
        });
        queue.push(OutgoingMessage::Send {
            name: "embed:find".into(),
            payload: serde_json::json!({ "text": "rust" }),
        });

        assert_eq!(queue.flush(view.as_mut()), 3);
        assert_eq!(queue.len(), 0);
        assert_eq!(
            runtime.calls(id),
            vec![
                ViewCall::AddMessageListener("embed:find".into()),
                ViewCall::LoadFrameScript("chrome://content/helper.js".into()),
                ViewCall::SendAsyncMessage {
                    name: "embed:find".into(),
                    payload: serde_json::json!({ "text": "rust" }),
                },
            ]
        );
    }

    #[test]
    fn message_name() {
        let message = OutgoingMessage::Send {
            name: "embed:ping".into(),
            payload: serde_json::Value::Null,
        };
        assert_eq!(message.name(), "embed:ping");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let message = OutgoingMessage::AddListener {
            name: "embed:ping".into(),
        };
        let json = serde_json::to_string(&message).unwrap();
        assert_eq!(json, r#"{"kind":"add_listener","name":"embed:ping"}"#);
    }
}
