//! Input events forwarded from the host item to the engine.

use mozview_common::PointF;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Host key code.
    pub key: u32,
    /// Host modifier bitmask.
    pub modifiers: u32,
    pub text: String,
    pub auto_repeat: bool,
}

impl KeyEvent {
    pub fn new(key: u32, text: impl Into<String>) -> Self {
        Self {
            key,
            modifiers: 0,
            text: text.into(),
            auto_repeat: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchKind {
    Begin,
    Update,
    End,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub id: i32,
    pub position: PointF,
    pub pressure: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub kind: TouchKind,
    pub points: Vec<TouchPoint>,
    pub timestamp_ms: u64,
    /// Set once the item has consumed the event; stops further propagation.
    #[serde(skip)]
    pub accepted: bool,
}

impl TouchEvent {
    pub fn new(kind: TouchKind, points: Vec<TouchPoint>, timestamp_ms: u64) -> Self {
        Self {
            kind,
            points,
            timestamp_ms,
            accepted: false,
        }
    }

    pub fn accept(&mut self) {
        self.accepted = true;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputMethodEvent {
    pub preedit: String,
    pub commit: String,
    pub replacement_start: i32,
    pub replacement_length: i32,
}

impl InputMethodEvent {
    pub fn commit(text: impl Into<String>) -> Self {
        Self {
            commit: text.into(),
            ..Default::default()
        }
    }

    pub fn preedit(text: impl Into<String>) -> Self {
        Self {
            preedit: text.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touch_event_starts_unaccepted() {
        let mut event = TouchEvent::new(TouchKind::Begin, Vec::new(), 0);
        assert!(!event.accepted);
        event.accept();
        assert!(event.accepted);
    }

    #[test]
    fn input_method_constructors() {
        assert_eq!(InputMethodEvent::commit("abc").commit, "abc");
        assert!(InputMethodEvent::commit("abc").preedit.is_empty());
        assert_eq!(InputMethodEvent::preedit("ab").preedit, "ab");
    }
}
