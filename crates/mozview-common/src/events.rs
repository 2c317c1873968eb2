//! Change notifications emitted by a page.
//!
//! Every observable property mutation pushes one `Change` into the page's
//! `ChangeSink`. The host drains the sink from its event loop and rebinds
//! whatever UI depends on the changed property.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Change {
    SizeChanged,
    WidthChanged,
    HeightChanged,
    ActiveChanged,
    BackgroundChanged,
    PrivateModeChanged,
    ParentIdChanged,
    LoadedChanged,
    LoadingChanged,
    LoadProgressChanged,
    CompletedChanged,
    UrlChanged,
    TitleChanged,
    NavigationHistoryChanged,
    ContentRectChanged,
    ScrollableSizeChanged,
    ScrollableOffsetChanged,
    ResolutionChanged,
    PaintedChanged,
    ChromeChanged,
    ChromeGestureEnabledChanged,
    ChromeGestureThresholdChanged,
    /// The engine finished initializing the view.
    ViewInitialized,
    /// The render thread asked for the GL context and surface size.
    GlContextRequested,
    /// A named message arrived from the content process.
    AsyncMessage {
        name: String,
        payload: serde_json::Value,
    },
    #[serde(other)]
    Unknown,
}

/// Shared, thread-safe queue of pending change notifications.
///
/// Cloning yields another handle to the same queue.
#[derive(Debug, Clone, Default)]
pub struct ChangeSink {
    changes: Arc<Mutex<Vec<Change>>>,
}

impl ChangeSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, change: Change) {
        if let Ok(mut changes) = self.changes.lock() {
            changes.push(change);
        } else {
            tracing::warn!(?change, "change sink poisoned, notification dropped");
        }
    }

    /// Take every pending notification, oldest first.
    pub fn drain(&self) -> Vec<Change> {
        match self.changes.lock() {
            Ok(mut changes) => std::mem::take(&mut *changes),
            Err(_) => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.changes.lock().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
