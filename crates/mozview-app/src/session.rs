//! A scripted page session against the headless engine.

use mozview::headless::HeadlessRuntime;
use mozview::{ScrollUpdate, ViewConfig, WebPage};
use mozview_common::{Change, EngineError, PointF, RectF, SizeF};
use tracing::{info, warn};

const LINK_CLICKED: &str = "embed:linkclicked";

pub struct SessionOptions {
    pub url: Option<String>,
    /// Bring the embedding context up only after the page exists.
    pub defer_context: bool,
}

/// Run one page through creation, a simulated load and teardown, returning
/// every change notification it produced.
pub fn run(view: ViewConfig, options: &SessionOptions) -> mozview_common::Result<Vec<Change>> {
    let runtime = HeadlessRuntime::new(!options.defer_context);
    let mut page = WebPage::new(runtime.clone(), view);
    let mut changes = Vec::new();

    page.add_message_listener(LINK_CLICKED);
    if let Some(url) = &options.url {
        page.load(url);
    }

    if options.defer_context {
        info!(queued = page.queued_messages(), "bringing up embedding context");
        runtime.initialize_context();
        page.process_pending();
    }

    let view_id = page.unique_id();
    if view_id == 0 {
        let reason = "no engine view after context init".to_string();
        return Err(EngineError::CreateFailed(reason).into());
    }

    let url = options.url.as_deref().unwrap_or("about:blank");
    runtime.with_listener(view_id, |listener| {
        listener.on_view_initialized();
        listener.on_loading_state_changed(true);
        listener.on_location_changed(url, false, false);
        listener.on_load_progress(40);
        listener.on_title_changed(url);
        listener.on_load_progress(100);
        listener.on_loading_state_changed(false);
        listener.on_first_paint();
    });
    page.process_pending();
    changes.extend(page.drain_changes());

    let surface = page.render_surface();
    match std::thread::spawn(move || surface.request_context()).join() {
        Ok(context) => info!(size = %context.size, "compositor got surface"),
        Err(_) => warn!("compositor thread panicked"),
    }

    let size = page.size();
    runtime.with_listener(view_id, |listener| {
        listener.on_scroll_changed(ScrollUpdate {
            content_rect: RectF::new(0.0, 0.0, size.width, size.height * 3.0),
            scrollable_size: SizeF::new(size.width, size.height * 3.0),
            scrollable_offset: PointF::new(0.0, size.height),
            resolution: 1.0,
        });
        listener.recv_async_message(LINK_CLICKED, serde_json::json!({ "uri": url }));
    });
    page.process_pending();

    info!(
        view_id,
        loaded = page.loaded(),
        title = page.title(),
        "page loaded"
    );

    page.suspend();
    page.resume();
    page.destroy();
    changes.extend(page.drain_changes());
    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(defer_context: bool) -> SessionOptions {
        SessionOptions {
            url: Some("https://example.org/".into()),
            defer_context,
        }
    }

    #[test]
    fn session_completes_and_loads() {
        let changes = run(ViewConfig::with_size(800.0, 600.0), &options(false)).unwrap();
        assert!(changes.contains(&Change::ViewInitialized));
        assert!(changes.contains(&Change::CompletedChanged));
        assert!(changes.contains(&Change::LoadedChanged));
        assert!(changes.contains(&Change::GlContextRequested));
        assert!(changes.contains(&Change::AsyncMessage {
            name: LINK_CLICKED.into(),
            payload: serde_json::json!({ "uri": "https://example.org/" }),
        }));
    }

    #[test]
    fn deferred_context_still_creates_view() {
        let changes = run(ViewConfig::default(), &options(true)).unwrap();
        assert!(changes.contains(&Change::ViewInitialized));
        assert!(changes.contains(&Change::UrlChanged));
    }
}
