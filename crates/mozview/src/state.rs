//! Observable view state.
//!
//! Every setter compares against the stored value and only emits a change
//! notification when the value actually changed. `loaded` is derived from
//! progress and loading and is recomputed after either one moves.

use mozview_common::{Change, ChangeSink, PointF, RectF, SizeF};

use crate::engine::ScrollUpdate;

#[derive(Debug)]
pub struct ViewState {
    changes: ChangeSink,
    size: SizeF,
    parent_id: u32,
    private_mode: bool,
    active: bool,
    background: bool,
    loaded: bool,
    completed: bool,
    progress: i32,
    loading: bool,
    url: String,
    title: String,
    can_go_back: bool,
    can_go_forward: bool,
    content_rect: RectF,
    scrollable_size: SizeF,
    scrollable_offset: PointF,
    resolution: f32,
    painted: bool,
    chrome: bool,
    chrome_gesture_enabled: bool,
    chrome_gesture_threshold: f64,
    input_method_hints: u32,
}

/// Store `value` into `slot`, emitting `change` if it differed.
fn update<T: PartialEq>(changes: &ChangeSink, slot: &mut T, value: T, change: Change) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    changes.emit(change);
    true
}

impl ViewState {
    pub(crate) fn new(changes: ChangeSink) -> Self {
        Self {
            changes,
            size: SizeF::default(),
            parent_id: 0,
            private_mode: false,
            active: true,
            background: false,
            loaded: false,
            completed: false,
            progress: 0,
            loading: false,
            url: String::new(),
            title: String::new(),
            can_go_back: false,
            can_go_forward: false,
            content_rect: RectF::default(),
            scrollable_size: SizeF::default(),
            scrollable_offset: PointF::default(),
            resolution: 1.0,
            painted: false,
            chrome: true,
            chrome_gesture_enabled: true,
            chrome_gesture_threshold: 0.0,
            input_method_hints: 0,
        }
    }

    pub fn size(&self) -> SizeF {
        self.size
    }

    /// Geometry notifications are emitted by the page, which needs
    /// per-axis granularity.
    pub(crate) fn store_size(&mut self, size: SizeF) {
        self.size = size;
    }

    pub fn parent_id(&self) -> u32 {
        self.parent_id
    }

    pub(crate) fn set_parent_id(&mut self, parent_id: u32) -> bool {
        update(&self.changes, &mut self.parent_id, parent_id, Change::ParentIdChanged)
    }

    pub fn private_mode(&self) -> bool {
        self.private_mode
    }

    pub(crate) fn set_private_mode(&mut self, private_mode: bool) -> bool {
        update(
            &self.changes,
            &mut self.private_mode,
            private_mode,
            Change::PrivateModeChanged,
        )
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) -> bool {
        update(&self.changes, &mut self.active, active, Change::ActiveChanged)
    }

    /// Initial value, before anything observes the page.
    pub(crate) fn init_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn background(&self) -> bool {
        self.background
    }

    pub(crate) fn set_background(&mut self, background: bool) -> bool {
        update(
            &self.changes,
            &mut self.background,
            background,
            Change::BackgroundChanged,
        )
    }

    pub fn loaded(&self) -> bool {
        self.loaded
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub(crate) fn set_completed(&mut self, completed: bool) -> bool {
        update(
            &self.changes,
            &mut self.completed,
            completed,
            Change::CompletedChanged,
        )
    }

    pub fn progress(&self) -> i32 {
        self.progress
    }

    pub(crate) fn set_progress(&mut self, progress: i32) {
        let progress = progress.clamp(0, 100);
        if update(
            &self.changes,
            &mut self.progress,
            progress,
            Change::LoadProgressChanged,
        ) {
            self.refresh_loaded();
        }
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        if update(&self.changes, &mut self.loading, loading, Change::LoadingChanged) {
            self.refresh_loaded();
        }
    }

    fn refresh_loaded(&mut self) {
        let loaded = self.progress == 100 && !self.loading;
        update(&self.changes, &mut self.loaded, loaded, Change::LoadedChanged);
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn can_go_back(&self) -> bool {
        self.can_go_back
    }

    pub fn can_go_forward(&self) -> bool {
        self.can_go_forward
    }

    pub(crate) fn set_location(&mut self, url: &str, can_go_back: bool, can_go_forward: bool) {
        if self.url != url {
            self.url = url.to_string();
            self.changes.emit(Change::UrlChanged);
        }
        if self.can_go_back != can_go_back || self.can_go_forward != can_go_forward {
            self.can_go_back = can_go_back;
            self.can_go_forward = can_go_forward;
            self.changes.emit(Change::NavigationHistoryChanged);
        }
    }

    pub(crate) fn set_title(&mut self, title: &str) {
        if self.title != title {
            self.title = title.to_string();
            self.changes.emit(Change::TitleChanged);
        }
    }

    pub fn content_rect(&self) -> RectF {
        self.content_rect
    }

    pub fn scrollable_size(&self) -> SizeF {
        self.scrollable_size
    }

    pub fn scrollable_offset(&self) -> PointF {
        self.scrollable_offset
    }

    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    pub(crate) fn apply_scroll(&mut self, scroll: ScrollUpdate) {
        let changes = &self.changes;
        update(
            changes,
            &mut self.content_rect,
            scroll.content_rect,
            Change::ContentRectChanged,
        );
        update(
            changes,
            &mut self.scrollable_size,
            scroll.scrollable_size,
            Change::ScrollableSizeChanged,
        );
        update(
            changes,
            &mut self.scrollable_offset,
            scroll.scrollable_offset,
            Change::ScrollableOffsetChanged,
        );
        update(
            changes,
            &mut self.resolution,
            scroll.resolution,
            Change::ResolutionChanged,
        );
    }

    pub fn painted(&self) -> bool {
        self.painted
    }

    pub(crate) fn set_painted(&mut self, painted: bool) -> bool {
        update(&self.changes, &mut self.painted, painted, Change::PaintedChanged)
    }

    pub fn chrome(&self) -> bool {
        self.chrome
    }

    pub(crate) fn set_chrome(&mut self, chrome: bool) -> bool {
        update(&self.changes, &mut self.chrome, chrome, Change::ChromeChanged)
    }

    pub fn chrome_gesture_enabled(&self) -> bool {
        self.chrome_gesture_enabled
    }

    pub(crate) fn set_chrome_gesture_enabled(&mut self, enabled: bool) -> bool {
        update(
            &self.changes,
            &mut self.chrome_gesture_enabled,
            enabled,
            Change::ChromeGestureEnabledChanged,
        )
    }

    pub fn chrome_gesture_threshold(&self) -> f64 {
        self.chrome_gesture_threshold
    }

    pub(crate) fn set_chrome_gesture_threshold(&mut self, threshold: f64) -> bool {
        update(
            &self.changes,
            &mut self.chrome_gesture_threshold,
            threshold,
            Change::ChromeGestureThresholdChanged,
        )
    }

    pub fn input_method_hints(&self) -> u32 {
        self.input_method_hints
    }

    pub(crate) fn set_input_method_hints(&mut self, hints: u32) {
        self.input_method_hints = hints;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> (ViewState, ChangeSink) {
        let changes = ChangeSink::new();
        (ViewState::new(changes.clone()), changes)
    }

    fn assert_loaded_invariant(state: &ViewState) {
        assert_eq!(
            state.loaded(),
            state.progress() == 100 && !state.loading(),
            "progress={} loading={}",
            state.progress(),
            state.loading()
        );
    }

    #[test]
    fn loaded_tracks_progress_and_loading() {
        let (mut state, _changes) = state();
        let steps: &[(Option<i32>, Option<bool>)] = &[
            (None, Some(true)),
            (Some(30), None),
            (Some(100), None),
            (None, Some(false)),
            (None, Some(true)),
            (Some(0), None),
            (None, Some(false)),
            (Some(100), None),
            (Some(99), None),
        ];
        for (progress, loading) in steps {
            if let Some(p) = progress {
                state.set_progress(*p);
            }
            if let Some(l) = loading {
                state.set_loading(*l);
            }
            assert_loaded_invariant(&state);
        }
    }

    #[test]
    fn loaded_notifies_on_transition_only() {
        let (mut state, changes) = state();
        state.set_loading(true);
        state.set_progress(100);
        assert!(!changes.drain().contains(&Change::LoadedChanged));

        state.set_loading(false);
        assert_eq!(
            changes.drain(),
            vec![Change::LoadingChanged, Change::LoadedChanged]
        );
        assert!(state.loaded());

        state.set_progress(100);
        assert!(changes.is_empty());
    }

    #[test]
    fn progress_is_clamped() {
        let (mut state, _changes) = state();
        state.set_progress(250);
        assert_eq!(state.progress(), 100);
        state.set_progress(-4);
        assert_eq!(state.progress(), 0);
    }

    #[test]
    fn unchanged_values_do_not_notify() {
        let (mut state, changes) = state();
        assert!(!state.set_active(true));
        assert!(!state.set_background(false));
        assert!(!state.set_parent_id(0));
        assert!(changes.is_empty());

        assert!(state.set_background(true));
        assert_eq!(changes.drain(), vec![Change::BackgroundChanged]);
    }

    #[test]
    fn location_splits_url_and_history_notifications() {
        let (mut state, changes) = state();
        state.set_location("https://example.org/", false, false);
        assert_eq!(changes.drain(), vec![Change::UrlChanged]);

        state.set_location("https://example.org/", true, false);
        assert_eq!(changes.drain(), vec![Change::NavigationHistoryChanged]);
        assert!(state.can_go_back());
        assert!(!state.can_go_forward());
    }

    #[test]
    fn scroll_update_notifies_per_field() {
        let (mut state, changes) = state();
        state.apply_scroll(ScrollUpdate {
            content_rect: RectF::new(0.0, 0.0, 480.0, 2000.0),
            scrollable_size: SizeF::new(480.0, 2000.0),
            scrollable_offset: PointF::new(0.0, 0.0),
            resolution: 1.0,
        });
        assert_eq!(
            changes.drain(),
            vec![Change::ContentRectChanged, Change::ScrollableSizeChanged]
        );
    }
}
