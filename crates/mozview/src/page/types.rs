use mozview_common::SizeF;
use mozview_config::ViewSection;

/// Settings a page is constructed with.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Parent view id; 0 leaves it unset.
    pub parent_id: u32,
    /// Fixed once the engine view exists.
    pub private_mode: bool,
    /// Request hardware compositing before creating the view.
    pub accelerated: bool,
    pub active_on_start: bool,
    /// Grab engine focus as soon as the view reports initialization.
    pub focus_on_complete: bool,
    pub size: SizeF,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            parent_id: 0,
            private_mode: false,
            accelerated: true,
            active_on_start: true,
            focus_on_complete: true,
            size: SizeF::default(),
        }
    }
}

impl ViewConfig {
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            size: SizeF::new(width, height),
            ..Default::default()
        }
    }
}

impl From<&ViewSection> for ViewConfig {
    fn from(section: &ViewSection) -> Self {
        Self {
            parent_id: section.parent_id,
            private_mode: section.private_mode,
            accelerated: section.accelerated,
            active_on_start: section.active_on_start,
            focus_on_complete: section.focus_on_complete,
            size: SizeF::new(section.width, section.height),
        }
    }
}
