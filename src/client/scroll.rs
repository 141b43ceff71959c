use tokio::sync::mpsc;

use super::browser::BrowserEvent;

/// Turns sentinel visibility into "load more" signals.
///
/// Only a hidden-to-visible transition can fire, and only while the listing can
/// load more. A sentinel that stays visible through a load does not fire again;
/// the in-flight guard of the pagination covers flicker during a load.
#[derive(Debug, Clone, Default)]
pub struct ScrollTrigger {
    visible: bool,
}

impl ScrollTrigger {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Records the new visibility and returns whether exactly one `load_more`
    /// should be issued.
    pub fn observe(&mut self, visible: bool, can_load_more: bool) -> bool {
        let became_visible = visible && !self.visible;
        self.visible = visible;
        became_visible && can_load_more
    }
}

/// Attachment point for the renderer's intersection observer.
#[derive(Debug, Clone)]
pub struct SentinelHandle {
    events: mpsc::UnboundedSender<BrowserEvent>,
}

impl SentinelHandle {
    pub(crate) fn new(events: mpsc::UnboundedSender<BrowserEvent>) -> Self {
        Self { events }
    }

    /// Reports whether the sentinel is on screen. Returns `false` once the
    /// session has shut down.
    pub fn set_visible(&self, visible: bool) -> bool {
        self.events.send(BrowserEvent::SentinelVisibility(visible)).is_ok()
    }
}
