pub mod board;
pub mod presentation;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

pub use board::IndicatorBoard;
pub use presentation::Presentation;

/// Something that can show a label, a color and a tooltip, and that links
/// somewhere. Indicators are discovered by their link target.
pub trait StatusIndicator: Send + Sync {
    fn href(&self) -> &str;

    /// Overwrite label, color and tooltip in one step.
    fn apply(&self, presentation: &Presentation);
}

#[derive(Debug)]
struct LinkState {
    presentation: Presentation,
    updated_at: Option<DateTime<Utc>>,
}

/// A named link on the board.
#[derive(Debug)]
pub struct LinkIndicator {
    name: String,
    href: String,
    state: Mutex<LinkState>,
}

impl LinkIndicator {
    pub fn new(name: impl Into<String>, href: impl Into<String>) -> Self {
        LinkIndicator {
            name: name.into(),
            href: href.into(),
            state: Mutex::new(LinkState {
                presentation: Presentation::idle(),
                updated_at: None,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn presentation(&self) -> Presentation {
        self.state.lock().presentation.clone()
    }

    /// When the presentation was last written, if ever.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.state.lock().updated_at
    }
}

impl StatusIndicator for LinkIndicator {
    fn href(&self) -> &str {
        &self.href
    }

    fn apply(&self, presentation: &Presentation) {
        let mut state = self.state.lock();
        state.presentation = presentation.clone();
        state.updated_at = Some(Utc::now());
    }
}
