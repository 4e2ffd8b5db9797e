//! Popup presenter

use std::fmt;
use std::sync::Arc;

use domain::{PlaceResult, PopupContent, PopupState};
use parking_lot::Mutex;

use crate::ports::{ViewPort, ViewUpdate};

/// Renders location details into the fixed information panel
pub struct PopupPresenter {
    state: Mutex<PopupState>,
    view: Arc<dyn ViewPort>,
}

impl fmt::Debug for PopupPresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PopupPresenter")
            .field("state", &*self.state.lock())
            .finish_non_exhaustive()
    }
}

impl PopupPresenter {
    /// Create a hidden popup
    pub fn new(view: Arc<dyn ViewPort>) -> Self {
        Self {
            state: Mutex::new(PopupState::new()),
            view,
        }
    }

    /// Show `place` in the popup
    pub fn show(&self, place: PlaceResult) -> PopupContent {
        let content = self.state.lock().show(place);
        self.view.apply(ViewUpdate::Popup(content.clone()));
        content
    }

    /// Hide the popup
    pub fn hide(&self) {
        self.state.lock().hide();
        self.view.apply(ViewUpdate::PopupHidden);
    }

    /// Whether the popup is showing
    pub fn is_visible(&self) -> bool {
        self.state.lock().is_visible()
    }

    /// Content currently on display
    pub fn content(&self) -> Option<PopupContent> {
        self.state.lock().content()
    }

    /// Last place shown, kept while hidden
    pub fn last_place(&self) -> Option<PlaceResult> {
        self.state.lock().place().cloned()
    }
}
