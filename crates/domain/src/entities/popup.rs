//! Floating information popup

use serde::{Deserialize, Serialize};

use super::place::PlaceResult;

/// Rendered text of the popup's fixed fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupContent {
    /// `Location: <display name>`
    pub location: String,
    /// `Lat: <lat>, Lon: <lon>` with six decimals each
    pub coordinates: String,
}

impl PopupContent {
    /// Render a place into the popup fields
    #[must_use]
    pub fn from_place(place: &PlaceResult) -> Self {
        Self {
            location: format!("Location: {}", place.display_name),
            coordinates: format!(
                "Lat: {:.6}, Lon: {:.6}",
                place.coordinate.latitude(),
                place.coordinate.longitude()
            ),
        }
    }
}

/// Popup visibility and the last place it displayed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopupState {
    visible: bool,
    place: Option<PlaceResult>,
}

impl PopupState {
    /// A hidden, empty popup
    #[must_use]
    pub const fn new() -> Self {
        Self {
            visible: false,
            place: None,
        }
    }

    /// Display `place` and return the rendered fields
    pub fn show(&mut self, place: PlaceResult) -> PopupContent {
        let content = PopupContent::from_place(&place);
        self.place = Some(place);
        self.visible = true;
        content
    }

    /// Hide the popup, keeping the last place. Returns whether it was visible.
    pub fn hide(&mut self) -> bool {
        std::mem::replace(&mut self.visible, false)
    }

    /// Whether the popup is shown
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// The last place displayed
    #[must_use]
    pub const fn place(&self) -> Option<&PlaceResult> {
        self.place.as_ref()
    }

    /// Rendered fields of the current place, if visible
    #[must_use]
    pub fn content(&self) -> Option<PopupContent> {
        self.place
            .as_ref()
            .filter(|_| self.visible)
            .map(PopupContent::from_place)
    }
}
