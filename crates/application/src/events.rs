//! Browser events
//!
//! Every user interaction on the page arrives as one [`MapEvent`].

use domain::{Coordinate, PlaceResult, ScreenPoint, Viewport};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

/// A user interaction forwarded by the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapEvent {
    /// The search box text changed
    QueryChanged {
        /// Current search box text
        query: String,
        /// Page-side counter, increasing with every change
        #[serde(default, skip_serializing_if = "Option::is_none")]
        seq: Option<u64>,
    },
    /// A suggestion row was clicked
    SuggestionSelected {
        /// The place behind the row
        place: PlaceResult,
    },
    /// A click landed outside the suggestion list
    OutsideClicked,
    /// The search button was pressed
    SearchSubmitted {
        /// Current search box text
        query: String,
    },
    /// The map was clicked
    MapClicked {
        /// Clicked position
        coordinate: Coordinate,
    },
    /// The marker icon is being dragged
    IconDragged {
        /// Container x offset in pixels
        #[serde(deserialize_with = "screen_offset")]
        x: f64,
        /// Container y offset in pixels
        #[serde(deserialize_with = "screen_offset")]
        y: f64,
    },
    /// The marker icon was released
    IconDropped {
        /// Container x offset in pixels
        #[serde(deserialize_with = "screen_offset")]
        x: f64,
        /// Container y offset in pixels
        #[serde(deserialize_with = "screen_offset")]
        y: f64,
    },
    /// The marker icon was pressed
    IconPressed,
    /// The map was panned, zoomed or resized
    ViewportChanged {
        /// New viewport
        viewport: Viewport,
    },
}

fn screen_offset<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let offset = f64::deserialize(deserializer)?;
    if ScreenPoint::offset_in_range(offset) {
        Ok(offset)
    } else {
        Err(D::Error::custom(format!("screen offset {offset} out of range")))
    }
}

impl MapEvent {
    /// Short name used in logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::QueryChanged { .. } => "query_changed",
            Self::SuggestionSelected { .. } => "suggestion_selected",
            Self::OutsideClicked => "outside_clicked",
            Self::SearchSubmitted { .. } => "search_submitted",
            Self::MapClicked { .. } => "map_clicked",
            Self::IconDragged { .. } => "icon_dragged",
            Self::IconDropped { .. } => "icon_dropped",
            Self::IconPressed => "icon_pressed",
            Self::ViewportChanged { .. } => "viewport_changed",
        }
    }

    /// Screen point carried by drag events
    #[must_use]
    pub const fn screen_point(&self) -> Option<ScreenPoint> {
        match self {
            Self::IconDragged { x, y } | Self::IconDropped { x, y } => {
                Some(ScreenPoint::new(*x, *y))
            },
            _ => None,
        }
    }
}
