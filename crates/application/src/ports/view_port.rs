//! Browser view port
//!
//! Every visible change a session makes is described as a [`ViewUpdate`] and
//! handed to a [`ViewPort`]. The presentation layer decides how updates reach
//! the page.

use domain::{Coordinate, PlaceResult, PopupContent};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// Kind of user-facing alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Explicit search with an empty query
    EmptyQuery,
    /// Explicit search that found nothing
    NoResults,
    /// Explicit search that failed on the network
    Failure,
}

impl AlertKind {
    /// Message shown to the user
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptyQuery => "Please enter a location to search.",
            Self::NoResults => "No results found for the search query.",
            Self::Failure => "Search failed. Please try again later.",
        }
    }
}

/// A single change to apply to the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewUpdate {
    /// Replace the suggestion rows
    Suggestions {
        /// Rows in display order, at most five
        items: Vec<PlaceResult>,
    },
    /// Hide the suggestion list
    SuggestionsHidden,
    /// Create or move the marker
    Marker {
        /// New marker position
        coordinate: Coordinate,
        /// `true` when the marker did not exist before
        created: bool,
    },
    /// Animate the map to a new center
    FlyTo {
        /// Target center
        coordinate: Coordinate,
        /// Target zoom level
        zoom: f64,
        /// Animation length
        duration_secs: f64,
    },
    /// Show the information popup
    Popup(PopupContent),
    /// Hide the information popup
    PopupHidden,
    /// Show an alert dialog
    Alert {
        /// Alert category
        kind: AlertKind,
        /// Text to display
        message: String,
    },
}

impl ViewUpdate {
    /// Alert update with the standard message for `kind`
    #[must_use]
    pub fn alert(kind: AlertKind) -> Self {
        Self::Alert {
            kind,
            message: kind.message().to_string(),
        }
    }

    /// Short name used in logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Suggestions { .. } => "suggestions",
            Self::SuggestionsHidden => "suggestions_hidden",
            Self::Marker { .. } => "marker",
            Self::FlyTo { .. } => "fly_to",
            Self::Popup(_) => "popup",
            Self::PopupHidden => "popup_hidden",
            Self::Alert { .. } => "alert",
        }
    }
}

/// Sink for view updates of one session
///
/// `apply` must not block; it is called while short state locks are held.
#[cfg_attr(test, automock)]
pub trait ViewPort: Send + Sync {
    /// Deliver an update to the page
    fn apply(&self, update: ViewUpdate);
}
