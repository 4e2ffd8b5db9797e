//! Search suggestion list
//!
//! Each query change takes the next sequence number. After the debounce
//! interval a query is only sent if it is still the latest, and its results
//! are only shown if no newer query (or hide) happened while the request was
//! in flight.
//!
//! The page may stamp query changes with its own counter. Events arrive over
//! separate requests, so a stamped query older than one already seen is
//! dropped on arrival.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use domain::PlaceResult;
use parking_lot::Mutex;
use tracing::{debug, instrument, warn};

use super::{marker_controller::MarkerController, popup_presenter::PopupPresenter};
use crate::ports::{GeocodingPort, ViewPort, ViewUpdate};

/// Upper bound on displayed suggestion rows
pub const MAX_SUGGESTION_ROWS: usize = 5;

/// Shortest query length allowed to trigger a lookup
pub const MIN_QUERY_CHARS: usize = 3;

/// Tuning for the suggestion list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionSettings {
    /// Shortest trimmed query that triggers a lookup, at least [`MIN_QUERY_CHARS`]
    pub min_query_chars: usize,
    /// Rows shown, capped at [`MAX_SUGGESTION_ROWS`]
    pub max_rows: usize,
    /// Quiet period before a query is sent
    pub debounce: Duration,
}

impl Default for SuggestionSettings {
    fn default() -> Self {
        Self {
            min_query_chars: MIN_QUERY_CHARS,
            max_rows: MAX_SUGGESTION_ROWS,
            debounce: Duration::from_millis(300),
        }
    }
}

/// What happened to one query change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionOutcome {
    /// Query too short, list cleared without a request
    Cleared,
    /// A newer query or hide superseded this one
    Superseded,
    /// Rows displayed
    Shown(usize),
    /// The lookup failed; nothing displayed
    Failed,
}

/// Autocomplete rows under the search box
pub struct SuggestionList {
    geocoder: Arc<dyn GeocodingPort>,
    view: Arc<dyn ViewPort>,
    marker: Arc<MarkerController>,
    popup: Arc<PopupPresenter>,
    settings: SuggestionSettings,
    latest: AtomicU64,
    issued: AtomicU64,
    rows: Mutex<Vec<PlaceResult>>,
}

impl fmt::Debug for SuggestionList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuggestionList")
            .field("settings", &self.settings)
            .field("latest", &self.latest.load(Ordering::SeqCst))
            .field("rows", &self.rows.lock().len())
            .finish_non_exhaustive()
    }
}

impl SuggestionList {
    /// Create an empty list
    pub fn new(
        geocoder: Arc<dyn GeocodingPort>,
        view: Arc<dyn ViewPort>,
        marker: Arc<MarkerController>,
        popup: Arc<PopupPresenter>,
        settings: SuggestionSettings,
    ) -> Self {
        let settings = SuggestionSettings {
            min_query_chars: settings.min_query_chars.max(MIN_QUERY_CHARS),
            max_rows: settings.max_rows.min(MAX_SUGGESTION_ROWS),
            ..settings
        };
        Self {
            geocoder,
            view,
            marker,
            popup,
            settings,
            latest: AtomicU64::new(0),
            issued: AtomicU64::new(0),
            rows: Mutex::new(Vec::new()),
        }
    }

    /// React to a change of the search box text
    pub async fn on_query_changed(&self, query: &str) -> SuggestionOutcome {
        self.on_query_issued(query, None).await
    }

    /// React to a query change the page stamped with `issued`
    ///
    /// Page stamps increase with every keystroke. A query stamped at or below
    /// the highest stamp seen so far was overtaken in transit and is ignored.
    #[instrument(skip(self))]
    pub async fn on_query_issued(&self, query: &str, issued: Option<u64>) -> SuggestionOutcome {
        if let Some(stamp) = issued {
            let newest = self.issued.fetch_max(stamp, Ordering::SeqCst);
            if newest >= stamp {
                debug!(stamp, newest, "Query overtaken by a newer one");
                return SuggestionOutcome::Superseded;
            }
        }

        let query = query.trim();
        if query.chars().count() < self.settings.min_query_chars {
            self.hide();
            return SuggestionOutcome::Cleared;
        }

        let seq = self.next_sequence();

        if !self.settings.debounce.is_zero() {
            tokio::time::sleep(self.settings.debounce).await;
        }
        if !self.is_latest(seq) {
            debug!(seq, "Query superseded during debounce");
            return SuggestionOutcome::Superseded;
        }

        let places = match self.geocoder.search(query).await {
            Ok(places) => places,
            Err(e) => {
                warn!(error = %e, "Suggestion lookup failed");
                let mut rows = self.rows.lock();
                if self.is_latest(seq) && !rows.is_empty() {
                    rows.clear();
                    self.view.apply(ViewUpdate::SuggestionsHidden);
                }
                return SuggestionOutcome::Failed;
            },
        };

        let items: Vec<PlaceResult> = places.into_iter().take(self.settings.max_rows).collect();
        let mut rows = self.rows.lock();
        if !self.is_latest(seq) {
            debug!(seq, "Discarding stale suggestion response");
            return SuggestionOutcome::Superseded;
        }

        let count = items.len();
        rows.clone_from(&items);
        self.view.apply(ViewUpdate::Suggestions { items });
        debug!(seq, count, "Suggestions shown");
        SuggestionOutcome::Shown(count)
    }

    /// A row was clicked: clear the list, place the marker and show the place
    #[instrument(skip(self, place), fields(place = %place.display_name))]
    pub fn on_suggestion_selected(&self, place: PlaceResult) {
        self.hide();
        self.marker.place(place.coordinate, true);
        self.popup.show(place);
    }

    /// A click outside the list hides it
    pub fn on_outside_click(&self) {
        self.hide();
    }

    /// Clear the rows and drop any response still in flight
    pub fn hide(&self) {
        self.next_sequence();
        self.rows.lock().clear();
        self.view.apply(ViewUpdate::SuggestionsHidden);
    }

    /// Rows currently displayed
    pub fn rows(&self) -> Vec<PlaceResult> {
        self.rows.lock().clone()
    }

    /// Active settings
    pub const fn settings(&self) -> &SuggestionSettings {
        &self.settings
    }

    fn next_sequence(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }
}
