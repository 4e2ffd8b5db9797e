//! Map session
//!
//! One session exists per page load. It owns the surface, marker, popup and
//! suggestion list of that page and is the only place where browser events
//! are routed to them.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use domain::{Coordinate, PlaceResult, PopupContent, ScreenPoint, Viewport};
use tracing::{debug, info, instrument, warn};

use super::{
    map_surface::{MapClickHandler, MapSurface},
    marker_controller::{FlyToSettings, MarkerController},
    popup_presenter::PopupPresenter,
    suggestion_list::{SuggestionList, SuggestionSettings},
};
use crate::error::ApplicationError;
use crate::events::MapEvent;
use crate::ports::{AlertKind, GeocodingPort, ViewPort, ViewUpdate};

/// Settings applied to every new session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapSessionConfig {
    /// View shown before the page reports its own
    pub initial_viewport: Viewport,
    /// Camera animation for animated marker placement
    pub fly_to: FlyToSettings,
    /// Suggestion list tuning
    pub suggestions: SuggestionSettings,
}

impl MapSessionConfig {
    /// Default tuning around `initial_viewport`
    pub fn new(initial_viewport: Viewport) -> Self {
        Self {
            initial_viewport,
            fly_to: FlyToSettings::default(),
            suggestions: SuggestionSettings::default(),
        }
    }
}

/// Result of an explicit search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Nothing to search for
    EmptyQuery,
    /// The provider returned no matches
    NoResults,
    /// The first match was placed and shown
    Placed(PlaceResult),
}

/// Reverse-geocodes positions into the popup, newest request wins
struct LocationReveal {
    geocoder: Arc<dyn GeocodingPort>,
    popup: Arc<PopupPresenter>,
    latest: AtomicU64,
}

impl LocationReveal {
    async fn reveal(&self, coordinate: Coordinate) -> Option<PopupContent> {
        let seq = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        match self.geocoder.reverse_geocode(coordinate).await {
            Ok(place) if self.latest.load(Ordering::SeqCst) == seq => Some(self.popup.show(place)),
            Ok(_) => {
                debug!(%coordinate, "Discarding stale reverse geocoding result");
                None
            },
            Err(e) => {
                warn!(error = %e, %coordinate, "Reverse geocoding failed");
                None
            },
        }
    }
}

/// Click handler: mark the spot and describe it
struct PlaceOnClick {
    marker: Arc<MarkerController>,
    reveal: Arc<LocationReveal>,
}

#[async_trait]
impl MapClickHandler for PlaceOnClick {
    async fn on_map_click(&self, coordinate: Coordinate) {
        self.marker.place(coordinate, true);
        self.reveal.reveal(coordinate).await;
    }
}

/// Per-page state and event wiring
pub struct MapSession {
    surface: Arc<MapSurface>,
    marker: Arc<MarkerController>,
    popup: Arc<PopupPresenter>,
    suggestions: SuggestionList,
    reveal: Arc<LocationReveal>,
    geocoder: Arc<dyn GeocodingPort>,
    view: Arc<dyn ViewPort>,
}

impl fmt::Debug for MapSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapSession")
            .field("surface", &self.surface)
            .field("marker", &self.marker)
            .field("popup", &self.popup)
            .field("suggestions", &self.suggestions)
            .finish_non_exhaustive()
    }
}

impl MapSession {
    /// Build a session and register its map click handler
    pub fn new(
        geocoder: Arc<dyn GeocodingPort>,
        view: Arc<dyn ViewPort>,
        config: MapSessionConfig,
    ) -> Self {
        let surface = Arc::new(MapSurface::new(view.clone(), config.initial_viewport));
        let marker = Arc::new(MarkerController::new(
            surface.clone(),
            view.clone(),
            config.fly_to,
        ));
        let popup = Arc::new(PopupPresenter::new(view.clone()));
        let suggestions = SuggestionList::new(
            geocoder.clone(),
            view.clone(),
            marker.clone(),
            popup.clone(),
            config.suggestions,
        );
        let reveal = Arc::new(LocationReveal {
            geocoder: geocoder.clone(),
            popup: popup.clone(),
            latest: AtomicU64::new(0),
        });

        surface.on_click(Arc::new(PlaceOnClick {
            marker: marker.clone(),
            reveal: reveal.clone(),
        }));

        Self {
            surface,
            marker,
            popup,
            suggestions,
            reveal,
            geocoder,
            view,
        }
    }

    /// Route one browser event to its handler
    ///
    /// Only an explicit search can fail; every other event handles its own
    /// errors.
    #[instrument(skip(self, event), fields(event = event.name()))]
    pub async fn handle(&self, event: MapEvent) -> Result<(), ApplicationError> {
        debug!("Handling map event");
        match event {
            MapEvent::QueryChanged { query, seq } => {
                self.suggestions.on_query_issued(&query, seq).await;
            },
            MapEvent::SuggestionSelected { place } => {
                self.suggestions.on_suggestion_selected(place);
            },
            MapEvent::OutsideClicked => self.suggestions.on_outside_click(),
            MapEvent::SearchSubmitted { query } => {
                self.submit_search(&query).await?;
            },
            MapEvent::MapClicked { coordinate } => self.surface.click(coordinate).await,
            MapEvent::IconDragged { x, y } => {
                self.drag_marker(ScreenPoint::new(x, y));
            },
            MapEvent::IconDropped { x, y } => {
                self.drop_marker(ScreenPoint::new(x, y)).await;
            },
            MapEvent::IconPressed => self.popup.hide(),
            MapEvent::ViewportChanged { viewport } => self.surface.update_viewport(viewport),
        }
        Ok(())
    }

    /// Explicit search: place and show the first match
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Network` if the lookup fails. The failure
    /// alert has already been shown.
    #[instrument(skip(self))]
    pub async fn submit_search(&self, query: &str) -> Result<SearchOutcome, ApplicationError> {
        let query = query.trim();
        if query.is_empty() {
            self.view.apply(ViewUpdate::alert(AlertKind::EmptyQuery));
            return Ok(SearchOutcome::EmptyQuery);
        }

        let places = match self.geocoder.search(query).await {
            Ok(places) => places,
            Err(e) => {
                warn!(error = %e, "Search failed");
                self.view.apply(ViewUpdate::alert(AlertKind::Failure));
                return Err(e);
            },
        };

        self.suggestions.hide();
        let Some(first) = places.into_iter().next() else {
            info!("Search returned no results");
            self.view.apply(ViewUpdate::alert(AlertKind::NoResults));
            return Ok(SearchOutcome::NoResults);
        };

        self.marker.place(first.coordinate, true);
        self.popup.show(first.clone());
        Ok(SearchOutcome::Placed(first))
    }

    /// Move the marker to the dragged icon position
    ///
    /// Points with no coordinate leave the marker where it is.
    pub fn drag_marker(&self, point: ScreenPoint) -> Option<Coordinate> {
        let Some(coordinate) = self.surface.screen_point_to_coordinate(point) else {
            warn!(x = point.x, y = point.y, "Ignoring unusable screen point");
            return None;
        };
        self.marker.place(coordinate, false);
        Some(coordinate)
    }

    /// Settle the marker at the drop position and describe it
    pub async fn drop_marker(&self, point: ScreenPoint) -> Option<Coordinate> {
        let coordinate = self.drag_marker(point)?;
        self.reveal.reveal(coordinate).await;
        Some(coordinate)
    }

    /// The session's map surface
    pub fn surface(&self) -> &MapSurface {
        &self.surface
    }

    /// The session's marker
    pub fn marker(&self) -> &MarkerController {
        &self.marker
    }

    /// The session's popup
    pub fn popup(&self) -> &PopupPresenter {
        &self.popup
    }

    /// The session's suggestion list
    pub const fn suggestions(&self) -> &SuggestionList {
        &self.suggestions
    }
}
