//! Application services - Use case implementations

mod map_session;
mod map_surface;
mod marker_controller;
mod popup_presenter;
mod suggestion_list;

#[cfg(test)]
pub(crate) mod test_support;

pub use map_session::{MapSession, MapSessionConfig, SearchOutcome};
pub use map_surface::{MapClickHandler, MapSurface};
pub use marker_controller::{FlyToSettings, MarkerController};
pub use popup_presenter::PopupPresenter;
pub use suggestion_list::{
    MAX_SUGGESTION_ROWS, MIN_QUERY_CHARS, SuggestionList, SuggestionOutcome, SuggestionSettings,
};
