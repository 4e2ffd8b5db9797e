//! Domain entities - Objects with state owned by a single map session

mod marker;
mod place;
mod popup;

pub use marker::{MarkerPlacement, MarkerState};
pub use place::{PlaceResult, UNKNOWN_LOCATION};
pub use popup::{PopupContent, PopupState};
