//! Domain layer for GeoView
//!
//! Contains the map viewer's value objects, entities and domain errors.
//! This layer performs no I/O and defines the ubiquitous language:
//! coordinates, places, the marker, the popup and the viewport.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
