//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod nominatim_geocoding_adapter;

pub use nominatim_geocoding_adapter::NominatimGeocodingAdapter;
