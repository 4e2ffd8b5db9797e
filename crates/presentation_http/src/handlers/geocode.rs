//! Stateless geocoding endpoints

use axum::{Json, extract::State};
use domain::{Coordinate, PlaceResult};
use serde::Deserialize;
use tracing::instrument;

use crate::{error::ApiError, middleware::ApiQuery, state::AppState};

/// Forward lookup parameters
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Reverse lookup parameters
#[derive(Debug, Deserialize)]
pub struct ReverseParams {
    pub lat: f64,
    pub lon: f64,
}

/// Places matching a free-text query
#[instrument(skip(state, params), fields(query_len = params.q.len()))]
pub async fn search(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<SearchParams>,
) -> Result<Json<Vec<PlaceResult>>, ApiError> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest(
            "Query parameter 'q' must not be empty".to_string(),
        ));
    }

    Ok(Json(state.geocoder.search(query).await?))
}

/// Name of the place at a coordinate
#[instrument(skip(state))]
pub async fn reverse(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ReverseParams>,
) -> Result<Json<PlaceResult>, ApiError> {
    let coordinate =
        Coordinate::new(params.lat, params.lon).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    Ok(Json(state.geocoder.reverse_geocode(coordinate).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_params_default_to_empty_query() {
        let params: SearchParams = serde_json::from_str("{}").unwrap();
        assert!(params.q.is_empty());
    }

    #[test]
    fn reverse_params_deserialization() {
        let params: ReverseParams = serde_json::from_str(r#"{"lat": 48.85, "lon": 2.35}"#).unwrap();
        assert!((params.lat - 48.85).abs() < f64::EPSILON);
    }
}
