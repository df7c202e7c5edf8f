//! HTTP request handlers

pub mod contact;
pub mod health;
pub mod stops;
pub mod trips;

use domain::GeoLocation;

use crate::error::ApiError;

/// Optional caller position from `lat`/`lon` query parameters
///
/// Both or neither must be present.
pub(crate) fn optional_position(
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Result<Option<GeoLocation>, ApiError> {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => GeoLocation::new(lat, lon)
            .map(Some)
            .map_err(|_| ApiError::BadRequest("Ogiltiga koordinater".to_string())),
        (None, None) => Ok(None),
        _ => Err(ApiError::BadRequest(
            "Både lat och lon måste anges".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_requires_both_coordinates() {
        assert!(optional_position(None, None).unwrap().is_none());
        assert!(optional_position(Some(59.3), Some(18.0)).unwrap().is_some());
        assert!(optional_position(Some(59.3), None).is_err());
        assert!(optional_position(Some(100.0), Some(18.0)).is_err());
    }
}
