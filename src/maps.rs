// src/maps.rs

use crate::errors::{Result, SuggestionError};
use url::Url;

const GOOGLE_MAPS_DIR: &str = "https://www.google.com/maps/dir/";

/// Directions link from the CARES property to the eviction address.
///
/// The backend reports points as `[lon, lat]`; Google expects `lat,lon`.
pub fn directions_url(origin: [f64; 2], destination: [f64; 2]) -> Result<Url> {
    let base = Url::parse(GOOGLE_MAPS_DIR).map_err(|e| SuggestionError::Config(e.to_string()))?;

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| SuggestionError::Config(format!("{base} cannot carry a path")))?
        .pop_if_empty()
        .push(&lat_lon(origin))
        .push(&lat_lon(destination))
        .push("");

    Ok(url)
}

fn lat_lon([lon, lat]: [f64; 2]) -> String {
    format!("{lat},{lon}")
}
