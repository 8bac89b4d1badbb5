use serde::Deserialize;

use super::lenient;

/// A named location referenced by `geo.place_id`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Place {
    pub id: String,
    /// e.g. "Manhattan, NY".
    pub full_name: String,

    /// Ids of the places this one is inside of.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub contained_within: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub country: Option<String>,
    /// ISO alpha-2.
    #[serde(default, deserialize_with = "lenient::optional")]
    pub country_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub geo: Option<PlaceGeo>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional")]
    pub place_type: Option<String>,
}

/// GeoJSON bounding box.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaceGeo {
    #[serde(rename = "type")]
    pub kind: String,
    pub bbox: Vec<f64>,
}
