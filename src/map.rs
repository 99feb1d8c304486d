//! OpenStreetMap viewport derivation.

use crate::catalog::CityEntry;

const LON_SPAN: f64 = 0.15;
const LAT_SPAN: f64 = 0.10;

/// Rectangular viewport centred on a marker point, sized for a
/// city-level view (roughly zoom 12).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    pub lat: f64,
    pub lon: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl MapViewport {
    pub fn around(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            left: lon - LON_SPAN,
            bottom: lat - LAT_SPAN,
            right: lon + LON_SPAN,
            top: lat + LAT_SPAN,
        }
    }

    pub fn for_city(city: &CityEntry) -> Self {
        Self::around(city.lat, city.lon)
    }

    /// URL for the embeddable map frame, marker on the city centre.
    pub fn embed_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/export/embed.html?bbox={},{},{},{}&layer=mapnik&marker={},{}",
            self.left, self.bottom, self.right, self.top, self.lat, self.lon
        )
    }

    /// URL for the full-page map, opened when the user follows the frame.
    pub fn link_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={}&mlon={}#map=12/{}/{}",
            self.lat, self.lon, self.lat, self.lon
        )
    }
}
