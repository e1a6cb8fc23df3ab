use serde::{Deserialize, Serialize};

/// A latitude-first coordinate pair, the form map providers consume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        LatLng { lat, lng }
    }

    /// Build from a GeoJSON position array. GeoJSON positions are
    /// longitude-first, so every coordinate extracted from an external
    /// document is transposed here before it enters the model.
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [lng, lat, ..] if (-180.0..=180.0).contains(lng) && (-90.0..=90.0).contains(lat) => {
                Some(LatLng { lat: *lat, lng: *lng })
            }
            _ => None,
        }
    }
}

/// One geometric primitive belonging to a layer.
///
/// Serialized as `{"type": ..., "data": ...}`, which is exactly the shape
/// the dashboard page feeds to Leaflet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "UPPERCASE")]
pub enum Feature {
    Marker(LatLng),
    /// An open path of at least two points.
    Polyline(Vec<LatLng>),
    /// One or more rings of at least three points each; ring 0 is the
    /// outer boundary, the rest are holes.
    Polygon(Vec<Vec<LatLng>>),
}

impl Feature {
    pub fn kind(&self) -> FeatureKind {
        match self {
            Feature::Marker(_) => FeatureKind::Marker,
            Feature::Polyline(_) => FeatureKind::Polyline,
            Feature::Polygon(_) => FeatureKind::Polygon,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FeatureKind {
    Marker,
    Polyline,
    Polygon,
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeatureKind::Marker => write!(f, "MARKER"),
            FeatureKind::Polyline => write!(f, "POLYLINE"),
            FeatureKind::Polygon => write!(f, "POLYGON"),
        }
    }
}
