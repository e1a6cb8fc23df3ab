use super::ImportError;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry};
use kml::Kml;

/// Parse a KML document into a single GeoJSON feature collection.
///
/// The KML tree (folders, placemarks, multi-geometries) is collapsed with
/// `quick_collection`; each collected geometry becomes one GeoJSON feature
/// so the normalizer sees the same shape for every input format.
pub fn parse(bytes: &[u8]) -> Result<Vec<GeoJson>, ImportError> {
    let text = std::str::from_utf8(bytes).map_err(parse_error)?;
    let document: Kml = text.parse().map_err(parse_error)?;
    let collection = kml::quick_collection(document).map_err(parse_error)?;

    let features = collection
        .0
        .iter()
        .map(|geometry| Feature {
            bbox: None,
            geometry: Some(Geometry::new(geojson::Value::from(geometry))),
            id: None,
            properties: None,
            foreign_members: None,
        })
        .collect();

    Ok(vec![GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })])
}

fn parse_error<E: std::fmt::Display>(err: E) -> ImportError {
    ImportError::Parse {
        format: "KML",
        message: err.to_string(),
    }
}
