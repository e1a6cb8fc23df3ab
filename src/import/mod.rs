use crate::models::geometry::Feature;
use geojson::GeoJson;
use std::path::Path;
use thiserror::Error;

pub mod kml;
mod normalize;
pub mod shapefile;

pub use normalize::normalize;

/// Everything that can go wrong between a user-selected file and a list of
/// features. All variants surface as a status message, never as a crash.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error(
        "unsupported file extension '.{0}'. Supported formats: .kml, .zip (shapefile bundle), .json/.geojson"
    )]
    UnsupportedExtension(String),
    #[error("failed to parse {format} document: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
    #[error("no supported geometry found in the file")]
    EmptyImport,
}

/// Parse an uploaded file into features.
///
/// Dispatch is by file extension, case-insensitive; content sniffing is
/// deliberately not attempted. A zip archive may hold several shapefiles,
/// so every branch hands the normalizer a list of documents.
pub fn import_features(filename: &str, bytes: &[u8]) -> Result<Vec<Feature>, ImportError> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|extension| extension.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let documents = match extension.as_str() {
        "kml" => kml::parse(bytes)?,
        "zip" => shapefile::parse_archive(bytes)?,
        "json" | "geojson" => vec![parse_geojson(bytes)?],
        other => return Err(ImportError::UnsupportedExtension(other.to_string())),
    };

    normalize(&documents)
}

fn parse_geojson(bytes: &[u8]) -> Result<GeoJson, ImportError> {
    let text = std::str::from_utf8(bytes).map_err(|err| ImportError::Parse {
        format: "GeoJSON",
        message: err.to_string(),
    })?;
    text.parse().map_err(|err: geojson::Error| ImportError::Parse {
        format: "GeoJSON",
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::geometry::{FeatureKind, LatLng};

    #[test]
    fn test_geojson_point_roundtrip() {
        let bytes = br#"{"type":"Point","coordinates":[-44.37,-2.57]}"#;
        let features = import_features("sede.geojson", bytes).unwrap();
        assert_eq!(features, vec![Feature::Marker(LatLng::new(-2.57, -44.37))]);
    }

    #[test]
    fn test_extension_dispatch_is_case_insensitive() {
        let bytes = br#"{"type":"Point","coordinates":[-44.37,-2.57]}"#;
        let features = import_features("SEDE.GeoJSON", bytes).unwrap();
        assert_eq!(features[0].kind(), FeatureKind::Marker);
    }

    #[test]
    fn test_unsupported_extension_names_supported_set() {
        let err = import_features("limits.shp", b"whatever").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'.shp'"), "got: {message}");
        assert!(message.contains(".kml"));
        assert!(message.contains(".zip"));
        assert!(message.contains(".geojson"));
    }

    #[test]
    fn test_missing_extension_is_unsupported() {
        assert!(matches!(
            import_features("noextension", b"{}"),
            Err(ImportError::UnsupportedExtension(_))
        ));
    }

    #[test]
    fn test_invalid_json_is_a_parse_error() {
        let err = import_features("broken.json", b"not json at all").unwrap_err();
        assert!(matches!(err, ImportError::Parse { format: "GeoJSON", .. }));
    }
}
