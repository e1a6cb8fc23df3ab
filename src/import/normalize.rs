use super::ImportError;
use crate::models::geometry::{Feature, LatLng};
use geojson::{GeoJson, Geometry, Value};

/// Flatten parsed GeoJSON documents into the model's feature list.
///
/// Encounter order is preserved. Entries without a geometry, malformed
/// positions and geometry kinds the model cannot carry are skipped; the
/// only raised error is `EmptyImport`, when nothing usable was left.
pub fn normalize(documents: &[GeoJson]) -> Result<Vec<Feature>, ImportError> {
    let mut features = Vec::new();
    for document in documents {
        match document {
            GeoJson::FeatureCollection(collection) => {
                for feature in &collection.features {
                    if let Some(geometry) = &feature.geometry {
                        convert_geometry(geometry, &mut features);
                    }
                }
            }
            GeoJson::Feature(feature) => {
                if let Some(geometry) = &feature.geometry {
                    convert_geometry(geometry, &mut features);
                }
            }
            GeoJson::Geometry(geometry) => convert_geometry(geometry, &mut features),
        }
    }

    if features.is_empty() {
        return Err(ImportError::EmptyImport);
    }
    Ok(features)
}

fn convert_geometry(geometry: &Geometry, out: &mut Vec<Feature>) {
    match &geometry.value {
        Value::Point(position) => {
            if let Some(point) = LatLng::from_position(position) {
                out.push(Feature::Marker(point));
            }
        }
        Value::LineString(positions) => {
            let path = transpose_path(positions);
            if path.len() >= 2 {
                out.push(Feature::Polyline(path));
            }
        }
        Value::Polygon(rings) => {
            if let Some(rings) = transpose_rings(rings) {
                out.push(Feature::Polygon(rings));
            }
        }
        Value::MultiPolygon(polygons) => {
            // Each constituent polygon becomes its own independent feature.
            for rings in polygons {
                if let Some(rings) = transpose_rings(rings) {
                    out.push(Feature::Polygon(rings));
                }
            }
        }
        // MultiPoint, MultiLineString and GeometryCollection have no
        // counterpart in the layer model.
        _ => {}
    }
}

fn transpose_path(positions: &[Vec<f64>]) -> Vec<LatLng> {
    positions
        .iter()
        .filter_map(|position| LatLng::from_position(position))
        .collect()
}

fn transpose_rings(rings: &[Vec<Vec<f64>>]) -> Option<Vec<Vec<LatLng>>> {
    let mut out = Vec::with_capacity(rings.len());
    for (index, ring) in rings.iter().enumerate() {
        let ring = transpose_path(ring);
        if ring.len() < 3 {
            // A degenerate outer ring invalidates the whole polygon; a
            // degenerate hole is just dropped.
            if index == 0 {
                return None;
            }
            continue;
        }
        out.push(ring);
    }
    if out.is_empty() { None } else { Some(out) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::geometry::FeatureKind;

    fn parse(json: &str) -> GeoJson {
        json.parse().unwrap()
    }

    #[test]
    fn test_single_point_becomes_marker() {
        let doc = parse(r#"{"type":"Point","coordinates":[-44.37,-2.57]}"#);
        let features = normalize(&[doc]).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(
            features[0],
            Feature::Marker(LatLng::new(-2.57, -44.37))
        );
        assert_eq!(features[0].kind(), FeatureKind::Marker);
    }

    #[test]
    fn test_single_ring_polygon_preserves_order_and_transposes() {
        let doc = parse(
            r#"{"type":"Polygon","coordinates":[[[-44.38,-2.55],[-44.36,-2.555],[-44.355,-2.58],[-44.38,-2.55]]]}"#,
        );
        let features = normalize(&[doc]).unwrap();
        assert_eq!(features.len(), 1);
        let Feature::Polygon(rings) = &features[0] else {
            panic!("expected polygon, got {:?}", features[0]);
        };
        assert_eq!(rings.len(), 1);
        assert_eq!(
            rings[0],
            vec![
                LatLng::new(-2.55, -44.38),
                LatLng::new(-2.555, -44.36),
                LatLng::new(-2.58, -44.355),
                LatLng::new(-2.55, -44.38),
            ]
        );
    }

    #[test]
    fn test_polygon_keeps_hole_rings_in_order() {
        let doc = parse(
            r#"{"type":"Polygon","coordinates":[
                [[0.0,0.0],[10.0,0.0],[10.0,10.0],[0.0,10.0],[0.0,0.0]],
                [[2.0,2.0],[4.0,2.0],[4.0,4.0],[2.0,2.0]]
            ]}"#,
        );
        let features = normalize(&[doc]).unwrap();
        let Feature::Polygon(rings) = &features[0] else {
            panic!("expected polygon");
        };
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[0][1], LatLng::new(0.0, 10.0));
        assert_eq!(rings[1][0], LatLng::new(2.0, 2.0));
    }

    #[test]
    fn test_multipolygon_flattens_to_independent_features() {
        let doc = parse(
            r#"{"type":"MultiPolygon","coordinates":[
                [[[0.0,0.0],[1.0,0.0],[1.0,1.0],[0.0,0.0]]],
                [[[5.0,5.0],[6.0,5.0],[6.0,6.0],[5.0,5.0]]],
                [[[9.0,9.0],[9.5,9.0],[9.5,9.5],[9.0,9.0]]]
            ]}"#,
        );
        let features = normalize(&[doc]).unwrap();
        assert_eq!(features.len(), 3);
        let rings: Vec<_> = features
            .iter()
            .map(|feature| match feature {
                Feature::Polygon(rings) => rings.clone(),
                other => panic!("expected polygon, got {other:?}"),
            })
            .collect();
        assert_ne!(rings[0], rings[1]);
        assert_ne!(rings[1], rings[2]);
    }

    #[test]
    fn test_line_string_becomes_polyline() {
        let doc = parse(
            r#"{"type":"Feature","geometry":{"type":"LineString","coordinates":[[-44.34,-2.585],[-44.33,-2.58],[-44.335,-2.575]]},"properties":{}}"#,
        );
        let features = normalize(&[doc]).unwrap();
        assert_eq!(
            features[0],
            Feature::Polyline(vec![
                LatLng::new(-2.585, -44.34),
                LatLng::new(-2.58, -44.33),
                LatLng::new(-2.575, -44.335),
            ])
        );
    }

    #[test]
    fn test_empty_collection_fails_with_empty_import() {
        let doc = parse(r#"{"type":"FeatureCollection","features":[]}"#);
        let err = normalize(&[doc]).unwrap_err();
        assert!(matches!(err, ImportError::EmptyImport));
    }

    #[test]
    fn test_unsupported_geometries_are_skipped_not_fatal() {
        let doc = parse(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":{"type":"MultiPoint","coordinates":[[1.0,2.0]]},"properties":{}},
                {"type":"Feature","geometry":null,"properties":{}},
                {"type":"Feature","geometry":{"type":"Point","coordinates":[-44.37,-2.57]},"properties":{}}
            ]}"#,
        );
        let features = normalize(&[doc]).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].kind(), FeatureKind::Marker);
    }

    #[test]
    fn test_only_unsupported_geometries_is_empty_import() {
        let doc = parse(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":{"type":"MultiPoint","coordinates":[[1.0,2.0]]},"properties":{}}
            ]}"#,
        );
        assert!(matches!(
            normalize(&[doc]),
            Err(ImportError::EmptyImport)
        ));
    }

    #[test]
    fn test_degenerate_outer_ring_drops_polygon() {
        let doc = parse(
            r#"{"type":"FeatureCollection","features":[
                {"type":"Feature","geometry":{"type":"Polygon","coordinates":[[[0.0,0.0],[1.0,1.0]]]},"properties":{}},
                {"type":"Feature","geometry":{"type":"Point","coordinates":[0.0,0.0]},"properties":{}}
            ]}"#,
        );
        let features = normalize(&[doc]).unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].kind(), FeatureKind::Marker);
    }

    #[test]
    fn test_multiple_documents_flatten_in_encounter_order() {
        let first = parse(r#"{"type":"Point","coordinates":[1.0,2.0]}"#);
        let second = parse(r#"{"type":"Point","coordinates":[3.0,4.0]}"#);
        let features = normalize(&[first, second]).unwrap();
        assert_eq!(
            features,
            vec![
                Feature::Marker(LatLng::new(2.0, 1.0)),
                Feature::Marker(LatLng::new(4.0, 3.0)),
            ]
        );
    }
}
