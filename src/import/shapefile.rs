use super::ImportError;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry};
use std::io::{Cursor, Read};

/// Extract every shapefile from a zip archive, each into its own GeoJSON
/// document.
///
/// A shapefile ships as .shp/.shx/.dbf siblings, but only the .shp member
/// carries geometry, so that is all we pull out of the archive. Raw .shp
/// uploads are rejected upstream; the zip is the supported bundle format.
pub fn parse_archive(bytes: &[u8]) -> Result<Vec<GeoJson>, ImportError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(parse_error)?;

    let mut documents = Vec::new();
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(parse_error)?;
        if !entry.name().to_ascii_lowercase().ends_with(".shp") {
            continue;
        }
        let mut contents = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut contents).map_err(parse_error)?;
        documents.push(parse_shp(&contents)?);
    }

    if documents.is_empty() {
        return Err(ImportError::Parse {
            format: "Shapefile",
            message: "archive contains no .shp entry (expected a zipped .shp/.shx/.dbf bundle)"
                .to_string(),
        });
    }
    Ok(documents)
}

fn parse_shp(bytes: &[u8]) -> Result<GeoJson, ImportError> {
    let reader = shapefile::ShapeReader::new(Cursor::new(bytes)).map_err(parse_error)?;
    let shapes = reader.read().map_err(parse_error)?;

    let mut features = Vec::new();
    for shape in shapes {
        // Null shapes and kinds the geo ecosystem cannot represent
        // (Multipatch and friends) are skipped, not fatal.
        let Ok(geometry) = geo_types::Geometry::<f64>::try_from(shape) else {
            continue;
        };
        features.push(Feature {
            bbox: None,
            geometry: Some(Geometry::new(geojson::Value::from(&geometry))),
            id: None,
            properties: None,
            foreign_members: None,
        });
    }

    Ok(GeoJson::FeatureCollection(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }))
}

fn parse_error<E: std::fmt::Display>(err: E) -> ImportError {
    ImportError::Parse {
        format: "Shapefile",
        message: err.to_string(),
    }
}
