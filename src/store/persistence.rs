use crate::models::geometry::{Feature, LatLng};
use crate::models::layer::Layer;
use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// File name acting as the single storage key for the custom layer set.
pub const STORAGE_KEY: &str = "custom-map-layers.json";

/// Where the custom layer subset lives between sessions. The stored value
/// is always the complete current set, overwritten on every change; an
/// empty set stores an empty array rather than deleting the key.
#[async_trait]
pub trait LayerPersistence: Send + Sync {
    async fn load(&self) -> anyhow::Result<Vec<Layer>>;
    async fn save(&self, layers: &[Layer]) -> anyhow::Result<()>;
}

/// JSON-file backend under a fixed key file in the storage folder.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(folder: impl AsRef<Path>) -> Self {
        JsonFileStore {
            path: folder.as_ref().join(STORAGE_KEY),
        }
    }
}

#[async_trait]
impl LayerPersistence for JsonFileStore {
    async fn load(&self) -> anyhow::Result<Vec<Layer>> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        let records: Vec<Value> = serde_json::from_slice(&contents)?;
        Ok(records.into_iter().filter_map(migrate_record).collect())
    }

    async fn save(&self, layers: &[Layer]) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let contents = serde_json::to_vec_pretty(layers)?;
        tokio::fs::write(&self.path, contents).await?;
        Ok(())
    }
}

/// One-time upgrade for records written by the previous dashboard, which
/// stored a loosely-typed `data` field instead of tagged features. Records
/// that cannot be represented any more (the retired HEATMAP kind, corrupt
/// payloads) are dropped.
fn migrate_record(mut record: Value) -> Option<Layer> {
    let object = record.as_object_mut()?;
    if !object.contains_key("features") {
        let kind = object.get("type")?.as_str()?.to_string();
        let data = object.remove("data")?;
        let features = match kind.as_str() {
            "MARKER" => vec![Feature::Marker(serde_json::from_value(data).ok()?)],
            "POLYLINE" => vec![Feature::Polyline(serde_json::from_value(data).ok()?)],
            "POLYGON" => {
                let ring: Vec<LatLng> = serde_json::from_value(data).ok()?;
                vec![Feature::Polygon(vec![ring])]
            }
            _ => return None,
        };
        object.insert("features".to_string(), serde_json::to_value(features).ok()?);
    }
    serde_json::from_value(record).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::geometry::FeatureKind;
    use tempfile::TempDir;

    fn sample_layer(id: &str) -> Layer {
        Layer::from_features(
            id,
            "Área de Expansão",
            "Camada importada pelo usuário",
            "#3b82f6",
            vec![Feature::Marker(LatLng::new(-2.57, -44.37))],
        )
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());
        let layers = vec![sample_layer("custom-1"), sample_layer("custom-2")];

        store.save(&layers).await.unwrap();
        assert_eq!(store.load().await.unwrap(), layers);
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_value() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        store
            .save(&[sample_layer("custom-1"), sample_layer("custom-2")])
            .await
            .unwrap();
        store.save(&[sample_layer("custom-3")]).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "custom-3");
    }

    #[tokio::test]
    async fn test_empty_set_saves_empty_array_not_missing_key() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path());

        store.save(&[sample_layer("custom-1")]).await.unwrap();
        store.save(&[]).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join(STORAGE_KEY)).unwrap();
        assert_eq!(raw.trim(), "[]");
        assert!(store.load().await.unwrap().is_empty());
    }

    #[test]
    fn test_legacy_marker_record_migrates_to_features() {
        let record = serde_json::json!({
            "id": "custom-1700000000000",
            "name": "Sede",
            "description": "",
            "type": "MARKER",
            "visible": true,
            "color": "#3b82f6",
            "data": { "lat": -2.57, "lng": -44.37 }
        });
        let layer = migrate_record(record).unwrap();
        assert_eq!(layer.kind, FeatureKind::Marker);
        assert_eq!(
            layer.features,
            vec![Feature::Marker(LatLng::new(-2.57, -44.37))]
        );
    }

    #[test]
    fn test_legacy_polygon_record_becomes_single_ring_polygon() {
        let record = serde_json::json!({
            "id": "custom-1",
            "name": "Poligonal",
            "description": "",
            "type": "POLYGON",
            "visible": false,
            "color": "#ef4444",
            "data": [
                { "lat": -2.55, "lng": -44.38 },
                { "lat": -2.555, "lng": -44.36 },
                { "lat": -2.58, "lng": -44.355 }
            ]
        });
        let layer = migrate_record(record).unwrap();
        assert!(!layer.visible);
        let Feature::Polygon(rings) = &layer.features[0] else {
            panic!("expected polygon");
        };
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].len(), 3);
    }

    #[test]
    fn test_legacy_heatmap_record_is_dropped() {
        let record = serde_json::json!({
            "id": "custom-1",
            "name": "Calor",
            "description": "",
            "type": "HEATMAP",
            "visible": true,
            "color": "#fff",
            "data": []
        });
        assert!(migrate_record(record).is_none());
    }

    #[test]
    fn test_new_format_record_passes_through_unchanged() {
        let layer = sample_layer("custom-9");
        let record = serde_json::to_value(&layer).unwrap();
        assert_eq!(migrate_record(record).unwrap(), layer);
    }
}
