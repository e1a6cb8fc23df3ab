use crate::assistant::AssistantClient;
use crate::config::Config;
use crate::endpoints::handlers::{
    assistant_handler, delete_layer, get_all_layers, toggle_layer, upload_layer, webmap_handler,
};
use crate::import::{self, ImportError};
use crate::models::layer::Layer;
use crate::store::{JsonFileStore, LayerStore};
use crate::utils::summary::print_layer_summary;
use axum::{
    Router,
    routing::{delete, get, post},
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use walkdir::WalkDir;

pub struct AppState {
    pub store: Mutex<LayerStore>,
    pub assistant: Option<AssistantClient>,
}

pub struct DashboardServer {
    config: Config,
    state: AppState,
}

impl DashboardServer {
    /// Build the server state: seed layers, the optional data-folder scan,
    /// then the awaited persistence read that merges saved custom layers.
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let mut builtin = crate::seed::seed_layers();
        if let Some(folder) = &config.data_folder {
            builtin.extend(scan_data_folder(folder));
        }

        let backend = Arc::new(JsonFileStore::new(&config.storage_folder));
        let store = LayerStore::load(builtin, backend).await;
        print_layer_summary(store.layers());

        let assistant = config
            .api_key
            .clone()
            .map(|key| AssistantClient::new(key, config.assistant_model.clone()));

        Ok(Self {
            config,
            state: AppState {
                store: Mutex::new(store),
                assistant,
            },
        })
    }

    pub async fn start(self) -> anyhow::Result<()> {
        let assistant_enabled = self.state.assistant.is_some();
        let state = Arc::new(self.state);
        let app = Router::new()
            .route("/", get(webmap_handler))
            .route("/layers", get(get_all_layers).post(upload_layer))
            .route("/layers/{id}/toggle", post(toggle_layer))
            .route("/layers/{id}", delete(delete_layer))
            .route("/assistant", post(assistant_handler))
            .with_state(state);

        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let listener = tokio::net::TcpListener::bind(addr).await?;

        println!(
            r#"
    🚢 portmap serving on {}

    🗺️ Dashboard
       → http://{}/

    📚 Query all layers (JSON)
       → http://{}/layers
            "#,
            addr, addr, addr
        );
        if !assistant_enabled {
            println!("    ⚠️ No API key provided; POST /assistant is disabled.");
        }

        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Walk the data folder for importable vector files; each one becomes an
/// extra built-in layer. Files the importer cannot digest are skipped with
/// a warning, non-vector files silently.
fn scan_data_folder(folder: &Path) -> Vec<Layer> {
    let mut layers = Vec::new();
    for entry in WalkDir::new(folder).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(filename) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        let stem = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("layer");

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                eprintln!("⚠️ Failed to read '{}': {}", path.display(), err);
                continue;
            }
        };

        match import::import_features(filename, &bytes) {
            Ok(features) => layers.push(Layer::from_features(
                format!("builtin-{stem}"),
                stem,
                format!("Loaded from {filename}"),
                "#3b82f6",
                features,
            )),
            Err(ImportError::UnsupportedExtension(_)) => {}
            Err(err) => eprintln!("⚠️ Skipping '{}': {}", filename, err),
        }
    }
    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::geometry::FeatureKind;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_scan_data_folder_loads_vector_files_and_skips_the_rest() {
        let dir = TempDir::new().unwrap();
        let mut geojson = std::fs::File::create(dir.path().join("berths.geojson")).unwrap();
        geojson
            .write_all(br#"{"type":"Point","coordinates":[-44.37,-2.57]}"#)
            .unwrap();
        std::fs::File::create(dir.path().join("notes.txt"))
            .unwrap()
            .write_all(b"not geodata")
            .unwrap();

        let layers = scan_data_folder(dir.path());
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].id, "builtin-berths");
        assert_eq!(layers[0].kind, FeatureKind::Marker);
        assert!(!layers[0].is_custom());
    }

    #[test]
    fn test_scan_data_folder_warns_but_continues_on_bad_vector_file() {
        let dir = TempDir::new().unwrap();
        std::fs::File::create(dir.path().join("broken.geojson"))
            .unwrap()
            .write_all(b"not json")
            .unwrap();
        let mut good = std::fs::File::create(dir.path().join("good.geojson")).unwrap();
        good.write_all(br#"{"type":"Point","coordinates":[-44.0,-2.5]}"#)
            .unwrap();

        let layers = scan_data_folder(dir.path());
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].id, "builtin-good");
    }
}
