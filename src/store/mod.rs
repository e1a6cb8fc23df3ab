use crate::models::layer::Layer;
use std::sync::Arc;

mod persistence;

pub use persistence::{JsonFileStore, LayerPersistence, STORAGE_KEY};

/// Ordered collection of layers: the built-in set first, user-imported
/// custom layers after. There is exactly one logical writer (the request
/// task holding the server's store lock), so no internal locking happens
/// here.
pub struct LayerStore {
    layers: Vec<Layer>,
    backend: Arc<dyn LayerPersistence>,
}

impl LayerStore {
    /// Build the store, awaiting the one-shot persistence read and merging
    /// trusted custom records after the built-in list. A failed read is
    /// logged and falls back to built-ins only.
    pub async fn load(builtin: Vec<Layer>, backend: Arc<dyn LayerPersistence>) -> Self {
        let mut layers = builtin;
        match backend.load().await {
            Ok(saved) => {
                // Only ids carrying the custom prefix are trusted; anything
                // else in the file is foreign or corrupted data.
                layers.extend(saved.into_iter().filter(Layer::is_custom));
            }
            Err(err) => eprintln!("⚠️ Failed to load saved layers: {err}"),
        }
        LayerStore { layers, backend }
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn visible_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|layer| layer.visible)
    }

    /// Flip visibility on the matching layer; unknown ids are a no-op.
    pub fn toggle_visibility(&mut self, id: &str) {
        if let Some(layer) = self.layers.iter_mut().find(|layer| layer.id == id) {
            layer.visible = !layer.visible;
            self.persist_custom();
        }
    }

    /// Append a layer. Ids are caller-supplied; uniqueness is the caller's
    /// contract and is not checked here.
    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
        self.persist_custom();
    }

    /// Remove the first layer with the given id; unknown ids are a no-op.
    pub fn remove_layer(&mut self, id: &str) {
        if let Some(position) = self.layers.iter().position(|layer| layer.id == id) {
            self.layers.remove(position);
            self.persist_custom();
        }
    }

    /// Write the current custom subset to the backend without blocking the
    /// caller. A failed write is logged and never rolls back the in-memory
    /// state; rapid successive writes are last-write-wins at the key.
    fn persist_custom(&self) {
        let custom: Vec<Layer> = self
            .layers
            .iter()
            .filter(|layer| layer.is_custom())
            .cloned()
            .collect();
        let backend = Arc::clone(&self.backend);
        tokio::spawn(async move {
            if let Err(err) = backend.save(&custom).await {
                eprintln!("⚠️ Failed to persist custom layers: {err}");
            }
        });
    }
}
