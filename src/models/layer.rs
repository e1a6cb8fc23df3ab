use crate::models::geometry::{Feature, FeatureKind};
use serde::{Deserialize, Serialize};

/// Id prefix marking a user-imported layer. Persistence and the startup
/// revalidation key off this prefix alone, so seed ids must never use it.
pub const CUSTOM_PREFIX: &str = "custom-";

/// Popup content shown when a layer's geometry is clicked on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDetails {
    pub title: String,
    pub content: String,
}

/// A named, styleable, independently toggleable collection of features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Dominant kind: the kind of the first feature. Kept for clients that
    /// only care what a layer mostly is.
    #[serde(rename = "type")]
    pub kind: FeatureKind,
    pub visible: bool,
    pub color: String,
    pub features: Vec<Feature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<LayerDetails>,
}

impl Layer {
    /// Build a visible layer from normalized features. The import path
    /// guarantees `features` is non-empty.
    pub fn from_features(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        color: impl Into<String>,
        features: Vec<Feature>,
    ) -> Self {
        let kind = features
            .first()
            .map(Feature::kind)
            .unwrap_or(FeatureKind::Marker);
        Layer {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            kind,
            visible: true,
            color: color.into(),
            features,
            details: None,
        }
    }

    pub fn is_custom(&self) -> bool {
        self.id.starts_with(CUSTOM_PREFIX)
    }
}
