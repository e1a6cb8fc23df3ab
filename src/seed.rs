use crate::models::geometry::{Feature, LatLng};
use crate::models::layer::{Layer, LayerDetails};

/// Default map view, centred on the terminal operations area.
pub const MAP_CENTER: LatLng = LatLng {
    lat: -2.570,
    lng: -44.370,
};
pub const ZOOM_LEVEL: u8 = 14;

/// The built-in layer set: constructed once at startup, never persisted,
/// never removable. Ids are namespaced `layer-*` so they can never collide
/// with the `custom-` prefix the persistence path trusts.
pub fn seed_layers() -> Vec<Layer> {
    vec![
        polygon_layer(
            "layer-poligonal",
            "Poligonal do Porto (Oficial)",
            "Área delimitada oficial do Porto do Itaqui.",
            "#ef4444",
            vec![
                LatLng::new(-2.550, -44.380),
                LatLng::new(-2.555, -44.360),
                LatLng::new(-2.580, -44.355),
                LatLng::new(-2.590, -44.370),
                LatLng::new(-2.580, -44.390),
                LatLng::new(-2.550, -44.380),
            ],
            true,
            "Poligonal Oficial",
            "Limite administrativo e operacional da EMAP (Empresa Maranhense de Administração Portuária).",
        ),
        polygon_layer(
            "layer-mangue",
            "Zona de Amortecimento (Manguezal)",
            "Áreas de preservação ambiental no entorno.",
            "#22c55e",
            vec![
                LatLng::new(-2.590, -44.370),
                LatLng::new(-2.600, -44.360),
                LatLng::new(-2.610, -44.380),
                LatLng::new(-2.600, -44.395),
                LatLng::new(-2.590, -44.370),
            ],
            true,
            "Área de Preservação",
            "Ecossistema de manguezal vital para a biodiversidade local e proteção da linha costeira.",
        ),
        polygon_layer(
            "layer-community",
            "Comunidade Vila Maranhão",
            "Área residencial próxima à zona portuária.",
            "#eab308",
            vec![
                LatLng::new(-2.580, -44.355),
                LatLng::new(-2.585, -44.340),
                LatLng::new(-2.595, -44.345),
                LatLng::new(-2.590, -44.360),
            ],
            true,
            "Vila Maranhão",
            "Comunidade histórica impactada pela logística portuária. Foco de projetos de responsabilidade social.",
        ),
        {
            let mut layer = Layer::from_features(
                "layer-marker-main",
                "Sede Administrativa EMAP",
                "Centro de controle do porto.",
                "#3b82f6",
                vec![Feature::Marker(MAP_CENTER)],
            );
            layer.details = Some(LayerDetails {
                title: "Sede EMAP".to_string(),
                content: "Centro administrativo e operacional do Porto do Itaqui.".to_string(),
            });
            layer
        },
        polygon_layer(
            "layer-access",
            "Acesso Ferroviário",
            "Linha férrea de transporte de minério e grãos.",
            "#a855f7",
            vec![
                LatLng::new(-2.585, -44.340),
                LatLng::new(-2.580, -44.330),
                LatLng::new(-2.575, -44.335),
                LatLng::new(-2.580, -44.345),
            ],
            false,
            "Ramal Ferroviário",
            "Conexão crítica para exportação de commodities.",
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn polygon_layer(
    id: &str,
    name: &str,
    description: &str,
    color: &str,
    ring: Vec<LatLng>,
    visible: bool,
    title: &str,
    content: &str,
) -> Layer {
    let mut layer = Layer::from_features(
        id,
        name,
        description,
        color,
        vec![Feature::Polygon(vec![ring])],
    );
    layer.visible = visible;
    layer.details = Some(LayerDetails {
        title: title.to_string(),
        content: content.to_string(),
    });
    layer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::geometry::FeatureKind;

    #[test]
    fn test_seed_layers_are_never_custom() {
        let layers = seed_layers();
        assert_eq!(layers.len(), 5);
        assert!(layers.iter().all(|layer| !layer.is_custom()));
        assert!(layers.iter().all(|layer| !layer.features.is_empty()));
    }

    #[test]
    fn test_rail_access_starts_hidden() {
        let layers = seed_layers();
        let access = layers.iter().find(|l| l.id == "layer-access").unwrap();
        assert!(!access.visible);
    }

    #[test]
    fn test_headquarters_is_a_marker_at_map_center() {
        let layers = seed_layers();
        let hq = layers.iter().find(|l| l.id == "layer-marker-main").unwrap();
        assert_eq!(hq.kind, FeatureKind::Marker);
        assert_eq!(hq.features, vec![Feature::Marker(MAP_CENTER)]);
    }
}
