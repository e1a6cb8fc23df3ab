use crate::assistant::{AssistantReply, ChatTurn};
use crate::endpoints::map::INDEX_HTML;
use crate::endpoints::server::AppState;
use crate::import;
use crate::models::layer::{CUSTOM_PREFIX, Layer, LayerDetails};
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use serde::Deserialize;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

pub async fn webmap_handler() -> impl IntoResponse {
    Html(INDEX_HTML)
}

pub async fn get_all_layers(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let store = state.store.lock().await;
    (StatusCode::OK, Json(store.layers().to_vec()))
}

pub async fn toggle_layer(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let mut store = state.store.lock().await;
    store.toggle_visibility(&id);
    StatusCode::NO_CONTENT
}

pub async fn delete_layer(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let mut store = state.store.lock().await;
    store.remove_layer(&id);
    StatusCode::NO_CONTENT
}

/// Multipart upload: a `file` part plus optional `name`, `description` and
/// `color` parts. The whole pipeline (bytes → parser → normalizer) runs
/// inline; the page disables resubmission while it waits.
pub async fn upload_layer(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Layer>), (StatusCode, String)> {
    let mut name = String::new();
    let mut description = String::new();
    let mut color = "#3b82f6".to_string();
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "name" => name = field.text().await.map_err(bad_request)?,
            "description" => description = field.text().await.map_err(bad_request)?,
            "color" => color = field.text().await.map_err(bad_request)?,
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let bytes = field.bytes().await.map_err(bad_request)?;
                file = Some((filename, bytes.to_vec()));
            }
            _ => {}
        }
    }

    let (filename, bytes) = file.ok_or((
        StatusCode::UNPROCESSABLE_ENTITY,
        "Selecione um arquivo e dê um nome para a camada.".to_string(),
    ))?;

    if name.trim().is_empty() {
        // auto-fill from the file name, like the upload form does
        name = filename
            .split('.')
            .next()
            .unwrap_or("Camada importada")
            .to_string();
    }
    if description.trim().is_empty() {
        description = "Camada importada pelo usuário".to_string();
    }

    let features = import::import_features(&filename, &bytes)
        .map_err(|err| (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()))?;

    let id = format!("{CUSTOM_PREFIX}{}", unix_millis());
    let mut layer = Layer::from_features(id, name.clone(), description, color, features);
    layer.details = Some(LayerDetails {
        title: name,
        content: format!("Importado de {filename}"),
    });

    let mut store = state.store.lock().await;
    store.add_layer(layer.clone());
    Ok((StatusCode::CREATED, Json(layer)))
}

#[derive(Debug, Deserialize)]
pub struct AssistantRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

pub async fn assistant_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AssistantRequest>,
) -> Result<Json<AssistantReply>, (StatusCode, String)> {
    let Some(assistant) = &state.assistant else {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Assistant is not configured; start the server with an API key".to_string(),
        ));
    };
    let reply = assistant
        .send(&request.message, &request.history)
        .await
        .map_err(|err| (StatusCode::BAD_GATEWAY, err.to_string()))?;
    Ok(Json(reply))
}

fn bad_request<E: std::fmt::Display>(err: E) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, err.to_string())
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}
