use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use serde_json::{Value, json};

use super::state::{RequestRecord, SimState};

pub(crate) async fn healthz() -> &'static str {
    "ok"
}

pub(crate) async fn drive_status(State(state): State<Arc<SimState>>) -> Json<Value> {
    let mut inner = state.inner.write().await;
    inner.record("status", state.started);
    let image = inner
        .mounted
        .as_ref()
        .map(|filename| json!({ "filename": filename }));
    Json(json!({ "isPrimary": !state.secondary, "image": image }))
}

pub(crate) async fn filenames(State(state): State<Arc<SimState>>) -> Json<Value> {
    let mut inner = state.inner.write().await;
    inner.record("filenames", state.started);
    if inner.listing_waits_left > 0 {
        inner.listing_waits_left -= 1;
        return Json(json!({ "status": "wait" }));
    }
    if state.overflow {
        return Json(json!({ "status": "overflow" }));
    }
    // The ready reply carries no status word, as the device firmware sends it.
    Json(json!({ "filenames": state.catalog }))
}

pub(crate) async fn next_image(State(state): State<Arc<SimState>>) -> Json<Value> {
    let mut inner = state.inner.write().await;
    inner.record("nextImage", state.started);
    if inner.item_waits_left > 0 {
        inner.item_waits_left -= 1;
        return Json(json!({ "status": "wait" }));
    }
    if inner.next_item >= state.catalog.len() {
        return Json(json!({ "status": "done" }));
    }
    let name = state.catalog[inner.next_item].clone();
    inner.next_item += 1;
    inner.item_waits_left = state.item_waits;
    // The item reply is the image record itself; extra fields are expected.
    Json(json!({ "filename": name, "size": 734003200 }))
}

pub(crate) async fn eject(State(state): State<Arc<SimState>>) -> Json<Value> {
    let mut inner = state.inner.write().await;
    inner.record("eject", state.started);
    if let Some(word) = &state.fail_eject {
        return Json(json!({ "status": word }));
    }
    inner.mounted = None;
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct LoadParams {
    #[serde(rename = "imageName")]
    image_name: String,
}

pub(crate) async fn load_image(
    State(state): State<Arc<SimState>>,
    Query(params): Query<LoadParams>,
) -> Json<Value> {
    let mut inner = state.inner.write().await;
    inner.record("image", state.started);
    if let Some(word) = &state.fail_load {
        return Json(json!({ "status": word }));
    }
    if !state.catalog.contains(&params.image_name) {
        return Json(json!({ "status": "notfound" }));
    }
    inner.mounted = Some(params.image_name);
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn version() -> Json<Value> {
    Json(json!({ "clientAPIVersion": "1.0", "serverAPIVersion": "1.0" }))
}

/// Request timeline for integration tests: endpoint name plus milliseconds
/// since the simulator started.
pub(crate) async fn request_log(State(state): State<Arc<SimState>>) -> Json<Vec<RequestRecord>> {
    let inner = state.inner.read().await;
    Json(inner.requests.clone())
}
