//! Catalog API handlers
//!
//! List, look up and create items in the shared in-memory catalog.

use crate::error::AppError;
use crate::state::{Item, SharedCatalog};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// JSON response body indented with four spaces
#[derive(Debug)]
pub struct IndentedJson<T>(pub T);

impl<T: Serialize> IntoResponse for IndentedJson<T> {
    fn into_response(self) -> Response {
        let mut buf = Vec::with_capacity(256);
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        match self.0.serialize(&mut ser) {
            Ok(()) => (
                [(header::CONTENT_TYPE, "application/json; charset=utf-8")],
                buf,
            )
                .into_response(),
            Err(e) => AppError::Internal(e.into()).into_response(),
        }
    }
}

/// GET /items - List all items in insertion order
pub async fn list_items(
    State(catalog): State<SharedCatalog>,
) -> Result<IndentedJson<Vec<Item>>, AppError> {
    let catalog = catalog.read().await;
    Ok(IndentedJson(catalog.list().to_vec()))
}

/// GET /items/:id - Get the first item with the given id
pub async fn get_item(
    State(catalog): State<SharedCatalog>,
    Path(id): Path<String>,
) -> Result<IndentedJson<Item>, AppError> {
    let catalog = catalog.read().await;
    let item = catalog
        .find(&id)
        .cloned()
        .ok_or_else(|| AppError::ItemNotFound(id))?;

    Ok(IndentedJson(item))
}

/// POST /items - Append an item
pub async fn create_item(
    State(catalog): State<SharedCatalog>,
    payload: Result<Json<Item>, JsonRejection>,
) -> Result<(StatusCode, IndentedJson<Item>), AppError> {
    let Json(item) = payload.map_err(|rejection| AppError::InvalidItem(rejection.body_text()))?;

    let count = {
        let mut catalog = catalog.write().await;
        catalog.append(item.clone());
        catalog.len()
    };
    tracing::info!(id = %item.id, count, "item created");

    Ok((StatusCode::CREATED, IndentedJson(item)))
}
