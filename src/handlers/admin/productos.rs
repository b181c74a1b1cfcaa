use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::database::{NewProduct, ProductPatch, StoredProduct};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /admin/productos - Create a product
///
/// Validation runs before storage is touched. A taken `codigoProducto` is a
/// 409, never an overwrite.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let Json(payload) = payload?;
    let product = NewProduct::from_json(payload)?;
    let codigo = product.codigo().to_string();

    let id = state
        .store
        .insert(product)
        .await
        .map_err(|e| ApiError::from_database(e, "Error interno al insertar el producto."))?;

    info!("Created product {} ({})", codigo, id);
    Ok(ApiResponse::created(json!({
        "message": "Producto creado exitosamente.",
        "productoId": id
    })))
}

/// GET /admin/productos - Full catalog, unfiltered and unpaginated
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Value>> {
    info!("Listing full catalog");

    let products = state.store.find_all().await.map_err(|e| {
        ApiError::from_database(e, "Error interno del servidor al consultar el catálogo.")
    })?;

    Ok(ApiResponse::success(StoredProduct::to_api_output_array(&products)))
}

/// PUT /admin/productos/:codigo - Merge fields into an existing product
///
/// `_id` and `codigoProducto` are stripped from the body, so the addressing key
/// never changes. `modifiedCount` is 0 when the merge left the document as it was.
pub async fn update(
    State(state): State<AppState>,
    codigo: Result<Path<String>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Value> {
    let Path(codigo) = codigo?;
    let Json(payload) = payload?;
    let patch = ProductPatch::from_json(payload)?;

    let outcome = state
        .store
        .update_by_codigo(&codigo, &patch)
        .await
        .map_err(|e| ApiError::from_database(e, "Error interno del servidor al actualizar."))?;

    if outcome.matched == 0 {
        return Err(not_found(&codigo));
    }

    info!("Updated product {} (modified: {})", codigo, outcome.modified);
    Ok(ApiResponse::success(json!({
        "message": "Producto actualizado correctamente.",
        "modifiedCount": outcome.modified
    })))
}

/// DELETE /admin/productos/:codigo - Remove one product
pub async fn delete(
    State(state): State<AppState>,
    codigo: Result<Path<String>, PathRejection>,
) -> ApiResult<Value> {
    let Path(codigo) = codigo?;
    let deleted = state
        .store
        .delete_by_codigo(&codigo)
        .await
        .map_err(|e| ApiError::from_database(e, "Error interno del servidor al eliminar."))?;

    if deleted == 0 {
        return Err(not_found(&codigo));
    }

    info!("Deleted product {}", codigo);
    Ok(ApiResponse::success(json!({
        "message": format!("Producto {} eliminado correctamente.", codigo),
        "deletedCount": deleted
    })))
}

fn not_found(codigo: &str) -> ApiError {
    ApiError::not_found(format!("Producto con código {} no encontrado.", codigo))
}
