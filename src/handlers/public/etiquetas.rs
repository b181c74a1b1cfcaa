use axum::extract::State;

use crate::database::LabelEntry;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/etiquetas - Products that carry a label, projected for devices
///
/// Only `codigoProducto`, `descripcion`, `idEtiqueta` and `precioBase` are
/// returned; the storage identity is never exposed here.
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<LabelEntry>> {
    let products = state.store.find_labeled().await.map_err(|e| {
        ApiError::from_database(e, "Error interno del servidor al consultar etiquetas.")
    })?;

    tracing::debug!("Serving {} labeled products", products.len());
    Ok(ApiResponse::success(products.iter().map(LabelEntry::from).collect()))
}
