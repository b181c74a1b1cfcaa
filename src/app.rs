use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::middleware::require_admin_key;
use crate::state::AppState;

/// Knobs for the global middleware stack
#[derive(Debug, Clone, Copy, Default)]
pub struct AppOptions {
    pub enable_cors: bool,
}

/// Full HTTP surface: public routes, gated admin routes, global middleware
pub fn app(state: AppState, options: AppOptions) -> Router {
    let router = Router::new()
        // Public
        .merge(public_routes())
        // Admin (x-admin-key)
        .merge(admin_routes(state.clone()))
        .with_state(state);

    let router = if options.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

fn public_routes() -> Router<AppState> {
    use handlers::public;

    Router::new()
        .route("/health", get(public::health_get))
        // Label feed for embedded devices, deliberately unauthenticated
        .route("/api/etiquetas", get(public::etiquetas_list))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    use handlers::admin;

    Router::new()
        .route(
            "/admin/productos",
            get(admin::productos_list).post(admin::productos_create),
        )
        .route(
            "/admin/productos/:codigo",
            put(admin::productos_update).delete(admin::productos_delete),
        )
        // route_layer: unmatched paths stay 404 instead of 401
        .route_layer(middleware::from_fn_with_state(state, require_admin_key))
}
