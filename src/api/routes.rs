use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware, require_bearer_token};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
///
/// Everything except the health check sits behind the bearer-token layer.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        // Fashion items
        .route(
            "/fashion-items",
            post(handlers::create_item).get(handlers::list_items),
        )
        .route(
            "/fashion-items/:id",
            get(handlers::get_item)
                .put(handlers::update_item)
                .delete(handlers::delete_item),
        )
        .route("/fashion-items/:id/analyze", post(handlers::analyze_item))
        .route(
            "/fashion-items/:id/similar_items",
            get(handlers::similar_items),
        )
        // Recommendations
        .route("/recommendations", get(handlers::list_recommendations))
        // Generative studio
        .route("/generate-ideas", post(handlers::generate_ideas))
        .route("/generate-image", post(handlers::generate_image))
        .route("/analyze-style", post(handlers::analyze_style))
        .route("/model-status", get(handlers::model_status))
        .route_layer(from_fn_with_state(state.clone(), require_bearer_token));

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(protected)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        .layer(from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
