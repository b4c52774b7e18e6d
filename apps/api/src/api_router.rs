use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(app_state: AppState, route_prefix: &str) -> Router {
    let route_prefix = route_prefix.trim_end_matches('/');

    Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(
            &format!("{route_prefix}/ccs/{{entity}}"),
            get(handlers::component_settings::component_settings_handler),
        )
        .route(
            &format!("{route_prefix}/ccs/{{entity}}/validate"),
            get(handlers::component_settings::validate_view_config_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
