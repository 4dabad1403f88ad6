pub mod api;
pub mod auth;
pub mod info;
pub mod webhooks;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// All public routes, with state applied. Cross-cutting layers are added by the caller.
pub fn app_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/login", get(auth::oura_login))
        .route("/callback", get(auth::oura_callback));

    let api_routes = Router::new()
        .route("/user", get(api::get_user_info))
        .route("/sleep", get(api::get_sleep_data))
        .route("/activity", get(api::get_activity_data))
        .route("/readiness", get(api::get_readiness_data));

    Router::new()
        .route("/", get(info::root))
        .route("/privacy", get(info::privacy))
        .route("/terms", get(info::terms))
        .nest("/auth", auth_routes)
        .nest("/api", api_routes)
        .route("/webhook", post(webhooks::receive_webhook))
        .route("/webhooks/recent", get(webhooks::recent_webhooks))
        .with_state(state)
}
