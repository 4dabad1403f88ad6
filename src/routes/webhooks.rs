use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::{responses::JsonResponse, services::webhooks::WebhookRecord, state::AppState};

/// Accepts an Oura webhook delivery. The body must be JSON; nothing is stored otherwise.
pub async fn receive_webhook(State(state): State<AppState>, body: Bytes) -> Response {
    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(e) => {
            error!("Error processing webhook: {e}");
            return JsonResponse::server_error("Error processing webhook").into_response();
        }
    };

    info!(%payload, "Webhook received");
    let record = state.webhooks.push(payload);

    Json(json!({ "status": "received", "payload": record.payload })).into_response()
}

pub async fn recent_webhooks(State(state): State<AppState>) -> Json<Vec<WebhookRecord>> {
    Json(state.webhooks.recent())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        Router,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::{
        config::Config,
        routes::app_router,
        services::{
            oauth::oura::mock_oura_oauth::MockOuraOAuth, webhooks::WEBHOOK_HISTORY_CAPACITY,
        },
    };

    fn test_app() -> (AppState, Router) {
        let state = AppState::test_stub(
            Config::test_stub("http://unused", "http://unused"),
            Arc::new(MockOuraOAuth::default()),
        );
        (state.clone(), app_router(state))
    }

    fn post_webhook(body: &str) -> Request<Body> {
        Request::post("/webhook")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_owned()))
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn valid_delivery_is_echoed_and_stored() {
        let (state, app) = test_app();

        let response = app
            .oneshot(post_webhook(r#"{"event_type":"create","data_type":"sleep"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "received");
        assert_eq!(json["payload"]["data_type"], "sleep");
        assert_eq!(state.webhooks.len(), 1);
    }

    #[tokio::test]
    async fn recent_returns_last_ten_in_arrival_order() {
        let (_, app) = test_app();

        for i in 0..15 {
            let response = app
                .clone()
                .oneshot(post_webhook(&format!(r#"{{"seq":{i}}}"#)))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .oneshot(Request::get("/webhooks/recent").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let records = json.as_array().unwrap();
        assert_eq!(records.len(), WEBHOOK_HISTORY_CAPACITY);
        let seqs: Vec<i64> = records
            .iter()
            .map(|r| r["payload"]["seq"].as_i64().unwrap())
            .collect();
        assert_eq!(seqs, (5..15).collect::<Vec<_>>());
        assert!(records[0]["received_at"].is_string());
    }

    #[tokio::test]
    async fn malformed_body_returns_500_and_stores_nothing() {
        let (state, app) = test_app();

        let response = app.oneshot(post_webhook("{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["message"], "Error processing webhook");
        assert!(state.webhooks.is_empty());
    }
}
