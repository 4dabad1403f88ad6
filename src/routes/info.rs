use axum::Json;
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "Welcome to Oura API Test",
        "steps": [
            "1. Go to /auth/login to authenticate",
            "2. Copy the access token",
            "3. Call /api/user, /api/sleep, /api/activity or /api/readiness with ?token= or an Authorization: Bearer header"
        ]
    }))
}

/// Privacy policy placeholder.
pub async fn privacy() -> Json<Value> {
    Json(json!({
        "message": "This is a test application. No real user data is shared or sold."
    }))
}

/// Terms of service placeholder.
pub async fn terms() -> Json<Value> {
    Json(json!({ "message": "This is a test application for personal use only." }))
}
