//! API request handlers

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use base64::Engine;
use serde::Serialize;

use super::routes::AppState;
use crate::route::Route;
use crate::types::{ItemEvent, ItemResponse};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Crate version
    pub version: String,
}

impl IntoResponse for ItemResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, self.body).into_response();

        for (name, value) in &self.headers {
            match (HeaderName::try_from(name.as_str()), HeaderValue::try_from(value.as_str())) {
                (Ok(name), Ok(value)) => {
                    response.headers_mut().insert(name, value);
                }
                _ => tracing::warn!("Dropping invalid response header {}", name),
            }
        }

        response
    }
}

async fn invoke(state: &AppState, event: ItemEvent) -> Response {
    state.handler.handle(event).await.into_response()
}

/// Wrap a raw request body the way API Gateway does: text as-is, anything
/// that is not UTF-8 base64-encoded and flagged.
fn with_raw_body(mut event: ItemEvent, body: Bytes) -> ItemEvent {
    if body.is_empty() {
        return event;
    }

    match String::from_utf8(body.to_vec()) {
        Ok(text) => event.body = Some(text),
        Err(_) => {
            event.body = Some(base64::engine::general_purpose::STANDARD.encode(&body));
            event.is_base64_encoded = true;
        }
    }
    event
}

// Handlers

/// Health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// `GET /items`
pub async fn list_items(State(state): State<AppState>) -> Response {
    invoke(&state, ItemEvent::new(Route::ListItems.as_str())).await
}

/// `GET /items/{id}`
pub async fn get_item(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let event = ItemEvent::new(Route::GetItem.as_str()).with_path_parameter("id", id);
    invoke(&state, event).await
}

/// `DELETE /items/{id}`
pub async fn delete_item(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let event = ItemEvent::new(Route::DeleteItem.as_str()).with_path_parameter("id", id);
    invoke(&state, event).await
}

/// `PUT /items`
pub async fn put_item(State(state): State<AppState>, body: Bytes) -> Response {
    let event = with_raw_body(ItemEvent::new(Route::PutItem.as_str()), body);
    invoke(&state, event).await
}

/// Anything else: forwarded with the literal method and path as route key
pub async fn unmatched(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let event = ItemEvent::new(format!("{} {}", method, uri.path()));
    invoke(&state, event).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_response_into_response_keeps_headers() {
        let response = ItemResponse::json(400, &serde_json::json!("nope")).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers().get("content-type").and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    #[test]
    fn test_with_raw_body_encodes_binary() {
        let event = with_raw_body(ItemEvent::new("PUT /items"), Bytes::from_static(&[0xff, 0xfe]));
        assert!(event.is_base64_encoded);
        assert_eq!(event.body.as_deref(), Some("//4="));

        let event = with_raw_body(ItemEvent::new("PUT /items"), Bytes::from_static(b"{}"));
        assert!(!event.is_base64_encoded);
        assert_eq!(event.body.as_deref(), Some("{}"));

        let event = with_raw_body(ItemEvent::new("PUT /items"), Bytes::new());
        assert!(event.body.is_none());
    }
}
