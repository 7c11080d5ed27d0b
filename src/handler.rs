//! Item request handler: one event in, one HTTP-shaped response out

use serde::Serialize;
use std::sync::Arc;
use tracing::Instrument;

use crate::error::{Error, Result};
use crate::route::Route;
use crate::store::ItemStore;
use crate::types::{Item, ItemEvent, ItemResponse};

/// Result of a successful dispatch, serialized as the response body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    /// Confirmation text for mutations
    Message(String),
    /// Single lookup; `None` serializes as `null`
    Item(Option<Item>),
    Items(Vec<Item>),
}

/// Routes events to the store
///
/// Holds nothing but the shared store handle, so one handler is built at
/// startup and reused by every invocation.
#[derive(Clone)]
pub struct ItemHandler {
    store: Arc<dyn ItemStore>,
}

impl ItemHandler {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Handle one event. Never fails: errors become a 400 response whose
    /// body is the JSON-encoded error message.
    pub async fn handle(&self, event: ItemEvent) -> ItemResponse {
        let span = tracing::info_span!("item_request", route = %event.route_key);

        async move {
            let result = self
                .dispatch(&event)
                .await
                .and_then(|outcome| serde_json::to_value(&outcome).map_err(Error::from));

            let (status_code, payload) = match result {
                Ok(payload) => {
                    tracing::debug!("request succeeded");
                    (200, payload)
                }
                Err(err) => {
                    tracing::warn!("request failed: {}", err);
                    (err.status_code(), serde_json::Value::String(err.to_string()))
                }
            };

            ItemResponse::json(status_code, &payload)
        }
        .instrument(span)
        .await
    }

    /// Run the operation the event's route names
    pub async fn dispatch(&self, event: &ItemEvent) -> Result<Outcome> {
        let route: Route = event.route_key.parse()?;

        match route {
            Route::DeleteItem => {
                let id = required_id(event)?;
                self.store.delete(id).await?;
                Ok(Outcome::Message(format!("Deleted item {}", id)))
            }
            Route::GetItem => {
                let id = required_id(event)?;
                Ok(Outcome::Item(self.store.get(id).await?))
            }
            Route::ListItems => Ok(Outcome::Items(self.store.scan().await?)),
            Route::PutItem => {
                let body = event.decoded_body()?.ok_or(Error::MissingBody)?;
                let item: Item = serde_json::from_str(&body)?;
                item.validate()?;

                let id = item.id.clone();
                self.store.put(item).await?;
                Ok(Outcome::Message(format!("Put item {}", id)))
            }
        }
    }
}

fn required_id(event: &ItemEvent) -> Result<&str> {
    match event.path_parameter("id") {
        Some("") => Err(Error::InvalidItem("id must not be empty".into())),
        Some(id) => Ok(id),
        None => Err(Error::MissingPathParameter("id")),
    }
}
