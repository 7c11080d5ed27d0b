//! Core types for itemdesk

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};

/// Content type attached to every response
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// An item in the table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    /// Kept as a JSON number so the caller's textual form survives storage
    pub price: serde_json::Number,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: serde_json::Number) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }

    /// Reject items the table cannot key
    pub fn validate(&self) -> Result<()> {
        if self.id.is_empty() {
            return Err(Error::InvalidItem("id must not be empty".into()));
        }
        Ok(())
    }
}

/// Inbound routed HTTP event, as delivered by API Gateway (payload v2)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemEvent {
    /// Absent in hand-written test events; treated as an unsupported route
    #[serde(default)]
    pub route_key: String,
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

impl ItemEvent {
    pub fn new(route_key: impl Into<String>) -> Self {
        Self {
            route_key: route_key.into(),
            ..Default::default()
        }
    }

    pub fn with_path_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Look up a path parameter by name
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .as_ref()
            .and_then(|params| params.get(name))
            .map(String::as_str)
    }

    /// Request body as text, base64-decoded when the gateway flagged it
    pub fn decoded_body(&self) -> Result<Option<String>> {
        let Some(body) = &self.body else {
            return Ok(None);
        };

        if !self.is_base64_encoded {
            return Ok(Some(body.clone()));
        }

        let bytes = base64::engine::general_purpose::STANDARD.decode(body)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| Error::InvalidBody(format!("body is not UTF-8: {}", e)))?;
        Ok(Some(text))
    }
}

/// Outbound HTTP-shaped response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    /// Already JSON-encoded
    pub body: String,
}

impl ItemResponse {
    /// Build a response whose body is the JSON encoding of `payload`
    pub fn json(status_code: u16, payload: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), CONTENT_TYPE_JSON.to_string());

        Self {
            status_code,
            headers,
            body: payload.to_string(),
        }
    }
}
