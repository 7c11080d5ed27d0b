//! Serverless runtime glue

use lambda_runtime::{service_fn, Error, LambdaEvent};

use crate::handler::ItemHandler;
use crate::types::{ItemEvent, ItemResponse};

/// Handle one invocation. Handler failures are already folded into the
/// response, so the runtime only ever sees `Ok`.
pub async fn function_handler(
    handler: &ItemHandler,
    event: LambdaEvent<ItemEvent>,
) -> Result<ItemResponse, Error> {
    let (payload, context) = event.into_parts();
    tracing::debug!(request_id = %context.request_id, "invocation received");

    Ok(handler.handle(payload).await)
}

/// Poll the runtime API until the process is shut down
pub async fn run(handler: ItemHandler) -> Result<(), Error> {
    lambda_runtime::run(service_fn(|event| function_handler(&handler, event))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_function_handler_wraps_handler() {
        let handler = ItemHandler::new(Arc::new(MemoryStore::new()));
        let event = LambdaEvent::new(ItemEvent::new("GET /items"), lambda_runtime::Context::default());

        let response = function_handler(&handler, event).await.unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "[]");
    }
}
