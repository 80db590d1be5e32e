//! Rewrite Lambda - Handles the /api/rewrite endpoint.
//!
//! Takes a guest's draft message plus booking context, asks the completion service for a
//! polished version and returns it as `{ message }`. The prompt variant is chosen per
//! deployment through `REWRITE_VARIANT`.

use lambda_http::{run, service_fn, Error};
use shared::{Config, RewriteHandler};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = Config::from_env()?;
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; rewrite requests will fail with 401");
    }
    info!(
        variant = config.prompt_spec.name,
        model = %config.openai_model,
        "Rewrite handler ready"
    );

    let handler = Arc::new(RewriteHandler::from_config(&config));

    run(service_fn(move |event| {
        let handler = Arc::clone(&handler);
        async move { handler.handle(event).await }
    }))
    .await
}
