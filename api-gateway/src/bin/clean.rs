//! Clean Lambda - Handles the /api/clean endpoint.

use lambda_http::{run, service_fn, Error};
use shared::CleanHandler;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let handler = CleanHandler;
    run(service_fn(|event| handler.handle(event))).await
}
