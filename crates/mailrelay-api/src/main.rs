use lambda_http::{Error, Request, run, service_fn};
use mailrelay_api::ApiContext;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing subscriber for structured logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    info!("Starting Mailrelay API Lambda function");

    // Configuration errors abort the cold start
    let ctx = ApiContext::new()?;

    // Run the Lambda runtime with our handler
    run(service_fn(|event: Request| {
        let ctx = ctx.clone();
        async move { mailrelay_api::handler(ctx, event).await }
    }))
    .await
}
