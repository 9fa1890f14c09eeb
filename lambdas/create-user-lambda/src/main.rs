use lambda_http::{run, service_fn, tracing, Error, Request};
use provisioning_shared::config::BackendConfig;
use provisioning_shared::supabase::SupabaseClient;
use provisioning_shared::AppState;
use std::sync::Arc;

mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    // Build the backend client once at startup
    let config = BackendConfig::from_env()?;
    tracing::info!("Backend configured: {:?}", config);

    let state = AppState::new(Arc::new(SupabaseClient::new(config)?));

    run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { http_handler::function_handler(event, state).await }
    }))
    .await
}
