use lambda_http::{
    http::{header::AUTHORIZATION, Method, StatusCode},
    Body, Error, Request, Response,
};
use provisioning_shared::{users, AppState};
use std::sync::Arc;

/// Main Lambda handler - every method except the CORS preflight provisions a user
pub(crate) async fn function_handler(
    event: Request,
    state: Arc<AppState>,
) -> Result<Response<Body>, Error> {
    let method = event.method();
    tracing::info!(
        "Create user lambda invoked - Method: {} Path: {}",
        method,
        event.uri().path()
    );

    // Handle CORS preflight
    if method == Method::OPTIONS {
        return Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header(
                "Access-Control-Allow-Headers",
                "authorization, x-client-info, apikey, content-type",
            )
            .body(Body::Empty)
            .map_err(Box::new)?);
    }

    // A header that is not valid text counts as absent
    let authorization = event
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match users::create_user(state.backend.as_ref(), authorization, event.body()).await {
        Ok(created) => Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "application/json")
            .header("Access-Control-Allow-Origin", "*")
            .body(serde_json::to_string(&created)?.into())
            .map_err(Box::new)?),
        Err(e) => e.into_response(),
    }
}
