use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use lingua_config::proxy::ProxyConfig;
use lingua_translator::ModelClient;
use lingua_types::ProxyResponse;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

use crate::validate::validate;

const TIMEOUT_MESSAGE: &str = "Délai dépassé, réessaie dans un instant";

pub struct ProxyState {
    pub model: Arc<dyn ModelClient>,
    pub timeout: Duration,
    pub max_prompt_chars: usize,
}

impl ProxyState {
    pub fn new(model: Arc<dyn ModelClient>, config: &ProxyConfig) -> Self {
        Self {
            model,
            timeout: Duration::from_millis(config.timeout_ms),
            max_prompt_chars: config.max_prompt_chars,
        }
    }
}

type SharedState = Arc<ProxyState>;

pub async fn serve(listener: TcpListener, state: ProxyState) -> anyhow::Result<()> {
    let metadata = state.model.metadata();
    tracing::info!(
        "Proxy listening on http://{} ({} {})",
        listener.local_addr()?,
        metadata.name,
        metadata.model
    );

    axum::serve(listener, build_router(Arc::new(state)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Proxy exited");
    Ok(())
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ProxyResponse::error(self.message))).into_response()
    }
}

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route(
            "/",
            post(complete).options(preflight).fallback(method_not_allowed),
        )
        .route("/healthz", get(health))
        .with_state(state)
        .layer(middleware::map_response(cors_headers))
        .layer(TraceLayer::new_for_http())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

async fn cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Méthode non autorisée")
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// One upstream call per request, dropped when the timeout fires
async fn complete(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<ProxyResponse>, ApiError> {
    let request = validate(&body, state.max_prompt_chars).map_err(|e| {
        tracing::debug!("Rejected request: {}", e);
        ApiError::new(StatusCode::BAD_REQUEST, e.to_string())
    })?;

    let call = state
        .model
        .complete(&request.prompt, &request.system_prompt);

    match tokio::time::timeout(state.timeout, call).await {
        Ok(Ok(text)) => Ok(Json(ProxyResponse::ok(text))),
        Ok(Err(e)) => {
            tracing::warn!("Model call failed: {}", e);
            let message = e.to_string();
            let message = if message.is_empty() {
                "Erreur serveur".to_string()
            } else {
                message
            };
            Err(ApiError::new(StatusCode::BAD_GATEWAY, message))
        }
        Err(_) => {
            tracing::warn!("Model call timed out after {:?}", state.timeout);
            Err(ApiError::new(StatusCode::GATEWAY_TIMEOUT, TIMEOUT_MESSAGE))
        }
    }
}
