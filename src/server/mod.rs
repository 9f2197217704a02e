//! HTTP surface: chat/agent completions and translation.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Reply};

use crate::kernel::assistant::{self, AssistantMode, Attachment};
use crate::kernel::services::ports::CompletionService;
use crate::kernel::translate::{self, TranslateError, TranslationRequest};

const MAX_BODY_BYTES: u64 = 1024 * 1024;

/// Shared by every request handler.
#[derive(Clone)]
pub struct ServerState {
    completion: Arc<dyn CompletionService>,
    temperature: f32,
}

impl ServerState {
    pub fn new(completion: Arc<dyn CompletionService>, temperature: f32) -> Self {
        Self {
            completion,
            temperature,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    message: String,
    #[serde(default)]
    context: Option<String>,
    #[serde(default)]
    files: Vec<Attachment>,
    #[serde(default)]
    mode: Option<AssistantMode>,
}

#[derive(Debug, Serialize)]
struct ChatResponse {
    response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
}

pub fn routes(
    state: ServerState,
) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    let state_filter = warp::any().map(move || state.clone());

    // POST /chat
    let chat = warp::path!("chat")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .and(state_filter.clone())
        .and_then(handle_chat);

    // POST /translate
    let translate = warp::path!("translate")
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_BYTES))
        .and(warp::body::bytes())
        .and(state_filter)
        .and_then(handle_translate);

    // GET /health
    let health = warp::path!("health").and(warp::get()).map(|| "ok");

    chat.or(translate).or(health).with(warp::trace::request())
}

/// Serves until `shutdown` resolves.
pub async fn serve(
    addr: SocketAddr,
    state: ServerState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), warp::Error> {
    let (bound, server) = warp::serve(routes(state)).try_bind_with_graceful_shutdown(addr, shutdown)?;
    tracing::info!(addr = %bound, "http server listening");
    server.await;
    tracing::info!("http server shut down");
    Ok(())
}

fn json_reply(body: &serde_json::Value, status: StatusCode) -> Response {
    warp::reply::with_status(warp::reply::json(body), status).into_response()
}

async fn handle_chat(body: warp::hyper::body::Bytes, state: ServerState) -> Result<Response, Infallible> {
    let request: ChatRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "malformed chat request");
            return Ok(json_reply(
                &json!({ "error": "Failed to process request", "details": e.to_string() }),
                StatusCode::BAD_REQUEST,
            ));
        }
    };

    let mode = request.mode.unwrap_or_default();
    tracing::debug!(?mode, files = request.files.len(), "chat request");
    let temperature = state.temperature;
    let result = tokio::task::spawn_blocking(move || {
        assistant::respond(
            state.completion.as_ref(),
            mode,
            &request.message,
            request.context.as_deref(),
            &request.files,
            temperature,
        )
    })
    .await;

    match result {
        Ok(reply) => Ok(warp::reply::json(&ChatResponse {
            response: reply.response,
            warning: reply.warning,
        })
        .into_response()),
        Err(e) => {
            tracing::error!(error = %e, "chat task failed");
            Ok(json_reply(
                &json!({ "error": "Failed to process request", "details": e.to_string() }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

async fn handle_translate(body: warp::hyper::body::Bytes, state: ServerState) -> Result<Response, Infallible> {
    let request: TranslationRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            tracing::warn!(error = %e, "malformed translate request");
            return Ok(json_reply(
                &json!({
                    "error": "Invalid Request",
                    "message": "Failed to process translation request",
                    "details": e.to_string(),
                }),
                StatusCode::BAD_REQUEST,
            ));
        }
    };

    let result =
        tokio::task::spawn_blocking(move || translate::translate(state.completion.as_ref(), &request))
            .await;

    match result {
        Ok(Ok(translation)) => Ok(warp::reply::json(&translation).into_response()),
        Ok(Err(e)) => Ok(translate_error_reply(&e)),
        Err(e) => {
            tracing::error!(error = %e, "translate task failed");
            Ok(json_reply(
                &json!({
                    "error": "Server Error",
                    "message": "Failed to process translation request",
                    "details": e.to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

fn translate_error_reply(error: &TranslateError) -> Response {
    match error {
        TranslateError::PiiDetected(types) => json_reply(
            &json!({
                "error": error.title(),
                "message": error.to_string(),
                "detectedTypes": types,
            }),
            StatusCode::BAD_REQUEST,
        ),
        TranslateError::ServiceUnavailable(details) => json_reply(
            &json!({
                "error": error.title(),
                "message": error.to_string(),
                "details": details,
            }),
            StatusCode::SERVICE_UNAVAILABLE,
        ),
        TranslateError::MissingInput | TranslateError::UnsupportedLanguage => json_reply(
            &json!({ "error": error.title(), "message": error.to_string() }),
            StatusCode::BAD_REQUEST,
        ),
    }
}
