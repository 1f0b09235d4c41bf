use std::sync::Arc;

use axum::{
    Json,
    Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::ServeConfig,
    corpus,
    error::{self, Error},
    index::CorpusIndex,
    recommend::{self, DEFAULT_TOP_N, RecommendParams},
};

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    index: Arc<CorpusIndex>,
}

impl AppState {
    pub fn new(index: Arc<CorpusIndex>) -> Self {
        Self { index }
    }
}

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub query: String,
    #[serde(default = "default_top_n")]
    pub top_n: i64,
}

fn default_top_n() -> i64 {
    DEFAULT_TOP_N as i64
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<PaperItem>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaperItem {
    pub title: String,
    pub summary: String,
    pub terms: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub documents: usize,
    pub vocabulary: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// An HTTP-facing error: a status code and a JSON `{ "error": ... }` body.
#[derive(Debug)]
pub struct ApiError {
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

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        let status = match e {
            Error::InvalidTopN(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, "{}", self.message);
        } else {
            tracing::debug!(status = %self.status, "{}", self.message);
        }
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

/// Build the application router.
///
/// `allow_origin` is the single origin permitted to make cross-origin
/// requests, with credentials. Requests from any other origin get no
/// `Access-Control-Allow-Origin` header.
pub fn router(index: Arc<CorpusIndex>, allow_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([allow_origin]))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    Router::new()
        .route("/recommend", post(handle_recommend))
        .route("/recommend/", post(handle_recommend))
        .route("/health", get(handle_health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(index))
}

async fn handle_recommend(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendResponse>, ApiError> {
    let Json(req) = payload?;

    if req.top_n <= 0 {
        return Err(Error::InvalidTopN(req.top_n).into());
    }
    let params = RecommendParams::new(req.query, req.top_n as usize);

    let index = Arc::clone(&state.index);
    let results =
        tokio::task::spawn_blocking(move || recommend::recommend(&*index, &params))
            .await
            .map_err(|e| {
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("ranking task failed: {e}"),
                )
            })??;

    let recommendations = results
        .into_iter()
        .map(|r| PaperItem {
            title: r.title,
            summary: r.summary,
            terms: r.terms,
        })
        .collect();

    Ok(Json(RecommendResponse { recommendations }))
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        documents: state.index.len(),
        vocabulary: state.index.dimension(),
    })
}

/// Load the corpus, build the index, and serve until Ctrl-C.
///
/// Any failure before the listener is bound aborts startup.
pub async fn serve(config: ServeConfig) -> error::Result<()> {
    tracing::info!("Loading corpus from {}", config.corpus.display());
    let documents = corpus::load_csv(&config.corpus)?;
    let index = Arc::new(CorpusIndex::build(documents)?);

    let app = router(index, config.allow_origin.clone());

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(
        "Listening on {} (allowed origin: {:?})",
        config.bind,
        config.allow_origin
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
}
