mod catalog;

use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderValue, Request, StatusCode},
    middleware::{Next, from_fn},
    response::Json,
    routing::{get, post},
};
use intake_flow::{
    AnswerRepository, CartItem, HttpAnswerRepository, HttpQuestionCatalog,
    InMemoryAnswerRepository, InMemoryQuestionCatalog, InMemorySessionStorage,
    PostgresSessionStorage, QuestionCatalog, SessionStorage, WizardError, WizardEvent,
    WizardResponse, WizardRunner,
};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{Instrument, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Clone)]
struct AppState {
    runner: WizardRunner,
}

#[derive(Debug, Deserialize)]
struct StartRequest {
    #[serde(default)]
    cart: Vec<CartItem>,
}

/// Initialize structured JSON tracing based on environment variables
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "intake_service=debug,intake_flow=debug,tower_http=debug".into());

    match log_format.as_str() {
        "pretty" => {
            // Human-readable logging for development
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        _ => {
            // Structured JSON logging for production
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_target(true)
                        .with_level(true),
                )
                .init();
        }
    }
}

/// Middleware to add correlation ID to all requests
async fn correlation_id_middleware(
    mut request: Request<axum::body::Body>,
    next: Next,
) -> axum::response::Response {
    let correlation_id = Uuid::new_v4().to_string();

    request.headers_mut().insert(
        "x-correlation-id",
        HeaderValue::from_str(&correlation_id).unwrap(),
    );

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);

    next.run(request).instrument(span).await
}

fn cors_layer() -> CorsLayer {
    match std::env::var("STOREFRONT_ORIGIN") {
        Ok(origin) => match HeaderValue::from_str(&origin) {
            Ok(value) => CorsLayer::new()
                .allow_origin(value)
                .allow_methods(Any)
                .allow_headers(Any),
            Err(_) => {
                error!(origin = %origin, "invalid STOREFRONT_ORIGIN, allowing any origin");
                CorsLayer::permissive()
            }
        },
        Err(_) => CorsLayer::permissive(),
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    // Check for DATABASE_URL and use PostgreSQL if available, otherwise use in-memory
    let session_storage: Arc<dyn SessionStorage> =
        if let Ok(database_url) = std::env::var("DATABASE_URL") {
            info!("Using PostgreSQL session storage");
            match PostgresSessionStorage::connect(&database_url).await {
                Ok(postgres_storage) => Arc::new(postgres_storage),
                Err(e) => {
                    error!(
                        "Failed to connect to PostgreSQL: {}. Falling back to in-memory storage.",
                        e
                    );
                    Arc::new(InMemorySessionStorage::new())
                }
            }
        } else {
            info!("Using in-memory session storage (set DATABASE_URL to use PostgreSQL)");
            Arc::new(InMemorySessionStorage::new())
        };

    // Catalog and answer collaborators: remote REST endpoints when configured,
    // the built-in demo data otherwise
    let question_catalog: Arc<dyn QuestionCatalog> =
        if let Ok(url) = std::env::var("CATALOG_URL") {
            info!(url = %url, "Using remote question catalog");
            Arc::new(HttpQuestionCatalog::new(url))
        } else {
            info!("Using built-in demo question catalog (set CATALOG_URL to use a remote one)");
            Arc::new(InMemoryQuestionCatalog::new(catalog::demo_questions()))
        };

    let answer_repository: Arc<dyn AnswerRepository> =
        if let Ok(url) = std::env::var("ANSWERS_URL") {
            info!(url = %url, "Using remote answer repository");
            Arc::new(HttpAnswerRepository::new(url))
        } else {
            info!("Using in-memory answer repository (set ANSWERS_URL to use a remote one)");
            Arc::new(InMemoryAnswerRepository::new())
        };

    let app_state = AppState {
        runner: WizardRunner::new(
            question_catalog,
            answer_repository,
            session_storage,
            catalog::demo_photo_rules(),
        ),
    };

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/sessions", post(start_session))
        .route("/sessions/{id}", get(get_session))
        .route("/sessions/{id}/events", post(apply_event))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .layer(from_fn(correlation_id_middleware))
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();

    info!("Server running on http://0.0.0.0:3000");

    axum::serve(listener, app).await.unwrap();
}

async fn health_check() -> &'static str {
    "OK"
}

fn status_for(err: &WizardError) -> StatusCode {
    match err {
        WizardError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        WizardError::Validation(_) | WizardError::QuestionNotFound(_) => StatusCode::BAD_REQUEST,
        WizardError::CatalogFetch(_) | WizardError::AnswerFetch(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Create a wizard session from the current cart and run initialization.
/// Initialization failure (catalog or answer snapshot fetch) blocks the
/// wizard; the client shows a retryable error state.
async fn start_session(
    State(state): State<AppState>,
    Json(request): Json<StartRequest>,
) -> Result<Json<WizardResponse>, StatusCode> {
    info!(cart_items = request.cart.len(), "Starting wizard session");
    match state.runner.start(&request.cart).await {
        Ok(response) => {
            info!(session_id = %response.session_id, "Wizard session started");
            Ok(Json(response))
        }
        Err(e) => {
            error!(error = %e, "Failed to start wizard session");
            Err(status_for(&e))
        }
    }
}

/// Apply exactly one wizard event to a session.
async fn apply_event(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(event): Json<WizardEvent>,
) -> Result<Json<WizardResponse>, StatusCode> {
    if Uuid::parse_str(&session_id).is_err() {
        error!(session_id = %session_id, "Invalid session ID format");
        return Err(StatusCode::BAD_REQUEST);
    }

    match state.runner.run(&session_id, event).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            error!(session_id = %session_id, error = %e, "Failed to apply wizard event");
            Err(status_for(&e))
        }
    }
}

async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<WizardResponse>, StatusCode> {
    match state.runner.inspect(&session_id).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            error!(session_id = %session_id, error = %e, "Failed to load session");
            Err(status_for(&e))
        }
    }
}
