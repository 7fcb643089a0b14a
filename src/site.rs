use crate::contact::ContactForm;
use crate::health;
use crate::loader::ProjectsLoader;
use crate::page::{PageHandle, ProjectsPage};
use crate::render::{render_document, render_fragment, REFRESH_PATH};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Shared state of the HTTP surface
#[derive(Clone)]
pub struct AppState {
    pub page: PageHandle,
    pub loader: Arc<ProjectsLoader>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(page: PageHandle, loader: Arc<ProjectsLoader>) -> Self {
        Self {
            page,
            loader,
            start_time: Instant::now(),
        }
    }
}

/// Response for successful operations
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

/// Response for errors
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/projects", get(projects_fragment))
        .route("/api/stats", get(get_stats))
        .route("/api/projects", get(get_projects))
        .route(REFRESH_PATH, post(refresh_projects))
        .route("/contact", post(submit_contact))
        .merge(health::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the site on `0.0.0.0:port` until the future is dropped.
pub async fn start_server(state: AppState, port: u16) -> std::io::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Portfolio server listening on http://{}", addr);

    axum::serve(listener, app).await
}

async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let page = state.page.snapshot();
    Html(render_document(&page, &state.loader.config().username))
}

async fn projects_fragment(State(state): State<AppState>) -> impl IntoResponse {
    Html(render_fragment(&state.page.snapshot()))
}

async fn get_stats(State(state): State<AppState>) -> impl IntoResponse {
    match state.page.snapshot().stats {
        Some(stats) => (StatusCode::OK, Json(stats)).into_response(),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "Repositories have not been loaded yet".to_string(),
            }),
        )
            .into_response(),
    }
}

async fn get_projects(State(state): State<AppState>) -> Json<ProjectsPage> {
    Json(state.page.snapshot())
}

/// Manual retry: one more load, answered with the refreshed fragment
async fn refresh_projects(State(state): State<AppState>) -> impl IntoResponse {
    info!("Manual refresh requested");

    let mut page = state.page.clone();
    let outcome = state.loader.refresh(&mut page).await;

    let status = if outcome.is_loaded() {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };

    (status, Html(render_fragment(&page.snapshot())))
}

async fn submit_contact(Json(form): Json<ContactForm>) -> impl IntoResponse {
    match form.validate() {
        Ok(()) => {
            // Sender details stay out of the logs
            info!(
                subject_len = form.subject.trim().chars().count(),
                message_len = form.message.trim().chars().count(),
                "Contact message accepted"
            );

            (
                StatusCode::ACCEPTED,
                Json(SuccessResponse {
                    success: true,
                    message: "Message sent successfully! I'll get back to you soon.".to_string(),
                }),
            )
                .into_response()
        }
        Err(errors) => {
            warn!("Rejected contact form: {}", errors);
            (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response()
        }
    }
}
