use crate::config::AppConfig;
use crate::render;
use crate::style::ward_style;
use crate::survey::SubmissionHandler;
use crate::types::SurveyResponse;
use anyhow::Result;
use axum::{
    extract::State,
    response::{Html, Json},
    routing::{get, post},
    Form, Router,
};
use geojson::FeatureCollection;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub struct AppState {
    pub config: AppConfig,
    pub wards: FeatureCollection,
    pub handler: Arc<dyn SubmissionHandler>,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(page_handler))
        .route("/api/wards", get(wards_handler))
        .route("/api/survey", post(survey_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(
    config: AppConfig,
    wards: FeatureCollection,
    handler: Arc<dyn SubmissionHandler>,
) -> Result<()> {
    let port = config.server.port;
    let state = Arc::new(AppState {
        config,
        wards,
        handler,
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    info!("Starting server on http://{}", addr);

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn page_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render::render_page(
        &state.config.view_state(),
        &state.config.map.tile_url,
        &state.wards,
        ward_style,
    ))
}

async fn wards_handler(State(state): State<Arc<AppState>>) -> Json<FeatureCollection> {
    Json(state.wards.clone())
}

async fn survey_handler(
    State(state): State<Arc<AppState>>,
    Form(response): Form<SurveyResponse>,
) -> Html<String> {
    state.handler.handle(response);
    Html(render::render_thanks())
}
