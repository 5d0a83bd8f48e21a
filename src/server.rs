//! Shows a rendered map over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::errors::{FlightMapError, Result};
use crate::raster::svg_to_png;

const NO_CACHE: &str = "no-cache, no-store, must-revalidate";

#[derive(Clone)]
pub struct AppState {
    svg: Arc<str>,
    usvg_options: Arc<usvg::Options<'static>>,
}

impl AppState {
    pub fn new(svg: String, usvg_options: Arc<usvg::Options<'static>>) -> Self {
        AppState { svg: svg.into(), usvg_options }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/map.svg", get(get_map_svg))
        .route("/map.png", get(get_map_png))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(FlightMapError::ServerError)?;
    info!("showing map on http://{}/ (Ctrl+C to stop)", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(FlightMapError::ServerError)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for Ctrl+C: {}", e);
    }
    info!("shutting down");
}

async fn index() -> Html<&'static str> {
    Html("<html><head><title>Flight map</title></head><body style='margin:0'>\
          <img src='/map.svg' style='max-width:100%;max-height:100vh' alt='flight map'/>\
          <ul><li><a href='/map.svg'>/map.svg</a></li><li><a href='/map.png'>/map.png</a></li></ul>\
          </body></html>")
}

async fn get_map_svg(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/svg+xml"), (header::CACHE_CONTROL, NO_CACHE)],
        state.svg.to_string(),
    )
}

async fn get_map_png(State(state): State<AppState>) -> Response {
    let start = std::time::Instant::now();
    match svg_to_png(&state.svg, &state.usvg_options) {
        Ok(png) => {
            info!("rendered png in {:?}", start.elapsed());
            ([(header::CONTENT_TYPE, "image/png"), (header::CACHE_CONTROL, NO_CACHE)], png).into_response()
        }
        Err(e) => {
            error!("Error rendering PNG: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error rendering PNG: {}", e)).into_response()
        }
    }
}
