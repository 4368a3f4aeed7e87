pub mod auth;
pub mod backend;
pub mod capacity;
pub mod draft;
pub mod error;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod roster;
pub mod settings;
pub mod submit;
pub mod title;
pub mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use handlers::{
    add_workshop_participant, class_roster, create_class, create_workshop, healthz_live,
    healthz_ready, list_classes, list_teachers, root, update_class, workshop_roster,
};
use http::{Method, header};
use tower_http::LatencyUnit;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::backend::StudioBackend;
use crate::openapi::ApiDoc;
use crate::settings::Settings;
use crate::submit::SubmitGuard;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub backend: Arc<StudioBackend>,
    pub submissions: SubmitGuard,
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let state = AppState {
        settings: settings.clone(),
        backend: Arc::new(StudioBackend::new(settings.backend_base_url.clone())),
        submissions: SubmitGuard::default(),
    };

    let app = build_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.settings.port));
    info!("Starting Alma Yoga back-office API on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    // The admin SPA is served from another origin, so the browser preflights
    // every JSON request.
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let mut router = Router::new()
        .route("/", get(root))
        .route("/healthz/live", get(healthz_live))
        .route("/healthz/ready", get(healthz_ready))
        .route("/teachers", get(list_teachers))
        .route("/classes", get(list_classes).post(create_class))
        .route("/classes/{id}", put(update_class))
        .route("/classes/{id}/roster", get(class_roster))
        .route("/workshops", post(create_workshop))
        .route(
            "/workshops/{id}/roster",
            get(workshop_roster).post(add_workshop_participant),
        )
        .with_state(state.clone());

    if state.settings.enable_swagger {
        let openapi = ApiDoc::openapi();
        let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi);
        router = router.merge(swagger);
    }

    router.layer(cors_layer).layer(trace_layer)
}
