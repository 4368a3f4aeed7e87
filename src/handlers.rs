use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use futures::try_join;
use tracing::info;

use crate::{
    AppState,
    auth::{Session, authenticate, visible_teachers},
    backend::WorkshopPayload,
    draft::SessionDraft,
    error::ApiError,
    models::{ClassForm, ClassSession, TeacherProfile, Workshop, WorkshopForm},
    roster::RosterView,
    submit::SubmitPermit,
    validation::{
        require, validate_capacity, validate_price, validate_record_id, validate_required_text,
        validate_time_range,
    },
};

type AuthHeader = Option<TypedHeader<Authorization<Bearer>>>;

fn session(state: &AppState, auth: AuthHeader) -> Result<Session, ApiError> {
    authenticate(&state.settings, auth.map(|TypedHeader(a)| a))
}

fn begin_submission(state: &AppState, key: String) -> Result<SubmitPermit, ApiError> {
    state.submissions.try_begin(key).ok_or_else(|| {
        ApiError::Conflict("Esta operación ya está en curso, espera a que termine".into())
    })
}

#[utoipa::path(get, path = "/", tag = "scheduling")]
pub async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "Alma Yoga back-office API",
        "endpoints": {
            "/teachers": "Teachers visible to the current session",
            "/classes": "List class slots or create a new one",
            "/classes/{id}": "Update an existing class slot",
            "/classes/{id}/roster": "Fresh roster and occupancy for a class",
            "/workshops": "Create a workshop",
            "/workshops/{id}/roster": "Fresh roster and occupancy for a workshop"
        }
    }))
}

#[utoipa::path(get, path = "/healthz/live", tag = "scheduling")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "scheduling")]
pub async fn healthz_ready() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    get,
    path = "/teachers",
    responses(
        (status = 200, description = "Teachers visible to this session", body = [TeacherProfile]),
        (status = 401, description = "Missing or invalid session token")
    ),
    security(("bearer_auth" = [])),
    tag = "scheduling"
)]
pub async fn list_teachers(
    State(state): State<AppState>,
    auth: AuthHeader,
) -> Result<impl IntoResponse, ApiError> {
    let session = session(&state, auth)?;
    let teachers = state.backend.list_teachers(session.bearer_token()).await?;
    Ok(Json(visible_teachers(&session, teachers)))
}

#[utoipa::path(
    get,
    path = "/classes",
    responses(
        (status = 200, description = "All scheduled class slots", body = [ClassSession]),
        (status = 401, description = "Missing or invalid session token")
    ),
    security(("bearer_auth" = [])),
    tag = "scheduling"
)]
pub async fn list_classes(
    State(state): State<AppState>,
    auth: AuthHeader,
) -> Result<impl IntoResponse, ApiError> {
    let session = session(&state, auth)?;
    let records = state.backend.list_classes(session.bearer_token()).await?;
    let sessions: Vec<ClassSession> = records.into_iter().map(ClassSession::from_record).collect();
    Ok(Json(sessions))
}

#[utoipa::path(
    post,
    path = "/classes",
    request_body = ClassForm,
    responses(
        (status = 201, description = "Class created", body = ClassSession),
        (status = 400, description = "Incomplete or malformed scheduling form"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 409, description = "A submission for this form is already running")
    ),
    security(("bearer_auth" = [])),
    tag = "scheduling"
)]
pub async fn create_class(
    State(state): State<AppState>,
    auth: AuthHeader,
    Json(form): Json<ClassForm>,
) -> Result<impl IntoResponse, ApiError> {
    let session = session(&state, auth)?;
    let draft = SessionDraft::from_form(None, &form);
    let payload = draft.to_payload()?;

    let _permit = begin_submission(&state, format!("{}:classes:create", session.user_id))?;
    let record = state
        .backend
        .create_class(session.bearer_token(), &payload)
        .await?;
    info!(class = %record.id, title = %payload.title, "class created");
    Ok((StatusCode::CREATED, Json(ClassSession::from_record(record))))
}

#[utoipa::path(
    put,
    path = "/classes/{id}",
    request_body = ClassForm,
    params(("id" = String, Path, description = "Class id")),
    responses(
        (status = 200, description = "Class updated", body = ClassSession),
        (status = 400, description = "Incomplete or malformed scheduling form"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 404, description = "Unknown class id"),
        (status = 409, description = "A submission for this class is already running")
    ),
    security(("bearer_auth" = [])),
    tag = "scheduling"
)]
pub async fn update_class(
    State(state): State<AppState>,
    auth: AuthHeader,
    Path(id): Path<String>,
    Json(form): Json<ClassForm>,
) -> Result<impl IntoResponse, ApiError> {
    let session = session(&state, auth)?;
    validate_record_id(&id)?;
    let draft = SessionDraft::from_form(Some(id.clone()), &form);
    let payload = draft.to_payload()?;

    let _permit = begin_submission(&state, format!("{}:classes:{id}", session.user_id))?;
    let record = state
        .backend
        .update_class(session.bearer_token(), &id, &payload)
        .await?;
    info!(class = %record.id, "class updated");
    Ok(Json(ClassSession::from_record(record)))
}

#[utoipa::path(
    get,
    path = "/classes/{id}/roster",
    params(("id" = String, Path, description = "Class id")),
    responses(
        (status = 200, description = "Fresh roster with occupancy", body = RosterView),
        (status = 400, description = "Malformed class id"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 404, description = "Unknown class id")
    ),
    security(("bearer_auth" = [])),
    tag = "roster"
)]
pub async fn class_roster(
    State(state): State<AppState>,
    auth: AuthHeader,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session = session(&state, auth)?;
    validate_record_id(&id)?;
    let token = session.bearer_token();
    let (record, participants) = try_join!(
        state.backend.fetch_class(token, &id),
        state.backend.class_participants(token, &id),
    )?;
    Ok(Json(RosterView::assemble(
        record.max_participants,
        participants,
    )))
}

#[utoipa::path(
    post,
    path = "/workshops",
    request_body = WorkshopForm,
    responses(
        (status = 201, description = "Workshop created", body = Workshop),
        (status = 400, description = "Incomplete or malformed workshop form"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 409, description = "A submission for this form is already running")
    ),
    security(("bearer_auth" = [])),
    tag = "scheduling"
)]
pub async fn create_workshop(
    State(state): State<AppState>,
    auth: AuthHeader,
    Json(form): Json<WorkshopForm>,
) -> Result<impl IntoResponse, ApiError> {
    let session = session(&state, auth)?;

    let title = validate_required_text("title", form.title.as_deref())?;
    let day = require("day", form.day)?;
    let hour_start = require("hourStart", form.hour_start)?;
    let hour_end = require("hourEnd", form.hour_end)?;
    validate_time_range(&hour_start, &hour_end)?;
    let capacity = validate_capacity(require("capacity", form.capacity)?)?;
    let price = validate_price(require("price", form.price)?)?;

    let payload = WorkshopPayload {
        title,
        day,
        hour_start,
        hour_end,
        price,
        modality: form.modality.unwrap_or_default(),
        max_participants: capacity,
        description: form.description.unwrap_or_default(),
        images: form.images,
    };

    let _permit = begin_submission(&state, format!("{}:workshops:create", session.user_id))?;
    let record = state
        .backend
        .create_workshop(session.bearer_token(), &payload)
        .await?;
    info!(workshop = %record.id, title = %payload.title, "workshop created");
    Ok((StatusCode::CREATED, Json(Workshop::from_record(record))))
}

#[utoipa::path(
    get,
    path = "/workshops/{id}/roster",
    params(("id" = String, Path, description = "Workshop id")),
    responses(
        (status = 200, description = "Fresh roster with occupancy", body = RosterView),
        (status = 400, description = "Malformed workshop id"),
        (status = 401, description = "Missing or invalid session token"),
        (status = 404, description = "Unknown workshop id")
    ),
    security(("bearer_auth" = [])),
    tag = "roster"
)]
pub async fn workshop_roster(
    State(state): State<AppState>,
    auth: AuthHeader,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session = session(&state, auth)?;
    validate_record_id(&id)?;
    let token = session.bearer_token();
    let (record, participants) = try_join!(
        state.backend.fetch_workshop(token, &id),
        state.backend.workshop_participants(token, &id),
    )?;
    Ok(Json(RosterView::assemble(
        record.max_participants,
        participants,
    )))
}

#[utoipa::path(
    post,
    path = "/workshops/{id}/roster",
    params(("id" = String, Path, description = "Workshop id")),
    responses(
        (status = 401, description = "Missing or invalid session token"),
        (status = 501, description = "Manual enrollment is not wired up yet")
    ),
    security(("bearer_auth" = [])),
    tag = "roster"
)]
pub async fn add_workshop_participant(
    State(state): State<AppState>,
    auth: AuthHeader,
    Path(_id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let _session = session(&state, auth)?;
    // Enrollment runs through the public booking flow; the studio backend
    // exposes no admin-side endpoint for it yet.
    Err(ApiError::NotImplemented(
        "La inscripción manual todavía no está disponible".into(),
    ))
}
