use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::models::TeacherProfile;
use crate::settings::Settings;

/// Back-office roles. `profe` is a teacher who may only manage their own
/// slots; anything else in the token is refused outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Profe,
}

/// Claims the studio backend signs into its session tokens (HS256,
/// shared secret).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub exp: i64,
}

/// Per-request session context. Carries the raw bearer token so backend
/// calls can forward it verbatim.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub role: Role,
    token: String,
}

impl Session {
    pub fn bearer_token(&self) -> &str {
        &self.token
    }
}

pub fn authenticate(
    settings: &Settings,
    auth: Option<Authorization<Bearer>>,
) -> Result<Session, ApiError> {
    let Some(auth) = auth else {
        return Err(ApiError::Unauthorized("Missing bearer token".into()));
    };
    let token = auth.token().to_string();
    let decoded = decode::<Claims>(
        &token,
        &DecodingKey::from_secret(settings.jwt_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|_| ApiError::Unauthorized("Invalid session token".into()))?;
    Ok(Session {
        user_id: decoded.claims.sub,
        role: decoded.claims.role,
        token,
    })
}

/// Teacher-picker entries visible to a session: admins see the whole
/// staff list, a `profe` sees exactly their own profile.
pub fn visible_teachers(session: &Session, teachers: Vec<TeacherProfile>) -> Vec<TeacherProfile> {
    match session.role {
        Role::Admin => teachers,
        Role::Profe => teachers
            .into_iter()
            .filter(|teacher| teacher.id == session.user_id)
            .collect(),
    }
}
