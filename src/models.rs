use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

use crate::title::derive_title;

/// Weekday a class slot runs on. The studio backend stores the Spanish
/// lowercase name, so that is the wire value on both sides of the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ClassDay {
    #[serde(rename = "lunes")]
    Monday,
    #[serde(rename = "martes")]
    Tuesday,
    #[serde(rename = "miercoles")]
    Wednesday,
    #[serde(rename = "jueves")]
    Thursday,
    #[serde(rename = "viernes")]
    Friday,
    #[serde(rename = "sabado")]
    Saturday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Modality {
    #[default]
    Presencial,
    Online,
}

/// The backend stores the class type as a bare string on older records and
/// as a list on newer ones. Both shapes collapse into an ordered tag set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TagField {
    One(String),
    Many(Vec<String>),
}

impl Default for TagField {
    fn default() -> Self {
        TagField::Many(Vec::new())
    }
}

impl TagField {
    pub fn into_tags(self) -> Vec<String> {
        let raw = match self {
            TagField::One(tag) => vec![tag],
            TagField::Many(tags) => tags,
        };
        normalize_tags(raw)
    }
}

/// Trims tags, drops blanks and collapses duplicates while keeping the
/// first-selected-first order that drives the derived title.
pub fn normalize_tags(raw: Vec<String>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        if tags.iter().any(|seen| seen == trimmed) {
            continue;
        }
        tags.push(trimmed.to_string());
    }
    tags
}

/// A recurring class slot as served to the admin UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassSession {
    pub id: String,
    pub title: String,
    pub types: Vec<String>,
    pub day: ClassDay,
    #[schema(example = "18:30")]
    pub hour: String,
    pub duration_min: u32,
    pub teacher_id: String,
    pub capacity: u32,
    pub modality: Modality,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ClassSession {
    pub fn from_record(record: ClassRecord) -> Self {
        let types = record.class_type.into_tags();
        let title = record
            .title
            .filter(|title| !title.trim().is_empty())
            .or_else(|| derive_title(&types))
            .unwrap_or_default();
        Self {
            id: record.id,
            title,
            types,
            day: record.day,
            hour: record.hour,
            duration_min: record.duration,
            teacher_id: record.teacher,
            capacity: record.max_participants,
            modality: record.modalidad,
            notes: record.description,
        }
    }
}

/// Scheduling form body for `POST /classes` and `PUT /classes/{id}`. Every
/// field is optional at the serde level; completeness is judged by the
/// draft so the caller gets a field-specific message instead of a bare 422.
/// There deliberately is no `title` field: titles are always derived.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassForm {
    #[schema(value_type = Vec<String>)]
    pub types: Option<TagField>,
    pub day: Option<ClassDay>,
    #[schema(example = "18:30")]
    pub hour: Option<String>,
    pub teacher_id: Option<String>,
    pub duration_min: Option<u32>,
    pub capacity: Option<u32>,
    pub modality: Option<Modality>,
    pub notes: Option<String>,
}

/// Class row as the studio backend returns it, field names theirs,
/// including the Spanish `modalidad`.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "type")]
    pub class_type: TagField,
    pub day: ClassDay,
    pub hour: String,
    #[serde(alias = "teacherId")]
    pub teacher: String,
    pub duration: u32,
    pub max_participants: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "modality")]
    pub modalidad: Modality,
}

/// One-off paid event with its own roster.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Workshop {
    pub id: String,
    pub title: String,
    pub day: NaiveDate,
    #[schema(example = "10:00")]
    pub hour_start: String,
    #[schema(example = "13:00")]
    pub hour_end: String,
    pub price: f64,
    pub modality: Modality,
    pub capacity: u32,
    pub description: String,
    #[schema(value_type = Vec<String>)]
    pub images: Vec<Url>,
}

impl Workshop {
    pub fn from_record(record: WorkshopRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            day: record.day,
            hour_start: record.hour_start,
            hour_end: record.hour_end,
            price: record.price,
            modality: record.modality,
            capacity: record.max_participants,
            description: record.description.unwrap_or_default(),
            images: record.images,
        }
    }
}

/// Workshop creation body. Images must already live on the image host;
/// the gateway only forwards their URLs.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopForm {
    pub title: Option<String>,
    pub day: Option<NaiveDate>,
    #[schema(example = "10:00")]
    pub hour_start: Option<String>,
    #[schema(example = "13:00")]
    pub hour_end: Option<String>,
    pub price: Option<f64>,
    pub modality: Option<Modality>,
    pub capacity: Option<u32>,
    pub description: Option<String>,
    #[serde(default)]
    #[schema(value_type = Vec<String>)]
    pub images: Vec<Url>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub day: NaiveDate,
    pub hour_start: String,
    pub hour_end: String,
    pub price: f64,
    #[serde(default, alias = "modalidad")]
    pub modality: Modality,
    pub max_participants: u32,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<Url>,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

/// Enrolled user as owned by the backend. Read-only here: the gateway
/// never mutates participants, it only projects them into roster entries.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default, alias = "nombre")]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "telefono")]
    pub phone: Option<String>,
    #[serde(default)]
    pub enrolled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct TeacherProfile {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "nombre")]
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
