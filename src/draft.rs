use thiserror::Error;

use crate::backend::ClassPayload;
use crate::models::{ClassDay, ClassForm, ClassRecord, Modality, normalize_tags};
use crate::title::derive_title;
use crate::validation::{duration_allowed, parse_hour};

#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("at least one class type must be selected")]
    NoTypes,
    #[error("day is required")]
    MissingDay,
    #[error("hour is required")]
    MissingHour,
    #[error("teacher is required")]
    MissingTeacher,
    #[error("duration is required")]
    MissingDuration,
    #[error("capacity is required")]
    MissingCapacity,
    #[error("hour must be HH:MM, got {0:?}")]
    InvalidHour(String),
    #[error("duration must be one of 15, 30, 45, 60, 90 or 120 minutes, got {0}")]
    UnknownDuration(u32),
    #[error("capacity must be greater than zero")]
    ZeroCapacity,
}

/// Where the scheduling form stands between "just opened" and "can be
/// sent": no tags yet, tags but gaps elsewhere, or complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    NoTypesSelected,
    PartialSelection,
    ReadyToSubmit,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct DraftFields {
    types: Vec<String>,
    title: Option<String>,
    day: Option<ClassDay>,
    hour: Option<String>,
    teacher_id: Option<String>,
    duration_min: Option<u32>,
    capacity: Option<u32>,
    modality: Modality,
    notes: String,
}

/// In-progress class schedule: the server-side rendition of the admin
/// scheduling form. The title lives inside and is regenerated on every tag
/// mutation; there is no way to set it directly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionDraft {
    id: Option<String>,
    fields: DraftFields,
    initial: DraftFields,
}

impl SessionDraft {
    /// Blank draft for creating a new class.
    pub fn new() -> Self {
        Self::default()
    }

    /// Draft prefilled from an existing record, for editing. Every field
    /// carries over; the tag set is rebuilt whether the backend stored the
    /// type as a single string or a list, and the title is re-derived from
    /// those tags rather than trusted from the record.
    pub fn from_record(record: &ClassRecord) -> Self {
        let mut fields = DraftFields {
            day: Some(record.day),
            hour: Some(record.hour.clone()),
            teacher_id: Some(record.teacher.clone()),
            duration_min: Some(record.duration),
            capacity: Some(record.max_participants),
            modality: record.modalidad,
            notes: record.description.clone().unwrap_or_default(),
            ..DraftFields::default()
        };
        fields.types = record.class_type.clone().into_tags();
        fields.title = derive_title(&fields.types);
        Self {
            id: Some(record.id.clone()),
            fields: fields.clone(),
            initial: fields,
        }
    }

    /// Draft populated from a submitted form body. `id` is present when the
    /// submission targets an existing class.
    pub fn from_form(id: Option<String>, form: &ClassForm) -> Self {
        let mut draft = Self {
            id,
            ..Self::default()
        };
        if let Some(tags) = &form.types {
            draft.set_types(tags.clone().into_tags());
        }
        draft.fields.day = form.day;
        draft.fields.hour = form.hour.clone();
        draft.fields.teacher_id = form.teacher_id.clone();
        draft.fields.duration_min = form.duration_min;
        draft.fields.capacity = form.capacity;
        if let Some(modality) = form.modality {
            draft.fields.modality = modality;
        }
        if let Some(notes) = &form.notes {
            draft.fields.notes = notes.clone();
        }
        draft
    }

    /// Adds the tag if absent, removes it if present.
    pub fn toggle_type(&mut self, tag: &str) {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return;
        }
        if let Some(position) = self.fields.types.iter().position(|seen| seen == trimmed) {
            self.fields.types.remove(position);
        } else {
            self.fields.types.push(trimmed.to_string());
        }
        self.refresh_title();
    }

    pub fn set_types(&mut self, tags: Vec<String>) {
        self.fields.types = normalize_tags(tags);
        self.refresh_title();
    }

    fn refresh_title(&mut self) {
        self.fields.title = derive_title(&self.fields.types);
    }

    /// Returns to the state the draft opened with: blank for a creation
    /// draft, the prefilled record for an editing draft. Called after a
    /// successful submission.
    pub fn reset(&mut self) {
        self.fields = self.initial.clone();
    }

    pub fn state(&self) -> DraftState {
        if self.fields.types.is_empty() {
            return DraftState::NoTypesSelected;
        }
        let complete = self.fields.day.is_some()
            && self.fields.hour.is_some()
            && self.fields.teacher_id.is_some()
            && self.fields.duration_min.is_some()
            && self.fields.capacity.is_some();
        if complete {
            DraftState::ReadyToSubmit
        } else {
            DraftState::PartialSelection
        }
    }

    /// Converts a complete draft into the backend payload, reporting the
    /// first gap or malformed field otherwise.
    pub fn to_payload(&self) -> Result<ClassPayload, DraftError> {
        let title = self.fields.title.clone().ok_or(DraftError::NoTypes)?;
        let day = self.fields.day.ok_or(DraftError::MissingDay)?;
        let hour = self.fields.hour.clone().ok_or(DraftError::MissingHour)?;
        if parse_hour(&hour).is_none() {
            return Err(DraftError::InvalidHour(hour));
        }
        let teacher = self
            .fields
            .teacher_id
            .clone()
            .ok_or(DraftError::MissingTeacher)?;
        let duration = self.fields.duration_min.ok_or(DraftError::MissingDuration)?;
        if !duration_allowed(duration) {
            return Err(DraftError::UnknownDuration(duration));
        }
        let capacity = self.fields.capacity.ok_or(DraftError::MissingCapacity)?;
        if capacity == 0 {
            return Err(DraftError::ZeroCapacity);
        }
        Ok(ClassPayload {
            title,
            class_type: self.fields.types.clone(),
            day,
            hour,
            teacher,
            duration,
            max_participants: capacity,
            description: self.fields.notes.clone(),
            modalidad: self.fields.modality,
        })
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn types(&self) -> &[String] {
        &self.fields.types
    }

    pub fn title(&self) -> Option<&str> {
        self.fields.title.as_deref()
    }

    pub fn day(&self) -> Option<ClassDay> {
        self.fields.day
    }

    pub fn hour(&self) -> Option<&str> {
        self.fields.hour.as_deref()
    }

    pub fn teacher_id(&self) -> Option<&str> {
        self.fields.teacher_id.as_deref()
    }

    pub fn duration_min(&self) -> Option<u32> {
        self.fields.duration_min
    }

    pub fn capacity(&self) -> Option<u32> {
        self.fields.capacity
    }

    pub fn modality(&self) -> Modality {
        self.fields.modality
    }

    pub fn notes(&self) -> &str {
        &self.fields.notes
    }
}
