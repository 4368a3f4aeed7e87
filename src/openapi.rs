use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::capacity::Occupancy;
use crate::models::{ClassDay, ClassForm, ClassSession, Modality, TeacherProfile, Workshop, WorkshopForm};
use crate::roster::{RosterEntry, RosterView};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::list_teachers,
        crate::handlers::list_classes,
        crate::handlers::create_class,
        crate::handlers::update_class,
        crate::handlers::class_roster,
        crate::handlers::create_workshop,
        crate::handlers::workshop_roster,
        crate::handlers::add_workshop_participant
    ),
    components(schemas(
        ClassDay,
        ClassForm,
        ClassSession,
        Modality,
        Occupancy,
        RosterEntry,
        RosterView,
        TeacherProfile,
        Workshop,
        WorkshopForm
    )),
    tags(
        (name = "scheduling", description = "Class and workshop scheduling operations"),
        (name = "roster", description = "Roster and occupancy views")
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;
