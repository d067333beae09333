use std::collections::BTreeMap;

use rocket::serde::json::{self, Json};
use rocket::{Build, Request, Rocket, Route, State};

pub mod bookings;
pub mod diagnostics;
pub mod materials;
pub mod tutors;

use bookings::*;
use diagnostics::*;
use materials::*;
use tutors::*;

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    data::{
        booking::{Booking, CreateBooking},
        material::{CreateMaterial, Material},
        tutor::{CreateTutor, Tutor},
        BookingStatus, Course, Envelope, MaterialType, Resource, SessionMode,
    },
    error::StoreError,
    resp::{
        document::{BookingCreatedResponse, CreatedResponse, ItemsResponse},
        problem::{problems, Problem},
    },
    store::Storage,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        hello,
        material_list,
        material_create,
        tutor_list,
        tutor_create,
        booking_create
    ),
    components(schemas(
        Course,
        MaterialType,
        SessionMode,
        BookingStatus,
        Material,
        Tutor,
        Booking,
        CreateMaterial,
        CreateTutor,
        CreateBooking,
        ItemsResponse,
        CreatedResponse,
        BookingCreatedResponse,
        Message,
        Problem
    )),
    modifiers(&API_PREFIX)
)]
pub struct ApiDoc;

pub struct PathPrefix(pub &'static str);
static API_PREFIX: PathPrefix = PathPrefix("/api");

impl utoipa::Modify for PathPrefix {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut new_paths = BTreeMap::new();

        for (path, item) in std::mem::take(&mut openapi.paths.paths) {
            new_paths.insert(self.0.to_string() + path.as_ref(), item);
        }

        openapi.paths.paths = new_paths;
    }
}

/// Treats a present but empty query parameter as absent.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|it| !it.is_empty())
}

/// POST body guard. Unparseable JSON reaches the handler as an error instead
/// of short-circuiting to Rocket's 400 page.
pub type EnvelopeBody<'r> = Result<Json<Envelope>, json::Error<'r>>;

/// Unwraps a posted body; malformed JSON is an unprocessable request.
pub fn read_envelope(payload: EnvelopeBody<'_>) -> Result<Envelope, Problem> {
    match payload {
        Ok(envelope) => Ok(envelope.into_inner()),
        Err(e) => {
            tracing::debug!("Rejected request body: {}", e);
            Err(problems::parse_problem().detail(e).to_owned())
        }
    }
}

/// Validates the wrapped resource and stores it, returning the new identifier.
pub async fn create_resource<R: Resource>(
    payload: EnvelopeBody<'_>,
    storage: &State<Storage>,
) -> Result<String, Problem> {
    let resource: R = read_envelope(payload)?.resource()?;
    let store = storage.require()?;

    let doc = resource.to_document().map_err(StoreError::from)?;
    Ok(store.insert(R::COLLECTION, doc).await?)
}

#[catch(404)]
pub fn not_found(req: &Request) -> Problem {
    problems::not_found()
        .instance_uri(req.uri().to_string())
        .to_owned()
}

#[catch(422)]
pub fn unprocessable(req: &Request) -> Problem {
    problems::parse_problem()
        .detail("Body must be a JSON object with the resource under 'data'.")
        .instance_uri(req.uri().to_string())
        .to_owned()
}

#[catch(500)]
pub fn internal_error(req: &Request) -> Problem {
    Problem::new_untyped(
        rocket::http::Status::InternalServerError,
        "Server failed while processing request.",
    )
    .instance_uri(req.uri().to_string())
    .to_owned()
}

pub fn api() -> Vec<Route> {
    routes![
        hello,
        material_list,
        material_create,
        tutor_list,
        tutor_create,
        booking_create
    ]
}

pub fn mount_api(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .mount("/api", api())
        .mount(
            "/",
            SwaggerUi::new("/swagger/<_..>").url("/api/openapi.json", ApiDoc::openapi()),
        )
        .mount("/", routes![index, diagnostic_report])
        .register("/", catchers![not_found, unprocessable, internal_error])
}
