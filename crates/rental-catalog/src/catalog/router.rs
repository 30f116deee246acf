use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::json;

use super::availability::AvailabilityRequest;
use super::domain::{CarFilter, CarId, CarPatch, ContactId, ContactInfoPatch, NewCar};
use super::extract::{CatalogJson, CatalogPath, CatalogQuery};
use super::inquiry::{InquiryError, InquiryRequest};
use super::repository::{CarRepository, ContactRepository, RepositoryError};
use super::service::{CatalogService, CatalogServiceError};

type SharedService<C, K> = State<Arc<CatalogService<C, K>>>;

/// Router builder exposing the catalog, contact, availability and inquiry endpoints.
pub fn catalog_router<C, K>(service: Arc<CatalogService<C, K>>) -> Router
where
    C: CarRepository + 'static,
    K: ContactRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/cars",
            get(list_handler::<C, K>).post(create_handler::<C, K>),
        )
        .route(
            "/api/v1/cars/:car_id",
            get(car_handler::<C, K>)
                .patch(update_handler::<C, K>)
                .delete(delete_handler::<C, K>),
        )
        .route("/api/v1/brands", get(brands_handler::<C, K>))
        .route("/api/v1/contact", get(contact_handler::<C, K>))
        .route(
            "/api/v1/contact/:contact_id",
            patch(contact_update_handler::<C, K>),
        )
        .route("/api/v1/availability", post(availability_handler::<C, K>))
        .route("/api/v1/inquiries/whatsapp", post(inquiry_handler::<C, K>))
        .with_state(service)
}

pub(crate) async fn list_handler<C, K>(
    State(service): SharedService<C, K>,
    CatalogQuery(filter): CatalogQuery<CarFilter>,
) -> Response
where
    C: CarRepository + 'static,
    K: ContactRepository + 'static,
{
    match service.list_cars(&filter) {
        Ok(cars) => (StatusCode::OK, Json(cars)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_handler<C, K>(
    State(service): SharedService<C, K>,
    CatalogJson(car): CatalogJson<NewCar>,
) -> Response
where
    C: CarRepository + 'static,
    K: ContactRepository + 'static,
{
    match service.create_car(car) {
        Ok(car) => (StatusCode::CREATED, Json(car)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn car_handler<C, K>(
    State(service): SharedService<C, K>,
    CatalogPath(car_id): CatalogPath<i64>,
) -> Response
where
    C: CarRepository + 'static,
    K: ContactRepository + 'static,
{
    let id = CarId(car_id);
    match service.get_car(id) {
        Ok(Some(car)) => (StatusCode::OK, Json(car)).into_response(),
        Ok(None) => car_not_found(id),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_handler<C, K>(
    State(service): SharedService<C, K>,
    CatalogPath(car_id): CatalogPath<i64>,
    CatalogJson(patch): CatalogJson<CarPatch>,
) -> Response
where
    C: CarRepository + 'static,
    K: ContactRepository + 'static,
{
    let id = CarId(car_id);
    match service.update_car(id, patch) {
        Ok(Some(car)) => (StatusCode::OK, Json(car)).into_response(),
        Ok(None) => car_not_found(id),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn delete_handler<C, K>(
    State(service): SharedService<C, K>,
    CatalogPath(car_id): CatalogPath<i64>,
) -> Response
where
    C: CarRepository + 'static,
    K: ContactRepository + 'static,
{
    let id = CarId(car_id);
    match service.delete_car(id) {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => car_not_found(id),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn brands_handler<C, K>(State(service): SharedService<C, K>) -> Response
where
    C: CarRepository + 'static,
    K: ContactRepository + 'static,
{
    match service.car_brands() {
        Ok(brands) => (StatusCode::OK, Json(brands)).into_response(),
        Err(err) => error_response(err),
    }
}

/// Responds with `null` when no contact record has been configured yet.
pub(crate) async fn contact_handler<C, K>(State(service): SharedService<C, K>) -> Response
where
    C: CarRepository + 'static,
    K: ContactRepository + 'static,
{
    match service.contact_info() {
        Ok(contact) => (StatusCode::OK, Json(contact)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn contact_update_handler<C, K>(
    State(service): SharedService<C, K>,
    CatalogPath(contact_id): CatalogPath<i64>,
    CatalogJson(patch): CatalogJson<ContactInfoPatch>,
) -> Response
where
    C: CarRepository + 'static,
    K: ContactRepository + 'static,
{
    match service.update_contact_info(ContactId(contact_id), patch) {
        Ok(Some(contact)) => (StatusCode::OK, Json(contact)).into_response(),
        Ok(None) => {
            let payload = json!({
                "error": format!("contact information with id {contact_id} not found"),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(err) => error_response(err),
    }
}

/// Negative availability answers are still successful responses.
pub(crate) async fn availability_handler<C, K>(
    State(service): SharedService<C, K>,
    CatalogJson(request): CatalogJson<AvailabilityRequest>,
) -> Response
where
    C: CarRepository + 'static,
    K: ContactRepository + 'static,
{
    match service.check_availability(&request) {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn inquiry_handler<C, K>(
    State(service): SharedService<C, K>,
    CatalogJson(request): CatalogJson<InquiryRequest>,
) -> Response
where
    C: CarRepository + 'static,
    K: ContactRepository + 'static,
{
    match service.generate_inquiry(&request) {
        Ok(message) => (StatusCode::OK, Json(message)).into_response(),
        Err(err) => error_response(err),
    }
}

fn car_not_found(id: CarId) -> Response {
    let payload = json!({
        "error": format!("car with id {id} not found"),
    });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}

fn error_response(err: CatalogServiceError) -> Response {
    let status = match &err {
        CatalogServiceError::Validation(_)
        | CatalogServiceError::Inquiry(InquiryError::InvalidDate(_))
        | CatalogServiceError::Inquiry(InquiryError::AmountOverflow { .. }) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        CatalogServiceError::Inquiry(InquiryError::CarNotFound(_))
        | CatalogServiceError::Inquiry(InquiryError::ContactNotFound)
        | CatalogServiceError::Inquiry(InquiryError::Repository(RepositoryError::NotFound))
        | CatalogServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        CatalogServiceError::Inquiry(InquiryError::Repository(_))
        | CatalogServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": err.to_string(),
    });
    (status, Json(payload)).into_response()
}
