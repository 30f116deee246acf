//! Car rental catalog: stored cars and contact details, availability checks
//! and WhatsApp inquiry generation.

pub mod availability;
pub mod domain;
mod extract;
pub mod inquiry;
pub mod repository;
pub mod router;
pub mod schedule;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use availability::{
    AvailabilityEvaluator, AvailabilityOutcome, AvailabilityRejection, AvailabilityRequest,
    AvailabilityVerdict,
};
pub use domain::{
    Car, CarFilter, CarId, CarPatch, ContactId, ContactInfo, ContactInfoPatch, FuelType, NewCar,
    NewContactInfo, Transmission,
};
pub use inquiry::{InquiryError, InquiryMessage, InquiryMessageComposer, InquiryRequest};
pub use repository::{CarRepository, ContactRepository, RepositoryError};
pub use router::catalog_router;
pub use service::{CatalogService, CatalogServiceError};
pub use validation::{CatalogValidator, ValidationError};
