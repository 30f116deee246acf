use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use tracing::{debug, info, warn};

use super::availability::{AvailabilityEvaluator, AvailabilityOutcome, AvailabilityRequest};
use super::domain::{
    Car, CarFilter, CarId, CarPatch, ContactId, ContactInfo, ContactInfoPatch, NewCar,
    NewContactInfo,
};
use super::inquiry::{InquiryError, InquiryMessage, InquiryMessageComposer, InquiryRequest};
use super::repository::{CarRepository, ContactRepository, RepositoryError};
use super::validation::{CatalogValidator, ValidationError};

/// Service composing the catalog stores, payload validation, the availability
/// rules and the inquiry composer.
pub struct CatalogService<C, K> {
    cars: Arc<C>,
    contacts: Arc<K>,
    validator: CatalogValidator,
    availability: AvailabilityEvaluator,
    composer: InquiryMessageComposer,
}

impl<C, K> CatalogService<C, K>
where
    C: CarRepository + 'static,
    K: ContactRepository + 'static,
{
    pub fn new(cars: Arc<C>, contacts: Arc<K>) -> Self {
        Self::with_validator(cars, contacts, CatalogValidator::default())
    }

    pub fn with_validator(cars: Arc<C>, contacts: Arc<K>, validator: CatalogValidator) -> Self {
        Self {
            cars,
            contacts,
            validator,
            availability: AvailabilityEvaluator::new(),
            composer: InquiryMessageComposer::new(),
        }
    }

    /// Cars matching every supplied predicate, newest first. Cars created in the
    /// same instant fall back to the most recently assigned id.
    pub fn list_cars(&self, filter: &CarFilter) -> Result<Vec<Car>, CatalogServiceError> {
        let mut cars: Vec<Car> = self
            .cars
            .all()?
            .into_iter()
            .filter(|car| filter.matches(car))
            .collect();
        cars.sort_by(|left, right| {
            (right.created_at, right.id).cmp(&(left.created_at, left.id))
        });
        Ok(cars)
    }

    pub fn get_car(&self, id: CarId) -> Result<Option<Car>, CatalogServiceError> {
        Ok(self.cars.fetch(id)?)
    }

    pub fn create_car(&self, car: NewCar) -> Result<Car, CatalogServiceError> {
        self.validator.new_car(&car)?;
        let stored = self.cars.insert(car)?;
        info!(car_id = %stored.id, brand = %stored.brand, "car added to catalog");
        Ok(stored)
    }

    /// Returns `None` when the car does not exist.
    pub fn update_car(
        &self,
        id: CarId,
        patch: CarPatch,
    ) -> Result<Option<Car>, CatalogServiceError> {
        self.validator.car_patch(&patch)?;

        let Some(mut car) = self.cars.fetch(id)? else {
            return Ok(None);
        };
        car.apply(patch);
        car.updated_at = Utc::now();

        match self.cars.update(car.clone()) {
            Ok(()) => {
                info!(car_id = %id, "car updated");
                Ok(Some(car))
            }
            Err(RepositoryError::NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn delete_car(&self, id: CarId) -> Result<bool, CatalogServiceError> {
        let removed = self.cars.delete(id)?;
        if removed {
            info!(car_id = %id, "car removed from catalog");
        }
        Ok(removed)
    }

    /// Distinct brands in ascending order.
    pub fn car_brands(&self) -> Result<Vec<String>, CatalogServiceError> {
        let brands: BTreeSet<String> = self.cars.all()?.into_iter().map(|car| car.brand).collect();
        Ok(brands.into_iter().collect())
    }

    /// The default contact record, if one has been configured.
    pub fn contact_info(&self) -> Result<Option<ContactInfo>, CatalogServiceError> {
        Ok(self.contacts.first()?)
    }

    pub fn register_contact(
        &self,
        contact: NewContactInfo,
    ) -> Result<ContactInfo, CatalogServiceError> {
        self.validator.new_contact(&contact)?;
        let stored = self.contacts.insert(contact)?;
        info!(contact_id = stored.id.0, company = %stored.company_name, "contact registered");
        Ok(stored)
    }

    /// Returns `None` when the contact record does not exist.
    pub fn update_contact_info(
        &self,
        id: ContactId,
        patch: ContactInfoPatch,
    ) -> Result<Option<ContactInfo>, CatalogServiceError> {
        self.validator.contact_patch(&patch)?;

        let Some(mut contact) = self.contacts.fetch(id)? else {
            return Ok(None);
        };
        contact.apply(patch);
        contact.updated_at = Utc::now();

        match self.contacts.update(contact.clone()) {
            Ok(()) => {
                info!(contact_id = id.0, "contact information updated");
                Ok(Some(contact))
            }
            Err(RepositoryError::NotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Evaluates availability against the host's local calendar day.
    pub fn check_availability(
        &self,
        request: &AvailabilityRequest,
    ) -> Result<AvailabilityOutcome, CatalogServiceError> {
        self.check_availability_on(request, Local::now().date_naive())
    }

    pub fn check_availability_on(
        &self,
        request: &AvailabilityRequest,
        today: NaiveDate,
    ) -> Result<AvailabilityOutcome, CatalogServiceError> {
        let outcome = self
            .availability
            .evaluate(request, today, |id| self.cars.fetch(id))?;
        debug!(
            car_id = %outcome.car_id,
            verdict = outcome.verdict.label(),
            "availability evaluated"
        );
        Ok(outcome)
    }

    pub fn generate_inquiry(
        &self,
        request: &InquiryRequest,
    ) -> Result<InquiryMessage, CatalogServiceError> {
        self.validator.inquiry(request)?;

        let result = self.composer.compose(
            request,
            |id| self.cars.fetch(id),
            || self.contacts.first(),
        );

        match result {
            Ok(message) => {
                info!(car_id = %request.car_id, "inquiry message generated");
                Ok(message)
            }
            Err(err) => {
                warn!(car_id = %request.car_id, error = %err, "inquiry message generation failed");
                Err(err.into())
            }
        }
    }
}

/// Error raised by the catalog service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Inquiry(#[from] InquiryError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
