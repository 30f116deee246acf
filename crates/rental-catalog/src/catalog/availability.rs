use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Car, CarId};
use super::repository::RepositoryError;
use super::schedule::RentalWindow;

/// Availability query for a single car over a requested window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRequest {
    pub car_id: CarId,
    pub start_date: String,
    pub end_date: String,
}

/// Why a request was turned down, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityRejection {
    InvalidDateFormat,
    InvalidRange,
    StartInPast,
    CarNotFound,
    CarUnavailable,
}

impl AvailabilityRejection {
    pub fn label(self) -> &'static str {
        match self {
            AvailabilityRejection::InvalidDateFormat => "invalid_date_format",
            AvailabilityRejection::InvalidRange => "invalid_range",
            AvailabilityRejection::StartInPast => "start_in_past",
            AvailabilityRejection::CarNotFound => "car_not_found",
            AvailabilityRejection::CarUnavailable => "car_unavailable",
        }
    }

    /// Customer-facing explanation shown with the negative answer.
    pub fn message(self) -> &'static str {
        match self {
            AvailabilityRejection::InvalidDateFormat => "Format tanggal tidak valid",
            AvailabilityRejection::InvalidRange => "Tanggal mulai harus sebelum tanggal selesai",
            AvailabilityRejection::StartInPast => "Tanggal mulai tidak boleh di masa lalu",
            AvailabilityRejection::CarNotFound => "Mobil tidak ditemukan",
            AvailabilityRejection::CarUnavailable => "Mobil sedang tidak tersedia untuk disewa",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityVerdict {
    Available,
    Rejected(AvailabilityRejection),
}

impl AvailabilityVerdict {
    pub fn label(self) -> &'static str {
        match self {
            AvailabilityVerdict::Available => "available",
            AvailabilityVerdict::Rejected(rejection) => rejection.label(),
        }
    }
}

/// Answer returned to callers. Negative outcomes are values, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityOutcome {
    pub car_id: CarId,
    pub is_available: bool,
    pub message: String,
    #[serde(skip)]
    pub verdict: AvailabilityVerdict,
}

impl AvailabilityOutcome {
    fn rejected(car_id: CarId, rejection: AvailabilityRejection) -> Self {
        Self {
            car_id,
            is_available: false,
            message: rejection.message().to_string(),
            verdict: AvailabilityVerdict::Rejected(rejection),
        }
    }

    fn available(car: &Car, days: i64) -> Self {
        Self {
            car_id: car.id,
            is_available: true,
            message: format!("Mobil {} tersedia untuk disewa selama {} hari", car.name, days),
            verdict: AvailabilityVerdict::Available,
        }
    }
}

/// Stateless rule pipeline deciding whether a car can be requested for a window.
///
/// Checks run in a fixed order and the first failure wins: date format, range
/// ordering, start not before `today`, car existence, then the availability flag.
/// There is no reservation ledger, so overlapping requests are never detected.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityEvaluator;

impl AvailabilityEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// `lookup` is only invoked once the requested window passes validation.
    pub fn evaluate<F>(
        &self,
        request: &AvailabilityRequest,
        today: NaiveDate,
        lookup: F,
    ) -> Result<AvailabilityOutcome, RepositoryError>
    where
        F: FnOnce(CarId) -> Result<Option<Car>, RepositoryError>,
    {
        let car_id = request.car_id;

        let Some(window) = RentalWindow::parse(&request.start_date, &request.end_date) else {
            return Ok(AvailabilityOutcome::rejected(
                car_id,
                AvailabilityRejection::InvalidDateFormat,
            ));
        };

        if !window.is_ordered() {
            return Ok(AvailabilityOutcome::rejected(
                car_id,
                AvailabilityRejection::InvalidRange,
            ));
        }

        if window.start.date() < today {
            return Ok(AvailabilityOutcome::rejected(
                car_id,
                AvailabilityRejection::StartInPast,
            ));
        }

        let Some(car) = lookup(car_id)? else {
            return Ok(AvailabilityOutcome::rejected(
                car_id,
                AvailabilityRejection::CarNotFound,
            ));
        };

        if !car.is_available {
            return Ok(AvailabilityOutcome::rejected(
                car_id,
                AvailabilityRejection::CarUnavailable,
            ));
        }

        Ok(AvailabilityOutcome::available(&car, window.duration_days()))
    }
}
