use chrono::{Datelike, Utc};
use url::Url;

use super::domain::{CarPatch, ContactInfoPatch, NewCar, NewContactInfo};
use super::inquiry::InquiryRequest;

const MIN_YEAR: i32 = 1900;
const MIN_SEATS: u8 = 1;
const MAX_SEATS: u8 = 20;

/// Validation errors raised before payloads reach the store or the composer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },
    #[error("year must be between {min} and {max}, found {found}")]
    YearOutOfRange { min: i32, max: i32, found: i32 },
    #[error("rental price per day must be greater than zero")]
    NonPositivePrice,
    #[error("seats must be between 1 and 20, found {found}")]
    SeatsOutOfRange { found: u8 },
    #[error("{field} must be a valid URL")]
    InvalidUrl { field: &'static str },
    #[error("email must be a valid address")]
    InvalidEmail,
}

/// Shape checks for catalog payloads. The year ceiling follows the calendar:
/// next year's models may be listed, nothing later.
#[derive(Debug, Clone, Copy)]
pub struct CatalogValidator {
    current_year: i32,
}

impl Default for CatalogValidator {
    fn default() -> Self {
        Self::for_year(Utc::now().year())
    }
}

impl CatalogValidator {
    pub fn for_year(current_year: i32) -> Self {
        Self { current_year }
    }

    pub fn new_car(&self, car: &NewCar) -> Result<(), ValidationError> {
        require_text("name", &car.name)?;
        require_text("brand", &car.brand)?;
        require_text("model", &car.model)?;
        self.year(car.year)?;
        require_url("image_url", &car.image_url)?;
        price(car.rental_price_per_day)?;
        seats(car.seats)
    }

    pub fn car_patch(&self, patch: &CarPatch) -> Result<(), ValidationError> {
        if let Some(name) = &patch.name {
            require_text("name", name)?;
        }
        if let Some(brand) = &patch.brand {
            require_text("brand", brand)?;
        }
        if let Some(model) = &patch.model {
            require_text("model", model)?;
        }
        if let Some(year) = patch.year {
            self.year(year)?;
        }
        if let Some(image_url) = &patch.image_url {
            require_url("image_url", image_url)?;
        }
        if let Some(amount) = patch.rental_price_per_day {
            price(amount)?;
        }
        if let Some(count) = patch.seats {
            seats(count)?;
        }
        Ok(())
    }

    pub fn new_contact(&self, contact: &NewContactInfo) -> Result<(), ValidationError> {
        require_text("company_name", &contact.company_name)?;
        require_text("phone", &contact.phone)?;
        email(&contact.email)?;
        require_text("address", &contact.address)?;
        require_text("whatsapp_number", &contact.whatsapp_number)?;
        if let Some(link) = &contact.facebook_url {
            require_url("facebook_url", link)?;
        }
        if let Some(link) = &contact.instagram_url {
            require_url("instagram_url", link)?;
        }
        require_text("business_hours", &contact.business_hours)
    }

    pub fn contact_patch(&self, patch: &ContactInfoPatch) -> Result<(), ValidationError> {
        if let Some(company_name) = &patch.company_name {
            require_text("company_name", company_name)?;
        }
        if let Some(phone) = &patch.phone {
            require_text("phone", phone)?;
        }
        if let Some(value) = &patch.email {
            email(value)?;
        }
        if let Some(address) = &patch.address {
            require_text("address", address)?;
        }
        if let Some(whatsapp_number) = &patch.whatsapp_number {
            require_text("whatsapp_number", whatsapp_number)?;
        }
        if let Some(Some(link)) = &patch.facebook_url {
            require_url("facebook_url", link)?;
        }
        if let Some(Some(link)) = &patch.instagram_url {
            require_url("instagram_url", link)?;
        }
        if let Some(business_hours) = &patch.business_hours {
            require_text("business_hours", business_hours)?;
        }
        Ok(())
    }

    pub fn inquiry(&self, request: &InquiryRequest) -> Result<(), ValidationError> {
        require_text("customer_name", &request.customer_name)?;
        require_text("customer_phone", &request.customer_phone)?;
        require_text("rental_start_date", &request.rental_start_date)?;
        require_text("rental_end_date", &request.rental_end_date)
    }

    fn year(&self, year: i32) -> Result<(), ValidationError> {
        let max = self.current_year + 1;
        if (MIN_YEAR..=max).contains(&year) {
            Ok(())
        } else {
            Err(ValidationError::YearOutOfRange {
                min: MIN_YEAR,
                max,
                found: year,
            })
        }
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField { field })
    } else {
        Ok(())
    }
}

fn require_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    match Url::parse(value.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::InvalidUrl { field }),
    }
}

fn price(amount: rust_decimal::Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_positive() && !amount.is_zero() {
        Ok(())
    } else {
        Err(ValidationError::NonPositivePrice)
    }
}

fn seats(count: u8) -> Result<(), ValidationError> {
    if (MIN_SEATS..=MAX_SEATS).contains(&count) {
        Ok(())
    } else {
        Err(ValidationError::SeatsOutOfRange { found: count })
    }
}

fn email(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain))
            if !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.') =>
        {
            Ok(())
        }
        _ => Err(ValidationError::InvalidEmail),
    }
}
