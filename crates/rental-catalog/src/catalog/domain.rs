use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier wrapper for catalog cars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarId(pub i64);

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier wrapper for contact records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transmission {
    Manual,
    Automatic,
}

impl Transmission {
    pub fn as_str(self) -> &'static str {
        match self {
            Transmission::Manual => "manual",
            Transmission::Automatic => "automatic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    Gasoline,
    Diesel,
    Electric,
    Hybrid,
}

impl FuelType {
    pub fn as_str(self) -> &'static str {
        match self {
            FuelType::Gasoline => "gasoline",
            FuelType::Diesel => "diesel",
            FuelType::Electric => "electric",
            FuelType::Hybrid => "hybrid",
        }
    }
}

/// Car listed in the rental catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    pub name: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub image_url: String,
    pub rental_price_per_day: Decimal,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub seats: u8,
    pub description: Option<String>,
    /// JSON-encoded feature list as supplied by the catalog editor.
    pub features: Option<String>,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Car {
    /// Applies the supplied fields of `patch`; `updated_at` is left to the caller.
    pub fn apply(&mut self, patch: CarPatch) {
        let CarPatch {
            name,
            brand,
            model,
            year,
            image_url,
            rental_price_per_day,
            transmission,
            fuel_type,
            seats,
            description,
            features,
            is_available,
        } = patch;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(brand) = brand {
            self.brand = brand;
        }
        if let Some(model) = model {
            self.model = model;
        }
        if let Some(year) = year {
            self.year = year;
        }
        if let Some(image_url) = image_url {
            self.image_url = image_url;
        }
        if let Some(price) = rental_price_per_day {
            self.rental_price_per_day = price;
        }
        if let Some(transmission) = transmission {
            self.transmission = transmission;
        }
        if let Some(fuel_type) = fuel_type {
            self.fuel_type = fuel_type;
        }
        if let Some(seats) = seats {
            self.seats = seats;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(features) = features {
            self.features = features;
        }
        if let Some(is_available) = is_available {
            self.is_available = is_available;
        }
    }
}

fn default_available() -> bool {
    true
}

/// Payload for adding a car to the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCar {
    pub name: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub image_url: String,
    pub rental_price_per_day: Decimal,
    pub transmission: Transmission,
    pub fuel_type: FuelType,
    pub seats: u8,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub features: Option<String>,
    #[serde(default = "default_available")]
    pub is_available: bool,
}

/// Partial update for a car. Nullable columns use a nested option so that an
/// explicit `null` clears the value while an omitted field leaves it untouched.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CarPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub rental_price_per_day: Option<Decimal>,
    #[serde(default)]
    pub transmission: Option<Transmission>,
    #[serde(default)]
    pub fuel_type: Option<FuelType>,
    #[serde(default)]
    pub seats: Option<u8>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub features: Option<Option<String>>,
    #[serde(default)]
    pub is_available: Option<bool>,
}

/// Equality and inclusive range predicates for catalog listings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CarFilter {
    pub brand: Option<String>,
    pub transmission: Option<Transmission>,
    pub fuel_type: Option<FuelType>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub min_seats: Option<u8>,
    pub max_seats: Option<u8>,
    pub is_available: Option<bool>,
}

impl CarFilter {
    pub fn matches(&self, car: &Car) -> bool {
        if let Some(brand) = &self.brand {
            if &car.brand != brand {
                return false;
            }
        }
        if self.transmission.is_some_and(|value| value != car.transmission) {
            return false;
        }
        if self.fuel_type.is_some_and(|value| value != car.fuel_type) {
            return false;
        }
        if self
            .min_price
            .is_some_and(|min| car.rental_price_per_day < min)
        {
            return false;
        }
        if self
            .max_price
            .is_some_and(|max| car.rental_price_per_day > max)
        {
            return false;
        }
        if self.min_seats.is_some_and(|min| car.seats < min) {
            return false;
        }
        if self.max_seats.is_some_and(|max| car.seats > max) {
            return false;
        }
        if self
            .is_available
            .is_some_and(|available| available != car.is_available)
        {
            return false;
        }
        true
    }
}

/// Published business contact details used for customer inquiries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub id: ContactId,
    pub company_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Raw number as entered; may contain punctuation or a national prefix.
    pub whatsapp_number: String,
    pub facebook_url: Option<String>,
    pub instagram_url: Option<String>,
    pub business_hours: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ContactInfo {
    pub fn apply(&mut self, patch: ContactInfoPatch) {
        let ContactInfoPatch {
            company_name,
            phone,
            email,
            address,
            whatsapp_number,
            facebook_url,
            instagram_url,
            business_hours,
        } = patch;

        if let Some(company_name) = company_name {
            self.company_name = company_name;
        }
        if let Some(phone) = phone {
            self.phone = phone;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(address) = address {
            self.address = address;
        }
        if let Some(whatsapp_number) = whatsapp_number {
            self.whatsapp_number = whatsapp_number;
        }
        if let Some(facebook_url) = facebook_url {
            self.facebook_url = facebook_url;
        }
        if let Some(instagram_url) = instagram_url {
            self.instagram_url = instagram_url;
        }
        if let Some(business_hours) = business_hours {
            self.business_hours = business_hours;
        }
    }
}

/// Seed payload for the contact store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContactInfo {
    pub company_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub whatsapp_number: String,
    #[serde(default)]
    pub facebook_url: Option<String>,
    #[serde(default)]
    pub instagram_url: Option<String>,
    pub business_hours: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ContactInfoPatch {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub whatsapp_number: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub facebook_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub instagram_url: Option<Option<String>>,
    #[serde(default)]
    pub business_hours: Option<String>,
}

fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
