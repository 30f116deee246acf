use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::catalog::domain::{
    Car, CarId, ContactId, ContactInfo, FuelType, NewCar, NewContactInfo, Transmission,
};
use crate::catalog::inquiry::InquiryRequest;
use crate::catalog::repository::{CarRepository, ContactRepository, RepositoryError};
use crate::catalog::validation::CatalogValidator;
use crate::catalog::{catalog_router, AvailabilityRequest, CatalogService};

pub(super) fn timestamp(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 2, 20).expect("valid date")
}

pub(super) fn avanza() -> Car {
    Car {
        id: CarId(1),
        name: "Toyota Avanza Veloz".to_string(),
        brand: "Toyota".to_string(),
        model: "Avanza".to_string(),
        year: 2023,
        image_url: "https://cdn.example.com/cars/avanza.jpg".to_string(),
        rental_price_per_day: Decimal::from(350_000),
        transmission: Transmission::Automatic,
        fuel_type: FuelType::Gasoline,
        seats: 7,
        description: Some("MPV keluarga irit".to_string()),
        features: Some(r#"["AC","Bluetooth"]"#.to_string()),
        is_available: true,
        created_at: timestamp(1),
        updated_at: timestamp(1),
    }
}

pub(super) fn pajero() -> Car {
    Car {
        id: CarId(2),
        name: "Mitsubishi Pajero Sport".to_string(),
        brand: "Mitsubishi".to_string(),
        model: "Pajero Sport".to_string(),
        year: 2022,
        image_url: "https://cdn.example.com/cars/pajero.jpg".to_string(),
        rental_price_per_day: Decimal::new(150_000_050, 2),
        transmission: Transmission::Manual,
        fuel_type: FuelType::Diesel,
        seats: 7,
        description: None,
        features: None,
        is_available: true,
        created_at: timestamp(2),
        updated_at: timestamp(2),
    }
}

pub(super) fn brio() -> Car {
    Car {
        id: CarId(3),
        name: "Honda Brio Satya".to_string(),
        brand: "Honda".to_string(),
        model: "Brio".to_string(),
        year: 2021,
        image_url: "https://cdn.example.com/cars/brio.jpg".to_string(),
        rental_price_per_day: Decimal::from(250_000),
        transmission: Transmission::Manual,
        fuel_type: FuelType::Gasoline,
        seats: 5,
        description: None,
        features: None,
        is_available: false,
        created_at: timestamp(3),
        updated_at: timestamp(3),
    }
}

pub(super) fn new_car() -> NewCar {
    NewCar {
        name: "Hyundai Ioniq 5".to_string(),
        brand: "Hyundai".to_string(),
        model: "Ioniq 5".to_string(),
        year: 2024,
        image_url: "https://cdn.example.com/cars/ioniq5.jpg".to_string(),
        rental_price_per_day: Decimal::from(900_000),
        transmission: Transmission::Automatic,
        fuel_type: FuelType::Electric,
        seats: 5,
        description: None,
        features: None,
        is_available: true,
    }
}

pub(super) fn contact() -> ContactInfo {
    ContactInfo {
        id: ContactId(1),
        company_name: "Sewa Mobil Nusantara".to_string(),
        phone: "021-555-0101".to_string(),
        email: "halo@sewamobil.example".to_string(),
        address: "Jl. Merdeka No. 10, Jakarta".to_string(),
        whatsapp_number: "0812-3456-7890".to_string(),
        facebook_url: None,
        instagram_url: Some("https://instagram.com/sewamobil".to_string()),
        business_hours: "Senin - Sabtu, 08.00 - 20.00".to_string(),
        created_at: timestamp(1),
        updated_at: timestamp(1),
    }
}

pub(super) fn new_contact() -> NewContactInfo {
    NewContactInfo {
        company_name: "Rental Bahari".to_string(),
        phone: "0361-700-100".to_string(),
        email: "cs@bahari.example".to_string(),
        address: "Jl. Pantai Kuta 5, Bali".to_string(),
        whatsapp_number: "81234567890".to_string(),
        facebook_url: None,
        instagram_url: None,
        business_hours: "Setiap hari, 07.00 - 22.00".to_string(),
    }
}

pub(super) fn availability_request(car_id: i64, start: &str, end: &str) -> AvailabilityRequest {
    AvailabilityRequest {
        car_id: CarId(car_id),
        start_date: start.to_string(),
        end_date: end.to_string(),
    }
}

pub(super) fn inquiry_request() -> InquiryRequest {
    InquiryRequest {
        car_id: CarId(1),
        customer_name: "Budi Santoso".to_string(),
        customer_phone: "0813-1111-2222".to_string(),
        rental_start_date: "2024-03-01".to_string(),
        rental_end_date: "2024-03-08".to_string(),
        additional_message: None,
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryCars {
    records: Arc<Mutex<BTreeMap<CarId, Car>>>,
    next_id: Arc<AtomicI64>,
    lookups: Arc<AtomicUsize>,
}

impl MemoryCars {
    pub(super) fn with(cars: Vec<Car>) -> Self {
        let repository = Self::default();
        for car in cars {
            repository.seed(car);
        }
        repository
    }

    pub(super) fn seed(&self, car: Car) {
        self.next_id.fetch_max(car.id.0, Ordering::Relaxed);
        self.records
            .lock()
            .expect("car mutex poisoned")
            .insert(car.id, car);
    }

    pub(super) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

impl CarRepository for MemoryCars {
    fn all(&self) -> Result<Vec<Car>, RepositoryError> {
        let guard = self.records.lock().expect("car mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn fetch(&self, id: CarId) -> Result<Option<Car>, RepositoryError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        let guard = self.records.lock().expect("car mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn insert(&self, car: NewCar) -> Result<Car, RepositoryError> {
        let id = CarId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let now = Utc::now();
        let stored = Car {
            id,
            name: car.name,
            brand: car.brand,
            model: car.model,
            year: car.year,
            image_url: car.image_url,
            rental_price_per_day: car.rental_price_per_day,
            transmission: car.transmission,
            fuel_type: car.fuel_type,
            seats: car.seats,
            description: car.description,
            features: car.features,
            is_available: car.is_available,
            created_at: now,
            updated_at: now,
        };
        self.records
            .lock()
            .expect("car mutex poisoned")
            .insert(id, stored.clone());
        Ok(stored)
    }

    fn update(&self, car: Car) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("car mutex poisoned");
        if guard.contains_key(&car.id) {
            guard.insert(car.id, car);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn delete(&self, id: CarId) -> Result<bool, RepositoryError> {
        let mut guard = self.records.lock().expect("car mutex poisoned");
        Ok(guard.remove(&id).is_some())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryContacts {
    records: Arc<Mutex<BTreeMap<ContactId, ContactInfo>>>,
}

impl MemoryContacts {
    pub(super) fn with(contacts: Vec<ContactInfo>) -> Self {
        let repository = Self::default();
        {
            let mut guard = repository.records.lock().expect("contact mutex poisoned");
            for contact in contacts {
                guard.insert(contact.id, contact);
            }
        }
        repository
    }
}

impl ContactRepository for MemoryContacts {
    fn first(&self) -> Result<Option<ContactInfo>, RepositoryError> {
        let guard = self.records.lock().expect("contact mutex poisoned");
        Ok(guard.values().next().cloned())
    }

    fn fetch(&self, id: ContactId) -> Result<Option<ContactInfo>, RepositoryError> {
        let guard = self.records.lock().expect("contact mutex poisoned");
        Ok(guard.get(&id).cloned())
    }

    fn insert(&self, contact: NewContactInfo) -> Result<ContactInfo, RepositoryError> {
        let mut guard = self.records.lock().expect("contact mutex poisoned");
        let id = ContactId(guard.keys().next_back().map_or(1, |last| last.0 + 1));
        let now = Utc::now();
        let stored = ContactInfo {
            id,
            company_name: contact.company_name,
            phone: contact.phone,
            email: contact.email,
            address: contact.address,
            whatsapp_number: contact.whatsapp_number,
            facebook_url: contact.facebook_url,
            instagram_url: contact.instagram_url,
            business_hours: contact.business_hours,
            created_at: now,
            updated_at: now,
        };
        guard.insert(id, stored.clone());
        Ok(stored)
    }

    fn update(&self, contact: ContactInfo) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("contact mutex poisoned");
        if guard.contains_key(&contact.id) {
            guard.insert(contact.id, contact);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }
}

pub(super) struct UnavailableCars;

impl CarRepository for UnavailableCars {
    fn all(&self) -> Result<Vec<Car>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: CarId) -> Result<Option<Car>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert(&self, _car: NewCar) -> Result<Car, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _car: Car) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn delete(&self, _id: CarId) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    CatalogService<MemoryCars, MemoryContacts>,
    MemoryCars,
    MemoryContacts,
) {
    let cars = MemoryCars::with(vec![avanza(), pajero(), brio()]);
    let contacts = MemoryContacts::with(vec![contact()]);
    let service = CatalogService::with_validator(
        Arc::new(cars.clone()),
        Arc::new(contacts.clone()),
        CatalogValidator::for_year(2025),
    );
    (service, cars, contacts)
}

pub(super) fn catalog_router_with_service(
    service: CatalogService<MemoryCars, MemoryContacts>,
) -> axum::Router {
    catalog_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
