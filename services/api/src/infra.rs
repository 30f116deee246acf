use chrono::{NaiveDate, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use rental_catalog::catalog::{
    Car, CarId, CarRepository, CatalogService, CatalogServiceError, ContactId, ContactInfo,
    ContactRepository, FuelType, NewCar, NewContactInfo, RepositoryError, Transmission,
};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type InMemoryCatalogService =
    CatalogService<InMemoryCarRepository, InMemoryContactRepository>;

fn lock<'a, T>(
    mutex: &'a Mutex<T>,
    store: &str,
) -> Result<MutexGuard<'a, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable(format!("{store} lock poisoned")))
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCarRepository {
    records: Arc<Mutex<BTreeMap<CarId, Car>>>,
    sequence: Arc<AtomicI64>,
}

impl CarRepository for InMemoryCarRepository {
    fn all(&self) -> Result<Vec<Car>, RepositoryError> {
        let guard = lock(&self.records, "car store")?;
        Ok(guard.values().cloned().collect())
    }

    fn fetch(&self, id: CarId) -> Result<Option<Car>, RepositoryError> {
        let guard = lock(&self.records, "car store")?;
        Ok(guard.get(&id).cloned())
    }

    fn insert(&self, car: NewCar) -> Result<Car, RepositoryError> {
        let mut guard = lock(&self.records, "car store")?;
        let id = CarId(self.sequence.fetch_add(1, Ordering::Relaxed) + 1);
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
        guard.insert(id, stored.clone());
        Ok(stored)
    }

    fn update(&self, car: Car) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records, "car store")?;
        match guard.get_mut(&car.id) {
            Some(existing) => {
                *existing = car;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, id: CarId) -> Result<bool, RepositoryError> {
        let mut guard = lock(&self.records, "car store")?;
        Ok(guard.remove(&id).is_some())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryContactRepository {
    records: Arc<Mutex<BTreeMap<ContactId, ContactInfo>>>,
    sequence: Arc<AtomicI64>,
}

impl ContactRepository for InMemoryContactRepository {
    fn first(&self) -> Result<Option<ContactInfo>, RepositoryError> {
        let guard = lock(&self.records, "contact store")?;
        Ok(guard.values().next().cloned())
    }

    fn fetch(&self, id: ContactId) -> Result<Option<ContactInfo>, RepositoryError> {
        let guard = lock(&self.records, "contact store")?;
        Ok(guard.get(&id).cloned())
    }

    fn insert(&self, contact: NewContactInfo) -> Result<ContactInfo, RepositoryError> {
        let mut guard = lock(&self.records, "contact store")?;
        let id = ContactId(self.sequence.fetch_add(1, Ordering::Relaxed) + 1);
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
        let mut guard = lock(&self.records, "contact store")?;
        match guard.get_mut(&contact.id) {
            Some(existing) => {
                *existing = contact;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }
}

pub(crate) fn in_memory_catalog() -> InMemoryCatalogService {
    CatalogService::new(
        Arc::new(InMemoryCarRepository::default()),
        Arc::new(InMemoryContactRepository::default()),
    )
}

/// Loads a small showroom and the business contact so every endpoint has data.
pub(crate) fn seed_demo_catalog(
    service: &InMemoryCatalogService,
) -> Result<(), CatalogServiceError> {
    for car in demo_cars() {
        service.create_car(car)?;
    }
    service.register_contact(demo_contact())?;
    Ok(())
}

fn demo_cars() -> Vec<NewCar> {
    vec![
        NewCar {
            name: "Toyota Avanza Veloz".to_string(),
            brand: "Toyota".to_string(),
            model: "Avanza".to_string(),
            year: 2023,
            image_url: "https://images.example.com/cars/avanza-veloz.jpg".to_string(),
            rental_price_per_day: Decimal::from(350_000),
            transmission: Transmission::Automatic,
            fuel_type: FuelType::Gasoline,
            seats: 7,
            description: Some("MPV keluarga yang lega dan irit bahan bakar".to_string()),
            features: Some(
                r#"["AC Double Blower","Bluetooth Audio","Kamera Mundur"]"#.to_string(),
            ),
            is_available: true,
        },
        NewCar {
            name: "Mitsubishi Pajero Sport Dakar".to_string(),
            brand: "Mitsubishi".to_string(),
            model: "Pajero Sport".to_string(),
            year: 2022,
            image_url: "https://images.example.com/cars/pajero-sport.jpg".to_string(),
            rental_price_per_day: Decimal::from(1_200_000),
            transmission: Transmission::Automatic,
            fuel_type: FuelType::Diesel,
            seats: 7,
            description: Some("SUV tangguh untuk perjalanan luar kota".to_string()),
            features: Some(r#"["4x4","Sunroof","Cruise Control"]"#.to_string()),
            is_available: true,
        },
        NewCar {
            name: "Honda Brio Satya".to_string(),
            brand: "Honda".to_string(),
            model: "Brio".to_string(),
            year: 2021,
            image_url: "https://images.example.com/cars/brio-satya.jpg".to_string(),
            rental_price_per_day: Decimal::from(250_000),
            transmission: Transmission::Manual,
            fuel_type: FuelType::Gasoline,
            seats: 5,
            description: None,
            features: None,
            is_available: false,
        },
        NewCar {
            name: "Hyundai Ioniq 5".to_string(),
            brand: "Hyundai".to_string(),
            model: "Ioniq 5".to_string(),
            year: 2024,
            image_url: "https://images.example.com/cars/ioniq-5.jpg".to_string(),
            rental_price_per_day: Decimal::new(95_000_050, 2),
            transmission: Transmission::Automatic,
            fuel_type: FuelType::Electric,
            seats: 5,
            description: Some("Mobil listrik dengan jarak tempuh hingga 450 km".to_string()),
            features: Some(r#"["Fast Charging","Vehicle-to-Load"]"#.to_string()),
            is_available: true,
        },
    ]
}

fn demo_contact() -> NewContactInfo {
    NewContactInfo {
        company_name: "Rental Mobil Nusantara".to_string(),
        phone: "(021) 555-0101".to_string(),
        email: "halo@rentalnusantara.example".to_string(),
        address: "Jl. Merdeka No. 10, Jakarta Pusat".to_string(),
        whatsapp_number: "0812-3456-7890".to_string(),
        facebook_url: Some("https://facebook.com/rentalnusantara".to_string()),
        instagram_url: Some("https://instagram.com/rentalnusantara".to_string()),
        business_hours: "Senin - Minggu, 07.00 - 21.00 WIB".to_string(),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
