//! End-to-end catalog scenarios driven through the public service facade and router.

mod common {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use chrono::Utc;

    use rental_catalog::catalog::{
        Car, CarId, CarRepository, ContactId, ContactInfo, ContactRepository, NewCar,
        NewContactInfo, RepositoryError,
    };

    #[derive(Default, Clone)]
    pub(super) struct Cars {
        records: Arc<Mutex<BTreeMap<CarId, Car>>>,
    }

    impl CarRepository for Cars {
        fn all(&self) -> Result<Vec<Car>, RepositoryError> {
            Ok(self.records.lock().expect("poisoned").values().cloned().collect())
        }

        fn fetch(&self, id: CarId) -> Result<Option<Car>, RepositoryError> {
            Ok(self.records.lock().expect("poisoned").get(&id).cloned())
        }

        fn insert(&self, car: NewCar) -> Result<Car, RepositoryError> {
            let mut guard = self.records.lock().expect("poisoned");
            let id = CarId(guard.len() as i64 + 1);
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
            let mut guard = self.records.lock().expect("poisoned");
            match guard.get_mut(&car.id) {
                Some(existing) => {
                    *existing = car;
                    Ok(())
                }
                None => Err(RepositoryError::NotFound),
            }
        }

        fn delete(&self, id: CarId) -> Result<bool, RepositoryError> {
            Ok(self.records.lock().expect("poisoned").remove(&id).is_some())
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct Contacts {
        records: Arc<Mutex<BTreeMap<ContactId, ContactInfo>>>,
    }

    impl ContactRepository for Contacts {
        fn first(&self) -> Result<Option<ContactInfo>, RepositoryError> {
            Ok(self.records.lock().expect("poisoned").values().next().cloned())
        }

        fn fetch(&self, id: ContactId) -> Result<Option<ContactInfo>, RepositoryError> {
            Ok(self.records.lock().expect("poisoned").get(&id).cloned())
        }

        fn insert(&self, contact: NewContactInfo) -> Result<ContactInfo, RepositoryError> {
            let mut guard = self.records.lock().expect("poisoned");
            let id = ContactId(guard.len() as i64 + 1);
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
            let mut guard = self.records.lock().expect("poisoned");
            match guard.get_mut(&contact.id) {
                Some(existing) => {
                    *existing = contact;
                    Ok(())
                }
                None => Err(RepositoryError::NotFound),
            }
        }
    }
}

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{Cars, Contacts};
use rental_catalog::catalog::{
    catalog_router, AvailabilityRequest, CarId, CatalogService, CatalogServiceError, FuelType,
    InquiryError, InquiryRequest, NewCar, NewContactInfo, Transmission,
};

fn pajero() -> NewCar {
    NewCar {
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
    }
}

fn contact() -> NewContactInfo {
    NewContactInfo {
        company_name: "Sewa Mobil Nusantara".to_string(),
        phone: "021-555-0101".to_string(),
        email: "halo@sewamobil.example".to_string(),
        address: "Jl. Merdeka No. 10, Jakarta".to_string(),
        whatsapp_number: "628123456789".to_string(),
        facebook_url: None,
        instagram_url: None,
        business_hours: "Senin - Sabtu, 08.00 - 20.00".to_string(),
    }
}

fn service() -> CatalogService<Cars, Contacts> {
    CatalogService::new(Arc::new(Cars::default()), Arc::new(Contacts::default()))
}

#[test]
fn inquiry_needs_a_configured_contact_until_one_is_registered() {
    let service = service();
    let car = service.create_car(pajero()).expect("car created");

    let request = InquiryRequest {
        car_id: car.id,
        customer_name: "Siti Rahma".to_string(),
        customer_phone: "0857-2222-3333".to_string(),
        rental_start_date: "2024-06-10".to_string(),
        rental_end_date: "2024-06-12".to_string(),
        additional_message: Some("Lepas kunci".to_string()),
    };

    assert!(matches!(
        service.generate_inquiry(&request),
        Err(CatalogServiceError::Inquiry(InquiryError::ContactNotFound))
    ));

    service.register_contact(contact()).expect("contact stored");
    let output = service.generate_inquiry(&request).expect("inquiry generated");

    assert!(output.message.starts_with("Halo Sewa Mobil Nusantara! 👋\n"));
    assert!(output.message.contains("• Tanggal Mulai: 10 Juni 2024\n"));
    assert!(output.message.contains("• Harga per hari: Rp 1.500.000,5\n"));
    assert!(output.message.contains("• Total estimasi: Rp 3.000.001 (2 hari)\n"));
    assert!(output.message.contains("📝 *Catatan Tambahan:*\nLepas kunci\n\n"));
    assert!(output.contact_url.starts_with("https://wa.me/628123456789?text="));
}

#[test]
fn availability_follows_the_availability_flag() {
    let service = service();
    let car = service.create_car(pajero()).expect("car created");
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).expect("valid date");
    let request = AvailabilityRequest {
        car_id: car.id,
        start_date: "2024-06-10".to_string(),
        end_date: "2024-06-12".to_string(),
    };

    let outcome = service
        .check_availability_on(&request, today)
        .expect("evaluated");
    assert!(outcome.is_available);

    service
        .update_car(
            car.id,
            serde_json::from_value(json!({ "is_available": false })).expect("valid patch"),
        )
        .expect("update runs")
        .expect("car exists");

    let outcome = service
        .check_availability_on(&request, today)
        .expect("evaluated");
    assert!(!outcome.is_available);
    assert_eq!(outcome.message, "Mobil sedang tidak tersedia untuk disewa");

    let missing = AvailabilityRequest {
        car_id: CarId(999),
        ..request
    };
    let outcome = service
        .check_availability_on(&missing, today)
        .expect("evaluated");
    assert_eq!(outcome.message, "Mobil tidak ditemukan");
}

#[tokio::test]
async fn router_serves_catalog_end_to_end() {
    let service = service();
    service.create_car(pajero()).expect("car created");
    service.register_contact(contact()).expect("contact stored");
    let router = catalog_router(Arc::new(service));

    let response = router
        .clone()
        .oneshot(
            Request::get("/api/v1/contact")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload: Value = serde_json::from_slice(&body).expect("json payload");
    assert_eq!(payload["company_name"], "Sewa Mobil Nusantara");

    let response = router
        .oneshot(
            Request::post("/api/v1/availability")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "car_id": 1, "start_date": "2099-01-01", "end_date": "2099-01-01" })
                        .to_string(),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload: Value = serde_json::from_slice(&body).expect("json payload");
    assert_eq!(payload["is_available"], false);
    assert_eq!(
        payload["message"],
        "Tanggal mulai harus sebelum tanggal selesai"
    );
}
