//! WhatsApp inquiry generation for customers interested in a catalog car.

pub mod format;
pub mod whatsapp;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::domain::{Car, CarId, ContactInfo};
use super::repository::RepositoryError;
use super::schedule::{parse_rental_date, RentalWindow};
use format::{format_date, format_rupiah, fuel_type_label, transmission_label};

/// Customer details for a rental inquiry. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryRequest {
    pub car_id: CarId,
    pub customer_name: String,
    pub customer_phone: String,
    pub rental_start_date: String,
    pub rental_end_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_message: Option<String>,
}

/// Rendered inquiry plus the deep link that opens it in WhatsApp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InquiryMessage {
    pub contact_url: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum InquiryError {
    #[error("car with id {0} not found")]
    CarNotFound(CarId),
    #[error("contact information not found")]
    ContactNotFound,
    #[error("invalid rental date '{0}'")]
    InvalidDate(String),
    #[error("estimated total for {days} days at {price} per day is too large")]
    AmountOverflow { price: Decimal, days: i64 },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Stateless composer turning a car, the business contact and customer details
/// into a ready-to-send message. Composition is all-or-nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct InquiryMessageComposer;

impl InquiryMessageComposer {
    pub fn new() -> Self {
        Self
    }

    pub fn compose<C, K>(
        &self,
        request: &InquiryRequest,
        car_lookup: C,
        contact_lookup: K,
    ) -> Result<InquiryMessage, InquiryError>
    where
        C: FnOnce(CarId) -> Result<Option<Car>, RepositoryError>,
        K: FnOnce() -> Result<Option<ContactInfo>, RepositoryError>,
    {
        let car = car_lookup(request.car_id)?.ok_or(InquiryError::CarNotFound(request.car_id))?;
        let contact = contact_lookup()?.ok_or(InquiryError::ContactNotFound)?;

        let start = parse_rental_date(&request.rental_start_date)
            .ok_or_else(|| InquiryError::InvalidDate(request.rental_start_date.clone()))?;
        let end = parse_rental_date(&request.rental_end_date)
            .ok_or_else(|| InquiryError::InvalidDate(request.rental_end_date.clone()))?;
        let window = RentalWindow { start, end };

        let message = render_message(&car, &contact, request, &window)?;
        let number = whatsapp::normalize_number(&contact.whatsapp_number);
        let contact_url = whatsapp::deep_link(&number, &message);

        Ok(InquiryMessage {
            contact_url,
            message,
        })
    }
}

fn render_message(
    car: &Car,
    contact: &ContactInfo,
    request: &InquiryRequest,
    window: &RentalWindow,
) -> Result<String, InquiryError> {
    let duration = window.duration_days();
    // Multiply first, format afterwards: fractional day prices keep full precision.
    let total = car
        .rental_price_per_day
        .checked_mul(Decimal::from(duration))
        .ok_or(InquiryError::AmountOverflow {
            price: car.rental_price_per_day,
            days: duration,
        })?;

    let notes = match request.additional_message.as_deref() {
        Some(note) if !note.is_empty() => format!("📝 *Catatan Tambahan:*\n{note}\n\n"),
        _ => String::new(),
    };

    Ok(format!(
        "Halo {company}! 👋

Saya tertarik untuk menyewa mobil dengan detail sebagai berikut:

👤 *Data Penyewa:*
• Nama: {customer_name}
• No. HP: {customer_phone}

🚗 *Detail Mobil:*
• Mobil: {car_name}
• Merek: {brand} {model}
• Tahun: {year}
• Transmisi: {transmission}
• Bahan Bakar: {fuel}
• Kapasitas: {seats} kursi

📅 *Jadwal Sewa:*
• Tanggal Mulai: {start}
• Tanggal Selesai: {end}
• Durasi: {duration} hari

💰 *Estimasi Biaya:*
• Harga per hari: {price}
• Total estimasi: {total} ({duration} hari)

{notes}Mohon informasi lebih lanjut mengenai ketersediaan mobil dan prosedur penyewaan. Terima kasih! 🙏",
        company = contact.company_name,
        customer_name = request.customer_name,
        customer_phone = request.customer_phone,
        car_name = car.name,
        brand = car.brand,
        model = car.model,
        year = car.year,
        transmission = transmission_label(car.transmission),
        fuel = fuel_type_label(car.fuel_type.as_str()),
        seats = car.seats,
        start = format_date(window.start.date()),
        end = format_date(window.end.date()),
        duration = duration,
        price = format_rupiah(car.rental_price_per_day),
        total = format_rupiah(total),
        notes = notes,
    ))
}
