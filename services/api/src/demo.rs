use crate::infra::{in_memory_catalog, seed_demo_catalog, InMemoryCatalogService};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use rental_catalog::catalog::{
    AvailabilityOutcome, AvailabilityRequest, CarFilter, CarId, CatalogServiceError,
    InquiryMessage, InquiryRequest,
};
use rental_catalog::error::AppError;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Identifier of the showroom car to enquire about
    #[arg(long, default_value_t = 1)]
    pub(crate) car_id: i64,
    /// Rental start date (YYYY-MM-DD). Defaults to tomorrow.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) start: Option<NaiveDate>,
    /// Rental end date (YYYY-MM-DD). Defaults to start + 3 days.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) end: Option<NaiveDate>,
    /// Override the evaluation date (defaults to today).
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Customer name placed in the inquiry
    #[arg(long, default_value = "Budi Santoso")]
    pub(crate) customer_name: String,
    /// Customer phone number placed in the inquiry
    #[arg(long, default_value = "0813-1111-2222")]
    pub(crate) customer_phone: String,
    /// Optional note appended to the inquiry
    #[arg(long)]
    pub(crate) note: Option<String>,
}

pub(crate) struct DemoOutcome {
    pub(crate) availability: AvailabilityOutcome,
    pub(crate) inquiry: Option<InquiryMessage>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = in_memory_catalog();
    seed_demo_catalog(&service)?;

    println!("Rental catalog demo");
    render_showroom(&service)?;

    let outcome = evaluate_demo(&service, args)?;
    let availability = &outcome.availability;
    println!("\nAvailability check for car {}", availability.car_id);
    println!(
        "- {} | {}",
        if availability.is_available {
            "available"
        } else {
            "unavailable"
        },
        availability.message
    );

    match outcome.inquiry {
        Some(inquiry) => {
            println!("\nWhatsApp inquiry preview\n");
            println!("{}", inquiry.message);
            println!("\nDeep link: {}", inquiry.contact_url);
        }
        None => println!("\nInquiry skipped: car cannot be booked for the requested dates"),
    }

    Ok(())
}

fn render_showroom(service: &InMemoryCatalogService) -> Result<(), CatalogServiceError> {
    let cars = service.list_cars(&CarFilter::default())?;
    println!("Showroom ({} cars)", cars.len());
    for car in &cars {
        println!(
            "  - #{} {} ({} {}) | {} | {} seats | {}/day | {}",
            car.id,
            car.name,
            car.brand,
            car.year,
            car.transmission.as_str(),
            car.seats,
            car.rental_price_per_day,
            if car.is_available {
                "ready"
            } else {
                "booked"
            }
        );
    }

    if let Some(contact) = service.contact_info()? {
        println!(
            "Contact: {} | WhatsApp {} | {}",
            contact.company_name, contact.whatsapp_number, contact.business_hours
        );
    }
    Ok(())
}

pub(crate) fn evaluate_demo(
    service: &InMemoryCatalogService,
    args: DemoArgs,
) -> Result<DemoOutcome, CatalogServiceError> {
    let DemoArgs {
        car_id,
        start,
        end,
        today,
        customer_name,
        customer_phone,
        note,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let start = start.unwrap_or_else(|| today + Duration::days(1));
    let end = end.unwrap_or_else(|| start + Duration::days(3));
    let start_date = start.format(DATE_FORMAT).to_string();
    let end_date = end.format(DATE_FORMAT).to_string();

    let availability = service.check_availability_on(
        &AvailabilityRequest {
            car_id: CarId(car_id),
            start_date: start_date.clone(),
            end_date: end_date.clone(),
        },
        today,
    )?;

    let inquiry = if availability.is_available {
        Some(service.generate_inquiry(&InquiryRequest {
            car_id: CarId(car_id),
            customer_name,
            customer_phone,
            rental_start_date: start_date,
            rental_end_date: end_date,
            additional_message: note,
        })?)
    } else {
        None
    };

    Ok(DemoOutcome {
        availability,
        inquiry,
    })
}
