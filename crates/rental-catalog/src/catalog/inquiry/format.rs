//! Indonesian presentation helpers for inquiry messages.
//!
//! Formatting is explicit rather than locale-driven so output is identical on
//! every host.

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::catalog::domain::Transmission;

const MONTHS: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

const FUEL_LABELS: [(&str, &str); 4] = [
    ("gasoline", "Bensin"),
    ("diesel", "Solar"),
    ("electric", "Listrik"),
    ("hybrid", "Hybrid"),
];

/// Fraction digits kept when rendering amounts.
const MAX_FRACTION_DIGITS: u32 = 3;

pub fn transmission_label(transmission: Transmission) -> &'static str {
    match transmission {
        Transmission::Manual => "Manual",
        Transmission::Automatic => "Otomatis",
    }
}

/// Unknown fuel codes are returned unchanged.
pub fn fuel_type_label(fuel_type: &str) -> &str {
    FUEL_LABELS
        .iter()
        .find(|(code, _)| *code == fuel_type)
        .map(|(_, label)| *label)
        .unwrap_or(fuel_type)
}

/// Renders `1 Maret 2024` style dates; the day is not zero-padded.
pub fn format_date(date: NaiveDate) -> String {
    let month = MONTHS[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

/// Renders an amount with `.` thousands separators and a `,` decimal separator.
///
/// At most three fraction digits are kept (half away from zero) and trailing
/// zeros are dropped, so whole amounts carry no fraction at all.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();

    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut rendered = String::with_capacity(digits.len() + integer.len() / 3 + 1);
    if negative {
        rendered.push('-');
    }
    rendered.push_str(&group_thousands(integer));
    if let Some(fraction) = fraction {
        rendered.push(',');
        rendered.push_str(fraction);
    }
    rendered
}

pub fn format_rupiah(amount: Decimal) -> String {
    format!("Rp {}", format_amount(amount))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_whole_amounts() {
        assert_eq!(format_rupiah(Decimal::from(350_000)), "Rp 350.000");
        assert_eq!(format_rupiah(Decimal::from(2_450_000)), "Rp 2.450.000");
        assert_eq!(format_rupiah(Decimal::from(999)), "Rp 999");
        assert_eq!(format_rupiah(Decimal::ZERO), "Rp 0");
    }

    #[test]
    fn keeps_significant_fraction_digits_only() {
        assert_eq!(
            format_rupiah(Decimal::new(150_000_050, 2)),
            "Rp 1.500.000,5"
        );
        assert_eq!(
            format_rupiah(Decimal::new(300_000_100, 2)),
            "Rp 3.000.001"
        );
        assert_eq!(format_amount(Decimal::new(12_345, 4)), "1,235");
        assert_eq!(format_amount(Decimal::new(-1_250_000, 0)), "-1.250.000");
    }

    #[test]
    fn formats_indonesian_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
        assert_eq!(format_date(date), "1 Maret 2024");
        let date = NaiveDate::from_ymd_opt(2025, 12, 25).expect("valid date");
        assert_eq!(format_date(date), "25 Desember 2025");
    }

    #[test]
    fn translates_labels() {
        assert_eq!(transmission_label(Transmission::Automatic), "Otomatis");
        assert_eq!(transmission_label(Transmission::Manual), "Manual");
        assert_eq!(fuel_type_label("diesel"), "Solar");
        assert_eq!(fuel_type_label("electric"), "Listrik");
        assert_eq!(fuel_type_label("lpg"), "lpg");
    }
}
