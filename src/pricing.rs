//! Pricing for booking line items
//!
//! Pure functions, no I/O. Prices are snapshots taken from the catalog at
//! booking time; day counts are whole calendar days with a floor of one
//! (a same-day booking still costs one unit-day).

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Number of chargeable days for a date range. Same-day ranges count as
/// one day.
pub fn days(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days().max(1)
}

/// Total price for one line item: price per unit x quantity x days.
pub fn line_total(price_per_unit: Decimal, quantity: i32, days: i64) -> Decimal {
    price_per_unit * Decimal::from(quantity) * Decimal::from(days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn same_day_counts_as_one() {
        assert_eq!(days(d("2025-03-01"), d("2025-03-01")), 1);
    }

    #[test]
    fn multi_day_range() {
        assert_eq!(days(d("2025-03-01"), d("2025-03-04")), 3);
    }

    #[test]
    fn line_total_is_deterministic() {
        let price = Decimal::from(2000);
        let a = line_total(price, 2, days(d("2025-06-10"), d("2025-06-12")));
        let b = line_total(price, 2, days(d("2025-06-10"), d("2025-06-12")));
        assert_eq!(a, b);
        assert_eq!(a, Decimal::from(8000));
    }

    #[test]
    fn same_day_line_is_not_free() {
        let price = Decimal::from(300);
        let total = line_total(price, 1, days(d("2025-07-01"), d("2025-07-01")));
        assert_eq!(total, Decimal::from(300));
    }
}
