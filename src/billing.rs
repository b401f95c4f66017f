//! Payment summary arithmetic.
//!
//! Pure integer-cents calculations for the booking checkout card.
//! Nothing here charges anything; the backend owns actual billing.

use crate::models::Doctor;

/// Platform service fee, as a percentage of the subtotal.
pub const PLATFORM_FEE_PERCENT: u32 = 5;

/// One row of the payment summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub label: String,
    pub amount_cents: i64,
}

impl LineItem {
    pub fn new(label: impl Into<String>, amount_cents: i64) -> Self {
        LineItem {
            label: label.into(),
            amount_cents,
        }
    }
}

/// The checkout card shown before confirming a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentSummary {
    pub items: Vec<LineItem>,
    pub subtotal_cents: i64,
    pub platform_fee_cents: i64,
    pub total_cents: i64,
}

impl PaymentSummary {
    /// Summary for booking with a doctor: consultation fee plus any
    /// extra line items, then the platform fee on top. The fee rounds
    /// to the nearest cent.
    pub fn for_booking(doctor: &Doctor, extras: Vec<LineItem>) -> Self {
        let mut items = Vec::with_capacity(extras.len() + 1);
        items.push(LineItem::new(
            format!("Consultation with Dr. {}", doctor.last_name),
            doctor.consultation_fee_cents,
        ));
        items.extend(extras);
        Self::from_items(items)
    }

    /// Summary over arbitrary line items. An empty list totals zero.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let subtotal_cents: i64 = items.iter().map(|i| i.amount_cents).sum();
        let platform_fee_cents =
            (subtotal_cents * i64::from(PLATFORM_FEE_PERCENT) + 50) / 100;
        PaymentSummary {
            items,
            subtotal_cents,
            platform_fee_cents,
            total_cents: subtotal_cents + platform_fee_cents,
        }
    }
}

/// Render integer cents as a dollar string for display.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    format!("{}${}.{:02}", sign, cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor(fee_cents: i64) -> Doctor {
        Doctor {
            id: 2,
            first_name: "Gregory".into(),
            last_name: "House".into(),
            email: "house@mercy.example".into(),
            specialization: "Diagnostics".into(),
            license_number: None,
            years_of_experience: 20,
            consultation_fee_cents: fee_cents,
            is_available: true,
            tenant_id: 1,
        }
    }

    #[test]
    fn booking_summary_adds_fee_on_top() {
        let summary = PaymentSummary::for_booking(&doctor(15_000), vec![]);
        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.subtotal_cents, 15_000);
        assert_eq!(summary.platform_fee_cents, 750);
        assert_eq!(summary.total_cents, 15_750);
    }

    #[test]
    fn extra_line_items_join_the_subtotal() {
        let extras = vec![
            LineItem::new("Blood panel", 4_500),
            LineItem::new("ECG", 2_000),
        ];
        let summary = PaymentSummary::for_booking(&doctor(15_000), extras);
        assert_eq!(summary.items.len(), 3);
        assert_eq!(summary.subtotal_cents, 21_500);
        assert_eq!(summary.platform_fee_cents, 1_075);
        assert_eq!(summary.total_cents, 22_575);
    }

    #[test]
    fn empty_summary_is_all_zero() {
        let summary = PaymentSummary::from_items(vec![]);
        assert_eq!(summary.subtotal_cents, 0);
        assert_eq!(summary.platform_fee_cents, 0);
        assert_eq!(summary.total_cents, 0);
    }

    #[test]
    fn fee_rounds_to_nearest_cent() {
        // 5% of 30 cents is 1.5 cents.
        let summary = PaymentSummary::from_items(vec![LineItem::new("Copay", 30)]);
        assert_eq!(summary.platform_fee_cents, 2);

        // 5% of 20 cents is exactly 1 cent.
        let summary = PaymentSummary::from_items(vec![LineItem::new("Copay", 20)]);
        assert_eq!(summary.platform_fee_cents, 1);
    }

    #[test]
    fn cents_formatting() {
        assert_eq!(format_cents(15_750), "$157.50");
        assert_eq!(format_cents(5), "$0.05");
        assert_eq!(format_cents(0), "$0.00");
        assert_eq!(format_cents(-1_234), "-$12.34");
    }
}
