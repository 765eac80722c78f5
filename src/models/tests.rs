#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ── BillingCycle ──────────────────────────────────────────────

#[test]
fn test_cycle_parse() {
    assert_eq!(BillingCycle::parse("weekly"), BillingCycle::Weekly);
    assert_eq!(BillingCycle::parse("week"), BillingCycle::Weekly);
    assert_eq!(BillingCycle::parse("MONTHLY"), BillingCycle::Monthly);
    assert_eq!(BillingCycle::parse("quarterly"), BillingCycle::Quarterly);
    assert_eq!(BillingCycle::parse("quarter"), BillingCycle::Quarterly);
    assert_eq!(BillingCycle::parse("yearly"), BillingCycle::Yearly);
    assert_eq!(BillingCycle::parse("annual"), BillingCycle::Yearly);
    assert_eq!(BillingCycle::parse("annually"), BillingCycle::Yearly);
    // Unknown cadences fall back to monthly
    assert_eq!(BillingCycle::parse("fortnightly"), BillingCycle::Monthly);
}

#[test]
fn test_cycle_as_str() {
    assert_eq!(BillingCycle::Weekly.as_str(), "Weekly");
    assert_eq!(BillingCycle::Monthly.as_str(), "Monthly");
    assert_eq!(BillingCycle::Quarterly.as_str(), "Quarterly");
    assert_eq!(BillingCycle::Yearly.as_str(), "Yearly");
}

#[test]
fn test_cycle_roundtrip() {
    for cycle in BillingCycle::all() {
        let back = BillingCycle::parse(cycle.as_str());
        assert_eq!(*cycle, back, "Roundtrip failed for {cycle}");
    }
}

#[test]
fn test_cycle_display() {
    assert_eq!(format!("{}", BillingCycle::Quarterly), "Quarterly");
}

// ── Subscription ──────────────────────────────────────────────

#[test]
fn test_new_defaults() {
    let sub = Subscription::new("Netflix".into(), dec!(15.49), "2024-02-01".into());
    assert!(sub.id.is_none());
    assert_eq!(sub.name, "Netflix");
    assert_eq!(sub.amount, dec!(15.49));
    assert!(sub.category.is_none());
    assert_eq!(sub.cycle, BillingCycle::Monthly);
    assert_eq!(sub.next_due, "2024-02-01");
    assert_eq!(sub.currency, "USD");
    assert!(sub.icon.is_none());
    assert!(sub.notes.is_empty());
    assert!(!sub.created_at.is_empty());
}

#[test]
fn test_category_label() {
    let mut sub = Subscription::new("Gym".into(), dec!(30), "2024-03-01".into());
    assert_eq!(sub.category_label(), UNCATEGORIZED);

    sub.category = Some("Health".into());
    assert_eq!(sub.category_label(), "Health");
}

#[test]
fn test_blank_category_counts_as_uncategorized() {
    let mut sub = Subscription::new("Gym".into(), dec!(30), "2024-03-01".into());
    sub.category = Some(String::new());
    assert_eq!(sub.category_label(), UNCATEGORIZED);

    sub.category = Some("   ".into());
    assert_eq!(sub.category_label(), UNCATEGORIZED);
}

#[test]
fn test_zero_amount() {
    let sub = Subscription::new("Free tier".into(), Decimal::ZERO, "2024-02-01".into());
    assert_eq!(sub.amount, Decimal::ZERO);
}
