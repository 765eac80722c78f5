#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::UNCATEGORIZED;

fn sub(amount: Decimal, category: Option<&str>) -> Subscription {
    let mut s = Subscription::new("Test".into(), amount, "2024-02-01".into());
    s.category = category.map(String::from);
    s
}

#[test]
fn test_two_category_shares() {
    let subs = vec![sub(dec!(10), Some("A")), sub(dec!(30), Some("B"))];
    let breakdown = category_breakdown(&subs);

    assert_eq!(breakdown.len(), 2);
    // Sorted by total descending
    assert_eq!(breakdown[0].label, "B");
    assert_eq!(breakdown[0].total, dec!(30));
    assert_eq!(breakdown[0].share, dec!(75));
    assert_eq!(breakdown[1].label, "A");
    assert_eq!(breakdown[1].total, dec!(10));
    assert_eq!(breakdown[1].share, dec!(25));
}

#[test]
fn test_totals_conserve_sum() {
    let subs = vec![
        sub(dec!(15.49), Some("Streaming")),
        sub(dec!(9.99), Some("Streaming")),
        sub(dec!(30), Some("Health")),
        sub(dec!(4.50), None),
    ];
    let breakdown = category_breakdown(&subs);

    let total_of_totals: Decimal = breakdown.iter().map(|s| s.total).sum();
    assert_eq!(total_of_totals, grand_total(&subs));
    assert_eq!(total_of_totals, dec!(59.98));
}

#[test]
fn test_shares_sum_to_one_hundred() {
    let subs = vec![
        sub(dec!(10), Some("A")),
        sub(dec!(20), Some("B")),
        sub(dec!(70), Some("C")),
    ];
    let breakdown = category_breakdown(&subs);
    let share_sum: Decimal = breakdown.iter().map(|s| s.share).sum();
    assert_eq!(share_sum, Decimal::ONE_HUNDRED);
}

#[test]
fn test_empty_list_yields_nothing() {
    assert!(category_breakdown(&[]).is_empty());
}

#[test]
fn test_zero_total_yields_nothing() {
    // All-zero amounts must not divide by zero
    let subs = vec![sub(Decimal::ZERO, Some("A")), sub(Decimal::ZERO, None)];
    assert!(category_breakdown(&subs).is_empty());
}

#[test]
fn test_missing_category_grouped_under_placeholder() {
    let subs = vec![sub(dec!(10), None), sub(dec!(10), Some("A"))];
    let breakdown = category_breakdown(&subs);

    assert_eq!(breakdown.len(), 2);
    assert!(breakdown.iter().any(|s| s.label == UNCATEGORIZED));
    let placeholder = breakdown
        .iter()
        .find(|s| s.label == UNCATEGORIZED)
        .unwrap();
    assert_eq!(placeholder.total, dec!(10));
    assert_eq!(placeholder.share, dec!(50));
}

#[test]
fn test_same_category_amounts_merge() {
    let subs = vec![
        sub(dec!(15.49), Some("Streaming")),
        sub(dec!(9.99), Some("Streaming")),
    ];
    let breakdown = category_breakdown(&subs);
    assert_eq!(breakdown.len(), 1);
    assert_eq!(breakdown[0].total, dec!(25.48));
    assert_eq!(breakdown[0].share, Decimal::ONE_HUNDRED);
}

#[test]
fn test_order_independent() {
    let forward = vec![
        sub(dec!(10), Some("A")),
        sub(dec!(30), Some("B")),
        sub(dec!(5), None),
    ];
    let mut reversed = forward.clone();
    reversed.reverse();

    assert_eq!(category_breakdown(&forward), category_breakdown(&reversed));
}

#[test]
fn test_ties_break_by_label() {
    let subs = vec![sub(dec!(10), Some("Zeta")), sub(dec!(10), Some("Alpha"))];
    let breakdown = category_breakdown(&subs);
    assert_eq!(breakdown[0].label, "Alpha");
    assert_eq!(breakdown[1].label, "Zeta");
}

#[test]
fn test_grand_total_empty() {
    assert_eq!(grand_total(&[]), Decimal::ZERO);
}
