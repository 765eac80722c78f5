use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::Subscription;

/// One category's share of the total, for chart/summary display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySlice {
    pub label: String,
    pub total: Decimal,
    /// Percent of the grand total (0-100).
    pub share: Decimal,
}

/// Group subscription amounts by category label and derive each category's
/// percentage of the total. Returns an empty Vec when the total is zero,
/// since there is nothing to chart. Slices are sorted by total descending,
/// then label, for stable display.
pub fn category_breakdown(subs: &[Subscription]) -> Vec<CategorySlice> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for sub in subs {
        *totals
            .entry(sub.category_label().to_string())
            .or_insert(Decimal::ZERO) += sub.amount;
    }

    let grand: Decimal = totals.values().copied().sum();
    if grand.is_zero() {
        return Vec::new();
    }

    let mut slices: Vec<CategorySlice> = totals
        .into_iter()
        .map(|(label, total)| CategorySlice {
            label,
            share: total * Decimal::ONE_HUNDRED / grand,
            total,
        })
        .collect();
    slices.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.label.cmp(&b.label)));
    slices
}

/// Sum of all subscription amounts.
pub fn grand_total(subs: &[Subscription]) -> Decimal {
    subs.iter().map(|s| s.amount).sum()
}

#[cfg(test)]
mod tests;
