use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ledger::Ledger;
use super::types::Entity;

/// Grouping key of the aggregation: issuing entity and currency label.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GroupKey {
    pub entity: Entity,
    pub currency: String,
}

impl GroupKey {
    pub fn new(entity: Entity, currency: impl Into<String>) -> Self {
        Self {
            entity,
            currency: currency.into(),
        }
    }
}

/// Totals of a ledger per (entity, currency), each rounded to 2 places.
///
/// Only groups with at least one row are present; [`EntityTotals::get`]
/// reports zero for the rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityTotals {
    groups: BTreeMap<GroupKey, Decimal>,
    row_count: usize,
    tax_total: Decimal,
}

impl EntityTotals {
    /// Summed total for the group, or zero if the ledger had no such rows.
    pub fn get(&self, entity: Entity, currency: &str) -> Decimal {
        self.groups
            .get(&GroupKey::new(entity, currency))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Whether the ledger had rows for this group.
    pub fn contains(&self, entity: Entity, currency: &str) -> bool {
        self.groups.contains_key(&GroupKey::new(entity, currency))
    }

    /// All present groups in key order.
    pub fn groups(&self) -> &BTreeMap<GroupKey, Decimal> {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of ledger rows aggregated.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Sum of every row's tax amount across currencies, rounded to 2 places.
    pub fn tax_total(&self) -> Decimal {
        self.tax_total
    }

    /// Sum of all group totals across currencies.
    pub fn grand_total(&self) -> Decimal {
        self.groups
            .values()
            .fold(Decimal::ZERO, |acc, v| add_or_keep(acc, *v))
            .round_dp(2)
    }
}

/// Group the ledger by (entity, currency) and sum `total_amount`.
///
/// A row whose amount would push a sum out of the `Decimal` range is left
/// out of that sum and logged.
pub fn aggregate_totals(ledger: &Ledger) -> EntityTotals {
    let mut groups: BTreeMap<GroupKey, Decimal> = BTreeMap::new();
    let mut tax_total = Decimal::ZERO;

    for row in ledger {
        let sum = groups
            .entry(GroupKey::new(row.entity, row.currency_label.as_str()))
            .or_insert(Decimal::ZERO);
        *sum = add_or_keep(*sum, row.total_amount);
        tax_total = add_or_keep(tax_total, row.tax_amount);
    }

    for sum in groups.values_mut() {
        *sum = sum.round_dp(2);
    }

    EntityTotals {
        groups,
        row_count: ledger.len(),
        tax_total: tax_total.round_dp(2),
    }
}

fn add_or_keep(sum: Decimal, amount: Decimal) -> Decimal {
    sum.checked_add(amount).unwrap_or_else(|| {
        tracing::warn!(%amount, "sum out of range, amount left out");
        sum
    })
}
