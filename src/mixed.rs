//! Multi-commodity amounts.
//!
//! hledger reports balances and posting amounts as a list of
//! single-commodity amounts. `MixedAmount` keeps that list merged: at
//! most one entry per commodity, quantities summed exactly.

use serde::{Deserialize, Serialize};
use std::ops;

use crate::amount::Amount;

/// A set of amounts, one per commodity. Serializes as a plain JSON array.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MixedAmount(Vec<Amount>);

impl MixedAmount {
    pub fn iter(&self) -> impl Iterator<Item = &Amount> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Renders each commodity's amount, in order.
    pub fn format(&self) -> Vec<String> {
        self.0.iter().map(Amount::format).collect()
    }

    fn merge_into(entries: &mut Vec<Amount>, amount: &Amount) {
        match entries
            .iter_mut()
            .find(|entry| entry.commodity == amount.commodity)
        {
            Some(entry) => entry.quantity = entry.quantity + amount.quantity,
            None => entries.push(amount.clone()),
        }
    }
}

impl From<&Amount> for MixedAmount {
    fn from(amount: &Amount) -> Self {
        Self(vec![amount.clone()])
    }
}

impl From<Vec<Amount>> for MixedAmount {
    fn from(amounts: Vec<Amount>) -> Self {
        let mut entries = Vec::with_capacity(amounts.len());
        for amount in &amounts {
            Self::merge_into(&mut entries, amount);
        }
        Self(entries)
    }
}

impl ops::Add for MixedAmount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        let mut entries = self.0;
        for amount in &rhs.0 {
            Self::merge_into(&mut entries, amount);
        }
        Self(entries)
    }
}

impl ops::Sub for MixedAmount {
    type Output = Self;

    /// Adds the negation of `rhs` and drops entries that cancel to an
    /// exact zero.
    fn sub(self, rhs: Self) -> Self::Output {
        let mut entries = self.0;
        for amount in &rhs.0 {
            let negated = Amount {
                quantity: -amount.quantity,
                ..amount.clone()
            };
            Self::merge_into(&mut entries, &negated);
        }
        entries.retain(|entry| !entry.quantity.is_zero());
        Self(entries)
    }
}

/// Order-insensitive: two mixed amounts are equal when they carry the
/// same per-commodity entries.
impl PartialEq for MixedAmount {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .all(|amount| other.0.iter().any(|entry| entry == amount))
    }
}
